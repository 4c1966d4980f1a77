//! Query-string serialization for request options.
//!
//! Every options type implements [`QueryParams`], usually through the
//! [`query_params!`](crate::query_params) macro, which keeps the wire name
//! next to each field and emits fields in declaration order. Each field type
//! decides for itself when it is "absent" through [`QueryValue`]:
//!
//! - `String`: omitted when empty
//! - `Option<T>`: omitted when `None`, included even when the value is zero or `false`
//! - `Vec<T>`: omitted when empty, otherwise `name=v1,v2,...`
//! - nested options types: flattened into the parent without a wrapping key
//!
//! Values are percent-encoded; list separators stay literal commas.

use url::form_urlencoded::byte_serialize;

/// Accumulates `name=value` pairs joined with `&`
#[derive(Debug, Default, Clone)]
pub struct QueryWriter {
    buf: String,
}

impl QueryWriter {
    pub fn new() -> Self {
        QueryWriter::default()
    }

    /// Append a single pair, encoding the value
    pub fn push(&mut self, name: &str, value: &str) {
        self.separator();
        self.buf.push_str(name);
        self.buf.push('=');
        self.buf.extend(byte_serialize(value.as_bytes()));
    }

    /// Append `name=v1,v2,...`, encoding each element separately
    pub fn push_list<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.separator();
        self.buf.push_str(name);
        self.buf.push('=');
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
            }
            self.buf.extend(byte_serialize(value.as_ref().as_bytes()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> String {
        self.buf
    }

    fn separator(&mut self) {
        if !self.buf.is_empty() {
            self.buf.push('&');
        }
    }
}

/// Percent-encode an identifier for use as a single URL path segment
pub fn path_segment(id: &str) -> String {
    byte_serialize(id.as_bytes()).collect::<String>().replace('+', "%20")
}

/// A structured set of query parameters
pub trait QueryParams {
    fn write_query(&self, writer: &mut QueryWriter);

    /// Serialize to a query string without leading `?`
    fn to_query(&self) -> String {
        let mut writer = QueryWriter::new();
        self.write_query(&mut writer);
        writer.finish()
    }
}

/// A single field of an options type
pub trait QueryValue {
    fn write_value(&self, name: &str, writer: &mut QueryWriter);
}

/// Scalars that can appear inside an `Option` or a `Vec`
pub trait QueryScalar {
    fn to_query_string(&self) -> String;
}

impl QueryScalar for String {
    fn to_query_string(&self) -> String {
        self.clone()
    }
}

impl QueryScalar for bool {
    fn to_query_string(&self) -> String {
        self.to_string()
    }
}

impl QueryScalar for i64 {
    fn to_query_string(&self) -> String {
        self.to_string()
    }
}

impl QueryScalar for f64 {
    fn to_query_string(&self) -> String {
        format!("{:.6}", self)
    }
}

impl QueryValue for String {
    fn write_value(&self, name: &str, writer: &mut QueryWriter) {
        if !self.is_empty() {
            writer.push(name, self);
        }
    }
}

impl<T: QueryScalar> QueryValue for Option<T> {
    fn write_value(&self, name: &str, writer: &mut QueryWriter) {
        if let Some(ref value) = self {
            writer.push(name, &value.to_query_string());
        }
    }
}

impl<T: QueryScalar> QueryValue for Vec<T> {
    fn write_value(&self, name: &str, writer: &mut QueryWriter) {
        if !self.is_empty() {
            writer.push_list(name, self.iter().map(QueryScalar::to_query_string));
        }
    }
}

impl QueryParams for () {
    fn write_query(&self, _writer: &mut QueryWriter) {}
}

impl<P: QueryParams + ?Sized> QueryParams for &P {
    fn write_query(&self, writer: &mut QueryWriter) {
        (**self).write_query(writer)
    }
}

/// Options prefixed with identifiers the endpoint requires
/// (a camera ID, a site ID, ...). Required pairs are written first,
/// with the same empty-string rule as optional string fields.
#[derive(Debug, Clone, Default)]
pub struct ScopedQuery<P> {
    required: Vec<(&'static str, Vec<String>)>,
    pub options: P,
}

impl<P> ScopedQuery<P> {
    pub fn new(options: P) -> Self {
        ScopedQuery {
            required: Vec::new(),
            options,
        }
    }

    pub fn with(mut self, name: &'static str, value: impl ToString) -> Self {
        let value = value.to_string();
        let values = if value.is_empty() { Vec::new() } else { vec![value] };
        self.required.push((name, values));
        self
    }

    /// Required list, comma-joined like a `Vec` field
    pub fn with_list<S: ToString>(mut self, name: &'static str, values: &[S]) -> Self {
        self.required
            .push((name, values.iter().map(ToString::to_string).collect()));
        self
    }
}

impl ScopedQuery<()> {
    /// A query made only of a single required pair
    pub fn only(name: &'static str, value: impl ToString) -> Self {
        ScopedQuery::new(()).with(name, value)
    }
}

impl<P: QueryParams> QueryParams for ScopedQuery<P> {
    fn write_query(&self, writer: &mut QueryWriter) {
        for (name, values) in &self.required {
            values.write_value(name, writer);
        }
        self.options.write_query(writer);
    }
}

/// Define an options struct together with its [`QueryParams`] implementation.
///
/// ```
/// verkada_client::query_params! {
///     #[derive(Debug, Default)]
///     pub struct PageOptions {
///         pub page_token: String => "page_token",
///         pub page_size: Option<i64> => "page_size",
///     }
/// }
///
/// use verkada_client::query::QueryParams;
/// let options = PageOptions { page_size: Some(50), ..Default::default() };
/// assert_eq!(options.to_query(), "page_size=50");
/// ```
#[macro_export]
macro_rules! query_params {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty => $wire:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::query::QueryParams for $name {
            fn write_query(&self, writer: &mut $crate::query::QueryWriter) {
                $( $crate::query::QueryValue::write_value(&self.$field, $wire, writer); )*
            }
        }

        impl $crate::query::QueryValue for $name {
            fn write_value(&self, _name: &str, writer: &mut $crate::query::QueryWriter) {
                $crate::query::QueryParams::write_query(self, writer);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::query_params! {
        #[derive(Debug, Default)]
        struct TimeRange {
            start_time: Option<i64> => "start_time",
            end_time: Option<i64> => "end_time",
        }
    }

    crate::query_params! {
        #[derive(Debug, Default)]
        struct SearchOptions {
            label: String => "label",
            include_image_url: Option<bool> => "include_image_url",
            tags: Vec<String> => "tags",
            range: TimeRange => "range",
            ratio: Option<f64> => "ratio",
        }
    }

    #[test]
    fn test_all_absent_is_empty() {
        assert_eq!(SearchOptions::default().to_query(), "");
    }

    #[test]
    fn test_explicit_false_is_kept() {
        let options = SearchOptions {
            include_image_url: Some(false),
            ..Default::default()
        };
        assert_eq!(options.to_query(), "include_image_url=false");
    }

    #[test]
    fn test_explicit_zero_is_kept() {
        let options = SearchOptions {
            range: TimeRange {
                start_time: Some(0),
                end_time: None,
            },
            ..Default::default()
        };
        assert_eq!(options.to_query(), "start_time=0");
    }

    #[test]
    fn test_list_is_comma_joined_once() {
        let options = SearchOptions {
            tags: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            ..Default::default()
        };
        let query = options.to_query();
        assert_eq!(query, "tags=a,b,c");
        assert_eq!(query.matches("tags=").count(), 1);
    }

    #[test]
    fn test_declaration_order_and_nesting() {
        let options = SearchOptions {
            label: "lobby".to_string(),
            include_image_url: Some(true),
            tags: vec!["x".to_string()],
            range: TimeRange {
                start_time: Some(10),
                end_time: Some(20),
            },
            ratio: Some(1.5),
        };
        assert_eq!(
            options.to_query(),
            "label=lobby&include_image_url=true&tags=x&start_time=10&end_time=20&ratio=1.500000"
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let options = SearchOptions {
            label: "a&b=c d".to_string(),
            tags: vec!["x,y".to_string(), "z".to_string()],
            ..Default::default()
        };
        assert_eq!(options.to_query(), "label=a%26b%3Dc+d&tags=x%2Cy,z");
    }

    #[test]
    fn test_scoped_query_writes_required_first() {
        let query = ScopedQuery::new(TimeRange {
            start_time: Some(1),
            end_time: None,
        })
        .with("camera_id", "cam-1");
        assert_eq!(query.to_query(), "camera_id=cam-1&start_time=1");

        assert_eq!(ScopedQuery::only("site_id", "").to_query(), "");
        assert_eq!(
            ScopedQuery::new(()).with_list("device_ids", &["a b", "c"]).to_query(),
            "device_ids=a+b,c"
        );
        assert_eq!(().to_query(), "");
    }

    #[test]
    fn test_path_segment_escapes_separators() {
        assert_eq!(path_segment("lvl-1"), "lvl-1");
        assert_eq!(path_segment("a/b?c#d"), "a%2Fb%3Fc%23d");
        assert_eq!(path_segment("x y+z"), "x%20y%2Bz");
    }
}
