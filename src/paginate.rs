//! Cursor-driven auto-pagination.
//!
//! Paginated response types implement [`Paginated`]; [`Client::paginate`]
//! follows the continuation cursor until it is exhausted, appending every
//! page's items to the first page.

use crate::error::VerkadaError;
use crate::rest::Client;
use std::fmt;
use tracing::{debug, warn};

/// A continuation cursor. Exhausted cursors mean "no more pages".
pub trait Cursor: Clone + PartialEq {
    fn is_exhausted(&self) -> bool;
}

impl Cursor for Option<String> {
    fn is_exhausted(&self) -> bool {
        self.as_deref().map_or(true, str::is_empty)
    }
}

impl Cursor for Option<i64> {
    fn is_exhausted(&self) -> bool {
        self.map_or(true, |c| c == 0)
    }
}

/// A response page carrying a continuation cursor and a list of items
pub trait Paginated: Sized {
    type Cursor: Cursor;

    /// Cursor to request the page after this one
    fn next_cursor(&self) -> Self::Cursor;

    /// Append the items of `page` to this response and adopt its cursor
    fn extend_page(&mut self, page: Self);
}

/// A failed multi-page fetch, with everything gathered before the failure
pub struct Partial<T> {
    /// Accumulated pages, `None` if the first request already failed
    pub partial: Option<T>,
    pub error: VerkadaError,
}

impl<T> Partial<T> {
    /// Drop the partial data and keep the error
    pub fn into_error(self) -> VerkadaError {
        self.error
    }
}

impl<T> From<VerkadaError> for Partial<T> {
    fn from(error: VerkadaError) -> Self {
        Partial {
            partial: None,
            error,
        }
    }
}

impl<T> fmt::Debug for Partial<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partial")
            .field("has_partial", &self.partial.is_some())
            .field("error", &self.error)
            .finish()
    }
}

impl<T> fmt::Display for Partial<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.partial.is_some() {
            write!(f, "pagination stopped early: {}", self.error)
        } else {
            write!(f, "{}", self.error)
        }
    }
}

impl<T> std::error::Error for Partial<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Result of a paginated call
pub type PageResult<T> = std::result::Result<T, Partial<T>>;

impl Client {
    /// Follow cursors from `first` until exhausted.
    ///
    /// `fetch` is called with the cursor of the last page received. When a
    /// page fails, the pages gathered so far are returned alongside the error.
    /// A page that hands back the cursor it was fetched with ends the walk.
    pub fn paginate<T, F>(&self, first: T, mut fetch: F) -> PageResult<T>
    where
        T: Paginated,
        F: FnMut(&T::Cursor) -> crate::error::Result<T>,
    {
        let mut acc = first;
        let mut pages = 1usize;
        loop {
            let cursor = acc.next_cursor();
            if cursor.is_exhausted() {
                break;
            }
            match fetch(&cursor) {
                Ok(page) => {
                    acc.extend_page(page);
                    pages += 1;
                    debug!(pages, "fetched next page");
                    if acc.next_cursor() == cursor {
                        warn!(pages, "server repeated the page cursor, stopping");
                        break;
                    }
                }
                Err(error) => {
                    return Err(Partial {
                        partial: Some(acc),
                        error,
                    })
                }
            }
        }
        Ok(acc)
    }

    /// [`Client::paginate`] when auto-pagination is enabled, otherwise the
    /// first page as received, cursor included
    pub fn follow_pages<T, F>(&self, first: T, fetch: F) -> PageResult<T>
    where
        T: Paginated,
        F: FnMut(&T::Cursor) -> crate::error::Result<T>,
    {
        if self.auto_paginate() {
            self.paginate(first, fetch)
        } else {
            Ok(first)
        }
    }
}

/// Implement [`Paginated`] for a response struct from its cursor field and
/// item list fields.
#[macro_export]
macro_rules! impl_paginated {
    ($ty:ty, $cursor_ty:ty, $cursor:ident, [$($items:ident),+ $(,)?]) => {
        impl $crate::paginate::Paginated for $ty {
            type Cursor = $cursor_ty;

            fn next_cursor(&self) -> Self::Cursor {
                self.$cursor.clone()
            }

            fn extend_page(&mut self, page: Self) {
                $( self.$items.extend(page.$items); )+
                self.$cursor = page.$cursor;
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_exhaustion() {
        assert!(None::<String>.is_exhausted());
        assert!(Some(String::new()).is_exhausted());
        assert!(!Some("tok".to_string()).is_exhausted());
        assert!(None::<i64>.is_exhausted());
        assert!(Some(0i64).is_exhausted());
        assert!(!Some(17i64).is_exhausted());
    }

    #[test]
    fn test_partial_from_error() {
        let partial: Partial<Vec<u8>> = VerkadaError::validation("bad").into();
        assert!(partial.partial.is_none());
        assert!(partial.to_string().contains("bad"));
        assert!(partial.into_error().is_validation());
    }
}
