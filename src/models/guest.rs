//! Guest management: deny lists, sites, visits, guest types and hosts.

use super::nullable;
use crate::paginate::Paginated;
use serde::Deserialize;

crate::query_params! {
    #[derive(Debug, Clone, Default)]
    pub struct VisitsOptions {
        pub page_token: String => "page_token",
        pub page_size: Option<i64> => "page_size",
    }
}

crate::query_params! {
    /// Cursor-style listing options of the v2 guest endpoints
    #[derive(Debug, Clone, Default)]
    pub struct GuestTypesOptions {
        pub cursor: String => "cursor",
        pub limit: Option<i64> => "limit",
    }
}

crate::query_params! {
    #[derive(Debug, Clone, Default)]
    pub struct HostsOptions {
        pub email: String => "email",
        pub cursor: String => "cursor",
        pub limit: Option<i64> => "limit",
    }
}

/// Result of a deny list upload. Rejected rows come back as a base64 CSV.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DenyListUpload {
    pub base64_ascii_error_csv: Option<String>,
    pub org_id: Option<String>,
    pub site_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GuestSites {
    #[serde(deserialize_with = "nullable")]
    pub guest_sites: Vec<GuestSite>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GuestSite {
    pub org_id: Option<String>,
    pub site_id: Option<String>,
    pub site_name: Option<String>,
}

/// Visits of a site. The continuation cursor travels on the last visit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GuestVisits {
    #[serde(deserialize_with = "nullable")]
    pub visits: Vec<Visit>,
}

impl Paginated for GuestVisits {
    type Cursor = Option<String>;

    fn next_cursor(&self) -> Option<String> {
        self.visits.last().and_then(|v| v.next_page_token.clone())
    }

    fn extend_page(&mut self, page: Self) {
        if page.visits.is_empty() {
            // an empty page ends the listing
            if let Some(last) = self.visits.last_mut() {
                last.next_page_token = None;
            }
        } else {
            self.visits.extend(page.visits);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Visit {
    pub approval_status: Option<String>,
    pub check_in_time: Option<i64>,
    pub deleted: Option<bool>,
    pub device_name: Option<String>,
    pub guest: Option<Guest>,
    pub host: Option<Host>,
    pub host_approval_status: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub hosts: Vec<Host>,
    pub is_contactless: Option<bool>,
    pub next_page_token: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub open_ended_responses: Vec<OpenEndedResponse>,
    #[serde(deserialize_with = "nullable")]
    pub questionnaires: Vec<Questionnaire>,
    pub security_screen_status: Option<String>,
    pub sign_out_time: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub signatures: Vec<Signature>,
    pub site_id: Option<String>,
    pub visit_id: Option<String>,
    pub visit_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Guest {
    pub created: Option<i64>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub guest_id: Option<String>,
    pub has_photo: Option<bool>,
    pub image_url: Option<String>,
    pub is_sign_urls: Option<bool>,
    pub person_id: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Host {
    pub delivery_location: Option<String>,
    pub first_name: Option<String>,
    pub full_name: Option<String>,
    pub has_delegate: Option<bool>,
    pub has_email: Option<bool>,
    pub has_phone_number: Option<bool>,
    pub host_id: Option<String>,
    pub last_name: Option<String>,
    pub original_first_name: Option<String>,
    pub requires_host_approval: Option<bool>,
    pub student_id: Option<String>,
    pub student_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OpenEndedResponse {
    #[serde(deserialize_with = "nullable")]
    pub chosen_answers: Vec<String>,
    pub question: Option<String>,
    pub response: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Questionnaire {
    pub passed: Option<bool>,
    pub questionnaire: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Signature {
    pub doc_signature_id: Option<String>,
    pub document_id: Option<String>,
    pub pdf_url: Option<String>,
    pub visit_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GuestTypes {
    pub cursor: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub items: Vec<GuestType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GuestType {
    pub enabled_for_invites: Option<bool>,
    pub guest_type_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Hosts {
    pub cursor: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub items: Vec<HostEntry>,
}

/// A host as listed by the v2 hosts endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct HostEntry {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub full_name: Option<String>,
    pub has_delegate: Option<bool>,
    pub host_id: Option<String>,
    pub last_name: Option<String>,
    pub original_first_name: Option<String>,
    pub phone_number: Option<String>,
    pub requires_host_approval: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paginate::Cursor;

    fn visits(json: &str) -> GuestVisits {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_cursor_is_on_last_visit() {
        let page = visits(r#"{"visits":[{"visit_id":"a","next_page_token":"x"},{"visit_id":"b","next_page_token":"t2"}]}"#);
        assert_eq!(page.next_cursor().as_deref(), Some("t2"));
        assert!(GuestVisits::default().next_cursor().is_exhausted());
    }

    #[test]
    fn test_empty_page_ends_listing() {
        let mut acc = visits(r#"{"visits":[{"visit_id":"a","next_page_token":"t1"}]}"#);
        acc.extend_page(visits(r#"{"visits":[{"visit_id":"b","next_page_token":"t2"}]}"#));
        assert_eq!(acc.visits.len(), 2);
        assert_eq!(acc.next_cursor().as_deref(), Some("t2"));

        acc.extend_page(visits(r#"{"visits":[]}"#));
        assert_eq!(acc.visits.len(), 2);
        assert!(acc.next_cursor().is_exhausted());
    }
}
