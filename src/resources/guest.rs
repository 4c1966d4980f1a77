use crate::error::Result;
use crate::models::guest::*;
use crate::models::EmptyResponse;
use crate::paginate::PageResult;
use crate::query::ScopedQuery;
use crate::rest::Client;
use crate::validation::{check_page_size, check_time_window};
use reqwest::Method;
use std::path::Path;

const DENY_LIST: &str = "/guest/v1/deny_list";
const SITES: &str = "/guest/v1/sites";
const VISITS: &str = "/guest/v1/visits";
const GUEST_TYPES: &str = "/v2/guest/guest_types";
const HOSTS: &str = "/v2/guest/hosts";

/// Longest time range a visits query may span, in seconds
pub const MAX_VISITS_WINDOW: i64 = 86_400;

/// Guest management endpoints
#[derive(Debug, Clone, Copy)]
pub struct GuestApi<'a> {
    pub(super) client: &'a Client,
}

impl<'a> GuestApi<'a> {
    pub fn delete_deny_list(&self, site_id: &str) -> Result<EmptyResponse> {
        self.client
            .delete(DENY_LIST, &ScopedQuery::only("site_id", site_id))
    }

    /// Replace the deny list of a site with the entries of a CSV file
    pub fn post_deny_list(&self, site_id: &str, file_path: impl AsRef<Path>) -> Result<DenyListUpload> {
        self.client.request_with_file(
            Method::POST,
            DENY_LIST,
            &ScopedQuery::only("site_id", site_id),
            file_path,
            "text/csv",
        )
    }

    pub fn get_guest_sites(&self) -> Result<GuestSites> {
        self.client.get(SITES, &())
    }

    /// Visits of a site within a window of at most one day
    pub fn get_guest_visits(
        &self,
        site_id: &str,
        start_time: i64,
        end_time: i64,
        options: VisitsOptions,
    ) -> PageResult<GuestVisits> {
        check_time_window(Some(start_time), Some(end_time), MAX_VISITS_WINDOW)?;
        check_page_size(options.page_size, 200)?;

        let query = ScopedQuery::new(options)
            .with("site_id", site_id)
            .with("start_time", start_time)
            .with("end_time", end_time);
        let first: GuestVisits = self.client.get(VISITS, &query)?;
        self.client.follow_pages(first, |cursor| {
            let mut page = query.clone();
            page.options.page_token = cursor.clone().unwrap_or_default();
            self.client.get(VISITS, &page)
        })
    }

    pub fn get_guest_types(&self, site_id: &str, options: GuestTypesOptions) -> Result<GuestTypes> {
        let query = ScopedQuery::new(options).with("site_id", site_id);
        self.client.get(GUEST_TYPES, &query)
    }

    pub fn get_hosts(&self, site_id: &str, options: HostsOptions) -> Result<Hosts> {
        let query = ScopedQuery::new(options).with("site_id", site_id);
        self.client.get(HOSTS, &query)
    }
}
