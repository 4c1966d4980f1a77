use crate::error::Result;
use crate::models::platform::{AuditLogOptions, AuditLogs, User, UserBody, UserRef};
use crate::models::EmptyResponse;
use crate::paginate::PageResult;
use crate::rest::Client;
use crate::validation::check_page_size;
use reqwest::Method;

const AUDIT_LOG: &str = "/core/v1/audit_log";
const USER: &str = "/core/v1/user";

/// Organization-wide endpoints
#[derive(Debug, Clone, Copy)]
pub struct CoreApi<'a> {
    pub(super) client: &'a Client,
}

impl<'a> CoreApi<'a> {
    /// Audit log entries within a time range
    pub fn get_audit_logs(&self, options: AuditLogOptions) -> PageResult<AuditLogs> {
        check_page_size(options.page_size, 200)?;
        let first: AuditLogs = self.client.get(AUDIT_LOG, &options)?;
        self.client.follow_pages(first, |cursor| {
            let page = AuditLogOptions {
                page_token: cursor.clone().unwrap_or_default(),
                ..options.clone()
            };
            self.client.get(AUDIT_LOG, &page)
        })
    }

    pub fn delete_user(&self, user: &UserRef) -> Result<EmptyResponse> {
        user.validate()?;
        self.client.delete(USER, user)
    }

    pub fn get_user(&self, user: &UserRef) -> Result<User> {
        user.validate()?;
        self.client.get(USER, user)
    }

    pub fn create_user(&self, body: &UserBody) -> Result<User> {
        self.client.send_json(Method::POST, USER, &(), body)
    }

    pub fn update_user(&self, user: &UserRef, body: &UserBody) -> Result<User> {
        user.validate()?;
        self.client.send_json(Method::PUT, USER, user, body)
    }
}
