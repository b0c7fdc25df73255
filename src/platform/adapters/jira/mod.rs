//! Jira adapter speaking REST API v2 with basic authentication.
//!
//! Issues map to tasks keyed by issue key (`PROJ-123`). The numeric issue id
//! needed for updates is kept in task metadata under `jira_id`; assignees
//! are addressed through `jira_account_id` on the user's metadata. Status
//! changes go through workflow transitions, so an update fails when the
//! workflow offers no transition into the requested status.

mod client;
mod config;
mod factory;
pub mod mapping;
mod wire;

pub use client::{DEFAULT_PAGE_SIZE, JiraClient};
pub use config::{BASE_URL_KEY, EMAIL_KEY, JiraConfig, TOKEN_KEY};
pub use factory::JiraFactory;
