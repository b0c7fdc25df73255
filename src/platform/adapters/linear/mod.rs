//! Linear adapter speaking the GraphQL API with a bearer token.
//!
//! Issues map to tasks keyed by their short identifier (`ENG-123`). The
//! internal issue id used by mutations lives in task metadata under
//! `linear_id`, and the owning team under `team_id`. Offset pagination is
//! emulated by over-fetching and skipping, bounded by Linear's page limit.

mod client;
mod config;
mod factory;
pub mod mapping;
mod queries;
mod wire;

pub use client::{
    DEFAULT_PAGE_SIZE, LinearClient, MAX_PAGE_SIZE, PROJECT_PAGE_SIZE, USER_SEARCH_PAGE_SIZE,
};
pub use config::{BASE_URL_KEY, DEFAULT_ENDPOINT, LinearConfig, TOKEN_KEY};
pub use factory::LinearFactory;
