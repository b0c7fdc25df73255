//! Query-shape value object for listing tasks.

use super::{Platform, Priority, TaskStatus};
use serde::{Deserialize, Serialize};

/// Predicates for a task listing.
///
/// `None` and empty collections leave the corresponding dimension
/// unconstrained. Each adapter translates the filter into its own native
/// query language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Restrict to one platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    /// Restrict to one canonical status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Restrict to one canonical priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Assignee handle; `"me"` targets the authenticated user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Owning project identifier or key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Labels that must all be present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Free-text search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Maximum number of results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of results to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl TaskFilter {
    /// Creates an unconstrained filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one platform.
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to one priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts to one assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = non_empty(assignee.into());
        self
    }

    /// Restricts to one project.
    #[must_use]
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = non_empty(project_id.into());
        self
    }

    /// Requires every given label. Blank and repeated labels are dropped.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = String>) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for label in labels {
            let trimmed = label.trim();
            if !trimmed.is_empty() && !unique.iter().any(|existing| existing == trimmed) {
                unique.push(trimmed.to_owned());
            }
        }
        self.labels = unique;
        self
    }

    /// Adds free-text search.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = non_empty(query.into());
        self
    }

    /// Caps the number of results.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips leading results.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns the assignee, ignoring blank values.
    #[must_use]
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref().filter(|value| !value.is_empty())
    }

    /// Returns the project identifier, ignoring blank values.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref().filter(|value| !value.is_empty())
    }

    /// Returns the free-text search, ignoring blank values.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref().filter(|value| !value.is_empty())
    }

    /// Returns whether no predicate is set. Pagination is not a predicate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.platform.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee().is_none()
            && self.project_id().is_none()
            && self.labels.is_empty()
            && self.query().is_none()
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
