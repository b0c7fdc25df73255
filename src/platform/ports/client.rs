//! Capability contract every platform adapter implements.

use crate::platform::domain::{PlatformInfo, RequestContext};
use crate::platform::error::PlatformResult;
use crate::task::domain::{Project, Task, TaskFilter, User};
use async_trait::async_trait;

/// Uniform task, project and user operations against one platform.
///
/// Every operation except [`PlatformClient::platform_info`] takes the
/// request context first and abandons its wire call once the context is
/// cancelled or expires. Implementations never retry; retry policy belongs
/// to the caller. Clients hold only immutable connection configuration, so
/// one instance may serve concurrent callers.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Creates a task and returns the platform's view of it.
    ///
    /// # Errors
    ///
    /// Returns `invalid_input` when a field the platform requires is absent,
    /// before any network call is made.
    async fn create_task(&self, ctx: &RequestContext, task: &Task) -> PlatformResult<Task>;

    /// Fetches a task by its platform-native identifier.
    ///
    /// # Errors
    ///
    /// Returns `not_found` carrying `id` when the platform has no such task.
    async fn get_task(&self, ctx: &RequestContext, id: &str) -> PlatformResult<Task>;

    /// Writes the task's canonical fields back to the platform.
    ///
    /// # Errors
    ///
    /// Returns `invalid_input` when the metadata key holding the platform's
    /// internal identifier is missing.
    async fn update_task(&self, ctx: &RequestContext, task: &Task) -> PlatformResult<Task>;

    /// Deletes a task by its platform-native identifier.
    ///
    /// # Errors
    ///
    /// Returns `not_found` carrying `id` when the platform has no such task.
    async fn delete_task(&self, ctx: &RequestContext, id: &str) -> PlatformResult<()>;

    /// Lists tasks matching `filter`.
    async fn list_tasks(&self, ctx: &RequestContext, filter: &TaskFilter)
    -> PlatformResult<Vec<Task>>;

    /// Lists projects visible to the authenticated user.
    async fn list_projects(&self, ctx: &RequestContext) -> PlatformResult<Vec<Project>>;

    /// Fetches one project.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the platform has no such project.
    async fn get_project(&self, ctx: &RequestContext, id: &str) -> PlatformResult<Project>;

    /// Returns the authenticated user.
    async fn get_current_user(&self, ctx: &RequestContext) -> PlatformResult<User>;

    /// Searches users by free text.
    async fn search_users(&self, ctx: &RequestContext, query: &str) -> PlatformResult<Vec<User>>;

    /// Describes the platform this client talks to.
    fn platform_info(&self) -> PlatformInfo;

    /// Performs the lightest authenticated call available.
    async fn health_check(&self, ctx: &RequestContext) -> PlatformResult<()>;
}
