//! Linear GraphQL implementation of [`PlatformClient`].

use super::config::LinearConfig;
use super::mapping::{
    self, LINEAR_ID, TEAM_ID, build_issue_filter, issue_to_task, label_filter, project_to_project,
    recorded_label_ids, state_type, status_changed, user_to_user,
};
use super::queries;
use super::wire;
use crate::platform::adapters::SharedClock;
use crate::platform::adapters::http::classify::{decode_failure, status_failure, transport_failure};
use crate::platform::domain::{PlatformInfo, RequestContext};
use crate::platform::error::{ErrorCode, PlatformError, PlatformResult};
use crate::platform::ports::{HttpMethod, HttpRequest, HttpTransport, PlatformClient};
use crate::task::domain::{Platform, Project, Task, TaskFilter, User};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;

/// Page size used when a filter sets no limit.
pub const DEFAULT_PAGE_SIZE: u32 = 50;
/// Largest page Linear serves.
pub const MAX_PAGE_SIZE: u32 = 250;
/// Projects fetched by [`PlatformClient::list_projects`].
pub const PROJECT_PAGE_SIZE: u32 = 100;
/// Users fetched by [`PlatformClient::search_users`].
pub const USER_SEARCH_PAGE_SIZE: u32 = 20;

/// Client for one Linear workspace.
#[derive(Clone)]
pub struct LinearClient {
    config: LinearConfig,
    transport: Arc<dyn HttpTransport>,
    clock: SharedClock,
}

impl LinearClient {
    /// Creates a client sending requests through `transport`.
    #[must_use]
    pub fn new(
        config: LinearConfig,
        transport: Arc<dyn HttpTransport>,
        clock: SharedClock,
    ) -> Self {
        Self {
            config,
            transport,
            clock,
        }
    }

    /// Returns the connection settings.
    #[must_use]
    pub const fn config(&self) -> &LinearConfig {
        &self.config
    }

    /// Runs one GraphQL operation and decodes its `data` member.
    ///
    /// `subject` names the requested entity; errors reporting a missing
    /// entity become `not_found` carrying it.
    async fn graphql<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        query: &str,
        variables: Value,
        action: &str,
        subject: &str,
    ) -> PlatformResult<T> {
        let request = HttpRequest::new(HttpMethod::Post, self.config.endpoint())
            .with_header("Authorization", self.config.authorization_header())
            .with_header("Content-Type", "application/json")
            .with_json(json!({ "query": query, "variables": variables }));

        let response = ctx
            .run(self.transport.send(request))
            .await
            .map_err(|err| err.with_platform(Platform::Linear.as_str()).with_task_id(subject))?
            .map_err(|err| transport_failure(Platform::Linear, action, err).with_task_id(subject))?;

        let envelope = serde_json::from_str::<wire::Envelope>(&response.body);
        if !response.is_success() {
            let detail = envelope
                .as_ref()
                .ok()
                .and_then(|body| body.errors.first())
                .map(|error| error.message.clone());
            return Err(status_failure(Platform::Linear, action, &response, detail)
                .with_task_id(subject));
        }

        let body = envelope.map_err(|err| {
            decode_failure(Platform::Linear, action, err).with_task_id(subject)
        })?;
        if let Some(first) = body.errors.first() {
            return Err(graphql_failure(first, action, subject));
        }
        let data = body.data.unwrap_or(Value::Null);
        serde_json::from_value(data)
            .map_err(|err| decode_failure(Platform::Linear, action, err).with_task_id(subject))
    }

    /// Finds the team's workflow state matching the task's status.
    async fn resolve_state_id(&self, ctx: &RequestContext, task: &Task) -> PlatformResult<String> {
        let wanted = state_type(task.status());
        let team_id = task.metadata().get_str(TEAM_ID).ok_or_else(|| {
            PlatformError::invalid_input("task metadata lacks team_id needed to change status")
                .with_platform(Platform::Linear.as_str())
                .with_task_id(task.id())
        })?;
        let filter = json!({
            "team": { "id": { "eq": team_id } },
            "type": { "eq": wanted },
        });
        let data: wire::WorkflowStatesData = self
            .graphql(
                ctx,
                queries::WORKFLOW_STATES,
                json!({ "filter": filter }),
                "list workflow states",
                task.id(),
            )
            .await?;

        data.workflow_states
            .nodes
            .into_iter()
            .find(|state| state.state_type.eq_ignore_ascii_case(wanted))
            .map(|state| state.id)
            .ok_or_else(|| {
                PlatformError::api(format!("no workflow state of type {wanted} for team"))
                    .with_platform(Platform::Linear.as_str())
                    .with_task_id(task.id())
            })
    }

    /// Resolves the task's label names to Linear label ids.
    ///
    /// Labels the task was read with reuse their recorded ids; the rest are
    /// looked up by exact name. A name with no matching label is rejected.
    async fn resolve_label_ids(
        &self,
        ctx: &RequestContext,
        task: &Task,
    ) -> PlatformResult<Vec<String>> {
        let (mut ids, unknown) = recorded_label_ids(task);
        if unknown.is_empty() {
            return Ok(ids);
        }

        let filter = label_filter(&unknown, task.metadata().get_str(TEAM_ID));
        let data: wire::IssueLabelsData = self
            .graphql(
                ctx,
                queries::ISSUE_LABELS,
                json!({ "filter": filter }),
                "list labels",
                task.id(),
            )
            .await?;

        let mut missing_names = Vec::new();
        for name in &unknown {
            data.issue_labels
                .nodes
                .iter()
                .find(|label| label.name == *name)
                .map_or_else(
                    || missing_names.push(name.as_str()),
                    |label| ids.push(label.id.clone()),
                );
        }
        if !missing_names.is_empty() {
            return Err(PlatformError::invalid_input(format!(
                "unknown Linear labels: {}",
                missing_names.join(", ")
            ))
            .with_platform(Platform::Linear.as_str())
            .with_task_id(task.id()));
        }
        tracing::debug!(task_id = task.id(), resolved = unknown.len(), "resolved Linear labels");
        Ok(ids)
    }
}

fn graphql_failure(error: &wire::GraphQlError, action: &str, subject: &str) -> PlatformError {
    let code = error.code().to_ascii_uppercase();
    let lowered = error.message.to_ascii_lowercase();
    let kind = if code.contains("NOT_FOUND") || lowered.contains("not found") {
        ErrorCode::NotFound
    } else if code.contains("AUTHENTICATION") {
        ErrorCode::AuthenticationFailed
    } else if code.contains("FORBIDDEN") {
        ErrorCode::PermissionDenied
    } else if code.contains("RATELIMITED") {
        ErrorCode::RateLimited
    } else {
        ErrorCode::PlatformApiError
    };
    tracing::debug!(action, %kind, message = %error.message, "Linear reported a GraphQL error");
    let base = if kind == ErrorCode::NotFound {
        PlatformError::from_code(kind)
    } else {
        PlatformError::new(kind, format!("{action} failed: {}", error.message))
    };
    base.with_platform(Platform::Linear.as_str())
        .with_task_id(subject)
}

fn missing(subject: &str) -> PlatformError {
    PlatformError::not_found(subject).with_platform(Platform::Linear.as_str())
}

fn rejected(action: &str, subject: &str) -> PlatformError {
    PlatformError::api(format!("{action} was not successful"))
        .with_platform(Platform::Linear.as_str())
        .with_task_id(subject)
}

#[async_trait]
impl PlatformClient for LinearClient {
    async fn create_task(&self, ctx: &RequestContext, task: &Task) -> PlatformResult<Task> {
        let team_id = task.metadata().get_str(TEAM_ID).ok_or_else(|| {
            PlatformError::invalid_input("team_id metadata is required for Linear issues")
                .with_platform(Platform::Linear.as_str())
        })?;
        let mut input = mapping::issue_input(task);
        input.insert("teamId".to_owned(), json!(team_id));
        let label_ids = self.resolve_label_ids(ctx, task).await?;
        if !label_ids.is_empty() {
            input.insert("labelIds".to_owned(), json!(label_ids));
        }

        let data: wire::CreateData = self
            .graphql(
                ctx,
                queries::CREATE_ISSUE,
                json!({ "input": input }),
                "create issue",
                "",
            )
            .await?;
        let payload = data.issue_create;
        match payload.issue {
            Some(issue) if payload.success => {
                tracing::debug!(task_id = %issue.identifier, "created Linear issue");
                Ok(issue_to_task(issue, self.clock.as_ref()))
            }
            _ => Err(rejected("issue creation", "")),
        }
    }

    async fn get_task(&self, ctx: &RequestContext, id: &str) -> PlatformResult<Task> {
        let data: wire::IssueData = self
            .graphql(ctx, queries::GET_ISSUE, json!({ "id": id }), "get issue", id)
            .await?;
        data.issue
            .map(|issue| issue_to_task(issue, self.clock.as_ref()))
            .ok_or_else(|| missing(id))
    }

    async fn update_task(&self, ctx: &RequestContext, task: &Task) -> PlatformResult<Task> {
        let linear_id = task
            .metadata()
            .get_str(LINEAR_ID)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                PlatformError::invalid_input("linear_id not found in task metadata")
                    .with_platform(Platform::Linear.as_str())
                    .with_task_id(task.id())
            })?;

        let mut input = mapping::issue_input(task);
        let label_ids = self.resolve_label_ids(ctx, task).await?;
        input.insert("labelIds".to_owned(), json!(label_ids));
        if status_changed(task) {
            let state_id = self.resolve_state_id(ctx, task).await?;
            input.insert("stateId".to_owned(), json!(state_id));
        }

        let data: wire::UpdateData = self
            .graphql(
                ctx,
                queries::UPDATE_ISSUE,
                json!({ "id": linear_id, "input": input }),
                "update issue",
                task.id(),
            )
            .await?;
        let payload = data.issue_update;
        match payload.issue {
            Some(issue) if payload.success => Ok(issue_to_task(issue, self.clock.as_ref())),
            _ => Err(rejected("issue update", task.id())),
        }
    }

    async fn delete_task(&self, ctx: &RequestContext, id: &str) -> PlatformResult<()> {
        let data: wire::DeleteData = self
            .graphql(
                ctx,
                queries::DELETE_ISSUE,
                json!({ "id": id }),
                "delete issue",
                id,
            )
            .await?;
        if data.issue_delete.success {
            tracing::debug!(task_id = id, "deleted Linear issue");
            Ok(())
        } else {
            Err(rejected("issue deletion", id))
        }
    }

    async fn list_tasks(
        &self,
        ctx: &RequestContext,
        filter: &TaskFilter,
    ) -> PlatformResult<Vec<Task>> {
        let limit = filter
            .limit
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let offset = filter.offset.unwrap_or(0);
        let first = offset.saturating_add(limit).min(MAX_PAGE_SIZE);
        let variables = json!({
            "first": first,
            "filter": build_issue_filter(filter),
        });

        let data: wire::IssuesData = self
            .graphql(ctx, queries::LIST_ISSUES, variables, "list issues", "")
            .await?;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(data
            .issues
            .nodes
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|issue| issue_to_task(issue, self.clock.as_ref()))
            .collect())
    }

    async fn list_projects(&self, ctx: &RequestContext) -> PlatformResult<Vec<Project>> {
        let data: wire::ProjectsData = self
            .graphql(
                ctx,
                queries::LIST_PROJECTS,
                json!({ "first": PROJECT_PAGE_SIZE }),
                "list projects",
                "",
            )
            .await?;
        Ok(data
            .projects
            .nodes
            .into_iter()
            .map(|project| project_to_project(project, self.clock.as_ref()))
            .collect())
    }

    async fn get_project(&self, ctx: &RequestContext, id: &str) -> PlatformResult<Project> {
        let data: wire::ProjectData = self
            .graphql(
                ctx,
                queries::GET_PROJECT,
                json!({ "id": id }),
                "get project",
                id,
            )
            .await?;
        data.project
            .map(|project| project_to_project(project, self.clock.as_ref()))
            .ok_or_else(|| missing(id))
    }

    async fn get_current_user(&self, ctx: &RequestContext) -> PlatformResult<User> {
        let data: wire::ViewerData = self
            .graphql(ctx, queries::VIEWER, json!({}), "get current user", "")
            .await?;
        Ok(user_to_user(data.viewer, self.clock.as_ref()))
    }

    async fn search_users(&self, ctx: &RequestContext, query: &str) -> PlatformResult<Vec<User>> {
        let filter = json!({
            "or": [
                { "name": { "containsIgnoreCase": query } },
                { "displayName": { "containsIgnoreCase": query } },
                { "email": { "containsIgnoreCase": query } },
            ]
        });
        let data: wire::UsersData = self
            .graphql(
                ctx,
                queries::SEARCH_USERS,
                json!({ "first": USER_SEARCH_PAGE_SIZE, "filter": filter }),
                "search users",
                "",
            )
            .await?;
        Ok(data
            .users
            .nodes
            .into_iter()
            .map(|user| user_to_user(user, self.clock.as_ref()))
            .collect())
    }

    fn platform_info(&self) -> PlatformInfo {
        PlatformInfo {
            name: "Linear".to_owned(),
            platform_type: Platform::Linear.as_str().to_owned(),
            version: "1.0".to_owned(),
            description: "Linear issue tracking and project management".to_owned(),
            base_url: self.config.endpoint().to_owned(),
        }
    }

    async fn health_check(&self, ctx: &RequestContext) -> PlatformResult<()> {
        self.get_current_user(ctx).await.map(|_| ())
    }
}
