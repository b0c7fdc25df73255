//! Jira REST v2 implementation of [`PlatformClient`].

use super::config::JiraConfig;
use super::mapping::{
    self, JIRA_ID, build_jql, issue_to_task, project_to_project, status_name,
    user_to_user,
};
use super::wire;
use crate::platform::adapters::SharedClock;
use crate::platform::adapters::http::classify::{decode_failure, status_failure, transport_failure};
use crate::platform::domain::{PlatformInfo, RequestContext};
use crate::platform::error::{ErrorCode, PlatformError, PlatformResult};
use crate::platform::ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, PlatformClient};
use crate::task::domain::{Platform, Project, Task, TaskFilter, TaskStatus, User};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;

/// Page size used when a filter sets no limit.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Client for one Jira site.
#[derive(Clone)]
pub struct JiraClient {
    config: JiraConfig,
    transport: Arc<dyn HttpTransport>,
    clock: SharedClock,
}

impl JiraClient {
    /// Creates a client sending requests through `transport`.
    #[must_use]
    pub fn new(config: JiraConfig, transport: Arc<dyn HttpTransport>, clock: SharedClock) -> Self {
        Self {
            config,
            transport,
            clock,
        }
    }

    /// Returns the connection settings.
    #[must_use]
    pub const fn config(&self) -> &JiraConfig {
        &self.config
    }

    fn request(&self, method: HttpMethod, segments: &[&str]) -> HttpRequest {
        self.request_to(method, self.config.endpoint(segments))
    }

    fn request_to(&self, method: HttpMethod, url: String) -> HttpRequest {
        HttpRequest::new(method, url)
            .with_header("Authorization", self.config.authorization_header())
            .with_header("Accept", "application/json")
    }

    /// Sends `request` within `ctx`, mapping failures to the taxonomy.
    ///
    /// A `404` carries `subject` as the task id.
    async fn execute(
        &self,
        ctx: &RequestContext,
        request: HttpRequest,
        action: &str,
        subject: &str,
    ) -> PlatformResult<HttpResponse> {
        let response = ctx
            .run(self.transport.send(request))
            .await
            .map_err(|err| err.with_platform(Platform::Jira.as_str()).with_task_id(subject))?
            .map_err(|err| transport_failure(Platform::Jira, action, err).with_task_id(subject))?;

        if response.is_success() {
            return Ok(response);
        }

        let detail = serde_json::from_str::<wire::ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.summary());
        let failure = status_failure(Platform::Jira, action, &response, detail);
        if failure.code() == ErrorCode::NotFound {
            return Err(PlatformError::not_found(subject)
                .with_platform(Platform::Jira.as_str())
                .with_shared_cause(Arc::new(failure)));
        }
        Err(failure.with_task_id(subject))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: HttpRequest,
        action: &str,
        subject: &str,
    ) -> PlatformResult<T> {
        let response = self.execute(ctx, request, action, subject).await?;
        serde_json::from_str(&response.body)
            .map_err(|err| decode_failure(Platform::Jira, action, err).with_task_id(subject))
    }

    async fn fetch_issue(&self, ctx: &RequestContext, key: &str) -> PlatformResult<wire::Issue> {
        self.fetch(
            ctx,
            self.request(HttpMethod::Get, &["issue", key]),
            "get issue",
            key,
        )
        .await
    }

    async fn transition_issue(
        &self,
        ctx: &RequestContext,
        issue_id: &str,
        task_id: &str,
        target: TaskStatus,
    ) -> PlatformResult<()> {
        let path = ["issue", issue_id, "transitions"];
        let available: wire::Transitions = self
            .fetch(
                ctx,
                self.request(HttpMethod::Get, &path),
                "get transitions",
                task_id,
            )
            .await?;

        let target_name = status_name(target);
        // Workflows differ in capitalisation of the same status name.
        let transition = available
            .transitions
            .iter()
            .find(|candidate| candidate.to.name.eq_ignore_ascii_case(target_name))
            .ok_or_else(|| {
                PlatformError::api(format!("no transition available to status: {target_name}"))
                    .with_platform(Platform::Jira.as_str())
                    .with_task_id(task_id)
            })?;

        tracing::debug!(task_id, transition = %transition.id, target = target_name, "transitioning Jira issue");
        let body = json!({ "transition": { "id": transition.id } });
        self.execute(
            ctx,
            self.request(HttpMethod::Post, &path).with_json(body),
            "transition issue",
            task_id,
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl PlatformClient for JiraClient {
    async fn create_task(&self, ctx: &RequestContext, task: &Task) -> PlatformResult<Task> {
        let payload = mapping::create_payload(task)?;
        let created: wire::CreatedIssue = self
            .fetch(
                ctx,
                self.request(HttpMethod::Post, &["issue"]).with_json(payload),
                "create issue",
                "",
            )
            .await?;
        tracing::debug!(task_id = %created.key, "created Jira issue");

        let issue = self.fetch_issue(ctx, &created.key).await?;
        Ok(issue_to_task(issue, self.clock.as_ref()))
    }

    async fn get_task(&self, ctx: &RequestContext, id: &str) -> PlatformResult<Task> {
        let issue = self.fetch_issue(ctx, id).await?;
        Ok(issue_to_task(issue, self.clock.as_ref()))
    }

    async fn update_task(&self, ctx: &RequestContext, task: &Task) -> PlatformResult<Task> {
        let issue_id = task
            .metadata()
            .get_str(JIRA_ID)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                PlatformError::invalid_input("task metadata lacks jira_id")
                    .with_platform(Platform::Jira.as_str())
                    .with_task_id(task.id())
            })?;

        let current = self.fetch_issue(ctx, issue_id).await?;
        let current_status = current
            .fields
            .status
            .as_ref()
            .map_or(TaskStatus::Open, mapping::issue_status);
        if current_status != task.status() {
            self.transition_issue(ctx, issue_id, task.id(), task.status())
                .await?;
        }

        self.execute(
            ctx,
            self.request(HttpMethod::Put, &["issue", issue_id])
                .with_json(mapping::update_payload(task)),
            "update issue",
            task.id(),
        )
        .await?;

        let refreshed = self.fetch_issue(ctx, issue_id).await?;
        Ok(issue_to_task(refreshed, self.clock.as_ref()))
    }

    async fn delete_task(&self, ctx: &RequestContext, id: &str) -> PlatformResult<()> {
        self.execute(
            ctx,
            self.request(HttpMethod::Delete, &["issue", id]),
            "delete issue",
            id,
        )
        .await?;
        tracing::debug!(task_id = id, "deleted Jira issue");
        Ok(())
    }

    async fn list_tasks(
        &self,
        ctx: &RequestContext,
        filter: &TaskFilter,
    ) -> PlatformResult<Vec<Task>> {
        let jql = build_jql(Some(filter));
        let body = json!({
            "jql": jql,
            "startAt": filter.offset.unwrap_or(0),
            "maxResults": filter.limit.filter(|limit| *limit > 0).unwrap_or(DEFAULT_PAGE_SIZE),
        });
        tracing::debug!(%jql, "searching Jira issues");
        let results: wire::SearchResults = self
            .fetch(
                ctx,
                self.request(HttpMethod::Post, &["search"]).with_json(body),
                "search issues",
                "",
            )
            .await?;

        Ok(results
            .issues
            .into_iter()
            .map(|issue| issue_to_task(issue, self.clock.as_ref()))
            .collect())
    }

    async fn list_projects(&self, ctx: &RequestContext) -> PlatformResult<Vec<Project>> {
        let projects: Vec<wire::Project> = self
            .fetch(
                ctx,
                self.request(HttpMethod::Get, &["project"]),
                "list projects",
                "",
            )
            .await?;
        Ok(projects
            .into_iter()
            .map(|project| project_to_project(project, self.clock.as_ref()))
            .collect())
    }

    async fn get_project(&self, ctx: &RequestContext, id: &str) -> PlatformResult<Project> {
        let project: wire::Project = self
            .fetch(
                ctx,
                self.request(HttpMethod::Get, &["project", id]),
                "get project",
                id,
            )
            .await?;
        Ok(project_to_project(project, self.clock.as_ref()))
    }

    async fn get_current_user(&self, ctx: &RequestContext) -> PlatformResult<User> {
        let user: wire::User = self
            .fetch(
                ctx,
                self.request(HttpMethod::Get, &["myself"]),
                "get current user",
                "",
            )
            .await?;
        Ok(user_to_user(user, self.clock.as_ref()))
    }

    async fn search_users(&self, ctx: &RequestContext, query: &str) -> PlatformResult<Vec<User>> {
        let url = self
            .config
            .endpoint_with_query(&["user", "search"], &[("query", query)]);
        let users: Vec<wire::User> = self
            .fetch(
                ctx,
                self.request_to(HttpMethod::Get, url),
                "search users",
                "",
            )
            .await?;
        Ok(users
            .into_iter()
            .map(|user| user_to_user(user, self.clock.as_ref()))
            .collect())
    }

    fn platform_info(&self) -> PlatformInfo {
        PlatformInfo {
            name: "Jira".to_owned(),
            platform_type: Platform::Jira.as_str().to_owned(),
            version: "1.0".to_owned(),
            description: "Atlassian Jira issue tracking and project management".to_owned(),
            base_url: self.config.base_url().to_owned(),
        }
    }

    async fn health_check(&self, ctx: &RequestContext) -> PlatformResult<()> {
        self.get_current_user(ctx).await.map(|_| ())
    }
}
