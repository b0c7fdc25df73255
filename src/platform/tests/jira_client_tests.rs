//! Unit tests for `JiraClient` driven through scripted transports.

use super::fixtures::{clock, jira_client, jira_config, jira_issue, jira_issue_with_status, jira_user};
use crate::platform::adapters::http::ScriptedTransport;
use crate::platform::adapters::jira::JiraClient;
use crate::platform::adapters::jira::mapping::{JIRA_ACCOUNT_ID, JIRA_ID, STATUS_CATEGORY};
use crate::platform::domain::RequestContext;
use crate::platform::error::ErrorCode;
use crate::platform::ports::{
    HttpMethod, HttpResponse, MockHttpTransport, PlatformClient, TransportError,
};
use crate::task::domain::{Platform, Priority, Task, TaskFilter, TaskStatus, User};
use crate::test_support::SteppingClock;
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Fixtures
// ============================================================================

#[fixture]
fn transport() -> ScriptedTransport {
    ScriptedTransport::new()
}

#[fixture]
fn ctx() -> RequestContext {
    RequestContext::new()
}

fn tracked_task(status: TaskStatus) -> Task {
    let clock = SteppingClock::default();
    let mut task = Task::new("Test Issue", Platform::Jira, &clock).with_id("TEST-123");
    task.set_metadata(JIRA_ID, "10001", &clock);
    task.set_status(status, &clock);
    task
}

// ============================================================================
// Reads
// ============================================================================

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_task_maps_issue_fields(transport: ScriptedTransport, ctx: RequestContext) {
    transport.push_json(200, &jira_issue());
    let client = jira_client(&transport);

    let task = client.get_task(&ctx, "TEST-123").await.expect("issue found");

    assert_eq!(task.id(), "TEST-123");
    assert_eq!(task.title(), "Test Issue");
    assert_eq!(task.description(), "Test Description");
    assert_eq!(task.status(), TaskStatus::InProgress);
    assert_eq!(task.priority(), Priority::Urgent);
    assert_eq!(task.platform(), Platform::Jira);
    assert_eq!(task.project_id(), Some("TEST"));
    assert_eq!(task.labels(), ["test", "bug"]);
    assert_eq!(task.metadata().get_str(JIRA_ID), Some("10001"));
    assert_eq!(task.metadata().get_str(STATUS_CATEGORY), Some("indeterminate"));
    assert_eq!(
        task.created_at(),
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).single().expect("timestamp")
    );
    assert_eq!(
        task.due_date(),
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).single()
    );

    let assignee = task.assignee().expect("assignee mapped");
    assert_eq!(assignee.name(), "John Doe");
    assert_eq!(assignee.email(), "john@example.com");
    assert_eq!(assignee.avatar(), Some("https://avatar.example.com/48.png"));
    assert_eq!(assignee.metadata().get_str(JIRA_ACCOUNT_ID), Some("user123"));

    let sent = transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::Get);
    assert_eq!(
        sent[0].url,
        "https://example.atlassian.net/rest/api/2/issue/TEST-123"
    );
    assert!(
        sent[0]
            .header("authorization")
            .is_some_and(|value| value.starts_with("Basic "))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_issue_is_not_found_with_task_id(transport: ScriptedTransport, ctx: RequestContext) {
    transport.push_json(404, &json!({ "errorMessages": ["Issue does not exist"] }));
    let client = jira_client(&transport);

    let err = client.get_task(&ctx, "TEST-999").await.expect_err("missing issue");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.task_id(), Some("TEST-999"));
    assert_eq!(err.platform(), Some("jira"));
    assert!(err.cause().is_some());
}

#[rstest]
#[case(401, ErrorCode::AuthenticationFailed)]
#[case(403, ErrorCode::PermissionDenied)]
#[case(429, ErrorCode::RateLimited)]
#[case(500, ErrorCode::PlatformApiError)]
#[tokio::test(flavor = "multi_thread")]
async fn failure_statuses_map_to_codes(
    transport: ScriptedTransport,
    ctx: RequestContext,
    #[case] status: u16,
    #[case] expected: ErrorCode,
) {
    transport.push_response(HttpResponse::new(status, "nope"));
    let client = jira_client(&transport);

    let err = client.list_projects(&ctx).await.expect_err("failure status");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[case(TransportError::Timeout, ErrorCode::NetworkError)]
#[case(TransportError::Connect("refused".to_owned()), ErrorCode::NetworkError)]
#[case(TransportError::Other("tls".to_owned()), ErrorCode::PlatformApiError)]
#[tokio::test(flavor = "multi_thread")]
async fn transport_failures_are_wrapped(
    transport: ScriptedTransport,
    ctx: RequestContext,
    #[case] failure: TransportError,
    #[case] expected: ErrorCode,
) {
    transport.push_error(failure.clone());
    let client = jira_client(&transport);

    let err = client.get_current_user(&ctx).await.expect_err("transport failure");

    assert_eq!(err.code(), expected);
    let cause = err.cause().expect("transport cause kept");
    assert_eq!(cause.to_string(), failure.to_string());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn undecodable_body_is_api_error(transport: ScriptedTransport, ctx: RequestContext) {
    transport.push_response(HttpResponse::new(200, "<html>"));
    let client = jira_client(&transport);

    let err = client.get_task(&ctx, "TEST-1").await.expect_err("bad body");

    assert_eq!(err.code(), ErrorCode::PlatformApiError);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_tasks_posts_jql_with_pagination(transport: ScriptedTransport, ctx: RequestContext) {
    transport.push_json(200, &json!({ "issues": [jira_issue()], "total": 1 }));
    let client = jira_client(&transport);
    let filter = TaskFilter::new()
        .with_status(TaskStatus::Done)
        .with_limit(10)
        .with_offset(20);

    let tasks = client.list_tasks(&ctx, &filter).await.expect("search succeeds");

    assert_eq!(tasks.len(), 1);
    let sent = transport.requests();
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert!(sent[0].url.ends_with("/rest/api/2/search"));
    assert_eq!(
        sent[0].body,
        Some(json!({
            "jql": "status = \"Done\" ORDER BY created DESC",
            "startAt": 20,
            "maxResults": 10,
        }))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_tasks_defaults_page_size(transport: ScriptedTransport, ctx: RequestContext) {
    transport.push_json(200, &json!({ "issues": [] }));
    let client = jira_client(&transport);

    let tasks = client
        .list_tasks(&ctx, &TaskFilter::new())
        .await
        .expect("search succeeds");

    assert!(tasks.is_empty());
    let body = transport.requests()[0].body.clone().expect("search body");
    assert_eq!(body["maxResults"], json!(50));
    assert_eq!(body["startAt"], json!(0));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projects_and_users_are_mapped(transport: ScriptedTransport, ctx: RequestContext) {
    transport.push_json(
        200,
        &json!([{ "id": "10000", "key": "TEST", "name": "Test Project", "description": "Demo" }]),
    );
    transport.push_json(200, &json!([jira_user()]));
    let client = jira_client(&transport);

    let projects = client.list_projects(&ctx).await.expect("projects listed");
    let users = client.search_users(&ctx, "john doe").await.expect("users found");

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].key(), Some("TEST"));
    assert_eq!(projects[0].description(), "Demo");
    assert_eq!(users[0].id(), "user123");
    assert!(users[0].is_active());
    assert!(transport.requests()[1].url.ends_with("/user/search?query=john+doe"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_check_reads_current_user(transport: ScriptedTransport, ctx: RequestContext) {
    transport.push_json(200, &jira_user());
    let client = jira_client(&transport);

    client.health_check(&ctx).await.expect("healthy");

    assert!(transport.requests()[0].url.ends_with("/rest/api/2/myself"));
}

#[test]
fn platform_info_describes_site() {
    let client = jira_client(&ScriptedTransport::new());

    let info = client.platform_info();

    assert_eq!(info.platform_type, "jira");
    assert_eq!(info.name, "Jira");
    assert_eq!(info.base_url, "https://example.atlassian.net");
}

// ============================================================================
// Writes
// ============================================================================

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_without_project_makes_no_request(ctx: RequestContext) {
    let mut transport = MockHttpTransport::new();
    transport.expect_send().times(0);
    let client = JiraClient::new(jira_config(), Arc::new(transport), clock());
    let task = Task::new("Orphan", Platform::Jira, &SteppingClock::default());

    let err = client.create_task(&ctx, &task).await.expect_err("project required");

    assert_eq!(err.code(), ErrorCode::InvalidInput);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_posts_fields_then_reads_issue_back(
    transport: ScriptedTransport,
    ctx: RequestContext,
) {
    transport.push_json(201, &json!({ "id": "10001", "key": "TEST-123" }));
    transport.push_json(200, &jira_issue());
    let client = jira_client(&transport);
    let clock = SteppingClock::default();
    let mut task = Task::new("Test Issue", Platform::Jira, &clock);
    task.set_project_id(Some("TEST".to_owned()), &clock);
    task.set_priority(Priority::High, &clock);
    task.add_label("bug", &clock);
    let assignee = User::new("user123", "John Doe", "john@example.com", Platform::Jira, &clock)
        .with_metadata(JIRA_ACCOUNT_ID, "user123");
    task.set_assignee(Some(assignee), &clock);

    let created = client.create_task(&ctx, &task).await.expect("issue created");

    assert_eq!(created.id(), "TEST-123");
    let sent = transport.requests();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].method, HttpMethod::Post);
    let fields = &sent[0].body.as_ref().expect("create body")["fields"];
    assert_eq!(fields["project"], json!({ "key": "TEST" }));
    assert_eq!(fields["summary"], json!("Test Issue"));
    assert_eq!(fields["issuetype"], json!({ "name": "Task" }));
    assert_eq!(fields["priority"], json!({ "name": "High" }));
    assert_eq!(fields["assignee"], json!({ "accountId": "user123" }));
    assert_eq!(fields["labels"], json!(["bug"]));
    assert!(sent[1].url.ends_with("/issue/TEST-123"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_sends_numeric_project_as_id(transport: ScriptedTransport, ctx: RequestContext) {
    transport.push_json(201, &json!({ "key": "TEST-123" }));
    transport.push_json(200, &jira_issue());
    let client = jira_client(&transport);
    let clock = SteppingClock::default();
    let mut task = Task::new("Numeric", Platform::Jira, &clock);
    task.set_project_id(Some("10000".to_owned()), &clock);

    client.create_task(&ctx, &task).await.expect("issue created");

    let body = transport.requests()[0].body.clone().expect("create body");
    assert_eq!(body["fields"]["project"], json!({ "id": "10000" }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_without_jira_id_is_invalid_input(ctx: RequestContext) {
    let mut transport = MockHttpTransport::new();
    transport.expect_send().times(0);
    let client = JiraClient::new(jira_config(), Arc::new(transport), clock());
    let task = Task::new("Untracked", Platform::Jira, &SteppingClock::default()).with_id("TEST-5");

    let err = client.update_task(&ctx, &task).await.expect_err("jira_id required");

    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert_eq!(err.task_id(), Some("TEST-5"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_transitions_when_status_changes(transport: ScriptedTransport, ctx: RequestContext) {
    transport.push_json(200, &jira_issue());
    transport.push_json(
        200,
        &json!({ "transitions": [
            { "id": "11", "to": { "name": "To Do" } },
            { "id": "31", "to": { "name": "Done" } }
        ] }),
    );
    transport.push_response(HttpResponse::new(204, ""));
    transport.push_response(HttpResponse::new(204, ""));
    transport.push_json(200, &jira_issue_with_status("Done", "done"));
    let client = jira_client(&transport);

    let updated = client
        .update_task(&ctx, &tracked_task(TaskStatus::Done))
        .await
        .expect("update succeeds");

    assert_eq!(updated.status(), TaskStatus::Done);
    let sent = transport.requests();
    let calls: Vec<(HttpMethod, bool)> = sent
        .iter()
        .map(|request| (request.method, request.url.ends_with("/transitions")))
        .collect();
    assert_eq!(
        calls,
        vec![
            (HttpMethod::Get, false),
            (HttpMethod::Get, true),
            (HttpMethod::Post, true),
            (HttpMethod::Put, false),
            (HttpMethod::Get, false),
        ]
    );
    assert_eq!(sent[2].body, Some(json!({ "transition": { "id": "31" } })));
    assert!(sent[3].url.ends_with("/issue/10001"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_skips_transition_when_status_unchanged(
    transport: ScriptedTransport,
    ctx: RequestContext,
) {
    transport.push_json(200, &jira_issue());
    transport.push_response(HttpResponse::new(204, ""));
    transport.push_json(200, &jira_issue());
    let client = jira_client(&transport);

    client
        .update_task(&ctx, &tracked_task(TaskStatus::InProgress))
        .await
        .expect("update succeeds");

    assert_eq!(transport.request_count(), 3);
    let body = transport.requests()[1].body.clone().expect("update body");
    assert!(body["fields"].get("status").is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_fails_when_no_transition_reaches_status(
    transport: ScriptedTransport,
    ctx: RequestContext,
) {
    transport.push_json(200, &jira_issue());
    transport.push_json(200, &json!({ "transitions": [{ "id": "11", "to": { "name": "To Do" } }] }));
    let client = jira_client(&transport);

    let err = client
        .update_task(&ctx, &tracked_task(TaskStatus::Cancelled))
        .await
        .expect_err("no transition");

    assert_eq!(err.code(), ErrorCode::PlatformApiError);
    assert!(err.message().contains("Cancelled"));
    assert_eq!(transport.request_count(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn title_edit_on_custom_in_progress_status_skips_transition(
    transport: ScriptedTransport,
    ctx: RequestContext,
) {
    let in_review = jira_issue_with_status("In Review", "indeterminate");
    transport.push_json(200, &in_review);
    transport.push_json(200, &in_review);
    transport.push_response(HttpResponse::new(204, ""));
    transport.push_json(200, &in_review);
    let client = jira_client(&transport);
    let clock = SteppingClock::default();

    let mut task = client.get_task(&ctx, "TEST-123").await.expect("issue fetched");
    assert_eq!(task.status(), TaskStatus::InProgress);
    task.set_title("Renamed", &clock);
    client.update_task(&ctx, &task).await.expect("update succeeds");

    assert_eq!(transport.remaining(), 0);
    assert!(
        transport
            .requests()
            .iter()
            .all(|request| !request.url.ends_with("/transitions"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_target_matches_name_case_insensitively(
    transport: ScriptedTransport,
    ctx: RequestContext,
) {
    transport.push_json(200, &jira_issue());
    transport.push_json(200, &json!({ "transitions": [{ "id": "41", "to": { "name": "DONE" } }] }));
    transport.push_response(HttpResponse::new(204, ""));
    transport.push_response(HttpResponse::new(204, ""));
    transport.push_json(200, &jira_issue_with_status("DONE", "done"));
    let client = jira_client(&transport);

    client
        .update_task(&ctx, &tracked_task(TaskStatus::Done))
        .await
        .expect("update succeeds");

    assert_eq!(transport.requests()[2].body, Some(json!({ "transition": { "id": "41" } })));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_issues_delete_request(transport: ScriptedTransport, ctx: RequestContext) {
    transport.push_response(HttpResponse::new(204, ""));
    let client = jira_client(&transport);

    client.delete_task(&ctx, "TEST-123").await.expect("deleted");

    let sent = transport.requests();
    assert_eq!(sent[0].method, HttpMethod::Delete);
    assert!(sent[0].url.ends_with("/issue/TEST-123"));
}

// ============================================================================
// Cancellation
// ============================================================================

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_context_sends_nothing(transport: ScriptedTransport) {
    let client = jira_client(&transport);
    let ctx = RequestContext::new();
    ctx.cancel();

    let err = client.get_task(&ctx, "TEST-1").await.expect_err("cancelled");

    assert_eq!(err.code(), ErrorCode::NetworkError);
    assert_eq!(err.platform(), Some("jira"));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn deadline_interrupts_slow_platform() {
    let transport = ScriptedTransport::new().with_delay(Duration::from_secs(5));
    transport.push_json(200, &jira_issue());
    let client = jira_client(&transport);
    let ctx = RequestContext::new().with_timeout(Duration::from_millis(20));

    let err = client.get_task(&ctx, "TEST-123").await.expect_err("deadline");

    assert_eq!(err.code(), ErrorCode::NetworkError);
    assert_eq!(err.message(), "deadline exceeded");
}
