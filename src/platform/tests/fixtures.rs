//! Shared builders for platform tests.

use crate::platform::adapters::SharedClock;
use crate::platform::adapters::http::ScriptedTransport;
use crate::platform::adapters::jira::{JiraClient, JiraConfig};
use crate::platform::adapters::linear::{LinearClient, LinearConfig};
use crate::test_support::SteppingClock;
use serde_json::{Value, json};
use std::sync::Arc;

pub(super) fn clock() -> SharedClock {
    Arc::new(SteppingClock::default())
}

pub(super) fn jira_config() -> JiraConfig {
    JiraConfig::new("https://example.atlassian.net/", "dev@example.com", "secret")
        .expect("valid Jira config")
}

pub(super) fn jira_client(transport: &ScriptedTransport) -> JiraClient {
    JiraClient::new(jira_config(), Arc::new(transport.clone()), clock())
}

pub(super) fn linear_client(transport: &ScriptedTransport) -> LinearClient {
    let config = LinearConfig::new("lin_api_token").expect("valid Linear config");
    LinearClient::new(config, Arc::new(transport.clone()), clock())
}

pub(super) fn jira_issue() -> Value {
    json!({
        "id": "10001",
        "key": "TEST-123",
        "self": "https://example.atlassian.net/rest/api/2/issue/10001",
        "fields": {
            "summary": "Test Issue",
            "description": "Test Description",
            "status": { "name": "In Progress", "statusCategory": { "key": "indeterminate" } },
            "priority": { "name": "Highest" },
            "assignee": {
                "accountId": "user123",
                "displayName": "John Doe",
                "emailAddress": "john@example.com",
                "active": true,
                "avatarUrls": { "48x48": "https://avatar.example.com/48.png" }
            },
            "project": { "id": "10000", "key": "TEST" },
            "labels": ["test", "bug"],
            "issuetype": { "name": "Bug" },
            "created": "2024-01-15T10:30:00.000+0000",
            "updated": "2024-01-16T08:00:00.000+0000",
            "duedate": "2024-02-01"
        }
    })
}

pub(super) fn jira_issue_with_status(name: &str, category: &str) -> Value {
    let mut issue = jira_issue();
    issue["fields"]["status"] = json!({ "name": name, "statusCategory": { "key": category } });
    issue
}

pub(super) fn jira_user() -> Value {
    json!({
        "accountId": "user123",
        "displayName": "John Doe",
        "emailAddress": "john@example.com",
        "active": true,
        "self": "https://example.atlassian.net/rest/api/2/user?accountId=user123",
        "avatarUrls": { "48x48": "https://avatar.example.com/48.png" }
    })
}

pub(super) fn linear_issue() -> Value {
    json!({
        "id": "8f1e2d3c-uuid",
        "identifier": "ENG-42",
        "title": "Ship the release",
        "description": null,
        "priority": 2,
        "url": "https://linear.app/acme/issue/ENG-42",
        "createdAt": "2024-03-01T12:00:00.000Z",
        "updatedAt": "2024-03-02T12:00:00.000Z",
        "dueDate": "2024-03-10",
        "state": { "id": "state-started", "name": "In Progress", "type": "started", "color": "#f2c94c" },
        "assignee": {
            "id": "user-1",
            "name": "Grace Hopper",
            "displayName": "grace",
            "email": "grace@example.com",
            "avatarUrl": null,
            "active": true
        },
        "team": { "id": "team-1", "key": "ENG", "name": "Engineering" },
        "project": { "id": "proj-1", "name": "Launch" },
        "labels": { "nodes": [
            { "id": "label-1", "name": "release", "color": "#000" },
            { "id": "label-2", "name": "backend", "color": "#fff" }
        ] }
    })
}

pub(super) fn graphql_data(data: Value) -> Value {
    json!({ "data": data })
}
