//! Field mapping between Jira issues and the canonical model.
//!
//! Inbound conversion is total: unknown status categories, status names and
//! priority names fall back to `open` and `medium` instead of failing.
//! Outbound payloads include optional fields only when the canonical value
//! is present.

use super::wire;
use crate::platform::error::{PlatformError, PlatformResult};
use crate::task::domain::{
    Metadata, Platform, Priority, Project, Task, TaskFilter, TaskParts, TaskStatus, User,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde_json::{Map, Value, json};

/// Metadata key holding the numeric issue or project id.
pub const JIRA_ID: &str = "jira_id";
/// Metadata key holding the REST self link.
pub const JIRA_SELF: &str = "jira_self";
/// Metadata key holding a user's account id.
pub const JIRA_ACCOUNT_ID: &str = "jira_account_id";
/// Metadata key holding the issue type name.
pub const ISSUE_TYPE: &str = "issue_type";
/// Metadata key holding the native status name.
pub const STATUS_NAME: &str = "status_name";
/// Metadata key holding the native status category key.
pub const STATUS_CATEGORY: &str = "status_category";
/// Metadata key holding the native priority name.
pub const PRIORITY_NAME: &str = "priority_name";

/// Issue type used when the task does not name one.
pub const DEFAULT_ISSUE_TYPE: &str = "Task";

/// Sort suffix appended to every JQL query.
const JQL_ORDER: &str = "ORDER BY created DESC";

/// Maps a status category key to a canonical status.
#[must_use]
pub fn status_from_category(key: &str) -> TaskStatus {
    match key.trim().to_ascii_lowercase().as_str() {
        "indeterminate" | "in progress" => TaskStatus::InProgress,
        "done" | "complete" => TaskStatus::Done,
        "cancelled" | "canceled" => TaskStatus::Cancelled,
        _ => TaskStatus::Open,
    }
}

/// Maps a free-text status name to a canonical status.
#[must_use]
pub fn status_from_name(name: &str) -> TaskStatus {
    match name.trim().to_ascii_lowercase().as_str() {
        "in progress" | "in development" | "doing" => TaskStatus::InProgress,
        "done" | "closed" | "resolved" | "completed" => TaskStatus::Done,
        "cancelled" | "canceled" | "rejected" => TaskStatus::Cancelled,
        _ => TaskStatus::Open,
    }
}

/// Returns the preferred Jira status name for a canonical status.
#[must_use]
pub const fn status_name(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Open => "To Do",
        TaskStatus::InProgress => "In Progress",
        TaskStatus::Done => "Done",
        TaskStatus::Cancelled => "Cancelled",
    }
}

/// Maps a Jira priority name to a canonical priority.
#[must_use]
pub fn priority_from_name(name: &str) -> Priority {
    match name.trim().to_ascii_lowercase().as_str() {
        "highest" | "critical" | "blocker" => Priority::Urgent,
        "high" | "major" => Priority::High,
        "low" | "minor" | "trivial" | "lowest" => Priority::Low,
        _ => Priority::Medium,
    }
}

/// Returns the preferred Jira priority name for a canonical priority.
#[must_use]
pub const fn priority_name(priority: Priority) -> &'static str {
    match priority {
        Priority::Urgent => "Highest",
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
    }
}

/// Builds a JQL query from a filter.
///
/// Predicates are AND-ed in a fixed order: status, assignee, project,
/// labels, free text. An absent or empty filter yields only the sort
/// suffix.
#[must_use]
pub fn build_jql(filter: Option<&TaskFilter>) -> String {
    let Some(active) = filter else {
        return JQL_ORDER.to_owned();
    };

    let mut conditions: Vec<String> = Vec::new();
    if let Some(status) = active.status {
        conditions.push(format!("status = {}", quote(status_name(status))));
    }
    if let Some(assignee) = active.assignee() {
        if assignee == "me" {
            conditions.push("assignee = currentUser()".to_owned());
        } else {
            conditions.push(format!("assignee = {}", quote(assignee)));
        }
    }
    if let Some(project) = active.project_id() {
        conditions.push(format!("project = {}", quote(project)));
    }
    if !active.labels.is_empty() {
        let labels: Vec<String> = active
            .labels
            .iter()
            .map(|label| format!("labels = {}", quote(label)))
            .collect();
        conditions.push(format!("({})", labels.join(" AND ")));
    }
    if let Some(text) = active.query() {
        conditions.push(format!("text ~ {}", quote(text)));
    }

    if conditions.is_empty() {
        JQL_ORDER.to_owned()
    } else {
        format!("{} {JQL_ORDER}", conditions.join(" AND "))
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Returns whether `value` has the shape of a project key such as `PROJ`.
#[must_use]
pub fn looks_like_project_key(value: &str) -> bool {
    let mut chars = value.chars();
    chars.next().is_some_and(|first| first.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Parses a Jira timestamp (`2024-01-15T10:30:00.000+0000`) or RFC 3339.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Parses a Jira due date (`2024-02-01`) as midnight UTC.
#[must_use]
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .or_else(|| parse_timestamp(raw))
}

/// Resolves an issue status by category key, falling back to the name when
/// Jira reports no category.
pub(crate) fn issue_status(status: &wire::Status) -> TaskStatus {
    match status.status_category.as_ref().map(|category| category.key.as_str()) {
        Some(key) if !key.is_empty() => status_from_category(key),
        _ => status_from_name(&status.name),
    }
}

pub(crate) fn issue_to_task<C: Clock + ?Sized>(issue: wire::Issue, clock: &C) -> Task {
    let fields = issue.fields;
    let now = clock.utc();
    let created_at = fields
        .created
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(now);
    let updated_at = fields
        .updated
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(created_at);

    let mut metadata = Metadata::new();
    metadata.insert_non_empty(JIRA_ID, &issue.id);
    metadata.insert_non_empty(JIRA_SELF, &issue.self_link);
    if let Some(issue_type) = &fields.issuetype {
        metadata.insert_non_empty(ISSUE_TYPE, &issue_type.name);
    }

    let status = fields.status.as_ref().map_or(TaskStatus::Open, |status| {
        metadata.insert(STATUS_NAME, status.name.as_str());
        let category = status
            .status_category
            .as_ref()
            .map(|category| category.key.as_str())
            .unwrap_or_default();
        metadata.insert(STATUS_CATEGORY, category);
        issue_status(status)
    });

    let priority = fields.priority.as_ref().map_or(Priority::Medium, |priority| {
        metadata.insert(PRIORITY_NAME, priority.name.as_str());
        priority_from_name(&priority.name)
    });

    Task::from_parts(TaskParts {
        id: issue.key,
        title: fields.summary,
        description: fields.description.unwrap_or_default(),
        status,
        priority,
        assignee: fields.assignee.map(|user| user_to_user(user, clock)),
        platform: Platform::Jira,
        project_id: fields.project.map(|project| {
            if project.key.is_empty() {
                project.id
            } else {
                project.key
            }
        }),
        labels: fields.labels,
        created_at,
        updated_at,
        due_date: fields.duedate.as_deref().and_then(parse_due_date),
        metadata,
    })
}

pub(crate) fn project_to_project<C: Clock + ?Sized>(project: wire::Project, clock: &C) -> Project {
    let mut converted = Project::new(project.id.clone(), project.name, Platform::Jira, clock)
        .with_key(project.key)
        .with_description(project.description.unwrap_or_default())
        .with_metadata(JIRA_ID, project.id);
    if !project.self_link.is_empty() {
        converted = converted.with_metadata(JIRA_SELF, project.self_link);
    }
    converted
}

pub(crate) fn user_to_user<C: Clock + ?Sized>(user: wire::User, clock: &C) -> User {
    let avatar = user.avatar_urls.get("48x48").cloned().unwrap_or_default();
    let mut converted = User::new(
        user.account_id.clone(),
        user.display_name,
        user.email_address,
        Platform::Jira,
        clock,
    )
    .with_active(user.active)
    .with_avatar(avatar)
    .with_metadata(JIRA_ACCOUNT_ID, user.account_id);
    if !user.self_link.is_empty() {
        converted = converted.with_metadata(JIRA_SELF, user.self_link);
    }
    converted
}

/// Builds the `POST /issue` body.
///
/// # Errors
///
/// Returns `invalid_input` when the task has no project.
pub(crate) fn create_payload(task: &Task) -> PlatformResult<Value> {
    let project = task.project_id().ok_or_else(|| {
        PlatformError::invalid_input("project ID is required for Jira issues")
            .with_platform(Platform::Jira.as_str())
    })?;
    let project_ref = if looks_like_project_key(project) {
        json!({ "key": project })
    } else {
        json!({ "id": project })
    };
    let issue_type = task
        .metadata()
        .get_str(ISSUE_TYPE)
        .unwrap_or(DEFAULT_ISSUE_TYPE);

    let mut fields = Map::new();
    fields.insert("project".to_owned(), project_ref);
    fields.insert("summary".to_owned(), json!(task.title()));
    fields.insert("description".to_owned(), json!(task.description()));
    fields.insert("issuetype".to_owned(), json!({ "name": issue_type }));
    insert_shared_fields(&mut fields, task);

    Ok(json!({ "fields": fields }))
}

/// Builds the `PUT /issue/{key}` body. Status is changed separately through
/// a workflow transition.
pub(crate) fn update_payload(task: &Task) -> Value {
    let mut fields = Map::new();
    fields.insert("summary".to_owned(), json!(task.title()));
    fields.insert("description".to_owned(), json!(task.description()));
    insert_shared_fields(&mut fields, task);
    json!({ "fields": fields })
}

fn insert_shared_fields(fields: &mut Map<String, Value>, task: &Task) {
    fields.insert(
        "priority".to_owned(),
        json!({ "name": priority_name(task.priority()) }),
    );
    if let Some(account_id) = task
        .assignee()
        .and_then(|assignee| assignee.metadata().get_str(JIRA_ACCOUNT_ID))
    {
        fields.insert("assignee".to_owned(), json!({ "accountId": account_id }));
    }
    if !task.labels().is_empty() {
        fields.insert("labels".to_owned(), json!(task.labels()));
    }
    if let Some(due) = task.due_date() {
        fields.insert(
            "duedate".to_owned(),
            json!(due.date_naive().format("%Y-%m-%d").to_string()),
        );
    }
}
