//! Field mapping between Linear issues and the canonical model.

use super::wire;
use crate::task::domain::{
    Metadata, Platform, Priority, Project, Task, TaskFilter, TaskParts, TaskStatus, User,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde_json::{Map, Number, Value, json};

/// Metadata key holding the internal issue, user or project id.
pub const LINEAR_ID: &str = "linear_id";
/// Metadata key holding the issue URL.
pub const LINEAR_URL: &str = "linear_url";
/// Metadata key holding the team key (`ENG`).
pub const TEAM: &str = "team";
/// Metadata key holding the team id used when creating issues.
pub const TEAM_ID: &str = "team_id";
/// Metadata key holding the workflow state id.
pub const STATE_ID: &str = "state_id";
/// Metadata key holding the workflow state name.
pub const STATE_NAME: &str = "state_name";
/// Metadata key holding the workflow state type.
pub const STATE_TYPE: &str = "state_type";
/// Metadata key holding the workflow state colour.
pub const STATE_COLOR: &str = "state_color";
/// Metadata key holding comma-separated label ids.
pub const LABEL_IDS: &str = "label_ids";
/// Metadata key holding comma-separated label names, aligned with
/// [`LABEL_IDS`].
pub const LABEL_NAMES: &str = "label_names";
/// Metadata key holding a project's URL slug.
pub const SLUG_ID: &str = "slug_id";

/// Maps a workflow state type to a canonical status.
#[must_use]
pub fn status_from_state_type(state_type: &str) -> TaskStatus {
    match state_type.trim().to_ascii_lowercase().as_str() {
        "started" => TaskStatus::InProgress,
        "completed" => TaskStatus::Done,
        "canceled" | "cancelled" => TaskStatus::Cancelled,
        _ => TaskStatus::Open,
    }
}

/// Returns the workflow state type representing a canonical status.
#[must_use]
pub const fn state_type(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Open => "unstarted",
        TaskStatus::InProgress => "started",
        TaskStatus::Done => "completed",
        TaskStatus::Cancelled => "canceled",
    }
}

/// Maps Linear's numeric priority scale to a canonical priority.
///
/// `0` means "no priority" and, like any unknown number, maps to medium.
#[must_use]
pub const fn priority_from_number(value: u64) -> Priority {
    match value {
        1 => Priority::Urgent,
        2 => Priority::High,
        4 => Priority::Low,
        _ => Priority::Medium,
    }
}

/// Returns Linear's number for a canonical priority.
#[must_use]
pub const fn priority_number(priority: Priority) -> u8 {
    match priority {
        Priority::Urgent => 1,
        Priority::High => 2,
        Priority::Medium => 3,
        Priority::Low => 4,
    }
}

/// Reads a GraphQL `Float` priority that holds a whole number.
fn whole_number(value: &Number) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .to_string()
            .strip_suffix(".0")
            .and_then(|whole| whole.parse().ok())
    })
}

/// Builds the `IssueFilter` object for a task filter.
///
/// An empty filter yields an empty object, which Linear treats as
/// unconstrained. Labels must all be present, so each becomes its own
/// `some` clause under a top-level `and`.
#[must_use]
pub fn build_issue_filter(filter: &TaskFilter) -> Value {
    let mut object = Map::new();
    if let Some(status) = filter.status {
        object.insert(
            "state".to_owned(),
            json!({ "type": { "eq": state_type(status) } }),
        );
    }
    if let Some(assignee) = filter.assignee() {
        let clause = if assignee == "me" {
            json!({ "isMe": { "eq": true } })
        } else {
            json!({ "email": { "eq": assignee } })
        };
        object.insert("assignee".to_owned(), clause);
    }
    if let Some(project) = filter.project_id() {
        object.insert("project".to_owned(), json!({ "id": { "eq": project } }));
    }
    if let Some(priority) = filter.priority {
        object.insert(
            "priority".to_owned(),
            json!({ "eq": priority_number(priority) }),
        );
    }
    if let Some(text) = filter.query() {
        object.insert(
            "searchableContent".to_owned(),
            json!({ "contains": text }),
        );
    }
    if !filter.labels.is_empty() {
        let clauses: Vec<Value> = filter
            .labels
            .iter()
            .map(|label| json!({ "labels": { "some": { "name": { "eq": label } } } }))
            .collect();
        object.insert("and".to_owned(), Value::Array(clauses));
    }
    Value::Object(object)
}

/// Parses Linear's `TimelessDate` (`2024-02-01`) as midnight UTC.
#[must_use]
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|parsed| parsed.with_timezone(&Utc))
        })
}

pub(crate) fn issue_to_task<C: Clock + ?Sized>(issue: wire::Issue, clock: &C) -> Task {
    let now = clock.utc();
    let created_at = issue.created_at.unwrap_or(now);
    let updated_at = issue.updated_at.unwrap_or(created_at);

    let mut metadata = Metadata::new();
    metadata.insert_non_empty(LINEAR_ID, &issue.id);
    metadata.insert_non_empty(LINEAR_URL, &issue.url);
    if let Some(team) = &issue.team {
        metadata.insert_non_empty(TEAM, &team.key);
        metadata.insert_non_empty(TEAM_ID, &team.id);
    }
    let status = issue.state.as_ref().map_or(TaskStatus::Open, |state| {
        metadata.insert_non_empty(STATE_ID, &state.id);
        metadata.insert_non_empty(STATE_NAME, &state.name);
        metadata.insert_non_empty(STATE_TYPE, &state.state_type);
        metadata.insert_non_empty(STATE_COLOR, &state.color);
        status_from_state_type(&state.state_type)
    });
    let (label_ids, label_names): (Vec<&str>, Vec<&str>) = issue
        .labels
        .nodes
        .iter()
        .filter(|label| !label.id.is_empty())
        .map(|label| (label.id.as_str(), label.name.as_str()))
        .unzip();
    metadata.insert_non_empty(LABEL_IDS, &label_ids.join(","));
    metadata.insert_non_empty(LABEL_NAMES, &label_names.join(","));

    let priority = issue
        .priority
        .as_ref()
        .and_then(whole_number)
        .map_or(Priority::Medium, priority_from_number);

    Task::from_parts(TaskParts {
        id: issue.identifier,
        title: issue.title,
        description: issue.description.unwrap_or_default(),
        status,
        priority,
        assignee: issue.assignee.map(|user| user_to_user(user, clock)),
        platform: Platform::Linear,
        project_id: issue.project.map(|project| project.id),
        labels: issue.labels.nodes.into_iter().map(|label| label.name).collect(),
        created_at,
        updated_at,
        due_date: issue.due_date.as_deref().and_then(parse_due_date),
        metadata,
    })
}

pub(crate) fn user_to_user<C: Clock + ?Sized>(user: wire::User, clock: &C) -> User {
    let name = if user.name.is_empty() {
        user.display_name.clone()
    } else {
        user.name
    };
    let mut converted = User::new(user.id.clone(), name, user.email, Platform::Linear, clock)
        .with_username(user.display_name)
        .with_avatar(user.avatar_url.unwrap_or_default())
        .with_active(user.active)
        .with_metadata(LINEAR_ID, user.id);
    if let Some(created_at) = user.created_at {
        converted = converted.with_timestamps(created_at, user.updated_at.unwrap_or(created_at));
    }
    converted
}

pub(crate) fn project_to_project<C: Clock + ?Sized>(project: wire::Project, clock: &C) -> Project {
    let mut converted = Project::new(project.id.clone(), project.name, Platform::Linear, clock)
        .with_description(project.description.unwrap_or_default())
        .with_metadata(LINEAR_ID, project.id);
    if !project.slug_id.is_empty() {
        converted = converted.with_metadata(SLUG_ID, project.slug_id);
    }
    if let Some(created_at) = project.created_at {
        converted = converted.with_timestamps(created_at, project.updated_at.unwrap_or(created_at));
    }
    converted
}

/// Builds the fields shared by `IssueCreateInput` and `IssueUpdateInput`.
///
/// Assignee and project are included only when present. Label ids are
/// resolved by the client.
pub(crate) fn issue_input(task: &Task) -> Map<String, Value> {
    let mut input = Map::new();
    input.insert("title".to_owned(), json!(task.title()));
    input.insert("description".to_owned(), json!(task.description()));
    input.insert(
        "priority".to_owned(),
        json!(priority_number(task.priority())),
    );
    if let Some(assignee_id) = task
        .assignee()
        .and_then(|assignee| assignee.metadata().get_str(LINEAR_ID))
    {
        input.insert("assigneeId".to_owned(), json!(assignee_id));
    }
    if let Some(project_id) = task.project_id() {
        input.insert("projectId".to_owned(), json!(project_id));
    }
    if let Some(due) = task.due_date() {
        input.insert(
            "dueDate".to_owned(),
            json!(due.date_naive().format("%Y-%m-%d").to_string()),
        );
    }
    input
}

/// Returns whether the task's status differs from the workflow state it was
/// read with.
#[must_use]
pub fn status_changed(task: &Task) -> bool {
    task.metadata()
        .get_str(STATE_TYPE)
        .is_none_or(|native| status_from_state_type(native) != task.status())
}

fn metadata_list<'a>(task: &'a Task, key: &str) -> Vec<&'a str> {
    task.metadata()
        .get_str(key)
        .map(|joined| joined.split(',').filter(|part| !part.is_empty()).collect())
        .unwrap_or_default()
}

/// Splits a task's labels into ids recorded when it was read and names
/// Linear has not yet been asked about.
///
/// Recorded names and ids that fail to line up are ignored, so every label
/// is then looked up.
#[must_use]
pub fn recorded_label_ids(task: &Task) -> (Vec<String>, Vec<String>) {
    let ids = metadata_list(task, LABEL_IDS);
    let names = metadata_list(task, LABEL_NAMES);
    let recorded: Vec<(&str, &str)> = if ids.len() == names.len() {
        names.into_iter().zip(ids).collect()
    } else {
        Vec::new()
    };

    let mut known = Vec::new();
    let mut unknown = Vec::new();
    for label in task.labels() {
        recorded
            .iter()
            .find(|(name, _)| *name == label.as_str())
            .map_or_else(
                || unknown.push(label.clone()),
                |(_, id)| known.push((*id).to_owned()),
            );
    }
    (known, unknown)
}

/// Builds the `IssueLabelFilter` for label names, limited to workspace
/// labels and those of `team_id` when it is known.
#[must_use]
pub fn label_filter(names: &[String], team_id: Option<&str>) -> Value {
    let mut filter = Map::new();
    filter.insert("name".to_owned(), json!({ "in": names }));
    if let Some(team) = team_id {
        filter.insert(
            "or".to_owned(),
            json!([
                { "team": { "id": { "eq": team } } },
                { "team": { "null": true } },
            ]),
        );
    }
    Value::Object(filter)
}
