//! Unit tests for Linear field mapping and filter construction.

use crate::platform::adapters::linear::mapping::{
    STATE_TYPE, build_issue_filter, parse_due_date, priority_from_number, priority_number,
    state_type, status_changed, status_from_state_type,
};
use crate::task::domain::{Platform, Priority, Task, TaskFilter, TaskStatus};
use crate::test_support::SteppingClock;
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("backlog", TaskStatus::Open)]
#[case("unstarted", TaskStatus::Open)]
#[case("triage", TaskStatus::Open)]
#[case("started", TaskStatus::InProgress)]
#[case("completed", TaskStatus::Done)]
#[case("canceled", TaskStatus::Cancelled)]
fn state_type_maps_to_canonical(#[case] native: &str, #[case] expected: TaskStatus) {
    assert_eq!(status_from_state_type(native), expected);
}

#[test]
fn canonical_status_reads_back_through_state_type() {
    for status in TaskStatus::ALL {
        assert_eq!(status_from_state_type(state_type(status)), status);
    }
}

#[rstest]
#[case(0, Priority::Medium)]
#[case(1, Priority::Urgent)]
#[case(2, Priority::High)]
#[case(3, Priority::Medium)]
#[case(4, Priority::Low)]
#[case(9, Priority::Medium)]
fn priority_number_maps_to_canonical(#[case] value: u64, #[case] expected: Priority) {
    assert_eq!(priority_from_number(value), expected);
}

#[test]
fn canonical_priority_reads_back_through_number() {
    for priority in Priority::ALL {
        assert_eq!(
            priority_from_number(u64::from(priority_number(priority))),
            priority
        );
    }
}

#[test]
fn empty_filter_builds_empty_object() {
    assert_eq!(build_issue_filter(&TaskFilter::new()), json!({}));
}

#[test]
fn filter_object_combines_every_criterion() {
    let filter = TaskFilter::new()
        .with_status(TaskStatus::InProgress)
        .with_priority(Priority::Urgent)
        .with_assignee("me")
        .with_project_id("proj-1")
        .with_labels(vec!["bug".to_owned(), "ui".to_owned()])
        .with_query("login");

    assert_eq!(
        build_issue_filter(&filter),
        json!({
            "state": { "type": { "eq": "started" } },
            "assignee": { "isMe": { "eq": true } },
            "project": { "id": { "eq": "proj-1" } },
            "priority": { "eq": 1 },
            "searchableContent": { "contains": "login" },
            "and": [
                { "labels": { "some": { "name": { "eq": "bug" } } } },
                { "labels": { "some": { "name": { "eq": "ui" } } } }
            ]
        })
    );
}

#[test]
fn named_assignee_filters_by_email() {
    let filter = TaskFilter::new().with_assignee("grace@example.com");

    assert_eq!(
        build_issue_filter(&filter),
        json!({ "assignee": { "email": { "eq": "grace@example.com" } } })
    );
}

#[test]
fn due_date_accepts_date_and_timestamp() {
    let midnight = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).single();

    assert_eq!(parse_due_date("2024-03-10"), midnight);
    assert_eq!(parse_due_date("2024-03-10T00:00:00Z"), midnight);
    assert_eq!(parse_due_date("soon"), None);
}

#[test]
fn status_change_detected_against_native_state() {
    let clock = SteppingClock::default();
    let mut task = Task::new("Ship", Platform::Linear, &clock);
    assert!(status_changed(&task), "untracked state always counts as changed");

    task.set_metadata(STATE_TYPE, "unstarted", &clock);
    assert!(!status_changed(&task));

    task.set_status(TaskStatus::Done, &clock);
    assert!(status_changed(&task));
}
