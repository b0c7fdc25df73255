//! Canonical task entity.

use super::{Metadata, MetadataValue, Platform, Priority, TaskStatus, User};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Platform-neutral unit of work.
///
/// Adapters build a fresh `Task` for every inbound conversion. Mutators that
/// change caller-visible content bump `updated_at` to the clock time of the
/// mutation; the `with_*` builders used during conversion do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    status: TaskStatus,
    priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assignee: Option<User>,
    platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    labels: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    metadata: Metadata,
}

/// Parameter object for reconstructing a task from platform data.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskParts {
    /// Platform-native human identifier (issue key).
    pub id: String,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Reconciled status.
    pub status: TaskStatus,
    /// Reconciled priority.
    pub priority: Priority,
    /// Assigned user snapshot, if any.
    pub assignee: Option<User>,
    /// Origin platform.
    pub platform: Platform,
    /// Owning project identifier, if any.
    pub project_id: Option<String>,
    /// Label names.
    pub labels: Vec<String>,
    /// Creation timestamp reported by the platform.
    pub created_at: DateTime<Utc>,
    /// Update timestamp reported by the platform.
    pub updated_at: DateTime<Utc>,
    /// Due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Platform-native fields with no canonical slot.
    pub metadata: Metadata,
}

impl Task {
    /// Creates an open, medium-priority task stamped with the clock time.
    #[must_use]
    pub fn new<C: Clock + ?Sized>(title: impl Into<String>, platform: Platform, clock: &C) -> Self {
        let timestamp = clock.utc();
        Self {
            id: String::new(),
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Open,
            priority: Priority::Medium,
            assignee: None,
            platform,
            project_id: None,
            labels: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
            due_date: None,
            metadata: Metadata::new(),
        }
    }

    /// Reconstructs a task from converted platform data.
    ///
    /// Labels are de-duplicated, keeping first occurrences.
    #[must_use]
    pub fn from_parts(parts: TaskParts) -> Self {
        let mut labels: Vec<String> = Vec::with_capacity(parts.labels.len());
        for label in parts.labels {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }

        Self {
            id: parts.id,
            title: parts.title,
            description: parts.description,
            status: parts.status,
            priority: parts.priority,
            assignee: parts.assignee,
            platform: parts.platform,
            project_id: parts.project_id.filter(|id| !id.is_empty()),
            labels,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
            due_date: parts.due_date,
            metadata: parts.metadata,
        }
    }

    /// Sets the identifier without touching timestamps.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Returns the platform-native human identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the assigned user snapshot, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&User> {
        self.assignee.as_ref()
    }

    /// Returns the origin platform.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the owning project identifier, if any.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// Returns the label names.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the metadata bag.
    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Reads a metadata value.
    #[must_use]
    pub fn get_metadata(&self, key: &str) -> Option<&MetadataValue> {
        self.metadata.get(key)
    }

    /// Replaces the title.
    pub fn set_title<C: Clock + ?Sized>(&mut self, title: impl Into<String>, clock: &C) {
        self.title = title.into();
        self.touch(clock);
    }

    /// Replaces the description.
    pub fn set_description<C: Clock + ?Sized>(&mut self, description: impl Into<String>, clock: &C) {
        self.description = description.into();
        self.touch(clock);
    }

    /// Sets the status.
    pub fn set_status<C: Clock + ?Sized>(&mut self, status: TaskStatus, clock: &C) {
        self.status = status;
        self.touch(clock);
    }

    /// Sets the status from its canonical string form.
    ///
    /// Unknown values are ignored: neither the status nor `updated_at`
    /// changes. Returns whether the write took effect.
    pub fn set_status_str<C: Clock + ?Sized>(&mut self, status: &str, clock: &C) -> bool {
        TaskStatus::try_from(status)
            .map(|parsed| self.set_status(parsed, clock))
            .is_ok()
    }

    /// Sets the priority.
    pub fn set_priority<C: Clock + ?Sized>(&mut self, priority: Priority, clock: &C) {
        self.priority = priority;
        self.touch(clock);
    }

    /// Sets the priority from its canonical string form.
    ///
    /// Unknown values are ignored: neither the priority nor `updated_at`
    /// changes. Returns whether the write took effect.
    pub fn set_priority_str<C: Clock + ?Sized>(&mut self, priority: &str, clock: &C) -> bool {
        Priority::try_from(priority)
            .map(|parsed| self.set_priority(parsed, clock))
            .is_ok()
    }

    /// Replaces or clears the assignee snapshot.
    pub fn set_assignee<C: Clock + ?Sized>(&mut self, assignee: Option<User>, clock: &C) {
        self.assignee = assignee;
        self.touch(clock);
    }

    /// Replaces or clears the owning project.
    pub fn set_project_id<C: Clock + ?Sized>(&mut self, project_id: Option<String>, clock: &C) {
        self.project_id = project_id.filter(|id| !id.is_empty());
        self.touch(clock);
    }

    /// Replaces or clears the due date.
    pub fn set_due_date<C: Clock + ?Sized>(&mut self, due_date: Option<DateTime<Utc>>, clock: &C) {
        self.due_date = due_date;
        self.touch(clock);
    }

    /// Adds a label. Duplicates are ignored and leave `updated_at` alone.
    pub fn add_label<C: Clock + ?Sized>(&mut self, label: impl Into<String>, clock: &C) {
        let value = label.into();
        if self.labels.contains(&value) {
            return;
        }
        self.labels.push(value);
        self.touch(clock);
    }

    /// Removes a label. Absent labels leave `updated_at` alone.
    pub fn remove_label<C: Clock + ?Sized>(&mut self, label: &str, clock: &C) {
        let before = self.labels.len();
        self.labels.retain(|existing| existing != label);
        if self.labels.len() != before {
            self.touch(clock);
        }
    }

    /// Stores a metadata value.
    pub fn set_metadata<C: Clock + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
        clock: &C,
    ) {
        self.metadata.insert(key, value);
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch<C: Clock + ?Sized>(&mut self, clock: &C) {
        self.updated_at = clock.utc();
    }
}
