//! Wire-shaped task records as delivered by the task source.
//!
//! Records mirror the backend's JSON payload, where nearly every field is
//! optional and identifiers arrive as either numbers or strings. They are
//! converted into [`Task`] exactly once, at the source boundary, so the rest
//! of the crate only ever sees validated tasks.

use super::{
    Assignee, BoardDomainError, ColumnId, ParsePriorityError, Priority, Task, TaskId,
    TimeTracking, UserId,
};
use serde::{Deserialize, Serialize};

/// Identifier that the backend sends either as a number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Numeric identifier.
    Number(u64),
    /// Textual identifier.
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value,
        }
    }
}

/// Priority object embedded in a task record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityRecord {
    /// Backend priority identifier (1 = high through 4 = lowest).
    pub priority_id: Option<u64>,
    /// Priority label.
    pub priority: Option<String>,
}

/// Assignee entry embedded in a task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssigneeRecord {
    /// Backend user identifier.
    pub id: u64,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Task record exactly as the task source returns it.
///
/// Assignees arrive under `assignees`, `assigness` or `listUserAsign`
/// depending on the endpoint; `null` counts as an empty list, and lists
/// under several names are merged in that order, keeping the first entry
/// per user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TaskRecordWire")]
pub struct TaskRecord {
    /// Task identifier.
    pub task_id: Option<RawId>,
    /// Display name.
    pub task_name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Status identifier, which names the board column.
    pub status_id: Option<RawId>,
    /// Priority object.
    pub priority_task: Option<PriorityRecord>,
    /// Assigned users.
    pub assignees: Vec<AssigneeRecord>,
    /// Original estimate.
    pub original_estimate: Option<i64>,
    /// Time logged so far.
    pub time_tracking_spent: Option<i64>,
    /// Time left.
    pub time_tracking_remaining: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecordWire {
    task_id: Option<RawId>,
    task_name: Option<String>,
    description: Option<String>,
    status_id: Option<RawId>,
    priority_task: Option<PriorityRecord>,
    assignees: Option<Vec<AssigneeRecord>>,
    assigness: Option<Vec<AssigneeRecord>>,
    list_user_asign: Option<Vec<AssigneeRecord>>,
    original_estimate: Option<i64>,
    time_tracking_spent: Option<i64>,
    time_tracking_remaining: Option<i64>,
}

impl From<TaskRecordWire> for TaskRecord {
    fn from(wire: TaskRecordWire) -> Self {
        let mut assignees: Vec<AssigneeRecord> = Vec::new();
        let lists = [wire.assignees, wire.assigness, wire.list_user_asign];
        for entry in lists.into_iter().flatten().flatten() {
            if !assignees.iter().any(|known| known.id == entry.id) {
                assignees.push(entry);
            }
        }
        Self {
            task_id: wire.task_id,
            task_name: wire.task_name,
            description: wire.description,
            status_id: wire.status_id,
            priority_task: wire.priority_task,
            assignees,
            original_estimate: wire.original_estimate,
            time_tracking_spent: wire.time_tracking_spent,
            time_tracking_remaining: wire.time_tracking_remaining,
        }
    }
}

impl TaskRecord {
    /// Parses a JSON array of task records.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidRecord`] when the payload is not a
    /// JSON array of records.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, BoardDomainError> {
        serde_json::from_str(json).map_err(|err| BoardDomainError::InvalidRecord(err.to_string()))
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = BoardDomainError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let id = TaskId::new(
            record
                .task_id
                .map(RawId::into_string)
                .unwrap_or_default(),
        )?;
        let status = match record.status_id {
            Some(raw) => ColumnId::new(raw.into_string())?,
            None => return Err(BoardDomainError::MissingStatus(id)),
        };
        let priority = record
            .priority_task
            .map(parse_priority)
            .transpose()?
            .unwrap_or_default();
        let time_tracking = TimeTracking {
            original_estimate: non_negative(&id, "original estimate", record.original_estimate)?,
            time_spent: non_negative(&id, "time spent", record.time_tracking_spent)?,
            time_remaining: non_negative(&id, "time remaining", record.time_tracking_remaining)?,
        };
        let assignees = record.assignees.into_iter().map(|entry| Assignee {
            id: UserId::new(entry.id),
            name: entry.name.unwrap_or_default(),
            avatar: entry.avatar,
        });

        let mut task = Self::new(id, record.task_name.unwrap_or_default(), status)?
            .with_priority(priority)
            .with_assignees(assignees)
            .with_time_tracking(time_tracking);
        if let Some(description) = record.description {
            task = task.with_description(description);
        }
        Ok(task)
    }
}

/// Resolves a priority object, preferring the label over the numeric id.
fn parse_priority(record: PriorityRecord) -> Result<Priority, ParsePriorityError> {
    if let Some(label) = record.priority {
        return Priority::try_from(label.as_str());
    }
    match record.priority_id {
        None => Ok(Priority::default()),
        Some(1) => Ok(Priority::High),
        Some(2) => Ok(Priority::Medium),
        Some(3) => Ok(Priority::Low),
        Some(4) => Ok(Priority::Lowest),
        Some(other) => Err(ParsePriorityError(other.to_string())),
    }
}

fn non_negative(
    task_id: &TaskId,
    field: &'static str,
    value: Option<i64>,
) -> Result<u64, BoardDomainError> {
    let raw = value.unwrap_or_default();
    u64::try_from(raw).map_err(|_| BoardDomainError::NegativeTimeTracking {
        task_id: task_id.clone(),
        field,
        value: raw,
    })
}
