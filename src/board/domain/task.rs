//! Task record carried on the board and its value types.

use super::{BoardDomainError, ColumnId, ParsePriorityError, TaskId, UserId};
use serde::{Deserialize, Serialize};

/// Task priority label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Needs attention before anything else.
    High,
    /// Regular work.
    #[default]
    Medium,
    /// Can wait.
    Low,
    /// Only if nothing else is left.
    Lowest,
}

impl Priority {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Lowest => "lowest",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "lowest" => Ok(Self::Lowest),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// User assigned to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    /// Backend user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Avatar URL, if the backend provides one.
    pub avatar: Option<String>,
}

impl Assignee {
    /// Creates an assignee without an avatar.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: None,
        }
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// Time-tracking numbers carried through the board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeTracking {
    /// Original estimate.
    pub original_estimate: u64,
    /// Time logged so far.
    pub time_spent: u64,
    /// Time left.
    pub time_remaining: u64,
}

/// A task as held by the board.
///
/// The status always names the column the task sits in while it is on a
/// board; only the board itself changes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskFields")]
pub struct Task {
    id: TaskId,
    name: String,
    description: Option<String>,
    assignees: Vec<Assignee>,
    priority: Priority,
    status: ColumnId,
    time_tracking: TimeTracking,
}

/// Unvalidated task fields, checked through [`Task::new`] on deserialization.
#[derive(Deserialize)]
struct TaskFields {
    id: TaskId,
    name: String,
    description: Option<String>,
    #[serde(default)]
    assignees: Vec<Assignee>,
    #[serde(default)]
    priority: Priority,
    status: ColumnId,
    #[serde(default)]
    time_tracking: TimeTracking,
}

impl TryFrom<TaskFields> for Task {
    type Error = BoardDomainError;

    fn try_from(fields: TaskFields) -> Result<Self, Self::Error> {
        let mut task = Self::new(fields.id, fields.name, fields.status)?
            .with_assignees(fields.assignees)
            .with_priority(fields.priority)
            .with_time_tracking(fields.time_tracking);
        if let Some(description) = fields.description {
            task = task.with_description(description);
        }
        Ok(task)
    }
}

impl Task {
    /// Creates a task with default priority, no assignees and zeroed time
    /// tracking.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskName`] when the name is blank.
    pub fn new(
        id: TaskId,
        name: impl Into<String>,
        status: ColumnId,
    ) -> Result<Self, BoardDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
            description: None,
            assignees: Vec::new(),
            priority: Priority::default(),
            status,
            time_tracking: TimeTracking::default(),
        })
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = Assignee>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the time-tracking numbers.
    #[must_use]
    pub const fn with_time_tracking(mut self, time_tracking: TimeTracking) -> Self {
        self.time_tracking = time_tracking;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the assignees.
    #[must_use]
    pub fn assignees(&self) -> &[Assignee] {
        &self.assignees
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the status, which is the identifier of the owning column.
    #[must_use]
    pub const fn status(&self) -> &ColumnId {
        &self.status
    }

    /// Returns the time-tracking numbers.
    #[must_use]
    pub const fn time_tracking(&self) -> TimeTracking {
        self.time_tracking
    }

    pub(crate) fn set_status(&mut self, status: ColumnId) {
        self.status = status;
    }
}
