//! Task data structures.
//!
//! This module defines the committed `Task` and the `Subtask` items it owns,
//! together with the opaque identifiers both are addressed by.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::draft::Draft;
use crate::fields::*;

/// Identifier of a committed task, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a subtask, unique across the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubtaskId(pub u64);

impl fmt::Display for SubtaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A titled, completable unit of work owned by exactly one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: SubtaskId,
    pub title: String,
    pub completed: bool,
}

impl Subtask {
    /// Create an open subtask.
    pub fn new(id: SubtaskId, title: String) -> Self {
        Subtask {
            id,
            title,
            completed: false,
        }
    }
}

/// A committed task.
///
/// Fields are read-only once committed; the collection holding tasks is
/// append-only, so nothing hands out `&mut Task`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    priority: Priority,
    category: String,
    labels: Vec<String>,
    recurrence: Recurrence,
    subtasks: Vec<Subtask>,
    due_date: Option<NaiveDate>,
    reminder: bool,
}

impl Task {
    /// Freeze a draft into a task carrying `id`. Every field is moved verbatim.
    pub fn from_draft(id: TaskId, draft: Draft) -> Self {
        Task {
            id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            category: draft.category,
            labels: draft.labels,
            recurrence: draft.recurrence,
            subtasks: draft.subtasks,
            due_date: draft.due_date,
            reminder: draft.reminder,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn recurrence(&self) -> Recurrence {
        self.recurrence
    }

    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn reminder(&self) -> bool {
        self.reminder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_draft_copies_every_field() {
        let due = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let draft = Draft::default()
            .with_title("Write report")
            .with_description("Quarterly numbers")
            .with_priority(Priority::High)
            .with_category("Work")
            .add_label("finance")
            .with_recurrence(Recurrence::Monthly)
            .add_subtask("Outline", SubtaskId(7))
            .with_due_date(Some(due))
            .with_reminder(true);

        let task = Task::from_draft(TaskId(1), draft.clone());
        assert_eq!(task.id(), TaskId(1));
        assert_eq!(task.title(), draft.title);
        assert_eq!(task.description(), draft.description);
        assert_eq!(task.priority(), draft.priority);
        assert_eq!(task.category(), draft.category);
        assert_eq!(task.labels(), draft.labels.as_slice());
        assert_eq!(task.recurrence(), draft.recurrence);
        assert_eq!(task.subtasks(), draft.subtasks.as_slice());
        assert_eq!(task.due_date(), Some(due));
        assert!(task.reminder());
    }

    #[test]
    fn test_json_shape() {
        let task = Task::from_draft(TaskId(3), Draft::default().with_title("Ship"));
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["priority"], "Medium");
        assert_eq!(value["dueDate"], serde_json::Value::Null);
        assert_eq!(value["reminder"], false);
    }
}
