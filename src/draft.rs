//! The in-progress task being composed.
//!
//! A `Draft` is a plain value. Every edit consumes the draft and returns the
//! next one, so callers never observe a half-applied change. Validation is
//! deferred to commit time; the only normalisation happens at the add
//! boundary of labels and subtasks, where input is trimmed.

use chrono::NaiveDate;

use crate::db::IdAllocator;
use crate::fields::*;
use crate::task::{Subtask, SubtaskId};

/// Task-shaped value under construction. It has no id until committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
    pub labels: Vec<String>,
    pub recurrence: Recurrence,
    pub subtasks: Vec<Subtask>,
    pub due_date: Option<NaiveDate>,
    pub reminder: bool,
}

/// A single edit applicable to a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    SetTitle(String),
    SetDescription(String),
    SetPriority(Priority),
    SetCategory(String),
    SetRecurrence(Recurrence),
    SetDueDate(Option<NaiveDate>),
    SetReminder(bool),
    AddLabel(String),
    RemoveLabel(String),
    AddSubtask(String),
    RemoveSubtask(SubtaskId),
    ToggleSubtask(SubtaskId),
}

impl Draft {
    pub fn with_title(self, title: impl Into<String>) -> Self {
        Draft {
            title: title.into(),
            ..self
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Draft {
            description: description.into(),
            ..self
        }
    }

    pub fn with_priority(self, priority: Priority) -> Self {
        Draft { priority, ..self }
    }

    pub fn with_category(self, category: impl Into<String>) -> Self {
        Draft {
            category: category.into(),
            ..self
        }
    }

    pub fn with_recurrence(self, recurrence: Recurrence) -> Self {
        Draft { recurrence, ..self }
    }

    pub fn with_due_date(self, due_date: Option<NaiveDate>) -> Self {
        Draft { due_date, ..self }
    }

    pub fn with_reminder(self, reminder: bool) -> Self {
        Draft { reminder, ..self }
    }

    /// Append a label unless it is blank or already present (exact match).
    pub fn add_label(mut self, text: &str) -> Self {
        let label = text.trim();
        if !label.is_empty() && !self.labels.iter().any(|l| l == label) {
            self.labels.push(label.to_string());
        }
        self
    }

    /// Remove the label equal to `text`, if any.
    pub fn remove_label(mut self, text: &str) -> Self {
        if let Some(pos) = self.labels.iter().position(|l| l == text) {
            self.labels.remove(pos);
        }
        self
    }

    /// Append an open subtask unless the title is blank.
    pub fn add_subtask(mut self, title: &str, id: SubtaskId) -> Self {
        let title = title.trim();
        if !title.is_empty() {
            self.subtasks.push(Subtask::new(id, title.to_string()));
        }
        self
    }

    pub fn remove_subtask(mut self, id: SubtaskId) -> Self {
        self.subtasks.retain(|s| s.id != id);
        self
    }

    /// Flip the completion flag of the subtask with `id`, if present.
    pub fn toggle_subtask(mut self, id: SubtaskId) -> Self {
        if let Some(subtask) = self.subtasks.iter_mut().find(|s| s.id == id) {
            subtask.completed = !subtask.completed;
        }
        self
    }

    /// Whether the draft would pass commit validation. Only an empty title
    /// is refused; whitespace counts as content.
    pub fn is_committable(&self) -> bool {
        !self.title.is_empty()
    }

    /// Apply one edit. Subtask ids are drawn from `ids` only when a subtask
    /// is actually added.
    pub fn apply(self, edit: DraftEdit, ids: &mut IdAllocator) -> Self {
        match edit {
            DraftEdit::SetTitle(title) => self.with_title(title),
            DraftEdit::SetDescription(description) => self.with_description(description),
            DraftEdit::SetPriority(priority) => self.with_priority(priority),
            DraftEdit::SetCategory(category) => self.with_category(category),
            DraftEdit::SetRecurrence(recurrence) => self.with_recurrence(recurrence),
            DraftEdit::SetDueDate(due) => self.with_due_date(due),
            DraftEdit::SetReminder(reminder) => self.with_reminder(reminder),
            DraftEdit::AddLabel(text) => self.add_label(&text),
            DraftEdit::RemoveLabel(text) => self.remove_label(&text),
            DraftEdit::AddSubtask(title) => {
                if title.trim().is_empty() {
                    self
                } else {
                    let id = ids.next_subtask_id();
                    self.add_subtask(&title, id)
                }
            }
            DraftEdit::RemoveSubtask(id) => self.remove_subtask(id),
            DraftEdit::ToggleSubtask(id) => self.toggle_subtask(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_field_setters_touch_one_field() {
        let base = Draft::default().with_title("Plan").add_label("home");
        let edited = base.clone().with_priority(Priority::Low);
        assert_eq!(edited.priority, Priority::Low);
        assert_eq!(edited.title, base.title);
        assert_eq!(edited.labels, base.labels);

        let edited = base.clone().with_title("");
        assert_eq!(edited.title, "");
        assert_eq!(edited.priority, base.priority);
    }

    #[test]
    fn test_add_label_is_idempotent() {
        for text in ["urgent", "a b", "Ünïcode"] {
            let once = Draft::default().add_label("x").add_label(text);
            let twice = once.clone().add_label(text);
            assert_eq!(once.labels, twice.labels);
        }
    }

    #[test]
    fn test_add_label_ignores_blank_and_trims() {
        let draft = Draft::default().add_label("").add_label("   ").add_label("  home ");
        assert_eq!(draft.labels, vec!["home".to_string()]);
        let draft = draft.add_label("home");
        assert_eq!(draft.labels.len(), 1);
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        let draft = Draft::default().add_label("Work").add_label("work");
        assert_eq!(draft.labels, vec!["Work".to_string(), "work".to_string()]);
    }

    #[test]
    fn test_remove_label_restores_original() {
        let original = Draft::default().add_label("a").add_label("b");
        let restored = original.clone().add_label("c").remove_label("c");
        assert_eq!(restored.labels, original.labels);

        let unchanged = original.clone().remove_label("missing");
        assert_eq!(unchanged, original);
    }

    #[test]
    fn test_remove_label_needs_the_trimmed_form() {
        let draft = Draft::default().add_label(" x ");
        assert_eq!(draft.clone().remove_label(" x ").labels, vec!["x".to_string()]);
        assert!(draft.remove_label("x").labels.is_empty());
    }

    #[test]
    fn test_subtask_add_remove_toggle() {
        let draft = Draft::default()
            .add_subtask("Outline", SubtaskId(1))
            .add_subtask("", SubtaskId(2))
            .add_subtask("Draft", SubtaskId(3));
        assert_eq!(draft.subtasks.len(), 2);
        assert_eq!(draft.subtasks[0].title, "Outline");
        assert!(!draft.subtasks[0].completed);

        let draft = draft.toggle_subtask(SubtaskId(3));
        assert!(draft.subtasks[1].completed);
        assert!(!draft.subtasks[0].completed);

        let draft = draft.toggle_subtask(SubtaskId(99)).remove_subtask(SubtaskId(1));
        assert_eq!(draft.subtasks.len(), 1);
        assert_eq!(draft.subtasks[0].id, SubtaskId(3));

        let same = draft.clone().remove_subtask(SubtaskId(1));
        assert_eq!(same, draft);
    }

    #[test]
    fn test_apply_allocates_distinct_subtask_ids() {
        let mut ids = IdAllocator::default();
        let mut draft = Draft::default();
        for title in ["a", "b", "", "c", "a"] {
            draft = draft.apply(DraftEdit::AddSubtask(title.to_string()), &mut ids);
        }
        assert_eq!(draft.subtasks.len(), 4);
        let unique: HashSet<SubtaskId> = draft.subtasks.iter().map(|s| s.id).collect();
        assert_eq!(unique.len(), draft.subtasks.len());
    }

    #[test]
    fn test_blank_subtask_does_not_consume_id() {
        let mut ids = IdAllocator::default();
        let draft = Draft::default().apply(DraftEdit::AddSubtask("  ".into()), &mut ids);
        assert!(draft.subtasks.is_empty());
        assert_eq!(ids.next_subtask_id(), SubtaskId(1));
    }

    #[test]
    fn test_is_committable() {
        assert!(!Draft::default().is_committable());
        assert!(Draft::default().with_title("  ").is_committable());
        assert!(Draft::default().with_title("x").is_committable());
    }
}
