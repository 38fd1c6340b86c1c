//! Task editor state container.
//!
//! `TaskEditor` owns the current draft and the session database. It is the
//! single entry point through which presentation layers change state: every
//! operation runs to completion and reports what happened through its return
//! value.

use tracing::{debug, info, warn};

use crate::db::{CategoryRegistry, Database};
use crate::draft::{Draft, DraftEdit};
use crate::error::{CommitRejected, NotifyError};
use crate::notify::Notifier;
use crate::task::{Task, TaskId};

/// Whether an operation changed observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Changed,
    Unchanged,
}

impl EditOutcome {
    pub fn changed(self) -> bool {
        self == EditOutcome::Changed
    }
}

/// Draft plus committed tasks for one editing session.
#[derive(Debug, Default)]
pub struct TaskEditor {
    draft: Draft,
    db: Database,
}

impl TaskEditor {
    /// Create an editor over an existing database with an empty draft.
    pub fn new(db: Database) -> Self {
        TaskEditor {
            draft: Draft::default(),
            db,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn tasks(&self) -> &[Task] {
        self.db.tasks()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.db.get(id)
    }

    pub fn categories(&self) -> &CategoryRegistry {
        self.db.categories()
    }

    /// Apply one edit to the draft.
    pub fn apply(&mut self, edit: DraftEdit) -> EditOutcome {
        debug!(?edit, "applying draft edit");
        let before = self.draft.clone();
        let draft = std::mem::take(&mut self.draft);
        self.draft = draft.apply(edit, self.db.ids_mut());
        if self.draft == before {
            EditOutcome::Unchanged
        } else {
            EditOutcome::Changed
        }
    }

    /// Register a category offered by the category selector.
    pub fn add_category(&mut self, name: &str) -> EditOutcome {
        if self.db.categories_mut().add(name) {
            debug!(category = %name.trim(), "category added");
            EditOutcome::Changed
        } else {
            EditOutcome::Unchanged
        }
    }

    /// Commit the draft and reset it. A rejected commit changes nothing.
    pub fn commit(&mut self) -> Result<&Task, CommitRejected> {
        let task = match self.db.commit(&self.draft) {
            Ok(task) => task,
            Err(e) => {
                warn!(reason = %e, "commit rejected");
                return Err(e);
            }
        };
        self.draft = Draft::default();
        Ok(task)
    }

    /// Throw the current draft away.
    pub fn discard_draft(&mut self) -> EditOutcome {
        if self.draft == Draft::default() {
            return EditOutcome::Unchanged;
        }
        debug!("draft discarded");
        self.draft = Draft::default();
        EditOutcome::Changed
    }

    /// Ask `notifier` to deliver the reminder of a committed task.
    pub fn send_reminder(&self, id: TaskId, notifier: &dyn Notifier) -> Result<(), NotifyError> {
        let task = self.db.get(id).ok_or(NotifyError::UnknownTask(id))?;
        if !task.reminder() {
            return Err(NotifyError::ReminderDisabled(id));
        }
        notifier.notify(task)?;
        info!(task = %id, "reminder dispatched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::*;
    use crate::notify::testing::RecordingNotifier;

    fn add(editor: &mut TaskEditor, edit: DraftEdit) -> EditOutcome {
        editor.apply(edit)
    }

    #[test]
    fn test_commit_empty_title_is_rejected() {
        let mut editor = TaskEditor::default();
        add(&mut editor, DraftEdit::AddLabel("kept".into()));
        assert_eq!(editor.commit().unwrap_err(), CommitRejected::EmptyTitle);
        assert_eq!(editor.commit().unwrap_err(), CommitRejected::EmptyTitle);
        assert!(editor.tasks().is_empty());
        assert_eq!(editor.draft().labels, vec!["kept".to_string()]);
    }

    #[test]
    fn test_commit_accepts_whitespace_title_verbatim() {
        let mut editor = TaskEditor::default();
        add(&mut editor, DraftEdit::SetTitle("   ".into()));
        let task = editor.commit().unwrap();
        assert_eq!(task.title(), "   ");
        assert_eq!(editor.tasks().len(), 1);
    }

    #[test]
    fn test_commit_copies_draft_and_resets() {
        let mut editor = TaskEditor::default();
        add(&mut editor, DraftEdit::SetTitle("Pay rent".into()));
        add(&mut editor, DraftEdit::SetCategory("Personal".into()));
        add(&mut editor, DraftEdit::SetReminder(true));
        add(&mut editor, DraftEdit::SetRecurrence(Recurrence::Monthly));
        let snapshot = editor.draft().clone();

        let task = editor.commit().unwrap().clone();
        assert_eq!(task, Task::from_draft(task.id(), snapshot));
        assert_eq!(editor.tasks().len(), 1);
        assert_eq!(editor.draft(), &Draft::default());
    }

    #[test]
    fn test_write_report_scenario() {
        let mut editor = TaskEditor::default();
        add(&mut editor, DraftEdit::SetTitle("Write report".into()));
        add(&mut editor, DraftEdit::SetPriority(Priority::High));
        assert_eq!(add(&mut editor, DraftEdit::AddLabel("urgent".into())), EditOutcome::Changed);
        assert_eq!(add(&mut editor, DraftEdit::AddLabel("urgent".into())), EditOutcome::Unchanged);
        add(&mut editor, DraftEdit::AddSubtask("Outline".into()));

        let task = editor.commit().unwrap();
        assert_eq!(task.title(), "Write report");
        assert_eq!(task.labels().to_vec(), vec!["urgent".to_string()]);
        assert_eq!(task.priority(), Priority::High);
        assert_eq!(task.subtasks().len(), 1);
        assert_eq!(task.subtasks()[0].title, "Outline");
        assert!(!task.subtasks()[0].completed);

        assert_eq!(editor.tasks().len(), 1);
        let draft = editor.draft();
        assert_eq!(draft.title, "");
        assert_eq!(draft.priority, Priority::Medium);
        assert!(draft.labels.is_empty());
        assert!(draft.subtasks.is_empty());
        assert_eq!(draft.recurrence, Recurrence::None);
        assert_eq!(draft.due_date, None);
        assert!(!draft.reminder);
    }

    #[test]
    fn test_add_category_noops() {
        let mut editor = TaskEditor::default();
        assert_eq!(editor.add_category(""), EditOutcome::Unchanged);
        assert_eq!(editor.add_category("Work"), EditOutcome::Unchanged);
        assert_eq!(editor.categories().iter().collect::<Vec<_>>(), vec!["Work", "Personal"]);
        assert!(editor.add_category("Health").changed());
        assert_eq!(editor.categories().len(), 3);
    }

    #[test]
    fn test_category_is_not_validated_against_registry() {
        let mut editor = TaskEditor::default();
        add(&mut editor, DraftEdit::SetTitle("Odd".into()));
        add(&mut editor, DraftEdit::SetCategory("Unlisted".into()));
        let task = editor.commit().unwrap();
        assert_eq!(task.category(), "Unlisted");
        assert!(!editor.categories().contains("Unlisted"));
    }

    #[test]
    fn test_subtask_ids_unique_across_commits() {
        let mut editor = TaskEditor::default();
        add(&mut editor, DraftEdit::SetTitle("A".into()));
        add(&mut editor, DraftEdit::AddSubtask("one".into()));
        let first = editor.commit().unwrap().subtasks()[0].id;
        add(&mut editor, DraftEdit::SetTitle("B".into()));
        add(&mut editor, DraftEdit::AddSubtask("one".into()));
        let second = editor.commit().unwrap().subtasks()[0].id;
        assert_ne!(first, second);
    }

    #[test]
    fn test_toggle_and_remove_subtask_through_editor() {
        let mut editor = TaskEditor::default();
        add(&mut editor, DraftEdit::AddSubtask("a".into()));
        add(&mut editor, DraftEdit::AddSubtask("b".into()));
        let id = editor.draft().subtasks[1].id;
        assert!(add(&mut editor, DraftEdit::ToggleSubtask(id)).changed());
        assert!(editor.draft().subtasks[1].completed);
        assert!(add(&mut editor, DraftEdit::RemoveSubtask(id)).changed());
        assert_eq!(add(&mut editor, DraftEdit::RemoveSubtask(id)), EditOutcome::Unchanged);
        assert_eq!(editor.draft().subtasks.len(), 1);
    }

    #[test]
    fn test_discard_draft() {
        let mut editor = TaskEditor::default();
        assert_eq!(editor.discard_draft(), EditOutcome::Unchanged);
        add(&mut editor, DraftEdit::SetTitle("tmp".into()));
        assert!(editor.discard_draft().changed());
        assert_eq!(editor.draft(), &Draft::default());
        assert!(editor.tasks().is_empty());
    }

    #[test]
    fn test_send_reminder() {
        let mut editor = TaskEditor::default();
        add(&mut editor, DraftEdit::SetTitle("quiet".into()));
        let quiet = editor.commit().unwrap().id();
        add(&mut editor, DraftEdit::SetTitle("loud".into()));
        add(&mut editor, DraftEdit::SetReminder(true));
        let loud = editor.commit().unwrap().id();

        let notifier = RecordingNotifier::default();
        assert_eq!(
            editor.send_reminder(quiet, &notifier),
            Err(NotifyError::ReminderDisabled(quiet))
        );
        assert_eq!(
            editor.send_reminder(TaskId(99), &notifier),
            Err(NotifyError::UnknownTask(TaskId(99)))
        );
        assert_eq!(editor.send_reminder(loud, &notifier), Ok(()));
        assert_eq!(*notifier.sent.borrow(), vec![loud]);

        let failing = RecordingNotifier {
            fail: true,
            ..Default::default()
        };
        assert!(matches!(
            editor.send_reminder(loud, &failing),
            Err(NotifyError::Delivery(_))
        ));
    }
}
