//! Task form handling for the terminal user interface.
//!
//! This module provides the `TaskForm` structure which turns key presses into
//! draft edits. The draft itself lives in the `TaskEditor`; the form only
//! keeps what the editor has no notion of: raw text buffers, cursors, which
//! field is focused, and which label or subtask chip is selected.

use crossterm::event::KeyCode;

use crate::db::parse_due_today;
use crate::draft::DraftEdit;
use crate::editor::TaskEditor;
use crate::fields::{Priority, Recurrence};
use crate::tui::input::InputField;

/// Global order constants for the add-task form fields.
pub const TITLE_GLOBAL_ORDER: usize = 0;
pub const DESCRIPTION_GLOBAL_ORDER: usize = 1;
pub const PRIORITY_GLOBAL_ORDER: usize = 2;
pub const CATEGORY_GLOBAL_ORDER: usize = 3;
pub const NEW_CATEGORY_GLOBAL_ORDER: usize = 4;
pub const LABELS_GLOBAL_ORDER: usize = 5;
pub const RECURRENCE_GLOBAL_ORDER: usize = 6;
pub const SUBTASKS_GLOBAL_ORDER: usize = 7;
pub const DUE_GLOBAL_ORDER: usize = 8;
pub const REMINDER_GLOBAL_ORDER: usize = 9;

const FIELD_COUNT: usize = 10;

/// What the app should do after the form handled Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Commit the draft.
    Submit,
    /// Show a status message.
    Status(String),
}

/// Add-task form state.
#[derive(Debug, Default)]
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub new_category: InputField,
    pub label: InputField,
    pub subtask: InputField,
    pub due: InputField,
    pub current_field: usize,
    pub label_cursor: usize,
    pub subtask_cursor: usize,
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let idx = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % options.len()
    } else if idx == 0 {
        options.len() - 1
    } else {
        idx - 1
    };
    options[next]
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every buffer and focus the title again.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_COUNT - 1
        } else {
            self.current_field - 1
        };
    }

    pub fn is_text_field(&self) -> bool {
        !matches!(
            self.current_field,
            PRIORITY_GLOBAL_ORDER
                | CATEGORY_GLOBAL_ORDER
                | RECURRENCE_GLOBAL_ORDER
                | REMINDER_GLOBAL_ORDER
        )
    }

    fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_GLOBAL_ORDER => Some(&mut self.title),
            DESCRIPTION_GLOBAL_ORDER => Some(&mut self.description),
            NEW_CATEGORY_GLOBAL_ORDER => Some(&mut self.new_category),
            LABELS_GLOBAL_ORDER => Some(&mut self.label),
            SUBTASKS_GLOBAL_ORDER => Some(&mut self.subtask),
            DUE_GLOBAL_ORDER => Some(&mut self.due),
            _ => None,
        }
    }

    /// Push the buffer of a scalar text field into the draft.
    fn sync(&self, editor: &mut TaskEditor) {
        let edit = match self.current_field {
            TITLE_GLOBAL_ORDER => DraftEdit::SetTitle(self.title.value.clone()),
            DESCRIPTION_GLOBAL_ORDER => DraftEdit::SetDescription(self.description.value.clone()),
            DUE_GLOBAL_ORDER => DraftEdit::SetDueDate(parse_due_today(&self.due.value)),
            _ => return,
        };
        editor.apply(edit);
    }

    /// Whether the due buffer holds text that is not a recognised date.
    pub fn due_is_invalid(&self, editor: &TaskEditor) -> bool {
        !self.due.value.trim().is_empty() && editor.draft().due_date.is_none()
    }

    /// Index of the selected label chip, clamped to the current labels.
    pub fn selected_label(&self, editor: &TaskEditor) -> Option<usize> {
        let len = editor.draft().labels.len();
        (len > 0).then(|| self.label_cursor.min(len - 1))
    }

    /// Index of the selected subtask, clamped to the current subtasks.
    pub fn selected_subtask(&self, editor: &TaskEditor) -> Option<usize> {
        let len = editor.draft().subtasks.len();
        (len > 0).then(|| self.subtask_cursor.min(len - 1))
    }

    /// Options offered by the category selector; `None` is "no category".
    pub fn category_options(editor: &TaskEditor) -> Vec<Option<String>> {
        std::iter::once(None)
            .chain(editor.categories().iter().map(|c| Some(c.to_string())))
            .collect()
    }

    fn cycle_selector(&mut self, editor: &mut TaskEditor, forward: bool) {
        let draft = editor.draft();
        let edit = match self.current_field {
            PRIORITY_GLOBAL_ORDER => {
                DraftEdit::SetPriority(cycle(&Priority::ALL, draft.priority, forward))
            }
            RECURRENCE_GLOBAL_ORDER => {
                DraftEdit::SetRecurrence(cycle(&Recurrence::ALL, draft.recurrence, forward))
            }
            REMINDER_GLOBAL_ORDER => DraftEdit::SetReminder(!draft.reminder),
            CATEGORY_GLOBAL_ORDER => {
                let options = Self::category_options(editor);
                let current = if draft.category.is_empty() {
                    0
                } else {
                    options
                        .iter()
                        .position(|o| o.as_deref() == Some(draft.category.as_str()))
                        .unwrap_or(0)
                };
                let indices: Vec<usize> = (0..options.len()).collect();
                let next = cycle(&indices, current, forward);
                DraftEdit::SetCategory(options[next].clone().unwrap_or_default())
            }
            _ => return,
        };
        editor.apply(edit);
    }

    fn move_chip(&mut self, editor: &TaskEditor, forward: bool) {
        let (selected, len) = match self.current_field {
            LABELS_GLOBAL_ORDER => (self.selected_label(editor), editor.draft().labels.len()),
            SUBTASKS_GLOBAL_ORDER => (self.selected_subtask(editor), editor.draft().subtasks.len()),
            _ => return,
        };
        let Some(sel) = selected else {
            return;
        };
        let next = if forward {
            (sel + 1).min(len - 1)
        } else {
            sel.saturating_sub(1)
        };
        if self.current_field == LABELS_GLOBAL_ORDER {
            self.label_cursor = next;
        } else {
            self.subtask_cursor = next;
        }
    }

    fn remove_chip(&mut self, editor: &mut TaskEditor) {
        match self.current_field {
            LABELS_GLOBAL_ORDER => {
                if let Some(idx) = self.selected_label(editor) {
                    let label = editor.draft().labels[idx].clone();
                    editor.apply(DraftEdit::RemoveLabel(label));
                }
            }
            SUBTASKS_GLOBAL_ORDER => {
                if let Some(idx) = self.selected_subtask(editor) {
                    let id = editor.draft().subtasks[idx].id;
                    editor.apply(DraftEdit::RemoveSubtask(id));
                }
            }
            _ => {}
        }
    }

    fn chip_input_is_empty(&self) -> bool {
        match self.current_field {
            LABELS_GLOBAL_ORDER => self.label.is_empty(),
            SUBTASKS_GLOBAL_ORDER => self.subtask.is_empty(),
            _ => false,
        }
    }

    /// Handle an editing key (anything except Enter and Esc).
    pub fn handle_key(&mut self, key: KeyCode, editor: &mut TaskEditor) {
        match key {
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Left | KeyCode::Right => {
                let forward = key == KeyCode::Right;
                if self.chip_input_is_empty() {
                    self.move_chip(editor, forward);
                } else if self.is_text_field() {
                    if let Some(field) = self.active_input() {
                        if forward {
                            field.move_cursor_right();
                        } else {
                            field.move_cursor_left();
                        }
                    }
                } else {
                    self.cycle_selector(editor, forward);
                }
            }
            KeyCode::Char(' ') if self.current_field == REMINDER_GLOBAL_ORDER => {
                self.cycle_selector(editor, true);
            }
            KeyCode::Char(' ')
                if self.current_field == SUBTASKS_GLOBAL_ORDER && self.subtask.is_empty() =>
            {
                if let Some(idx) = self.selected_subtask(editor) {
                    let id = editor.draft().subtasks[idx].id;
                    editor.apply(DraftEdit::ToggleSubtask(id));
                }
            }
            KeyCode::Delete if self.chip_input_is_empty() => self.remove_chip(editor),
            KeyCode::Char(c) => {
                if let Some(field) = self.active_input() {
                    field.handle_char(c);
                    self.sync(editor);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.active_input() {
                    field.handle_backspace();
                    self.sync(editor);
                }
            }
            KeyCode::Delete => {
                if let Some(field) = self.active_input() {
                    field.handle_delete();
                    self.sync(editor);
                }
            }
            _ => {}
        }
    }

    /// Handle Enter: run the field's add action, or ask for a commit.
    pub fn activate(&mut self, editor: &mut TaskEditor) -> FormAction {
        match self.current_field {
            NEW_CATEGORY_GLOBAL_ORDER => {
                if editor.add_category(&self.new_category.value).changed() {
                    let msg = format!("Category '{}' added", self.new_category.value.trim());
                    self.new_category.clear();
                    FormAction::Status(msg)
                } else {
                    FormAction::Status("Category is empty or already exists".to_string())
                }
            }
            LABELS_GLOBAL_ORDER => {
                if editor.apply(DraftEdit::AddLabel(self.label.value.clone())).changed() {
                    self.label.clear();
                    self.label_cursor = editor.draft().labels.len().saturating_sub(1);
                    FormAction::Status("Label added".to_string())
                } else {
                    FormAction::Status("Label is empty or already present".to_string())
                }
            }
            SUBTASKS_GLOBAL_ORDER => {
                if editor.apply(DraftEdit::AddSubtask(self.subtask.value.clone())).changed() {
                    self.subtask.clear();
                    self.subtask_cursor = editor.draft().subtasks.len().saturating_sub(1);
                    FormAction::Status("Subtask added".to_string())
                } else {
                    FormAction::Status("Subtask title is empty".to_string())
                }
            }
            _ => FormAction::Submit,
        }
    }
}
