//! Derived view rules for committed tasks.
//!
//! Pure classification used by every presentation layer, so the TUI and the
//! CLI agree on what a task shows.

use crate::fields::*;
use crate::task::Task;

/// Badge style for a priority.
pub fn badge_style(priority: Priority) -> BadgeStyle {
    match priority {
        Priority::High => BadgeStyle::Urgent,
        Priority::Medium => BadgeStyle::Caution,
        Priority::Low => BadgeStyle::Normal,
    }
}

/// Whether the "Recurring" indicator is shown.
pub fn shows_recurring(task: &Task) -> bool {
    task.recurrence() != Recurrence::None
}

/// Indicator text, e.g. "Recurring: Weekly".
pub fn recurring_label(task: &Task) -> Option<String> {
    shows_recurring(task).then(|| format!("Recurring: {}", task.recurrence()))
}

/// Whether the category chip is shown.
pub fn shows_category(task: &Task) -> bool {
    !task.category().is_empty()
}

/// Whether the "Send Reminder" control is offered.
pub fn shows_send_reminder(task: &Task) -> bool {
    task.reminder()
}
