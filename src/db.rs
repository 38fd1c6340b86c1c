//! In-memory task store and utility functions.
//!
//! This module provides the session-local `Database` holding committed tasks,
//! the category registry and the id allocator, along with helpers for parsing
//! due-date input and formatting tasks for the terminal.

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;
use tracing::info;

use crate::draft::Draft;
use crate::error::CommitRejected;
use crate::fields::*;
use crate::task::{SubtaskId, Task, TaskId};

/// Categories every session starts with.
pub const SEED_CATEGORIES: [&str; 2] = ["Work", "Personal"];

/// Monotonic id source for tasks and subtasks.
///
/// Task and subtask ids are drawn from separate counters and never reused.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next_task: u64,
    next_subtask: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        IdAllocator {
            next_task: 1,
            next_subtask: 1,
        }
    }
}

impl IdAllocator {
    pub fn next_task_id(&mut self) -> TaskId {
        let id = TaskId(self.next_task);
        self.next_task += 1;
        id
    }

    pub fn next_subtask_id(&mut self) -> SubtaskId {
        let id = SubtaskId(self.next_subtask);
        self.next_subtask += 1;
        id
    }
}

/// Ordered, duplicate-free set of category names. Only ever grows.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CategoryRegistry {
    names: Vec<String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        CategoryRegistry {
            names: SEED_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CategoryRegistry {
    /// Add a category. Returns false for blank or already known names.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Session-local store of committed tasks.
#[derive(Debug, Default)]
pub struct Database {
    tasks: Vec<Task>,
    categories: CategoryRegistry,
    ids: IdAllocator,
}

impl Database {
    /// Create a database whose registry holds the seed categories followed by `extra`.
    pub fn with_categories<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut db = Database::default();
        for name in extra {
            db.categories.add(name.as_ref());
        }
        db
    }

    /// Validate `draft` and append it as a new task.
    ///
    /// A rejected draft leaves the collection and the id counter untouched.
    pub fn commit(&mut self, draft: &Draft) -> Result<&Task, CommitRejected> {
        if !draft.is_committable() {
            return Err(CommitRejected::EmptyTitle);
        }
        let id = self.ids.next_task_id();
        self.tasks.push(Task::from_draft(id, draft.clone()));
        info!(task = %id, title = %draft.title, "task committed");
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Get a task by ID.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut CategoryRegistry {
        &mut self.categories
    }

    pub fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }
}

/// Parse human-readable due date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow"
/// - "monday" .. "sunday" (and three-letter forms), optionally prefixed by "next"
/// - "end of week" / "eow", "end of month" / "eom"
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD"
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "end of week" | "eow" => {
            let to_sunday = 6 - today.weekday().num_days_from_monday() as i64;
            return Some(today + Duration::days(to_sunday));
        }
        "end of month" | "eom" => {
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            return NaiveDate::from_ymd_opt(year, month, 1).map(|d| d - Duration::days(1));
        }
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        let rest = rest.trim();
        // Offsets beyond chrono's calendar range yield None.
        let offset = if let Some(n) = rest.strip_suffix('d') {
            Duration::try_days(n.trim().parse().ok()?)
        } else if let Some(n) = rest.strip_suffix('w') {
            Duration::try_weeks(n.trim().parse().ok()?)
        } else {
            None
        };
        return offset.and_then(|d| today.checked_add_signed(d));
    }

    let (skip_week, day) = match s.strip_prefix("next ") {
        Some(day) => (true, day),
        None => (false, s.as_str()),
    };
    if let Some(target) = weekday_index(day) {
        let current = today.weekday().num_days_from_monday() as i64;
        let mut ahead = (target + 7 - current) % 7;
        if skip_week {
            ahead += 7;
        }
        return Some(today + Duration::days(ahead));
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

fn weekday_index(name: &str) -> Option<i64> {
    let idx = match name {
        "monday" | "mon" => 0,
        "tuesday" | "tue" => 1,
        "wednesday" | "wed" => 2,
        "thursday" | "thu" => 3,
        "friday" | "fri" => 4,
        "saturday" | "sat" => 5,
        "sunday" | "sun" => 6,
        _ => return None,
    };
    Some(idx)
}

/// Parse due date input against the local calendar.
pub fn parse_due_today(s: &str) -> Option<NaiveDate> {
    parse_due_input(s, Local::now().date_naive())
}

/// Long form of a date, e.g. "March 14, 2026".
pub fn format_due_long(d: NaiveDate) -> String {
    d.format("%B %-d, %Y").to_string()
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(d) = due else {
        return "-".into();
    };
    match (d - today).num_days() {
        0 => "today".into(),
        1 => "tomorrow".into(),
        n if n > 1 => format!("in {}d", n),
        n => format!("{}d late", -n),
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[Task]) {
    println!(
        "{:<5} {:<7} {:<10} {:<12} {:<9} {}",
        "ID", "Pri", "Category", "Due", "Repeats", "Title [labels]"
    );
    let today = Local::now().date_naive();
    for t in tasks {
        let labels = if t.labels().is_empty() {
            String::new()
        } else {
            format!(" [{}]", t.labels().join(","))
        };
        let category = if t.category().is_empty() { "-" } else { t.category() };
        println!(
            "{:<5} {:<7} {:<10} {:<12} {:<9} {}{}",
            t.id(),
            format_priority(t.priority()),
            truncate(category, 10),
            format_due_relative(t.due_date(), today),
            format_recurrence(t.recurrence()),
            t.title(),
            labels
        );
        for s in t.subtasks() {
            let mark = if s.completed { "x" } else { " " };
            println!("{:<47}[{}] {}", "", mark, s.title);
        }
    }
}
