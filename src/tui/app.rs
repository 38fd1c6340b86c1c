//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the editing session,
//! handles key input, renders the dashboard (navbar, sidebar, main view,
//! status bar) and coordinates between the add-task form, the task list and
//! the category view.

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use crate::config::UiConfig;
use crate::db::{format_due_long, format_due_relative};
use crate::editor::TaskEditor;
use crate::fields::*;
use crate::identity::Identity;
use crate::notify::{LogNotifier, Notifier};
use crate::task::Task;
use crate::tui::{
    colors::{badge_color, GOLD, LABEL_BLUE},
    enums::{AppState, Focus, SidebarItem},
    input::InputField,
    task_form::{
        FormAction, TaskForm, CATEGORY_GLOBAL_ORDER, DESCRIPTION_GLOBAL_ORDER, DUE_GLOBAL_ORDER,
        LABELS_GLOBAL_ORDER, NEW_CATEGORY_GLOBAL_ORDER, PRIORITY_GLOBAL_ORDER,
        RECURRENCE_GLOBAL_ORDER, REMINDER_GLOBAL_ORDER, SUBTASKS_GLOBAL_ORDER, TITLE_GLOBAL_ORDER,
    },
};
use crate::view::{badge_style, recurring_label, shows_category, shows_send_reminder};

const SIDEBAR_WIDTH: u16 = 24;

/// Dashboard state.
///
/// Owns the task editor for the whole session; quitting drops every task.
pub struct App {
    state: AppState,
    focus: Focus,
    editor: TaskEditor,
    identity: Box<dyn Identity>,
    notifier: Box<dyn Notifier>,
    task_form: TaskForm,
    task_list_state: ListState,
    sidebar_state: ListState,
    sidebar_open: bool,
    category_input: InputField,
    status_message: String,
    tick: Duration,
}

impl App {
    pub fn new(editor: TaskEditor, identity: Box<dyn Identity>, ui: UiConfig) -> Self {
        let mut sidebar_state = ListState::default();
        sidebar_state.select(Some(0));
        App {
            state: AppState::AddTask,
            focus: Focus::Main,
            editor,
            identity,
            notifier: Box::new(LogNotifier),
            task_form: TaskForm::new(),
            task_list_state: ListState::default(),
            sidebar_state,
            sidebar_open: ui.sidebar,
            category_input: InputField::new(),
            status_message: String::new(),
            tick: Duration::from_millis(ui.tick_ms),
        }
    }

    /// Replace the reminder notifier.
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn editor(&self) -> &TaskEditor {
        &self.editor
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn navigate(&mut self, state: AppState) {
        debug!(?state, "navigating");
        self.state = state;
        self.focus = Focus::Main;
        if let Some(idx) = SidebarItem::ALL.iter().position(|i| i.target() == state) {
            self.sidebar_state.select(Some(idx));
        }
        if state == AppState::TaskList
            && self.task_list_state.selected().is_none()
            && !self.editor.tasks().is_empty()
        {
            self.task_list_state.select(Some(0));
        }
    }

    fn focus_sidebar(&mut self) {
        self.sidebar_open = true;
        self.focus = Focus::Sidebar;
    }

    fn sign_in(&mut self) {
        match self.identity.sign_in() {
            Ok(()) => self.set_status_message("Signed in".to_string()),
            Err(e) => self.set_status_message(format!("Error: {}", e)),
        }
    }

    fn commit_draft(&mut self) {
        match self.editor.commit() {
            Ok(task) => {
                let msg = format!("Task '{}' added", task.title());
                self.task_form.reset();
                self.task_list_state.select(Some(self.editor.tasks().len() - 1));
                self.set_status_message(msg);
            }
            Err(e) => self.set_status_message(e.to_string()),
        }
    }

    fn get_selected_task(&self) -> Option<&Task> {
        self.task_list_state
            .selected()
            .and_then(|idx| self.editor.tasks().get(idx))
    }

    fn send_reminder_for_selected(&mut self) {
        let Some(task) = self.get_selected_task() else {
            return;
        };
        let (id, title) = (task.id(), task.title().to_string());
        let msg = match self.editor.send_reminder(id, self.notifier.as_ref()) {
            Ok(()) => format!("Reminder sent for task: {}", title),
            Err(e) => format!("Error: {}", e),
        };
        self.set_status_message(msg);
    }

    /// Handle keyboard input when the sidebar has focus.
    ///
    /// Returns true if the application should quit.
    fn handle_sidebar_input(&mut self, key: KeyCode) -> bool {
        let len = SidebarItem::ALL.len();
        let selected = self.sidebar_state.selected().unwrap_or(0);
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                let prev = if selected == 0 { len - 1 } else { selected - 1 };
                self.sidebar_state.select(Some(prev));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.sidebar_state.select(Some((selected + 1) % len));
            }
            KeyCode::Enter => self.navigate(SidebarItem::ALL[selected].target()),
            KeyCode::Right | KeyCode::Tab | KeyCode::Esc => self.focus = Focus::Main,
            KeyCode::Char('s') => self.sign_in(),
            KeyCode::Char('b') => {
                self.sidebar_open = false;
                self.focus = Focus::Main;
            }
            _ => {}
        }
        false
    }

    /// Handle keyboard input on the add-task form.
    fn handle_form_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Esc => self.focus_sidebar(),
            KeyCode::Char('x') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.editor.discard_draft();
                self.task_form.reset();
                self.set_status_message("Draft discarded".to_string());
            }
            KeyCode::Enter => match self.task_form.activate(&mut self.editor) {
                FormAction::Submit => self.commit_draft(),
                FormAction::Status(msg) => self.set_status_message(msg),
            },
            _ => self.task_form.handle_key(key, &mut self.editor),
        }
        false
    }

    /// Handle keyboard input on the task list.
    fn handle_task_list_input(&mut self, key: KeyCode) -> bool {
        let len = self.editor.tasks().len();
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => self.focus_sidebar(),
            KeyCode::Down | KeyCode::Char('j') if len > 0 => {
                let i = self.task_list_state.selected().map_or(0, |i| (i + 1) % len);
                self.task_list_state.select(Some(i));
            }
            KeyCode::Up | KeyCode::Char('k') if len > 0 => {
                let i = match self.task_list_state.selected() {
                    Some(0) | None => len - 1,
                    Some(i) => i - 1,
                };
                self.task_list_state.select(Some(i));
            }
            KeyCode::Char('r') => self.send_reminder_for_selected(),
            KeyCode::Char('a') => self.navigate(AppState::AddTask),
            KeyCode::Char('h') => self.navigate(AppState::Help),
            _ => {}
        }
        false
    }

    /// Handle keyboard input on the category view.
    fn handle_categories_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc => self.focus_sidebar(),
            KeyCode::Enter => {
                if self.editor.add_category(&self.category_input.value).changed() {
                    let msg = format!("Category '{}' added", self.category_input.value.trim());
                    self.category_input.clear();
                    self.set_status_message(msg);
                } else {
                    self.set_status_message("Category is empty or already exists".to_string());
                }
            }
            KeyCode::Char(c) => self.category_input.handle_char(c),
            KeyCode::Backspace => self.category_input.handle_backspace(),
            KeyCode::Delete => self.category_input.handle_delete(),
            KeyCode::Left => self.category_input.move_cursor_left(),
            KeyCode::Right => self.category_input.move_cursor_right(),
            _ => {}
        }
        false
    }

    fn handle_help_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => true,
            _ => {
                self.navigate(AppState::AddTask);
                false
            }
        }
    }

    /// Dispatch one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        self.clear_status_message();

        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.focus {
            Focus::Sidebar => self.handle_sidebar_input(key),
            Focus::Main => match self.state {
                AppState::AddTask => self.handle_form_input(key, modifiers),
                AppState::TaskList => self.handle_task_list_input(key),
                AppState::Categories => self.handle_categories_input(key),
                AppState::Help => self.handle_help_input(key),
            },
        }
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(self.tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    /// Render the top bar with the dashboard title and sign-in state.
    fn render_navbar(&self, f: &mut Frame, area: Rect) {
        let account = if self.identity.is_signed_in() {
            let name = self
                .identity
                .current_user()
                .map(|u| u.display_name.clone())
                .unwrap_or_default();
            Span::styled(name, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        } else {
            Span::styled("Sign In (s)", Style::default().fg(Color::Black).bg(Color::Gray))
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(30)])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("TASK MANAGER", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("{} tasks this session", self.editor.tasks().len()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let account = Paragraph::new(Line::from(account))
            .alignment(Alignment::Right)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(account, chunks[1]);
    }

    /// Render the navigation sidebar.
    fn render_sidebar(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = SidebarItem::ALL
            .iter()
            .map(|item| ListItem::new(Line::from(format!(" {}", item.label()))))
            .collect();

        let border_style = if self.focus == Focus::Sidebar {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Dashboard")
                    .border_style(border_style),
            )
            .highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol("► ");

        f.render_stateful_widget(list, area, &mut self.sidebar_state);
    }

    fn field_style(&self, field: usize) -> Style {
        if self.focus == Focus::Main && self.task_form.current_field == field {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        }
    }

    fn field_block(&self, title: &str, field: usize) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(self.field_style(field))
    }

    /// Render the add-task form.
    fn render_task_form(&self, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Description
                Constraint::Length(3), // Priority | Category
                Constraint::Length(3), // New category
                Constraint::Length(4), // Labels
                Constraint::Length(3), // Recurrence
                Constraint::Min(4),    // Subtasks
                Constraint::Length(3), // Due | Reminder
            ])
            .split(area);

        let draft = self.editor.draft();

        f.render_widget(
            Paragraph::new(self.task_form.title.value.as_str())
                .block(self.field_block("Title *", TITLE_GLOBAL_ORDER)),
            rows[0],
        );
        f.render_widget(
            Paragraph::new(self.task_form.description.value.as_str())
                .block(self.field_block("Description", DESCRIPTION_GLOBAL_ORDER)),
            rows[1],
        );

        let pair = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);
        let badge = badge_color(badge_style(draft.priority));
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("< "),
                Span::styled(
                    format_priority(draft.priority),
                    Style::default().bg(badge).fg(Color::White),
                ),
                Span::raw(" >"),
            ]))
            .block(self.field_block("Priority", PRIORITY_GLOBAL_ORDER)),
            pair[0],
        );
        let category = if draft.category.is_empty() {
            "Select category"
        } else {
            draft.category.as_str()
        };
        f.render_widget(
            Paragraph::new(format!("< {} >", category))
                .block(self.field_block("Category", CATEGORY_GLOBAL_ORDER)),
            pair[1],
        );

        f.render_widget(
            Paragraph::new(self.task_form.new_category.value.as_str())
                .block(self.field_block("New category (Enter to add)", NEW_CATEGORY_GLOBAL_ORDER)),
            rows[3],
        );

        let selected_label = self.task_form.selected_label(&self.editor);
        let mut chips: Vec<Span> = Vec::new();
        for (i, label) in draft.labels.iter().enumerate() {
            let mut style = Style::default().bg(LABEL_BLUE).fg(Color::White);
            if selected_label == Some(i) && self.task_form.label.is_empty() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            chips.push(Span::styled(format!(" {} ", label), style));
            chips.push(Span::raw(" "));
        }
        f.render_widget(
            Paragraph::new(vec![
                Line::from(chips),
                Line::from(format!("+ {}", self.task_form.label.value)),
            ])
            .block(self.field_block("Labels (Enter to add, Del removes)", LABELS_GLOBAL_ORDER)),
            rows[4],
        );

        f.render_widget(
            Paragraph::new(format!("< {} >", format_recurrence(draft.recurrence)))
                .block(self.field_block("Recurrence", RECURRENCE_GLOBAL_ORDER)),
            rows[5],
        );

        let selected_subtask = self.task_form.selected_subtask(&self.editor);
        let mut lines: Vec<Line> = draft
            .subtasks
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let mark = if s.completed { "[x]" } else { "[ ]" };
                let style = if selected_subtask == Some(i) && self.task_form.subtask.is_empty() {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(format!("{} {}", mark, s.title), style))
            })
            .collect();
        lines.push(Line::from(format!("+ {}", self.task_form.subtask.value)));
        f.render_widget(
            Paragraph::new(lines).block(self.field_block(
                "Subtasks (Enter to add, Space toggles, Del removes)",
                SUBTASKS_GLOBAL_ORDER,
            )),
            rows[6],
        );

        let pair = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[7]);
        let due_hint = match draft.due_date {
            Some(d) => format!("  ({})", format_due_long(d)),
            None if self.task_form.due_is_invalid(&self.editor) => "  (not a date)".to_string(),
            None => String::new(),
        };
        f.render_widget(
            Paragraph::new(format!("{}{}", self.task_form.due.value, due_hint))
                .block(self.field_block("Due date", DUE_GLOBAL_ORDER)),
            pair[0],
        );
        let reminder = if draft.reminder { "[x] Set Reminder" } else { "[ ] Set Reminder" };
        f.render_widget(
            Paragraph::new(reminder).block(self.field_block("Reminder", REMINDER_GLOBAL_ORDER)),
            pair[1],
        );
    }

    /// Render the committed tasks in commit order.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(format!(
            "Task List ({}) - r: send reminder, a: add task",
            self.editor.tasks().len()
        ));

        if self.editor.tasks().is_empty() {
            let empty = Paragraph::new("No tasks added yet.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(empty, area);
            return;
        }

        let today = Local::now().date_naive();
        let items: Vec<ListItem> = self
            .editor
            .tasks()
            .iter()
            .map(|task| ListItem::new(task_card(task, today)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .bg(Color::Rgb(40, 40, 40)),
            )
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, area, &mut self.task_list_state);
    }

    /// Render the category registry and its add input.
    fn render_categories(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let items: Vec<ListItem> = self
            .editor
            .categories()
            .iter()
            .map(|c| ListItem::new(Line::from(format!("  {}", c))))
            .collect();
        f.render_widget(
            List::new(items).block(Block::default().borders(Borders::ALL).title("Task Categories")),
            chunks[0],
        );
        f.render_widget(
            Paragraph::new(self.category_input.value.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("New category (Enter to add)")
                    .border_style(Style::default().fg(GOLD)),
            ),
            chunks[1],
        );
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help = vec![
            Line::from(Span::styled("Navigation", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("  Esc          focus the sidebar"),
            Line::from("  ↑↓ / Enter   choose a view in the sidebar"),
            Line::from("  b            hide the sidebar (from the sidebar)"),
            Line::from("  s            sign in (from the sidebar)"),
            Line::from("  q / Ctrl+C   quit (tasks are not saved)"),
            Line::from(""),
            Line::from(Span::styled("Add task", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("  Tab / ↑↓     move between fields"),
            Line::from("  ←→           change priority, category, recurrence, reminder"),
            Line::from("  Enter        add label / subtask / category, elsewhere add the task"),
            Line::from("  Del          remove the selected label or subtask"),
            Line::from("  Space        toggle the selected subtask"),
            Line::from("  Ctrl+X       discard the draft"),
            Line::from(""),
            Line::from(Span::styled("Task list", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("  j / k        move selection"),
            Line::from("  r            send reminder for the selected task"),
            Line::from(""),
            Line::from("Due dates accept YYYY-MM-DD, today, tomorrow, friday,"),
            Line::from("next mon, in 3d, in 2w, eow, eom."),
        ];
        let paragraph = Paragraph::new(help)
            .block(Block::default().borders(Borders::ALL).title("Help - press any key"))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match (self.focus, self.state) {
                (Focus::Sidebar, _) => {
                    "Sidebar - ↑↓ choose, Enter open, s sign in, q quit".to_string()
                }
                (Focus::Main, AppState::AddTask) => {
                    "Add New Task - Tab next field, Enter add, Esc sidebar".to_string()
                }
                (Focus::Main, AppState::TaskList) => "View All Tasks - Esc sidebar".to_string(),
                (Focus::Main, AppState::Categories) => "Task Categories - Esc sidebar".to_string(),
                (Focus::Main, AppState::Help) => "Help".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to appropriate view renderers.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        self.render_navbar(f, chunks[0]);

        let main_area = if self.sidebar_open {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .split(chunks[1]);
            self.render_sidebar(f, body[0]);
            body[1]
        } else {
            chunks[1]
        };

        match self.state {
            AppState::AddTask => self.render_task_form(f, main_area),
            AppState::TaskList => self.render_task_list(f, main_area),
            AppState::Categories => self.render_categories(f, main_area),
            AppState::Help => self.render_help(f, main_area),
        }

        self.render_status_bar(f, chunks[2]);
    }

    /// Main event loop for the TUI application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Multi-line card for one committed task.
fn task_card(task: &Task, today: chrono::NaiveDate) -> Text<'static> {
    let mut lines = vec![Line::from(Span::styled(
        task.title().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if !task.description().is_empty() {
        lines.push(Line::from(Span::styled(
            task.description().to_string(),
            Style::default().fg(Color::Gray),
        )));
    }

    let mut badges = vec![Span::styled(
        format!(" {} ", format_priority(task.priority())),
        Style::default()
            .bg(badge_color(badge_style(task.priority())))
            .fg(Color::White),
    )];
    if shows_category(task) {
        badges.push(Span::raw(" "));
        badges.push(Span::styled(
            format!(" {} ", task.category()),
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ));
    }
    for label in task.labels() {
        badges.push(Span::raw(" "));
        badges.push(Span::styled(
            format!(" {} ", label),
            Style::default().bg(LABEL_BLUE).fg(Color::White),
        ));
    }
    lines.push(Line::from(badges));

    for s in task.subtasks() {
        let mark = if s.completed { "[x]" } else { "[ ]" };
        lines.push(Line::from(format!("  {} {}", mark, s.title)));
    }

    let mut meta: Vec<Span> = Vec::new();
    if let Some(due) = task.due_date() {
        meta.push(Span::raw(format!(
            "{} ({})  ",
            format_due_long(due),
            format_due_relative(Some(due), today)
        )));
    }
    if let Some(label) = recurring_label(task) {
        meta.push(Span::raw(format!("{}  ", label)));
    }
    if shows_send_reminder(task) {
        meta.push(Span::styled("Send Reminder (r)", Style::default().fg(Color::Cyan)));
    }
    if !meta.is_empty() {
        lines.push(Line::from(meta).style(Style::default().fg(Color::DarkGray)));
    }
    lines.push(Line::from(""));
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::identity::LocalIdentity;
    use crate::notify::testing::RecordingNotifier;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::new(
            TaskEditor::new(Database::default()),
            Box::new(LocalIdentity::new(Some("Ada".into()), false)),
            UiConfig::default(),
        )
    }

    fn press(app: &mut App, key: KeyCode) -> bool {
        app.handle_key(key, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 45)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_compose_and_commit_through_keys() {
        let mut app = app();
        type_text(&mut app, "Write report");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right); // Medium -> High
        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        type_text(&mut app, "urgent");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "urgent");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Outline");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);

        let tasks = app.editor().tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title(), "Write report");
        assert_eq!(tasks[0].priority(), Priority::High);
        assert_eq!(tasks[0].labels().to_vec(), vec!["urgent".to_string()]);
        assert_eq!(tasks[0].subtasks().len(), 1);
        assert!(app.task_form.title.is_empty());
        assert_eq!(app.editor().draft().title, "");
    }

    #[test]
    fn test_empty_title_reports_error() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert!(app.editor().tasks().is_empty());
        assert_eq!(app.status_message, "Title is required");
        press(&mut app, KeyCode::Enter);
        assert!(app.editor().tasks().is_empty());
    }

    #[test]
    fn test_sidebar_navigation_and_sign_in() {
        let mut app = app();
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Sidebar);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::TaskList);
        assert_eq!(app.focus, Focus::Main);

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('s'));
        assert!(app.identity.is_signed_in());
        assert!(screen(&mut app).contains("Ada"));
    }

    #[test]
    fn test_categories_view_adds() {
        let mut app = app();
        app.navigate(AppState::Categories);
        type_text(&mut app, "Work");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.category_input.value, "Work");
        app.category_input.clear();
        type_text(&mut app, "Health");
        press(&mut app, KeyCode::Enter);
        assert!(app.editor().categories().contains("Health"));
        assert!(app.category_input.is_empty());
    }

    #[test]
    fn test_send_reminder_from_list() {
        let notifier = Box::new(RecordingNotifier::default());
        let mut app = app().with_notifier(notifier);
        type_text(&mut app, "Call mom");
        app.task_form.current_field = REMINDER_GLOBAL_ORDER;
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
        app.navigate(AppState::TaskList);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.status_message, "Reminder sent for task: Call mom");
    }

    #[test]
    fn test_render_views() {
        let mut app = app();
        let form = screen(&mut app);
        assert!(form.contains("Title *"));
        assert!(form.contains("Sign In"));

        app.navigate(AppState::TaskList);
        assert!(screen(&mut app).contains("No tasks added yet."));

        app.navigate(AppState::AddTask);
        type_text(&mut app, "Water plants");
        app.task_form.current_field = RECURRENCE_GLOBAL_ORDER;
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        app.navigate(AppState::TaskList);
        let list = screen(&mut app);
        assert!(list.contains("Water plants"));
        assert!(list.contains("Recurring: Daily"));
        assert!(list.contains("Medium"));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!press(&mut app, KeyCode::Char('q')));
    }
}
