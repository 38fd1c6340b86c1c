//! Command implementations for the CLI interface.
//!
//! Every command builds its own `TaskEditor`; nothing outlives the process.

use anyhow::{anyhow, Context};
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use tracing::info;

use crate::cli::Cli;
use crate::config::Config;
use crate::db::{parse_due_today, print_table, Database};
use crate::draft::DraftEdit;
use crate::editor::TaskEditor;
use crate::fields::*;
use crate::identity::LocalIdentity;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive dashboard.
    Ui,

    /// Compose a single task from flags, commit it and print it.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
        /// Priority: low | medium | high.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        /// Category name (need not be registered).
        #[arg(long)]
        category: Option<String>,
        /// Comma-separated labels. May be repeated.
        #[arg(long = "label")]
        labels: Vec<String>,
        /// Recurrence: none | daily | weekly | monthly.
        #[arg(long, value_enum, default_value_t = Recurrence::None)]
        recurrence: Recurrence,
        /// Subtask title. May be repeated.
        #[arg(long = "subtask")]
        subtasks: Vec<String>,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "friday", "in Nd".
        #[arg(long)]
        due: Option<String>,
        /// Flag the task for a reminder.
        #[arg(long)]
        reminder: bool,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// List the categories a new session offers.
    Categories {
        /// Print a JSON array instead of one name per line.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Build the session database from config.
pub fn open_database(cfg: &Config) -> Database {
    Database::with_categories(&cfg.categories.extra)
}

/// Launch the dashboard.
pub fn cmd_ui(cfg: &Config) -> anyhow::Result<()> {
    let editor = TaskEditor::new(open_database(cfg));
    let identity = LocalIdentity::new(cfg.identity.user.clone(), cfg.identity.signed_in);
    run_tui(editor, identity, cfg.ui.clone()).context("dashboard terminated with an error")
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    cfg: &Config,
    title: String,
    desc: Option<String>,
    priority: Priority,
    category: Option<String>,
    labels: Vec<String>,
    recurrence: Recurrence,
    subtasks: Vec<String>,
    due: Option<String>,
    reminder: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut editor = TaskEditor::new(open_database(cfg));

    let due_date = due
        .map(|raw| parse_due_today(&raw).ok_or_else(|| anyhow!("unrecognised due date '{raw}'")))
        .transpose()?;

    let mut edits = vec![
        DraftEdit::SetTitle(title),
        DraftEdit::SetDescription(desc.unwrap_or_default()),
        DraftEdit::SetPriority(priority),
        DraftEdit::SetCategory(category.unwrap_or_default()),
        DraftEdit::SetRecurrence(recurrence),
        DraftEdit::SetDueDate(due_date),
        DraftEdit::SetReminder(reminder),
    ];
    edits.extend(
        labels
            .iter()
            .flat_map(|raw| raw.split(','))
            .map(|l| DraftEdit::AddLabel(l.to_string())),
    );
    edits.extend(subtasks.into_iter().map(DraftEdit::AddSubtask));
    for edit in edits {
        editor.apply(edit);
    }

    let task = editor.commit()?.clone();
    info!(task = %task.id(), "task composed from command line");
    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        print_table(std::slice::from_ref(&task));
    }
    Ok(())
}

pub fn cmd_categories(cfg: &Config, json: bool) -> anyhow::Result<()> {
    let db = open_database(cfg);
    if json {
        println!("{}", serde_json::to_string_pretty(db.categories())?);
    } else {
        for name in db.categories().iter() {
            println!("{name}");
        }
    }
    Ok(())
}

pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
