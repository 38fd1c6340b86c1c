//! # taskdeck - Terminal Productivity Dashboard
//!
//! A navigation shell (sidebar and navbar) around a task-authoring form and a
//! task list, all in the terminal.
//!
//! ## Key Features
//!
//! - **Draft Composition**: Title, description, priority, category, labels,
//!   recurrence, subtasks, due date and a reminder flag, edited incrementally
//! - **Append-only Task List**: Committed tasks are immutable and keep commit order
//! - **Category Registry**: Seeded with Work and Personal, grows during the session
//! - **Session Scoped**: No backend and no files; quitting discards everything
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the dashboard
//! taskdeck
//!
//! # Compose one task from the command line and print it
//! taskdeck add "Write report" --priority high --label urgent --subtask Outline
//!
//! # Same, as JSON
//! taskdeck add "Pay rent" --category Personal --recurrence monthly --reminder --json
//! ```
//!
//! ## Key Commands
//!
//! - `taskdeck ui` - Launch the dashboard (default)
//! - `taskdeck add <title>` - Compose and commit a single task
//! - `taskdeck categories` - Show the categories a session starts with
//! - `taskdeck completions <shell>` - Print shell completions
//!
//! Configuration is read from `~/.config/taskdeck/config.toml` when present.

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod draft;
pub mod editor;
pub mod error;
pub mod fields;
pub mod identity;
pub mod notify;
pub mod task;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
}

use cli::{init_tracing, Cli};
use cmd::*;
use config::Config;

fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Ui);
    let owns_terminal = matches!(command, Commands::Ui);
    init_tracing(cli.verbose, cli.quiet, cli.log_file.as_deref(), owns_terminal)?;

    let cfg = Config::load(cli.config.as_deref())?;

    match command {
        Commands::Ui => cmd_ui(&cfg),
        Commands::Add {
            title,
            desc,
            priority,
            category,
            labels,
            recurrence,
            subtasks,
            due,
            reminder,
            json,
        } => cmd_add(
            &cfg,
            title,
            desc,
            priority,
            category,
            labels,
            recurrence,
            subtasks,
            due,
            reminder,
            json,
        ),
        Commands::Categories { json } => cmd_categories(&cfg, json),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
