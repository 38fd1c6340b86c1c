//! Dashboard entry point and terminal setup.

use std::io::{self, Write};
use std::panic;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::info;

use crate::config::UiConfig;
use crate::editor::TaskEditor;
use crate::identity::LocalIdentity;
use crate::tui::app::App;

/// Raw mode plus alternate screen, undone on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // Constructed before the next fallible step so a failure there still restores.
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal(&mut io::stdout());
    }
}

/// Leave raw mode and the alternate screen. Safe to call more than once.
fn restore_terminal<W: Write>(out: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(out, LeaveAlternateScreen, Show);
}

/// Restore the terminal before the panic message is printed.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal(&mut io::stdout());
        previous(info);
    }));
}

/// Initialise the terminal and run the dashboard until the user quits.
///
/// The terminal is restored on every exit path, including errors during
/// setup and panics.
pub fn run_tui(editor: TaskEditor, identity: LocalIdentity, ui: UiConfig) -> io::Result<()> {
    install_panic_hook();
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(editor, Box::new(identity), ui);
    let result = app.run(&mut terminal);
    info!(tasks = app.editor().tasks().len(), "dashboard closed, session discarded");

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_restore_leaves_alternate_screen_and_shows_cursor() {
        let mut out = Vec::new();
        restore_terminal(&mut out);
        assert!(contains(&out, b"\x1b[?1049l"));
        assert!(contains(&out, b"\x1b[?25h"));

        let mut again = Vec::new();
        restore_terminal(&mut again);
        assert_eq!(out, again);
    }
}
