use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tracing::debug;

use crate::app::{handle_input, App};
use crate::ui;

/// Run the dashboard until the user quits. Each key press recomputes the visible page.
pub fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 250;

    let mut dirty = true;

    while app.running {
        if dirty {
            if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
                return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
            }
            dirty = false;
        }

        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                debug!(code = ?key.code, page = app.page.label(), "key pressed");
                handle_input(app, key.code);
                dirty = true;
            }
            Event::Resize(_, _) => dirty = true,
            _ => {}
        }
    }

    Ok(())
}
