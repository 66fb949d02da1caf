use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::Duration,
};

pub mod highlight;
pub mod state;
pub mod theme;
pub mod ui;

use crate::index::SymbolIndex;
use state::{AppState, PaneId};

pub fn run_tui(index: SymbolIndex, verbose: bool) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    enable_raw_mode()?;
    if let Err(e) = execute!(terminal.backend_mut(), EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(e.into());
    }

    let mut app = AppState::new(index, verbose);
    let result = event_loop(&mut terminal, &mut app);
    let cleanup_result = restore_terminal(&mut terminal);

    result.and(cleanup_result)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut AppState) -> Result<()> {
    let debug_keys = std::env::var("DOCDEX_TUI_DEBUG_KEYS").is_ok();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            if debug_keys {
                crate::logger::log_debug(&format!("[tui-ev] {:?}", ev));
            }
            if let Event::Key(key_event) = ev {
                if handle_key(key_event, app) {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Returns true when the app should exit.
fn handle_key(key: KeyEvent, app: &mut AppState) -> bool {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return false;
    }

    if key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return true;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('u') {
            app.clear_query();
        }
        return false;
    }

    match key.code {
        KeyCode::Tab => {
            app.focus = match app.focus {
                PaneId::Results => PaneId::Detail,
                PaneId::Detail => PaneId::Results,
            };
        }
        KeyCode::Up => scroll_focus(app, -1),
        KeyCode::Down => scroll_focus(app, 1),
        KeyCode::PageUp => scroll_focus(app, -8),
        KeyCode::PageDown => scroll_focus(app, 8),
        KeyCode::Backspace => app.pop_char(),
        // Typing always edits the query, whichever pane has focus.
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }

    false
}

fn scroll_focus(app: &mut AppState, delta: i16) {
    match app.focus {
        PaneId::Results => app.move_selection(delta as i32),
        PaneId::Detail => app.scroll_detail(delta),
    }
}
