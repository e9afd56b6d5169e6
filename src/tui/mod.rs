pub mod render;
pub mod state;

use crate::shop::types::CartForm;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use state::AppState;
use std::io::stdout;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};

/// Run the TUI. Reads state from `state_rx`, mutates view state through
/// `state_tx`, and hands packaged forms to the dispatcher on `submit_tx`.
pub async fn run_tui(
    state_tx: watch::Sender<AppState>,
    state_rx: watch::Receiver<AppState>,
    submit_tx: mpsc::Sender<CartForm>,
) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = tui_loop(&mut terminal, state_tx, state_rx, submit_tx).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state_tx: watch::Sender<AppState>,
    state_rx: watch::Receiver<AppState>,
    submit_tx: mpsc::Sender<CartForm>,
) -> Result<()> {
    let mut spinner_frame: u8 = 0;

    loop {
        // Expired banners come off before every frame.
        state_tx.send_modify(|s| s.notifications.prune(Instant::now()));

        let state = state_rx.borrow().clone();
        terminal.draw(|f| render::draw(f, &state, spinner_frame))?;
        spinner_frame = spinner_frame.wrapping_add(1);

        // Poll for keyboard events with 100ms timeout; this also paces
        // the render loop while requests are in flight.
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Up | KeyCode::Char('k') => {
                            state_tx.send_modify(|s| s.select_prev());
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            state_tx.send_modify(|s| s.select_next());
                        }
                        KeyCode::Left | KeyCode::Char('-') => {
                            state_tx.send_modify(|s| s.decrement_quantity());
                        }
                        KeyCode::Right | KeyCode::Char('+') => {
                            state_tx.send_modify(|s| s.increment_quantity());
                        }
                        KeyCode::Enter => submit_selected(&state_tx, &submit_tx).await,
                        KeyCode::Char('d') => {
                            state_tx.send_modify(|s| s.notifications.dismiss_newest());
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}

/// Intercept the submit keypress: package the selected form, enqueue it
/// for the dispatcher, and stay on the menu. The loop never waits on the
/// network, so any number of submissions may overlap.
async fn submit_selected(
    state_tx: &watch::Sender<AppState>,
    submit_tx: &mpsc::Sender<CartForm>,
) {
    let form = state_tx.borrow().selected_form();
    let Some(form) = form else { return };

    if submit_tx.send(form).await.is_ok() {
        state_tx.send_modify(|s| {
            s.in_flight += 1;
            s.submitted_total += 1;
        });
    }
}
