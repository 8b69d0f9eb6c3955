//! Terminal user interface built on ratatui and crossterm

mod app;
mod components;
mod events;
mod keys;
mod styles;
mod utils;

pub use app::App;
pub use events::{Event, EventHandler};

use crate::backend::Backend;
use crate::config::Config;
use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub type TerminalBackend = CrosstermBackend<io::Stdout>;
pub type Frame<'a> = ratatui::Frame<'a>;

/// Initialize the terminal for TUI mode
pub fn init_terminal(mouse: bool) -> Result<Terminal<TerminalBackend>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore_terminal(terminal: &mut Terminal<TerminalBackend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Best-effort restore for the panic hook, where no terminal handle exists
pub fn force_restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Main TUI entry point
pub async fn run(config: Config, backend: Arc<dyn Backend>) -> Result<()> {
    let mut event_handler = EventHandler::new(Duration::from_millis(config.tick_rate_ms));
    forward_signals(event_handler.sender());

    let mut terminal = init_terminal(config.mouse_enabled)?;
    let mut app = App::new(config, backend, event_handler.sender());
    app.start();

    let result = run_app(&mut terminal, &mut app, &mut event_handler).await;

    app.shutdown();
    restore_terminal(&mut terminal)?;
    info!("Interactive session finished");
    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<TerminalBackend>,
    app: &mut App,
    event_handler: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        match event_handler.next().await {
            Some(event) => {
                if app.handle_event(event).await? {
                    break;
                }
            }
            None => {
                debug!("Terminal input closed");
                break;
            }
        }
    }
    Ok(())
}

/// Turn SIGINT/SIGTERM into an orderly [`Event::Shutdown`]
fn forward_signals(sender: mpsc::UnboundedSender<Event>) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let (Ok(mut sigint), Ok(mut sigterm)) =
                (signal(SignalKind::interrupt()), signal(SignalKind::terminate()))
            else {
                tracing::warn!("Failed to install signal handlers");
                return;
            };

            tokio::select! {
                _ = sigint.recv() => info!("Received SIGINT, shutting down"),
                _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
            }
        }

        #[cfg(not(unix))]
        {
            if tokio::signal::ctrl_c().await.is_err() {
                tracing::warn!("Failed to install Ctrl+C handler");
                return;
            }
            info!("Received Ctrl+C, shutting down");
        }

        let _ = sender.send(Event::Shutdown);
    });
}
