use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::warn;

use crate::backend::{BackendResult, WordNode};
use crate::workflow::PackageForm;

/// Severity of a status-line notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Short message shown on the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),

    /// Mouse input event
    Mouse(MouseEvent),

    /// Terminal resize event
    Resize(u16, u16),

    /// Periodic tick event
    Tick,

    /// A menu link was activated
    FollowLink(String),

    /// The package list fetch finished
    PackagesLoaded(BackendResult<PackageForm>),

    /// The word tree fetch finished
    WordsLoaded(BackendResult<Vec<WordNode>>),

    /// The process was asked to stop (SIGINT/SIGTERM)
    Shutdown,
}

/// Merges terminal input, internal events and ticks into one stream
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    sender: mpsc::UnboundedSender<Event>,
    terminal: EventStream,
    ticker: Interval,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut ticker = interval(tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            receiver,
            sender,
            terminal: EventStream::new(),
            ticker,
        }
    }

    /// Wait for the next event. Returns `None` once terminal input has ended.
    pub async fn next(&mut self) -> Option<Event> {
        loop {
            tokio::select! {
                Some(event) = self.receiver.recv() => return Some(event),
                terminal_event = self.terminal.next() => match terminal_event {
                    Some(Ok(event)) => {
                        if let Some(event) = Self::convert_crossterm_event(event) {
                            return Some(event);
                        }
                    }
                    Some(Err(e)) => warn!("Failed to read terminal event: {}", e),
                    None => return None,
                },
                _ = self.ticker.tick() => return Some(Event::Tick),
            }
        }
    }

    fn convert_crossterm_event(event: CrosstermEvent) -> Option<Event> {
        match event {
            // Windows reports key releases as separate events
            CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                Some(Event::Key(key_event))
            }
            CrosstermEvent::Mouse(mouse_event) => Some(Event::Mouse(mouse_event)),
            CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
            _ => None,
        }
    }

    /// Get a clone of the sender
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }
}
