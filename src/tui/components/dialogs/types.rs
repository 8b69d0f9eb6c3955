//! Core dialog types and traits
//!
//! A dialog session is one open modal: it owns its content and any pending
//! user choice, and reports a [`DialogOutcome`] when the user is done.

use crate::tui::{styles::Theme, Frame};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};
use std::fmt;

/// Unique identifier for dialog sessions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DialogId(pub String);

impl DialogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh id for one session of a dialog kind, e.g. `open-package-1f0c…`
    pub fn session(kind: &str) -> Self {
        Self(format!("{}-{}", kind, uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dialog configuration options
#[derive(Debug, Clone)]
pub struct DialogConfig {
    pub id: DialogId,
    pub title: Option<String>,
    /// Smallest outer size, border included
    pub min_width: u16,
    pub min_height: u16,
}

impl DialogConfig {
    pub fn new(id: DialogId) -> Self {
        Self {
            id,
            title: None,
            min_width: 30,
            min_height: 5,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// What the user did with a dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Still open
    Pending,
    /// Confirmed, with the selected value if there was one
    Confirmed(Option<String>),
    /// Dismissed without side effects
    Cancelled,
}

impl DialogOutcome {
    pub fn is_final(&self) -> bool {
        !matches!(self, DialogOutcome::Pending)
    }
}

pub type DialogResult<T> = std::result::Result<T, DialogError>;

#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("Dialog '{0}' is already open")]
    AlreadyOpen(DialogId),

    #[error("No dialog is open")]
    NotOpen,
}

/// One open modal instance
pub trait DialogSession: Send {
    fn config(&self) -> &DialogConfig;

    fn id(&self) -> &DialogId {
        &self.config().id
    }

    /// Cells needed by the content, excluding the border
    fn content_size(&self) -> (u16, u16);

    fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome;

    fn handle_mouse(&mut self, mouse: MouseEvent) -> DialogOutcome {
        let _ = mouse;
        DialogOutcome::Pending
    }

    /// Render dialog content (without border/chrome)
    fn render_content(&mut self, frame: &mut Frame, content_area: Rect, theme: &Theme);

    /// Render dialog border and title
    fn render_chrome(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(true))
            .style(theme.base_style());

        if let Some(title) = &self.config().title {
            block = block.title(format!(" {} ", title));
        }

        frame.render_widget(block, area);
    }
}

/// Helper struct for dialog layout calculations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogLayout {
    /// Dialog area (including border)
    pub dialog_area: Rect,
    /// Content area (excluding border)
    pub content_area: Rect,
}

impl DialogLayout {
    /// Fit `content_size` plus the border, centered in `available_area` and
    /// clamped to it
    pub fn calculate(config: &DialogConfig, available_area: Rect, content_size: (u16, u16)) -> Self {
        let (content_w, content_h) = content_size;
        let width = content_w
            .saturating_add(2)
            .max(config.min_width)
            .min(available_area.width);
        let height = content_h
            .saturating_add(2)
            .max(config.min_height)
            .min(available_area.height);

        let dialog_area = Rect {
            x: available_area.x + (available_area.width - width) / 2,
            y: available_area.y + (available_area.height - height) / 2,
            width,
            height,
        };

        let content_area = Rect {
            x: dialog_area.x + 1,
            y: dialog_area.y + 1,
            width: dialog_area.width.saturating_sub(2),
            height: dialog_area.height.saturating_sub(2),
        };

        Self {
            dialog_area,
            content_area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_unique() {
        let a = DialogId::session("open-package");
        let b = DialogId::session("open-package");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("open-package-"));
    }

    #[test]
    fn test_fit_content_is_centered() {
        let config = DialogConfig::new(DialogId::new("test"));
        let layout = DialogLayout::calculate(&config, Rect::new(0, 0, 80, 24), (38, 10));

        assert_eq!(layout.dialog_area, Rect::new(20, 6, 40, 12));
        assert_eq!(layout.content_area, Rect::new(21, 7, 38, 10));
    }

    #[test]
    fn test_small_content_uses_minimum_size() {
        let config = DialogConfig::new(DialogId::new("test"));
        let layout = DialogLayout::calculate(&config, Rect::new(0, 0, 80, 24), (4, 1));

        assert_eq!(layout.dialog_area, Rect::new(25, 10, 30, 5));
    }

    #[test]
    fn test_oversized_dialog_is_clamped() {
        let config = DialogConfig::new(DialogId::new("test"));
        let layout = DialogLayout::calculate(&config, Rect::new(2, 1, 80, 24), (200, 50));

        assert_eq!(layout.dialog_area, Rect::new(2, 1, 80, 24));
        assert_eq!(layout.content_area, Rect::new(3, 2, 78, 22));
    }
}
