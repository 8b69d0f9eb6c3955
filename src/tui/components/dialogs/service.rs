//! Modal dialog service
//!
//! Holds at most one open [`DialogSession`]. While a session is open it
//! receives all input; it is destroyed as soon as it reports a final outcome
//! or the owner calls [`DialogService::close`].

use super::types::{DialogError, DialogId, DialogLayout, DialogOutcome, DialogResult, DialogSession};
use crate::tui::{styles::Theme, utils::layout, Frame};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, widgets::Clear};
use tracing::debug;

#[derive(Default)]
pub struct DialogService {
    session: Option<Box<dyn DialogSession>>,
    /// Dialog area from the last render
    area: Rect,
}

impl DialogService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_id(&self) -> Option<&DialogId> {
        self.session.as_ref().map(|session| session.id())
    }

    /// Show `session`. Fails if another session is already open.
    pub fn open(&mut self, session: Box<dyn DialogSession>) -> DialogResult<()> {
        if let Some(current) = &self.session {
            return Err(DialogError::AlreadyOpen(current.id().clone()));
        }

        debug!("Opening dialog {}", session.id());
        self.session = Some(session);
        Ok(())
    }

    /// Destroy the open session
    pub fn close(&mut self) -> DialogResult<DialogId> {
        let session = self.session.take().ok_or(DialogError::NotOpen)?;
        self.area = Rect::default();
        debug!("Closed dialog {}", session.id());
        Ok(session.id().clone())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome {
        let outcome = match self.session.as_mut() {
            Some(session) => session.handle_key(key),
            None => return DialogOutcome::Pending,
        };
        self.close_on(outcome)
    }

    /// Clicks outside the dialog are swallowed; the dialog is modal
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> DialogOutcome {
        if !layout::contains(self.area, mouse.column, mouse.row) {
            return DialogOutcome::Pending;
        }
        let outcome = match self.session.as_mut() {
            Some(session) => session.handle_mouse(mouse),
            None => return DialogOutcome::Pending,
        };
        self.close_on(outcome)
    }

    fn close_on(&mut self, outcome: DialogOutcome) -> DialogOutcome {
        if outcome.is_final() {
            let _ = self.close();
        }
        outcome
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let layout = DialogLayout::calculate(session.config(), area, session.content_size());
        self.area = layout.dialog_area;

        frame.render_widget(Clear, layout.dialog_area);
        session.render_chrome(frame, layout.dialog_area, theme);
        session.render_content(frame, layout.content_area, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::dialogs::types::DialogConfig;
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
    use ratatui::{backend::TestBackend, Terminal};

    /// Confirms on Enter, cancels on Esc, confirms on any click
    struct Confirmer {
        config: DialogConfig,
    }

    impl Confirmer {
        fn boxed() -> Box<dyn DialogSession> {
            Box::new(Self {
                config: DialogConfig::new(DialogId::session("confirm")).with_title("Confirm"),
            })
        }
    }

    impl DialogSession for Confirmer {
        fn config(&self) -> &DialogConfig {
            &self.config
        }

        fn content_size(&self) -> (u16, u16) {
            (10, 2)
        }

        fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome {
            match key.code {
                KeyCode::Enter => DialogOutcome::Confirmed(Some("yes".to_string())),
                KeyCode::Esc => DialogOutcome::Cancelled,
                _ => DialogOutcome::Pending,
            }
        }

        fn handle_mouse(&mut self, _mouse: MouseEvent) -> DialogOutcome {
            DialogOutcome::Confirmed(None)
        }

        fn render_content(&mut self, _frame: &mut Frame, _area: Rect, _theme: &Theme) {}
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_only_one_session_at_a_time() {
        let mut service = DialogService::new();
        service.open(Confirmer::boxed()).unwrap();
        let first = service.current_id().cloned().unwrap();

        match service.open(Confirmer::boxed()) {
            Err(DialogError::AlreadyOpen(id)) => assert_eq!(id, first),
            other => panic!("expected AlreadyOpen, got {other:?}"),
        }
        assert_eq!(service.current_id(), Some(&first));
    }

    #[test]
    fn test_final_outcome_closes_session() {
        let mut service = DialogService::new();
        service.open(Confirmer::boxed()).unwrap();

        assert_eq!(service.handle_key(key(KeyCode::Down)), DialogOutcome::Pending);
        assert!(service.is_open());

        assert_eq!(service.handle_key(key(KeyCode::Esc)), DialogOutcome::Cancelled);
        assert!(!service.is_open());

        // Another session may open once the first is gone
        service.open(Confirmer::boxed()).unwrap();
        assert_eq!(
            service.handle_key(key(KeyCode::Enter)),
            DialogOutcome::Confirmed(Some("yes".to_string()))
        );
        assert!(!service.is_open());
    }

    #[test]
    fn test_explicit_close() {
        let mut service = DialogService::new();
        assert!(matches!(service.close(), Err(DialogError::NotOpen)));

        service.open(Confirmer::boxed()).unwrap();
        let id = service.current_id().cloned().unwrap();
        assert_eq!(service.close().unwrap(), id);
        assert!(!service.is_open());
    }

    #[test]
    fn test_clicks_outside_are_ignored() {
        let mut service = DialogService::new();
        service.open(Confirmer::boxed()).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|frame| service.render(frame, frame.size(), &theme))
            .unwrap();

        assert_eq!(service.handle_mouse(click(0, 0)), DialogOutcome::Pending);
        assert!(service.is_open());

        assert_eq!(service.handle_mouse(click(40, 12)), DialogOutcome::Confirmed(None));
        assert!(!service.is_open());
    }

    #[test]
    fn test_render_draws_title() {
        let mut service = DialogService::new();
        service.open(Confirmer::boxed()).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|frame| service.render(frame, frame.size(), &theme))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(screen.contains("Confirm"));
    }
}
