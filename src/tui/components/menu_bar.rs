//! One-row menu bar of clickable links
//!
//! Activating an entry posts [`Event::FollowLink`] with the entry's `href`;
//! the application hands it to the menu dispatcher.

use super::{Component, ComponentState};
use crate::menu::MenuLink;
use crate::tui::{events::Event, styles::Theme, utils::layout, Frame};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::sync::mpsc;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

pub struct MenuBar {
    state: ComponentState,
    links: Vec<MenuLink>,
    selected: usize,
    /// Cell ranges of each link as last rendered
    regions: Vec<Rect>,
    event_sender: Option<mpsc::UnboundedSender<Event>>,
}

impl MenuBar {
    pub fn new(links: Vec<MenuLink>) -> Self {
        Self {
            state: ComponentState::new(),
            links,
            selected: 0,
            regions: Vec::new(),
            event_sender: None,
        }
    }

    pub fn set_event_sender(&mut self, sender: mpsc::UnboundedSender<Event>) {
        self.event_sender = Some(sender);
    }

    pub fn links(&self) -> &[MenuLink] {
        &self.links
    }

    pub fn selected_link(&self) -> Option<&MenuLink> {
        self.links.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.links.is_empty() {
            self.selected = (self.selected + 1) % self.links.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.links.is_empty() {
            self.selected = (self.selected + self.links.len() - 1) % self.links.len();
        }
    }

    /// Index of the link bound to Alt+`hotkey`
    pub fn hotkey_index(&self, hotkey: char) -> Option<usize> {
        self.links
            .iter()
            .position(|link| link.hotkey.is_some_and(|key| key.eq_ignore_ascii_case(&hotkey)))
    }

    /// Index of the link under a terminal cell, using the last rendered layout
    pub fn link_index_at(&self, column: u16, row: u16) -> Option<usize> {
        self.regions
            .iter()
            .position(|region| layout::contains(*region, column, row))
    }

    /// Follow the link at `index`
    pub fn activate(&mut self, index: usize) {
        let Some(link) = self.links.get(index) else {
            return;
        };
        self.selected = index;
        debug!("Menu link activated: {} ({})", link.label, link.href);
        if let Some(sender) = &self.event_sender {
            let _ = sender.send(Event::FollowLink(link.href.clone()));
        }
    }

    /// Cells occupied by each link when drawn into `area`
    fn layout_links(&self, area: Rect) -> Vec<Rect> {
        let right = area.x.saturating_add(area.width);
        let mut x = area.x;
        self.links
            .iter()
            .map(|link| {
                let width = (link.label.width() as u16).saturating_add(2);
                let region = Rect::new(x, area.y, width.min(right.saturating_sub(x)), 1);
                x = x.saturating_add(width).saturating_add(1).min(right);
                region
            })
            .collect()
    }

    fn link_spans<'a>(&self, link: &'a MenuLink, selected: bool, theme: &Theme) -> Vec<Span<'a>> {
        let base = if selected {
            theme.selection_style()
        } else {
            theme.menu_style()
        };

        let hotkey_at = link.hotkey.and_then(|hotkey| {
            link.label
                .char_indices()
                .find(|(_, c)| c.eq_ignore_ascii_case(&hotkey))
        });

        let mut spans = vec![Span::styled(" ", base)];
        match hotkey_at {
            Some((index, c)) => {
                let end = index + c.len_utf8();
                spans.push(Span::styled(&link.label[..index], base));
                spans.push(Span::styled(&link.label[index..end], theme.hotkey_style()));
                spans.push(Span::styled(&link.label[end..], base));
            }
            None => spans.push(Span::styled(link.label.as_str(), base)),
        }
        spans.push(Span::styled(" ", base));
        spans
    }
}

#[async_trait]
impl Component for MenuBar {
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        match event.code {
            KeyCode::Left => self.select_previous(),
            KeyCode::Right => self.select_next(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.selected),
            _ => {}
        }
        Ok(())
    }

    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        if let MouseEventKind::Down(MouseButton::Left) = event.kind {
            if let Some(index) = self.link_index_at(event.column, event.row) {
                self.activate(index);
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.state.size = area;
        self.regions = self.layout_links(area);

        let mut spans = Vec::new();
        for (index, link) in self.links.iter().enumerate() {
            let selected = self.state.has_focus && index == self.selected;
            spans.extend(self.link_spans(link, selected, theme));
            spans.push(Span::styled(" ", theme.menu_style()));
        }

        let bar = Paragraph::new(Line::from(spans)).style(theme.menu_style());
        frame.render_widget(bar, area);
    }

    fn size(&self) -> Rect {
        self.state.size
    }

    fn has_focus(&self) -> bool {
        self.state.has_focus
    }

    fn set_focus(&mut self, focus: bool) {
        self.state.has_focus = focus;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered_bar() -> (MenuBar, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut bar = MenuBar::new(vec![
            MenuLink::new("Open Package", "#open-package").with_hotkey('o'),
            MenuLink::new("Docs", "/docs/index.html"),
        ]);
        bar.set_event_sender(tx);

        let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|frame| bar.render(frame, frame.size(), &theme))
            .unwrap();
        (bar, rx)
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
    fn test_layout_follows_label_widths() {
        let (bar, _rx) = rendered_bar();
        // " Open Package " then a gap, then " Docs "
        assert_eq!(bar.link_index_at(0, 0), Some(0));
        assert_eq!(bar.link_index_at(13, 0), Some(0));
        assert_eq!(bar.link_index_at(14, 0), None);
        assert_eq!(bar.link_index_at(15, 0), Some(1));
        assert_eq!(bar.link_index_at(30, 0), None);
    }

    #[tokio::test]
    async fn test_click_posts_href() {
        let (mut bar, mut rx) = rendered_bar();

        bar.handle_mouse_event(click(3, 0)).await.unwrap();
        assert!(matches!(rx.try_recv(), Ok(Event::FollowLink(href)) if href == "#open-package"));

        bar.handle_mouse_event(click(16, 0)).await.unwrap();
        assert!(matches!(rx.try_recv(), Ok(Event::FollowLink(href)) if href == "/docs/index.html"));

        bar.handle_mouse_event(click(35, 0)).await.unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_keyboard_selection() {
        let (mut bar, mut rx) = rendered_bar();

        bar.handle_key_event(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE))
            .await
            .unwrap();
        assert_eq!(bar.selected_link().unwrap().label, "Docs");

        bar.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .await
            .unwrap();
        assert!(matches!(rx.try_recv(), Ok(Event::FollowLink(href)) if href == "/docs/index.html"));
    }

    #[test]
    fn test_hotkey_lookup() {
        let (bar, _rx) = rendered_bar();
        assert_eq!(bar.hotkey_index('o'), Some(0));
        assert_eq!(bar.hotkey_index('O'), Some(0));
        assert_eq!(bar.hotkey_index('d'), None);
    }

    #[test]
    fn test_uppercase_hotkey_from_config_matches() {
        let link: MenuLink = serde_json::from_str(
            r##"{ "label": "Open Package", "href": "#open-package", "hotkey": "O" }"##,
        )
        .unwrap();
        let bar = MenuBar::new(vec![link]);

        assert_eq!(bar.hotkey_index('o'), Some(0));
        assert_eq!(bar.hotkey_index('O'), Some(0));
    }
}
