//! Package selection dialog
//!
//! Shows a [`PackageForm`]: the prompt, a list with one row per package, and
//! Ok / Cancel buttons. Ok reports the selected package; Cancel and Esc
//! dismiss the dialog without a selection.

use super::types::{DialogConfig, DialogId, DialogOutcome, DialogSession};
use crate::tui::{styles::Theme, utils::layout, Frame};
use crate::workflow::PackageForm;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const MAX_VISIBLE_OPTIONS: usize = 10;
const MIN_WIDTH: u16 = 30;

/// Control holding keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    List,
    Ok,
    Cancel,
}

impl FormFocus {
    fn next(self) -> Self {
        match self {
            FormFocus::List => FormFocus::Ok,
            FormFocus::Ok => FormFocus::Cancel,
            FormFocus::Cancel => FormFocus::List,
        }
    }

    fn previous(self) -> Self {
        match self {
            FormFocus::List => FormFocus::Cancel,
            FormFocus::Ok => FormFocus::List,
            FormFocus::Cancel => FormFocus::Ok,
        }
    }
}

/// Areas of the last render, for mouse hits
#[derive(Debug, Clone, Copy, Default)]
struct FormRegions {
    list: Rect,
    ok: Rect,
    cancel: Rect,
}

pub struct PackageSelectDialog {
    config: DialogConfig,
    form: PackageForm,
    list_state: ListState,
    focus: FormFocus,
    regions: FormRegions,
}

impl PackageSelectDialog {
    pub const KIND: &'static str = "open-package";

    pub fn new(form: PackageForm) -> Self {
        let config = DialogConfig::new(DialogId::session(Self::KIND)).with_title("Open Package");
        let selected = if form.is_empty() { None } else { Some(0) };

        Self {
            config,
            form,
            list_state: ListState::default().with_selected(selected),
            focus: FormFocus::List,
            regions: FormRegions::default(),
        }
    }

    pub fn focus(&self) -> FormFocus {
        self.focus
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.list_state
            .selected()
            .and_then(|index| self.form.options().get(index))
            .map(|option| option.value.as_str())
    }

    /// Select the option whose value is `value`
    pub fn select_value(&mut self, value: &str) -> bool {
        match self.form.options().iter().position(|option| option.value == value) {
            Some(index) => {
                self.list_state.select(Some(index));
                true
            }
            None => false,
        }
    }

    pub fn confirm(&self) -> DialogOutcome {
        DialogOutcome::Confirmed(self.selected_value().map(str::to_string))
    }

    pub fn cancel(&self) -> DialogOutcome {
        DialogOutcome::Cancelled
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.form.options().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.list_state.select(Some(next as usize));
    }

    fn activate_focused(&self) -> DialogOutcome {
        match self.focus {
            FormFocus::List | FormFocus::Ok => self.confirm(),
            FormFocus::Cancel => self.cancel(),
        }
    }

    fn visible_rows(&self) -> u16 {
        self.form.options().len().clamp(1, MAX_VISIBLE_OPTIONS) as u16
    }

    fn split(&self, area: Rect) -> (Rect, Rect, Rect, Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(area);

        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);

        (rows[0], rows[1], buttons[0], buttons[1])
    }

    fn button<'a>(&self, label: &'a str, focused: bool, theme: &Theme) -> Paragraph<'a> {
        let style = if focused {
            theme.selection_style()
        } else {
            theme.text_style()
        };
        Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style(focused)),
            )
    }
}

impl DialogSession for PackageSelectDialog {
    fn config(&self) -> &DialogConfig {
        &self.config
    }

    fn content_size(&self) -> (u16, u16) {
        let longest_option = self
            .form
            .options()
            .iter()
            .map(|option| option.label.width())
            .max()
            .unwrap_or(0);
        // List border plus highlight symbol
        let list_width = longest_option + 4;
        let width = list_width
            .max(self.form.prompt().width())
            .max(self.form.ok_label().width() + self.form.cancel_label().width() + 8);

        let height = 1 + self.visible_rows() + 2 + 3;
        ((width as u16).max(MIN_WIDTH), height)
    }

    fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome {
        match key.code {
            KeyCode::Esc => return self.cancel(),
            KeyCode::Enter => return self.activate_focused(),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-(MAX_VISIBLE_OPTIONS as isize)),
            KeyCode::PageDown => self.move_selection(MAX_VISIBLE_OPTIONS as isize),
            KeyCode::Home => self.move_selection(isize::MIN / 2),
            KeyCode::End => self.move_selection(isize::MAX / 2),
            KeyCode::Left | KeyCode::Right if self.focus != FormFocus::List => {
                self.focus = if self.focus == FormFocus::Ok {
                    FormFocus::Cancel
                } else {
                    FormFocus::Ok
                };
            }
            _ => {}
        }
        DialogOutcome::Pending
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> DialogOutcome {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (column, row) = (mouse.column, mouse.row);
                if layout::contains(self.regions.ok, column, row) {
                    self.focus = FormFocus::Ok;
                    return self.confirm();
                }
                if layout::contains(self.regions.cancel, column, row) {
                    self.focus = FormFocus::Cancel;
                    return self.cancel();
                }
                if layout::contains(self.regions.list, column, row) {
                    self.focus = FormFocus::List;
                    let index = self.list_state.offset() + (row - self.regions.list.y) as usize;
                    if index < self.form.options().len() {
                        self.list_state.select(Some(index));
                    }
                }
            }
            MouseEventKind::ScrollUp => self.move_selection(-1),
            MouseEventKind::ScrollDown => self.move_selection(1),
            _ => {}
        }
        DialogOutcome::Pending
    }

    fn render_content(&mut self, frame: &mut Frame, content_area: Rect, theme: &Theme) {
        let (prompt_area, list_area, ok_area, cancel_area) = self.split(content_area);

        frame.render_widget(
            Paragraph::new(self.form.prompt()).style(theme.text_style()),
            prompt_area,
        );

        let list_block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(self.focus == FormFocus::List));
        self.regions = FormRegions {
            list: list_block.inner(list_area),
            ok: ok_area,
            cancel: cancel_area,
        };

        if self.form.is_empty() {
            let empty = Paragraph::new("(no packages available)")
                .style(theme.dim_style())
                .block(list_block);
            frame.render_widget(empty, list_area);
        } else {
            // Names are shown as literal text
            let items: Vec<ListItem> = self
                .form
                .options()
                .iter()
                .map(|option| ListItem::new(Line::from(Span::raw(option.label.clone()))))
                .collect();
            let list = List::new(items)
                .block(list_block)
                .highlight_style(theme.selection_style())
                .highlight_symbol("> ");
            frame.render_stateful_widget(list, list_area, &mut self.list_state);
        }

        let ok = self.button(self.form.ok_label(), self.focus == FormFocus::Ok, theme);
        let cancel = self.button(self.form.cancel_label(), self.focus == FormFocus::Cancel, theme);
        frame.render_widget(ok, ok_area);
        frame.render_widget(cancel, cancel_area);
    }
}
