//! Collapsible tree of the package's words

use std::collections::HashSet;

use super::{Component, ComponentState};
use crate::backend::WordNode;
use crate::tui::{styles::Theme, utils::layout, Frame};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

/// Position of a node as child indices from the roots
type NodePath = Vec<usize>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeStatus {
    Loading,
    Loaded,
    Failed(String),
}

/// A visible row of the flattened tree
#[derive(Debug, Clone, PartialEq, Eq)]
struct TreeRow {
    path: NodePath,
    depth: usize,
    has_children: bool,
    is_open: bool,
}

pub struct WordTree {
    state: ComponentState,
    status: TreeStatus,
    roots: Vec<WordNode>,
    open: HashSet<NodePath>,
    rows: Vec<TreeRow>,
    list_state: ListState,
    /// Inner list area from the last render, for mouse hits
    list_area: Rect,
}

impl WordTree {
    pub fn new() -> Self {
        Self {
            state: ComponentState::new(),
            status: TreeStatus::Loading,
            roots: Vec::new(),
            open: HashSet::new(),
            rows: Vec::new(),
            list_state: ListState::default(),
            list_area: Rect::default(),
        }
    }

    pub fn status(&self) -> &TreeStatus {
        &self.status
    }

    pub fn set_loading(&mut self) {
        self.status = TreeStatus::Loading;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = TreeStatus::Failed(message.into());
    }

    /// Replace the tree. Nodes the backend marks open, and nodes named in
    /// `initially_open`, start expanded.
    pub fn set_words(&mut self, roots: Vec<WordNode>, initially_open: &[String]) {
        self.open.clear();
        let mut path = Vec::new();
        Self::collect_open(&roots, initially_open, &mut path, &mut self.open);

        self.roots = roots;
        self.status = TreeStatus::Loaded;
        self.rebuild_rows();
        self.list_state
            .select(if self.rows.is_empty() { None } else { Some(0) });
    }

    fn collect_open(
        nodes: &[WordNode],
        initially_open: &[String],
        path: &mut NodePath,
        open: &mut HashSet<NodePath>,
    ) {
        for (index, node) in nodes.iter().enumerate() {
            path.push(index);
            if !node.is_leaf()
                && (node.starts_open() || initially_open.iter().any(|name| *name == node.name))
            {
                open.insert(path.clone());
            }
            Self::collect_open(&node.children, initially_open, path, open);
            path.pop();
        }
    }

    fn rebuild_rows(&mut self) {
        let mut rows = Vec::new();
        let mut path = Vec::new();
        Self::flatten(&self.roots, &self.open, &mut path, &mut rows);
        self.rows = rows;

        if let Some(selected) = self.list_state.selected() {
            if selected >= self.rows.len() {
                self.list_state.select(self.rows.len().checked_sub(1));
            }
        }
    }

    fn flatten(
        nodes: &[WordNode],
        open: &HashSet<NodePath>,
        path: &mut NodePath,
        rows: &mut Vec<TreeRow>,
    ) {
        for (index, node) in nodes.iter().enumerate() {
            path.push(index);
            let is_open = open.contains(path.as_slice());
            rows.push(TreeRow {
                path: path.clone(),
                depth: path.len() - 1,
                has_children: !node.is_leaf(),
                is_open,
            });
            if is_open {
                Self::flatten(&node.children, open, path, rows);
            }
            path.pop();
        }
    }

    fn node(&self, path: &[usize]) -> Option<&WordNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get(*first)?;
        for index in rest {
            node = node.children.get(*index)?;
        }
        Some(node)
    }

    fn selected_row(&self) -> Option<&TreeRow> {
        self.list_state.selected().and_then(|index| self.rows.get(index))
    }

    pub fn selected_word(&self) -> Option<&WordNode> {
        self.selected_row().and_then(|row| self.node(&row.path))
    }

    /// Names of the visible rows, indented two spaces per level
    pub fn visible_names(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| {
                self.node(&row.path)
                    .map(|node| format!("{}{}", "  ".repeat(row.depth), node.name))
            })
            .collect()
    }

    pub fn move_up(&mut self) {
        if let Some(selected) = self.list_state.selected() {
            self.list_state.select(Some(selected.saturating_sub(1)));
        }
    }

    pub fn move_down(&mut self) {
        match self.list_state.selected() {
            Some(selected) if selected + 1 < self.rows.len() => {
                self.list_state.select(Some(selected + 1))
            }
            None if !self.rows.is_empty() => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    pub fn expand(&mut self) {
        if let Some(row) = self.selected_row().cloned() {
            if row.has_children && !row.is_open {
                self.open.insert(row.path);
                self.rebuild_rows();
            }
        }
    }

    /// Collapse the selected node, or move to its parent if already collapsed
    pub fn collapse(&mut self) {
        let Some(row) = self.selected_row().cloned() else {
            return;
        };

        if row.is_open {
            self.open.remove(&row.path);
            self.rebuild_rows();
        } else if row.depth > 0 {
            let parent = &row.path[..row.path.len() - 1];
            if let Some(index) = self.rows.iter().position(|r| r.path == parent) {
                self.list_state.select(Some(index));
            }
        }
    }

    pub fn toggle(&mut self) {
        match self.selected_row().map(|row| row.is_open) {
            Some(true) => self.collapse(),
            Some(false) => self.expand(),
            None => {}
        }
    }

    fn row_item(&self, row: &TreeRow, theme: &Theme) -> ListItem<'static> {
        let marker = match (row.has_children, row.is_open) {
            (true, true) => "▾ ",
            (true, false) => "▸ ",
            (false, _) => "  ",
        };
        let label = self.node(&row.path).map(WordNode::label).unwrap_or_default();

        ListItem::new(Line::from(vec![
            Span::raw("  ".repeat(row.depth)),
            Span::styled(marker, theme.dim_style()),
            Span::styled(label.to_string(), theme.text_style()),
        ]))
    }
}

impl Default for WordTree {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Component for WordTree {
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        match event.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Right | KeyCode::Char('l') => self.expand(),
            KeyCode::Left | KeyCode::Char('h') => self.collapse(),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle(),
            KeyCode::Home => {
                if !self.rows.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::End => self.list_state.select(self.rows.len().checked_sub(1)),
            _ => {}
        }
        Ok(())
    }

    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left)
                if layout::contains(self.list_area, event.column, event.row) =>
            {
                let index = self.list_state.offset() + (event.row - self.list_area.y) as usize;
                if index < self.rows.len() {
                    if self.list_state.selected() == Some(index) {
                        self.toggle();
                    } else {
                        self.list_state.select(Some(index));
                    }
                }
            }
            MouseEventKind::ScrollUp => self.move_up(),
            MouseEventKind::ScrollDown => self.move_down(),
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.state.size = area;

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Words")
            .border_style(theme.border_style(self.state.has_focus));
        self.list_area = block.inner(area);

        match &self.status {
            TreeStatus::Loading => {
                let loading = Paragraph::new("Loading words...")
                    .style(theme.dim_style())
                    .block(block);
                frame.render_widget(loading, area);
            }
            TreeStatus::Failed(message) => {
                let failed = Paragraph::new(format!("Could not load words: {}", message))
                    .style(ratatui::style::Style::default().fg(theme.error))
                    .wrap(Wrap { trim: true })
                    .block(block);
                frame.render_widget(failed, area);
            }
            TreeStatus::Loaded if self.rows.is_empty() => {
                let empty = Paragraph::new("No words in this package")
                    .style(theme.dim_style())
                    .block(block);
                frame.render_widget(empty, area);
            }
            TreeStatus::Loaded => {
                let items: Vec<ListItem> =
                    self.rows.iter().map(|row| self.row_item(row, theme)).collect();
                let list = List::new(items)
                    .block(block)
                    .highlight_style(theme.selection_style());
                frame.render_stateful_widget(list, area, &mut self.list_state);
            }
        }
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

    fn sample_words() -> Vec<WordNode> {
        vec![
            WordNode::new("declaration").with_children(vec![
                WordNode::new("function").with_children(vec![WordNode::new("main")]),
                WordNode::new("variable"),
            ]),
            WordNode::new("types")
                .opened()
                .with_children(vec![WordNode::new("int").with_label("integer")]),
            WordNode::new("empty"),
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_initially_open_and_backend_open_state() {
        let mut tree = WordTree::new();
        tree.set_words(sample_words(), &["declaration".to_string()]);

        assert_eq!(
            tree.visible_names(),
            vec!["declaration", "  function", "  variable", "types", "  int", "empty"]
        );
        assert_eq!(tree.selected_word().unwrap().name, "declaration");
    }

    #[test]
    fn test_collapsed_by_default_without_open_list() {
        let mut tree = WordTree::new();
        tree.set_words(sample_words(), &[]);
        assert_eq!(tree.visible_names(), vec!["declaration", "types", "  int", "empty"]);
    }

    #[tokio::test]
    async fn test_expand_collapse_and_parent_navigation() {
        let mut tree = WordTree::new();
        tree.set_words(sample_words(), &["declaration".to_string()]);

        tree.handle_key_event(key(KeyCode::Down)).await.unwrap();
        assert_eq!(tree.selected_word().unwrap().name, "function");

        tree.handle_key_event(key(KeyCode::Right)).await.unwrap();
        assert!(tree.visible_names().contains(&"    main".to_string()));

        tree.handle_key_event(key(KeyCode::Down)).await.unwrap();
        assert_eq!(tree.selected_word().unwrap().name, "main");

        // Leaf: Left moves to the parent
        tree.handle_key_event(key(KeyCode::Left)).await.unwrap();
        assert_eq!(tree.selected_word().unwrap().name, "function");

        // Open node: Left collapses
        tree.handle_key_event(key(KeyCode::Left)).await.unwrap();
        assert!(!tree.visible_names().contains(&"    main".to_string()));
    }

    #[tokio::test]
    async fn test_home_end_and_toggle() {
        let mut tree = WordTree::new();
        tree.set_words(sample_words(), &["declaration".to_string()]);

        tree.handle_key_event(key(KeyCode::End)).await.unwrap();
        assert_eq!(tree.selected_word().unwrap().name, "empty");

        tree.handle_key_event(key(KeyCode::Home)).await.unwrap();
        tree.handle_key_event(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(tree.visible_names(), vec!["declaration", "types", "  int", "empty"]);
        assert_eq!(tree.selected_word().unwrap().name, "declaration");
    }

    #[test]
    fn test_labels() {
        let mut tree = WordTree::new();
        tree.set_words(sample_words(), &[]);
        tree.move_down();
        tree.move_down();
        let word = tree.selected_word().unwrap();
        assert_eq!(word.name, "int");
        assert_eq!(word.label(), "integer");
    }

    #[test]
    fn test_empty_and_failed_states() {
        let mut tree = WordTree::new();
        assert_eq!(tree.status(), &TreeStatus::Loading);

        tree.set_words(Vec::new(), &[]);
        assert!(tree.selected_word().is_none());
        tree.move_down();
        assert!(tree.selected_word().is_none());

        tree.set_error("connection refused");
        assert_eq!(tree.status(), &TreeStatus::Failed("connection refused".to_string()));
    }
}
