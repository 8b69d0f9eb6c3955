use crate::backend::{Backend, BackendResult, WordNode};
use crate::config::Config;
use crate::menu::{action_fragment, DispatchOutcome, LinkOutcome, MenuAction, MenuDispatcher};
use crate::tui::{
    components::{
        dialogs::{DialogOutcome, DialogService, PackageSelectDialog},
        menu_bar::MenuBar,
        word_panel::render_word_panel,
        word_tree::WordTree,
        Component,
    },
    events::{Event, Notice, NoticeLevel},
    keys::KeyMap,
    styles::Theme,
    utils::layout,
    Frame,
};
use crate::workflow::{PackageForm, PackageOpenWorkflow};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Panel receiving keyboard input when no dialog is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Menu,
    Tree,
}

/// Main application state and controller
pub struct App {
    should_quit: bool,
    size: Rect,
    key_map: KeyMap,
    theme: Theme,
    config: Config,
    backend: Arc<dyn Backend>,
    dispatcher: MenuDispatcher,
    dialogs: DialogService,
    menu_bar: MenuBar,
    word_tree: WordTree,
    /// A word fetch is running; reloads wait for it
    words_in_flight: bool,
    focus: Focus,
    notice: Option<Notice>,
    show_help: bool,
    /// Last package confirmed in the open-package dialog
    confirmed_package: Option<String>,
    event_sender: mpsc::UnboundedSender<Event>,
}

impl App {
    pub fn new(
        config: Config,
        backend: Arc<dyn Backend>,
        event_sender: mpsc::UnboundedSender<Event>,
    ) -> Self {
        let mut menu_bar = MenuBar::new(config.menu.clone());
        menu_bar.set_event_sender(event_sender.clone());

        let mut word_tree = WordTree::new();
        word_tree.set_focus(true);

        let mut dispatcher = MenuDispatcher::new();
        Self::register_handlers(
            &mut dispatcher,
            PackageOpenWorkflow::new(backend.clone(), event_sender.clone()),
        );

        Self {
            should_quit: false,
            size: Rect::default(),
            key_map: KeyMap::default(),
            theme: Theme::default(),
            config,
            backend,
            dispatcher,
            dialogs: DialogService::new(),
            menu_bar,
            word_tree,
            words_in_flight: false,
            focus: Focus::Tree,
            notice: None,
            show_help: false,
            confirmed_package: None,
            event_sender,
        }
    }

    fn register_handlers(dispatcher: &mut MenuDispatcher, workflow: PackageOpenWorkflow) {
        dispatcher.register(MenuAction::OpenPackage, move || {
            workflow.start();
        });

        for action in [
            MenuAction::SaveCurrentWord,
            MenuAction::CompileProgram,
            MenuAction::LoadProgram,
        ] {
            dispatcher.register(action, move || {
                debug!("{} has no behavior yet", action);
            });
        }
    }

    /// Kick off the initial loads
    pub fn start(&mut self) {
        info!("Starting with backend {}", self.config.base_url);
        self.reload_words();
    }

    /// Release menu handlers and any open dialog
    pub fn shutdown(&mut self) {
        if self.dialogs.is_open() {
            let _ = self.dialogs.close();
        }
        self.dispatcher.teardown();
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn confirmed_package(&self) -> Option<&str> {
        self.confirmed_package.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dialogs(&self) -> &DialogService {
        &self.dialogs
    }

    pub fn word_tree(&self) -> &WordTree {
        &self.word_tree
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    fn reload_words(&mut self) {
        if self.words_in_flight {
            debug!("Word fetch already in flight");
            return;
        }
        self.words_in_flight = true;
        self.word_tree.set_loading();

        let backend = self.backend.clone();
        let sender = self.event_sender.clone();
        tokio::spawn(async move {
            let result = backend.fetch_words().await;
            let _ = sender.send(Event::WordsLoaded(result));
        });
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.menu_bar.set_focus(focus == Focus::Menu);
        self.word_tree.set_focus(focus == Focus::Tree);
    }

    /// Handle incoming events. Returns true when the app should exit.
    pub async fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key_event) => self.handle_key(key_event).await?,

            Event::Mouse(mouse_event) => {
                if self.config.mouse_enabled {
                    self.handle_mouse(mouse_event).await?;
                }
            }

            Event::Resize(width, height) => {
                self.size = Rect::new(0, 0, width, height);
            }

            Event::Tick => {}

            Event::FollowLink(href) => self.follow_link(&href),

            Event::PackagesLoaded(result) => self.show_package_dialog(result),

            Event::WordsLoaded(result) => self.show_words(result),

            Event::Shutdown => {
                info!("Shutdown requested");
                self.should_quit = true;
            }
        }

        Ok(self.should_quit)
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.key_map.should_quit(&key) {
            self.should_quit = true;
            return Ok(());
        }

        // The open dialog is modal
        if self.dialogs.is_open() {
            let outcome = self.dialogs.handle_key(key);
            self.apply_dialog_outcome(outcome);
            return Ok(());
        }

        if self.key_map.should_show_help(&key) {
            self.show_help = !self.show_help;
            return Ok(());
        }

        if self.show_help && key.code == KeyCode::Esc {
            self.show_help = false;
            return Ok(());
        }

        if let Some(hotkey) = KeyMap::menu_hotkey(&key) {
            if let Some(index) = self.menu_bar.hotkey_index(hotkey) {
                self.menu_bar.activate(index);
            }
            return Ok(());
        }

        if self.key_map.should_focus_next(&key) {
            let next = match self.focus {
                Focus::Menu => Focus::Tree,
                Focus::Tree => Focus::Menu,
            };
            self.set_focus(next);
            return Ok(());
        }

        match self.focus {
            Focus::Menu => self.menu_bar.handle_key_event(key).await?,
            Focus::Tree if self.key_map.should_reload(&key) => self.reload_words(),
            Focus::Tree => self.word_tree.handle_key_event(key).await?,
        }
        Ok(())
    }

    async fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.dialogs.is_open() {
            let outcome = self.dialogs.handle_mouse(mouse);
            self.apply_dialog_outcome(outcome);
            return Ok(());
        }

        if layout::contains(self.menu_bar.size(), mouse.column, mouse.row) {
            self.menu_bar.handle_mouse_event(mouse).await?;
        } else if layout::contains(self.word_tree.size(), mouse.column, mouse.row) {
            self.set_focus(Focus::Tree);
            self.word_tree.handle_mouse_event(mouse).await?;
        }
        Ok(())
    }

    fn follow_link(&mut self, href: &str) {
        if self.dialogs.is_open() && action_fragment(href) == Some(MenuAction::OpenPackage.name()) {
            debug!("Package dialog already open, ignoring {}", href);
            return;
        }

        match self.dispatcher.follow_link(href) {
            LinkOutcome::Dispatched(DispatchOutcome::Handled(action)) => {
                info!("Menu action {}", action);
            }
            LinkOutcome::Dispatched(DispatchOutcome::Unregistered(name)) => {
                debug!("Ignored menu link {} ({})", href, name);
            }
            LinkOutcome::Navigate(target) => {
                info!("Following link {}", target);
                self.notice = Some(Notice::info(format!("Link {} opens outside the IDE", target)));
            }
        }
    }

    fn show_package_dialog(&mut self, result: BackendResult<PackageForm>) {
        match result {
            Ok(form) => {
                match self.dialogs.open(Box::new(PackageSelectDialog::new(form))) {
                    Ok(()) => self.show_help = false,
                    Err(e) => warn!("Dropping package list: {}", e),
                }
            }
            Err(e) => {
                self.notice = Some(Notice::error(format!("Could not load packages: {}", e)));
            }
        }
    }

    fn apply_dialog_outcome(&mut self, outcome: DialogOutcome) {
        match outcome {
            DialogOutcome::Pending => {}
            DialogOutcome::Confirmed(Some(package)) => {
                info!("Package selected: {}", package);
                self.notice = Some(Notice::info(format!("Selected package {}", package)));
                self.confirmed_package = Some(package);
            }
            DialogOutcome::Confirmed(None) => {
                debug!("Package dialog confirmed with nothing selected");
            }
            DialogOutcome::Cancelled => {
                debug!("Package dialog cancelled");
            }
        }
    }

    fn show_words(&mut self, result: BackendResult<Vec<WordNode>>) {
        self.words_in_flight = false;
        match result {
            Ok(words) => {
                info!("Loaded {} top-level words", words.len());
                self.word_tree.set_words(words, &self.config.initially_open);
            }
            Err(e) => {
                error!("Failed to fetch words: {}", e);
                self.word_tree.set_error(e.to_string());
                self.notice = Some(Notice::error(format!("Could not load words: {}", e)));
            }
        }
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        self.size = frame.size();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Menu bar
                Constraint::Min(1),    // Tree and word panel
                Constraint::Length(1), // Status bar
            ])
            .split(self.size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(rows[1]);

        self.menu_bar.render(frame, rows[0], &self.theme);
        self.word_tree.render(frame, columns[0], &self.theme);
        render_word_panel(frame, columns[1], self.word_tree.selected_word(), &self.theme);
        self.render_status_bar(frame, rows[2]);

        self.dialogs.render(frame, self.size, &self.theme);

        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let (text, style) = match &self.notice {
            Some(notice) => {
                let style = match notice.level {
                    NoticeLevel::Info => self.theme.info_style(),
                    NoticeLevel::Error => self.theme.error_style(),
                };
                (notice.text.clone(), style)
            }
            None => {
                let package = self.confirmed_package.as_deref().unwrap_or("none");
                (
                    format!(
                        "Package: {} | Tab to switch panels | Ctrl+G for help | Ctrl+C to quit",
                        package
                    ),
                    self.theme.status_bar_style(),
                )
            }
        };

        frame.render_widget(Paragraph::new(text).style(style), area);
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let help_area = layout::centered_rect_percent(60, 50, frame.size());

        let help_block = Block::default()
            .borders(Borders::ALL)
            .title("Help")
            .style(self.theme.help_style());

        let help_paragraph = Paragraph::new(self.key_map.help_text(self.menu_bar.links()))
            .block(help_block)
            .style(self.theme.text_style());

        frame.render_widget(Clear, help_area);
        frame.render_widget(help_paragraph, help_area);
    }
}
