use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::menu::MenuLink;

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub description: String,
}

impl KeyBinding {
    pub fn new(key: KeyCode, modifiers: KeyModifiers, description: &str) -> Self {
        Self {
            key,
            modifiers,
            description: description.to_string(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key == event.code && self.modifiers == event.modifiers
    }

    fn display(&self) -> String {
        let key = match self.key {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Tab => "Tab".to_string(),
            other => format!("{:?}", other),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", key.to_uppercase())
        } else {
            key
        }
    }
}

/// Application key mappings
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub quit: KeyBinding,
    pub help: KeyBinding,
    pub focus_next: KeyBinding,
    pub reload: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            quit: KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL, "Quit"),
            help: KeyBinding::new(KeyCode::Char('g'), KeyModifiers::CONTROL, "Show/hide help"),
            focus_next: KeyBinding::new(KeyCode::Tab, KeyModifiers::NONE, "Switch between menu and tree"),
            reload: KeyBinding::new(KeyCode::Char('r'), KeyModifiers::NONE, "Reload the word tree"),
        }
    }
}

impl KeyMap {
    pub fn should_quit(&self, event: &KeyEvent) -> bool {
        self.quit.matches(event)
    }

    pub fn should_show_help(&self, event: &KeyEvent) -> bool {
        self.help.matches(event)
    }

    pub fn should_focus_next(&self, event: &KeyEvent) -> bool {
        self.focus_next.matches(event)
    }

    pub fn should_reload(&self, event: &KeyEvent) -> bool {
        self.reload.matches(event)
    }

    /// Hotkey char for Alt+<char> menu accelerators
    pub fn menu_hotkey(event: &KeyEvent) -> Option<char> {
        match event.code {
            KeyCode::Char(c) if event.modifiers == KeyModifiers::ALT => Some(c.to_ascii_lowercase()),
            _ => None,
        }
    }

    /// Help text for all key bindings plus the menu accelerators
    pub fn help_text(&self, links: &[MenuLink]) -> String {
        let mut lines: Vec<String> = [&self.quit, &self.help, &self.focus_next, &self.reload]
            .iter()
            .map(|binding| format!("{:<8} {}", binding.display(), binding.description))
            .collect();

        for link in links {
            if let Some(hotkey) = link.hotkey {
                lines.push(format!("{:<8} {}", format!("Alt+{}", hotkey), link.label));
            }
        }

        lines.join("\n")
    }
}
