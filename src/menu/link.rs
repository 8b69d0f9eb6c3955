use serde::{Deserialize, Serialize};

use super::MenuAction;

/// An entry in the menu bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLink {
    pub label: String,
    pub href: String,

    /// Follows the link on Alt+hotkey
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotkey: Option<char>,
}

impl MenuLink {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            hotkey: None,
        }
    }

    pub fn with_hotkey(mut self, hotkey: char) -> Self {
        self.hotkey = Some(hotkey.to_ascii_lowercase());
        self
    }

    pub fn for_action(label: impl Into<String>, action: MenuAction) -> Self {
        Self::new(label, action.href())
    }

    pub fn defaults() -> Vec<Self> {
        vec![
            Self::for_action("Open Package", MenuAction::OpenPackage).with_hotkey('o'),
            Self::for_action("Save Word", MenuAction::SaveCurrentWord).with_hotkey('s'),
            Self::for_action("Compile", MenuAction::CompileProgram).with_hotkey('c'),
            Self::for_action("Load", MenuAction::LoadProgram).with_hotkey('l'),
        ]
    }
}

/// Action name carried by an `href`: everything after the first `#`
pub fn action_fragment(href: &str) -> Option<&str> {
    href.find('#').map(|index| &href[index + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_fragment() {
        assert_eq!(action_fragment("#open-package"), Some("open-package"));
        assert_eq!(action_fragment("/index.html#compile-program"), Some("compile-program"));
        assert_eq!(action_fragment("#a#b"), Some("a#b"));
        assert_eq!(action_fragment("#"), Some(""));
        assert_eq!(action_fragment("/docs/index.html"), None);
    }

    #[test]
    fn test_defaults_route_to_every_action() {
        let links = MenuLink::defaults();
        for action in MenuAction::ALL {
            assert!(links
                .iter()
                .any(|link| action_fragment(&link.href) == Some(action.name())));
        }
    }
}
