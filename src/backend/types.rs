//! Payloads served by the ucc backend

use serde::{Deserialize, Serialize};

/// A word in the package tree, as served by the words endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordNode {
    pub name: String,

    /// Display label; the backend sends `null` for unlabelled words
    #[serde(default)]
    pub data: Option<String>,

    /// `"open"` for top-level words
    #[serde(default)]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WordNode>,
}

impl WordNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: None,
            state: None,
            children: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.data = Some(label.into());
        self
    }

    pub fn with_children(mut self, children: Vec<WordNode>) -> Self {
        self.children = children;
        self
    }

    pub fn opened(mut self) -> Self {
        self.state = Some("open".to_string());
        self
    }

    /// Label if present, otherwise the word name
    pub fn label(&self) -> &str {
        self.data.as_deref().filter(|l| !l.is_empty()).unwrap_or(&self.name)
    }

    pub fn starts_open(&self) -> bool {
        self.state.as_deref() == Some("open")
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
