use ratatui::style::{Color, Modifier, Style};

/// Colors used across the IDE
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,

    pub text: Color,
    pub text_dim: Color,
    pub text_bright: Color,

    pub background: Color,
    pub background_alt: Color,

    pub border: Color,
    pub border_focused: Color,

    pub error: Color,
    pub info: Color,

    pub selection: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            accent: Color::Rgb(250, 204, 21),     // Yellow-400

            text: Color::Rgb(226, 232, 240),      // Slate-200
            text_dim: Color::Rgb(148, 163, 184),  // Slate-400
            text_bright: Color::Rgb(255, 255, 255),

            background: Color::Rgb(15, 23, 42),   // Slate-900
            background_alt: Color::Rgb(30, 41, 59), // Slate-800

            border: Color::Rgb(71, 85, 105),      // Slate-600
            border_focused: Color::Rgb(20, 184, 166),

            error: Color::Rgb(239, 68, 68),       // Red-500
            info: Color::Rgb(59, 130, 246),       // Blue-500

            selection: Color::Rgb(17, 94, 89),    // Teal-800
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn dim_style(&self) -> Style {
        Style::default()
            .fg(self.text_dim)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Highlighted list rows and focused buttons
    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .fg(self.text_bright)
            .add_modifier(Modifier::BOLD)
    }

    pub fn menu_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background_alt)
    }

    pub fn hotkey_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.background_alt)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background_alt)
    }

    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.text_bright)
            .bg(self.error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info).bg(self.background_alt)
    }

    pub fn help_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }
}
