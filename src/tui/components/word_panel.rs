//! Details of the word selected in the tree

use crate::backend::WordNode;
use crate::tui::{styles::Theme, Frame};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn word_lines(word: Option<&WordNode>, theme: &Theme) -> Vec<Line<'static>> {
    let Some(word) = word else {
        return vec![Line::from(Span::styled("No word selected", theme.dim_style()))];
    };

    let heading = theme.text_style().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Name:  ", heading),
            Span::styled(word.name.clone(), theme.text_style()),
        ]),
        Line::from(vec![
            Span::styled("Label: ", heading),
            Span::styled(word.label().to_string(), theme.text_style()),
        ]),
    ];

    if !word.children.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Derived words ({}):", word.children.len()),
            heading,
        )));
        lines.extend(
            word.children
                .iter()
                .map(|child| Line::from(format!("  {}", child.label()))),
        );
    }

    lines
}

pub fn render_word_panel(frame: &mut Frame, area: Rect, word: Option<&WordNode>, theme: &Theme) {
    let panel = Paragraph::new(word_lines(word, theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Word")
                .border_style(theme.border_style(false)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_word_details() {
        let word = WordNode::new("repeat")
            .with_label("repeat n times")
            .with_children(vec![WordNode::new("forever")]);

        let lines = text(&word_lines(Some(&word), &Theme::default()));
        assert_eq!(lines[0], "Name:  repeat");
        assert_eq!(lines[1], "Label: repeat n times");
        assert_eq!(lines[3], "Derived words (1):");
        assert_eq!(lines[4], "  forever");
    }

    #[test]
    fn test_nothing_selected() {
        let lines = text(&word_lines(None, &Theme::default()));
        assert_eq!(lines, vec!["No word selected".to_string()]);
    }
}
