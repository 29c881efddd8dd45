// ABOUTME: Yes/No dialog shown before deleting anything on the server

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::form::centered_rect;
use crate::app::state::ConfirmationDialog;

pub struct ConfirmationDialogComponent;

impl ConfirmationDialogComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, dialog: &ConfirmationDialog) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let option = |label: &'static str, selected: bool| {
            if selected {
                Span::styled(
                    format!(" {label} "),
                    Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(format!(" {label} "))
            }
        };

        let text = vec![
            Line::from(dialog.message.as_str()),
            Line::from(""),
            Line::from(vec![
                option("Yes", dialog.selected_option),
                Span::raw("   "),
                option("No", !dialog.selected_option),
            ])
            .alignment(Alignment::Center),
        ];

        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(dialog.title.as_str())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
        frame.render_widget(paragraph, popup_area);
    }
}

impl Default for ConfirmationDialogComponent {
    fn default() -> Self {
        Self::new()
    }
}
