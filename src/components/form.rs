// ABOUTME: Small rendering helpers shared by the views: text fields and popup geometry

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// Single-line input box. Masked fields show one bullet per character.
pub fn text_field<'a>(label: &'a str, value: &str, focused: bool, masked: bool) -> Paragraph<'a> {
    let shown = if masked {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let cursor = if focused { "▏" } else { "" };

    Paragraph::new(Line::from(vec![
        Span::raw(shown),
        Span::styled(cursor, Style::default().fg(Color::Cyan).add_modifier(Modifier::SLOW_BLINK)),
    ]))
    .block(
        Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(border_style(focused)),
    )
}

pub fn busy_line(label: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("⟳ {label}…"),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
    ))
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
