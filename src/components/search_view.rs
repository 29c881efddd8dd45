// ABOUTME: Search screen: six-digit code entry and the package found for it

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::form::{border_style, busy_line, text_field};
use crate::app::state::SearchField;
use crate::app::AppState;
use crate::lifecycle::RequestKind;

#[derive(Default)]
pub struct SearchViewComponent {
    list_state: ListState,
}

impl SearchViewComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let search = &state.search;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1), Constraint::Min(3)])
            .split(area);

        frame.render_widget(
            text_field("Access code", &search.code, search.focus == SearchField::Code, false),
            chunks[0],
        );

        let status = if state.is_busy(RequestKind::Search) {
            busy_line("Searching")
        } else if state.is_busy(RequestKind::Download) {
            busy_line("Downloading")
        } else {
            Line::from(Span::styled(
                "Enter searches · Tab to the files · Enter or Ctrl+D downloads",
                Style::default().fg(Color::Gray),
            ))
        };
        frame.render_widget(Paragraph::new(status), chunks[1]);

        let Some(package) = &search.package else {
            let empty = Paragraph::new("No package loaded")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().title("Result").borders(Borders::ALL));
            frame.render_widget(empty, chunks[2]);
            return;
        };

        let items: Vec<ListItem> = package
            .files
            .iter()
            .map(|f| ListItem::new(f.name.clone()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!("Shared by {} · {} files", package.name, package.files.len()))
                    .borders(Borders::ALL)
                    .border_style(border_style(search.focus == SearchField::Files)),
            )
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");
        self.list_state.select(search.selected_file);
        frame.render_stateful_widget(list, chunks[2], &mut self.list_state);
    }
}
