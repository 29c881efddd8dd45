// ABOUTME: Box screen: login or create with name and PIN, then the box's files and uploads into it

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use super::form::{border_style, busy_line, text_field};
use crate::app::state::WorkspaceField;
use crate::app::AppState;
use crate::lifecycle::RequestKind;
use crate::models::format_size;

#[derive(Default)]
pub struct WorkspaceViewComponent {
    table_state: TableState,
}

impl WorkspaceViewComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if state.workspace.is_open() {
            self.render_box(frame, area, state);
        } else {
            Self::render_login(frame, area, state);
        }
    }

    fn render_login(frame: &mut Frame, area: Rect, state: &AppState) {
        let workspace = &state.workspace;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                workspace.mode.title(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            chunks[0],
        );
        frame.render_widget(
            text_field("Box name", &workspace.box_name, workspace.focus == WorkspaceField::BoxName, false),
            chunks[1],
        );
        frame.render_widget(
            text_field("PIN", &workspace.pin, workspace.focus == WorkspaceField::Pin, true),
            chunks[2],
        );

        let hint = if state.is_busy(RequestKind::BoxAuth) {
            busy_line("Contacting server")
        } else {
            Line::from(Span::styled(
                "Enter submits · Ctrl+T switches between login and create",
                Style::default().fg(Color::Gray),
            ))
        };
        frame.render_widget(Paragraph::new(hint), chunks[3]);
    }

    fn render_box(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let workspace = &state.workspace;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Path
                Constraint::Length(1), // Pending
                Constraint::Min(4),    // Files
                Constraint::Length(1), // Hints
            ])
            .split(area);

        frame.render_widget(
            text_field(
                "Add file to upload (path, Enter to add)",
                &workspace.path_input,
                workspace.focus == WorkspaceField::Path,
                false,
            ),
            chunks[0],
        );

        let pending = if state.is_busy(RequestKind::BoxUpload) {
            busy_line("Uploading")
        } else if workspace.pending_files.is_empty() {
            Line::from("No files queued")
        } else {
            let names: Vec<&str> = workspace.pending_files.iter().map(|f| f.name.as_str()).collect();
            Line::from(format!("Queued ({}): {} · Ctrl+S uploads", names.len(), names.join(", ")))
        };
        frame.render_widget(Paragraph::new(pending), chunks[1]);

        let rows: Vec<Row> = workspace
            .files
            .iter()
            .map(|f| {
                Row::new(vec![
                    Cell::from(f.code_label().to_string()),
                    Cell::from(f.name.clone()),
                    Cell::from(format_size(f.size)),
                ])
            })
            .collect();
        let box_name = workspace.session.as_ref().map_or("", |s| s.box_name.as_str());
        let table = Table::new(
            rows,
            [Constraint::Length(8), Constraint::Min(20), Constraint::Length(12)],
        )
        .header(Row::new(vec!["Code", "Name", "Size"]).style(Style::default().fg(Color::Yellow)))
        .block(
            Block::default()
                .title(format!("Box \"{}\" · {} files", box_name, workspace.files.len()))
                .borders(Borders::ALL)
                .border_style(border_style(workspace.focus == WorkspaceField::Files)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
        self.table_state.select(workspace.selected_file);
        frame.render_stateful_widget(table, chunks[2], &mut self.table_state);

        let hint = if state.is_busy(RequestKind::BoxFileDelete) {
            busy_line("Deleting")
        } else {
            Line::from(Span::styled(
                "Del deletes · Ctrl+D downloads · Ctrl+R refreshes · Ctrl+L logs out",
                Style::default().fg(Color::Gray),
            ))
        };
        frame.render_widget(Paragraph::new(hint), chunks[3]);
    }
}
