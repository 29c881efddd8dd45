// ABOUTME: Anonymous upload screen: sender name, file picker by path, selected files and the last code

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::form::{border_style, busy_line, text_field};
use crate::app::state::UploadField;
use crate::app::AppState;
use crate::lifecycle::RequestKind;
use crate::models::{format_size, MAX_FILES_PER_UPLOAD};

#[derive(Default)]
pub struct UploadViewComponent {
    list_state: ListState,
}

impl UploadViewComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let upload = &state.upload;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Name
                Constraint::Length(3), // Path
                Constraint::Min(4),    // Files
                Constraint::Length(4), // Status
            ])
            .split(area);

        frame.render_widget(
            text_field("Your name", &upload.name, upload.focus == UploadField::Name, false),
            chunks[0],
        );
        frame.render_widget(
            text_field(
                "Add file (path, Enter to add)",
                &upload.path_input,
                upload.focus == UploadField::Path,
                false,
            ),
            chunks[1],
        );

        let items: Vec<ListItem> = upload
            .files
            .iter()
            .map(|f| ListItem::new(format!("{:<40} {:>10}", f.name, format_size(f.size))))
            .collect();
        let title = format!(
            "Files {}/{} · total {}",
            upload.files.len(),
            MAX_FILES_PER_UPLOAD,
            format_size(upload.total_size())
        );
        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(border_style(upload.focus == UploadField::Files)),
            )
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");
        self.list_state.select(upload.selected_file);
        frame.render_stateful_widget(list, chunks[2], &mut self.list_state);

        frame.render_widget(Self::status(state), chunks[3]);
    }

    fn status(state: &AppState) -> Paragraph<'static> {
        let mut lines = Vec::new();
        if state.is_busy(RequestKind::Upload) {
            lines.push(busy_line("Uploading"));
        } else if let Some(receipt) = &state.upload.receipt {
            lines.push(Line::from(vec![
                Span::raw(format!("Last upload by {}: ", receipt.name)),
                Span::styled(
                    receipt.code.to_string(),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    "  ({} files, {})",
                    receipt.file_count,
                    format_size(receipt.total_size)
                )),
            ]));
            if state.upload.code_copied {
                lines.push(Line::from(Span::styled(
                    "Code copied to clipboard",
                    Style::default().fg(Color::Gray),
                )));
            }
        } else {
            lines.push(Line::from("Share the code with the recipient once the upload finishes."));
        }

        Paragraph::new(lines)
            .block(Block::default().title("Status").borders(Borders::ALL))
            .wrap(Wrap { trim: true })
    }
}
