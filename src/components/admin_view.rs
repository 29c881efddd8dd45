// ABOUTME: Admin screen: local credential login, then uploads and boxes listings
// Only the main role sees access codes; PINs are always masked

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs},
};

use super::form::{busy_line, text_field};
use crate::app::state::AdminField;
use crate::app::AppState;
use crate::lifecycle::{AdminListing, RequestKind};

#[derive(Default)]
pub struct AdminViewComponent {
    table_state: TableState,
}

impl AdminViewComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if state.admin.is_logged_in() {
            self.render_listing(frame, area, state);
        } else {
            Self::render_login(frame, area, state);
        }
    }

    fn render_login(frame: &mut Frame, area: Rect, state: &AppState) {
        let admin = &state.admin;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        frame.render_widget(
            text_field("Username", &admin.username, admin.focus == AdminField::Username, false),
            chunks[0],
        );
        frame.render_widget(
            text_field("Password", &admin.password, admin.focus == AdminField::Password, true),
            chunks[1],
        );
        frame.render_widget(
            Paragraph::new("Enter logs in · identities come from admin.toml or the environment")
                .style(Style::default().fg(Color::Gray)),
            chunks[2],
        );
    }

    fn render_listing(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let admin = &state.admin;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(4), Constraint::Length(1)])
            .split(area);

        let role = admin.role.map_or("", |r| r.label());
        let tabs = Tabs::new(vec![AdminListing::Uploads.title(), AdminListing::Workspaces.title()])
            .select(match admin.tab {
                AdminListing::Uploads => 0,
                AdminListing::Workspaces => 1,
            })
            .block(
                Block::default()
                    .title(format!("Admin · {} ({})", admin.username.trim(), role))
                    .borders(Borders::ALL),
            )
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, chunks[0]);

        let show_codes = admin.role.is_some_and(|r| r.can_see_codes());
        let table = match admin.tab {
            AdminListing::Uploads => {
                let rows: Vec<Row> = admin
                    .uploads
                    .iter()
                    .map(|u| {
                        let code = if show_codes { u.code.clone() } else { "••••••".to_string() };
                        Row::new(vec![
                            Cell::from(code),
                            Cell::from(u.name.clone()),
                            Cell::from(u.file_names()),
                            Cell::from(u.date_label()),
                        ])
                    })
                    .collect();
                Table::new(
                    rows,
                    [
                        Constraint::Length(8),
                        Constraint::Length(20),
                        Constraint::Min(20),
                        Constraint::Length(12),
                    ],
                )
                .header(Row::new(vec!["Code", "Name", "Files", "Date"]).style(Style::default().fg(Color::Yellow)))
            }
            AdminListing::Workspaces => {
                let rows: Vec<Row> = admin
                    .workspaces
                    .iter()
                    .map(|w| {
                        Row::new(vec![
                            Cell::from(w.box_name.clone()),
                            Cell::from("•".repeat(w.pin.chars().count().max(4))),
                            Cell::from(w.files.len().to_string()),
                            Cell::from(w.created_label()),
                        ])
                    })
                    .collect();
                Table::new(
                    rows,
                    [
                        Constraint::Min(20),
                        Constraint::Length(8),
                        Constraint::Length(7),
                        Constraint::Length(12),
                    ],
                )
                .header(Row::new(vec!["Box", "PIN", "Files", "Created"]).style(Style::default().fg(Color::Yellow)))
            }
        };
        let table = table
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");
        self.table_state.select(admin.selected);
        frame.render_stateful_widget(table, chunks[1], &mut self.table_state);

        let hint = if state.is_busy(RequestKind::AdminList) || state.is_busy(RequestKind::AdminDelete) {
            busy_line("Working")
        } else if admin.can_delete() {
            Line::from("Tab switches list · Del deletes · Ctrl+R reloads · Ctrl+L logs out")
        } else {
            Line::from("Read-only · Tab switches list · Ctrl+R reloads · Ctrl+L logs out")
        };
        frame.render_widget(Paragraph::new(hint).style(Style::default().fg(Color::Gray)), chunks[2]);
    }
}
