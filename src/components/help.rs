// ABOUTME: Help overlay component displaying keyboard shortcuts and commands

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem},
};

use super::form::centered_rect;

pub struct HelpComponent;

impl HelpComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);

        frame.render_widget(Clear, popup_area);

        let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let help_items = vec![
            ListItem::new("Screens:").style(heading),
            ListItem::new("  F2         Upload files anonymously"),
            ListItem::new("  F3         Find files by access code"),
            ListItem::new("  F4         Box (PIN-protected workspace)"),
            ListItem::new("  F5         Admin"),
            ListItem::new(""),
            ListItem::new("Forms:").style(heading),
            ListItem::new("  Tab/S-Tab  Next / previous field"),
            ListItem::new("  Enter      Activate the focused field"),
            ListItem::new("  ↑/↓        Move through lists"),
            ListItem::new("  Del        Remove or delete the selected item"),
            ListItem::new(""),
            ListItem::new("Actions:").style(heading),
            ListItem::new("  Ctrl+S     Submit (upload, search, login)"),
            ListItem::new("  Ctrl+D     Download the selected file"),
            ListItem::new("  Ctrl+T     Switch box login / create"),
            ListItem::new("  Ctrl+R     Refresh"),
            ListItem::new("  Ctrl+L     Log out"),
            ListItem::new(""),
            ListItem::new("General:").style(heading),
            ListItem::new("  F1         Toggle this help"),
            ListItem::new("  Esc        Dismiss newest notification / cancel"),
            ListItem::new("  Ctrl+C/Q   Quit"),
        ];

        let help_list = List::new(help_items).block(
            Block::default()
                .title("Help - Press F1 or Esc to close")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(help_list, popup_area);
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}
