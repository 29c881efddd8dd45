// ABOUTME: Main layout component: screen tabs, the active view, bottom menu bar and overlays

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use super::{
    AdminViewComponent, ConfirmationDialogComponent, HelpComponent, SearchViewComponent, ToastComponent,
    UploadViewComponent, WorkspaceViewComponent,
};
use crate::app::{AppState, View};
use crate::notification::Notification;

pub struct LayoutComponent {
    upload: UploadViewComponent,
    search: SearchViewComponent,
    workspace: WorkspaceViewComponent,
    admin: AdminViewComponent,
    help: HelpComponent,
    confirmation_dialog: ConfirmationDialogComponent,
    toasts: ToastComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            upload: UploadViewComponent::new(),
            search: SearchViewComponent::new(),
            workspace: WorkspaceViewComponent::new(),
            admin: AdminViewComponent::new(),
            help: HelpComponent::new(),
            confirmation_dialog: ConfirmationDialogComponent::new(),
            toasts: ToastComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState, toasts: &[Notification]) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Screen tabs
                Constraint::Min(0),    // Main content
                Constraint::Length(3), // Bottom menu bar
            ])
            .split(frame.size());

        self.render_tabs(frame, main_chunks[0], state.current_view);

        let content = main_chunks[1].inner(&Margin {
            horizontal: 1,
            vertical: 0,
        });
        match state.current_view {
            View::Upload => self.upload.render(frame, content, state),
            View::Search => self.search.render(frame, content, state),
            View::Workspace => self.workspace.render(frame, content, state),
            View::Admin => self.admin.render(frame, content, state),
        }

        self.render_menu_bar(frame, main_chunks[2], state.current_view);

        if state.help_visible {
            self.help.render(frame, frame.size());
        }

        if let Some(dialog) = &state.confirmation_dialog {
            self.confirmation_dialog.render(frame, frame.size(), dialog);
        }

        // Toasts stay visible above every overlay
        self.toasts.render(frame, main_chunks[1], toasts);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect, current: View) {
        let titles: Vec<String> = View::ALL
            .iter()
            .map(|v| format!("{} {}", v.key_hint(), v.title()))
            .collect();
        let selected = View::ALL.iter().position(|v| *v == current).unwrap_or(0);

        let tabs = Tabs::new(titles)
            .select(selected)
            .block(
                Block::default()
                    .title("FylShare")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, area);
    }

    fn render_menu_bar(&self, frame: &mut Frame, area: Rect, current: View) {
        let menu_text = match current {
            View::Upload => "[Tab]field [Enter]add file [Del]remove [Ctrl+S]upload [F1]help [Ctrl+Q]quit",
            View::Search => "[Enter]search [Tab]files [Ctrl+D]download [F1]help [Ctrl+Q]quit",
            View::Workspace => "[Tab]field [Enter]submit [Ctrl+T]login/create [Ctrl+S]upload [F1]help [Ctrl+Q]quit",
            View::Admin => "[Tab]field/list [Enter]login [Del]delete [Ctrl+R]reload [F1]help [Ctrl+Q]quit",
        };

        let menu = Paragraph::new(menu_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);

        frame.render_widget(menu, area);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
