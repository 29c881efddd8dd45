// ABOUTME: Event handling system for keyboard input and app actions

use crate::app::state::{AppState, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    SwitchView(View),
    NextField,
    PreviousField,
    InputChar(char),
    Backspace,
    Activate,
    Submit,
    SelectNext,
    SelectPrevious,
    DeleteSelected,
    Download,
    Refresh,
    ToggleMode,
    Logout,
    DismissNotification,
    // Confirmation dialog events
    ConfirmationToggle,
    ConfirmationConfirm,
    ConfirmationCancel,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        // Quit works from anywhere, dialogs included
        if ctrl && matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            return Some(AppEvent::Quit);
        }

        if state.confirmation_dialog.is_some() {
            return match key_event.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => Some(AppEvent::ConfirmationToggle),
                KeyCode::Enter => Some(AppEvent::ConfirmationConfirm),
                KeyCode::Esc | KeyCode::Char('n') => Some(AppEvent::ConfirmationCancel),
                _ => None,
            };
        }

        if state.help_visible {
            return match key_event.code {
                KeyCode::F(1) | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        if ctrl {
            return match key_event.code {
                KeyCode::Char('s') => Some(AppEvent::Submit),
                KeyCode::Char('d') => Some(AppEvent::Download),
                KeyCode::Char('r') => Some(AppEvent::Refresh),
                KeyCode::Char('t') => Some(AppEvent::ToggleMode),
                KeyCode::Char('l') => Some(AppEvent::Logout),
                _ => None,
            };
        }

        match key_event.code {
            KeyCode::F(1) => Some(AppEvent::ToggleHelp),
            KeyCode::F(2) => Some(AppEvent::SwitchView(View::Upload)),
            KeyCode::F(3) => Some(AppEvent::SwitchView(View::Search)),
            KeyCode::F(4) => Some(AppEvent::SwitchView(View::Workspace)),
            KeyCode::F(5) => Some(AppEvent::SwitchView(View::Admin)),
            KeyCode::Tab => Some(AppEvent::NextField),
            KeyCode::BackTab => Some(AppEvent::PreviousField),
            KeyCode::Enter => Some(AppEvent::Activate),
            KeyCode::Esc => Some(AppEvent::DismissNotification),
            KeyCode::Down => Some(AppEvent::SelectNext),
            KeyCode::Up => Some(AppEvent::SelectPrevious),
            KeyCode::Delete => Some(AppEvent::DeleteSelected),
            KeyCode::Backspace => Some(AppEvent::Backspace),
            KeyCode::Char(ch) => Some(AppEvent::InputChar(ch)),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        use crate::app::state::AsyncAction;

        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::ToggleHelp => state.toggle_help(),
            AppEvent::SwitchView(view) => state.switch_view(view),
            AppEvent::NextField => state.next_field(),
            AppEvent::PreviousField => state.previous_field(),
            AppEvent::InputChar(ch) => state.input_char(ch),
            AppEvent::Backspace => state.backspace(),
            AppEvent::Activate => state.activate(),
            AppEvent::Submit => state.submit(),
            AppEvent::SelectNext => state.select_next(),
            AppEvent::SelectPrevious => state.select_previous(),
            AppEvent::DeleteSelected => state.delete_selected(),
            AppEvent::Download => state.download_selected(),
            AppEvent::Refresh => state.refresh(),
            AppEvent::ToggleMode => state.toggle_mode(),
            AppEvent::Logout => state.logout(),
            AppEvent::DismissNotification => {
                state.pending_async_action = Some(AsyncAction::DismissNotification);
            }
            AppEvent::ConfirmationToggle => {
                if let Some(ref mut dialog) = state.confirmation_dialog {
                    dialog.selected_option = !dialog.selected_option;
                }
            }
            AppEvent::ConfirmationConfirm => state.confirm_dialog(),
            AppEvent::ConfirmationCancel => {
                state.confirmation_dialog = None;
            }
        }
    }
}
