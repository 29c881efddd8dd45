// ABOUTME: Unit tests for event handling to ensure keyboard inputs map to correct app actions

use fylshare::app::state::{AsyncAction, ConfirmAction, SearchField};
use fylshare::app::{AppEvent, AppState, EventHandler, View};
use fylshare::config::AdminRole;
use fylshare::lifecycle::{AdminListing, AdminTarget};
use fylshare::models::UploadSummary;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn create_key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn create_key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn press(state: &mut AppState, code: KeyCode) {
    if let Some(event) = EventHandler::handle_key_event(create_key_event(code), state) {
        EventHandler::process_event(event, state);
    }
}

fn press_ctrl(state: &mut AppState, ch: char) {
    let key = create_key_event_with_modifiers(KeyCode::Char(ch), KeyModifiers::CONTROL);
    if let Some(event) = EventHandler::handle_key_event(key, state) {
        EventHandler::process_event(event, state);
    }
}

fn type_text(state: &mut AppState, text: &str) {
    for ch in text.chars() {
        press(state, KeyCode::Char(ch));
    }
}

#[test]
fn test_quit_key_events() {
    let mut state = AppState::default();

    let quit_event1 = EventHandler::handle_key_event(
        create_key_event_with_modifiers(KeyCode::Char('q'), KeyModifiers::CONTROL),
        &mut state,
    );
    assert_eq!(quit_event1, Some(AppEvent::Quit));

    let quit_event2 = EventHandler::handle_key_event(
        create_key_event_with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL),
        &mut state,
    );
    assert_eq!(quit_event2, Some(AppEvent::Quit));

    // Plain letters are text input, not shortcuts
    let typed = EventHandler::handle_key_event(create_key_event(KeyCode::Char('q')), &mut state);
    assert_eq!(typed, Some(AppEvent::InputChar('q')));
}

#[test]
fn test_function_keys_switch_views() {
    let mut state = AppState::default();

    press(&mut state, KeyCode::F(3));
    assert_eq!(state.current_view, View::Search);
    assert_eq!(state.pending_async_action, Some(AsyncAction::ViewChanged));

    press(&mut state, KeyCode::F(4));
    assert_eq!(state.current_view, View::Workspace);

    press(&mut state, KeyCode::F(5));
    assert_eq!(state.current_view, View::Admin);

    press(&mut state, KeyCode::F(2));
    assert_eq!(state.current_view, View::Upload);
}

#[test]
fn test_search_code_entry_and_submit() {
    let mut state = AppState::default();
    press(&mut state, KeyCode::F(3));
    state.pending_async_action = None;

    type_text(&mut state, "1234567");
    press(&mut state, KeyCode::Backspace);
    assert_eq!(state.search.code, "123456");
    assert_eq!(state.search.focus, SearchField::Code);

    press(&mut state, KeyCode::Enter);
    assert_eq!(state.pending_async_action, Some(AsyncAction::Search("123456".to_string())));
}

#[test]
fn test_ctrl_s_submits_the_upload_form() {
    let mut state = AppState::default();
    type_text(&mut state, "Bob");
    press_ctrl(&mut state, 's');

    assert_eq!(state.upload.name, "Bob");
    assert_eq!(state.pending_async_action, Some(AsyncAction::SubmitUpload));
}

#[test]
fn test_box_pin_entry_and_mode_toggle() {
    let mut state = AppState::default();
    press(&mut state, KeyCode::F(4));

    type_text(&mut state, "Team");
    press(&mut state, KeyCode::Tab);
    type_text(&mut state, "4321");
    press_ctrl(&mut state, 't');

    assert_eq!(state.workspace.box_name, "Team");
    assert_eq!(state.workspace.pin, "4321");
    assert_eq!(state.workspace.mode, fylshare::models::BoxAuthMode::Create);

    press(&mut state, KeyCode::Enter);
    assert_eq!(state.pending_async_action, Some(AsyncAction::BoxAuth));
}

#[test]
fn test_help_key_event() {
    let mut state = AppState::default();

    let help_event = EventHandler::handle_key_event(create_key_event(KeyCode::F(1)), &mut state);
    assert_eq!(help_event, Some(AppEvent::ToggleHelp));
}

#[test]
fn test_help_visible_only_responds_to_help_and_esc() {
    let mut state = AppState::default();
    state.help_visible = true;

    let help_event = EventHandler::handle_key_event(create_key_event(KeyCode::F(1)), &mut state);
    assert!(help_event.is_some());

    let esc_event = EventHandler::handle_key_event(create_key_event(KeyCode::Esc), &mut state);
    assert!(esc_event.is_some());

    let other_event = EventHandler::handle_key_event(create_key_event(KeyCode::Char('j')), &mut state);
    assert!(other_event.is_none());
}

#[test]
fn test_esc_dismisses_the_latest_notification() {
    let mut state = AppState::default();
    press(&mut state, KeyCode::Esc);
    assert_eq!(state.pending_async_action, Some(AsyncAction::DismissNotification));
}

fn main_admin_with_one_upload() -> AppState {
    let mut state = AppState::default();
    state.current_view = View::Admin;
    state.admin.role = Some(AdminRole::Main);
    state.admin.tab = AdminListing::Uploads;
    state.admin.uploads = vec![UploadSummary {
        code: "123456".to_string(),
        name: "Nobitha".to_string(),
        files: Vec::new(),
        date: None,
    }];
    state.admin.selected = Some(0);
    state
}

#[test]
fn test_admin_delete_goes_through_the_confirmation_dialog() {
    let mut state = main_admin_with_one_upload();

    press(&mut state, KeyCode::Delete);
    let dialog = state.confirmation_dialog.as_ref().expect("dialog opened");
    assert_eq!(
        dialog.confirm_action,
        ConfirmAction::AdminDelete(AdminTarget::Upload("123456".to_string()))
    );
    assert!(!dialog.selected_option);

    // Enter on the default "No" closes without deleting
    press(&mut state, KeyCode::Enter);
    assert!(state.confirmation_dialog.is_none());
    assert_eq!(state.pending_async_action, None);

    press(&mut state, KeyCode::Delete);
    press(&mut state, KeyCode::Right);
    press(&mut state, KeyCode::Enter);
    assert_eq!(
        state.pending_async_action,
        Some(AsyncAction::AdminDelete(AdminTarget::Upload("123456".to_string())))
    );
}

#[test]
fn test_team_admin_cannot_open_a_delete_dialog() {
    let mut state = main_admin_with_one_upload();
    state.admin.role = Some(AdminRole::Team);

    press(&mut state, KeyCode::Delete);
    assert!(state.confirmation_dialog.is_none());
}

#[test]
fn test_dialog_swallows_other_keys() {
    let mut state = main_admin_with_one_upload();
    press(&mut state, KeyCode::Delete);

    let ignored = EventHandler::handle_key_event(create_key_event(KeyCode::Char('x')), &mut state);
    assert!(ignored.is_none());

    press(&mut state, KeyCode::Esc);
    assert!(state.confirmation_dialog.is_none());
}

#[test]
fn test_tab_on_admin_switches_listing_and_reloads() {
    let mut state = main_admin_with_one_upload();
    press(&mut state, KeyCode::Tab);

    assert_eq!(state.admin.tab, AdminListing::Workspaces);
    assert_eq!(
        state.pending_async_action,
        Some(AsyncAction::AdminLoad(AdminListing::Workspaces))
    );
}

#[test]
fn test_unknown_key_returns_none() {
    let mut state = AppState::default();

    let unknown_f_key = EventHandler::handle_key_event(create_key_event(KeyCode::F(9)), &mut state);
    assert!(unknown_f_key.is_none());

    let unknown_ctrl = EventHandler::handle_key_event(
        create_key_event_with_modifiers(KeyCode::Char('x'), KeyModifiers::CONTROL),
        &mut state,
    );
    assert!(unknown_ctrl.is_none());
}

#[test]
fn test_process_quit_event() {
    let mut state = AppState::default();

    assert!(!state.should_quit);
    press_ctrl(&mut state, 'q');
    assert!(state.should_quit);
}

#[test]
fn test_process_help_toggle_event() {
    let mut state = AppState::default();

    assert!(!state.help_visible);
    press(&mut state, KeyCode::F(1));
    assert!(state.help_visible);
}
