// ABOUTME: Application state management and view switching logic
// Pure UI state; network work is requested through pending_async_action and applied by App

use crate::config::AdminRole;
use crate::lifecycle::{AdminCatalog, AdminListing, AdminTarget, RequestKind};
use crate::models::{
    total_size, AccessCode, BoxAuthMode, BoxCredentials, BoxFile, FilePackage, UploadFile, UploadReceipt,
    UploadSummary, WorkspaceSummary,
};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Upload,
    Search,
    Workspace,
    Admin,
}

impl View {
    pub const ALL: [View; 4] = [View::Upload, View::Search, View::Workspace, View::Admin];

    pub fn title(&self) -> &'static str {
        match self {
            View::Upload => "Upload",
            View::Search => "Search",
            View::Workspace => "Box",
            View::Admin => "Admin",
        }
    }

    pub fn key_hint(&self) -> &'static str {
        match self {
            View::Upload => "F2",
            View::Search => "F3",
            View::Workspace => "F4",
            View::Admin => "F5",
        }
    }
}

/// Work the event handler cannot do on its own: anything that touches the
/// network, the filesystem, the clipboard or the notification stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncAction {
    AddUploadFile(PathBuf),
    SubmitUpload,
    Search(String),
    Download { file_name: String, url: String },
    BoxAuth,
    AddBoxFile(PathBuf),
    SubmitBoxUpload,
    DeleteBoxFile(String),
    AdminLogin,
    AdminLoad(AdminListing),
    AdminDelete(AdminTarget),
    DismissNotification,
    ViewChanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteBoxFile(String),
    AdminDelete(AdminTarget),
}

#[derive(Debug, Clone)]
pub struct ConfirmationDialog {
    pub title: String,
    pub message: String,
    pub confirm_action: ConfirmAction,
    /// true = Yes
    pub selected_option: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadField {
    #[default]
    Name,
    Path,
    Files,
}

#[derive(Debug, Default)]
pub struct UploadState {
    pub name: String,
    pub path_input: String,
    pub files: Vec<UploadFile>,
    pub focus: UploadField,
    pub selected_file: Option<usize>,
    pub receipt: Option<UploadReceipt>,
    pub code_copied: bool,
}

impl UploadState {
    pub fn total_size(&self) -> u64 {
        total_size(&self.files)
    }

    pub fn last_code(&self) -> Option<&AccessCode> {
        self.receipt.as_ref().map(|r| &r.code)
    }

    fn next_field(&mut self) {
        self.focus = match self.focus {
            UploadField::Name => UploadField::Path,
            UploadField::Path => UploadField::Files,
            UploadField::Files => UploadField::Name,
        };
    }

    fn previous_field(&mut self) {
        self.focus = match self.focus {
            UploadField::Name => UploadField::Files,
            UploadField::Path => UploadField::Name,
            UploadField::Files => UploadField::Path,
        };
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            UploadField::Name => Some(&mut self.name),
            UploadField::Path => Some(&mut self.path_input),
            UploadField::Files => None,
        }
    }

    pub fn remove_selected(&mut self) -> Option<UploadFile> {
        let idx = self.selected_file?;
        if idx >= self.files.len() {
            return None;
        }
        let removed = self.files.remove(idx);
        self.selected_file = clamp_selection(idx, self.files.len());
        Some(removed)
    }

    /// Clears the form after a successful upload, keeping the receipt.
    pub fn clear_form(&mut self) {
        self.name.clear();
        self.path_input.clear();
        self.files.clear();
        self.selected_file = None;
        self.focus = UploadField::Name;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Code,
    Files,
}

#[derive(Debug, Default)]
pub struct SearchState {
    pub code: String,
    pub focus: SearchField,
    pub package: Option<FilePackage>,
    pub selected_file: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkspaceField {
    #[default]
    BoxName,
    Pin,
    Path,
    Files,
}

#[derive(Debug, Default)]
pub struct WorkspaceState {
    pub mode: BoxAuthMode,
    pub box_name: String,
    pub pin: String,
    pub focus: WorkspaceField,
    /// Set once login or creation succeeded.
    pub session: Option<BoxCredentials>,
    pub files: Vec<BoxFile>,
    pub selected_file: Option<usize>,
    pub path_input: String,
    pub pending_files: Vec<UploadFile>,
}

impl WorkspaceState {
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn credentials(&self) -> BoxCredentials {
        BoxCredentials::new(self.box_name.trim(), self.pin.trim())
    }

    pub fn selected(&self) -> Option<&BoxFile> {
        self.files.get(self.selected_file?)
    }

    pub fn open(&mut self, credentials: BoxCredentials, files: Vec<BoxFile>) {
        self.session = Some(credentials);
        self.set_files(files);
        self.pin.clear();
        self.focus = WorkspaceField::Path;
    }

    pub fn set_files(&mut self, files: Vec<BoxFile>) {
        self.selected_file = if files.is_empty() {
            None
        } else {
            Some(self.selected_file.unwrap_or(0).min(files.len() - 1))
        };
        self.files = files;
    }

    pub fn logout(&mut self) {
        let mode = self.mode;
        *self = Self::default();
        self.mode = mode;
    }

    fn next_field(&mut self) {
        self.focus = match (self.is_open(), self.focus) {
            (false, WorkspaceField::BoxName) => WorkspaceField::Pin,
            (false, _) => WorkspaceField::BoxName,
            (true, WorkspaceField::Path) => WorkspaceField::Files,
            (true, _) => WorkspaceField::Path,
        };
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            WorkspaceField::BoxName if !self.is_open() => Some(&mut self.box_name),
            WorkspaceField::Pin if !self.is_open() => Some(&mut self.pin),
            WorkspaceField::Path if self.is_open() => Some(&mut self.path_input),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Default)]
pub struct AdminState {
    pub username: String,
    pub password: String,
    pub focus: AdminField,
    pub role: Option<AdminRole>,
    pub tab: AdminListing,
    pub uploads: Vec<UploadSummary>,
    pub workspaces: Vec<WorkspaceSummary>,
    pub selected: Option<usize>,
}

impl AdminState {
    pub fn is_logged_in(&self) -> bool {
        self.role.is_some()
    }

    pub fn can_delete(&self) -> bool {
        self.role.is_some_and(|r| r.can_delete())
    }

    pub fn row_count(&self) -> usize {
        match self.tab {
            AdminListing::Uploads => self.uploads.len(),
            AdminListing::Workspaces => self.workspaces.len(),
        }
    }

    pub fn apply_catalog(&mut self, catalog: AdminCatalog) {
        match catalog {
            AdminCatalog::Uploads(rows) => self.uploads = rows,
            AdminCatalog::Workspaces(rows) => self.workspaces = rows,
        }
        self.selected = clamp_selection(self.selected.unwrap_or(0), self.row_count());
    }

    pub fn selected_target(&self) -> Option<AdminTarget> {
        let idx = self.selected?;
        match self.tab {
            AdminListing::Uploads => self.uploads.get(idx).map(|u| AdminTarget::Upload(u.code.clone())),
            AdminListing::Workspaces => self
                .workspaces
                .get(idx)
                .map(|w| AdminTarget::Workspace(w.box_name.clone())),
        }
    }

    /// Drops a deleted row without waiting for the reload.
    pub fn remove_target(&mut self, target: &AdminTarget) {
        match target {
            AdminTarget::Upload(code) => self.uploads.retain(|u| &u.code != code),
            AdminTarget::Workspace(name) => self.workspaces.retain(|w| &w.box_name != name),
        }
        self.selected = self.selected.and_then(|idx| clamp_selection(idx, self.row_count()));
    }

    pub fn logout(&mut self) {
        *self = Self::default();
    }
}

fn clamp_selection(idx: usize, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(idx.min(len - 1))
    }
}

fn step_selection(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.unwrap_or(0);
    Some(if forward {
        (current + 1) % len
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    })
}

#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub should_quit: bool,
    pub help_visible: bool,
    pub upload: UploadState,
    pub search: SearchState,
    pub workspace: WorkspaceState,
    pub admin: AdminState,
    pub confirmation_dialog: Option<ConfirmationDialog>,
    pub pending_async_action: Option<AsyncAction>,
    /// Request kinds currently waiting on the network.
    pub in_flight: HashSet<RequestKind>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self, kind: RequestKind) -> bool {
        self.in_flight.contains(&kind)
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn switch_view(&mut self, view: View) {
        if self.current_view == view {
            return;
        }
        self.current_view = view;
        self.confirmation_dialog = None;
        self.pending_async_action = Some(AsyncAction::ViewChanged);
    }

    pub fn next_field(&mut self) {
        match self.current_view {
            View::Upload => self.upload.next_field(),
            View::Search => {
                self.search.focus = match self.search.focus {
                    SearchField::Code if self.search.package.is_some() => SearchField::Files,
                    _ => SearchField::Code,
                };
            }
            View::Workspace => self.workspace.next_field(),
            View::Admin => {
                if self.admin.is_logged_in() {
                    self.admin.tab = self.admin.tab.toggle();
                    self.admin.selected = clamp_selection(0, self.admin.row_count());
                    self.pending_async_action = Some(AsyncAction::AdminLoad(self.admin.tab));
                } else {
                    self.admin.focus = match self.admin.focus {
                        AdminField::Username => AdminField::Password,
                        AdminField::Password => AdminField::Username,
                    };
                }
            }
        }
    }

    pub fn previous_field(&mut self) {
        match self.current_view {
            View::Upload => self.upload.previous_field(),
            // Two-field cycles read the same in both directions.
            _ => self.next_field(),
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.current_view {
            View::Upload => self.upload.focused_text(),
            View::Search => match self.search.focus {
                SearchField::Code => Some(&mut self.search.code),
                SearchField::Files => None,
            },
            View::Workspace => self.workspace.focused_text(),
            View::Admin if !self.admin.is_logged_in() => match self.admin.focus {
                AdminField::Username => Some(&mut self.admin.username),
                AdminField::Password => Some(&mut self.admin.password),
            },
            View::Admin => None,
        }
    }

    pub fn input_char(&mut self, ch: char) {
        if let Some(text) = self.focused_text() {
            text.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    pub fn select_next(&mut self) {
        self.step(true);
    }

    pub fn select_previous(&mut self) {
        self.step(false);
    }

    fn step(&mut self, forward: bool) {
        match self.current_view {
            View::Upload => {
                let len = self.upload.files.len();
                self.upload.selected_file = step_selection(self.upload.selected_file, len, forward);
            }
            View::Search => {
                let len = self.search.package.as_ref().map_or(0, |p| p.files.len());
                self.search.selected_file = step_selection(self.search.selected_file, len, forward);
            }
            View::Workspace => {
                let len = self.workspace.files.len();
                self.workspace.selected_file = step_selection(self.workspace.selected_file, len, forward);
            }
            View::Admin => {
                let len = self.admin.row_count();
                self.admin.selected = step_selection(self.admin.selected, len, forward);
            }
        }
    }

    /// Enter: moves along the form or triggers the focused field's action.
    pub fn activate(&mut self) {
        let action = match self.current_view {
            View::Upload => match self.upload.focus {
                UploadField::Name => {
                    self.upload.focus = UploadField::Path;
                    None
                }
                UploadField::Path => take_path(&mut self.upload.path_input).map(AsyncAction::AddUploadFile),
                UploadField::Files => Some(AsyncAction::SubmitUpload),
            },
            View::Search => match self.search.focus {
                SearchField::Code => Some(AsyncAction::Search(self.search.code.clone())),
                SearchField::Files => self.selected_search_download(),
            },
            View::Workspace if !self.workspace.is_open() => match self.workspace.focus {
                WorkspaceField::BoxName => {
                    self.workspace.focus = WorkspaceField::Pin;
                    None
                }
                _ => Some(AsyncAction::BoxAuth),
            },
            View::Workspace => match self.workspace.focus {
                WorkspaceField::Path => take_path(&mut self.workspace.path_input).map(AsyncAction::AddBoxFile),
                _ => self.selected_box_download(),
            },
            View::Admin if !self.admin.is_logged_in() => match self.admin.focus {
                AdminField::Username => {
                    self.admin.focus = AdminField::Password;
                    None
                }
                AdminField::Password => Some(AsyncAction::AdminLogin),
            },
            View::Admin => None,
        };
        if action.is_some() {
            self.pending_async_action = action;
        }
    }

    /// Ctrl+S: sends the current upload batch.
    pub fn submit(&mut self) {
        self.pending_async_action = match self.current_view {
            View::Upload => Some(AsyncAction::SubmitUpload),
            View::Workspace if self.workspace.is_open() => Some(AsyncAction::SubmitBoxUpload),
            View::Workspace => Some(AsyncAction::BoxAuth),
            View::Search => Some(AsyncAction::Search(self.search.code.clone())),
            View::Admin => return,
        };
    }

    pub fn download_selected(&mut self) {
        let action = match self.current_view {
            View::Search => self.selected_search_download(),
            View::Workspace => self.selected_box_download(),
            _ => None,
        };
        if action.is_some() {
            self.pending_async_action = action;
        }
    }

    fn selected_search_download(&self) -> Option<AsyncAction> {
        let package = self.search.package.as_ref()?;
        let file = package.files.get(self.search.selected_file?)?;
        Some(AsyncAction::Download {
            file_name: file.name.clone(),
            url: file.url.clone(),
        })
    }

    fn selected_box_download(&self) -> Option<AsyncAction> {
        let file = self.workspace.selected()?;
        Some(AsyncAction::Download {
            file_name: file.name.clone(),
            url: file.url.clone()?,
        })
    }

    /// Delete key: removes a pending upload file, or asks before deleting
    /// something on the server.
    pub fn delete_selected(&mut self) {
        match self.current_view {
            View::Upload => {
                self.upload.remove_selected();
            }
            View::Workspace if self.workspace.focus == WorkspaceField::Files => {
                if let Some(file) = self.workspace.selected() {
                    let Some(code) = file.code.clone() else {
                        return;
                    };
                    self.confirmation_dialog = Some(ConfirmationDialog {
                        title: "Delete file".to_string(),
                        message: format!("Delete \"{}\" from this box?", file.name),
                        confirm_action: ConfirmAction::DeleteBoxFile(code),
                        selected_option: false,
                    });
                }
            }
            View::Admin if self.admin.can_delete() => {
                if let Some(target) = self.admin.selected_target() {
                    let message = match &target {
                        AdminTarget::Upload(code) => format!("Delete upload {code}?"),
                        AdminTarget::Workspace(name) => format!("Delete box \"{name}\" and all of its files?"),
                    };
                    self.confirmation_dialog = Some(ConfirmationDialog {
                        title: "Confirm delete".to_string(),
                        message,
                        confirm_action: ConfirmAction::AdminDelete(target),
                        selected_option: false,
                    });
                }
            }
            _ => {}
        }
    }

    pub fn toggle_mode(&mut self) {
        if self.current_view == View::Workspace && !self.workspace.is_open() {
            self.workspace.mode = self.workspace.mode.toggle();
        }
    }

    pub fn refresh(&mut self) {
        match self.current_view {
            View::Workspace if self.workspace.is_open() => {
                // Re-authenticating returns the current listing.
                if let Some(session) = self.workspace.session.clone() {
                    self.workspace.box_name = session.box_name;
                    self.workspace.pin = session.pin;
                    self.workspace.mode = BoxAuthMode::Login;
                    self.pending_async_action = Some(AsyncAction::BoxAuth);
                }
            }
            View::Admin if self.admin.is_logged_in() => {
                self.pending_async_action = Some(AsyncAction::AdminLoad(self.admin.tab));
            }
            _ => {}
        }
    }

    pub fn logout(&mut self) {
        match self.current_view {
            View::Workspace => self.workspace.logout(),
            View::Admin => self.admin.logout(),
            _ => {}
        }
    }

    pub fn confirm_dialog(&mut self) {
        if let Some(dialog) = self.confirmation_dialog.take() {
            if dialog.selected_option {
                self.pending_async_action = Some(match dialog.confirm_action {
                    ConfirmAction::DeleteBoxFile(code) => AsyncAction::DeleteBoxFile(code),
                    ConfirmAction::AdminDelete(target) => AsyncAction::AdminDelete(target),
                });
            }
        }
    }
}

fn take_path(input: &mut String) -> Option<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let path = PathBuf::from(trimmed);
    input.clear();
    Some(path)
}
