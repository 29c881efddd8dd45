// ABOUTME: App ties the UI state to the request controllers and the notification stack
// tick() runs queued actions, applies finished attempts and advances toast decay

use super::actions::ActionSlot;
use super::state::{AppState, AsyncAction, View};
use crate::api::Transport;
use crate::clock::Clock;
use crate::config::{AdminCredentials, AppConfig};
use crate::lifecycle::{
    AdminDeleteOperation, AdminListOperation, AdminListing, BoxAuthOperation, BoxFileDeleteOperation,
    BoxUploadOperation, DownloadOperation, DownloadRequest, Operation, Phase, RequestController, RequestKind,
    SearchOperation, UploadOperation,
};
use crate::models::{format_size, BoxAuthRequest, BoxFileDeleteRequest, BoxUploadRequest, UploadFile, UploadRequest};
use crate::notification::{Notification, NotificationManager, Severity, SharedNotifications};
use std::path::Path;
use std::sync::{Arc, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

struct Slots<T: Transport> {
    search: ActionSlot<SearchOperation, T>,
    upload: ActionSlot<UploadOperation, T>,
    box_auth: ActionSlot<BoxAuthOperation, T>,
    box_upload: ActionSlot<BoxUploadOperation, T>,
    box_delete: ActionSlot<BoxFileDeleteOperation, T>,
    admin_list: ActionSlot<AdminListOperation, T>,
    admin_delete: ActionSlot<AdminDeleteOperation, T>,
    download: ActionSlot<DownloadOperation, T>,
}

impl<T: Transport> Slots<T> {
    fn new(config: &AppConfig, transport: &Arc<T>, notifications: &SharedNotifications) -> Self {
        let toasts = &config.notifications;
        let slot = |duration| (Arc::clone(transport), Arc::clone(notifications), duration);

        Self {
            search: bind(SearchOperation, slot(toasts.search())),
            upload: bind(UploadOperation::new(config.upload.max_total_bytes), slot(toasts.upload())),
            box_auth: bind(BoxAuthOperation, slot(toasts.workspace())),
            box_upload: bind(BoxUploadOperation, slot(toasts.workspace())),
            box_delete: bind(BoxFileDeleteOperation, slot(toasts.workspace())),
            admin_list: bind(AdminListOperation, slot(toasts.admin())),
            admin_delete: bind(AdminDeleteOperation, slot(toasts.admin())),
            download: bind(DownloadOperation, slot(toasts.workspace())),
        }
    }

    fn in_flight(&self) -> Vec<RequestKind> {
        [
            (RequestKind::Search, self.search.phase()),
            (RequestKind::Upload, self.upload.phase()),
            (RequestKind::BoxAuth, self.box_auth.phase()),
            (RequestKind::BoxUpload, self.box_upload.phase()),
            (RequestKind::BoxFileDelete, self.box_delete.phase()),
            (RequestKind::AdminList, self.admin_list.phase()),
            (RequestKind::AdminDelete, self.admin_delete.phase()),
            (RequestKind::Download, self.download.phase()),
        ]
        .into_iter()
        .filter(|(_, phase)| *phase == Phase::InFlight)
        .map(|(kind, _)| kind)
        .collect()
    }

    /// Slots still in flight, or holding a result not yet applied, refuse
    /// the reset and are picked up by a later tick.
    fn reset_idle(&mut self) {
        self.search.reset();
        self.upload.reset();
        self.box_auth.reset();
        self.box_upload.reset();
        self.box_delete.reset();
        self.admin_list.reset();
        self.admin_delete.reset();
        self.download.reset();
    }
}

fn bind<O: Operation, T: Transport>(
    operation: O,
    (transport, notifications, duration): (Arc<T>, SharedNotifications, Duration),
) -> ActionSlot<O, T> {
    ActionSlot::new(RequestController::new(operation, transport, notifications, duration))
}

pub struct App<T: Transport> {
    pub state: AppState,
    config: AppConfig,
    admin_credentials: AdminCredentials,
    notifications: SharedNotifications,
    slots: Slots<T>,
}

impl<T: Transport> App<T> {
    pub fn new(config: AppConfig, admin_credentials: AdminCredentials, transport: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        let notifications = NotificationManager::shared(clock);
        let slots = Slots::new(&config, &transport, &notifications);
        Self {
            state: AppState::new(),
            config,
            admin_credentials,
            notifications,
            slots,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn notifications(&self) -> &SharedNotifications {
        &self.notifications
    }

    pub fn current_view(&self) -> View {
        self.state.current_view
    }

    /// Snapshot of the toast stack for rendering, oldest first.
    pub fn toasts(&self) -> Vec<Notification> {
        self.lock_notifications().active().to_vec()
    }

    /// How long the event loop may block before the next toast step is due.
    pub fn poll_timeout(&self, ceiling: Duration) -> Duration {
        self.lock_notifications()
            .next_deadline()
            .map_or(ceiling, |deadline| deadline.min(ceiling))
    }

    pub async fn tick(&mut self) -> anyhow::Result<()> {
        self.apply_completed();

        if let Some(action) = self.state.pending_async_action.take() {
            self.process_async_action(action).await;
        }

        self.state.in_flight = self.slots.in_flight().into_iter().collect();
        let expired = self.lock_notifications().tick();
        if !expired.is_empty() {
            debug!("{} notifications expired", expired.len());
        }
        Ok(())
    }

    async fn process_async_action(&mut self, action: AsyncAction) {
        match action {
            AsyncAction::AddUploadFile(path) => self.add_upload_file(&path).await,
            AsyncAction::SubmitUpload => {
                let request = UploadRequest::new(self.state.upload.name.clone(), self.state.upload.files.clone());
                self.slots.upload.spawn(request);
            }
            AsyncAction::Search(code) => {
                self.slots.search.spawn(code);
            }
            AsyncAction::Download { file_name, url } => {
                self.slots.download.spawn(DownloadRequest {
                    file_name,
                    url,
                    directory: self.config.downloads.directory(),
                });
            }
            AsyncAction::BoxAuth => {
                self.slots.box_auth.spawn(BoxAuthRequest {
                    credentials: self.state.workspace.credentials(),
                    mode: self.state.workspace.mode,
                });
            }
            AsyncAction::AddBoxFile(path) => match UploadFile::from_path(&path).await {
                Ok(file) => self.state.workspace.pending_files.push(file),
                Err(e) => self.unreadable_file(&path, &e),
            },
            AsyncAction::SubmitBoxUpload => {
                if let Some(credentials) = self.state.workspace.session.clone() {
                    self.slots.box_upload.spawn(BoxUploadRequest {
                        credentials,
                        files: self.state.workspace.pending_files.clone(),
                    });
                }
            }
            AsyncAction::DeleteBoxFile(code) => {
                if let Some(credentials) = self.state.workspace.session.clone() {
                    self.slots.box_delete.spawn(BoxFileDeleteRequest { credentials, code });
                }
            }
            AsyncAction::AdminLogin => self.admin_login(),
            AsyncAction::AdminLoad(listing) => {
                if self.state.admin.is_logged_in() {
                    self.slots.admin_list.spawn(listing);
                }
            }
            AsyncAction::AdminDelete(target) => {
                if self.state.admin.can_delete() {
                    self.slots.admin_delete.spawn(target);
                } else {
                    warn!("Delete of {:?} refused for a read-only admin", target);
                    self.show("Read-only access", Severity::Warning, self.config.notifications.admin());
                }
            }
            AsyncAction::DismissNotification => {
                self.lock_notifications().dismiss_latest();
            }
            AsyncAction::ViewChanged => {
                self.apply_completed();
                self.lock_notifications().clear();
                self.slots.reset_idle();
            }
        }
    }

    async fn add_upload_file(&mut self, path: &Path) {
        let file = match UploadFile::from_path(path).await {
            Ok(file) => file,
            Err(e) => return self.unreadable_file(path, &e),
        };

        let limits = &self.config.upload;
        let duration = self.config.notifications.upload();
        if self.state.upload.files.len() >= limits.max_files {
            let text = format!("You can upload up to {} files", limits.max_files);
            self.show(text, Severity::Warning, duration);
            return;
        }
        if self.state.upload.total_size() + file.size > limits.max_total_bytes {
            self.show("Total upload limit is 1GB", Severity::Error, duration);
            return;
        }

        info!("Selected {} ({})", file.name, format_size(file.size));
        self.state.upload.files.push(file);
        self.state.upload.selected_file = Some(self.state.upload.files.len() - 1);
    }

    fn unreadable_file(&self, path: &Path, err: &std::io::Error) {
        warn!("Cannot use {} for upload: {}", path.display(), err);
        let text = format!("Cannot read {}", path.display());
        self.show(text, Severity::Error, self.config.notifications.upload());
    }

    fn admin_login(&mut self) {
        let duration = self.config.notifications.admin();
        if self.admin_credentials.is_empty() {
            self.show("Admin access is not configured", Severity::Error, duration);
            return;
        }

        let admin = &mut self.state.admin;
        let role = self.admin_credentials.authenticate(admin.username.trim(), &admin.password);
        admin.password.clear();
        match role {
            Some(role) => {
                info!("Admin {} logged in with role {}", admin.username.trim(), role.label());
                admin.role = Some(role);
                admin.tab = AdminListing::Uploads;
                self.slots.admin_list.spawn(AdminListing::Uploads);
            }
            None => {
                warn!("Rejected admin login for {}", admin.username.trim());
                self.show("Invalid username or password", Severity::Error, duration);
            }
        }
    }

    fn apply_completed(&mut self) {
        let state = &mut self.state;

        if let Some(attempt) = self.slots.search.take_completed() {
            state.search.package = attempt.result().cloned();
            state.search.selected_file = state
                .search
                .package
                .as_ref()
                .and_then(|p| if p.files.is_empty() { None } else { Some(0) });
        }

        if let Some(receipt) = self.slots.upload.take_completed().and_then(|a| a.result().cloned()) {
            state.upload.clear_form();
            state.upload.code_copied =
                self.config.upload.copy_code_to_clipboard && copy_to_clipboard(receipt.code.as_str());
            state.upload.receipt = Some(receipt);
        }

        if let Some(attempt) = self.slots.box_auth.take_completed() {
            if let Some(files) = attempt.result() {
                state.workspace.open(attempt.input().credentials.clone(), files.clone());
            }
        }

        if let Some(attempt) = self.slots.box_upload.take_completed() {
            let same_box = state.workspace.session.as_ref() == Some(&attempt.input().credentials);
            if let (true, Some(refreshed)) = (same_box, attempt.result()) {
                state.workspace.pending_files.clear();
                if let Some(files) = refreshed {
                    state.workspace.set_files(files.clone());
                }
            }
        }

        if let Some(attempt) = self.slots.box_delete.take_completed() {
            let same_box = state.workspace.session.as_ref() == Some(&attempt.input().credentials);
            if let (true, Some(refreshed)) = (same_box, attempt.result()) {
                let files = match refreshed {
                    Some(files) => files.clone(),
                    None => {
                        let deleted = attempt.input().code.as_str();
                        let mut files = state.workspace.files.clone();
                        files.retain(|f| f.code.as_deref() != Some(deleted));
                        files
                    }
                };
                state.workspace.set_files(files);
            }
        }

        if let Some(attempt) = self.slots.admin_list.take_completed() {
            if state.admin.is_logged_in() {
                if let Some(catalog) = attempt.result() {
                    state.admin.apply_catalog(catalog.clone());
                }
                // A tab switch during this load was folded into it; fetch the tab now shown.
                if *attempt.input() != state.admin.tab {
                    debug!("Admin tab changed while loading, reloading {:?}", state.admin.tab);
                    self.slots.admin_list.spawn(state.admin.tab);
                }
            }
        }

        if let Some(attempt) = self.slots.admin_delete.take_completed() {
            if attempt.phase() == Phase::Succeeded && state.admin.is_logged_in() {
                state.admin.remove_target(attempt.input());
                self.slots.admin_list.spawn(state.admin.tab);
            }
        }

        // Downloads only report through their notification.
        let _ = self.slots.download.take_completed();
    }

    fn show(&self, text: impl Into<String>, severity: Severity, duration: Duration) {
        self.lock_notifications().show(text, severity, duration);
    }

    fn lock_notifications(&self) -> MutexGuard<'_, NotificationManager> {
        self.notifications.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn copy_to_clipboard(text: &str) -> bool {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_owned())) {
        Ok(()) => {
            info!("Copied access code to clipboard");
            true
        }
        Err(e) => {
            warn!("Clipboard unavailable: {}", e);
            false
        }
    }
}
