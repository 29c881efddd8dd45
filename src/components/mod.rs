// ABOUTME: UI components for the TUI: the four screens, toasts, help and confirmation overlays

pub mod admin_view;
pub mod confirmation_dialog;
pub mod form;
pub mod help;
pub mod layout;
pub mod search_view;
pub mod toast;
pub mod upload_view;
pub mod workspace_view;

pub use admin_view::AdminViewComponent;
pub use confirmation_dialog::ConfirmationDialogComponent;
pub use help::HelpComponent;
pub use layout::LayoutComponent;
pub use search_view::SearchViewComponent;
pub use toast::ToastComponent;
pub use upload_view::UploadViewComponent;
pub use workspace_view::WorkspaceViewComponent;
