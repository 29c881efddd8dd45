// ABOUTME: Main application structure and state management for the TUI

pub mod actions;
pub mod events;
pub mod runtime;
pub mod state;

pub use events::{AppEvent, EventHandler};
pub use runtime::App;
pub use state::{AppState, AsyncAction, View};
