// ABOUTME: Binds a request controller to the UI loop
// Spawns submissions on the runtime and hands each finished attempt back exactly once

use crate::api::Transport;
use crate::lifecycle::{Attempt, Operation, Phase, RequestController};
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub struct ActionSlot<O: Operation, T: Transport> {
    controller: Arc<RequestController<O, T>>,
    applied: Option<Uuid>,
}

impl<O: Operation, T: Transport> ActionSlot<O, T> {
    pub fn new(controller: RequestController<O, T>) -> Self {
        Self {
            controller: Arc::new(controller),
            applied: None,
        }
    }

    pub fn controller(&self) -> &Arc<RequestController<O, T>> {
        &self.controller
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    /// Runs the submission on the tokio runtime. A second spawn while the
    /// first is in flight resolves to the same attempt without a network call.
    pub fn spawn(&self, input: O::Input) -> JoinHandle<Attempt<O>> {
        let controller = Arc::clone(&self.controller);
        tokio::spawn(async move { controller.submit(input).await })
    }

    /// The latest attempt if it finished since the last call.
    pub fn take_completed(&mut self) -> Option<Attempt<O>> {
        let attempt = self.controller.current()?;
        if !attempt.phase().is_terminal() || self.applied == Some(attempt.id()) {
            return None;
        }
        self.applied = Some(attempt.id());
        Some(attempt)
    }

    /// Back to idle, unless the request is still in flight or its result
    /// has not been handed out by `take_completed` yet.
    pub fn reset(&mut self) -> bool {
        self.controller.reset_if_taken(self.applied)
    }
}
