// ABOUTME: Generic request lifecycle controller shared by every network action
// Validates, suppresses duplicate submits, calls the transport and raises exactly one notification

use super::{FailureReason, Operation, Phase, RequestAttempt, RequestKind};
use crate::api::{Transport, TransportError};
use crate::notification::{NotificationHandle, Severity, SharedNotifications};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub type Attempt<O> = RequestAttempt<<O as Operation>::Input, <O as Operation>::Output>;

enum Begin<O: Operation> {
    /// Validated and now in flight; the caller must run the transport call.
    Started(Attempt<O>),
    /// Finished without reaching the network (validation failure or duplicate).
    Settled(Attempt<O>),
}

/// Drives one logical action through its phases.
///
/// The slot holds the latest attempt. Its mutex is never held across an
/// `.await`, and the in-flight check and the transition into `InFlight`
/// happen under a single acquisition, so concurrent submits cannot both
/// reach the transport.
///
/// Lock order is slot, then notifications.
pub struct RequestController<O: Operation, T: Transport> {
    operation: O,
    transport: Arc<T>,
    notifications: SharedNotifications,
    notification_duration: Duration,
    slot: Mutex<Option<Attempt<O>>>,
}

impl<O: Operation, T: Transport> RequestController<O, T> {
    pub fn new(
        operation: O,
        transport: Arc<T>,
        notifications: SharedNotifications,
        notification_duration: Duration,
    ) -> Self {
        Self {
            operation,
            transport,
            notifications,
            notification_duration,
            slot: Mutex::new(None),
        }
    }

    pub fn kind(&self) -> RequestKind {
        self.operation.kind()
    }

    pub fn operation(&self) -> &O {
        &self.operation
    }

    pub fn validate(&self, input: &O::Input) -> Result<(), FailureReason> {
        self.operation.validate(input)
    }

    pub fn phase(&self) -> Phase {
        self.lock_slot().as_ref().map_or(Phase::Idle, RequestAttempt::phase)
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase() == Phase::InFlight
    }

    /// Snapshot of the latest attempt.
    pub fn current(&self) -> Option<Attempt<O>> {
        self.lock_slot().clone()
    }

    /// Back to idle. Refused while a request is in flight.
    pub fn reset(&self) -> bool {
        let mut slot = self.lock_slot();
        if slot.as_ref().is_some_and(RequestAttempt::is_in_flight) {
            return false;
        }
        *slot = None;
        true
    }

    /// Like `reset`, but also keeps a finished attempt unless its id is
    /// `taken`. The check and the reset share one lock acquisition.
    pub fn reset_if_taken(&self, taken: Option<Uuid>) -> bool {
        let mut slot = self.lock_slot();
        match slot.as_ref() {
            Some(attempt) if attempt.is_in_flight() => return false,
            Some(attempt) if Some(attempt.id()) != taken => {
                debug!("Keeping unread {} attempt {}", self.kind().label(), attempt.id());
                return false;
            }
            _ => {}
        }
        *slot = None;
        true
    }

    pub async fn submit(&self, input: O::Input) -> Attempt<O> {
        let attempt = match self.begin(input) {
            Begin::Started(attempt) => attempt,
            Begin::Settled(attempt) => return attempt,
        };

        let outcome = self.operation.execute(self.transport.as_ref(), attempt.input()).await;
        self.finish(attempt, outcome)
    }

    fn begin(&self, input: O::Input) -> Begin<O> {
        let kind = self.kind();
        let mut slot = self.lock_slot();

        if let Some(existing) = slot.as_ref().filter(|a| a.is_in_flight()) {
            info!("Ignoring duplicate {} submit while in flight", kind.label());
            return Begin::Settled(existing.clone());
        }

        let mut attempt = RequestAttempt::new(kind, input);
        if let Err(reason) = self.operation.validate(attempt.input()) {
            warn!("{} rejected locally: {}", kind.label(), reason);
            let duration = self.duration_for(attempt.input());
            let handle = self.notify(self.operation.failure_message(&reason), reason.severity(), duration);
            attempt.fail(reason);
            attempt.set_notification(handle);
            *slot = Some(attempt.clone());
            return Begin::Settled(attempt);
        }

        attempt.mark_validated();
        attempt.mark_in_flight();
        info!("Submitting {} request {}", kind.label(), attempt.id());
        *slot = Some(attempt.clone());
        Begin::Started(attempt)
    }

    fn finish(&self, mut attempt: Attempt<O>, outcome: Result<O::Output, TransportError>) -> Attempt<O> {
        let kind = self.kind();
        let duration = self.duration_for(attempt.input());
        let mut slot = self.lock_slot();

        let handle = match outcome {
            Ok(output) => {
                info!("{} request {} succeeded", kind.label(), attempt.id());
                let text = self.operation.success_message(attempt.input(), &output);
                attempt.succeed(output);
                self.notify(text, Severity::Success, duration)
            }
            Err(err) => {
                let reason = FailureReason::classify(kind, &err);
                warn!("{} request {} failed: {} ({})", kind.label(), attempt.id(), reason, err);
                let handle = self.notify(self.operation.failure_message(&reason), reason.severity(), duration);
                attempt.fail(reason);
                handle
            }
        };
        attempt.set_notification(handle);

        *slot = Some(attempt.clone());
        attempt
    }

    fn duration_for(&self, input: &O::Input) -> Duration {
        self.operation
            .notification_duration(input)
            .unwrap_or(self.notification_duration)
    }

    fn notify(&self, text: String, severity: Severity, duration: Duration) -> NotificationHandle {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .show(text, severity, duration)
    }

    fn lock_slot(&self) -> MutexGuard<'_, Option<Attempt<O>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
