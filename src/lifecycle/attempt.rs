// ABOUTME: A single request attempt and the phases it moves through
// Transitions are forward-only: idle -> validated -> in flight -> succeeded | failed

use super::FailureReason;
use crate::notification::NotificationHandle;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Search,
    Upload,
    BoxAuth,
    BoxUpload,
    BoxFileDelete,
    AdminDelete,
    AdminList,
    Download,
}

impl RequestKind {
    pub fn label(&self) -> &'static str {
        match self {
            RequestKind::Search => "search",
            RequestKind::Upload => "upload",
            RequestKind::BoxAuth => "box-auth",
            RequestKind::BoxUpload => "box-upload",
            RequestKind::BoxFileDelete => "box-file-delete",
            RequestKind::AdminDelete => "admin-delete",
            RequestKind::AdminList => "admin-list",
            RequestKind::Download => "download",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Validated,
    InFlight,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Succeeded | Phase::Failed)
    }

    pub fn can_advance_to(&self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Idle, Phase::Validated)
                | (Phase::Idle, Phase::Failed)
                | (Phase::Validated, Phase::InFlight)
                | (Phase::InFlight, Phase::Succeeded)
                | (Phase::InFlight, Phase::Failed)
        )
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            Phase::Idle => " ",
            Phase::Validated => "…",
            Phase::InFlight => "⟳",
            Phase::Succeeded => "●",
            Phase::Failed => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestAttempt<I, O> {
    id: Uuid,
    kind: RequestKind,
    input: I,
    phase: Phase,
    history: Vec<Phase>,
    result: Option<O>,
    failure: Option<FailureReason>,
    notification: Option<NotificationHandle>,
    started_at: DateTime<Utc>,
}

impl<I, O> RequestAttempt<I, O> {
    pub(crate) fn new(kind: RequestKind, input: I) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            input,
            phase: Phase::Idle,
            history: vec![Phase::Idle],
            result: None,
            failure: None,
            notification: None,
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Every phase the attempt has been in, oldest first.
    pub fn history(&self) -> &[Phase] {
        &self.history
    }

    pub fn result(&self) -> Option<&O> {
        self.result.as_ref()
    }

    pub fn failure_reason(&self) -> Option<&FailureReason> {
        self.failure.as_ref()
    }

    /// The notification raised when the attempt finished.
    pub fn notification(&self) -> Option<NotificationHandle> {
        self.notification
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase == Phase::InFlight
    }

    fn advance(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal transition {:?} -> {:?}",
            self.phase,
            next
        );
        self.phase = next;
        self.history.push(next);
    }

    pub(crate) fn mark_validated(&mut self) {
        self.advance(Phase::Validated);
    }

    pub(crate) fn mark_in_flight(&mut self) {
        self.advance(Phase::InFlight);
    }

    pub(crate) fn succeed(&mut self, result: O) {
        self.advance(Phase::Succeeded);
        self.result = Some(result);
    }

    pub(crate) fn fail(&mut self, reason: FailureReason) {
        self.advance(Phase::Failed);
        self.failure = Some(reason);
    }

    pub(crate) fn set_notification(&mut self, handle: NotificationHandle) {
        self.notification = Some(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn only_forward_transitions_are_allowed() {
        assert!(Phase::Idle.can_advance_to(Phase::Validated));
        assert!(Phase::Idle.can_advance_to(Phase::Failed));
        assert!(!Phase::Idle.can_advance_to(Phase::InFlight));
        assert!(!Phase::Validated.can_advance_to(Phase::Succeeded));
        assert!(!Phase::Succeeded.can_advance_to(Phase::Failed));
        assert!(!Phase::Failed.can_advance_to(Phase::Idle));
    }

    #[test]
    fn successful_attempt_records_its_path() {
        let mut attempt: RequestAttempt<&str, u32> = RequestAttempt::new(RequestKind::Search, "123456");
        attempt.mark_validated();
        attempt.mark_in_flight();
        assert!(attempt.is_in_flight());
        attempt.succeed(7);

        assert_eq!(
            attempt.history(),
            &[Phase::Idle, Phase::Validated, Phase::InFlight, Phase::Succeeded]
        );
        assert_eq!(attempt.result(), Some(&7));
        assert_eq!(attempt.failure_reason(), None);
    }

    #[test]
    fn validation_failure_skips_in_flight() {
        let mut attempt: RequestAttempt<&str, u32> = RequestAttempt::new(RequestKind::Search, "12a456");
        attempt.fail(FailureReason::InvalidCode);

        assert_eq!(attempt.history(), &[Phase::Idle, Phase::Failed]);
        assert_eq!(attempt.result(), None);
        assert_eq!(attempt.failure_reason(), Some(&FailureReason::InvalidCode));
    }
}
