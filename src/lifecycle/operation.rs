// ABOUTME: The Operation trait that parameterizes the generic request controller
// Each network action supplies its validation, transport call and success wording

use super::{FailureReason, RequestKind};
use crate::api::{Transport, TransportError};
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

pub trait Operation: Send + Sync + 'static {
    type Input: Clone + Debug + Send + Sync + 'static;
    type Output: Clone + Debug + Send + Sync + 'static;

    fn kind(&self) -> RequestKind;

    /// Pure and synchronous; a rejection never reaches the transport.
    fn validate(&self, input: &Self::Input) -> Result<(), FailureReason>;

    fn execute<T: Transport>(
        &self,
        transport: &T,
        input: &Self::Input,
    ) -> impl Future<Output = Result<Self::Output, TransportError>> + Send;

    fn success_message(&self, input: &Self::Input, output: &Self::Output) -> String;

    fn failure_message(&self, reason: &FailureReason) -> String {
        reason.user_message(self.kind())
    }

    /// Lifetime override for this operation's toasts; the controller's
    /// default applies when `None`.
    fn notification_duration(&self, _input: &Self::Input) -> Option<Duration> {
        None
    }
}
