// ABOUTME: Owns the set of active notifications and drives their decay schedules
// Shared between the request controllers and the UI through SharedNotifications

use super::{Notification, NotificationHandle, NotificationStatus, Severity};
use crate::clock::Clock;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

pub type SharedNotifications = Arc<Mutex<NotificationManager>>;

#[derive(Debug)]
pub struct NotificationManager {
    clock: Arc<dyn Clock>,
    active: Vec<Notification>,
}

impl NotificationManager {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            active: Vec::new(),
        }
    }

    pub fn shared(clock: Arc<dyn Clock>) -> SharedNotifications {
        Arc::new(Mutex::new(Self::new(clock)))
    }

    pub fn show(&mut self, text: impl Into<String>, severity: Severity, duration: Duration) -> NotificationHandle {
        let notification = Notification::new(text.into(), severity, duration, self.clock.now());
        let handle = notification.handle();
        debug!(
            "Showing {} notification {} for {}ms: {}",
            severity.as_str(),
            handle.id(),
            duration.as_millis(),
            notification.text()
        );
        self.active.push(notification);
        handle
    }

    /// Removes the notification if it is still active. Returns false when it
    /// was already gone, which is not an error.
    pub fn dismiss(&mut self, handle: NotificationHandle) -> bool {
        let before = self.active.len();
        self.active.retain(|n| n.handle() != handle);
        let removed = self.active.len() != before;
        if removed {
            debug!("Dismissed notification {}", handle.id());
        }
        removed
    }

    pub fn dismiss_latest(&mut self) -> Option<NotificationHandle> {
        let latest = self.active.pop()?;
        debug!("Dismissed notification {}", latest.handle().id());
        Some(latest.handle())
    }

    /// Advances every notification whose step is due and drops the ones that
    /// ran out. Returns the handles dismissed by this tick.
    pub fn tick(&mut self) -> Vec<NotificationHandle> {
        let now = self.clock.now();
        let mut expired = Vec::new();

        for notification in &mut self.active {
            if !notification.is_due(now) {
                continue;
            }
            notification.decay(now);
            if notification.is_expired() {
                expired.push(notification.handle());
            }
        }

        if !expired.is_empty() {
            self.active.retain(|n| !n.is_expired());
            for handle in &expired {
                debug!("Notification {} expired", handle.id());
            }
        }

        expired
    }

    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    pub fn get(&self, handle: NotificationHandle) -> Option<&Notification> {
        self.active.iter().find(|n| n.handle() == handle)
    }

    pub fn status(&self, handle: NotificationHandle) -> NotificationStatus {
        if self.get(handle).is_some() {
            NotificationStatus::Active
        } else {
            NotificationStatus::Dismissed
        }
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn clear(&mut self) {
        if !self.active.is_empty() {
            debug!("Clearing {} notifications", self.active.len());
        }
        self.active.clear();
    }

    /// Time until the next notification needs a tick, if any are active.
    pub fn next_deadline(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.active
            .iter()
            .map(|n| n.next_tick_at().min(n.expires_at()).saturating_sub(now))
            .min()
    }
}
