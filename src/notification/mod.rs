// ABOUTME: Notification system for displaying temporary messages to users
// Provides severities, decaying progress and automatic expiry driven by a clock

pub mod manager;

pub use manager::{NotificationManager, SharedNotifications};

use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Shortest interval between two decay steps of a notification.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(10);

/// Number of decay steps a notification's lifetime is divided into.
pub const DECAY_STEPS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn indicator(&self) -> &'static str {
        match self {
            Severity::Success => "✔",
            Severity::Error => "✗",
            Severity::Warning => "⚠",
            Severity::Info => "ℹ",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationHandle(Uuid);

impl NotificationHandle {
    pub fn id(&self) -> Uuid {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    Active,
    Dismissed,
}

#[derive(Debug, Clone)]
pub struct Notification {
    id: Uuid,
    severity: Severity,
    text: String,
    total_lifetime: Duration,
    remaining_fraction: f64,
    shown_at: Duration,
    tick_period: Duration,
    next_tick_at: Duration,
}

impl Notification {
    pub(crate) fn new(text: String, severity: Severity, total_lifetime: Duration, now: Duration) -> Self {
        let tick_period = tick_period_for(total_lifetime);
        Self {
            id: Uuid::new_v4(),
            severity,
            text,
            total_lifetime,
            remaining_fraction: 1.0,
            shown_at: now,
            tick_period,
            next_tick_at: now + tick_period,
        }
    }

    pub fn handle(&self) -> NotificationHandle {
        NotificationHandle(self.id)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Share of the lifetime still left, from 1.0 down to 0.0.
    pub fn remaining_fraction(&self) -> f64 {
        self.remaining_fraction
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_fraction <= 0.0
    }

    pub(crate) fn expires_at(&self) -> Duration {
        self.shown_at + self.total_lifetime
    }

    pub(crate) fn next_tick_at(&self) -> Duration {
        self.next_tick_at
    }

    pub(crate) fn is_due(&self, now: Duration) -> bool {
        now >= self.next_tick_at || now >= self.expires_at()
    }

    /// Recompute the fraction from elapsed time rather than subtracting a
    /// fixed step, so the bar hits zero exactly at the end of the lifetime.
    pub(crate) fn decay(&mut self, now: Duration) {
        let elapsed = now.saturating_sub(self.shown_at);
        let fraction = if self.total_lifetime.is_zero() {
            0.0
        } else {
            (1.0 - elapsed.as_secs_f64() / self.total_lifetime.as_secs_f64()).max(0.0)
        };
        self.remaining_fraction = self.remaining_fraction.min(fraction);

        let period_ms = millis(self.tick_period).max(1);
        let steps = millis(elapsed) / period_ms + 1;
        self.next_tick_at = self.shown_at + Duration::from_millis(period_ms.saturating_mul(steps));
    }
}

/// Decay step for a lifetime: `max(10ms, lifetime / 100)`.
pub fn tick_period_for(total_lifetime: Duration) -> Duration {
    (total_lifetime / DECAY_STEPS).max(MIN_TICK_PERIOD)
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
