// ABOUTME: Integration tests for notification decay, expiry and dismissal driven by a manual clock

mod common;

use fylshare::clock::Clock;
use fylshare::notification::{NotificationStatus, Severity};
use std::time::Duration;

#[test]
fn test_notification_decays_to_zero_and_is_removed_on_time() {
    let (clock, shared) = common::notifications();
    let lifetime = Duration::from_secs(3);
    let mut manager = shared.lock().unwrap();
    let handle = manager.show("File found successfully!", Severity::Success, lifetime);

    let period = manager.get(handle).unwrap().tick_period();
    assert_eq!(period, Duration::from_millis(30));

    let mut last_fraction = 1.0;
    let mut removed_at = None;
    for _ in 0..200 {
        clock.advance(period);
        let expired = manager.tick();
        if expired.contains(&handle) {
            removed_at = Some(clock.now());
            break;
        }
        let fraction = manager.get(handle).unwrap().remaining_fraction();
        assert!(fraction <= last_fraction, "fraction went up: {last_fraction} -> {fraction}");
        assert!(fraction > 0.0);
        last_fraction = fraction;
    }

    let removed_at = removed_at.expect("notification never expired");
    assert!(removed_at >= lifetime - period, "removed too early at {removed_at:?}");
    assert!(removed_at <= lifetime + period, "removed too late at {removed_at:?}");
    assert_eq!(manager.status(handle), NotificationStatus::Dismissed);
    assert!(manager.is_empty());
}

#[test]
fn test_fraction_tracks_elapsed_time_linearly() {
    let (clock, shared) = common::notifications();
    let mut manager = shared.lock().unwrap();
    let handle = manager.show("Uploading", Severity::Info, Duration::from_secs(10));

    clock.advance(Duration::from_secs(5));
    manager.tick();
    let fraction = manager.get(handle).unwrap().remaining_fraction();
    assert!((fraction - 0.5).abs() < 0.011, "unexpected fraction {fraction}");
}

#[test]
fn test_missed_ticks_catch_up_in_one_step() {
    let (clock, shared) = common::notifications();
    let mut manager = shared.lock().unwrap();
    let handle = manager.show("Slow frame", Severity::Warning, Duration::from_secs(1));

    // The UI loop stalled well past the lifetime.
    clock.advance(Duration::from_secs(4));
    assert_eq!(manager.tick(), vec![handle]);
    assert!(manager.is_empty());
}

#[test]
fn test_double_dismiss_is_harmless() {
    let (_clock, shared) = common::notifications();
    let mut manager = shared.lock().unwrap();
    let first = manager.show("Upload error", Severity::Error, Duration::from_secs(15));
    let second = manager.show("Upload failed", Severity::Error, Duration::from_secs(15));

    assert!(manager.dismiss(first));
    assert!(!manager.dismiss(first));
    assert_eq!(manager.status(first), NotificationStatus::Dismissed);
    assert_eq!(manager.status(second), NotificationStatus::Active);
    assert_eq!(manager.len(), 1);
}

#[test]
fn test_dismissing_after_expiry_is_harmless() {
    let (clock, shared) = common::notifications();
    let mut manager = shared.lock().unwrap();
    let handle = manager.show("Gone soon", Severity::Info, Duration::from_millis(500));

    clock.advance(Duration::from_secs(1));
    manager.tick();
    assert!(!manager.dismiss(handle));
    assert!(manager.tick().is_empty());
}

#[test]
fn test_notifications_decay_independently() {
    let (clock, shared) = common::notifications();
    let mut manager = shared.lock().unwrap();
    let short = manager.show("Short", Severity::Success, Duration::from_secs(1));
    let long = manager.show("Long", Severity::Success, Duration::from_secs(15));

    clock.advance(Duration::from_millis(1_000));
    let expired = manager.tick();

    assert_eq!(expired, vec![short]);
    let remaining = manager.get(long).unwrap().remaining_fraction();
    assert!(remaining > 0.9);
}
