//! Tests for Context cancellation and deadlines.

use std::io::ErrorKind;
use std::time::{Duration, Instant};

use crate::context::{Context, ContextError};

#[test]
fn background_context_is_live() {
    let ctx = Context::background();

    assert!(!ctx.is_canceled());
    assert_eq!(ctx.deadline(), None);
    assert_eq!(ctx.err(), None);
    assert!(ctx.check().is_ok());
}

#[test]
fn cancel_is_shared_between_clones() {
    let ctx = Context::background();
    let clone = ctx.clone();

    clone.cancel();

    assert!(ctx.is_canceled());
    assert_eq!(ctx.err(), Some(ContextError::Canceled));
}

#[test]
fn expired_deadline_reports_timed_out() {
    let ctx = Context::with_deadline(Instant::now() - Duration::from_millis(1));

    assert_eq!(ctx.err(), Some(ContextError::DeadlineExceeded));
    let err = ctx.check().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TimedOut);
    assert_eq!(err.to_string(), "context deadline exceeded");
}

#[test]
fn future_deadline_is_live() {
    let ctx = Context::with_timeout(Duration::from_secs(3600));

    assert!(ctx.deadline().is_some());
    assert_eq!(ctx.err(), None);
}

#[test]
fn cancellation_wins_over_deadline() {
    let ctx = Context::with_timeout(Duration::from_secs(3600));
    ctx.cancel();

    assert_eq!(ctx.err(), Some(ContextError::Canceled));
    assert_eq!(ctx.check().unwrap_err().kind(), ErrorKind::Other);
}

#[test]
fn unrepresentable_timeout_means_no_deadline() {
    let ctx = Context::with_timeout(Duration::MAX);

    assert_eq!(ctx.deadline(), None);
    assert_eq!(ctx.err(), None);
    assert!(ctx.check().is_ok());
}

#[test]
fn short_timeout_sets_a_deadline() {
    let before = Instant::now();
    let ctx = Context::with_timeout(Duration::from_secs(60));

    let deadline = ctx.deadline().expect("deadline");
    assert!(deadline >= before + Duration::from_secs(60));
    assert_eq!(ctx.err(), None);
}
