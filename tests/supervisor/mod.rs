//! Supervisor module tests.

mod tail_test;

/// Verify the public supervisor types are exported from the library.
#[test]
fn test_all_supervisor_types_exported() {
    use poe_trade_notifier::supervisor::{
        resolve_targets, section_label, LineOutcome, RediscoveryPolicy, StartupError,
        SupervisorError, TailContext, TailFailure, TailSupervisor,
    };

    let _ = RediscoveryPolicy::default();
    let _: fn() -> StartupError = || StartupError::NoWatchTargets { attempts: 0 };
    let _: Option<TailFailure> = None;
    let _: Option<SupervisorError> = None;
    let _: Option<TailContext> = None;
    let _: Option<TailSupervisor> = None;
    let _ = resolve_targets;
    assert_eq!(section_label("PathOfExile2"), "PoE 2");
    assert_ne!(LineOutcome::Delivered, LineOutcome::NotDelivered);
}
