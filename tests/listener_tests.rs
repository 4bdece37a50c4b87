use std::time::Duration;

use parking_lot::Mutex;

use xguard::{
    install_global_listeners, listeners_installed, report_uncaught, report_unhandled_rejection,
    spawn_observed, Failure, GuardError, ListenerConfig, UncaughtFailure,
};

// Listeners are process-wide; tests in this binary take turns.
static SERIAL: Mutex<()> = parking_lot::const_mutex(());

#[test]
fn test_reports_ignored_without_listeners() {
    let _serial = SERIAL.lock();
    assert!(!listeners_installed());
    assert!(!report_uncaught(&UncaughtFailure::new("boom")));
    assert!(!report_unhandled_rejection(&Failure::other("lost")));
}

#[test]
fn test_install_and_uninstall() {
    let _serial = SERIAL.lock();
    let guard = install_global_listeners(ListenerConfig::default()).unwrap();
    assert!(listeners_installed());

    let second = install_global_listeners(ListenerConfig::default());
    assert!(matches!(second, Err(GuardError::ListenersAlreadyInstalled)));

    guard.uninstall();
    assert!(!listeners_installed());

    let again = install_global_listeners(ListenerConfig::default()).unwrap();
    drop(again);
    assert!(!listeners_installed());
}

#[test]
fn test_direct_reports_are_counted() {
    let _serial = SERIAL.lock();
    let guard = install_global_listeners(ListenerConfig::default()).unwrap();

    let event = UncaughtFailure::from_failure(Failure::type_error("x is not a function"))
        .at("app.js", 12, 4);
    assert!(report_uncaught(&event));
    assert!(report_unhandled_rejection(&Failure::other("lost")));

    let stats = guard.stats();
    assert_eq!(stats.uncaught_failures, 1);
    assert_eq!(stats.unhandled_rejections, 1);
}

#[test]
fn test_panic_is_reported_as_uncaught() {
    let _serial = SERIAL.lock();
    let guard = install_global_listeners(ListenerConfig::default()).unwrap();

    let outcome = std::panic::catch_unwind(|| {
        std::panic::panic_any(Failure::range("Maximum call stack size exceeded"));
    });
    assert!(outcome.is_err());

    let outcome = std::panic::catch_unwind(|| panic!("plain message"));
    assert!(outcome.is_err());

    assert_eq!(guard.stats().uncaught_failures, 2);
}

#[test]
fn test_panic_hook_restored_on_drop() {
    let _serial = SERIAL.lock();
    let guard = install_global_listeners(ListenerConfig {
        suppress_default: false,
    })
    .unwrap();
    drop(guard);

    // Our hook is gone; the panic still unwinds normally
    let outcome = std::panic::catch_unwind(|| panic!("after uninstall"));
    assert!(outcome.is_err());
    assert!(!listeners_installed());
}

#[test]
fn test_unobserved_failure_is_reported() {
    let _serial = SERIAL.lock();
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let guard = install_global_listeners(ListenerConfig::default()).unwrap();

    runtime.block_on(async {
        // Observed: the caller sees the failure, nothing is reported
        let observed = spawn_observed(async { Err::<(), _>(Failure::other("seen")) }).await;
        assert!(observed.is_err());

        // Unobserved: the handle is dropped before the failure happens
        drop(spawn_observed(async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Err::<(), _>(Failure::other("nobody listened"))
        }));

        // Unobserved success is not a rejection
        drop(spawn_observed(async { Ok::<_, Failure>(1) }));

        for _ in 0..100 {
            if guard.stats().unhandled_rejections > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    });

    assert_eq!(guard.stats().unhandled_rejections, 1);
}

#[test]
fn test_guard_dropped_while_unwinding_does_not_abort() {
    let _serial = SERIAL.lock();

    let outcome = std::panic::catch_unwind(|| {
        let _listeners = install_global_listeners(ListenerConfig::default()).unwrap();
        panic!("escaped while listeners were installed");
    });
    assert!(outcome.is_err());
    assert!(!listeners_installed());

    // The hook left behind forwards to the previous one
    let outcome = std::panic::catch_unwind(|| panic!("after unwinding uninstall"));
    assert!(outcome.is_err());

    let guard = install_global_listeners(ListenerConfig::default()).unwrap();
    assert_eq!(guard.stats().uncaught_failures, 0);
}

#[test]
fn test_failure_finished_before_drop_is_reported() {
    let _serial = SERIAL.lock();
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let guard = install_global_listeners(ListenerConfig::default()).unwrap();

    runtime.block_on(async {
        let handle = spawn_observed(async { Err::<(), _>(Failure::other("never awaited")) });
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(handle);

        // A finished success dropped unawaited is not a rejection
        let handle = spawn_observed(async { Ok::<_, Failure>(()) });
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(handle);
    });

    assert_eq!(guard.stats().unhandled_rejections, 1);
}

#[test]
fn test_awaited_failure_is_not_reported() {
    let _serial = SERIAL.lock();
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let guard = install_global_listeners(ListenerConfig::default()).unwrap();

    let outcome = runtime.block_on(async {
        spawn_observed(async { Err::<(), _>(Failure::range("handled by caller")) }).await
    });
    assert_eq!(outcome, Err(Failure::range("handled by caller")));
    assert_eq!(guard.stats().unhandled_rejections, 0);
}
