//! Process-wide listeners for failures that escape guarded operations.
//!
//! [`install_global_listeners`] registers two listeners and returns a
//! [`ListenerGuard`]; dropping the guard removes them again. Only one set
//! can be installed at a time.
//!
//! - Uncaught failures arrive through the process panic hook, or directly via
//!   [`report_uncaught`].
//! - Unhandled rejections come from [`spawn_observed`] tasks whose failure
//!   nobody awaited, or directly via [`report_unhandled_rejection`].

mod rejection;
mod uncaught;

pub use rejection::{spawn_observed, Observed};
pub use uncaught::UncaughtFailure;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use xguard_types::Failure;

use crate::config::ListenerConfig;
use crate::error::GuardError;

static ACTIVE: RwLock<Option<Arc<ListenerState>>> = parking_lot::const_rwlock(None);

#[derive(Debug, Default)]
struct ListenerState {
    uncaught_failures: AtomicU64,
    unhandled_rejections: AtomicU64,
}

/// Events handled since installation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerStats {
    pub uncaught_failures: u64,
    pub unhandled_rejections: u64,
}

/// Keeps the global listeners installed; dropping it uninstalls them.
#[must_use = "dropping the guard uninstalls the listeners"]
pub struct ListenerGuard {
    state: Arc<ListenerState>,
    hook: Option<uncaught::HookRegistration>,
}

impl ListenerGuard {
    pub fn stats(&self) -> ListenerStats {
        ListenerStats {
            uncaught_failures: self.state.uncaught_failures.load(Ordering::Relaxed),
            unhandled_rejections: self.state.unhandled_rejections.load(Ordering::Relaxed),
        }
    }

    /// Uninstall explicitly; equivalent to dropping the guard.
    pub fn uninstall(self) {}
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        // `set_hook` panics while unwinding. Our hook stays in place and
        // forwards to the previous one once the slot below is empty.
        if let Some(hook) = self.hook.take() {
            if !std::thread::panicking() {
                hook.restore();
            }
        }
        let mut active = ACTIVE.write();
        if active
            .as_ref()
            .is_some_and(|state| Arc::ptr_eq(state, &self.state))
        {
            *active = None;
        }
        tracing::debug!("Global failure listeners uninstalled");
    }
}

/// Install the uncaught-failure and unhandled-rejection listeners.
pub fn install_global_listeners(config: ListenerConfig) -> Result<ListenerGuard, GuardError> {
    let mut active = ACTIVE.write();
    if active.is_some() {
        return Err(GuardError::ListenersAlreadyInstalled);
    }

    let state = Arc::new(ListenerState::default());
    *active = Some(state.clone());
    drop(active);

    let hook = uncaught::HookRegistration::install(config.suppress_default);
    tracing::debug!(
        suppress_default = config.suppress_default,
        "Global failure listeners installed"
    );

    Ok(ListenerGuard {
        state,
        hook: Some(hook),
    })
}

/// Whether a listener set is currently installed.
pub fn listeners_installed() -> bool {
    ACTIVE.read().is_some()
}

/// Deliver an uncaught failure. Returns `true` if a listener handled it.
pub fn report_uncaught(event: &UncaughtFailure) -> bool {
    let Some(state) = ACTIVE.read().clone() else {
        return false;
    };
    tracing::error!(
        message = %event.message,
        filename = event.filename.as_deref().unwrap_or("<unknown>"),
        lineno = event.lineno,
        colno = event.colno,
        error = ?event.failure,
        "Global Error Caught"
    );
    state.uncaught_failures.fetch_add(1, Ordering::Relaxed);
    true
}

/// Deliver an unobserved asynchronous failure. Returns `true` if a listener
/// handled it.
pub fn report_unhandled_rejection(reason: &Failure) -> bool {
    let Some(state) = ACTIVE.read().clone() else {
        return false;
    };
    tracing::error!(kind = %reason.kind, "Unhandled Promise Rejection: {}", reason);
    state.unhandled_rejections.fetch_add(1, Ordering::Relaxed);
    true
}
