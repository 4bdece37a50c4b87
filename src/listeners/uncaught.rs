use std::panic::{self, PanicHookInfo};
use std::sync::Arc;

use xguard_types::Failure;

type PanicHook = dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static;

/// A failure that escaped every guarded operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncaughtFailure {
    pub message: String,
    pub filename: Option<String>,
    pub lineno: Option<u32>,
    pub colno: Option<u32>,
    /// The original failure, when the panic payload carried one
    pub failure: Option<Failure>,
}

impl UncaughtFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            filename: None,
            lineno: None,
            colno: None,
            failure: None,
        }
    }

    pub fn from_failure(failure: Failure) -> Self {
        Self {
            message: failure.to_string(),
            failure: Some(failure),
            ..Self::new("")
        }
    }

    pub fn at(mut self, filename: impl Into<String>, lineno: u32, colno: u32) -> Self {
        self.filename = Some(filename.into());
        self.lineno = Some(lineno);
        self.colno = Some(colno);
        self
    }

    fn from_panic(info: &PanicHookInfo<'_>) -> Self {
        let payload = info.payload();
        let mut event = if let Some(failure) = payload.downcast_ref::<Failure>() {
            Self::from_failure(failure.clone())
        } else if let Some(message) = payload.downcast_ref::<&str>() {
            Self::new(*message)
        } else if let Some(message) = payload.downcast_ref::<String>() {
            Self::new(message.clone())
        } else {
            Self::new("Box<dyn Any>")
        };

        if let Some(location) = info.location() {
            event = event.at(location.file(), location.line(), location.column());
        }
        event
    }
}

/// Our panic hook plus the one it replaced.
pub(super) struct HookRegistration {
    previous: Arc<PanicHook>,
}

impl HookRegistration {
    pub(super) fn install(suppress_default: bool) -> Self {
        let previous: Arc<PanicHook> = Arc::from(panic::take_hook());
        let chained = previous.clone();

        panic::set_hook(Box::new(move |info| {
            let handled = super::report_uncaught(&UncaughtFailure::from_panic(info));
            if !handled || !suppress_default {
                chained(info);
            }
        }));

        Self { previous }
    }

    pub(super) fn restore(self) {
        let previous = self.previous;
        panic::set_hook(Box::new(move |info| previous(info)));
    }
}
