//! Cancellation flags shared between the sampling loop and the input listener.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Why a tracking phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Leave the application.
    Stop,
    /// Go back to provider selection.
    Restart,
}

/// Two independent atomic flags: stop the application, or restart the
/// session.
///
/// Passed by reference into both tasks of a tracking phase; nothing here is
/// process-global, so each controller (and each test) owns its own set.
#[derive(Debug, Default)]
pub struct CancelFlags {
    stop: AtomicBool,
    restart: AtomicBool,
}

impl CancelFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn request_restart(&self) {
        self.restart.store(true, Ordering::SeqCst);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    pub fn restart_requested(&self) -> bool {
        self.restart.load(Ordering::SeqCst)
    }

    /// Clears the restart flag at the start of a tracking phase.
    pub fn reset_restart(&self) {
        self.restart.store(false, Ordering::SeqCst);
    }

    /// Loop predicate for both tasks: neither flag is set.
    pub fn should_continue(&self) -> bool {
        !self.stop_requested() && !self.restart_requested()
    }

    /// Which request ended the phase. Stop wins when both are set.
    pub fn end_reason(&self) -> Option<SessionEnd> {
        if self.stop_requested() {
            Some(SessionEnd::Stop)
        } else if self.restart_requested() {
            Some(SessionEnd::Restart)
        } else {
            None
        }
    }
}

/// Requests stop if the owning thread unwinds, so a panicking task cannot
/// leave its sibling running forever.
pub(crate) struct StopOnPanic<'a>(pub(crate) &'a CancelFlags);

impl Drop for StopOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.request_stop();
        }
    }
}
