use std::sync::{Mutex, MutexGuard};

use crate::{error::BumpError, exit::ExitCategory, stamp::RunStamp};

// ── Runtime handle ────────────────────────────────────────────────────────────

/// Names registered for cleanup must carry this prefix. A non-conforming name
/// is logged as a warning at termination and the action skipped.
pub const CLEANUP_PREFIX: &str = "cleanup-";

const SEPARATOR_WIDTH: usize = 52;

type CleanupFn = Box<dyn FnMut(ExitCategory) -> Result<(), BumpError> + Send>;

struct CleanupAction {
    name: String,
    run: CleanupFn,
}

/// Process-wide handle threaded through the program instead of ambient
/// globals: holds the run stamp and the ordered cleanup registry, and owns
/// the one exit path ([`Runtime::terminate`]).
///
/// Shared as `Arc<Runtime>` between the main control flow and the signal
/// handler thread. The registry mutex is held only to append or to drain at
/// termination, so neither side can deadlock the other.
pub struct Runtime {
    stamp: RunStamp,
    cleanups: Mutex<Vec<CleanupAction>>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_stamp(RunStamp::acquire())
    }

    pub fn with_stamp(stamp: RunStamp) -> Self {
        Runtime {
            stamp,
            cleanups: Mutex::new(Vec::new()),
        }
    }

    pub fn stamp(&self) -> &RunStamp {
        &self.stamp
    }

    // ── Stamped logging ───────────────────────────────────────────────────────

    /// Emits `<stamp>: <msg>` on stderr. Standard output is never touched, so
    /// structured program output stays separable from diagnostics.
    ///
    /// An empty stamp or message is an invalid-configuration error: a log line
    /// missing either half would silently lose diagnostic context.
    pub fn log(&self, msg: &str) -> Result<(), BumpError> {
        if self.stamp.as_str().is_empty() {
            return Err(BumpError::InvalidConfig("run stamp is empty".into()));
        }
        if msg.is_empty() {
            return Err(BumpError::InvalidConfig(
                "refusing to log an empty message".into(),
            ));
        }
        eprintln!("{}: {}", self.stamp, msg);
        Ok(())
    }

    /// Emits `<stamp>: <label> is <value>` on stderr.
    pub fn log_setting(&self, label: &str, value: &str) -> Result<(), BumpError> {
        if label.is_empty() {
            return Err(BumpError::InvalidConfig(
                "refusing to log a setting without a label".into(),
            ));
        }
        self.log(&format!("{} is {}", label, value))
    }

    // ── Cleanup registry ──────────────────────────────────────────────────────

    /// Appends a named teardown action. No deduplication: registering twice
    /// means running twice. Actions must tolerate their target resource never
    /// having been acquired, and receive the termination category so they can
    /// no-op on success.
    pub fn register<F>(&self, name: impl Into<String>, action: F)
    where
        F: FnMut(ExitCategory) -> Result<(), BumpError> + Send + 'static,
    {
        self.lock_cleanups().push(CleanupAction {
            name: name.into(),
            run: Box::new(action),
        });
    }

    fn lock_cleanups(&self) -> MutexGuard<'_, Vec<CleanupAction>> {
        // A panicking cleanup or logger cannot be allowed to wedge
        // termination, so a poisoned lock is still drained.
        self.cleanups.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Runs every registered action once, in registration order. Failures are
    /// logged and do not stop the remaining actions. The registry is drained
    /// before any action runs, so an action registering more work (or a
    /// re-entered termination) finds it empty rather than a held lock.
    fn run_cleanups(&self, category: ExitCategory) {
        let actions = {
            let mut guard = self.lock_cleanups();
            std::mem::take(&mut *guard)
        };

        for mut action in actions {
            if !action.name.starts_with(CLEANUP_PREFIX) {
                let _ = self.log(&format!(
                    "skipping '{}': cleanup names must start with '{}'",
                    action.name, CLEANUP_PREFIX
                ));
                continue;
            }
            let _ = self.log(&format!("cleanup '{}'", action.name));
            if let Err(e) = (action.run)(category) {
                let _ = self.log(&format!("cleanup '{}' failed: {}", action.name, e));
            }
        }
    }

    // ── Termination ───────────────────────────────────────────────────────────

    /// The sole exit path, normal or abnormal: prints a separator, logs the
    /// category, runs the cleanup registry in order, then exits with the
    /// category's code. Never returns. Safe to call from the signal-handler
    /// thread.
    pub fn terminate(&self, category: ExitCategory) -> ! {
        eprintln!("{}", "─".repeat(SEPARATOR_WIDTH));
        let _ = self.log(&format!(
            "terminating: {} (exit {})",
            category.label(),
            category.code()
        ));
        self.run_cleanups(category);
        std::process::exit(category.code())
    }

    // ── Reporting ─────────────────────────────────────────────────────────────

    /// Logs that the operation named by `description` finished with
    /// `category` and hands the category back for local handling.
    pub fn report(&self, category: ExitCategory, description: &str) -> ExitCategory {
        let _ = self.log(&format!(
            "'{}' finished with {} (exit {})",
            description,
            category.label(),
            category.code()
        ));
        category
    }

    /// Like [`Runtime::report`], then logs the escalation message and
    /// terminates with the category. Never returns. Must not be called from
    /// inside a cleanup action.
    pub fn report_fatal(&self, category: ExitCategory, description: &str, message: &str) -> ! {
        self.report(category, description);
        let _ = self.log(message);
        self.terminate(category)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
