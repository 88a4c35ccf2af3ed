use std::sync::Arc;

use crate::{error::BumpError, exit::ExitCategory, runtime::Runtime};

/// Installs a single handler for SIGINT and SIGTERM that logs the event and
/// terminates with the trapped-signal category, running the cleanup registry
/// on the way out.
///
/// Install early, before any resource is acquired. ctrlc delivers the signal
/// on its own thread, so the handler may take the registry lock and
/// `terminate` without racing the interrupted main-path code: once entered it
/// never returns control, it exits the process.
pub fn install(runtime: Arc<Runtime>) -> Result<(), BumpError> {
    ctrlc::set_handler(move || {
        let _ = runtime.log("caught termination signal");
        runtime.terminate(ExitCategory::TrappedSignal);
    })?;
    Ok(())
}
