//! Runtime support for operator-supervised bare-metal provisioning scripts:
//! a closed exit-code taxonomy, run-stamped diagnostic logging, an ordered
//! cleanup-on-termination registry, signal-to-termination mapping, and a
//! family of precondition guards.
//!
//! The [`runtime::Runtime`] handle is built once in `main`, shared as an
//! `Arc` with the signal handler, and threaded through everything else;
//! [`Runtime::terminate`](runtime::Runtime::terminate) is the only way the
//! process exits.

pub mod checks;
pub mod cmd;
pub mod config;
pub mod error;
pub mod exit;
pub mod runtime;
pub mod signal;
pub mod stamp;
pub mod teardown;
pub mod ui;

pub use error::BumpError;
pub use exit::ExitCategory;
pub use runtime::Runtime;
pub use stamp::RunStamp;
