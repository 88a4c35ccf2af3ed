use std::{fmt, fs};

use chrono::Local;

// ── Run stamp ─────────────────────────────────────────────────────────────────

/// Per-process identifier prefixed onto every diagnostic line,
/// `<time>.<host>`, e.g. `20260825-101530.archbox`.
///
/// Computed once at process start and immutable afterwards, so every log line
/// of one run correlates under the same stamp.
#[derive(Debug, Clone)]
pub struct RunStamp(String);

impl RunStamp {
    /// Builds the stamp for the current process: local time plus hostname.
    pub fn acquire() -> Self {
        let time = Local::now().format("%Y%m%d-%H%M%S");
        RunStamp(format!("{}.{}", time, hostname()))
    }

    /// Wraps an already-formatted stamp value. Emptiness is not checked here;
    /// the logger rejects an empty stamp at emission time.
    pub fn from_value(value: impl Into<String>) -> Self {
        RunStamp(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads the kernel hostname, falling back to `localhost` if unreadable.
fn hostname() -> String {
    fs::read_to_string("/proc/sys/kernel/hostname")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_is_time_dot_host() {
        let stamp = RunStamp::acquire();
        let (time, host) = stamp.as_str().split_once('.').expect("dot separator");
        assert_eq!(time.len(), "20260825-101530".len());
        assert!(time.chars().all(|c| c.is_ascii_digit() || c == '-'));
        assert!(!host.is_empty());
    }

    #[test]
    fn from_value_is_kept_verbatim() {
        assert_eq!(RunStamp::from_value("x.y").as_str(), "x.y");
        assert_eq!(RunStamp::from_value("").as_str(), "");
    }
}
