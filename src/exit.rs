// ── Exit-code taxonomy ────────────────────────────────────────────────────────

/// The closed set of termination categories.
///
/// Values are partitioned into bands so calling scripts can branch on ranges:
/// 60-65 missing resources, 70-72 configuration/safety, 81-84 system
/// failures, 113-114 signal-triggered termination. Every exit of the process
/// goes through exactly one of these; there are no ad hoc codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCategory {
    /// Normal completion. Cleanup actions conventionally no-op on this.
    Ok = 0,

    // ── Missing resources ──
    MissingInput = 60,
    MissingFile = 61,
    MissingDirectory = 62,
    MissingDevice = 63,
    MissingMountPoint = 64,
    MissingCommand = 65,

    // ── Configuration / safety ──
    InvalidConfig = 70,
    UnsafeOperation = 71,
    CorruptData = 72,

    // ── System failures ──
    ServiceFailure = 81,
    PermissionFailure = 82,
    NetworkFailure = 83,
    FilesystemFailure = 84,

    // ── Signals ──
    TrappedSignal = 113,
    ShutdownRequested = 114,
}

impl ExitCategory {
    /// The numeric process exit code for this category.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Short human-readable label used in log lines.
    pub fn label(self) -> &'static str {
        match self {
            ExitCategory::Ok => "success",
            ExitCategory::MissingInput => "missing input parameter",
            ExitCategory::MissingFile => "missing file",
            ExitCategory::MissingDirectory => "missing directory",
            ExitCategory::MissingDevice => "missing device",
            ExitCategory::MissingMountPoint => "missing mount point",
            ExitCategory::MissingCommand => "missing command",
            ExitCategory::InvalidConfig => "invalid configuration",
            ExitCategory::UnsafeOperation => "unsafe operation refused",
            ExitCategory::CorruptData => "corrupt data",
            ExitCategory::ServiceFailure => "service failure",
            ExitCategory::PermissionFailure => "permission failure",
            ExitCategory::NetworkFailure => "network failure",
            ExitCategory::FilesystemFailure => "filesystem failure",
            ExitCategory::TrappedSignal => "trapped signal",
            ExitCategory::ShutdownRequested => "shutdown requested",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCategory::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_the_fixed_values() {
        assert_eq!(ExitCategory::Ok.code(), 0);
        assert_eq!(ExitCategory::MissingInput.code(), 60);
        assert_eq!(ExitCategory::MissingFile.code(), 61);
        assert_eq!(ExitCategory::MissingCommand.code(), 65);
        assert_eq!(ExitCategory::CorruptData.code(), 72);
        assert_eq!(ExitCategory::NetworkFailure.code(), 83);
        assert_eq!(ExitCategory::TrappedSignal.code(), 113);
        assert_eq!(ExitCategory::ShutdownRequested.code(), 114);
    }

    #[test]
    fn only_ok_is_success() {
        assert!(ExitCategory::Ok.is_success());
        assert!(!ExitCategory::TrappedSignal.is_success());
        assert!(!ExitCategory::MissingFile.is_success());
    }
}
