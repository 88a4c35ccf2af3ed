use std::{
    env, fs,
    os::unix::fs::{FileTypeExt, PermissionsExt},
    path::Path,
};

use crate::{cmd, error::BumpError, runtime::Runtime};

// ── Precondition guards ───────────────────────────────────────────────────────
//
// Each guard logs what it is about to verify, then returns `Ok(())` or an
// error with a fixed category for that failure kind. Nothing here exits the
// process; callers decide between `Runtime::report` (continuable) and letting
// the error bubble to the top-level termination point (fatal).

/// The value behind `label` must be non-empty (missing input, 60).
pub fn require_value(rt: &Runtime, label: &str, value: &str) -> Result<(), BumpError> {
    rt.log(&format!("checking required value '{}'", label))?;
    if value.trim().is_empty() {
        return Err(BumpError::MissingInput(label.to_string()));
    }
    Ok(())
}

/// `path` must exist and be a regular file (missing file, 61).
pub fn require_file(rt: &Runtime, path: &str) -> Result<(), BumpError> {
    rt.log(&format!("checking file '{}'", path))?;
    if !Path::new(path).is_file() {
        return Err(BumpError::MissingFile(path.to_string()));
    }
    Ok(())
}

/// `path` must exist and be a directory (missing directory, 62).
pub fn require_dir(rt: &Runtime, path: &str) -> Result<(), BumpError> {
    rt.log(&format!("checking directory '{}'", path))?;
    if !Path::new(path).is_dir() {
        return Err(BumpError::MissingDirectory(path.to_string()));
    }
    Ok(())
}

/// `path` must be a block-device node (missing device, 63).
pub fn require_block_device(rt: &Runtime, path: &str) -> Result<(), BumpError> {
    rt.log(&format!("checking block device '{}'", path))?;
    match fs::metadata(path) {
        Ok(meta) if meta.file_type().is_block_device() => Ok(()),
        Ok(_) => Err(BumpError::MissingDevice(path.to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(BumpError::MissingDevice(path.to_string()))
        }
        Err(e) => Err(BumpError::Io(e)),
    }
}

/// Something must be mounted at `path` (missing mount point, 64).
pub fn require_mount_point(rt: &Runtime, path: &str) -> Result<(), BumpError> {
    rt.log(&format!("checking mount point '{}'", path))?;
    if !is_mounted(path)? {
        return Err(BumpError::MissingMountPoint(path.to_string()));
    }
    Ok(())
}

/// `name` must resolve to an executable on PATH (missing command, 65).
pub fn require_command(rt: &Runtime, name: &str) -> Result<(), BumpError> {
    rt.log(&format!("checking command '{}'", name))?;
    let path_var = env::var_os("PATH").unwrap_or_default();

    for dir in env::split_paths(&path_var) {
        let candidate = dir.join(name);
        let executable = fs::metadata(&candidate)
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false);
        if executable {
            return Ok(());
        }
    }

    Err(BumpError::CommandNotFound(name.to_string()))
}

/// The file at `path` must contain `needle` (invalid configuration, 70);
/// a missing file is reported as such (61).
pub fn require_file_contains(rt: &Runtime, path: &str, needle: &str) -> Result<(), BumpError> {
    rt.log(&format!("checking that '{}' contains '{}'", path, needle))?;
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(BumpError::MissingFile(path.to_string()))
        }
        Err(e) => return Err(BumpError::Io(e)),
    };

    if !content.contains(needle) {
        return Err(BumpError::InvalidConfig(format!(
            "'{}' does not contain '{}'",
            path, needle
        )));
    }
    Ok(())
}

/// The SHA-256 of the file at `path` must equal `expected` (corrupt data, 72).
/// Shells out to `sha256sum`, the same tool the provisioning scripts use.
pub fn verify_sha256(rt: &Runtime, path: &str, expected: &str) -> Result<(), BumpError> {
    rt.log(&format!("verifying checksum of '{}'", path))?;
    require_file(rt, path)?;

    let output = cmd::run_capture_spinner(
        "sha256sum",
        &[path],
        &format!("Hashing {}…", path),
    )?;
    let actual = output.split_whitespace().next().unwrap_or_default();

    if !actual.eq_ignore_ascii_case(expected.trim()) {
        return Err(BumpError::CorruptData(format!(
            "checksum mismatch for '{}': expected {}, got {}",
            path, expected, actual
        )));
    }
    Ok(())
}

/// True when `path` appears as a mount target in /proc/self/mounts.
pub(crate) fn is_mounted(path: &str) -> Result<bool, BumpError> {
    let mounts = fs::read_to_string("/proc/self/mounts")?;
    for line in mounts.lines() {
        // Second whitespace field is the mount target; the kernel escapes
        // spaces in it as \040.
        if let Some(target) = line.split_whitespace().nth(1) {
            if target.replace("\\040", " ") == path {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::exit::ExitCategory;

    fn rt() -> Runtime {
        Runtime::new()
    }

    #[test]
    fn empty_value_is_missing_input() {
        let rt = rt();
        assert!(require_value(&rt, "hostname", "archbox").is_ok());
        let err = require_value(&rt, "hostname", "  ").unwrap_err();
        assert_eq!(err.category(), ExitCategory::MissingInput);
    }

    #[test]
    fn file_guard_distinguishes_present_and_absent() {
        let rt = rt();
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(require_file(&rt, file.path().to_str().unwrap()).is_ok());

        let err = require_file(&rt, "/definitely/not/here").unwrap_err();
        assert_eq!(err.category(), ExitCategory::MissingFile);
    }

    #[test]
    fn dir_guard_rejects_files_and_absent_paths() {
        let rt = rt();
        let dir = tempfile::tempdir().unwrap();
        assert!(require_dir(&rt, dir.path().to_str().unwrap()).is_ok());

        let file = tempfile::NamedTempFile::new().unwrap();
        let err = require_dir(&rt, file.path().to_str().unwrap()).unwrap_err();
        assert_eq!(err.category(), ExitCategory::MissingDirectory);
    }

    #[test]
    fn device_guard_rejects_regular_files() {
        let rt = rt();
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = require_block_device(&rt, file.path().to_str().unwrap()).unwrap_err();
        assert_eq!(err.category(), ExitCategory::MissingDevice);

        let err = require_block_device(&rt, "/dev/no-such-disk").unwrap_err();
        assert_eq!(err.category(), ExitCategory::MissingDevice);
    }

    #[test]
    fn root_is_a_mount_point_and_tempdirs_are_not() {
        let rt = rt();
        assert!(require_mount_point(&rt, "/").is_ok());

        let dir = tempfile::tempdir().unwrap();
        let err = require_mount_point(&rt, dir.path().to_str().unwrap()).unwrap_err();
        assert_eq!(err.category(), ExitCategory::MissingMountPoint);
    }

    #[test]
    fn command_guard_walks_path() {
        let rt = rt();
        assert!(require_command(&rt, "sh").is_ok());

        let err = require_command(&rt, "definitely-not-a-command-3141").unwrap_err();
        assert_eq!(err.category(), ExitCategory::MissingCommand);
    }

    #[test]
    fn contains_guard_reads_the_file() {
        let rt = rt();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "UUID=abcd /boot vfat defaults 0 2").unwrap();
        let path = file.path().to_str().unwrap();

        assert!(require_file_contains(&rt, path, "UUID=abcd").is_ok());

        let err = require_file_contains(&rt, path, "UUID=ffff").unwrap_err();
        assert_eq!(err.category(), ExitCategory::InvalidConfig);

        let err = require_file_contains(&rt, "/definitely/not/here", "x").unwrap_err();
        assert_eq!(err.category(), ExitCategory::MissingFile);
    }

    #[test]
    fn checksum_guard_matches_sha256sum() {
        let rt = rt();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "base system image").unwrap();
        let path = file.path().to_str().unwrap();

        let expected = cmd::run_capture("sha256sum", &[path])
            .unwrap()
            .split_whitespace()
            .next()
            .unwrap()
            .to_string();

        assert!(verify_sha256(&rt, path, &expected).is_ok());

        let err = verify_sha256(&rt, path, &"0".repeat(64)).unwrap_err();
        assert_eq!(err.category(), ExitCategory::CorruptData);
    }
}
