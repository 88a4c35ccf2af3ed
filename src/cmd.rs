use std::{
    io,
    process::{Command, Stdio},
};

use crate::{error::BumpError, ui};

// ── Internal helpers ──────────────────────────────────────────────────────────

fn not_found_or_io(program: &str, err: io::Error) -> BumpError {
    if err.kind() == io::ErrorKind::NotFound {
        BumpError::CommandNotFound(program.to_string())
    } else {
        BumpError::Io(err)
    }
}

fn print_captured_output(stdout: &[u8], stderr: &[u8]) {
    let out = String::from_utf8_lossy(stdout);
    let err = String::from_utf8_lossy(stderr);
    if !out.trim().is_empty() {
        eprintln!("{}", out.trim());
    }
    if !err.trim().is_empty() {
        eprintln!("{}", err.trim());
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Runs a command silently, discarding all output and ignoring any error.
/// Use for teardown where partial failure is acceptable (e.g. umount).
pub fn run_best_effort(program: &str, args: &[&str]) {
    let _ = Command::new(program)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
}

/// Run a command silently, discarding output; errors on a missing program or
/// a non-zero exit. Use when only the status matters.
pub fn run_checked(program: &str, args: &[&str]) -> Result<(), BumpError> {
    let status = Command::new(program)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| not_found_or_io(program, e))?;

    if !status.success() {
        return Err(BumpError::CommandFailed(
            program.to_string(),
            status.code().unwrap_or(-1),
        ));
    }
    Ok(())
}

/// Run a command, capture its stdout, and return it as a `String`.
pub fn run_capture(program: &str, args: &[&str]) -> Result<String, BumpError> {
    let output = Command::new(program)
        .args(args)
        .stderr(Stdio::inherit())
        .output()
        .map_err(|e| not_found_or_io(program, e))?;

    if !output.status.success() {
        return Err(BumpError::CommandFailed(
            program.to_string(),
            output.status.code().unwrap_or(-1),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a command silently while displaying a spinner, capturing stdout.
/// On failure prints the captured output and returns an error. Use for long
/// externals (hashing a large archive) where silence reads as a hang.
pub fn run_capture_spinner(
    program: &str,
    args: &[&str],
    spin_msg: &str,
) -> Result<String, BumpError> {
    let pb = ui::spinner(spin_msg);
    let result = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| not_found_or_io(program, e));
    pb.finish_and_clear();

    match result {
        Err(e) => Err(e),
        Ok(output) if !output.status.success() => {
            print_captured_output(&output.stdout, &output.stderr);
            Err(BumpError::CommandFailed(
                program.to_string(),
                output.status.code().unwrap_or(-1),
            ))
        }
        Ok(output) => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_returns_stdout() {
        let out = run_capture("echo", &["hello"]).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[test]
    fn missing_program_maps_to_command_not_found() {
        let err = run_capture("definitely-not-a-command-3141", &[]).unwrap_err();
        assert!(matches!(err, BumpError::CommandNotFound(_)));
    }

    #[test]
    fn failing_program_maps_to_command_failed() {
        let err = run_capture("false", &[]).unwrap_err();
        assert!(matches!(err, BumpError::CommandFailed(_, 1)));
    }

    #[test]
    fn checked_reports_status_only() {
        assert!(run_checked("true", &[]).is_ok());

        let err = run_checked("false", &[]).unwrap_err();
        assert!(matches!(err, BumpError::CommandFailed(_, 1)));

        let err = run_checked("definitely-not-a-command-3141", &[]).unwrap_err();
        assert!(matches!(err, BumpError::CommandNotFound(_)));
    }

    #[test]
    fn best_effort_swallows_everything() {
        run_best_effort("false", &[]);
        run_best_effort("definitely-not-a-command-3141", &[]);
    }
}
