use std::{env, sync::Arc};

use bump::{checks, config::Provision, signal, ui, BumpError, ExitCategory, Runtime};

// ── Preflight command lists ───────────────────────────────────────────────────

/// Tools the provisioning scripts cannot run without. Any missing one is
/// fatal.
const REQUIRED_COMMANDS: &[&str] = &[
    "sgdisk",
    "cryptsetup",
    "pvcreate",
    "vgcreate",
    "lvcreate",
    "mkfs.fat",
    "mkfs.ext4",
    "pacstrap",
    "genfstab",
    "arch-chroot",
    "grub-install",
];

/// Nice-to-haves: a miss is reported and the preflight continues.
const OPTIONAL_COMMANDS: &[&str] = &["reflector", "ntpd"];

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let rt = Arc::new(Runtime::new());

    if let Err(e) = signal::install(Arc::clone(&rt)) {
        ui::print_error(&format!("{}", e));
        rt.terminate(e.category());
    }

    match run(&rt) {
        Ok(()) => rt.terminate(ExitCategory::Ok),
        Err(e) => {
            let _ = rt.log(&format!("{}", e));
            ui::print_error(&format!("{}", e));
            rt.terminate(e.category());
        }
    }
}

fn run(rt: &Runtime) -> Result<(), BumpError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let words: Vec<&str> = args.iter().map(String::as_str).collect();

    match words.as_slice() {
        // The one stdout writer: scripts capture it, diagnostics stay on stderr.
        ["stamp"] => {
            println!("{}", rt.stamp());
            Ok(())
        }
        ["preflight"] => preflight(rt),
        ["check", rest @ ..] => check(rt, rest),
        ["verify", path, expected] => {
            checks::verify_sha256(rt, path, expected)?;
            ui::print_success(&format!("checksum verified for {}", path));
            Ok(())
        }
        _ => {
            usage();
            Err(BumpError::MissingInput("subcommand".to_string()))
        }
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn check(rt: &Runtime, args: &[&str]) -> Result<(), BumpError> {
    match args {
        ["value", label, value] => checks::require_value(rt, label, value),
        ["file", path] => checks::require_file(rt, path),
        ["dir", path] => checks::require_dir(rt, path),
        ["device", path] => checks::require_block_device(rt, path),
        ["mounted", path] => checks::require_mount_point(rt, path),
        ["command", name] => checks::require_command(rt, name),
        ["contains", path, needle] => checks::require_file_contains(rt, path, needle),
        _ => {
            usage();
            Err(BumpError::MissingInput("check arguments".to_string()))
        }
    }
}

/// Validates everything a run needs before any state-mutating action: the
/// environment-provided parameters, then the provisioning toolchain.
fn preflight(rt: &Runtime) -> Result<(), BumpError> {
    let provision = Provision::from_env()?;
    rt.log_setting("target hostname", &provision.target_hostname)?;
    rt.log_setting("target user", &provision.target_user)?;

    ui::print_info("checking required provisioning commands");
    for name in REQUIRED_COMMANDS {
        checks::require_command(rt, name)?;
    }

    for name in OPTIONAL_COMMANDS {
        if let Err(e) = checks::require_command(rt, name) {
            rt.report(e.category(), &format!("optional command '{}'", name));
            ui::print_warning(&format!("optional command '{}' not found", name));
        }
    }

    ui::print_success("preflight passed");
    Ok(())
}

fn usage() {
    eprintln!("usage: bump <subcommand>");
    eprintln!();
    eprintln!("  stamp                          print the run stamp");
    eprintln!("  preflight                      validate env parameters and tooling");
    eprintln!("  check value <label> <value>    non-empty value");
    eprintln!("  check file <path>              file exists");
    eprintln!("  check dir <path>               directory exists");
    eprintln!("  check device <path>            block device exists");
    eprintln!("  check mounted <path>           something is mounted at path");
    eprintln!("  check command <name>           command resolvable on PATH");
    eprintln!("  check contains <path> <text>   file contains text");
    eprintln!("  verify <path> <sha256>         checksum matches");
    eprintln!();
    eprintln!("exits 0 on success, or with the failure's category code");
}
