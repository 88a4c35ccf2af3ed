use std::path::Path;

use crate::{checks, cmd, error::BumpError, exit::ExitCategory};

// ── Canned cleanup actions ────────────────────────────────────────────────────
//
// Constructors for the teardown closures a provisioning run registers right
// after acquiring each resource. Every closure is idempotent-safe: it no-ops
// when the run is terminating successfully and when its resource was never
// acquired (or is already gone), so registering before the acquisition
// actually happens is fine. Commands run best-effort so one stuck resource
// never blocks the rest of the registry.

/// Recursively unmounts `path` if anything is mounted there.
pub fn unmount(path: &str) -> impl FnMut(ExitCategory) -> Result<(), BumpError> + Send + 'static {
    let path = path.to_string();
    move |category| {
        if category.is_success() || !checks::is_mounted(&path)? {
            return Ok(());
        }
        cmd::run_best_effort("umount", &["-R", &path]);
        Ok(())
    }
}

/// Closes the dm-crypt mapping `name` if it is open.
pub fn close_crypt(name: &str) -> impl FnMut(ExitCategory) -> Result<(), BumpError> + Send + 'static {
    let name = name.to_string();
    move |category| {
        if category.is_success() || !Path::new("/dev/mapper").join(&name).exists() {
            return Ok(());
        }
        cmd::run_best_effort("cryptsetup", &["close", &name]);
        Ok(())
    }
}

/// Deactivates the LVM volume group `name` if it is active.
pub fn deactivate_vg(
    name: &str,
) -> impl FnMut(ExitCategory) -> Result<(), BumpError> + Send + 'static {
    let name = name.to_string();
    move |category| {
        if category.is_success() || !Path::new("/dev").join(&name).exists() {
            return Ok(());
        }
        cmd::run_best_effort("vgchange", &["-an", &name]);
        Ok(())
    }
}

/// Deactivates swap on `device` if the device node exists.
pub fn swapoff(device: &str) -> impl FnMut(ExitCategory) -> Result<(), BumpError> + Send + 'static {
    let device = device.to_string();
    move |category| {
        if category.is_success() || !Path::new(&device).exists() {
            return Ok(());
        }
        cmd::run_best_effort("swapoff", &[&device]);
        Ok(())
    }
}
