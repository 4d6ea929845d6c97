use std::{fs, path::Path};

use crate::{
    config::GameplayPayload,
    emit::ScriptEmitter,
    error::{LaunchError, Result},
    host::Host,
    plan::{build_launch_plan, Runner},
};

/// Resolve the launch plan and write it out as an executable shell script.
///
/// Write then chmod, no rollback: if the chmod fails the script is complete
/// but not executable.
pub fn export_script(
    runner: &dyn Runner,
    payload: &GameplayPayload,
    host: &dyn Host,
    script_path: &Path,
) -> Result<()> {
    let mut plan = build_launch_plan(runner, payload, host)?;
    // Scripts run outside a terminal still need a sane TERM.
    plan.env.insert("TERM".to_string(), "xterm".to_string());

    let text = ScriptEmitter::new().render(&plan);
    fs::write(script_path, text).map_err(|e| LaunchError::fs(script_path, e))?;

    add_owner_exec(script_path)?;
    tracing::info!("exported launch script to {}", script_path.display());
    Ok(())
}

#[cfg(unix)]
fn add_owner_exec(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt as _;

    let mode = fs::metadata(path)
        .map_err(|e| LaunchError::fs(path, e))?
        .permissions()
        .mode();
    fs::set_permissions(path, fs::Permissions::from_mode(mode | 0o100))
        .map_err(|e| LaunchError::fs(path, e))
}

#[cfg(not(unix))]
fn add_owner_exec(_path: &Path) -> Result<()> {
    Ok(())
}
