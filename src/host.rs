use std::path::{Path, PathBuf};

use crate::context::ContextEnv;

/// Library gamemode injects through `LD_PRELOAD` when `gamemoderun` is missing.
pub const GAMEMODE_LIB: &str = "libgamemodeauto.so";

/// What the launch plan needs to know about the machine it runs on.
pub trait Host {
    /// Resolve `name` against the search path.
    fn find_executable(&self, name: &str) -> Option<PathBuf>;

    /// Whether Feral gamemode can be activated on this system.
    fn gamemode_active(&self) -> bool;

    /// Process environment lookup, used to expand prefix commands.
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Host for ContextEnv {
    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        let path_val = self.vars.get("PATH").map(|s| s.as_str()).unwrap_or("");
        find_in_path(path_val, name)
    }

    fn gamemode_active(&self) -> bool {
        self.find_executable("gamemoderun").is_some() || gamemode_lib_installed()
    }

    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Search a colon-separated `PATH` value for an executable file.
/// A name containing `/` is checked as a path instead.
pub fn find_in_path(path_val: &str, cmd: &str) -> Option<PathBuf> {
    if cmd.is_empty() {
        return None;
    }

    if cmd.contains('/') {
        let p = Path::new(cmd);
        return is_executable_file(p).then(|| p.to_path_buf());
    }

    path_val
        .split(':')
        .filter(|s| !s.is_empty())
        .map(|dir| Path::new(dir).join(cmd))
        .find(|candidate| is_executable_file(candidate))
}

#[cfg(unix)]
fn is_executable_file(p: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt as _;
    std::fs::metadata(p)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(p: &Path) -> bool {
    p.is_file()
}

const GAMEMODE_LIB_PATTERNS: &[&str] = &[
    "/usr/lib/libgamemodeauto.so*",
    "/usr/lib64/libgamemodeauto.so*",
    "/usr/lib/*-linux-gnu/libgamemodeauto.so*",
    "/usr/local/lib/libgamemodeauto.so*",
    "/usr/local/lib64/libgamemodeauto.so*",
];

fn gamemode_lib_installed() -> bool {
    GAMEMODE_LIB_PATTERNS
        .iter()
        .any(|pattern| first_glob_match(pattern).is_some())
}

/// Returns the first existing path matching `pattern`, if any.
fn first_glob_match(pattern: &str) -> Option<PathBuf> {
    glob::glob(pattern).ok()?.filter_map(|e| e.ok()).next()
}
