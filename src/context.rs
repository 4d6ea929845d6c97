use anyhow::{bail, Context as _, Result};
use std::path::{Path, PathBuf};

use crate::config::EnvMap;

/// Snapshot of the invoking process: its environment and the directories
/// config lookup needs. Also acts as the real [`crate::host::Host`].
#[derive(Debug, Clone)]
pub struct ContextEnv {
    pub(crate) vars: EnvMap,
    pub(crate) home: PathBuf,
    pub(crate) xdg_config_home: PathBuf,

    config_path: Option<PathBuf>,
    config_dir: Option<PathBuf>,
}

impl ContextEnv {
    pub fn new() -> Result<Self> {
        let vars: EnvMap = std::env::vars().collect();

        let home = dirs::home_dir()
            .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
            .context("could not determine home directory")?;

        Ok(Self::from_parts(vars, home))
    }

    /// Build a context from an explicit environment (no process lookups).
    pub fn from_parts(vars: EnvMap, home: PathBuf) -> Self {
        // XDG_CONFIG_HOME: honor if present, else fallback to ~/.config
        let xdg_config_home = match vars
            .get("XDG_CONFIG_HOME")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            Some(s) => PathBuf::from(s),
            None => home.join(".config"),
        };

        Self {
            vars,
            home,
            xdg_config_home,
            config_path: None,
            config_dir: None,
        }
    }

    // ---------- public getters ----------

    pub fn vars(&self) -> &EnvMap {
        &self.vars
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    pub fn default_config_path(&self) -> PathBuf {
        self.xdg_config_home.join("launchplan").join("config.toml")
    }

    // ---------- locating paths ----------

    /// Config path precedence:
    /// 1) CLI --config
    /// 2) LAUNCHPLAN_CONFIG
    /// 3) default XDG_CONFIG_HOME/launchplan/config.toml
    ///
    /// Whichever wins must exist.
    pub fn locate_config(&mut self, cli_config: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(p) = cli_config {
            if !p.exists() {
                bail!("--config was provided but file does not exist: {}", p.display());
            }
            self.set_config_path(p.clone());
            return Ok(p.clone());
        }

        if let Some(p) = self.get_env_path("LAUNCHPLAN_CONFIG") {
            if !p.exists() {
                bail!(
                    "LAUNCHPLAN_CONFIG is set but file does not exist: {}",
                    p.display()
                );
            }
            self.set_config_path(p.clone());
            return Ok(p);
        }

        let p = self.default_config_path();
        if !p.exists() {
            bail!(
                "no config found; create {} or pass --config",
                p.display()
            );
        }
        self.set_config_path(p.clone());
        Ok(p)
    }

    fn set_config_path(&mut self, path: PathBuf) {
        self.config_dir = path.parent().map(Path::to_path_buf);
        self.config_path = Some(path);
    }

    fn get_env_path(&self, key: &str) -> Option<PathBuf> {
        self.vars
            .get(key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }

    // ---------- dump ----------

    pub fn debug_dump(&self, redact: bool) -> String {
        let mut out = String::new();

        out.push_str("launchplan context (debug)\n");
        out.push_str("==========================\n");

        out.push_str(&format!("home: {}\n", self.home.to_string_lossy()));
        out.push_str(&format!(
            "xdg_config_home: {}\n",
            self.xdg_config_home.to_string_lossy()
        ));
        out.push_str(&format!(
            "config_path: {}\n",
            self.config_path
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|| "<unset>".to_string())
        ));

        out.push_str("\nvars:\n");
        for (k, v) in &self.vars {
            if redact && looks_sensitive_key(k) {
                out.push_str(&format!("  {} = <redacted>\n", k));
            } else {
                out.push_str(&format!("  {} = {}\n", k, v));
            }
        }

        out
    }
}

// -------------------- helpers --------------------

fn looks_sensitive_key(k: &str) -> bool {
    let u = k.to_ascii_uppercase();
    u.contains("TOKEN")
        || u.contains("SECRET")
        || u.contains("PASSWORD")
        || u.contains("PRIVATE")
        || u.ends_with("_API_KEY")
}
