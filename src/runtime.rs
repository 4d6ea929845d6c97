use crate::{
    config::{EnvMap, LaunchConfig, RuntimeSettings},
    context::ContextEnv,
    plan::Runner,
    resolve::Resolver,
};
use anyhow::{Context as _, Result};
use std::{fs, path::Path};

/// A runner assembled from the config file: `[system]` settings plus the
/// `[runner]` base environment.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredRunner {
    pub settings: RuntimeSettings,
    pub env: EnvMap,
}

impl ConfiguredRunner {
    pub fn new(settings: RuntimeSettings, env: EnvMap) -> Self {
        Self { settings, env }
    }

    pub fn build(ctx: &ContextEnv, cfg: &LaunchConfig) -> Result<Self> {
        let mut env = cfg.runner.env.clone();

        if let Some(raw) = cfg.runner.env_file.as_deref() {
            let r = Resolver::new(ctx);
            let env_file = r
                .resolve(raw)
                .with_context(|| format!("failed to resolve runner.env_file: {raw}"))?;
            merge_env_file(&mut env, Path::new(&env_file))?;
        }

        Ok(Self {
            settings: cfg.system.clone(),
            env,
        })
    }
}

impl Runner for ConfiguredRunner {
    fn system_config(&self) -> &RuntimeSettings {
        &self.settings
    }

    fn base_env(&self) -> EnvMap {
        self.env.clone()
    }
}

/// File values override inline `[runner.env]` values.
fn merge_env_file(vars: &mut EnvMap, path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::debug!("runner env file {} not found, skipping", path.display());
        return Ok(());
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read env file: {}", path.display()))?;

    let incoming = parse_env_text(&text)
        .with_context(|| format!("invalid env file: {}", path.display()))?;
    vars.extend(incoming);
    Ok(())
}

fn parse_env_text(text: &str) -> Result<EnvMap> {
    let mut out = EnvMap::new();

    for (idx, line) in text.lines().enumerate() {
        let mut s = line.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }

        if let Some(rest) = s.strip_prefix("export ") {
            s = rest.trim();
        }

        let (k, v) = s.split_once('=').with_context(|| {
            format!(
                "invalid env line {} (expected KEY=VALUE): {}",
                idx + 1,
                line
            )
        })?;

        let key = k.trim().to_string();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();

        // Remove surrounding quotes (simple)
        if val.len() >= 2 {
            let bytes = val.as_bytes();
            let first = bytes[0];
            let last = bytes[bytes.len() - 1];
            if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
                val = val[1..val.len() - 1].to_string();
            }
        }
        out.insert(key, val);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_dotenv_lines() {
        let env = parse_env_text(
            "# comment\n\nexport DXVK_HUD=fps\nWINEDEBUG=\"-all\"\nPROTON_LOG='1'\n =ignored\n",
        )
        .unwrap();

        assert_eq!(env.get("DXVK_HUD").map(String::as_str), Some("fps"));
        assert_eq!(env.get("WINEDEBUG").map(String::as_str), Some("-all"));
        assert_eq!(env.get("PROTON_LOG").map(String::as_str), Some("1"));
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn rejects_lines_without_equals() {
        let err = parse_env_text("JUST_A_WORD\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn env_file_overrides_inline_env() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(dir.path().join("runner.env"), "WINEDEBUG=-all\nDXVK_ASYNC=1\n").unwrap();
        fs::write(
            &cfg_path,
            r#"
[runner]
env_file = "{config_dir}/runner.env"
[runner.env]
WINEDEBUG = "+relay"
DXVK_HUD = "fps"

[game]
command = ["game"]
"#,
        )
        .unwrap();

        let mut ctx = ContextEnv::from_parts(EnvMap::new(), PathBuf::from("/home/player"));
        ctx.locate_config(Some(&cfg_path)).unwrap();
        let cfg = LaunchConfig::load_from_path(&cfg_path).unwrap();

        let runner = ConfiguredRunner::build(&ctx, &cfg).unwrap();
        let env = runner.base_env();

        assert_eq!(env.get("WINEDEBUG").map(String::as_str), Some("-all"));
        assert_eq!(env.get("DXVK_ASYNC").map(String::as_str), Some("1"));
        assert_eq!(env.get("DXVK_HUD").map(String::as_str), Some("fps"));
    }

    #[test]
    fn missing_env_file_is_skipped() {
        let cfg = LaunchConfig::from_toml_str(
            "[runner]\nenv_file = \"/nope/runner.env\"\n[game]\ncommand = [\"game\"]\n",
        )
        .unwrap();
        let ctx = ContextEnv::from_parts(EnvMap::new(), PathBuf::from("/home/player"));

        let runner = ConfiguredRunner::build(&ctx, &cfg).unwrap();
        assert!(runner.base_env().is_empty());
    }
}
