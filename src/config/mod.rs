// src/config/mod.rs

pub mod env;
pub mod game;
pub mod settings;

pub use env::{EnvMap, RunnerConfig};
pub use game::GameplayPayload;
pub use settings::{GpuSwitch, RuntimeSettings};

use anyhow::{bail, Context as _, Result};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct LaunchConfig {
	#[serde(default)]
	pub system: RuntimeSettings,

	#[serde(default)]
	pub runner: RunnerConfig,

	pub game: GameplayPayload,
}

impl LaunchConfig {
	pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path)
			.with_context(|| format!("failed to read config at {}", path.display()))?;
		Self::from_toml_str(&text).with_context(|| format!("invalid config at {}", path.display()))
	}

	pub fn from_toml_str(text: &str) -> Result<Self> {
		let cfg: LaunchConfig = toml::from_str(text)?;
		if cfg.game.command.is_empty() {
			bail!("game.command must contain at least the executable");
		}
		Ok(cfg)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn full_config_parses() {
		let cfg = LaunchConfig::from_toml_str(
			r#"
[system]
optimus = "optirun"
mangohud = "on"
fps_limit = "60"
prefix_command = "firejail --net=none"
single_cpu = true
gamemode = true

[runner]
env_file = "{config_dir}/runner.env"
[runner.env]
DXVK_HUD = "fps"

[game]
command = ["/usr/bin/game", "-windowed"]
ld_preload = "/opt/lib/hook.so"
ld_library_path = "/opt/game/lib"
[game.env]
SDL_VIDEODRIVER = "x11"
"#,
		)
		.unwrap();

		assert_eq!(cfg.system.optimus, GpuSwitch::Optirun);
		assert_eq!(cfg.system.fps_limit, "60");
		assert!(cfg.system.single_cpu);
		assert!(cfg.system.gamemode);
		assert_eq!(cfg.runner.env.get("DXVK_HUD").map(String::as_str), Some("fps"));
		assert_eq!(cfg.runner.env_file.as_deref(), Some("{config_dir}/runner.env"));
		assert_eq!(cfg.game.command, vec!["/usr/bin/game", "-windowed"]);
		assert_eq!(cfg.game.ld_library_path.as_deref(), Some("/opt/game/lib"));
		assert_eq!(
			cfg.game.env.as_ref().and_then(|e| e.get("SDL_VIDEODRIVER")).map(String::as_str),
			Some("x11")
		);
	}

	#[test]
	fn missing_tables_use_defaults() {
		let cfg = LaunchConfig::from_toml_str("[game]\ncommand = [\"game\"]\n").unwrap();
		assert_eq!(cfg.system.optimus, GpuSwitch::Off);
		assert!(cfg.system.mangohud.is_empty());
		assert!(!cfg.system.gamemode);
		assert!(cfg.runner.env.is_empty());
		assert!(cfg.game.env.is_none());
		assert!(cfg.game.ld_preload.is_none());
	}

	#[test]
	fn unknown_optimus_value_is_off() {
		let cfg = LaunchConfig::from_toml_str(
			"[system]\noptimus = \"bumblebee\"\n[game]\ncommand = [\"game\"]\n",
		)
		.unwrap();
		assert_eq!(cfg.system.optimus, GpuSwitch::Off);
	}

	#[test]
	fn every_optimus_name_maps_to_its_variant() {
		let cases = [
			("off", GpuSwitch::Off),
			("primusrun", GpuSwitch::Primusrun),
			("optirun", GpuSwitch::Optirun),
			("pvkrun", GpuSwitch::Pvkrun),
		];
		for (name, want) in cases {
			let text = format!("[system]\noptimus = \"{name}\"\n[game]\ncommand = [\"game\"]\n");
			let cfg = LaunchConfig::from_toml_str(&text).unwrap();
			assert_eq!(cfg.system.optimus, want, "optimus = {name:?}");
		}
	}

	#[test]
	fn empty_command_is_rejected() {
		let err = LaunchConfig::from_toml_str("[game]\ncommand = []\n").unwrap_err();
		assert!(err.to_string().contains("game.command"));
	}
}
