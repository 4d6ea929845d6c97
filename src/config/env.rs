// src/config/env.rs
use std::collections::BTreeMap;

pub type EnvMap = BTreeMap<String, String>;

/// Runner-level environment: the base every launch plan starts from.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct RunnerConfig {
	/// Inline env vars.
	#[serde(default)]
	pub env: EnvMap,

	/// Optional dotenv-style file merged over `env` (supports `{config_dir}`, `{home}`).
	#[serde(default)]
	pub env_file: Option<String>,
}
