// src/config/game.rs
use super::EnvMap;

/// What the runner wants executed: base command plus game-specific env.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct GameplayPayload {
	pub command: Vec<String>,

	#[serde(default)]
	pub env: Option<EnvMap>,

	#[serde(default)]
	pub ld_preload: Option<String>,

	#[serde(default)]
	pub ld_library_path: Option<String>,
}

impl GameplayPayload {
	pub fn new<I, S>(command: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			command: command.into_iter().map(Into::into).collect(),
			..Self::default()
		}
	}
}
