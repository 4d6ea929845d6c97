// src/config/settings.rs

/// GPU switching helper for hybrid graphics laptops.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpuSwitch {
	Primusrun,
	Optirun,
	Pvkrun,
	/// Also the fallback for unrecognised names; serde wants this last.
	#[default]
	#[serde(other)]
	Off,
}

/// Per-run system options (the `[system]` table).
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct RuntimeSettings {
	#[serde(default)]
	pub optimus: GpuSwitch,

	/// MangoHud mode; any non-empty value enables the overlay.
	#[serde(default)]
	pub mangohud: String,

	/// Frame limit handed to libstrangle, e.g. "60".
	#[serde(default)]
	pub fps_limit: String,

	/// Shell-style command placed in front of the game.
	#[serde(default)]
	pub prefix_command: String,

	#[serde(default)]
	pub single_cpu: bool,

	/// Feral gamemode.
	#[serde(default)]
	pub gamemode: bool,
}
