pub mod cli;
pub mod config;
pub mod context;
pub mod emit;
pub mod error;
pub mod export;
pub mod host;
pub mod plan;
pub mod report;
pub mod resolve;
pub mod runtime;

pub use config::{EnvMap, GameplayPayload, GpuSwitch, LaunchConfig, RuntimeSettings};
pub use context::ContextEnv;
pub use emit::ScriptEmitter;
pub use error::LaunchError;
pub use export::export_script;
pub use host::Host;
pub use plan::{build_launch_plan, LaunchPlan, Runner};
pub use runtime::ConfiguredRunner;
