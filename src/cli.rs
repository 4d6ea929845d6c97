use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "launchplan", version, about)]
pub struct Args {
    /// Path to config.toml (overrides LAUNCHPLAN_CONFIG and XDG default)
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Log info-level messages (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Dump runtime context (resolved config path + env map) and exit
    #[arg(long, default_value_t = false)]
    pub dump_context: bool,

    /// Disable redaction in context dump
    #[arg(long = "no-redact", default_value_t = false)]
    pub no_redact: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved argv and environment
    Show {
        #[arg(long, value_enum, default_value_t = ShowFormat::Text)]
        format: ShowFormat,
    },
    /// Write the launch plan as an executable shell script
    Export {
        /// Destination script path
        dest: std::path::PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    Text,
    Json,
}
