use anyhow::{Context as _, Result};
use clap::Parser;
use launchplan::cli::{Args, Command, ShowFormat};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn setup_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install log subscriber")
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose)?;

    let mut ctx = launchplan::ContextEnv::new()?;

    if args.dump_context {
        // Best effort: the dump is most useful when the config is broken.
        if let Err(e) = ctx.locate_config(args.config.as_ref()) {
            tracing::warn!("{e:#}");
        }
        print!("{}", ctx.debug_dump(!args.no_redact));
        return Ok(());
    }

    let cfg_path = ctx.locate_config(args.config.as_ref())?;
    let cfg = launchplan::LaunchConfig::load_from_path(&cfg_path)?;
    let runner = launchplan::ConfiguredRunner::build(&ctx, &cfg)?;

    match args.command.unwrap_or(Command::Show {
        format: ShowFormat::Text,
    }) {
        Command::Show { format } => {
            let plan = launchplan::build_launch_plan(&runner, &cfg.game, &ctx)?;
            println!("{}", launchplan::report::build_report(&plan, format)?);
        }
        Command::Export { dest } => {
            launchplan::export_script(&runner, &cfg.game, &ctx, &dest)
                .with_context(|| format!("failed to export {}", dest.display()))?;
            println!("{}", dest.display());
        }
    }

    Ok(())
}
