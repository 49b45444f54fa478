use clap::Parser;
use repokit::{cli, cmds, config::Settings, process::SystemRunner};
use tracing_subscriber::EnvFilter;

fn main() -> repokit::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::RepokitCli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    cmds::run(cli.command, &settings, &SystemRunner::new())
}
