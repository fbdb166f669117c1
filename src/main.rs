use anyhow::Result;
use clap::Parser;

mod catalog;
mod cli;
mod config;
mod counters;
mod csv_input;
mod logging;
mod orchestrator;
mod progress;
mod response;
mod run;
mod spawner;
mod xmlmc;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    if args.version {
        println!("{}", run::VERSION);
        return Ok(());
    }
    let config = config::RunConfig::from_args(args);
    let log_path = logging::init(&config.log_dir)?;
    tracing::debug!(log = %log_path.display(), "run log opened");
    run::run(&config)
}
