mod cli;
mod effects;
mod persistence;
mod session;
mod ui;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    describer_logging::initialize(cli.log.into(), cli.log_level());
    session::run(cli)
}
