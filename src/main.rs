//! `ansible-master` command-line entry point.
use ansible_master::{cli, commands, logging};
use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    let command = match &args.command {
        cli::Command::Plan(_) => "plan",
        cli::Command::Validate(_) => "validate",
        cli::Command::Version => {
            commands::version::run();
            return Ok(());
        }
    };
    logging::init_subscriber(args.verbose, command);
    let log = logging::Logger::new(command);

    match args.command {
        cli::Command::Plan(opts) => commands::plan::run(&args.global, &opts, &log),
        cli::Command::Validate(opts) => commands::validate::run(&args.global, &opts, &log),
        cli::Command::Version => Ok(()),
    }
}
