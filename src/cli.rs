//! Command-line interface definition.
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{RawParams, Sudo};

/// Top-level CLI entry point for the ansible master planner.
#[derive(Parser, Debug)]
#[command(
    name = "ansible-master",
    about = "Plan the configuration of an ansible master host",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Path to the TOML config file
    #[arg(long, global = true, env = "ANSIBLE_MASTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// OS family fact (skips detection), e.g. Debian, RedHat
    #[arg(long, global = true)]
    pub os_family: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate all policies and print the resulting declarations
    Plan(PlanOpts),
    /// Check the configuration without printing a plan
    Validate(ValidateOpts),
    /// Print version information
    Version,
}

/// Parameter overrides layered over the config file.
#[derive(Parser, Debug, Clone, Default)]
pub struct ParamOverrides {
    /// Whether to manage the ansible user account
    #[arg(long, value_name = "BOOL")]
    pub manage_user: Option<bool>,

    /// Sudo setting for the managed user
    #[arg(long, value_enum)]
    pub sudo: Option<Sudo>,

    /// Install provider (automatic, manual, or a recognized extra provider)
    #[arg(long)]
    pub provider: Option<String>,

    /// Additional installable provider (repeatable)
    #[arg(long = "extra-provider", value_name = "NAME")]
    pub extra_providers: Vec<String>,
}

impl ParamOverrides {
    /// Convert the overrides into raw parameters.
    #[must_use]
    pub fn to_raw(&self) -> RawParams {
        RawParams {
            manage_user: self.manage_user,
            sudo: self.sudo,
            provider: self.provider.clone(),
            extra_providers: self.extra_providers.clone(),
        }
    }
}

/// Output format of the `plan` subcommand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One line per declaration.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Options for the `plan` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct PlanOpts {
    /// Parameter overrides.
    #[command(flatten)]
    pub overrides: ParamOverrides,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

/// Options for the `validate` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ValidateOpts {
    /// Parameter overrides.
    #[command(flatten)]
    pub overrides: ParamOverrides,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_plan_defaults() {
        let cli = Cli::parse_from(["ansible-master", "plan"]);
        let Command::Plan(opts) = cli.command else {
            panic!("expected plan command");
        };
        assert_eq!(opts.format, Format::Text);
        assert_eq!(opts.overrides.to_raw(), RawParams::default());
    }

    #[test]
    fn parse_plan_overrides() {
        let cli = Cli::parse_from([
            "ansible-master",
            "plan",
            "--manage-user",
            "false",
            "--sudo",
            "disable",
            "--provider",
            "pip",
            "--extra-provider",
            "pip",
            "--format",
            "json",
        ]);
        let Command::Plan(opts) = cli.command else {
            panic!("expected plan command");
        };
        let raw = opts.overrides.to_raw();
        assert_eq!(raw.manage_user, Some(false));
        assert_eq!(raw.sudo, Some(Sudo::Disable));
        assert_eq!(raw.provider.as_deref(), Some("pip"));
        assert_eq!(raw.extra_providers, ["pip"]);
        assert_eq!(opts.format, Format::Json);
    }

    #[test]
    fn parse_rejects_unknown_sudo() {
        assert!(Cli::try_parse_from(["ansible-master", "plan", "--sudo", "maybe"]).is_err());
    }

    #[test]
    fn parse_global_options() {
        let cli = Cli::parse_from([
            "ansible-master",
            "--config",
            "/tmp/config.toml",
            "--os-family",
            "Debian",
            "validate",
        ]);
        assert_eq!(cli.global.config, Some(PathBuf::from("/tmp/config.toml")));
        assert_eq!(cli.global.os_family.as_deref(), Some("Debian"));
        assert!(matches!(cli.command, Command::Validate(_)));
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["ansible-master", "version"]);
        assert!(matches!(cli.command, Command::Version));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["ansible-master", "-v", "plan"]);
        assert!(cli.verbose);
    }
}
