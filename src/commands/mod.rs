//! Top-level subcommand orchestration.
pub mod plan;
pub mod validate;
pub mod version;

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use crate::cli::{GlobalOpts, ParamOverrides};
use crate::config::validation::{self, ValidationWarning};
use crate::config::{self, ModuleConfig, RawParams};
use crate::facts::{Facts, OsFamily};
use crate::logging::{Logger, PolicyStatus};
use crate::policies::{self, Evaluation};

/// Config file used when neither `--config` nor `ANSIBLE_MASTER_CONFIG` is set.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/ansible-master/config.toml";

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates fact detection, configuration loading, validation and
/// parameter resolution so that each command does not repeat them.
#[derive(Debug)]
pub struct CommandSetup {
    /// Config file the parameters were read from.
    pub config_path: PathBuf,
    /// Merged, unresolved parameters.
    pub raw: RawParams,
    /// Non-fatal configuration warnings.
    pub warnings: Vec<ValidationWarning>,
    /// Resolved configuration.
    pub config: ModuleConfig,
}

impl CommandSetup {
    /// Gather facts, load the config file, apply overrides and resolve.
    ///
    /// # Errors
    ///
    /// Returns an error if fact detection fails or the config file cannot be
    /// read or parsed.
    pub fn init(global: &GlobalOpts, overrides: &ParamOverrides, log: &Logger) -> Result<Self> {
        log.stage("Gathering facts");
        let facts = resolve_facts(global)?;
        log.info(&format!("osfamily: {}", facts.os_family));

        Self::load(&resolve_config_path(global), facts, overrides.to_raw(), log)
    }

    /// Load `config_path`, layer `overrides` over it and resolve against
    /// `facts`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn load(
        config_path: &Path,
        facts: Facts,
        overrides: RawParams,
        log: &Logger,
    ) -> Result<Self> {
        log.stage("Loading configuration");
        if config_path.exists() {
            log.debug(&format!("reading {}", config_path.display()));
        } else {
            log.debug(&format!(
                "{} not found, using defaults",
                config_path.display()
            ));
        }

        let raw = RawParams::load(config_path)
            .with_context(|| format!("loading {}", config_path.display()))?
            .merge(overrides);

        let warnings = validation::validate(&raw, &facts);
        if !warnings.is_empty() {
            log.warn(&format!(
                "found {} configuration warning(s):",
                warnings.len()
            ));
            for warning in &warnings {
                log.warn(&format!("  {}: {}", warning.key, warning.message));
            }
        }

        let config = config::resolve(raw.clone(), facts);
        log.info(&format!(
            "manage_user: {}, sudo: {}, provider: {}",
            config.manage_user, config.sudo, config.provider
        ));
        log.debug(&format!(
            "recognized providers: {}",
            config.providers.names().join(", ")
        ));

        Ok(Self {
            config_path: config_path.to_path_buf(),
            raw,
            warnings,
            config,
        })
    }
}

/// Resolve the config file path from CLI arguments (or the environment,
/// via clap) with a system-wide default.
#[must_use]
pub fn resolve_config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Use the `--os-family` fact if given, otherwise detect it.
///
/// # Errors
///
/// Returns an error if detection fails.
pub fn resolve_facts(global: &GlobalOpts) -> Result<Facts> {
    match &global.os_family {
        Some(family) => Ok(Facts::new(OsFamily::parse(family))),
        None => Facts::detect().context("detecting host facts"),
    }
}

/// Evaluate every policy, logging and recording each outcome, then print
/// the summary.
pub fn evaluate_policies(config: &ModuleConfig, log: &Logger) -> Evaluation {
    log.stage("Evaluating policies");
    let evaluation = policies::evaluate(config);

    for outcome in evaluation.outcomes() {
        match &outcome.result {
            Ok(Some(declaration)) => {
                let declared = declaration.to_string();
                log.debug(&format!("{}: {declared}", outcome.policy));
                log.record_policy(outcome.policy, PolicyStatus::Ok, Some(&declared));
            }
            Ok(None) => {
                log.debug(&format!("{}: nothing to declare", outcome.policy));
                log.record_policy(outcome.policy, PolicyStatus::NotApplicable, None);
            }
            Err(e) => {
                log.error(&format!("{}: {e}", outcome.policy));
                log.record_policy(outcome.policy, PolicyStatus::Failed, Some(&e.to_string()));
            }
        }
    }

    log.print_summary();
    evaluation
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Sudo;
    use crate::config::test_helpers::{debian, write_temp_toml};

    fn global(config: Option<PathBuf>, os_family: Option<&str>) -> GlobalOpts {
        GlobalOpts {
            config,
            os_family: os_family.map(String::from),
        }
    }

    #[test]
    fn config_path_defaults_to_etc() {
        assert_eq!(
            resolve_config_path(&global(None, None)),
            PathBuf::from("/etc/ansible-master/config.toml")
        );
    }

    #[test]
    fn config_path_uses_explicit_path() {
        let path = PathBuf::from("/explicit/config.toml");
        assert_eq!(resolve_config_path(&global(Some(path.clone()), None)), path);
    }

    #[test]
    fn os_family_override_skips_detection() {
        let facts = resolve_facts(&global(None, Some("RedHat"))).unwrap();
        assert_eq!(facts.os_family, OsFamily::RedHat);
    }

    #[test]
    fn load_merges_file_and_overrides() {
        let (_dir, path) = write_temp_toml("sudo = \"disable\"\nprovider = \"manual\"\n");
        let log = Logger::new("test");
        let overrides = RawParams {
            provider: Some("automatic".to_string()),
            ..RawParams::default()
        };
        let setup = CommandSetup::load(&path, debian(), overrides, &log).unwrap();
        assert_eq!(setup.config.sudo, Sudo::Disable);
        assert_eq!(setup.config.provider.as_str(), "automatic");
        assert!(setup.warnings.is_empty());
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let log = Logger::new("test");
        let setup = CommandSetup::load(
            &dir.path().join("missing.toml"),
            debian(),
            RawParams::default(),
            &log,
        )
        .unwrap();
        assert_eq!(setup.raw, RawParams::default());
        assert!(setup.config.manage_user);
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let (_dir, path) = write_temp_toml("manage_user = 3\n");
        let log = Logger::new("test");
        let err = CommandSetup::load(&path, debian(), RawParams::default(), &log).unwrap_err();
        assert!(format!("{err:#}").contains("loading "));
    }

    #[test]
    fn evaluate_policies_records_each_outcome() {
        let log = Logger::new("test");
        let config = config::resolve(
            RawParams {
                provider: Some("anonsupportedprovider".to_string()),
                ..RawParams::default()
            },
            debian(),
        );
        let evaluation = evaluate_policies(&config, &log);
        assert!(evaluation.has_failures());
        let statuses: Vec<_> = log.entries().iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            [PolicyStatus::Ok, PolicyStatus::Failed, PolicyStatus::Ok]
        );
        assert_eq!(log.failure_count(), 1);
    }
}
