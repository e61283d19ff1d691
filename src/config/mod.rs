//! Configuration surface and the parameter resolver.
//!
//! [`RawParams`] is what a config file or the command line supplies, every
//! key optional. [`resolve`] applies the defaults and produces the immutable
//! [`ModuleConfig`] consumed by the policies.
pub mod toml_loader;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::ConfigError;
use crate::facts::Facts;

/// Provider name that suppresses installation.
pub const MANUAL_PROVIDER: &str = "manual";

/// Provider name that is always installable and used by default.
pub const AUTOMATIC_PROVIDER: &str = "automatic";

/// Whether the managed account is granted sudo rights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sudo {
    /// Grant sudo rights.
    #[default]
    Enable,
    /// Do not grant sudo rights.
    Disable,
}

impl Sudo {
    /// The configuration spelling of this value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

impl fmt::Display for Sudo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy used to install the ansible tooling.
///
/// Parsing never fails: names other than `automatic` and `manual` land in
/// [`Provider::Other`] and are checked against a [`ProviderSet`] by the
/// install policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Provider {
    /// Install through the host package manager.
    #[default]
    Automatic,
    /// Installed out of band; nothing is requested.
    Manual,
    /// Any other provider name.
    Other(String),
}

impl Provider {
    /// The configuration spelling of this provider.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Automatic => AUTOMATIC_PROVIDER,
            Self::Manual => MANUAL_PROVIDER,
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for Provider {
    fn from(name: &str) -> Self {
        match name {
            AUTOMATIC_PROVIDER => Self::Automatic,
            MANUAL_PROVIDER => Self::Manual,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Provider {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The set of recognized installable providers.
///
/// Always contains `automatic`; extended by `extra_providers`. `manual` is
/// never a member since it never installs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSet {
    names: Vec<String>,
}

impl Default for ProviderSet {
    fn default() -> Self {
        Self {
            names: vec![AUTOMATIC_PROVIDER.to_string()],
        }
    }
}

impl ProviderSet {
    /// Build a set from the default plus `extra` names.
    ///
    /// Blank names, duplicates and `manual` are dropped.
    #[must_use]
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for name in extra {
            let name = name.as_ref().trim();
            if name.is_empty() || name == MANUAL_PROVIDER || set.names.iter().any(|n| n == name) {
                continue;
            }
            set.names.push(name.to_string());
        }
        set
    }

    /// Whether `provider` is an installable provider of this set.
    #[must_use]
    pub fn recognizes(&self, provider: &Provider) -> bool {
        !matches!(provider, Provider::Manual) && self.names.iter().any(|n| n == provider.as_str())
    }

    /// Recognized provider names, in configuration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Unresolved parameters as read from a config file or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawParams {
    /// Whether to request the user capability.
    pub manage_user: Option<bool>,
    /// Sudo setting passed to the user capability.
    pub sudo: Option<Sudo>,
    /// Install provider name.
    pub provider: Option<String>,
    /// Additional installable provider names.
    #[serde(default)]
    pub extra_providers: Vec<String>,
}

impl RawParams {
    /// Layer `overrides` over `self`.
    ///
    /// Each key set in `overrides` wins; `extra_providers` lists concatenate.
    #[must_use]
    pub fn merge(mut self, overrides: Self) -> Self {
        if overrides.manage_user.is_some() {
            self.manage_user = overrides.manage_user;
        }
        if overrides.sudo.is_some() {
            self.sudo = overrides.sudo;
        }
        if overrides.provider.is_some() {
            self.provider = overrides.provider;
        }
        self.extra_providers.extend(overrides.extra_providers);
        self
    }

    /// Load raw parameters from a TOML file.
    ///
    /// A missing file yields all-unset parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        toml_loader::load_config(path)
    }
}

/// Resolved configuration for one convergence pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleConfig {
    /// Whether the user capability is requested.
    pub manage_user: bool,
    /// Sudo setting passed through to the user capability.
    pub sudo: Sudo,
    /// Install provider.
    pub provider: Provider,
    /// Recognized installable providers.
    pub providers: ProviderSet,
    /// Host facts this configuration was resolved against.
    pub facts: Facts,
}

/// Apply defaults to `raw` and produce the resolved configuration.
///
/// Never fails: an unknown provider is carried through and rejected by the
/// install policy.
#[must_use]
pub fn resolve(raw: RawParams, facts: Facts) -> ModuleConfig {
    ModuleConfig {
        manage_user: raw.manage_user.unwrap_or(true),
        sudo: raw.sudo.unwrap_or_default(),
        provider: raw
            .provider
            .as_deref()
            .map_or_else(Provider::default, Provider::from),
        providers: ProviderSet::with_extra(&raw.extra_providers),
        facts,
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use std::path::PathBuf;

    use crate::facts::{Facts, OsFamily};

    /// Write `content` to a `config.toml` inside a fresh temp dir.
    #[allow(clippy::expect_used)]
    pub fn write_temp_toml(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).expect("write temp toml");
        (dir, path)
    }

    /// Facts for a Debian host.
    pub fn debian() -> Facts {
        Facts::new(OsFamily::Debian)
    }
}
