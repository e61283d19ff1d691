//! Install policy: validates the provider and requests installation.
use super::Policy;
use crate::config::{ModuleConfig, Provider};
use crate::error::ConfigError;
use crate::plan::{Capability, CapabilityRequest, Declaration};

/// Plan the install capability request.
///
/// `manual` requests nothing; a provider recognized by the configured
/// [`ProviderSet`](crate::config::ProviderSet) is passed through verbatim.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedProvider`] for any other provider.
pub fn plan_install(config: &ModuleConfig) -> Result<Option<CapabilityRequest>, ConfigError> {
    match &config.provider {
        Provider::Manual => Ok(None),
        provider if config.providers.recognizes(provider) => Ok(Some(
            CapabilityRequest::new(Capability::Install).with_param("provider", provider.as_str()),
        )),
        provider => Err(ConfigError::UnsupportedProvider(provider.to_string())),
    }
}

/// Request installation of the ansible tooling.
#[derive(Debug)]
pub struct InstallAnsible;

impl Policy for InstallAnsible {
    fn name(&self) -> &'static str {
        "Install ansible"
    }

    fn evaluate(&self, config: &ModuleConfig) -> Result<Option<Declaration>, ConfigError> {
        Ok(plan_install(config)?.map(Declaration::Capability))
    }
}
