//! User policy: requests the sudo-enabled account capability.
use super::Policy;
use crate::config::ModuleConfig;
use crate::error::ConfigError;
use crate::plan::{Capability, CapabilityRequest, Declaration};

/// Plan the user capability request.
///
/// Returns `None` when `manage_user` is false. The sudo value is passed
/// through verbatim.
#[must_use]
pub fn plan_user(config: &ModuleConfig) -> Option<CapabilityRequest> {
    config
        .manage_user
        .then(|| CapabilityRequest::new(Capability::User).with_param("sudo", config.sudo.as_str()))
}

/// Request account setup for the ansible user.
#[derive(Debug)]
pub struct ManageUser;

impl Policy for ManageUser {
    fn name(&self) -> &'static str {
        "Manage ansible user"
    }

    fn evaluate(&self, config: &ModuleConfig) -> Result<Option<Declaration>, ConfigError> {
        Ok(plan_user(config).map(Declaration::Capability))
    }
}
