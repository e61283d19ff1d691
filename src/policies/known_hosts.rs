//! Known-hosts publisher: the SSH host-key trust file is always managed.
use std::path::PathBuf;

use super::Policy;
use crate::config::ModuleConfig;
use crate::error::ConfigError;
use crate::plan::{Declaration, Ensure, ManagedFile};

/// System-wide SSH known-hosts file.
pub const KNOWN_HOSTS_PATH: &str = "/etc/ssh/ssh_known_hosts";

/// Permission mode of the known-hosts file.
pub const KNOWN_HOSTS_MODE: &str = "0644";

/// Plan the known-hosts file declaration.
#[must_use]
pub fn plan_known_hosts() -> ManagedFile {
    ManagedFile {
        path: PathBuf::from(KNOWN_HOSTS_PATH),
        ensure: Ensure::File,
        mode: KNOWN_HOSTS_MODE.to_string(),
    }
}

/// Publish the SSH known-hosts file.
#[derive(Debug)]
pub struct PublishKnownHosts;

impl Policy for PublishKnownHosts {
    fn name(&self) -> &'static str {
        "Publish SSH known hosts"
    }

    fn evaluate(&self, _config: &ModuleConfig) -> Result<Option<Declaration>, ConfigError> {
        Ok(Some(Declaration::File(plan_known_hosts())))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn known_hosts_descriptor() {
        let file = plan_known_hosts();
        assert_eq!(file.path, PathBuf::from("/etc/ssh/ssh_known_hosts"));
        assert_eq!(file.ensure, Ensure::File);
        assert_eq!(file.mode, "0644");
    }

    #[test]
    fn descriptor_is_stable() {
        assert_eq!(plan_known_hosts(), plan_known_hosts());
    }
}
