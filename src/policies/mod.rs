//! Policies that turn a resolved configuration into declarations.
//!
//! Each policy consumes the [`ModuleConfig`] independently; none depends on
//! another's output. [`evaluate`] runs all of them in a fixed order and
//! keeps going after a failure, so every policy's outcome is available for
//! reporting. [`plan`] collapses that into a [`Plan`] or the first error.
pub mod install;
pub mod known_hosts;
pub mod user;

use crate::config::ModuleConfig;
use crate::error::ConfigError;
use crate::plan::{Declaration, Plan};

pub use install::plan_install;
pub use known_hosts::plan_known_hosts;
pub use user::plan_user;

/// A named decision step of a convergence pass.
pub trait Policy: Send + Sync {
    /// Human-readable policy name.
    fn name(&self) -> &'static str;

    /// Decide what, if anything, this policy declares for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid for this policy.
    fn evaluate(&self, config: &ModuleConfig) -> Result<Option<Declaration>, ConfigError>;
}

/// The complete set of policies, in evaluation order.
#[must_use]
pub fn all_policies() -> Vec<Box<dyn Policy>> {
    vec![
        Box::new(user::ManageUser),
        Box::new(install::InstallAnsible),
        Box::new(known_hosts::PublishKnownHosts),
    ]
}

/// Result of one policy within an evaluation.
#[derive(Debug)]
pub struct Outcome {
    /// Name of the policy.
    pub policy: &'static str,
    /// What the policy declared, or why it failed.
    pub result: Result<Option<Declaration>, ConfigError>,
}

/// Per-policy outcomes of one convergence pass.
#[derive(Debug)]
pub struct Evaluation {
    outcomes: Vec<Outcome>,
}

impl Evaluation {
    /// Outcomes in evaluation order.
    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Whether any policy failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.result.is_err())
    }

    /// Collect the declarations into a plan.
    ///
    /// # Errors
    ///
    /// Returns the first policy error, in evaluation order.
    pub fn into_plan(self) -> Result<Plan, ConfigError> {
        let mut plan = Plan::default();
        for outcome in self.outcomes {
            if let Some(declaration) = outcome.result? {
                plan.declarations.push(declaration);
            }
        }
        Ok(plan)
    }
}

/// Run every policy against `config`.
#[must_use]
pub fn evaluate(config: &ModuleConfig) -> Evaluation {
    let outcomes = all_policies()
        .iter()
        .map(|policy| Outcome {
            policy: policy.name(),
            result: policy.evaluate(config),
        })
        .collect();
    Evaluation { outcomes }
}

/// Run every policy against `config` and collect the plan.
///
/// # Errors
///
/// Returns the first policy error, e.g.
/// [`ConfigError::UnsupportedProvider`].
pub fn plan(config: &ModuleConfig) -> Result<Plan, ConfigError> {
    evaluate(config).into_plan()
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::config::test_helpers::debian;
    use crate::config::{RawParams, Sudo, resolve};
    use crate::plan::Capability;
    use crate::policies::known_hosts::KNOWN_HOSTS_PATH;

    fn plan_for(raw: RawParams) -> Result<Plan, ConfigError> {
        plan(&resolve(raw, debian()))
    }

    fn assert_known_hosts(plan: &Plan) {
        let files: Vec<_> = plan.files().collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0], &plan_known_hosts());
    }

    #[test]
    fn all_defaults() {
        let plan = plan_for(RawParams::default()).unwrap();
        assert_eq!(
            plan.capability(Capability::User).unwrap().param("sudo"),
            Some("enable")
        );
        assert_eq!(
            plan.capability(Capability::Install)
                .unwrap()
                .param("provider"),
            Some("automatic")
        );
        assert_known_hosts(&plan);
        assert_eq!(plan.declarations.len(), 3);
    }

    #[test]
    fn manage_user_disabled() {
        let plan = plan_for(RawParams {
            manage_user: Some(false),
            ..RawParams::default()
        })
        .unwrap();
        assert!(plan.capability(Capability::User).is_none());
        assert!(plan.capability(Capability::Install).is_some());
        assert_known_hosts(&plan);
    }

    #[test]
    fn sudo_disabled() {
        let plan = plan_for(RawParams {
            sudo: Some(Sudo::Disable),
            ..RawParams::default()
        })
        .unwrap();
        assert_eq!(
            plan.capability(Capability::User).unwrap().param("sudo"),
            Some("disable")
        );
        assert_eq!(
            plan.capability(Capability::Install)
                .unwrap()
                .param("provider"),
            Some("automatic")
        );
        assert_known_hosts(&plan);
    }

    #[test]
    fn manual_provider() {
        let plan = plan_for(RawParams {
            provider: Some("manual".to_string()),
            ..RawParams::default()
        })
        .unwrap();
        assert_eq!(
            plan.capability(Capability::User).unwrap().param("sudo"),
            Some("enable")
        );
        assert!(plan.capability(Capability::Install).is_none());
        assert_known_hosts(&plan);
    }

    #[test]
    fn unsupported_provider_fails_but_other_policies_run() {
        let config = resolve(
            RawParams {
                provider: Some("anonsupportedprovider".to_string()),
                ..RawParams::default()
            },
            debian(),
        );
        let evaluation = evaluate(&config);
        assert!(evaluation.has_failures());

        let outcomes = evaluation.outcomes();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        let Ok(Some(Declaration::File(file))) = &outcomes[2].result else {
            panic!("known hosts not declared: {:?}", outcomes[2].result);
        };
        assert_eq!(file.path.to_str(), Some(KNOWN_HOSTS_PATH));

        let err = evaluation.into_plan().unwrap_err();
        assert!(err.to_string().contains("Unsupported provider"));
    }

    #[test]
    fn declarations_follow_policy_order() {
        let plan = plan_for(RawParams::default()).unwrap();
        let text = plan.render_text();
        insta::assert_snapshot!(text.trim_end(), @r"
        capability user (sudo=enable)
        capability install (provider=automatic)
        file /etc/ssh/ssh_known_hosts (ensure=file, mode=0644)
        ");
    }

    #[test]
    fn identical_inputs_render_identically() {
        let raw = RawParams {
            sudo: Some(Sudo::Disable),
            ..RawParams::default()
        };
        let first = plan_for(raw.clone()).unwrap().render_json().unwrap();
        let second = plan_for(raw).unwrap().render_json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn policy_names_are_unique() {
        let policies = all_policies();
        let mut names: Vec<_> = policies.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), policies.len());
    }
}
