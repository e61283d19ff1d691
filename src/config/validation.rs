//! Non-fatal configuration checks.
//!
//! Validation never rejects a configuration. Hard failures (an unsupported
//! provider) belong to the install policy; this module only reports
//! settings that are likely mistakes.
use super::{AUTOMATIC_PROVIDER, MANUAL_PROVIDER, RawParams};
use crate::facts::Facts;

/// A validation warning detected during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The configuration key that triggered the warning.
    pub key: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning for `key`.
    #[must_use]
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Check `raw` parameters against `facts` and return any warnings found.
#[must_use]
pub fn validate(raw: &RawParams, facts: &Facts) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if raw.manage_user == Some(false) && raw.sudo.is_some() {
        warnings.push(ValidationWarning::new(
            "sudo",
            "has no effect while manage_user is false",
        ));
    }

    let mut seen: Vec<&str> = Vec::new();
    for name in &raw.extra_providers {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            warnings.push(ValidationWarning::new(
                "extra_providers",
                "blank provider name ignored",
            ));
        } else if trimmed == MANUAL_PROVIDER {
            warnings.push(ValidationWarning::new(
                "extra_providers",
                "'manual' never installs and cannot be listed as an installable provider",
            ));
        } else if trimmed == AUTOMATIC_PROVIDER {
            warnings.push(ValidationWarning::new(
                "extra_providers",
                "'automatic' is always recognized",
            ));
        } else if seen.contains(&trimmed) {
            warnings.push(ValidationWarning::new(
                "extra_providers",
                format!("duplicate provider '{trimmed}'"),
            ));
        } else {
            seen.push(trimmed);
        }
    }

    if !facts.os_family.is_known() {
        warnings.push(ValidationWarning::new(
            "osfamily",
            format!("unrecognized OS family '{}'", facts.os_family),
        ));
    }

    warnings
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::Sudo;
    use crate::config::test_helpers::debian;
    use crate::facts::OsFamily;

    #[test]
    fn defaults_produce_no_warnings() {
        assert!(validate(&RawParams::default(), &debian()).is_empty());
    }

    #[test]
    fn sudo_without_managed_user_warns() {
        let raw = RawParams {
            manage_user: Some(false),
            sudo: Some(Sudo::Disable),
            ..RawParams::default()
        };
        let warnings = validate(&raw, &debian());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].key, "sudo");
    }

    #[test]
    fn extra_providers_checks() {
        let raw = RawParams {
            extra_providers: ["pip", "", "manual", "automatic", "pip"]
                .into_iter()
                .map(String::from)
                .collect(),
            ..RawParams::default()
        };
        let warnings = validate(&raw, &debian());
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(warnings.len(), 4, "{messages:?}");
        assert!(messages[0].contains("blank"));
        assert!(messages[1].contains("'manual'"));
        assert!(messages[2].contains("'automatic'"));
        assert!(messages[3].contains("duplicate provider 'pip'"));
    }

    #[test]
    fn unknown_os_family_warns() {
        let facts = Facts::new(OsFamily::Other("Solaris".to_string()));
        let warnings = validate(&RawParams::default(), &facts);
        assert_eq!(
            warnings,
            vec![ValidationWarning::new(
                "osfamily",
                "unrecognized OS family 'Solaris'"
            )]
        );
    }
}
