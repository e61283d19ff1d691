//! Declarations emitted by a convergence pass.
//!
//! A [`Plan`] is the ordered list of [`Declaration`]s handed to the host
//! convergence engine: capability requests for sub-policies and managed
//! file descriptors. Rendering is deterministic; identical plans always
//! produce byte-identical text and JSON.
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Named sub-policy a capability request asks the engine to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Sudo-enabled account setup.
    User,
    /// Installation of the ansible tooling.
    Install,
}

impl Capability {
    /// Lowercase capability name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Install => "install",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intent to include a named sub-policy with its own parameter bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityRequest {
    /// Requested sub-policy.
    pub capability: Capability,
    /// Parameters passed through to the sub-policy.
    pub params: BTreeMap<String, String>,
}

impl CapabilityRequest {
    /// Create a request with no parameters.
    #[must_use]
    pub const fn new(capability: Capability) -> Self {
        Self {
            capability,
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter to the request.
    #[must_use]
    pub fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Look up a parameter value.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Desired existence state of a managed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    /// A regular file must exist.
    File,
}

impl fmt::Display for Ensure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
        }
    }
}

/// Declarative description of a filesystem artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagedFile {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Desired existence state.
    pub ensure: Ensure,
    /// Octal permission mode, e.g. `0644`.
    pub mode: String,
}

/// One entry of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Declaration {
    /// Include a sub-policy.
    Capability(CapabilityRequest),
    /// Manage a file.
    File(ManagedFile),
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capability(request) => {
                write!(f, "capability {}", request.capability)?;
                if !request.params.is_empty() {
                    let params: Vec<String> = request
                        .params
                        .iter()
                        .map(|(k, v)| format!("{k}={v}"))
                        .collect();
                    write!(f, " ({})", params.join(", "))?;
                }
                Ok(())
            }
            Self::File(file) => write!(
                f,
                "file {} (ensure={}, mode={})",
                file.path.display(),
                file.ensure,
                file.mode
            ),
        }
    }
}

/// Ordered declarations of one convergence pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Declarations in policy order.
    pub declarations: Vec<Declaration>,
}

impl Plan {
    /// The request for `capability`, if the plan contains one.
    #[must_use]
    pub fn capability(&self, capability: Capability) -> Option<&CapabilityRequest> {
        self.declarations.iter().find_map(|d| match d {
            Declaration::Capability(request) if request.capability == capability => Some(request),
            _ => None,
        })
    }

    /// All managed files in the plan.
    pub fn files(&self) -> impl Iterator<Item = &ManagedFile> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::File(file) => Some(file),
            Declaration::Capability(_) => None,
        })
    }

    /// Render one line per declaration.
    #[must_use]
    pub fn render_text(&self) -> String {
        self.declarations
            .iter()
            .map(|d| format!("{d}\n"))
            .collect()
    }

    /// Render the plan as pretty-printed JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_json(&self) -> serde_json::Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}
