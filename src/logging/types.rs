//! Core logging types: per-policy summary entries and their status.

/// Policy evaluation result for summary reporting.
#[derive(Debug, Clone)]
pub struct PolicyEntry {
    /// Human-readable policy name.
    pub name: String,
    /// Final status of the policy.
    pub status: PolicyStatus,
    /// Optional detail message (e.g., what was declared or the error).
    pub message: Option<String>,
}

/// Status of an evaluated policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyStatus {
    /// Policy produced a declaration.
    Ok,
    /// Policy declared nothing for this configuration.
    NotApplicable,
    /// Policy rejected the configuration.
    Failed,
}
