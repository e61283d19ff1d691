//! Command: check the configuration without printing a plan.
use anyhow::Result;

use crate::cli::{GlobalOpts, ValidateOpts};
use crate::logging::Logger;

/// Run the validate command.
///
/// # Errors
///
/// Returns an error if setup fails or a policy rejects the configuration.
pub fn run(global: &GlobalOpts, opts: &ValidateOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, &opts.overrides, log)?;
    check(&setup, log)
}

/// Evaluate the policies of an initialised setup and report the result.
///
/// # Errors
///
/// Returns the first policy error.
pub fn check(setup: &super::CommandSetup, log: &Logger) -> Result<()> {
    let plan = super::evaluate_policies(&setup.config, log).into_plan()?;
    log.info(&format!(
        "configuration is valid: {} declaration(s), {} warning(s)",
        plan.declarations.len(),
        setup.warnings.len()
    ));
    Ok(())
}
