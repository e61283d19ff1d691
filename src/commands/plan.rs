//! Command: evaluate the policies and print the plan.
use anyhow::{Context as _, Result};
use std::io::Write;

use crate::cli::{Format, GlobalOpts, PlanOpts};
use crate::config::ModuleConfig;
use crate::logging::Logger;

/// Run the plan command, writing the declarations to stdout.
///
/// # Errors
///
/// Returns an error if setup fails, a policy rejects the configuration, or
/// the plan cannot be written.
pub fn run(global: &GlobalOpts, opts: &PlanOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, &opts.overrides, log)?;
    let mut stdout = std::io::stdout().lock();
    write_plan(&setup.config, opts.format, log, &mut stdout)
}

/// Evaluate `config` and write the rendered plan to `out`.
///
/// Nothing is written when any policy fails.
///
/// # Errors
///
/// Returns the first policy error (e.g. an unsupported provider) or an I/O
/// error from `out`.
pub fn write_plan(
    config: &ModuleConfig,
    format: Format,
    log: &Logger,
    out: &mut impl Write,
) -> Result<()> {
    let plan = super::evaluate_policies(config, log).into_plan()?;

    let rendered = match format {
        Format::Text => plan.render_text(),
        Format::Json => plan.render_json().context("serializing plan")?,
    };
    out.write_all(rendered.as_bytes()).context("writing plan")?;
    out.flush().context("writing plan")?;
    Ok(())
}
