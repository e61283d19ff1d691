// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed config file and a fluent builder so
// each integration test can set up an isolated environment without
// repeating filesystem boilerplate.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ansible_master::cli::Format;
use ansible_master::commands::{CommandSetup, plan};
use ansible_master::facts::{Facts, OsFamily};
use ansible_master::logging::Logger;
use ansible_master::RawParams;

/// An isolated config directory backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory holding `config.toml`.
    pub root: tempfile::TempDir,
    /// Facts the configuration is resolved against.
    pub facts: Facts,
    /// Command-line style overrides.
    pub overrides: RawParams,
}

impl IntegrationTestContext {
    /// Path of the config file (which may not exist).
    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("config.toml")
    }

    /// Run the shared command setup against this context.
    pub fn setup(&self, log: &Logger) -> anyhow::Result<CommandSetup> {
        CommandSetup::load(
            &self.config_path(),
            self.facts.clone(),
            self.overrides.clone(),
            log,
        )
    }

    /// Run the plan command and return the rendered output.
    pub fn plan(&self, format: Format) -> anyhow::Result<String> {
        let log = Logger::new("test");
        let setup = self.setup(&log)?;
        let mut out = Vec::new();
        plan::write_plan(&setup.config, format, &log, &mut out)?;
        Ok(String::from_utf8(out).expect("plan output is UTF-8"))
    }

    /// Run the plan command in text format.
    pub fn plan_text(&self) -> anyhow::Result<String> {
        self.plan(Format::Text)
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a context for a Debian host with no config file.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext {
                root: tempfile::tempdir().expect("create temp dir"),
                facts: Facts::new(OsFamily::Debian),
                overrides: RawParams::default(),
            },
        }
    }

    /// Write `content` to `config.toml`.
    pub fn with_config(self, content: &str) -> Self {
        write_file(&self.ctx.config_path(), content);
        self
    }

    /// Use `overrides` as command-line parameters.
    pub fn with_overrides(mut self, overrides: RawParams) -> Self {
        self.ctx.overrides = overrides;
        self
    }

    /// Resolve against a different OS family.
    pub fn with_os_family(mut self, family: OsFamily) -> Self {
        self.ctx.facts = Facts::new(family);
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

fn write_file(path: &Path, content: &str) {
    std::fs::write(path, content).expect("write config file");
}
