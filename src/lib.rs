//! Configuration planner for ansible master hosts.
//!
//! Resolves the `manage_user`, `sudo` and `provider` parameters against host
//! facts and plans the declarations a convergence engine must reconcile: a
//! sudo-enabled user account, installation of the ansible tooling, and the
//! system-wide SSH known-hosts file. Applying them is left to the engine.
//!
//! The public API is organised into these layers:
//!
//! - **[`config`]**: load, validate and resolve parameters
//! - **[`facts`]**: host facts (OS family)
//! - **[`policies`]**: the user, install and known-hosts policies
//! - **[`plan`]**: the declarations they emit and their rendering
//! - **[`commands`]**: top-level subcommand orchestration (`plan`, `validate`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod facts;
pub mod logging;
pub mod plan;
pub mod policies;

pub use config::{ModuleConfig, Provider, ProviderSet, RawParams, Sudo, resolve};
pub use error::{ConfigError, Error, FactsError};
pub use facts::{Facts, OsFamily};
pub use plan::{Capability, CapabilityRequest, Declaration, Ensure, ManagedFile, Plan};
