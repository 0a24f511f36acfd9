//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command loads configuration
//! through [`CommandContext`] so flag, config-file and shell defaults are
//! resolved the same way everywhere.

pub mod completions;
pub mod context;
pub mod dispatcher;
pub mod list;
pub mod run;
pub mod status;
pub mod toolchain;
pub mod tools;

pub use context::{CommandContext, GlobalOptions};
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
