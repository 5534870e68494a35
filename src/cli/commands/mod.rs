//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations and carries the global project and
//! config flags.

pub mod dispatcher;
pub mod display;
pub mod list;
pub mod setup;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
