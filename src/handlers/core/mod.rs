//! Core handler infrastructure.
//!
//! This module contains the fundamental types of the command handler
//! system: the per-invocation context, the [`Handler`] trait and the
//! registry that owns the direct and say-subcommand tables.
//!
//! ## Dispatch
//!
//! - [`Registry::dispatch`]: direct commands (console and client)
//!   - lookup, access gate, argument-count gate, gag filter
//! - [`Registry::dispatch_say`]: chat text routed through the chat keyword
//!   - the same gates with `say = true`, absent arguments pass through

pub mod context;
pub mod registry;

pub use context::{Context, Handler, Verdict};
pub use registry::{
    CommandDescriptor, CommandTable, Registry, SAY_KEY, TableKind, builtin_handler,
    is_builtin_command,
};
