//! Admin command handlers.
//!
//! This module contains the Handler trait and command registry for
//! dispatching command lines to the handler implementing each command.
//!
//! Handlers never touch the engine. They mutate [`AdminState`] and queue
//! effects in the context's outbox; the admin facade applies those once the
//! handler has returned.
//!
//! [`AdminState`]: crate::state::AdminState

mod account;
mod bans;
pub mod core;
mod helpers;
mod messaging;
mod moderation;
mod query;
mod say;
mod server;
mod vote;

pub use self::core::{
    CommandDescriptor, CommandTable, Context, Handler, Registry, TableKind, Verdict,
    builtin_handler, is_builtin_command,
};
pub use helpers::{Lookup, resolve_target};

pub use account::{LoginHandler, ReloadHandler};
pub use bans::{BanHandler, UnbanHandler};
pub use messaging::{ChatHandler, CsayHandler, PsayHandler, SayAllHandler};
pub use moderation::{GagHandler, KickHandler};
pub use query::{CurrentMapHandler, HelpHandler, ListMapsHandler, TimeleftHandler, UserlistHandler};
pub use say::SayHandler;
pub use server::{CfgHandler, CvarHandler, MapHandler, PassHandler, RconHandler};
pub use vote::{CastVoteHandler, VoteAbortHandler, VoteKickHandler, VoteMapHandler};
