//! Helper functions shared by command handlers.

use super::Context;
use crate::error::HandlerError;
use crate::state::SessionId;

/// How a handler's target argument is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// A (partial) player name, subject to ambiguity rules.
    Name,
    /// A numeric slot.
    Slot,
}

/// Resolve a typed target to exactly one connected session.
pub fn resolve_target(
    ctx: &Context<'_>,
    lookup: Lookup,
    text: &str,
) -> Result<SessionId, HandlerError> {
    match lookup {
        Lookup::Name => ctx.state.players.resolve_one(text),
        Lookup::Slot => ctx.state.players.resolve_slot(text),
    }
}

/// Sanitized reason text from `args[start..]`, or `default` when empty.
pub(crate) fn reason_or(ctx: &Context<'_>, start: usize, default: &str) -> String {
    let reason = ctx.rest(start);
    if reason.trim().is_empty() {
        default.to_string()
    } else {
        qadmin_proto::sanitize(&reason).into_owned()
    }
}
