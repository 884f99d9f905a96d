//! Kick and gag handlers.

use super::helpers::reason_or;
use super::{Context, Handler, Lookup, Verdict, resolve_target};
use crate::error::{HandlerError, HandlerResult};
use tracing::info;

const DEFAULT_REASON: &str = "Kicked by Admin";

/// Handler for `admin_kick` and `admin_kickslot`.
pub struct KickHandler {
    lookup: Lookup,
}

impl KickHandler {
    pub fn by_name() -> Self {
        Self {
            lookup: Lookup::Name,
        }
    }

    pub fn by_slot() -> Self {
        Self {
            lookup: Lookup::Slot,
        }
    }
}

impl Handler for KickHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let text = ctx.arg(1).unwrap_or_default();
        let target = resolve_target(ctx, self.lookup, text)?;
        let name = ctx.state.players.display_name(target);

        if ctx.state.players.is_immune(target) {
            return Err(HandlerError::Immune { action: "kick", name });
        }

        let reason = reason_or(ctx, 2, DEFAULT_REASON);
        ctx.notice(format!("Kicked {name}: '{reason}'"));
        info!(by = %ctx.session, target = %target, reason = %reason, "Player kicked");
        ctx.outbox.kick(target, reason);
        Ok(Verdict::Suppressed)
    }
}

/// Handler for `admin_gag`, `admin_gagslot`, `admin_ungag` and
/// `admin_ungagslot`.
///
/// A gagged player cannot use the configured gagged commands nor chat
/// through the say keyword.
pub struct GagHandler {
    lookup: Lookup,
    gag: bool,
}

impl GagHandler {
    pub fn gag_by_name() -> Self {
        Self {
            lookup: Lookup::Name,
            gag: true,
        }
    }

    pub fn gag_by_slot() -> Self {
        Self {
            lookup: Lookup::Slot,
            gag: true,
        }
    }

    pub fn ungag_by_name() -> Self {
        Self {
            lookup: Lookup::Name,
            gag: false,
        }
    }

    pub fn ungag_by_slot() -> Self {
        Self {
            lookup: Lookup::Slot,
            gag: false,
        }
    }
}

impl Handler for GagHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let text = ctx.arg(1).unwrap_or_default();
        let target = resolve_target(ctx, self.lookup, text)?;
        let name = ctx.state.players.display_name(target);

        if self.gag && ctx.state.players.is_immune(target) {
            return Err(HandlerError::Immune { action: "gag", name });
        }

        let Some(record) = ctx.state.players.get_mut(target) else {
            return Err(HandlerError::InvalidSlot(text.to_string()));
        };
        match (self.gag, record.gagged) {
            (true, true) => return Err(HandlerError::AlreadyGagged(name)),
            (false, false) => return Err(HandlerError::NotGagged(name)),
            _ => record.gagged = self.gag,
        }

        if self.gag {
            ctx.notice(format!("{name} has been gagged"));
        } else {
            ctx.notice(format!("{name} has been ungagged"));
        }
        info!(by = %ctx.session, target = %target, gagged = self.gag, "Gag state changed");
        Ok(Verdict::Suppressed)
    }
}
