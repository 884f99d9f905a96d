//! Ban management handlers.
//!
//! Bans are IP bans recorded by the engine's own ban list (`addip` /
//! `removeip`). Banning a player fans out to every session sharing the
//! target's address; one immune resident keeps the whole address unbanned.

use super::helpers::reason_or;
use super::{Context, Handler, Lookup, Verdict, resolve_target};
use crate::error::{HandlerError, HandlerResult};
use crate::state::SessionId;
use qadmin_proto::sanitize;
use tracing::info;

const DEFAULT_REASON: &str = "Banned by Admin";

/// How the ban target is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BanTarget {
    Player(Lookup),
    Ip,
}

/// Handler for `admin_ban`, `admin_banslot` and `admin_banip`.
pub struct BanHandler {
    target: BanTarget,
}

impl BanHandler {
    /// `admin_ban <name> [message]`
    pub fn by_name() -> Self {
        Self {
            target: BanTarget::Player(Lookup::Name),
        }
    }

    /// `admin_banslot <index> [message]`
    pub fn by_slot() -> Self {
        Self {
            target: BanTarget::Player(Lookup::Slot),
        }
    }

    /// `admin_banip <ip> [message]`
    pub fn by_ip() -> Self {
        Self {
            target: BanTarget::Ip,
        }
    }
}

/// Sessions on an address, split by immunity. Computed in full before any
/// effect is queued.
struct Residents {
    kick: Vec<SessionId>,
    immune: bool,
}

fn residents(ctx: &Context<'_>, sessions: Vec<SessionId>) -> Residents {
    let players = &ctx.state.players;
    let immune = sessions.iter().any(|s| players.is_immune(*s));
    let kick = sessions
        .into_iter()
        .filter(|s| !players.is_immune(*s))
        .collect();
    Residents { kick, immune }
}

impl Handler for BanHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let reason = reason_or(ctx, 2, DEFAULT_REASON);
        match self.target {
            BanTarget::Player(lookup) => ban_player(ctx, lookup, &reason),
            BanTarget::Ip => ban_ip(ctx, &reason),
        }?;
        Ok(Verdict::Suppressed)
    }
}

fn ban_player(ctx: &mut Context<'_>, lookup: Lookup, reason: &str) -> Result<(), HandlerError> {
    let text = ctx.arg(1).unwrap_or_default();
    let target = resolve_target(ctx, lookup, text)?;
    let (name, ip) = match ctx.state.players.get(target) {
        Some(record) => (record.name.clone(), record.ip.clone()),
        None => return Err(HandlerError::InvalidSlot(text.to_string())),
    };

    if ctx.state.players.is_immune(target) {
        return Err(HandlerError::Immune { action: "ban", name });
    }

    // Without a known address only the target itself can be removed.
    let sessions = if ip.is_empty() {
        vec![target]
    } else {
        ctx.state.players.resolve_by_ip(&ip)
    };
    let on_ip = residents(ctx, sessions);

    if ip.is_empty() {
        ctx.notice(format!("Kicked {name}: '{reason}'"));
    } else if on_ip.immune {
        ctx.notice(format!(
            "Cannot ban {name} by IP, another user with that IP ({ip}) has immunity."
        ));
    } else {
        let ip = sanitize(&ip);
        ctx.outbox.console(format!("addip \"{ip}\" \"{reason}\""));
        ctx.notice(format!("Banned {name} by IP ({ip}): '{reason}'"));
    }

    info!(
        by = %ctx.session,
        target = %target,
        ip = %ip,
        reason = %reason,
        ip_banned = !on_ip.immune && !ip.is_empty(),
        kicked = on_ip.kick.len(),
        "Player banned"
    );

    for session in on_ip.kick {
        ctx.outbox.kick(session, reason);
    }
    Ok(())
}

fn ban_ip(ctx: &mut Context<'_>, reason: &str) -> Result<(), HandlerError> {
    let ip = sanitize(ctx.arg(1).unwrap_or_default()).into_owned();
    let on_ip = residents(ctx, ctx.state.players.resolve_by_ip(&ip));

    if on_ip.immune {
        ctx.notice(format!(
            "Cannot ban IP {ip}, a user with that IP has immunity. Kicking non-immune users."
        ));
    } else {
        ctx.outbox.console(format!("addip \"{ip}\" \"{reason}\""));
        ctx.notice(format!("Banned IP {ip}: '{reason}'"));
    }

    info!(
        by = %ctx.session,
        ip = %ip,
        reason = %reason,
        ip_banned = !on_ip.immune,
        kicked = on_ip.kick.len(),
        "IP banned"
    );

    for session in on_ip.kick {
        ctx.outbox.kick(session, reason);
    }
    Ok(())
}

/// Handler for `admin_unban <ip>`.
pub struct UnbanHandler;

impl Handler for UnbanHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let ip = sanitize(ctx.arg(1).unwrap_or_default()).into_owned();
        ctx.outbox.console(format!("removeip \"{ip}\""));
        ctx.notice(format!("Unbanned IP {ip}"));
        info!(by = %ctx.session, ip = %ip, "IP unbanned");
        Ok(Verdict::Suppressed)
    }
}
