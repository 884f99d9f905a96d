//! Vote handlers and the outcomes of map and kick votes.

use super::{Context, Handler, Lookup, Verdict, resolve_target};
use crate::error::{HandlerError, HandlerResult, VoteError};
use crate::host::Target;
use crate::state::{SessionId, Tally, VoteAction, VoteContext};
use qadmin_proto::sanitize;
use std::time::Duration;
use tracing::info;

/// Yes/no votes.
const CHOICES: u8 = 2;
const YES: u8 = 1;

fn announce(ctx: &mut Context<'_>, duration: Duration, subject: &str) {
    ctx.outbox.notice(
        Target::Broadcast,
        format!(
            "A {} second vote has been started to {subject}",
            duration.as_secs()
        ),
    );
    ctx.outbox.notice(
        Target::Broadcast,
        "Type 'castvote 1' for YES, or 'castvote 2' for NO",
    );
}

// ============================================================================
// Outcomes
// ============================================================================

/// Changes the map when the vote passes.
struct MapVote {
    map: String,
}

impl VoteAction for MapVote {
    fn describe(&self) -> String {
        format!("map {}", self.map)
    }

    fn conclude(self: Box<Self>, tally: Tally, ctx: &mut VoteContext<'_>) {
        if tally.winner == YES {
            ctx.outbox.notice(
                Target::Broadcast,
                format!("Vote to change map to {} was successful", self.map),
            );
            ctx.outbox.console(format!("map \"{}\"", self.map));
        } else {
            ctx.outbox.notice(
                Target::Broadcast,
                format!("Vote to change map to {} has failed", self.map),
            );
        }
    }
}

/// Kicks the target when the vote passes.
///
/// The target may gain immunity or leave while the vote runs; either makes
/// the vote fail.
struct KickVote {
    target: SessionId,
    name: String,
    present: bool,
}

impl VoteAction for KickVote {
    fn describe(&self) -> String {
        format!("kick {}", self.name)
    }

    fn session_left(&mut self, session: SessionId) {
        if session == self.target {
            self.present = false;
        }
    }

    fn conclude(self: Box<Self>, tally: Tally, ctx: &mut VoteContext<'_>) {
        let eligible = self.present
            && ctx.players.is_connected(self.target)
            && !ctx.players.is_immune(self.target);

        if eligible && tally.winner == YES && tally.winner_votes > 0 {
            ctx.outbox.notice(
                Target::Broadcast,
                format!("Vote to kick {} was successful", self.name),
            );
            ctx.outbox.kick(self.target, "Kicked due to vote.");
        } else {
            ctx.outbox.notice(
                Target::Broadcast,
                format!("Vote to kick {} has failed", self.name),
            );
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Handler for `admin_vote_map <map>`.
pub struct VoteMapHandler;

impl Handler for VoteMapHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let map = sanitize(ctx.arg(1).unwrap_or_default()).into_owned();
        if !ctx.host.map_exists(&map) {
            return Err(HandlerError::UnknownMap(map));
        }

        let duration = ctx.state.vote_map_time;
        let now = ctx.state.clock.now;
        let action = Box::new(MapVote { map: map.clone() });
        ctx.state
            .vote
            .start(ctx.session, action, now, duration, CHOICES)?;

        info!(by = %ctx.session, map = %map, "Map vote started");
        announce(ctx, duration, &format!("change map to {map}"));
        Ok(Verdict::Suppressed)
    }
}

/// Handler for `admin_vote_kick <user>`.
pub struct VoteKickHandler;

impl Handler for VoteKickHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let target = resolve_target(ctx, Lookup::Name, ctx.arg(1).unwrap_or_default())?;
        let name = ctx.state.players.display_name(target);
        if ctx.state.players.is_immune(target) {
            return Err(HandlerError::Immune { action: "kick", name });
        }

        let duration = ctx.state.vote_kick_time;
        let now = ctx.state.clock.now;
        let action = Box::new(KickVote {
            target,
            name: name.clone(),
            present: true,
        });
        ctx.state
            .vote
            .start(ctx.session, action, now, duration, CHOICES)?;

        info!(by = %ctx.session, target = %target, "Kick vote started");
        announce(ctx, duration, &format!("kick {name}"));
        Ok(Verdict::Suppressed)
    }
}

/// Handler for `admin_vote_abort`.
pub struct VoteAbortHandler;

impl Handler for VoteAbortHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        if !ctx.state.vote.abort() {
            return Err(VoteError::NotRunning.into());
        }
        info!(by = %ctx.session, "Vote aborted");
        ctx.outbox
            .notice(Target::Broadcast, "The current vote has been aborted");
        Ok(Verdict::Suppressed)
    }
}

/// Handler for `castvote <option>`, direct or through say.
pub struct CastVoteHandler;

impl Handler for CastVoteHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        if ctx.session.is_console() {
            return Err(HandlerError::ConsoleNotAllowed("vote"));
        }
        let choice = ctx
            .arg(1)
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(0);
        let counted = ctx.state.vote.cast(ctx.session, choice)?;
        ctx.notice(format!("Vote counted for {counted}"));
        Ok(Verdict::Suppressed)
    }
}
