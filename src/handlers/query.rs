//! Informational handlers: help, user list, maps and timing.

use super::{Context, Handler, Verdict};
use crate::error::HandlerResult;
use crate::state::{Access, SessionId};

/// Commands shown per `admin_help` page.
const HELP_PAGE: usize = 10;

/// Handler for `admin_help [start]`.
///
/// Lists the commands the caller may use that carry usage and help text,
/// numbered from 1 in table order.
pub struct HelpHandler;

impl Handler for HelpHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let registry = ctx.registry;
        let limit = registry.direct().len() + registry.say().len();
        let start = ctx
            .arg(1)
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|s| (1..=limit).contains(s))
            .unwrap_or(1);
        let end = start + HELP_PAGE - 1;

        ctx.notice(format!("admin_help listing for {start}-{end}"));

        let visible = registry
            .direct()
            .iter()
            .filter(|c| c.is_listed() && ctx.state.players.has_access(ctx.session, c.access));
        let lines: Vec<String> = visible
            .enumerate()
            .map(|(i, c)| (i + 1, c))
            .filter(|(n, _)| (start..=end).contains(n))
            .map(|(n, c)| {
                format!(
                    "{n}. {} - {}",
                    c.usage.as_deref().unwrap_or_default(),
                    c.help.as_deref().unwrap_or_default()
                )
            })
            .collect();

        for line in lines {
            ctx.notice(line);
        }
        Ok(Verdict::Suppressed)
    }
}

/// Handler for `admin_userlist [name]`.
///
/// The IP column is shown only to callers holding the ban bit.
pub struct UserlistHandler;

impl Handler for UserlistHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let show_ip = ctx.state.players.has_access(ctx.session, Access::LEVEL_256);
        let filter = ctx.arg(1);

        match filter {
            Some(query) => ctx.notice(format!("Listing users matching '{query}'...")),
            None => ctx.notice("Listing users..."),
        }
        if show_ip {
            ctx.notice("Slot Access   Authed IP              Name");
        } else {
            ctx.notice("Slot Access   Authed Name");
        }

        let sessions: Vec<SessionId> = match filter {
            Some(query) => ctx.state.players.search(query),
            None => ctx.state.players.iter().map(|(id, _)| id).collect(),
        };

        let rows: Vec<String> = sessions
            .into_iter()
            .filter_map(|id| ctx.state.players.get(id).map(|p| (id, p)))
            .map(|(id, p)| {
                let authed = if p.authed { "yes" } else { "no" };
                if show_ip {
                    format!("{:3}: {:<8} {:<6} {:<15} {}", id.0, p.access.bits(), authed, p.ip, p.name)
                } else {
                    format!("{:3}: {:<8} {:<6} {}", id.0, p.access.bits(), authed, p.name)
                }
            })
            .collect();

        for row in rows {
            ctx.notice(row);
        }
        Ok(Verdict::Suppressed)
    }
}

/// Handler for `admin_listmaps`.
pub struct ListMapsHandler;

impl Handler for ListMapsHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let Some(maps) = ctx.host.maps() else {
            ctx.notice("Map listing is not available on this server");
            return Ok(Verdict::Suppressed);
        };

        ctx.notice("Listing maps...");
        for map in maps {
            ctx.outbox.print(ctx.session, map);
        }
        ctx.notice("End of maps list");
        Ok(Verdict::Suppressed)
    }
}

/// Handler for `admin_currentmap` and the `currentmap` say-subcommand.
pub struct CurrentMapHandler;

impl Handler for CurrentMapHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let map = ctx.host.cvar("mapname").unwrap_or_default();
        let to = ctx.reply_target();
        ctx.outbox.notice(to, format!("The current map is: {map}"));
        Ok(ctx.reply_verdict())
    }
}

/// Handler for `admin_timeleft` and the `timeleft` say-subcommand.
pub struct TimeleftHandler;

impl Handler for TimeleftHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let minutes = ctx
            .host
            .cvar("timelimit")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .map_or(0, |v| v as i64);

        let text = if minutes <= 0 {
            "There is no time limit.".to_string()
        } else {
            let elapsed = i64::try_from(ctx.state.clock.elapsed().as_secs()).unwrap_or(i64::MAX);
            let left = minutes.saturating_mul(60).saturating_sub(elapsed);
            if left <= 0 {
                "Time limit has been reached".to_string()
            } else {
                format!("Time remaining: {} minute(s) {} second(s)", left / 60, left % 60)
            }
        };

        let to = ctx.reply_target();
        ctx.outbox.notice(to, text);
        Ok(ctx.reply_verdict())
    }
}
