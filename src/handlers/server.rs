//! Server control handlers: maps, cvars, config files and raw console lines.
//!
//! Every user-supplied value is sanitized before it is embedded in a
//! console line.

use super::{Context, Handler, Verdict};
use crate::error::{HandlerError, HandlerResult};
use qadmin_proto::sanitize;
use tracing::info;

/// Handler for `admin_cfg <file.cfg>`.
pub struct CfgHandler;

impl Handler for CfgHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let file = sanitize(ctx.arg(1).unwrap_or_default());
        ctx.outbox.console(format!("exec \"{file}\""));
        info!(by = %ctx.session, file = %file, "Config executed");
        Ok(Verdict::Suppressed)
    }
}

/// Handler for `admin_map <map>`.
pub struct MapHandler;

impl Handler for MapHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let map = sanitize(ctx.arg(1).unwrap_or_default());
        if !ctx.host.map_exists(&map) {
            return Err(HandlerError::UnknownMap(map.into_owned()));
        }
        ctx.outbox.console(format!("map \"{map}\""));
        info!(by = %ctx.session, map = %map, "Map change");
        Ok(Verdict::Suppressed)
    }
}

/// Handler setting one cvar from the joined arguments
/// (`admin_hostname`, `admin_fraglimit`, `admin_timelimit`, ...).
pub struct CvarHandler {
    cvar: &'static str,
}

impl CvarHandler {
    pub fn new(cvar: &'static str) -> Self {
        Self { cvar }
    }
}

impl Handler for CvarHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let value = ctx.rest(1);
        let value = sanitize(&value);
        ctx.outbox.console(format!("set {} \"{value}\"", self.cvar));
        info!(by = %ctx.session, cvar = self.cvar, value = %value, "Cvar set");
        Ok(Verdict::Suppressed)
    }
}

/// Handler for `admin_pass <password>` and `admin_nopass`.
pub struct PassHandler {
    set: bool,
}

impl PassHandler {
    pub fn set() -> Self {
        Self { set: true }
    }

    pub fn clear() -> Self {
        Self { set: false }
    }
}

impl Handler for PassHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        if self.set {
            let password = sanitize(ctx.arg(1).unwrap_or_default());
            ctx.outbox.console(format!("set g_password \"{password}\""));
            ctx.outbox.console("set g_needpass \"1\"");
        } else {
            ctx.outbox.console("set g_password \"\"");
            ctx.outbox.console("set g_needpass \"0\"");
        }
        info!(by = %ctx.session, password = self.set, "Server password changed");
        Ok(Verdict::Suppressed)
    }
}

/// Handler for `admin_rcon <command>`.
pub struct RconHandler;

impl Handler for RconHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let line = ctx.rest(1);
        let line = sanitize(&line).into_owned();
        info!(by = %ctx.session, line = %line, "Rcon");
        ctx.outbox.console(line);
        Ok(Verdict::Suppressed)
    }
}
