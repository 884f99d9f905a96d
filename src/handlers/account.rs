//! Account handlers: login and configuration reload.

use super::{Context, Handler, Verdict};
use crate::error::{HandlerError, HandlerResult};
use tracing::{info, warn};

/// Handler for `admin_login <pass>`.
///
/// A failed login is logged but never answered, so a wrong password and an
/// unknown account look the same to the player.
pub struct LoginHandler;

impl Handler for LoginHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        if ctx.session.is_console() {
            return Err(HandlerError::ConsoleNotAllowed("login"));
        }
        let Some(record) = ctx.state.players.get(ctx.session) else {
            return Ok(Verdict::Suppressed);
        };
        if record.authed {
            return Err(HandlerError::AlreadyAuthenticated);
        }

        let password = ctx.arg(1).unwrap_or_default();
        let Some(access) = ctx.state.users.authenticate(record, password) else {
            warn!(session = %ctx.session, name = %record.name, ip = %record.ip, "Failed login");
            return Ok(Verdict::Suppressed);
        };

        if let Some(record) = ctx.state.players.get_mut(ctx.session) {
            record.access = access;
            record.authed = true;
            info!(session = %ctx.session, name = %record.name, access = %access, "Login");
        }
        ctx.notice(format!(
            "You have successfully authenticated. You now have {access} access."
        ));
        Ok(Verdict::Suppressed)
    }
}

/// Handler for `admin_reload`.
pub struct ReloadHandler;

impl Handler for ReloadHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        info!(by = %ctx.session, "Reload requested");
        ctx.outbox.reload();
        Ok(Verdict::Suppressed)
    }
}
