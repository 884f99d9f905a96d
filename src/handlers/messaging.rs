//! Messaging handlers: admin chat, broadcasts and private messages.

use super::{Context, Handler, Lookup, Verdict, resolve_target};
use crate::error::HandlerResult;
use crate::host::Target;
use crate::state::SessionId;
use qadmin_proto::sanitize;

fn message(ctx: &Context<'_>, start: usize) -> String {
    let text = ctx.rest(start);
    sanitize(&text).into_owned()
}

/// Handler for `admin_chat <text>`: chat to everyone holding the command's
/// access.
pub struct ChatHandler;

impl Handler for ChatHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let text = format!("To Admins From {}: {}", ctx.invoker_name(), message(ctx, 1));
        let recipients: Vec<SessionId> = ctx
            .state
            .players
            .iter()
            .map(|(id, _)| id)
            .filter(|id| ctx.state.players.has_access(*id, ctx.access))
            .collect();
        for session in recipients {
            ctx.outbox.chat(session, text.clone());
        }
        Ok(Verdict::Suppressed)
    }
}

/// Handler for `admin_csay <text>`: centre-print to all players.
pub struct CsayHandler;

impl Handler for CsayHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let text = message(ctx, 1);
        ctx.outbox.print(Target::Broadcast, text);
        Ok(Verdict::Suppressed)
    }
}

/// Handler for `admin_say <text>`: chat to all players.
pub struct SayAllHandler;

impl Handler for SayAllHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let text = message(ctx, 1);
        ctx.outbox.chat(Target::Broadcast, text);
        Ok(Verdict::Suppressed)
    }
}

/// Handler for `admin_psay <name> <text>`.
pub struct PsayHandler;

impl Handler for PsayHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let target = resolve_target(ctx, Lookup::Name, ctx.arg(1).unwrap_or_default())?;
        let text = message(ctx, 2);
        let to = ctx.state.players.display_name(target);
        let from = ctx.invoker_name();

        ctx.outbox.chat(ctx.session, format!("Private Message To {to}: {text}"));
        ctx.outbox.chat(target, format!("Private Message From {from}: {text}"));
        Ok(Verdict::Suppressed)
    }
}
