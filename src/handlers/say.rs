//! The chat keyword handler.

use super::{Context, Handler};
use crate::error::HandlerResult;

/// Handler bound to the engine's chat keyword (`say` by default).
///
/// Routes the chat text into the say-subcommand table; plain chat passes
/// through to the engine.
pub struct SayHandler;

impl Handler for SayHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let registry = ctx.registry;
        Ok(registry.dispatch_say(ctx))
    }
}
