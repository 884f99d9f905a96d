//! Command handler context and core types.
//!
//! Defines the `Context<'a>` struct passed to all handlers and the
//! [`Handler`] trait they implement.

use super::registry::Registry;
use crate::error::HandlerResult;
use crate::host::{Host, Outbox, Target};
use crate::state::{Access, AdminState, SessionId};

/// What the host should do with the input after the core has seen it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Pass the input on to the engine's own handling.
    Ignored,
    /// The core consumed the input; the engine must not process it.
    Suppressed,
}

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The invoking session (possibly the console).
    pub session: SessionId,
    /// Access bits required by the matched command.
    pub access: Access,
    /// Full token list, command name first.
    pub args: &'a [String],
    /// Whether the command arrived as a say-subcommand.
    pub say: bool,
    pub state: &'a mut AdminState,
    /// Read-only engine queries. Mutations go through `outbox`.
    pub host: &'a dyn Host,
    pub outbox: &'a mut Outbox,
    /// Command registry (for help listings and say routing).
    pub registry: &'a Registry,
}

impl<'a> Context<'a> {
    /// Create a context for a direct command.
    pub fn new(
        session: SessionId,
        args: &'a [String],
        state: &'a mut AdminState,
        host: &'a dyn Host,
        outbox: &'a mut Outbox,
        registry: &'a Registry,
    ) -> Self {
        Self {
            session,
            access: Access::LEVEL_0,
            args,
            say: false,
            state,
            host,
            outbox,
            registry,
        }
    }

    /// Argument `index`, the command name being index 0.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).map(String::as_str)
    }

    /// Arguments from `start` onward joined with spaces.
    pub fn rest(&self, start: usize) -> String {
        qadmin_proto::join(self.args, start)
    }

    /// Send a prefixed notice to the invoker.
    pub fn notice(&mut self, text: impl AsRef<str>) {
        self.outbox.notice(self.session, text);
    }

    /// Name shown to others for the invoker.
    pub fn invoker_name(&self) -> String {
        self.state.players.display_name(self.session)
    }

    /// Where informational replies go: everyone when invoked through say.
    pub fn reply_target(&self) -> Target {
        if self.say {
            Target::Broadcast
        } else {
            Target::Session(self.session)
        }
    }

    /// Verdict for commands that answer publicly: say-invoked chat still
    /// reaches the other players.
    pub fn reply_verdict(&self) -> Verdict {
        if self.say {
            Verdict::Ignored
        } else {
            Verdict::Suppressed
        }
    }
}

/// A command implementation.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult;
}
