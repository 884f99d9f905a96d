//! Command handler registry and dispatch.
//!
//! The `Registry` holds two ordered tables: direct commands and
//! say-subcommands. Both are data: the default tables below can be
//! overridden and extended from configuration.

use super::context::{Context, Handler, Verdict};
use crate::config::CommandOverride;
use crate::error::HandlerError;
use crate::handlers::{
    BanHandler, CastVoteHandler, CfgHandler, ChatHandler, CsayHandler, CurrentMapHandler,
    CvarHandler, GagHandler, HelpHandler, KickHandler, ListMapsHandler, LoginHandler, MapHandler,
    PassHandler, PsayHandler, RconHandler, ReloadHandler, SayAllHandler, SayHandler,
    TimeleftHandler, UnbanHandler, UserlistHandler, VoteAbortHandler, VoteKickHandler,
    VoteMapHandler,
};
use crate::state::Access;
use crate::telemetry::spans;
use qadmin_proto::eq_ignore_case;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Which table a command lives in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    #[default]
    Direct,
    Say,
}

/// One registered command.
#[derive(Clone)]
pub struct CommandDescriptor {
    pub name: String,
    /// Built-in handler this command runs.
    pub handler_key: String,
    handler: Arc<dyn Handler>,
    pub access: Access,
    /// Arguments required after the command token.
    pub min_args: usize,
    pub usage: Option<String>,
    pub help: Option<String>,
}

impl CommandDescriptor {
    /// Listed by `admin_help` only when both usage and help are present.
    pub fn is_listed(&self) -> bool {
        let present = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.usage) && present(&self.help)
    }

    fn usage_line(&self) -> String {
        match self.usage.as_deref() {
            Some(usage) if !usage.is_empty() => usage.to_string(),
            _ => self.name.clone(),
        }
    }
}

impl std::fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("handler_key", &self.handler_key)
            .field("access", &self.access)
            .field("min_args", &self.min_args)
            .finish_non_exhaustive()
    }
}

/// Ordered command collection with case-insensitive lookup.
#[derive(Clone, Debug, Default)]
pub struct CommandTable {
    entries: Vec<CommandDescriptor>,
}

impl CommandTable {
    pub fn find(&self, name: &str) -> Option<&CommandDescriptor> {
        self.entries.iter().find(|c| eq_ignore_case(&c.name, name))
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut CommandDescriptor> {
        self.entries.iter_mut().find(|c| eq_ignore_case(&c.name, name))
    }

    /// Replace the command of the same name in place, or append.
    fn upsert(&mut self, command: CommandDescriptor) {
        match self.find_mut(&command.name) {
            Some(existing) => *existing = command,
            None => self.entries.push(command),
        }
    }

    fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|c| !eq_ignore_case(&c.name, name));
        self.entries.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Built-in command surface
// ============================================================================

struct Builtin {
    name: &'static str,
    key: &'static str,
    access: Access,
    min_args: usize,
    usage: Option<&'static str>,
    help: Option<&'static str>,
}

const fn listed(
    name: &'static str,
    access: Access,
    min_args: usize,
    usage: &'static str,
    help: &'static str,
) -> Builtin {
    Builtin {
        name,
        key: name,
        access,
        min_args,
        usage: Some(usage),
        help: Some(help),
    }
}

const fn hidden(name: &'static str, key: &'static str, access: Access, min_args: usize) -> Builtin {
    Builtin {
        name,
        key,
        access,
        min_args,
        usage: None,
        help: None,
    }
}

/// Key of the say-routing handler; its direct-table name is the configured
/// chat keyword.
pub const SAY_KEY: &str = "say";

// Alphabetical, which is also the admin_help listing order.
const DIRECT_COMMANDS: &[Builtin] = &[
    listed("admin_ban", Access::LEVEL_256, 1, "admin_ban <name> [message]", "Bans the specified user by IP"),
    listed("admin_banip", Access::LEVEL_256, 1, "admin_banip <ip> [message]", "Bans the specified IP"),
    listed("admin_banslot", Access::LEVEL_256, 1, "admin_banslot <index> [message]", "Bans the user in the specified slot"),
    listed("admin_cfg", Access::LEVEL_512, 1, "admin_cfg <file.cfg>", "Executes the given .cfg file on the server"),
    listed("admin_chat", Access::LEVEL_64, 1, "admin_chat <text>", "Sends the message to all admins with admin_chat access"),
    listed("admin_csay", Access::LEVEL_64, 1, "admin_csay <text>", "Displays message to all players in center of screen"),
    listed("admin_currentmap", Access::LEVEL_0, 0, "admin_currentmap", "Displays current map"),
    listed("admin_fraglimit", Access::LEVEL_2, 1, "admin_fraglimit <value>", "Sets the server's fraglimit"),
    listed("admin_friendlyfire", Access::LEVEL_32, 1, "admin_friendlyfire <value>", "Sets the server's friendlyfire"),
    listed("admin_gag", Access::LEVEL_2048, 1, "admin_gag <name>", "Gags the specified player from speaking"),
    listed("admin_gagslot", Access::LEVEL_2048, 1, "admin_gagslot <index>", "Gags the player in the specified slot from speaking"),
    listed("admin_gametype", Access::LEVEL_32, 1, "admin_gametype <value>", "Sets the server's gametype"),
    listed("admin_gravity", Access::LEVEL_32, 1, "admin_gravity <value>", "Sets the server's gravity"),
    listed("admin_help", Access::LEVEL_0, 0, "admin_help [start]", "Displays commands you have access to"),
    listed("admin_hostname", Access::LEVEL_512, 1, "admin_hostname <new name>", "Sets the server's hostname"),
    listed("admin_kick", Access::LEVEL_128, 1, "admin_kick <name> [message]", "Kicks name from the server"),
    listed("admin_kickslot", Access::LEVEL_128, 1, "admin_kickslot <index> [message]", "Kicks user with given slot from the server"),
    listed("admin_listmaps", Access::LEVEL_0, 0, "admin_listmaps", "Lists all maps on the server"),
    listed("admin_login", Access::LEVEL_0, 1, "admin_login <pass>", "Logs you in to get access"),
    listed("admin_map", Access::LEVEL_8, 1, "admin_map <map>", "Changes to the given map"),
    listed("admin_pass", Access::LEVEL_16, 1, "admin_pass <password>", "Changes the server password"),
    listed("admin_psay", Access::LEVEL_64, 2, "admin_psay <name> <text>", "Sends the message to specified player"),
    listed("admin_nopass", Access::LEVEL_16, 0, "admin_nopass", "Clears the server password"),
    listed("admin_rcon", Access::LEVEL_65536, 1, "admin_rcon <command>", "Executes the command on the server"),
    listed("admin_reload", Access::LEVEL_4, 0, "admin_reload", "Reloads various QAdmin configs and cvars"),
    listed("admin_say", Access::LEVEL_64, 1, "admin_say <text>", "Sends the message to all players"),
    listed("admin_timeleft", Access::LEVEL_0, 0, "admin_timeleft", "Displays the time left on this map"),
    listed("admin_timelimit", Access::LEVEL_2, 1, "admin_timelimit <value>", "Sets the server's timelimit"),
    listed("admin_unban", Access::LEVEL_256, 1, "admin_unban <ip>", "Unbans the specified IP"),
    listed("admin_ungag", Access::LEVEL_2048, 1, "admin_ungag <name>", "Ungags the specified player"),
    listed("admin_ungagslot", Access::LEVEL_2048, 1, "admin_ungagslot <index>", "Ungags the player in the specified slot"),
    listed("admin_userlist", Access::LEVEL_0, 0, "admin_userlist [name]", "Lists all users on the server that match 'name'"),
    listed("admin_vote_abort", Access::LEVEL_2, 0, "admin_vote_abort", "Aborts the current map or kick vote"),
    listed("admin_vote_kick", Access::LEVEL_1, 1, "admin_vote_kick <user>", "Initiates a vote to kick the user"),
    listed("admin_vote_map", Access::LEVEL_1, 1, "admin_vote_map <map>", "Initiates a vote to change to the map"),
    listed("castvote", Access::LEVEL_1, 1, "castvote <option>", "Places a vote for the given option"),
];

const SAY_COMMANDS: &[Builtin] = &[
    hidden("admin_login", "admin_login", Access::LEVEL_0, 1),
    hidden("castvote", "castvote", Access::LEVEL_1, 1),
    hidden("currentmap", "admin_currentmap", Access::LEVEL_0, 0),
    hidden("timeleft", "admin_timeleft", Access::LEVEL_0, 0),
];

/// Instantiate the built-in handler registered under `key`.
pub fn builtin_handler(key: &str) -> Option<Arc<dyn Handler>> {
    let handler: Arc<dyn Handler> = match key.to_ascii_lowercase().as_str() {
        "admin_ban" => Arc::new(BanHandler::by_name()),
        "admin_banip" => Arc::new(BanHandler::by_ip()),
        "admin_banslot" => Arc::new(BanHandler::by_slot()),
        "admin_cfg" => Arc::new(CfgHandler),
        "admin_chat" => Arc::new(ChatHandler),
        "admin_csay" => Arc::new(CsayHandler),
        "admin_currentmap" => Arc::new(CurrentMapHandler),
        "admin_fraglimit" => Arc::new(CvarHandler::new("fraglimit")),
        "admin_friendlyfire" => Arc::new(CvarHandler::new("g_friendlyfire")),
        "admin_gag" => Arc::new(GagHandler::gag_by_name()),
        "admin_gagslot" => Arc::new(GagHandler::gag_by_slot()),
        "admin_gametype" => Arc::new(CvarHandler::new("g_gametype")),
        "admin_gravity" => Arc::new(CvarHandler::new("g_gravity")),
        "admin_help" => Arc::new(HelpHandler),
        "admin_hostname" => Arc::new(CvarHandler::new("sv_hostname")),
        "admin_kick" => Arc::new(KickHandler::by_name()),
        "admin_kickslot" => Arc::new(KickHandler::by_slot()),
        "admin_listmaps" => Arc::new(ListMapsHandler),
        "admin_login" => Arc::new(LoginHandler),
        "admin_map" => Arc::new(MapHandler),
        "admin_pass" => Arc::new(PassHandler::set()),
        "admin_psay" => Arc::new(PsayHandler),
        "admin_nopass" => Arc::new(PassHandler::clear()),
        "admin_rcon" => Arc::new(RconHandler),
        "admin_reload" => Arc::new(ReloadHandler),
        "admin_say" => Arc::new(SayAllHandler),
        "admin_timeleft" => Arc::new(TimeleftHandler),
        "admin_timelimit" => Arc::new(CvarHandler::new("timelimit")),
        "admin_unban" => Arc::new(UnbanHandler),
        "admin_ungag" => Arc::new(GagHandler::ungag_by_name()),
        "admin_ungagslot" => Arc::new(GagHandler::ungag_by_slot()),
        "admin_userlist" => Arc::new(UserlistHandler),
        "admin_vote_abort" => Arc::new(VoteAbortHandler),
        "admin_vote_kick" => Arc::new(VoteKickHandler),
        "admin_vote_map" => Arc::new(VoteMapHandler),
        "castvote" => Arc::new(CastVoteHandler),
        SAY_KEY => Arc::new(SayHandler),
        _ => return None,
    };
    Some(handler)
}

/// Whether `name` is a built-in command of `table`.
pub fn is_builtin_command(table: TableKind, name: &str, chat_command: &str) -> bool {
    match table {
        TableKind::Direct => {
            eq_ignore_case(name, chat_command)
                || DIRECT_COMMANDS.iter().any(|b| eq_ignore_case(b.name, name))
        }
        TableKind::Say => SAY_COMMANDS.iter().any(|b| eq_ignore_case(b.name, name)),
    }
}

fn descriptor(builtin: &Builtin) -> Option<CommandDescriptor> {
    Some(CommandDescriptor {
        name: builtin.name.to_string(),
        handler_key: builtin.key.to_string(),
        handler: builtin_handler(builtin.key)?,
        access: builtin.access,
        min_args: builtin.min_args,
        usage: builtin.usage.map(str::to_string),
        help: builtin.help.map(str::to_string),
    })
}

// ============================================================================
// Registry
// ============================================================================

/// Registry of command handlers.
#[derive(Clone, Debug)]
pub struct Registry {
    direct: CommandTable,
    say: CommandTable,
    chat_command: String,
}

impl Registry {
    /// Create a registry with the default command surface.
    ///
    /// `chat_command` is the engine's chat keyword that routes into the
    /// say-subcommand table.
    pub fn new(chat_command: &str) -> Self {
        let mut direct = CommandTable::default();
        for builtin in DIRECT_COMMANDS {
            if let Some(command) = descriptor(builtin) {
                direct.upsert(command);
            }
        }
        if let Some(mut say) = descriptor(&hidden(SAY_KEY, SAY_KEY, Access::LEVEL_0, 0)) {
            say.name = chat_command.to_string();
            direct.upsert(say);
        }

        let mut say = CommandTable::default();
        for builtin in SAY_COMMANDS {
            if let Some(command) = descriptor(builtin) {
                say.upsert(command);
            }
        }

        Self {
            direct,
            say,
            chat_command: chat_command.to_string(),
        }
    }

    /// Create a registry and apply operator overrides in order.
    pub fn with_overrides(chat_command: &str, overrides: &[CommandOverride]) -> Self {
        let mut registry = Self::new(chat_command);
        for entry in overrides {
            registry.apply_override(entry);
        }
        registry
    }

    fn apply_override(&mut self, entry: &CommandOverride) {
        let table = match entry.table {
            TableKind::Direct => &mut self.direct,
            TableKind::Say => &mut self.say,
        };

        if entry.disabled {
            if !table.remove(&entry.name) {
                warn!(command = %entry.name, "Cannot disable unknown command");
            }
            return;
        }

        let mut command = match entry.handler.as_deref() {
            Some(key) => {
                let Some(handler) = builtin_handler(key) else {
                    warn!(command = %entry.name, handler = %key, "Unknown handler in command override");
                    return;
                };
                // An alias starts from the defaults of the command it reuses.
                let base = DIRECT_COMMANDS.iter().find(|b| eq_ignore_case(b.key, key));
                CommandDescriptor {
                    name: entry.name.clone(),
                    handler_key: key.to_ascii_lowercase(),
                    handler,
                    access: base.map_or(Access::LEVEL_0, |b| b.access),
                    min_args: base.map_or(0, |b| b.min_args),
                    usage: None,
                    help: None,
                }
            }
            None => match table.find(&entry.name) {
                Some(existing) => existing.clone(),
                None => {
                    warn!(command = %entry.name, "Override names an unknown command");
                    return;
                }
            },
        };

        if let Some(access) = entry.access {
            command.access = access;
        }
        if let Some(min_args) = entry.min_args {
            command.min_args = min_args;
        }
        if entry.usage.is_some() {
            command.usage = entry.usage.clone();
        }
        if entry.help.is_some() {
            command.help = entry.help.clone();
        }
        table.upsert(command);
    }

    pub fn direct(&self) -> &CommandTable {
        &self.direct
    }

    pub fn say(&self) -> &CommandTable {
        &self.say
    }

    pub fn chat_command(&self) -> &str {
        &self.chat_command
    }

    /// Dispatch a direct command line.
    pub fn dispatch(&self, ctx: &mut Context<'_>) -> Verdict {
        let args = ctx.args;
        let name = args.first().map(String::as_str).unwrap_or_default();

        if let Some(command) = self.direct.find(name) {
            if !ctx.state.players.has_access(ctx.session, command.access) {
                return deny(command, ctx);
            }
            if args.len() < command.min_args + 1 {
                let err = HandlerError::NeedMoreParams {
                    usage: command.usage_line(),
                };
                ctx.outbox.print(ctx.session, err.to_notice());
                return Verdict::Suppressed;
            }
            return invoke(command, ctx);
        }

        if ctx.state.is_gagged(ctx.session) && ctx.state.is_gagged_command(name) {
            ctx.outbox.print(ctx.session, HandlerError::Gagged.to_notice());
            return Verdict::Suppressed;
        }

        if ctx.session.is_console() {
            Verdict::Suppressed
        } else {
            Verdict::Ignored
        }
    }

    /// Route chat text into the say-subcommand table.
    ///
    /// `ctx.args` is the full chat command, keyword first; the remaining
    /// text is re-split on whitespace.
    pub fn dispatch_say(&self, ctx: &mut Context<'_>) -> Verdict {
        if ctx.state.is_gagged(ctx.session) {
            ctx.outbox.print(ctx.session, HandlerError::Gagged.to_notice());
            return Verdict::Suppressed;
        }

        let words: Vec<String> = ctx
            .args
            .iter()
            .skip(1)
            .flat_map(|a| a.split_whitespace())
            .map(str::to_string)
            .collect();

        let Some(command) = words.first().and_then(|name| self.say.find(name)) else {
            return Verdict::Ignored;
        };
        if !ctx.state.players.has_access(ctx.session, command.access) {
            return deny(command, ctx);
        }
        if words.len() < command.min_args + 1 {
            return Verdict::Ignored;
        }

        let mut sub = Context {
            session: ctx.session,
            access: command.access,
            args: &words,
            say: true,
            state: &mut *ctx.state,
            host: ctx.host,
            outbox: &mut *ctx.outbox,
            registry: ctx.registry,
        };
        invoke(command, &mut sub)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(SAY_KEY)
    }
}

fn deny(command: &CommandDescriptor, ctx: &mut Context<'_>) -> Verdict {
    debug!(command = %command.name, session = %ctx.session, "Access denied");
    let err = HandlerError::NoAccess(command.name.clone());
    ctx.outbox.print(ctx.session, err.to_notice());
    Verdict::Suppressed
}

fn invoke(command: &CommandDescriptor, ctx: &mut Context<'_>) -> Verdict {
    ctx.access = command.access;
    let span = spans::command(&command.name, ctx.session, ctx.say);
    let _enter = span.enter();

    match command.handler.handle(ctx) {
        Ok(verdict) => verdict,
        Err(e) => {
            debug!(
                command = %command.name,
                code = e.error_code(),
                kind = ?e.kind(),
                error = %e,
                "Command error"
            );
            ctx.outbox.print(ctx.session, e.to_notice());
            Verdict::Suppressed
        }
    }
}
