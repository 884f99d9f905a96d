//! The event-facing administration facade.
//!
//! [`Admin`] owns the state, the command registry and the host. Every host
//! notification is one method call; each runs to completion before the next
//! is accepted, and the effects it produced are applied to the host before
//! it returns.

use crate::config::{Config, ConfigError};
use crate::error::{CredentialError, InfoError, NOTICE_PREFIX};
use crate::handlers::{Context, Registry, Verdict};
use crate::host::{Effect, Host, Outbox, Target};
use crate::state::{
    Access, AdminState, Credential, MatchKind, PlayerDirectory, PlayerInfo, SessionId, VoteContext,
};
use crate::telemetry::spans;
use qadmin_proto::{eq_ignore_case, parse_str, sanitize, value_for_key};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Console command prefix registering credentials (`admin_adduser_ip`, ...).
const ADDUSER_PREFIX: &str = "admin_adduser_";

/// Administration core bound to one host.
pub struct Admin<H: Host> {
    host: H,
    state: AdminState,
    registry: Registry,
    config: Config,
    config_path: Option<PathBuf>,
}

impl<H: Host> Admin<H> {
    /// Create an admin core from an already loaded configuration.
    pub fn new(config: Config, host: H) -> Self {
        let players = PlayerDirectory::new(config.admin.default_access, config.admin.color_escape());
        let registry = Registry::with_overrides(&config.admin.chat_command, &config.commands);
        let mut admin = Self {
            host,
            state: AdminState::new(players),
            registry,
            config,
            config_path: None,
        };
        admin.apply_config();
        admin
    }

    /// Load the configuration at `path`; later reloads re-read it.
    pub fn from_path(path: impl Into<PathBuf>, host: H) -> Result<Self, ConfigError> {
        let path = path.into();
        let config = Config::load(&path)?;
        let mut admin = Self::new(config, host);
        admin.config_path = Some(path);
        Ok(admin)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn state(&self) -> &AdminState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AdminState {
        &mut self.state
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Session notifications
    // ------------------------------------------------------------------------

    /// A session connected. Unsafe identity fields reject the event.
    pub fn on_connect(&mut self, session: SessionId, info: &PlayerInfo) {
        let span = spans::event("connect", Some(session));
        let _enter = span.enter();
        match self.state.players.connect(session, info) {
            Ok(()) => info!(name = %info.name, ip = %info.ip, "Player connected"),
            Err(e) => warn!(error = %e, "Ignoring connect"),
        }
    }

    /// A session's identity changed; access and flags are kept.
    pub fn on_info_changed(&mut self, session: SessionId, info: &PlayerInfo) {
        let span = spans::event("info_changed", Some(session));
        let _enter = span.enter();
        match self.state.players.update(session, info) {
            Ok(()) => debug!(name = %info.name, "Player info updated"),
            Err(e) => warn!(error = %e, "Ignoring info update"),
        }
    }

    /// Raw `\key\value` info string from the engine.
    pub fn on_userinfo(&mut self, session: SessionId, userinfo: &str, connecting: bool) {
        if !qadmin_proto::validate_info(userinfo) {
            warn!(session = %session, error = %InfoError::UnsafeInfoString, "Ignoring userinfo");
            return;
        }
        let field = |key| value_for_key(userinfo, key).unwrap_or_default();
        let info = PlayerInfo::new(field("ip"), field("cl_guid"), field("name"));
        if connecting {
            self.on_connect(session, &info);
        } else {
            self.on_info_changed(session, &info);
        }
    }

    pub fn on_disconnect(&mut self, session: SessionId) {
        let span = spans::event("disconnect", Some(session));
        let _enter = span.enter();
        if let Some(record) = self.state.players.disconnect(session) {
            info!(name = %record.name, "Player disconnected");
        }
        self.state.vote.session_left(session);
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// A command line from `session` (or the console), command name first.
    pub fn on_command(&mut self, session: SessionId, args: &[String]) -> Verdict {
        if args.is_empty() {
            return Verdict::Ignored;
        }

        let mut outbox = Outbox::new();
        let verdict = {
            let mut ctx = Context::new(
                session,
                args,
                &mut self.state,
                &self.host,
                &mut outbox,
                &self.registry,
            );
            self.registry.dispatch(&mut ctx)
        };
        self.apply(outbox);
        verdict
    }

    /// A command typed on the server console.
    ///
    /// Console aliases dispatch their arguments as the console session and
    /// `admin_adduser_<ip|name|id>` registers credentials. Anything else is
    /// left to the engine.
    pub fn on_console_command(&mut self, args: &[String]) -> Verdict {
        let Some(name) = args.first() else {
            return Verdict::Ignored;
        };

        if self
            .config
            .admin
            .console_aliases
            .iter()
            .any(|alias| eq_ignore_case(alias, name))
        {
            self.on_command(SessionId::CONSOLE, &args[1..]);
            return Verdict::Suppressed;
        }

        let kind = name
            .get(..ADDUSER_PREFIX.len())
            .filter(|prefix| eq_ignore_case(prefix, ADDUSER_PREFIX))
            .and_then(|_| MatchKind::from_suffix(&name[ADDUSER_PREFIX.len()..]));
        let Some(kind) = kind else {
            return Verdict::Ignored;
        };

        if args.len() < 4 {
            let usage = format!("{NOTICE_PREFIX}Usage: {name} <user> <pass> <access>");
            self.host.send_text(Target::Session(SessionId::CONSOLE), &usage, false);
            return Verdict::Suppressed;
        }
        let access = Access(args[3].trim().parse::<u32>().unwrap_or(0));
        if let Err(e) = self.add_user(Credential::new(kind, &args[1], &args[2], access)) {
            warn!(command = %name, error = %e, "Rejected user entry");
        }
        Verdict::Suppressed
    }

    /// Register a credential. A duplicate (kind, user) pair is refused and
    /// left for the caller to report; nothing is echoed to players.
    pub fn add_user(&mut self, credential: Credential) -> Result<(), CredentialError> {
        let (kind, user) = (credential.kind, credential.user.clone());
        self.state.users.add(credential)?;
        info!(kind = %kind, user = %user, "User added");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Clock
    // ------------------------------------------------------------------------

    /// Periodic tick carrying the current level time.
    pub fn on_tick(&mut self, level_time: Duration) {
        self.state.clock.now = level_time;
        let Some((tally, action)) = self.state.vote.tick(level_time) else {
            return;
        };

        let span = spans::vote(&action.describe());
        let _enter = span.enter();
        info!(
            winner = tally.winner,
            winner_votes = tally.winner_votes,
            total = tally.total,
            "Vote finished"
        );

        let mut outbox = Outbox::new();
        let mut ctx = VoteContext {
            players: &self.state.players,
            outbox: &mut outbox,
        };
        action.conclude(tally, &mut ctx);
        self.apply(outbox);
    }

    /// A new map started at `level_time`.
    ///
    /// Execs the map's own config, then reloads. A running vote keeps its
    /// absolute expiry.
    pub fn on_map_start(&mut self, level_time: Duration) {
        self.state.clock.now = level_time;
        self.state.clock.map_start = level_time;

        if let Some(map) = self.host.cvar("mapname").filter(|m| !m.is_empty()) {
            let line = format!("exec \"{}.cfg\"", sanitize(&map));
            self.host.execute_console_line(&line);
        }
        self.reload();
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    /// Re-read the configuration file (when there is one) and repopulate
    /// credentials, gagged commands and the command tables.
    pub fn reload(&mut self) {
        if let Some(path) = &self.config_path {
            match Config::load(path) {
                Ok(config) => self.config = config,
                Err(e) => warn!(path = %path.display(), error = %e, "Reload failed, keeping previous configuration"),
            }
        }
        self.apply_config();

        let file = &self.config.admin.config_file;
        if !file.is_empty() {
            let line = format!("exec \"{}\"", sanitize(file));
            self.host.execute_console_line(&line);
        }
        info!(users = self.state.users.len(), "Configuration reloaded");
    }

    fn apply_config(&mut self) {
        let admin = &self.config.admin;
        self.state.players.set_default_access(admin.default_access);
        self.state.players.set_color_escape(admin.color_escape());
        self.state.vote_kick_time = admin.vote_kick_duration();
        self.state.vote_map_time = admin.vote_map_duration();
        self.state.gagged_commands = parse_str(&admin.gagged_commands, ',')
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        self.registry = Registry::with_overrides(&admin.chat_command, &self.config.commands);

        self.state.users.clear();
        for credential in &self.config.users {
            if let Err(e) = self.state.users.add(credential.clone()) {
                warn!(error = %e, "Rejected user entry");
            }
        }
    }

    /// Deliver queued effects to the host, in order.
    fn apply(&mut self, outbox: Outbox) {
        for effect in outbox.into_effects() {
            match effect {
                Effect::Text { to, text, chat } => self.host.send_text(to, &text, chat),
                Effect::Console(line) => self.host.execute_console_line(&line),
                Effect::Kick { session, reason } => self.host.kick_session(session, &reason),
                Effect::Reload => self.reload(),
            }
        }
    }
}

impl<H: Host + Default> Default for Admin<H> {
    fn default() -> Self {
        Self::new(Config::default(), H::default())
    }
}

impl<H: Host> std::fmt::Debug for Admin<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Admin")
            .field("players", &self.state.players.len())
            .field("users", &self.state.users.len())
            .field("vote", &self.state.vote)
            .field("config_path", &self.config_path)
            .finish_non_exhaustive()
    }
}
