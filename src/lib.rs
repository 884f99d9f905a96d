//! qadmin - in-process administration for multiplayer game servers.
//!
//! The core intercepts player and console command lines, gates them on a
//! bitmask access model, resolves player references, runs kick/ban/gag
//! moderation with immunity rules and drives a single timed vote.
//!
//! An engine embeds the core by implementing [`Host`] and forwarding its
//! notifications to an [`Admin`]:
//!
//! ```
//! use qadmin::{Admin, Config, ConsoleHost, PlayerInfo, SessionId, Verdict};
//!
//! let mut admin = Admin::new(Config::default(), ConsoleHost::new());
//! admin.on_connect(SessionId(0), &PlayerInfo::new("10.0.0.2:27960", "G0", "Bob"));
//!
//! let args = vec!["admin_kick".to_string(), "bob".to_string()];
//! assert_eq!(admin.on_command(SessionId::CONSOLE, &args), Verdict::Suppressed);
//! ```

pub mod admin;
pub mod config;
pub mod console;
pub mod error;
pub mod handlers;
pub mod host;
pub mod state;
pub mod telemetry;

pub use admin::Admin;
pub use config::{Config, ConfigError};
pub use console::ConsoleHost;
pub use error::{ErrorKind, HandlerError, VoteError};
pub use handlers::{Registry, Verdict};
pub use host::{Effect, Host, Outbox, Target};
pub use state::{Access, AdminState, Credential, MatchKind, PlayerInfo, SessionId};
