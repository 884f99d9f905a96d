//! State management module.
//!
//! Contains the [`AdminState`] context (players, credentials, the vote slot
//! and the level clock) and the entities it owns.

mod access;
mod directory;
mod player;
mod users;
pub mod vote;

pub use access::Access;
pub use directory::PlayerDirectory;
pub use player::{PlayerInfo, PlayerRecord, SessionId};
pub use users::{Credential, MatchKind, UserStore};
pub use vote::{Tally, VoteAction, VoteContext, VoteEngine};

use qadmin_proto::eq_ignore_case;
use std::time::Duration;

/// Level time as reported by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelClock {
    /// Latest time seen on a tick.
    pub now: Duration,
    /// Time the current map started.
    pub map_start: Duration,
}

impl LevelClock {
    /// Time spent on the current map.
    pub fn elapsed(&self) -> Duration {
        self.now.saturating_sub(self.map_start)
    }
}

/// Everything the command core reads and mutates while handling one event.
#[derive(Debug)]
pub struct AdminState {
    pub players: PlayerDirectory,
    pub users: UserStore,
    pub vote: VoteEngine,
    /// Commands a gagged session may not use, compared case-insensitively.
    pub gagged_commands: Vec<String>,
    pub clock: LevelClock,
    pub vote_kick_time: Duration,
    pub vote_map_time: Duration,
}

impl AdminState {
    pub fn new(players: PlayerDirectory) -> Self {
        Self {
            players,
            users: UserStore::new(),
            vote: VoteEngine::new(),
            gagged_commands: Vec::new(),
            clock: LevelClock::default(),
            vote_kick_time: Duration::from_secs(60),
            vote_map_time: Duration::from_secs(60),
        }
    }

    pub fn is_gagged(&self, session: SessionId) -> bool {
        self.players.get(session).is_some_and(|p| p.gagged)
    }

    pub fn is_gagged_command(&self, command: &str) -> bool {
        self.gagged_commands.iter().any(|c| eq_ignore_case(c, command))
    }
}

impl Default for AdminState {
    fn default() -> Self {
        Self::new(PlayerDirectory::default())
    }
}
