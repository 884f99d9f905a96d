//! Single-slot vote engine.
//!
//! At most one vote runs at a time. Expiry is absolute level time and is
//! checked on every tick; [`VoteEngine::finish`] takes the vote out of its
//! slot, so an outcome is produced at most once.

use super::directory::PlayerDirectory;
use super::player::SessionId;
use crate::error::VoteError;
use crate::host::Outbox;
use std::collections::BTreeMap;
use std::time::Duration;

pub const MIN_CHOICES: u8 = 2;
pub const MAX_CHOICES: u8 = 9;

/// Result of counting the ballots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    /// Winning choice, or 0 when nobody voted.
    pub winner: u8,
    pub winner_votes: usize,
    pub total: usize,
}

impl Tally {
    /// Count `ballots` cast over `choices` options.
    ///
    /// The strictly greatest count wins; ties go to the lowest choice.
    pub fn count<'a>(ballots: impl IntoIterator<Item = &'a u8>, choices: u8) -> Tally {
        let mut counts = [0usize; MAX_CHOICES as usize + 1];
        let mut total = 0;
        for &choice in ballots {
            if let Some(slot) = counts.get_mut(choice as usize) {
                *slot += 1;
            }
            total += 1;
        }

        let mut winner = 0u8;
        let mut winner_votes = 0usize;
        for choice in 1..=choices.min(MAX_CHOICES) {
            let votes = counts[choice as usize];
            if votes > winner_votes {
                winner = choice;
                winner_votes = votes;
            }
        }

        Tally {
            winner,
            winner_votes,
            total,
        }
    }
}

/// State a vote outcome may read and the outbox it reports through.
pub struct VoteContext<'a> {
    pub players: &'a PlayerDirectory,
    pub outbox: &'a mut Outbox,
}

/// Outcome behaviour owned by a running vote.
pub trait VoteAction: Send {
    /// Short description for logs, e.g. `map q3dm17`.
    fn describe(&self) -> String;

    /// Called when a session disconnects while the vote runs.
    fn session_left(&mut self, _session: SessionId) {}

    /// Act on the final tally.
    fn conclude(self: Box<Self>, tally: Tally, ctx: &mut VoteContext<'_>);
}

struct ActiveVote {
    initiator: SessionId,
    expires_at: Duration,
    choices: u8,
    ballots: BTreeMap<SessionId, u8>,
    action: Box<dyn VoteAction>,
}

/// Owner of the global vote slot.
#[derive(Default)]
pub struct VoteEngine {
    active: Option<ActiveVote>,
}

impl VoteEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a vote expiring `duration` after `now`.
    ///
    /// A running vote is left untouched and `AlreadyRunning` is returned.
    /// `choices` must lie in `MIN_CHOICES..=MAX_CHOICES`.
    pub fn start(
        &mut self,
        initiator: SessionId,
        action: Box<dyn VoteAction>,
        now: Duration,
        duration: Duration,
        choices: u8,
    ) -> Result<(), VoteError> {
        if self.active.is_some() {
            return Err(VoteError::AlreadyRunning);
        }
        if !(MIN_CHOICES..=MAX_CHOICES).contains(&choices) {
            return Err(VoteError::InvalidChoices(choices));
        }
        self.active = Some(ActiveVote {
            initiator,
            expires_at: now + duration,
            choices,
            ballots: BTreeMap::new(),
            action,
        });
        Ok(())
    }

    /// Record `voter`'s choice. The first ballot from a session stands.
    pub fn cast(&mut self, voter: SessionId, choice: i64) -> Result<u8, VoteError> {
        let vote = self.active.as_mut().ok_or(VoteError::NotRunning)?;
        if let Some(&previous) = vote.ballots.get(&voter) {
            return Err(VoteError::AlreadyVoted(previous));
        }
        let choice = u8::try_from(choice)
            .ok()
            .filter(|c| (1..=vote.choices).contains(c))
            .ok_or(VoteError::InvalidChoice { max: vote.choices })?;
        vote.ballots.insert(voter, choice);
        Ok(choice)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn expires_at(&self) -> Option<Duration> {
        self.active.as_ref().map(|v| v.expires_at)
    }

    pub fn initiator(&self) -> Option<SessionId> {
        self.active.as_ref().map(|v| v.initiator)
    }

    pub fn ballot(&self, voter: SessionId) -> Option<u8> {
        self.active.as_ref().and_then(|v| v.ballots.get(&voter).copied())
    }

    pub fn ballot_count(&self) -> usize {
        self.active.as_ref().map_or(0, |v| v.ballots.len())
    }

    pub fn describe(&self) -> Option<String> {
        self.active.as_ref().map(|v| v.action.describe())
    }

    /// Forward a disconnect to the running vote's action.
    pub fn session_left(&mut self, session: SessionId) {
        if let Some(vote) = self.active.as_mut() {
            vote.action.session_left(session);
        }
    }

    /// Finish the vote if `now` has reached its expiry.
    pub fn tick(&mut self, now: Duration) -> Option<(Tally, Box<dyn VoteAction>)> {
        match self.expires_at() {
            Some(expires_at) if now >= expires_at => self.finish(),
            _ => None,
        }
    }

    /// End the running vote and hand back its tally and action.
    pub fn finish(&mut self) -> Option<(Tally, Box<dyn VoteAction>)> {
        let vote = self.active.take()?;
        let tally = Tally::count(vote.ballots.values(), vote.choices);
        Some((tally, vote.action))
    }

    /// Cancel the running vote without running its action.
    pub fn abort(&mut self) -> bool {
        self.active.take().is_some()
    }
}

impl std::fmt::Debug for VoteEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.active {
            Some(v) => f
                .debug_struct("VoteEngine")
                .field("action", &v.action.describe())
                .field("initiator", &v.initiator)
                .field("expires_at", &v.expires_at)
                .field("ballots", &v.ballots)
                .finish(),
            None => f.write_str("VoteEngine(idle)"),
        }
    }
}
