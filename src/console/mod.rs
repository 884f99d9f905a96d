//! Reference host: a line-driven simulation of a game server.
//!
//! Used by the `qadmind` binary to exercise a configuration without an
//! engine. See [`events`] for the script format.

pub mod driver;
pub mod events;
mod host;

pub use driver::{SharedAdmin, apply_event, run, settle};
pub use events::{Event, EventError};
pub use host::ConsoleHost;
