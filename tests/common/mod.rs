//! Integration test common infrastructure.
//!
//! Provides a recording host and a fixture for driving the admin core the
//! way an engine would, with helpers for asserting on its output.

pub mod host;
pub mod server;

#[allow(unused_imports)]
pub use host::RecordingHost;
#[allow(unused_imports)]
pub use server::{TestServer, args};
