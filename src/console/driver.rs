//! Async driver feeding scripted events and clock ticks into the core.
//!
//! The admin core sits behind one `parking_lot::Mutex`; the input task and
//! the tick task each hold it for exactly one notification plus the settle
//! step, so events are processed one at a time in arrival order.

use super::events::Event;
use super::host::ConsoleHost;
use crate::admin::Admin;
use crate::state::SessionId;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Shared handle to the simulated server.
pub type SharedAdmin = Arc<Mutex<Admin<ConsoleHost>>>;

/// Run the simulation until `input` is exhausted.
///
/// Every line the host produced is sent on `output`.
pub async fn run<R>(
    admin: SharedAdmin,
    input: R,
    tick: Duration,
    output: UnboundedSender<String>,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let start = Instant::now();

    let ticker = {
        let admin = Arc::clone(&admin);
        let output = output.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            loop {
                interval.tick().await;
                let mut admin = admin.lock();
                admin.on_tick(start.elapsed());
                settle(&mut admin, start.elapsed(), &output);
            }
        })
    };

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let event = match Event::parse(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                warn!(line = %line, error = %e, "Bad event");
                continue;
            }
        };
        let mut admin = admin.lock();
        apply_event(&mut admin, event, start.elapsed());
        settle(&mut admin, start.elapsed(), &output);
    }

    ticker.abort();
    Ok(())
}

/// Deliver one event to the core.
pub fn apply_event(admin: &mut Admin<ConsoleHost>, event: Event, now: Duration) {
    debug!(?event, "Event");
    match event {
        Event::Connect { session, info } => admin.on_connect(session, &info),
        Event::Userinfo { session, info } => {
            let connecting = !admin.state().players.is_connected(session);
            admin.on_userinfo(session, &info, connecting);
        }
        Event::Disconnect(session) => admin.on_disconnect(session),
        Event::Command { session, args } => {
            admin.on_command(session, &args);
        }
        Event::Console(args) => {
            admin.on_console_command(&args);
        }
        Event::Map(map) => {
            admin.host_mut().change_map(&map);
            admin.on_map_start(now);
        }
        Event::Maps(maps) => admin.host_mut().set_maps(maps),
        Event::Set { cvar, value } => admin.host_mut().set_cvar(&cvar, value),
    }
}

/// Feed engine reactions back to the core and flush output.
///
/// Kicked sessions disconnect and a requested map change starts the new
/// map, as the engine would after running the emitted console lines.
pub fn settle(admin: &mut Admin<ConsoleHost>, now: Duration, output: &UnboundedSender<String>) {
    loop {
        for line in admin.host_mut().drain_output() {
            // A closed receiver only means nobody is printing any more.
            let _ = output.send(line);
        }

        let kicked: Vec<SessionId> = admin.host_mut().take_kicked();
        let map = admin.host_mut().take_map_change();
        if kicked.is_empty() && map.is_none() {
            break;
        }

        for session in kicked {
            admin.on_disconnect(session);
        }
        if let Some(map) = map {
            admin.host_mut().change_map(&map);
            admin.on_map_start(now);
        }
    }
}
