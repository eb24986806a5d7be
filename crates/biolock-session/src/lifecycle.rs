//! App lifecycle event delivery
//!
//! Foreground/background transitions arrive from the host as named events.
//! The [`LifecycleRelay`] fans each event out to subscribers at most once
//! per actual transition; sessions attached to it receive the events on
//! their own command channel.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::session::SessionHandle;

/// Named app lifecycle transitions, no payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The app is about to return to the foreground
    WillEnterForeground,
    /// The app moved to the background
    DidEnterBackground,
    /// The app became the active, focused app
    DidBecomeActive,
}

/// Broadcast hub for lifecycle events.
///
/// The embedding platform adapter calls [`notify`](Self::notify) once per
/// transition; every subscriber sees each event exactly once (subject to
/// channel capacity).
pub struct LifecycleRelay {
    event_tx: broadcast::Sender<LifecycleEvent>,
}

impl LifecycleRelay {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(16);
        Self { event_tx }
    }

    /// Deliver one lifecycle transition to all subscribers
    pub fn notify(&self, event: LifecycleEvent) {
        debug!(?event, "lifecycle event");
        let _ = self.event_tx.send(event);
    }

    /// Subscribe to raw lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.event_tx.subscribe()
    }

    /// Forward lifecycle events into a session until either side stops.
    ///
    /// Dropping the returned handle does not detach the forwarder; it stops
    /// when the relay or the session goes away.
    pub fn attach(&self, session: SessionHandle) -> JoinHandle<()> {
        let mut events = self.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        if session.lifecycle(event).is_err() {
                            debug!("session stopped, detaching lifecycle forwarder");
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "lifecycle forwarder lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

impl Default for LifecycleRelay {
    fn default() -> Self {
        Self::new()
    }
}
