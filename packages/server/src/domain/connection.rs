//! Per-connection lifecycle.
//!
//! ```text
//! Connecting ──open()──▶ Open ──begin_closing()──▶ Closing ──close()──▶ Closed
//!      └─────────────begin_closing() / close()──────────────────────────▲
//! ```
//!
//! `Closed` is terminal. Inbound frames are dispatched only while `Open`.

use tokio::sync::mpsc;

/// Outbound channel for one connection. The socket's pusher loop owns the
/// receiving half; once it is dropped the channel reports closed.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closing,
    Closed,
}

/// State machine driven by the task bound to a single connection.
#[derive(Debug)]
pub struct ConnectionLifecycle {
    state: ConnectionState,
}

impl ConnectionLifecycle {
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Connecting,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Whether inbound frames may be dispatched.
    pub fn can_dispatch(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// Enter `Open` once the welcome payload has been sent.
    pub fn open(&mut self) -> bool {
        self.transition(ConnectionState::Connecting, ConnectionState::Open)
    }

    /// Enter `Closing`. Returns `false` if the connection is already closing or closed.
    pub fn begin_closing(&mut self) -> bool {
        match self.state {
            ConnectionState::Connecting | ConnectionState::Open => {
                self.state = ConnectionState::Closing;
                true
            }
            ConnectionState::Closing | ConnectionState::Closed => false,
        }
    }

    /// Enter the terminal `Closed` state. Returns `false` if already closed.
    pub fn close(&mut self) -> bool {
        if self.state == ConnectionState::Closed {
            return false;
        }
        self.state = ConnectionState::Closed;
        true
    }

    fn transition(&mut self, from: ConnectionState, to: ConnectionState) -> bool {
        if self.state != from {
            return false;
        }
        self.state = to;
        true
    }
}

impl Default for ConnectionLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
