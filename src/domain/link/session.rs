//! Connection session state machine

use std::fmt;
use thiserror::Error;

/// Connection states of the bridge loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    #[default]
    Searching,
    Connecting,
    Streaming,
}

impl ConnectionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Searching => "searching",
            Self::Connecting => "connecting",
            Self::Streaming => "streaming",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: ConnectionState,
    pub action: String,
}

/// Connection session entity.
///
/// State machine:
///   SEARCHING  -> CONNECTING (device_found)
///   CONNECTING -> STREAMING  (connected)
///   CONNECTING -> SEARCHING  (open_failed)
///   STREAMING  -> SEARCHING  (connection_lost)
#[derive(Debug, Default)]
pub struct ConnectionSession {
    state: ConnectionState,
    device: Option<String>,
}

impl ConnectionSession {
    /// Create a new session in searching state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Path of the device being opened or streamed from
    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }

    pub fn is_streaming(&self) -> bool {
        self.state == ConnectionState::Streaming
    }

    /// Transition from SEARCHING to CONNECTING
    pub fn device_found(&mut self, path: &str) -> Result<(), InvalidStateTransition> {
        self.expect(ConnectionState::Searching, "select a device")?;
        self.state = ConnectionState::Connecting;
        self.device = Some(path.to_string());
        Ok(())
    }

    /// Transition from CONNECTING to STREAMING
    pub fn connected(&mut self) -> Result<(), InvalidStateTransition> {
        self.expect(ConnectionState::Connecting, "start streaming")?;
        self.state = ConnectionState::Streaming;
        Ok(())
    }

    /// Transition from CONNECTING back to SEARCHING
    pub fn open_failed(&mut self) -> Result<(), InvalidStateTransition> {
        self.expect(ConnectionState::Connecting, "abandon the open attempt")?;
        self.reset();
        Ok(())
    }

    /// Transition from STREAMING back to SEARCHING
    pub fn connection_lost(&mut self) -> Result<(), InvalidStateTransition> {
        self.expect(ConnectionState::Streaming, "drop the connection")?;
        self.reset();
        Ok(())
    }

    /// Force the session back to SEARCHING, whatever the current state
    pub fn reset(&mut self) {
        self.state = ConnectionState::Searching;
        self.device = None;
    }

    fn expect(&self, state: ConnectionState, action: &str) -> Result<(), InvalidStateTransition> {
        if self.state != state {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: action.to_string(),
            });
        }
        Ok(())
    }
}
