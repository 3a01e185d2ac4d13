//! Event bridge use case
//!
//! Finds the trigger device, keeps a connection to it and turns every
//! recognized line into a background playback request.

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::domain::device::{DeviceInfo, DeviceMatcher};
use crate::domain::event::EventGrammar;
use crate::domain::link::{
    ConnectionSession, ConnectionState, Interval, InvalidStateTransition, LinkSettings,
};

use super::playback::{panic_message, PlaybackEngine, PlaybackHandle};
use super::ports::{LineReader, SerialBus, SerialError};

/// Granularity at which sleeps notice a shutdown request
const SHUTDOWN_POLL: Duration = Duration::from_millis(50);

/// Errors that abort a bridge session
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Connection state out of sync: {0}")]
    InvalidState(#[from] InvalidStateTransition),
}

/// Timing and link configuration of the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Serial parameters for opening the device
    pub link: LinkSettings,
    /// Wait after a failed search or open attempt
    pub backoff: Interval,
    /// Pause before a crashed session is restarted
    pub restart_delay: Interval,
    /// Fixed device path; bypasses discovery
    pub port: Option<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            link: LinkSettings::default(),
            backoff: Interval::default_backoff(),
            restart_delay: Interval::default_restart_delay(),
            port: None,
        }
    }
}

/// Progress reports of the bridge loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    StateChanged {
        from: ConnectionState,
        to: ConnectionState,
    },
    DeviceChecked(DeviceInfo),
    DeviceFound(DeviceInfo),
    NoDevice,
    ScanFailed(SerialError),
    ConnectFailed(SerialError),
    Connected {
        path: String,
    },
    ConnectionLost(SerialError),
    LineReceived(String),
    Dispatched {
        rule: String,
        parameter: Option<String>,
        path: PathBuf,
    },
    Restarting {
        reason: String,
    },
}

/// Observer for [`BridgeEvent`]s
pub type EventCallback = Box<dyn Fn(&BridgeEvent) + Send + Sync>;

/// Serial-to-playback bridge
pub struct EventBridge<B: SerialBus> {
    bus: B,
    engine: Arc<PlaybackEngine>,
    grammar: EventGrammar,
    matcher: DeviceMatcher,
    config: BridgeConfig,
    session: ConnectionSession,
    on_event: Option<EventCallback>,
}

impl<B: SerialBus> EventBridge<B> {
    pub fn new(
        bus: B,
        engine: Arc<PlaybackEngine>,
        grammar: EventGrammar,
        matcher: DeviceMatcher,
        config: BridgeConfig,
    ) -> Self {
        Self {
            bus,
            engine,
            grammar,
            matcher,
            config,
            session: ConnectionSession::new(),
            on_event: None,
        }
    }

    /// Receive progress reports through `callback`
    pub fn with_event_callback(mut self, callback: EventCallback) -> Self {
        self.on_event = Some(callback);
        self
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        self.session.state()
    }

    /// Run sessions until `shutdown` is set.
    ///
    /// A session that fails or panics is reported as
    /// [`BridgeEvent::Restarting`] and started again after the restart delay.
    pub fn run_forever(&mut self, shutdown: &AtomicBool) {
        while !shutdown.load(Ordering::SeqCst) {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run(shutdown)));
            let reason = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e.to_string(),
                Err(payload) => panic_message(payload.as_ref()),
            };
            self.emit(BridgeEvent::Restarting { reason });
            pause(shutdown, self.config.restart_delay);
        }
    }

    /// One bridge session: search, connect and stream until `shutdown`.
    pub fn run(&mut self, shutdown: &AtomicBool) -> Result<(), BridgeError> {
        self.session.reset();

        while !shutdown.load(Ordering::SeqCst) {
            let Some(device) = self.search() else {
                pause(shutdown, self.config.backoff);
                continue;
            };
            self.advance(|s| s.device_found(&device.path))?;

            let mut reader = match self.bus.open(&device.path, &self.config.link) {
                Ok(reader) => reader,
                Err(e) => {
                    self.emit(BridgeEvent::ConnectFailed(e));
                    self.advance(ConnectionSession::open_failed)?;
                    pause(shutdown, self.config.backoff);
                    continue;
                }
            };
            self.advance(ConnectionSession::connected)?;
            self.emit(BridgeEvent::Connected {
                path: device.path.clone(),
            });

            let lost = self.stream(reader.as_mut(), shutdown);
            drop(reader);
            if let Some(e) = lost {
                self.emit(BridgeEvent::ConnectionLost(e));
            }
            self.advance(ConnectionSession::connection_lost)?;
        }

        Ok(())
    }

    /// Resolve one line and queue its sound. Never waits for playback.
    pub fn dispatch(&self, line: &str) -> Option<PlaybackHandle> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        self.emit(BridgeEvent::LineReceived(line.to_string()));

        let matched = self.grammar.resolve(line)?;
        let handle = self.engine.submit_async(matched.request.into_path());
        self.emit(BridgeEvent::Dispatched {
            rule: matched.rule,
            parameter: matched.parameter,
            path: handle.path().to_path_buf(),
        });
        Some(handle)
    }

    fn search(&self) -> Option<DeviceInfo> {
        if let Some(port) = &self.config.port {
            return Some(DeviceInfo::new(port.clone(), "configured port"));
        }

        let devices = match self.bus.list_devices() {
            Ok(devices) => devices,
            Err(e) => {
                self.emit(BridgeEvent::ScanFailed(e));
                return None;
            }
        };
        for device in &devices {
            self.emit(BridgeEvent::DeviceChecked(device.clone()));
        }

        match self.matcher.select(&devices) {
            Some(device) => {
                self.emit(BridgeEvent::DeviceFound(device.clone()));
                Some(device.clone())
            }
            None => {
                self.emit(BridgeEvent::NoDevice);
                None
            }
        }
    }

    /// Read lines until the connection fails or shutdown is requested.
    ///
    /// # Returns
    /// The error that ended the connection, `None` on shutdown
    fn stream(&self, reader: &mut dyn LineReader, shutdown: &AtomicBool) -> Option<SerialError> {
        while !shutdown.load(Ordering::SeqCst) {
            match reader.read_line() {
                Ok(Some(line)) => {
                    self.dispatch(&line);
                }
                Ok(None) => {}
                Err(e) => return Some(e),
            }
        }
        None
    }

    fn advance<F>(&mut self, step: F) -> Result<(), InvalidStateTransition>
    where
        F: FnOnce(&mut ConnectionSession) -> Result<(), InvalidStateTransition>,
    {
        let from = self.session.state();
        step(&mut self.session)?;
        let to = self.session.state();
        if from != to {
            self.emit(BridgeEvent::StateChanged { from, to });
        }
        Ok(())
    }

    fn emit(&self, event: BridgeEvent) {
        if let Some(callback) = &self.on_event {
            callback(&event);
        }
    }
}

/// Sleep for `interval` unless shutdown is requested first.
///
/// # Returns
/// `false` if the sleep was cut short by shutdown
fn pause(shutdown: &AtomicBool, interval: Interval) -> bool {
    let deadline = Instant::now() + interval.as_std();
    while !shutdown.load(Ordering::SeqCst) {
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep((deadline - now).min(SHUTDOWN_POLL));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_runs_full_interval() {
        let shutdown = AtomicBool::new(false);
        let start = Instant::now();
        assert!(pause(&shutdown, Interval::from_millis(30)));
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn pause_returns_early_on_shutdown() {
        let shutdown = AtomicBool::new(true);
        let start = Instant::now();
        assert!(!pause(&shutdown, Interval::from_secs(10)));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.backoff.as_millis(), 3_000);
        assert_eq!(config.link.baud_rate.value(), 115_200);
        assert!(config.port.is_none());
    }
}
