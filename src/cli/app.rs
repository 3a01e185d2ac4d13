//! Bridge runner and configuration loading

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;

use crate::application::ports::{ConfigStore, PlaybackError};
use crate::application::{BridgeConfig, BridgeEvent, EventBridge, PlaybackEngine};
use crate::domain::config::{AppConfig, DeviceConfig};
use crate::infrastructure::{RodioPlayer, SystemSerialBus};

use super::presenter::{Presenter, Tone};
use super::signals::watch_termination;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment overrides for the serial link
pub const ENV_PORT: &str = "SERIAL_CHIME_PORT";
pub const ENV_BAUD: &str = "SERIAL_CHIME_BAUD";

/// Name of the thread running the reconnect loop
const BRIDGE_THREAD_NAME: &str = "bridge";

/// Run the serial bridge until SIGINT/SIGTERM
pub async fn run_bridge(config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    let shutdown = Arc::new(AtomicBool::new(false));
    if let Err(e) = watch_termination(Arc::clone(&shutdown)).await {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let engine = Arc::new(build_engine(&config, presenter));
    let bridge_config = BridgeConfig {
        link: config.link_settings(),
        backoff: config.backoff_or_default(),
        restart_delay: config.restart_delay_or_default(),
        port: config.port().map(str::to_string),
    };

    presenter.info(&format!(
        "Listening for trigger events at {} baud ({} concurrent sounds)",
        bridge_config.link.baud_rate,
        engine.capacity()
    ));

    let mut bridge = EventBridge::new(
        SystemSerialBus::new(),
        Arc::clone(&engine),
        config.event_grammar(),
        config.device_matcher(),
        bridge_config,
    )
    .with_event_callback(Box::new(move |event: &BridgeEvent| {
        let (tone, message) = event_message(event);
        presenter.show(tone, &message);
    }));

    let worker = match thread::Builder::new()
        .name(BRIDGE_THREAD_NAME.to_string())
        .spawn(move || bridge.run_forever(&shutdown))
    {
        Ok(handle) => handle,
        Err(e) => {
            presenter.error(&format!("Failed to start bridge thread: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let bridge_result = tokio::task::spawn_blocking(move || worker.join()).await;

    presenter.info("Waiting for queued sounds to finish...");
    let drained = tokio::task::spawn_blocking(move || engine.shutdown()).await;

    match (bridge_result, drained) {
        (Ok(Ok(())), Ok(())) => {
            presenter.success("Stopped");
            ExitCode::from(EXIT_SUCCESS)
        }
        _ => {
            presenter.error("Bridge terminated abnormally");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Playback engine backed by rodio, logging every failed background clip
pub fn build_engine(config: &AppConfig, presenter: Presenter) -> PlaybackEngine {
    PlaybackEngine::new(Arc::new(RodioPlayer::new()), config.pool_size_or_default())
        .with_failure_hook(Arc::new(move |path: &Path, e: &PlaybackError| {
            presenter.error(&format!("Failed to play {}: {}", path.display(), e));
        }))
}

/// Operator message for a bridge event
pub fn event_message(event: &BridgeEvent) -> (Tone, String) {
    match event {
        BridgeEvent::StateChanged { from, to } => {
            (Tone::Status, format!("Connection: {} -> {}", from, to))
        }
        BridgeEvent::DeviceChecked(device) => (
            Tone::Info,
            format!("Checking {}: {}", device.path, device.description),
        ),
        BridgeEvent::DeviceFound(device) => (
            Tone::Success,
            format!("Device found: {} ({})", device.path, device.description),
        ),
        BridgeEvent::NoDevice => (
            Tone::Warn,
            "No matching device found, retrying...".to_string(),
        ),
        BridgeEvent::ScanFailed(e) => (Tone::Warn, e.to_string()),
        BridgeEvent::ConnectFailed(e) => (Tone::Error, e.to_string()),
        BridgeEvent::Connected { path } => (Tone::Success, format!("Connected to {}", path)),
        BridgeEvent::ConnectionLost(e) => (Tone::Warn, format!("Connection lost: {}", e)),
        BridgeEvent::LineReceived(line) => (Tone::Info, format!("Received: {}", line)),
        BridgeEvent::Dispatched {
            rule,
            parameter,
            path,
        } => {
            let trigger = match parameter {
                Some(p) => format!("{} {}", rule, p),
                None => rule.clone(),
            };
            (
                Tone::Info,
                format!("Playing {} ({})", path.display(), trigger),
            )
        }
        BridgeEvent::Restarting { reason } => (
            Tone::Error,
            format!("Bridge crashed: {}; restarting", reason),
        ),
    }
}

/// Link overrides from `SERIAL_CHIME_PORT` and `SERIAL_CHIME_BAUD`
pub fn env_config() -> AppConfig {
    let port = env::var(ENV_PORT).ok().filter(|s| !s.is_empty());
    let baud_rate = env::var(ENV_BAUD)
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok());

    AppConfig {
        baud_rate,
        device: port.map(|port| DeviceConfig {
            port: Some(port),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
    presenter: &Presenter,
) -> AppConfig {
    let (file_config, error) = store.load_or_empty().await;
    if let Some(e) = error {
        presenter.warn(&format!(
            "Ignoring config file {}: {}",
            store.path().display(),
            e
        ));
    }

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SerialError;
    use crate::domain::device::DeviceInfo;
    use crate::domain::link::ConnectionState;
    use crate::infrastructure::XdgConfigStore;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn dispatch_message_mentions_file_and_parameter() {
        let event = BridgeEvent::Dispatched {
            rule: "team".to_string(),
            parameter: Some("Falcons".to_string()),
            path: PathBuf::from("team_Falcons.mp3"),
        };
        let (tone, message) = event_message(&event);
        assert_eq!(tone, Tone::Info);
        assert!(message.contains("team_Falcons.mp3"));
        assert!(message.contains("team Falcons"));
    }

    #[test]
    fn failures_map_to_error_tone() {
        let event = BridgeEvent::ConnectFailed(SerialError::Open {
            path: "COM3".to_string(),
            message: "busy".to_string(),
        });
        assert_eq!(event_message(&event).0, Tone::Error);

        let event = BridgeEvent::Restarting {
            reason: "boom".to_string(),
        };
        assert_eq!(event_message(&event).0, Tone::Error);
    }

    #[test]
    fn state_change_uses_status_tone() {
        let event = BridgeEvent::StateChanged {
            from: ConnectionState::Connecting,
            to: ConnectionState::Streaming,
        };
        let (tone, message) = event_message(&event);
        assert_eq!(tone, Tone::Status);
        assert!(message.contains("connecting -> streaming"));
    }

    #[test]
    fn device_found_shows_description() {
        let event = BridgeEvent::DeviceFound(DeviceInfo::new("COM3", "Arduino Uno"));
        let (_, message) = event_message(&event);
        assert!(message.contains("COM3"));
        assert!(message.contains("Arduino Uno"));
    }

    #[tokio::test]
    async fn cli_config_wins_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "baud_rate = 9600\npool_size = 2\n").unwrap();
        let store = XdgConfigStore::with_path(path);

        let cli_config = AppConfig {
            pool_size: Some(6),
            ..Default::default()
        };
        let config = load_merged_config(&store, cli_config, &Presenter::new()).await;

        assert_eq!(config.pool_size_or_default(), 6);
        assert_eq!(config.ready_sound_or_default(), "ready.mp3");
        if env::var(ENV_BAUD).is_err() {
            assert_eq!(config.baud_rate_or_default().value(), 9_600);
        }
    }

    #[tokio::test]
    async fn broken_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();
        let store = XdgConfigStore::with_path(path);

        let config = load_merged_config(&store, AppConfig::empty(), &Presenter::new()).await;
        assert_eq!(config.pool_size_or_default(), 4);
    }
}
