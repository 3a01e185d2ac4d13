//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, DeviceConfig, SoundsConfig, MAX_POOL_SIZE};
use crate::domain::error::ConfigError;
use crate::domain::event::PLACEHOLDER;
use crate::domain::link::{BaudRate, Interval};

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let mut config = store.load().await?;
    set_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let config = store.load().await?;
    presenter.output(get_value(&config, key).as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, get_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_valid_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(validation_error(
            key,
            format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        ))
    }
}

/// Read a config value in its `config set` notation
fn get_value(config: &AppConfig, key: &str) -> Option<String> {
    let device = config.device.as_ref();
    let sounds = config.sounds.as_ref();

    match key {
        "baud_rate" => config.baud_rate.map(|b| b.to_string()),
        "read_timeout" => config.read_timeout.clone(),
        "backoff" => config.backoff.clone(),
        "restart_delay" => config.restart_delay.clone(),
        "pool_size" => config.pool_size.map(|n| n.to_string()),
        "device.port" => device.and_then(|d| d.port.clone()),
        "device.keywords" => device.and_then(|d| d.keywords.as_ref()).map(|k| k.join(",")),
        "device.path_fragments" => device
            .and_then(|d| d.path_fragments.as_ref())
            .map(|f| f.join(",")),
        "sounds.ready" => sounds.and_then(|s| s.ready.clone()),
        "sounds.default" => sounds.and_then(|s| s.default.clone()),
        "sounds.team_template" => sounds.and_then(|s| s.team_template.clone()),
        _ => None,
    }
}

/// Validate `value` for `key` and store it in `config`
fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim();

    match key {
        "baud_rate" => {
            let rate = value
                .parse::<BaudRate>()
                .map_err(|e| validation_error(key, e.to_string()))?;
            config.baud_rate = Some(rate.value());
        }
        "read_timeout" | "backoff" | "restart_delay" => {
            let interval = value
                .parse::<Interval>()
                .map_err(|e| validation_error(key, e.to_string()))?;
            let slot = match key {
                "read_timeout" => &mut config.read_timeout,
                "backoff" => &mut config.backoff,
                _ => &mut config.restart_delay,
            };
            *slot = Some(interval.to_string());
        }
        "pool_size" => {
            let size = value
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=MAX_POOL_SIZE).contains(n))
                .ok_or_else(|| {
                    validation_error(key, format!("Value must be between 1 and {}", MAX_POOL_SIZE))
                })?;
            config.pool_size = Some(size);
        }
        "device.port" => {
            let port = non_empty(key, value)?.to_string();
            device_section(config).port = Some(port);
        }
        "device.keywords" => {
            let keywords = parse_list(key, value)?;
            device_section(config).keywords = Some(keywords);
        }
        "device.path_fragments" => {
            let path_fragments = parse_list(key, value)?;
            device_section(config).path_fragments = Some(path_fragments);
        }
        "sounds.ready" => {
            let ready = non_empty(key, value)?.to_string();
            sounds_section(config).ready = Some(ready);
        }
        "sounds.default" => {
            let default = non_empty(key, value)?.to_string();
            sounds_section(config).default = Some(default);
        }
        "sounds.team_template" => {
            if !value.contains(PLACEHOLDER) {
                return Err(validation_error(
                    key,
                    format!("Template must contain the placeholder '{}'", PLACEHOLDER),
                ));
            }
            sounds_section(config).team_template = Some(value.to_string());
        }
        _ => return Err(validation_error(key, "Unknown key".to_string())),
    }

    Ok(())
}

fn device_section(config: &mut AppConfig) -> &mut DeviceConfig {
    config.device.get_or_insert_with(DeviceConfig::default)
}

fn sounds_section(config: &mut AppConfig) -> &mut SoundsConfig {
    config.sounds.get_or_insert_with(SoundsConfig::default)
}

fn non_empty<'a>(key: &str, value: &'a str) -> Result<&'a str, ConfigError> {
    if value.is_empty() {
        Err(validation_error(key, "Value must not be empty".to_string()))
    } else {
        Ok(value)
    }
}

/// Parse a comma-separated list, dropping blank entries
fn parse_list(key: &str, value: &str) -> Result<Vec<String>, ConfigError> {
    let items: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        return Err(validation_error(
            key,
            "Expected a comma-separated list with at least one entry".to_string(),
        ));
    }
    Ok(items)
}

fn validation_error(key: &str, message: String) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
        set_value(config, key, value)
    }

    #[test]
    fn every_key_round_trips_through_get() {
        let mut config = AppConfig::empty();
        let samples = [
            ("baud_rate", "9600"),
            ("read_timeout", "500ms"),
            ("backoff", "5s"),
            ("restart_delay", "2s"),
            ("pool_size", "8"),
            ("device.port", "/dev/ttyACM0"),
            ("device.keywords", "Arduino,CH340"),
            ("device.path_fragments", "ttyACM"),
            ("sounds.ready", "go.wav"),
            ("sounds.default", "beep.wav"),
            ("sounds.team_template", "teams/#t#.ogg"),
        ];
        assert_eq!(samples.len(), VALID_CONFIG_KEYS.len());

        for (key, value) in samples {
            set(&mut config, key, value).unwrap();
            assert_eq!(get_value(&config, key).as_deref(), Some(value), "{}", key);
        }
    }

    #[test]
    fn unset_keys_read_as_none() {
        let config = AppConfig::empty();
        for key in VALID_CONFIG_KEYS {
            assert!(get_value(&config, key).is_none(), "{}", key);
        }
    }

    #[test]
    fn intervals_are_normalized() {
        let mut config = AppConfig::empty();
        set(&mut config, "backoff", " 90s ").unwrap();
        assert_eq!(config.backoff.as_deref(), Some("1m30s"));
    }

    #[test]
    fn list_values_are_trimmed() {
        let mut config = AppConfig::empty();
        set(&mut config, "device.keywords", " Arduino , ,SERIAL ").unwrap();
        assert_eq!(config.keywords_or_default(), ["Arduino", "SERIAL"]);
    }

    #[test]
    fn rejects_invalid_values() {
        let mut config = AppConfig::empty();
        assert!(set(&mut config, "baud_rate", "fast").is_err());
        assert!(set(&mut config, "baud_rate", "10").is_err());
        assert!(set(&mut config, "backoff", "soon").is_err());
        assert!(set(&mut config, "pool_size", "0").is_err());
        assert!(set(&mut config, "pool_size", "33").is_err());
        assert!(set(&mut config, "device.keywords", " , ").is_err());
        assert!(set(&mut config, "device.port", "").is_err());
        assert!(set(&mut config, "sounds.team_template", "team.mp3").is_err());
        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn validation_error_names_key() {
        let err = set_value(&mut AppConfig::empty(), "pool_size", "many").unwrap_err();
        match err {
            ConfigError::ValidationError { key, .. } => assert_eq!(key, "pool_size"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(ensure_valid_key("api_key").is_err());
        assert!(ensure_valid_key("sounds.ready").is_ok());
    }
}
