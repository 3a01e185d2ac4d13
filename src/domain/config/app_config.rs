//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::device::{DeviceMatcher, DEFAULT_KEYWORDS, DEFAULT_PATH_FRAGMENTS};
use crate::domain::event::EventGrammar;
use crate::domain::link::{BaudRate, Interval, LinkSettings};

/// Default number of clips that may render at the same time
pub const DEFAULT_POOL_SIZE: usize = 4;

/// Upper bound for the worker pool size
pub const MAX_POOL_SIZE: usize = 32;

pub const DEFAULT_READY_SOUND: &str = "ready.mp3";
pub const DEFAULT_SOUND: &str = "sound.mp3";
pub const DEFAULT_TEAM_TEMPLATE: &str = "team_#t#.mp3";

/// Device discovery configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Fixed port; skips discovery when set
    pub port: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub path_fragments: Option<Vec<String>>,
}

/// Sound file locations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundsConfig {
    pub ready: Option<String>,
    pub default: Option<String>,
    pub team_template: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub baud_rate: Option<u32>,
    pub read_timeout: Option<String>,
    pub backoff: Option<String>,
    pub restart_delay: Option<String>,
    pub pool_size: Option<usize>,
    pub device: Option<DeviceConfig>,
    pub sounds: Option<SoundsConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            baud_rate: Some(BaudRate::default().value()),
            read_timeout: Some(Interval::default_read_timeout().to_string()),
            backoff: Some(Interval::default_backoff().to_string()),
            restart_delay: Some(Interval::default_restart_delay().to_string()),
            pool_size: Some(DEFAULT_POOL_SIZE),
            device: Some(DeviceConfig {
                port: None,
                keywords: Some(DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect()),
                path_fragments: Some(
                    DEFAULT_PATH_FRAGMENTS.iter().map(|s| s.to_string()).collect(),
                ),
            }),
            sounds: Some(SoundsConfig {
                ready: Some(DEFAULT_READY_SOUND.to_string()),
                default: Some(DEFAULT_SOUND.to_string()),
                team_template: Some(DEFAULT_TEAM_TEMPLATE.to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            baud_rate: other.baud_rate.or(self.baud_rate),
            read_timeout: other.read_timeout.or(self.read_timeout),
            backoff: other.backoff.or(self.backoff),
            restart_delay: other.restart_delay.or(self.restart_delay),
            pool_size: other.pool_size.or(self.pool_size),
            device: Self::merge_device(self.device, other.device),
            sounds: Self::merge_sounds(self.sounds, other.sounds),
        }
    }

    fn merge_device(base: Option<DeviceConfig>, other: Option<DeviceConfig>) -> Option<DeviceConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(DeviceConfig {
                port: o.port.or(b.port),
                keywords: o.keywords.or(b.keywords),
                path_fragments: o.path_fragments.or(b.path_fragments),
            }),
        }
    }

    fn merge_sounds(base: Option<SoundsConfig>, other: Option<SoundsConfig>) -> Option<SoundsConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(SoundsConfig {
                ready: o.ready.or(b.ready),
                default: o.default.or(b.default),
                team_template: o.team_template.or(b.team_template),
            }),
        }
    }

    /// Get baud rate, or 115200 if not set/invalid
    pub fn baud_rate_or_default(&self) -> BaudRate {
        self.baud_rate
            .and_then(|rate| BaudRate::new(rate).ok())
            .unwrap_or_default()
    }

    pub fn read_timeout_or_default(&self) -> Interval {
        Self::parse_interval(&self.read_timeout).unwrap_or_else(Interval::default_read_timeout)
    }

    pub fn backoff_or_default(&self) -> Interval {
        Self::parse_interval(&self.backoff).unwrap_or_else(Interval::default_backoff)
    }

    pub fn restart_delay_or_default(&self) -> Interval {
        Self::parse_interval(&self.restart_delay).unwrap_or_else(Interval::default_restart_delay)
    }

    fn parse_interval(value: &Option<String>) -> Option<Interval> {
        value.as_ref().and_then(|s| s.parse().ok())
    }

    /// Get pool size clamped to 1..=32, or 4 if not set
    pub fn pool_size_or_default(&self) -> usize {
        self.pool_size
            .unwrap_or(DEFAULT_POOL_SIZE)
            .clamp(1, MAX_POOL_SIZE)
    }

    /// Explicitly configured port, if any
    pub fn port(&self) -> Option<&str> {
        self.device
            .as_ref()
            .and_then(|d| d.port.as_deref())
            .filter(|p| !p.is_empty())
    }

    pub fn keywords_or_default(&self) -> Vec<String> {
        self.device
            .as_ref()
            .and_then(|d| d.keywords.clone())
            .unwrap_or_else(|| DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect())
    }

    pub fn path_fragments_or_default(&self) -> Vec<String> {
        self.device
            .as_ref()
            .and_then(|d| d.path_fragments.clone())
            .unwrap_or_else(|| DEFAULT_PATH_FRAGMENTS.iter().map(|s| s.to_string()).collect())
    }

    pub fn ready_sound_or_default(&self) -> &str {
        self.sounds
            .as_ref()
            .and_then(|s| s.ready.as_deref())
            .unwrap_or(DEFAULT_READY_SOUND)
    }

    pub fn default_sound_or_default(&self) -> &str {
        self.sounds
            .as_ref()
            .and_then(|s| s.default.as_deref())
            .unwrap_or(DEFAULT_SOUND)
    }

    pub fn team_template_or_default(&self) -> &str {
        self.sounds
            .as_ref()
            .and_then(|s| s.team_template.as_deref())
            .unwrap_or(DEFAULT_TEAM_TEMPLATE)
    }

    /// Serial parameters used when opening the device
    pub fn link_settings(&self) -> LinkSettings {
        LinkSettings {
            baud_rate: self.baud_rate_or_default(),
            read_timeout: self.read_timeout_or_default(),
        }
    }

    /// Discovery matcher built from the device section
    pub fn device_matcher(&self) -> DeviceMatcher {
        DeviceMatcher::new(self.keywords_or_default(), self.path_fragments_or_default())
    }

    /// Event grammar wired to the configured sound files
    pub fn event_grammar(&self) -> EventGrammar {
        EventGrammar::standard(
            self.ready_sound_or_default(),
            self.team_template_or_default(),
            self.default_sound_or_default(),
        )
    }
}
