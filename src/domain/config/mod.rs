//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, DeviceConfig, SoundsConfig, DEFAULT_POOL_SIZE, DEFAULT_READY_SOUND, DEFAULT_SOUND,
    DEFAULT_TEAM_TEMPLATE, MAX_POOL_SIZE,
};
