//! serial-chime CLI entry point

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use serial_chime::cli::{
    app::{load_merged_config, run_bridge, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    play_cmd::handle_play,
    ports_cmd::handle_ports,
    presenter::Presenter,
};
use serial_chime::domain::config::{AppConfig, DeviceConfig, MAX_POOL_SIZE};
use serial_chime::domain::link::BaudRate;
use serial_chime::infrastructure::{RodioPlayer, SystemSerialBus, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();
    let store = XdgConfigStore::at(cli.config.clone());

    // Build CLI config from args
    let baud_rate = match cli.baud.as_deref().map(str::parse::<BaudRate>) {
        Some(Ok(rate)) => Some(rate.value()),
        Some(Err(e)) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        None => None,
    };
    if let Some(size) = cli.pool_size {
        if !(1..=MAX_POOL_SIZE).contains(&size) {
            presenter.error(&format!(
                "Invalid pool size {}: must be between 1 and {}",
                size, MAX_POOL_SIZE
            ));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    }
    let cli_config = AppConfig {
        baud_rate,
        pool_size: cli.pool_size,
        device: cli.port.clone().map(|port| DeviceConfig {
            port: Some(port),
            ..Default::default()
        }),
        ..Default::default()
    };

    match cli.command {
        Some(Commands::Config { action }) => {
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Some(Commands::Play { file }) => {
            let played = tokio::task::spawn_blocking(move || {
                handle_play(Arc::new(RodioPlayer::new()), &file, &presenter)
            })
            .await;
            match played {
                Ok(Ok(())) => ExitCode::SUCCESS,
                Ok(Err(e)) => {
                    presenter.error(&e.to_string());
                    ExitCode::from(EXIT_ERROR)
                }
                Err(e) => {
                    presenter.error(&format!("Playback task failed: {}", e));
                    ExitCode::from(EXIT_ERROR)
                }
            }
        }
        Some(Commands::Ports) => {
            let config = load_merged_config(&store, cli_config, &presenter).await;
            if let Err(e) = handle_ports(&SystemSerialBus::new(), &config.device_matcher(), &presenter)
            {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        None => {
            let config = load_merged_config(&store, cli_config, &presenter).await;
            run_bridge(config).await
        }
    }
}
