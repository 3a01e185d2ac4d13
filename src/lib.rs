//! serial-chime - serial-event-triggered sound playback
//!
//! This crate listens to a microcontroller on a serial port and plays sound
//! files when it reports trigger events such as `Play Ready Sound` or
//! `Play Team Sound#<name>#`. Playback runs on a bounded worker pool so the
//! serial loop never waits for audio.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects (baud rate, intervals, event grammar, device
//!   matcher, connection state machine), configuration and errors
//! - **Application**: Playback engine, event bridge and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (rodio, serialport, XDG config)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
