//! Serial adapters backed by the `serialport` crate

mod line_reader;
mod system;

pub use line_reader::PortLineReader;
pub use system::SystemSerialBus;
