//! Operating system serial bus

use serialport::{SerialPortInfo, SerialPortType};

use crate::application::ports::{LineReader, SerialBus, SerialError};
use crate::domain::device::DeviceInfo;
use crate::domain::link::LinkSettings;

use super::line_reader::PortLineReader;

/// Serial bus backed by the host's serial ports
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSerialBus;

impl SystemSerialBus {
    pub fn new() -> Self {
        Self
    }
}

impl SerialBus for SystemSerialBus {
    fn list_devices(&self) -> Result<Vec<DeviceInfo>, SerialError> {
        let ports =
            serialport::available_ports().map_err(|e| SerialError::Enumerate(e.to_string()))?;
        Ok(ports.iter().map(to_device_info).collect())
    }

    fn open(&self, path: &str, settings: &LinkSettings) -> Result<Box<dyn LineReader>, SerialError> {
        let port = serialport::new(path, settings.baud_rate.value())
            .timeout(settings.read_timeout.as_std())
            .open()
            .map_err(|e| SerialError::Open {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        Ok(Box::new(PortLineReader::new(port)))
    }
}

fn to_device_info(info: &SerialPortInfo) -> DeviceInfo {
    DeviceInfo::new(info.port_name.clone(), describe(&info.port_type))
}

/// Human-readable description, e.g. "Arduino LLC Arduino Uno"
fn describe(port_type: &SerialPortType) -> String {
    match port_type {
        SerialPortType::UsbPort(usb) => {
            let parts: Vec<&str> = [usb.manufacturer.as_deref(), usb.product.as_deref()]
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty())
                .collect();
            if parts.is_empty() {
                format!("USB device {:04x}:{:04x}", usb.vid, usb.pid)
            } else {
                parts.join(" ")
            }
        }
        SerialPortType::PciPort => "PCI serial port".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth serial port".to_string(),
        SerialPortType::Unknown => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::link::{BaudRate, Interval};
    use serialport::UsbPortInfo;

    fn usb(manufacturer: Option<&str>, product: Option<&str>) -> SerialPortType {
        SerialPortType::UsbPort(UsbPortInfo {
            vid: 0x2341,
            pid: 0x0043,
            serial_number: None,
            manufacturer: manufacturer.map(str::to_string),
            product: product.map(str::to_string),
        })
    }

    #[test]
    fn usb_description_joins_manufacturer_and_product() {
        let desc = describe(&usb(Some("Arduino LLC"), Some("Arduino Uno")));
        assert_eq!(desc, "Arduino LLC Arduino Uno");
    }

    #[test]
    fn usb_without_strings_falls_back_to_ids() {
        assert_eq!(describe(&usb(None, Some(""))), "USB device 2341:0043");
    }

    #[test]
    fn non_usb_descriptions() {
        assert_eq!(describe(&SerialPortType::PciPort), "PCI serial port");
        assert_eq!(describe(&SerialPortType::Unknown), "n/a");
    }

    #[test]
    fn opening_missing_port_fails() {
        let settings = LinkSettings {
            baud_rate: BaudRate::new(9_600).unwrap(),
            read_timeout: Interval::from_millis(100),
        };
        match SystemSerialBus::new().open("/dev/serial-chime-does-not-exist", &settings) {
            Err(SerialError::Open { path, .. }) => {
                assert_eq!(path, "/dev/serial-chime-does-not-exist")
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("opened a port that does not exist"),
        }
    }

    #[test]
    #[ignore = "Requires serial hardware"]
    fn lists_attached_devices() {
        let devices = SystemSerialBus::new().list_devices().unwrap();
        assert!(!devices.is_empty());
    }
}
