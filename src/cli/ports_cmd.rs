//! Ports command handler

use crate::application::ports::{SerialBus, SerialError};
use crate::domain::device::{DeviceInfo, DeviceMatcher};

use super::presenter::Presenter;

/// List serial devices, marking the ones discovery would accept.
pub fn handle_ports<B: SerialBus>(
    bus: &B,
    matcher: &DeviceMatcher,
    presenter: &Presenter,
) -> Result<(), SerialError> {
    let devices = bus.list_devices()?;

    if devices.is_empty() {
        presenter.warn("No serial devices found");
        return Ok(());
    }

    for device in &devices {
        presenter.key_value(&device.path, &describe(device, matcher.matches(device)));
    }

    match matcher.select(&devices) {
        Some(device) => presenter.success(&format!("Would connect to {}", device.path)),
        None => presenter.warn(&format!(
            "No device matches keywords [{}] or path fragments [{}]",
            matcher.keywords().join(", "),
            matcher.path_fragments().join(", ")
        )),
    }

    Ok(())
}

fn describe(device: &DeviceInfo, matched: bool) -> String {
    if matched {
        format!("{} [match]", device.description)
    } else {
        device.description.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::LineReader;
    use crate::domain::link::LinkSettings;

    struct ListOnly(Result<Vec<DeviceInfo>, SerialError>);

    impl SerialBus for ListOnly {
        fn list_devices(&self) -> Result<Vec<DeviceInfo>, SerialError> {
            self.0.clone()
        }

        fn open(&self, path: &str, _: &LinkSettings) -> Result<Box<dyn LineReader>, SerialError> {
            Err(SerialError::Open {
                path: path.to_string(),
                message: "not supported".to_string(),
            })
        }
    }

    #[test]
    fn describe_marks_matches() {
        let device = DeviceInfo::new("COM3", "Arduino Uno");
        assert_eq!(describe(&device, true), "Arduino Uno [match]");
        assert_eq!(describe(&device, false), "Arduino Uno");
    }

    #[test]
    fn lists_devices() {
        let bus = ListOnly(Ok(vec![
            DeviceInfo::new("/dev/ttyS0", "n/a"),
            DeviceInfo::new("/dev/ttyACM0", "Arduino LLC Arduino Uno"),
        ]));
        assert!(handle_ports(&bus, &DeviceMatcher::default(), &Presenter::new()).is_ok());
    }

    #[test]
    fn enumeration_error_is_returned() {
        let bus = ListOnly(Err(SerialError::Enumerate("permission denied".to_string())));
        let err = handle_ports(&bus, &DeviceMatcher::default(), &Presenter::new()).unwrap_err();
        assert!(matches!(err, SerialError::Enumerate(_)));
    }
}
