//! Device discovery matcher

use super::DeviceInfo;

/// Description keywords of the boards the trigger firmware runs on.
/// "Serielles" covers German Windows ("USB-Serielles Gerät").
pub const DEFAULT_KEYWORDS: &[&str] = &["Arduino", "Serielles", "SERIAL"];

/// Device path fragments used by macOS for USB CDC/FTDI adapters
pub const DEFAULT_PATH_FRAGMENTS: &[&str] = &["tty.usbmodem", "tty.usbserial"];

/// Selects the trigger device out of the attached serial devices.
///
/// A device matches when its description contains one of the keywords or
/// its path contains one of the path fragments. Matching is case-sensitive
/// substring matching; the first matching device wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMatcher {
    keywords: Vec<String>,
    path_fragments: Vec<String>,
}

impl DeviceMatcher {
    pub fn new(keywords: Vec<String>, path_fragments: Vec<String>) -> Self {
        Self {
            keywords: keywords.into_iter().filter(|k| !k.is_empty()).collect(),
            path_fragments: path_fragments.into_iter().filter(|f| !f.is_empty()).collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn path_fragments(&self) -> &[String] {
        &self.path_fragments
    }

    /// Check a single device
    pub fn matches(&self, device: &DeviceInfo) -> bool {
        self.keywords
            .iter()
            .any(|k| device.description.contains(k.as_str()))
            || self
                .path_fragments
                .iter()
                .any(|f| device.path.contains(f.as_str()))
    }

    /// First matching device in enumeration order
    pub fn select<'a>(&self, devices: &'a [DeviceInfo]) -> Option<&'a DeviceInfo> {
        devices.iter().find(|d| self.matches(d))
    }
}

impl Default for DeviceMatcher {
    fn default() -> Self {
        Self::new(
            DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_PATH_FRAGMENTS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_arduino_description() {
        let matcher = DeviceMatcher::default();
        assert!(matcher.matches(&DeviceInfo::new("COM3", "Arduino Uno (COM3)")));
    }

    #[test]
    fn matches_german_windows_description() {
        let matcher = DeviceMatcher::default();
        assert!(matcher.matches(&DeviceInfo::new("COM5", "USB-Serielles Gerät (COM5)")));
    }

    #[test]
    fn matches_macos_path_fragment() {
        let matcher = DeviceMatcher::default();
        assert!(matcher.matches(&DeviceInfo::new("/dev/tty.usbmodem1402", "n/a")));
        assert!(matcher.matches(&DeviceInfo::new("/dev/tty.usbserial-A50285BI", "")));
    }

    #[test]
    fn ignores_unrelated_devices() {
        let matcher = DeviceMatcher::default();
        assert!(!matcher.matches(&DeviceInfo::new("/dev/ttyS0", "PCI serial port")));
        assert!(!matcher.matches(&DeviceInfo::new("COM1", "Communications Port (COM1)")));
    }

    #[test]
    fn keyword_match_is_case_sensitive() {
        let matcher = DeviceMatcher::default();
        assert!(!matcher.matches(&DeviceInfo::new("COM7", "arduino clone")));
    }

    #[test]
    fn select_returns_first_match() {
        let matcher = DeviceMatcher::default();
        let devices = vec![
            DeviceInfo::new("/dev/ttyS0", "PCI serial port"),
            DeviceInfo::new("/dev/ttyACM0", "Arduino LLC Arduino Leonardo"),
            DeviceInfo::new("/dev/ttyACM1", "Arduino LLC Arduino Micro"),
        ];
        let selected = matcher.select(&devices).unwrap();
        assert_eq!(selected.path, "/dev/ttyACM0");
    }

    #[test]
    fn select_none_when_nothing_matches() {
        let matcher = DeviceMatcher::default();
        let devices = vec![DeviceInfo::new("/dev/ttyS0", "PCI serial port")];
        assert!(matcher.select(&devices).is_none());
        assert!(matcher.select(&[]).is_none());
    }

    #[test]
    fn custom_keywords_replace_defaults() {
        let matcher = DeviceMatcher::new(vec!["CH340".to_string()], vec![]);
        assert!(matcher.matches(&DeviceInfo::new("COM9", "USB-SERIAL CH340 (COM9)")));
        assert!(!matcher.matches(&DeviceInfo::new("/dev/tty.usbmodem1", "Arduino")));
    }

    #[test]
    fn empty_tokens_are_dropped() {
        let matcher = DeviceMatcher::new(vec![String::new()], vec![String::new()]);
        assert!(matcher.keywords().is_empty());
        assert!(!matcher.matches(&DeviceInfo::new("/dev/ttyS0", "anything")));
    }
}
