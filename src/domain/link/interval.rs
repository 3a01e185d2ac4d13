//! Interval value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::IntervalParseError;

/// Default wait between discovery attempts (3 seconds)
pub const DEFAULT_BACKOFF_MS: u64 = 3_000;

/// Default serial read timeout (1 second)
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1_000;

/// Default pause before a crashed bridge session is restarted (1 second)
pub const DEFAULT_RESTART_DELAY_MS: u64 = 1_000;

/// Value object for the timing knobs of the bridge (backoff, timeouts).
/// Always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    milliseconds: u64,
}

impl Interval {
    /// Create an interval from milliseconds, clamped to at least 1ms
    pub const fn from_millis(ms: u64) -> Self {
        Self {
            milliseconds: if ms == 0 { 1 } else { ms },
        }
    }

    /// Create an interval from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self::from_millis(secs * 1000)
    }

    pub const fn default_backoff() -> Self {
        Self::from_millis(DEFAULT_BACKOFF_MS)
    }

    pub const fn default_read_timeout() -> Self {
        Self::from_millis(DEFAULT_READ_TIMEOUT_MS)
    }

    pub const fn default_restart_delay() -> Self {
        Self::from_millis(DEFAULT_RESTART_DELAY_MS)
    }

    /// Get interval in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    /// Parse strings such as "500ms", "3s", "1m", "1m30s" or "2s250ms".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || IntervalParseError {
            input: s.to_string(),
        };
        let input = s.trim().to_lowercase();
        let mut chars = input.chars().peekable();
        let mut total_ms: u64 = 0;
        let mut found_any = false;

        while chars.peek().is_some() {
            let mut number = String::new();
            while let Some(ch) = chars.peek().copied().filter(char::is_ascii_digit) {
                number.push(ch);
                chars.next();
            }
            let mut unit = String::new();
            while let Some(ch) = chars.peek().copied().filter(char::is_ascii_alphabetic) {
                unit.push(ch);
                chars.next();
            }
            if number.is_empty() {
                return Err(err());
            }
            let value: u64 = number.parse().map_err(|_| err())?;
            let factor = match unit.as_str() {
                "ms" => 1,
                "s" => 1_000,
                "m" => 60_000,
                _ => return Err(err()),
            };
            total_ms = value
                .checked_mul(factor)
                .and_then(|ms| total_ms.checked_add(ms))
                .ok_or_else(err)?;
            found_any = true;
        }

        if !found_any || total_ms == 0 {
            return Err(err());
        }

        Ok(Self {
            milliseconds: total_ms,
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.milliseconds / 60_000;
        let seconds = (self.milliseconds % 60_000) / 1_000;
        let millis = self.milliseconds % 1_000;

        let mut out = String::new();
        if minutes > 0 {
            out.push_str(&format!("{}m", minutes));
        }
        if seconds > 0 {
            out.push_str(&format!("{}s", seconds));
        }
        if millis > 0 {
            out.push_str(&format!("{}ms", millis));
        }
        write!(f, "{}", out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_millis() {
        let i: Interval = "500ms".parse().unwrap();
        assert_eq!(i.as_millis(), 500);
    }

    #[test]
    fn parse_seconds() {
        let i: Interval = "3s".parse().unwrap();
        assert_eq!(i.as_millis(), 3_000);
    }

    #[test]
    fn parse_combined() {
        let i: Interval = "1m30s".parse().unwrap();
        assert_eq!(i.as_millis(), 90_000);

        let i: Interval = "2s250ms".parse().unwrap();
        assert_eq!(i.as_millis(), 2_250);
    }

    #[test]
    fn parse_case_insensitive_and_trimmed() {
        let i: Interval = "  1M5S ".parse().unwrap();
        assert_eq!(i.as_millis(), 65_000);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Interval>().is_err());
        assert!("3".parse::<Interval>().is_err());
        assert!("s".parse::<Interval>().is_err());
        assert!("3h".parse::<Interval>().is_err());
        assert!("three seconds".parse::<Interval>().is_err());
    }

    #[test]
    fn parse_rejects_zero() {
        assert!("0s".parse::<Interval>().is_err());
        assert!("0m0ms".parse::<Interval>().is_err());
    }

    #[test]
    fn from_millis_never_zero() {
        assert_eq!(Interval::from_millis(0).as_millis(), 1);
    }

    #[test]
    fn display_formats() {
        assert_eq!(Interval::from_secs(3).to_string(), "3s");
        assert_eq!(Interval::from_millis(90_000).to_string(), "1m30s");
        assert_eq!(Interval::from_millis(250).to_string(), "250ms");
        assert_eq!(Interval::from_millis(61_005).to_string(), "1m1s5ms");
    }

    #[test]
    fn defaults() {
        assert_eq!(Interval::default_backoff().as_std(), StdDuration::from_secs(3));
        assert_eq!(Interval::default_read_timeout().as_millis(), 1_000);
        assert_eq!(Interval::default_restart_delay().as_millis(), 1_000);
    }
}
