//! Scheduled time handling for GTFS feeds.
//!
//! GTFS provides stop times as "HH:MM:SS" strings relative to the start of
//! the service day. Trips that run past midnight keep counting, so "25:10:00"
//! is a valid time. This module stores times as seconds since the start of
//! the service day, which keeps ordering trivially correct.

use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Latest hour accepted in a feed time. Services rarely run beyond 30:00,
/// anything past two days is a data error.
const MAX_HOUR: u32 = 47;

/// A scheduled time within a service day.
///
/// # Examples
///
/// ```
/// use cowichan_bus::domain::FeedTime;
///
/// let time = FeedTime::parse_hms("14:30:00").unwrap();
/// assert_eq!(time.to_string(), "14:30:00");
///
/// // Past-midnight service keeps counting hours
/// let late = FeedTime::parse_hms("25:05:00").unwrap();
/// assert!(late > time);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeedTime {
    seconds: u32,
}

impl FeedTime {
    /// Create a time from hour, minute and second components.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, TimeError> {
        if hour > MAX_HOUR {
            return Err(TimeError::new("hour must be 0-47"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }
        Ok(Self {
            seconds: hour * 3600 + minute * 60 + second,
        })
    }

    /// Parse a time from "H:MM:SS" or "HH:MM:SS" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use cowichan_bus::domain::FeedTime;
    ///
    /// assert!(FeedTime::parse_hms("00:00:00").is_ok());
    /// assert!(FeedTime::parse_hms("7:45:00").is_ok());
    /// assert!(FeedTime::parse_hms("26:10:30").is_ok());
    ///
    /// assert!(FeedTime::parse_hms("14:30").is_err());
    /// assert!(FeedTime::parse_hms("14:60:00").is_err());
    /// assert!(FeedTime::parse_hms("ab:cd:ef").is_err());
    /// ```
    pub fn parse_hms(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        let mut parts = s.split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TimeError::new("expected HH:MM:SS format"));
        };

        if h.is_empty() || h.len() > 2 {
            return Err(TimeError::new("hour must be one or two digits"));
        }
        let hour = parse_digits(h).ok_or_else(|| TimeError::new("invalid hour digits"))?;

        if m.len() != 2 {
            return Err(TimeError::new("minute must be two digits"));
        }
        let minute = parse_digits(m).ok_or_else(|| TimeError::new("invalid minute digits"))?;

        if sec.len() != 2 {
            return Err(TimeError::new("second must be two digits"));
        }
        let second = parse_digits(sec).ok_or_else(|| TimeError::new("invalid second digits"))?;

        Self::from_hms(hour, minute, second)
    }

    /// Seconds since the start of the service day.
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Returns the hour, which may exceed 23 for past-midnight service.
    pub fn hour(&self) -> u32 {
        self.seconds / 3600
    }

    pub fn minute(&self) -> u32 {
        (self.seconds / 60) % 60
    }

    pub fn second(&self) -> u32 {
        self.seconds % 60
    }
}

impl fmt::Debug for FeedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeedTime({self})")
    }
}

impl fmt::Display for FeedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

/// Parse a short run of ASCII digits into a u32.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        assert!(FeedTime::parse_hms("00:00:00").is_ok());
        assert!(FeedTime::parse_hms("23:59:59").is_ok());
        assert!(FeedTime::parse_hms("6:05:00").is_ok());
        assert!(FeedTime::parse_hms("24:00:00").is_ok());
        assert!(FeedTime::parse_hms(" 08:15:00 ").is_ok());
    }

    #[test]
    fn parse_invalid_format() {
        assert!(FeedTime::parse_hms("").is_err());
        assert!(FeedTime::parse_hms("14:30").is_err());
        assert!(FeedTime::parse_hms("14:30:00:00").is_err());
        assert!(FeedTime::parse_hms("143:00:00").is_err());
        assert!(FeedTime::parse_hms("14:3:00").is_err());
        assert!(FeedTime::parse_hms("14:30:0").is_err());
        assert!(FeedTime::parse_hms("1a:30:00").is_err());
        assert!(FeedTime::parse_hms("+1:30:00").is_err());
    }

    #[test]
    fn parse_invalid_values() {
        assert!(FeedTime::parse_hms("48:00:00").is_err());
        assert!(FeedTime::parse_hms("12:60:00").is_err());
        assert!(FeedTime::parse_hms("12:00:60").is_err());
    }

    #[test]
    fn error_message() {
        let err = FeedTime::parse_hms("12:99:00").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: minute must be 0-59");
    }

    #[test]
    fn display_format() {
        let time = FeedTime::parse_hms("7:05:09").unwrap();
        assert_eq!(time.to_string(), "07:05:09");
        assert_eq!(format!("{:?}", time), "FeedTime(07:05:09)");

        let late = FeedTime::parse_hms("25:00:00").unwrap();
        assert_eq!(late.to_string(), "25:00:00");
    }

    #[test]
    fn components() {
        let time = FeedTime::parse_hms("26:10:30").unwrap();
        assert_eq!(time.hour(), 26);
        assert_eq!(time.minute(), 10);
        assert_eq!(time.second(), 30);
        assert_eq!(time.seconds(), 26 * 3600 + 10 * 60 + 30);
    }

    #[test]
    fn ordering_past_midnight() {
        let before = FeedTime::parse_hms("23:55:00").unwrap();
        let after = FeedTime::parse_hms("24:05:00").unwrap();
        assert!(before < after);
    }
}
