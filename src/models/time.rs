use chrono::{NaiveTime, Timelike};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wall-clock time of day with minute precision, no date component.
///
/// Orderable and hashable so it can key conflict buckets directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a new clock time. Returns `None` for out-of-range values.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a clock time from the formats roster exports actually contain:
    /// "13:00", "13:00:00", "1:00 PM", "1300", "930".
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }
        // Bare numeric form, possibly with a float tail ("930", "1300.0")
        let numeric = trimmed.strip_suffix(".0").unwrap_or(trimmed);
        if numeric.chars().all(|c| c.is_ascii_digit()) && numeric.len() <= 4 {
            let padded = format!("{:0>4}", numeric);
            return NaiveTime::parse_from_str(&padded, "%H%M").ok().map(Self);
        }
        for fmt in ["%H:%M:%S", "%H:%M", "%I:%M %p"] {
            if let Ok(time) = NaiveTime::parse_from_str(trimmed, fmt) {
                return Some(Self(time));
            }
        }
        None
    }

    /// Underlying chrono time.
    pub fn value(&self) -> NaiveTime {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Clock time `minutes` later, wrapping at midnight.
    pub fn add_minutes(&self, minutes: u32) -> Self {
        let (time, _) = self
            .0
            .overflowing_add_signed(chrono::Duration::minutes(minutes as i64));
        Self(time)
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(t: NaiveTime) -> Self {
        ClockTime(t)
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ClockTime::parse(&s).ok_or_else(|| D::Error::custom(format!("invalid clock time '{}'", s)))
    }
}
