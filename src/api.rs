//! Public API surface for the conflict engine.
//!
//! This file consolidates the core domain types: weekdays, sections,
//! meetings, and the roster snapshot the detectors run over.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::services::analyze::RosterAnalysis;
pub use crate::services::conflicts::ConflictRecord;
pub use crate::services::conflicts::ResourceDimension;
pub use crate::services::conflicts::SlotOccupant;
pub use crate::services::credits::InstructorCredits;
pub use crate::services::summary::SectionCounts;

use crate::error::InvalidMeetingError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use crate::models::edits::RosterEdit;
pub use crate::models::ClockTime;

/// Teaching weekday. The roster convention uses R for Thursday.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All weekdays in roster order (M, T, W, R, F).
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Single-letter roster symbol.
    pub fn symbol(&self) -> char {
        match self {
            Weekday::Monday => 'M',
            Weekday::Tuesday => 'T',
            Weekday::Wednesday => 'W',
            Weekday::Thursday => 'R',
            Weekday::Friday => 'F',
        }
    }

    /// Parse a roster symbol, case-insensitively.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'M' => Some(Weekday::Monday),
            'T' => Some(Weekday::Tuesday),
            'W' => Some(Weekday::Wednesday),
            'R' => Some(Weekday::Thursday),
            'F' => Some(Weekday::Friday),
            _ => None,
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Weekday::Monday => 1 << 0,
            Weekday::Tuesday => 1 << 1,
            Weekday::Wednesday => 1 << 2,
            Weekday::Thursday => 1 << 3,
            Weekday::Friday => 1 << 4,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Deduplicated set of teaching weekdays.
///
/// Parses from roster strings like "MWF"; duplicate symbols collapse, and
/// rendering always follows M..F order. An empty set marks a meeting with
/// no physical day pattern (fully online/asynchronous).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn empty() -> Self {
        WeekdaySet(0)
    }

    pub fn from_days(days: &[Weekday]) -> Self {
        let mut set = WeekdaySet::empty();
        for day in days {
            set.insert(*day);
        }
        set
    }

    /// Parse a day string ("MWF", "tr"). Whitespace is skipped; any other
    /// symbol outside M/T/W/R/F indicates corrupt upstream data.
    pub fn parse(s: &str) -> Result<Self, InvalidMeetingError> {
        let mut set = WeekdaySet::empty();
        for c in s.chars() {
            if c.is_whitespace() {
                continue;
            }
            match Weekday::from_symbol(c) {
                Some(day) => set.insert(day),
                None => return Err(InvalidMeetingError::InvalidDaySymbol(c)),
            }
        }
        Ok(set)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= day.bit();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & day.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Days shared with another set.
    pub fn intersection(&self, other: WeekdaySet) -> WeekdaySet {
        WeekdaySet(self.0 & other.0)
    }

    /// Days present in either set.
    pub fn union(&self, other: WeekdaySet) -> WeekdaySet {
        WeekdaySet(self.0 | other.0)
    }

    /// Iterate in M..F order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(|day| self.contains(*day))
    }
}

impl std::fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for day in self.iter() {
            write!(f, "{}", day.symbol())?;
        }
        Ok(())
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        WeekdaySet::parse(&s).map_err(D::Error::custom)
    }
}

/// Section identity: a `(subject, number, section)` triple uniquely
/// identifies a course section across split meeting patterns.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectionId {
    /// Subject prefix, e.g. "MATH"
    pub subject: String,
    /// Course number, e.g. "1113"
    pub number: String,
    /// Section code, e.g. "002", "TC1"
    pub section: String,
}

impl SectionId {
    pub fn new(
        subject: impl Into<String>,
        number: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            number: number.into(),
            section: section.into(),
        }
    }

    /// Course-level key without the section code, e.g. "MATH 1113".
    pub fn course_code(&self) -> String {
        format!("{} {}", self.subject, self.number)
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}-{}", self.subject, self.number, self.section)
    }
}

/// Derived classification of a section's delivery mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Meets in person at a fixed day/time
    FaceToFace,
    /// Online/asynchronous; occupies no physical day, time, or room
    Online,
}

/// One scheduled occurrence of a section on a set of weekdays at a fixed
/// time range. A section with day-groups at different times (e.g. MWF at
/// one time, R at another) is represented by one meeting per day-group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    /// Owning section identity
    pub section: SectionId,
    /// Instructor of record; `None` or blank when unassigned
    #[serde(default)]
    pub instructor: Option<String>,
    /// Teaching day pattern; empty for online/asynchronous sections
    #[serde(default)]
    pub days: WeekdaySet,
    /// Wall-clock start; absent for online/asynchronous sections
    #[serde(default)]
    pub begin_time: Option<ClockTime>,
    /// Wall-clock end; not meaningful when `days` is empty
    #[serde(default)]
    pub end_time: Option<ClockTime>,
    /// Opaque room key, e.g. "Corley 102"; absent when no room is assigned
    #[serde(default)]
    pub room: Option<String>,
    /// Credit hours the section carries (counted once per section)
    #[serde(default)]
    pub credit_hours: f64,
}

impl Meeting {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        section: SectionId,
        instructor: Option<String>,
        days: WeekdaySet,
        begin_time: Option<ClockTime>,
        end_time: Option<ClockTime>,
        room: Option<String>,
        credit_hours: f64,
    ) -> Self {
        Self {
            section,
            instructor,
            days,
            begin_time,
            end_time,
            room,
            credit_hours,
        }
    }

    /// Check the time-range invariant. Day symbols are validated when the
    /// `WeekdaySet` is built, so a constructed meeting can only be corrupt
    /// through an inverted time range.
    pub fn validate(&self) -> Result<(), InvalidMeetingError> {
        if let (Some(begin), Some(end)) = (self.begin_time, self.end_time) {
            if begin >= end {
                return Err(InvalidMeetingError::InvalidTimeRange { begin, end });
            }
        }
        Ok(())
    }
}

/// Immutable roster snapshot: the full normalized meeting list for one
/// analysis run. Detectors only read it; edits produce new snapshots
/// (see [`RosterEdit`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Roster name (e.g. term label)
    #[serde(default)]
    pub name: String,
    /// SHA256 checksum of the source document
    #[serde(default)]
    pub checksum: String,
    /// Normalized meeting records
    pub meetings: Vec<Meeting>,
}

impl Roster {
    pub fn new(name: String, checksum: String, meetings: Vec<Meeting>) -> Self {
        Self {
            name,
            checksum,
            meetings,
        }
    }

    /// Validate every meeting, surfacing the first corrupt record.
    pub fn validate(&self) -> Result<(), InvalidMeetingError> {
        for meeting in &self.meetings {
            meeting.validate()?;
        }
        Ok(())
    }
}
