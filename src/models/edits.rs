//! Immutable roster edits.
//!
//! The roster snapshot handed to the conflict detectors is never mutated
//! in place. Schedule adjustments (reassigning instructors, moving rooms
//! and times, adding or dropping sections) are described as an explicit
//! change-log of `RosterEdit` values; applying one produces a new `Roster`
//! snapshot, so an in-flight conflict check can never observe a partial
//! edit.

use crate::api::{ClockTime, Meeting, Roster, SectionId, WeekdaySet};
use serde::{Deserialize, Serialize};

fn default_duration_minutes() -> u32 {
    50
}

/// One schedule adjustment, addressed by section identity.
///
/// Edits that carry a `days` qualifier apply only to the meeting pattern
/// with exactly that day-set; without it they apply to every meeting of
/// the section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RosterEdit {
    /// Assign (or clear) the instructor of record.
    AssignInstructor {
        section: SectionId,
        instructor: Option<String>,
    },
    /// Assign (or clear) the room, optionally for one day pattern only.
    AssignRoom {
        section: SectionId,
        room: Option<String>,
        #[serde(default)]
        days: Option<WeekdaySet>,
    },
    /// Move the meeting time; the end time is derived from the begin time
    /// plus the class duration.
    AssignTime {
        section: SectionId,
        begin_time: ClockTime,
        #[serde(default = "default_duration_minutes")]
        duration_minutes: u32,
        #[serde(default)]
        days: Option<WeekdaySet>,
    },
    /// Replace one day pattern with another.
    AssignDays {
        section: SectionId,
        old_days: WeekdaySet,
        new_days: WeekdaySet,
    },
    /// Append a new meeting record.
    AddSection { meeting: Meeting },
    /// Drop every meeting of a section.
    RemoveSection { section: SectionId },
}

fn matches(meeting: &Meeting, section: &SectionId, days: &Option<WeekdaySet>) -> bool {
    meeting.section == *section && days.map_or(true, |d| meeting.days == d)
}

impl Roster {
    /// Apply one edit, producing a new snapshot. The checksum is cleared
    /// since the content no longer matches the source document.
    pub fn apply(&self, edit: &RosterEdit) -> Roster {
        let mut meetings = self.meetings.clone();
        match edit {
            RosterEdit::AssignInstructor {
                section,
                instructor,
            } => {
                for meeting in meetings.iter_mut().filter(|m| m.section == *section) {
                    meeting.instructor = instructor.clone();
                }
            }
            RosterEdit::AssignRoom {
                section,
                room,
                days,
            } => {
                for meeting in meetings.iter_mut().filter(|m| matches(m, section, days)) {
                    meeting.room = room.clone();
                }
            }
            RosterEdit::AssignTime {
                section,
                begin_time,
                duration_minutes,
                days,
            } => {
                for meeting in meetings.iter_mut().filter(|m| matches(m, section, days)) {
                    meeting.begin_time = Some(*begin_time);
                    meeting.end_time = Some(begin_time.add_minutes(*duration_minutes));
                }
            }
            RosterEdit::AssignDays {
                section,
                old_days,
                new_days,
            } => {
                for meeting in meetings
                    .iter_mut()
                    .filter(|m| m.section == *section && m.days == *old_days)
                {
                    meeting.days = *new_days;
                }
            }
            RosterEdit::AddSection { meeting } => {
                meetings.push(meeting.clone());
            }
            RosterEdit::RemoveSection { section } => {
                meetings.retain(|m| m.section != *section);
            }
        }
        Roster {
            name: self.name.clone(),
            checksum: String::new(),
            meetings,
        }
    }

    /// Fold a change-log into a new snapshot.
    pub fn apply_all(&self, edits: &[RosterEdit]) -> Roster {
        let mut roster = self.clone();
        for edit in edits {
            roster = roster.apply(edit);
        }
        roster
    }
}
