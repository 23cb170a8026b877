//! Time-day matrix conflict detection.
//!
//! Meetings are grouped by resource key (instructor or room) and bucketed
//! by exact `(begin time, weekday)` slot; any bucket holding two or more
//! distinct sections is a conflict. All comparisons reduce to bucket-key
//! equality, so a roster is checked in a single pass instead of pairwise
//! interval comparison. Slots are points keyed by begin time: two
//! meetings whose intervals overlap but start at different times are not
//! flagged.

use crate::api::{ClockTime, Meeting, SectionId, Weekday, WeekdaySet};
use crate::services::exclusions::ExclusionPolicy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// The resource dimension being checked for double-booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceDimension {
    Instructor,
    Room,
}

/// One section occupying a conflicted slot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotOccupant {
    pub section: SectionId,
    /// The other resource's value: room for instructor conflicts,
    /// instructor for room conflicts.
    pub detail: String,
}

/// A double-booked slot for one resource, consolidated across weekdays.
///
/// Conflicts sharing the resource key, begin time, and occupant set but
/// differing only in weekday are merged, so an MWF collision reports once
/// with `weekdays` = "MWF" instead of three times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub resource_key: String,
    pub weekdays: WeekdaySet,
    pub begin_time: ClockTime,
    /// Meetings in the slot (may exceed the distinct section count when
    /// duplicate rows slipped through upstream)
    pub occupant_count: usize,
    pub occupants: Vec<SlotOccupant>,
}

fn resource_key(meeting: &Meeting, dimension: ResourceDimension) -> String {
    let raw = match dimension {
        ResourceDimension::Instructor => meeting.instructor.as_deref(),
        ResourceDimension::Room => meeting.room.as_deref(),
    };
    raw.unwrap_or("").trim().to_string()
}

fn occupant(meeting: &Meeting, dimension: ResourceDimension) -> SlotOccupant {
    let detail = match dimension {
        ResourceDimension::Instructor => meeting.room.as_deref(),
        ResourceDimension::Room => meeting.instructor.as_deref(),
    };
    SlotOccupant {
        section: meeting.section.clone(),
        detail: detail.unwrap_or("").trim().to_string(),
    }
}

/// Detect exact-slot collisions for one resource dimension.
///
/// The input must already be filtered by the exclusion policy so every
/// meeting carries a day pattern and a begin time. Meetings with an
/// empty resource key (unassigned instructor) still form a group and are
/// checked against each other. The returned list is deterministically
/// ordered by resource key and begin time.
pub fn find_conflicts(meetings: &[&Meeting], dimension: ResourceDimension) -> Vec<ConflictRecord> {
    // Group by case/whitespace-normalized key; report the first-seen
    // trimmed spelling.
    let mut groups: BTreeMap<String, (String, Vec<&Meeting>)> = BTreeMap::new();
    for &meeting in meetings {
        let display = resource_key(meeting, dimension);
        let normalized = display.to_lowercase();
        let entry = groups
            .entry(normalized)
            .or_insert_with(|| (display, Vec::new()));
        entry.1.push(meeting);
    }

    let mut raw = Vec::new();
    for (_, (display, group)) in groups {
        // Time-day matrix: one bucket per exact (begin time, weekday) slot.
        let mut buckets: BTreeMap<(ClockTime, Weekday), Vec<&Meeting>> = BTreeMap::new();
        for meeting in group {
            let Some(begin) = meeting.begin_time else {
                continue;
            };
            for day in meeting.days.iter() {
                buckets.entry((begin, day)).or_default().push(meeting);
            }
        }

        for ((begin, day), slot) in buckets {
            let distinct: HashSet<&SectionId> = slot.iter().map(|m| &m.section).collect();
            // A duplicate row of one section is not a self-conflict.
            if distinct.len() < 2 {
                continue;
            }
            let mut occupants: Vec<SlotOccupant> =
                slot.iter().map(|m| occupant(m, dimension)).collect();
            occupants.sort();
            raw.push(ConflictRecord {
                resource_key: display.clone(),
                weekdays: WeekdaySet::from_days(&[day]),
                begin_time: begin,
                occupant_count: slot.len(),
                occupants,
            });
        }
    }

    consolidate(raw)
}

/// Merge per-weekday records that differ only in weekday.
fn consolidate(raw: Vec<ConflictRecord>) -> Vec<ConflictRecord> {
    type Key = (String, ClockTime, Vec<SlotOccupant>, usize);
    let mut merged: BTreeMap<Key, WeekdaySet> = BTreeMap::new();
    for record in raw {
        let key = (
            record.resource_key,
            record.begin_time,
            record.occupants,
            record.occupant_count,
        );
        let days = merged.entry(key).or_default();
        *days = days.union(record.weekdays);
    }

    merged
        .into_iter()
        .map(
            |((resource_key, begin_time, occupants, occupant_count), weekdays)| ConflictRecord {
                resource_key,
                weekdays,
                begin_time,
                occupant_count,
                occupants,
            },
        )
        .collect()
}

/// Instructor-dimension conflicts over a raw meeting list.
pub fn check_instructor_conflicts(
    meetings: &[Meeting],
    policy: &ExclusionPolicy,
) -> Vec<ConflictRecord> {
    let schedulable = policy.schedulable(meetings);
    let conflicts = find_conflicts(&schedulable, ResourceDimension::Instructor);
    log::debug!(
        "instructor pass: {} of {} meetings schedulable, {} conflicts",
        schedulable.len(),
        meetings.len(),
        conflicts.len()
    );
    conflicts
}

/// Room-dimension conflicts over a raw meeting list.
pub fn check_room_conflicts(
    meetings: &[Meeting],
    policy: &ExclusionPolicy,
) -> Vec<ConflictRecord> {
    let schedulable = policy.room_schedulable(meetings);
    let conflicts = find_conflicts(&schedulable, ResourceDimension::Room);
    log::debug!(
        "room pass: {} of {} meetings schedulable, {} conflicts",
        schedulable.len(),
        meetings.len(),
        conflicts.len()
    );
    conflicts
}
