//! Per-course section counts by delivery mode.

use crate::api::{Meeting, SectionId, SectionKind};
use crate::services::exclusions::ExclusionPolicy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Section counts for one course, split by delivery mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCounts {
    /// Course-level key, e.g. "MATH 1113"
    pub course: String,
    pub in_person: usize,
    pub online: usize,
    pub total: usize,
}

/// Count distinct sections per course, classified by the exclusion
/// policy. Split meeting patterns of one section count once; the kind is
/// taken from the section's first row. Results are ordered by course.
pub fn count_sections(meetings: &[Meeting], policy: &ExclusionPolicy) -> Vec<SectionCounts> {
    let mut seen: HashSet<&SectionId> = HashSet::new();
    let mut counts: BTreeMap<String, SectionCounts> = BTreeMap::new();

    for meeting in meetings {
        if !seen.insert(&meeting.section) {
            continue;
        }
        let course = meeting.section.course_code();
        let entry = counts
            .entry(course.clone())
            .or_insert_with(|| SectionCounts {
                course,
                in_person: 0,
                online: 0,
                total: 0,
            });
        match policy.section_kind(meeting) {
            SectionKind::FaceToFace => entry.in_person += 1,
            SectionKind::Online => entry.online += 1,
        }
        entry.total += 1;
    }

    counts.into_values().collect()
}
