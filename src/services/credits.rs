//! Per-instructor credit-hour totals.

use crate::api::{Meeting, SectionId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Total credit hours one instructor carries across the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorCredits {
    pub instructor: String,
    pub credit_hours: f64,
}

/// Sum credit hours per instructor, counting each section once.
///
/// A section meeting in several day-groups (MWF at one time, R at
/// another) appears as multiple rows all carrying the section's credit
/// hours; only the first row per `(instructor, section)` pair is summed.
/// Instructors are keyed the same way the conflict detector keys them:
/// trimmed, case-folded, first-seen spelling reported. Meetings with a
/// blank instructor are skipped. Results are ordered by instructor key.
pub fn compute_instructor_credits(meetings: &[Meeting]) -> Vec<InstructorCredits> {
    let mut seen: HashSet<(String, &SectionId)> = HashSet::new();
    let mut totals: BTreeMap<String, (String, f64)> = BTreeMap::new();

    for meeting in meetings {
        let display = match meeting.instructor.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        let normalized = display.to_lowercase();
        if !seen.insert((normalized.clone(), &meeting.section)) {
            continue;
        }
        let entry = totals.entry(normalized).or_insert_with(|| (display, 0.0));
        entry.1 += meeting.credit_hours;
    }

    totals
        .into_values()
        .map(|(instructor, credit_hours)| InstructorCredits {
            instructor,
            credit_hours,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClockTime, SectionId, WeekdaySet};

    fn meeting(number: &str, section: &str, instructor: Option<&str>, credits: f64) -> Meeting {
        Meeting::new(
            SectionId::new("MATH", number, section),
            instructor.map(|i| i.to_string()),
            WeekdaySet::parse("MWF").unwrap(),
            ClockTime::new(9, 0),
            ClockTime::new(9, 50),
            None,
            credits,
        )
    }

    #[test]
    fn test_credits_summed_per_instructor() {
        let meetings = vec![
            meeting("1003", "001", Some("Smith"), 3.0),
            meeting("2003", "002", Some("Smith"), 4.0),
            meeting("1113", "006", Some("Jones"), 3.0),
        ];
        let credits = compute_instructor_credits(&meetings);
        assert_eq!(
            credits,
            vec![
                InstructorCredits {
                    instructor: "Jones".to_string(),
                    credit_hours: 3.0
                },
                InstructorCredits {
                    instructor: "Smith".to_string(),
                    credit_hours: 7.0
                },
            ]
        );
    }

    #[test]
    fn test_split_meeting_patterns_counted_once() {
        // One 4-credit section with an MWF row and a separate R row.
        let meetings = vec![
            meeting("2554", "001", Some("Smith"), 4.0),
            meeting("2554", "001", Some("Smith"), 4.0),
        ];
        let credits = compute_instructor_credits(&meetings);
        assert_eq!(credits.len(), 1);
        assert_eq!(credits[0].credit_hours, 4.0);
    }

    #[test]
    fn test_blank_instructors_skipped() {
        let meetings = vec![
            meeting("1003", "001", None, 3.0),
            meeting("2003", "002", Some("  "), 3.0),
            meeting("1113", "006", Some("Jones"), 3.0),
        ];
        let credits = compute_instructor_credits(&meetings);
        assert_eq!(credits.len(), 1);
        assert_eq!(credits[0].instructor, "Jones");
    }

    #[test]
    fn test_instructor_key_normalized() {
        let meetings = vec![
            meeting("1003", "001", Some("Smith, Jane"), 3.0),
            meeting("2003", "002", Some(" smith, jane "), 3.0),
        ];
        let credits = compute_instructor_credits(&meetings);
        assert_eq!(credits.len(), 1);
        assert_eq!(credits[0].instructor, "Smith, Jane");
        assert_eq!(credits[0].credit_hours, 6.0);
    }

    #[test]
    fn test_same_section_different_instructors_both_credited() {
        // Cross-listed rows naming different instructors each count.
        let meetings = vec![
            meeting("1003", "001", Some("Smith"), 3.0),
            meeting("1003", "001", Some("Jones"), 3.0),
        ];
        let credits = compute_instructor_credits(&meetings);
        assert_eq!(credits.len(), 2);
        assert!(credits.iter().all(|c| c.credit_hours == 3.0));
    }

    #[test]
    fn test_empty_roster() {
        assert!(compute_instructor_credits(&[]).is_empty());
    }
}
