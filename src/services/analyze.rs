//! Whole-roster analysis.
//!
//! Runs every detector over one roster snapshot and bundles the results.
//! The sync path is plain pure functions; the async path offloads the
//! two conflict passes to blocking tasks for large rosters.

use crate::api::{ConflictRecord, InstructorCredits, Roster, SectionCounts};
use crate::services::conflicts::{check_instructor_conflicts, check_room_conflicts};
use crate::services::credits::compute_instructor_credits;
use crate::services::exclusions::ExclusionPolicy;
use crate::services::summary::count_sections;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Complete analysis of one roster snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterAnalysis {
    pub instructor_conflicts: Vec<ConflictRecord>,
    pub room_conflicts: Vec<ConflictRecord>,
    pub instructor_credits: Vec<InstructorCredits>,
    pub section_summary: Vec<SectionCounts>,
    /// Rows in the roster
    pub total_meetings: usize,
    /// Rows that entered the instructor conflict pass
    pub schedulable_meetings: usize,
    /// Rows the exclusion policy filtered out
    pub excluded_meetings: usize,
}

impl RosterAnalysis {
    pub fn is_conflict_free(&self) -> bool {
        self.instructor_conflicts.is_empty() && self.room_conflicts.is_empty()
    }
}

/// Run every pass synchronously.
pub fn analyze_roster(roster: &Roster, policy: &ExclusionPolicy) -> RosterAnalysis {
    let total_meetings = roster.meetings.len();
    let schedulable_meetings = policy.schedulable(&roster.meetings).len();

    let analysis = RosterAnalysis {
        instructor_conflicts: check_instructor_conflicts(&roster.meetings, policy),
        room_conflicts: check_room_conflicts(&roster.meetings, policy),
        instructor_credits: compute_instructor_credits(&roster.meetings),
        section_summary: count_sections(&roster.meetings, policy),
        total_meetings,
        schedulable_meetings,
        excluded_meetings: total_meetings - schedulable_meetings,
    };
    log::info!(
        "Analyzed roster '{}': {} meetings, {} instructor conflicts, {} room conflicts",
        roster.name,
        total_meetings,
        analysis.instructor_conflicts.len(),
        analysis.room_conflicts.len()
    );
    analysis
}

/// Run the analysis off the async runtime.
///
/// The two conflict passes dominate on large rosters, so each runs in its
/// own blocking task; the cheap aggregations run inline afterwards. The
/// roster and policy are shared via `Arc` instead of cloning the meeting
/// list per task.
pub async fn analyze_roster_async(
    roster: Roster,
    policy: ExclusionPolicy,
) -> Result<RosterAnalysis, String> {
    let roster = Arc::new(roster);
    let policy = Arc::new(policy);

    let instructor_task = tokio::task::spawn_blocking({
        let roster = Arc::clone(&roster);
        let policy = Arc::clone(&policy);
        move || check_instructor_conflicts(&roster.meetings, &policy)
    });
    let room_task = tokio::task::spawn_blocking({
        let roster = Arc::clone(&roster);
        let policy = Arc::clone(&policy);
        move || check_room_conflicts(&roster.meetings, &policy)
    });

    let (instructor_conflicts, room_conflicts) = tokio::try_join!(instructor_task, room_task)
        .map_err(|e| format!("Conflict detection task panic: {}", e))?;

    let total_meetings = roster.meetings.len();
    let schedulable_meetings = policy.schedulable(&roster.meetings).len();

    Ok(RosterAnalysis {
        instructor_conflicts,
        room_conflicts,
        instructor_credits: compute_instructor_credits(&roster.meetings),
        section_summary: count_sections(&roster.meetings, &policy),
        total_meetings,
        schedulable_meetings,
        excluded_meetings: total_meetings - schedulable_meetings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClockTime, Meeting, SectionId, WeekdaySet};

    fn test_roster() -> Roster {
        let at_nine = |number: &str, section: &str, instructor: &str, room: &str| {
            Meeting::new(
                SectionId::new("MATH", number, section),
                Some(instructor.to_string()),
                WeekdaySet::parse("MWF").unwrap(),
                ClockTime::new(9, 0),
                ClockTime::new(9, 50),
                Some(room.to_string()),
                3.0,
            )
        };
        let online = Meeting::new(
            SectionId::new("MATH", "1203", "TC1"),
            Some("Smith".to_string()),
            WeekdaySet::empty(),
            None,
            None,
            None,
            3.0,
        );
        Roster::new(
            "fall-2024".to_string(),
            String::new(),
            vec![
                at_nine("1003", "001", "Smith", "Corley 102"),
                at_nine("2003", "002", "Smith", "Corley 204"),
                at_nine("1113", "006", "Jones", "Corley 102"),
                online,
            ],
        )
    }

    #[test]
    fn test_analyze_roster_all_passes() {
        let analysis = analyze_roster(&test_roster(), &ExclusionPolicy::default());

        assert_eq!(analysis.instructor_conflicts.len(), 1);
        assert_eq!(analysis.instructor_conflicts[0].resource_key, "Smith");
        assert_eq!(analysis.room_conflicts.len(), 1);
        assert_eq!(analysis.room_conflicts[0].resource_key, "Corley 102");
        assert_eq!(analysis.instructor_credits.len(), 2);
        assert_eq!(analysis.total_meetings, 4);
        assert_eq!(analysis.schedulable_meetings, 3);
        assert_eq!(analysis.excluded_meetings, 1);
        assert!(!analysis.is_conflict_free());
    }

    #[test]
    fn test_conflict_free_roster() {
        let mut roster = test_roster();
        // Move the Corley 102 / Smith collisions apart.
        roster.meetings[1].begin_time = ClockTime::new(10, 0);
        roster.meetings[1].end_time = ClockTime::new(10, 50);
        roster.meetings[2].room = Some("Corley 204".to_string());

        let analysis = analyze_roster(&roster, &ExclusionPolicy::default());
        assert!(analysis.is_conflict_free());
    }

    #[test]
    fn test_section_summary_includes_online() {
        let analysis = analyze_roster(&test_roster(), &ExclusionPolicy::default());
        let summary = analysis
            .section_summary
            .iter()
            .find(|s| s.course == "MATH 1203")
            .unwrap();
        assert_eq!(summary.online, 1);
        assert_eq!(summary.total, 1);
    }

    #[tokio::test]
    async fn test_async_matches_sync() {
        let roster = test_roster();
        let policy = ExclusionPolicy::default();
        let sync = analyze_roster(&roster, &policy);
        let from_async = analyze_roster_async(roster, policy).await.unwrap();
        assert_eq!(sync, from_async);
    }

    #[tokio::test]
    async fn test_async_empty_roster() {
        let roster = Roster::new("empty".to_string(), String::new(), vec![]);
        let analysis = analyze_roster_async(roster, ExclusionPolicy::default())
            .await
            .unwrap();
        assert!(analysis.is_conflict_free());
        assert_eq!(analysis.total_meetings, 0);
    }
}
