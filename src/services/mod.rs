//! Service layer for roster analysis.
//!
//! Pure detection and aggregation passes over a roster snapshot, plus the
//! async orchestration that runs them together.

pub mod analyze;
pub mod conflicts;
pub mod credits;
pub mod exclusions;
pub mod summary;

pub use analyze::{analyze_roster, analyze_roster_async, RosterAnalysis};
pub use conflicts::{check_instructor_conflicts, check_room_conflicts, find_conflicts};
pub use credits::compute_instructor_credits;
pub use exclusions::ExclusionPolicy;
pub use summary::count_sections;
