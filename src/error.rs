//! Error types for csp-rust.

use crate::models::ClockTime;
use thiserror::Error;

/// Result type for roster validation.
pub type Result<T> = std::result::Result<T, InvalidMeetingError>;

/// Upstream data corruption detected in a meeting record.
///
/// Missing data (no room, no instructor, fully online) is never an error;
/// it is handled by the exclusion policy. Only values that could mask or
/// fabricate conflicts are surfaced here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidMeetingError {
    /// Meeting-day symbol outside M/T/W/R/F
    #[error("Invalid meeting day symbol '{0}'")]
    InvalidDaySymbol(char),

    /// Begin time at or after end time
    #[error("Begin time {begin} is not before end time {end}")]
    InvalidTimeRange { begin: ClockTime, end: ClockTime },
}
