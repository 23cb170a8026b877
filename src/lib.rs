//! # CSP Rust
//!
//! Class-schedule conflict detection engine.
//!
//! This crate analyzes a university course roster for scheduling
//! conflicts: instructors teaching two sections in the same time slot and
//! rooms hosting two sections at once. Detection runs over a normalized
//! meeting list using a time-day matrix, so a roster is checked in one
//! pass instead of pairwise interval comparison.
//!
//! ## Features
//!
//! - **Data Loading**: Parse rosters from JSON with lenient time formats
//! - **Exclusions**: One policy classifying online/asynchronous sections
//!   that never occupy a physical slot
//! - **Conflict Detection**: Instructor and room double-booking, with
//!   per-weekday hits consolidated into single records
//! - **Aggregation**: Per-instructor credit-hour totals and per-course
//!   section counts
//! - **Edits**: Immutable what-if edits producing new roster snapshots
//!
//! ## Architecture
//!
//! - [`api`]: Core domain types (weekdays, sections, meetings, rosters)
//! - [`models`]: Clock time, JSON parsing, and roster edits
//! - [`services`]: Detection and aggregation passes plus async orchestration
//! - [`error`]: Validation errors for corrupt roster data

pub mod api;
pub mod error;
pub mod models;
pub mod services;
