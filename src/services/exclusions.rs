//! Exclusion policy: which meetings take part in conflict detection.
//!
//! A single authoritative policy replaces the per-checker filter chains
//! the roster tooling grew over time. Online/asynchronous sections are
//! recognized by section-code prefix or by an empty day pattern, and the
//! prefix list is explicit configuration rather than a hardcoded
//! convention buried in each checker.

use crate::api::{Meeting, SectionKind};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Section-code prefixes that mark online/asynchronous delivery by
/// default: asynchronous (AT), fast-track (F), and televideo (TC).
pub const DEFAULT_ONLINE_PREFIXES: [&str; 3] = ["AT", "F", "TC"];

fn default_online_prefixes() -> Vec<String> {
    DEFAULT_ONLINE_PREFIXES
        .iter()
        .map(|p| p.to_string())
        .collect()
}

/// Which meetings count as online, and therefore never occupy a physical
/// day/time/room slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionPolicy {
    /// Section-code prefixes classified as online (case-insensitive)
    #[serde(default = "default_online_prefixes")]
    pub online_prefixes: Vec<String>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self {
            online_prefixes: default_online_prefixes(),
        }
    }
}

impl ExclusionPolicy {
    pub fn new(online_prefixes: Vec<String>) -> Self {
        Self { online_prefixes }
    }

    /// Load a policy from a TOML snippet, e.g.
    /// `online_prefixes = ["AT", "TC"]`.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Invalid exclusion policy TOML")
    }

    /// Classify a meeting's delivery mode.
    pub fn section_kind(&self, meeting: &Meeting) -> SectionKind {
        if meeting.days.is_empty() || self.has_online_prefix(&meeting.section.section) {
            SectionKind::Online
        } else {
            SectionKind::FaceToFace
        }
    }

    pub fn is_online(&self, meeting: &Meeting) -> bool {
        self.section_kind(meeting) == SectionKind::Online
    }

    fn has_online_prefix(&self, section_code: &str) -> bool {
        let code = section_code.trim().to_ascii_uppercase();
        self.online_prefixes
            .iter()
            .any(|prefix| code.starts_with(&prefix.to_ascii_uppercase()))
    }

    /// A meeting participates in conflict detection only when it is
    /// face-to-face with a day pattern and a begin time. Missing data here
    /// is normal (exclusion), never an error.
    pub fn is_schedulable(&self, meeting: &Meeting) -> bool {
        !self.is_online(meeting) && !meeting.days.is_empty() && meeting.begin_time.is_some()
    }

    /// Meetings eligible for instructor-dimension checks.
    pub fn schedulable<'a>(&self, meetings: &'a [Meeting]) -> Vec<&'a Meeting> {
        meetings.iter().filter(|m| self.is_schedulable(m)).collect()
    }

    /// Meetings eligible for room-dimension checks: an instructor can
    /// conflict without a room, but a room conflict needs a known room.
    pub fn room_schedulable<'a>(&self, meetings: &'a [Meeting]) -> Vec<&'a Meeting> {
        meetings
            .iter()
            .filter(|m| {
                self.is_schedulable(m)
                    && m.room.as_deref().is_some_and(|r| !r.trim().is_empty())
            })
            .collect()
    }
}
