// ============================================================================
// JSON Parsing Functions
// ============================================================================
//
// File-based roster marshaling (CSV/XLSX ingestion, cross-listing merge,
// instructor-name cleanup) happens upstream; the normalized meeting list
// arrives here as a JSON document and is validated before analysis.

use crate::api::{Meeting, Roster};
use anyhow::{Context, Result};

#[derive(serde::Deserialize)]
struct RosterInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub checksum: String,
    pub meetings: Vec<Meeting>,
}

fn validate_input_roster(roster_json: &str) -> Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(roster_json).context("Invalid roster JSON")?;
    let has_meetings = value
        .as_object()
        .and_then(|obj| obj.get("meetings"))
        .is_some();
    if !has_meetings {
        anyhow::bail!("Missing required 'meetings' field");
    }
    Ok(())
}

/// Parse a roster from a JSON string.
///
/// Deserializes the normalized meeting list using Serde, validates every
/// meeting record (day symbols, time-range ordering), and fills in the
/// content checksum when the document does not carry one.
///
/// # Returns
///
/// A fully populated `Roster` ready for conflict analysis.
pub fn parse_roster_json_str(roster_json: &str) -> Result<Roster> {
    validate_input_roster(roster_json)?;

    let input: RosterInput = serde_json::from_str(roster_json)
        .context("Failed to deserialize roster JSON using Serde")?;

    let mut roster = Roster {
        name: input.name,
        checksum: input.checksum,
        meetings: input.meetings,
    };

    for meeting in &roster.meetings {
        meeting
            .validate()
            .with_context(|| format!("Invalid meeting for section {}", meeting.section))?;
    }

    // Compute checksum if not provided
    if roster.checksum.is_empty() {
        roster.checksum = compute_roster_checksum(roster_json);
    }

    Ok(roster)
}

/// Compute a checksum for the roster JSON
fn compute_roster_checksum(json_str: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(json_str.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_roster() {
        let roster_json = r#"{
            "meetings": [
                {
                    "section": { "subject": "MATH", "number": "1113", "section": "002" },
                    "instructor": "Smith, Jane",
                    "days": "MWF",
                    "begin_time": "09:00",
                    "end_time": "09:50",
                    "room": "Corley 102",
                    "credit_hours": 3.0
                }
            ]
        }"#;

        let result = parse_roster_json_str(roster_json);
        assert!(result.is_ok(), "Should parse minimal roster: {:?}", result.err());

        let roster = result.unwrap();
        assert_eq!(roster.meetings.len(), 1);
        assert_eq!(roster.meetings[0].section.to_string(), "MATH1113-002");
        assert_eq!(roster.meetings[0].days.to_string(), "MWF");
    }

    #[test]
    fn test_parse_fills_checksum() {
        let roster_json = r#"{ "name": "fall", "meetings": [] }"#;
        let roster = parse_roster_json_str(roster_json).unwrap();
        assert_eq!(roster.name, "fall");
        assert_eq!(roster.checksum.len(), 64);
    }

    #[test]
    fn test_parse_keeps_provided_checksum() {
        let roster_json = r#"{ "checksum": "abc123", "meetings": [] }"#;
        let roster = parse_roster_json_str(roster_json).unwrap();
        assert_eq!(roster.checksum, "abc123");
    }

    #[test]
    fn test_parse_online_meeting_without_times() {
        let roster_json = r#"{
            "meetings": [
                { "section": { "subject": "MATH", "number": "1203", "section": "TC1" } }
            ]
        }"#;
        let roster = parse_roster_json_str(roster_json).unwrap();
        assert!(roster.meetings[0].days.is_empty());
        assert!(roster.meetings[0].begin_time.is_none());
    }

    #[test]
    fn test_missing_meetings_key() {
        let roster_json = r#"{"SomeOtherKey": []}"#;
        let result = parse_roster_json_str(roster_json);
        assert!(result.is_err(), "Should fail without meetings key");
    }

    #[test]
    fn test_invalid_json() {
        let roster_json = "not valid json {";
        let result = parse_roster_json_str(roster_json);
        assert!(result.is_err(), "Should fail with invalid JSON");
    }

    #[test]
    fn test_invalid_day_symbol_rejected() {
        let roster_json = r#"{
            "meetings": [
                {
                    "section": { "subject": "MATH", "number": "1113", "section": "002" },
                    "days": "MXF"
                }
            ]
        }"#;
        let result = parse_roster_json_str(roster_json);
        assert!(result.is_err(), "Should reject day symbols outside MTWRF");
    }

    #[test]
    fn test_inverted_time_range_rejected() {
        let roster_json = r#"{
            "meetings": [
                {
                    "section": { "subject": "MATH", "number": "1113", "section": "002" },
                    "days": "MWF",
                    "begin_time": "10:00",
                    "end_time": "09:00"
                }
            ]
        }"#;
        let result = parse_roster_json_str(roster_json);
        assert!(result.is_err(), "Should reject begin >= end");
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("MATH1113-002"));
    }

    #[test]
    fn test_checksum_is_stable() {
        let roster_json = r#"{ "meetings": [] }"#;
        let a = parse_roster_json_str(roster_json).unwrap();
        let b = parse_roster_json_str(roster_json).unwrap();
        assert_eq!(a.checksum, b.checksum);
    }
}
