//! Lead record captured at the end of a qualification call

use serde::{Deserialize, Serialize};

/// A qualified sales lead.
///
/// The schema is closed: deserialization rejects unknown fields, so a
/// malformed tool call cannot smuggle extra data into the lead store.
/// Every field is required; unknown values are recorded as empty strings
/// rather than omitted. Records are appended once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeadRecord {
    /// Full name of the lead
    pub lead_name: String,
    /// Organization name
    pub company: String,
    /// Role or job title
    pub title: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Location or time zone
    pub location: String,
    /// Identified pain points
    pub primary_pain_points: Vec<String>,
    /// Current solution in use, if any
    pub current_solution: String,
    /// Free-text or range of budget estimate
    pub budget_estimate: String,
    /// Expected decision timeline
    pub decision_timeline: String,
    /// "yes" or "no"
    pub decision_maker_confirmed: String,
    /// "low", "medium", or "high"
    pub interest_level: String,
    /// "yes" or "no"
    pub meeting_scheduled: String,
    /// ISO 8601 or human-readable meeting time, if scheduled
    pub meeting_time: String,
    /// Source of the lead, e.g. "voice_call"
    pub source: String,
    /// Free-text highlights from the conversation
    pub notes: String,
    /// Suggested next step
    pub recommended_next_step: String,
    /// Call end ISO 8601 time
    pub timestamp: String,
}

impl LeadRecord {
    /// Strictly deserialize a lead record from a JSON value.
    ///
    /// Unknown or missing fields produce a named serde error.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Names of every field in the schema, in declaration order.
    pub fn field_names() -> &'static [&'static str] {
        &[
            "lead_name",
            "company",
            "title",
            "email",
            "phone",
            "location",
            "primary_pain_points",
            "current_solution",
            "budget_estimate",
            "decision_timeline",
            "decision_maker_confirmed",
            "interest_level",
            "meeting_scheduled",
            "meeting_time",
            "source",
            "notes",
            "recommended_next_step",
            "timestamp",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "lead_name": "Priya Sharma",
            "company": "Acme Analytics",
            "title": "Head of Operations",
            "email": "priya@acme.example",
            "phone": "+91 98765 43210",
            "location": "Mumbai (IST)",
            "primary_pain_points": ["manual reporting", "slow settlements"],
            "current_solution": "spreadsheets",
            "budget_estimate": "5-10 lakh/year",
            "decision_timeline": "3 months",
            "decision_maker_confirmed": "yes",
            "interest_level": "high",
            "meeting_scheduled": "yes",
            "meeting_time": "2025-11-04T10:30:00Z",
            "source": "voice_call",
            "notes": "Asked about API pricing.",
            "recommended_next_step": "Send demo invite",
            "timestamp": "2025-10-28T09:12:44Z"
        })
    }

    #[test]
    fn test_round_trip() {
        let record = LeadRecord::from_value(sample()).unwrap();
        let serialized = serde_json::to_string(&record).unwrap();
        let back: LeadRecord = serde_json::from_str(&serialized).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut value = sample();
        value["ssn"] = json!("123-45-6789");

        let err = LeadRecord::from_value(value).unwrap_err();
        assert!(err.to_string().contains("ssn"));
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("email");

        let err = LeadRecord::from_value(value).unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_empty_strings_allowed() {
        let mut value = sample();
        value["email"] = json!("");
        value["phone"] = json!("");
        value["primary_pain_points"] = json!([]);

        let record = LeadRecord::from_value(value).unwrap();
        assert!(record.email.is_empty());
        assert!(record.primary_pain_points.is_empty());
    }

    #[test]
    fn test_serialization_order_is_stable() {
        let record = LeadRecord::from_value(sample()).unwrap();
        let serialized = serde_json::to_string(&record).unwrap();

        let mut last = 0;
        for name in LeadRecord::field_names() {
            let needle = format!("\"{}\"", name);
            let pos = serialized.find(&needle).unwrap();
            assert!(pos >= last, "field {} out of order", name);
            last = pos;
        }
    }
}
