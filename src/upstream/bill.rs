//! Bill Module
//!
//! The upstream wire shape of a bill and the validated shape the cache stores.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

// == Upstream Shapes ==
/// Envelope of the upstream `/bill/{congress}` listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBillListing {
    #[serde(default)]
    pub bills: Vec<RawUpstreamBill>,
}

/// A bill exactly as the upstream API returns it. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUpstreamBill {
    #[serde(default)]
    pub congress: Option<Value>,
    #[serde(default, rename = "type")]
    pub bill_type: Option<String>,
    #[serde(default)]
    pub number: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub origin_chamber: Option<String>,
    #[serde(default)]
    pub latest_action: Option<LatestAction>,
    #[serde(default)]
    pub update_date: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

// == Internal Shapes ==
/// Most recent action taken on a bill.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A validated bill. The cache treats it as an opaque value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub congress: u32,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub number: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_chamber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_action: Option<LatestAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Bill {
    /// Identity used for de-duplication: congress, upper-cased type and number.
    pub fn identity(&self) -> (u32, String, String) {
        (
            self.congress,
            self.bill_type.to_ascii_uppercase(),
            self.number.clone(),
        )
    }
}

impl TryFrom<RawUpstreamBill> for Bill {
    type Error = String;

    fn try_from(raw: RawUpstreamBill) -> std::result::Result<Self, Self::Error> {
        let congress = raw
            .congress
            .as_ref()
            .and_then(value_as_u32)
            .ok_or("missing or invalid congress")?;
        let bill_type = raw
            .bill_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or("missing type")?;
        let number = raw
            .number
            .as_ref()
            .and_then(value_as_string)
            .ok_or("missing number")?;
        let title = raw
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or("missing title")?;

        Ok(Bill {
            congress,
            bill_type,
            number,
            title,
            origin_chamber: raw.origin_chamber,
            latest_action: raw.latest_action,
            update_date: raw.update_date,
            url: raw.url,
        })
    }
}

/// Validates an upstream page into bills.
///
/// Records missing a required field are dropped with a warning. Duplicates
/// (same congress, type and number) keep the first occurrence.
pub fn map_listing(listing: RawBillListing) -> Vec<Bill> {
    let mut seen = HashSet::new();
    let mut bills = Vec::with_capacity(listing.bills.len());

    for raw in listing.bills {
        match Bill::try_from(raw) {
            Ok(bill) => {
                if seen.insert(bill.identity()) {
                    bills.push(bill);
                }
            }
            Err(reason) => warn!(reason = %reason, "dropping malformed upstream bill"),
        }
    }

    bills
}

fn value_as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|n| *n > 0)
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawUpstreamBill {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_maps_complete_record() {
        let bill = Bill::try_from(raw(json!({
            "congress": 119,
            "type": "HR",
            "number": "1234",
            "title": "An Act",
            "originChamber": "House",
            "latestAction": {"actionDate": "2025-02-01", "text": "Referred"},
            "updateDate": "2025-02-02",
            "url": "https://api.congress.gov/v3/bill/119/hr/1234"
        })))
        .unwrap();

        assert_eq!(bill.congress, 119);
        assert_eq!(bill.bill_type, "HR");
        assert_eq!(bill.number, "1234");
        assert_eq!(bill.origin_chamber.as_deref(), Some("House"));
        assert_eq!(
            bill.latest_action.unwrap().text.as_deref(),
            Some("Referred")
        );
    }

    #[test]
    fn test_accepts_numeric_number_and_string_congress() {
        let bill = Bill::try_from(raw(json!({
            "congress": "118",
            "type": "S",
            "number": 42,
            "title": "A Bill"
        })))
        .unwrap();

        assert_eq!(bill.congress, 118);
        assert_eq!(bill.number, "42");
    }

    #[test]
    fn test_rejects_missing_required_fields() {
        assert!(Bill::try_from(raw(json!({"type": "HR", "number": "1", "title": "x"}))).is_err());
        assert!(Bill::try_from(raw(json!({"congress": 119, "number": "1", "title": "x"}))).is_err());
        assert!(Bill::try_from(raw(json!({"congress": 119, "type": "HR", "title": "x"}))).is_err());
        assert!(Bill::try_from(raw(json!({"congress": 119, "type": "HR", "number": "1"}))).is_err());
        assert!(Bill::try_from(raw(json!({"congress": 0, "type": "HR", "number": "1", "title": "x"}))).is_err());
    }

    #[test]
    fn test_map_listing_drops_invalid_and_duplicates() {
        let listing: RawBillListing = serde_json::from_value(json!({
            "bills": [
                {"congress": 119, "type": "HR", "number": "1", "title": "First"},
                {"congress": 119, "type": "hr", "number": "1", "title": "Duplicate"},
                {"congress": 119, "type": "S", "number": "2"},
                {"congress": 119, "type": "S", "number": "3", "title": "Third"}
            ],
            "pagination": {"count": 4}
        }))
        .unwrap();

        let bills = map_listing(listing);
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].title, "First");
        assert_eq!(bills[1].number, "3");
    }

    #[test]
    fn test_bill_serializes_camel_case() {
        let bill = Bill {
            congress: 119,
            bill_type: "HR".into(),
            number: "7".into(),
            title: "T".into(),
            origin_chamber: Some("House".into()),
            latest_action: None,
            update_date: Some("2025-01-01".into()),
            url: None,
        };

        let json = serde_json::to_value(&bill).unwrap();
        assert_eq!(json["type"], "HR");
        assert_eq!(json["originChamber"], "House");
        assert_eq!(json["updateDate"], "2025-01-01");
        assert!(json.get("url").is_none());
    }
}
