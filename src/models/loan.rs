//! Loan (borrow record) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A record that a holder currently has (or once had) one unit of an item
/// checked out. A loan with no `closed_at` is open; loans are never deleted
/// and a closed loan stays in the history permanently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Loan {
    pub id: String,
    pub item_id: String,
    pub holder: String,
    #[serde(with = "timestamp")]
    #[schema(value_type = String, example = "2026-01-15 09:30:00")]
    pub opened_at: DateTime<Utc>,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, example = "2026-01-22 17:05:00")]
    pub closed_at: Option<DateTime<Utc>>,
}

impl Loan {
    /// An open loan represents stock currently unavailable.
    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }
}

/// Check-out request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckOutRequest {
    pub item_id: String,
    pub holder: String,
}

/// Check-in request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckInRequest {
    pub item_id: String,
    pub holder: String,
}

/// Loan timestamps persist as `YYYY-MM-DD HH:MM:SS` strings.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let naive = NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)?;
        Ok(naive.and_utc())
    }

    pub mod option {
        use super::FORMAT;
        use chrono::{DateTime, NaiveDateTime, Utc};
        use serde::{self, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(
            date: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(d) => serializer.serialize_some(&d.format(FORMAT).to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(s) => {
                    let naive = NaiveDateTime::parse_from_str(&s, FORMAT)
                        .map_err(serde::de::Error::custom)?;
                    Ok(Some(naive.and_utc()))
                }
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_round_trip_in_fixed_format() {
        let loan = Loan {
            id: "BR000001".to_string(),
            item_id: "BK000001".to_string(),
            holder: "alice".to_string(),
            opened_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap(),
            closed_at: None,
        };

        let json = serde_json::to_string(&loan).unwrap();
        assert!(json.contains("\"2026-01-15 09:30:00\""));
        assert!(!json.contains("closed_at"));

        let back: Loan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, loan);
    }

    #[test]
    fn closed_at_serializes_when_present() {
        let loan = Loan {
            id: "BR000002".to_string(),
            item_id: "BK000001".to_string(),
            holder: "bob".to_string(),
            opened_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap(),
            closed_at: Some(Utc.with_ymd_and_hms(2026, 1, 22, 17, 5, 0).unwrap()),
        };

        let json = serde_json::to_string(&loan).unwrap();
        assert!(json.contains("\"closed_at\":\"2026-01-22 17:05:00\""));

        let back: Loan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, loan);
    }
}
