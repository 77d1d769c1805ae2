//! Per-member aggregate report rows.
//!
//! One `UserAggregateRow` is produced for every registered member at the
//! instant the report query executes - no filtering, no pagination. The
//! field order here is the export column order and must not change without
//! coordinating with report consumers.

use serde::Serialize;

/// Export column names, in the order fields appear on every data line.
pub const FIELD_NAMES: [&str; 8] = [
    "remote_id",
    "nickname",
    "profile_created",
    "sent_business_cards",
    "received_business_cards",
    "ads",
    "answers",
    "gotten_answers_per_ad",
];

/// One computed summary record per registered member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserAggregateRow {
    /// External unique identifier of the member.
    pub remote_id: String,

    /// Display name, if the member has set one.
    pub nickname: Option<String>,

    /// Profile-creation consent state, if recorded.
    pub profile_created: Option<String>,

    /// Business cards this member has sent.
    pub sent_business_cards: i64,

    /// Business cards this member has received.
    pub received_business_cards: i64,

    /// Advertisements owned by this member.
    pub ads: i64,

    /// Answers authored by this member.
    pub answers: i64,

    /// Average answers received per owned advertisement.
    ///
    /// `None` when the member owns zero advertisements - the average is
    /// undefined there, and it must stay absent rather than collapse to
    /// zero or NaN.
    pub gotten_answers_per_ad: Option<f64>,
}

impl UserAggregateRow {
    /// Renders the row's fields as text, in export column order.
    ///
    /// Absent values render as empty strings. Floats use `Display`
    /// formatting, so a defined-but-zero average renders as `0` and a
    /// fractional one keeps its fraction (`2.5`).
    pub fn field_values(&self) -> [String; 8] {
        [
            self.remote_id.clone(),
            self.nickname.clone().unwrap_or_default(),
            self.profile_created.clone().unwrap_or_default(),
            self.sent_business_cards.to_string(),
            self.received_business_cards.to_string(),
            self.ads.to_string(),
            self.answers.to_string(),
            self.gotten_answers_per_ad
                .map(|v| v.to_string())
                .unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with_ratio(ratio: Option<f64>) -> UserAggregateRow {
        UserAggregateRow {
            remote_id: "member-1".to_string(),
            nickname: Some("Alice".to_string()),
            profile_created: Some("true".to_string()),
            sent_business_cards: 3,
            received_business_cards: 1,
            ads: 2,
            answers: 0,
            gotten_answers_per_ad: ratio,
        }
    }

    #[test]
    fn field_values_follow_export_order() {
        let values = row_with_ratio(Some(2.5)).field_values();
        assert_eq!(values.len(), FIELD_NAMES.len());
        assert_eq!(values[0], "member-1");
        assert_eq!(values[1], "Alice");
        assert_eq!(values[2], "true");
        assert_eq!(values[3], "3");
        assert_eq!(values[4], "1");
        assert_eq!(values[5], "2");
        assert_eq!(values[6], "0");
        assert_eq!(values[7], "2.5");
    }

    #[test]
    fn absent_ratio_renders_empty_not_zero() {
        let values = row_with_ratio(None).field_values();
        assert_eq!(values[7], "");
    }

    #[test]
    fn defined_zero_ratio_renders_as_zero() {
        let values = row_with_ratio(Some(0.0)).field_values();
        assert_eq!(values[7], "0");
    }

    #[test]
    fn absent_nickname_and_consent_render_empty() {
        let row = UserAggregateRow {
            nickname: None,
            profile_created: None,
            ..row_with_ratio(None)
        };
        let values = row.field_values();
        assert_eq!(values[1], "");
        assert_eq!(values[2], "");
    }
}
