//! Delimited text encoding for the aggregate report.
//!
//! Pure text transformation: a sequence of [`UserAggregateRow`] becomes one
//! header line plus one line per row, fields joined by a configurable
//! delimiter. Quoting follows the usual CSV convention - a field containing
//! the delimiter, a double quote, or a line break is wrapped in double
//! quotes with internal quotes doubled - so the output parses back to
//! exactly the same field values regardless of their content.

use crate::domain::foundation::ValidationError;
use crate::domain::report::{UserAggregateRow, FIELD_NAMES};

/// Field delimiter for the export document.
///
/// A single character; the double quote and line terminators are rejected
/// because they would collide with the quoting rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter(char);

/// The delimiter used when the caller does not specify one.
pub const DEFAULT_DELIMITER: Delimiter = Delimiter(';');

impl Delimiter {
    /// Creates a delimiter, rejecting characters the quoting rule reserves.
    pub fn new(c: char) -> Result<Self, ValidationError> {
        if c == '"' || c == '\r' || c == '\n' {
            return Err(ValidationError::invalid_format(
                "delimiter",
                "must not be a quote or line terminator",
            ));
        }
        Ok(Self(c))
    }

    /// Returns the delimiter character.
    pub fn as_char(&self) -> char {
        self.0
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        DEFAULT_DELIMITER
    }
}

/// Encodes rows into a delimited text document.
///
/// The first line names the eight export columns in fixed order; each
/// subsequent line renders one row. An empty row sequence yields a
/// header-only document. Encoding is deterministic and cannot fail for
/// well-formed rows.
pub fn encode(rows: &[UserAggregateRow], delimiter: Delimiter) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(encode_line(
        FIELD_NAMES.iter().map(|name| (*name).to_string()),
        delimiter,
    ));
    for row in rows {
        lines.push(encode_line(row.field_values().into_iter(), delimiter));
    }
    lines.join("\n")
}

fn encode_line(fields: impl Iterator<Item = String>, delimiter: Delimiter) -> String {
    fields
        .map(|field| quote_field(&field, delimiter))
        .collect::<Vec<_>>()
        .join(&delimiter.as_char().to_string())
}

/// Wraps a field in double quotes when its content would otherwise be
/// ambiguous, doubling internal quotes.
fn quote_field(field: &str, delimiter: Delimiter) -> String {
    let needs_quoting = field
        .chars()
        .any(|c| c == delimiter.as_char() || c == '"' || c == '\r' || c == '\n');
    if needs_quoting {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Test-side inverse of `encode`: splits a document back into its
    /// textual field values, honoring the quoting rule.
    fn decode(document: &str, delimiter: Delimiter) -> Vec<Vec<String>> {
        let delim = delimiter.as_char();
        let mut records = Vec::new();
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut chars = document.chars().peekable();
        let mut in_quotes = false;

        while let Some(c) = chars.next() {
            if in_quotes {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    field.push(c);
                }
            } else if c == '"' {
                in_quotes = true;
            } else if c == delim {
                fields.push(std::mem::take(&mut field));
            } else if c == '\n' {
                fields.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut fields));
            } else {
                field.push(c);
            }
        }
        fields.push(field);
        records.push(fields);
        records
    }

    fn row(
        remote_id: &str,
        nickname: Option<&str>,
        ads: i64,
        ratio: Option<f64>,
    ) -> UserAggregateRow {
        UserAggregateRow {
            remote_id: remote_id.to_string(),
            nickname: nickname.map(String::from),
            profile_created: None,
            sent_business_cards: 0,
            received_business_cards: 0,
            ads,
            answers: 0,
            gotten_answers_per_ad: ratio,
        }
    }

    #[test]
    fn delimiter_rejects_quote_and_line_terminators() {
        assert!(Delimiter::new('"').is_err());
        assert!(Delimiter::new('\n').is_err());
        assert!(Delimiter::new('\r').is_err());
        assert!(Delimiter::new(';').is_ok());
        assert!(Delimiter::new(',').is_ok());
        assert!(Delimiter::new('\t').is_ok());
    }

    #[test]
    fn empty_rows_produce_header_only_document() {
        let document = encode(&[], DEFAULT_DELIMITER);
        assert_eq!(document, FIELD_NAMES.join(";"));
        assert_eq!(document.lines().count(), 1);
    }

    #[test]
    fn header_names_fields_in_fixed_order() {
        let document = encode(&[row("m", None, 0, None)], DEFAULT_DELIMITER);
        let header = document.lines().next().unwrap();
        assert_eq!(
            header,
            "remote_id;nickname;profile_created;sent_business_cards;\
             received_business_cards;ads;answers;gotten_answers_per_ad"
        );
    }

    #[test]
    fn three_member_example_produces_four_lines() {
        // A: 2 ads, 5 answers across them. B: 0 ads. C: 1 ad, 0 answers.
        let rows = vec![
            row("a", Some("A"), 2, Some(2.5)),
            row("b", Some("B"), 0, None),
            row("c", Some("C"), 1, Some(0.0)),
        ];
        let document = encode(&rows, DEFAULT_DELIMITER);
        let lines: Vec<&str> = document.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with(";2.5"));
        assert!(lines[2].ends_with(";"), "absent ratio must be empty");
        assert!(lines[3].ends_with(";0"), "defined zero ratio renders as 0");
    }

    #[test]
    fn field_containing_delimiter_is_quoted() {
        let rows = vec![row("m", Some("Smith; Jr."), 0, None)];
        let document = encode(&rows, DEFAULT_DELIMITER);
        assert!(document.contains("\"Smith; Jr.\""));

        let decoded = decode(&document, DEFAULT_DELIMITER);
        assert_eq!(decoded[1][1], "Smith; Jr.");
    }

    #[test]
    fn field_containing_quotes_doubles_them() {
        let rows = vec![row("m", Some("the \"best\" member"), 0, None)];
        let document = encode(&rows, DEFAULT_DELIMITER);
        assert!(document.contains("\"the \"\"best\"\" member\""));

        let decoded = decode(&document, DEFAULT_DELIMITER);
        assert_eq!(decoded[1][1], "the \"best\" member");
    }

    #[test]
    fn field_containing_newline_stays_one_record() {
        let rows = vec![row("m", Some("line one\nline two"), 0, None)];
        let document = encode(&rows, DEFAULT_DELIMITER);

        let decoded = decode(&document, DEFAULT_DELIMITER);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[1][1], "line one\nline two");
    }

    #[test]
    fn alternate_delimiter_is_honored() {
        let delimiter = Delimiter::new(',').unwrap();
        let rows = vec![row("m", Some("a;b"), 0, None)];
        let document = encode(&rows, delimiter);
        let header = document.lines().next().unwrap();
        assert!(header.starts_with("remote_id,nickname,"));
        // The semicolon is not special under a comma delimiter.
        assert!(document.contains(";") && !document.contains("\"a;b\""));
    }

    fn field_text() -> impl Strategy<Value = String> {
        // Mix ordinary text with the characters that exercise quoting.
        proptest::string::string_regex("[a-zA-Z0-9 ;,\"\n\r]{0,12}").unwrap()
    }

    fn arb_row() -> impl Strategy<Value = UserAggregateRow> {
        (
            "[a-z0-9-]{1,12}",
            proptest::option::of(field_text()),
            proptest::option::of(field_text()),
            0..500i64,
            0..500i64,
            0..50i64,
            0..500i64,
            proptest::option::of(0.0..100.0f64),
        )
            .prop_map(
                |(remote_id, nickname, profile_created, sent, received, ads, answers, ratio)| {
                    UserAggregateRow {
                        remote_id,
                        nickname,
                        profile_created,
                        sent_business_cards: sent,
                        received_business_cards: received,
                        ads,
                        answers,
                        gotten_answers_per_ad: ratio,
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn round_trip_preserves_field_values(
            rows in proptest::collection::vec(arb_row(), 0..8),
            delim in prop_oneof![Just(';'), Just(','), Just('\t'), Just('|')],
        ) {
            let delimiter = Delimiter::new(delim).unwrap();
            let document = encode(&rows, delimiter);
            let decoded = decode(&document, delimiter);

            prop_assert_eq!(decoded.len(), rows.len() + 1);
            let header: Vec<String> =
                FIELD_NAMES.iter().map(|n| (*n).to_string()).collect();
            prop_assert_eq!(&decoded[0], &header);
            for (line, row) in decoded[1..].iter().zip(&rows) {
                let field_values = row.field_values();
                prop_assert_eq!(line.as_slice(), field_values.as_slice());
            }
        }
    }
}
