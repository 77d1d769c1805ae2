//! PostgreSQL implementation of ReportReader.
//!
//! One set-oriented query computes the whole report: four correlated
//! subquery counts over the related record tables plus the answers-per-ad
//! ratio, one row per registered member. The ratio's denominator goes
//! through `NULLIF` so members with zero advertisements get SQL NULL -
//! never a division error - which surfaces as an absent value.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tokio::time::timeout;

use crate::domain::report::UserAggregateRow;
use crate::ports::{ReportError, ReportReader};

const USER_AGGREGATES_SQL: &str = r#"
SELECT
    users.remote_id,
    users.data->>'name' AS nickname,
    users.data->>'profile_creation_consented' AS profile_created,
    (SELECT COUNT(*) FROM contacts WHERE contacts.from_user = users.id)
        AS sent_business_cards,
    (SELECT COUNT(*) FROM contacts WHERE contacts.to_user = users.id)
        AS received_business_cards,
    (SELECT COUNT(*) FROM ads WHERE ads.user_id = users.id) AS ads,
    (SELECT COUNT(*) FROM answers WHERE answers.user_id = users.id) AS answers,
    (
        SELECT SUM((SELECT COUNT(*) FROM answers WHERE answers.ad_id = ads.id))
                   ::double precision
               / NULLIF(COUNT(ads.id), 0)
        FROM ads
        WHERE ads.user_id = users.id
    ) AS gotten_answers_per_ad
FROM users
"#;

/// PostgreSQL implementation of ReportReader.
#[derive(Clone)]
pub struct PostgresReportReader {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresReportReader {
    /// Creates a reader over the given pool with a bounded query timeout.
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl ReportReader for PostgresReportReader {
    async fn user_aggregates(&self) -> Result<Vec<UserAggregateRow>, ReportError> {
        let rows = timeout(
            self.query_timeout,
            sqlx::query(USER_AGGREGATES_SQL).fetch_all(&self.pool),
        )
        .await
        .map_err(|_| ReportError::Timeout)??;

        let mapped: Result<Vec<UserAggregateRow>, sqlx::Error> = rows
            .into_iter()
            .map(|row| {
                Ok(UserAggregateRow {
                    remote_id: row.try_get("remote_id")?,
                    nickname: row.try_get("nickname")?,
                    profile_created: row.try_get("profile_created")?,
                    sent_business_cards: row.try_get("sent_business_cards")?,
                    received_business_cards: row.try_get("received_business_cards")?,
                    ads: row.try_get("ads")?,
                    answers: row.try_get("answers")?,
                    gotten_answers_per_ad: row.try_get("gotten_answers_per_ad")?,
                })
            })
            .collect();

        Ok(mapped?)
    }
}
