//! PostgreSQL implementation of ConsentReader.
//!
//! The open-ended grant maps are stored as JSONB columns; the named
//! permissions are plain boolean columns so the onboarding default is an
//! explicit stored value, not something inferred at read time.
//!
//! Schema lives in `migrations/0001_init.sql`.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::consent::ConsentProfile;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::ConsentReader;

/// PostgreSQL implementation of ConsentReader.
#[derive(Clone)]
pub struct PostgresConsentReader {
    pool: PgPool,
}

impl PostgresConsentReader {
    /// Creates a new PostgresConsentReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn read_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::GraphStoreError,
        format!("{}: {}", context, err),
    )
}

#[async_trait]
impl ConsentReader for PostgresConsentReader {
    async fn find_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ConsentProfile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT consent_data_processing, allow_somatic_prompts,
                   allow_distress_check_ins, allow_aggregation,
                   allow_pattern_training, data_source_consents,
                   feature_consents, consent_version, last_consent_update
            FROM consent_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| read_error("Failed to fetch consent profile", e))?;

        match row {
            Some(row) => Ok(Some(row_to_profile(row)?)),
            None => Ok(None),
        }
    }
}

fn row_to_profile(row: sqlx::postgres::PgRow) -> Result<ConsentProfile, DomainError> {
    let consent_data_processing: bool = row
        .try_get("consent_data_processing")
        .map_err(|e| read_error("Failed to get consent_data_processing", e))?;
    let allow_somatic_prompts: bool = row
        .try_get("allow_somatic_prompts")
        .map_err(|e| read_error("Failed to get allow_somatic_prompts", e))?;
    let allow_distress_check_ins: bool = row
        .try_get("allow_distress_check_ins")
        .map_err(|e| read_error("Failed to get allow_distress_check_ins", e))?;
    let allow_aggregation: bool = row
        .try_get("allow_aggregation")
        .map_err(|e| read_error("Failed to get allow_aggregation", e))?;
    let allow_pattern_training: bool = row
        .try_get("allow_pattern_training")
        .map_err(|e| read_error("Failed to get allow_pattern_training", e))?;

    let data_source_consents: sqlx::types::Json<HashMap<String, bool>> = row
        .try_get("data_source_consents")
        .map_err(|e| read_error("Failed to get data_source_consents", e))?;
    let feature_consents: sqlx::types::Json<HashMap<String, bool>> = row
        .try_get("feature_consents")
        .map_err(|e| read_error("Failed to get feature_consents", e))?;

    let consent_version: i32 = row
        .try_get("consent_version")
        .map_err(|e| read_error("Failed to get consent_version", e))?;
    let last_consent_update: chrono::DateTime<chrono::Utc> = row
        .try_get("last_consent_update")
        .map_err(|e| read_error("Failed to get last_consent_update", e))?;

    Ok(ConsentProfile {
        consent_data_processing,
        allow_somatic_prompts,
        allow_distress_check_ins,
        allow_aggregation,
        allow_pattern_training,
        data_source_consents: data_source_consents.0,
        feature_consents: feature_consents.0,
        consent_version: consent_version.max(0) as u32,
        last_consent_update: Timestamp::from_datetime(last_consent_update),
    })
}
