//! PostgreSQL implementation of GraphStateStore.
//!
//! The graph is relational here: `users` holds the node flags, and
//! `attachments` rows are the HOLDS edges (one owner per attachment via
//! the `user_id` foreign key). Multi-entity mutations run inside one
//! transaction so a failure leaves prior state intact.
//!
//! Schema lives in `migrations/0001_init.sql`.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::attachment::{Attachment, AttachmentKind, PowerLevel, UserNode, Valence};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::information::{InformationEvent, InformationEventId};
use crate::ports::GraphStateStore;

/// PostgreSQL implementation of GraphStateStore.
#[derive(Clone)]
pub struct PostgresGraphStore {
    pool: PgPool,
}

impl PostgresGraphStore {
    /// Creates a new PostgresGraphStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::graph_store(format!("{}: {}", context, err))
}

fn user_not_found(user_id: &UserId) -> DomainError {
    DomainError::new(
        ErrorCode::UserNotFound,
        format!("User not found: {}", user_id),
    )
}

#[async_trait]
impl GraphStateStore for PostgresGraphStore {
    async fn find_user(&self, user_id: &UserId) -> Result<Option<UserNode>, DomainError> {
        let row = sqlx::query(
            "SELECT user_id, bootstrapping_complete FROM users WHERE user_id = $1",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to fetch user", e))?;

        match row {
            Some(row) => Ok(Some(row_to_user_node(row)?)),
            None => Ok(None),
        }
    }

    async fn create_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, bootstrapping_complete)
            VALUES ($1, FALSE)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to create user", e))?;

        Ok(())
    }

    async fn set_bootstrapped(
        &self,
        user_id: &UserId,
        complete: bool,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET bootstrapping_complete = $2 WHERE user_id = $1")
            .bind(user_id.as_str())
            .bind(complete)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to update bootstrap flag", e))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user_id));
        }

        Ok(())
    }

    async fn upsert_attachment(
        &self,
        user_id: &UserId,
        attachment: &Attachment,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO attachments (user_id, name, kind, power_level, valence)
            SELECT u.user_id, $2, $3, $4, $5 FROM users u WHERE u.user_id = $1
            ON CONFLICT (user_id, name) DO UPDATE SET
                kind = EXCLUDED.kind,
                power_level = EXCLUDED.power_level,
                valence = EXCLUDED.valence
            "#,
        )
        .bind(user_id.as_str())
        .bind(attachment.name())
        .bind(kind_to_str(attachment.kind()))
        .bind(attachment.power_level().value())
        .bind(attachment.valence().value())
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to upsert attachment", e))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user_id));
        }

        Ok(())
    }

    async fn list_attachments(&self, user_id: &UserId) -> Result<Vec<Attachment>, DomainError> {
        if self.find_user(user_id).await?.is_none() {
            return Err(user_not_found(user_id));
        }

        let rows = sqlx::query(
            r#"
            SELECT name, kind, power_level, valence
            FROM attachments
            WHERE user_id = $1
            ORDER BY name
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Failed to list attachments", e))?;

        rows.into_iter().map(row_to_attachment).collect()
    }

    async fn delete_all_attachments(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Failed to begin transaction", e))?;

        let exists: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE user_id = $1")
            .bind(user_id.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| store_error("Failed to check user existence", e))?;
        if exists.0 == 0 {
            return Err(user_not_found(user_id));
        }

        sqlx::query("DELETE FROM attachments WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| store_error("Failed to delete attachments", e))?;

        tx.commit()
            .await
            .map_err(|e| store_error("Failed to commit attachment deletion", e))?;

        Ok(())
    }

    async fn reset_user_graph(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Failed to begin transaction", e))?;

        let result = sqlx::query(
            "UPDATE users SET bootstrapping_complete = FALSE WHERE user_id = $1",
        )
        .bind(user_id.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| store_error("Failed to reset bootstrap flag", e))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user_id));
        }

        sqlx::query("DELETE FROM attachments WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| store_error("Failed to delete attachments", e))?;

        tx.commit()
            .await
            .map_err(|e| store_error("Failed to commit graph reset", e))?;

        Ok(())
    }

    async fn append_information_event(
        &self,
        user_id: &UserId,
        event: &InformationEvent,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO information_events (id, user_id, source, occurred_at, payload_ref)
            SELECT $1, u.user_id, $3, $4, $5 FROM users u WHERE u.user_id = $2
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(user_id.as_str())
        .bind(&event.source)
        .bind(event.occurred_at.as_datetime())
        .bind(&event.payload_ref)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to append information event", e))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user_id));
        }

        Ok(())
    }

    async fn list_recent_information_events(
        &self,
        user_id: &UserId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<InformationEvent>, DomainError> {
        if self.find_user(user_id).await?.is_none() {
            return Err(user_not_found(user_id));
        }

        // Identity as the secondary key keeps pages stable when events
        // share an occurred_at.
        let rows = sqlx::query(
            r#"
            SELECT id, source, occurred_at, payload_ref
            FROM information_events
            WHERE user_id = $1
            ORDER BY occurred_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id.as_str())
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Failed to list information events", e))?;

        rows.into_iter().map(row_to_event).collect()
    }
}

fn kind_to_str(kind: AttachmentKind) -> &'static str {
    match kind {
        AttachmentKind::Value => "value",
        AttachmentKind::Goal => "goal",
    }
}

fn str_to_kind(s: &str) -> Result<AttachmentKind, DomainError> {
    match s {
        "value" => Ok(AttachmentKind::Value),
        "goal" => Ok(AttachmentKind::Goal),
        _ => Err(DomainError::graph_store(format!(
            "Invalid attachment kind: {}",
            s
        ))),
    }
}

fn row_to_user_node(row: sqlx::postgres::PgRow) -> Result<UserNode, DomainError> {
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| store_error("Failed to get user_id", e))?;
    let bootstrapping_complete: bool = row
        .try_get("bootstrapping_complete")
        .map_err(|e| store_error("Failed to get bootstrapping_complete", e))?;

    Ok(UserNode {
        user_id: UserId::try_new(user_id)
            .map_err(|e| DomainError::graph_store(format!("Invalid stored user_id: {}", e)))?,
        bootstrapping_complete,
    })
}

fn row_to_attachment(row: sqlx::postgres::PgRow) -> Result<Attachment, DomainError> {
    let name: String = row
        .try_get("name")
        .map_err(|e| store_error("Failed to get name", e))?;
    let kind_str: String = row
        .try_get("kind")
        .map_err(|e| store_error("Failed to get kind", e))?;
    let power_level: f64 = row
        .try_get("power_level")
        .map_err(|e| store_error("Failed to get power_level", e))?;
    let valence: f64 = row
        .try_get("valence")
        .map_err(|e| store_error("Failed to get valence", e))?;

    let power_level = PowerLevel::try_new(power_level)
        .map_err(|e| DomainError::graph_store(format!("Stored power out of range: {}", e)))?;
    let valence = Valence::try_new(valence)
        .map_err(|e| DomainError::graph_store(format!("Stored valence out of range: {}", e)))?;

    Attachment::new(name, str_to_kind(&kind_str)?, power_level, valence)
        .map_err(|e| DomainError::graph_store(format!("Invalid stored attachment: {}", e)))
}

fn row_to_event(row: sqlx::postgres::PgRow) -> Result<InformationEvent, DomainError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| store_error("Failed to get id", e))?;
    let source: String = row
        .try_get("source")
        .map_err(|e| store_error("Failed to get source", e))?;
    let occurred_at: chrono::DateTime<chrono::Utc> = row
        .try_get("occurred_at")
        .map_err(|e| store_error("Failed to get occurred_at", e))?;
    let payload_ref: String = row
        .try_get("payload_ref")
        .map_err(|e| store_error("Failed to get payload_ref", e))?;

    Ok(InformationEvent {
        id: InformationEventId::from_uuid(id),
        source,
        occurred_at: Timestamp::from_datetime(occurred_at),
        payload_ref,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_conversion_round_trips() {
        assert_eq!(str_to_kind(kind_to_str(AttachmentKind::Value)).unwrap(), AttachmentKind::Value);
        assert_eq!(str_to_kind(kind_to_str(AttachmentKind::Goal)).unwrap(), AttachmentKind::Goal);
    }

    #[test]
    fn str_to_kind_rejects_invalid() {
        assert!(str_to_kind("aspiration").is_err());
    }
}
