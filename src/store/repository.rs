//! Token Store Repository
//!
//! Lookups over token roots and events, and the transactional delete.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::{ModifyAction, WbToken, WbTokenEvent};

use super::StoreError;

/// Persistence seam for the token aggregate
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Find an event by its id
    async fn find_event(&self, event_id: Uuid) -> Result<Option<WbTokenEvent>, StoreError>;

    /// Find the root row whose latest event is `event_id`
    async fn find_token_by_event(&self, event_id: Uuid) -> Result<Option<WbToken>, StoreError>;

    /// Persist the updated event and remove the root in one transaction
    async fn delete_token(&self, event: &WbTokenEvent, token: &WbToken) -> Result<(), StoreError>;
}

type EventRow = (Uuid, Uuid, Uuid, String, bool, String, Option<Uuid>, DateTime<Utc>);

fn event_from_row(row: EventRow) -> Result<WbTokenEvent, StoreError> {
    let (id, main, profile, token, active, modify, modified_by, modified_at) = row;
    let modify: ModifyAction = modify.parse()?;

    Ok(WbTokenEvent::from_parts(
        id,
        main,
        profile,
        token,
        active,
        modify,
        modified_by,
        modified_at,
    ))
}

/// PostgreSQL token store
#[derive(Debug, Clone)]
pub struct PgTokenStore {
    pool: PgPool,
}

impl PgTokenStore {
    /// Create a new PgTokenStore with a database pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a fresh token with its first event (seeding and tests)
    pub async fn insert_token(&self, event: &WbTokenEvent) -> Result<WbToken, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO wb_token_event (
                id, main, profile, token, active, modify, modified_by, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(event.id())
        .bind(event.main())
        .bind(event.profile())
        .bind(event.token())
        .bind(event.is_active())
        .bind(event.modify().as_str())
        .bind(event.modified_by())
        .bind(event.modified_at())
        .execute(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO wb_token (id, event) VALUES ($1, $2)")
            .bind(event.main())
            .bind(event.id())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(WbToken::new(event.main(), event.id()))
    }

    /// Update the mutable columns of an event inside a transaction
    async fn update_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: &WbTokenEvent,
    ) -> Result<(), StoreError> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE wb_token_event
            SET active = $2, modify = $3, modified_by = $4, modified_at = $5
            WHERE id = $1
            "#,
        )
        .bind(event.id())
        .bind(event.is_active())
        .bind(event.modify().as_str())
        .bind(event.modified_by())
        .bind(event.modified_at())
        .execute(&mut **tx)
        .await?
        .rows_affected();

        if rows_affected == 0 {
            return Err(StoreError::EventNotFound(event.id()));
        }

        Ok(())
    }
}

#[async_trait]
impl TokenStore for PgTokenStore {
    async fn find_event(&self, event_id: Uuid) -> Result<Option<WbTokenEvent>, StoreError> {
        let row: Option<EventRow> = sqlx::query_as(
            r#"
            SELECT id, main, profile, token, active, modify, modified_by, modified_at
            FROM wb_token_event
            WHERE id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(event_from_row).transpose()
    }

    async fn find_token_by_event(&self, event_id: Uuid) -> Result<Option<WbToken>, StoreError> {
        let row: Option<(Uuid, Uuid)> =
            sqlx::query_as("SELECT id, event FROM wb_token WHERE event = $1")
                .bind(event_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(id, event)| WbToken::new(id, event)))
    }

    async fn delete_token(&self, event: &WbTokenEvent, token: &WbToken) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        self.update_event(&mut tx, event).await?;

        // Guarded by event so a concurrent edit of the token is not lost
        let rows_affected = sqlx::query("DELETE FROM wb_token WHERE id = $1 AND event = $2")
            .bind(token.id())
            .bind(token.event())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(StoreError::StaleToken {
                token_id: token.id(),
                event_id: token.event(),
            });
        }

        tx.commit().await?;

        tracing::debug!(
            token_id = %token.id(),
            event_id = %event.id(),
            "Token root removed"
        );

        Ok(())
    }
}
