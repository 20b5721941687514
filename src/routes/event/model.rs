use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_target", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventTarget {
    Everyone,
    Year,
    Branch,
    Section,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date_time: DateTime<Utc>,
    pub media_url: Option<String>,
    pub target_type: EventTarget,
    pub target_value: Option<String>,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct EventWithAuthor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub author_name: Option<String>,
    pub author_email: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub date_time: DateTime<Utc>,
    pub media_url: Option<String>,
    pub target_type: Option<EventTarget>,
    pub target_value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    pub media_url: Option<String>,
    pub target_type: Option<EventTarget>,
    pub target_value: Option<String>,
}

const EVENT_COLUMNS: &str =
    "id, title, description, date_time, media_url, target_type, target_value, author_id, created_at";

/// 除 EVERYONE 外的受众类型必须携带取值
pub(crate) fn validate_target(
    target_type: EventTarget,
    target_value: Option<&str>,
) -> Result<(), AppError> {
    if target_type != EventTarget::Everyone && target_value.is_none_or(str::is_empty) {
        return Err(AppError::BadRequest(
            "Target value is required for this target type".to_string(),
        ));
    }
    Ok(())
}

impl Event {
    pub async fn create(
        pool: &PgPool,
        req: CreateEventRequest,
        author_id: &str,
    ) -> Result<Self, AppError> {
        let target_type = req.target_type.unwrap_or(EventTarget::Everyone);
        validate_target(target_type, req.target_value.as_deref())?;

        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (id, title, description, date_time, media_url, target_type, target_value, author_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.date_time)
        .bind(&req.media_url)
        .bind(target_type)
        .bind(&req.target_value)
        .bind(author_id)
        .fetch_one(pool)
        .await?;

        Ok(event)
    }

    pub async fn find_by_id(pool: &PgPool, event_id: &str) -> Result<Option<Self>, AppError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(event_id)
        .fetch_optional(pool)
        .await?;

        Ok(event)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<EventWithAuthor>, AppError> {
        let events = sqlx::query_as::<_, EventWithAuthor>(
            r#"
            SELECT e.id, e.title, e.description, e.date_time, e.media_url,
                   e.target_type, e.target_value, e.author_id, e.created_at,
                   u.name AS author_name, u.email AS author_email
            FROM events e
            JOIN users u ON u.id = e.author_id
            ORDER BY e.date_time ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(events)
    }

    pub async fn update(
        pool: &PgPool,
        event_id: &str,
        req: &UpdateEventRequest,
    ) -> Result<Self, AppError> {
        if let Some(target_type) = req.target_type {
            validate_target(target_type, req.target_value.as_deref())?;
        }

        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                date_time = COALESCE($4, date_time),
                media_url = COALESCE($5, media_url),
                target_type = COALESCE($6, target_type),
                target_value = COALESCE($7, target_value)
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.date_time)
        .bind(&req.media_url)
        .bind(req.target_type)
        .bind(&req.target_value)
        .fetch_one(pool)
        .await?;

        Ok(event)
    }

    pub async fn delete(pool: &PgPool, event_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(event_id)
            .execute(pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everyone_target_needs_no_value() {
        assert!(validate_target(EventTarget::Everyone, None).is_ok());
    }

    #[test]
    fn scoped_target_requires_value() {
        assert!(validate_target(EventTarget::Year, Some("2")).is_ok());
        assert!(validate_target(EventTarget::Year, None).is_err());
        assert!(validate_target(EventTarget::Branch, Some("")).is_err());
    }
}
