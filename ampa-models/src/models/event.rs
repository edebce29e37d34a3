use chrono::{DateTime, Utc};
use sqlx::query_as;
use uuid::Uuid;

use crate::{AmpaModelError, Client};

#[derive(sqlx::FromRow, Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

impl Event {
    pub async fn get_id(client: &Client, id: Uuid) -> Result<Option<Event>, AmpaModelError> {
        trace!("loading event {}", id);
        Ok(query_as::<_, Event>(
            "SELECT id, title, description, event_date, created_at, updated_at, created_by
                FROM events WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(client.pool())
        .await?)
    }

    /// All events whose date falls inside `[start, end)`.
    pub async fn get_in_window(
        client: &Client,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, AmpaModelError> {
        trace!("loading events between {} and {}", start, end);
        Ok(query_as::<_, Event>(
            "SELECT id, title, description, event_date, created_at, updated_at, created_by
                FROM events WHERE event_date >= $1 AND event_date < $2
                ORDER BY event_date",
        )
        .bind(start)
        .bind(end)
        .fetch_all(client.pool())
        .await?)
    }

    /// A row is announceable once it carries a non-empty title; rows that
    /// fail this are logged and skipped by the notification jobs.
    pub fn is_wellformed(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn event(title: &str) -> Event {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        Event {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            event_date: now,
            created_at: now,
            updated_at: now,
            created_by: None,
        }
    }

    #[test]
    fn wellformed_requires_title() {
        assert!(event("Science Fair").is_wellformed());
        assert!(!event("").is_wellformed());
        assert!(!event("   ").is_wellformed());
    }
}
