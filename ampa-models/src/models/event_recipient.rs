use sqlx::query_as;
use uuid::Uuid;

use crate::{AmpaModelError, Client};

/// One class-targeting row for an event. An event with no rows at all is a
/// broadcast to every parent; rows restrict delivery to the listed classes.
#[derive(sqlx::FromRow, Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct EventRecipient {
    pub event_id: Uuid,
    pub class_id: i64,
}

impl EventRecipient {
    pub async fn get_for_event(
        client: &Client,
        event_id: Uuid,
    ) -> Result<Vec<EventRecipient>, AmpaModelError> {
        trace!("loading targeting rows for event {}", event_id);
        Ok(query_as::<_, EventRecipient>(
            "SELECT event_id, class_id FROM event_recipients WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_all(client.pool())
        .await?)
    }
}
