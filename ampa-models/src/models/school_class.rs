use sqlx::query_as;

use crate::{AmpaModelError, Client};

/// Static reference data; classes are managed outside this service.
#[derive(sqlx::FromRow, Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct SchoolClass {
    pub id: i64,
    pub name: String,
}

impl SchoolClass {
    pub async fn get_all(client: &Client) -> Result<Vec<SchoolClass>, AmpaModelError> {
        trace!("loading all classes");
        Ok(
            query_as::<_, SchoolClass>("SELECT id, name FROM classes ORDER BY name")
                .fetch_all(client.pool())
                .await?,
        )
    }
}
