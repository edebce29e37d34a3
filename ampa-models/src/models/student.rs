use sqlx::query_as;
use uuid::Uuid;

use crate::{AmpaModelError, Client};

#[derive(sqlx::FromRow, Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub class_id: i64,
    pub parent_id: Uuid,
}

/// Projection of the students-to-profiles join used for targeted delivery.
/// The join is inner on the profile row, so a student without a profile never
/// shows up here; the email itself may still be null.
#[derive(sqlx::FromRow, Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct StudentParentEmail {
    pub student_id: i64,
    pub class_id: i64,
    pub email: Option<String>,
}

impl Student {
    pub async fn parent_emails_in_classes(
        client: &Client,
        class_ids: &[i64],
    ) -> Result<Vec<StudentParentEmail>, AmpaModelError> {
        trace!("loading parent emails for classes {:?}", class_ids);
        Ok(query_as::<_, StudentParentEmail>(
            "SELECT s.id AS student_id, s.class_id, p.email
                FROM students s
                INNER JOIN profiles p ON p.id = s.parent_id
                WHERE s.class_id = ANY($1)",
        )
        .bind(class_ids)
        .fetch_all(client.pool())
        .await?)
    }

    pub async fn count_in_class(client: &Client, class_id: i64) -> Result<i64, AmpaModelError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students WHERE class_id = $1")
                .bind(class_id)
                .fetch_one(client.pool())
                .await?,
        )
    }
}
