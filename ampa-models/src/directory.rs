use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    AmpaModelError, Client, Event, EventRecipient, Profile, ProfileRole, Student,
    StudentParentEmail,
};

/// Read capability consumed by the notification jobs.
///
/// The jobs never hold a pool themselves; callers hand them a directory
/// handle, which in production is [`Client`] and in tests an in-memory
/// implementation. Every method is a single snapshot read, no transaction is
/// taken across calls.
#[async_trait]
pub trait AssociationDirectory {
    async fn event(&self, id: Uuid) -> Result<Option<Event>, AmpaModelError>;

    /// Events whose date falls inside `[start, end)`.
    async fn events_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, AmpaModelError>;

    async fn event_targets(&self, event_id: Uuid) -> Result<Vec<EventRecipient>, AmpaModelError>;

    async fn student_parent_emails(
        &self,
        class_ids: &[i64],
    ) -> Result<Vec<StudentParentEmail>, AmpaModelError>;

    async fn profiles_by_role(&self, role: ProfileRole) -> Result<Vec<Profile>, AmpaModelError>;
}

#[async_trait]
impl AssociationDirectory for Client {
    async fn event(&self, id: Uuid) -> Result<Option<Event>, AmpaModelError> {
        Event::get_id(self, id).await
    }

    async fn events_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, AmpaModelError> {
        Event::get_in_window(self, start, end).await
    }

    async fn event_targets(&self, event_id: Uuid) -> Result<Vec<EventRecipient>, AmpaModelError> {
        EventRecipient::get_for_event(self, event_id).await
    }

    async fn student_parent_emails(
        &self,
        class_ids: &[i64],
    ) -> Result<Vec<StudentParentEmail>, AmpaModelError> {
        Student::parent_emails_in_classes(self, class_ids).await
    }

    async fn profiles_by_role(&self, role: ProfileRole) -> Result<Vec<Profile>, AmpaModelError> {
        Profile::get_by_role(self, role).await
    }
}
