use ampa_core::error::{AmpaError, AmpaResult};
use ampa_mail::EmailService;
use ampa_models::{AssociationDirectory, Event};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::recipients::resolve_recipients;
use crate::SharedCtx;

/// Envelope the database webhook posts on row changes. Only inserts into the
/// events table are acted on; everything else is acknowledged and ignored.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone)]
pub struct InsertPayload {
    #[serde(rename = "type")]
    pub operation: String,
    pub table: String,
    #[serde(default)]
    pub record: Option<serde_json::Value>,
}

#[derive(serde::Deserialize, Debug)]
struct EventRecord {
    id: Option<Uuid>,
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    event_date: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    created_by: Option<Uuid>,
}

impl EventRecord {
    fn into_event(self) -> AmpaResult<Event> {
        let id = self
            .id
            .ok_or_else(|| AmpaError::InvalidPayload("event record is missing an id".to_string()))?;
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => {
                return Err(AmpaError::InvalidPayload(
                    "event record is missing a title".to_string(),
                ))
            }
        };
        let event_date = self.event_date.ok_or_else(|| {
            AmpaError::InvalidPayload("event record is missing an event date".to_string())
        })?;
        let now = Utc::now();
        Ok(Event {
            id,
            title,
            description: self.description,
            event_date,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
            created_by: self.created_by,
        })
    }
}

#[derive(serde::Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnounceSummary {
    pub emails_sent: u64,
    pub email_errors: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    Ignored,
    Processed(AnnounceSummary),
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone)]
pub struct AnnounceConfig {
    pub event_id: Uuid,
}

/// Announces an event to its resolved recipients. Send failures are counted,
/// not raised; a failed recipient lookup is an error the caller sees.
pub async fn announce<D, M>(
    directory: &D,
    mailer: &M,
    event: &Event,
) -> AmpaResult<AnnounceSummary>
where
    D: AssociationDirectory + Sync,
    M: EmailService + Sync,
{
    info!("Processing new event {:?} ({})", event.title, event.id);
    let recipients = resolve_recipients(directory, event).await?;
    let mut summary = AnnounceSummary::default();
    if recipients.is_empty() {
        return Ok(summary);
    }
    for email in &recipients {
        match mailer.send_new_event_notice(email, event).await {
            Ok(_) => summary.emails_sent += 1,
            Err(e) => {
                error!(
                    "failed to announce event {} to {}: {}",
                    event.id, email, e
                );
                summary.email_errors += 1;
            }
        }
    }
    info!(
        "Finished announcing event {}. Sent: {}, Errors: {}",
        event.id, summary.emails_sent, summary.email_errors
    );
    Ok(summary)
}

pub async fn announce_event<D, M>(
    directory: &D,
    mailer: &M,
    event_id: Uuid,
) -> AmpaResult<AnnounceSummary>
where
    D: AssociationDirectory + Sync,
    M: EmailService + Sync,
{
    let event = directory
        .event(event_id)
        .await?
        .ok_or_else(|| AmpaError::ObjectNotFound("event".to_string(), event_id.to_string()))?;
    announce(directory, mailer, &event).await
}

pub async fn process_insert_hook<D, M>(
    directory: &D,
    mailer: &M,
    payload: InsertPayload,
) -> AmpaResult<HookOutcome>
where
    D: AssociationDirectory + Sync,
    M: EmailService + Sync,
{
    if payload.operation != "INSERT" || payload.table != "events" {
        debug!(
            "ignoring {} on {:?}, not an events insert",
            payload.operation, payload.table
        );
        return Ok(HookOutcome::Ignored);
    }
    let record = payload
        .record
        .ok_or_else(|| AmpaError::InvalidPayload("payload carries no record".to_string()))?;
    let record: EventRecord = serde_json::from_value(record)
        .map_err(|e| AmpaError::InvalidPayload(format!("malformed event record: {e}")))?;
    let event = record.into_event()?;
    let summary = announce(directory, mailer, &event).await?;
    Ok(HookOutcome::Processed(summary))
}

pub async fn run_job(sctx: SharedCtx, config: AnnounceConfig) -> AmpaResult<AnnounceSummary> {
    announce_event(sctx.client(), sctx.mailer(), config.event_id).await
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_support::*;
    use chrono::TimeZone;

    fn insert_payload(record: Option<serde_json::Value>) -> InsertPayload {
        InsertPayload {
            operation: "INSERT".to_string(),
            table: "events".to_string(),
            record,
        }
    }

    fn full_record(event: &Event) -> serde_json::Value {
        serde_json::to_value(event).unwrap()
    }

    #[tokio::test]
    async fn non_insert_payloads_are_ignored() {
        let dir = MemoryDirectory::default();
        let mailer = RecordingMailer::default();
        let payload = InsertPayload {
            operation: "UPDATE".to_string(),
            table: "events".to_string(),
            record: None,
        };
        let outcome = process_insert_hook(&dir, &mailer, payload).await.unwrap();
        assert_eq!(outcome, HookOutcome::Ignored);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn other_tables_are_ignored() {
        let dir = MemoryDirectory::default();
        let mailer = RecordingMailer::default();
        let payload = InsertPayload {
            operation: "INSERT".to_string(),
            table: "fees".to_string(),
            record: None,
        };
        let outcome = process_insert_hook(&dir, &mailer, payload).await.unwrap();
        assert_eq!(outcome, HookOutcome::Ignored);
    }

    #[tokio::test]
    async fn missing_record_is_invalid() {
        let dir = MemoryDirectory::default();
        let mailer = RecordingMailer::default();
        let err = process_insert_hook(&dir, &mailer, insert_payload(None))
            .await
            .unwrap_err();
        assert!(matches!(err, AmpaError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn record_without_title_is_invalid() {
        let dir = MemoryDirectory::default();
        let mailer = RecordingMailer::default();
        let record = serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "event_date": "2024-02-02T10:00:00Z",
        });
        let err = process_insert_hook(&dir, &mailer, insert_payload(Some(record)))
            .await
            .unwrap_err();
        assert!(matches!(err, AmpaError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn insert_announces_to_resolved_recipients() {
        let event = event_on(
            "Bake Sale",
            Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap(),
        );
        let dir = MemoryDirectory {
            profiles: vec![
                parent(Some("a@x.com")),
                parent(Some("b@x.com")),
                admin("z@x.com"),
            ],
            ..Default::default()
        };
        let mailer = RecordingMailer::default();
        let payload = insert_payload(Some(full_record(&event)));
        let outcome = process_insert_hook(&dir, &mailer, payload).await.unwrap();
        assert_eq!(
            outcome,
            HookOutcome::Processed(AnnounceSummary {
                emails_sent: 2,
                email_errors: 0,
            })
        );
        assert_eq!(mailer.sent()[0].subject, "New School Event: Bake Sale");
    }

    #[tokio::test]
    async fn announcing_a_missing_event_errors() {
        let dir = MemoryDirectory::default();
        let mailer = RecordingMailer::default();
        let err = announce_event(&dir, &mailer, uuid::Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AmpaError::ObjectNotFound(_, _)));
    }

    #[tokio::test]
    async fn send_failures_are_counted_per_recipient() {
        let event = event_on(
            "Bake Sale",
            Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap(),
        );
        let dir = MemoryDirectory {
            events: vec![event.clone()],
            profiles: vec![parent(Some("a@x.com")), parent(Some("b@x.com"))],
            ..Default::default()
        };
        let mailer = RecordingMailer {
            fail_to: vec!["b@x.com".to_string()],
            ..Default::default()
        };
        let summary = announce_event(&dir, &mailer, event.id).await.unwrap();
        assert_eq!(summary.emails_sent, 1);
        assert_eq!(summary.email_errors, 1);
    }
}
