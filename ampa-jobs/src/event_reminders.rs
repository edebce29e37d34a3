use ampa_core::config::Configuration;
use ampa_core::error::AmpaResult;
use ampa_mail::EmailService;
use ampa_models::AssociationDirectory;
use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::recipients::resolve_recipients;
use crate::SharedCtx;

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone)]
pub struct ReminderConfig {
    /// Day offsets before an event at which a reminder fires. Offsets are
    /// processed independently; an event sitting in two overlapping windows
    /// is reminded once per window.
    pub intervals: Vec<i64>,
    #[serde(default)]
    pub now_override: Option<DateTime<Utc>>,
}

impl ReminderConfig {
    pub fn from_app_config(config: &Configuration) -> Self {
        Self {
            intervals: config.reminder_intervals.clone(),
            now_override: None,
        }
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            intervals: vec![21, 7, 1],
            now_override: None,
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderSummary {
    pub events_checked: u64,
    pub emails_sent: u64,
    pub email_errors: u64,
    /// Events dropped because their row was malformed or their recipients
    /// could not be resolved.
    pub events_skipped: u64,
    /// Day offsets whose event lookup failed outright.
    pub offsets_failed: u64,
}

/// The calendar day exactly `days_before` days after `now`, as a half-open
/// `[start, end)` UTC window. Day boundaries are always computed in UTC; a
/// deployment-local zone would shift which events match between deployments.
pub fn reminder_window(now: DateTime<Utc>, days_before: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now.date_naive().and_time(NaiveTime::MIN).and_utc() + Duration::days(days_before);
    (start, start + Duration::days(1))
}

/// One full reminder pass over every configured offset.
///
/// Nothing in here aborts the pass: a failed window query skips that offset,
/// a malformed event or failed resolution skips that event, a failed send
/// skips that recipient. Everything is counted and surfaced in the summary.
pub async fn run_reminder_pass<D, M>(
    directory: &D,
    mailer: &M,
    config: &ReminderConfig,
    now: DateTime<Utc>,
) -> ReminderSummary
where
    D: AssociationDirectory + Sync,
    M: EmailService + Sync,
{
    let mut summary = ReminderSummary::default();
    for days_before in &config.intervals {
        let (start, end) = reminder_window(now, *days_before);
        debug!(
            "checking events between {} and {} for the {}-day reminder",
            start, end, days_before
        );
        let events = match directory.events_in_window(start, end).await {
            Ok(events) => events,
            Err(e) => {
                error!(
                    "event lookup for the {}-day reminder failed: {}",
                    days_before, e
                );
                summary.offsets_failed += 1;
                continue;
            }
        };
        if events.is_empty() {
            debug!("no events found for the {}-day reminder", days_before);
            continue;
        }
        summary.events_checked += events.len() as u64;
        for event in events {
            if !event.is_wellformed() {
                warn!("skipping malformed event row {}", event.id);
                summary.events_skipped += 1;
                continue;
            }
            let recipients = match resolve_recipients(directory, &event).await {
                Ok(recipients) => recipients,
                Err(e) => {
                    error!("could not resolve recipients for event {}: {}", event.id, e);
                    summary.events_skipped += 1;
                    continue;
                }
            };
            if recipients.is_empty() {
                continue;
            }
            for email in &recipients {
                match mailer.send_event_reminder(email, &event).await {
                    Ok(_) => summary.emails_sent += 1,
                    Err(e) => {
                        error!(
                            "failed to send reminder for event {} to {}: {}",
                            event.id, email, e
                        );
                        summary.email_errors += 1;
                    }
                }
            }
        }
    }
    summary
}

pub async fn run_job(sctx: SharedCtx, config: ReminderConfig) -> AmpaResult<ReminderSummary> {
    let now = config.now_override.unwrap_or_else(Utc::now);
    info!("Starting reminder pass as of {}", now);
    let summary = run_reminder_pass(sctx.client(), sctx.mailer(), &config, now).await;
    info!(
        "Reminder pass finished. Events checked: {}. Emails sent: {}. Errors: {}.",
        summary.events_checked, summary.emails_sent, summary.email_errors
    );
    Ok(summary)
}
