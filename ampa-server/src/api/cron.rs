use ampa_core::error::AmpaResult;
use ampa_core::state::AmpaState;
use ampa_jobs::event_reminders::{run_reminder_pass, ReminderConfig, ReminderSummary};
use ampa_mail::Mailer;
use axum::headers::authorization::Bearer;
use axum::headers::Authorization;
use axum::routing::get;
use axum::{Extension, Json, Router, TypedHeader};
use chrono::Utc;

use crate::api::authorize_shared_secret;

pub fn setup_cron(router: Router) -> Router {
    router.route("/api/cron/send-event-reminders", get(send_event_reminders))
}

#[derive(serde::Serialize)]
pub struct ReminderRunResponse {
    message: &'static str,
    summary: ReminderSummary,
}

/// Trigger for the daily reminder pass; the production deployment points an
/// external cron at this route. The authorization check runs before any read
/// or send happens.
pub async fn send_event_reminders(
    Extension(state): Extension<AmpaState>,
    Extension(mailer): Extension<Mailer>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
) -> AmpaResult<Json<ReminderRunResponse>> {
    authorize_shared_secret(
        state.config.cron_secret(),
        auth.as_ref().map(|TypedHeader(a)| a.token()),
    )?;
    info!("Cron trigger: send-event-reminders");
    let client = state.get_db_client().await?;
    let config = ReminderConfig::from_app_config(&state.config);
    let summary = run_reminder_pass(&client, &mailer, &config, Utc::now()).await;
    info!(
        "Cron pass finished. Events checked: {}. Emails sent: {}. Errors: {}.",
        summary.events_checked, summary.emails_sent, summary.email_errors
    );
    Ok(Json(ReminderRunResponse {
        message: "Reminder pass executed.",
        summary,
    }))
}
