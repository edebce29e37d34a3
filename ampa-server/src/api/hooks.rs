use ampa_core::error::AmpaResult;
use ampa_core::state::AmpaState;
use ampa_jobs::new_event_notification::{process_insert_hook, HookOutcome, InsertPayload};
use ampa_mail::Mailer;
use axum::headers::authorization::Bearer;
use axum::headers::Authorization;
use axum::routing::post;
use axum::{Extension, Json, Router, TypedHeader};

use crate::api::authorize_shared_secret;

pub fn setup_hooks(router: Router) -> Router {
    router.route("/api/hooks/new-event", post(new_event))
}

/// Receiver for the database insert webhook on the events table. New rows
/// fan out as announcement emails; anything else is acknowledged untouched.
pub async fn new_event(
    Extension(state): Extension<AmpaState>,
    Extension(mailer): Extension<Mailer>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Json(payload): Json<InsertPayload>,
) -> AmpaResult<Json<serde_json::Value>> {
    authorize_shared_secret(
        state.config.webhook_secret(),
        auth.as_ref().map(|TypedHeader(a)| a.token()),
    )?;
    let client = state.get_db_client().await?;
    match process_insert_hook(&client, &mailer, payload).await? {
        HookOutcome::Ignored => Ok(Json(serde_json::json!({
            "message": "Ignoring non-INSERT event or wrong table"
        }))),
        HookOutcome::Processed(summary) => Ok(Json(serde_json::json!({
            "message": "Notifications processed.",
            "summary": summary,
        }))),
    }
}
