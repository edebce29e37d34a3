use ampa_core::config::Configuration;
use ampa_core::error::AmpaResult;
use ampa_jobs::{event_reminders, new_event_notification, SharedCtx};
use ampa_models::Client;
use chrono::NaiveTime;

use crate::cli::{RunJobCli, RunJobSelect};

pub async fn run_job(cli: RunJobCli, config: Configuration) -> AmpaResult<()> {
    let db_conn = config.db_conn().await?;
    let client = Client::new(db_conn);
    let mailer = crate::init::build_mailer(&config)?;
    let sctx = SharedCtx::new(client, config.clone(), mailer);
    match cli.job {
        RunJobSelect::EventReminders { date, intervals } => {
            let jconfig = event_reminders::ReminderConfig {
                intervals: if intervals.is_empty() {
                    config.reminder_intervals.clone()
                } else {
                    intervals
                },
                now_override: date.map(|d| d.and_time(NaiveTime::MIN).and_utc()),
            };
            let summary = event_reminders::run_job(sctx, jconfig).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        RunJobSelect::AnnounceEvent { event_id } => {
            let jconfig = new_event_notification::AnnounceConfig { event_id };
            let summary = new_event_notification::run_job(sctx, jconfig).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    info!("Job finished, exiting");
    Ok(())
}
