#[macro_use]
extern crate tracing;

pub mod event_reminders;
pub mod new_event_notification;
pub mod recipients;

use ampa_core::config::Configuration;
use ampa_mail::Mailer;
use ampa_models::Client;
use tokio_cron_scheduler::{Job, JobScheduler};

#[derive(Clone, Debug)]
pub struct SharedCtx {
    client: Client,
    config: Configuration,
    mailer: Mailer,
}

impl SharedCtx {
    pub fn new(client: Client, config: Configuration, mailer: Mailer) -> Self {
        Self {
            client,
            config,
            mailer,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn mailer(&self) -> &Mailer {
        &self.mailer
    }
}

/// Daily at 09:00 UTC, the schedule the external cron used before this
/// service owned it.
const REMINDER_SCHEDULE: &str = "0 0 9 * * * *";

pub async fn scheduler(sctx: SharedCtx) -> ! {
    let mut sched = JobScheduler::new();

    {
        let sctx = sctx.clone();
        sched
            .add(
                Job::new(REMINDER_SCHEDULE, move |uuid, _l| {
                    info!("Starting event_reminders job on scheduler UUID {}", uuid);
                    let sctx = sctx.clone();
                    tokio::spawn(async move {
                        let config = event_reminders::ReminderConfig::from_app_config(
                            sctx.config(),
                        );
                        match event_reminders::run_job(sctx, config).await {
                            Ok(summary) => info!("event_reminders finished: {:?}", summary),
                            Err(e) => error!("event_reminders failed: {}", e),
                        }
                    });
                })
                .expect("could not create job"),
            )
            .expect("could not add job to scheduler");
    }

    info!("Starting scheduler");
    sched.start().await.expect("scheduler failed");
    error!("scheduler exited");
    drop(sched);
    panic!("returned from scheduler");
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::str::FromStr;
    use std::sync::Mutex;

    use ampa_mail::{AmpaMailError, EmailService, Result as MailResult, SendOutcome};
    use ampa_models::{
        AmpaModelError, AssociationDirectory, Event, EventRecipient, Profile, ProfileRole,
        Student, StudentParentEmail,
    };
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    /// In-memory stand-in for the association database. Rows live in plain
    /// vectors; the join semantics mirror the SQL exactly (inner join on the
    /// parent profile, nullable email).
    #[derive(Default)]
    pub struct MemoryDirectory {
        pub events: Vec<Event>,
        pub targets: Vec<EventRecipient>,
        pub students: Vec<Student>,
        pub profiles: Vec<Profile>,
        pub fail_targets_for: Vec<Uuid>,
        pub fail_window_starts: Vec<DateTime<Utc>>,
        pub fail_profiles: bool,
    }

    #[async_trait::async_trait]
    impl AssociationDirectory for MemoryDirectory {
        async fn event(&self, id: Uuid) -> Result<Option<Event>, AmpaModelError> {
            Ok(self.events.iter().find(|e| e.id == id).cloned())
        }

        async fn events_in_window(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<Vec<Event>, AmpaModelError> {
            if self.fail_window_starts.contains(&start) {
                return Err(AmpaModelError::Other("window query failed".to_string()));
            }
            Ok(self
                .events
                .iter()
                .filter(|e| e.event_date >= start && e.event_date < end)
                .cloned()
                .collect())
        }

        async fn event_targets(
            &self,
            event_id: Uuid,
        ) -> Result<Vec<EventRecipient>, AmpaModelError> {
            if self.fail_targets_for.contains(&event_id) {
                return Err(AmpaModelError::Other("targets query failed".to_string()));
            }
            Ok(self
                .targets
                .iter()
                .filter(|t| t.event_id == event_id)
                .cloned()
                .collect())
        }

        async fn student_parent_emails(
            &self,
            class_ids: &[i64],
        ) -> Result<Vec<StudentParentEmail>, AmpaModelError> {
            Ok(self
                .students
                .iter()
                .filter(|s| class_ids.contains(&s.class_id))
                .filter_map(|s| {
                    let profile = self.profiles.iter().find(|p| p.id == s.parent_id)?;
                    Some(StudentParentEmail {
                        student_id: s.id,
                        class_id: s.class_id,
                        email: profile.email.clone(),
                    })
                })
                .collect())
        }

        async fn profiles_by_role(
            &self,
            role: ProfileRole,
        ) -> Result<Vec<Profile>, AmpaModelError> {
            if self.fail_profiles {
                return Err(AmpaModelError::Other("profiles query failed".to_string()));
            }
            Ok(self
                .profiles
                .iter()
                .filter(|p| {
                    ProfileRole::from_str(&p.role)
                        .map(|r| r == role)
                        .unwrap_or(false)
                })
                .cloned()
                .collect())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SentMail {
        pub to: String,
        pub subject: String,
    }

    #[derive(Default)]
    pub struct RecordingMailer {
        pub outbox: Mutex<Vec<SentMail>>,
        pub fail_to: Vec<String>,
    }

    impl RecordingMailer {
        pub fn sent(&self) -> Vec<SentMail> {
            self.outbox.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl EmailService for RecordingMailer {
        async fn send(
            &self,
            to: &str,
            subject: &str,
            _html_body: &str,
            _text_body: &str,
        ) -> MailResult<SendOutcome> {
            if self.fail_to.iter().any(|f| f == to) {
                return Err(AmpaMailError::Api("injected send failure".to_string()));
            }
            self.outbox.lock().unwrap().push(SentMail {
                to: to.to_string(),
                subject: subject.to_string(),
            });
            Ok(SendOutcome::Sent)
        }
    }

    pub fn event_on(title: &str, date: DateTime<Utc>) -> Event {
        let created = Utc.with_ymd_and_hms(2023, 12, 1, 8, 0, 0).unwrap();
        Event {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            event_date: date,
            created_at: created,
            updated_at: created,
            created_by: None,
        }
    }

    pub fn parent(email: Option<&str>) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            email: email.map(|e| e.to_string()),
            full_name: None,
            role: "parent".to_string(),
        }
    }

    pub fn admin(email: &str) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            full_name: None,
            role: "admin".to_string(),
        }
    }

    pub fn student(id: i64, class_id: i64, parent_id: Uuid) -> Student {
        Student {
            id,
            name: format!("Student {id}"),
            class_id,
            parent_id,
        }
    }

    pub fn target(event_id: Uuid, class_id: i64) -> EventRecipient {
        EventRecipient { event_id, class_id }
    }
}
