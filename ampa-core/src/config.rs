use std::str::FromStr;

use crate::app::DBPool;
use crate::error::AmpaResult;

fn default_listen_on() -> std::net::SocketAddr {
    std::net::SocketAddr::from_str("127.0.0.1:8000").unwrap()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_mail_from() -> String {
    "AMPA Portal <noreply@example.com>".to_string()
}

fn default_reminder_intervals() -> Vec<i64> {
    vec![21, 7, 1]
}

#[derive(serde::Deserialize, serde::Serialize, Clone, securefmt::Debug)]
pub struct Configuration {
    pub database_url: url::Url,
    #[serde(default = "default_listen_on")]
    pub listen_on: std::net::SocketAddr,
    /// Shared secret the cron invoker must present as a bearer token.
    /// When unset the trigger endpoint is open (development deployments).
    #[serde(skip_serializing)]
    #[sensitive]
    pub(crate) cron_secret: Option<String>,
    /// Shared secret for the database insert webhook.
    #[serde(skip_serializing)]
    #[sensitive]
    pub(crate) webhook_secret: Option<String>,
    /// Day offsets before an event at which a reminder pass fires.
    #[serde(default = "default_reminder_intervals")]
    pub reminder_intervals: Vec<i64>,
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    #[serde(skip_serializing)]
    #[sensitive]
    pub(crate) smtp_password: Option<String>,
    #[serde(skip_serializing)]
    #[sensitive]
    pub(crate) resend_api_key: Option<String>,
    #[serde(default = "default_mail_from")]
    pub mail_from: String,
    pub mail_reply_to: Option<String>,
    pub proxy: Option<url::Url>,
    #[serde(skip)]
    #[sensitive]
    pub(crate) alt_dbconn: Option<DBPool>,
}

impl Configuration {
    pub fn from_env() -> AmpaResult<Self> {
        Ok(envy::from_env::<Configuration>()?)
    }

    pub async fn db_conn(&self) -> AmpaResult<DBPool> {
        if let Some(pool) = &self.alt_dbconn {
            return Ok(pool.clone());
        }
        let opts = sqlx::postgres::PgConnectOptions::from_str(self.database_url.as_str())?
            .application_name(&crate::package_full());
        let pool = sqlx::postgres::PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect_with(opts)
            .await?;
        Ok(pool)
    }

    pub fn cron_secret(&self) -> Option<&str> {
        self.cron_secret.as_deref()
    }

    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret.as_deref()
    }

    pub fn smtp_password(&self) -> Option<&str> {
        self.smtp_password.as_deref()
    }

    pub fn resend_api_key(&self) -> Option<&str> {
        self.resend_api_key.as_deref()
    }

    pub fn set_alt_dbconn(&mut self, db: DBPool) {
        self.alt_dbconn = Some(db);
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            database_url: url::Url::from_str("postgres://localhost/ampa").unwrap(),
            listen_on: default_listen_on(),
            cron_secret: None,
            webhook_secret: None,
            reminder_intervals: default_reminder_intervals(),
            smtp_host: None,
            smtp_port: default_smtp_port(),
            smtp_username: None,
            smtp_password: None,
            resend_api_key: None,
            mail_from: default_mail_from(),
            mail_reply_to: None,
            proxy: None,
            alt_dbconn: None,
        }
    }
}
