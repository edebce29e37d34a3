#[macro_use]
extern crate tracing;

use ampa_models::Event;
use chrono::{DateTime, Utc};
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncTransport, Message};
pub use lettre::message::Mailbox;

#[derive(Debug, thiserror::Error)]
pub enum AmpaMailError {
    #[error("Mail Error: {0}")]
    Lettre(#[from] lettre::error::Error),
    #[error("SMTP Error: {0}")]
    SMTPError(#[from] lettre::transport::smtp::Error),
    #[error("Address Error: {0}")]
    AddrError(#[from] lettre::address::AddressError),
    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Mail API Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, AmpaMailError>;

/// Whether a message actually left the building. A deployment without mail
/// credentials reports `Simulated` success so the rest of the system keeps
/// working; callers count both variants as delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    Simulated,
}

pub fn format_event_date(date: &DateTime<Utc>) -> String {
    date.format("%A, %d %B %Y at %H:%M UTC").to_string()
}

#[async_trait::async_trait]
pub trait EmailService {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<SendOutcome>;

    async fn send_event_reminder(&self, to: &str, event: &Event) -> Result<SendOutcome> {
        let date_line = format_event_date(&event.event_date);
        let subject = ampa_common_html::email::event_reminder::subject(&event.title);
        let html = ampa_common_html::email::event_reminder::build(
            &event.title,
            &date_line,
            event.description.as_deref(),
        )
        .into_string();
        let text = ampa_common_html::email::event_reminder::build_txt(
            &event.title,
            &date_line,
            event.description.as_deref(),
        );
        self.send(to, &subject, &html, &text).await
    }

    async fn send_new_event_notice(&self, to: &str, event: &Event) -> Result<SendOutcome> {
        let date_line = format_event_date(&event.event_date);
        let subject = ampa_common_html::email::new_event::subject(&event.title);
        let html = ampa_common_html::email::new_event::build(
            &event.title,
            &date_line,
            event.description.as_deref(),
        )
        .into_string();
        let text = ampa_common_html::email::new_event::build_txt(
            &event.title,
            &date_line,
            event.description.as_deref(),
        );
        self.send(to, &subject, &html, &text).await
    }
}

#[derive(Clone)]
pub struct Smtp {
    transport: lettre::AsyncSmtpTransport<lettre::Tokio1Executor>,
    from: Mailbox,
    reply_to: Mailbox,
}

impl Smtp {
    pub fn new(
        transport: lettre::AsyncSmtpTransport<lettre::Tokio1Executor>,
        from: Mailbox,
        reply_to: Mailbox,
    ) -> Self {
        Self {
            transport,
            from,
            reply_to,
        }
    }

    /// Builds a relay transport from host/port plus optional credentials.
    pub fn from_relay_parts(
        host: &str,
        port: u16,
        username: Option<String>,
        password: Option<String>,
        from: Mailbox,
        reply_to: Mailbox,
    ) -> Result<Self> {
        use lettre::Tokio1Executor;

        let mut builder =
            lettre::AsyncSmtpTransport::<Tokio1Executor>::relay(host)?.port(port);
        if let (Some(username), Some(password)) = (username, password) {
            builder = builder.credentials(Credentials::new(username, password));
        }
        Ok(Self::new(builder.build(), from, reply_to))
    }

    /// Builds a new SMTP Connection against a default MailHog instance
    #[cfg(test)]
    pub fn new_mailhog() -> Self {
        use lettre::Tokio1Executor;

        let transport =
            lettre::AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous("localhost")
                .port(1025)
                .build();
        let from = Mailbox::new(
            Some("MailHog SMTP".to_string()),
            "noreply@example.com".parse().unwrap(),
        );
        let reply_to = Mailbox::new(
            Some("MailHog SMTP".to_string()),
            "noreply@example.com".parse().unwrap(),
        );
        Self::new(transport, from, reply_to)
    }
}

impl std::fmt::Debug for Smtp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Smtp")
            .field("from", &self.from)
            .field("reply_to", &self.reply_to)
            .finish()
    }
}

#[async_trait::async_trait]
impl EmailService for Smtp {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<SendOutcome> {
        let body =
            MultiPart::alternative_plain_html(text_body.to_string(), html_body.to_string());
        let email = Message::builder()
            .from(self.from.clone())
            .reply_to(self.reply_to.clone())
            .to(to.parse()?)
            .date_now()
            .subject(subject)
            .multipart(body)?;
        self.transport.send(email).await?;
        Ok(SendOutcome::Sent)
    }
}

/// Resend HTTP API transport, for deployments that have no SMTP relay and
/// only an API key.
#[derive(Clone)]
pub struct Resend {
    http: reqwest::Client,
    api_key: String,
    from: String,
}

const RESEND_API_URL: &str = "https://api.resend.com/emails";

impl Resend {
    pub fn new(http: reqwest::Client, api_key: String, from: String) -> Self {
        Self {
            http,
            api_key,
            from,
        }
    }
}

impl std::fmt::Debug for Resend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resend").field("from", &self.from).finish()
    }
}

#[async_trait::async_trait]
impl EmailService for Resend {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<SendOutcome> {
        trace!("sending mail to {} via resend", to);
        let response = self
            .http
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "from": self.from,
                "to": [to],
                "subject": subject,
                "html": html_body,
                "text": text_body,
            }))
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error");
            return Err(AmpaMailError::Api(format!("{status}: {message}")));
        }
        Ok(SendOutcome::Sent)
    }
}

/// Transport of last resort: nothing is configured, so log a preview and
/// report simulated success rather than failing every notification pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sink;

#[async_trait::async_trait]
impl EmailService for Sink {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        _text_body: &str,
    ) -> Result<SendOutcome> {
        info!(
            "Simulating email send: to={} subject={:?} body={:?}...",
            to,
            subject,
            html_body.chars().take(100).collect::<String>()
        );
        Ok(SendOutcome::Simulated)
    }
}

#[derive(Clone)]
pub enum Mailer {
    Smtp(Smtp),
    Resend(Resend),
    Sink(Sink),
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let transport = match self {
            Mailer::Smtp(_) => "smtp",
            Mailer::Resend(_) => "resend",
            Mailer::Sink(_) => "sink",
        };
        f.debug_struct("Mailer").field("transport", &transport).finish()
    }
}

#[async_trait::async_trait]
impl EmailService for Mailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<SendOutcome> {
        match self {
            Mailer::Smtp(smtp) => smtp.send(to, subject, html_body, text_body).await,
            Mailer::Resend(resend) => resend.send(to, subject, html_body, text_body).await,
            Mailer::Sink(sink) => sink.send(to, subject, html_body, text_body).await,
        }
    }
}
