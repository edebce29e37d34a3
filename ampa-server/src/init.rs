use ampa_core::config::Configuration;
use ampa_core::error::{AmpaError, AmpaResult};
use ampa_core::http_client;
use ampa_mail::{Mailer, Resend, Sink, Smtp};
use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Picks the strongest transport the configuration allows: SMTP relay, then
/// the Resend HTTP API, then the logging sink.
pub fn build_mailer(config: &Configuration) -> AmpaResult<Mailer> {
    let from: ampa_mail::Mailbox = config
        .mail_from
        .parse()
        .map_err(|e| AmpaError::Other(format!("invalid mail_from address: {e}")))?;
    let reply_to = match &config.mail_reply_to {
        Some(reply_to) => reply_to
            .parse()
            .map_err(|e| AmpaError::Other(format!("invalid mail_reply_to address: {e}")))?,
        None => from.clone(),
    };
    if let Some(host) = &config.smtp_host {
        info!("Sending mail through SMTP relay {}", host);
        let smtp = Smtp::from_relay_parts(
            host,
            config.smtp_port,
            config.smtp_username.clone(),
            config.smtp_password().map(|p| p.to_string()),
            from,
            reply_to,
        )
        .map_err(|e| AmpaError::Other(e.to_string()))?;
        return Ok(Mailer::Smtp(smtp));
    }
    if let Some(api_key) = config.resend_api_key() {
        info!("Sending mail through the Resend API");
        return Ok(Mailer::Resend(Resend::new(
            http_client(config)?,
            api_key.to_string(),
            config.mail_from.clone(),
        )));
    }
    warn!("No mail transport configured. Email sending will be simulated.");
    Ok(Mailer::Sink(Sink))
}
