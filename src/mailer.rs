use crate::types::{DigestError, Result};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::env;
use tracing::info;

/// Outbound delivery seam. Production sends over SMTP; tests substitute a
/// recording double.
pub trait Deliver {
    fn deliver(&self, subject: &str, html_body: &str) -> Result<()>;
}

/// Mail account and recipient. All values are environment-provided secrets
/// and must never appear in logs.
#[derive(Clone)]
pub struct MailConfig {
    pub server: String,
    pub username: String,
    pub password: String,
    pub recipient: String,
}

impl MailConfig {
    /// Reads `SMTP_SERVER`, `SMTP_USERNAME`, `SMTP_PASSWORD`, and
    /// `DIGEST_RECIPIENT` from the environment. The recipient defaults to the
    /// account address when unset.
    pub fn from_env() -> Result<Self> {
        let server = env::var("SMTP_SERVER").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let username = env::var("SMTP_USERNAME")
            .map_err(|_| DigestError::Mail("SMTP_USERNAME is not set".to_string()))?;
        let password = env::var("SMTP_PASSWORD")
            .map_err(|_| DigestError::Mail("SMTP_PASSWORD is not set".to_string()))?;
        let recipient = env::var("DIGEST_RECIPIENT").unwrap_or_else(|_| username.clone());

        Ok(Self {
            server,
            username,
            password,
            recipient,
        })
    }
}

pub struct SmtpMailer {
    config: MailConfig,
}

impl SmtpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }
}

impl Deliver for SmtpMailer {
    fn deliver(&self, subject: &str, html_body: &str) -> Result<()> {
        let message = Message::builder()
            .from(self
                .config
                .username
                .parse()
                .map_err(|e| DigestError::Mail(format!("Invalid sender address: {}", e)))?)
            .to(self
                .config
                .recipient
                .parse()
                .map_err(|e| DigestError::Mail(format!("Invalid recipient address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| DigestError::Mail(format!("Failed to build message: {}", e)))?;

        let mailer = SmtpTransport::relay(&self.config.server)
            .map_err(|e| DigestError::Mail(format!("SMTP relay setup failed: {}", e)))?
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .build();

        mailer
            .send(&message)
            .map_err(|e| DigestError::Mail(format!("SMTP send failed: {}", e)))?;

        info!("Digest email sent");
        Ok(())
    }
}

/// Writes the rendered document to stdout instead of sending it, for
/// inspecting a run without SMTP credentials.
pub struct StdoutMailer;

impl Deliver for StdoutMailer {
    fn deliver(&self, _subject: &str, html_body: &str) -> Result<()> {
        println!("{}", html_body);
        Ok(())
    }
}
