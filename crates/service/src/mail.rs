use async_trait::async_trait;
use tracing::info;

use crate::errors::ServiceError;

/// Outbound notification sink. Callers fire and forget; results are only logged.
#[async_trait]
pub trait MailService: Send + Sync {
    async fn send(&self, subject: &str, message: &str) -> Result<(), ServiceError>;
}

/// Development mailer: "delivers" by emitting a structured log event.
#[derive(Clone, Debug)]
pub struct LocalMailService {
    mail_to: String,
    mail_from: String,
}

impl LocalMailService {
    pub fn new(mail_to: impl Into<String>, mail_from: impl Into<String>) -> Self {
        Self { mail_to: mail_to.into(), mail_from: mail_from.into() }
    }
}

#[async_trait]
impl MailService for LocalMailService {
    async fn send(&self, subject: &str, message: &str) -> Result<(), ServiceError> {
        info!(
            event = "mail_sent",
            mailer = "local",
            from = %self.mail_from,
            to = %self.mail_to,
            subject,
            message,
            "mail sent"
        );
        Ok(())
    }
}
