#![cfg(test)]
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::errors::ServiceError;
use crate::mail::MailService;

/// Mailer that forwards every `(subject, message)` to a channel.
pub struct ChannelMailService {
    tx: mpsc::UnboundedSender<(String, String)>,
}

impl ChannelMailService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(String, String)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl MailService for ChannelMailService {
    async fn send(&self, subject: &str, message: &str) -> Result<(), ServiceError> {
        self.tx
            .send((subject.to_string(), message.to_string()))
            .map_err(|e| ServiceError::Mail(e.to_string()))
    }
}

/// Mailer that always errors.
pub struct FailingMailService;

#[async_trait]
impl MailService for FailingMailService {
    async fn send(&self, _subject: &str, _message: &str) -> Result<(), ServiceError> {
        Err(ServiceError::Mail("smtp unavailable".into()))
    }
}

pub async fn recv_mail(rx: &mut mpsc::UnboundedReceiver<(String, String)>) -> Option<(String, String)> {
    tokio::time::timeout(Duration::from_secs(1), rx.recv()).await.ok().flatten()
}
