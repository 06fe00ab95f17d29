use std::sync::Arc;

use gateward_core::{Email, EmailClient};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: Email,
    pub subject: String,
    pub template: String,
    pub variables: serde_json::Value,
}

/// Email client for tests: records every send instead of delivering.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        template: &str,
        variables: serde_json::Value,
    ) -> Result<(), String> {
        self.sent.write().await.push(SentEmail {
            recipient: recipient.clone(),
            subject: subject.to_owned(),
            template: template.to_owned(),
            variables,
        });
        Ok(())
    }
}

/// Email client whose every send fails; exercises the best-effort
/// delivery path.
#[derive(Debug, Clone, Default)]
pub struct FailingEmailClient;

#[async_trait::async_trait]
impl EmailClient for FailingEmailClient {
    async fn send_email(
        &self,
        _recipient: &Email,
        _subject: &str,
        _template: &str,
        _variables: serde_json::Value,
    ) -> Result<(), String> {
        Err("mail provider unavailable".to_owned())
    }
}
