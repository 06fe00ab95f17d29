use async_trait::async_trait;

use crate::domain::email::Email;

/// Port trait for the mail-delivery collaborator.
///
/// Rendering happens on the provider side: callers hand over a template
/// name and its variables, not a finished body. Delivery is best-effort
/// from this core's perspective.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        template: &str,
        variables: serde_json::Value,
    ) -> Result<(), String>;
}
