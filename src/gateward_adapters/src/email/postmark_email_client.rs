use gateward_core::{Email, EmailClient};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending templated email", skip_all)]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        template: &str,
        variables: serde_json::Value,
    ) -> Result<(), String> {
        let base = Url::parse(&self.base_url).map_err(|e| e.to_string())?;
        let url = base.join("/email/withTemplate").map_err(|e| e.to_string())?;

        // The provider renders the template; the subject travels as part
        // of the template model.
        let mut template_model = variables;
        if let serde_json::Value::Object(ref mut model) = template_model {
            model.insert(
                "subject".to_owned(),
                serde_json::Value::String(subject.to_owned()),
            );
        }

        let request_body = SendTemplatedEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            template_alias: template,
            template_model,
            message_stream: MESSAGE_STREAM,
        };

        let request = self
            .http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body);

        request
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendTemplatedEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    template_alias: &'a str,
    template_model: serde_json::Value,
    message_stream: &'a str,
}
