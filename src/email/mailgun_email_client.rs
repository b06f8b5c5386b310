use crate::configuration::EmailClientSettings;
use crate::email::{Email, SendEmailError};
use crate::notification::NotificationEmail;
use anyhow::Context;
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

#[derive(Debug)]
pub struct MailgunEmailClient {
    http_client: reqwest::Client,
    base_url: String,
    domain: String,
    api_key: Secret<String>,
    sender: String,
}

impl MailgunEmailClient {
    /// Returns `None` unless both the API key and the sending domain are set.
    pub fn new(settings: &EmailClientSettings) -> Option<Self> {
        let api_key = settings
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())?;
        let domain = settings.domain.as_ref().filter(|domain| !domain.is_empty())?;

        Some(Self {
            http_client: reqwest::Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            domain: domain.clone(),
            api_key: Secret::new(api_key.expose_secret().clone()),
            sender: format!("{} <noreply@{}>", settings.sender_name, domain),
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/v3/{}/messages", self.base_url, self.domain)
    }
}

#[async_trait]
impl Email for MailgunEmailClient {
    #[tracing::instrument(name = "Send an email through Mailgun", skip(self, email))]
    async fn send_email(&self, email: &NotificationEmail) -> Result<(), SendEmailError> {
        let form = [
            ("from", self.sender.as_str()),
            ("to", email.recipient.as_ref()),
            ("h:Reply-To", email.reply_to.as_ref()),
            ("subject", email.subject.as_str()),
            ("html", email.html_content.as_str()),
        ];

        let response = self
            .http_client
            .post(self.messages_url())
            .basic_auth("api", Some(self.api_key.expose_secret()))
            .form(&form)
            .send()
            .await
            .context("Failed to send the request to Mailgun.")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .context("Failed to read the error response from Mailgun.")?;
            return Err(SendEmailError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(())
    }
}
