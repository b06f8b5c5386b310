mod mailgun_email_client;

use crate::notification::NotificationEmail;
use crate::routes::error_chain_fmt;
use async_trait::async_trait;
pub use mailgun_email_client::MailgunEmailClient;

#[async_trait]
pub trait Email: Send + Sync {
    async fn send_email(&self, email: &NotificationEmail) -> Result<(), SendEmailError>;
}

#[derive(thiserror::Error)]
pub enum SendEmailError {
    #[error("The email provider answered with status {status}: {detail}")]
    Rejected { status: u16, detail: String },
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for SendEmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
