use crate::domain::{ContactEmail, ContactSubmission};
use anyhow::Context;

const SUBJECT_PREFIX: &str = "[Innovah Website] Nieuw bericht: ";
const BODY_TEMPLATE: &str = include_str!("../templates/contact_notification.html");

/// The message delivered to the administrative mailbox for one submission.
#[derive(Debug, Clone)]
pub struct NotificationEmail {
    pub recipient: ContactEmail,
    pub reply_to: ContactEmail,
    pub subject: String,
    pub html_content: String,
}

impl NotificationEmail {
    pub fn new(
        submission: &ContactSubmission,
        recipient: ContactEmail,
    ) -> Result<NotificationEmail, anyhow::Error> {
        Ok(NotificationEmail {
            recipient,
            reply_to: submission.email.clone(),
            subject: format!("{}{}", SUBJECT_PREFIX, submission.subject.as_ref()),
            html_content: render_body(submission)?,
        })
    }
}

fn render_body(submission: &ContactSubmission) -> Result<String, anyhow::Error> {
    let mut context = tera::Context::new();
    context.insert("name", &submission.name);
    context.insert("email", submission.email.as_ref());
    context.insert("phone", &submission.phone);
    context.insert("subject", submission.subject.as_ref());
    context.insert("message", submission.message.as_ref());

    tera::Tera::one_off(BODY_TEMPLATE, &context, true)
        .context("Failed to render the contact notification body.")
}
