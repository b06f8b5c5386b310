use crate::domain::{ContactEmail, ContactMessage, ContactSubject};

/// A contact form submission that passed every validation step.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: String,
    pub email: ContactEmail,
    pub phone: Option<String>,
    pub subject: ContactSubject,
    pub message: ContactMessage,
}

/// Client input errors. `Display` is the message shown to the visitor.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContactSubmissionError {
    #[error("Naam, email en bericht zijn verplicht.")]
    FieldsMissing,
    #[error("Ongeldig e-mailadres.")]
    InvalidEmail(String),
    #[error("Bericht moet minimaal 10 tekens bevatten.")]
    MessageTooShort(String),
}

impl ContactSubmission {
    /// Checks presence, email shape and message length, in that order.
    /// The first failing check decides the error.
    pub fn parse(
        name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        subject: Option<String>,
        message: Option<String>,
    ) -> Result<ContactSubmission, ContactSubmissionError> {
        let (name, email, message) =
            match (non_empty(name), non_empty(email), non_empty(message)) {
                (Some(name), Some(email), Some(message)) => (name, email, message),
                _ => return Err(ContactSubmissionError::FieldsMissing),
            };
        let email = ContactEmail::parse(email).map_err(ContactSubmissionError::InvalidEmail)?;
        let message =
            ContactMessage::parse(message).map_err(ContactSubmissionError::MessageTooShort)?;

        Ok(ContactSubmission {
            name,
            email,
            phone: non_empty(phone),
            subject: ContactSubject::parse(subject),
            message,
        })
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
