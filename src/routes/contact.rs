use crate::domain::{ContactEmail, ContactSubmission, ContactSubmissionError};
use crate::email::{Email, SendEmailError};
use crate::notification::NotificationEmail;
use crate::routes::{error_chain_fmt, ErrorResponse};
use rocket::http::{Method, Status};
use rocket::response::status::Custom;
use rocket::response::Responder;
use rocket::route::{Handler, Outcome, Route};
use rocket::serde::json::{self, Json};
use rocket::{Data, Request, State};
use std::io;
use std::sync::Arc;
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct ContactFormData {
    #[serde(rename = "naam")]
    name: Option<String>,
    email: Option<String>,
    #[serde(rename = "telefoon")]
    phone: Option<String>,
    #[serde(rename = "onderwerp")]
    subject: Option<String>,
    #[serde(rename = "bericht")]
    message: Option<String>,
}

impl TryFrom<ContactFormData> for ContactSubmission {
    type Error = ContactSubmissionError;

    fn try_from(form: ContactFormData) -> Result<Self, Self::Error> {
        ContactSubmission::parse(
            form.name,
            form.email,
            form.phone,
            form.subject,
            form.message,
        )
    }
}

#[derive(serde::Serialize)]
pub struct ContactResponse {
    success: bool,
}

/// Everything a contact request needs besides its body. Managed by Rocket,
/// shared read-only between requests.
pub struct ContactRelay {
    recipient: ContactEmail,
    email_client: Option<Arc<dyn Email>>,
}

impl ContactRelay {
    pub fn new(recipient: ContactEmail, email_client: Option<Arc<dyn Email>>) -> Self {
        Self {
            recipient,
            email_client,
        }
    }

    #[tracing::instrument(name = "Deliver the contact notification", skip(self, submission))]
    pub async fn deliver(&self, submission: &ContactSubmission) -> Result<(), ContactError> {
        let email_client = self
            .email_client
            .as_ref()
            .ok_or(ContactError::NotConfigured)?;
        let email = NotificationEmail::new(submission, self.recipient.clone())?;
        email_client
            .send_email(&email)
            .await
            .map_err(|error| match error {
                SendEmailError::Unexpected(error) => ContactError::UnexpectedError(error),
                rejected => ContactError::DeliveryFailed(rejected),
            })
    }
}

#[tracing::instrument(
    name = "Relaying a contact form submission",
    skip(body, relay),
    fields(request_id = %Uuid::new_v4())
)]
#[post("/contact", data = "<body>")]
pub async fn submit_contact(
    body: Result<Json<ContactFormData>, json::Error<'_>>,
    relay: &State<ContactRelay>,
) -> Result<Json<ContactResponse>, ContactError> {
    let submission: ContactSubmission = match body {
        Ok(form) => form.into_inner().try_into()?,
        // Rocket reports a body cut off at the `json` limit as an EOF error.
        Err(json::Error::Io(error)) if error.kind() == io::ErrorKind::UnexpectedEof => {
            return Err(ContactError::PayloadTooLarge);
        }
        Err(json::Error::Io(error)) => {
            return Err(anyhow::Error::new(error)
                .context("Failed to read the contact form body.")
                .into());
        }
        Err(error) => {
            tracing::warn!(error = %error, "The contact form body could not be parsed.");
            return Err(ContactSubmissionError::FieldsMissing.into());
        }
    };
    relay.deliver(&submission).await?;
    Ok(Json(ContactResponse { success: true }))
}

#[derive(Clone)]
struct MethodNotAllowed;

#[rocket::async_trait]
impl Handler for MethodNotAllowed {
    async fn handle<'r>(&self, request: &'r Request<'_>, _data: Data<'r>) -> Outcome<'r> {
        Outcome::from(request, ContactError::MethodNotAllowed)
    }
}

/// Answers every other method on the contact path with 405, so they do not
/// fall through to the 404 catcher.
pub fn contact_method_not_allowed() -> Vec<Route> {
    [
        Method::Get,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Options,
    ]
    .into_iter()
    .map(|method| Route::new(method, "/contact", MethodNotAllowed))
    .collect()
}

/// `Display` is what the visitor gets to see; the source chain is logged.
#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error(transparent)]
    ValidationError(#[from] ContactSubmissionError),
    #[error("Bericht is te lang.")]
    PayloadTooLarge,
    #[error("Email service not configured.")]
    NotConfigured,
    #[error("Email versturen mislukt.")]
    DeliveryFailed(#[source] SendEmailError),
    #[error("Er ging iets mis.")]
    UnexpectedError(#[from] anyhow::Error),
}

impl ContactError {
    fn status(&self) -> Status {
        match self {
            ContactError::MethodNotAllowed => Status::MethodNotAllowed,
            ContactError::ValidationError(_) => Status::BadRequest,
            ContactError::PayloadTooLarge => Status::PayloadTooLarge,
            ContactError::NotConfigured
            | ContactError::DeliveryFailed(_)
            | ContactError::UnexpectedError(_) => Status::InternalServerError,
        }
    }
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl<'r> Responder<'r, 'static> for ContactError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        let status = self.status();
        if status.code >= 500 {
            tracing::error!(
                error.cause_chain = ?self,
                "Failed to relay a contact form submission."
            );
        } else {
            tracing::warn!(error.cause_chain = ?self, "Rejected a contact form submission.");
        }
        Custom(status, Json(ErrorResponse::new(self.to_string()))).respond_to(request)
    }
}
