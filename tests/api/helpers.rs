use async_trait::async_trait;
use innovah::configuration::{get_configuration, Settings};
use innovah::email::{Email, SendEmailError};
use innovah::notification::NotificationEmail;
use innovah::startup::Application;
use innovah::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".into();
    let subscriber_name = "test".into();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

/// What the recording email client answers once it has stored the email.
#[derive(Clone, Copy)]
pub enum Delivery {
    Accepted,
    Rejected,
    Broken,
}

pub const PROVIDER_DETAIL: &str = "Forbidden: domain mg.test.nl is disabled";

pub struct RecordingEmailClient {
    pub sent_emails: Mutex<Vec<NotificationEmail>>,
    delivery: Delivery,
}

impl RecordingEmailClient {
    fn new(delivery: Delivery) -> Self {
        Self {
            sent_emails: Mutex::new(Vec::new()),
            delivery,
        }
    }
}

#[async_trait]
impl Email for RecordingEmailClient {
    async fn send_email(&self, email: &NotificationEmail) -> Result<(), SendEmailError> {
        self.sent_emails.lock().unwrap().push(email.clone());
        match self.delivery {
            Delivery::Accepted => Ok(()),
            Delivery::Rejected => Err(SendEmailError::Rejected {
                status: 403,
                detail: PROVIDER_DETAIL.into(),
            }),
            Delivery::Broken => Err(anyhow::anyhow!("connection reset by peer").into()),
        }
    }
}

pub struct TestApp {
    pub address: String,
    pub email_client: Arc<RecordingEmailClient>,
}

impl TestApp {
    pub async fn post_contact(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/api/contact", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw_contact(&self, body: &'static str) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/api/contact", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub fn sent_email_count(&self) -> usize {
        self.email_client.sent_emails.lock().unwrap().len()
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Delivery::Accepted).await
}

pub async fn spawn_app_with(delivery: Delivery) -> TestApp {
    let email_client = Arc::new(RecordingEmailClient::new(delivery));
    let address = spawn_server(Some(email_client.clone() as Arc<dyn Email>)).await;
    TestApp {
        address,
        email_client,
    }
}

/// An app whose provider credentials are missing. The recording client is
/// never handed to the server, so it doubles as proof that nothing was sent.
pub async fn spawn_app_without_email_client() -> TestApp {
    let email_client = Arc::new(RecordingEmailClient::new(Delivery::Accepted));
    let address = spawn_server(None).await;
    TestApp {
        address,
        email_client,
    }
}

pub async fn spawn_server(email_client: Option<Arc<dyn Email>>) -> String {
    Lazy::force(&TRACING);

    let configuration = test_configuration();
    let app = Application::build(&configuration, email_client)
        .await
        .expect("Failed to build the application.");
    let Application { server, mut port } = app;
    let _ = tokio::spawn(server.launch());
    format!(
        "http://127.0.0.1:{}",
        port.get().await.expect("The server did not report its port.")
    )
}

pub fn test_configuration() -> Settings {
    let mut c = get_configuration().expect("Failed to read configuration.");
    c.application.port = None;
    c
}
