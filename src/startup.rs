use crate::catchers::*;
use crate::configuration::Settings;
use crate::email::Email;
use crate::port_saver;
use crate::port_saver::Port;
use crate::routes::*;
use rocket::config::LogLevel;
use rocket::{Config, Ignite, Rocket};
use std::sync::Arc;

pub struct Application {
    pub server: Rocket<Ignite>,
    pub port: Port,
}

impl Application {
    /// `email_client` is `None` when no provider credentials are configured;
    /// the server still starts and refuses contact submissions.
    pub async fn build(
        configuration: &Settings,
        email_client: Option<Arc<dyn Email>>,
    ) -> Result<Application, anyhow::Error> {
        let recipient = configuration
            .contact
            .recipient()
            .map_err(anyhow::Error::msg)?;
        if email_client.is_none() {
            tracing::warn!("Mailgun is not configured, contact submissions will not be delivered.");
        }

        let (port_saver, port) = port_saver::create_pair();
        let server = rocket::custom(Config {
            address: configuration.application.host,
            port: configuration.application.port.unwrap_or(0),
            // Rocket's records still reach the tracing subscriber through `log`.
            log_level: LogLevel::Off,
            ..Config::default()
        })
        .attach(port_saver)
        .manage(ContactRelay::new(recipient, email_client))
        .mount("/", routes![health_check])
        .mount("/api", routes![submit_contact])
        .mount("/api", contact_method_not_allowed())
        .register("/", catchers![not_found, json_fallback])
        .ignite()
        .await?;

        Ok(Application { server, port })
    }
}
