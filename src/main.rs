use anyhow::Context;
use innovah::configuration::get_configuration;
use innovah::email::{Email, MailgunEmailClient};
use innovah::startup::Application;
use innovah::telemetry::{get_subscriber, init_subscriber};
use std::sync::Arc;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("innovah".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let email_client = MailgunEmailClient::new(&configuration.email_client)
        .map(|client| Arc::new(client) as Arc<dyn Email>);

    let application = Application::build(&configuration, email_client).await?;
    application.server.launch().await?;
    Ok(())
}
