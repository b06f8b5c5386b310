use crate::domain::ContactEmail;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_option_number_from_string;
use std::net::IpAddr;

pub enum Environment {
    Local,
    Production,
}

#[derive(serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub contact: ContactSettings,
    pub email_client: EmailClientSettings,
}

#[derive(serde::Deserialize)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub port: Option<u16>,
    pub host: IpAddr,
}

#[derive(serde::Deserialize)]
pub struct ContactSettings {
    pub recipient: String,
}

/// Mailgun credentials are optional here: a deployment without them still
/// starts and answers contact submissions with a configuration error.
#[derive(serde::Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_name: String,
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
    #[serde(default)]
    pub domain: Option<String>,
}

impl ContactSettings {
    pub fn recipient(&self) -> Result<ContactEmail, String> {
        ContactEmail::parse(self.recipient.clone())
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either 'local' or 'production'.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    let configuration_directory = base_path.join("configuration");
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    let mut settings = config::Config::default();
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;
    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    // The hosting platform hands out the Mailgun credentials under these names.
    if let Ok(api_key) = std::env::var("MAILGUN_API_KEY") {
        settings.set("email_client.api_key", api_key)?;
    }
    if let Ok(domain) = std::env::var("MAILGUN_DOMAIN") {
        settings.set("email_client.domain", domain)?;
    }
    settings.try_into()
}
