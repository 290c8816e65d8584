use std::{path::PathBuf, str::FromStr, time::Duration};

use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::Email;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    #[serde(skip)]
    pub environment: Environment,
    pub application: ApplicationSettings,
    pub email: EmailSettings,
    pub image_generation: ImageGenerationSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub static_dir: PathBuf,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub secure: bool,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
    pub sender: String,
    pub recipient: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

#[derive(serde::Deserialize, Clone)]
pub struct ImageGenerationSettings {
    pub base_url: String,
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub aspect_ratio: String,
    pub output_path: PathBuf,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

/// Deployment mode, selected through `APP_ENVIRONMENT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    #[default]
    Local,
    Production,
}

impl Settings {
    pub fn get() -> Result<Self, config::ConfigError> {
        let base_path = std::env::current_dir()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?
            .join("configuration");
        let environment = Environment::current()?;

        let settings = config::Config::builder()
            .add_source(config::File::from(base_path.join("base.yaml")))
            .add_source(config::File::from(
                base_path.join(format!("{environment}.yaml")),
            ))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut settings = settings.try_deserialize::<Self>()?;
        settings.environment = environment;
        Ok(settings)
    }
}

impl Environment {
    pub fn current() -> Result<Self, config::ConfigError> {
        let raw = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into());
        Self::from_str(&raw).map_err(|_| {
            config::ConfigError::Message(format!(
                "{raw} is not a supported environment. Use either `local` or `production`."
            ))
        })
    }
}

/// SMTP login, present only when both halves are configured.
#[derive(Clone, Debug)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: Secret<String>,
}

impl EmailSettings {
    pub fn sender(&self) -> Result<Email, String> {
        Email::parse(self.sender.clone())
    }

    pub fn recipient(&self) -> Result<Email, String> {
        Email::parse(self.recipient.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn credentials(&self) -> Option<SmtpCredentials> {
        let username = self.username.as_ref().filter(|u| !u.trim().is_empty())?;
        let password = self
            .password
            .as_ref()
            .filter(|p| !p.expose_secret().trim().is_empty())?;

        Some(SmtpCredentials {
            username: username.clone(),
            password: password.clone(),
        })
    }
}

impl ImageGenerationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}
