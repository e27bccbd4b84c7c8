use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

use crate::cli::PushArgs;

pub const DEFAULT_MODE: &str = "production";
pub const DEFAULT_TITLE: &str = "APNS Test";
pub const DEFAULT_BODY: &str = "APNS Test";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] ConfigError),

    #[error("required flag(s) {} not set", quoted(.0))]
    MissingRequired(Vec<&'static str>),
}

fn quoted(flags: &[&str]) -> String {
    flags
        .iter()
        .map(|flag| format!("\"{flag}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Merged view of the settings file and the command line, before the
/// required fields are checked.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub certificate_path: Option<String>,
    pub topic: Option<String>,
    pub token: Option<String>,
    pub mode: String,
    pub title: String,
    pub body: String,
}

impl Settings {
    /// Layers defaults, the optional settings file and the command line
    /// flags, in increasing order of precedence.
    pub fn load(args: &PushArgs) -> Result<Settings, SettingsError> {
        let mut builder = Config::builder()
            .set_default("mode", DEFAULT_MODE)?
            .set_default("title", DEFAULT_TITLE)?
            .set_default("body", DEFAULT_BODY)?;

        if let Some(path) = &args.settings {
            builder = builder.add_source(File::from(Path::new(path)).format(FileFormat::Toml));
        }

        let settings = builder
            .set_override_option("certificate_path", args.certificate_path.clone())?
            .set_override_option("topic", args.topic.clone())?
            .set_override_option("token", args.token.clone())?
            .set_override_option("mode", args.mode.clone())?
            .set_override_option("title", args.title.clone())?
            .set_override_option("body", args.body.clone())?
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// Everything needed to send one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub certificate_path: PathBuf,
    pub topic: String,
    pub token: String,
    pub mode: String,
    pub title: String,
    pub body: String,
}

impl TryFrom<Settings> for Configuration {
    type Error = SettingsError;

    fn try_from(settings: Settings) -> Result<Self, Self::Error> {
        let required = |value: Option<String>| value.filter(|value| !value.is_empty());

        let certificate_path = required(settings.certificate_path);
        let topic = required(settings.topic);
        let token = required(settings.token);

        match (certificate_path, topic, token) {
            (Some(certificate_path), Some(topic), Some(token)) => Ok(Configuration {
                certificate_path: PathBuf::from(certificate_path),
                topic,
                token,
                mode: settings.mode,
                title: settings.title,
                body: settings.body,
            }),
            (certificate_path, topic, token) => {
                let missing = [
                    ("certificate-path", certificate_path.is_none()),
                    ("topic", topic.is_none()),
                    ("token", token.is_none()),
                ]
                .into_iter()
                .filter_map(|(flag, missing)| missing.then_some(flag))
                .collect();

                Err(SettingsError::MissingRequired(missing))
            }
        }
    }
}
