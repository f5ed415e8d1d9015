use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::error;

use crate::error::ConfigError;

pub const API_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const BOT_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Secrets required before the poll loop may start.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_token: String,
    pub bot_token: String,
    pub chat_id: String,
}

impl Credentials {
    /// Read all three tokens through `lookup`. Empty values count as missing.
    pub fn load<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::TokenMissing(name))
        };

        Ok(Self {
            api_token: require(API_TOKEN_VAR)?,
            bot_token: require(BOT_TOKEN_VAR)?,
            chat_id: require(CHAT_ID_VAR)?,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|name| std::env::var(name).ok())
    }
}

/// Check that every token is present in the process environment.
pub fn check_tokens() -> bool {
    check_tokens_with(|name| std::env::var(name).ok())
}

/// Same as [`check_tokens`], reading from an arbitrary lookup.
/// Logs the first missing variable and stops there.
pub fn check_tokens_with<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match Credentials::load(lookup) {
        Ok(_) => true,
        Err(e) => {
            error!("Required token is not set: {}", e);
            false
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub poller: PollerSettings,
    #[serde(default)]
    pub telegram: TelegramSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollerSettings {
    #[serde(default = "default_retry_period_secs")]
    pub retry_period_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TelegramSettings {
    /// Custom Bot API server, e.g. a self-hosted `telegram-bot-api`.
    #[serde(default)]
    pub api_url: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            retry_period_secs: default_retry_period_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_retry_period_secs() -> u64 {
    600
}

impl Settings {
    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.poller.retry_period_secs)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load `path` if it exists, otherwise fall back to built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
