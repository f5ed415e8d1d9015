mod api;
mod config;
mod error;
mod homework;
mod logging;
mod notifier;
mod poller;
#[cfg(test)]
mod test_support;

use std::path::PathBuf;

use anyhow::{Context, Result};
use teloxide::Bot;
use tracing::{error, info};

use crate::api::HomeworkApi;
use crate::config::{check_tokens, Credentials, Settings};
use crate::notifier::Notifier;
use crate::poller::Poller;

const DEFAULT_SETTINGS_PATH: &str = "homework-bot.toml";

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    dotenvy::dotenv().ok();

    if !check_tokens() {
        error!("One or more tokens are missing, exiting");
        std::process::exit(1);
    }
    let credentials = Credentials::from_env()?;

    // An explicit path must exist; the default one is optional
    let settings = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::load_or_default(&PathBuf::from(DEFAULT_SETTINGS_PATH))
            .context("Failed to load default settings")?,
    };

    info!("Settings loaded");
    info!("  Endpoint: {}", settings.api.endpoint);
    info!("  Retry period: {}s", settings.poller.retry_period_secs);

    let mut bot = Bot::new(&credentials.bot_token);
    if let Some(api_url) = &settings.telegram.api_url {
        let url = reqwest::Url::parse(api_url)
            .with_context(|| format!("Invalid Telegram API url: {}", api_url))?;
        info!("  Telegram API: {}", url);
        bot = bot.set_api_url(url);
    }

    let api = HomeworkApi::new(settings.api.endpoint.clone(), credentials.api_token);
    let notifier = Notifier::new(bot, credentials.chat_id);
    let mut poller = Poller::new(api, notifier, settings.retry_period());

    info!("Bot is starting...");
    poller.run().await;

    Ok(())
}
