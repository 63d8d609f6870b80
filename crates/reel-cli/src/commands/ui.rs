use std::sync::Arc;

use anyhow::{bail, Result};
use reel_catalog::TmdbClient;
use reel_config::Config;
use reel_core::Session;

pub async fn handle(config: &Config) -> Result<()> {
    if config.tmdb.api_key.is_empty() {
        bail!(
            "no TMDB API key configured; set tmdb.api_key in {} or export {}",
            Config::config_path().display(),
            reel_config::API_KEY_ENV,
        );
    }

    let label = if config.user.is_empty() {
        "movie club"
    } else {
        &config.user
    };
    let session = Session::authenticated(label);

    let client = TmdbClient::new(
        &config.tmdb.api_key,
        &config.tmdb.base_url,
        &config.tmdb.image_base_url,
    )?;

    reel_tui::run(session, Arc::new(client), &config.search).await
}
