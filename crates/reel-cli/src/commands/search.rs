use anyhow::{bail, Result};
use reel_catalog::{CatalogLookup, TmdbClient};
use reel_config::Config;
use reel_core::movie_year;
use tokio_util::sync::CancellationToken;

pub async fn handle(config: &Config, query: &str, limit: usize) -> Result<()> {
    if config.tmdb.api_key.is_empty() {
        bail!(
            "no TMDB API key configured; set tmdb.api_key in {} or export {}",
            Config::config_path().display(),
            reel_config::API_KEY_ENV,
        );
    }

    let client = TmdbClient::new(
        &config.tmdb.api_key,
        &config.tmdb.base_url,
        &config.tmdb.image_base_url,
    )?;

    let results = client.search(query, CancellationToken::new()).await?;
    if results.is_empty() {
        println!("No movies found for \"{}\"", query);
        return Ok(());
    }

    for movie in results.iter().take(limit) {
        let year = movie_year(&movie.release_date).unwrap_or("n/a");
        println!("{:>8}  {}  ({})  ★ {:.1}", movie.id, movie.title, year, movie.vote_average);
    }
    Ok(())
}
