//! Run one TMDB movie search with the app's client and print the decoded movies.
//! Usage:
//!   cargo run --bin tmdb_search -- <query>
//! Requires TMDB_TOKEN in the environment (.env supported); TMDB_BASE_URL is optional.

use anyhow::{Context, Result};
use cinesearch::config::Config;
use cinesearch::tmdb::{MovieApi, TmdbClient};
use dotenvy::dotenv;
use serde_json::json;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    let query = env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        anyhow::bail!("Usage: tmdb_search <query>");
    }

    let config = Config::from_env()?;
    let client = TmdbClient::new(config.tmdb_token, config.tmdb_base_url)?;
    let movies = client
        .fetch_movies(&query)
        .await
        .with_context(|| format!("search for '{}' against {}", query, client.base_url()))?;

    let rows: Vec<_> = movies
        .iter()
        .map(|m| {
            json!({
                "id": m.id,
                "title": m.title,
                "release_date": m.release_date,
                "rating": m.rating_label(),
                "backdrop": m.backdrop_url(),
                "poster": m.poster_url(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&json!({ "query": query, "results": rows }))?);
    Ok(())
}
