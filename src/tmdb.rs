use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::FetchFailure;
use crate::models::Movie;

pub const TMDB_BASE: &str = "https://api.themoviedb.org/3";

#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Single page of `/search/movie` results, in the order TMDB returned them.
    async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, FetchFailure>;
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    token: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Movie>,
}

impl TmdbClient {
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let user_agent = format!("cinesearch/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build TMDB HTTP client")?;
        Ok(Self {
            client,
            token: token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search/movie?query={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        let res = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .context("request failed")?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        if !status.is_success() {
            return Err(anyhow!("{} -> {}", status, text));
        }
        let parsed: T = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(parsed)
    }
}

#[async_trait]
impl MovieApi for TmdbClient {
    async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, FetchFailure> {
        let url = self.search_url(query);
        match self.get_json::<SearchResponse>(&url).await {
            Ok(data) => {
                debug!(query = %query, count = data.results.len(), "TMDB search completed");
                Ok(data.results)
            }
            Err(e) => {
                warn!("TMDB search for '{}' failed: {:#}", query, e);
                Err(FetchFailure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_query_and_strips_trailing_slash() {
        let client = TmdbClient::new("token", "http://localhost:9/3/").expect("client");
        assert_eq!(client.base_url(), "http://localhost:9/3");
        assert_eq!(
            client.search_url("the dark knight & co"),
            "http://localhost:9/3/search/movie?query=the%20dark%20knight%20%26%20co"
        );
    }

    #[test]
    fn decodes_results_array_in_order() {
        let body = r#"{
            "page": 1,
            "results": [
                { "id": 2, "title": "B", "overview": "", "release_date": "", "vote_average": 5.0 },
                { "id": 1, "title": "A", "overview": "", "release_date": "", "vote_average": 9.0 }
            ],
            "total_pages": 1
        }"#;
        let parsed: SearchResponse = serde_json::from_str(body).expect("search deserialize");
        let ids: Vec<i64> = parsed.results.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
