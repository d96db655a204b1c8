//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::params::{DiscoverMovieParams, DiscoverTvParams};
use super::types::{
    TmdbCredits, TmdbErrorResponse, TmdbMovieDetails, TmdbMovieListResponse, TmdbPersonCredits,
    TmdbPersonDetails, TmdbTvDetails, TmdbTvListResponse, TmdbVideoListResponse,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// TMDB API client.
///
/// Authenticates with the v3 `api_key` query parameter; every request is a
/// single GET with no retry (failures surface directly to the caller).
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// v3 API key.
    api_key: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the v3 API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_key = self.api_key.context("api_key is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends a GET request with the `api_key` query parameter appended.
    ///
    /// Non-2xx responses decode the TMDB error body when possible so the
    /// returned message carries the upstream `status_message`.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let request = self
            .http_client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        // The full URL carries the api_key, so only the path is logged.
        tracing::debug!(path, "TMDB API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                bail!(
                    "TMDB API error (HTTP {}): code={}, message={}",
                    status,
                    error_response.status_code,
                    error_response.status_message,
                );
            }
            bail!("TMDB API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        raw_result.with_context(|| format!("failed to decode JSON response: {path}"))
    }
}

impl LocalTmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn popular_movies(&self, page: u32) -> Result<TmdbMovieListResponse> {
        let query = [("page", page.to_string())];
        self.get_json("movie/popular", &query).await
    }

    #[instrument(skip_all)]
    async fn top_rated_movies(&self, page: u32) -> Result<TmdbMovieListResponse> {
        let query = [("page", page.to_string())];
        self.get_json("movie/top_rated", &query).await
    }

    #[instrument(skip_all)]
    async fn trending_movies(&self) -> Result<TmdbMovieListResponse> {
        self.get_json("trending/movie/day", &[]).await
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, movie_id: u64) -> Result<TmdbMovieDetails> {
        let path = format!("movie/{movie_id}");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn movie_videos(&self, movie_id: u64) -> Result<TmdbVideoListResponse> {
        let path = format!("movie/{movie_id}/videos");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn movie_credits(&self, movie_id: u64) -> Result<TmdbCredits> {
        let path = format!("movie/{movie_id}/credits");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn similar_movies(&self, movie_id: u64, page: u32) -> Result<TmdbMovieListResponse> {
        let path = format!("movie/{movie_id}/similar");
        let query = [("page", page.to_string())];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn movie_recommendations(
        &self,
        movie_id: u64,
        page: u32,
    ) -> Result<TmdbMovieListResponse> {
        let path = format!("movie/{movie_id}/recommendations");
        let query = [("page", page.to_string())];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn search_movies(&self, query: &str, page: u32) -> Result<TmdbMovieListResponse> {
        let query = [("query", String::from(query)), ("page", page.to_string())];
        self.get_json("search/movie", &query).await
    }

    #[instrument(skip_all)]
    async fn discover_movies(&self, params: &DiscoverMovieParams) -> Result<TmdbMovieListResponse> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", params.page.to_string()),
            ("sort_by", params.sort_by.clone()),
            ("vote_count.gte", params.vote_count_gte.to_string()),
        ];
        if let Some(ref genres) = params.with_genres {
            query.push(("with_genres", genres.clone()));
        }
        if let Some(ref date) = params.release_date_gte {
            query.push(("primary_release_date.gte", date.clone()));
        }
        if let Some(ref date) = params.release_date_lte {
            query.push(("primary_release_date.lte", date.clone()));
        }
        if let Some(value) = params.vote_average_gte {
            query.push(("vote_average.gte", value.to_string()));
        }
        if let Some(value) = params.vote_average_lte {
            query.push(("vote_average.lte", value.to_string()));
        }
        if let Some(minutes) = params.runtime_gte {
            query.push(("with_runtime.gte", minutes.to_string()));
        }
        if let Some(minutes) = params.runtime_lte {
            query.push(("with_runtime.lte", minutes.to_string()));
        }
        if let Some(ref language) = params.with_original_language {
            query.push(("with_original_language", language.clone()));
        }

        self.get_json("discover/movie", &query).await
    }

    #[instrument(skip_all)]
    async fn popular_tv(&self, page: u32) -> Result<TmdbTvListResponse> {
        let query = [("page", page.to_string())];
        self.get_json("tv/popular", &query).await
    }

    #[instrument(skip_all)]
    async fn top_rated_tv(&self, page: u32) -> Result<TmdbTvListResponse> {
        let query = [("page", page.to_string())];
        self.get_json("tv/top_rated", &query).await
    }

    #[instrument(skip_all)]
    async fn trending_tv(&self) -> Result<TmdbTvListResponse> {
        self.get_json("trending/tv/day", &[]).await
    }

    #[instrument(skip_all)]
    async fn tv_details(&self, series_id: u64) -> Result<TmdbTvDetails> {
        let path = format!("tv/{series_id}");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn tv_videos(&self, series_id: u64) -> Result<TmdbVideoListResponse> {
        let path = format!("tv/{series_id}/videos");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn tv_credits(&self, series_id: u64) -> Result<TmdbCredits> {
        let path = format!("tv/{series_id}/credits");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn similar_tv(&self, series_id: u64, page: u32) -> Result<TmdbTvListResponse> {
        let path = format!("tv/{series_id}/similar");
        let query = [("page", page.to_string())];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn tv_recommendations(&self, series_id: u64, page: u32) -> Result<TmdbTvListResponse> {
        let path = format!("tv/{series_id}/recommendations");
        let query = [("page", page.to_string())];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn search_tv(&self, query: &str, page: u32) -> Result<TmdbTvListResponse> {
        let query = [("query", String::from(query)), ("page", page.to_string())];
        self.get_json("search/tv", &query).await
    }

    #[instrument(skip_all)]
    async fn discover_tv(&self, params: &DiscoverTvParams) -> Result<TmdbTvListResponse> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", params.page.to_string()),
            ("sort_by", params.sort_by.clone()),
            ("vote_count.gte", params.vote_count_gte.to_string()),
        ];
        if let Some(ref genres) = params.with_genres {
            query.push(("with_genres", genres.clone()));
        }
        if let Some(ref date) = params.first_air_date_gte {
            query.push(("first_air_date.gte", date.clone()));
        }
        if let Some(ref date) = params.first_air_date_lte {
            query.push(("first_air_date.lte", date.clone()));
        }
        if let Some(value) = params.vote_average_gte {
            query.push(("vote_average.gte", value.to_string()));
        }
        if let Some(value) = params.vote_average_lte {
            query.push(("vote_average.lte", value.to_string()));
        }
        if let Some(ref language) = params.with_original_language {
            query.push(("with_original_language", language.clone()));
        }

        self.get_json("discover/tv", &query).await
    }

    #[instrument(skip_all)]
    async fn person_details(&self, person_id: u64) -> Result<TmdbPersonDetails> {
        let path = format!("person/{person_id}");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn person_credits(&self, person_id: u64) -> Result<TmdbPersonCredits> {
        let path = format!("person/{person_id}/combined_credits");
        self.get_json(&path, &[]).await
    }
}
