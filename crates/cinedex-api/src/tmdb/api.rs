//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::params::{DiscoverMovieParams, DiscoverTvParams};
use super::types::{
    TmdbCredits, TmdbMovieDetails, TmdbMovieListResponse, TmdbPersonCredits, TmdbPersonDetails,
    TmdbTvDetails, TmdbTvListResponse, TmdbVideoListResponse,
};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches the popular movies list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn popular_movies(&self, page: u32) -> Result<TmdbMovieListResponse>;

    /// Fetches the top-rated movies list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn top_rated_movies(&self, page: u32) -> Result<TmdbMovieListResponse>;

    /// Fetches the daily trending movies list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn trending_movies(&self) -> Result<TmdbMovieListResponse>;

    /// Fetches movie details.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64) -> Result<TmdbMovieDetails>;

    /// Fetches videos attached to a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_videos(&self, movie_id: u64) -> Result<TmdbVideoListResponse>;

    /// Fetches cast and crew credits for a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_credits(&self, movie_id: u64) -> Result<TmdbCredits>;

    /// Fetches movies similar to the given movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn similar_movies(&self, movie_id: u64, page: u32) -> Result<TmdbMovieListResponse>;

    /// Fetches movie recommendations for the given movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_recommendations(
        &self,
        movie_id: u64,
        page: u32,
    ) -> Result<TmdbMovieListResponse>;

    /// Searches for movies by free text.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movies(&self, query: &str, page: u32) -> Result<TmdbMovieListResponse>;

    /// Runs a faceted discover query for movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn discover_movies(&self, params: &DiscoverMovieParams) -> Result<TmdbMovieListResponse>;

    /// Fetches the popular TV series list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn popular_tv(&self, page: u32) -> Result<TmdbTvListResponse>;

    /// Fetches the top-rated TV series list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn top_rated_tv(&self, page: u32) -> Result<TmdbTvListResponse>;

    /// Fetches the daily trending TV series list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn trending_tv(&self) -> Result<TmdbTvListResponse>;

    /// Fetches TV series details.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_details(&self, series_id: u64) -> Result<TmdbTvDetails>;

    /// Fetches videos attached to a TV series.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_videos(&self, series_id: u64) -> Result<TmdbVideoListResponse>;

    /// Fetches cast and crew credits for a TV series.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_credits(&self, series_id: u64) -> Result<TmdbCredits>;

    /// Fetches TV series similar to the given series.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn similar_tv(&self, series_id: u64, page: u32) -> Result<TmdbTvListResponse>;

    /// Fetches TV recommendations for the given series.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_recommendations(&self, series_id: u64, page: u32) -> Result<TmdbTvListResponse>;

    /// Searches for TV series by free text.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_tv(&self, query: &str, page: u32) -> Result<TmdbTvListResponse>;

    /// Runs a faceted discover query for TV series.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn discover_tv(&self, params: &DiscoverTvParams) -> Result<TmdbTvListResponse>;

    /// Fetches person details.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn person_details(&self, person_id: u64) -> Result<TmdbPersonDetails>;

    /// Fetches a person's combined movie and TV credits.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn person_credits(&self, person_id: u64) -> Result<TmdbPersonCredits>;
}
