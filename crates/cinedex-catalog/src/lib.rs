//! Domain model, mappers, and the catalog repository.
//!
//! Sits between the TMDB client (`cinedex-api`) and the local cache
//! (`cinedex-db`): wire payloads map into domain values, domain values
//! map into cache rows and back, and [`CatalogRepository`] composes both
//! sides behind a single façade.

/// Wire-to-domain and domain-to-row mapping.
pub mod mapper;
/// Domain types and derived views.
pub mod model;
/// The repository façade over client and cache.
pub mod repository;

#[allow(clippy::module_name_repetitions)]
pub use repository::{
    CatalogRepository, HomeFeed, LiveMovies, LiveSeries, MovieDetailBundle, SeriesDetailBundle,
};
