//! Local cache database for TMDB catalog data.
//!
//! Persists movie/series list summaries and detail records with
//! `rusqlite` (bundled `SQLite`), each row carrying a favorite flag,
//! and exposes live queries over `tokio::sync::watch` channels that
//! re-emit fresh snapshots after every write.

mod connection;
/// Live query subscriptions.
pub mod live;
mod migrations;
/// Movie cache rows and CRUD operations.
pub mod movies;
/// Series cache rows and CRUD operations.
pub mod series;
/// Store handle combining the connection with live-query state.
pub mod store;

#[allow(clippy::module_name_repetitions)]
pub use connection::open_db;
pub use live::{LiveQuery, MappedLiveQuery};
pub use movies::{CachedMovie, CachedMovieDetails};
pub use series::{CachedSeries, CachedSeriesDetails};
pub use store::CatalogStore;
