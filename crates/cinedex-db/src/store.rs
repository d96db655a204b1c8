//! Store handle combining the connection with live-query state.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use rusqlite::Connection;
use tokio::sync::{Mutex, watch};

use crate::connection;
use crate::live::LiveQuery;
use crate::movies::{self, CachedMovie, CachedMovieDetails};
use crate::series::{self, CachedSeries, CachedSeriesDetails};

/// Handle over the cache database with live query re-emission.
///
/// Writes take the connection lock, apply the table operation, then
/// re-evaluate and re-emit the written table's live queries before the
/// lock is released, so snapshots reach observers in write order.
/// Per-id favorite watchers are registered on demand and pruned once
/// every receiver is gone.
#[derive(Debug)]
pub struct CatalogStore {
    conn: Mutex<Connection>,
    movies_tx: watch::Sender<Vec<CachedMovie>>,
    favorite_movies_tx: watch::Sender<Vec<CachedMovie>>,
    series_tx: watch::Sender<Vec<CachedSeries>>,
    favorite_series_tx: watch::Sender<Vec<CachedSeries>>,
    movie_flags: Mutex<HashMap<u64, watch::Sender<bool>>>,
    series_flags: Mutex<HashMap<u64, watch::Sender<bool>>>,
}

impl CatalogStore {
    /// Opens the store at `{dir}/cinedex.db`, or the default location when
    /// `dir` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open(dir: Option<&PathBuf>) -> Result<Self> {
        let conn = connection::open_db(dir)?;
        Self::from_parts(conn)
    }

    /// Opens an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self> {
        let conn = connection::open_in_memory()?;
        Self::from_parts(conn)
    }

    fn from_parts(conn: Connection) -> Result<Self> {
        let movie_rows = movies::load_movies(&conn)?;
        let favorite_movie_rows = movies::load_favorite_movies(&conn)?;
        let series_rows = series::load_series(&conn)?;
        let favorite_series_rows = series::load_favorite_series(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            movies_tx: watch::Sender::new(movie_rows),
            favorite_movies_tx: watch::Sender::new(favorite_movie_rows),
            series_tx: watch::Sender::new(series_rows),
            favorite_series_tx: watch::Sender::new(favorite_series_rows),
            movie_flags: Mutex::new(HashMap::new()),
            series_flags: Mutex::new(HashMap::new()),
        })
    }

    async fn refresh_movie_queries(&self, conn: &Connection) -> Result<()> {
        self.movies_tx.send_replace(movies::load_movies(conn)?);
        self.favorite_movies_tx
            .send_replace(movies::load_favorite_movies(conn)?);

        let mut flags = self.movie_flags.lock().await;
        flags.retain(|_, tx| tx.receiver_count() > 0);
        for (id, tx) in flags.iter() {
            tx.send_replace(movies::movie_is_favorite(conn, *id)?);
        }
        Ok(())
    }

    async fn refresh_series_queries(&self, conn: &Connection) -> Result<()> {
        self.series_tx.send_replace(series::load_series(conn)?);
        self.favorite_series_tx
            .send_replace(series::load_favorite_series(conn)?);

        let mut flags = self.series_flags.lock().await;
        flags.retain(|_, tx| tx.receiver_count() > 0);
        for (id, tx) in flags.iter() {
            tx.send_replace(series::series_is_favorite(conn, *id)?);
        }
        Ok(())
    }

    /// Subscribes to all movie summary rows, most popular first.
    #[must_use]
    pub fn watch_movies(&self) -> LiveQuery<Vec<CachedMovie>> {
        LiveQuery::new(self.movies_tx.subscribe())
    }

    /// Subscribes to favorited movie rows, most recently added first.
    #[must_use]
    pub fn watch_favorite_movies(&self) -> LiveQuery<Vec<CachedMovie>> {
        LiveQuery::new(self.favorite_movies_tx.subscribe())
    }

    /// Subscribes to the favorite flag of one movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn watch_movie_favorite(&self, id: u64) -> Result<LiveQuery<bool>> {
        let conn = self.conn.lock().await;
        let current = movies::movie_is_favorite(&conn, id)?;
        let mut flags = self.movie_flags.lock().await;
        let tx = flags.entry(id).or_insert_with(|| watch::Sender::new(current));
        Ok(LiveQuery::new(tx.subscribe()))
    }

    /// Looks up a single movie summary row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn movie_by_id(&self, id: u64) -> Result<Option<CachedMovie>> {
        let conn = self.conn.lock().await;
        movies::movie_by_id(&conn, id)
    }

    /// Returns whether a movie row exists and is favorited.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn movie_is_favorite(&self, id: u64) -> Result<bool> {
        let conn = self.conn.lock().await;
        movies::movie_is_favorite(&conn, id)
    }

    /// Upserts a movie summary row and re-emits movie queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn upsert_movie(&self, movie: &CachedMovie) -> Result<()> {
        let conn = self.conn.lock().await;
        movies::upsert_movie(&conn, movie)?;
        self.refresh_movie_queries(&conn).await
    }

    /// Upserts movie summary rows and re-emits movie queries. Returns the
    /// number of rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn upsert_movies(&self, rows: &[CachedMovie]) -> Result<usize> {
        let conn = self.conn.lock().await;
        let written = movies::upsert_movies(&conn, rows)?;
        self.refresh_movie_queries(&conn).await?;
        Ok(written)
    }

    /// Sets the favorite flag on a movie summary row and re-emits movie
    /// queries. A missing row is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn set_movie_favorite(&self, id: u64, favorite: bool) -> Result<()> {
        let conn = self.conn.lock().await;
        movies::set_movie_favorite(&conn, id, favorite)?;
        self.refresh_movie_queries(&conn).await
    }

    /// Looks up a movie detail record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn movie_details_by_id(&self, id: u64) -> Result<Option<CachedMovieDetails>> {
        let conn = self.conn.lock().await;
        movies::movie_details_by_id(&conn, id)
    }

    /// Upserts a movie detail record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn upsert_movie_details(&self, details: &CachedMovieDetails) -> Result<()> {
        let conn = self.conn.lock().await;
        movies::upsert_movie_details(&conn, details)
    }

    /// Sets the favorite flag on a movie detail record. A missing record is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn set_movie_details_favorite(&self, id: u64, favorite: bool) -> Result<()> {
        let conn = self.conn.lock().await;
        movies::set_movie_details_favorite(&conn, id, favorite)
    }

    /// Subscribes to all series summary rows, most popular first.
    #[must_use]
    pub fn watch_series(&self) -> LiveQuery<Vec<CachedSeries>> {
        LiveQuery::new(self.series_tx.subscribe())
    }

    /// Subscribes to favorited series rows, most recently added first.
    #[must_use]
    pub fn watch_favorite_series(&self) -> LiveQuery<Vec<CachedSeries>> {
        LiveQuery::new(self.favorite_series_tx.subscribe())
    }

    /// Subscribes to the favorite flag of one series.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn watch_series_favorite(&self, id: u64) -> Result<LiveQuery<bool>> {
        let conn = self.conn.lock().await;
        let current = series::series_is_favorite(&conn, id)?;
        let mut flags = self.series_flags.lock().await;
        let tx = flags.entry(id).or_insert_with(|| watch::Sender::new(current));
        Ok(LiveQuery::new(tx.subscribe()))
    }

    /// Looks up a single series summary row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn series_by_id(&self, id: u64) -> Result<Option<CachedSeries>> {
        let conn = self.conn.lock().await;
        series::series_by_id(&conn, id)
    }

    /// Returns whether a series row exists and is favorited.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn series_is_favorite(&self, id: u64) -> Result<bool> {
        let conn = self.conn.lock().await;
        series::series_is_favorite(&conn, id)
    }

    /// Upserts a series summary row and re-emits series queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn upsert_series(&self, row: &CachedSeries) -> Result<()> {
        let conn = self.conn.lock().await;
        series::upsert_series(&conn, row)?;
        self.refresh_series_queries(&conn).await
    }

    /// Upserts series summary rows and re-emits series queries. Returns the
    /// number of rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn upsert_series_list(&self, rows: &[CachedSeries]) -> Result<usize> {
        let conn = self.conn.lock().await;
        let written = series::upsert_series_list(&conn, rows)?;
        self.refresh_series_queries(&conn).await?;
        Ok(written)
    }

    /// Sets the favorite flag on a series summary row and re-emits series
    /// queries. A missing row is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn set_series_favorite(&self, id: u64, favorite: bool) -> Result<()> {
        let conn = self.conn.lock().await;
        series::set_series_favorite(&conn, id, favorite)?;
        self.refresh_series_queries(&conn).await
    }

    /// Looks up a series detail record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn series_details_by_id(&self, id: u64) -> Result<Option<CachedSeriesDetails>> {
        let conn = self.conn.lock().await;
        series::series_details_by_id(&conn, id)
    }

    /// Upserts a series detail record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn upsert_series_details(&self, details: &CachedSeriesDetails) -> Result<()> {
        let conn = self.conn.lock().await;
        series::upsert_series_details(&conn, details)
    }

    /// Sets the favorite flag on a series detail record. A missing record is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn set_series_details_favorite(&self, id: u64, favorite: bool) -> Result<()> {
        let conn = self.conn.lock().await;
        series::set_series_details_favorite(&conn, id, favorite)
    }

    /// Deletes detail records of both variants with `cached_at` strictly
    /// before `cutoff`. Summary rows are never touched. Returns the number
    /// of rows deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn evict_details_older_than(&self, cutoff: i64) -> Result<usize> {
        let conn = self.conn.lock().await;
        let movie_rows = movies::delete_movie_details_older_than(&conn, cutoff)?;
        let series_rows = series::delete_series_details_older_than(&conn, cutoff)?;
        let deleted = movie_rows.saturating_add(series_rows);
        tracing::debug!(deleted, "evicted stale detail records");
        Ok(deleted)
    }

    /// Empties all four tables and re-emits every live query.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn clear(&self) -> Result<()> {
        let conn = self.conn.lock().await;
        movies::clear_movies(&conn)?;
        movies::clear_movie_details(&conn)?;
        series::clear_series(&conn)?;
        series::clear_series_details(&conn)?;
        self.refresh_movie_queries(&conn).await?;
        self.refresh_series_queries(&conn).await?;
        tracing::debug!("cleared catalog cache");
        Ok(())
    }
}
