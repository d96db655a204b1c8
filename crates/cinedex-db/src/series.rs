//! Series cache CRUD operations.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

/// A cached series list summary.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, PartialEq)]
pub struct CachedSeries {
    /// TMDB series ID.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Synopsis text.
    pub overview: String,
    /// Poster image path (nullable).
    pub poster_path: Option<String>,
    /// Backdrop image path (nullable).
    pub backdrop_path: Option<String>,
    /// First air date, ISO `YYYY-MM-DD` or empty.
    pub first_air_date: String,
    /// Vote average on the 0-10 scale.
    pub vote_average: f64,
    /// TMDB popularity score.
    pub popularity: f64,
    /// Favorite flag.
    pub is_favorite: bool,
    /// Insertion timestamp, epoch milliseconds.
    pub added_at: i64,
}

/// A cached series detail record.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedSeriesDetails {
    /// TMDB series ID.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Original-language name.
    pub original_name: String,
    /// Synopsis text.
    pub overview: String,
    /// Poster image path (nullable).
    pub poster_path: Option<String>,
    /// Backdrop image path (nullable).
    pub backdrop_path: Option<String>,
    /// First air date, ISO `YYYY-MM-DD` or empty.
    pub first_air_date: String,
    /// Vote average on the 0-10 scale.
    pub vote_average: f64,
    /// Number of votes.
    pub vote_count: u32,
    /// Season count.
    pub number_of_seasons: u32,
    /// Episode count.
    pub number_of_episodes: u32,
    /// Genres as an embedded JSON array.
    pub genres: String,
    /// Production companies as an embedded JSON array.
    pub production_companies: String,
    /// Airing status text.
    pub status: String,
    /// Tagline text.
    pub tagline: String,
    /// Homepage URL or empty.
    pub homepage: String,
    /// Favorite flag.
    pub is_favorite: bool,
    /// Fetch timestamp, epoch milliseconds.
    pub cached_at: i64,
}

const SERIES_UPSERT_SQL: &str = "INSERT INTO series (
        id, name, overview, poster_path, backdrop_path,
        first_air_date, vote_average, popularity,
        is_favorite, added_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
    ON CONFLICT(id) DO UPDATE SET
        name = excluded.name,
        overview = excluded.overview,
        poster_path = excluded.poster_path,
        backdrop_path = excluded.backdrop_path,
        first_air_date = excluded.first_air_date,
        vote_average = excluded.vote_average,
        popularity = excluded.popularity,
        is_favorite = excluded.is_favorite,
        added_at = excluded.added_at";

const SERIES_SELECT_COLUMNS: &str = "id, name, overview, poster_path, backdrop_path,
        first_air_date, vote_average, popularity,
        is_favorite, added_at";

fn series_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CachedSeries> {
    Ok(CachedSeries {
        id: row.get(0)?,
        name: row.get(1)?,
        overview: row.get(2)?,
        poster_path: row.get(3)?,
        backdrop_path: row.get(4)?,
        first_air_date: row.get(5)?,
        vote_average: row.get(6)?,
        popularity: row.get(7)?,
        is_favorite: row.get(8)?,
        added_at: row.get(9)?,
    })
}

/// Upserts a single series summary row.
///
/// Last write wins: the whole row is replaced, including the favorite flag.
///
/// # Errors
///
/// Returns an error if the database operation fails.
#[allow(clippy::module_name_repetitions)]
pub fn upsert_series(conn: &Connection, series: &CachedSeries) -> Result<()> {
    conn.execute(
        SERIES_UPSERT_SQL,
        rusqlite::params![
            series.id,
            series.name,
            series.overview,
            series.poster_path,
            series.backdrop_path,
            series.first_air_date,
            series.vote_average,
            series.popularity,
            series.is_favorite,
            series.added_at,
        ],
    )
    .with_context(|| format!("failed to upsert series {}", series.id))?;
    Ok(())
}

/// Upserts series summary rows in one transaction. Returns the number of rows
/// written.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn upsert_series_list(conn: &Connection, series: &[CachedSeries]) -> Result<usize> {
    let tx = conn
        .unchecked_transaction()
        .context("failed to begin transaction")?;

    let mut stmt = tx
        .prepare(SERIES_UPSERT_SQL)
        .context("failed to prepare series upsert")?;

    let mut changed: usize = 0;
    for s in series {
        let rows = stmt
            .execute(rusqlite::params![
                s.id,
                s.name,
                s.overview,
                s.poster_path,
                s.backdrop_path,
                s.first_air_date,
                s.vote_average,
                s.popularity,
                s.is_favorite,
                s.added_at,
            ])
            .with_context(|| format!("failed to upsert series {}", s.id))?;
        changed = changed.saturating_add(rows);
    }

    drop(stmt);
    tx.commit().context("failed to commit series upsert")?;
    Ok(changed)
}

/// Looks up a single series summary row.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[allow(clippy::module_name_repetitions)]
pub fn series_by_id(conn: &Connection, id: u64) -> Result<Option<CachedSeries>> {
    let sql = format!("SELECT {SERIES_SELECT_COLUMNS} FROM series WHERE id = ?1");
    conn.query_row(&sql, [id], series_from_row)
        .optional()
        .with_context(|| format!("failed to query series {id}"))
}

/// Loads all series summary rows, most popular first.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[allow(clippy::module_name_repetitions)]
pub fn load_series(conn: &Connection) -> Result<Vec<CachedSeries>> {
    let sql = format!("SELECT {SERIES_SELECT_COLUMNS} FROM series ORDER BY popularity DESC, id");
    let mut stmt = conn.prepare(&sql).context("failed to prepare series query")?;

    let rows = stmt
        .query_map([], series_from_row)
        .context("failed to query series")?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .context("failed to read series rows")
}

/// Loads favorited series rows, most recently added first.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[allow(clippy::module_name_repetitions)]
pub fn load_favorite_series(conn: &Connection) -> Result<Vec<CachedSeries>> {
    let sql = format!(
        "SELECT {SERIES_SELECT_COLUMNS} FROM series
         WHERE is_favorite = 1
         ORDER BY added_at DESC, id"
    );
    let mut stmt = conn
        .prepare(&sql)
        .context("failed to prepare favorite series query")?;

    let rows = stmt
        .query_map([], series_from_row)
        .context("failed to query favorite series")?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .context("failed to read favorite series rows")
}

/// Sets the favorite flag on a series row, touching nothing else.
///
/// Updating a row that does not exist is a no-op.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn set_series_favorite(conn: &Connection, id: u64, favorite: bool) -> Result<()> {
    conn.execute(
        "UPDATE series SET is_favorite = ?1 WHERE id = ?2",
        rusqlite::params![favorite, id],
    )
    .with_context(|| format!("failed to update favorite flag for series {id}"))?;
    Ok(())
}

/// Returns whether a series row exists and is favorited.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[allow(clippy::module_name_repetitions)]
pub fn series_is_favorite(conn: &Connection, id: u64) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM series WHERE id = ?1 AND is_favorite = 1)",
        [id],
        |row| row.get(0),
    )
    .with_context(|| format!("failed to query favorite flag for series {id}"))
}

/// Deletes all series summary rows.
///
/// # Errors
///
/// Returns an error if the database operation fails.
#[allow(clippy::module_name_repetitions)]
pub fn clear_series(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM series", [])
        .context("failed to clear series")?;
    Ok(())
}

/// Upserts a series detail record. Last write wins.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn upsert_series_details(conn: &Connection, details: &CachedSeriesDetails) -> Result<()> {
    conn.execute(
        "INSERT INTO series_details (
            id, name, original_name, overview, poster_path, backdrop_path,
            first_air_date, vote_average, vote_count, number_of_seasons,
            number_of_episodes, genres, production_companies, status,
            tagline, homepage, is_favorite, cached_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            original_name = excluded.original_name,
            overview = excluded.overview,
            poster_path = excluded.poster_path,
            backdrop_path = excluded.backdrop_path,
            first_air_date = excluded.first_air_date,
            vote_average = excluded.vote_average,
            vote_count = excluded.vote_count,
            number_of_seasons = excluded.number_of_seasons,
            number_of_episodes = excluded.number_of_episodes,
            genres = excluded.genres,
            production_companies = excluded.production_companies,
            status = excluded.status,
            tagline = excluded.tagline,
            homepage = excluded.homepage,
            is_favorite = excluded.is_favorite,
            cached_at = excluded.cached_at",
        rusqlite::params![
            details.id,
            details.name,
            details.original_name,
            details.overview,
            details.poster_path,
            details.backdrop_path,
            details.first_air_date,
            details.vote_average,
            details.vote_count,
            details.number_of_seasons,
            details.number_of_episodes,
            details.genres,
            details.production_companies,
            details.status,
            details.tagline,
            details.homepage,
            details.is_favorite,
            details.cached_at,
        ],
    )
    .with_context(|| format!("failed to upsert series details {}", details.id))?;
    Ok(())
}

/// Looks up a series detail record.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[allow(clippy::module_name_repetitions)]
pub fn series_details_by_id(conn: &Connection, id: u64) -> Result<Option<CachedSeriesDetails>> {
    conn.query_row(
        "SELECT id, name, original_name, overview, poster_path, backdrop_path,
                first_air_date, vote_average, vote_count, number_of_seasons,
                number_of_episodes, genres, production_companies, status,
                tagline, homepage, is_favorite, cached_at
         FROM series_details
         WHERE id = ?1",
        [id],
        |row| {
            Ok(CachedSeriesDetails {
                id: row.get(0)?,
                name: row.get(1)?,
                original_name: row.get(2)?,
                overview: row.get(3)?,
                poster_path: row.get(4)?,
                backdrop_path: row.get(5)?,
                first_air_date: row.get(6)?,
                vote_average: row.get(7)?,
                vote_count: row.get(8)?,
                number_of_seasons: row.get(9)?,
                number_of_episodes: row.get(10)?,
                genres: row.get(11)?,
                production_companies: row.get(12)?,
                status: row.get(13)?,
                tagline: row.get(14)?,
                homepage: row.get(15)?,
                is_favorite: row.get(16)?,
                cached_at: row.get(17)?,
            })
        },
    )
    .optional()
    .with_context(|| format!("failed to query series details {id}"))
}

/// Sets the favorite flag on a series detail record.
///
/// Updating a record that does not exist is a no-op.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn set_series_details_favorite(conn: &Connection, id: u64, favorite: bool) -> Result<()> {
    conn.execute(
        "UPDATE series_details SET is_favorite = ?1 WHERE id = ?2",
        rusqlite::params![favorite, id],
    )
    .with_context(|| format!("failed to update favorite flag for series details {id}"))?;
    Ok(())
}

/// Deletes series detail records with `cached_at` strictly before `cutoff`.
/// Returns the number of rows deleted. Summary rows are never touched.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn delete_series_details_older_than(conn: &Connection, cutoff: i64) -> Result<usize> {
    conn.execute("DELETE FROM series_details WHERE cached_at < ?1", [cutoff])
        .context("failed to delete stale series details")
}

/// Deletes all series detail records.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn clear_series_details(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM series_details", [])
        .context("failed to clear series details")?;
    Ok(())
}
