//! Movie cache CRUD operations.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

/// A cached movie list summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedMovie {
    /// TMDB movie ID.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Synopsis text.
    pub overview: String,
    /// Poster image path (nullable).
    pub poster_path: Option<String>,
    /// Backdrop image path (nullable).
    pub backdrop_path: Option<String>,
    /// Release date, ISO `YYYY-MM-DD` or empty.
    pub release_date: String,
    /// Vote average on the 0-10 scale.
    pub vote_average: f64,
    /// TMDB popularity score.
    pub popularity: f64,
    /// Comma-joined genre IDs.
    pub genre_ids: String,
    /// Favorite flag.
    pub is_favorite: bool,
    /// Insertion timestamp, epoch milliseconds.
    pub added_at: i64,
}

/// A cached movie detail record.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Original-language title.
    pub original_title: String,
    /// Synopsis text.
    pub overview: String,
    /// Poster image path (nullable).
    pub poster_path: Option<String>,
    /// Backdrop image path (nullable).
    pub backdrop_path: Option<String>,
    /// Release date, ISO `YYYY-MM-DD` or empty.
    pub release_date: String,
    /// Vote average on the 0-10 scale.
    pub vote_average: f64,
    /// Number of votes.
    pub vote_count: u32,
    /// Runtime in minutes, 0 when unknown.
    pub runtime: u32,
    /// Genres as an embedded JSON array.
    pub genres: String,
    /// Production budget in USD.
    pub budget: u64,
    /// Box office revenue in USD.
    pub revenue: u64,
    /// Release status text.
    pub status: String,
    /// Tagline text.
    pub tagline: String,
    /// Homepage URL or empty.
    pub homepage: String,
    /// IMDb ID or empty.
    pub imdb_id: String,
    /// Production companies as an embedded JSON array.
    pub production_companies: String,
    /// Favorite flag.
    pub is_favorite: bool,
    /// Fetch timestamp, epoch milliseconds.
    pub cached_at: i64,
}

const MOVIE_UPSERT_SQL: &str = "INSERT INTO movies (
        id, title, overview, poster_path, backdrop_path,
        release_date, vote_average, popularity, genre_ids,
        is_favorite, added_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
    ON CONFLICT(id) DO UPDATE SET
        title = excluded.title,
        overview = excluded.overview,
        poster_path = excluded.poster_path,
        backdrop_path = excluded.backdrop_path,
        release_date = excluded.release_date,
        vote_average = excluded.vote_average,
        popularity = excluded.popularity,
        genre_ids = excluded.genre_ids,
        is_favorite = excluded.is_favorite,
        added_at = excluded.added_at";

const MOVIE_SELECT_COLUMNS: &str = "id, title, overview, poster_path, backdrop_path,
        release_date, vote_average, popularity, genre_ids,
        is_favorite, added_at";

fn movie_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CachedMovie> {
    Ok(CachedMovie {
        id: row.get(0)?,
        title: row.get(1)?,
        overview: row.get(2)?,
        poster_path: row.get(3)?,
        backdrop_path: row.get(4)?,
        release_date: row.get(5)?,
        vote_average: row.get(6)?,
        popularity: row.get(7)?,
        genre_ids: row.get(8)?,
        is_favorite: row.get(9)?,
        added_at: row.get(10)?,
    })
}

/// Upserts a single movie summary row.
///
/// Last write wins: the whole row is replaced, including the favorite flag.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn upsert_movie(conn: &Connection, movie: &CachedMovie) -> Result<()> {
    conn.execute(
        MOVIE_UPSERT_SQL,
        rusqlite::params![
            movie.id,
            movie.title,
            movie.overview,
            movie.poster_path,
            movie.backdrop_path,
            movie.release_date,
            movie.vote_average,
            movie.popularity,
            movie.genre_ids,
            movie.is_favorite,
            movie.added_at,
        ],
    )
    .with_context(|| format!("failed to upsert movie {}", movie.id))?;
    Ok(())
}

/// Upserts movie summary rows in one transaction. Returns the number of rows
/// written.
///
/// # Errors
///
/// Returns an error if the database operation fails.
#[allow(clippy::module_name_repetitions)]
pub fn upsert_movies(conn: &Connection, movies: &[CachedMovie]) -> Result<usize> {
    let tx = conn
        .unchecked_transaction()
        .context("failed to begin transaction")?;

    let mut stmt = tx
        .prepare(MOVIE_UPSERT_SQL)
        .context("failed to prepare movies upsert")?;

    let mut changed: usize = 0;
    for m in movies {
        let rows = stmt
            .execute(rusqlite::params![
                m.id,
                m.title,
                m.overview,
                m.poster_path,
                m.backdrop_path,
                m.release_date,
                m.vote_average,
                m.popularity,
                m.genre_ids,
                m.is_favorite,
                m.added_at,
            ])
            .with_context(|| format!("failed to upsert movie {}", m.id))?;
        changed = changed.saturating_add(rows);
    }

    drop(stmt);
    tx.commit().context("failed to commit movies upsert")?;
    Ok(changed)
}

/// Looks up a single movie summary row.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn movie_by_id(conn: &Connection, id: u64) -> Result<Option<CachedMovie>> {
    let sql = format!("SELECT {MOVIE_SELECT_COLUMNS} FROM movies WHERE id = ?1");
    conn.query_row(&sql, [id], movie_from_row)
        .optional()
        .with_context(|| format!("failed to query movie {id}"))
}

/// Loads all movie summary rows, most popular first.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[allow(clippy::module_name_repetitions)]
pub fn load_movies(conn: &Connection) -> Result<Vec<CachedMovie>> {
    let sql = format!("SELECT {MOVIE_SELECT_COLUMNS} FROM movies ORDER BY popularity DESC, id");
    let mut stmt = conn.prepare(&sql).context("failed to prepare movies query")?;

    let rows = stmt
        .query_map([], movie_from_row)
        .context("failed to query movies")?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .context("failed to read movies rows")
}

/// Loads favorited movie rows, most recently added first.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[allow(clippy::module_name_repetitions)]
pub fn load_favorite_movies(conn: &Connection) -> Result<Vec<CachedMovie>> {
    let sql = format!(
        "SELECT {MOVIE_SELECT_COLUMNS} FROM movies
         WHERE is_favorite = 1
         ORDER BY added_at DESC, id"
    );
    let mut stmt = conn
        .prepare(&sql)
        .context("failed to prepare favorite movies query")?;

    let rows = stmt
        .query_map([], movie_from_row)
        .context("failed to query favorite movies")?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .context("failed to read favorite movies rows")
}

/// Sets the favorite flag on a movie row, touching nothing else.
///
/// Updating a row that does not exist is a no-op.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn set_movie_favorite(conn: &Connection, id: u64, favorite: bool) -> Result<()> {
    conn.execute(
        "UPDATE movies SET is_favorite = ?1 WHERE id = ?2",
        rusqlite::params![favorite, id],
    )
    .with_context(|| format!("failed to update favorite flag for movie {id}"))?;
    Ok(())
}

/// Returns whether a movie row exists and is favorited.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn movie_is_favorite(conn: &Connection, id: u64) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM movies WHERE id = ?1 AND is_favorite = 1)",
        [id],
        |row| row.get(0),
    )
    .with_context(|| format!("failed to query favorite flag for movie {id}"))
}

/// Deletes all movie summary rows.
///
/// # Errors
///
/// Returns an error if the database operation fails.
#[allow(clippy::module_name_repetitions)]
pub fn clear_movies(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM movies", [])
        .context("failed to clear movies")?;
    Ok(())
}

/// Upserts a movie detail record. Last write wins.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn upsert_movie_details(conn: &Connection, details: &CachedMovieDetails) -> Result<()> {
    conn.execute(
        "INSERT INTO movie_details (
            id, title, original_title, overview, poster_path, backdrop_path,
            release_date, vote_average, vote_count, runtime, genres,
            budget, revenue, status, tagline, homepage, imdb_id,
            production_companies, is_favorite, cached_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)
        ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            original_title = excluded.original_title,
            overview = excluded.overview,
            poster_path = excluded.poster_path,
            backdrop_path = excluded.backdrop_path,
            release_date = excluded.release_date,
            vote_average = excluded.vote_average,
            vote_count = excluded.vote_count,
            runtime = excluded.runtime,
            genres = excluded.genres,
            budget = excluded.budget,
            revenue = excluded.revenue,
            status = excluded.status,
            tagline = excluded.tagline,
            homepage = excluded.homepage,
            imdb_id = excluded.imdb_id,
            production_companies = excluded.production_companies,
            is_favorite = excluded.is_favorite,
            cached_at = excluded.cached_at",
        rusqlite::params![
            details.id,
            details.title,
            details.original_title,
            details.overview,
            details.poster_path,
            details.backdrop_path,
            details.release_date,
            details.vote_average,
            details.vote_count,
            details.runtime,
            details.genres,
            details.budget,
            details.revenue,
            details.status,
            details.tagline,
            details.homepage,
            details.imdb_id,
            details.production_companies,
            details.is_favorite,
            details.cached_at,
        ],
    )
    .with_context(|| format!("failed to upsert movie details {}", details.id))?;
    Ok(())
}

/// Looks up a movie detail record.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn movie_details_by_id(conn: &Connection, id: u64) -> Result<Option<CachedMovieDetails>> {
    conn.query_row(
        "SELECT id, title, original_title, overview, poster_path, backdrop_path,
                release_date, vote_average, vote_count, runtime, genres,
                budget, revenue, status, tagline, homepage, imdb_id,
                production_companies, is_favorite, cached_at
         FROM movie_details
         WHERE id = ?1",
        [id],
        |row| {
            Ok(CachedMovieDetails {
                id: row.get(0)?,
                title: row.get(1)?,
                original_title: row.get(2)?,
                overview: row.get(3)?,
                poster_path: row.get(4)?,
                backdrop_path: row.get(5)?,
                release_date: row.get(6)?,
                vote_average: row.get(7)?,
                vote_count: row.get(8)?,
                runtime: row.get(9)?,
                genres: row.get(10)?,
                budget: row.get(11)?,
                revenue: row.get(12)?,
                status: row.get(13)?,
                tagline: row.get(14)?,
                homepage: row.get(15)?,
                imdb_id: row.get(16)?,
                production_companies: row.get(17)?,
                is_favorite: row.get(18)?,
                cached_at: row.get(19)?,
            })
        },
    )
    .optional()
    .with_context(|| format!("failed to query movie details {id}"))
}

/// Sets the favorite flag on a movie detail record.
///
/// Updating a record that does not exist is a no-op.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn set_movie_details_favorite(conn: &Connection, id: u64, favorite: bool) -> Result<()> {
    conn.execute(
        "UPDATE movie_details SET is_favorite = ?1 WHERE id = ?2",
        rusqlite::params![favorite, id],
    )
    .with_context(|| format!("failed to update favorite flag for movie details {id}"))?;
    Ok(())
}

/// Deletes movie detail records with `cached_at` strictly before `cutoff`.
/// Returns the number of rows deleted. Summary rows are never touched.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn delete_movie_details_older_than(conn: &Connection, cutoff: i64) -> Result<usize> {
    conn.execute("DELETE FROM movie_details WHERE cached_at < ?1", [cutoff])
        .context("failed to delete stale movie details")
}

/// Deletes all movie detail records.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn clear_movie_details(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM movie_details", [])
        .context("failed to clear movie details")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::connection::open_db;

    fn setup_db() -> (Connection, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let conn = open_db(Some(&dir.path().to_path_buf())).unwrap();
        (conn, dir)
    }

    fn make_movie(id: u64, title: &str, popularity: f64) -> CachedMovie {
        CachedMovie {
            id,
            title: String::from(title),
            overview: String::from("A test synopsis."),
            poster_path: Some(String::from("/poster.jpg")),
            backdrop_path: None,
            release_date: String::from("2010-07-15"),
            vote_average: 8.4,
            popularity,
            genre_ids: String::from("28,878,12"),
            is_favorite: false,
            added_at: 0,
        }
    }

    fn make_details(id: u64, cached_at: i64) -> CachedMovieDetails {
        CachedMovieDetails {
            id,
            title: String::from("Inception"),
            original_title: String::from("Inception"),
            overview: String::from("A thief who steals corporate secrets."),
            poster_path: Some(String::from("/poster.jpg")),
            backdrop_path: Some(String::from("/backdrop.jpg")),
            release_date: String::from("2010-07-15"),
            vote_average: 8.4,
            vote_count: 36000,
            runtime: 148,
            genres: String::from(r#"[{"id":28,"name":"Action"}]"#),
            budget: 160_000_000,
            revenue: 839_030_630,
            status: String::from("Released"),
            tagline: String::from("Your mind is the scene of the crime."),
            homepage: String::new(),
            imdb_id: String::from("tt1375666"),
            production_companies: String::from(r#"[{"id":923,"name":"Legendary Pictures"}]"#),
            is_favorite: false,
            cached_at,
        }
    }

    #[test]
    fn test_upsert_and_load_movies_ordered_by_popularity() {
        // Arrange
        let (conn, _dir) = setup_db();
        let movies = vec![
            make_movie(155, "The Dark Knight", 61.2),
            make_movie(27205, "Inception", 92.5),
        ];

        // Act
        let changed = upsert_movies(&conn, &movies).unwrap();
        let loaded = load_movies(&conn).unwrap();

        // Assert (ordered by popularity, descending)
        assert_eq!(changed, 2);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, 27205);
        assert_eq!(loaded[0].title, "Inception");
        assert_eq!(loaded[1].id, 155);
    }

    #[test]
    fn test_upsert_replaces_whole_row() {
        // Arrange
        let (conn, _dir) = setup_db();
        let mut movie = make_movie(27205, "Inception", 92.5);
        movie.is_favorite = true;
        upsert_movie(&conn, &movie).unwrap();

        // Act: upsert the same id with a fresh, unflagged row
        upsert_movie(&conn, &make_movie(27205, "Inception (refetched)", 95.0)).unwrap();
        let loaded = movie_by_id(&conn, 27205).unwrap().unwrap();

        // Assert: last write wins, favorite flag included
        assert_eq!(loaded.title, "Inception (refetched)");
        assert!(!loaded.is_favorite);
    }

    #[test]
    fn test_movie_by_id_missing_returns_none() {
        // Arrange
        let (conn, _dir) = setup_db();

        // Act
        let loaded = movie_by_id(&conn, 999).unwrap();

        // Assert
        assert!(loaded.is_none());
    }

    #[test]
    fn test_set_favorite_flips_flag_only() {
        // Arrange
        let (conn, _dir) = setup_db();
        upsert_movie(&conn, &make_movie(27205, "Inception", 92.5)).unwrap();

        // Act
        set_movie_favorite(&conn, 27205, true).unwrap();
        let loaded = movie_by_id(&conn, 27205).unwrap().unwrap();

        // Assert: flag set, the rest untouched
        assert!(loaded.is_favorite);
        assert_eq!(loaded.title, "Inception");
        assert_eq!(loaded.genre_ids, "28,878,12");
    }

    #[test]
    fn test_set_favorite_on_missing_row_is_noop() {
        // Arrange
        let (conn, _dir) = setup_db();

        // Act
        set_movie_favorite(&conn, 999, false).unwrap();

        // Assert
        assert!(movie_by_id(&conn, 999).unwrap().is_none());
    }

    #[test]
    fn test_unfavorite_preserves_row() {
        // Arrange
        let (conn, _dir) = setup_db();
        let mut movie = make_movie(27205, "Inception", 92.5);
        movie.is_favorite = true;
        upsert_movie(&conn, &movie).unwrap();

        // Act
        set_movie_favorite(&conn, 27205, false).unwrap();
        let loaded = movie_by_id(&conn, 27205).unwrap();

        // Assert: row retained, flag off
        let loaded = loaded.unwrap();
        assert!(!loaded.is_favorite);
        assert_eq!(loaded.title, "Inception");
    }

    #[test]
    fn test_movie_is_favorite() {
        // Arrange
        let (conn, _dir) = setup_db();
        upsert_movie(&conn, &make_movie(27205, "Inception", 92.5)).unwrap();

        // Act & Assert
        assert!(!movie_is_favorite(&conn, 999).unwrap());
        assert!(!movie_is_favorite(&conn, 27205).unwrap());
        set_movie_favorite(&conn, 27205, true).unwrap();
        assert!(movie_is_favorite(&conn, 27205).unwrap());
    }

    #[test]
    fn test_load_favorites_ordered_by_added_at_desc() {
        // Arrange
        let (conn, _dir) = setup_db();
        for (id, added_at) in [(100, 1000), (200, 3000), (300, 2000)] {
            let mut movie = make_movie(id, "Favorite", 50.0);
            movie.is_favorite = true;
            movie.added_at = added_at;
            upsert_movie(&conn, &movie).unwrap();
        }
        upsert_movie(&conn, &make_movie(400, "Not a favorite", 99.0)).unwrap();

        // Act
        let favorites = load_favorite_movies(&conn).unwrap();

        // Assert (most recently added first, unflagged rows excluded)
        assert_eq!(favorites.len(), 3);
        assert_eq!(favorites[0].id, 200);
        assert_eq!(favorites[1].id, 300);
        assert_eq!(favorites[2].id, 100);
    }

    #[test]
    fn test_upsert_and_get_movie_details() {
        // Arrange
        let (conn, _dir) = setup_db();
        let details = make_details(27205, 5000);

        // Act
        upsert_movie_details(&conn, &details).unwrap();
        let loaded = movie_details_by_id(&conn, 27205).unwrap();

        // Assert
        assert_eq!(loaded, Some(details));
    }

    #[test]
    fn test_delete_details_older_than_spares_fresh_and_summary_rows() {
        // Arrange
        let (conn, _dir) = setup_db();
        upsert_movie(&conn, &make_movie(27205, "Inception", 92.5)).unwrap();
        upsert_movie_details(&conn, &make_details(27205, 1000)).unwrap();
        upsert_movie_details(&conn, &make_details(157336, 9000)).unwrap();

        // Act
        let deleted = delete_movie_details_older_than(&conn, 5000).unwrap();

        // Assert: only the stale detail record goes
        assert_eq!(deleted, 1);
        assert!(movie_details_by_id(&conn, 27205).unwrap().is_none());
        assert!(movie_details_by_id(&conn, 157336).unwrap().is_some());
        assert!(movie_by_id(&conn, 27205).unwrap().is_some());
    }

    #[test]
    fn test_clear_movies_and_details() {
        // Arrange
        let (conn, _dir) = setup_db();
        upsert_movie(&conn, &make_movie(27205, "Inception", 92.5)).unwrap();
        upsert_movie_details(&conn, &make_details(27205, 1000)).unwrap();

        // Act
        clear_movies(&conn).unwrap();
        clear_movie_details(&conn).unwrap();

        // Assert
        assert!(load_movies(&conn).unwrap().is_empty());
        assert!(movie_details_by_id(&conn, 27205).unwrap().is_none());
    }
}
