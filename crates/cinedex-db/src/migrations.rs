//! Schema version management using `PRAGMA user_version`.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Current schema version.
const CURRENT_VERSION: u32 = 2;

/// Runs database migrations up to `CURRENT_VERSION`.
///
/// # Errors
///
/// Returns an error if any SQL statement fails.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version")?;

    if version < 1 {
        migrate_v1(conn).context("migration to v1 failed")?;
    }
    if version < 2 {
        migrate_v2(conn).context("migration to v2 failed")?;
    }

    conn.pragma_update(None, "user_version", CURRENT_VERSION)
        .context("failed to update user_version")?;

    Ok(())
}

/// Migration to v1: create `movies` and `series` list tables.
fn migrate_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS movies (
            id             INTEGER PRIMARY KEY,
            title          TEXT NOT NULL,
            overview       TEXT NOT NULL,
            poster_path    TEXT,
            backdrop_path  TEXT,
            release_date   TEXT NOT NULL DEFAULT '',
            vote_average   REAL NOT NULL DEFAULT 0,
            popularity     REAL NOT NULL DEFAULT 0,
            genre_ids      TEXT NOT NULL DEFAULT '',
            is_favorite    INTEGER NOT NULL DEFAULT 0,
            added_at       INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS series (
            id             INTEGER PRIMARY KEY,
            name           TEXT NOT NULL,
            overview       TEXT NOT NULL,
            poster_path    TEXT,
            backdrop_path  TEXT,
            first_air_date TEXT NOT NULL DEFAULT '',
            vote_average   REAL NOT NULL DEFAULT 0,
            popularity     REAL NOT NULL DEFAULT 0,
            is_favorite    INTEGER NOT NULL DEFAULT 0,
            added_at       INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_movies_favorite ON movies(is_favorite, added_at);
        CREATE INDEX IF NOT EXISTS idx_series_favorite ON series(is_favorite, added_at);",
    )
    .context("failed to create list tables")?;

    Ok(())
}

/// Migration to v2: create `movie_details` and `series_details` tables.
fn migrate_v2(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS movie_details (
            id                   INTEGER PRIMARY KEY,
            title                TEXT NOT NULL,
            original_title       TEXT NOT NULL DEFAULT '',
            overview             TEXT NOT NULL,
            poster_path          TEXT,
            backdrop_path        TEXT,
            release_date         TEXT NOT NULL DEFAULT '',
            vote_average         REAL NOT NULL DEFAULT 0,
            vote_count           INTEGER NOT NULL DEFAULT 0,
            runtime              INTEGER NOT NULL DEFAULT 0,
            genres               TEXT NOT NULL DEFAULT '[]',
            budget               INTEGER NOT NULL DEFAULT 0,
            revenue              INTEGER NOT NULL DEFAULT 0,
            status               TEXT NOT NULL DEFAULT '',
            tagline              TEXT NOT NULL DEFAULT '',
            homepage             TEXT NOT NULL DEFAULT '',
            imdb_id              TEXT NOT NULL DEFAULT '',
            production_companies TEXT NOT NULL DEFAULT '[]',
            is_favorite          INTEGER NOT NULL DEFAULT 0,
            cached_at            INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS series_details (
            id                   INTEGER PRIMARY KEY,
            name                 TEXT NOT NULL,
            original_name        TEXT NOT NULL DEFAULT '',
            overview             TEXT NOT NULL,
            poster_path          TEXT,
            backdrop_path        TEXT,
            first_air_date       TEXT NOT NULL DEFAULT '',
            vote_average         REAL NOT NULL DEFAULT 0,
            vote_count           INTEGER NOT NULL DEFAULT 0,
            number_of_seasons    INTEGER NOT NULL DEFAULT 0,
            number_of_episodes   INTEGER NOT NULL DEFAULT 0,
            genres               TEXT NOT NULL DEFAULT '[]',
            production_companies TEXT NOT NULL DEFAULT '[]',
            status               TEXT NOT NULL DEFAULT '',
            tagline              TEXT NOT NULL DEFAULT '',
            homepage             TEXT NOT NULL DEFAULT '',
            is_favorite          INTEGER NOT NULL DEFAULT 0,
            cached_at            INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_movie_details_cached_at ON movie_details(cached_at);
        CREATE INDEX IF NOT EXISTS idx_series_details_cached_at ON series_details(cached_at);",
    )
    .context("failed to create detail tables")?;

    Ok(())
}
