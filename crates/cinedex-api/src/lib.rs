//! API client library for cinedex.
//!
//! Provides a client for the TMDB catalog API (movies, TV series, people).

/// TMDB API client.
pub mod tmdb;
