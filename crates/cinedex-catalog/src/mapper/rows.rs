//! Domain-to-row and row-to-domain mapping.
//!
//! Rows store bare image paths and encode genre lists as CSV and the
//! typed detail lists as JSON documents. Decoding is lenient: a malformed
//! embedded document yields an empty list rather than an error.

use cinedex_db::{CachedMovie, CachedMovieDetails, CachedSeries, CachedSeriesDetails};

use super::{image_url, BACKDROP_SIZE, DETAIL_BACKDROP_SIZE, IMAGE_BASE, POSTER_SIZE};
use crate::model::{Genre, Movie, MovieDetails, ProductionCompany, Series, SeriesDetails};

/// Strips a full CDN URL back to the bare image path.
///
/// URLs that do not point at the image CDN, and empty strings, both
/// yield `None` so the column stores NULL.
fn image_path(url: &str) -> Option<String> {
    let rest = url.strip_prefix(IMAGE_BASE)?;
    let slash = rest.find('/')?;
    rest.get(slash..).map(String::from)
}

fn encode_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn decode_ids(raw: &str) -> Vec<u32> {
    raw.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

fn encode_list<T: serde::Serialize>(values: &[T]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| String::from("[]"))
}

fn decode_list<T: serde::de::DeserializeOwned>(raw: &str) -> Vec<T> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Converts a domain movie into a cache row.
#[must_use]
pub fn movie_row(movie: &Movie, is_favorite: bool, added_at: i64) -> CachedMovie {
    CachedMovie {
        id: movie.id,
        title: movie.title.clone(),
        overview: movie.overview.clone(),
        poster_path: image_path(&movie.poster_url),
        backdrop_path: image_path(&movie.backdrop_url),
        release_date: movie.release_date.clone(),
        vote_average: movie.vote_average,
        popularity: movie.popularity,
        genre_ids: encode_ids(&movie.genre_ids),
        is_favorite,
        added_at,
    }
}

/// Converts a cache row back into a domain movie.
#[must_use]
pub fn movie(row: &CachedMovie) -> Movie {
    Movie {
        id: row.id,
        title: row.title.clone(),
        overview: row.overview.clone(),
        poster_url: image_url(POSTER_SIZE, row.poster_path.as_deref()),
        backdrop_url: image_url(BACKDROP_SIZE, row.backdrop_path.as_deref()),
        release_date: row.release_date.clone(),
        vote_average: row.vote_average,
        popularity: row.popularity,
        genre_ids: decode_ids(&row.genre_ids),
    }
}

/// Converts a slice of cache rows into domain movies.
#[must_use]
pub fn movies(rows: &[CachedMovie]) -> Vec<Movie> {
    rows.iter().map(movie).collect()
}

/// Converts a domain series into a cache row.
#[must_use]
pub fn series_row(series: &Series, is_favorite: bool, added_at: i64) -> CachedSeries {
    CachedSeries {
        id: series.id,
        name: series.name.clone(),
        overview: series.overview.clone(),
        poster_path: image_path(&series.poster_url),
        backdrop_path: image_path(&series.backdrop_url),
        first_air_date: series.first_air_date.clone(),
        vote_average: series.vote_average,
        popularity: series.popularity,
        is_favorite,
        added_at,
    }
}

/// Converts a cache row back into a domain series.
#[must_use]
pub fn series(row: &CachedSeries) -> Series {
    Series {
        id: row.id,
        name: row.name.clone(),
        overview: row.overview.clone(),
        poster_url: image_url(POSTER_SIZE, row.poster_path.as_deref()),
        backdrop_url: image_url(BACKDROP_SIZE, row.backdrop_path.as_deref()),
        first_air_date: row.first_air_date.clone(),
        vote_average: row.vote_average,
        popularity: row.popularity,
    }
}

/// Converts a slice of cache rows into domain series.
#[must_use]
pub fn series_list(rows: &[CachedSeries]) -> Vec<Series> {
    rows.iter().map(series).collect()
}

/// Converts a movie detail record into a cache row.
#[must_use]
pub fn movie_details_row(
    details: &MovieDetails,
    is_favorite: bool,
    cached_at: i64,
) -> CachedMovieDetails {
    CachedMovieDetails {
        id: details.id,
        title: details.title.clone(),
        original_title: details.original_title.clone(),
        overview: details.overview.clone(),
        poster_path: image_path(&details.poster_url),
        backdrop_path: image_path(&details.backdrop_url),
        release_date: details.release_date.clone(),
        vote_average: details.vote_average,
        vote_count: details.vote_count,
        runtime: details.runtime,
        genres: encode_list(&details.genres),
        budget: details.budget,
        revenue: details.revenue,
        status: details.status.clone(),
        tagline: details.tagline.clone(),
        homepage: details.homepage.clone(),
        imdb_id: details.imdb_id.clone(),
        production_companies: encode_list(&details.production_companies),
        is_favorite,
        cached_at,
    }
}

/// Converts a cache row back into a movie detail record.
#[must_use]
pub fn movie_details(row: &CachedMovieDetails) -> MovieDetails {
    MovieDetails {
        id: row.id,
        title: row.title.clone(),
        original_title: row.original_title.clone(),
        overview: row.overview.clone(),
        poster_url: image_url(POSTER_SIZE, row.poster_path.as_deref()),
        backdrop_url: image_url(DETAIL_BACKDROP_SIZE, row.backdrop_path.as_deref()),
        release_date: row.release_date.clone(),
        vote_average: row.vote_average,
        vote_count: row.vote_count,
        runtime: row.runtime,
        genres: decode_list::<Genre>(&row.genres),
        budget: row.budget,
        revenue: row.revenue,
        status: row.status.clone(),
        tagline: row.tagline.clone(),
        homepage: row.homepage.clone(),
        imdb_id: row.imdb_id.clone(),
        production_companies: decode_list::<ProductionCompany>(&row.production_companies),
    }
}

/// Converts a series detail record into a cache row.
#[must_use]
pub fn series_details_row(
    details: &SeriesDetails,
    is_favorite: bool,
    cached_at: i64,
) -> CachedSeriesDetails {
    CachedSeriesDetails {
        id: details.id,
        name: details.name.clone(),
        original_name: details.original_name.clone(),
        overview: details.overview.clone(),
        poster_path: image_path(&details.poster_url),
        backdrop_path: image_path(&details.backdrop_url),
        first_air_date: details.first_air_date.clone(),
        vote_average: details.vote_average,
        vote_count: details.vote_count,
        number_of_seasons: details.number_of_seasons,
        number_of_episodes: details.number_of_episodes,
        genres: encode_list(&details.genres),
        production_companies: encode_list(&details.production_companies),
        status: details.status.clone(),
        tagline: details.tagline.clone(),
        homepage: details.homepage.clone(),
        is_favorite,
        cached_at,
    }
}

/// Converts a cache row back into a series detail record.
#[must_use]
pub fn series_details(row: &CachedSeriesDetails) -> SeriesDetails {
    SeriesDetails {
        id: row.id,
        name: row.name.clone(),
        original_name: row.original_name.clone(),
        overview: row.overview.clone(),
        poster_url: image_url(POSTER_SIZE, row.poster_path.as_deref()),
        backdrop_url: image_url(DETAIL_BACKDROP_SIZE, row.backdrop_path.as_deref()),
        first_air_date: row.first_air_date.clone(),
        vote_average: row.vote_average,
        vote_count: row.vote_count,
        number_of_seasons: row.number_of_seasons,
        number_of_episodes: row.number_of_episodes,
        genres: decode_list::<Genre>(&row.genres),
        production_companies: decode_list::<ProductionCompany>(&row.production_companies),
        status: row.status.clone(),
        tagline: row.tagline.clone(),
        homepage: row.homepage.clone(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn sample_movie() -> Movie {
        Movie {
            id: 27_205,
            title: String::from("Inception"),
            overview: String::from("A thief who steals corporate secrets."),
            poster_url: String::from(
                "https://image.tmdb.org/t/p/w500/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
            ),
            backdrop_url: String::from(
                "https://image.tmdb.org/t/p/w500/8ZTVqvKDQ8emSGUEMjsS4yHAwrp.jpg",
            ),
            release_date: String::from("2010-07-15"),
            vote_average: 8.4,
            popularity: 29.1,
            genre_ids: vec![28, 878, 12],
        }
    }

    fn sample_movie_details() -> MovieDetails {
        MovieDetails {
            id: 27_205,
            title: String::from("Inception"),
            original_title: String::from("Inception"),
            overview: String::from("A thief who steals corporate secrets."),
            poster_url: String::from(
                "https://image.tmdb.org/t/p/w500/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
            ),
            backdrop_url: String::new(),
            release_date: String::from("2010-07-15"),
            vote_average: 8.4,
            vote_count: 36_947,
            runtime: 148,
            genres: vec![
                Genre { id: 28, name: String::from("Action") },
                Genre { id: 878, name: String::from("Science Fiction") },
            ],
            budget: 160_000_000,
            revenue: 839_030_630,
            status: String::from("Released"),
            tagline: String::from("Your mind is the scene of the crime."),
            homepage: String::new(),
            imdb_id: String::from("tt1375666"),
            production_companies: vec![ProductionCompany {
                id: 9_996,
                name: String::from("Syncopy"),
                logo_path: String::from("/3tvBqYsBhxWeHlu62SIJ1el93O7.png"),
                origin_country: String::from("GB"),
            }],
        }
    }

    #[test]
    fn test_movie_round_trips_through_row() {
        let original = sample_movie();

        let row = movie_row(&original, false, 1_700_000_000_000);
        let restored = movie(&row);

        assert_eq!(restored, original);
        assert_eq!(row.poster_path.as_deref(), Some("/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg"));
        assert_eq!(row.genre_ids, "28,878,12");
    }

    #[test]
    fn test_empty_image_urls_store_null() {
        let mut original = sample_movie();
        original.poster_url = String::new();
        original.backdrop_url = String::new();

        let row = movie_row(&original, false, 0);

        assert_eq!(row.poster_path, None);
        assert_eq!(row.backdrop_path, None);
        assert_eq!(movie(&row).poster_url, "");
    }

    #[test]
    fn test_series_round_trips_through_row() {
        let original = Series {
            id: 1_396,
            name: String::from("Breaking Bad"),
            overview: String::from("A chemistry teacher turns to crime."),
            poster_url: String::from(
                "https://image.tmdb.org/t/p/w500/ztkUQFLlC19CCMYHW9o1zWhJRNq.jpg",
            ),
            backdrop_url: String::new(),
            first_air_date: String::from("2008-01-20"),
            vote_average: 8.9,
            popularity: 150.0,
        };

        let restored = series(&series_row(&original, true, 42));

        assert_eq!(restored, original);
    }

    #[test]
    fn test_movie_details_round_trips_embedded_lists() {
        let original = sample_movie_details();

        let row = movie_details_row(&original, true, 1_700_000_000_000);
        let restored = movie_details(&row);

        assert_eq!(restored, original);
        assert!(row.genres.starts_with('['));
        assert!(row.production_companies.contains("Syncopy"));
    }

    #[test]
    fn test_row_backdrops_rebuild_at_per_context_renditions() {
        let mut list_src = sample_movie();
        list_src.backdrop_url =
            String::from("https://image.tmdb.org/t/p/w500/8ZTVqvKDQ8emSGUEMjsS4yHAwrp.jpg");
        let mut details_src = sample_movie_details();
        details_src.backdrop_url =
            String::from("https://image.tmdb.org/t/p/w780/8ZTVqvKDQ8emSGUEMjsS4yHAwrp.jpg");

        let from_list = movie(&movie_row(&list_src, false, 0));
        let from_details = movie_details(&movie_details_row(&details_src, false, 0));

        assert_eq!(
            from_list.backdrop_url,
            "https://image.tmdb.org/t/p/w500/8ZTVqvKDQ8emSGUEMjsS4yHAwrp.jpg"
        );
        assert_eq!(
            from_details.backdrop_url,
            "https://image.tmdb.org/t/p/w780/8ZTVqvKDQ8emSGUEMjsS4yHAwrp.jpg"
        );
    }

    #[test]
    fn test_malformed_embedded_json_decodes_to_empty() {
        let mut row = movie_details_row(&sample_movie_details(), false, 0);
        row.genres = String::from("not json");
        row.production_companies = String::from("{broken");

        let restored = movie_details(&row);

        assert!(restored.genres.is_empty());
        assert!(restored.production_companies.is_empty());
    }

    #[test]
    fn test_series_details_round_trips_through_row() {
        let original = SeriesDetails {
            id: 1_396,
            name: String::from("Breaking Bad"),
            original_name: String::from("Breaking Bad"),
            overview: String::from("A chemistry teacher turns to crime."),
            poster_url: String::new(),
            backdrop_url: String::from(
                "https://image.tmdb.org/t/p/w780/gc8PfyTqzqltKPW3X0cIVUGmagz.jpg",
            ),
            first_air_date: String::from("2008-01-20"),
            vote_average: 8.9,
            vote_count: 12_000,
            number_of_seasons: 5,
            number_of_episodes: 62,
            genres: vec![Genre { id: 18, name: String::from("Drama") }],
            production_companies: Vec::new(),
            status: String::from("Ended"),
            tagline: String::from("Remember my name."),
            homepage: String::new(),
        };

        let restored = series_details(&series_details_row(&original, false, 7));

        assert_eq!(restored, original);
    }

    #[test]
    fn test_genre_ids_survive_blank_and_garbage_parts() {
        assert_eq!(decode_ids(""), Vec::<u32>::new());
        assert_eq!(decode_ids("28, 12,abc,878"), vec![28, 12, 878]);
        assert_eq!(encode_ids(&[]), "");
    }

    #[test]
    fn test_foreign_urls_are_not_stored_as_paths() {
        let mut original = sample_movie();
        original.poster_url = String::from("https://example.com/poster.jpg");

        let row = movie_row(&original, false, 0);

        assert_eq!(row.poster_path, None);
    }
}
