//! Repository façade over the TMDB client and the local cache store.
//!
//! Catalog reads go to the network and come back as domain values; the
//! favorites shelf and cached lists are served from the store as live
//! queries. Writes land in the store, which re-emits snapshots to every
//! subscriber.

#![allow(clippy::future_not_send)]

use anyhow::Result;
use cinedex_api::tmdb::{DiscoverMovieParams, DiscoverTvParams, LocalTmdbApi};
use cinedex_db::{CachedMovie, CachedSeries, CatalogStore, LiveQuery, MappedLiveQuery};

use crate::mapper::{remote, rows};
use crate::model::{
    pick_trailer, Credits, Movie, MovieDetails, PersonCredits, PersonDetails, Series,
    SeriesDetails, Video,
};

/// Live list of domain movies backed by a cache query.
pub type LiveMovies = MappedLiveQuery<Vec<CachedMovie>, Vec<Movie>>;

/// Live list of domain series backed by a cache query.
pub type LiveSeries = MappedLiveQuery<Vec<CachedSeries>, Vec<Series>>;

/// The four shelves of the home screen, fetched in one call.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeFeed {
    /// Movies trending today.
    pub trending_movies: Vec<Movie>,
    /// Popular movies, first page.
    pub popular_movies: Vec<Movie>,
    /// Series trending today.
    pub trending_series: Vec<Series>,
    /// Popular series, first page.
    pub popular_series: Vec<Series>,
}

/// Everything the movie detail view needs in one fetch.
///
/// Only the detail record is load-bearing; videos, credits, and similar
/// titles degrade to empty values when their requests fail.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetailBundle {
    /// The detail record.
    pub details: MovieDetails,
    /// Attached videos, empty when the fetch failed.
    pub videos: Vec<Video>,
    /// Cast and crew, empty when the fetch failed.
    pub credits: Credits,
    /// Similar movies, empty when the fetch failed.
    pub similar: Vec<Movie>,
    /// The best trailer among `videos`, if any.
    pub trailer: Option<Video>,
}

/// Everything the series detail view needs in one fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDetailBundle {
    /// The detail record.
    pub details: SeriesDetails,
    /// Attached videos, empty when the fetch failed.
    pub videos: Vec<Video>,
    /// Cast and crew, empty when the fetch failed.
    pub credits: Credits,
    /// Similar series, empty when the fetch failed.
    pub similar: Vec<Series>,
    /// The best trailer among `videos`, if any.
    pub trailer: Option<Video>,
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Façade composing a TMDB API implementation with the catalog store.
#[derive(Debug)]
pub struct CatalogRepository<A> {
    api: A,
    store: CatalogStore,
}

impl<A> CatalogRepository<A> {
    /// Creates a repository from its two collaborators.
    #[must_use]
    pub const fn new(api: A, store: CatalogStore) -> Self {
        Self { api, store }
    }
}

impl<A: LocalTmdbApi> CatalogRepository<A> {
    // Movie catalog, network backed.

    /// Popular movies, one page.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn popular_movies(&self, page: u32) -> Result<Vec<Movie>> {
        Ok(remote::movies(&self.api.popular_movies(page).await?))
    }

    /// Top rated movies, one page.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn top_rated_movies(&self, page: u32) -> Result<Vec<Movie>> {
        Ok(remote::movies(&self.api.top_rated_movies(page).await?))
    }

    /// Movies trending today.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn trending_movies(&self) -> Result<Vec<Movie>> {
        Ok(remote::movies(&self.api.trending_movies().await?))
    }

    /// Full detail record for one movie.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn movie_details(&self, id: u64) -> Result<MovieDetails> {
        Ok(remote::movie_details(&self.api.movie_details(id).await?))
    }

    /// Videos attached to a movie.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn movie_videos(&self, id: u64) -> Result<Vec<Video>> {
        Ok(remote::videos(&self.api.movie_videos(id).await?))
    }

    /// Cast and crew of a movie.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn movie_credits(&self, id: u64) -> Result<Credits> {
        Ok(remote::credits(&self.api.movie_credits(id).await?))
    }

    /// Movies similar to the given one.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn similar_movies(&self, id: u64, page: u32) -> Result<Vec<Movie>> {
        Ok(remote::movies(&self.api.similar_movies(id, page).await?))
    }

    /// Recommendations seeded by the given movie.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn movie_recommendations(&self, id: u64, page: u32) -> Result<Vec<Movie>> {
        Ok(remote::movies(&self.api.movie_recommendations(id, page).await?))
    }

    /// Free-text movie search. A blank query returns an empty list
    /// without touching the network.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn search_movies(&self, query: &str, page: u32) -> Result<Vec<Movie>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(remote::movies(&self.api.search_movies(query, page).await?))
    }

    /// Filtered movie discovery.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn discover_movies(&self, params: &DiscoverMovieParams) -> Result<Vec<Movie>> {
        Ok(remote::movies(&self.api.discover_movies(params).await?))
    }

    // Series catalog, network backed.

    /// Popular series, one page.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn popular_series(&self, page: u32) -> Result<Vec<Series>> {
        Ok(remote::series_list(&self.api.popular_tv(page).await?))
    }

    /// Top rated series, one page.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn top_rated_series(&self, page: u32) -> Result<Vec<Series>> {
        Ok(remote::series_list(&self.api.top_rated_tv(page).await?))
    }

    /// Series trending today.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn trending_series(&self) -> Result<Vec<Series>> {
        Ok(remote::series_list(&self.api.trending_tv().await?))
    }

    /// Full detail record for one series.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn series_details(&self, id: u64) -> Result<SeriesDetails> {
        Ok(remote::series_details(&self.api.tv_details(id).await?))
    }

    /// Videos attached to a series.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn series_videos(&self, id: u64) -> Result<Vec<Video>> {
        Ok(remote::videos(&self.api.tv_videos(id).await?))
    }

    /// Cast and crew of a series.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn series_credits(&self, id: u64) -> Result<Credits> {
        Ok(remote::credits(&self.api.tv_credits(id).await?))
    }

    /// Series similar to the given one.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn similar_series(&self, id: u64, page: u32) -> Result<Vec<Series>> {
        Ok(remote::series_list(&self.api.similar_tv(id, page).await?))
    }

    /// Recommendations seeded by the given series.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn series_recommendations(&self, id: u64, page: u32) -> Result<Vec<Series>> {
        Ok(remote::series_list(&self.api.tv_recommendations(id, page).await?))
    }

    /// Free-text series search. A blank query returns an empty list
    /// without touching the network.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn search_series(&self, query: &str, page: u32) -> Result<Vec<Series>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(remote::series_list(&self.api.search_tv(query, page).await?))
    }

    /// Filtered series discovery.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn discover_series(&self, params: &DiscoverTvParams) -> Result<Vec<Series>> {
        Ok(remote::series_list(&self.api.discover_tv(params).await?))
    }

    // People.

    /// Detail record for one person.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn person_details(&self, id: u64) -> Result<PersonDetails> {
        Ok(remote::person_details(&self.api.person_details(id).await?))
    }

    /// Combined movie and TV credits for one person.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    pub async fn person_credits(&self, id: u64) -> Result<PersonCredits> {
        Ok(remote::person_credits(&self.api.person_credits(id).await?))
    }

    // Aggregations.

    /// Fetches all four home screen shelves. Any failed shelf fails the
    /// whole feed.
    ///
    /// # Errors
    ///
    /// Returns an error when any of the four requests fails.
    pub async fn home_feed(&self) -> Result<HomeFeed> {
        let trending_movies = self.trending_movies().await?;
        let popular_movies = self.popular_movies(1).await?;
        let trending_series = self.trending_series().await?;
        let popular_series = self.popular_series(1).await?;
        Ok(HomeFeed {
            trending_movies,
            popular_movies,
            trending_series,
            popular_series,
        })
    }

    /// Fetches the detail record plus videos, credits, and similar titles
    /// for one movie. The detail request is load-bearing; the other three
    /// degrade to empty values on failure.
    ///
    /// # Errors
    ///
    /// Returns an error when the detail request fails.
    pub async fn movie_detail_bundle(&self, id: u64) -> Result<MovieDetailBundle> {
        let details = self.movie_details(id).await?;

        let videos = match self.movie_videos(id).await {
            Ok(videos) => videos,
            Err(error) => {
                tracing::warn!(movie_id = id, %error, "videos fetch failed, continuing without");
                Vec::new()
            }
        };
        let credits = match self.movie_credits(id).await {
            Ok(credits) => credits,
            Err(error) => {
                tracing::warn!(movie_id = id, %error, "credits fetch failed, continuing without");
                Credits::default()
            }
        };
        let similar = match self.similar_movies(id, 1).await {
            Ok(similar) => similar,
            Err(error) => {
                tracing::warn!(movie_id = id, %error, "similar fetch failed, continuing without");
                Vec::new()
            }
        };
        let trailer = pick_trailer(&videos).cloned();

        Ok(MovieDetailBundle { details, videos, credits, similar, trailer })
    }

    /// Fetches the detail record plus videos, credits, and similar titles
    /// for one series. The detail request is load-bearing; the other three
    /// degrade to empty values on failure.
    ///
    /// # Errors
    ///
    /// Returns an error when the detail request fails.
    pub async fn series_detail_bundle(&self, id: u64) -> Result<SeriesDetailBundle> {
        let details = self.series_details(id).await?;

        let videos = match self.series_videos(id).await {
            Ok(videos) => videos,
            Err(error) => {
                tracing::warn!(series_id = id, %error, "videos fetch failed, continuing without");
                Vec::new()
            }
        };
        let credits = match self.series_credits(id).await {
            Ok(credits) => credits,
            Err(error) => {
                tracing::warn!(series_id = id, %error, "credits fetch failed, continuing without");
                Credits::default()
            }
        };
        let similar = match self.similar_series(id, 1).await {
            Ok(similar) => similar,
            Err(error) => {
                tracing::warn!(series_id = id, %error, "similar fetch failed, continuing without");
                Vec::new()
            }
        };
        let trailer = pick_trailer(&videos).cloned();

        Ok(SeriesDetailBundle { details, videos, credits, similar, trailer })
    }
}

impl<A> CatalogRepository<A> {
    // Cache reads.

    /// Live view of every cached movie, most popular first.
    #[must_use]
    pub fn cached_movies(&self) -> LiveMovies {
        self.store.watch_movies().map(|rows| rows::movies(&rows))
    }

    /// Live view of favorite movies, most recently added first.
    #[must_use]
    pub fn favorite_movies(&self) -> LiveMovies {
        self.store
            .watch_favorite_movies()
            .map(|rows| rows::movies(&rows))
    }

    /// One cached movie, if present.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache read fails.
    pub async fn cached_movie(&self, id: u64) -> Result<Option<Movie>> {
        Ok(self.store.movie_by_id(id).await?.as_ref().map(rows::movie))
    }

    /// Whether a movie is currently a favorite.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache read fails.
    pub async fn is_movie_favorite(&self, id: u64) -> Result<bool> {
        self.store.movie_is_favorite(id).await
    }

    /// Live view of one movie's favorite flag.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache read fails.
    pub async fn watch_movie_favorite(&self, id: u64) -> Result<LiveQuery<bool>> {
        self.store.watch_movie_favorite(id).await
    }

    /// Cached detail record for one movie, if present.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache read fails.
    pub async fn cached_movie_details(&self, id: u64) -> Result<Option<MovieDetails>> {
        Ok(self
            .store
            .movie_details_by_id(id)
            .await?
            .as_ref()
            .map(rows::movie_details))
    }

    /// Live view of every cached series, most popular first.
    #[must_use]
    pub fn cached_series(&self) -> LiveSeries {
        self.store.watch_series().map(|rows| rows::series_list(&rows))
    }

    /// Live view of favorite series, most recently added first.
    #[must_use]
    pub fn favorite_series(&self) -> LiveSeries {
        self.store
            .watch_favorite_series()
            .map(|rows| rows::series_list(&rows))
    }

    /// One cached series, if present.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache read fails.
    pub async fn cached_series_by_id(&self, id: u64) -> Result<Option<Series>> {
        Ok(self.store.series_by_id(id).await?.as_ref().map(rows::series))
    }

    /// Whether a series is currently a favorite.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache read fails.
    pub async fn is_series_favorite(&self, id: u64) -> Result<bool> {
        self.store.series_is_favorite(id).await
    }

    /// Live view of one series' favorite flag.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache read fails.
    pub async fn watch_series_favorite(&self, id: u64) -> Result<LiveQuery<bool>> {
        self.store.watch_series_favorite(id).await
    }

    /// Cached detail record for one series, if present.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache read fails.
    pub async fn cached_series_details(&self, id: u64) -> Result<Option<SeriesDetails>> {
        Ok(self
            .store
            .series_details_by_id(id)
            .await?
            .as_ref()
            .map(rows::series_details))
    }

    // Cache writes.

    /// Marks a movie as a favorite, storing its full row.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache write fails.
    pub async fn add_movie_to_favorites(&self, movie: &Movie) -> Result<()> {
        let row = rows::movie_row(movie, true, now_millis());
        self.store.upsert_movie(&row).await?;
        self.store.set_movie_details_favorite(movie.id, true).await
    }

    /// Clears a movie's favorite flag. The row stays cached.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache write fails.
    pub async fn remove_movie_from_favorites(&self, id: u64) -> Result<()> {
        self.store.set_movie_favorite(id, false).await?;
        self.store.set_movie_details_favorite(id, false).await
    }

    /// Flips a movie's favorite state and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache write fails.
    pub async fn toggle_movie_favorite(&self, movie: &Movie) -> Result<bool> {
        if self.store.movie_is_favorite(movie.id).await? {
            self.remove_movie_from_favorites(movie.id).await?;
            Ok(false)
        } else {
            self.add_movie_to_favorites(movie).await?;
            Ok(true)
        }
    }

    /// Caches a list of movies as plain, non-favorite rows. Returns the
    /// number of rows written.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache write fails.
    pub async fn cache_movies(&self, movies: &[Movie]) -> Result<usize> {
        let now = now_millis();
        let cached: Vec<CachedMovie> = movies
            .iter()
            .map(|movie| rows::movie_row(movie, false, now))
            .collect();
        self.store.upsert_movies(&cached).await
    }

    /// Caches a movie detail record, carrying over the title's current
    /// favorite state.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache write fails.
    pub async fn cache_movie_details(&self, details: &MovieDetails) -> Result<()> {
        let favorite = self.store.movie_is_favorite(details.id).await?;
        let row = rows::movie_details_row(details, favorite, now_millis());
        self.store.upsert_movie_details(&row).await
    }

    /// Marks a series as a favorite, storing its full row.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache write fails.
    pub async fn add_series_to_favorites(&self, series: &Series) -> Result<()> {
        let row = rows::series_row(series, true, now_millis());
        self.store.upsert_series(&row).await?;
        self.store.set_series_details_favorite(series.id, true).await
    }

    /// Clears a series' favorite flag. The row stays cached.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache write fails.
    pub async fn remove_series_from_favorites(&self, id: u64) -> Result<()> {
        self.store.set_series_favorite(id, false).await?;
        self.store.set_series_details_favorite(id, false).await
    }

    /// Flips a series' favorite state and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache write fails.
    pub async fn toggle_series_favorite(&self, series: &Series) -> Result<bool> {
        if self.store.series_is_favorite(series.id).await? {
            self.remove_series_from_favorites(series.id).await?;
            Ok(false)
        } else {
            self.add_series_to_favorites(series).await?;
            Ok(true)
        }
    }

    /// Caches a list of series as plain, non-favorite rows. Returns the
    /// number of rows written.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache write fails.
    pub async fn cache_series_list(&self, series: &[Series]) -> Result<usize> {
        let now = now_millis();
        let cached: Vec<CachedSeries> = series
            .iter()
            .map(|series| rows::series_row(series, false, now))
            .collect();
        self.store.upsert_series_list(&cached).await
    }

    /// Caches a series detail record, carrying over the title's current
    /// favorite state.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache write fails.
    pub async fn cache_series_details(&self, details: &SeriesDetails) -> Result<()> {
        let favorite = self.store.series_is_favorite(details.id).await?;
        let row = rows::series_details_row(details, favorite, now_millis());
        self.store.upsert_series_details(&row).await
    }

    // Maintenance.

    /// Deletes detail rows cached before `cutoff` (epoch milliseconds).
    /// List rows, favorites included, are untouched. Returns the number
    /// of deleted rows.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache write fails.
    pub async fn evict_stale_details(&self, cutoff: i64) -> Result<usize> {
        self.store.evict_details_older_than(cutoff).await
    }

    /// Empties the whole cache, favorites included.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache write fails.
    pub async fn clear_cache(&self) -> Result<()> {
        self.store.clear().await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::sync::atomic::{AtomicU32, Ordering};

    use anyhow::bail;
    use cinedex_api::tmdb::{
        TmdbClient, TmdbCredits, TmdbMovieDetails, TmdbMovieListResponse, TmdbPersonCredits,
        TmdbPersonDetails, TmdbTvDetails, TmdbTvListResponse, TmdbVideoListResponse,
    };
    use url::Url;
    use wiremock::matchers::any;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    struct MockTmdbApi {
        movie_page: TmdbMovieListResponse,
        tv_page: TmdbTvListResponse,
        movie_detail: TmdbMovieDetails,
        tv_detail: TmdbTvDetails,
        videos: TmdbVideoListResponse,
        credits: TmdbCredits,
        person: TmdbPersonDetails,
        person_credits: TmdbPersonCredits,
        search_calls: AtomicU32,
        fail_details: bool,
        fail_aux: bool,
    }

    impl MockTmdbApi {
        fn healthy() -> Self {
            Self {
                movie_page: parse(include_str!("../../../fixtures/tmdb/movie_list.json")),
                tv_page: parse(include_str!("../../../fixtures/tmdb/tv_list.json")),
                movie_detail: parse(include_str!(
                    "../../../fixtures/tmdb/movie_details_27205.json"
                )),
                tv_detail: parse(include_str!("../../../fixtures/tmdb/tv_details_1396.json")),
                videos: parse(include_str!(
                    "../../../fixtures/tmdb/movie_videos_27205.json"
                )),
                credits: parse(include_str!(
                    "../../../fixtures/tmdb/movie_credits_27205.json"
                )),
                person: parse(include_str!(
                    "../../../fixtures/tmdb/person_details_525.json"
                )),
                person_credits: parse(include_str!(
                    "../../../fixtures/tmdb/person_credits_525.json"
                )),
                search_calls: AtomicU32::new(0),
                fail_details: false,
                fail_aux: false,
            }
        }

        fn with_failing_aux() -> Self {
            Self { fail_aux: true, ..Self::healthy() }
        }

        fn with_failing_details() -> Self {
            Self { fail_details: true, ..Self::healthy() }
        }
    }

    fn parse<T: serde::de::DeserializeOwned>(raw: &str) -> T {
        serde_json::from_str(raw).unwrap()
    }

    impl cinedex_api::tmdb::LocalTmdbApi for MockTmdbApi {
        async fn popular_movies(&self, _page: u32) -> Result<TmdbMovieListResponse> {
            Ok(self.movie_page.clone())
        }

        async fn top_rated_movies(&self, _page: u32) -> Result<TmdbMovieListResponse> {
            Ok(self.movie_page.clone())
        }

        async fn trending_movies(&self) -> Result<TmdbMovieListResponse> {
            Ok(self.movie_page.clone())
        }

        async fn movie_details(&self, _movie_id: u64) -> Result<TmdbMovieDetails> {
            if self.fail_details {
                bail!("details endpoint down");
            }
            Ok(self.movie_detail.clone())
        }

        async fn movie_videos(&self, _movie_id: u64) -> Result<TmdbVideoListResponse> {
            if self.fail_aux {
                bail!("videos endpoint down");
            }
            Ok(self.videos.clone())
        }

        async fn movie_credits(&self, _movie_id: u64) -> Result<TmdbCredits> {
            if self.fail_aux {
                bail!("credits endpoint down");
            }
            Ok(self.credits.clone())
        }

        async fn similar_movies(
            &self,
            _movie_id: u64,
            _page: u32,
        ) -> Result<TmdbMovieListResponse> {
            if self.fail_aux {
                bail!("similar endpoint down");
            }
            Ok(self.movie_page.clone())
        }

        async fn movie_recommendations(
            &self,
            _movie_id: u64,
            _page: u32,
        ) -> Result<TmdbMovieListResponse> {
            Ok(self.movie_page.clone())
        }

        async fn search_movies(&self, _query: &str, _page: u32) -> Result<TmdbMovieListResponse> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.movie_page.clone())
        }

        async fn discover_movies(
            &self,
            _params: &DiscoverMovieParams,
        ) -> Result<TmdbMovieListResponse> {
            Ok(self.movie_page.clone())
        }

        async fn popular_tv(&self, _page: u32) -> Result<TmdbTvListResponse> {
            Ok(self.tv_page.clone())
        }

        async fn top_rated_tv(&self, _page: u32) -> Result<TmdbTvListResponse> {
            Ok(self.tv_page.clone())
        }

        async fn trending_tv(&self) -> Result<TmdbTvListResponse> {
            Ok(self.tv_page.clone())
        }

        async fn tv_details(&self, _series_id: u64) -> Result<TmdbTvDetails> {
            if self.fail_details {
                bail!("details endpoint down");
            }
            Ok(self.tv_detail.clone())
        }

        async fn tv_videos(&self, _series_id: u64) -> Result<TmdbVideoListResponse> {
            if self.fail_aux {
                bail!("videos endpoint down");
            }
            Ok(self.videos.clone())
        }

        async fn tv_credits(&self, _series_id: u64) -> Result<TmdbCredits> {
            if self.fail_aux {
                bail!("credits endpoint down");
            }
            Ok(self.credits.clone())
        }

        async fn similar_tv(&self, _series_id: u64, _page: u32) -> Result<TmdbTvListResponse> {
            if self.fail_aux {
                bail!("similar endpoint down");
            }
            Ok(self.tv_page.clone())
        }

        async fn tv_recommendations(
            &self,
            _series_id: u64,
            _page: u32,
        ) -> Result<TmdbTvListResponse> {
            Ok(self.tv_page.clone())
        }

        async fn search_tv(&self, _query: &str, _page: u32) -> Result<TmdbTvListResponse> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.tv_page.clone())
        }

        async fn discover_tv(&self, _params: &DiscoverTvParams) -> Result<TmdbTvListResponse> {
            Ok(self.tv_page.clone())
        }

        async fn person_details(&self, _person_id: u64) -> Result<TmdbPersonDetails> {
            Ok(self.person.clone())
        }

        async fn person_credits(&self, _person_id: u64) -> Result<TmdbPersonCredits> {
            Ok(self.person_credits.clone())
        }
    }

    fn repository(api: MockTmdbApi) -> CatalogRepository<MockTmdbApi> {
        CatalogRepository::new(api, CatalogStore::open_in_memory().unwrap())
    }

    fn inception() -> Movie {
        let page: TmdbMovieListResponse =
            parse(include_str!("../../../fixtures/tmdb/movie_list.json"));
        remote::movie(&page.results[0])
    }

    #[tokio::test]
    async fn test_blank_search_returns_empty_without_network() {
        let repo = repository(MockTmdbApi::healthy());

        assert!(repo.search_movies("", 1).await.unwrap().is_empty());
        assert!(repo.search_movies("   ", 1).await.unwrap().is_empty());
        assert!(repo.search_series("\t", 1).await.unwrap().is_empty());
        assert_eq!(repo.api.search_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_maps_results_and_hits_network_once() {
        let repo = repository(MockTmdbApi::healthy());

        let found = repo.search_movies("inception", 1).await.unwrap();

        assert_eq!(found[0].id, 27_205);
        assert_eq!(repo.api.search_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_search_sends_no_request_over_http() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        let client = TmdbClient::builder()
            .base_url(Url::parse(&server.uri()).unwrap())
            .api_key("test-key")
            .user_agent("cinedex-tests/0.0.0")
            .build()
            .unwrap();
        let repo = CatalogRepository::new(client, CatalogStore::open_in_memory().unwrap());

        let found = repo.search_movies("   ", 1).await.unwrap();

        assert!(found.is_empty());
        server.verify().await;
    }

    #[tokio::test]
    async fn test_add_movie_shows_up_in_favorites_snapshot() {
        let repo = repository(MockTmdbApi::healthy());
        let movie = inception();

        repo.add_movie_to_favorites(&movie).await.unwrap();

        let favorites = repo.favorite_movies().current();
        assert_eq!(favorites, vec![movie]);
        assert!(repo.is_movie_favorite(27_205).await.unwrap());
    }

    #[tokio::test]
    async fn test_favorites_live_query_wakes_on_add() {
        let repo = repository(MockTmdbApi::healthy());
        let mut favorites = repo.favorite_movies();
        assert!(favorites.current().is_empty());

        repo.add_movie_to_favorites(&inception()).await.unwrap();

        let snapshot = favorites.next().await.unwrap();
        assert_eq!(snapshot[0].id, 27_205);
    }

    #[tokio::test]
    async fn test_toggle_twice_leaves_row_cached_but_unfavorited() {
        let repo = repository(MockTmdbApi::healthy());
        let movie = inception();

        assert!(repo.toggle_movie_favorite(&movie).await.unwrap());
        assert!(!repo.toggle_movie_favorite(&movie).await.unwrap());

        assert!(!repo.is_movie_favorite(movie.id).await.unwrap());
        assert!(repo.cached_movie(movie.id).await.unwrap().is_some());
        assert!(repo.favorite_movies().current().is_empty());
    }

    #[tokio::test]
    async fn test_remove_preserves_cached_row() {
        let repo = repository(MockTmdbApi::healthy());
        let movie = inception();
        repo.add_movie_to_favorites(&movie).await.unwrap();

        repo.remove_movie_from_favorites(movie.id).await.unwrap();

        let cached = repo.cached_movie(movie.id).await.unwrap().unwrap();
        assert_eq!(cached.title, "Inception");
        assert!(!repo.is_movie_favorite(movie.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_cache_movies_stores_plain_rows() {
        let repo = repository(MockTmdbApi::healthy());
        let movies = repo.popular_movies(1).await.unwrap();

        let written = repo.cache_movies(&movies).await.unwrap();

        assert_eq!(written, movies.len());
        assert!(repo.favorite_movies().current().is_empty());
        assert_eq!(repo.cached_movies().current().len(), movies.len());
    }

    #[tokio::test]
    async fn test_movie_details_round_trip_through_cache() {
        let repo = repository(MockTmdbApi::healthy());
        let details = repo.movie_details(27_205).await.unwrap();

        repo.cache_movie_details(&details).await.unwrap();

        let cached = repo.cached_movie_details(27_205).await.unwrap();
        assert_eq!(cached, Some(details));
    }

    #[tokio::test]
    async fn test_detail_bundle_picks_official_trailer() {
        let repo = repository(MockTmdbApi::healthy());

        let bundle = repo.movie_detail_bundle(27_205).await.unwrap();

        assert_eq!(bundle.details.runtime, 148);
        assert_eq!(bundle.videos.len(), 5);
        assert_eq!(bundle.trailer.unwrap().key, "8hP9D6kZseM");
        assert_eq!(bundle.credits.cast.len(), 4);
        assert!(!bundle.similar.is_empty());
    }

    #[tokio::test]
    async fn test_detail_bundle_degrades_when_aux_requests_fail() {
        let repo = repository(MockTmdbApi::with_failing_aux());

        let bundle = repo.movie_detail_bundle(27_205).await.unwrap();

        assert_eq!(bundle.details.title, "Inception");
        assert!(bundle.videos.is_empty());
        assert!(bundle.credits.cast.is_empty());
        assert!(bundle.similar.is_empty());
        assert!(bundle.trailer.is_none());
    }

    #[tokio::test]
    async fn test_detail_bundle_fails_when_details_fail() {
        let repo = repository(MockTmdbApi::with_failing_details());

        assert!(repo.movie_detail_bundle(27_205).await.is_err());
        assert!(repo.series_detail_bundle(1_396).await.is_err());
    }

    #[tokio::test]
    async fn test_series_detail_bundle_mirrors_movie_shape() {
        let repo = repository(MockTmdbApi::healthy());

        let bundle = repo.series_detail_bundle(1_396).await.unwrap();

        assert_eq!(bundle.details.number_of_seasons, 5);
        assert_eq!(bundle.similar[0].name, "Breaking Bad");
    }

    #[tokio::test]
    async fn test_home_feed_fills_all_four_shelves() {
        let repo = repository(MockTmdbApi::healthy());

        let feed = repo.home_feed().await.unwrap();

        assert!(!feed.trending_movies.is_empty());
        assert!(!feed.popular_movies.is_empty());
        assert!(!feed.trending_series.is_empty());
        assert!(!feed.popular_series.is_empty());
    }

    #[tokio::test]
    async fn test_movie_and_series_favorites_are_independent() {
        let repo = repository(MockTmdbApi::healthy());
        let movie = inception();

        repo.add_movie_to_favorites(&movie).await.unwrap();

        assert!(repo.is_movie_favorite(movie.id).await.unwrap());
        assert!(!repo.is_series_favorite(movie.id).await.unwrap());
        assert!(repo.favorite_series().current().is_empty());
    }

    #[tokio::test]
    async fn test_favorite_flag_watcher_follows_toggle() {
        let repo = repository(MockTmdbApi::healthy());
        let movie = inception();
        let mut flag = repo.watch_movie_favorite(movie.id).await.unwrap();
        assert!(!flag.current());

        repo.toggle_movie_favorite(&movie).await.unwrap();

        assert_eq!(flag.next().await, Some(true));
    }

    #[tokio::test]
    async fn test_clear_cache_drops_favorites_too() {
        let repo = repository(MockTmdbApi::healthy());
        repo.add_movie_to_favorites(&inception()).await.unwrap();

        repo.clear_cache().await.unwrap();

        assert!(repo.favorite_movies().current().is_empty());
        assert!(repo.cached_movie(27_205).await.unwrap().is_none());
    }
}
