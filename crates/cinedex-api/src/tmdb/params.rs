//! TMDB discover endpoint parameter types.

/// Default sort key for discover queries.
const DEFAULT_SORT_BY: &str = "popularity.desc";

/// Default minimum vote count for discover queries.
const DEFAULT_VOTE_COUNT_GTE: u32 = 50;

/// Parameters for the `discover/movie` endpoint.
///
/// Unset filters are omitted from the request.
#[derive(Debug, Clone)]
pub struct DiscoverMovieParams {
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Sort key (default: "popularity.desc").
    pub sort_by: String,
    /// Comma-separated genre IDs (e.g., "28,12").
    pub with_genres: Option<String>,
    /// Earliest primary release date (YYYY-MM-DD).
    pub release_date_gte: Option<String>,
    /// Latest primary release date (YYYY-MM-DD).
    pub release_date_lte: Option<String>,
    /// Minimum vote average (0-10).
    pub vote_average_gte: Option<f64>,
    /// Maximum vote average (0-10).
    pub vote_average_lte: Option<f64>,
    /// Minimum runtime in minutes.
    pub runtime_gte: Option<u32>,
    /// Maximum runtime in minutes.
    pub runtime_lte: Option<u32>,
    /// Original language filter (ISO 639-1).
    pub with_original_language: Option<String>,
    /// Minimum vote count (default: 50).
    pub vote_count_gte: u32,
}

impl DiscoverMovieParams {
    /// Creates discover params with default sort and vote-count floor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page: 1,
            sort_by: String::from(DEFAULT_SORT_BY),
            with_genres: None,
            release_date_gte: None,
            release_date_lte: None,
            vote_average_gte: None,
            vote_average_lte: None,
            runtime_gte: None,
            runtime_lte: None,
            with_original_language: None,
            vote_count_gte: DEFAULT_VOTE_COUNT_GTE,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the sort key.
    #[must_use]
    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self
    }

    /// Sets the genre filter as a comma-separated ID list, passed verbatim.
    #[must_use]
    pub fn genres(mut self, genres: impl Into<String>) -> Self {
        self.with_genres = Some(genres.into());
        self
    }

    /// Sets the earliest primary release date.
    #[must_use]
    pub fn release_date_gte(mut self, date: impl Into<String>) -> Self {
        self.release_date_gte = Some(date.into());
        self
    }

    /// Sets the latest primary release date.
    #[must_use]
    pub fn release_date_lte(mut self, date: impl Into<String>) -> Self {
        self.release_date_lte = Some(date.into());
        self
    }

    /// Sets the minimum vote average.
    #[must_use]
    pub const fn vote_average_gte(mut self, value: f64) -> Self {
        self.vote_average_gte = Some(value);
        self
    }

    /// Sets the maximum vote average.
    #[must_use]
    pub const fn vote_average_lte(mut self, value: f64) -> Self {
        self.vote_average_lte = Some(value);
        self
    }

    /// Sets the minimum runtime in minutes.
    #[must_use]
    pub const fn runtime_gte(mut self, minutes: u32) -> Self {
        self.runtime_gte = Some(minutes);
        self
    }

    /// Sets the maximum runtime in minutes.
    #[must_use]
    pub const fn runtime_lte(mut self, minutes: u32) -> Self {
        self.runtime_lte = Some(minutes);
        self
    }

    /// Sets the original language filter.
    #[must_use]
    pub fn original_language(mut self, language: impl Into<String>) -> Self {
        self.with_original_language = Some(language.into());
        self
    }

    /// Sets the minimum vote count.
    #[must_use]
    pub const fn vote_count_gte(mut self, count: u32) -> Self {
        self.vote_count_gte = count;
        self
    }
}

impl Default for DiscoverMovieParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for the `discover/tv` endpoint.
///
/// Unset filters are omitted from the request.
#[derive(Debug, Clone)]
pub struct DiscoverTvParams {
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Sort key (default: "popularity.desc").
    pub sort_by: String,
    /// Comma-separated genre IDs (e.g., "18,80").
    pub with_genres: Option<String>,
    /// Earliest first air date (YYYY-MM-DD).
    pub first_air_date_gte: Option<String>,
    /// Latest first air date (YYYY-MM-DD).
    pub first_air_date_lte: Option<String>,
    /// Minimum vote average (0-10).
    pub vote_average_gte: Option<f64>,
    /// Maximum vote average (0-10).
    pub vote_average_lte: Option<f64>,
    /// Original language filter (ISO 639-1).
    pub with_original_language: Option<String>,
    /// Minimum vote count (default: 50).
    pub vote_count_gte: u32,
}

impl DiscoverTvParams {
    /// Creates discover params with default sort and vote-count floor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page: 1,
            sort_by: String::from(DEFAULT_SORT_BY),
            with_genres: None,
            first_air_date_gte: None,
            first_air_date_lte: None,
            vote_average_gte: None,
            vote_average_lte: None,
            with_original_language: None,
            vote_count_gte: DEFAULT_VOTE_COUNT_GTE,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the sort key.
    #[must_use]
    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self
    }

    /// Sets the genre filter as a comma-separated ID list, passed verbatim.
    #[must_use]
    pub fn genres(mut self, genres: impl Into<String>) -> Self {
        self.with_genres = Some(genres.into());
        self
    }

    /// Sets the earliest first air date.
    #[must_use]
    pub fn first_air_date_gte(mut self, date: impl Into<String>) -> Self {
        self.first_air_date_gte = Some(date.into());
        self
    }

    /// Sets the latest first air date.
    #[must_use]
    pub fn first_air_date_lte(mut self, date: impl Into<String>) -> Self {
        self.first_air_date_lte = Some(date.into());
        self
    }

    /// Sets the minimum vote average.
    #[must_use]
    pub const fn vote_average_gte(mut self, value: f64) -> Self {
        self.vote_average_gte = Some(value);
        self
    }

    /// Sets the maximum vote average.
    #[must_use]
    pub const fn vote_average_lte(mut self, value: f64) -> Self {
        self.vote_average_lte = Some(value);
        self
    }

    /// Sets the original language filter.
    #[must_use]
    pub fn original_language(mut self, language: impl Into<String>) -> Self {
        self.with_original_language = Some(language.into());
        self
    }

    /// Sets the minimum vote count.
    #[must_use]
    pub const fn vote_count_gte(mut self, count: u32) -> Self {
        self.vote_count_gte = count;
        self
    }
}

impl Default for DiscoverTvParams {
    fn default() -> Self {
        Self::new()
    }
}
