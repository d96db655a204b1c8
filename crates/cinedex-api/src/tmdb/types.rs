//! TMDB API response types.
//!
//! The upstream schema marks most fields nullable, so optional fields
//! deserialize to `None`/defaults instead of failing the whole payload.

use serde::Deserialize;

// --- Paged lists ---

/// Paged movie list envelope (`movie/popular`, `search/movie`, `discover/movie`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieListResponse {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Movie summaries.
    #[serde(default)]
    pub results: Vec<TmdbMovieSummary>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// A movie summary within a paged list.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: String,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD, may be absent).
    pub release_date: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

/// Paged TV series list envelope (`tv/popular`, `search/tv`, `discover/tv`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvListResponse {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Series summaries.
    #[serde(default)]
    pub results: Vec<TmdbTvSummary>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// A TV series summary within a paged list.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvSummary {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    #[serde(default)]
    pub name: String,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// First air date (YYYY-MM-DD, may be absent).
    pub first_air_date: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

// --- Details ---

/// Response from the `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: String,
    /// Original title.
    pub original_title: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Production budget in USD.
    #[serde(default)]
    pub budget: u64,
    /// Worldwide revenue in USD.
    #[serde(default)]
    pub revenue: u64,
    /// Release status (e.g., "Released").
    pub status: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Official homepage URL.
    pub homepage: Option<String>,
    /// IMDb ID (e.g., "tt1375666").
    pub imdb_id: Option<String>,
    /// Production companies.
    #[serde(default)]
    pub production_companies: Vec<TmdbProductionCompany>,
}

/// Response from the `tv/{series_id}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvDetails {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    #[serde(default)]
    pub name: String,
    /// Original name.
    pub original_name: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// First air date (YYYY-MM-DD).
    pub first_air_date: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Total number of seasons.
    #[serde(default)]
    pub number_of_seasons: u32,
    /// Total number of episodes.
    #[serde(default)]
    pub number_of_episodes: u32,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Status (e.g., "Returning Series", "Ended").
    pub status: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Official homepage URL.
    pub homepage: Option<String>,
    /// Production companies.
    #[serde(default)]
    pub production_companies: Vec<TmdbProductionCompany>,
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    #[serde(default)]
    pub name: String,
}

/// Production company entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbProductionCompany {
    /// TMDB company ID.
    pub id: u64,
    /// Company name.
    #[serde(default)]
    pub name: String,
    /// Logo image path.
    pub logo_path: Option<String>,
    /// Origin country (ISO 3166-1).
    pub origin_country: Option<String>,
}

// --- Videos ---

/// Response from the `{movie,tv}/{id}/videos` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideoListResponse {
    /// TMDB ID of the parent movie/series.
    #[serde(default)]
    pub id: u64,
    /// Video entries.
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

/// A single video entry (trailer, teaser, clip, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    /// Video entry ID (opaque string).
    #[serde(default)]
    pub id: String,
    /// Hosting-site video key.
    #[serde(default)]
    pub key: String,
    /// Video title.
    #[serde(default)]
    pub name: String,
    /// Hosting site (e.g., "YouTube").
    #[serde(default)]
    pub site: String,
    /// Video type (e.g., "Trailer", "Teaser").
    #[serde(rename = "type", default)]
    pub video_type: String,
    /// Whether the video is an official upload.
    #[serde(default)]
    pub official: bool,
}

// --- Credits ---

/// Response from the `{movie,tv}/{id}/credits` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCredits {
    /// TMDB ID of the parent movie/series.
    #[serde(default)]
    pub id: u64,
    /// Cast members.
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    /// Crew members.
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

/// A cast member within credits.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    #[serde(default)]
    pub name: String,
    /// Character name.
    pub character: Option<String>,
    /// Profile image path.
    pub profile_path: Option<String>,
    /// Billing order.
    #[serde(default)]
    pub order: u32,
    /// Department the person is known for.
    pub known_for_department: Option<String>,
}

/// A crew member within credits.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    #[serde(default)]
    pub name: String,
    /// Job title (e.g., "Director").
    pub job: Option<String>,
    /// Department (e.g., "Writing").
    pub department: Option<String>,
    /// Profile image path.
    pub profile_path: Option<String>,
}

// --- People ---

/// Response from the `person/{person_id}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPersonDetails {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    #[serde(default)]
    pub name: String,
    /// Biography text.
    pub biography: Option<String>,
    /// Birthday (YYYY-MM-DD).
    pub birthday: Option<String>,
    /// Day of death (YYYY-MM-DD), if applicable.
    pub deathday: Option<String>,
    /// Place of birth.
    pub place_of_birth: Option<String>,
    /// Profile image path.
    pub profile_path: Option<String>,
    /// Department the person is known for.
    pub known_for_department: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
}

/// Response from the `person/{person_id}/combined_credits` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPersonCredits {
    /// TMDB person ID.
    #[serde(default)]
    pub id: u64,
    /// Credits where the person appears as cast.
    #[serde(default)]
    pub cast: Vec<TmdbPersonCredit>,
    /// Credits where the person appears as crew.
    #[serde(default)]
    pub crew: Vec<TmdbPersonCredit>,
}

/// A single combined-credits entry (movie or TV).
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPersonCredit {
    /// TMDB movie/series ID.
    pub id: u64,
    /// Movie title (absent for TV entries).
    pub title: Option<String>,
    /// Series name (absent for movie entries).
    pub name: Option<String>,
    /// Media type ("movie" or "tv").
    pub media_type: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Release date (movies).
    pub release_date: Option<String>,
    /// First air date (TV).
    pub first_air_date: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Character name (cast entries).
    pub character: Option<String>,
    /// Job title (crew entries).
    pub job: Option<String>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    pub success: bool,
}
