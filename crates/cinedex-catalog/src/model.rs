//! Domain types for the movie/series catalog.
//!
//! Image fields hold full URLs with an empty string for absent images;
//! dates are ISO `YYYY-MM-DD` strings, possibly empty. The only raw path
//! kept at this level is the production company logo.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A movie list summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Synopsis text.
    pub overview: String,
    /// Poster image URL or empty.
    pub poster_url: String,
    /// Backdrop image URL or empty.
    pub backdrop_url: String,
    /// Release date or empty.
    pub release_date: String,
    /// Vote average on the 0-10 scale.
    pub vote_average: f64,
    /// TMDB popularity score.
    pub popularity: f64,
    /// Genre IDs.
    pub genre_ids: Vec<u32>,
}

/// A movie detail record.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Original-language title.
    pub original_title: String,
    /// Synopsis text.
    pub overview: String,
    /// Poster image URL or empty.
    pub poster_url: String,
    /// Backdrop image URL or empty.
    pub backdrop_url: String,
    /// Release date or empty.
    pub release_date: String,
    /// Vote average on the 0-10 scale.
    pub vote_average: f64,
    /// Number of votes.
    pub vote_count: u32,
    /// Runtime in minutes, 0 when unknown.
    pub runtime: u32,
    /// Genres.
    pub genres: Vec<Genre>,
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
    /// Production companies.
    pub production_companies: Vec<ProductionCompany>,
}

/// A series list summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// TMDB series ID.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Synopsis text.
    pub overview: String,
    /// Poster image URL or empty.
    pub poster_url: String,
    /// Backdrop image URL or empty.
    pub backdrop_url: String,
    /// First air date or empty.
    pub first_air_date: String,
    /// Vote average on the 0-10 scale.
    pub vote_average: f64,
    /// TMDB popularity score.
    pub popularity: f64,
}

/// A series detail record.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDetails {
    /// TMDB series ID.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Original-language name.
    pub original_name: String,
    /// Synopsis text.
    pub overview: String,
    /// Poster image URL or empty.
    pub poster_url: String,
    /// Backdrop image URL or empty.
    pub backdrop_url: String,
    /// First air date or empty.
    pub first_air_date: String,
    /// Vote average on the 0-10 scale.
    pub vote_average: f64,
    /// Number of votes.
    pub vote_count: u32,
    /// Season count.
    pub number_of_seasons: u32,
    /// Episode count.
    pub number_of_episodes: u32,
    /// Genres.
    pub genres: Vec<Genre>,
    /// Production companies.
    pub production_companies: Vec<ProductionCompany>,
    /// Airing status text.
    pub status: String,
    /// Tagline text.
    pub tagline: String,
    /// Homepage URL or empty.
    pub homepage: String,
}

/// A genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// TMDB genre ID.
    pub id: u32,
    /// Genre name.
    #[serde(default)]
    pub name: String,
}

/// A production company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    /// TMDB company ID.
    pub id: u64,
    /// Company name.
    #[serde(default)]
    pub name: String,
    /// Logo image path or empty.
    #[serde(default)]
    pub logo_path: String,
    /// Origin country (ISO 3166-1) or empty.
    #[serde(default)]
    pub origin_country: String,
}

/// A video attached to a movie or series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    /// Video entry ID (opaque string).
    pub id: String,
    /// Hosting-site video key.
    pub key: String,
    /// Video title.
    pub name: String,
    /// Hosting site (e.g., "YouTube").
    pub site: String,
    /// Video type (e.g., "Trailer", "Teaser").
    pub video_type: String,
    /// Whether the video is an official upload.
    pub official: bool,
}

impl Video {
    /// YouTube watch URL; empty for non-YouTube sites.
    #[must_use]
    pub fn youtube_url(&self) -> String {
        if self.site == "YouTube" {
            format!("https://www.youtube.com/watch?v={}", self.key)
        } else {
            String::new()
        }
    }

    /// YouTube thumbnail URL; empty for non-YouTube sites.
    #[must_use]
    pub fn youtube_thumbnail_url(&self) -> String {
        if self.site == "YouTube" {
            format!("https://img.youtube.com/vi/{}/hqdefault.jpg", self.key)
        } else {
            String::new()
        }
    }

    /// YouTube embed URL; empty for non-YouTube sites.
    #[must_use]
    pub fn youtube_embed_url(&self) -> String {
        if self.site == "YouTube" {
            format!("https://www.youtube.com/embed/{}", self.key)
        } else {
            String::new()
        }
    }
}

/// Picks the video to present as the trailer.
///
/// YouTube videos only: an official trailer beats any trailer, which beats
/// an official teaser, which beats any teaser.
#[must_use]
pub fn pick_trailer(videos: &[Video]) -> Option<&Video> {
    let youtube = |v: &&Video| v.site == "YouTube";
    videos
        .iter()
        .filter(youtube)
        .find(|v| v.video_type == "Trailer" && v.official)
        .or_else(|| {
            videos
                .iter()
                .filter(youtube)
                .find(|v| v.video_type == "Trailer")
        })
        .or_else(|| {
            videos
                .iter()
                .filter(youtube)
                .find(|v| v.video_type == "Teaser" && v.official)
        })
        .or_else(|| {
            videos
                .iter()
                .filter(youtube)
                .find(|v| v.video_type == "Teaser")
        })
}

/// A cast member.
#[derive(Debug, Clone, PartialEq)]
pub struct Cast {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character name or empty.
    pub character: String,
    /// Profile image URL or empty.
    pub profile_url: String,
    /// Billing order.
    pub order: u32,
    /// Department the person is known for.
    pub department: String,
}

/// A crew member.
#[derive(Debug, Clone, PartialEq)]
pub struct Crew {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Job title or empty.
    pub job: String,
    /// Department or empty.
    pub department: String,
    /// Profile image URL or empty.
    pub profile_url: String,
}

/// Cast and crew credits of a movie or series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Credits {
    /// TMDB ID of the credited movie/series.
    pub id: u64,
    /// Cast members in billing order.
    pub cast: Vec<Cast>,
    /// Crew members.
    pub crew: Vec<Crew>,
}

impl Credits {
    /// Crew members with the job "Director".
    #[must_use]
    pub fn directors(&self) -> Vec<&Crew> {
        self.crew.iter().filter(|c| c.job == "Director").collect()
    }

    /// Crew members in the "Writing" department.
    #[must_use]
    pub fn writers(&self) -> Vec<&Crew> {
        self.crew
            .iter()
            .filter(|c| c.department == "Writing")
            .collect()
    }

    /// Crew members with a producer job.
    #[must_use]
    pub fn producers(&self) -> Vec<&Crew> {
        self.crew
            .iter()
            .filter(|c| c.job == "Producer" || c.job == "Executive Producer")
            .collect()
    }
}

/// Person biography details.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonDetails {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Biography text or empty.
    pub biography: String,
    /// Birthday or empty.
    pub birthday: String,
    /// Day of death or empty.
    pub deathday: String,
    /// Place of birth or empty.
    pub place_of_birth: String,
    /// Profile image URL or empty.
    pub profile_url: String,
    /// Department the person is known for.
    pub known_for_department: String,
    /// TMDB popularity score.
    pub popularity: f64,
}

/// One entry in a person's combined credits.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonCredit {
    /// TMDB movie/series ID.
    pub id: u64,
    /// Display title (movie title or series name).
    pub title: String,
    /// Media type, "movie" or "tv".
    pub media_type: String,
    /// Poster image URL or empty.
    pub poster_url: String,
    /// Release date (or first air date) or empty.
    pub release_date: String,
    /// Vote average on the 0-10 scale.
    pub vote_average: f64,
    /// Character name (cast entries) or empty.
    pub character: String,
    /// Job title (crew entries) or empty.
    pub job: String,
}

/// A person's combined movie and TV credits.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonCredits {
    /// TMDB person ID.
    pub id: u64,
    /// Credits where the person appears as cast.
    pub cast: Vec<PersonCredit>,
    /// Credits where the person appears as crew.
    pub crew: Vec<PersonCredit>,
}

impl PersonCredits {
    /// Cast and crew merged, deduplicated by catalog id, newest first.
    ///
    /// Entries without a date sort last.
    #[must_use]
    pub fn all(&self) -> Vec<PersonCredit> {
        let mut seen = HashSet::new();
        let mut merged: Vec<PersonCredit> = self
            .cast
            .iter()
            .chain(self.crew.iter())
            .filter(|c| seen.insert(c.id))
            .cloned()
            .collect();
        merged.sort_by(|a, b| b.release_date.cmp(&a.release_date));
        merged
    }

    /// Merged credits restricted to movies.
    #[must_use]
    pub fn movie_credits(&self) -> Vec<PersonCredit> {
        self.all()
            .into_iter()
            .filter(|c| c.media_type == "movie")
            .collect()
    }

    /// Merged credits restricted to TV series.
    #[must_use]
    pub fn tv_credits(&self) -> Vec<PersonCredit> {
        self.all()
            .into_iter()
            .filter(|c| c.media_type == "tv")
            .collect()
    }
}
