//! Wire-to-domain mapping.
//!
//! Every function takes a TMDB response type and produces the matching
//! domain value. Absent strings become empty strings, absent lists become
//! empty lists, and bare image paths become full CDN URLs.

use cinedex_api::tmdb::{
    TmdbCastMember, TmdbCredits, TmdbCrewMember, TmdbGenre, TmdbMovieDetails,
    TmdbMovieListResponse, TmdbMovieSummary, TmdbPersonCredit, TmdbPersonCredits,
    TmdbPersonDetails, TmdbProductionCompany, TmdbTvDetails, TmdbTvListResponse, TmdbTvSummary,
    TmdbVideo, TmdbVideoListResponse,
};

use super::{
    image_url, BACKDROP_SIZE, CREDIT_POSTER_SIZE, CREDIT_PROFILE_SIZE, DETAIL_BACKDROP_SIZE,
    POSTER_SIZE, PROFILE_SIZE,
};
use crate::model::{
    Cast, Credits, Crew, Genre, Movie, MovieDetails, PersonCredit, PersonCredits, PersonDetails,
    ProductionCompany, Series, SeriesDetails, Video,
};

/// Maps a movie summary.
#[must_use]
pub fn movie(wire: &TmdbMovieSummary) -> Movie {
    Movie {
        id: wire.id,
        title: wire.title.clone(),
        overview: wire.overview.clone().unwrap_or_default(),
        poster_url: image_url(POSTER_SIZE, wire.poster_path.as_deref()),
        backdrop_url: image_url(BACKDROP_SIZE, wire.backdrop_path.as_deref()),
        release_date: wire.release_date.clone().unwrap_or_default(),
        vote_average: wire.vote_average,
        popularity: wire.popularity,
        genre_ids: wire.genre_ids.clone(),
    }
}

/// Maps every summary in a movie list page.
#[must_use]
pub fn movies(wire: &TmdbMovieListResponse) -> Vec<Movie> {
    wire.results.iter().map(movie).collect()
}

/// Maps a series summary.
#[must_use]
pub fn series(wire: &TmdbTvSummary) -> Series {
    Series {
        id: wire.id,
        name: wire.name.clone(),
        overview: wire.overview.clone().unwrap_or_default(),
        poster_url: image_url(POSTER_SIZE, wire.poster_path.as_deref()),
        backdrop_url: image_url(BACKDROP_SIZE, wire.backdrop_path.as_deref()),
        first_air_date: wire.first_air_date.clone().unwrap_or_default(),
        vote_average: wire.vote_average,
        popularity: wire.popularity,
    }
}

/// Maps every summary in a series list page.
#[must_use]
pub fn series_list(wire: &TmdbTvListResponse) -> Vec<Series> {
    wire.results.iter().map(series).collect()
}

/// Maps a movie detail record.
#[must_use]
pub fn movie_details(wire: &TmdbMovieDetails) -> MovieDetails {
    MovieDetails {
        id: wire.id,
        title: wire.title.clone(),
        original_title: wire.original_title.clone().unwrap_or_default(),
        overview: wire.overview.clone().unwrap_or_default(),
        poster_url: image_url(POSTER_SIZE, wire.poster_path.as_deref()),
        backdrop_url: image_url(DETAIL_BACKDROP_SIZE, wire.backdrop_path.as_deref()),
        release_date: wire.release_date.clone().unwrap_or_default(),
        vote_average: wire.vote_average,
        vote_count: wire.vote_count,
        runtime: wire.runtime.unwrap_or_default(),
        genres: wire.genres.iter().map(genre).collect(),
        budget: wire.budget,
        revenue: wire.revenue,
        status: wire.status.clone().unwrap_or_default(),
        tagline: wire.tagline.clone().unwrap_or_default(),
        homepage: wire.homepage.clone().unwrap_or_default(),
        imdb_id: wire.imdb_id.clone().unwrap_or_default(),
        production_companies: wire.production_companies.iter().map(production_company).collect(),
    }
}

/// Maps a series detail record.
#[must_use]
pub fn series_details(wire: &TmdbTvDetails) -> SeriesDetails {
    SeriesDetails {
        id: wire.id,
        name: wire.name.clone(),
        original_name: wire.original_name.clone().unwrap_or_default(),
        overview: wire.overview.clone().unwrap_or_default(),
        poster_url: image_url(POSTER_SIZE, wire.poster_path.as_deref()),
        backdrop_url: image_url(DETAIL_BACKDROP_SIZE, wire.backdrop_path.as_deref()),
        first_air_date: wire.first_air_date.clone().unwrap_or_default(),
        vote_average: wire.vote_average,
        vote_count: wire.vote_count,
        number_of_seasons: wire.number_of_seasons,
        number_of_episodes: wire.number_of_episodes,
        genres: wire.genres.iter().map(genre).collect(),
        production_companies: wire.production_companies.iter().map(production_company).collect(),
        status: wire.status.clone().unwrap_or_default(),
        tagline: wire.tagline.clone().unwrap_or_default(),
        homepage: wire.homepage.clone().unwrap_or_default(),
    }
}

/// Maps a genre tag.
#[must_use]
pub fn genre(wire: &TmdbGenre) -> Genre {
    Genre { id: wire.id, name: wire.name.clone() }
}

/// Maps a production company. The logo stays a bare path.
#[must_use]
pub fn production_company(wire: &TmdbProductionCompany) -> ProductionCompany {
    ProductionCompany {
        id: wire.id,
        name: wire.name.clone(),
        logo_path: wire.logo_path.clone().unwrap_or_default(),
        origin_country: wire.origin_country.clone().unwrap_or_default(),
    }
}

/// Maps a single video entry.
#[must_use]
pub fn video(wire: &TmdbVideo) -> Video {
    Video {
        id: wire.id.clone(),
        key: wire.key.clone(),
        name: wire.name.clone(),
        site: wire.site.clone(),
        video_type: wire.video_type.clone(),
        official: wire.official,
    }
}

/// Maps a video list response.
#[must_use]
pub fn videos(wire: &TmdbVideoListResponse) -> Vec<Video> {
    wire.results.iter().map(video).collect()
}

/// Maps a title's credits. Cast members without a department fall back
/// to `Acting`.
#[must_use]
pub fn credits(wire: &TmdbCredits) -> Credits {
    Credits {
        id: wire.id,
        cast: wire.cast.iter().map(cast_member).collect(),
        crew: wire.crew.iter().map(crew_member).collect(),
    }
}

fn cast_member(wire: &TmdbCastMember) -> Cast {
    Cast {
        id: wire.id,
        name: wire.name.clone(),
        character: wire.character.clone().unwrap_or_default(),
        profile_url: image_url(CREDIT_PROFILE_SIZE, wire.profile_path.as_deref()),
        order: wire.order,
        department: wire
            .known_for_department
            .clone()
            .unwrap_or_else(|| String::from("Acting")),
    }
}

fn crew_member(wire: &TmdbCrewMember) -> Crew {
    Crew {
        id: wire.id,
        name: wire.name.clone(),
        job: wire.job.clone().unwrap_or_default(),
        department: wire.department.clone().unwrap_or_default(),
        profile_url: image_url(CREDIT_PROFILE_SIZE, wire.profile_path.as_deref()),
    }
}

/// Maps a person detail record.
#[must_use]
pub fn person_details(wire: &TmdbPersonDetails) -> PersonDetails {
    PersonDetails {
        id: wire.id,
        name: wire.name.clone(),
        biography: wire.biography.clone().unwrap_or_default(),
        birthday: wire.birthday.clone().unwrap_or_default(),
        deathday: wire.deathday.clone().unwrap_or_default(),
        place_of_birth: wire.place_of_birth.clone().unwrap_or_default(),
        profile_url: image_url(PROFILE_SIZE, wire.profile_path.as_deref()),
        known_for_department: wire.known_for_department.clone().unwrap_or_default(),
        popularity: wire.popularity,
    }
}

/// Maps a single person credit entry.
///
/// Movie and TV entries share one shape: the title falls back from the
/// movie field to the TV field, the date likewise, and an absent media
/// type is treated as a movie.
#[must_use]
pub fn person_credit(wire: &TmdbPersonCredit) -> PersonCredit {
    PersonCredit {
        id: wire.id,
        title: wire
            .title
            .clone()
            .or_else(|| wire.name.clone())
            .unwrap_or_default(),
        media_type: wire
            .media_type
            .clone()
            .unwrap_or_else(|| String::from("movie")),
        poster_url: image_url(CREDIT_POSTER_SIZE, wire.poster_path.as_deref()),
        release_date: wire
            .release_date
            .clone()
            .or_else(|| wire.first_air_date.clone())
            .unwrap_or_default(),
        vote_average: wire.vote_average,
        character: wire.character.clone().unwrap_or_default(),
        job: wire.job.clone().unwrap_or_default(),
    }
}

/// Maps a person's combined credits.
#[must_use]
pub fn person_credits(wire: &TmdbPersonCredits) -> PersonCredits {
    PersonCredits {
        id: wire.id,
        cast: wire.cast.iter().map(person_credit).collect(),
        crew: wire.crew.iter().map(person_credit).collect(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn movie_page() -> TmdbMovieListResponse {
        serde_json::from_str(include_str!("../../../../fixtures/tmdb/movie_list.json")).unwrap()
    }

    #[test]
    fn test_movie_builds_full_image_urls() {
        let page = movie_page();

        let mapped = movie(&page.results[0]);

        assert_eq!(mapped.id, 27_205);
        assert_eq!(mapped.title, "Inception");
        assert_eq!(
            mapped.poster_url,
            "https://image.tmdb.org/t/p/w500/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg"
        );
        assert_eq!(
            mapped.backdrop_url,
            "https://image.tmdb.org/t/p/w500/8ZTVqvKDQ8emSGUEMjsS4yHAwrp.jpg"
        );
        assert_eq!(mapped.release_date, "2010-07-15");
        assert_eq!(mapped.genre_ids, vec![28, 878, 12]);
    }

    #[test]
    fn test_movie_defaults_absent_fields_to_empty() {
        let wire: TmdbMovieSummary =
            serde_json::from_str(r#"{"id": 993729, "title": "Dream Architects"}"#).unwrap();

        let mapped = movie(&wire);

        assert_eq!(mapped.overview, "");
        assert_eq!(mapped.poster_url, "");
        assert_eq!(mapped.backdrop_url, "");
        assert_eq!(mapped.release_date, "");
        assert!(mapped.genre_ids.is_empty());
    }

    #[test]
    fn test_series_list_maps_every_row() {
        let page: TmdbTvListResponse =
            serde_json::from_str(include_str!("../../../../fixtures/tmdb/tv_list.json")).unwrap();

        let mapped = series_list(&page);

        assert_eq!(mapped.len(), page.results.len());
        assert_eq!(mapped[0].id, 1_396);
        assert_eq!(mapped[0].name, "Breaking Bad");
        assert!(mapped[0].poster_url.starts_with("https://image.tmdb.org/t/p/w500/"));
    }

    #[test]
    fn test_movie_details_maps_typed_genres_and_companies() {
        let wire: TmdbMovieDetails = serde_json::from_str(include_str!(
            "../../../../fixtures/tmdb/movie_details_27205.json"
        ))
        .unwrap();

        let mapped = movie_details(&wire);

        assert_eq!(mapped.runtime, 148);
        assert_eq!(
            mapped.genres[0],
            Genre { id: 28, name: String::from("Action") }
        );
        assert_eq!(mapped.production_companies.len(), 3);
        assert_eq!(mapped.production_companies[1].name, "Syncopy");
        assert!(mapped.backdrop_url.starts_with("https://image.tmdb.org/t/p/w780/"));
    }

    #[test]
    fn test_backdrop_rendition_differs_between_summary_and_details() {
        let raw = r#"{"id": 27205, "backdrop_path": "/8ZTVqvKDQ8emSGUEMjsS4yHAwrp.jpg"}"#;
        let summary: TmdbMovieSummary = serde_json::from_str(raw).unwrap();
        let details: TmdbMovieDetails = serde_json::from_str(raw).unwrap();

        assert_eq!(
            movie(&summary).backdrop_url,
            "https://image.tmdb.org/t/p/w500/8ZTVqvKDQ8emSGUEMjsS4yHAwrp.jpg"
        );
        assert_eq!(
            movie_details(&details).backdrop_url,
            "https://image.tmdb.org/t/p/w780/8ZTVqvKDQ8emSGUEMjsS4yHAwrp.jpg"
        );
    }

    #[test]
    fn test_series_details_maps_season_counts() {
        let wire: TmdbTvDetails = serde_json::from_str(include_str!(
            "../../../../fixtures/tmdb/tv_details_1396.json"
        ))
        .unwrap();

        let mapped = series_details(&wire);

        assert_eq!(mapped.name, "Breaking Bad");
        assert_eq!(mapped.number_of_seasons, 5);
        assert_eq!(mapped.number_of_episodes, 62);
    }

    #[test]
    fn test_credits_defaults_cast_department_to_acting() {
        let wire: TmdbCredits =
            serde_json::from_str(r#"{"id": 1, "cast": [{"id": 7, "name": "Unknown"}], "crew": []}"#)
                .unwrap();

        let mapped = credits(&wire);

        assert_eq!(mapped.cast[0].department, "Acting");
        assert_eq!(mapped.cast[0].character, "");
    }

    #[test]
    fn test_credits_use_profile_rendition() {
        let wire: TmdbCredits = serde_json::from_str(include_str!(
            "../../../../fixtures/tmdb/movie_credits_27205.json"
        ))
        .unwrap();

        let mapped = credits(&wire);

        assert_eq!(mapped.cast[0].name, "Leonardo DiCaprio");
        assert_eq!(
            mapped.cast[0].profile_url,
            "https://image.tmdb.org/t/p/w185/wo2hJpn04vbtmh0B9utCFdsQhxM.jpg"
        );
    }

    #[test]
    fn test_person_details_mapping() {
        let wire: TmdbPersonDetails = serde_json::from_str(include_str!(
            "../../../../fixtures/tmdb/person_details_525.json"
        ))
        .unwrap();

        let mapped = person_details(&wire);

        assert_eq!(mapped.name, "Christopher Nolan");
        assert_eq!(mapped.known_for_department, "Directing");
        assert!(mapped.profile_url.starts_with("https://image.tmdb.org/t/p/w500/"));
    }

    #[test]
    fn test_person_credit_falls_back_to_tv_fields() {
        let wire: TmdbPersonCredit = serde_json::from_str(
            r#"{"id": 22980, "name": "The Graham Norton Show", "media_type": "tv", "first_air_date": "2007-02-22"}"#,
        )
        .unwrap();

        let mapped = person_credit(&wire);

        assert_eq!(mapped.title, "The Graham Norton Show");
        assert_eq!(mapped.release_date, "2007-02-22");
        assert_eq!(mapped.media_type, "tv");
    }

    #[test]
    fn test_person_credit_defaults_media_type_to_movie() {
        let wire: TmdbPersonCredit =
            serde_json::from_str(r#"{"id": 27205, "title": "Inception"}"#).unwrap();

        assert_eq!(person_credit(&wire).media_type, "movie");
    }

    #[test]
    fn test_person_credit_uses_w342_posters() {
        let wire: TmdbPersonCredits = serde_json::from_str(include_str!(
            "../../../../fixtures/tmdb/person_credits_525.json"
        ))
        .unwrap();

        let mapped = person_credits(&wire);

        assert_eq!(
            mapped.crew[0].poster_url,
            "https://image.tmdb.org/t/p/w342/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg"
        );
    }
}
