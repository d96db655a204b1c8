//! TMDB catalog API client module.
//!
//! Handles HTTP requests to the TMDB v3 REST API and retrieves
//! movie, TV series, and person data.

mod api;
mod client;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use params::{DiscoverMovieParams, DiscoverTvParams};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    TmdbCastMember, TmdbCredits, TmdbCrewMember, TmdbErrorResponse, TmdbGenre, TmdbMovieDetails,
    TmdbMovieListResponse, TmdbMovieSummary, TmdbPersonCredit, TmdbPersonCredits,
    TmdbPersonDetails, TmdbProductionCompany, TmdbTvDetails, TmdbTvListResponse, TmdbTvSummary,
    TmdbVideo, TmdbVideoListResponse,
};
