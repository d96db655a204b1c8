//! Mapping between the wire payloads, the domain model, and the cache rows.
//!
//! `remote` turns TMDB responses into domain values; `rows` converts domain
//! values to cache rows and back. Image fields cross the seams as follows:
//! the wire carries bare paths, the domain carries full CDN URLs, and the
//! cache stores bare paths again so a rendition change never requires a
//! schema migration.

pub mod remote;
pub mod rows;

/// Base URL of the TMDB image CDN.
pub(crate) const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/";

/// Rendition used for movie and series posters.
pub(crate) const POSTER_SIZE: &str = "w500";

/// Rendition used for backdrops on list summaries.
pub(crate) const BACKDROP_SIZE: &str = "w500";

/// Rendition used for backdrops on detail records.
pub(crate) const DETAIL_BACKDROP_SIZE: &str = "w780";

/// Rendition used for the profile image on a person detail record.
pub(crate) const PROFILE_SIZE: &str = "w500";

/// Rendition used for cast and crew profile images.
pub(crate) const CREDIT_PROFILE_SIZE: &str = "w185";

/// Rendition used for posters attached to a person's credit entries.
pub(crate) const CREDIT_POSTER_SIZE: &str = "w342";

/// Builds a full CDN URL from a bare image path.
///
/// Absent and empty paths both yield the empty string, so callers can
/// hand the result straight to a view layer.
pub(crate) fn image_url(size: &str, path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() => format!("{IMAGE_BASE}{size}{path}"),
        _ => String::new(),
    }
}
