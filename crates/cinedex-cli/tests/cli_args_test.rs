#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_movies_search_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedex");
    cmd.args(["movies", "search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--query"));
}

#[test]
fn test_movies_search_missing_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedex");
    cmd.args(["movies", "search"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_movies_details_missing_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedex");
    cmd.args(["movies", "details"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_movies_discover_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedex");
    cmd.args(["movies", "discover", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--vote-average-gte"));
}

#[test]
fn test_series_discover_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedex");
    cmd.args(["series", "discover", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--first-air-date-gte"));
}

#[test]
fn test_favorites_add_requires_target() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedex");
    cmd.args(["favorites", "add"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--movie"));
}

#[test]
fn test_favorites_add_rejects_both_targets() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedex");
    cmd.args(["favorites", "add", "--movie", "27205", "--series", "1396"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_person_details_missing_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedex");
    cmd.args(["person", "details"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_db_evict_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedex");
    cmd.args(["db", "evict", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--max-age-hours"));
}

#[test]
fn test_config_set_key_missing_value() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedex");
    cmd.args(["config", "set-key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--api-key"));
}

#[test]
fn test_config_set_key_then_show() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    // Act
    let mut set = cargo_bin_cmd!("cinedex");
    set.args(["--dir", dir_arg, "config", "set-key", "--api-key", "k-123"])
        .env("RUST_LOG", "info")
        .assert()
        .success();

    // Assert
    let mut show = cargo_bin_cmd!("cinedex");
    show.args(["--dir", dir_arg, "config", "show"])
        .env("RUST_LOG", "info")
        .assert()
        .success()
        .stdout(predicate::str::contains("configured"));
}

#[test]
fn test_network_commands_require_an_api_key() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedex");
    cmd.args(["--dir", dir_arg, "movies", "trending"])
        .env_remove("TMDB_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB API key not found"));
}

#[test]
fn test_empty_env_api_key_is_rejected() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinedex");
    cmd.args(["--dir", dir_arg, "movies", "trending"])
        .env("TMDB_API_KEY", "")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB API key not found"));
}
