#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::process::Output;

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `cinefind` with a scrubbed environment and its config under `dir`.
fn cinefind(dir: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("cinefind");
    cmd.env_remove("TMDB_API_KEY")
        .env_remove("TMDB_BASE_URL")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .env("RUST_LOG", "info")
        .env("NO_COLOR", "1")
        .arg("--dir")
        .arg(dir);
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefind");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("trending"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_watch_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefind");
    cmd.args(["watch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--open"));
}

#[test]
fn test_search_missing_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefind");
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_trending_rejects_unknown_window() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinefind");
    cmd.args(["trending", "--window", "month"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("month"));
}

#[test]
fn test_image_poster_url() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cinefind(dir.path())
        .args(["image", "--path", "/qJ2tW6WMUDux911r6m7haRef0WH.jpg"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://image.tmdb.org/t/p/w500/qJ2tW6WMUDux911r6m7haRef0WH.jpg",
        ));
}

#[test]
fn test_image_backdrop_placeholder() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cinefind(dir.path())
        .args(["image", "--backdrop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/placeholder-backdrop.jpg"));
}

#[test]
fn test_search_without_api_key_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cinefind(dir.path())
        .args(["search", "--query", "inception"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB API key is required"));
}

#[test]
fn test_config_set_api_key_then_show() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    cinefind(dir.path())
        .args(["config", "set-api-key", "--key", "abcdef123456"])
        .assert()
        .success();

    // Assert
    let saved = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(saved.contains("api_key = \"abcdef123456\""));
    cinefind(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("****3456"))
        .stdout(predicate::str::contains("abcdef123456").not());
}

#[test]
fn test_config_set_blank_api_key_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cinefind(dir.path())
        .args(["config", "set-api-key", "--key", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn test_watch_unreachable_api_reports_load_failure() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cinefind(dir.path())
        .env("TMDB_API_KEY", "test-key")
        .env("TMDB_BASE_URL", "http://127.0.0.1:9/3/")
        .args(["watch", "--id", "27205"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to load movie details. Please try again.",
        ));
}

/// Runs `cinefind` against `mock_server` on the blocking pool, so the
/// server keeps answering while the binary waits on it.
async fn run_against(mock_server: &MockServer, args: &[&str]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cinefind(dir.path());
    cmd.env("TMDB_API_KEY", "test-key")
        .env("TMDB_BASE_URL", format!("{}/3", mock_server.uri()))
        .args(args);
    let output = tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .unwrap();
    drop(dir);
    output
}

#[tokio::test]
async fn test_watch_tv_only_id_prints_tv_player_url() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/1399"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"status_code":34,"status_message":"The resource you requested could not be found.","success":false}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/tv/1399"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(include_str!("../../../fixtures/tmdb/tv_details_1399.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Act
    let output = run_against(&mock_server, &["watch", "--id", "1399"]).await;

    // Assert
    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Game of Thrones (2011)"))
        .stdout(predicate::str::contains("Type: TV Show"))
        .stdout(predicate::str::contains(
            "Player: https://vidsrc.to/embed/tv/1399",
        ));
}

#[tokio::test]
async fn test_watch_movie_id_skips_tv_lookup() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/27205"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!(
                "../../../fixtures/tmdb/movie_details_27205.json"
            )),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/tv/27205"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    // Act
    let output = run_against(&mock_server, &["watch", "--id", "27205"]).await;

    // Assert
    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Inception (2010)"))
        .stdout(predicate::str::contains(
            "Player: https://vidsrc.to/embed/movie/27205",
        ));
}

#[tokio::test]
async fn test_search_prints_one_line_per_result() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/multi"))
        .and(query_param("query", "inception"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!(
                "../../../fixtures/tmdb/search_multi_inception.json"
            )),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Act
    let output = run_against(&mock_server, &["search", "--query", "inception"]).await;

    // Assert
    output
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "movie\t27205\tInception\t2010\thttps://image.tmdb.org/t/p/w500/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
        ))
        .stdout(predicate::str::contains(
            "tv\t1143036\tInception\t-\t/placeholder-movie.jpg",
        ))
        .stdout(predicate::str::contains(
            "person\t1228789\tInception Person\t-\t/placeholder-movie.jpg",
        ))
        .stdout(predicate::str::contains("Page 1/1 (4 results)"));
}

#[tokio::test]
async fn test_trending_day_prints_listing() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/trending/all/day"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(include_str!("../../../fixtures/tmdb/trending_all_week.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Act
    let output = run_against(&mock_server, &["trending", "--window", "day"]).await;

    // Assert
    output
        .assert()
        .success()
        .stdout(predicate::str::contains("movie\t27205\t"))
        .stdout(predicate::str::contains("tv\t1399\t"))
        .stdout(predicate::str::contains("next: --page 2"));
}
