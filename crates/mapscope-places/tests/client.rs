//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use mapscope_places::{PlacesClient, PlacesError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn nearby_search_returns_places_in_rank_order() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            { "name": "Sparkle Cleaning Co", "rating": 4.8, "user_ratings_total": 321 },
            { "name": "Maids R Us", "rating": 4.1, "user_ratings_total": 87 },
            { "name": "Fresh Start Services" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .and(query_param("key", "test-key"))
        .and(query_param("radius", "8000"))
        .and(query_param("keyword", "house cleaning"))
        .and(query_param("type", "establishment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .nearby_search(33.9616, -118.3531, 8000, "house cleaning")
        .await
        .expect("should parse places");

    assert_eq!(places.len(), 3);
    assert_eq!(places[0].name, "Sparkle Cleaning Co");
    assert_eq!(places[0].rating, Some(4.8));
    assert_eq!(places[0].user_ratings_total, Some(321));
    // Missing rating/review fields deserialize to None, not an error.
    assert_eq!(places[2].name, "Fresh Start Services");
    assert!(places[2].rating.is_none());
    assert!(places[2].user_ratings_total.is_none());
}

#[tokio::test]
async fn zero_results_is_a_non_ok_status() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "status": "ZERO_RESULTS", "results": [] });

    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .nearby_search(33.9, -118.3, 8000, "unicorn grooming")
        .await
        .expect_err("only OK is a success envelope");

    match err {
        PlacesError::ApiStatus { status, message } => {
            assert_eq!(status, "ZERO_RESULTS");
            assert!(message.is_none());
        }
        other => panic!("expected ApiStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn api_error_status_is_surfaced() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "REQUEST_DENIED",
        "error_message": "The provided API key is invalid.",
        "results": []
    });

    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .nearby_search(33.9, -118.3, 8000, "house cleaning")
        .await
        .expect_err("REQUEST_DENIED should be an error");

    match err {
        PlacesError::ApiStatus { status, message } => {
            assert_eq!(status, "REQUEST_DENIED");
            assert_eq!(message.as_deref(), Some("The provided API key is invalid."));
        }
        other => panic!("expected ApiStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn non_2xx_http_status_is_an_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .nearby_search(33.9, -118.3, 8000, "house cleaning")
        .await
        .expect_err("503 should be an error");

    assert!(matches!(err, PlacesError::Http(_)), "got: {err:?}");
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .nearby_search(33.9, -118.3, 8000, "house cleaning")
        .await
        .expect_err("unparseable body should be an error");

    assert!(matches!(err, PlacesError::Deserialize { .. }), "got: {err:?}");
}
