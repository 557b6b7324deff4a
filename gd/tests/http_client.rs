//! HttpAnalysisClient against a live local socket

mod common;

use std::time::Duration;

use common::{Canned, TestServer, refused_url, report};
use geodermal::client::{AnalysisClient, AnalysisError, ErrorKind, HttpAnalysisClient, NETWORK_ERROR_MESSAGE};
use geodermal::domain::{AnalysisRequest, AnalysisType, Confidence, DurationCategory, SkinType};
use serde_json::json;

fn request() -> AnalysisRequest {
    AnalysisRequest {
        destination: "Mumbai".to_string(),
        home_city: "Delhi".to_string(),
        duration_category: DurationCategory::UpToAWeek,
        month_or_season: "October".to_string(),
        concern: AnalysisType::Skin,
        skin_type: Some(SkinType::Oily),
        hair_type: None,
    }
}

fn client(base_url: &str) -> HttpAnalysisClient {
    HttpAnalysisClient::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_submit_posts_json_and_parses_report() {
    let server = TestServer::spawn(vec![Canned::json(200, report(json!({"dryness": 7, "acne": 2.4})))]).await;

    let result = client(&server.base_url).submit(&request()).await.unwrap();
    assert_eq!(result.risks.get("dryness"), Some(&7.0));
    assert_eq!(result.risks.get("acne"), Some(&2.4));
    assert_eq!(result.confidence, Some(Confidence::Low));
    assert_eq!(result.env_report.uv_index, 7.0);

    let sent = server.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, "POST");
    assert_eq!(sent[0].path, "/api/analyze");
    assert_eq!(
        sent[0].json(),
        json!({
            "destination": "Mumbai",
            "home_city": "Delhi",
            "duration_category": "2-7d",
            "month_or_season": "October",
            "concern": "skin",
            "skin_type": "oily"
        })
    );
}

#[tokio::test]
async fn test_server_error_uses_detail() {
    let server = TestServer::spawn(vec![Canned::json(500, json!({"detail": "Weather provider unavailable"}))]).await;

    let err = client(&server.base_url).submit(&request()).await.unwrap_err();
    assert_eq!(
        err,
        AnalysisError::Server {
            status: 500,
            message: "Weather provider unavailable".to_string()
        }
    );
}

#[tokio::test]
async fn test_server_error_without_message_is_generic() {
    let server = TestServer::spawn(vec![Canned::raw(503, "")]).await;

    let err = client(&server.base_url).submit(&request()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.message(), "An error occurred");
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let server = TestServer::spawn(vec![
        Canned::json(200, report(json!({}))).delayed(Duration::from_secs(3)),
    ])
    .await;
    let client = HttpAnalysisClient::new(&server.base_url, Duration::from_millis(200)).unwrap();

    let err = client.submit(&request()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.message(), NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_refused_connection_is_network_error() {
    let url = refused_url().await;

    let err = client(&url).submit(&request()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.message(), NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_malformed_success_body_is_unknown() {
    let server = TestServer::spawn(vec![Canned::raw(200, "{\"risks\": ")]).await;

    let err = client(&server.base_url).submit(&request()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unknown);
    assert!(err.message().starts_with("Invalid response from server"));
}

#[tokio::test]
async fn test_invalid_base_url_is_unknown() {
    let err = client("not a url").submit(&request()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unknown);
}

#[tokio::test]
async fn test_health_and_stats_pass_json_through() {
    let server = TestServer::spawn(vec![
        Canned::json(200, json!({"status": "ok"})),
        Canned::json(200, json!({"total_requests": 12})),
    ])
    .await;
    let client = client(&server.base_url);

    assert_eq!(client.health().await.unwrap(), json!({"status": "ok"}));
    assert_eq!(client.stats().await.unwrap(), json!({"total_requests": 12}));

    let paths: Vec<_> = server.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/api/health", "/api/stats"]);
}
