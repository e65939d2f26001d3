//! Integration tests for the concierge fallback contract.

use booking_core::{PriceUnit, ServiceItem};
use concierge_client::{
    ConciergeProvider, GeminiConcierge, FALLBACK_NO_API_KEY, FALLBACK_NO_MATCH,
    FALLBACK_UNAVAILABLE,
};
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_services() -> Vec<ServiceItem> {
    vec![ServiceItem {
        id: "p2".to_string(),
        category_id: "photo".to_string(),
        title: "Portraits in the park".to_string(),
        provider_name: "by Tia".to_string(),
        price: 48.0,
        price_unit: PriceUnit::Guest,
        rating: 4.96,
        review_count: 45,
        image: "portraits.jpg".to_string(),
        is_popular: true,
    }]
}

#[tokio::test]
async fn test_successful_completion_is_returned_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/v1beta/models/.+:generateContent$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "May I suggest Portraits in the park by Tia?" }],
                },
            }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let concierge = GeminiConcierge::new("test-key").with_base_url(server.uri());
    let answer = concierge
        .recommend("family photos", &sample_services())
        .await;
    assert_eq!(answer, "May I suggest Portraits in the park by Tia?");
}

#[tokio::test]
async fn test_server_error_degrades_to_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/v1beta/models/.+:generateContent$"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let concierge = GeminiConcierge::new("test-key").with_base_url(server.uri());
    let answer = concierge.recommend("anything", &sample_services()).await;
    assert_eq!(answer, FALLBACK_UNAVAILABLE);
}

#[tokio::test]
async fn test_unreachable_endpoint_degrades_to_fallback() {
    // Nothing is listening on this port.
    let concierge = GeminiConcierge::new("test-key").with_base_url("http://127.0.0.1:9");
    let answer = concierge.recommend("anything", &sample_services()).await;
    assert_eq!(answer, FALLBACK_UNAVAILABLE);
}

#[tokio::test]
async fn test_empty_completion_degrades_to_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/v1beta/models/.+:generateContent$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
        )
        .mount(&server)
        .await;

    let concierge = GeminiConcierge::new("test-key").with_base_url(server.uri());
    let answer = concierge.recommend("anything", &sample_services()).await;
    assert_eq!(answer, FALLBACK_NO_MATCH);
}

#[tokio::test]
async fn test_missing_credential_short_circuits() {
    let server = MockServer::start().await;
    // No mock mounted: the keyless concierge must not issue any request.
    let concierge = GeminiConcierge::keyless().with_base_url(server.uri());
    let answer = concierge.recommend("anything", &sample_services()).await;
    assert_eq!(answer, FALLBACK_NO_API_KEY);
    assert!(server.received_requests().await.unwrap().is_empty());
}
