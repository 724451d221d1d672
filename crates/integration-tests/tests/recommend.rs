//! Recommendation page tests.
//!
//! Run with: `cargo test -p aion-integration-tests --test recommend`

#![allow(clippy::unwrap_used)]

use aion_integration_tests::TestClient;
use axum::http::StatusCode;

fn recommend(params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("/recommend?{query}")
}

fn position(body: &str, needle: &str) -> usize {
    body.find(needle)
        .unwrap_or_else(|| panic!("{needle} not in page"))
}

#[tokio::test]
async fn test_unfiltered_lists_whole_catalog() {
    let mut client = TestClient::new();
    let response = client.get("/recommend").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("총 <strong>8</strong>개의 향수"));
    assert!(!response.body.contains("필터 초기화"));
    // Latest puts the newest product first.
    assert!(position(&response.body, "아테나의 지혜") < position(&response.body, "아폴론의 빛"));
}

#[tokio::test]
async fn test_text_query_narrows_results() {
    let mut client = TestClient::new();
    let response = client.get(&recommend(&[("q", "아폴론")])).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("아폴론의 빛"));
    assert!(!response.body.contains("제우스의 천상"));
    assert!(response.body.contains("총 <strong>1</strong>개의 향수"));
    assert!(response.body.contains("필터 초기화"));
}

#[tokio::test]
async fn test_tag_filter() {
    let mut client = TestClient::new();
    let response = client.get(&recommend(&[("tags", "여성")])).await;

    assert!(response.body.contains("아프로디테의 정원"));
    assert!(response.body.contains("헤라의 왕관"));
    assert!(!response.body.contains("아폴론의 빛"));
    assert!(response.body.contains("#여성"));
}

#[tokio::test]
async fn test_price_high_sort() {
    let mut client = TestClient::new();
    let response = client.get("/recommend?sort=price-high").await;

    let first_price = position(&response.body, "₩");
    assert_eq!(
        response.body.get(first_price..first_price + "₩420,000".len()),
        Some("₩420,000")
    );
    assert!(position(&response.body, "제우스의 천상") < position(&response.body, "헤르메스의 여정"));
}

#[tokio::test]
async fn test_add_tag_redirects_to_canonical_url() {
    let mut client = TestClient::new();
    let response = client
        .get(&recommend(&[("tags", "우디"), ("add_tag", " 여성 ")]))
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let expected = recommend(&[("tags", "우디"), ("tags", "여성")]);
    assert_eq!(response.location(), Some(expected.as_str()));
}

#[tokio::test]
async fn test_remove_last_tag_redirects_to_bare_page() {
    let mut client = TestClient::new();
    let response = client
        .get(&recommend(&[("tags", "여성"), ("remove_tag", "여성")]))
        .await;

    assert!(response.is_redirect_to("/recommend"));
}

#[tokio::test]
async fn test_theme_replaces_tags() {
    let mut client = TestClient::new();
    let response = client
        .get(&recommend(&[("tags", "남성"), ("theme", "fresh")]))
        .await;

    let expected = recommend(&[("tags", "청량한"), ("tags", "FRESH")]);
    assert!(response.is_redirect_to(&expected), "{response:?}");

    let page = client.get(&expected).await;
    assert!(page.body.contains("아르테미스의 숲"));
    assert!(page.body.contains("포세이돈의 파도"));
    assert!(!page.body.contains("제우스의 천상"));
}

#[tokio::test]
async fn test_tag_with_comma_stays_one_tag() {
    let mut client = TestClient::new();
    let response = client.get(&recommend(&[("add_tag", "플로럴,봄")])).await;

    let expected = recommend(&[("tags", "플로럴,봄")]);
    assert!(response.is_redirect_to(&expected), "{response:?}");

    let page = client.get(&expected).await;
    assert!(page.body.contains("#플로럴,봄"));
    assert!(page.body.contains("조건에 맞는 향수가 없습니다."));

    // Adding one of the words is a separate tag, not a no-op.
    let next = client
        .get(&recommend(&[("tags", "플로럴,봄"), ("add_tag", "봄")]))
        .await;
    let expected = recommend(&[("tags", "플로럴,봄"), ("tags", "봄")]);
    assert!(next.is_redirect_to(&expected), "{next:?}");
}

#[tokio::test]
async fn test_query_with_trailing_space_matches_as_typed() {
    let mut client = TestClient::new();
    let response = client.get(&recommend(&[("q", "아폴론 ")])).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("총 <strong>0</strong>개의 향수"));
}

#[tokio::test]
async fn test_empty_state() {
    let mut client = TestClient::new();
    let response = client.get(&recommend(&[("q", "헬리오스")])).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("조건에 맞는 향수가 없습니다."));
    assert!(response.body.contains("총 <strong>0</strong>개의 향수"));
}

#[tokio::test]
async fn test_query_is_escaped() {
    let mut client = TestClient::new();
    let response = client
        .get(&recommend(&[("q", "<script>alert(1)</script>")]))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("<script>"));
}

#[tokio::test]
async fn test_unknown_sort_falls_back_to_latest() {
    let mut client = TestClient::new();
    let response = client.get("/recommend?sort=cheapest").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"<option value="latest" selected>"#));
}
