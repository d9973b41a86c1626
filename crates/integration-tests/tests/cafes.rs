//! End-to-end tests for the cafe directory.

#![allow(clippy::unwrap_used)]

use cafeconnect_core::{GeoPointRequest, NewCafeRequest};
use cafeconnect_integration_tests::{TestServer, status_of};

fn complete_cafe() -> NewCafeRequest {
    NewCafeRequest {
        name: Some("Harbor Beans".to_string()),
        address: Some("1 Dock St, Boston, MA".to_string()),
        location: Some(GeoPointRequest {
            lat: Some(42.35),
            lng: Some(-71.05),
        }),
        nearby_colleges: Some(vec!["Boston University".to_string()]),
        ..NewCafeRequest::default()
    }
}

#[tokio::test]
async fn test_root_reports_service() {
    let server = TestServer::start().await.unwrap();
    let body: serde_json::Value = reqwest::get(server.url())
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["message"], "CafeConnect Backend API");
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let server = TestServer::seeded().await.unwrap();

    let upper = server.client.search_cafes("Harvard").await.unwrap();
    let lower = server.client.search_cafes("harvard").await.unwrap();
    assert!(!upper.is_empty());
    assert_eq!(upper, lower);
    assert!(upper.iter().all(|c| {
        c.nearby_colleges
            .iter()
            .any(|college| college.contains("Harvard"))
    }));

    assert!(server.client.search_cafes("Yale").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_query_with_spaces_and_slashes() {
    let server = TestServer::seeded().await.unwrap();

    let found = server.client.search_cafes("stanford univ").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Green Bean Coffee");

    assert!(server.client.search_cafes("a/b").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_for_dot_matches_punctuated_colleges() {
    let server = TestServer::seeded().await.unwrap();
    let request = NewCafeRequest {
        nearby_colleges: Some(vec!["St. John's University".to_string()]),
        ..complete_cafe()
    };
    let created = server.client.create_cafe(&request).await.unwrap();

    let found = server.client.search_cafes(".").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, created.id);

    assert!(server.client.search_cafes("..").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_missing_address_creates_nothing() {
    let server = TestServer::start().await.unwrap();
    let before = server.client.list_cafes().await.unwrap().len();

    let request = NewCafeRequest {
        address: None,
        ..complete_cafe()
    };
    let err = server.client.create_cafe(&request).await.unwrap_err();
    assert_eq!(status_of(&err), Some(400));

    let after = server.client.list_cafes().await.unwrap().len();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_create_complete_cafe_is_retrievable() {
    let server = TestServer::start().await.unwrap();

    let created = server.client.create_cafe(&complete_cafe()).await.unwrap();
    assert!((created.rating - 4.0).abs() < f64::EPSILON);

    let all = server.client.list_cafes().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, created.id);
    assert_eq!(all[0].name, "Harbor Beans");

    let near = server.client.search_cafes("boston univ").await.unwrap();
    assert_eq!(near.len(), 1);
}
