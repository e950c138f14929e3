//! Router-level tests for the live feed against a mocked GitHub contents API.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use interfaces_github_contents::index::GitHubContentsClient;
use projects_ldm_feed::{
    app::{live_feed_router, LiveFeedState},
    clock::FixedClock,
    config::FeedConfiguration,
};
use rss::Channel;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn entry(year: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "path": format!("meetings/{year}/{name}"),
        "sha": "3d21ec53a331a6f037a91c368710b99387d012c1",
        "size": 2048,
        "type": "file",
        "html_url": format!("https://github.com/dotnet/csharplang/blob/main/meetings/{year}/{name}"),
        "download_url": format!("https://raw.githubusercontent.com/dotnet/csharplang/main/meetings/{year}/{name}")
    })
}

async fn mount_listing(server: &MockServer, year: &str, names: &[&str]) {
    let listing: Vec<_> = names.iter().map(|name| entry(year, name)).collect();
    Mock::given(method("GET"))
        .and(path(format!("/repos/dotnet/csharplang/contents/meetings/{year}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing))
        .mount(server)
        .await;
}

fn router(server: &MockServer, count: usize) -> Router {
    let config = FeedConfiguration::new(
        count,
        "dotnet",
        "csharplang",
        "meetings/{year}",
        "https://github.com/dotnet/csharplang/tree/main/meetings",
    )
    .unwrap();

    live_feed_router(LiveFeedState {
        config: Arc::new(config),
        github: Arc::new(GitHubContentsClient::new(server.uri(), Some("test-token".to_string()))),
        clock: Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap())),
    })
}

async fn get_feed(app: Router) -> anyhow::Result<(StatusCode, Option<String>, Vec<u8>)> {
    let response = app
        .oneshot(Request::builder().uri("/feed").body(Body::empty())?)
        .await?;
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX).await?.to_vec();
    Ok((status, content_type, body))
}

#[tokio::test]
async fn test_feed_combines_previous_and_current_year() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_listing(&server, "2023", &["LDM-2023-12-20.md", "README.md"]).await;
    mount_listing(&server, "2024", &["LDM-2024-01-10.md", "notes-2024-11-03.md"]).await;

    let (status, content_type, body) = get_feed(router(&server, 20)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/rss+xml; charset=utf-8"));

    let channel = Channel::read_from(&body[..])?;
    assert_eq!(channel.title(), "C# LDMs");
    assert_eq!(channel.link(), "https://github.com/dotnet/csharplang/tree/main/meetings");
    assert_eq!(channel.items().len(), 2);

    let first = &channel.items()[0];
    assert_eq!(first.title(), Some("C# Language Design Meeting for January 10th, 2024"));
    assert_eq!(first.guid().map(|guid| guid.value()), Some("LDM-2024-01-10.md"));
    assert_eq!(
        first.link(),
        Some("https://github.com/dotnet/csharplang/blob/main/meetings/2024/LDM-2024-01-10.md")
    );

    let second = &channel.items()[1];
    assert_eq!(second.title(), Some("C# Language Design Meeting for December 20th, 2023"));
    Ok(())
}

#[tokio::test]
async fn test_feed_is_truncated_to_configured_count() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_listing(&server, "2023", &["LDM-2023-12-20.md"]).await;
    mount_listing(&server, "2024", &["LDM-2024-01-10.md"]).await;

    let (status, _, body) = get_feed(router(&server, 1)).await?;
    assert_eq!(status, StatusCode::OK);

    let channel = Channel::read_from(&body[..])?;
    assert_eq!(channel.items().len(), 1);
    assert_eq!(channel.items()[0].guid().map(|guid| guid.value()), Some("LDM-2024-01-10.md"));
    Ok(())
}

#[tokio::test]
async fn test_feed_items_sorted_newest_first() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_listing(&server, "2023", &["LDM-2023-02-01.md", "LDM-2023-10-09.md", "LDM-2023-07-12.md"]).await;
    mount_listing(&server, "2024", &["LDM-2024-02-21.md", "LDM-2024-01-08.md"]).await;

    let (_, _, body) = get_feed(router(&server, 4)).await?;
    let channel = Channel::read_from(&body[..])?;
    let ids: Vec<&str> = channel
        .items()
        .iter()
        .filter_map(|item| item.guid().map(|guid| guid.value()))
        .collect();
    assert_eq!(
        ids,
        vec!["LDM-2024-02-21.md", "LDM-2024-01-08.md", "LDM-2023-10-09.md", "LDM-2023-07-12.md"]
    );
    Ok(())
}

#[tokio::test]
async fn test_github_failure_is_bad_gateway() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_listing(&server, "2023", &["LDM-2023-12-20.md"]).await;
    Mock::given(method("GET"))
        .and(path("/repos/dotnet/csharplang/contents/meetings/2024"))
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"message":"API rate limit exceeded"}"#))
        .mount(&server)
        .await;

    let (status, _, body) = get_feed(router(&server, 20)).await?;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(String::from_utf8(body)?.contains("meetings/2024"));
    Ok(())
}

#[tokio::test]
async fn test_openapi_document_is_served() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let app = router(&server, 20);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/openapi/v1.json").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let doc: serde_json::Value = serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await?)?;
    assert!(doc["paths"]["/feed"]["get"].is_object());
    assert!(doc["paths"]["/github"].is_null());

    let response = app
        .oneshot(Request::builder().uri("/docs/").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}
