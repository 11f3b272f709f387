#![allow(clippy::unwrap_used)]
// Integration tests for `CmsClient` using wiremock.

use bytes::Bytes;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopfront_api::types::UpdateDomainRequest;
use shopfront_api::{CmsClient, DraftForm, Error, FilePart, PendingOperation};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CmsClient) {
    let server = MockServer::start().await;
    let client = CmsClient::from_reqwest(
        &server.uri(),
        reqwest::Client::new(),
        Some("tok-123".to_string().into()),
    )
    .unwrap();
    (server, client)
}

// ── Draft ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_draft_sends_bearer_and_unwraps_data() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/business/cms/draft"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "logo": { "url": "https://cdn.example/logo.png" },
                "banners": [
                    { "id": "b1", "url": "https://cdn.example/b1.png", "is_active": true, "sequence": 1 }
                ],
                "seo": { "title": "Shop", "description": "Best shop" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = client.get_draft().await.unwrap();
    assert_eq!(
        draft.logo.unwrap().url.as_deref(),
        Some("https://cdn.example/logo.png")
    );
    assert_eq!(draft.banners.len(), 1);
    assert_eq!(draft.banners[0].id, "b1");
    assert!(draft.banner_footers.is_empty());
}

#[tokio::test]
async fn test_get_draft_401_is_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/business/cms/draft"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "expired" })))
        .mount(&server)
        .await;

    let result = client.get_draft().await;
    assert!(
        matches!(result, Err(Error::Unauthorized)),
        "expected Unauthorized, got: {result:?}"
    );
}

#[tokio::test]
async fn test_missing_token_fails_without_request() {
    let server = MockServer::start().await;
    let client = CmsClient::from_reqwest(&server.uri(), reqwest::Client::new(), None).unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert!(matches!(client.get_draft().await, Err(Error::Unauthorized)));
}

#[tokio::test]
async fn test_save_draft_sends_multipart_and_reports_group_errors() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/business/cms/draft"))
        .and(body_string_contains("name=\"seo_title\""))
        .and(body_string_contains("name=\"desktop_banner_0\""))
        .and(body_string_contains("\"action\":\"create\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "seo": { "ok": true },
            "banners": { "error": "image too large" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = DraftForm::new();
    form.text("seo_title", "Shop");
    form.json("banners", &[PendingOperation::create().with_active(true)])
        .unwrap();
    form.file(
        "desktop_banner_0",
        FilePart {
            file_name: "hero.png".into(),
            content_type: "image/png".into(),
            bytes: Bytes::from_static(b"\x89PNG"),
        },
    );

    let resp = client.save_draft(form).await.unwrap();
    let errors = resp.group_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors["banners"], "image too large");
}

// ── Publish ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_publish_returns_version() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/business/cms/publish"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": 7 })))
        .mount(&server)
        .await;

    let resp = client.publish().await.unwrap();
    assert_eq!(resp.version, Some(7));
}

#[tokio::test]
async fn test_publish_rejection_carries_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/business/cms/publish"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "logo is required" })),
        )
        .mount(&server)
        .await;

    match client.publish().await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "logo is required");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_publish_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/business/cms/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "has_unpublished_changes": true, "last_published_version": 3 }
        })))
        .mount(&server)
        .await;

    let status = client.publish_status().await.unwrap();
    assert!(status.has_unpublished_changes);
    assert_eq!(status.last_published_version, Some(3));
}

#[tokio::test]
async fn test_branding_options_is_unauthenticated() {
    let server = MockServer::start().await;
    let client = CmsClient::from_reqwest(&server.uri(), reqwest::Client::new(), None).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/business/branding/options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "primary_colors": ["#111111", "#222222"],
            "fonts": ["Inter"]
        })))
        .mount(&server)
        .await;

    let options = client.branding_options().await.unwrap();
    assert_eq!(options.primary_colors, vec!["#111111", "#222222"]);
    assert!(options.secondary_colors.is_empty());
    assert_eq!(options.fonts, vec!["Inter"]);
}

// ── Domains ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_and_update_domains() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/business/domains"))
        .and(query_param("limit", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "data": [{ "id": "d1", "domain_name": "shop.example", "is_active": true }], "total": 1 }
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/business/domains/d1"))
        .and(body_string_contains("\"is_active\":false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "d1", "domain_name": "shop.example", "is_active": false }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let domains = client.list_domains().await.unwrap();
    assert_eq!(domains.len(), 1);
    assert_eq!(domains[0].domain_name, "shop.example");

    let updated = client
        .update_domain(
            "d1",
            &UpdateDomainRequest {
                domain_name: None,
                is_active: Some(false),
            },
        )
        .await
        .unwrap();
    assert!(!updated.is_active);
}

#[tokio::test]
async fn test_delete_domain_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/business/domains/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such domain"))
        .mount(&server)
        .await;

    let err = client.delete_domain("gone").await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 404, .. }));
    assert_eq!(err.to_string(), "API error (HTTP 404): no such domain");
}

#[tokio::test]
async fn test_check_subdomain() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/business/subdomain/check/my-shop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "available": true })))
        .mount(&server)
        .await;

    assert!(client.check_subdomain("my-shop").await.unwrap().available);
    assert!(matches!(
        client.check_subdomain("a/b").await,
        Err(Error::MalformedField { .. })
    ));
}

// ── Storefront ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_storefront_passes_domain_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/public/storefront"))
        .and(query_param("domain", "acme.nerdplatform.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "logo": { "image_url": "https://cdn.example/l.png", "company_name": "Acme" },
                "banners": [{ "desktop_image_url": "https://cdn.example/b.png" }],
                "theme": { "primary_color": "#ff0000" }
            }
        })))
        .mount(&server)
        .await;

    let data = client.storefront("acme.nerdplatform.com").await.unwrap();
    assert_eq!(data.logo.unwrap().company_name.as_deref(), Some("Acme"));
    assert_eq!(data.banners.len(), 1);
    assert_eq!(
        data.theme.unwrap().primary_color.as_deref(),
        Some("#ff0000")
    );
}
