use marquee_content::{ClientConfig, ContentClient, HeaderSnapshot};
use marquee_core::header::{HeaderContext, PageScope};
use marquee_core::lifecycle::Generation;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, method},
};

async fn content_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("query Pages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "pages": [
            { "id": "home", "slug": "home", "status": "published" },
            { "id": "club", "slug": "club", "status": "published", "reverse_header_colors": true },
            { "id": "history", "slug": "history", "parent_id": "club", "status": "published" },
            { "id": "secret", "slug": "secret", "parent_id": "club", "status": "draft" }
        ] } })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("query Menu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "menu": {
            "id": "main",
            "name": "Main",
            "items": [
                { "id": "m1", "label": "Club", "type": "internal", "page_id": "club", "url": "/stale",
                  "children": [ { "id": "m2", "label": "History", "type": "internal", "page_id": "history" } ] },
                { "id": "m3", "label": "Shop", "type": "external", "url": "https://shop.example.com" }
            ]
        } } })))
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> ContentClient {
    ContentClient::new(&ClientConfig::parse(&server.uri()).unwrap()).unwrap()
}

#[tokio::test]
async fn test_request_path_to_page_and_header() {
    let server = content_server().await;
    let client = client_for(&server);

    let page = client.page_for_path("store", "/club/history").await.unwrap();
    assert_eq!(page.id, "history");
    assert!(client.page_for_path("store", "/club/secret").await.is_none());

    let club = client.page_for_path("store", "/club").await.unwrap();
    let context = HeaderContext::new(true);
    let scope = PageScope::mount(&context, club.reverse_header_colors);
    assert!(context.inputs().derive().apply_reverse_text);

    drop(scope);
    assert!(!context.inputs().derive().apply_reverse_text);
}

#[tokio::test]
async fn test_menu_points_at_resolved_paths() {
    let server = content_server().await;
    let menu = client_for(&server).menu_with_paths("store", "main").await.unwrap();

    assert_eq!(menu.items[0].url.as_deref(), Some("/club"));
    assert_eq!(menu.items[0].children[0].url.as_deref(), Some("/club/history"));
    assert_eq!(menu.items[1].url.as_deref(), Some("https://shop.example.com"));
}

#[tokio::test]
async fn test_stale_fetch_is_discarded_after_navigation() {
    let server = content_server().await;
    let client = client_for(&server);
    let generation = Generation::new();

    let ticket = generation.begin();
    let pages = client.pages("store").await;
    generation.invalidate();

    assert!(ticket.apply(pages, |pages| pages.len()).is_none());

    let ticket = generation.begin();
    let pages = client.pages("store").await;
    assert_eq!(ticket.apply(pages, |pages| pages.len()), Some(3));
}

#[test]
fn test_markup_snapshot_seeds_late_subscriber() {
    let html = r#"<header data-header-transparent="true" data-reverse-header-colors="false"></header>
        <div data-content-container style="--header-text-on-scroll: #111"></div>"#;
    let context = HeaderSnapshot::from_html(html).context().unwrap();

    assert!(context.is_transparent());
    assert!(!context.inputs().derive().apply_reverse_text);
    context.on_scroll(40.0);
    assert!(context.inputs().derive().apply_background);
}
