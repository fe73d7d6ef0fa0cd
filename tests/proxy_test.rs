mod common;

use base64::{Engine, engine::general_purpose::STANDARD};
use common::{UNSPLASH_KEY, config_with, get, mock_config, post_json, post_raw};
use serde_json::json;
use tokio::{io::AsyncWriteExt, net::TcpListener};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, header, method, path, query_param},
};

const TOKEN_COOKIE: &str = "pinterest_access_token=pina_token";

#[tokio::test]
async fn test_status_reflects_cookie_presence() {
    let config = config_with(&[]);

    let res = get(config.clone(), "/api/pinterest/status", None).await;
    assert_eq!(res.json(), json!({ "connected": false }));

    let res = get(config, "/api/pinterest/status", Some(TOKEN_COOKIE)).await;
    assert_eq!(res.json(), json!({ "connected": true }));
}

#[tokio::test]
async fn test_status_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    for cookie in [None, Some(TOKEN_COOKIE)] {
        let first = get(mock_config(&server), "/api/pinterest/status", cookie).await;
        for _ in 0..3 {
            let again = get(mock_config(&server), "/api/pinterest/status", cookie).await;
            assert_eq!(again.json(), first.json());
        }
    }
}

#[tokio::test]
async fn test_status_validation_flag_checks_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v5/user_account"))
        .and(header("authorization", "Bearer pina_token"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = mock_config(&server);
    config.validate_pinterest_status = true;

    let res = get(config, "/api/pinterest/status", Some(TOKEN_COOKIE)).await;
    assert_eq!(res.json(), json!({ "connected": false }));
}

#[tokio::test]
async fn test_pinterest_endpoints_require_token_before_any_call() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    for uri in [
        "/api/pinterest/boards",
        "/api/pinterest/boards/123/pins",
        "/api/images/pinterest/123",
    ] {
        let res = get(mock_config(&server), uri, None).await;
        assert_eq!(res.status, 401, "{}", uri);
        assert_eq!(
            res.json(),
            json!({ "error": "Not authenticated with Pinterest" })
        );
    }
}

#[tokio::test]
async fn test_boards_are_relayed_unchanged() {
    let server = MockServer::start().await;
    let payload = json!({ "items": [{ "id": "b1", "name": "Moods" }], "bookmark": null });
    Mock::given(method("GET"))
        .and(path("/v5/boards"))
        .and(header("authorization", "Bearer pina_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let res = get(mock_config(&server), "/api/pinterest/boards", Some(TOKEN_COOKIE)).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.json(), payload);
}

#[tokio::test]
async fn test_board_pins_forward_board_id() {
    let server = MockServer::start().await;
    let payload = json!({ "items": [{ "id": "p1" }] });
    Mock::given(method("GET"))
        .and(path("/v5/boards/board-42/pins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let res = get(
        mock_config(&server),
        "/api/pinterest/boards/board-42/pins",
        Some(TOKEN_COOKIE),
    )
    .await;

    assert_eq!(res.json(), payload);
}

#[tokio::test]
async fn test_upstream_error_body_is_relayed_as_500() {
    let server = MockServer::start().await;
    let upstream = json!({ "code": 2, "message": "Authentication failed." });
    Mock::given(method("GET"))
        .and(path("/v5/boards"))
        .respond_with(ResponseTemplate::new(401).set_body_json(upstream.clone()))
        .mount(&server)
        .await;

    let res = get(mock_config(&server), "/api/pinterest/boards", Some(TOKEN_COOKIE)).await;

    assert_eq!(res.status, 500);
    assert_eq!(res.json(), json!({ "error": upstream }));
}

#[tokio::test]
async fn test_unsplash_search_relays_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .and(query_param("query", "ocean"))
        .and(query_param("per_page", "30"))
        .and(header("authorization", format!("Client-ID {}", UNSPLASH_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [{ "id": "1" }] })))
        .expect(1)
        .mount(&server)
        .await;

    let res = get(mock_config(&server), "/api/unsplash/search?query=ocean", None).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.json(), json!({ "results": [{ "id": "1" }] }));
}

#[tokio::test]
async fn test_unsplash_search_defaults_empty_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .and(query_param("query", "aesthetic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(2)
        .mount(&server)
        .await;

    get(mock_config(&server), "/api/unsplash/search", None).await;
    get(mock_config(&server), "/api/unsplash/search?query=", None).await;
}

#[tokio::test]
async fn test_unsplash_search_without_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let mut config = mock_config(&server);
    config.unsplash_access_key = None;

    for uri in ["/api/unsplash/search?query=ocean", "/api/images/unsplash?query=ocean"] {
        let res = get(config.clone(), uri, None).await;
        assert_eq!(res.status, 500);
        assert_eq!(
            res.json(),
            json!({ "error": "UNSPLASH_ACCESS_KEY is not configured" })
        );
    }
}

#[tokio::test]
async fn test_proxy_image_encodes_body_with_content_type() {
    let server = MockServer::start().await;
    let bytes: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 1, 2, 3];
    Mock::given(method("GET"))
        .and(path("/photo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(bytes.clone(), "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let res = post_json(
        mock_config(&server),
        "/api/proxy-image",
        json!({ "url": format!("{}/photo.png", server.uri()) }),
    )
    .await;

    assert_eq!(res.status, 200);
    assert_eq!(
        res.json(),
        json!({ "base64": STANDARD.encode(&bytes), "mimeType": "image/png" })
    );
}

/// Serves one response with no Content-Type header at all.
async fn bare_image_server(body: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = tokio::io::AsyncReadExt::read(&mut socket, &mut buf).await;
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(body).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{}/image", addr)
}

#[tokio::test]
async fn test_proxy_image_defaults_to_jpeg() {
    let url = bare_image_server(b"\xff\xd8\xff\xe0jpeg").await;

    let res = post_json(config_with(&[]), "/api/proxy-image", json!({ "url": url })).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.json()["mimeType"], "image/jpeg");
    assert_eq!(res.json()["base64"], STANDARD.encode(b"\xff\xd8\xff\xe0jpeg"));
}

#[tokio::test]
async fn test_proxy_image_failures_are_generic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    for body in [
        json!({ "url": format!("{}/missing.png", server.uri()) }),
        json!({ "url": "not a url" }),
        json!({}),
    ] {
        let res = post_json(mock_config(&server), "/api/proxy-image", body).await;
        assert_eq!(res.status, 500);
        assert_eq!(res.json(), json!({ "error": "Failed to fetch image" }));
    }
}

#[tokio::test]
async fn test_image_endpoints_reject_non_json_body_as_json_error() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    for uri in ["/api/proxy-image", "/api/analyze"] {
        let res = post_raw(mock_config(&server), uri, "text/plain", "url=http://x").await;
        assert_eq!(res.status, 400, "{}", uri);
        assert!(res.json()["error"].as_str().unwrap().contains("application/json"));

        let res = post_raw(mock_config(&server), uri, "application/json", "{not json").await;
        assert_eq!(res.status, 400, "{}", uri);
        assert!(res.json()["error"].is_string());
    }
}

#[tokio::test]
async fn test_analyze_returns_model_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photo.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"jpegbytes".to_vec(), "image/jpeg"))
        .expect(1)
        .mount(&server)
        .await;

    let analysis = json!({
        "palette": ["#112233", "#445566", "#778899", "#aabbcc", "#ddeeff"],
        "keywords": ["calm", "coastal", "muted", "airy", "serene"],
        "description": "Soft light over still water."
    });
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(header("x-goog-api-key", common::GEMINI_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": analysis.to_string() }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let res = post_json(
        mock_config(&server),
        "/api/analyze",
        json!({ "url": format!("{}/photo.jpg", server.uri()) }),
    )
    .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.json(), analysis);
}

#[tokio::test]
async fn test_analyze_model_failure_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photo.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"jpegbytes".to_vec(), "image/jpeg"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(1)
        .mount(&server)
        .await;

    let res = post_json(
        mock_config(&server),
        "/api/analyze",
        json!({ "url": format!("{}/photo.jpg", server.uri()) }),
    )
    .await;

    assert_eq!(res.status, 500);
    assert_eq!(res.json(), json!({ "error": "Failed to analyze image" }));
}

#[tokio::test]
async fn test_analyze_without_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let mut config = mock_config(&server);
    config.gemini_api_key = None;

    let res = post_json(
        config,
        "/api/analyze",
        json!({ "url": format!("{}/photo.jpg", server.uri()) }),
    )
    .await;

    assert_eq!(res.status, 500);
    assert_eq!(res.json(), json!({ "error": "GEMINI_API_KEY is not configured" }));
}

#[tokio::test]
async fn test_unsplash_grid_projects_photos() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2,
            "results": [
                {
                    "id": "u1",
                    "urls": { "regular": "https://images.example/u1.jpg" },
                    "alt_description": "fog over hills",
                    "user": { "name": "Ada" },
                    "links": { "html": "https://unsplash.com/photos/u1" }
                },
                { "id": "u2", "urls": {} }
            ]
        })))
        .mount(&server)
        .await;

    let res = get(mock_config(&server), "/api/images/unsplash?query=fog", None).await;

    assert_eq!(res.status, 200);
    assert_eq!(
        res.json(),
        json!({ "items": [{
            "id": "u1",
            "source": "unsplash",
            "display_url": "https://images.example/u1.jpg",
            "alt": "fog over hills",
            "attribution": "Ada",
            "link": "https://unsplash.com/photos/u1"
        }] })
    );
}

#[tokio::test]
async fn test_pinterest_grid_projects_pins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v5/boards/b1/pins"))
        .and(header("authorization", "Bearer pina_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "p1",
                "title": "Linen",
                "media": { "images": {
                    "150x150": { "url": "https://i.pinimg.example/150.jpg", "width": 150, "height": 150 },
                    "600x": { "url": "https://i.pinimg.example/600.jpg", "width": 600, "height": 900 }
                } }
            }],
            "bookmark": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let res = get(mock_config(&server), "/api/images/pinterest/b1", Some(TOKEN_COOKIE)).await;

    assert_eq!(
        res.json(),
        json!({ "items": [{
            "id": "p1",
            "source": "pinterest",
            "display_url": "https://i.pinimg.example/600.jpg",
            "alt": "Linen",
            "attribution": "Unknown Artist",
            "link": "https://www.pinterest.com/pin/p1/"
        }] })
    );
}

#[tokio::test]
async fn test_health_reports_configured_providers() {
    let res = get(
        config_with(&[("UNSPLASH_ACCESS_KEY", UNSPLASH_KEY)]),
        "/health",
        None,
    )
    .await;

    assert_eq!(res.status, 200);
    let body = res.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(
        body["providers"],
        json!({ "pinterest": false, "unsplash": true, "gemini": false })
    );
}
