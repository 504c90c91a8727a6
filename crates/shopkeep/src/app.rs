use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    routing::get,
    Router,
};
use shopkeep_auth::auth_routes;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        health::livez,
        listings::{get_listing, list_listings},
        shop::get_shop,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.client_url);
    let timeout = state.config.request_timeout();

    // Upstream data routes, all behind the `CurrentToken` guard
    let api_routes = Router::new()
        .route("/shop", get(get_shop))
        .route("/listings", get(list_listings))
        .route("/listings/{id}", get(get_listing));

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .nest("/api", api_routes)
        .merge(auth_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}

/// CORS for the single browser origin. Credentials are allowed so the session
/// cookie travels with cross-origin requests.
fn cors_layer(client_url: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    match HeaderValue::from_str(client_url.trim_end_matches('/')) {
        Ok(origin) => base.allow_origin(origin),
        Err(e) => {
            tracing::warn!(client_url, error = %e, "CLIENT_URL is not a valid origin; CORS disabled");
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use axum::{
        body::Body,
        http::{Request, Response},
        response::IntoResponse,
    };
    use axum_extra::extract::{cookie::Cookie, SignedCookieJar};
    use chrono::{Duration, Utc};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use shopkeep_auth::{AuthConfig, AuthState, EtsyProvider, SessionStore};
    use shopkeep_core::auth::{SessionId, SessionRecord, SessionRepository};
    use shopkeep_core::events::NoopSink;
    use shopkeep_etsy::EtsyClient;
    use tower::ServiceExt;
    use wiremock::matchers::{header as header_eq, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::Config;

    const API_KEY: &str = "test-keystring";
    const TOKEN: &str = "live-token";

    struct TestApp {
        state: AppState,
        store: SessionStore,
    }

    impl TestApp {
        fn new(server: &MockServer) -> Self {
            let auth_config = AuthConfig {
                client_id: API_KEY.to_string(),
                session_secret: Some("test-session-secret".to_string()),
                ..AuthConfig::default()
            };
            let store = SessionStore::default();
            let auth = AuthState::from_parts(
                Arc::new(store.clone()),
                Arc::new(EtsyProvider::new(&auth_config).unwrap()),
                Arc::new(NoopSink),
                auth_config,
            );
            let config = Config {
                api_base_url: server.uri(),
                ..Config::default()
            };
            let etsy = EtsyClient::new(&config.api_base_url, API_KEY);

            Self {
                state: AppState::new(auth, etsy, config),
                store,
            }
        }

        fn router(&self) -> Router {
            create_app(self.state.clone())
        }

        /// Seeds a session holding `TOKEN` that expires `expires_in` from now,
        /// returning the matching `Cookie` header value.
        async fn login(&self, expires_in: Duration) -> String {
            let mut record = SessionRecord::new(Utc::now());
            record.access_token = Some(TOKEN.to_string());
            record.expires_at = Some(Utc::now() + expires_in);
            self.store
                .put_session(&SessionId::new("sid-1".to_string()), &record)
                .await
                .unwrap();

            let jar = SignedCookieJar::new(self.state.auth.cookie_key().clone())
                .add(Cookie::new("shopkeep.sid", "sid-1"));
            jar.into_response()
                .headers()
                .get(header::SET_COOKIE)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(';').next())
                .unwrap()
                .to_string()
        }

        async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
            let mut request = Request::builder().uri(uri);
            if let Some(cookie) = cookie {
                request = request.header(header::COOKIE, cookie);
            }
            self.router()
                .oneshot(request.body(Body::empty()).unwrap())
                .await
                .unwrap()
        }
    }

    async fn json_body(response: Response<Body>) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn authenticated(m: wiremock::MockBuilder) -> wiremock::MockBuilder {
        m.and(header_eq("x-api-key", API_KEY))
            .and(header_eq("authorization", format!("Bearer {TOKEN}").as_str()))
    }

    async fn mount_me(server: &MockServer, body: Value) {
        authenticated(Mock::given(method("GET")).and(path("/users/me")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    // ==================== Health & Auth ====================

    #[tokio::test]
    async fn test_livez() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);

        let response = app.get("/livez", None).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_auth_routes_are_mounted() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);

        let response = app.get("/api/auth/status", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"authenticated": false}));
    }

    #[tokio::test]
    async fn test_status_after_login() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);
        let cookie = app.login(Duration::hours(1)).await;

        let response = app.get("/api/auth/status", Some(&cookie)).await;

        assert_eq!(json_body(response).await, json!({"authenticated": true}));
    }

    #[tokio::test]
    async fn test_cors_allows_client_origin_with_credentials() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);

        let response = app
            .router()
            .oneshot(
                Request::builder()
                    .uri("/livez")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    // ==================== Guard ====================

    #[tokio::test]
    async fn test_data_routes_require_session() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);

        for uri in ["/api/shop", "/api/listings", "/api/listings/1"] {
            let response = app.get(uri, None).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(json_body(response).await["code"], "not_authenticated");
        }

        // The upstream is never contacted.
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);
        let cookie = app.login(Duration::minutes(-1)).await;

        let response = app.get("/api/shop", Some(&cookie)).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["code"], "token_expired");
    }

    // ==================== Shop ====================

    #[tokio::test]
    async fn test_get_shop_returns_raw_payload() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);
        let cookie = app.login(Duration::hours(1)).await;

        let shops = json!({"count": 1, "results": [{"shop_id": 9, "shop_name": "Knots"}]});
        mount_me(&server, json!({"user_id": 42})).await;
        authenticated(Mock::given(method("GET")).and(path("/users/42/shops")))
            .respond_with(ResponseTemplate::new(200).set_body_json(&shops))
            .mount(&server)
            .await;

        let response = app.get("/api/shop", Some(&cookie)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, shops);
    }

    #[tokio::test]
    async fn test_get_shop_forwards_upstream_status() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);
        let cookie = app.login(Duration::hours(1)).await;

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"error": "insufficient scope"})),
            )
            .mount(&server)
            .await;

        let response = app.get("/api/shop", Some(&cookie)).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            json_body(response).await,
            json!({
                "error": "Failed to fetch shop data",
                "details": {"error": "insufficient scope"}
            })
        );
    }

    // ==================== Listings ====================

    #[tokio::test]
    async fn test_list_listings_transforms_results() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);
        let cookie = app.login(Duration::hours(1)).await;

        mount_me(&server, json!({"user_id": 42, "shop_id": 9})).await;
        authenticated(Mock::given(method("GET")).and(path("/shops/9/listings")))
            .and(query_param("state", "active"))
            .and(query_param("includes", "Images,Inventory"))
            .and(query_param("limit", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1,
                "results": [{
                    "listing_id": 1001,
                    "title": "Rope basket",
                    "price": {"amount": 2500, "divisor": 100},
                    "quantity": 4,
                    "tags": ["rope"],
                    "images": [{"url_fullxfull": "https://img.test/full.jpg"}],
                    "inventory": {"products": [{
                        "property_values": [{"property_name": "Color", "values": ["Red"]}],
                        "offerings": [{"price": {"amount": 2500, "divisor": 100}, "quantity": 4}]
                    }]},
                    "url": "https://www.etsy.com/listing/1001",
                    "state": "active"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = app.get("/api/listings", Some(&cookie)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["count"], 1);
        let listing = &body["results"][0];
        assert_eq!(listing["id"], 1001);
        assert_eq!(listing["price"], 25.0);
        assert_eq!(listing["photos"], json!(["https://img.test/full.jpg"]));
        assert_eq!(
            listing["variations"],
            json!([{"color": "red", "price": 25.0, "quantity": 4}])
        );
        assert_eq!(listing["lastBackup"], Value::Null);
        assert_eq!(listing["etsyUrl"], "https://www.etsy.com/listing/1001");
    }

    #[tokio::test]
    async fn test_list_listings_falls_back_to_shop_lookup() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);
        let cookie = app.login(Duration::hours(1)).await;

        mount_me(&server, json!({"user_id": 42})).await;
        Mock::given(method("GET"))
            .and(path("/users/42/shops"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"shop_id": 77})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/shops/77/listings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0, "results": []})))
            .expect(1)
            .mount(&server)
            .await;

        let response = app.get("/api/listings", Some(&cookie)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"count": 0, "results": []}));
    }

    #[tokio::test]
    async fn test_list_listings_without_results_field_is_empty() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);
        let cookie = app.login(Duration::hours(1)).await;

        mount_me(&server, json!({"user_id": 42, "shop_id": 9})).await;
        Mock::given(method("GET"))
            .and(path("/shops/9/listings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0})))
            .mount(&server)
            .await;

        let response = app.get("/api/listings", Some(&cookie)).await;

        assert_eq!(json_body(response).await, json!({"count": 0, "results": []}));
    }

    #[tokio::test]
    async fn test_list_listings_without_shop_is_not_found() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);
        let cookie = app.login(Duration::hours(1)).await;

        mount_me(&server, json!({"user_id": 42})).await;
        Mock::given(method("GET"))
            .and(path("/users/42/shops"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0, "results": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(wiremock::matchers::path_regex(r"^/shops/.*/listings$"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let response = app.get("/api/listings", Some(&cookie)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"], "No shop found for this Etsy account");
        assert_eq!(body["details"], Value::Null);
    }

    #[tokio::test]
    async fn test_list_listings_forwards_upstream_status() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);
        let cookie = app.login(Duration::hours(1)).await;

        mount_me(&server, json!({"user_id": 42, "shop_id": 9})).await;
        Mock::given(method("GET"))
            .and(path("/shops/9/listings"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let response = app.get("/api/listings", Some(&cookie)).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            json_body(response).await,
            json!({"error": "Failed to fetch listings", "details": "maintenance"})
        );
    }

    #[tokio::test]
    async fn test_get_listing_returns_raw_payload() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);
        let cookie = app.login(Duration::hours(1)).await;

        let listing = json!({"listing_id": 1001, "title": "Rope basket", "images": []});
        authenticated(Mock::given(method("GET")).and(path("/listings/1001")))
            .and(query_param("includes", "Images,Inventory"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&listing))
            .mount(&server)
            .await;

        let response = app.get("/api/listings/1001", Some(&cookie)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, listing);
    }

    #[tokio::test]
    async fn test_get_listing_with_non_numeric_id_is_json_bad_request() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);
        let cookie = app.login(Duration::hours(1)).await;

        let response = app.get("/api/listings/basket", Some(&cookie)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body = json_body(response).await;
        assert_eq!(body["error"], "Invalid listing id");
        assert!(body["details"].is_string());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_listing_not_found_upstream() {
        let server = MockServer::start().await;
        let app = TestApp::new(&server);
        let cookie = app.login(Duration::hours(1)).await;

        Mock::given(method("GET"))
            .and(path("/listings/5"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Listing not found"})))
            .mount(&server)
            .await;

        let response = app.get("/api/listings/5", Some(&cookie)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Failed to fetch listing");
        assert_eq!(body["details"], json!({"error": "Listing not found"}));
    }
}
