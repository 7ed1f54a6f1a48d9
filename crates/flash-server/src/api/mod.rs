mod monitor;
mod plans;
mod reports;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use flash_core::AppConfig;

use crate::middleware::{
    enforce_rate_limit, request_id, require_bearer_auth, AuthState, RateLimitState, RequestId,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/monitor", post(monitor::run_monitor))
        .route("/api/v1/reports", post(reports::generate_report))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    auth,
                    require_bearer_auth,
                )),
        )
}

pub fn build_app(state: AppState, auth: AuthState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/plans", get(plans::list_plans));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use flash_core::Environment;
    use tower::ServiceExt;

    fn test_config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            env: Environment::Test,
            bind_addr: "127.0.0.1:0".parse().expect("addr"),
            log_level: "info".to_string(),
            newsapi_keys: vec![],
            feeds_path: None,
            cache_dir: std::env::temp_dir().join("flash-server-tests"),
            cache_ttl_minutes: 15,
            http_timeout_secs: 5,
            http_user_agent: "flash-test/0.1".to_string(),
            http_max_retries: 0,
            http_retry_backoff_ms: 1,
            llm: None,
            slack: None,
            smtp: None,
            servicenow: None,
            alert_negative_threshold: 30.0,
            watch: None,
        })
    }

    fn open_app() -> Router {
        let auth = AuthState::with_keys(vec!["test-key".to_string()]);
        build_app(
            AppState {
                config: test_config(),
            },
            auth,
            default_rate_limit_state(),
        )
    }

    fn inline_monitor_body() -> String {
        let published = Utc::now().to_rfc3339();
        serde_json::json!({
            "brand": "BrandX",
            "competitors": ["Rival"],
            "lookback_hours": 24,
            "mentions": [
                {
                    "text": "BrandX praised for excellent launch",
                    "source": "nytimes.com",
                    "channel": "news",
                    "published_at": published,
                    "link": "https://nytimes.com/a",
                    "mentioned_brands": ["BrandX"],
                    "authority": 10,
                    "reach": 1_000_000
                },
                {
                    "text": "Rival faces recall backlash",
                    "source": "placeholder.fb.com",
                    "channel": "social",
                    "published_at": published,
                    "mentioned_brands": ["Rival"],
                    "authority": 3,
                    "reach": 5_000,
                    "likes": 40,
                    "comments": 10
                }
            ]
        })
        .to_string()
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, "Bearer test-key")
            .body(Body::from(body))
            .expect("request")
    }

    #[tokio::test]
    async fn health_is_public_and_ok() {
        let response = open_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(json["data"]["status"], "ok");
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn plans_lists_three_tiers() {
        let response = open_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/plans")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
        let tiers = json["data"].as_array().expect("data array");
        assert_eq!(tiers.len(), 3);
        assert_eq!(tiers[0]["tier"], "Professional");
    }

    #[tokio::test]
    async fn monitor_requires_a_bearer_token() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/monitor")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(inline_monitor_body()))
            .expect("request");
        let response = open_app().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn monitor_rejects_a_blank_brand() {
        let body = serde_json::json!({ "brand": "  ", "mentions": [] }).to_string();
        let response = open_app()
            .oneshot(post_json("/api/v1/monitor", body))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn monitor_with_inline_mentions_computes_kpis() {
        let response = open_app()
            .oneshot(post_json("/api/v1/monitor", inline_monitor_body()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
        let data = &json["data"];
        assert_eq!(data["kpis"]["total_mentions"], 2);
        // Keyword-rule labels: "excellent" is positive, "backlash" is anger.
        assert_eq!(data["mentions"][0]["sentiment"], "positive");
        assert_eq!(data["mentions"][1]["sentiment"], "anger");
        assert_eq!(data["kpis"]["mis"], 10);
        assert_eq!(data["classification"]["rule_labeled"], 2);
        assert!(data["recommendations"].as_array().is_some_and(|r| !r.is_empty()));
        let sov = data["kpis"]["sov"].as_array().expect("sov array");
        assert_eq!(sov[0]["brand"], "BrandX");
    }

    #[tokio::test]
    async fn reports_render_csv_with_the_right_content_type() {
        let response = open_app()
            .oneshot(post_json("/api/v1/reports?format=csv", inline_monitor_body()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/csv"));
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let csv = String::from_utf8(body.to_vec()).expect("utf8");
        assert!(csv.starts_with("text,source,channel"));
        assert_eq!(csv.lines().count(), 3);
    }

    #[tokio::test]
    async fn reports_render_pdf_bytes() {
        let response = open_app()
            .oneshot(post_json("/api/v1/reports?format=pdf", inline_monitor_body()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert_eq!(content_type, "application/pdf");
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        assert!(body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn reports_email_request_without_smtp_still_returns_the_file() {
        let response = open_app()
            .oneshot(post_json(
                "/api/v1/reports?format=csv&email_to=analyst%40example.com",
                inline_monitor_body(),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        assert!(body.starts_with(b"text,source,channel"));
    }

    #[tokio::test]
    async fn reports_default_to_pdf_and_reject_unknown_formats() {
        let response = open_app()
            .oneshot(post_json("/api/v1/reports", inline_monitor_body()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let response = open_app()
            .oneshot(post_json(
                "/api/v1/reports?format=docx",
                inline_monitor_body(),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rate_limit_sheds_excess_requests() {
        let auth = AuthState::with_keys(vec!["test-key".to_string()]);
        let app = build_app(
            AppState {
                config: test_config(),
            },
            auth,
            RateLimitState::new(1, Duration::from_secs(60)),
        );

        let unauthorized = Request::builder()
            .method("POST")
            .uri("/api/v1/monitor")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::empty())
            .expect("request");
        let first = app.clone().oneshot(unauthorized).await.expect("response");
        assert_eq!(first.status(), StatusCode::UNAUTHORIZED);

        let second = Request::builder()
            .method("POST")
            .uri("/api/v1/monitor")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::empty())
            .expect("request");
        let response = app.oneshot(second).await.expect("response");
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
