use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{auth, days, foods, meals, portions, preferences, state::AppState};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .merge(auth::router())
                .merge(days::router())
                .merge(foods::router())
                .merge(meals::router())
                .merge(portions::router())
                .merge(preferences::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtKeys;
    use axum::{
        body::Body,
        extract::FromRef,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn bearer(state: &AppState) -> String {
        let token = JwtKeys::from_ref(state)
            .sign_access(Uuid::new_v4())
            .expect("sign access");
        format!("Bearer {token}")
    }

    async fn send(state: &AppState, req: Request<Body>) -> (StatusCode, Value) {
        let res = build_app(state.clone()).oneshot(req).await.expect("response");
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let state = AppState::fake();
        let res = build_app(state).oneshot(get("/api/v1/health")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn event_feed_requires_authentication() {
        let state = AppState::fake();
        let (status, body) = send(&state, get("/api/v1/events")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn refresh_token_is_not_accepted_as_access() {
        let state = AppState::fake();
        let refresh = JwtKeys::from_ref(&state)
            .sign_refresh(Uuid::new_v4())
            .unwrap();
        let req = Request::get("/api/v1/days")
            .header(header::AUTHORIZATION, format!("Bearer {refresh}"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&state, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn anonymous_preferences_are_the_defaults() {
        let state = AppState::fake();
        let (status, body) = send(&state, get("/api/v1/preferences")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["max_calories"], 2000.0);
        assert_eq!(body["theme"], "light");
        assert_eq!(body["available_themes"].as_array().map(Vec::len), Some(32));
    }

    #[tokio::test]
    async fn invalid_token_on_optional_auth_is_rejected() {
        let state = AppState::fake();
        let req = Request::get("/api/v1/preferences")
            .header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&state, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn event_feed_rejects_malformed_dates() {
        let state = AppState::fake();
        let req = Request::get("/api/v1/events?start=last-monday")
            .header(header::AUTHORIZATION, bearer(&state))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&state, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn day_detail_rejects_malformed_dates() {
        let state = AppState::fake();
        let req = Request::get("/api/v1/days/2024-13-01")
            .header(header::AUTHORIZATION, bearer(&state))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&state, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn food_with_negative_calories_is_rejected() {
        let state = AppState::fake();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/foods")
            .header(header::AUTHORIZATION, bearer(&state))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Oats","calories_per_unit":-3}"#))
            .unwrap();
        let (status, body) = send(&state, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap_or_default()
            .contains("calories_per_unit"));
    }

    #[tokio::test]
    async fn unknown_theme_is_rejected_before_saving() {
        let state = AppState::fake();
        let req = Request::builder()
            .method(Method::PUT)
            .uri("/api/v1/preferences")
            .header(header::AUTHORIZATION, bearer(&state))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"max_calories":1800,"theme":"neon"}"#))
            .unwrap();
        let (status, _) = send(&state, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_validates_email_before_touching_the_store() {
        let state = AppState::fake();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"email":"not-an-email","password":"long-enough-pw"}"#))
            .unwrap();
        let (status, body) = send(&state, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Invalid email");
    }
}
