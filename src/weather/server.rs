use std::future::Future;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::WeatherStore;
use crate::WheelError;
use crate::config::ServerConfig;
use crate::models::WeatherRecord;

const MAX_BODY_BYTES: usize = 16 * 1024;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Weather data not found")]
    NotFound,

    #[error("Internal Server Error")]
    Internal(#[from] WheelError),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::NotFound => StatusCode::NOT_FOUND,
            ProxyError::Internal(source) => {
                error!("Error querying weather table: {}", source);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: String,
}

#[derive(Clone)]
struct AppState {
    store: Arc<dyn WeatherStore>,
}

pub fn router(store: Arc<dyn WeatherStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/weather", post(get_weather))
        .route("/health", get(health))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState { store })
}

async fn get_weather(
    State(state): State<AppState>,
    Json(query): Json<WeatherQuery>,
) -> Result<Json<WeatherRecord>, ProxyError> {
    let record = state
        .store
        .latest(&query.city)
        .await?
        .ok_or(ProxyError::NotFound)?;
    Ok(Json(record))
}

async fn health() -> &'static str {
    "ok"
}

/// Bind to the configured address and serve until Ctrl+C or SIGTERM
pub async fn run(config: &ServerConfig, store: Arc<dyn WeatherStore>) -> anyhow::Result<()> {
    let address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Weather proxy running at http://{}", listener.local_addr()?);

    serve(listener, store, shutdown_signal()).await?;

    info!("Weather proxy shut down");
    Ok(())
}

pub async fn serve<F>(
    listener: TcpListener,
    store: Arc<dyn WeatherStore>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use crate::weather::MemoryWeatherStore;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use chrono::{TimeZone, Utc};
    use serde_json::Value;
    use tower::ServiceExt;

    struct BrokenStore;

    #[async_trait]
    impl WeatherStore for BrokenStore {
        async fn latest(&self, _city: &str) -> Result<Option<WeatherRecord>> {
            Err(WheelError::store("table unavailable"))
        }

        async fn put(&self, _record: WeatherRecord) -> Result<()> {
            Err(WheelError::store("table unavailable"))
        }
    }

    async fn seeded_store() -> Arc<dyn WeatherStore> {
        let store = MemoryWeatherStore::new();
        for (hour, temp, description) in [(6, 26.0, "mist"), (14, 31.2, "scattered clouds")] {
            store
                .put(WeatherRecord::new(
                    "Taipei",
                    Utc.with_ymd_and_hms(2024, 8, 2, hour, 0, 0).unwrap(),
                    temp,
                    description,
                ))
                .await
                .unwrap();
        }
        Arc::new(store)
    }

    fn weather_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/weather")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_returns_latest_record() {
        let response = router(seeded_store().await)
            .oneshot(weather_request(r#"{"city":"Taipei"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["City"], "Taipei");
        assert_eq!(body["CurrentWeather"]["temp"], 31.2);
        assert_eq!(body["CurrentWeather"]["description"], "scattered clouds");
    }

    #[tokio::test]
    async fn test_unknown_city_is_not_found() {
        let response = router(seeded_store().await)
            .oneshot(weather_request(r#"{"city":"Atlantis"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Weather data not found" })
        );
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let response = router(Arc::new(BrokenStore))
            .oneshot(weather_request(r#"{"city":"Taipei"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Internal Server Error" })
        );
    }

    #[tokio::test]
    async fn test_missing_city_is_rejected() {
        let response = router(seeded_store().await)
            .oneshot(weather_request(r#"{"town":"Taipei"}"#))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_health() {
        let response = router(Arc::new(MemoryWeatherStore::new()))
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let response = router(seeded_store().await)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/weather")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"city":"Taipei"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
