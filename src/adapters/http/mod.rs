//! HTTP 介面：`POST /api/calculate`、`GET /health`，其他路徑一律 404

pub mod response;

use crate::config::AppConfig;
use crate::core::service::{BaziService, CalculateRequest};
use crate::domain::ports::{Interpreter, LunisolarCalendar};
use crate::utils::error::{BaziError, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use response::{health_body, CalculateResponse, ErrorResponse};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub struct AppState<C: LunisolarCalendar, I: Interpreter> {
    pub service: Arc<BaziService<C, I>>,
    pub config: Arc<AppConfig>,
}

impl<C: LunisolarCalendar, I: Interpreter> Clone for AppState<C, I> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            config: Arc::clone(&self.config),
        }
    }
}

pub fn router<C, I>(service: Arc<BaziService<C, I>>, config: Arc<AppConfig>) -> Result<Router>
where
    C: LunisolarCalendar + 'static,
    I: Interpreter + 'static,
{
    let cors = cors_layer(&config)?;
    let state = AppState { service, config };

    Ok(Router::new()
        .route("/api/calculate", post(calculate::<C, I>))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer> {
    let origin =
        HeaderValue::from_str(&config.frontend_url).map_err(|e| BaziError::InvalidConfigValueError {
            field: "frontend_url".to_string(),
            value: config.frontend_url.clone(),
            reason: format!("Not a valid origin header: {}", e),
        })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

async fn calculate<C, I>(
    State(state): State<AppState<C, I>>,
    body: std::result::Result<Json<CalculateRequest>, JsonRejection>,
) -> Response
where
    C: LunisolarCalendar + 'static,
    I: Interpreter + 'static,
{
    let development = state.config.environment.is_development();

    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::error!("❌ Unreadable request body: {}", rejection.body_text());
            return ErrorResponse::internal(rejection.body_text(), development).into_response();
        }
    };

    match state.service.calculate(request).await {
        Ok(report) => (StatusCode::OK, Json(CalculateResponse::new(&report))).into_response(),
        Err(e) => {
            tracing::error!("❌ Calculation failed: {} (Category: {:?})", e, e.category());
            ErrorResponse::from_error(&e, development).into_response()
        }
    }
}

async fn health() -> Response {
    Json(health_body()).into_response()
}

async fn not_found() -> Response {
    ErrorResponse::not_found().into_response()
}

/// 綁定監聽並服務到收到 Ctrl-C
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutdown signal received");
}
