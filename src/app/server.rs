use std::path::Path;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use crate::core::purchase::PurchaseService;
use crate::domain::model::PurchaseRequest;
use crate::domain::ports::{BalanceOracle, FulfillmentProvider};
use crate::utils::error::RelayError;

pub struct AppState<O, F> {
    service: Arc<PurchaseService<O, F>>,
}

impl<O, F> Clone for AppState<O, F> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

/// Builds the relay router: the purchase endpoint plus an unconditional
/// static fallback serving the SPA build (client-side routing).
pub fn router<O, F>(service: PurchaseService<O, F>, static_dir: &Path) -> Router
where
    O: BalanceOracle + 'static,
    F: FulfillmentProvider + 'static,
{
    let state = AppState {
        service: Arc::new(service),
    };

    let spa = ServeDir::new(static_dir)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/buy-esim", post(buy_esim::<O, F>))
        .fallback_service(spa)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn buy_esim<O, F>(
    State(state): State<AppState<O, F>>,
    request: Result<Json<PurchaseRequest>, JsonRejection>,
) -> Response
where
    O: BalanceOracle + 'static,
    F: FulfillmentProvider + 'static,
{
    // 請求體格式錯誤一律回 400，不進入處理流程
    let Json(request) = match request {
        Ok(json) => json,
        Err(rejection) => {
            tracing::debug!("rejected request body: {}", rejection.body_text());
            return error_body(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    match state.service.purchase(&request).await {
        // 成功：原封不動轉發供應商的回應內容
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Maps the error taxonomy onto the wire contract. Upstream detail is logged
/// server-side and never leaked to the caller.
fn error_response(err: RelayError) -> Response {
    match err {
        RelayError::InsufficientBalanceError { .. } => {
            error_body(StatusCode::BAD_REQUEST, "Payment not verified")
        }
        RelayError::ValidationError { .. } => {
            error_body(StatusCode::BAD_REQUEST, &err.to_string())
        }
        RelayError::FulfillmentRejectedError => {
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Failed to issue eSIM")
        }
        other => {
            tracing::error!("purchase failed: {}", other);
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
