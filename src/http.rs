// 🌐 HTTP host - REST API with Axum
//
// Thin transport over AccountService: JSON in, envelope out, status chosen
// from the ErrorInfo category.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::entities::{AccountProps, AccountUpdate};
use crate::outcome::{ErrorCategory, ErrorInfo, Outcome};
use crate::service::AccountService;

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: ErrorInfo) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Transport status for a failed outcome
pub fn status_for(error: &ErrorInfo) -> StatusCode {
    match error.category() {
        ErrorCategory::Validation => StatusCode::BAD_REQUEST,
        ErrorCategory::NotFound => StatusCode::NOT_FOUND,
        ErrorCategory::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn respond<T: Serialize>(outcome: Outcome<T>, success: StatusCode) -> Response {
    match outcome {
        Ok(content) => (success, Json(ApiResponse::ok(content))).into_response(),
        Err(error) => (status_for(&error), Json(ApiResponse::<T>::err(error))).into_response(),
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /bank-accounts - Create an account
async fn create_account(
    State(service): State<AccountService>,
    Json(props): Json<AccountProps>,
) -> Response {
    tracing::info!("POST /bank-accounts");
    respond(service.create(props), StatusCode::CREATED)
}

/// GET /bank-accounts/:id - Fetch an account
async fn get_account(State(service): State<AccountService>, Path(id): Path<String>) -> Response {
    tracing::info!("GET /bank-accounts/{}", id);
    respond(service.read(&id), StatusCode::OK)
}

/// PUT /bank-accounts/:id - Rename or set the welcome message
async fn update_account(
    State(service): State<AccountService>,
    Path(id): Path<String>,
    Json(changes): Json<AccountUpdate>,
) -> Response {
    tracing::info!("PUT /bank-accounts/{}", id);
    respond(service.update(&id, changes), StatusCode::OK)
}

/// Build the application router around an injected service
pub fn router(service: AccountService) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/bank-accounts", post(create_account))
        .route(
            "/bank-accounts/:id",
            get(get_account).put(update_account),
        )
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================
