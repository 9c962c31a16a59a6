// 🌐 Expenses Endpoint - One route, multiplexed by method
//
// OPTIONS answers the CORS preflight, GET lists, POST creates, anything else
// gets 405. Response-header layers put CORS and content-type on every
// response, errors included.

use crate::body::read_body_limited;
use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::store::ExpenseStore;
use crate::validation::validate_body;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{error, info, warn};

/// Route of the expenses endpoint
pub const EXPENSES_PATH: &str = "/api/expenses";

pub const ALLOWED_METHODS: &str = "GET,POST,OPTIONS";

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: ExpenseStore,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            store: ExpenseStore::new(),
            config: Arc::new(config),
        }
    }
}

/// Build the router with its header layers
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(EXPENSES_PATH, any(handle_expenses))
        .fallback(not_found)
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        ))
}

// ============================================================================
// Handlers
// ============================================================================

/// /api/expenses - dispatch by method
async fn handle_expenses(State(state): State<AppState>, method: Method, body: Body) -> Response {
    let result = match method {
        Method::OPTIONS => Ok((StatusCode::NO_CONTENT, Json(ApiResponse::empty())).into_response()),
        Method::GET => list_expenses(&state),
        Method::POST => create_expense(&state, body).await,
        _ => Err(ApiError::MethodNotAllowed),
    };

    result.unwrap_or_else(|err| {
        match &err {
            ApiError::Validation(e) => warn!(error = %e, "Rejected expense"),
            ApiError::MethodNotAllowed => warn!(%method, "Method not allowed"),
            ApiError::BodyTooLarge => {
                error!(limit = state.config.max_body_bytes, "Request body too large")
            }
            ApiError::Server(e) => error!(error = %e, "Failed to handle expense request"),
        }
        err.into_response_with_details(state.config.expose_error_details)
    })
}

/// GET - every expense in insertion order
fn list_expenses(state: &AppState) -> Result<Response, ApiError> {
    let expenses = state.store.all()?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(expenses))).into_response())
}

/// POST - read, validate, store
async fn create_expense(state: &AppState, body: Body) -> Result<Response, ApiError> {
    let raw = read_body_limited(body, state.config.max_body_bytes).await?;
    let new_expense = validate_body(&raw)?;
    let expense = state.store.create(new_expense)?;

    info!(id = expense.id, category = %expense.category, "Expense created");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(expense))).into_response())
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::failure("Not found", None)),
    )
        .into_response()
}
