//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};

use crate::domain::{BookingConfirmation, BookingError, BookingRequest, QueryError, TravelClass};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/classes", get(list_classes))
        .route("/api/trains/search", get(search_trains))
        .route("/api/profiles", get(list_profiles))
        .route("/api/bookings", post(create_booking))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Travel classes offered on the search form.
async fn list_classes() -> Json<ClassesResponse> {
    let classes = TravelClass::OPTIONS
        .iter()
        .map(ClassOption::from_class)
        .collect();
    Json(ClassesResponse { classes })
}

/// Saved traveller profiles a booking can refer to.
async fn list_profiles(State(state): State<AppState>) -> Json<ProfilesResponse> {
    Json(ProfilesResponse {
        profiles: state.profiles.all().to_vec(),
    })
}

/// Search for trains between two stations.
///
/// A source failure still answers 200 with no trains and a notice; only an
/// invalid query is a client error.
async fn search_trains(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<TrainSearchResponse>, AppError> {
    let query = params.into_query();
    let outcome = state.search.search(&query).await?;
    Ok(Json(TrainSearchResponse::from_outcome(outcome)))
}

/// Confirm a booking for a previously returned train.
async fn create_booking(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BookingConfirmation>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let request: BookingRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid booking body");
        AppError::BadRequest {
            message: format!("invalid JSON: {e}"),
            field: None,
        }
    })?;

    let confirmation = request.confirm(&state.profiles)?;
    info!(
        train = %confirmation.train_number,
        class = %confirmation.class_code,
        passengers = confirmation.passenger_count,
        total = confirmation.total_fare,
        "booking confirmed"
    );
    Ok(Json(confirmation))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest {
        message: String,
        field: Option<String>,
    },
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
            field: Some(e.field().to_string()),
        }
    }
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
            field: Some(e.field()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, field) = match self {
            AppError::BadRequest { message, field } => (StatusCode::BAD_REQUEST, message, field),
        };

        info!(%status, %error, field = field.as_deref(), "request rejected");

        (status, Json(ErrorResponse { error, field })).into_response()
    }
}
