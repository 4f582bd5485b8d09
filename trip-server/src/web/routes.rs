//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::{IataCode, RequestError, SearchRequest};
use crate::planner::TripOptimizer;
use crate::reference::CityDirectory;

use super::dto::*;
use super::state::AppState;

const DEFAULT_CITY_LIMIT: usize = 10;
const MAX_CITY_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cities/search", get(search_cities))
        .route("/api/cities/hubs", get(list_hubs))
        .route("/trips/plan", post(plan_trip))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search cities by code prefix or name.
async fn search_cities(
    State(state): State<AppState>,
    Query(query): Query<CitySearchQuery>,
) -> Json<CitySearchResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_CITY_LIMIT).min(MAX_CITY_LIMIT);
    let cities = state
        .reference
        .search(&query.q, limit)
        .into_iter()
        .map(CityResult::from_city)
        .collect();

    Json(CitySearchResponse { cities })
}

/// List every transit hub, ordered by code.
async fn list_hubs(State(state): State<AppState>) -> Json<CitySearchResponse> {
    let cities = state
        .reference
        .list_hubs()
        .into_iter()
        .filter_map(|code| state.reference.lookup(code))
        .map(CityResult::from_city)
        .collect();

    Json(CitySearchResponse { cities })
}

/// Plan a round trip and return every ranked itinerary.
async fn plan_trip(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanTripResponse>, AppError> {
    // Parsed by hand so malformed bodies map to our error shape
    let req: PlanTripRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid plan request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let request = to_search_request(&req)?;
    request.validate()?;

    for code in [request.origin, request.destination] {
        if state.reference.lookup(code).is_none() {
            return Err(AppError::NotFound {
                message: format!("Unknown city: {code}"),
            });
        }
    }

    let optimizer = TripOptimizer::new(
        state.reference.as_ref(),
        state.live.as_ref(),
        state.config.as_ref().clone(),
        request,
    );
    let result = optimizer.optimize().await;
    let recommended = result.recommended().cloned();

    Ok(Json(PlanTripResponse {
        search: SearchSummary::from(optimizer.request()),
        variants: result.variants,
        recommended,
        candidates_generated: result.candidates_generated,
    }))
}

fn parse_code(field: &str, value: &str) -> Result<IataCode, AppError> {
    IataCode::parse_normalized(value).map_err(|_| AppError::BadRequest {
        message: format!("Invalid {field} code: {value}"),
    })
}

fn to_search_request(req: &PlanTripRequest) -> Result<SearchRequest, AppError> {
    let origin = parse_code("origin", &req.origin)?;
    let destination = parse_code("destination", &req.destination)?;

    let mut request = SearchRequest::new(origin, destination, req.departure_date, req.return_date);
    if let Some(travelers) = req.travelers {
        request = request.with_travelers(travelers);
    }
    if let Some(stars) = req.hotel_stars {
        request = request.with_hotel_stars(stars);
    }
    if let Some(include_transit) = req.include_transit {
        request = request.with_include_transit(include_transit);
    }
    if let Some(mode) = req.mode {
        request = request.with_mode(mode);
    }
    request.budget_max = req.budget_max;

    Ok(request)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<RequestError> for AppError {
    fn from(e: RequestError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(status = status.as_u16(), %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
