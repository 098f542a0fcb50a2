//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::planner::{Criterion, RouteFinder};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cities", get(list_cities))
        .route("/route", get(find_route))
        .route("/routes", get(find_top_routes))
        .route("/routes/best", get(find_best_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every city in the timetable with its stations.
async fn list_cities(State(state): State<AppState>) -> Json<CitiesResponse> {
    let cities = state
        .timetable
        .city_names()
        .into_iter()
        .filter_map(|name| state.timetable.city(name))
        .map(CityResult::from_city)
        .collect();

    Json(CitiesResponse { cities })
}

/// Best route for a criterion.
async fn find_route(
    State(state): State<AppState>,
    Query(req): Query<RouteQuery>,
) -> Result<Json<RouteResponse>, AppError> {
    let (from, to, criterion) = validate(&state, &req)?;
    let anchor = state.config.anchor_date();

    let outcome = run_search(&state, anchor, move |finder| {
        finder.search_route(&from, &to, criterion)
    })
    .await?;

    Ok(Json(RouteResponse {
        itinerary: outcome
            .itineraries
            .first()
            .map(|i| ItineraryResult::from_itinerary(i, anchor)),
        routes_explored: outcome.routes_explored,
    }))
}

/// Several distinct routes for a criterion, best first.
async fn find_top_routes(
    State(state): State<AppState>,
    Query(req): Query<RouteQuery>,
) -> Result<Json<RoutesResponse>, AppError> {
    let (from, to, criterion) = validate(&state, &req)?;
    let limit = state
        .config
        .resolve_limit(req.limit)
        .ok_or_else(|| AppError::BadRequest {
            message: format!("limit must be between 1 and {}", state.config.max_limit),
        })?;
    let anchor = state.config.anchor_date();

    let outcome = run_search(&state, anchor, move |finder| {
        finder.search_top_routes(&from, &to, criterion, limit)
    })
    .await?;

    Ok(Json(RoutesResponse {
        itineraries: outcome
            .itineraries
            .iter()
            .map(|i| ItineraryResult::from_itinerary(i, anchor))
            .collect(),
        routes_explored: outcome.routes_explored,
    }))
}

/// First of the top routes for a criterion.
async fn find_best_route(
    State(state): State<AppState>,
    Query(req): Query<RouteQuery>,
) -> Result<Json<BestRouteResponse>, AppError> {
    let (from, to, criterion) = validate(&state, &req)?;
    let anchor = state.config.anchor_date();

    let best = run_search(&state, anchor, move |finder| {
        finder.find_best_route(&from, &to, criterion)
    })
    .await?;

    Ok(Json(BestRouteResponse {
        itinerary: best
            .as_ref()
            .map(|i| ItineraryResult::from_itinerary(i, anchor)),
    }))
}

/// Check the endpoints and criterion of a route query.
fn validate(state: &AppState, req: &RouteQuery) -> Result<(String, String, Criterion), AppError> {
    let criterion = req
        .criterion
        .as_deref()
        .map(str::parse::<Criterion>)
        .transpose()
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?
        .unwrap_or(Criterion::Time);

    for city in [&req.from, &req.to] {
        if !state.timetable.contains(city) {
            return Err(AppError::BadRequest {
                message: format!("Unknown city: {city}"),
            });
        }
    }

    if req.from == req.to {
        return Err(AppError::BadRequest {
            message: "Start and end city must differ".to_string(),
        });
    }

    Ok((req.from.clone(), req.to.clone(), criterion))
}

/// Run a search off the async runtime, dated on `anchor`.
async fn run_search<T, F>(state: &AppState, anchor: NaiveDate, search: F) -> Result<T, AppError>
where
    F: FnOnce(&RouteFinder<'_>) -> T + Send + 'static,
    T: Send + 'static,
{
    let timetable = Arc::clone(&state.timetable);
    // Pinned so the search and the response agree on the date
    let config = state.config.as_ref().clone().with_anchor_date(anchor);

    tokio::task::spawn_blocking(move || {
        let finder = RouteFinder::new(&timetable, &config);
        search(&finder)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("Search task failed: {e}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "Bad request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
