use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use aeris_domain::flight::{Flight, FlightOption, FlightQuery, FlightSort, NewFlight};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FlightSearchParams {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub sort: Option<FlightSort>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/flights", get(search_flights).post(create_flights))
}

async fn search_flights(
    State(state): State<AppState>,
    Query(params): Query<FlightSearchParams>,
) -> Result<Json<Vec<FlightOption>>, AppError> {
    let query = FlightQuery {
        origin_city: params.origin,
        destination_city: params.destination,
        departure_date: params.departure_date,
        sort: params.sort,
    };

    let options = state
        .flights
        .search_flights(&query)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(options))
}

async fn create_flights(
    State(state): State<AppState>,
    Json(requests): Json<Vec<NewFlight>>,
) -> Result<(StatusCode, Json<Vec<Flight>>), AppError> {
    if requests.is_empty() {
        return Err(AppError::ValidationError(
            "at least one flight is required".to_string(),
        ));
    }
    for req in &requests {
        if req.capacity < 1 {
            return Err(AppError::ValidationError(
                "capacity must be a positive integer".to_string(),
            ));
        }
        if req.arrival_time <= req.departure_time {
            return Err(AppError::ValidationError(
                "arrival_time must be after departure_time".to_string(),
            ));
        }
    }

    let created = state
        .flights
        .create_flights(requests)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    info!("Created {} flights", created.len());

    Ok((StatusCode::CREATED, Json(created)))
}
