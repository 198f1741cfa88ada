use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use aeris_core::{BookingError, BookingRequest};
use aeris_domain::audit::BookingOutcome;
use aeris_domain::reservation::Passenger;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub flight_id: Uuid,
    pub passenger: PassengerPayload,
    pub seats: i32,
}

#[derive(Debug, Deserialize)]
pub struct PassengerPayload {
    pub family_name: String,
    pub given_name: String,
    pub contact_email: String,
}

#[derive(Debug, Serialize)]
struct ReservationResponse {
    reservation_id: Uuid,
    seats: i32,
    status: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/reservations", post(create_reservation))
}

fn validate(req: &CreateReservationRequest) -> Result<(), AppError> {
    if req.seats < 1 {
        return Err(AppError::ValidationError(
            "seats must be a positive integer".to_string(),
        ));
    }
    if req.passenger.family_name.trim().is_empty() || req.passenger.given_name.trim().is_empty() {
        return Err(AppError::ValidationError(
            "passenger name must not be blank".to_string(),
        ));
    }
    let email = req.passenger.contact_email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::ValidationError(
            "contact_email must be a valid address".to_string(),
        ));
    }
    Ok(())
}

async fn create_reservation(
    State(state): State<AppState>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), AppError> {
    validate(&req)?;

    let result = state
        .booking
        .book(BookingRequest {
            flight_id: req.flight_id,
            passenger: Passenger {
                family_name: req.passenger.family_name.trim().to_string(),
                given_name: req.passenger.given_name.trim().to_string(),
                contact_email: req.passenger.contact_email.trim().to_string(),
            },
            seats: req.seats,
        })
        .await;

    // Seats were committed on success and on the persist-failure path; drop
    // the cached availability so search re-reads the row.
    if matches!(&result, Ok(_) | Err(BookingError::ReservationPersist(_))) {
        let _ = state
            .redis
            .delete_flight_availability(&req.flight_id.to_string())
            .await;
    }

    let confirmation = result.map_err(AppError::booking)?;

    info!(
        "Reservation confirmed: {} ({} seats on flight {})",
        confirmation.reservation_id, confirmation.seats, req.flight_id
    );

    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse {
            reservation_id: confirmation.reservation_id,
            seats: confirmation.seats,
            status: BookingOutcome::Confirmed.to_string(),
        }),
    ))
}
