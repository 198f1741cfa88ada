use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use aeris_core::BookingError;

/// API error with the wire `status` string carried in the body, so clients
/// can tell a business rejection from a transient conflict or an
/// infrastructure failure.
#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    InsufficientSeats(String),
    ConflictError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    /// Map a booking outcome error onto the HTTP taxonomy.
    pub fn booking(err: BookingError) -> Self {
        match err {
            BookingError::FlightNotFound(_) => AppError::NotFoundError(err.to_string()),
            BookingError::InsufficientSeats { .. } => {
                AppError::InsufficientSeats(err.to_string())
            }
            BookingError::ConflictExhausted { .. } => AppError::ConflictError(err.to_string()),
            BookingError::ReservationPersist(_) | BookingError::Store(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::InsufficientSeats(msg) => {
                (StatusCode::BAD_REQUEST, "INSUFFICIENT_SEATS", msg)
            }
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "ERROR", msg)
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ERROR",
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn booking_errors_map_to_their_statuses() {
        let cases = [
            (
                AppError::booking(BookingError::FlightNotFound(Uuid::new_v4())),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::booking(BookingError::InsufficientSeats {
                    requested: 2,
                    available: 1,
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::booking(BookingError::ConflictExhausted { attempts: 3 }),
                StatusCode::CONFLICT,
            ),
            (
                AppError::booking(BookingError::ReservationPersist("io".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::booking(BookingError::Store("io".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn insufficient_seats_message_carries_both_counts() {
        let err = AppError::booking(BookingError::InsufficientSeats {
            requested: 2,
            available: 1,
        });
        match err {
            AppError::InsufficientSeats(msg) => {
                assert!(msg.contains("requested 2"));
                assert!(msg.contains("available 1"));
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
