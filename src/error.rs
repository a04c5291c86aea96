use crate::storage::StorageError;
use crate::types::TimeSlot;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("{date} is fully booked")]
    CapacityExceeded { date: NaiveDate },

    #[error("the {slot} slot on {date} is already taken")]
    SlotUnavailable { date: NaiveDate, slot: TimeSlot },

    #[error("failed to persist bookings: {0}")]
    Storage(#[from] StorageError),
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = match &self {
            BookingError::CapacityExceeded { .. } | BookingError::SlotUnavailable { .. } => {
                StatusCode::CONFLICT
            }
            BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
