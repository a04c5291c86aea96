use crate::backend::BookingBackend;
use crate::configuration::Configuration;
use crate::payment::{PaymentGateway, Receipt};
use crate::types::{Booking, CapacityState, Dog, NewBooking, Owner, ServiceType, TimeSlot};
use crate::AppState;
use axum::body::Body;
use axum::extract::{Query, Request};
use axum::middleware::{self, Next};
use axum::response::{Html, Response};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum::{
    routing::{get, post},
    Router,
};
use axum_valid::Valid;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use validator::Validate;

lazy_static! {
    // US numbers, optionally parenthesized area code, as the booking form accepts them.
    static ref US_PHONE: Regex =
        Regex::new(r"^\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-. ]?([0-9]{4})$").unwrap();
}

/// Body of `POST /book`. Contact fields are validated here, in the
/// submission flow; the store only checks capacity and slot uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateBookingRequest {
    #[validate(length(min = 1))]
    owner_name: String,
    #[validate(email)]
    owner_email: String,
    #[validate(regex(path = *US_PHONE))]
    owner_phone: String,
    #[validate(length(min = 1))]
    dog_name: String,
    #[validate(length(min = 1))]
    dog_breed: String,
    service: ServiceType,
    date: NaiveDate,
    time_slot: TimeSlot,
    #[serde(default)]
    special_instructions: String,
}

impl From<CreateBookingRequest> for NewBooking {
    fn from(request: CreateBookingRequest) -> Self {
        NewBooking {
            owner: Owner {
                name: request.owner_name,
                email: request.owner_email,
                phone: request.owner_phone,
            },
            dog: Dog {
                name: request.dog_name,
                breed: request.dog_breed,
            },
            service: request.service,
            date: request.date,
            time_slot: request.time_slot,
            special_instructions: request.special_instructions,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AvailabilityQuery {
    date: NaiveDate,
}

/// Answer for one calendar cell: the capacity class the renderer maps to a
/// visual state, and the open slots the slot selector offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityResponse {
    date: NaiveDate,
    capacity: CapacityState,
    available_slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingConfirmation {
    booking: Booking,
    receipt: Receipt,
    service_name: String,
    time_slot_label: String,
    total: String,
}

impl BookingConfirmation {
    fn new(booking: Booking, receipt: Receipt) -> Self {
        Self {
            service_name: booking.service.display_name().to_string(),
            time_slot_label: booking.time_slot.label().to_string(),
            total: format_usd(booking.service.price()),
            booking,
            receipt,
        }
    }
}

fn format_usd(amount: u32) -> String {
    format!("${amount}.00")
}

pub async fn start_server<B: BookingBackend, P: PaymentGateway, C: Configuration>(
    state: AppState<B, P, C>,
) {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/frontend", get(get_frontend))
        .route("/availability", get(get_availability))
        .route("/book", post(create_booking));

    let admin = Router::new()
        .route("/bookings", get(get_bookings))
        .route("/remove_all", post(remove_all_bookings))
        .route_layer(middleware::from_fn_with_state(
            state.config.admin_password(),
            admin_auth,
        ));

    let address = format!("127.0.0.1:{}", state.config.port());
    let app = Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&address).await.unwrap();
    info!(%address, "booking backend listening");
    axum::serve(listener, app).await.unwrap();
}

async fn admin_auth(
    State(expected_password): State<String>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    if let Some(auth_header) = request.headers().get("x-admin-password") {
        if auth_header.to_str().unwrap_or("") != expected_password {
            return Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()));
        }
    } else {
        return Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string()));
    }
    Ok(next.run(request).await)
}

async fn get_availability<B: BookingBackend, P: PaymentGateway, C: Configuration>(
    State(state): State<AppState<B, P, C>>,
    Query(query): Query<AvailabilityQuery>,
) -> impl IntoResponse {
    let AvailabilityQuery { date } = query;
    Json(AvailabilityResponse {
        date,
        capacity: state.bookings.capacity_state(date),
        available_slots: state.bookings.available_slots(date),
    })
}

/// The submission flow: charge first, then create, as the original booking
/// flow does. The store's own checks remain the authoritative gate against
/// a stale calendar.
async fn create_booking<B: BookingBackend, P: PaymentGateway, C: Configuration>(
    State(state): State<AppState<B, P, C>>,
    Valid(Json(request)): Valid<Json<CreateBookingRequest>>,
) -> Response {
    let price = request.service.price();
    let receipt = match state.payments.submit_payment(price).await {
        Ok(receipt) => receipt,
        Err(err) => return err.into_response(),
    };

    match state.bookings.create_booking(request.into()) {
        Ok(booking) => (StatusCode::OK, Json(BookingConfirmation::new(booking, receipt))).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn get_bookings<B: BookingBackend, P: PaymentGateway, C: Configuration>(
    State(state): State<AppState<B, P, C>>,
) -> impl IntoResponse {
    Json(state.bookings.bookings())
}

async fn remove_all_bookings<B: BookingBackend, P: PaymentGateway, C: Configuration>(
    State(state): State<AppState<B, P, C>>,
) -> impl IntoResponse {
    state.bookings.clear_bookings();
    (
        StatusCode::OK,
        "All bookings removed successfully".to_string(),
    )
}

async fn get_frontend<B: BookingBackend, P: PaymentGateway, C: Configuration>(
    State(state): State<AppState<B, P, C>>,
) -> Result<Html<String>, (StatusCode, String)> {
    let path = state.config.frontend_path();

    match fs::read_to_string(&path).await {
        Ok(contents) => Ok(Html(contents)),
        Err(e) => {
            let error_message = format!("Failed to read frontend file: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, error_message))
        }
    }
}
