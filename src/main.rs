use crate::backend::BookingBackend;
use crate::configuration::Configuration;
use crate::configuration_handler::ConfigurationHandler;
use crate::http::start_server;
use crate::local_bookings::LocalBookings;
use crate::payment::{PaymentGateway, SimulatedPayments};
use crate::storage::BookingStorage;
use tracing_subscriber::EnvFilter;

mod backend;
mod configuration;
mod configuration_handler;
mod error;
mod http;
mod local_bookings;
mod payment;
mod storage;
#[cfg(test)]
mod testutils;
mod types;

#[derive(Clone)]
pub struct AppState<B: BookingBackend, P: PaymentGateway, C: Configuration> {
    pub bookings: B,
    pub payments: P,
    pub config: C,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ConfigurationHandler;
    let bookings = LocalBookings::with_storage(BookingStorage::new(config.storage_path()));
    let state = AppState {
        bookings,
        payments: SimulatedPayments::default(),
        config,
    };
    start_server(state).await;
}
