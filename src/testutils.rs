use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::backend::BookingBackend;
use crate::configuration::Configuration;
use crate::error::BookingError;
use crate::payment::{PaymentError, PaymentGateway, Receipt};
use crate::types::{Booking, CapacityState, NewBooking, TimeSlot};

pub struct MockBookingBackendInner {
    pub success: AtomicBool,
    pub calls_to_bookings: AtomicU64,
    pub calls_to_bookings_for_date: AtomicU64,
    pub calls_to_capacity_state: AtomicU64,
    pub calls_to_available_slots: AtomicU64,
    pub calls_to_create_booking: AtomicU64,
    pub calls_to_clear_bookings: AtomicU64,
    pub bookings: Mutex<Vec<Booking>>,
    pub capacity: Mutex<CapacityState>,
    pub slots: Mutex<Vec<TimeSlot>>,
}

#[derive(Clone)]
pub struct MockBookingBackend(pub Arc<MockBookingBackendInner>);

impl MockBookingBackendInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            calls_to_bookings: AtomicU64::default(),
            calls_to_bookings_for_date: AtomicU64::default(),
            calls_to_capacity_state: AtomicU64::default(),
            calls_to_available_slots: AtomicU64::default(),
            calls_to_create_booking: AtomicU64::default(),
            calls_to_clear_bookings: AtomicU64::default(),
            bookings: Mutex::default(),
            capacity: Mutex::new(CapacityState::Open),
            slots: Mutex::new(TimeSlot::ALL.to_vec()),
        }
    }
}

impl MockBookingBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingBackendInner::new()))
    }
}

impl BookingBackend for MockBookingBackend {
    fn bookings(&self) -> Vec<Booking> {
        self.0.calls_to_bookings.fetch_add(1, Ordering::SeqCst);
        self.0.bookings.lock().unwrap().clone()
    }

    fn bookings_for_date(&self, date: NaiveDate) -> Vec<Booking> {
        self.0
            .calls_to_bookings_for_date
            .fetch_add(1, Ordering::SeqCst);
        self.0
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|booking| booking.date == date)
            .cloned()
            .collect()
    }

    fn capacity_state(&self, _date: NaiveDate) -> CapacityState {
        self.0.calls_to_capacity_state.fetch_add(1, Ordering::SeqCst);
        *self.0.capacity.lock().unwrap()
    }

    fn available_slots(&self, _date: NaiveDate) -> Vec<TimeSlot> {
        self.0
            .calls_to_available_slots
            .fetch_add(1, Ordering::SeqCst);
        self.0.slots.lock().unwrap().clone()
    }

    fn create_booking(&self, candidate: NewBooking) -> Result<Booking, BookingError> {
        self.0.calls_to_create_booking.fetch_add(1, Ordering::SeqCst);
        if !self.0.success.load(Ordering::SeqCst) {
            return Err(BookingError::CapacityExceeded {
                date: candidate.date,
            });
        }
        let booking = Booking::create(candidate);
        self.0.bookings.lock().unwrap().push(booking.clone());
        Ok(booking)
    }

    fn clear_bookings(&self) {
        self.0.calls_to_clear_bookings.fetch_add(1, Ordering::SeqCst);
        self.0.bookings.lock().unwrap().clear();
    }
}

pub struct MockPaymentGatewayInner {
    pub success: AtomicBool,
    pub calls_to_submit_payment: AtomicU64,
}

#[derive(Clone)]
pub struct MockPaymentGateway(pub Arc<MockPaymentGatewayInner>);

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self(Arc::new(MockPaymentGatewayInner {
            success: AtomicBool::new(true),
            calls_to_submit_payment: AtomicU64::default(),
        }))
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn submit_payment(&self, amount: u32) -> Result<Receipt, PaymentError> {
        self.0
            .calls_to_submit_payment
            .fetch_add(1, Ordering::SeqCst);
        if !self.0.success.load(Ordering::SeqCst) {
            return Err(PaymentError::Declined);
        }
        Ok(Receipt {
            reference: Uuid::new_v4(),
            amount,
            paid_at: Utc::now(),
        })
    }
}

#[derive(Clone)]
pub struct TestConfiguration {
    pub port: String,
    pub admin_password: String,
    pub frontend_path: PathBuf,
    pub storage_path: PathBuf,
}

impl TestConfiguration {
    pub fn new(port: u16) -> Self {
        Self {
            port: port.to_string(),
            admin_password: "123".into(),
            frontend_path: PathBuf::from("frontend-not-configured.html"),
            storage_path: PathBuf::from("bookings-not-configured.json"),
        }
    }
}

impl Configuration for TestConfiguration {
    fn admin_password(&self) -> String {
        self.admin_password.clone()
    }

    fn frontend_path(&self) -> PathBuf {
        self.frontend_path.clone()
    }

    fn port(&self) -> String {
        self.port.clone()
    }

    fn storage_path(&self) -> PathBuf {
        self.storage_path.clone()
    }
}
