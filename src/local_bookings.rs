use crate::backend::BookingBackend;
use crate::error::BookingError;
use crate::storage::BookingStorage;
use crate::types::{Booking, CapacityState, NewBooking, TimeSlot, MAX_PER_DAY};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

/// The authoritative booking store. Bookings live in insertion order behind
/// one mutex; every query and the whole check-append-persist sequence of
/// `create_booking` run under a single lock acquisition.
#[derive(Debug, Clone, Default)]
pub struct LocalBookings {
    bookings: Arc<Mutex<Vec<Booking>>>,
    storage: Option<BookingStorage>,
}

impl LocalBookings {
    /// A store mirrored to persistent storage. The initial collection comes
    /// from the storage file; a missing or unparsable file starts empty.
    pub fn with_storage(storage: BookingStorage) -> Self {
        let bookings = storage.load();
        info!(count = bookings.len(), "loaded existing bookings");
        Self {
            bookings: Arc::new(Mutex::new(bookings)),
            storage: Some(storage),
        }
    }

    fn slots_taken(bookings: &[Booking], date: NaiveDate) -> Vec<TimeSlot> {
        bookings
            .iter()
            .filter(|booking| booking.date == date)
            .map(|booking| booking.time_slot)
            .collect()
    }
}

impl BookingBackend for LocalBookings {
    fn bookings(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().clone()
    }

    fn bookings_for_date(&self, date: NaiveDate) -> Vec<Booking> {
        self.bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|booking| booking.date == date)
            .cloned()
            .collect()
    }

    fn capacity_state(&self, date: NaiveDate) -> CapacityState {
        let bookings = self.bookings.lock().unwrap();
        let count = bookings
            .iter()
            .filter(|booking| booking.date == date)
            .count();
        CapacityState::from_count(count)
    }

    fn available_slots(&self, date: NaiveDate) -> Vec<TimeSlot> {
        let bookings = self.bookings.lock().unwrap();
        let taken = Self::slots_taken(&bookings, date);
        TimeSlot::ALL
            .into_iter()
            .filter(|slot| !taken.contains(slot))
            .collect()
    }

    /// Capacity is checked before slot uniqueness: a full day reports
    /// `CapacityExceeded` no matter which slot was requested, even though
    /// one of the three slots is necessarily still unbooked.
    fn create_booking(&self, candidate: NewBooking) -> Result<Booking, BookingError> {
        let mut bookings = self.bookings.lock().unwrap();

        let taken = Self::slots_taken(&bookings, candidate.date);
        if taken.len() >= MAX_PER_DAY {
            return Err(BookingError::CapacityExceeded {
                date: candidate.date,
            });
        }
        if taken.contains(&candidate.time_slot) {
            return Err(BookingError::SlotUnavailable {
                date: candidate.date,
                slot: candidate.time_slot,
            });
        }

        let booking = Booking::create(candidate);
        bookings.push(booking.clone());

        if let Some(storage) = &self.storage {
            if let Err(err) = storage.save(&bookings) {
                // Keep memory and disk in step.
                bookings.pop();
                return Err(err.into());
            }
        }

        info!(id = %booking.id, date = %booking.date, slot = %booking.time_slot, "booking created");
        Ok(booking)
    }

    fn clear_bookings(&self) {
        let mut bookings = self.bookings.lock().unwrap();
        bookings.clear();

        if let Some(storage) = &self.storage {
            if let Err(err) = storage.save(&bookings) {
                error!(%err, "failed to persist cleared bookings");
            }
        }
        info!("all bookings removed");
    }
}
