use crate::error::BookingError;
use crate::types::{Booking, CapacityState, NewBooking, TimeSlot};
use chrono::NaiveDate;

/// Seam between the HTTP layer and the booking store. The store is the only
/// writer of booking state; everything else reads through these queries.
pub trait BookingBackend: Clone + Send + Sync + 'static {
    fn bookings(&self) -> Vec<Booking>;
    fn bookings_for_date(&self, date: NaiveDate) -> Vec<Booking>;
    fn capacity_state(&self, date: NaiveDate) -> CapacityState;
    fn available_slots(&self, date: NaiveDate) -> Vec<TimeSlot>;
    fn create_booking(&self, candidate: NewBooking) -> Result<Booking, BookingError>;
    fn clear_bookings(&self);
}
