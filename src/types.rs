use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Hard limit on bookings per calendar day. With three named slots this
/// leaves one slot unbookable on a full day; the availability check treats
/// that as intended scarcity, not as a free slot.
pub const MAX_PER_DAY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning (8:00 AM - 11:00 AM)",
            TimeSlot::Afternoon => "Afternoon (12:00 PM - 3:00 PM)",
            TimeSlot::Evening => "Evening (4:00 PM - 7:00 PM)",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
        };
        write!(f, "{name}")
    }
}

/// The service catalog. Name and price live here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Standard,
    Extended,
    Group,
}

impl ServiceType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceType::Standard => "Standard Walk",
            ServiceType::Extended => "Extended Walk",
            ServiceType::Group => "Group Walk",
        }
    }

    /// Price in whole US dollars.
    pub fn price(&self) -> u32 {
        match self {
            ServiceType::Standard => 20,
            ServiceType::Extended => 35,
            ServiceType::Group => 25,
        }
    }
}

/// Derived per-date occupancy, keyed off the booking count for that date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityState {
    Open,
    Partial,
    Full,
}

impl CapacityState {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => CapacityState::Open,
            n if n >= MAX_PER_DAY => CapacityState::Full,
            _ => CapacityState::Partial,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub name: String,
    pub breed: String,
}

/// A booking candidate as handed to the store, before an id or timestamp
/// exists. Owner contact fields arrive here already validated by the
/// submission flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub owner: Owner,
    pub dog: Dog,
    pub service: ServiceType,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub special_instructions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub owner: Owner,
    pub dog: Dog,
    pub service: ServiceType,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub special_instructions: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Stamps a candidate with a fresh id and creation time. Only the store
    /// should call this on the live collection.
    pub fn create(candidate: NewBooking) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: candidate.owner,
            dog: candidate.dog,
            service: candidate.service,
            date: candidate.date,
            time_slot: candidate.time_slot,
            special_instructions: candidate.special_instructions,
            created_at: Utc::now(),
        }
    }
}
