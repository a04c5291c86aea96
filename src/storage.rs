use crate::types::Booking;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not write bookings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize bookings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable mirror of the booking collection: one JSON array in one file.
/// The store writes the whole collection after every successful mutation
/// and reads it back once at startup.
#[derive(Debug, Clone)]
pub struct BookingStorage {
    path: PathBuf,
}

impl BookingStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the persisted collection. A missing file is a first run and an
    /// unparsable file is treated the same way: both yield an empty
    /// collection rather than refusing to start.
    pub fn load(&self) -> Vec<Booking> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "could not read bookings file, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(bookings) => bookings,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "bookings file is unparsable, starting empty");
                Vec::new()
            }
        }
    }

    pub fn save(&self, bookings: &[Booking]) -> Result<(), StorageError> {
        let contents = serde_json::to_string(bookings)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}
