use crate::configuration::Configuration;
use std::env;
use std::path::PathBuf;

/// Environment-backed configuration. `main` loads `.env` via dotenvy before
/// this is read, so a local `.env` file works the same as real environment
/// variables.
#[derive(Clone)]
pub struct ConfigurationHandler;

impl Configuration for ConfigurationHandler {
    fn admin_password(&self) -> String {
        env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "123".into())
    }

    fn frontend_path(&self) -> PathBuf {
        env::var("FRONTEND_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("../frontend/index.html"))
    }

    fn port(&self) -> String {
        env::var("PORT").unwrap_or_else(|_| "3000".into())
    }

    fn storage_path(&self) -> PathBuf {
        env::var("BOOKINGS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("bookings.json"))
    }
}
