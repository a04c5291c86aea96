use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payment was declined")]
    Declined,
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (StatusCode::PAYMENT_REQUIRED, axum::Json(body)).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub reference: Uuid,
    /// Amount charged, in whole US dollars.
    pub amount: u32,
    pub paid_at: DateTime<Utc>,
}

/// Seam to the payment processor. The booking flow charges through this
/// trait and never touches a concrete gateway or a timer.
#[async_trait]
pub trait PaymentGateway: Clone + Send + Sync + 'static {
    async fn submit_payment(&self, amount: u32) -> Result<Receipt, PaymentError>;
}

/// Stand-in processor: resolves after a fixed delay and approves a fixed
/// fraction of charges. There is no real gateway behind it.
#[derive(Debug, Clone)]
pub struct SimulatedPayments {
    pub delay: Duration,
    pub success_rate: f64,
}

impl Default for SimulatedPayments {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
            success_rate: 0.8,
        }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPayments {
    async fn submit_payment(&self, amount: u32) -> Result<Receipt, PaymentError> {
        tokio::time::sleep(self.delay).await;

        let approved = rand::thread_rng().gen_bool(self.success_rate);
        if !approved {
            return Err(PaymentError::Declined);
        }

        let receipt = Receipt {
            reference: Uuid::new_v4(),
            amount,
            paid_at: Utc::now(),
        };
        info!(reference = %receipt.reference, amount, "simulated payment approved");
        Ok(receipt)
    }
}
