//! External payment processor seam.
//!
//! Orders authorize funds when they are placed and capture them when an admin
//! confirms them. Services only talk to [`PaymentGateway`]; the Stripe adapter
//! lives in [`stripe`].

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

pub mod stripe;

pub use stripe::StripeGateway;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment processor unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("payment processor rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("payment processor did not answer in time")]
    Timeout,
}

/// Lifecycle states reported by the processor for a payment intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub status: IntentStatus,
}

#[derive(Debug, Clone)]
pub struct AuthorizeRequest {
    pub customer_id: String,
    pub payment_method_id: String,
    /// Minor currency units (cents).
    pub amount: i64,
    pub currency: String,
    pub idempotency_key: Option<String>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a processor-side customer and return its id.
    async fn create_customer(&self, email: &str) -> Result<String, PaymentError>;

    async fn attach_payment_method(
        &self,
        customer_id: &str,
        payment_method_id: &str,
    ) -> Result<(), PaymentError>;

    /// Place a hold on funds without moving them (manual capture).
    async fn authorize(&self, request: AuthorizeRequest) -> Result<PaymentIntent, PaymentError>;

    /// Move previously authorized funds.
    async fn capture(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError>;

    /// Release an uncaptured hold. Fails once the intent has been captured.
    async fn cancel(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError>;

    /// Current state of an intent as the processor sees it.
    async fn retrieve(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError>;
}

/// Idempotency key sent to the processor. Processor keys are account-wide, so
/// the caller's key is namespaced by user.
pub fn processor_idempotency_key(user_id: Uuid, key: &str) -> String {
    format!("{user_id}:{key}")
}

/// Convert a major-unit amount to minor units for a two-decimal currency.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Bound a processor call. Running out of time counts as a processor failure.
pub async fn with_deadline<T, F>(limit: Duration, call: F) -> Result<T, PaymentError>
where
    F: Future<Output = Result<T, PaymentError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| PaymentError::Timeout)?
}
