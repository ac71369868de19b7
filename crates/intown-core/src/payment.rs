//! Payment processing seam and its mock implementation.

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("amount must be a positive number, got {0}")]
    InvalidAmount(f64),
    #[error("payment declined: {0}")]
    Declined(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
    pub user_id: String,
    pub shop_id: Option<String>,
    pub plan_id: Option<String>,
    pub amount: f64,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeReceipt {
    pub transaction_id: String,
    pub savings: f64,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: &ChargeRequest) -> Result<ChargeReceipt, PaymentError>;
}

/// Approves every valid charge and credits a fixed fraction as savings.
#[derive(Debug, Clone)]
pub struct MockGateway {
    savings_rate: f64,
}

impl MockGateway {
    #[must_use]
    pub fn new(savings_rate: f64) -> Self {
        Self { savings_rate }
    }
}

/// `TXN` followed by six random digits.
fn mock_transaction_id() -> String {
    let n: u32 = rand::rng().random_range(100_000..=999_999);
    format!("TXN{n}")
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn charge(&self, request: &ChargeRequest) -> Result<ChargeReceipt, PaymentError> {
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(PaymentError::InvalidAmount(request.amount));
        }

        let receipt = ChargeReceipt {
            transaction_id: mock_transaction_id(),
            savings: request.amount * self.savings_rate,
        };
        tracing::info!(
            user_id = %request.user_id,
            amount = request.amount,
            method = %request.method,
            transaction_id = %receipt.transaction_id,
            "mock payment approved"
        );
        Ok(receipt)
    }
}
