pub mod app_config;
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod geo;
pub mod otp;
pub mod payment;
pub mod users;

pub use app_config::{AppConfig, Environment};
pub use catalog::{Catalog, Category, Plan, Shop};
pub use config::{load_app_config, load_app_config_from_env};
pub use discovery::{query_shops, NearbyShop};
pub use geo::{distance_km, round_km, Coordinate};
pub use otp::{FixedCodeOtp, OtpDispatch, OtpError, OtpProvider};
pub use payment::{ChargeReceipt, ChargeRequest, MockGateway, PaymentError, PaymentGateway};
pub use users::default_display_name;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
