use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the process environment so tests
/// can drive it with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = require("DATABASE_URL")?;
    let env = or_default("INTOWN_ENV", "development")
        .parse::<Environment>()
        .map_err(|reason| invalid("INTOWN_ENV", reason))?;
    let bind_addr = parse_addr("INTOWN_BIND_ADDR", "0.0.0.0:8001")?;
    let log_level = or_default("INTOWN_LOG_LEVEL", "info");
    let catalog_path = lookup("INTOWN_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let otp_code = or_default("INTOWN_OTP_CODE", "1234");
    if otp_code.trim().is_empty() {
        return Err(invalid("INTOWN_OTP_CODE", "must not be empty".to_string()));
    }

    let payment_savings_rate = or_default("INTOWN_PAYMENT_SAVINGS_RATE", "0.1")
        .parse::<f64>()
        .map_err(|e| invalid("INTOWN_PAYMENT_SAVINGS_RATE", e.to_string()))?;
    if !(0.0..=1.0).contains(&payment_savings_rate) {
        return Err(invalid(
            "INTOWN_PAYMENT_SAVINGS_RATE",
            format!("must be between 0 and 1, got {payment_savings_rate}"),
        ));
    }

    let db_max_connections = parse_u32("INTOWN_DB_MAX_CONNECTIONS", "10")?;
    if db_max_connections == 0 {
        return Err(invalid(
            "INTOWN_DB_MAX_CONNECTIONS",
            "must be at least 1".to_string(),
        ));
    }
    let db_min_connections = parse_u32("INTOWN_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(invalid(
            "INTOWN_DB_MIN_CONNECTIONS",
            format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        ));
    }
    let db_acquire_timeout_secs = parse_u64("INTOWN_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        catalog_path,
        otp_code,
        payment_savings_rate,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
