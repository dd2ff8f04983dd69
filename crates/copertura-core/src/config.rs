use crate::app_config::{AppConfig, CipherLevel, Credentials, Environment, TlsMinVersion};
use crate::ConfigError;

const DEFAULT_UPSTREAM_BASE_URL: &str = "https://reseller.twt.it/api/xdsl/toponomastica";

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
fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let username = require("COPERTURA_API_USER")?;
    let password = require("COPERTURA_API_PASS")?;

    let env = parse_environment(&or_default("COPERTURA_ENV", "development"));

    let bind_addr = or_default("COPERTURA_BIND_ADDR", "0.0.0.0:5443")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("COPERTURA_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("COPERTURA_LOG_LEVEL", "info");

    let upstream_base_url = or_default("COPERTURA_UPSTREAM_BASE_URL", DEFAULT_UPSTREAM_BASE_URL);
    if !(upstream_base_url.starts_with("https://") || upstream_base_url.starts_with("http://")) {
        return Err(invalid(
            "COPERTURA_UPSTREAM_BASE_URL",
            format!("expected an http(s) URL, got '{upstream_base_url}'"),
        ));
    }

    let request_timeout_secs = parse_u64("COPERTURA_REQUEST_TIMEOUT_SECS", "30")?;
    let connect_timeout_secs = parse_u64("COPERTURA_CONNECT_TIMEOUT_SECS", "10")?;

    let tls_min_version = parse_tls_min_version(&or_default("COPERTURA_TLS_MIN_VERSION", "1.2"))
        .ok_or_else(|| {
            invalid(
                "COPERTURA_TLS_MIN_VERSION",
                "expected '1.2' or '1.3'".to_string(),
            )
        })?;
    let tls_ciphers = parse_cipher_level(&or_default("COPERTURA_TLS_CIPHERS", "relaxed"))
        .ok_or_else(|| {
            invalid(
                "COPERTURA_TLS_CIPHERS",
                "expected 'relaxed' or 'strict'".to_string(),
            )
        })?;

    let prefixes_path = lookup("COPERTURA_PREFIXES_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        credentials: Credentials { username, password },
        upstream_base_url,
        request_timeout_secs,
        connect_timeout_secs,
        tls_min_version,
        tls_ciphers,
        prefixes_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_tls_min_version(s: &str) -> Option<TlsMinVersion> {
    match s.trim() {
        "1.2" => Some(TlsMinVersion::Tls12),
        "1.3" => Some(TlsMinVersion::Tls13),
        _ => None,
    }
}

fn parse_cipher_level(s: &str) -> Option<CipherLevel> {
    match s.trim().to_ascii_lowercase().as_str() {
        "relaxed" => Some(CipherLevel::Relaxed),
        "strict" => Some(CipherLevel::Strict),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
