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
/// Parsing and validation live here, decoupled from the real environment so
/// tests can drive it with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let cms_base_url = normalize_base_url(&require("DEALFRONT_CMS_BASE_URL")?)
        .map_err(|reason| invalid("DEALFRONT_CMS_BASE_URL", reason))?;

    let env = parse_environment(&or_default("DEALFRONT_ENV", "development"))?;

    let bind_addr = or_default("DEALFRONT_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("DEALFRONT_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("DEALFRONT_LOG_LEVEL", "info");
    let cms_auth_token = lookup("DEALFRONT_CMS_AUTH_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());

    let cms_request_timeout_secs = parse_u64("DEALFRONT_CMS_REQUEST_TIMEOUT_SECS", "15")?;
    let cms_user_agent = or_default(
        "DEALFRONT_CMS_USER_AGENT",
        "dealfront/0.1 (content-aggregation)",
    );
    let cms_max_retries = parse_u32("DEALFRONT_CMS_MAX_RETRIES", "2")?;
    let cms_retry_backoff_base_ms = parse_u64("DEALFRONT_CMS_RETRY_BACKOFF_BASE_MS", "250")?;
    let cms_cache_ttl_secs = parse_u64("DEALFRONT_CMS_CACHE_TTL_SECS", "60")?;
    let page_deadline_secs = parse_u64("DEALFRONT_PAGE_DEADLINE_SECS", "20")?;

    let coupon_page_size = parse_u32("DEALFRONT_COUPON_PAGE_SIZE", "100")?;
    if !(1..=100).contains(&coupon_page_size) {
        return Err(invalid(
            "DEALFRONT_COUPON_PAGE_SIZE",
            format!("{coupon_page_size} is outside the API's per_page range 1..=100"),
        ));
    }
    let home_coupon_limit = parse_usize("DEALFRONT_HOME_COUPON_LIMIT", "12")?;
    let popular_brand_limit = parse_usize("DEALFRONT_POPULAR_BRAND_LIMIT", "12")?;
    let rate_limit_per_minute = parse_usize("DEALFRONT_RATE_LIMIT_PER_MINUTE", "120")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        cms_base_url,
        cms_auth_token,
        cms_request_timeout_secs,
        cms_user_agent,
        cms_max_retries,
        cms_retry_backoff_base_ms,
        cms_cache_ttl_secs,
        page_deadline_secs,
        coupon_page_size,
        home_coupon_limit,
        popular_brand_limit,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DEALFRONT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Trims whitespace and trailing slashes and checks for an http(s) scheme.
fn normalize_base_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| format!("'{raw}' must start with http:// or https://"))?;
    if rest.is_empty() {
        return Err(format!("'{raw}' has no host"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
