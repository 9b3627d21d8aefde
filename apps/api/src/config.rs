use anyhow::{bail, Context, Result};

const DEFAULT_GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_base_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound the HTTP layer puts on a single resolution.
    /// The backend client itself defines no timeout.
    pub request_timeout_secs: u64,
    /// Sessions untouched for longer than this are dropped.
    pub session_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_api_base_url: std::env::var("GEMINI_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            request_timeout_secs: parse_secs("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            session_ttl_secs: parse_secs("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_secs(key: &str, default: u64) -> Result<u64> {
    parse_positive_secs(key, std::env::var(key).ok(), default)
}

fn parse_positive_secs(key: &str, raw: Option<String>, default: u64) -> Result<u64> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let secs = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("{key} must be a whole number of seconds"))?;
    if secs == 0 {
        bail!("{key} must be greater than zero");
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_default_when_unset() {
        assert_eq!(
            parse_positive_secs("REQUEST_TIMEOUT_SECS", None, DEFAULT_REQUEST_TIMEOUT_SECS).unwrap(),
            DEFAULT_REQUEST_TIMEOUT_SECS
        );
    }

    #[test]
    fn test_secs_parses_value() {
        assert_eq!(
            parse_positive_secs("SESSION_TTL_SECS", Some(" 15 ".to_string()), 3600).unwrap(),
            15
        );
    }

    #[test]
    fn test_secs_rejects_zero_and_garbage() {
        let zero = parse_positive_secs("SESSION_TTL_SECS", Some("0".to_string()), 3600);
        assert!(zero.unwrap_err().to_string().contains("SESSION_TTL_SECS"));
        assert!(parse_positive_secs("REQUEST_TIMEOUT_SECS", Some("soon".to_string()), 60).is_err());
    }
}
