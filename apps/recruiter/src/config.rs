use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub search_max_results: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_upload_mb: usize = optional_env("MAX_UPLOAD_MB", "20")
            .parse()
            .context("MAX_UPLOAD_MB must be a whole number of megabytes")?;

        let max_upload_bytes = upload_limit_bytes(max_upload_mb)?;

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
            max_upload_bytes,
            search_max_results: optional_env("SEARCH_MAX_RESULTS", "5")
                .parse()
                .context("SEARCH_MAX_RESULTS must be a positive integer")?,
        })
    }
}

fn upload_limit_bytes(max_upload_mb: usize) -> Result<usize> {
    max_upload_mb
        .checked_mul(1024 * 1024)
        .with_context(|| format!("MAX_UPLOAD_MB={max_upload_mb} is too large"))
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_limit_converts_megabytes() {
        assert_eq!(upload_limit_bytes(20).unwrap(), 20 * 1024 * 1024);
        assert_eq!(upload_limit_bytes(0).unwrap(), 0);
    }

    #[test]
    fn test_upload_limit_rejects_overflow() {
        let err = upload_limit_bytes(usize::MAX).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }
}
