use crate::error::AppError;
use crate::rate_limit::RateLimits;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub region: String,
    pub rate_limits: RateLimits,
    pub retry: RetryPolicy,
}

/// How many times a 429 is retried before giving up. `None` retries forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: Some(5),
        }
    }
}

impl RetryPolicy {
    pub fn unbounded() -> Self {
        RetryPolicy { max_retries: None }
    }

    pub fn allows(&self, retries_so_far: u32) -> bool {
        self.max_retries.map_or(true, |max| retries_so_far < max)
    }

    fn parse(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("unbounded") {
            return Ok(RetryPolicy::unbounded());
        }
        raw.parse::<u32>()
            .map(|max| RetryPolicy {
                max_retries: Some(max),
            })
            .map_err(|_| {
                AppError::ConfigError(format!(
                    "RIOT_MAX_RETRIES must be a number or 'unbounded', got '{}'",
                    raw
                ))
            })
    }
}

impl Config {
    pub fn new(api_key: impl Into<String>, region: impl Into<String>) -> Self {
        Config {
            api_key: api_key.into(),
            region: region.into(),
            rate_limits: RateLimits::default(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("RIOT_API_KEY").map_err(|_| {
            AppError::ConfigError("RIOT_API_KEY not found in environment or .env file".to_string())
        })?;

        let region = env::var("RIOT_REGION").unwrap_or_else(|_| "euw1".to_string());

        let retry = match env::var("RIOT_MAX_RETRIES") {
            Ok(raw) => RetryPolicy::parse(&raw)?,
            Err(_) => RetryPolicy::default(),
        };

        Ok(Config {
            retry,
            ..Config::new(api_key, region)
        })
    }
}
