use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Request failed with HTTP {status}: {body}")]
    RequestError { status: u16, body: String },

    #[error("Still rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Champion catalogue unavailable: {0}")]
    CatalogueUnavailable(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}
