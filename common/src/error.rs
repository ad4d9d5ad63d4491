use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP error! Status: {status}")]
    StatusError { status: u16, body: String },

    #[error("Parsing error: {0}")]
    ParseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Network failures and non-2xx responses from the market-data API.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Error::HttpError(_) | Error::StatusError { .. })
    }

    /// Message shown in place of a table or chart when a fetch fails.
    pub fn user_message(&self) -> String {
        match self {
            Error::HttpError(e) if e.is_timeout() => "Request timed out".to_string(),
            Error::HttpError(e) if e.is_connect() => {
                "Could not reach the market data service".to_string()
            }
            Error::StatusError { status: 404, .. } => "Coin not found".to_string(),
            Error::StatusError { status: 429, .. } => {
                "Rate limited by the market data service, try again shortly".to_string()
            }
            other => other.to_string(),
        }
    }
}
