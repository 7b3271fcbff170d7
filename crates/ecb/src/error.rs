//! ECB client error types.

use pocketfx_shared::AppError;
use thiserror::Error;

/// Errors that can occur while fetching rates from the ECB.
#[derive(Debug, Error)]
pub enum EcbError {
    /// The request could not be sent or the response not read.
    #[error("ECB client: error calling server: {0}")]
    CallingServer(String),

    /// No response within the configured timeout.
    #[error("ECB client: timed out when waiting for response: {0}")]
    Timeout(String),

    /// The response body is not the expected rates feed.
    #[error("ECB client: unexpected response format from server: {0}")]
    UnexpectedFormat(String),

    /// The feed does not quote the requested currency.
    #[error("ECB client: couldn't find the requested exchange rate for {0}")]
    ExchangeRateNotFound(String),

    /// The server answered with a 4xx status.
    #[error("ECB client: client-side error (4xx) when contacting ECB, status code: {0}")]
    ClientSide(u16),

    /// The server answered with a 5xx status.
    #[error("ECB client: server-side error (5xx) when contacting ECB, status code: {0}")]
    ServerSide(u16),

    /// The server answered with a status that is neither 200, 4xx nor 5xx.
    #[error("ECB client: unknown status code received from ECB, status code: {0}")]
    UnknownStatusCode(u16),

    /// The HTTP client could not be built.
    #[error("ECB client: cannot build HTTP client: {0}")]
    HttpClient(String),
}

impl EcbError {
    /// Create an unexpected format error.
    #[must_use]
    pub fn unexpected_format(msg: impl Into<String>) -> Self {
        Self::UnexpectedFormat(msg.into())
    }

    /// Classifies a response status code; `Ok` only for 200.
    pub fn check_status_code(status: u16) -> Result<(), Self> {
        match status {
            200 => Ok(()),
            400..=499 => Err(Self::ClientSide(status)),
            500..=599 => Err(Self::ServerSide(status)),
            _ => Err(Self::UnknownStatusCode(status)),
        }
    }
}

impl From<reqwest::Error> for EcbError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::CallingServer(err.to_string())
        }
    }
}

impl From<EcbError> for AppError {
    fn from(err: EcbError) -> Self {
        match err {
            EcbError::HttpClient(_) => Self::Internal(err.to_string()),
            _ => Self::ExternalService(err.to_string()),
        }
    }
}
