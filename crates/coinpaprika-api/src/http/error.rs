/*
[INPUT]:  Error sources (request building, HTTP status, decoding, transport)
[OUTPUT]: Structured error taxonomy carried by failed responses
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or changing status classification
*/

use thiserror::Error;

/// Errors raised while turning a `Request` into an HTTP request
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// Parameters could not be serialized into the request body
    #[error("unable to encode request parameters")]
    UnableToEncodeParams,

    /// Any other failure while building the HTTP request
    #[error("unable to create request")]
    UnableToCreateRequest,
}

/// Errors raised while interpreting the HTTP response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// No HTTP response, or a success status without a body
    #[error("empty response")]
    EmptyResponse,

    /// Success status but the body did not match the model shape
    #[error("unable to decode response")]
    UnableToDecodeResponse,

    /// HTTP 429
    #[error("requests limit exceeded")]
    RequestsLimitExceeded,

    /// HTTP 4xx other than 429, with the server message if one was supplied
    #[error("invalid request (HTTP {http_code}){}", message_suffix(.message))]
    InvalidRequest {
        http_code: u16,
        message: Option<String>,
    },

    /// Any other non-2xx status
    #[error("server error (HTTP {http_code})")]
    ServerError { http_code: u16 },
}

impl ResponseError {
    /// Classify a non-2xx status. `body` is only inspected for 4xx codes.
    pub fn from_status(http_code: u16, body: Option<&[u8]>) -> Self {
        match http_code {
            429 => ResponseError::RequestsLimitExceeded,
            400..=499 => ResponseError::InvalidRequest {
                http_code,
                message: body.and_then(ApiErrorBody::message_from),
            },
            _ => ResponseError::ServerError { http_code },
        }
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}

/// Error envelope returned by the API on 4xx responses: `{"error": "..."}`
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    error: String,
}

impl ApiErrorBody {
    fn message_from(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ApiErrorBody>(body)
            .ok()
            .map(|envelope| envelope.error)
    }
}

/// Main error type for the Coinpaprika client
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Network-level failure, passed through from the transport
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Transport could not be configured
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status carried by the error, if any
    pub fn http_code(&self) -> Option<u16> {
        match self {
            Error::Response(ResponseError::InvalidRequest { http_code, .. })
            | Error::Response(ResponseError::ServerError { http_code }) => Some(*http_code),
            Error::Response(ResponseError::RequestsLimitExceeded) => Some(429),
            Error::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Check if the server rejected the call because of rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::Response(ResponseError::RequestsLimitExceeded))
    }

    /// Message from the server error envelope, if the server supplied one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Response(ResponseError::InvalidRequest { message, .. }) => message.as_deref(),
            _ => None,
        }
    }
}

/// Result type alias for Coinpaprika operations
pub type Result<T> = std::result::Result<T, Error>;
