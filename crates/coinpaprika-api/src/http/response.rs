/*
[INPUT]:  Outcome of one request execution
[OUTPUT]: Two-variant success/failure envelope handed to callbacks
[POS]:    HTTP layer - response envelope
[UPDATE]: When changing how results are exposed to callers
*/

use crate::http::Error;

/// Result of one `Request` execution
#[derive(Debug)]
pub enum Response<M> {
    Success(M),
    Failure(Error),
}

impl<M> Response<M> {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// Decoded payload, if the request succeeded
    pub fn value(&self) -> Option<&M> {
        match self {
            Response::Success(value) => Some(value),
            Response::Failure(_) => None,
        }
    }

    /// Failure reason, if the request failed
    pub fn error(&self) -> Option<&Error> {
        match self {
            Response::Success(_) => None,
            Response::Failure(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<M, Error> {
        match self {
            Response::Success(value) => Ok(value),
            Response::Failure(err) => Err(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(M) -> U) -> Response<U> {
        match self {
            Response::Success(value) => Response::Success(f(value)),
            Response::Failure(err) => Response::Failure(err),
        }
    }
}

impl<M> From<Result<M, Error>> for Response<M> {
    fn from(result: Result<M, Error>) -> Self {
        match result {
            Ok(value) => Response::Success(value),
            Err(err) => Response::Failure(err),
        }
    }
}

impl<M> From<Response<M>> for Result<M, Error> {
    fn from(response: Response<M>) -> Self {
        response.into_result()
    }
}
