/*
[INPUT]:  Raw response bytes
[OUTPUT]: Decoded payload of the model type a request targets
[POS]:    Data layer - decoding capability shared by all response payloads
[UPDATE]: When a model needs custom decoding
*/

use serde::de::DeserializeOwned;
use serde_json::error::Category;
use thiserror::Error;

/// Why a payload failed to decode, and where in the document
#[derive(Debug, Error)]
#[error("{path}: {source}")]
pub struct DecodeError {
    /// Location of the failure, like `[1].news_date`; `.` for the document root
    pub path: String,
    #[source]
    pub source: serde_json::Error,
}

impl DecodeError {
    pub fn category(&self) -> &'static str {
        match self.source.classify() {
            Category::Io => "io",
            Category::Syntax => "syntax",
            Category::Data => "data",
            Category::Eof => "eof",
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for DecodeError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        Self {
            path: err.path().to_string(),
            source: err.into_inner(),
        }
    }
}

/// A decodable API payload.
///
/// Every `Request` is parameterized by one `Model`. Types with special wire
/// formats override [`Model::decode`]; the default is `serde_json` with the
/// failing path tracked.
pub trait Model: DeserializeOwned + Send + 'static {
    fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut deserializer = serde_json::Deserializer::from_slice(data);
        let value = serde_path_to_error::deserialize(&mut deserializer)?;
        deserializer.end().map_err(|source| DecodeError {
            path: ".".to_string(),
            source,
        })?;
        Ok(value)
    }
}

impl<T: Model> Model for Vec<T> {}

impl<T: Model> Model for Option<T> {}

/// Untyped JSON, for endpoints without a dedicated model
impl Model for serde_json::Value {}
