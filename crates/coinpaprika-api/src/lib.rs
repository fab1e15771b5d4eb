/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Coinpaprika client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    BodyEncoding,
    CachePolicy,
    CallbackQueue,
    CallbackQueueRunner,
    DeliveryContext,
    Error,
    Method,
    ParamValue,
    Params,
    Request,
    RequestError,
    Requestable,
    Response,
    ResponseError,
    Result,
    Transport,
    TransportConfig,
    DEFAULT_BASE_URL,
    DEFAULT_USER_AGENT,
};

// Re-export all types
pub use types::*;
