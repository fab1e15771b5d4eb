/*
[INPUT]:  Request descriptions, transport configuration and delivery contexts
[OUTPUT]: HTTP exchanges and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding request options or changing client behavior
*/

pub mod cache;
pub mod client;
pub mod delivery;
pub mod error;
pub mod params;
pub mod request;
pub mod response;

pub use error::{Error, RequestError, ResponseError, Result};

pub use cache::CachePolicy;
pub use client::{DEFAULT_BASE_URL, Transport, TransportConfig};
pub use delivery::{CallbackQueue, CallbackQueueRunner, DeliveryContext, Job};
pub use params::{ParamValue, Params};
pub use request::{BodyEncoding, DEFAULT_USER_AGENT, Method, Request, Requestable};
pub use response::Response;
