/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with deserialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

pub mod model;
pub mod models;

pub use model::{DecodeError, Model};
pub use models::*;
