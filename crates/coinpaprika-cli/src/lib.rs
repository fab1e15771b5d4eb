/*
[INPUT]:  Public API exports for coinpaprika-cli crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod fetch;

// Re-export main types for convenience
pub use config::CliConfig;
pub use fetch::{FetchArgs, run_fetch};
