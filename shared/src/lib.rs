//! Shared types and models for the Crop Advisor
//!
//! This crate contains the farm-condition and crop-suggestion models, field
//! validation, and the input/display shell state machine. It is compiled into
//! both the backend server and the browser WASM module.

pub mod models;
pub mod shell;
pub mod types;
pub mod validation;

pub use models::*;
pub use shell::*;
pub use types::*;
pub use validation::*;
