//! Domain models for the Crop Advisor

mod conditions;
mod suggestion;

pub use conditions::*;
pub use suggestion::*;
