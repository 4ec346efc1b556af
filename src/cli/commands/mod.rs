//! Command implementations

pub mod cost;
pub mod export;
pub mod price;
pub mod sample;
pub mod scenario;
pub mod sens;
pub mod validate;
