//! Domain layer types and invariants.

pub mod request;
pub mod text;
