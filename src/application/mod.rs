//! Application services: render orchestration and the backend seam.

pub mod backend;
pub mod error;
pub mod render;
