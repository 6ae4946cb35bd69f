//! Infrastructure adapters and runtime bootstrap.

pub mod assets;
pub mod error;
pub mod figlet;
pub mod http;
pub mod telemetry;
