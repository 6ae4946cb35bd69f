//! FIGlet text rendering over a small JSON API.
//!
//! Raw text is normalized and validated by [`domain::text`], rendered line by
//! line by [`application::render::RenderService`] through a
//! [`application::backend::GlyphBackend`], and exposed over HTTP by
//! [`infra::http::build_router`].

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
