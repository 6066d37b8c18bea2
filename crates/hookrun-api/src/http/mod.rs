//! HTTP layer for hookrun.
//!
//! Axum router exposing `POST /{id}` (trigger) and `GET /{id}` (status)
//! behind bearer token authentication, with permissive CORS. Every failure
//! is a plain `404 Not found`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
