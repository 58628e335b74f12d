//! # clubhub-api
//!
//! HTTP API layer for ClubHub built on Axum: routes, handlers, DTOs and
//! the authentication extractor.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
