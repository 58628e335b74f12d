//! # clubhub-core
//!
//! Core crate for ClubHub. Contains the unified error system, configuration
//! schemas, and the cache provider trait shared by every other crate.
//!
//! This crate has **no** internal dependencies on other ClubHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
