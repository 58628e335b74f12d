//! # clubhub-cache
//!
//! Cache provider implementations for ClubHub. Two backends are supported:
//!
//! - **memory**: In-process cache backed by [dashmap](https://crates.io/crates/dashmap)
//! - **redis**: Redis-backed cache using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration. The memory
//! backend is intended for development and tests; production deployments
//! run Redis so refresh token lookups survive process restarts.

pub mod keys;
pub mod memory;
pub mod provider;
pub mod redis;

pub use provider::CacheManager;
