//! Shared trait definitions used across crates.

pub mod cache;

pub use cache::CacheProvider;
