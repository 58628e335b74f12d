//! Opaque refresh token lifecycle.

mod generator;
mod service;

pub use generator::{generate_opaque_token, hash_token};
pub use service::{TokenPair, TokenService};
