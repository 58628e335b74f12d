//! Stateless JWT access tokens.
//!
//! Access tokens are self-contained and are never stored server side; a
//! token stays valid until its expiry. Revocation happens at the refresh
//! token layer.

mod claims;
mod decoder;
mod encoder;

pub use claims::AccessClaims;
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
