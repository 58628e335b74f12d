//! Refresh token entity.

mod model;

pub use model::RefreshToken;
