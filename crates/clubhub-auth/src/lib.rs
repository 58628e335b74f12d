//! # clubhub-auth
//!
//! Authentication, token lifecycle and permission resolution for ClubHub.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and verification
//! - `jwt` — stateless JWT access token encoding and decoding
//! - `token` — opaque refresh token lifecycle (issue, refresh, revoke)
//! - `hierarchy` — division ancestor chain resolution
//! - `permission` — the permission predicates the API enforces
//! - `account` — login and account provisioning

pub mod account;
pub mod hierarchy;
pub mod jwt;
pub mod password;
pub mod permission;
pub mod token;

pub use account::AccountService;
pub use hierarchy::HierarchyResolver;
pub use jwt::{AccessClaims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use permission::PermissionEngine;
pub use token::{TokenPair, TokenService};
