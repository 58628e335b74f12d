//! Concrete repository implementations.

pub mod division;
pub mod person;
pub mod refresh_token;
pub mod role;
pub mod team;
pub mod user;

pub use division::DivisionRepository;
pub use person::PersonRepository;
pub use refresh_token::RefreshTokenRepository;
pub use role::RoleRepository;
pub use team::TeamRepository;
pub use user::UserRepository;
