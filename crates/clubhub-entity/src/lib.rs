//! Domain entities shared across the ClubHub crates.
//!
//! Every persistent row type lives here, together with the enums that map to
//! PostgreSQL enum types and the `Create*`/`Update*` payload structs the
//! repositories accept.

pub mod division;
pub mod person;
pub mod team;
pub mod token;
pub mod user;

pub use division::{CreateDivision, Division, DivisionMembership, DivisionRole, UpdateDivision};
pub use person::{CreatePerson, Person, UpdatePerson};
pub use team::{CreateTeam, Team, TeamMembership, TeamRole, UpdateTeam};
pub use token::RefreshToken;
pub use user::{GlobalRole, Role, User, UserRoleAssignment};
