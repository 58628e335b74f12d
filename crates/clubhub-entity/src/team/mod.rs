//! Team entity and membership.

mod member;
mod model;

pub use member::{TeamMembership, TeamRole};
pub use model::{CreateTeam, Team, UpdateTeam};
