//! User account entity and global roles.

mod model;
mod role;

pub use model::User;
pub use role::{GlobalRole, Role, UserRoleAssignment};
