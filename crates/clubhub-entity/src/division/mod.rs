//! Division entity and membership.

mod member;
mod model;

pub use member::{DivisionMembership, DivisionRole};
pub use model::{CreateDivision, Division, UpdateDivision};
