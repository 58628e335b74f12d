//! Person entity.

mod model;

pub use model::{CreatePerson, Person, UpdatePerson};
