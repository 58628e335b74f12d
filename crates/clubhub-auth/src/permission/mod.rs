//! Permission resolution.

mod engine;

pub use engine::PermissionEngine;
