//! Division hierarchy resolution.

mod resolver;

pub use resolver::HierarchyResolver;
