//! External entity-model interface consumed by the compiler.
//!
//! The compiler queries this surface (property lookup, identity/version
//! roles, association traversal) but never builds or mutates it.

pub mod entity;
pub mod path;
pub mod property;
pub mod registry;

pub use entity::EntityModel;
pub use path::{PathHop, PathTerminal, PropertyPath, TerminalRole};
pub use property::{AssociationKind, PropertyKind, PropertyModel, ScalarKind};
pub use registry::ModelRegistry;
