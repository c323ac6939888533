//! ## Crate layout
//! - `core`: entity models, method signatures, the identifier grammar, and
//!   the compiled query artifacts.
//!
//! The `prelude` module mirrors the surface a repository layer uses to
//! compile its method names.

pub use findby_core as core;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::{CompileError, CompiledDirective, OperationKind, compile};

///
/// Prelude
/// mirrors the core prelude: domain vocabulary only
///

pub mod prelude {
    pub use crate::core::prelude::*;
}
