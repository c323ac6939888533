//! Method signature surface: the declared inputs the compiler binds against.

pub mod signature;

pub use signature::{DeclaredType, JoinDirective, MethodSignature, ParameterModel, ReturnShape};
