//! Numerical utilities
mod func;
mod quad;

pub use func::*;
pub use quad::*;
