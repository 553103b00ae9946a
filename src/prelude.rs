//! Re-imports for convenience
#[doc(no_inline)]
pub use crate::dispatch::{Op, Rule, Side, Value};
#[doc(no_inline)]
pub use crate::dist::*;
#[doc(no_inline)]
pub use crate::result::DistError;
#[doc(no_inline)]
pub use crate::traits::*;
