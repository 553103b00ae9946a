//! Negated random variables.
//!
//! Given a distribution of `X`, [`Negated`](crate::dist::Negated) behaves as
//! the distribution of `-X`. Every query (density, cumulative probability,
//! quantiles, moments, sampling, bounds) is answered by reflecting the
//! corresponding query of the wrapped distribution. No parameters are
//! re-derived.
//!
//! # Example
//!
//! ```
//! use negated_rv::prelude::*;
//!
//! let expon = Frozen::with_seed(Exponential::new(2.0).unwrap(), 0xABCD);
//! let neg = expon.clone().negated();
//!
//! assert_eq!(neg.mean(), -expon.mean());
//! assert_eq!(neg.var(), expon.var());
//! assert_eq!(neg.b(), 0.0);
//! assert_eq!(neg.a(), f64::NEG_INFINITY);
//!
//! // P(-X <= -1) = P(X >= 1)
//! assert_eq!(neg.cdf(-1.0), expon.sf(1.0));
//! ```
//!
//! Queries can also be made by name. Only the fixed statistical vocabulary
//! is understood; anything else is rejected rather than forwarded.
//!
//! ```
//! use negated_rv::prelude::*;
//!
//! let mut neg = Frozen::new(Gaussian::new(1.0, 2.0).unwrap()).negated();
//!
//! assert_eq!(neg.query("mean", &[]), Ok(Value::Scalar(-1.0)));
//! assert!(matches!(
//!     neg.query("foobar", &[]),
//!     Err(DistError::NotImplemented { .. })
//! ));
//! ```
pub mod consts;
pub mod dispatch;
pub mod dist;
pub mod misc;
pub mod prelude;
pub mod result;
pub mod traits;


pub use result::{DistError, Result};

/// Implements `Display` through the type's `From<&T> for String` impl
#[macro_export]
macro_rules! impl_display {
    ($kind: ty) => {
        impl ::std::fmt::Display for $kind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", String::from(self))
            }
        }
    };
}
