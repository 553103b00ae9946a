//! Probability distributions
mod binomial;
mod exponential;
mod frozen;
mod gaussian;
mod histogram;
mod negated;

pub use binomial::{Binomial, BinomialError};
pub use exponential::{Exponential, ExponentialError};
pub use frozen::{Frozen, RandomState};
pub use gaussian::{Gaussian, GaussianError};
pub use histogram::{Histogram, HistogramError};
pub use negated::{Negatable, Negated};
