//! Exponential distribution over x in [0, ∞)
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use rand::Rng;
use rand_distr::Exp1;
use std::f64::consts::LN_2;
use std::fmt;

use crate::consts::QUAD_TAIL_MASS;
use crate::impl_display;
use crate::misc::quad;
use crate::traits::*;

/// [Exponential distribution](https://en.wikipedia.org/wiki/Exponential_distribution),
/// Expon(λ) over x in [0, ∞).
///
/// The family is parameterized by its rate, but reports `scale = 1/λ` as
/// its keyword parameter.
///
/// # Examples
///
/// ```
/// use negated_rv::prelude::*;
///
/// let expon = Exponential::new(1.0).unwrap();
/// let neg = Frozen::new(expon).negated();
///
/// // -X lives on (-∞, 0]
/// assert_eq!(neg.a(), f64::NEG_INFINITY);
/// assert_eq!(neg.b(), 0.0);
/// assert_eq!(neg.kwds(), vec![("scale", 1.0)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Exponential {
    rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum ExponentialError {
    /// The rate parameter is less than or equal to zero
    RateTooLow { rate: f64 },
    /// The rate parameter is infinite or NaN
    RateNotFinite { rate: f64 },
}

impl Exponential {
    /// Create a new exponential distribution
    ///
    /// # Arguments
    /// - rate: λ > 0, rate or inverse scale
    pub fn new(rate: f64) -> Result<Self, ExponentialError> {
        if rate <= 0.0 {
            Err(ExponentialError::RateTooLow { rate })
        } else if !rate.is_finite() {
            Err(ExponentialError::RateNotFinite { rate })
        } else {
            Ok(Exponential { rate })
        }
    }

    /// Creates a new Exponential without checking whether the parameter is
    /// valid.
    #[inline]
    pub fn new_unchecked(rate: f64) -> Self {
        Exponential { rate }
    }

    /// Get the rate parameter
    ///
    /// # Example
    ///
    /// ```rust
    /// # use negated_rv::dist::Exponential;
    /// let expon = Exponential::new(1.3).unwrap();
    /// assert_eq!(expon.rate(), 1.3);
    /// ```
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Get the scale parameter, 1/λ
    #[inline]
    pub fn scale(&self) -> f64 {
        self.rate.recip()
    }
}

impl Default for Exponential {
    fn default() -> Self {
        Exponential { rate: 1.0 }
    }
}

impl From<&Exponential> for String {
    fn from(expon: &Exponential) -> String {
        format!("Expon(λ: {})", expon.rate)
    }
}

impl_display!(Exponential);

impl Family for Exponential {
    const KIND: DensityKind = DensityKind::Continuous;

    fn name(&self) -> &'static str {
        "expon"
    }

    fn kwds(&self) -> Vec<(&'static str, f64)> {
        vec![("scale", self.scale())]
    }
}

impl HasDensity<f64> for Exponential {
    fn ln_f(&self, x: &f64) -> f64 {
        if *x < 0.0 {
            f64::NEG_INFINITY
        } else {
            self.rate.mul_add(-x, self.rate.ln())
        }
    }
}

impl ContinuousDistr<f64> for Exponential {}

impl Sampleable<f64> for Exponential {
    fn draw<R: Rng>(&self, rng: &mut R) -> f64 {
        let e: f64 = rng.sample(Exp1);
        e / self.rate
    }
}

impl Support<f64> for Exponential {
    fn support(&self) -> (f64, f64) {
        (0.0, f64::INFINITY)
    }

    fn supports(&self, x: &f64) -> bool {
        *x >= 0.0 && x.is_finite()
    }
}

impl Cdf<f64> for Exponential {
    fn cdf(&self, x: &f64) -> f64 {
        if *x <= 0.0 {
            0.0
        } else {
            -(-self.rate * x).exp_m1()
        }
    }

    fn sf(&self, x: &f64) -> f64 {
        if *x <= 0.0 {
            1.0
        } else {
            (-self.rate * x).exp()
        }
    }

    fn ln_sf(&self, x: &f64) -> f64 {
        if *x <= 0.0 {
            0.0
        } else {
            -self.rate * x
        }
    }
}

impl InverseCdf<f64> for Exponential {
    fn invcdf(&self, p: f64) -> f64 {
        -(-p).ln_1p() / self.rate
    }

    fn inv_sf(&self, q: f64) -> f64 {
        -q.ln() / self.rate
    }
}

impl Mean<f64> for Exponential {
    fn mean(&self) -> Option<f64> {
        Some(self.rate.recip())
    }
}

impl Median<f64> for Exponential {
    fn median(&self) -> Option<f64> {
        Some(LN_2 / self.rate)
    }
}

impl Variance<f64> for Exponential {
    fn variance(&self) -> Option<f64> {
        Some((self.rate * self.rate).recip())
    }
}

impl Entropy for Exponential {
    fn entropy(&self) -> f64 {
        1.0 - self.rate.ln()
    }
}

impl Moment for Exponential {
    // n! / λ^n
    fn moment(&self, n: u32) -> Option<f64> {
        let mut m = 1.0;
        for k in 1..=n {
            m = m * f64::from(k) / self.rate;
            if m == 0.0 || !m.is_finite() {
                break;
            }
        }
        Some(m)
    }
}

impl QuadBounds for Exponential {
    fn quad_bounds(&self) -> (f64, f64) {
        (0.0, self.inv_sf(QUAD_TAIL_MASS))
    }
}

impl Expectation for Exponential {
    fn expect_with<G: Fn(f64) -> f64>(&self, g: G) -> f64 {
        let (a, b) = self.quad_bounds();
        quad(|x| g(x) * self.f(&x), a, b)
    }
}

impl std::error::Error for ExponentialError {}

impl fmt::Display for ExponentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateTooLow { rate } => {
                write!(f, "rate ({rate}) must be greater than zero")
            }
            Self::RateNotFinite { rate } => {
                write!(f, "non-finite rate: {rate}")
            }
        }
    }
}
