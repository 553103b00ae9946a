//! Gaussian/Normal distribution over x in (-∞, ∞)
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use rand::Rng;
use rand_distr::StandardNormal;
use special::Error as _;
use std::f64::consts::SQRT_2;
use std::fmt;

use crate::consts::{HALF_LN_2PI, HALF_LN_2PI_E, QUAD_TAIL_MASS};
use crate::impl_display;
use crate::misc::quad;
use crate::traits::*;

/// Gaussian / [Normal distribution](https://en.wikipedia.org/wiki/Normal_distribution),
/// N(μ, σ) over real values.
///
/// # Example
///
/// ```
/// use negated_rv::prelude::*;
///
/// let gauss = Gaussian::new(1.0, 2.0).unwrap();
/// let neg = Frozen::new(gauss.clone()).negated();
///
/// // -X ~ N(-μ, σ)
/// let mirror = Gaussian::new(-1.0, 2.0).unwrap();
/// assert!((neg.cdf(0.3) - mirror.cdf(&0.3)).abs() < 1E-12);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Gaussian {
    /// Mean
    mu: f64,
    /// Standard deviation
    sigma: f64,
    /// Cached log(sigma)
    #[cfg_attr(feature = "serde1", serde(skip))]
    ln_sigma: f64,
}

impl PartialEq for Gaussian {
    fn eq(&self, other: &Gaussian) -> bool {
        self.mu == other.mu && self.sigma == other.sigma
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum GaussianError {
    /// The mu parameter is infinite or NaN
    MuNotFinite { mu: f64 },
    /// The sigma parameter is less than or equal to zero
    SigmaTooLow { sigma: f64 },
    /// The sigma parameter is infinite or NaN
    SigmaNotFinite { sigma: f64 },
}

impl Gaussian {
    /// Create a new Gaussian distribution
    ///
    /// # Arguments
    /// - mu: mean
    /// - sigma: standard deviation
    pub fn new(mu: f64, sigma: f64) -> Result<Self, GaussianError> {
        if !mu.is_finite() {
            Err(GaussianError::MuNotFinite { mu })
        } else if sigma <= 0.0 {
            Err(GaussianError::SigmaTooLow { sigma })
        } else if !sigma.is_finite() {
            Err(GaussianError::SigmaNotFinite { sigma })
        } else {
            Ok(Gaussian::new_unchecked(mu, sigma))
        }
    }

    /// Creates a new Gaussian without checking whether the parameters are
    /// valid.
    #[inline]
    pub fn new_unchecked(mu: f64, sigma: f64) -> Self {
        Gaussian {
            mu,
            sigma,
            ln_sigma: sigma.ln(),
        }
    }

    /// Standard normal
    ///
    /// ```rust
    /// # use negated_rv::dist::Gaussian;
    /// let gauss = Gaussian::standard();
    ///
    /// assert_eq!(gauss, Gaussian::new(0.0, 1.0).unwrap());
    /// ```
    #[inline]
    pub fn standard() -> Self {
        Gaussian {
            mu: 0.0,
            sigma: 1.0,
            ln_sigma: 0.0,
        }
    }

    /// Get mu parameter
    #[inline]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Get sigma parameter
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    // ln(sigma) is not serialized
    fn ln_sigma(&self) -> f64 {
        if self.ln_sigma == 0.0 && self.sigma != 1.0 {
            self.sigma.ln()
        } else {
            self.ln_sigma
        }
    }

    #[inline]
    fn z(&self, x: f64) -> f64 {
        (x - self.mu) / self.sigma
    }
}

impl Default for Gaussian {
    fn default() -> Self {
        Gaussian::standard()
    }
}

impl From<&Gaussian> for String {
    fn from(gauss: &Gaussian) -> String {
        format!("N(μ: {}, σ: {})", gauss.mu, gauss.sigma)
    }
}

impl_display!(Gaussian);

impl Family for Gaussian {
    const KIND: DensityKind = DensityKind::Continuous;

    fn name(&self) -> &'static str {
        "norm"
    }

    fn args(&self) -> Vec<f64> {
        vec![self.mu, self.sigma]
    }
}

impl HasDensity<f64> for Gaussian {
    fn ln_f(&self, x: &f64) -> f64 {
        let k = self.z(*x);
        (0.5 * k).mul_add(-k, -self.ln_sigma()) - HALF_LN_2PI
    }
}

impl ContinuousDistr<f64> for Gaussian {}

impl Sampleable<f64> for Gaussian {
    fn draw<R: Rng>(&self, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        self.sigma.mul_add(z, self.mu)
    }
}

impl Support<f64> for Gaussian {
    fn support(&self) -> (f64, f64) {
        (f64::NEG_INFINITY, f64::INFINITY)
    }

    fn supports(&self, x: &f64) -> bool {
        x.is_finite()
    }
}

impl Cdf<f64> for Gaussian {
    fn cdf(&self, x: &f64) -> f64 {
        0.5 * (-self.z(*x) / SQRT_2).compl_error()
    }

    fn sf(&self, x: &f64) -> f64 {
        0.5 * (self.z(*x) / SQRT_2).compl_error()
    }
}

impl InverseCdf<f64> for Gaussian {
    fn invcdf(&self, p: f64) -> f64 {
        (self.sigma * SQRT_2)
            .mul_add(2.0_f64.mul_add(p, -1.0).inv_error(), self.mu)
    }

    fn inv_sf(&self, q: f64) -> f64 {
        (self.sigma * SQRT_2)
            .mul_add((-2.0_f64).mul_add(q, 1.0).inv_error(), self.mu)
    }
}

impl Mean<f64> for Gaussian {
    fn mean(&self) -> Option<f64> {
        Some(self.mu)
    }
}

impl Median<f64> for Gaussian {
    fn median(&self) -> Option<f64> {
        Some(self.mu)
    }
}

impl Variance<f64> for Gaussian {
    fn variance(&self) -> Option<f64> {
        Some(self.sigma * self.sigma)
    }
}

impl Entropy for Gaussian {
    fn entropy(&self) -> f64 {
        HALF_LN_2PI_E + self.ln_sigma()
    }
}

impl Moment for Gaussian {
    // m_k = μ m_{k-1} + (k - 1) σ² m_{k-2}
    fn moment(&self, n: u32) -> Option<f64> {
        let s2 = self.sigma * self.sigma;
        let (mut prev, mut curr) = (0.0, 1.0);
        for k in 1..=n {
            let next = self.mu.mul_add(curr, f64::from(k - 1) * s2 * prev);
            prev = curr;
            curr = next;
            if !curr.is_finite() {
                break;
            }
        }
        Some(curr)
    }
}

impl QuadBounds for Gaussian {
    fn quad_bounds(&self) -> (f64, f64) {
        self.interval(1.0 - QUAD_TAIL_MASS)
    }
}

impl Expectation for Gaussian {
    fn expect_with<G: Fn(f64) -> f64>(&self, g: G) -> f64 {
        let (a, b) = self.quad_bounds();
        quad(|x| g(x) * self.f(&x), a, b)
    }
}

impl std::error::Error for GaussianError {}

impl fmt::Display for GaussianError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MuNotFinite { mu } => write!(f, "non-finite mu: {mu}"),
            Self::SigmaTooLow { sigma } => {
                write!(f, "sigma ({sigma}) must be greater than zero")
            }
            Self::SigmaNotFinite { sigma } => {
                write!(f, "non-finite sigma: {sigma}")
            }
        }
    }
}
