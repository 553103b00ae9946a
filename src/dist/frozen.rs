//! Distributions bound to their own random state
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use std::fmt;

use crate::dispatch::Op;
use crate::result::{DistError, Result};
use crate::traits::*;

/// The random number generator owned by a [`Frozen`] distribution
pub type RandomState = Xoshiro256Plus;

/// A distribution with fixed parameters and its own random state.
///
/// Sampling advances the owned state, so two clones of a `Frozen` produce
/// the same stream independently of each other.
///
/// # Example
///
/// ```
/// use negated_rv::prelude::*;
///
/// let mut a = Frozen::with_seed(Gaussian::standard(), 1337);
/// let mut b = a.clone();
///
/// assert_eq!(a.rvs(3), b.rvs(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Frozen<D> {
    dist: D,
    rng: RandomState,
}

impl<D> Frozen<D> {
    /// Freeze `dist` with a random state seeded from system entropy
    pub fn new(dist: D) -> Self {
        Frozen {
            dist,
            rng: RandomState::from_entropy(),
        }
    }

    /// Freeze `dist` with a reproducible random state
    pub fn with_seed(dist: D, seed: u64) -> Self {
        Frozen {
            dist,
            rng: RandomState::seed_from_u64(seed),
        }
    }

    /// Freeze `dist` with the given random state
    pub fn from_parts(dist: D, rng: RandomState) -> Self {
        Frozen { dist, rng }
    }

    /// Replace the random state with one seeded from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng = RandomState::seed_from_u64(seed);
    }

    /// Return the distribution, dropping the random state
    pub fn into_inner(self) -> D {
        self.dist
    }
}

impl<D: fmt::Display> fmt::Display for Frozen<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dist.fmt(f)
    }
}

impl<D: Univariate> Frozen<D> {
    fn density(&self, op: Op, kind: DensityKind, x: f64) -> Result<f64> {
        if D::KIND == kind {
            Ok(self.dist.f(&x))
        } else {
            Err(DistError::Undefined { op })
        }
    }

    fn ln_density(&self, op: Op, kind: DensityKind, x: f64) -> Result<f64> {
        if D::KIND == kind {
            Ok(self.dist.ln_f(&x))
        } else {
            Err(DistError::Undefined { op })
        }
    }
}

fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

impl<D: Univariate> FrozenRv for Frozen<D> {
    type Dist = D;

    fn dist(&self) -> &D {
        &self.dist
    }

    fn random_state(&self) -> &RandomState {
        &self.rng
    }

    fn random_state_mut(&mut self) -> &mut RandomState {
        &mut self.rng
    }

    fn args(&self) -> Vec<f64> {
        self.dist.args()
    }

    fn kwds(&self) -> Vec<(&'static str, f64)> {
        self.dist.kwds()
    }

    fn a(&self) -> f64 {
        self.dist.support().0
    }

    fn b(&self) -> f64 {
        self.dist.support().1
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        self.density(Op::Pdf, DensityKind::Continuous, x)
    }

    fn logpdf(&self, x: f64) -> Result<f64> {
        self.ln_density(Op::LogPdf, DensityKind::Continuous, x)
    }

    fn pmf(&self, x: f64) -> Result<f64> {
        self.density(Op::Pmf, DensityKind::Discrete, x)
    }

    fn logpmf(&self, x: f64) -> Result<f64> {
        self.ln_density(Op::LogPmf, DensityKind::Discrete, x)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.dist.cdf(&x)
    }

    fn sf(&self, x: f64) -> f64 {
        self.dist.sf(&x)
    }

    fn logcdf(&self, x: f64) -> f64 {
        self.dist.ln_cdf(&x)
    }

    fn logsf(&self, x: f64) -> f64 {
        self.dist.ln_sf(&x)
    }

    fn ppf(&self, q: f64) -> f64 {
        if is_probability(q) {
            self.dist.invcdf(q)
        } else {
            f64::NAN
        }
    }

    fn isf(&self, q: f64) -> f64 {
        if is_probability(q) {
            self.dist.inv_sf(q)
        } else {
            f64::NAN
        }
    }

    fn rv(&mut self) -> f64 {
        self.dist.draw(&mut self.rng)
    }

    fn rvs(&mut self, size: usize) -> Vec<f64> {
        self.dist.sample(size, &mut self.rng)
    }

    fn mean(&self) -> f64 {
        self.dist.mean().unwrap_or(f64::NAN)
    }

    fn median(&self) -> f64 {
        self.dist.median().unwrap_or(f64::NAN)
    }

    fn var(&self) -> f64 {
        self.dist.variance().unwrap_or(f64::NAN)
    }

    fn entropy(&self) -> f64 {
        self.dist.entropy()
    }

    fn expect_with<G: Fn(f64) -> f64>(&self, g: G) -> f64 {
        self.dist.expect_with(g)
    }

    fn interval(&self, alpha: f64) -> (f64, f64) {
        if is_probability(alpha) {
            self.dist.interval(alpha)
        } else {
            (f64::NAN, f64::NAN)
        }
    }

    fn moment(&self, n: u32) -> f64 {
        self.dist.moment(n).unwrap_or(f64::NAN)
    }
}
