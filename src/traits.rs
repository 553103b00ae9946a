//! Trait definitions
use std::fmt;

use rand::Rng;

use crate::dispatch::{self, Op, Value};
use crate::dist::RandomState;
use crate::result::Result;

/// Whether a distribution has a density or a mass function
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DensityKind {
    /// Has a probability density function
    Continuous,
    /// Has a probability mass function
    Discrete,
}

/// A named distribution family and the parameters it was built with
pub trait Family {
    /// How the density of this family is queried
    const KIND: DensityKind;

    /// Short name of the family, e.g. `"norm"`
    fn name(&self) -> &'static str;

    /// Positional construction parameters
    fn args(&self) -> Vec<f64> {
        Vec::new()
    }

    /// Keyword construction parameters
    fn kwds(&self) -> Vec<(&'static str, f64)> {
        Vec::new()
    }
}

pub trait HasDensity<X> {
    /// Probability function
    fn f(&self, x: &X) -> f64 {
        self.ln_f(x).exp()
    }

    /// Log probability function
    fn ln_f(&self, x: &X) -> f64;
}

/// Trait describing continuous probability distributions
pub trait ContinuousDistr<X>: HasDensity<X> {
    /// The value of the Probability Density Function (PDF) at `x`
    fn pdf(&self, x: &X) -> f64 {
        self.f(x)
    }

    /// The value of the log Probability Density Function (PDF) at `x`
    fn ln_pdf(&self, x: &X) -> f64 {
        self.ln_f(x)
    }
}

/// Trait describing discrete probability distributions
pub trait DiscreteDistr<X>: HasDensity<X> {
    /// The value of the Probability Mass Function (PMF) at `x`
    fn pmf(&self, x: &X) -> f64 {
        self.f(x)
    }

    /// The value of the log Probability Mass Function (PMF) at `x`
    fn ln_pmf(&self, x: &X) -> f64 {
        self.ln_f(x)
    }
}

pub trait Sampleable<X> {
    /// Single draw
    fn draw<R: Rng>(&self, rng: &mut R) -> X;

    /// Multiple draws
    fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<X> {
        (0..n).map(|_| self.draw(rng)).collect()
    }
}

/// Trait identifying the support of the distribution
pub trait Support<X> {
    /// Lower and upper bound of the support. Either may be infinite.
    fn support(&self) -> (X, X);

    /// Returns `true` if `x` is in the support
    fn supports(&self, x: &X) -> bool;
}

pub trait Cdf<X> {
    /// The value of the Cumulative Density Function at `x`
    fn cdf(&self, x: &X) -> f64;

    /// Survival function, `1 - cdf(x)`
    fn sf(&self, x: &X) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Log of the CDF
    fn ln_cdf(&self, x: &X) -> f64 {
        self.cdf(x).ln()
    }

    /// Log of the survival function
    fn ln_sf(&self, x: &X) -> f64 {
        self.sf(x).ln()
    }
}

pub trait InverseCdf<X> {
    /// The value of the `x` at the given probability in the CDF
    fn invcdf(&self, p: f64) -> X;

    /// Inverse of the survival function
    fn inv_sf(&self, q: f64) -> X {
        self.invcdf(1.0 - q)
    }

    /// Alias for `invcdf`
    fn quantile(&self, p: f64) -> X {
        self.invcdf(p)
    }

    /// Interval containing `p` proportion of the probability mass, with
    /// equal mass left out on each side
    fn interval(&self, p: f64) -> (X, X) {
        let pt = (1.0 - p) / 2.0;
        (self.invcdf(pt), self.invcdf(p + pt))
    }
}

pub trait Mean<X> {
    fn mean(&self) -> Option<X>;
}

pub trait Median<X> {
    fn median(&self) -> Option<X>;
}

pub trait Variance<X> {
    fn variance(&self) -> Option<X>;
}

pub trait Entropy {
    fn entropy(&self) -> f64;
}

/// Raw (non-central) moments
pub trait Moment {
    /// E[X<sup>n</sup>]
    fn moment(&self, n: u32) -> Option<f64>;
}

/// Bounds outside of which the density is negligible for quadrature
pub trait QuadBounds {
    fn quad_bounds(&self) -> (f64, f64);
}

/// Expectations of functions of the random variable
pub trait Expectation {
    /// E[g(X)], by quadrature or summation over the support
    fn expect_with<G: Fn(f64) -> f64>(&self, g: G) -> f64;
}

/// Everything a real-valued distribution needs to be frozen into a
/// [`FrozenRv`]
pub trait Univariate:
    Family
    + HasDensity<f64>
    + Cdf<f64>
    + InverseCdf<f64>
    + Support<f64>
    + Mean<f64>
    + Median<f64>
    + Variance<f64>
    + Entropy
    + Moment
    + Expectation
    + Sampleable<f64>
    + fmt::Display
{
}

impl<D> Univariate for D where
    D: Family
        + HasDensity<f64>
        + Cdf<f64>
        + InverseCdf<f64>
        + Support<f64>
        + Mean<f64>
        + Median<f64>
        + Variance<f64>
        + Entropy
        + Moment
        + Expectation
        + Sampleable<f64>
        + fmt::Display
{
}

/// A distribution with fixed parameters and its own random state.
///
/// This is the full query vocabulary. Every method has a counterpart
/// [`Op`] on the name-keyed boundary ([`FrozenRv::query`]), except the
/// support bounds `a` and `b` which are resolved as derived properties.
///
/// Quantities that are undefined for a distribution are reported as NaN;
/// quantile arguments outside of `[0, 1]` also give NaN.
pub trait FrozenRv {
    /// Parameterization handle
    type Dist: Family + fmt::Display;

    /// The underlying parameterized distribution
    fn dist(&self) -> &Self::Dist;

    /// The random number generator used by `rv` and `rvs`
    fn random_state(&self) -> &RandomState;

    /// Mutable access to the random number generator
    fn random_state_mut(&mut self) -> &mut RandomState;

    /// Positional construction parameters
    fn args(&self) -> Vec<f64>;

    /// Keyword construction parameters
    fn kwds(&self) -> Vec<(&'static str, f64)>;

    /// Lower bound of the support
    fn a(&self) -> f64;

    /// Upper bound of the support
    fn b(&self) -> f64;

    fn pdf(&self, x: f64) -> Result<f64>;

    fn logpdf(&self, x: f64) -> Result<f64>;

    fn pmf(&self, x: f64) -> Result<f64>;

    fn logpmf(&self, x: f64) -> Result<f64>;

    fn cdf(&self, x: f64) -> f64;

    fn sf(&self, x: f64) -> f64;

    fn logcdf(&self, x: f64) -> f64;

    fn logsf(&self, x: f64) -> f64;

    /// Percent point function (inverse of `cdf`)
    fn ppf(&self, q: f64) -> f64;

    /// Inverse survival function (inverse of `sf`)
    fn isf(&self, q: f64) -> f64;

    /// Single draw
    fn rv(&mut self) -> f64;

    /// `size` draws
    fn rvs(&mut self, size: usize) -> Vec<f64> {
        (0..size).map(|_| self.rv()).collect()
    }

    fn mean(&self) -> f64;

    fn median(&self) -> f64;

    fn var(&self) -> f64;

    fn std(&self) -> f64 {
        self.var().sqrt()
    }

    fn entropy(&self) -> f64;

    /// E[X], computed by the distribution's own quadrature or summation
    fn expect(&self) -> f64 {
        self.expect_with(|x| x)
    }

    /// E[g(X)]
    fn expect_with<G: Fn(f64) -> f64>(&self, g: G) -> f64;

    /// Endpoints of the equal-tailed interval containing `alpha` mass
    fn interval(&self, alpha: f64) -> (f64, f64);

    /// Mean and variance
    fn stats(&self) -> (f64, f64) {
        (self.mean(), self.var())
    }

    /// The raw `n`-th moment
    fn moment(&self, n: u32) -> f64;

    /// Answer `op` with untyped arguments
    fn call(&mut self, op: Op, args: &[f64]) -> Result<Value>
    where
        Self: Sized,
    {
        dispatch::call_direct(self, op, args)
    }

    /// Answer a query by name.
    ///
    /// `"a"` and `"b"` resolve to the support bounds. Any other name must
    /// be one of the [`Op`] names, otherwise
    /// [`DistError::NotImplemented`](crate::DistError::NotImplemented) is
    /// returned.
    ///
    /// Counts must be non-negative integers: `moment` orders up to
    /// `u32::MAX` and `rvs` sizes up to
    /// [`MAX_RVS_SIZE`](crate::dispatch::MAX_RVS_SIZE).
    fn query(&mut self, name: &str, args: &[f64]) -> Result<Value>
    where
        Self: Sized,
    {
        match name {
            "a" => dispatch::bound("a", args, self.a()),
            "b" => dispatch::bound("b", args, self.b()),
            _ => {
                let op: Op = name.parse()?;
                self.call(op, args)
            }
        }
    }
}
