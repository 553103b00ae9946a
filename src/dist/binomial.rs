//! Binomial distribution
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::impl_display;
use crate::misc::{ln_binom, xlogy};
use crate::traits::*;
use rand::Rng;
use std::fmt;

// Slack when comparing accumulated masses against a target probability
const MASS_EPS: f64 = 1E-12;

/// [Binomial distribution](https://en.wikipedia.org/wiki/Binomial_distribution)
/// with *n* trials and success probability *p*
///
/// Values are reported as `f64`. Quantiles follow the usual discrete
/// convention: the smallest `k` such that `cdf(k) >= q`, with `q = 0` mapping
/// to one below the support.
///
/// # Examples
///
/// ```
/// use negated_rv::prelude::*;
///
/// let binom = Binomial::new(4, 0.5).unwrap();
/// let cdf = binom.cdf(&2.0);
///
/// assert_eq!(cdf, binom.pmf(&0.0) + binom.pmf(&1.0) + binom.pmf(&2.0));
/// assert_eq!(binom.invcdf(0.0), -1.0);
/// ```
///
/// Values outside the support of [0, n], or non-integer values, have zero
/// mass.
///
/// ```
/// # use negated_rv::prelude::*;
/// let binom = Binomial::new(4, 0.5).unwrap();
/// assert_eq!(binom.pmf(&5.0), 0.0);
/// assert_eq!(binom.pmf(&1.5), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Binomial {
    /// Total number of trials
    n: u64,
    /// Probability of a success
    p: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum BinomialError {
    /// The number of trials is zero
    NIsZero,
    /// Bernoulli p is less than zero
    PLessThanZero { p: f64 },
    /// Bernoulli p is greater than one
    PGreaterThanOne { p: f64 },
    /// Bernoulli p is infinite or NaN
    PNotFinite { p: f64 },
}

impl Binomial {
    /// Create a new Binomial distribution
    ///
    /// # Arguments
    ///
    /// - n: the total number of trials
    /// - p: the probability of success
    pub fn new(n: u64, p: f64) -> Result<Self, BinomialError> {
        if n == 0 {
            Err(BinomialError::NIsZero)
        } else if p < 0.0 {
            Err(BinomialError::PLessThanZero { p })
        } else if p > 1.0 {
            Err(BinomialError::PGreaterThanOne { p })
        } else if !p.is_finite() {
            Err(BinomialError::PNotFinite { p })
        } else {
            Ok(Binomial { n, p })
        }
    }

    /// Creates a new Binomial without checking whether the parameters are
    /// valid.
    #[inline]
    pub fn new_unchecked(n: u64, p: f64) -> Self {
        Binomial { n, p }
    }

    /// A Binomial distribution with a 50% chance of success
    #[inline]
    pub fn uniform(n: u64) -> Self {
        Binomial::new_unchecked(n, 0.5)
    }

    /// Get the number of trials
    #[inline]
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Get the probability of success
    #[inline]
    pub fn p(&self) -> f64 {
        self.p
    }

    /// The complement of `p`, 1 - p
    #[inline]
    pub fn q(&self) -> f64 {
        1.0 - self.p
    }

    fn nf(&self) -> f64 {
        self.n as f64
    }

    // Masses of 0, 1, ..., n
    fn masses(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        (0..=self.n).map(move |k| {
            let kf = k as f64;
            (kf, self.f(&kf))
        })
    }
}

impl From<&Binomial> for String {
    fn from(b: &Binomial) -> String {
        format!("Binomial({}; p: {})", b.n, b.p)
    }
}

impl_display!(Binomial);

impl Family for Binomial {
    const KIND: DensityKind = DensityKind::Discrete;

    fn name(&self) -> &'static str {
        "binom"
    }

    fn args(&self) -> Vec<f64> {
        vec![self.nf(), self.p]
    }
}

impl HasDensity<f64> for Binomial {
    fn ln_f(&self, k: &f64) -> f64 {
        if k.is_nan() {
            return f64::NAN;
        } else if !self.supports(k) {
            return f64::NEG_INFINITY;
        }
        let nf = self.nf();
        ln_binom(nf, *k) + xlogy(*k, self.p) + xlogy(nf - k, self.q())
    }
}

impl DiscreteDistr<f64> for Binomial {}

impl Sampleable<f64> for Binomial {
    fn draw<R: Rng>(&self, rng: &mut R) -> f64 {
        rand_distr::Binomial::new(self.n, self.p)
            .map_or(f64::NAN, |b| rng.sample(b) as f64)
    }
}

impl Support<f64> for Binomial {
    fn support(&self) -> (f64, f64) {
        (0.0, self.nf())
    }

    fn supports(&self, k: &f64) -> bool {
        *k >= 0.0 && *k <= self.nf() && k.fract() == 0.0
    }
}

impl Cdf<f64> for Binomial {
    fn cdf(&self, k: &f64) -> f64 {
        if k.is_nan() {
            f64::NAN
        } else if *k < 0.0 {
            0.0
        } else if *k >= self.nf() {
            1.0
        } else {
            let k = k.floor();
            self.masses()
                .take_while(|&(x, _)| x <= k)
                .fold(0.0, |acc, (_, f)| acc + f)
        }
    }

    fn sf(&self, k: &f64) -> f64 {
        if k.is_nan() {
            f64::NAN
        } else if *k < 0.0 {
            1.0
        } else if *k >= self.nf() {
            0.0
        } else {
            let k = k.floor();
            self.masses()
                .skip_while(|&(x, _)| x <= k)
                .fold(0.0, |acc, (_, f)| acc + f)
        }
    }
}

impl InverseCdf<f64> for Binomial {
    fn invcdf(&self, p: f64) -> f64 {
        if p == 0.0 {
            return -1.0;
        }
        let mut cdf = 0.0;
        for (k, f) in self.masses() {
            cdf += f;
            if cdf + MASS_EPS >= p {
                return k;
            }
        }
        self.nf()
    }

    fn inv_sf(&self, q: f64) -> f64 {
        if q == 1.0 {
            return -1.0;
        }
        // sf(k) is the mass strictly above k, accumulate from the top
        let mut sf = 0.0;
        let mut ans = self.nf();
        for k in (0..self.n).rev() {
            sf += self.f(&((k + 1) as f64));
            if sf <= q + MASS_EPS {
                ans = k as f64;
            } else {
                break;
            }
        }
        ans
    }
}

impl Mean<f64> for Binomial {
    fn mean(&self) -> Option<f64> {
        Some(self.nf() * self.p)
    }
}

impl Median<f64> for Binomial {
    fn median(&self) -> Option<f64> {
        Some(self.invcdf(0.5))
    }
}

impl Variance<f64> for Binomial {
    fn variance(&self) -> Option<f64> {
        Some(self.nf() * self.p * self.q())
    }
}

impl Entropy for Binomial {
    fn entropy(&self) -> f64 {
        -self.masses().map(|(_, f)| xlogy(f, f)).sum::<f64>()
    }
}

impl Moment for Binomial {
    fn moment(&self, n: u32) -> Option<f64> {
        let m = self.masses().map(|(k, f)| f * k.powf(f64::from(n))).sum();
        Some(m)
    }
}

impl QuadBounds for Binomial {
    fn quad_bounds(&self) -> (f64, f64) {
        self.support()
    }
}

impl Expectation for Binomial {
    fn expect_with<G: Fn(f64) -> f64>(&self, g: G) -> f64 {
        self.masses().map(|(k, f)| g(k) * f).sum()
    }
}

impl std::error::Error for BinomialError {}

impl fmt::Display for BinomialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PLessThanZero { p } => {
                write!(f, "p ({}) was less than zero", p)
            }
            Self::PGreaterThanOne { p } => {
                write!(f, "p ({}) was greater than one", p)
            }
            Self::PNotFinite { p } => write!(f, "p ({}) was non-finite", p),
            Self::NIsZero => write!(f, "n was zero"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_basic_impls;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    const TOL: f64 = 1E-12;

    test_basic_impls!(Binomial::new(10, 0.6).unwrap());

    #[test]
    fn new() {
        let binom = Binomial::new(10, 0.6).unwrap();
        assert_eq!(binom.n, 10);
        assert::close(binom.p, 0.6, TOL);
    }

    #[test]
    fn new_should_reject_n_zero() {
        assert_eq!(Binomial::new(0, 0.6), Err(BinomialError::NIsZero));
    }

    #[test]
    fn new_should_reject_low_p() {
        assert!(Binomial::new(10, -0.1).is_err());
        assert!(Binomial::new(10, -1.0).is_err());
    }

    #[test]
    fn new_should_reject_high_p() {
        assert!(Binomial::new(10, 1.1).is_err());
        assert!(Binomial::new(10, 200.0).is_err());
    }

    #[test]
    fn new_should_reject_nan_p() {
        assert!(matches!(
            Binomial::new(10, f64::NAN),
            Err(BinomialError::PNotFinite { .. })
        ));
    }

    #[test]
    fn ln_pmf() {
        let binom = Binomial::new(10, 0.6).unwrap();
        let known_values = vec![
            -9.162_907_318_741_55,
            -6.454_857_117_639_339,
            -4.545_314_612_754_902,
            -3.159_020_251_635_010_5,
            -2.193_939_355_591_423_3,
            -1.606_152_690_689_303_8,
            -1.383_009_139_375_095,
            -1.537_159_819_202_353_5,
            -2.112_523_964_105_916_4,
            -3.211_136_252_774_024_6,
            -5.108_256_237_659_907,
        ];
        let generated_values: Vec<f64> =
            (0..=10).map(|k| binom.ln_pmf(&f64::from(k))).collect();
        assert::close(known_values, generated_values, 1E-10);
    }

    #[test]
    fn pmf_off_support_is_zero() {
        let binom = Binomial::new(10, 0.6).unwrap();
        assert_eq!(binom.pmf(&-1.0), 0.0);
        assert_eq!(binom.pmf(&11.0), 0.0);
        assert_eq!(binom.pmf(&2.5), 0.0);
        assert_eq!(binom.ln_pmf(&2.5), f64::NEG_INFINITY);
    }

    #[test]
    fn pmf_with_degenerate_p() {
        let binom = Binomial::new(3, 0.0).unwrap();
        assert::close(binom.pmf(&0.0), 1.0, TOL);
        assert_eq!(binom.pmf(&1.0), 0.0);
    }

    #[test]
    fn cdf() {
        let binom = Binomial::new(10, 0.6).unwrap();
        let known_values = vec![
            0.000_104_857_600_000_000_06,
            0.001_677_721_600_000_000_5,
            0.012_294_553_600_000_008,
            0.054_761_881_600_000_02,
            0.166_238_617_6,
            0.366_896_742_400_000_03,
            0.617_719_398_399_999_9,
            0.832_710_246_4,
            0.953_642_598_4,
            0.993_953_382_4,
            1.0,
        ];
        let generated_values: Vec<f64> =
            (0..=10).map(|k| binom.cdf(&f64::from(k))).collect();
        assert::close(known_values, generated_values, 1E-10);
    }

    #[test]
    fn cdf_between_atoms_is_flat() {
        let binom = Binomial::new(10, 0.6).unwrap();
        assert_eq!(binom.cdf(&4.5), binom.cdf(&4.0));
        assert_eq!(binom.cdf(&-0.5), 0.0);
        assert_eq!(binom.cdf(&10.5), 1.0);
    }

    #[test]
    fn sf_is_complement_of_cdf() {
        let binom = Binomial::new(10, 0.6).unwrap();
        for k in [-1.0, 0.0, 3.0, 3.5, 7.0, 10.0] {
            assert::close(binom.sf(&k), 1.0 - binom.cdf(&k), 1E-10);
        }
    }

    #[test]
    fn invcdf_edges() {
        let binom = Binomial::new(5, 0.5).unwrap();
        assert_eq!(binom.invcdf(0.0), -1.0);
        assert_eq!(binom.invcdf(1.0), 5.0);
        assert_eq!(binom.inv_sf(1.0), -1.0);
        assert_eq!(binom.inv_sf(0.0), 5.0);
        assert_eq!(binom.interval(1.0), (-1.0, 5.0));
    }

    #[test]
    fn invcdf_is_smallest_k_reaching_p() {
        let binom = Binomial::new(5, 0.5).unwrap();
        // cdf: 1/32, 6/32, 16/32, 26/32, 31/32, 1
        assert_eq!(binom.invcdf(0.01), 0.0);
        assert_eq!(binom.invcdf(0.1), 1.0);
        assert_eq!(binom.invcdf(0.5), 2.0);
        assert_eq!(binom.invcdf(0.9), 4.0);
    }

    #[test]
    fn inv_sf_is_smallest_k_with_sf_below_q() {
        let binom = Binomial::new(5, 0.5).unwrap();
        // sf: 31/32, 26/32, 16/32, 6/32, 1/32, 0
        assert_eq!(binom.inv_sf(0.99), 0.0);
        assert_eq!(binom.inv_sf(0.9), 1.0);
        assert_eq!(binom.inv_sf(0.5), 2.0);
        assert_eq!(binom.inv_sf(0.1), 4.0);
        assert_eq!(binom.inv_sf(0.01), 5.0);
    }

    #[test]
    fn median() {
        let binom = Binomial::new(5, 0.5).unwrap();
        assert_eq!(binom.median(), Some(2.0));
        let binom = Binomial::new(10, 0.6).unwrap();
        assert_eq!(binom.median(), Some(6.0));
    }

    #[test]
    fn mean_and_variance() {
        let binom = Binomial::new(10, 0.6).unwrap();
        assert::close(binom.mean().unwrap(), 6.0, TOL);
        assert::close(binom.variance().unwrap(), 2.4, TOL);
    }

    #[test]
    fn raw_moments_agree_with_mean_and_variance() {
        let binom = Binomial::new(7, 0.3).unwrap();
        let mean = binom.mean().unwrap();
        let var = binom.variance().unwrap();
        assert::close(binom.moment(0).unwrap(), 1.0, 1E-10);
        assert::close(binom.moment(1).unwrap(), mean, 1E-10);
        assert::close(binom.moment(2).unwrap(), var + mean * mean, 1E-10);
    }

    #[test]
    fn moment_of_huge_order() {
        // only k = 1 contributes once k^n is large
        let binom = Binomial::new(1, 0.5).unwrap();
        assert::close(binom.moment(u32::MAX).unwrap(), 0.5, TOL);
        assert::close(binom.moment(i32::MAX as u32).unwrap(), 0.5, TOL);
    }

    #[test]
    fn nan_input_gives_nan() {
        let binom = Binomial::new(5, 0.5).unwrap();
        assert!(binom.pmf(&f64::NAN).is_nan());
        assert!(binom.ln_pmf(&f64::NAN).is_nan());
        assert!(binom.cdf(&f64::NAN).is_nan());
        assert!(binom.sf(&f64::NAN).is_nan());
    }

    #[test]
    fn entropy() {
        let binom = Binomial::new(1, 0.5).unwrap();
        assert::close(binom.entropy(), std::f64::consts::LN_2, TOL);
    }

    #[test]
    fn expectation_is_summation() {
        let binom = Binomial::new(5, 0.5).unwrap();
        assert::close(binom.expect_with(|k| k), 2.5, TOL);
        assert::close(binom.expect_with(|_| 1.0), 1.0, TOL);
    }

    #[test]
    fn draws_are_in_support() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
        let binom = Binomial::new(5, 0.6).unwrap();
        let xs = binom.sample(1_000, &mut rng);
        assert!(xs.iter().all(|x| binom.supports(x)));
    }

    #[test]
    fn args_are_n_and_p() {
        let binom = Binomial::new(5, 0.6).unwrap();
        assert_eq!(binom.name(), "binom");
        assert_eq!(binom.args(), vec![5.0, 0.6]);
        assert!(binom.kwds().is_empty());
    }
}
