//! The distribution of `-X`
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::dispatch::{Op, Value};
use crate::dist::RandomState;
use crate::result::Result;
use crate::traits::FrozenRv;

/// Trait for distributions that can be reflected about zero
pub trait Negatable: FrozenRv + Sized {
    /// Returns the distribution of `-X`
    fn negated(self) -> Negated<Self> {
        Negated::new(self)
    }
}

impl<F: FrozenRv> Negatable for F {}

/// A wrapper that behaves as the distribution of `-X`, where `X` follows
/// the wrapped distribution.
///
/// Every query is answered by reflecting the corresponding query of the
/// source; nothing is re-fitted. The construction parameters (`args`,
/// `kwds`) and `dist` are those of the source and describe `X`, not `-X`.
///
/// # Example
///
/// ```rust
/// use negated_rv::prelude::*;
///
/// let binom = Frozen::with_seed(Binomial::new(5, 0.5).unwrap(), 0x1234);
/// let neg = Negated::new(binom.clone());
///
/// assert_eq!(binom.interval(1.0), (-1.0, 5.0));
/// assert_eq!(neg.interval(1.0), (-5.0, 1.0));
/// assert_eq!(neg.stats(), (-2.5, 1.25));
/// assert_eq!(neg.pmf(-1.0), binom.pmf(1.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Negated<F> {
    source: F,
}

impl<F> Negated<F> {
    /// Wrap `source`. The source is not queried.
    pub fn new(source: F) -> Self {
        Negated { source }
    }

    /// Return a reference to the wrapped distribution
    pub fn source(&self) -> &F {
        &self.source
    }

    /// Return a mutable reference to the wrapped distribution
    pub fn source_mut(&mut self) -> &mut F {
        &mut self.source
    }

    /// Unwrap the source distribution
    pub fn into_inner(self) -> F {
        self.source
    }
}

impl<F: fmt::Display> fmt::Display for Negated<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-({})", self.source)
    }
}

impl<F: FrozenRv> FrozenRv for Negated<F> {
    type Dist = F::Dist;

    fn dist(&self) -> &F::Dist {
        self.source.dist()
    }

    fn random_state(&self) -> &RandomState {
        self.source.random_state()
    }

    fn random_state_mut(&mut self) -> &mut RandomState {
        self.source.random_state_mut()
    }

    fn args(&self) -> Vec<f64> {
        self.source.args()
    }

    fn kwds(&self) -> Vec<(&'static str, f64)> {
        self.source.kwds()
    }

    fn a(&self) -> f64 {
        -self.source.b()
    }

    fn b(&self) -> f64 {
        -self.source.a()
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        self.source.pdf(-x)
    }

    fn logpdf(&self, x: f64) -> Result<f64> {
        self.source.logpdf(-x)
    }

    fn pmf(&self, x: f64) -> Result<f64> {
        self.source.pmf(-x)
    }

    fn logpmf(&self, x: f64) -> Result<f64> {
        self.source.logpmf(-x)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.source.sf(-x)
    }

    fn sf(&self, x: f64) -> f64 {
        self.source.cdf(-x)
    }

    fn logcdf(&self, x: f64) -> f64 {
        self.source.logsf(-x)
    }

    fn logsf(&self, x: f64) -> f64 {
        self.source.logcdf(-x)
    }

    fn ppf(&self, q: f64) -> f64 {
        -self.source.isf(q)
    }

    fn isf(&self, q: f64) -> f64 {
        -self.source.ppf(q)
    }

    fn rv(&mut self) -> f64 {
        -self.source.rv()
    }

    fn rvs(&mut self, size: usize) -> Vec<f64> {
        self.source.rvs(size).into_iter().map(|x| -x).collect()
    }

    fn mean(&self) -> f64 {
        -self.source.mean()
    }

    fn median(&self) -> f64 {
        -self.source.median()
    }

    fn var(&self) -> f64 {
        self.source.var()
    }

    fn std(&self) -> f64 {
        self.source.std()
    }

    fn entropy(&self) -> f64 {
        self.source.entropy()
    }

    fn expect(&self) -> f64 {
        -self.source.expect()
    }

    fn expect_with<G: Fn(f64) -> f64>(&self, g: G) -> f64 {
        self.source.expect_with(|x| g(-x))
    }

    fn interval(&self, alpha: f64) -> (f64, f64) {
        let (l, r) = self.source.interval(alpha);
        (-r, -l)
    }

    fn stats(&self) -> (f64, f64) {
        let (mean, var) = self.source.stats();
        (-mean, var)
    }

    fn moment(&self, n: u32) -> f64 {
        let m = self.source.moment(n);
        if n % 2 == 1 {
            -m
        } else {
            m
        }
    }

    fn call(&mut self, op: Op, args: &[f64]) -> Result<Value> {
        op.rule().apply(op, &mut self.source, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::{Binomial, Exponential, Frozen, Gaussian, Histogram};
    use crate::result::DistError;
    use crate::test_basic_impls;

    const TOL: f64 = 1E-12;

    fn expon() -> Frozen<Exponential> {
        Frozen::with_seed(Exponential::new(2.0).unwrap(), 0xABCD)
    }

    test_basic_impls!(expon().negated());

    #[test]
    fn display_wraps_source() {
        let neg = Frozen::with_seed(Gaussian::standard(), 1).negated();
        assert_eq!(neg.to_string(), "-(N(μ: 0, σ: 1))");
    }

    #[test]
    fn bounds_swap_and_flip() {
        let neg = expon().negated();
        assert_eq!(neg.a(), f64::NEG_INFINITY);
        assert_eq!(neg.b(), -0.0);
    }

    #[test]
    fn density_of_reflected_point() {
        let fx = expon();
        let neg = fx.clone().negated();
        assert_eq!(neg.pdf(-0.7), fx.pdf(0.7));
        assert_eq!(neg.pdf(0.7), Ok(0.0));
        assert_eq!(neg.logpdf(0.7), Ok(f64::NEG_INFINITY));
    }

    #[test]
    fn cdf_uses_source_survival() {
        let fx = expon();
        let neg = fx.clone().negated();
        assert_eq!(neg.cdf(-1.0), fx.sf(1.0));
        assert_eq!(neg.sf(-1.0), fx.cdf(1.0));
        assert_eq!(neg.logcdf(-1.0), fx.logsf(1.0));
        assert_eq!(neg.logsf(-1.0), fx.logcdf(1.0));
        assert::close(neg.cdf(-1.0), (-2.0_f64).exp(), TOL);
    }

    #[test]
    fn quantiles_swap() {
        let fx = expon();
        let neg = fx.clone().negated();
        assert_eq!(neg.ppf(0.25), -fx.isf(0.25));
        assert_eq!(neg.isf(0.25), -fx.ppf(0.25));
        assert::close(neg.cdf(neg.ppf(0.25)), 0.25, TOL);
    }

    #[test]
    fn odd_moments_flip() {
        let fx = expon();
        let neg = fx.clone().negated();
        for n in 0..6 {
            let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
            assert_eq!(neg.moment(n), sign * fx.moment(n));
        }
    }

    #[test]
    fn expect_with_reflects_argument() {
        let fx = expon();
        let neg = fx.clone().negated();
        let e2 = neg.expect_with(|x| x * x);
        assert::close(e2, fx.moment(2), 1E-8);
        let e1 = neg.expect_with(|x| x);
        assert::close(e1, neg.expect(), 1E-12);
    }

    #[test]
    fn samples_are_negated_draws() {
        let mut fx = expon();
        let mut neg = fx.clone().negated();
        let xs = fx.rvs(20);
        let ys = neg.rvs(20);
        assert!(xs.iter().zip(ys.iter()).all(|(x, y)| *x == -*y));
        assert_eq!(neg.rv(), -fx.rv());
    }

    #[test]
    fn clone_samples_independently() {
        let mut neg = expon().negated();
        let mut copy = neg.clone();
        let mut witness = neg.clone();

        let _burn = copy.rvs(100);
        assert_eq!(neg.rvs(10), witness.rvs(10));
    }

    #[test]
    fn random_state_is_shared_with_source() {
        let mut neg = expon().negated();
        let _x = neg.rv();
        assert_eq!(neg.random_state(), neg.source().random_state());
    }

    #[test]
    fn args_and_kwds_describe_the_source() {
        let neg =
            Frozen::with_seed(Binomial::new(5, 0.5).unwrap(), 1).negated();
        assert_eq!(neg.args(), vec![5.0, 0.5]);
        assert!(neg.kwds().is_empty());

        let neg = expon().negated();
        assert!(neg.args().is_empty());
        assert_eq!(neg.kwds(), vec![("scale", 0.5)]);
        assert_eq!(neg.dist(), &Exponential::new(2.0).unwrap());
    }

    #[test]
    fn source_errors_propagate_unchanged() {
        let fx = expon();
        let neg = fx.clone().negated();
        assert_eq!(neg.pmf(1.0), fx.pmf(-1.0));
        assert_eq!(neg.pmf(1.0), Err(DistError::Undefined { op: Op::Pmf }));
    }

    #[test]
    fn call_agrees_with_typed_methods() {
        let mut neg = Frozen::with_seed(
            Histogram::new(vec![-1.0, 0.0, 2.0, 3.0], &[1.0, 4.0, 2.0])
                .unwrap(),
            3,
        )
        .negated();

        assert_eq!(
            neg.call(Op::Cdf, &[-0.5]),
            Ok(Value::Scalar(neg.cdf(-0.5)))
        );
        assert_eq!(
            neg.call(Op::Ppf, &[0.3]),
            Ok(Value::Scalar(neg.ppf(0.3)))
        );
        assert_eq!(
            neg.call(Op::Interval, &[0.5]),
            Ok(Value::Pair(neg.interval(0.5).0, neg.interval(0.5).1))
        );
        assert_eq!(
            neg.call(Op::Moment, &[3.0]),
            Ok(Value::Scalar(neg.moment(3)))
        );
    }

    #[test]
    fn unknown_query_is_not_implemented() {
        let mut neg = expon().negated();
        assert_eq!(
            neg.query("foobar", &[]),
            Err(DistError::NotImplemented {
                name: String::from("foobar")
            })
        );
    }

    #[test]
    fn double_negation_is_identity() {
        let fx = Frozen::with_seed(Gaussian::new(1.5, 0.5).unwrap(), 9);
        let neg2 = fx.clone().negated().negated();
        assert_eq!(neg2.mean(), fx.mean());
        assert_eq!(neg2.cdf(1.0), fx.cdf(1.0));
        assert_eq!(neg2.interval(0.8), fx.interval(0.8));
        assert_eq!(neg2.moment(3), fx.moment(3));
    }

    use crate::test_negated_bounds;
    use crate::test_negated_cdf;
    use crate::test_negated_density;
    use crate::test_negated_invcdf;
    use crate::test_negated_method;
    use crate::test_negated_moments;

    mod gaussian {
        use super::*;

        test_negated_method!(Gaussian::new(2.0, 4.0).unwrap(), mean, flip);
        test_negated_method!(Gaussian::new(2.0, 4.0).unwrap(), median, flip);
        test_negated_method!(Gaussian::new(2.0, 4.0).unwrap(), var, keep);
        test_negated_method!(Gaussian::new(2.0, 4.0).unwrap(), entropy, keep);
        test_negated_density!(Gaussian::new(2.0, 4.0).unwrap(), pdf);
        test_negated_cdf!(Gaussian::new(2.0, 4.0).unwrap());
        test_negated_invcdf!(Gaussian::new(2.0, 4.0).unwrap());
        test_negated_bounds!(Gaussian::new(2.0, 4.0).unwrap());
        test_negated_moments!(Gaussian::new(2.0, 4.0).unwrap());
    }

    mod binomial {
        use super::*;

        test_negated_method!(Binomial::new(7, 0.3).unwrap(), mean, flip);
        test_negated_method!(Binomial::new(7, 0.3).unwrap(), median, flip);
        test_negated_method!(Binomial::new(7, 0.3).unwrap(), var, keep);
        test_negated_method!(Binomial::new(7, 0.3).unwrap(), entropy, keep);
        test_negated_density!(Binomial::new(7, 0.3).unwrap(), pmf);
        test_negated_cdf!(Binomial::new(7, 0.3).unwrap());
        test_negated_invcdf!(Binomial::new(7, 0.3).unwrap());
        test_negated_bounds!(Binomial::new(7, 0.3).unwrap());
        test_negated_moments!(Binomial::new(7, 0.3).unwrap());
    }

    mod histogram {
        use super::*;

        fn hist() -> Histogram {
            Histogram::new(vec![-1.0, 0.0, 2.0, 3.0], &[1.0, 4.0, 2.0])
                .unwrap()
        }

        test_negated_method!(hist(), mean, flip);
        test_negated_method!(hist(), median, flip);
        test_negated_method!(hist(), var, keep);
        test_negated_method!(hist(), entropy, keep);
        test_negated_density!(hist(), pdf);
        test_negated_cdf!(hist());
        test_negated_invcdf!(hist());
        test_negated_bounds!(hist());
        test_negated_moments!(hist());
    }
}
