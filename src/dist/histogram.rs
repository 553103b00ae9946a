//! Piecewise-uniform distribution built from a histogram
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use itertools::{Itertools, MinMaxResult};
use rand::Rng;
use std::fmt;

use crate::impl_display;
use crate::misc::{quad, xlogy};
use crate::traits::*;

/// Default number of bins used by [`Histogram::from_samples_default`]
pub const DEFAULT_N_BINS: usize = 10;

/// A continuous distribution that is uniform within each bin of a
/// histogram, with bin masses proportional to the counts.
///
/// The density is defined on the half-open bins `[e_i, e_{i+1})`, so the
/// density at the last edge is zero. The CDF is piecewise linear and the
/// quantile function interpolates it.
///
/// ```rust
/// use negated_rv::prelude::*;
///
/// let hist = Histogram::new(vec![0.0, 1.0, 3.0], &[1.0, 1.0]).unwrap();
///
/// assert_eq!(hist.pdf(&0.5), 0.5);
/// assert_eq!(hist.pdf(&2.0), 0.25);
/// assert_eq!(hist.cdf(&1.0), 0.5);
/// assert_eq!(hist.invcdf(0.75), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Histogram {
    /// Bin edges, strictly increasing
    edges: Vec<f64>,
    /// Probability mass of each bin
    masses: Vec<f64>,
    /// Cumulative mass at each edge
    cum: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum HistogramError {
    /// Fewer than two edges were supplied
    TooFewEdges { n_edges: usize },
    /// There must be exactly one fewer count than edges
    CountMismatch { n_edges: usize, n_counts: usize },
    /// An edge is infinite or NaN
    EdgeNotFinite { ix: usize, edge: f64 },
    /// Edge `ix` is not greater than the one before it
    EdgesNotIncreasing { ix: usize },
    /// A count is less than zero
    CountNegative { ix: usize, count: f64 },
    /// A count is infinite or NaN
    CountNotFinite { ix: usize, count: f64 },
    /// All counts are zero
    ZeroTotal,
    /// No samples were given
    EmptySamples,
    /// A sample is infinite or NaN
    SampleNotFinite { x: f64 },
    /// Zero bins were requested
    ZeroBins,
}

#[derive(Clone, Copy, Debug)]
enum Pos {
    Nan,
    Below,
    Above,
    In(usize),
}

impl Histogram {
    /// Create a histogram distribution from bin edges and per-bin counts.
    ///
    /// The counts need not be normalized.
    pub fn new(edges: Vec<f64>, counts: &[f64]) -> Result<Self, HistogramError> {
        if edges.len() < 2 {
            return Err(HistogramError::TooFewEdges {
                n_edges: edges.len(),
            });
        }
        if counts.len() + 1 != edges.len() {
            return Err(HistogramError::CountMismatch {
                n_edges: edges.len(),
                n_counts: counts.len(),
            });
        }
        if let Some((ix, &edge)) =
            edges.iter().find_position(|e| !e.is_finite())
        {
            return Err(HistogramError::EdgeNotFinite { ix, edge });
        }
        if let Some((ix, _)) = edges
            .iter()
            .tuple_windows()
            .find_position(|(lo, hi)| hi <= lo)
        {
            return Err(HistogramError::EdgesNotIncreasing { ix: ix + 1 });
        }
        for (ix, &count) in counts.iter().enumerate() {
            if !count.is_finite() {
                return Err(HistogramError::CountNotFinite { ix, count });
            } else if count < 0.0 {
                return Err(HistogramError::CountNegative { ix, count });
            }
        }
        let total: f64 = counts.iter().sum();
        if total <= 0.0 {
            return Err(HistogramError::ZeroTotal);
        }
        Ok(Histogram::new_unchecked(edges, counts))
    }

    /// Creates a new Histogram without checking whether the edges and counts
    /// are valid.
    pub fn new_unchecked(edges: Vec<f64>, counts: &[f64]) -> Self {
        let total: f64 = counts.iter().sum();
        let masses: Vec<f64> = counts.iter().map(|c| c / total).collect();

        let mut cum = Vec::with_capacity(edges.len());
        cum.push(0.0);
        let mut acc = 0.0;
        for m in &masses {
            acc += m;
            cum.push(acc);
        }
        // Avoid round-off leaving the total short of one
        if let Some(last) = cum.last_mut() {
            *last = 1.0;
        }

        Histogram { edges, masses, cum }
    }

    /// Bin `xs` into `n_bins` equal-width bins spanning their range.
    ///
    /// If every sample is identical the range is taken to be
    /// `[x - 0.5, x + 0.5]`. The maximum sample falls in the last bin.
    ///
    /// ```rust
    /// use negated_rv::dist::Histogram;
    ///
    /// let hist = Histogram::from_samples(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
    ///
    /// assert_eq!(hist.edges(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(hist.masses(), &[0.2, 0.2, 0.2, 0.4]);
    /// ```
    pub fn from_samples(
        xs: &[f64],
        n_bins: usize,
    ) -> Result<Self, HistogramError> {
        if n_bins == 0 {
            return Err(HistogramError::ZeroBins);
        }
        if let Some(&x) = xs.iter().find(|x| !x.is_finite()) {
            return Err(HistogramError::SampleNotFinite { x });
        }
        let (lo, hi) = match xs.iter().copied().minmax() {
            MinMaxResult::NoElements => {
                return Err(HistogramError::EmptySamples)
            }
            MinMaxResult::OneElement(x) => (x - 0.5, x + 0.5),
            MinMaxResult::MinMax(lo, hi) if lo == hi => (lo - 0.5, hi + 0.5),
            MinMaxResult::MinMax(lo, hi) => (lo, hi),
        };

        let width = (hi - lo) / n_bins as f64;
        let mut edges: Vec<f64> = (0..n_bins)
            .map(|i| (i as f64).mul_add(width, lo))
            .collect();
        edges.push(hi);

        let mut counts = vec![0.0; n_bins];
        for &x in xs {
            let ix = (((x - lo) / width) as usize).min(n_bins - 1);
            counts[ix] += 1.0;
        }

        Histogram::new(edges, &counts)
    }

    /// Bin `xs` into the default number of bins
    pub fn from_samples_default(xs: &[f64]) -> Result<Self, HistogramError> {
        Histogram::from_samples(xs, DEFAULT_N_BINS)
    }

    /// Bin edges
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Normalized bin masses
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Number of bins
    pub fn n_bins(&self) -> usize {
        self.masses.len()
    }

    fn lower(&self) -> f64 {
        self.edges[0]
    }

    fn upper(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    fn width(&self, ix: usize) -> f64 {
        self.edges[ix + 1] - self.edges[ix]
    }

    fn pos(&self, x: f64) -> Pos {
        if x.is_nan() {
            Pos::Nan
        } else if x < self.lower() {
            Pos::Below
        } else if x >= self.upper() {
            Pos::Above
        } else {
            Pos::In(self.edges.partition_point(|&e| e <= x) - 1)
        }
    }

    // (lower edge, upper edge, mass) of each bin
    fn bins(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.edges
            .iter()
            .tuple_windows()
            .zip(self.masses.iter())
            .map(|((&lo, &hi), &m)| (lo, hi, m))
    }
}

impl From<&Histogram> for String {
    fn from(hist: &Histogram) -> String {
        format!(
            "Histogram(bins: {}, range: [{}, {}])",
            hist.n_bins(),
            hist.lower(),
            hist.upper()
        )
    }
}

impl_display!(Histogram);

impl Family for Histogram {
    const KIND: DensityKind = DensityKind::Continuous;

    fn name(&self) -> &'static str {
        "rv_histogram"
    }
}

impl HasDensity<f64> for Histogram {
    fn f(&self, x: &f64) -> f64 {
        match self.pos(*x) {
            Pos::Nan => f64::NAN,
            Pos::In(ix) => self.masses[ix] / self.width(ix),
            Pos::Below | Pos::Above => 0.0,
        }
    }

    fn ln_f(&self, x: &f64) -> f64 {
        self.f(x).ln()
    }
}

impl ContinuousDistr<f64> for Histogram {}

impl Sampleable<f64> for Histogram {
    fn draw<R: Rng>(&self, rng: &mut R) -> f64 {
        self.invcdf(rng.gen::<f64>())
    }
}

impl Support<f64> for Histogram {
    fn support(&self) -> (f64, f64) {
        (self.lower(), self.upper())
    }

    fn supports(&self, x: &f64) -> bool {
        self.lower() <= *x && *x <= self.upper()
    }
}

impl Cdf<f64> for Histogram {
    fn cdf(&self, x: &f64) -> f64 {
        match self.pos(*x) {
            Pos::Nan => f64::NAN,
            Pos::Below => 0.0,
            Pos::Above => 1.0,
            Pos::In(ix) => {
                let t = (x - self.edges[ix]) / self.width(ix);
                self.masses[ix].mul_add(t, self.cum[ix])
            }
        }
    }
}

impl InverseCdf<f64> for Histogram {
    fn invcdf(&self, p: f64) -> f64 {
        if p <= 0.0 {
            return self.lower();
        } else if p >= 1.0 {
            return self.upper();
        }
        // first edge whose cumulative mass reaches p
        let jx = self
            .cum
            .partition_point(|&c| c < p)
            .clamp(1, self.cum.len() - 1);
        let ix = jx - 1;
        let m = self.masses[ix];
        if m <= 0.0 {
            self.edges[jx]
        } else {
            let t = (p - self.cum[ix]) / m;
            t.mul_add(self.width(ix), self.edges[ix])
        }
    }
}

impl Mean<f64> for Histogram {
    fn mean(&self) -> Option<f64> {
        let m = self.bins().map(|(lo, hi, m)| m * (lo + hi) / 2.0).sum();
        Some(m)
    }
}

impl Median<f64> for Histogram {
    fn median(&self) -> Option<f64> {
        Some(self.invcdf(0.5))
    }
}

impl Variance<f64> for Histogram {
    fn variance(&self) -> Option<f64> {
        self.mean().map(|mean| {
            self.bins()
                .map(|(lo, hi, m)| {
                    let w = hi - lo;
                    let d = (lo + hi) / 2.0 - mean;
                    m * d.mul_add(d, w * w / 12.0)
                })
                .sum()
        })
    }
}

impl Entropy for Histogram {
    fn entropy(&self) -> f64 {
        -self.bins().map(|(lo, hi, m)| xlogy(m, m / (hi - lo))).sum::<f64>()
    }
}

impl Moment for Histogram {
    fn moment(&self, n: u32) -> Option<f64> {
        let k = f64::from(n) + 1.0;
        let m = self
            .bins()
            .map(|(lo, hi, m)| {
                m * (hi.powf(k) - lo.powf(k)) / (k * (hi - lo))
            })
            .sum();
        Some(m)
    }
}

impl QuadBounds for Histogram {
    fn quad_bounds(&self) -> (f64, f64) {
        self.support()
    }
}

impl Expectation for Histogram {
    fn expect_with<G: Fn(f64) -> f64>(&self, g: G) -> f64 {
        self.bins()
            .filter(|&(_, _, m)| m > 0.0)
            .map(|(lo, hi, m)| m / (hi - lo) * quad(&g, lo, hi))
            .sum()
    }
}

impl std::error::Error for HistogramError {}

impl fmt::Display for HistogramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewEdges { n_edges } => {
                write!(f, "at least two edges are needed, got {n_edges}")
            }
            Self::CountMismatch { n_edges, n_counts } => write!(
                f,
                "{n_edges} edges require {} counts, got {n_counts}",
                n_edges.saturating_sub(1)
            ),
            Self::EdgeNotFinite { ix, edge } => {
                write!(f, "edge {ix} ({edge}) is not finite")
            }
            Self::EdgesNotIncreasing { ix } => {
                write!(f, "edge {ix} is not greater than the edge before it")
            }
            Self::CountNegative { ix, count } => {
                write!(f, "count {ix} ({count}) is less than zero")
            }
            Self::CountNotFinite { ix, count } => {
                write!(f, "count {ix} ({count}) is not finite")
            }
            Self::ZeroTotal => write!(f, "counts sum to zero"),
            Self::EmptySamples => write!(f, "no samples were given"),
            Self::SampleNotFinite { x } => {
                write!(f, "sample ({x}) is not finite")
            }
            Self::ZeroBins => write!(f, "the number of bins must be positive"),
        }
    }
}
