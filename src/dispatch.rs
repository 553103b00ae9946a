//! Name-keyed queries and the negation rule table.
//!
//! The query vocabulary is closed: [`Op`] enumerates every operation a
//! [`FrozenRv`] answers. Each operation is bound to exactly one [`Rule`]
//! describing how its answer for `-X` is obtained from the answer for `X`.
//! [`Rule::apply`] is the single interpreter of that table.
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::dist::RandomState;
use crate::result::{DistError, Result};
use crate::traits::FrozenRv;

/// Largest sample size accepted by a name-keyed `rvs` query
pub const MAX_RVS_SIZE: u64 = 1 << 24;

/// A named statistical query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "lowercase"))]
pub enum Op {
    Pdf,
    Pmf,
    LogPdf,
    LogPmf,
    Cdf,
    Sf,
    LogCdf,
    LogSf,
    Ppf,
    Isf,
    Rvs,
    Mean,
    Median,
    Expect,
    Std,
    Var,
    Entropy,
    #[cfg_attr(feature = "serde1", serde(rename = "random_state"))]
    RandomState,
    Dist,
    Args,
    Kwds,
    Interval,
    Stats,
    Moment,
}

/// Which side of a cross-swapped query carries the sign flip
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum Side {
    /// Negate the query point before asking the source
    Input,
    /// Negate the source's answer
    Output,
}

/// How the answer for `-X` is derived from the answer for `X`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum Rule {
    /// `f'(x) = f(-x)`
    NegateInput,
    /// `f'(..) = -f(..)`
    NegateOutput,
    /// `f'(..) = f(..)`
    PassThrough,
    /// Answer with the complementary operation, flipping the given side
    CrossSwap(Op, Side),
    /// `(a, b) -> (-b, -a)`
    IntervalReflect,
    /// `(mean, var) -> (-mean, var)`
    StatsReflect,
    /// `m_n -> (-1)^n m_n`
    MomentReflect,
}

impl Op {
    /// Every supported operation
    pub const ALL: [Op; 24] = [
        Op::Pdf,
        Op::Pmf,
        Op::LogPdf,
        Op::LogPmf,
        Op::Cdf,
        Op::Sf,
        Op::LogCdf,
        Op::LogSf,
        Op::Ppf,
        Op::Isf,
        Op::Rvs,
        Op::Mean,
        Op::Median,
        Op::Expect,
        Op::Std,
        Op::Var,
        Op::Entropy,
        Op::RandomState,
        Op::Dist,
        Op::Args,
        Op::Kwds,
        Op::Interval,
        Op::Stats,
        Op::Moment,
    ];

    /// The name the operation is queried by
    pub const fn as_str(self) -> &'static str {
        match self {
            Op::Pdf => "pdf",
            Op::Pmf => "pmf",
            Op::LogPdf => "logpdf",
            Op::LogPmf => "logpmf",
            Op::Cdf => "cdf",
            Op::Sf => "sf",
            Op::LogCdf => "logcdf",
            Op::LogSf => "logsf",
            Op::Ppf => "ppf",
            Op::Isf => "isf",
            Op::Rvs => "rvs",
            Op::Mean => "mean",
            Op::Median => "median",
            Op::Expect => "expect",
            Op::Std => "std",
            Op::Var => "var",
            Op::Entropy => "entropy",
            Op::RandomState => "random_state",
            Op::Dist => "dist",
            Op::Args => "args",
            Op::Kwds => "kwds",
            Op::Interval => "interval",
            Op::Stats => "stats",
            Op::Moment => "moment",
        }
    }

    /// The negation rule bound to this operation
    pub const fn rule(self) -> Rule {
        match self {
            Op::Pdf | Op::Pmf | Op::LogPdf | Op::LogPmf => Rule::NegateInput,
            Op::Rvs | Op::Mean | Op::Median | Op::Expect => Rule::NegateOutput,
            Op::Std
            | Op::Var
            | Op::Entropy
            | Op::RandomState
            | Op::Dist
            | Op::Args
            | Op::Kwds => Rule::PassThrough,
            Op::Cdf => Rule::CrossSwap(Op::Sf, Side::Input),
            Op::Sf => Rule::CrossSwap(Op::Cdf, Side::Input),
            Op::LogCdf => Rule::CrossSwap(Op::LogSf, Side::Input),
            Op::LogSf => Rule::CrossSwap(Op::LogCdf, Side::Input),
            Op::Ppf => Rule::CrossSwap(Op::Isf, Side::Output),
            Op::Isf => Rule::CrossSwap(Op::Ppf, Side::Output),
            Op::Interval => Rule::IntervalReflect,
            Op::Stats => Rule::StatsReflect,
            Op::Moment => Rule::MomentReflect,
        }
    }

    /// Smallest and largest number of positional arguments accepted
    pub const fn arity(self) -> (usize, usize) {
        match self {
            Op::Pdf
            | Op::Pmf
            | Op::LogPdf
            | Op::LogPmf
            | Op::Cdf
            | Op::Sf
            | Op::LogCdf
            | Op::LogSf
            | Op::Ppf
            | Op::Isf
            | Op::Interval
            | Op::Moment => (1, 1),
            Op::Rvs => (0, 1),
            _ => (0, 0),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Op {
    type Err = DistError;

    fn from_str(s: &str) -> Result<Self> {
        Op::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| {
                log::debug!("rejecting unsupported query `{s}`");
                DistError::NotImplemented {
                    name: s.to_owned(),
                }
            })
    }
}

/// The answer to a name-keyed query
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(f64),
    Pair(f64, f64),
    Samples(Vec<f64>),
    Args(Vec<f64>),
    Kwds(Vec<(&'static str, f64)>),
    /// Display form of the parameterization handle
    Dist(String),
    RandomState(RandomState),
}

impl Value {
    /// Short description of the shape of the value
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Pair(..) => "pair",
            Value::Samples(_) => "samples",
            Value::Args(_) => "args",
            Value::Kwds(_) => "kwds",
            Value::Dist(_) => "dist",
            Value::RandomState(_) => "random state",
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match self {
            Value::Pair(a, b) => Some((*a, *b)),
            _ => None,
        }
    }

    pub fn into_samples(self) -> Option<Vec<f64>> {
        match self {
            Value::Samples(xs) => Some(xs),
            _ => None,
        }
    }

    /// Flip the sign of a numeric answer
    fn negate(self, op: Op) -> Result<Value> {
        match self {
            Value::Scalar(x) => Ok(Value::Scalar(-x)),
            Value::Samples(xs) => {
                Ok(Value::Samples(xs.into_iter().map(|x| -x).collect()))
            }
            other => Err(unexpected(op, &other)),
        }
    }
}

fn unexpected(op: Op, value: &Value) -> DistError {
    DistError::UnexpectedValue {
        op,
        found: value.kind(),
    }
}

fn check_arity(name: &'static str, (min, max): (usize, usize), args: &[f64]) -> Result<()> {
    let got = args.len();
    if got < min || got > max {
        Err(DistError::Arity {
            name,
            min,
            max,
            got,
        })
    } else {
        Ok(())
    }
}

/// Parse a non-negative integer argument no greater than the op allows
fn count(op: Op, x: f64) -> Result<u64> {
    let max = match op {
        Op::Rvs => MAX_RVS_SIZE,
        _ => u64::from(u32::MAX),
    };
    if x.is_finite() && x >= 0.0 && x.fract() == 0.0 && x <= max as f64 {
        Ok(x as u64)
    } else {
        Err(DistError::InvalidArgument { op, value: x })
    }
}

/// Copy of `args` with the query point (first argument) negated
fn negate_point(args: &[f64]) -> Vec<f64> {
    let mut flipped = args.to_vec();
    if let Some(x) = flipped.first_mut() {
        *x = -*x;
    }
    flipped
}

pub(crate) fn bound(
    name: &'static str,
    args: &[f64],
    value: f64,
) -> Result<Value> {
    check_arity(name, (0, 0), args)?;
    Ok(Value::Scalar(value))
}

/// Answer `op` by calling the typed method of the same name on `fx`
pub fn call_direct<F: FrozenRv>(
    fx: &mut F,
    op: Op,
    args: &[f64],
) -> Result<Value> {
    check_arity(op.as_str(), op.arity(), args)?;
    let x = args.first().copied();
    let point = x.unwrap_or(f64::NAN);

    let value = match op {
        Op::Pdf => Value::Scalar(fx.pdf(point)?),
        Op::Pmf => Value::Scalar(fx.pmf(point)?),
        Op::LogPdf => Value::Scalar(fx.logpdf(point)?),
        Op::LogPmf => Value::Scalar(fx.logpmf(point)?),
        Op::Cdf => Value::Scalar(fx.cdf(point)),
        Op::Sf => Value::Scalar(fx.sf(point)),
        Op::LogCdf => Value::Scalar(fx.logcdf(point)),
        Op::LogSf => Value::Scalar(fx.logsf(point)),
        Op::Ppf => Value::Scalar(fx.ppf(point)),
        Op::Isf => Value::Scalar(fx.isf(point)),
        Op::Rvs => match x {
            None => Value::Scalar(fx.rv()),
            Some(size) => Value::Samples(fx.rvs(count(op, size)? as usize)),
        },
        Op::Mean => Value::Scalar(fx.mean()),
        Op::Median => Value::Scalar(fx.median()),
        Op::Expect => Value::Scalar(fx.expect()),
        Op::Std => Value::Scalar(fx.std()),
        Op::Var => Value::Scalar(fx.var()),
        Op::Entropy => Value::Scalar(fx.entropy()),
        Op::RandomState => Value::RandomState(fx.random_state().clone()),
        Op::Dist => Value::Dist(fx.dist().to_string()),
        Op::Args => Value::Args(fx.args()),
        Op::Kwds => Value::Kwds(fx.kwds()),
        Op::Interval => {
            let (l, r) = fx.interval(point);
            Value::Pair(l, r)
        }
        Op::Stats => {
            let (mean, var) = fx.stats();
            Value::Pair(mean, var)
        }
        Op::Moment => Value::Scalar(fx.moment(count(op, point)? as u32)),
    };
    Ok(value)
}

impl Rule {
    /// Answer `op` for the negation of `source`.
    ///
    /// Errors raised by `source` are returned unchanged.
    pub fn apply<F: FrozenRv>(
        self,
        op: Op,
        source: &mut F,
        args: &[f64],
    ) -> Result<Value> {
        log::trace!("negated {op} via {self:?}");
        check_arity(op.as_str(), op.arity(), args)?;
        match self {
            Rule::NegateInput => source.call(op, &negate_point(args)),
            Rule::NegateOutput => source.call(op, args)?.negate(op),
            Rule::PassThrough => source.call(op, args),
            Rule::CrossSwap(complement, Side::Input) => {
                source.call(complement, &negate_point(args))
            }
            Rule::CrossSwap(complement, Side::Output) => {
                source.call(complement, args)?.negate(op)
            }
            Rule::IntervalReflect => match source.call(op, args)? {
                Value::Pair(l, r) => Ok(Value::Pair(-r, -l)),
                other => Err(unexpected(op, &other)),
            },
            Rule::StatsReflect => match source.call(op, args)? {
                Value::Pair(mean, var) => Ok(Value::Pair(-mean, var)),
                other => Err(unexpected(op, &other)),
            },
            Rule::MomentReflect => match source.call(op, args)? {
                Value::Scalar(m) => {
                    let n = count(op, args.first().copied().unwrap_or(f64::NAN))?;
                    Ok(Value::Scalar(if n % 2 == 1 { -m } else { m }))
                }
                other => Err(unexpected(op, &other)),
            },
        }
    }
}
