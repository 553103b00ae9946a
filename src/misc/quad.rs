/// Absolute tolerance used by [`quad`]
pub const QUAD_EPS: f64 = 1E-10;
/// Maximum number of bisections along any branch
const QUAD_MAX_DEPTH: u32 = 40;

fn simpsons_rule<F>(func: &F, a: f64, b: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let c = (a + b) / 2.0;
    let h3 = (b - a).abs() / 6.0;
    h3 * (func(a) + 4.0 * func(c) + func(b))
}

fn recursive_asr<F>(
    func: &F,
    a: f64,
    b: f64,
    eps: f64,
    whole: f64,
    depth: u32,
) -> f64
where
    F: Fn(f64) -> f64,
{
    let c = (a + b) / 2.0;
    let left = simpsons_rule(func, a, c);
    let right = simpsons_rule(func, c, b);
    let delta = left + right - whole;
    // a NaN or infinite integrand never converges
    if !delta.is_finite() || delta.abs() <= 15.0 * eps {
        left + right + delta / 15.0
    } else if depth == 0 {
        log::warn!(
            "quadrature reached max depth on [{a}, {b}] with error estimate {}",
            delta.abs() / 15.0
        );
        left + right + delta / 15.0
    } else {
        recursive_asr(func, a, c, eps / 2.0, left, depth - 1)
            + recursive_asr(func, c, b, eps / 2.0, right, depth - 1)
    }
}

/// Adaptive Simpson's quadrature with tolerance `eps`.
///
/// If a sub-interval cannot reach the tolerance within the depth limit, the
/// best estimate is used and a warning is logged. A non-finite estimate on a
/// sub-interval is returned as is, so NaN integrands give NaN.
pub fn quad_eps<F>(func: F, a: f64, b: f64, eps: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let whole = simpsons_rule(&func, a, b);
    recursive_asr(&func, a, b, eps, whole, QUAD_MAX_DEPTH)
}

/// Adaptive Simpson's quadrature
///
/// # Example
///
/// Integrate f: x<sup>2</sup> over the interval [0, 1].
///
/// ```
/// use negated_rv::misc::quad;
///
/// let func = |x: f64| x.powi(2);
/// let q = quad(func, 0.0, 1.0);
///
/// assert!((q - 1.0/3.0).abs() < 1E-8);
/// ```
pub fn quad<F>(func: F, a: f64, b: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    quad_eps(func, a, b, QUAD_EPS)
}
