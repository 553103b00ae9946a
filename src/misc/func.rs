use special::Gamma as _;

/// Natural logarithm of binomial coefficent, ln nCk
///
/// # Example
///
/// ```rust
/// use negated_rv::misc::ln_binom;
///
/// assert!((ln_binom(4.0, 2.0) - 6.0_f64.ln()).abs() < 1E-12);
/// ```
pub fn ln_binom(n: f64, k: f64) -> f64 {
    (n + 1.0).ln_gamma().0 - (k + 1.0).ln_gamma().0 - (n - k + 1.0).ln_gamma().0
}

/// `x * ln(y)`, taken to be zero when `x` is zero
///
/// ```rust
/// use negated_rv::misc::xlogy;
///
/// assert_eq!(xlogy(0.0, 0.0), 0.0);
/// assert_eq!(xlogy(2.0, 1.0), 0.0);
/// ```
pub fn xlogy(x: f64, y: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x * y.ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1E-12;

    #[test]
    fn ln_binom_of_edges_is_zero() {
        assert::close(ln_binom(5.0, 0.0), 0.0, TOL);
        assert::close(ln_binom(5.0, 5.0), 0.0, TOL);
    }

    #[test]
    fn ln_binom_value() {
        assert::close(ln_binom(5.0, 2.0), 10.0_f64.ln(), TOL);
    }

    #[test]
    fn xlogy_of_zero_probability() {
        assert_eq!(xlogy(0.0, 0.0), 0.0);
        assert_eq!(xlogy(1.0, 0.0), f64::NEG_INFINITY);
    }
}
