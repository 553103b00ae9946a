//! Mathematical constants

/// 0.5 ln(2π)
pub const HALF_LN_2PI: f64 = 0.918_938_533_204_672_7;
/// 0.5 ln(2πe)
pub const HALF_LN_2PI_E: f64 = 1.418_938_533_204_672_7;
/// Probability mass left outside the integration bounds of distributions
/// with unbounded support
pub const QUAD_TAIL_MASS: f64 = 1E-12;
