//! Numeric helpers shared by the samplers and moment formulas.

use crate::generator::derive;
use rand::RngCore;
use std::f64::consts::PI;

/// Largest magnitude at which every integer is exactly representable.
pub const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Uniform value in `[0, 1)` from one word, matching `Generator::next_f64`.
pub fn unit(rng: &mut dyn RngCore) -> f64 {
    derive::to_f64(rng.next_u64())
}

/// Uniform value in `[0, bound)` from one word, matching `Generator::next_below`.
pub fn below(rng: &mut dyn RngCore, bound: u64) -> u64 {
    derive::below(rng.next_u64(), bound)
}

/// Standard normal deviate via the Box-Muller transform (two words).
///
/// `u1` is taken from `(0, 1]` so the logarithm stays finite.
pub fn standard_normal(rng: &mut dyn RngCore) -> f64 {
    let u1 = 1.0 - unit(rng);
    let u2 = unit(rng);
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// `true` for finite values without a fractional part.
pub fn is_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// `true` for finite integers small enough to survive `f64` round trips.
pub fn is_exact_integer(value: f64) -> bool {
    is_integer(value) && value.abs() <= MAX_EXACT_INTEGER
}

const LANCZOS_G: f64 = 7.0;
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Gamma function by the Lanczos approximation (g = 7, n = 9).
pub fn gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula.
        PI / ((PI * x).sin() * gamma(1.0 - x))
    } else {
        let x = x - 1.0;
        let t = x + LANCZOS_G + 0.5;
        let series = LANCZOS[1..]
            .iter()
            .enumerate()
            .fold(LANCZOS[0], |acc, (i, c)| acc + c / (x + i as f64 + 1.0));
        (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_gamma_matches_factorials() {
        assert_relative_eq!(gamma(1.0), 1.0, max_relative = 1e-12);
        assert_relative_eq!(gamma(5.0), 24.0, max_relative = 1e-12);
        assert_relative_eq!(gamma(11.0), 3_628_800.0, max_relative = 1e-10);
        assert_relative_eq!(gamma(0.5), PI.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_integer_checks() {
        assert!(is_integer(-3.0));
        assert!(!is_integer(2.5));
        assert!(!is_integer(f64::INFINITY));
        assert!(!is_integer(f64::NAN));
        assert!(!is_exact_integer(1e17));
    }

    #[test]
    fn test_standard_normal_finite_on_zero_word() {
        let mut rng = StepRng::new(0, 0);
        let z = standard_normal(&mut rng);
        assert!(z.is_finite());
        assert_eq!(z, 0.0);
    }
}
