// One step of Halley's method and the per-pixel convergence loop
//
// z' = z - (f/f') / (1 - f f'' / (2 f'^2))

use num::complex::Complex64;

use crate::complex::{real, div};
use crate::functions::AnalyticFunction;

// Compared against the change in squared magnitude between steps
pub const CONVERGENCE_EPSILON : f64 = 1e-5;
pub const DIVERGENCE_LIMIT : f64 = 1e10;

pub fn halley_step(z : Complex64, function : &AnalyticFunction) -> Complex64 {
    let fz = (function.f)(z);
    let dfz = (function.df)(z);
    let d2fz = (function.d2f)(z);
    let newton = div(fz, dfz);
    let term = div(fz * d2fz, real(2.0) * (dfz * dfz));
    let correction = div(newton, real(1.0) - term);
    z - correction
}

// Number of steps until successive squared magnitudes agree, or max_iterations
// if the orbit runs off to infinity, goes NaN or never settles.
//
// Note the test is on |z|² rather than the step size, so a big jump between two
// points of similar modulus counts as converged. The colouring depends on this.
pub fn iterations_to_converge(
    function : &AnalyticFunction,
    start : Complex64,
    max_iterations : usize
) -> usize {
    let mut z = start;
    let mut iterations = 0;
    let mut prev_mag = 0.0;
    for k in 0..max_iterations {
        z = halley_step(z, function);
        let mag = z.norm_sqr();
        if k > 0 && (mag - prev_mag).abs() < CONVERGENCE_EPSILON {
            return k;
        }
        prev_mag = mag;
        iterations = k + 1;
        if mag > DIVERGENCE_LIMIT || mag.is_nan() {
            return max_iterations;
        }
    }
    iterations
}

#[cfg(test)]
mod tests {
    use crate::functions::lookup;

    use super::*;

    #[test]
    fn test_step_moves_towards_root() {
        let cubic = lookup("z³ - 1").unwrap();
        let z = Complex64::new(2.0, 0.0);
        let next = halley_step(z, cubic);
        let root = real(1.0);
        assert!((next - root).norm() < (z - root).norm());
        assert!(next.im.abs() < 1e-12);
    }

    #[test]
    fn test_step_fixes_root() {
        let cubic = lookup("z³ - 1").unwrap();
        assert_eq!(halley_step(real(1.0), cubic), real(1.0));
    }

    #[test]
    fn test_converges_quickly_near_root() {
        let cubic = lookup("z³ - 1").unwrap();
        let n = iterations_to_converge(cubic, Complex64::new(1.2, 0.1), 50);
        assert!(n > 0 && n < 10, "took {} steps", n);
    }

    #[test]
    fn test_critical_point_is_capped() {
        // f'(0) = 0 so the first step divides by zero
        let cubic = lookup("z³ - 1").unwrap();
        assert_eq!(iterations_to_converge(cubic, real(0.0), 50), 50);
    }

    #[test]
    fn test_pole_does_not_panic() {
        let rational = lookup("(z³ - 2)/(z - 1)").unwrap();
        let n = iterations_to_converge(rational, real(1.0), 30);
        assert!(n <= 30);
    }

    #[test]
    fn test_result_never_exceeds_max() {
        for function in crate::functions::FUNCTIONS.iter() {
            for &(re, im) in [(0.0, 0.0), (2.5, -1.0), (-0.3, 0.9), (40.0, 40.0)].iter() {
                let n = iterations_to_converge(function, Complex64::new(re, im), 25);
                assert!(n <= 25, "{} gave {}", function.name, n);
            }
        }
    }
}
