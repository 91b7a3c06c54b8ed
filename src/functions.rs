// The fixed catalogue of analytic functions we can find basins for
//
// Each entry carries f, f' and f''. Where f'' has no tidy closed form it is a
// central difference of f' with a real step of 1e-4.

use num::complex::Complex64;

use crate::complex::{real, div, pow, sin, cos, exp, sinh, cosh};
use crate::halley::RenderError;

pub type ComplexMap = fn(Complex64) -> Complex64;

#[derive(Debug)]
pub struct AnalyticFunction {
    pub name : &'static str,
    pub f : ComplexMap,
    pub df : ComplexMap,
    pub d2f : ComplexMap,
    pub description : &'static str
}

const FINITE_DIFFERENCE_STEP : f64 = 1e-4;

fn central_difference(g : ComplexMap, z : Complex64) -> Complex64 {
    let h = FINITE_DIFFERENCE_STEP;
    let forward = g(z + real(h));
    let backward = g(z - real(h));
    div(forward - backward, real(2.0 * h))
}

// Derivative of the quotient n/d given n, n', d, d'
fn quotient_rule(n : Complex64, dn : Complex64, d : Complex64, dd : Complex64) -> Complex64 {
    div(dn * d - n * dd, d * d)
}

fn rational_a_df(z : Complex64) -> Complex64 {
    quotient_rule(
        pow(z, 2) + real(1.0),
        real(2.0) * z,
        pow(z, 3) - real(1.0),
        real(3.0) * pow(z, 2)
    )
}

fn rational_b_df(z : Complex64) -> Complex64 {
    quotient_rule(
        pow(z, 3) - real(2.0),
        real(3.0) * pow(z, 2),
        z - real(1.0),
        real(1.0)
    )
}

fn neg_exp(z : Complex64) -> Complex64 {
    exp(real(-1.0) * z)
}

pub static FUNCTIONS : [AnalyticFunction; 29] = [
    AnalyticFunction {
        name : "z³ - 1",
        f : |z| pow(z, 3) - real(1.0),
        df : |z| real(3.0) * pow(z, 2),
        d2f : |z| real(6.0) * z,
        description : "Classic 3-fold symmetry; clean, well-defined basins"
    },
    AnalyticFunction {
        name : "z⁴ - 1",
        f : |z| pow(z, 4) - real(1.0),
        df : |z| real(4.0) * pow(z, 3),
        d2f : |z| real(12.0) * pow(z, 2),
        description : "Fourfold symmetry; crisp, stable attraction basins"
    },
    AnalyticFunction {
        name : "z⁵ - 1",
        f : |z| pow(z, 5) - real(1.0),
        df : |z| real(5.0) * pow(z, 4),
        d2f : |z| real(20.0) * pow(z, 3),
        description : "Fivefold star-like patterns; more intricate boundaries"
    },
    AnalyticFunction {
        name : "z⁶ - 1",
        f : |z| pow(z, 6) - real(1.0),
        df : |z| real(6.0) * pow(z, 5),
        d2f : |z| real(30.0) * pow(z, 4),
        description : "Sixfold symmetry; general n-symmetric basins"
    },
    AnalyticFunction {
        name : "z⁷ - 1",
        f : |z| pow(z, 7) - real(1.0),
        df : |z| real(7.0) * pow(z, 6),
        d2f : |z| real(42.0) * pow(z, 5),
        description : "Sevenfold symmetry; good for exploring scaling"
    },
    AnalyticFunction {
        name : "z⁸ - 1",
        f : |z| pow(z, 8) - real(1.0),
        df : |z| real(8.0) * pow(z, 7),
        d2f : |z| real(56.0) * pow(z, 6),
        description : "Eightfold symmetry; intricate radial patterns"
    },
    AnalyticFunction {
        name : "z³ - 0.5",
        f : |z| pow(z, 3) - real(0.5),
        df : |z| real(3.0) * pow(z, 2),
        d2f : |z| real(6.0) * z,
        description : "Mildly broken symmetry; produces chaotic distortions"
    },
    AnalyticFunction {
        name : "z⁴ - 2",
        f : |z| pow(z, 4) - real(2.0),
        df : |z| real(4.0) * pow(z, 3),
        d2f : |z| real(12.0) * pow(z, 2),
        description : "Strong symmetry breaking; wide chaotic filaments"
    },
    AnalyticFunction {
        name : "z⁴ + z² - 1",
        f : |z| pow(z, 4) + pow(z, 2) - real(1.0),
        df : |z| real(4.0) * pow(z, 3) + real(2.0) * z,
        d2f : |z| real(12.0) * pow(z, 2) + real(2.0),
        description : "Complex basin boundaries with multiple attractors"
    },
    AnalyticFunction {
        name : "z⁵ + z - 1",
        f : |z| pow(z, 5) + z - real(1.0),
        df : |z| real(5.0) * pow(z, 4) + real(1.0),
        d2f : |z| real(20.0) * pow(z, 3),
        description : "Multiple competing roots; tangled, intricate boundaries"
    },
    AnalyticFunction {
        name : "z³ - z",
        f : |z| pow(z, 3) - z,
        df : |z| real(3.0) * pow(z, 2) - real(1.0),
        d2f : |z| real(6.0) * z,
        description : "Extra critical points; highly detailed dendritic structures"
    },
    AnalyticFunction {
        name : "z⁵ - z²",
        f : |z| pow(z, 5) - pow(z, 2),
        df : |z| real(5.0) * pow(z, 4) - real(2.0) * z,
        d2f : |z| real(20.0) * pow(z, 3) - real(2.0),
        description : "Rich interactions between roots; very fine detail"
    },
    AnalyticFunction {
        name : "z⁵ - z³",
        f : |z| pow(z, 5) - pow(z, 3),
        df : |z| real(5.0) * pow(z, 4) - real(3.0) * pow(z, 2),
        d2f : |z| real(20.0) * pow(z, 3) - real(6.0) * z,
        description : "Intricate dendritic structures with rich detail"
    },
    AnalyticFunction {
        name : "z⁶ + z³ - 1",
        f : |z| pow(z, 6) + pow(z, 3) - real(1.0),
        df : |z| real(6.0) * pow(z, 5) + real(3.0) * pow(z, 2),
        d2f : |z| real(30.0) * pow(z, 4) + real(6.0) * z,
        description : "Complex root layout; dense fractal features"
    },
    AnalyticFunction {
        name : "z³ + (0.3+0.5i)",
        f : |z| pow(z, 3) + Complex64::new(0.3, 0.5),
        df : |z| real(3.0) * pow(z, 2),
        d2f : |z| real(6.0) * z,
        description : "Asymmetric, Julia-like basin patterns"
    },
    AnalyticFunction {
        name : "z³ + (-0.2+0.8i)",
        f : |z| pow(z, 3) + Complex64::new(-0.2, 0.8),
        df : |z| real(3.0) * pow(z, 2),
        d2f : |z| real(6.0) * z,
        description : "Strong asymmetry; chaotic microstructures"
    },
    AnalyticFunction {
        name : "z³ + (1+i)",
        f : |z| pow(z, 3) + Complex64::new(1.0, 1.0),
        df : |z| real(3.0) * pow(z, 2),
        d2f : |z| real(6.0) * z,
        description : "Highly distorted basins; dramatic asymmetry"
    },
    AnalyticFunction {
        name : "z³ + (0.5+0.2i)",
        f : |z| pow(z, 3) + Complex64::new(0.5, 0.2),
        df : |z| real(3.0) * pow(z, 2),
        d2f : |z| real(6.0) * z,
        description : "General complex-parameter form; tunable chaos"
    },
    AnalyticFunction {
        name : "z⁴ + (0.2+0.4i)",
        f : |z| pow(z, 4) + Complex64::new(0.2, 0.4),
        df : |z| real(4.0) * pow(z, 3),
        d2f : |z| real(12.0) * pow(z, 2),
        description : "Four-fold symmetry with complex asymmetry"
    },
    AnalyticFunction {
        name : "(z² + 1)/(z³ - 1)",
        f : |z| div(pow(z, 2) + real(1.0), pow(z, 3) - real(1.0)),
        df : rational_a_df,
        d2f : |z| central_difference(rational_a_df, z),
        description : "Roots and poles compete, producing exotic tilings"
    },
    AnalyticFunction {
        name : "(z³ - 2)/(z - 1)",
        f : |z| div(pow(z, 3) - real(2.0), z - real(1.0)),
        df : rational_b_df,
        d2f : |z| central_difference(rational_b_df, z),
        description : "Strong singularity at z=1; chaotic filaments"
    },
    AnalyticFunction {
        name : "sin(z)",
        f : sin,
        df : cos,
        d2f : |z| real(-1.0) * sin(z),
        description : "Infinite periodic zeros → repeating tile-like patterns"
    },
    AnalyticFunction {
        name : "cos(z) - 1",
        f : |z| cos(z) - real(1.0),
        df : |z| real(-1.0) * sin(z),
        d2f : |z| real(-1.0) * cos(z),
        description : "Zeros at multiples of 2π; repeating basin cells"
    },
    AnalyticFunction {
        name : "exp(z) - 1",
        f : |z| exp(z) - real(1.0),
        df : exp,
        d2f : exp,
        description : "Infinite zeros with exponential growth; self-similar structure"
    },
    AnalyticFunction {
        name : "z³ + sin(z)",
        f : |z| pow(z, 3) + sin(z),
        df : |z| real(3.0) * pow(z, 2) + cos(z),
        d2f : |z| real(6.0) * z - sin(z),
        description : "Blends polynomial basins with sinusoidal distortions"
    },
    AnalyticFunction {
        name : "z⁴ + exp(-z)",
        f : |z| pow(z, 4) + neg_exp(z),
        df : |z| real(4.0) * pow(z, 3) - neg_exp(z),
        d2f : |z| real(12.0) * pow(z, 2) + neg_exp(z),
        description : "Polynomial growth vs. exponential decay; unusual textures"
    },
    AnalyticFunction {
        name : "sin(z²) - 1",
        f : |z| sin(pow(z, 2)) - real(1.0),
        df : |z| real(2.0) * z * cos(pow(z, 2)),
        d2f : |z| {
            let z2 = pow(z, 2);
            real(2.0) * cos(z2) + real(-4.0) * z2 * sin(z2)
        },
        description : "Curved, chaotic zero sets; swirling fractal structures"
    },
    AnalyticFunction {
        name : "sinh(z) - 1",
        f : |z| sinh(z) - real(1.0),
        df : cosh,
        d2f : sinh,
        description : "Hyperbolic symmetries; different structure from trig functions"
    },
    AnalyticFunction {
        name : "z·exp(z) - 1",
        f : |z| z * exp(z) - real(1.0),
        df : |z| exp(z) + z * exp(z),
        d2f : |z| real(2.0) * exp(z) + z * exp(z),
        description : "Lambert W function related; exotic mixed patterns"
    },
];

pub fn lookup(name : &str) -> Result<&'static AnalyticFunction, RenderError> {
    FUNCTIONS.iter().find(
        |function| function.name == name
    ).ok_or_else(
        || RenderError::UnknownFunction(name.to_string())
    )
}

pub fn names() -> impl Iterator<Item = &'static str> {
    FUNCTIONS.iter().map(|function| function.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compare against a central difference of the next lower derivative
    fn assert_derivative_close(g : ComplexMap, dg : ComplexMap, z : Complex64, name : &str, order : &str) {
        let h = 1e-6;
        let numeric = (g(z + real(h)) - g(z - real(h))) / real(2.0 * h);
        let exact = dg(z);
        let scale = 1.0 + exact.norm();
        assert!(
            (numeric - exact).norm() / scale < 1e-3,
            "{} derivative of {} disagrees: {} vs {}", order, name, numeric, exact
        );
    }

    #[test]
    fn test_registry_has_twenty_plus_unique_names() {
        assert!(FUNCTIONS.len() >= 20);
        let mut names : Vec<&str> = names().collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), FUNCTIONS.len());
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let cubic = lookup("z³ - 1").unwrap();
        assert_eq!((cubic.f)(real(1.0)), real(0.0));
        match lookup("z^3 - 1") {
            Err(RenderError::UnknownFunction(name)) => assert_eq!(name, "z^3 - 1"),
            _ => panic!("expected unknown function")
        }
    }

    #[test]
    fn test_derivatives_consistent() {
        let z = Complex64::new(0.37, 0.61);
        for function in FUNCTIONS.iter() {
            assert!((function.f)(z).norm().is_finite(), "{} not finite", function.name);
            assert_derivative_close(function.f, function.df, z, function.name, "first");
            assert_derivative_close(function.df, function.d2f, z, function.name, "second");
        }
    }

    #[test]
    fn test_descriptions_present() {
        assert!(FUNCTIONS.iter().all(|function| !function.description.is_empty()));
    }
}
