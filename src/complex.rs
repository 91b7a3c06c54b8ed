// Complex arithmetic used by the root finder
//
// Addition, subtraction and multiplication come straight from num's Complex.
// Division is special: a zero modulus divisor gives infinity in both parts
// rather than NaN so a step that hits a critical point blows up cleanly and
// gets capped by the caller. Everything here must accept infinite and NaN
// operands without panicking.

use num::complex::Complex64;

pub fn real(re : f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

pub fn div(a : Complex64, b : Complex64) -> Complex64 {
    let denom = b.re * b.re + b.im * b.im;
    if denom == 0.0 {
        return Complex64::new(f64::INFINITY, f64::INFINITY);
    }
    Complex64::new(
        (a.re * b.re + a.im * b.im) / denom,
        (a.im * b.re - a.re * b.im) / denom
    )
}

// Repeated multiplication so the rounding matches the closed form derivatives
pub fn pow(z : Complex64, n : u32) -> Complex64 {
    let mut result = real(1.0);
    for _ in 0..n {
        result = result * z;
    }
    result
}

pub fn sin(z : Complex64) -> Complex64 {
    Complex64::new(z.re.sin() * z.im.cosh(), z.re.cos() * z.im.sinh())
}

pub fn cos(z : Complex64) -> Complex64 {
    Complex64::new(z.re.cos() * z.im.cosh(), -z.re.sin() * z.im.sinh())
}

pub fn exp(z : Complex64) -> Complex64 {
    let exp_re = z.re.exp();
    Complex64::new(exp_re * z.im.cos(), exp_re * z.im.sin())
}

pub fn sinh(z : Complex64) -> Complex64 {
    Complex64::new(z.re.sinh() * z.im.cos(), z.re.cosh() * z.im.sin())
}

pub fn cosh(z : Complex64) -> Complex64 {
    Complex64::new(z.re.cosh() * z.im.cos(), z.re.sinh() * z.im.sin())
}
