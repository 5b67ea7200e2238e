// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

#![allow(missing_docs)]

use alloc::vec::Vec;

use arrayvec::ArrayVec;

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident/$lfname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            /// Special implementation for signum, because libm doesn't have it.
            fn signum(self) -> Self;

            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            #[inline]
            fn signum(self) -> f64 {
                if self.is_nan() {
                    f64::NAN
                } else {
                    1.0_f64.copysign(self)
                }
            }

            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("sbgeom requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs/fabsf;
    fn acos(self) -> Self => acos/acosf;
    fn atan2(self, other: Self) -> Self => atan2/atan2f;
    fn ceil(self) -> Self => ceil/ceilf;
    fn copysign(self, sign: Self) -> Self => copysign/copysignf;
    fn cos(self) -> Self => cos/cosf;
    fn floor(self) -> Self => floor/floorf;
    fn hypot(self, other: Self) -> Self => hypot/hypotf;
    fn log2(self) -> Self => log2/log2f;
    fn powi(self, n: i32) -> Self => pow/powf;
    fn round(self) -> Self => round/roundf;
    fn sin(self) -> Self => sin/sinf;
    fn sin_cos(self) -> (Self, Self) => sincos/sincosf;
    fn sqrt(self) -> Self => sqrt/sqrtf;
}

/// Default tolerance for geometric equality.
///
/// Path continuity, crossing de-duplication and the degenerate-length tests
/// all compare against this value.
pub const EPSILON: f64 = 1e-6;

/// Whether two scalars are within `eps` of each other.
#[inline]
pub fn are_near(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Binomial coefficient `n` choose `k`.
///
/// Returns 0 when `k > n`. Computed with the multiplicative formula, which
/// is exact for every coefficient representable in an `f64` mantissa.
///
/// # Examples
///
/// ```
/// use sbgeom::common::choose;
///
/// assert_eq!(choose(5, 2), 10.0);
/// assert_eq!(choose(4, 0), 1.0);
/// assert_eq!(choose(3, 4), 0.0);
/// ```
pub fn choose(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result.round()
}

/// A memo of Pascal's triangle rows.
///
/// The table is owned by the caller and grows on demand, so repeated
/// conversions at the same order do not recompute their coefficients.
#[derive(Clone, Debug, Default)]
pub struct BinomialTable {
    rows: Vec<Vec<f64>>,
}

impl BinomialTable {
    /// Create an empty table.
    pub fn new() -> BinomialTable {
        BinomialTable { rows: Vec::new() }
    }

    /// Row `n` of Pascal's triangle, `n + 1` entries long.
    pub fn row(&mut self, n: usize) -> &[f64] {
        while self.rows.len() <= n {
            let next = match self.rows.last() {
                None => alloc::vec![1.0],
                Some(prev) => {
                    let mut row = Vec::with_capacity(prev.len() + 1);
                    row.push(1.0);
                    for pair in prev.windows(2) {
                        row.push(pair[0] + pair[1]);
                    }
                    row.push(1.0);
                    row
                }
            };
            self.rows.push(next);
        }
        &self.rows[n]
    }

    /// Binomial coefficient `n` choose `k`, 0 when `k > n`.
    pub fn choose(&mut self, n: usize, k: usize) -> f64 {
        if k > n {
            return 0.0;
        }
        self.row(n)[k]
    }
}

/// Find real roots of quadratic equation.
///
/// Return values of x for which c0 + c1 x + c2 x² = 0.
///
/// This function tries to be quite numerically robust. If the equation
/// is nearly linear, it will return the root ignoring the quadratic term;
/// the other root might be out of representable range. In the degenerate
/// case where all coefficients are zero, so that all values of x satisfy
/// the equation, a single `0.0` is returned.
pub fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();
    let sc0 = c0 * c2.recip();
    let sc1 = c1 * c2.recip();
    if !sc0.is_finite() || !sc1.is_finite() {
        // c2 is zero or very small, treat as linear eqn
        let root = -c0 / c1;
        if root.is_finite() {
            result.push(root);
        } else if c0 == 0.0 && c1 == 0.0 {
            result.push(0.0);
        }
        return result;
    }
    let arg = sc1 * sc1 - 4. * sc0;
    let root1 = if !arg.is_finite() {
        // sc1 * sc1 overflowed: take one root from sc1 x + x² = 0.
        -sc1
    } else {
        if arg < 0.0 {
            return result;
        } else if arg == 0.0 {
            result.push(-0.5 * sc1);
            return result;
        }
        -0.5 * (sc1 + arg.sqrt().copysign(sc1))
    };
    let root2 = sc0 / root1;
    if root2.is_finite() {
        if root2 > root1 {
            result.push(root1);
            result.push(root2);
        } else {
            result.push(root2);
            result.push(root1);
        }
    } else {
        result.push(root1);
    }
    result
}

/// Integrate `f` over `[a, b]` with 16-point Gauss-Legendre quadrature.
pub fn integrate_gauss(a: f64, b: f64, f: impl FnMut(f64) -> f64) -> f64 {
    integrate_gauss_with(GAUSS_LEGENDRE_COEFFS_16, a, b, f)
}

/// Integrate `f` over `[a, b]` with the given Gauss-Legendre table.
pub fn integrate_gauss_with(
    coeffs: &[(f64, f64)],
    a: f64,
    b: f64,
    mut f: impl FnMut(f64) -> f64,
) -> f64 {
    let half = 0.5 * (b - a);
    let mid = 0.5 * (a + b);
    coeffs
        .iter()
        .map(|&(wi, xi)| wi * f(mid + half * xi))
        .sum::<f64>()
        * half
}

// Tables of Legendre-Gauss quadrature coefficients, adapted from:
// <https://pomax.github.io/bezierinfo/legendre-gauss.html>

pub const GAUSS_LEGENDRE_COEFFS_8: &[(f64, f64)] = &[
    (0.3626837833783620, -0.1834346424956498),
    (0.3626837833783620, 0.1834346424956498),
    (0.3137066458778873, -0.5255324099163290),
    (0.3137066458778873, 0.5255324099163290),
    (0.2223810344533745, -0.7966664774136267),
    (0.2223810344533745, 0.7966664774136267),
    (0.1012285362903763, -0.9602898564975363),
    (0.1012285362903763, 0.9602898564975363),
];

pub const GAUSS_LEGENDRE_COEFFS_16: &[(f64, f64)] = &[
    (0.1894506104550685, -0.0950125098376374),
    (0.1894506104550685, 0.0950125098376374),
    (0.1826034150449236, -0.2816035507792589),
    (0.1826034150449236, 0.2816035507792589),
    (0.1691565193950025, -0.4580167776572274),
    (0.1691565193950025, 0.4580167776572274),
    (0.1495959888165767, -0.6178762444026438),
    (0.1495959888165767, 0.6178762444026438),
    (0.1246289712555339, -0.7554044083550030),
    (0.1246289712555339, 0.7554044083550030),
    (0.0951585116824928, -0.8656312023878318),
    (0.0951585116824928, 0.8656312023878318),
    (0.0622535239386479, -0.9445750230732326),
    (0.0622535239386479, 0.9445750230732326),
    (0.0271524594117541, -0.9894009349916499),
    (0.0271524594117541, 0.9894009349916499),
];
