// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator.  This is our classic iterator function:
//! it takes a point on the complex plane and counts how many times
//! `z = z² + c` can be applied before the orbit leaves the circle of
//! radius 2, beyond which it is guaranteed to run off to infinity.

use num::Complex;

/// The iteration budget for a single point.
pub const MAX_ITERATIONS: u32 = 1000;

/// The iteration count reported for points that never escaped, and
/// are therefore presumed to be members of the Mandelbrot set.
pub const SET_MEMBER: u32 = MAX_ITERATIONS + 1;

/// |z|² above this means |z| > 2.
const ESCAPE_NORM_SQR: f64 = 4.0;

/// The outcome of iterating a single point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EscapeResult {
    /// The 1-indexed iteration at which the orbit escaped, or
    /// `SET_MEMBER` if it never did.
    pub iterations: u32,
    /// |z|² at the escaping iteration.  Meaningless for set members.
    pub magnitude: f64,
}

impl EscapeResult {
    /// A point that escaped on `iterations` with |z|² of `magnitude`.
    pub fn escaped(iterations: u32, magnitude: f64) -> Self {
        EscapeResult {
            iterations,
            magnitude,
        }
    }

    /// A point that stayed bounded for the whole budget.
    pub fn member() -> Self {
        EscapeResult {
            iterations: SET_MEMBER,
            magnitude: 0.0,
        }
    }

    /// True if the orbit never escaped.
    pub fn is_member(&self) -> bool {
        self.iterations == SET_MEMBER
    }
}

/// Iterate `point` starting from `z₀ = point`.  The squared magnitude
/// is checked after every update, so the smallest possible escape
/// count is 1.
pub fn evaluate(point: Complex<f64>) -> EscapeResult {
    let mut z = point;
    for i in 0..MAX_ITERATIONS {
        z = z * z + point;
        let norm = z.norm_sqr();
        if norm > ESCAPE_NORM_SQR {
            return EscapeResult::escaped(i + 1, norm);
        }
    }
    EscapeResult::member()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_a_member() {
        assert!(evaluate(Complex::new(0.0, 0.0)).is_member());
    }

    #[test]
    fn main_cardioid_points_are_members() {
        assert!(evaluate(Complex::new(-0.5, 0.0)).is_member());
        assert!(evaluate(Complex::new(-1.0, 0.0)).is_member());
        assert!(evaluate(Complex::new(0.25, 0.0)).is_member());
    }

    #[test]
    fn distant_points_escape_on_the_first_step() {
        // With |c| > 2, |c² + c| >= |c|(|c| - 1) > 2 already.
        for c in &[
            Complex::new(-2.0, 1.2),
            Complex::new(3.0, 0.0),
            Complex::new(0.0, -2.5),
            Complex::new(100.0, 100.0),
        ] {
            let result = evaluate(*c);
            assert_eq!(result.iterations, 1, "point {:?}", c);
            assert!(result.magnitude > 4.0);
        }
    }

    #[test]
    fn reports_squared_magnitude_at_escape() {
        // z1 = 1 + 1 = 2 (|z|² = 4, not yet out), z2 = 4 + 1 = 5.
        let result = evaluate(Complex::new(1.0, 0.0));
        assert_eq!(result, EscapeResult::escaped(2, 25.0));
    }

    #[test]
    fn escape_counts_stay_within_budget() {
        for i in 0..50 {
            let c = Complex::new(-2.0 + 0.06 * i as f64, 0.7);
            let result = evaluate(c);
            assert!(result.iterations >= 1 && result.iterations <= SET_MEMBER);
        }
    }
}
