// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time evaluation.
//!
//! Each point `c` on the complex plane is iterated with `z = z*z + c`,
//! starting from zero, until `|z|^2` is no longer below the bailout.
//! The result is the (one-based) step at which that happened, or zero
//! if the point survived every step we were willing to spend on it.
//! A point that is already outside after the very first step therefore
//! reports 1, never 0; the palette lookup depends on that.
//!
//! There are two evaluators.  `escape_time` handles one point at a
//! time.  `evaluate_batch` handles a group of `LANES` points in
//! lockstep: every lane is stepped every time, and a lane that escapes
//! simply has its result frozen while its neighbours keep going.  The
//! two are interchangeable and must agree bit-for-bit.

use num::Complex;

/// The number of points evaluated together by `evaluate_batch`.
pub const LANES: usize = 4;

/// Squared bailout radius.  Radius two is the smallest radius from
/// which every orbit is known to diverge.
pub const BAILOUT: f64 = 4.0;

/// A fixed-size group of per-lane values.
pub type Lanes<T> = [T; LANES];

/// Returns the escape step for a single point, or 0 if the point did
/// not escape within `max_iterations` steps.
pub fn escape_time(c: Complex<f64>, max_iterations: u32, bailout: f64) -> u32 {
    let (mut x, mut y) = (0.0_f64, 0.0_f64);
    for step in 1..=max_iterations {
        let xtemp = x * x - y * y + c.re;
        y = 2.0 * x * y + c.im;
        x = xtemp;
        // Written as a negated `<` so that a NaN orbit counts as escaped.
        if !(x * x + y * y < bailout) {
            return step;
        }
    }
    0
}

/// Evaluates `LANES` points in lockstep.  `cx[i]` and `cy[i]` are the
/// real and imaginary parts of lane `i`, and lane `i` of the result
/// belongs to that point.
pub fn evaluate_batch(
    cx: &Lanes<f64>,
    cy: &Lanes<f64>,
    max_iterations: u32,
    bailout: f64,
) -> Lanes<u32> {
    let mut x = [0.0_f64; LANES];
    let mut y = [0.0_f64; LANES];
    let mut result = [0_u32; LANES];
    let mut alive = [true; LANES];

    for step in 1..=max_iterations {
        for lane in 0..LANES {
            let xtemp = x[lane] * x[lane] - y[lane] * y[lane] + cx[lane];
            y[lane] = 2.0 * x[lane] * y[lane] + cy[lane];
            x[lane] = xtemp;
            if alive[lane] && !(x[lane] * x[lane] + y[lane] * y[lane] < bailout) {
                result[lane] = step;
                alive[lane] = false;
            }
        }
        if alive.iter().all(|a| !a) {
            break;
        }
    }
    result
}

/// Anything that can turn a batch of coordinates into escape results.
/// The renderer is generic over this so the scalar and lockstep paths
/// can be swapped and compared.
pub trait Evaluator {
    /// Same contract as `evaluate_batch`.
    fn evaluate(
        &self,
        cx: &Lanes<f64>,
        cy: &Lanes<f64>,
        max_iterations: u32,
        bailout: f64,
    ) -> Lanes<u32>;
}

/// Evaluates each lane on its own with `escape_time`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Scalar;

/// Evaluates all lanes together with `evaluate_batch`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Lockstep;

impl Evaluator for Scalar {
    fn evaluate(
        &self,
        cx: &Lanes<f64>,
        cy: &Lanes<f64>,
        max_iterations: u32,
        bailout: f64,
    ) -> Lanes<u32> {
        let mut result = [0_u32; LANES];
        for lane in 0..LANES {
            result[lane] = escape_time(Complex::new(cx[lane], cy[lane]), max_iterations, bailout);
        }
        result
    }
}

impl Evaluator for Lockstep {
    fn evaluate(
        &self,
        cx: &Lanes<f64>,
        cy: &Lanes<f64>,
        max_iterations: u32,
        bailout: f64,
    ) -> Lanes<u32> {
        evaluate_batch(cx, cy, max_iterations, bailout)
    }
}
