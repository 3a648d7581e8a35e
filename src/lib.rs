#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot zoom renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c`, starting from
//! zero, never runs off to infinity.  Points outside the set are
//! coloured by how many steps they took to leave a circle of radius
//! two; points inside are black.
//!
//! This crate renders an animated dive into the set.  Every frame
//! looks at a window `4 / m` units wide around a fixed focal point,
//! and `m` is multiplied by a constant zoom factor from one frame to
//! the next.  The per-pixel work is done a few points at a time by a
//! lockstep batch evaluator, which can be swapped for a plain
//! one-point-at-a-time evaluator to check it.

#[macro_use]
extern crate failure;
extern crate image;
#[macro_use]
extern crate log;
extern crate num;

pub mod config;
pub mod errors;
pub mod escape;
pub mod palette;
pub mod planes;
pub mod sink;
pub mod zoom;

pub use config::ZoomConfig;
pub use errors::ZoomError;
pub use escape::{escape_time, evaluate_batch, Evaluator, Lockstep, Scalar, BAILOUT, LANES};
pub use palette::{Palette, Rgb};
pub use planes::{Mapping, Pixel, PlaneMapper};
pub use sink::{FrameBuffer, PnmSink, Sink};
pub use zoom::{FrameReport, FrameState, ZoomRenderer};
