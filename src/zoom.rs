// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The zoom driver.  Renders frame after frame into a sink, each one
//! `zoom_factor` times more magnified than the last.
//!
//! Within a frame, every scanline is walked left to right in groups of
//! `LANES` pixels, and each group goes through the evaluator as one
//! batch.  A scanline whose width is not a multiple of `LANES` ends
//! with a short group: the missing lanes are filled with the
//! coordinates of the (off-image) columns that would follow, evaluated
//! along with the rest, and their results thrown away.

use std::time::{Duration, Instant};

use config::ZoomConfig;
use errors::ZoomError;
use escape::{Evaluator, Lanes, Lockstep, BAILOUT, LANES};
use palette::Palette;
use planes::{Pixel, PlaneMapper};
use sink::Sink;

/// Where the driver is in the run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FrameState {
    /// About to render the frame at this depth.
    Rendering(u32),
    /// Every frame has been presented.
    Done,
}

impl FrameState {
    /// The state after the frame at the current depth is presented.
    pub fn next(self, frames: u32) -> FrameState {
        match self {
            FrameState::Rendering(depth) if depth + 1 < frames => FrameState::Rendering(depth + 1),
            _ => FrameState::Done,
        }
    }
}

/// Handed to the observer after each frame is presented.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameReport {
    /// Zero-based frame index.
    pub depth: u32,
    /// Magnification the frame was rendered at.
    pub magnification: f64,
    /// Time spent computing the frame, not counting `present`.
    pub elapsed: Duration,
}

/// Renders a validated `ZoomConfig` with a palette and an evaluator.
#[derive(Debug)]
pub struct ZoomRenderer<E: Evaluator = Lockstep> {
    config: ZoomConfig,
    palette: Palette,
    evaluator: E,
}

impl ZoomRenderer<Lockstep> {
    /// A renderer using the lockstep batch evaluator.
    pub fn new(config: ZoomConfig, palette: Palette) -> Result<Self, ZoomError> {
        ZoomRenderer::with_evaluator(config, palette, Lockstep)
    }
}

impl<E: Evaluator> ZoomRenderer<E> {
    /// A renderer using any evaluator.  Fails if the configuration is
    /// not usable.
    pub fn with_evaluator(
        config: ZoomConfig,
        palette: Palette,
        evaluator: E,
    ) -> Result<Self, ZoomError> {
        config.validate()?;
        Ok(ZoomRenderer {
            config,
            palette,
            evaluator,
        })
    }

    /// The configuration being rendered.
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    fn check_sink<S: Sink>(&self, sink: &S) -> Result<(), ZoomError> {
        if sink.width() != self.config.width || sink.height() != self.config.height {
            return Err(ZoomError::SinkMismatch {
                sink_width: sink.width(),
                sink_height: sink.height(),
                width: self.config.width,
                height: self.config.height,
            });
        }
        Ok(())
    }

    /// Draws one full frame at `magnification` into `sink`, without
    /// presenting it.  Fails, without drawing anything, if the sink is
    /// not the size of the view.
    pub fn render_frame<S: Sink>(
        &self,
        magnification: f64,
        sink: &mut S,
    ) -> Result<(), ZoomError> {
        self.check_sink(sink)?;
        let (width, height) = (self.config.width, self.config.height);
        let plane = PlaneMapper::new(
            width,
            height,
            self.config.focus,
            magnification,
            self.config.mapping,
        );

        for hy in 0..height {
            let cy: Lanes<f64> = [plane.imaginary(hy); LANES];
            for hx in (0..width).step_by(LANES) {
                let mut cx: Lanes<f64> = [0.0; LANES];
                for (lane, re) in cx.iter_mut().enumerate() {
                    *re = plane.real(hx + lane);
                }
                let results = self
                    .evaluator
                    .evaluate(&cx, &cy, self.config.max_iterations, BAILOUT);
                for (lane, &result) in results.iter().enumerate().take(width - hx) {
                    sink.put_pixel(Pixel(hx + lane, hy), self.palette.color(result));
                }
            }
        }
        Ok(())
    }

    /// Renders and presents every frame in depth order, calling
    /// `observer` after each one.  The first error from the sink ends
    /// the run.
    pub fn render_sequence<S, F>(&self, sink: &mut S, mut observer: F) -> Result<(), ZoomError>
    where
        S: Sink,
        F: FnMut(&FrameReport),
    {
        self.check_sink(sink)?;
        debug!(
            "zooming on {} over {} frames of {}x{}, {} iterations",
            self.config.focus,
            self.config.frames,
            self.config.width,
            self.config.height,
            self.config.max_iterations
        );

        let mut state = FrameState::Rendering(0);
        while let FrameState::Rendering(depth) = state {
            let magnification = self.config.magnification_at(depth);
            let start = Instant::now();
            self.render_frame(magnification, sink)?;
            let elapsed = start.elapsed();
            sink.present()?;
            info!("Render done {} {}", depth, magnification);
            observer(&FrameReport {
                depth,
                magnification,
                elapsed,
            });
            state = state.next(self.config.frames);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape::Scalar;
    use num::Complex;
    use palette::Rgb;
    use sink::FrameBuffer;

    fn small(width: usize, height: usize) -> ZoomConfig {
        ZoomConfig {
            width,
            height,
            max_iterations: 50,
            frames: 3,
            zoom_factor: 2.0,
            focus: Complex::new(0.0, 0.0),
            magnification: 1.0,
            ..ZoomConfig::default()
        }
    }

    #[test]
    fn state_machine_counts_frames() {
        let mut state = FrameState::Rendering(0);
        let mut seen = vec![];
        while let FrameState::Rendering(depth) = state {
            seen.push(depth);
            state = state.next(3);
        }
        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(FrameState::Done.next(3), FrameState::Done);
    }

    #[test]
    fn renderer_is_debuggable() {
        let renderer = ZoomRenderer::new(small(4, 4), Palette::default()).unwrap();
        assert!(format!("{:?}", renderer).starts_with("ZoomRenderer"));
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(ZoomRenderer::new(small(0, 4), Palette::default()).is_err());
    }

    #[test]
    fn rejects_mismatched_sink() {
        let renderer = ZoomRenderer::new(small(4, 4), Palette::default()).unwrap();
        let mut sink = FrameBuffer::new(4, 3);
        match renderer.render_sequence(&mut sink, |_| ()) {
            Err(ZoomError::SinkMismatch { sink_height, .. }) => assert_eq!(sink_height, 3),
            other => panic!("expected a mismatch, got {:?}", other),
        }
        assert_eq!(sink.frames(), 0);
    }

    #[test]
    fn single_frame_rejects_mismatched_sink() {
        let renderer = ZoomRenderer::new(small(5, 2), Palette::default()).unwrap();
        let mut sink = FrameBuffer::new(4, 3);
        sink.put_pixel(Pixel(0, 1), Rgb(9, 9, 9));
        match renderer.render_frame(1.0, &mut sink) {
            Err(ZoomError::SinkMismatch {
                sink_width, width, ..
            }) => assert_eq!((sink_width, width), (4, 5)),
            other => panic!("expected a mismatch, got {:?}", other),
        }
        assert_eq!(sink.pixel(Pixel(0, 1)), Rgb(9, 9, 9));
        assert_eq!(sink.pixel(Pixel(0, 0)), Rgb::BLACK);
    }

    /// Draws like a `FrameBuffer` but refuses to present the frame at
    /// `fail_at`.
    struct Flaky {
        buffer: FrameBuffer,
        fail_at: usize,
        presents: usize,
        drawn: usize,
    }

    impl Sink for Flaky {
        fn width(&self) -> usize {
            self.buffer.width()
        }

        fn height(&self) -> usize {
            self.buffer.height()
        }

        fn put_pixel(&mut self, pixel: Pixel, color: Rgb) {
            self.drawn += 1;
            self.buffer.put_pixel(pixel, color);
        }

        fn present(&mut self) -> Result<(), ZoomError> {
            let frame = self.presents;
            self.presents += 1;
            if frame == self.fail_at {
                return Err(ZoomError::Io(::std::io::Error::new(
                    ::std::io::ErrorKind::Other,
                    "display went away",
                )));
            }
            self.buffer.present()
        }
    }

    #[test]
    fn failed_present_ends_the_run() {
        let renderer = ZoomRenderer::new(small(5, 2), Palette::default()).unwrap();
        let mut sink = Flaky {
            buffer: FrameBuffer::new(5, 2),
            fail_at: 1,
            presents: 0,
            drawn: 0,
        };
        let mut depths = vec![];
        match renderer.render_sequence(&mut sink, |r| depths.push(r.depth)) {
            Err(ZoomError::Io(e)) => assert_eq!(e.to_string(), "display went away"),
            other => panic!("expected the present error, got {:?}", other),
        }
        assert_eq!(depths, vec![0]);
        assert_eq!(sink.presents, 2);
        assert_eq!(sink.buffer.frames(), 1);
        // Frames 0 and 1 were drawn, frame 2 never started.
        assert_eq!(sink.drawn, 2 * 5 * 2);
    }

    #[test]
    fn reports_every_frame_in_order() {
        let renderer = ZoomRenderer::new(small(5, 2), Palette::default()).unwrap();
        let mut sink = FrameBuffer::new(5, 2);
        let mut reports = vec![];
        renderer
            .render_sequence(&mut sink, |r| reports.push((r.depth, r.magnification)))
            .unwrap();
        assert_eq!(reports, vec![(0, 1.0), (1, 2.0), (2, 4.0)]);
        assert_eq!(sink.frames(), 3);
    }

    #[test]
    fn ragged_scanline_is_fully_drawn() {
        // Column 4 of a 5 wide frame sits in a short batch.  Paint the
        // buffer first so an undrawn pixel would show.
        let config = small(5, 1);
        let renderer = ZoomRenderer::new(config, Palette::default()).unwrap();
        let mut sink = FrameBuffer::new(5, 1);
        for x in 0..5 {
            sink.put_pixel(Pixel(x, 0), Rgb(7, 7, 7));
        }
        renderer.render_frame(1.0, &mut sink).unwrap();
        let plane = PlaneMapper::new(5, 1, config.focus, 1.0, config.mapping);
        let expected = ::escape::escape_time(plane.pixel_to_point(&Pixel(4, 0)), 50, BAILOUT);
        assert_eq!(sink.pixel(Pixel(4, 0)), Palette::default().color(expected));
    }

    #[test]
    fn scalar_and_lockstep_renderers_agree() {
        let config = ZoomConfig {
            width: 13,
            height: 7,
            max_iterations: 200,
            focus: Complex::new(-0.75, 0.1),
            ..ZoomConfig::default()
        };
        let lockstep = ZoomRenderer::new(config, Palette::default()).unwrap();
        let scalar = ZoomRenderer::with_evaluator(config, Palette::default(), Scalar).unwrap();
        let mut a = FrameBuffer::new(13, 7);
        let mut b = FrameBuffer::new(13, 7);
        lockstep.render_frame(1.3, &mut a).unwrap();
        scalar.render_frame(1.3, &mut b).unwrap();
        assert_eq!(a.pixels(), b.pixels());
    }
}
