// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Display sinks.  The renderer only ever sets pixels and presents
//! finished frames; what "present" means is up to the sink.

use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use std::fs::File;
use std::path::{Path, PathBuf};

use errors::ZoomError;
use palette::Rgb;
use planes::Pixel;

/// Something the renderer can draw frames into.
pub trait Sink {
    /// Width of the surface in pixels.
    fn width(&self) -> usize;
    /// Height of the surface in pixels.
    fn height(&self) -> usize;
    /// Sets one pixel.  Callers must stay inside `width` x `height`.
    fn put_pixel(&mut self, pixel: Pixel, color: Rgb);
    /// Shows the completed frame.
    fn present(&mut self) -> Result<(), ZoomError>;
}

/// A packed RGB frame held in memory.  Every `present` snapshots the
/// working buffer, so the last presented frame can be inspected while
/// the next one is being drawn.
#[derive(Debug)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    presented: Vec<u8>,
    frames: usize,
}

impl FrameBuffer {
    /// Creates a black `width` x `height` buffer.
    pub fn new(width: usize, height: usize) -> FrameBuffer {
        FrameBuffer {
            width,
            height,
            pixels: vec![0 as u8; width * height * 3],
            presented: vec![0 as u8; width * height * 3],
            frames: 0,
        }
    }

    /// The colour currently in the working buffer at `pixel`.
    pub fn pixel(&self, pixel: Pixel) -> Rgb {
        let offset = self.offset(pixel);
        Rgb(
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        )
    }

    /// The raw working buffer, three bytes per pixel, row major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The raw bytes of the most recently presented frame.
    pub fn presented(&self) -> &[u8] {
        &self.presented
    }

    /// How many frames have been presented so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    fn offset(&self, pixel: Pixel) -> usize {
        (pixel.1 * self.width + pixel.0) * 3
    }
}

impl Sink for FrameBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn put_pixel(&mut self, pixel: Pixel, color: Rgb) {
        debug_assert!(pixel.0 < self.width && pixel.1 < self.height);
        let offset = self.offset(pixel);
        self.pixels[offset] = color.0;
        self.pixels[offset + 1] = color.1;
        self.pixels[offset + 2] = color.2;
    }

    fn present(&mut self) -> Result<(), ZoomError> {
        self.presented.copy_from_slice(&self.pixels);
        self.frames += 1;
        Ok(())
    }
}

/// Writes every presented frame into a directory as a numbered binary
/// PPM: `frame-0000.ppm`, `frame-0001.ppm`, ...
#[derive(Debug)]
pub struct PnmSink {
    buffer: FrameBuffer,
    directory: PathBuf,
}

impl PnmSink {
    /// Frames go into `directory`, which must already exist.
    pub fn new<P: AsRef<Path>>(directory: P, width: usize, height: usize) -> PnmSink {
        PnmSink {
            buffer: FrameBuffer::new(width, height),
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// The file name the given frame is written to.
    pub fn frame_path(&self, frame: usize) -> PathBuf {
        self.directory.join(format!("frame-{:04}.ppm", frame))
    }

    /// The in-memory copy of what has been drawn.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }
}

impl Sink for PnmSink {
    fn width(&self) -> usize {
        self.buffer.width
    }

    fn height(&self) -> usize {
        self.buffer.height
    }

    fn put_pixel(&mut self, pixel: Pixel, color: Rgb) {
        self.buffer.put_pixel(pixel, color);
    }

    fn present(&mut self) -> Result<(), ZoomError> {
        let path = self.frame_path(self.buffer.frames());
        write_image(
            &path,
            self.buffer.pixels(),
            (self.buffer.width, self.buffer.height),
        )?;
        debug!("wrote {}", path.display());
        self.buffer.present()
    }
}

fn write_image(path: &Path, pixels: &[u8], bounds: (usize, usize)) -> Result<(), std::io::Error> {
    let output = File::create(path)?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
    encoder.encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::RGB(8))?;
    Ok(())
}
