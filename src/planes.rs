//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a square window on the complex plane centred (horizontally, at
//! least) on a focal point and shrunk by a magnification.
//!
//! The window is `4 / m` units wide.  Pixel column `hx` maps to
//!
//! ```text
//! re = ((hx / W) - 0.5 + px / (4 / m)) * (4 / m)
//! ```
//!
//! and the row mapping depends on the `Mapping` in use.
use num::Complex;

/// Describes the x, y of a pixel in the output image, with 0,0 at the
/// top left.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Describes the width and height of an integral plane that is assumed
/// to start at 0,0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// How pixel rows are mapped onto the imaginary axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Mapping {
    /// The published zoom formula: rows are divided by the *width*
    /// and offset by the *real* part of the focal point, exactly like
    /// columns are.  Frames are bit-for-bit those of the classic
    /// renderer, but the imaginary part of the focus has no effect and
    /// non-square frames are stretched.
    Reference,
    /// Rows are divided by the height and offset by the imaginary part
    /// of the focal point.
    Corrected,
}

impl Default for Mapping {
    fn default() -> Self {
        Mapping::Reference
    }
}

/// Maps pixels of a `width` x `height` image onto the complex plane
/// for one frame of the zoom.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The size of the image being rendered.
    pub integral_plane: IntegralPlane,
    /// The point we are zooming towards.
    pub focus: Complex<f64>,
    /// Width of the complex window, `4 / m`.
    pub span: f64,
    mapping: Mapping,
}

impl PlaneMapper {
    /// Builds the mapping for one frame at magnification `magnification`.
    pub fn new(
        width: usize,
        height: usize,
        focus: Complex<f64>,
        magnification: f64,
        mapping: Mapping,
    ) -> PlaneMapper {
        PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            focus,
            span: 4.0 / magnification,
            mapping,
        }
    }

    /// The total number of pixels in the integral grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// The real coordinate of pixel column `hx`.  Columns past the
    /// right edge are still mapped; the renderer uses them as padding.
    pub fn real(&self, hx: usize) -> f64 {
        let width = self.integral_plane.0 as f64;
        ((hx as f64 / width) - 0.5 + self.focus.re / self.span) * self.span
    }

    /// The imaginary coordinate of pixel row `hy`.
    pub fn imaginary(&self, hy: usize) -> f64 {
        match self.mapping {
            Mapping::Reference => {
                let width = self.integral_plane.0 as f64;
                ((hy as f64 / width) - 0.5 + self.focus.re / self.span) * self.span
            }
            Mapping::Corrected => {
                let height = self.integral_plane.1 as f64;
                ((hy as f64 / height) - 0.5 + self.focus.im / self.span) * self.span
            }
        }
    }

    /// Given a pixel on the integral plane, return the point it
    /// samples on the complex plane.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(self.real(pixel.0), self.imaginary(pixel.1))
    }
}
