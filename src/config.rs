//! Run parameters.  These are fixed for the duration of a run and are
//! checked once, before the first pixel is drawn.

use num::Complex;

use errors::ZoomError;
use planes::Mapping;

/// Everything that shapes a zoom animation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoomConfig {
    /// Output width in pixels.
    pub width: usize,
    /// Output height in pixels.
    pub height: usize,
    /// Steps spent on a point before it is assumed to be in the set.
    pub max_iterations: u32,
    /// Number of frames to render.
    pub frames: u32,
    /// Magnification multiplier between consecutive frames.
    pub zoom_factor: f64,
    /// The point being zoomed towards.
    pub focus: Complex<f64>,
    /// Magnification of the first frame.
    pub magnification: f64,
    /// How pixel rows map to the imaginary axis.
    pub mapping: Mapping,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        ZoomConfig {
            width: 700,
            height: 700,
            max_iterations: 1000,
            frames: 40,
            zoom_factor: 1.02,
            focus: Complex::new(-0.702295281061, 0.350220783400),
            magnification: 1.0,
            mapping: Mapping::Reference,
        }
    }
}

fn invalid<T>(message: String) -> Result<T, ZoomError> {
    Err(ZoomError::Config(message))
}

impl ZoomConfig {
    /// Rejects any parameter the renderer cannot work with.
    pub fn validate(&self) -> Result<(), ZoomError> {
        if self.width == 0 || self.height == 0 {
            return invalid(format!(
                "resolution must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if self.max_iterations == 0 {
            return invalid("iteration limit must be positive".to_string());
        }
        if self.frames == 0 {
            return invalid("frame count must be positive".to_string());
        }
        if !self.zoom_factor.is_finite() || self.zoom_factor <= 1.0 {
            return invalid(format!(
                "zoom factor must be a finite number above 1, got {}",
                self.zoom_factor
            ));
        }
        if !self.magnification.is_finite() || self.magnification <= 0.0 {
            return invalid(format!(
                "magnification must be a finite positive number, got {}",
                self.magnification
            ));
        }
        if !self.focus.re.is_finite() || !self.focus.im.is_finite() {
            return invalid(format!("focus must be finite, got {}", self.focus));
        }
        Ok(())
    }

    /// Magnification of frame `depth`: `magnification * zoom_factor^depth`.
    pub fn magnification_at(&self, depth: u32) -> f64 {
        self.magnification * self.zoom_factor.powi(depth as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ZoomConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_resolution() {
        let config = ZoomConfig {
            height: 0,
            ..ZoomConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_counts() {
        let config = ZoomConfig {
            max_iterations: 0,
            ..ZoomConfig::default()
        };
        assert!(config.validate().is_err());
        let config = ZoomConfig {
            frames: 0,
            ..ZoomConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zoom_out_and_nan() {
        for &zoom in &[1.0, 0.5, ::std::f64::NAN, ::std::f64::INFINITY] {
            let config = ZoomConfig {
                zoom_factor: zoom,
                ..ZoomConfig::default()
            };
            assert!(config.validate().is_err(), "zoom {} accepted", zoom);
        }
    }

    #[test]
    fn rejects_bad_magnification_and_focus() {
        let config = ZoomConfig {
            magnification: 0.0,
            ..ZoomConfig::default()
        };
        assert!(config.validate().is_err());
        let config = ZoomConfig {
            focus: Complex::new(0.0, ::std::f64::NAN),
            ..ZoomConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn magnification_grows_geometrically() {
        let config = ZoomConfig {
            magnification: 2.0,
            zoom_factor: 1.5,
            ..ZoomConfig::default()
        };
        assert_eq!(config.magnification_at(0), 2.0);
        assert_eq!(config.magnification_at(1), 3.0);
        assert_eq!(config.magnification_at(2), 4.5);
    }
}
