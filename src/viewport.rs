//! Derives the region and raster size from whatever subset of flags the
//! user supplied.  The defaults frame the whole set at 1250x1000.  A
//! missing pixel dimension is filled in so that pixels stay square; if
//! neither is given, each default dimension grows or shrinks with the
//! span it covers.

use num::Complex;

use error::Result;
use planes::{PlaneRegion, RasterDimensions};

/// Lower-left corner of the default region.
pub const DEFAULT_ORIGIN: (f64, f64) = (-2.0, -1.2);
/// Default extent along the real axis.
pub const DEFAULT_REAL_SPAN: f64 = 3.0;
/// Default extent along the imaginary axis.
pub const DEFAULT_IMAG_SPAN: f64 = 2.4;
/// Default raster width.
pub const DEFAULT_WIDTH: usize = 1250;
/// Default raster height.
pub const DEFAULT_HEIGHT: usize = 1000;

/// Collects optional viewport settings and resolves them into a
/// validated region and raster.
#[derive(Clone, Debug, Default)]
pub struct ViewportBuilder {
    origin: Option<Complex<f64>>,
    real_span: Option<f64>,
    imag_span: Option<f64>,
    width: Option<usize>,
    height: Option<usize>,
}

impl ViewportBuilder {
    /// Nothing set; `build` yields the defaults.
    pub fn new() -> Self {
        ViewportBuilder::default()
    }

    /// Move the lower-left corner.
    pub fn origin(mut self, origin: Complex<f64>) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Set the extent along the real axis.
    pub fn real_span(mut self, span: f64) -> Self {
        self.real_span = Some(span);
        self
    }

    /// Set the extent along the imaginary axis.
    pub fn imag_span(mut self, span: f64) -> Self {
        self.imag_span = Some(span);
        self
    }

    /// Set the raster width in pixels.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the raster height in pixels.
    pub fn height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    /// Resolve and validate.
    pub fn build(&self) -> Result<(PlaneRegion, RasterDimensions)> {
        let origin = self
            .origin
            .unwrap_or_else(|| Complex::new(DEFAULT_ORIGIN.0, DEFAULT_ORIGIN.1));
        let real_span = self.real_span.unwrap_or(DEFAULT_REAL_SPAN);
        let imag_span = self.imag_span.unwrap_or(DEFAULT_IMAG_SPAN);
        let region = PlaneRegion::new(origin, real_span, imag_span)?;

        let (width, height) = match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, scale(w, imag_span / real_span)),
            (None, Some(h)) => (scale(h, real_span / imag_span), h),
            (None, None) => (
                scale(DEFAULT_WIDTH, real_span / DEFAULT_REAL_SPAN),
                scale(DEFAULT_HEIGHT, imag_span / DEFAULT_IMAG_SPAN),
            ),
        };
        Ok((region, RasterDimensions::new(width, height)?))
    }
}

fn scale(pixels: usize, ratio: f64) -> usize {
    let scaled = (pixels as f64 * ratio).round();
    if scaled.is_finite() && scaled > 0.0 {
        scaled as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use error::Error;

    #[test]
    fn defaults_frame_the_whole_set() {
        let (region, dims) = ViewportBuilder::new().build().unwrap();
        assert_eq!(region.origin, Complex::new(-2.0, -1.2));
        assert_eq!((region.width, region.height), (3.0, 2.4));
        assert_eq!((dims.width, dims.height), (1250, 1000));
    }

    #[test]
    fn width_alone_keeps_pixels_square() {
        let (_, dims) = ViewportBuilder::new().width(500).build().unwrap();
        assert_eq!((dims.width, dims.height), (500, 400));
        let (_, dims) = ViewportBuilder::new().height(240).build().unwrap();
        assert_eq!((dims.width, dims.height), (300, 240));
    }

    #[test]
    fn spans_scale_the_default_raster() {
        let (region, dims) = ViewportBuilder::new()
            .origin(Complex::new(-1.0, -0.5))
            .real_span(1.5)
            .imag_span(1.2)
            .build()
            .unwrap();
        assert_eq!(region.far_corner(), Complex::new(0.5, 0.7));
        assert_eq!((dims.width, dims.height), (625, 500));
    }

    #[test]
    fn explicit_sizes_win() {
        let (_, dims) = ViewportBuilder::new()
            .real_span(0.1)
            .width(64)
            .height(48)
            .build()
            .unwrap();
        assert_eq!((dims.width, dims.height), (64, 48));
    }

    #[test]
    fn bad_settings_are_rejected() {
        match ViewportBuilder::new().real_span(-1.0).build() {
            Err(Error::InvalidRegion(..)) => {}
            other => panic!("unexpected {:?}", other),
        }
        match ViewportBuilder::new().width(1).height(10).build() {
            Err(Error::RasterTooSmall(1, 10)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
