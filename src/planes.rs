//! Contains the PlaneMapper struct, which describes a relationship
//! between a raster of pixels with its origin at the top left, and a
//! rectangle on the complex plane anchored at its lower-left corner.
//! Image rows grow downward while the imaginary axis grows upward, so
//! row 0 maps to the top edge of the region.
use num::Complex;

use error::{Error, Result};

/// A rectangle on the complex plane: the lower-left corner plus the
/// extent along each axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneRegion {
    /// The lower-left corner.
    pub origin: Complex<f64>,
    /// Extent along the real axis.
    pub width: f64,
    /// Extent along the imaginary axis.
    pub height: f64,
}

impl PlaneRegion {
    /// Fails unless both extents are positive and every value is finite.
    pub fn new(origin: Complex<f64>, width: f64, height: f64) -> Result<PlaneRegion> {
        let finite = origin.re.is_finite()
            && origin.im.is_finite()
            && width.is_finite()
            && height.is_finite();
        if !finite || width <= 0.0 || height <= 0.0 {
            return Err(Error::InvalidRegion(width, height));
        }
        Ok(PlaneRegion {
            origin,
            width,
            height,
        })
    }

    /// The upper-right corner.
    pub fn far_corner(&self) -> Complex<f64> {
        Complex::new(self.origin.re + self.width, self.origin.im + self.height)
    }
}

/// Width and height of the output raster, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RasterDimensions {
    /// Pixels per row.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl RasterDimensions {
    /// Both sides must be at least 2; the mapping divides by `side - 1`.
    pub fn new(width: usize, height: usize) -> Result<RasterDimensions> {
        if width < 2 || height < 2 {
            return Err(Error::RasterTooSmall(width, height));
        }
        Ok(RasterDimensions { width, height })
    }

    /// The total number of pixels.  Used to calculate memory needs.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Describes that the raster is of a size.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Describes the x, y of a pixel in the raster.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of a raster onto points of a plane region.  Holds no
/// per-worker state, so a single mapper is shared by reference across
/// every worker of a render pass.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The raster being filled.
    pub raster: RasterDimensions,
    /// The region it covers.
    pub region: PlaneRegion,
    // Distance on the plane between neighbouring columns and rows.
    steps: (f64, f64),
    // Imaginary coordinate of row 0.
    top: f64,
}

impl PlaneMapper {
    /// Constructor.  Both arguments have already been validated by
    /// their own constructors.
    pub fn new(raster: RasterDimensions, region: PlaneRegion) -> PlaneMapper {
        let steps = (
            region.width / ((raster.width - 1) as f64),
            region.height / ((raster.height - 1) as f64),
        );
        PlaneMapper {
            raster,
            region,
            steps,
            top: region.origin.im + region.height,
        }
    }

    /// Given a pixel, return the point of the plane it samples.  Every
    /// coordinate is derived directly from the pixel index, never by
    /// accumulating steps, so all workers agree to the last bit.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.region.origin.re + (pixel.0 as f64) * self.steps.0,
            self.top - (pixel.1 as f64) * self.steps.1,
        )
    }

    /// The linear offset of a pixel from the root of a row-major buffer.
    pub fn pixel_to_offset(&self, pixel: &Pixel) -> usize {
        pixel.1 * self.raster.width + pixel.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(width: usize, height: usize, region: (f64, f64, f64, f64)) -> PlaneMapper {
        PlaneMapper::new(
            RasterDimensions::new(width, height).unwrap(),
            PlaneRegion::new(Complex::new(region.0, region.1), region.2, region.3).unwrap(),
        )
    }

    #[test]
    fn region_fails_on_bad_shape() {
        let origin = Complex::new(-1.0, -1.0);
        assert!(PlaneRegion::new(origin, 0.0, 1.0).is_err());
        assert!(PlaneRegion::new(origin, 1.0, -2.0).is_err());
        assert!(PlaneRegion::new(origin, ::std::f64::NAN, 1.0).is_err());
        assert!(PlaneRegion::new(Complex::new(::std::f64::INFINITY, 0.0), 1.0, 1.0).is_err());
    }

    #[test]
    fn region_passes_on_good_shape() {
        let region = PlaneRegion::new(Complex::new(-2.0, -1.2), 3.0, 2.4).unwrap();
        assert_eq!(region.far_corner(), Complex::new(1.0, 1.2));
    }

    #[test]
    fn raster_needs_two_pixels_per_side() {
        assert!(RasterDimensions::new(1, 10).is_err());
        assert!(RasterDimensions::new(10, 0).is_err());
        assert_eq!(RasterDimensions::new(2, 2).unwrap().len(), 4);
    }

    #[test]
    fn corners_map_to_region_corners() {
        let pm = mapper(5, 5, (0.0, 0.0, 4.0, 4.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 4.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 0)), Complex::new(4.0, 4.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 4)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 0.0));
    }

    #[test]
    fn rows_descend_the_imaginary_axis() {
        let pm = mapper(3, 3, (-2.0, -1.2, 3.0, 2.4));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, 1.2));
        assert_eq!(pm.pixel_to_point(&Pixel(1, 1)), Complex::new(-0.5, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(1.0, -1.2));
    }

    #[test]
    fn points_are_computed_not_accumulated() {
        let pm = mapper(1001, 2, (-2.0, -1.0, 3.0, 2.0));
        let step = 3.0 / 1000.0;
        for x in 0..1001 {
            let p = pm.pixel_to_point(&Pixel(x, 0));
            assert_eq!(p.re, -2.0 + (x as f64) * step);
        }
    }

    #[test]
    fn offsets_are_row_major() {
        let pm = mapper(7, 3, (0.0, 0.0, 1.0, 1.0));
        assert_eq!(pm.pixel_to_offset(&Pixel(0, 0)), 0);
        assert_eq!(pm.pixel_to_offset(&Pixel(6, 0)), 6);
        assert_eq!(pm.pixel_to_offset(&Pixel(0, 1)), 7);
        assert_eq!(pm.pixel_to_offset(&Pixel(3, 2)), 17);
    }
}
