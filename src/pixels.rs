//! The pixel buffer a render pass fills.

use image::RgbImage;

use error::{Error, Result};
use planes::RasterDimensions;

/// Split a packed color into its red, green and blue bytes.  The top
/// byte is dropped.
#[inline]
pub fn rgb(color: u32) -> [u8; 3] {
    [
        (color & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        ((color >> 16) & 0xFF) as u8,
    ]
}

/// A row-major raster of packed colors, origin at the top left.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Allocate a zeroed (black) buffer.  Allocation failure is
    /// reported instead of aborting the process.
    pub fn allocate(dims: RasterDimensions) -> Result<PixelBuffer> {
        let len = dims
            .width
            .checked_mul(dims.height)
            .ok_or(Error::Allocation(dims.width, dims.height))?;
        let mut pixels: Vec<u32> = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| Error::Allocation(dims.width, dims.height))?;
        pixels.resize(len, 0);
        Ok(PixelBuffer {
            width: dims.width,
            height: dims.height,
            pixels,
        })
    }

    /// Wrap an existing vector.  Its length must be `width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u32>) -> Result<PixelBuffer> {
        let expected = width.checked_mul(height).unwrap_or(usize::max_value());
        if pixels.len() != expected {
            return Err(Error::BufferSize(pixels.len(), expected));
        }
        Ok(PixelBuffer {
            width,
            height,
            pixels,
        })
    }

    /// Pixels per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The packed color at column `x` of row `y`, if it exists.
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Every pixel, row-major.
    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Give up the buffer.
    pub fn into_vec(self) -> Vec<u32> {
        self.pixels
    }

    /// R, G, B triples in pixel order.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&rgb(*color));
        }
        bytes
    }

    /// Convert to an image the `image` crate can encode in any of its
    /// formats.
    pub fn to_image(&self) -> Result<RgbImage> {
        RgbImage::from_raw(
            self.width as u32,
            self.height as u32,
            self.to_rgb_bytes(),
        )
        .ok_or_else(|| {
            Error::Encode(format!(
                "{}x{} raster does not fit an image",
                self.width, self.height
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Pixel;

    #[test]
    fn rgb_drops_the_top_byte() {
        assert_eq!(rgb(0xAB_30_20_10), [0x10, 0x20, 0x30]);
        assert_eq!(rgb(0x00_FF_FF_FF), [0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn allocates_black() {
        let buffer = PixelBuffer::allocate(RasterDimensions::new(4, 3).unwrap()).unwrap();
        assert_eq!(buffer.as_slice().len(), 12);
        assert!(buffer.as_slice().iter().all(|p| *p == 0));
    }

    #[test]
    fn refuses_mismatched_vectors() {
        assert!(PixelBuffer::from_pixels(3, 3, vec![0; 8]).is_err());
        assert!(PixelBuffer::from_pixels(3, 3, vec![0; 9]).is_ok());
    }

    #[test]
    fn get_is_row_major() {
        let buffer = PixelBuffer::from_pixels(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(buffer.get(0, 1), Some(3));
        assert_eq!(buffer.get(2, 1), Some(5));
        assert_eq!(buffer.get(3, 0), None);
        assert_eq!(buffer.get(0, 2), None);
    }

    #[test]
    fn image_keeps_channel_order() {
        let buffer = PixelBuffer::from_pixels(2, 2, vec![0x0000FF, 0x00FF00, 0xFF0000, 0]).unwrap();
        let image = buffer.to_image().unwrap();
        assert_eq!(image.get_pixel(0, 0).channels(), &[255, 0, 0]);
        assert_eq!(image.get_pixel(1, 0).channels(), &[0, 255, 0]);
        assert_eq!(image.get_pixel(0, 1).channels(), &[0, 0, 255]);
        assert_eq!(image.get_pixel(1, 1).channels(), &[0, 0, 0]);
    }
}
