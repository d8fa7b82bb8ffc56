#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring and adding `c` never runs off to
//! infinity.  For every pixel of a raster we pick the matching point,
//! count how many rounds it takes to escape the circle of radius 2,
//! and turn that count into a color.  Points that never escape are
//! drawn black.
//!
//! Counting rounds gives whole numbers, which paint the picture in
//! hard-edged bands.  All palettes except `binary` first smooth the
//! count using how far past the escape radius the orbit landed, then
//! walk a fixed color ramp.
//!
//! The raster is split into bands of rows and each band is drawn by its
//! own thread.  Bands never overlap, so the threads share nothing but
//! read-only inputs, and the result is identical however many threads
//! are used.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate crossbeam;
extern crate image;
extern crate itertools;
extern crate num;

pub mod error;
pub mod escape;
pub mod palette;
pub mod pixels;
pub mod planes;
pub mod raw;
pub mod render;
pub mod viewport;

pub use error::{Error, Result};
pub use num::Complex;
pub use escape::{evaluate, EscapeResult, MAX_ITERATIONS, SET_MEMBER};
pub use palette::Palette;
pub use pixels::PixelBuffer;
pub use planes::{Pixel, PlaneMapper, PlaneRegion, RasterDimensions};
pub use render::{row_ranges, RowRange, MAX_WORKERS};

/// Render a full pass into a freshly allocated buffer.
///
/// `palette` is looked up by name; `workers` must be within
/// `1..=MAX_WORKERS`.  Every configuration problem is reported before
/// the buffer is allocated or any worker starts.
///
/// ```
/// use mbrender::{render, Complex, PlaneRegion, RasterDimensions};
///
/// let region = PlaneRegion::new(Complex::new(-2.0, -1.2), 3.0, 2.4).unwrap();
/// let dims = RasterDimensions::new(3, 3).unwrap();
/// let picture = render(region, dims, "binary", 2).unwrap();
/// assert_eq!(picture.get(1, 1), Some(0x000000));
/// ```
pub fn render(
    region: PlaneRegion,
    dims: RasterDimensions,
    palette: &str,
    workers: usize,
) -> Result<PixelBuffer> {
    let palette: Palette = palette.parse()?;
    render::check_workers(workers)?;
    let mut buffer = PixelBuffer::allocate(dims)?;
    render_into(&mut buffer, region, dims, palette, workers)?;
    Ok(buffer)
}

/// Render a full pass into a buffer the caller already owns.  The
/// buffer must have been allocated for `dims`.
pub fn render_into(
    buffer: &mut PixelBuffer,
    region: PlaneRegion,
    dims: RasterDimensions,
    palette: Palette,
    workers: usize,
) -> Result<()> {
    if buffer.width() != dims.width || buffer.height() != dims.height {
        return Err(Error::BufferShape(
            buffer.width(),
            buffer.height(),
            dims.width,
            dims.height,
        ));
    }
    let mapper = PlaneMapper::new(dims, region);
    render::render_into(buffer.as_mut_slice(), &mapper, palette, workers)
}
