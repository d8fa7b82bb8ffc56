// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parallel scheduler.
//!
//! The raster is cut into horizontal bands of whole rows, one per
//! worker, and the pixel buffer is split at the same boundaries with
//! `split_at_mut`.  Each worker therefore holds the only mutable
//! reference to its band and nobody needs a lock.  Every band is
//! computed with exactly the same arithmetic, so the picture does not
//! depend on how many workers drew it.

extern crate crossbeam;

use itertools::iproduct;
use std::ops::Range;
use std::time::Instant;

use error::{Error, Result};
use escape::evaluate;
use palette::Palette;
use planes::{Pixel, PlaneMapper};

/// The most workers a single pass may use.
pub const MAX_WORKERS: usize = 64;

/// A half-open span of rows handed to one worker.
pub type RowRange = Range<usize>;

/// Fail unless `workers` is within `1..=MAX_WORKERS`.
pub fn check_workers(workers: usize) -> Result<usize> {
    if workers < 1 || workers > MAX_WORKERS {
        return Err(Error::WorkerCount(workers, MAX_WORKERS));
    }
    Ok(workers)
}

/// Partition `0..height` into `workers` contiguous bands.  All bands
/// hold `height / workers` rows except the last, which also takes the
/// remainder.  With more workers than rows the leading bands are empty.
pub fn row_ranges(height: usize, workers: usize) -> Vec<RowRange> {
    let workers = workers.max(1);
    let size = height / workers;
    (0..workers)
        .map(|i| {
            let low = i * size;
            let high = if i + 1 == workers { height } else { low + size };
            low..high
        })
        .collect()
}

/// Compute every pixel of `rows` into `band`, which holds exactly those
/// rows of the full buffer.
fn render_rows(mapper: &PlaneMapper, palette: Palette, rows: RowRange, band: &mut [u32]) {
    let first = mapper.pixel_to_offset(&Pixel(0, rows.start));
    for (y, x) in iproduct!(rows, 0..mapper.raster.width) {
        let pixel = Pixel(x, y);
        let point = mapper.pixel_to_point(&pixel);
        band[mapper.pixel_to_offset(&pixel) - first] = palette.color(evaluate(point));
    }
}

/// Fill `buffer` with the picture described by `mapper`, using
/// `workers` threads.  Returns only when every worker has been joined.
/// If any worker could not be started or panicked, the whole pass
/// fails and the buffer contents must be discarded.
pub fn render_into(
    buffer: &mut [u32],
    mapper: &PlaneMapper,
    palette: Palette,
    workers: usize,
) -> Result<()> {
    run_bands(buffer, mapper, workers, |mapper, rows, band| {
        render_rows(mapper, palette, rows, band)
    })
}

// Split `buffer` along `row_ranges` and run `work` on every band, each
// on its own scoped thread.
fn run_bands<F>(buffer: &mut [u32], mapper: &PlaneMapper, workers: usize, work: F) -> Result<()>
where
    F: Fn(&PlaneMapper, RowRange, &mut [u32]) + Sync,
{
    let workers = check_workers(workers)?;
    if buffer.len() != mapper.raster.len() {
        return Err(Error::BufferSize(buffer.len(), mapper.raster.len()));
    }

    let started = Instant::now();
    let width = mapper.raster.width;
    let ranges = row_ranges(mapper.raster.height, workers);

    // Cut the buffer into bands matching the row ranges.
    let mut bands: Vec<(RowRange, &mut [u32])> = Vec::with_capacity(ranges.len());
    let mut rest = buffer;
    for rows in ranges {
        let current = rest;
        let (band, tail) = current.split_at_mut((rows.end - rows.start) * width);
        bands.push((rows, band));
        rest = tail;
    }

    let work = &work;
    let outcome = crossbeam::scope(|spawner| -> Result<()> {
        for (id, (rows, band)) in bands.into_iter().enumerate() {
            debug!("worker {} takes rows {}..{}", id, rows.start, rows.end);
            spawner
                .builder()
                .name(format!("mbrender-{}", id))
                .spawn(move |_| work(mapper, rows, band))
                .map_err(Error::Spawn)?;
        }
        Ok(())
    });

    match outcome {
        Ok(Ok(())) => {
            info!(
                "rendered {}x{} with {} workers in {:?}",
                width,
                mapper.raster.height,
                workers,
                started.elapsed()
            );
            Ok(())
        }
        Ok(Err(e)) => Err(e),
        Err(_) => Err(Error::WorkerPanicked),
    }
}
