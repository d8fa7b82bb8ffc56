// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong between accepting a render request and
//! handing a finished buffer back.  Configuration problems are caught
//! before a single worker starts; resource and worker failures abort the
//! whole pass, so a caller never sees a half-written buffer.

use std::io;

/// The crate-wide error type.
#[derive(Debug, Fail)]
pub enum Error {
    /// The plane region has a non-positive (or non-finite) extent.
    #[fail(
        display = "Region must have positive width and height, got {} x {}",
        _0, _1
    )]
    InvalidRegion(f64, f64),

    /// One side of the raster is smaller than two pixels.
    #[fail(
        display = "Raster must be at least 2x2 pixels, got {}x{}",
        _0, _1
    )]
    RasterTooSmall(usize, usize),

    /// The palette name is not one of the known set.
    #[fail(display = "Unknown palette '{}'", _0)]
    UnknownPalette(String),

    /// The worker count falls outside the supported range.
    #[fail(display = "Worker count must be between 1 and {}, got {}", _1, _0)]
    WorkerCount(usize, usize),

    /// A caller-supplied buffer does not match the raster size.
    #[fail(
        display = "Pixel buffer holds {} pixels but the raster needs {}",
        _0, _1
    )]
    BufferSize(usize, usize),

    /// A caller-supplied buffer was allocated for a different raster
    /// shape: buffer width and height, then the raster's.
    #[fail(
        display = "Pixel buffer is {}x{} but the raster is {}x{}",
        _0, _1, _2, _3
    )]
    BufferShape(usize, usize, usize, usize),

    /// The pixel buffer could not be allocated.
    #[fail(display = "Could not allocate a {}x{} pixel buffer", _0, _1)]
    Allocation(usize, usize),

    /// The operating system refused to start a worker thread.
    #[fail(display = "Could not start render worker: {}", _0)]
    Spawn(#[cause] io::Error),

    /// At least one worker panicked; every worker was joined first.
    #[fail(display = "A render worker panicked")]
    WorkerPanicked,

    /// A raw image stream was truncated or its header was inconsistent.
    #[fail(display = "Malformed raw image: {}", _0)]
    MalformedRaw(String),

    /// The image encoder rejected the buffer or the destination.
    #[fail(display = "Could not encode image: {}", _0)]
    Encode(String),

    /// Reading or writing a stream failed.
    #[fail(display = "{}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

/// Shorthand used throughout the crate.
pub type Result<T> = ::std::result::Result<T, Error>;
