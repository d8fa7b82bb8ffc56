// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The raw triple format, conventionally saved with a `.mbt`
//! extension: width and height as little-endian 32-bit unsigned
//! integers, then one R, G, B triple per pixel in row-major order.

use std::io::{self, Read, Write};

use error::{Error, Result};
use pixels::PixelBuffer;

const HEADER_LEN: usize = 8;

/// Write `buffer` to `out` in the raw triple format.
pub fn write_raw<W: Write>(buffer: &PixelBuffer, out: &mut W) -> Result<()> {
    let (width, height) = (header_field(buffer.width())?, header_field(buffer.height())?);
    out.write_all(&width.to_le_bytes())?;
    out.write_all(&height.to_le_bytes())?;
    out.write_all(&buffer.to_rgb_bytes())?;
    out.flush()?;
    Ok(())
}

fn header_field(value: usize) -> Result<u32> {
    if value > u32::max_value() as usize {
        return Err(Error::MalformedRaw(format!(
            "dimension {} does not fit the header",
            value
        )));
    }
    Ok(value as u32)
}

/// Read a raw triple stream back into a buffer.  The top byte of each
/// packed color comes back as zero.
pub fn read_raw<R: Read>(input: &mut R) -> Result<PixelBuffer> {
    let mut header = [0u8; HEADER_LEN];
    read_exactly(input, &mut header, "header")?;
    let width = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
    let height = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;

    let len = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| Error::MalformedRaw(format!("{}x{} is too large", width, height)))?;
    // Grow with the data actually present rather than trusting the header.
    let mut triples = Vec::new();
    input.by_ref().take(len as u64).read_to_end(&mut triples)?;
    if triples.len() != len {
        return Err(Error::MalformedRaw(format!(
            "truncated pixel data: header promises {}x{}, got {} bytes",
            width,
            height,
            triples.len()
        )));
    }

    let mut extra = [0u8; 1];
    if input.read(&mut extra)? != 0 {
        return Err(Error::MalformedRaw(
            "trailing bytes after pixel data".to_string(),
        ));
    }

    let pixels = triples
        .chunks(3)
        .map(|t| (u32::from(t[2]) << 16) | (u32::from(t[1]) << 8) | u32::from(t[0]))
        .collect();
    PixelBuffer::from_pixels(width, height, pixels)
}

fn read_exactly<R: Read>(input: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    input.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::MalformedRaw(format!("truncated {}", what)),
        _ => Error::Io(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(buffer: &PixelBuffer) -> Vec<u8> {
        let mut out = Vec::new();
        write_raw(buffer, &mut out).unwrap();
        out
    }

    #[test]
    fn layout_is_header_then_triples() {
        let buffer = PixelBuffer::from_pixels(2, 1, vec![0x00_33_22_11, 0x7F_CC_BB_AA]).unwrap();
        assert_eq!(
            encode(&buffer),
            vec![2, 0, 0, 0, 1, 0, 0, 0, 0x11, 0x22, 0x33, 0xAA, 0xBB, 0xCC]
        );
    }

    #[test]
    fn round_trip_keeps_channels_and_drops_top_byte() {
        let pixels: Vec<u32> = (0..12u32).map(|i| 0xEE00_0000 | (i * 0x0001_0203)).collect();
        let buffer = PixelBuffer::from_pixels(4, 3, pixels.clone()).unwrap();
        let decoded = read_raw(&mut Cursor::new(encode(&buffer))).unwrap();
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 3);
        let expected: Vec<u32> = pixels.iter().map(|p| p & 0x00FF_FFFF).collect();
        assert_eq!(decoded.as_slice(), &expected[..]);
    }

    #[test]
    fn rejects_truncated_streams() {
        let buffer = PixelBuffer::from_pixels(2, 2, vec![1, 2, 3, 4]).unwrap();
        let mut bytes = encode(&buffer);
        bytes.pop();
        match read_raw(&mut Cursor::new(bytes)) {
            Err(Error::MalformedRaw(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(read_raw(&mut Cursor::new(vec![2, 0, 0])).is_err());
    }

    #[test]
    fn huge_header_without_data_is_malformed() {
        let header = vec![0xFF, 0xFF, 0xFF, 0x7F, 0xFF, 0xFF, 0x00, 0x00];
        match read_raw(&mut Cursor::new(header)) {
            Err(Error::MalformedRaw(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_trailing_bytes() {
        let buffer = PixelBuffer::from_pixels(2, 2, vec![1, 2, 3, 4]).unwrap();
        let mut bytes = encode(&buffer);
        bytes.push(0);
        assert!(read_raw(&mut Cursor::new(bytes)).is_err());
    }
}
