// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Palettes turn an escape result into a packed color.
//!
//! A packed color keeps red in the low byte, green in the next, and
//! blue in the third; the top byte is unused.  Set members are black in
//! every palette.
//!
//! Apart from `Binary`, every palette starts from the *smoothed*
//! iteration count, `v = n - log₂(log₄(|z|²))`, which slides the integer
//! escape count by how far past the escape radius the orbit landed.
//! That removes the hard bands you get from coloring `n` directly.
//! `v` is then scaled onto a fixed number of color steps and everything
//! downstream is integer arithmetic.  The cutoffs and bump centres
//! below are calibration constants; changing any of them changes the
//! picture.

use std::fmt;
use std::str::FromStr;

use error::Error;
use escape::{EscapeResult, MAX_ITERATIONS};

/// The "in the set" color.
pub const BLACK: u32 = 0x00_0000;
/// Saturated white.
pub const WHITE: u32 = 0xFF_FFFF;

const CHANNEL_MAX: i32 = 0xFF;

const NCOLORS_RED: i32 = 8192;
const RED_CUTOFF: i32 = 245;

const NCOLORS_GCY: i32 = 8192;
const GRN_CUTOFF: i32 = 245;
const CYAN_CUTOFF: i32 = 580;
const WHITE_CUTOFF: i32 = 1024;

const NCOLORS_BGY: i32 = 8192;
const BGY_OFFSET: i32 = 280;
const BGY_GRN_OFFSET: i32 = 340;
const BGY_YLW_OFFSET: i32 = 360;
const BGY_TOP: i32 = 8000;

const NCOLORS_BO: i32 = 8192;
const BO_PERIOD: i32 = 1024;
const BO_PERIODS: i32 = 8;
const BO_BLUE_CENTER: i32 = 256;
const BO_GREEN_CENTER: i32 = 640;
const BO_RED_CENTER: i32 = 768;

/// The closed set of palettes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    /// White outside the set, black inside.
    Binary,
    /// Black through red to white.
    Red,
    /// Black through green and cyan to white.
    GreenCyan,
    /// Repeating blue, yellow and white bands.
    BlueGreenYellow,
    /// Repeating blue and orange bands.
    BlueOrange,
}

impl Palette {
    /// Every palette, in the order they are listed to users.
    pub const ALL: [Palette; 5] = [
        Palette::Binary,
        Palette::Red,
        Palette::GreenCyan,
        Palette::BlueGreenYellow,
        Palette::BlueOrange,
    ];

    /// The name accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Palette::Binary => "binary",
            Palette::Red => "red",
            Palette::GreenCyan => "green-cyan",
            Palette::BlueGreenYellow => "blue-green-yellow",
            Palette::BlueOrange => "blue-orange",
        }
    }

    /// Map an escape result to a packed color.
    pub fn color(self, result: EscapeResult) -> u32 {
        self.color_of(result.iterations, result.magnitude)
    }

    /// Map an iteration count and squared escape magnitude to a packed
    /// color.  Total over its inputs: any count, any magnitude.
    pub fn color_of(self, iterations: u32, magnitude: f64) -> u32 {
        match self.channels_of(iterations, magnitude) {
            Some([r, g, b]) => pack(r, g, b),
            None => BLACK,
        }
    }

    // Red, green and blue before packing; `None` for set members.
    fn channels_of(self, iterations: u32, magnitude: f64) -> Option<[i32; 3]> {
        if iterations > MAX_ITERATIONS {
            return None;
        }
        Some(match self {
            Palette::Binary => [CHANNEL_MAX; 3],
            Palette::Red => red(iterations, magnitude),
            Palette::GreenCyan => green_cyan(iterations, magnitude),
            Palette::BlueGreenYellow => blue_green_yellow(iterations, magnitude),
            Palette::BlueOrange => blue_orange(iterations, magnitude),
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::BlueGreenYellow
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = Error;

    fn from_str(s: &str) -> Result<Palette, Error> {
        Palette::ALL
            .iter()
            .find(|p| p.name() == s)
            .cloned()
            .ok_or_else(|| Error::UnknownPalette(s.to_string()))
    }
}

/// Pack three channels, red lowest.
pub fn pack(r: i32, g: i32, b: i32) -> u32 {
    ((b as u32) << 16) | ((g as u32) << 8) | (r as u32)
}

fn saturate(channel: i32) -> i32 {
    channel.max(0).min(CHANNEL_MAX)
}

/// The continuous iteration count.  Not finite when `magnitude <= 1`, which
/// the escape evaluator never produces.
pub fn smoothed(iterations: u32, magnitude: f64) -> f64 {
    f64::from(iterations) - (magnitude.ln() / 4f64.ln()).ln() / 2f64.ln()
}

// `v` scaled onto `ncolors` steps, truncated toward zero.  Orbits that
// land far past the escape radius on their first step give a small
// negative index, which the bump palettes take as is.  Only NaN and
// wild hand-fed magnitudes reach the `±ncolors` bounds.
fn scaled(iterations: u32, magnitude: f64, ncolors: i32) -> i32 {
    let density = f64::from(ncolors) / (f64::from(MAX_ITERATIONS) + 1.0);
    let color = (smoothed(iterations, magnitude) * density) as i32;
    color.max(-ncolors).min(ncolors)
}

// The ramps index their segments from zero.
fn ramp_index(iterations: u32, magnitude: f64, ncolors: i32) -> i32 {
    scaled(iterations, magnitude, ncolors).max(0)
}

fn red(iterations: u32, magnitude: f64) -> [i32; 3] {
    let color = ramp_index(iterations, magnitude, NCOLORS_RED);
    if color < RED_CUTOFF {
        [(256 * color) / RED_CUTOFF, 0, 0]
    } else {
        let gb = saturate(256 * (color - RED_CUTOFF) / (NCOLORS_RED - RED_CUTOFF));
        [CHANNEL_MAX, gb, gb]
    }
}

fn green_cyan(iterations: u32, magnitude: f64) -> [i32; 3] {
    let color = ramp_index(iterations, magnitude, NCOLORS_GCY);
    if color < GRN_CUTOFF {
        [0, (256 * color) / GRN_CUTOFF, 0]
    } else if color < CYAN_CUTOFF {
        let b = 256 * (color - GRN_CUTOFF) / (CYAN_CUTOFF - GRN_CUTOFF);
        [0, CHANNEL_MAX, b]
    } else if color < WHITE_CUTOFF {
        let r = 256 * (color - CYAN_CUTOFF) / (WHITE_CUTOFF - CYAN_CUTOFF);
        [r, CHANNEL_MAX, CHANNEL_MAX]
    } else {
        [CHANNEL_MAX; 3]
    }
}

// A bump of height 255 and half-width 100, centred `d` steps away.
fn white_bump(d: i32) -> i32 {
    2_550_000 / (10_000 + d * d)
}

fn blue_green_yellow(iterations: u32, magnitude: f64) -> [i32; 3] {
    let color = scaled(iterations, magnitude, NCOLORS_BGY);
    let (mut r, mut g, mut b) = (0, 0, 0);

    // Centres cycle blue, yellow, white with uneven spacing.
    let mut center = BGY_OFFSET;
    let mut band = 0;
    while center < BGY_TOP {
        let xdiff = color - center;
        let xnorm = 10_000 + xdiff * xdiff;
        match band % 3 {
            0 => {
                b += 2_550_000 / xnorm;
                center += BGY_GRN_OFFSET;
            }
            1 => {
                r += 2_550_000 / xnorm;
                g += 2_050_000 / xnorm;
                center += BGY_YLW_OFFSET;
            }
            _ => {
                let w = 2_550_000 / xnorm;
                r += w;
                g += w;
                b += w;
                center += BGY_OFFSET;
            }
        }
        band += 1;
    }

    let white = white_bump(color - NCOLORS_BGY);
    [saturate(r + white), saturate(g + white), saturate(b + white)]
}

fn blue_orange(iterations: u32, magnitude: f64) -> [i32; 3] {
    let color = scaled(iterations, magnitude, NCOLORS_BO);
    let (mut r, mut g, mut b) = (0, 0, 0);

    for period in 0..BO_PERIODS {
        let base = period * BO_PERIOD;
        let dxr = color - (base + BO_RED_CENTER);
        let dxg = color - (base + BO_GREEN_CENTER);
        let dxb = color - (base + BO_BLUE_CENTER);
        r += saturate(376 * 85_577 / (85_577 + dxr * dxr) - 111);
        g += saturate(256 * 19_918 / (19_918 + dxg * dxg));
        b += saturate(257 * 19_997 / (19_997 + dxb * dxb));
    }

    let white = white_bump(color - NCOLORS_BO);
    [saturate(r + white), saturate(g + white), saturate(b + white)]
}
