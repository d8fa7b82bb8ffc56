extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mbrender;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mbrender::raw::write_raw;
use mbrender::viewport::ViewportBuilder;
use mbrender::{Complex, Palette, PixelBuffer, MAX_WORKERS};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// Accepts both `re,im` and `(re,im)`.
fn parse_complex(s: &str) -> Option<Complex<f64>> {
    let s = s.trim();
    let s = if s.starts_with('(') && s.ends_with(')') {
        &s[1..s.len() - 1]
    } else {
        s
    };
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_complex(s: &str, err: &str) -> Result<(), String> {
    match parse_complex(s) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_span(s: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(f) if f.is_finite() && f > 0.0 => Ok(()),
        Ok(_) => Err("Span must be a positive number".to_string()),
        Err(_) => Err("Could not parse span".to_string()),
    }
}

const OUTPUT: &str = "output";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const POSITION: &str = "position";
const REAL: &str = "real";
const IMAG: &str = "imag";
const PALETTE: &str = "palette";
const THREADS: &str = "threads";

fn default_threads() -> usize {
    num_cpus::get().max(1).min(MAX_WORKERS)
}

fn args<'a>(default_threads: &'a str, palettes: &'a [&'a str]) -> ArgMatches<'a> {
    App::new("mbrender")
        .version("0.1.0")
        .about("Smooth-colored Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file; .mbt writes raw RGB triples, anything else is encoded by extension"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .required(false)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .validator(|s| {
                    validate_range::<u32>(
                        &s,
                        2,
                        65_535,
                        "Could not parse width",
                        "Width must be between 2 and 65535",
                    )
                })
                .help("Width of output image in pixels"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .required(false)
                .long(HEIGHT)
                // Taking -h leaves help on --help only.
                .short("h")
                .takes_value(true)
                .validator(|s| {
                    validate_range::<u32>(
                        &s,
                        2,
                        65_535,
                        "Could not parse height",
                        "Height must be between 2 and 65535",
                    )
                })
                .help("Height of output image in pixels"),
        )
        .arg(
            Arg::with_name(POSITION)
                .required(false)
                .long(POSITION)
                .short("p")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_complex(&s, "Could not parse position"))
                .help("Lower left corner of the region, as re,im"),
        )
        .arg(
            Arg::with_name(REAL)
                .required(false)
                .long(REAL)
                .short("r")
                .takes_value(true)
                .validator(|s| validate_span(&s))
                .help("Width of the region along the real axis"),
        )
        .arg(
            Arg::with_name(IMAG)
                .required(false)
                .long(IMAG)
                .short("i")
                .takes_value(true)
                .validator(|s| validate_span(&s))
                .help("Height of the region along the imaginary axis"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .short("c")
                .takes_value(true)
                .possible_values(palettes)
                .default_value(palettes[3])
                .help("Color palette"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value(default_threads)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        MAX_WORKERS,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", MAX_WORKERS),
                    )
                })
                .help("Number of threads to use in renderer"),
        )
        .get_matches()
}

fn write_image(outfile: &str, buffer: &PixelBuffer) -> mbrender::Result<()> {
    let path = Path::new(outfile);
    match path.extension().and_then(|e| e.to_str()) {
        Some("mbt") => {
            let mut output = BufWriter::new(File::create(&path)?);
            write_raw(buffer, &mut output)
        }
        _ => buffer
            .to_image()?
            .save(path)
            .map_err(|e| mbrender::Error::Encode(e.to_string())),
    }
}

fn run(matches: &ArgMatches) -> mbrender::Result<()> {
    let mut viewport = ViewportBuilder::new();
    if let Some(origin) = matches.value_of(POSITION).and_then(parse_complex) {
        viewport = viewport.origin(origin);
    }
    if let Some(span) = matches.value_of(REAL).and_then(|s| f64::from_str(s).ok()) {
        viewport = viewport.real_span(span);
    }
    if let Some(span) = matches.value_of(IMAG).and_then(|s| f64::from_str(s).ok()) {
        viewport = viewport.imag_span(span);
    }
    if let Some(width) = matches.value_of(WIDTH).and_then(|s| usize::from_str(s).ok()) {
        viewport = viewport.width(width);
    }
    if let Some(height) = matches.value_of(HEIGHT).and_then(|s| usize::from_str(s).ok()) {
        viewport = viewport.height(height);
    }
    let (region, dims) = viewport.build()?;

    let far = region.far_corner();
    info!("start re : {}\timag: {}", region.origin.re, region.origin.im);
    info!("finish re: {}\timag: {}", far.re, far.im);
    info!("width: {}px\theight: {}px", dims.width, dims.height);

    let palette = matches.value_of(PALETTE).unwrap_or("blue-green-yellow");
    let threads = matches
        .value_of(THREADS)
        .and_then(|s| usize::from_str(s).ok())
        .unwrap_or_else(default_threads);

    let buffer = mbrender::render(region, dims, palette, threads)?;
    write_image(matches.value_of(OUTPUT).unwrap_or_default(), &buffer)
}

fn main() {
    env_logger::init();

    let default_threads = default_threads().to_string();
    let palettes: Vec<&str> = Palette::ALL.iter().map(|p| p.name()).collect();
    let matches = args(&default_threads, &palettes);

    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
