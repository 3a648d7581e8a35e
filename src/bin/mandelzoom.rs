// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate mandelzoom;
extern crate num;

use clap::{App, Arg, ArgMatches};
use mandelzoom::{Mapping, Palette, PnmSink, ZoomConfig, ZoomRenderer};
use num::Complex;
use std::fs;
use std::str::FromStr;
use std::time::Duration;

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

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
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

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const FOCUS: &str = "focus";
const MAGNIFICATION: &str = "magnification";
const ZOOM: &str = "zoom";
const FRAMES: &str = "frames";
const ITERATIONS: &str = "iterations";
const PALETTE: &str = "palette";
const CORRECTED: &str = "corrected";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelzoom")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Renders an animated zoom into the Mandelbrot set")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Directory the numbered PPM frames are written to"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("700x700")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of each frame"),
        )
        .arg(
            Arg::with_name(FOCUS)
                .required(false)
                .long(FOCUS)
                .short("f")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.702295281061,0.350220783400")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse focal point"))
                .help("Point on the complex plane to zoom towards, as RE,IM"),
        )
        .arg(
            Arg::with_name(MAGNIFICATION)
                .required(false)
                .long(MAGNIFICATION)
                .short("m")
                .takes_value(true)
                .default_value("1.0")
                .validator(|s| {
                    validate_range(
                        &s,
                        ::std::f64::MIN_POSITIVE,
                        ::std::f64::MAX,
                        "Could not parse magnification",
                        "Magnification must be positive",
                    )
                })
                .help("Magnification of the first frame"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("1.02")
                .validator(|s| {
                    validate_range(
                        &s,
                        1.0_f64 + ::std::f64::EPSILON,
                        ::std::f64::MAX,
                        "Could not parse zoom factor",
                        "Zoom factor must be greater than 1",
                    )
                })
                .help("Magnification multiplier between frames"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .required(false)
                .long(FRAMES)
                .short("n")
                .takes_value(true)
                .default_value("40")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        100_000,
                        "Could not parse frame count",
                        "Frame count must be between 1 and 100000",
                    )
                })
                .help("Number of frames to render"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iterations before a point is assumed to be in the set"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .help("Palette file, one r,g,b triple per line"),
        )
        .arg(
            Arg::with_name(CORRECTED)
                .long(CORRECTED)
                .short("c")
                .help("Map rows with the frame height and the imaginary part of the focus"),
        )
        .get_matches()
}

fn config(matches: &ArgMatches) -> ZoomConfig {
    let (width, height) = parse_pair::<usize>(matches.value_of(SIZE).unwrap(), 'x')
        .expect("Error parsing image dimensions");
    let focus =
        parse_complex(matches.value_of(FOCUS).unwrap()).expect("Error parsing focal point");
    let magnification = f64::from_str(matches.value_of(MAGNIFICATION).unwrap())
        .expect("Could not parse magnification.");
    let zoom_factor =
        f64::from_str(matches.value_of(ZOOM).unwrap()).expect("Could not parse zoom factor.");
    let frames =
        u32::from_str(matches.value_of(FRAMES).unwrap()).expect("Could not parse frame count.");
    let max_iterations = u32::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration count.");
    let mapping = if matches.is_present(CORRECTED) {
        Mapping::Corrected
    } else {
        Mapping::Reference
    };

    ZoomConfig {
        width,
        height,
        max_iterations,
        frames,
        zoom_factor,
        focus,
        magnification,
        mapping,
    }
}

fn main() {
    env_logger::init();
    let matches = args();
    let config = config(&matches);

    let palette = match matches.value_of(PALETTE) {
        Some(path) => Palette::load(path),
        None => Ok(Palette::default()),
    };
    let renderer = match palette.and_then(|palette| ZoomRenderer::new(config, palette)) {
        Ok(renderer) => renderer,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let output = matches.value_of(OUTPUT).unwrap();
    if let Err(e) = fs::create_dir_all(output) {
        eprintln!("Could not create {}: {}", output, e);
        std::process::exit(1);
    }
    let mut sink = PnmSink::new(output, config.width, config.height);

    let mut total = Duration::new(0, 0);
    let result = renderer.render_sequence(&mut sink, |report| {
        total += report.elapsed;
        println!("Render done {} {}", report.depth, report.magnification);
    });
    if let Err(e) = result {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }

    println!(
        "Total executing time {} microseconds",
        total.as_secs() * 1_000_000 + u64::from(total.subsec_micros())
    );
}
