extern crate clap;
extern crate env_logger;
extern crate image;
extern crate mandelzoom;
extern crate num;
extern crate rand;

use clap::{App, Arg, ArgMatches};
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use mandelzoom::{packed_len, FrameBuffer, RenderConfig, ZoomRenderer};
use rand::prelude::*;
use std::fs::File;
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

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
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
const ZOOMS: &str = "zooms";
const PROBE_DEPTH: &str = "probe-depth";
const DEPTH: &str = "depth";
const SEED: &str = "seed";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelzoom")
        .version("0.1.0")
        .about("Zooms onto a random edge of the Mandelbrot set and renders it")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x480")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse frame size"))
                .help("Size of the rendered frame"),
        )
        .arg(
            Arg::with_name(ZOOMS)
                .required(false)
                .long(ZOOMS)
                .short("z")
                .takes_value(true)
                .default_value("3")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        16,
                        "Could not parse zoom step count",
                        "Zoom step count must be between 1 and 16",
                    )
                })
                .help("Number of probe-and-zoom rounds before the final render"),
        )
        .arg(
            Arg::with_name(PROBE_DEPTH)
                .required(false)
                .long(PROBE_DEPTH)
                .takes_value(true)
                .default_value("50")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        100_000,
                        "Could not parse probe depth",
                        "Probe depth must be between 1 and 100000",
                    )
                })
                .help("Iteration budget for the probe passes"),
        )
        .arg(
            Arg::with_name(DEPTH)
                .required(false)
                .long(DEPTH)
                .short("d")
                .takes_value(true)
                .default_value("100")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        100_000,
                        "Could not parse render depth",
                        "Render depth must be between 1 and 100000",
                    )
                })
                .help("Iteration budget for the final pass"),
        )
        .arg(
            Arg::with_name(SEED)
                .required(false)
                .long(SEED)
                .takes_value(true)
                .validator(|s| match u64::from_str(&s) {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Could not parse random seed".to_string()),
                })
                .help("Seed for the zoom-target choice, for reproducible runs"),
        )
        .get_matches()
}

// The inks of the 7.3" F panel, index-matched to the packed palette
// values.  Only the preview image cares; the panel knows its own inks.
const PANEL_COLORS: [[u8; 3]; 8] = [
    [0x00, 0x00, 0x00], // black
    [0xFF, 0xFF, 0xFF], // white
    [0x00, 0x80, 0x00], // green
    [0x00, 0x00, 0xFF], // blue
    [0xFF, 0x00, 0x00], // red
    [0xFF, 0xFF, 0x00], // yellow
    [0xFF, 0x80, 0x00], // orange
    [0xE6, 0xE6, 0xE6], // clean (no ink)
];

/// Expands the packed palette frame into RGB triples for the preview.
fn expand(packed: &mut [u8], width: usize, height: usize) -> Vec<u8> {
    let frame = FrameBuffer::new(packed, width, height).expect("frame no longer matches its size");
    let mut rgb = Vec::with_capacity(width * height * 3);
    for row in 0..height {
        for col in 0..width {
            let ink = num::clamp(frame.get(col, row) as usize, 0, PANEL_COLORS.len() - 1);
            rgb.extend_from_slice(&PANEL_COLORS[ink]);
        }
    }
    rgb
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), std::io::Error> {
    let output = File::create(outfile)?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
    encoder.encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::RGB(8))?;
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    let (width, height): (usize, usize) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing frame size");
    let zoom_steps =
        u32::from_str(matches.value_of(ZOOMS).unwrap()).expect("Could not parse zoom step count");
    let probe_depth = usize::from_str(matches.value_of(PROBE_DEPTH).unwrap())
        .expect("Could not parse probe depth");
    let final_depth =
        usize::from_str(matches.value_of(DEPTH).unwrap()).expect("Could not parse render depth");

    let mut rng = match matches.value_of(SEED) {
        Some(seed) => StdRng::seed_from_u64(u64::from_str(seed).expect("Could not parse seed")),
        None => StdRng::from_entropy(),
    };

    let renderer = ZoomRenderer::new(RenderConfig {
        width,
        height,
        probe_depth,
        final_depth,
        zoom_steps,
        ..Default::default()
    });
    let mut image = vec![0u8; packed_len(width, height)];

    match renderer.render(&mut image, &mut rng) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(viewport) => {
            println!("Offset: {}, {}", viewport.center.re, viewport.center.im);
            let rgb = expand(&mut image, width, height);
            write_image(matches.value_of(OUTPUT).unwrap(), &rgb, (width, height)).unwrap();
        }
    }
}
