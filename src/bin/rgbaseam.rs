// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use failure::{format_err, Error};
use log::{info, Level};
use rgbaseam::SeamCarver;
use std::process;

fn parse_count(matches: &ArgMatches, name: &str) -> Result<Option<u32>, Error> {
    match matches.value_of(name) {
        None => Ok(None),
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| format_err!("--{} expects a whole number, not '{}'", name, value)),
    }
}

// Seams to remove, given either a count or the size to end up at.
fn seams_wanted(
    matches: &ArgMatches,
    count: &str,
    target: &str,
    original: u32,
) -> Result<u32, Error> {
    if let Some(seams) = parse_count(matches, count)? {
        return Ok(seams);
    }
    match parse_count(matches, target)? {
        None => Ok(0),
        Some(0) => Err(format_err!("--{} must be at least 1", target)),
        Some(size) if size > original => Err(format_err!(
            "--{} {} is larger than the image ({}); seam carving cannot enlarge",
            target,
            size,
            original
        )),
        Some(size) => Ok(original - size),
    }
}

fn save(path: &str, buffer: Vec<u8>, (width, height): (u32, u32)) -> Result<(), Error> {
    let image = image::RgbaImage::from_raw(width, height, buffer)
        .ok_or_else(|| format_err!("picture for {} does not fit {}x{}", path, width, height))?;
    image.save(path)?;
    info!("wrote {} ({}x{})", path, width, height);
    Ok(())
}

fn run() -> Result<(), Error> {
    let matches = App::new("rgbaseam")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image resizing by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("Where to write the resized image")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("vertical")
                .short("x")
                .long("vertical")
                .value_name("N")
                .help("Number of vertical seams (columns) to remove")
                .takes_value(true)
                .conflicts_with("width"),
        )
        .arg(
            Arg::with_name("horizontal")
                .short("y")
                .long("horizontal")
                .value_name("N")
                .help("Number of horizontal seams (rows) to remove")
                .takes_value(true)
                .conflicts_with("height"),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .value_name("PIXELS")
                .help("Width to carve the image down to")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .value_name("PIXELS")
                .help("Height to carve the image down to")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("seams")
                .long("seams")
                .value_name("FILE")
                .help("Write the original image with the removed seams in red")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("energy")
                .long("energy")
                .value_name("FILE")
                .help("Write the energy map of the original image")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("energy-seams")
                .long("energy-seams")
                .value_name("FILE")
                .help("Write the energy map with the removed seams in red")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("resized-energy")
                .long("resized-energy")
                .value_name("FILE")
                .help("Write the energy map of the resized image")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("More logging; repeat for more still"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Only log errors")
                .conflicts_with("verbose"),
        )
        .get_matches();

    let level = if matches.is_present("quiet") {
        Level::Error
    } else {
        match matches.occurrences_of("verbose") {
            0 => Level::Warn,
            1 => Level::Info,
            2 => Level::Debug,
            _ => Level::Trace,
        }
    };
    simple_logger::init_with_level(level).map_err(|e| format_err!("{}", e))?;

    // Required arguments are always present once clap has returned.
    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or_default();

    let picture = image::open(input)?.to_rgba();
    let (width, height) = picture.dimensions();
    info!("read {} ({}x{})", input, width, height);

    let vertical = seams_wanted(&matches, "vertical", "width", width)?;
    let horizontal = seams_wanted(&matches, "horizontal", "height", height)?;

    let mut carver = SeamCarver::new(&picture.into_raw(), width, height)?;
    let resized = carver.resize(vertical, horizontal)?;
    save(output, carver.resized_picture()?, resized)?;

    let original = carver.original_dimensions();
    if let Some(path) = matches.value_of("seams") {
        save(path, carver.original_with_seams(), original)?;
    }
    if let Some(path) = matches.value_of("energy") {
        save(path, carver.original_energy_picture(), original)?;
    }
    if let Some(path) = matches.value_of("energy-seams") {
        save(path, carver.energy_with_seams(), original)?;
    }
    if let Some(path) = matches.value_of("resized-energy") {
        save(path, carver.resized_energy_picture()?, resized)?;
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("rgbaseam: {}", e);
        process::exit(1);
    }
}
