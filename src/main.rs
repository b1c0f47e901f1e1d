#![recursion_limit = "1024"]

#[macro_use]
extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate glium;
extern crate glutin_winit;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate nalgebra;
extern crate num;
extern crate raw_window_handle;
extern crate rayon;
extern crate winit;

mod colormap;
mod errors;
mod field;
mod gfx;
mod glyph;
mod grid;
mod math;
mod normalize;
mod scene;

use std::path::PathBuf;
use std::process;

use clap::{AppSettings, Arg, ArgMatches};

use crate::colormap::Colormap;
use crate::errors::Result;
use crate::field::Gauge;
use crate::gfx::App;
use crate::scene::{FieldKind, SceneSpec};

fn cli<'a, 'b>() -> clap::App<'a, 'b> {
    clap::App::new("Dirac monopole.")
        .version("0.1.0")
        .author("Marius Cobzarenco <marius@reinfer.io>")
        .about("Renders the vector potential or magnetic field of a Dirac monopole as glyphs.")
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(Arg::with_name("field")
            .index(1)
            .possible_values(&["potential", "magnetic"])
            .default_value("potential"))
        .arg(Arg::with_name("nx")
            .long("nx")
            .value_name("usize")
            .takes_value(true))
        .arg(Arg::with_name("ny")
            .long("ny")
            .value_name("usize")
            .takes_value(true))
        .arg(Arg::with_name("nz")
            .long("nz")
            .value_name("usize")
            .takes_value(true))
        .arg(Arg::with_name("bound")
            .long("bound")
            .value_name("f64")
            .takes_value(true))
        .arg(Arg::with_name("charge")
            .long("charge")
            .value_name("f64")
            .takes_value(true))
        .arg(Arg::with_name("epsilon")
            .long("epsilon")
            .value_name("f64")
            .takes_value(true))
        .arg(Arg::with_name("gauge")
            .long("gauge")
            .possible_values(&["upper", "lower"])
            .takes_value(true))
        .arg(Arg::with_name("glyph_scale")
            .long("glyph-scale")
            .value_name("f64")
            .takes_value(true))
        .arg(Arg::with_name("colormap")
            .long("colormap")
            .possible_values(&["viridis", "plasma"])
            .takes_value(true))
        .arg(Arg::with_name("no_recenter").long("no-recenter"))
        .arg(Arg::with_name("no_axes").long("no-axes"))
        .arg(Arg::with_name("zoom")
            .long("zoom")
            .value_name("f64")
            .takes_value(true))
        .arg(Arg::with_name("width")
            .long("width")
            .value_name("u32")
            .takes_value(true))
        .arg(Arg::with_name("height")
            .long("height")
            .value_name("u32")
            .takes_value(true))
        .arg(Arg::with_name("output")
            .long("output")
            .short("o")
            .value_name("PATH")
            .takes_value(true))
}

/// Starts from the preset named on the command line and applies overrides.
fn scene_spec(matches: &ArgMatches) -> Result<SceneSpec> {
    let kind: FieldKind = matches.value_of("field").unwrap_or("potential").parse()?;
    let mut spec = SceneSpec::preset(kind);

    if matches.is_present("bound") {
        let bound = value_t!(matches, "bound", f64)?;
        for axis in spec.axes.iter_mut() {
            axis.start = -bound;
            axis.end = bound;
        }
    }
    for (index, name) in ["nx", "ny", "nz"].iter().enumerate() {
        if matches.is_present(*name) {
            spec.axes[index].count = value_t!(matches, *name, usize)?;
        }
    }
    if matches.is_present("charge") {
        spec.charge = value_t!(matches, "charge", f64)?;
    }
    if matches.is_present("epsilon") {
        spec.epsilon = value_t!(matches, "epsilon", f64)?;
    }
    if let Some(gauge) = matches.value_of("gauge") {
        spec.gauge = gauge.parse::<Gauge>()?;
    }
    if matches.is_present("glyph_scale") {
        spec.glyph_scale = value_t!(matches, "glyph_scale", f64)?;
    }
    if let Some(colormap) = matches.value_of("colormap") {
        spec.colormap = colormap.parse::<Colormap>()?;
    }
    if matches.is_present("no_recenter") {
        spec.recenter_glyphs = false;
    }
    if matches.is_present("no_axes") {
        spec.show_axes = false;
    }
    if matches.is_present("zoom") {
        spec.camera.zoom = value_t!(matches, "zoom", f64)?;
    }
    if matches.is_present("width") {
        spec.width = value_t!(matches, "width", u32)?;
    }
    if matches.is_present("height") {
        spec.height = value_t!(matches, "height", u32)?;
    }
    if let Some(output) = matches.value_of("output") {
        spec.output = PathBuf::from(output);
    }

    spec.validate()?;
    Ok(spec)
}

fn start_app() -> Result<()> {
    let matches = cli().get_matches();
    let spec = scene_spec(&matches)?;
    info!("Rendering {} with params {:?}", spec.field, spec);
    App::new(spec)?.run()
}

fn main() {
    env_logger::init();
    if let Err(err) = start_app() {
        error!("{}", err);
        for cause in err.iter().skip(1) {
            error!("  caused by: {}", cause);
        }
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<SceneSpec> {
        let mut argv = vec!["monopole"];
        argv.extend_from_slice(args);
        let matches = cli().get_matches_from_safe(argv)?;
        scene_spec(&matches)
    }

    #[test]
    fn test_defaults_match_presets() {
        assert_eq!(parse(&[]).unwrap(), SceneSpec::potential());
        assert_eq!(parse(&["magnetic"]).unwrap(), SceneSpec::magnetic());
    }

    #[test]
    fn test_overrides() {
        let spec = parse(&["magnetic",
                           "--nz",
                           "4",
                           "--bound",
                           "2",
                           "--charge",
                           "-1.5",
                           "--no-recenter",
                           "--gauge",
                           "lower",
                           "--colormap",
                           "viridis",
                           "-o",
                           "out.png"])
            .unwrap();
        assert_eq!(spec.grid().shape(), [8, 8, 4]);
        assert_eq!(spec.axes[0].start, -2.0);
        assert_eq!(spec.axes[2].end, 2.0);
        assert_eq!(spec.charge, -1.5);
        assert!(!spec.recenter_glyphs);
        assert_eq!(spec.gauge, Gauge::Lower);
        assert_eq!(spec.colormap, Colormap::Viridis);
        assert_eq!(spec.output, PathBuf::from("out.png"));
    }

    #[test]
    fn test_negative_values_are_numbers() {
        let spec = parse(&["--charge", "-2", "--bound", "-0.5", "--nz", "5"]).unwrap();
        assert_eq!(spec.charge, -2.0);
        // A negative half-width swaps the axis ends.
        assert_eq!(spec.axes[1].start, 0.5);
        assert_eq!(spec.axes[1].end, -0.5);
        assert_eq!(spec.axes[2].count, 5);

        let err = parse(&["--zoom", "-1.4"]).unwrap_err();
        assert!(err.to_string().contains("zoom"), "{}", err);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(parse(&["--nx", "many"]).is_err());
        assert!(parse(&["--nx", "0"]).is_err());
        assert!(parse(&["--epsilon", "-1"]).is_err());
        assert!(parse(&["electric"]).is_err());
    }
}
