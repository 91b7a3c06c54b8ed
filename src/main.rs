// Load a json file that specifies which fractal we are going to make and
// set's it's parameters, then write it out as a png or an svg

use std::io::{Error, Read, ErrorKind};
use std::fs::{self, File, create_dir_all};
use std::env;
use std::path::Path;

use json::JsonValue;

use halley_basins::functions::FUNCTIONS;
use halley_basins::halley::{self, Export, HalleyFractal, RenderError, RenderOutput};

fn make_directory_for_image(path_str : &str) -> std::io::Result<()> {
    let path = Path::new(path_str);
    if let Some(dir) = path.parent() {
        create_dir_all(dir)
    } else {
        Ok(())
    }
}

fn make_fractal(input : &JsonValue, default_export : Export) -> std::io::Result<HalleyFractal> {
    let algorithm = input["algorithm"].as_str().unwrap_or("none");
    match algorithm {
        "halley" => Ok(HalleyFractal::from_json(input, default_export)?),
        _ => Err(Error::new(ErrorKind::InvalidData, "Unknown algorithm"))
    }
}

// Vector exports only go to .svg and rasters never do
fn check_output_kind(export : Export, out_filename : &str) -> std::io::Result<()> {
    let is_svg = out_filename.ends_with(".svg");
    if export.is_vector() == is_svg {
        Ok(())
    } else if is_svg {
        Err(Error::new(ErrorKind::InvalidData, "Raster exports can't be written as .svg"))
    } else {
        Err(Error::new(ErrorKind::InvalidData, "Vector exports need an .svg output"))
    }
}

fn is_unknown_function(err : &Error) -> bool {
    matches!(
        err.get_ref().and_then(|inner| inner.downcast_ref::<RenderError>()),
        Some(RenderError::UnknownFunction(_))
    )
}

fn print_known_functions() {
    println!("Known functions:");
    for function in FUNCTIONS.iter() {
        println!("  {} : {}", function.name, function.description);
    }
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    // Get file to use else default
    let in_filename = env::args().nth(1).unwrap_or("input.json".to_string());
    let out_filename = env::args().nth(2).unwrap_or("output.png".to_string());
    println!("Loading input file: {}", in_filename);
    let mut file = File::open(in_filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    println!("Parsing input file");
    let input = json::parse(&contents).map_err(
        |_| Error::new(ErrorKind::InvalidData, "Couldn't parse input")
    )?;
    let default_export = if out_filename.ends_with(".svg") { Export::Filled } else { Export::Raster };
    let fractal = make_fractal(&input, default_export).map_err(|err| {
        if is_unknown_function(&err) {
            print_known_functions();
        }
        err
    })?;
    check_output_kind(fractal.export, &out_filename)?;
    let output = halley::generate(fractal)?;
    println!("Writing output to {}", out_filename);
    make_directory_for_image(&out_filename)?;
    match output {
        RenderOutput::Vector(svg) => fs::write(&out_filename, svg),
        RenderOutput::Raster(image) => image.save(&out_filename).map_err(
            |_| Error::new(ErrorKind::InvalidData, "Couldn't write image")
        )
    }
}
