// Make an image out of the basins of Halley's root finding method
//
// Each pixel is a starting point in the complex plane. We count how many
// Halley steps it takes to settle and colour by that count, either as a raster
// or traced out into SVG.

use std::io::{Error, ErrorKind};

use image::RgbaImage;
use json::JsonValue;
use log::info;

use crate::functions::{self, AnalyticFunction};
use crate::trace;

pub mod bounds;
pub mod colour;
pub mod grid;
pub mod iterate;
pub mod task;

use bounds::{AspectRatio, ViewBounds};
use colour::ColourScheme;
use grid::{default_chunk_rows, GridBuilder};
use task::{build_grid, CancelToken, ProgressReporter, RenderTask};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Render cancelled")]
    Cancelled,
    #[error("Render worker panicked")]
    WorkerPanicked
}

impl From<RenderError> for Error {
    fn from(err : RenderError) -> Error {
        let kind = match err {
            RenderError::Cancelled => ErrorKind::Interrupted,
            RenderError::WorkerPanicked => ErrorKind::Other,
            _ => ErrorKind::InvalidData
        };
        Error::new(kind, err)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Export {
    Raster,
    Filled,
    Outline,
    Bands
}

impl Export {
    pub fn from_name(name : &str) -> Option<Export> {
        match name {
            "raster" => Some(Export::Raster),
            "filled" => Some(Export::Filled),
            "outline" => Some(Export::Outline),
            "bands" => Some(Export::Bands),
            _ => None
        }
    }

    pub fn is_vector(&self) -> bool {
        *self != Export::Raster
    }
}

pub enum RenderOutput {
    Raster(RgbaImage),
    Vector(String)
}

#[derive(Debug)]
pub struct HalleyFractal {
    pub function : &'static AnalyticFunction,
    pub bounds : ViewBounds,
    pub resolution : (usize, usize),
    pub max_iterations : usize,
    pub scheme : ColourScheme,
    pub export : Export,
    pub chunk_rows : usize
}

fn invalid(msg : &str) -> RenderError {
    RenderError::InvalidParameters(msg.to_string())
}

fn parse_named<T>(input : &JsonValue, default : T, parse : fn(&str) -> Option<T>, what : &str) -> Result<T, RenderError> {
    match input.as_str() {
        None if input.is_null() => Ok(default),
        None => Err(RenderError::InvalidParameters(format!("{} must be a string", what))),
        Some(name) => parse(name).ok_or_else(
            || RenderError::InvalidParameters(format!("Unknown {}: {}", what, name))
        )
    }
}

fn parse_positive(input : &JsonValue, default : usize, what : &str) -> Result<usize, RenderError> {
    if input.is_null() {
        return Ok(default);
    }
    match input.as_usize() {
        Some(val) if val > 0 => Ok(val),
        _ => Err(RenderError::InvalidParameters(format!("{} must be a positive integer", what)))
    }
}

impl HalleyFractal {
    pub fn new(
        function_name : &str,
        bounds : ViewBounds,
        resolution : (usize, usize),
        max_iterations : usize,
        scheme : ColourScheme
    ) -> Result<HalleyFractal, RenderError> {
        let function = functions::lookup(function_name)?;
        if !bounds.is_valid() {
            return Err(invalid("bounds must have min < max on both axes"));
        }
        if resolution.0 == 0 || resolution.1 == 0 {
            return Err(invalid("resolution must be positive"));
        }
        if max_iterations == 0 {
            return Err(invalid("max_iterations must be positive"));
        }
        Ok(HalleyFractal {
            function,
            bounds,
            resolution,
            max_iterations,
            scheme,
            export: Export::Raster,
            chunk_rows: default_chunk_rows(resolution.1)
        })
    }

    pub fn with_export(mut self, export : Export) -> HalleyFractal {
        self.export = export;
        self
    }

    pub fn with_chunk_rows(mut self, chunk_rows : usize) -> HalleyFractal {
        self.chunk_rows = chunk_rows.max(1);
        self
    }

    pub fn from_json(input : &JsonValue, default_export : Export) -> Result<HalleyFractal, RenderError> {
        let function_name = match input["function"].as_str() {
            Some(name) => name,
            None if input["function"].is_null() => "z³ - 1",
            None => return Err(invalid("function must be a string"))
        };
        let resolution = parse_positive(&input["resolution"], 300, "resolution")?;
        let aspect = parse_named(&input["aspect"], AspectRatio::Square, AspectRatio::from_name, "aspect ratio")?;
        let (aspect_x, aspect_y) = aspect.dimensions(resolution);
        let res_x = parse_positive(&input["resolution_x"], aspect_x, "resolution_x")?;
        let res_y = parse_positive(&input["resolution_y"], aspect_y, "resolution_y")?;
        let max_iterations = parse_positive(&input["max_iterations"], 50, "max_iterations")?;
        let scheme = parse_named(&input["colour_scheme"], ColourScheme::Rainbow, ColourScheme::from_name, "colour scheme")?;
        let export = parse_named(&input["export"], default_export, Export::from_name, "export")?;
        let mut bounds = ViewBounds::from_json(&input["bounds"])?;
        if input["centre"].is_object() {
            let (centre_x, centre_y) = bounds.centre();
            bounds = bounds.recentre(
                input["centre"]["x"].as_f64().unwrap_or(centre_x),
                input["centre"]["y"].as_f64().unwrap_or(centre_y)
            );
        }
        if let Some(factor) = input["zoom"].as_f64() {
            if !(factor > 0.0) || !factor.is_finite() {
                return Err(invalid("zoom must be a positive number"));
            }
            bounds = bounds.zoom(factor);
        }
        // Pan steps are quarters of the view after zooming
        if input["pan"].is_object() {
            bounds = bounds.pan(
                input["pan"]["x"].as_f64().unwrap_or(0.0),
                input["pan"]["y"].as_f64().unwrap_or(0.0)
            );
        }
        let fractal = HalleyFractal::new(function_name, bounds, (res_x, res_y), max_iterations, scheme)?
            .with_export(export);
        let chunk_rows = parse_positive(&input["chunk_rows"], fractal.chunk_rows, "chunk_rows")?;
        Ok(fractal.with_chunk_rows(chunk_rows))
    }

    pub fn grid_builder(&self) -> GridBuilder<'static> {
        GridBuilder::new(self.function, self.bounds, self.resolution, self.max_iterations)
            .with_chunk_rows(self.chunk_rows)
    }
}

pub fn render(
    fractal : &HalleyFractal,
    cancel : &CancelToken,
    progress : &ProgressReporter
) -> Result<RenderOutput, RenderError> {
    info!(
        "Rendering {} at {}x{} with {} iterations as {:?}",
        fractal.function.name,
        fractal.resolution.0,
        fractal.resolution.1,
        fractal.max_iterations,
        fractal.export
    );
    let output = match fractal.export {
        Export::Raster => {
            let grid = build_grid(fractal, cancel, progress, (0, 100))?;
            RenderOutput::Raster(colour::make_image(&grid, fractal.scheme))
        },
        Export::Filled => {
            let grid = build_grid(fractal, cancel, progress, (0, 40))?;
            RenderOutput::Vector(trace::filled_svg(&grid, fractal, cancel, progress)?)
        },
        Export::Bands => {
            let grid = build_grid(fractal, cancel, progress, (0, 40))?;
            RenderOutput::Vector(trace::bands_svg(&grid, fractal, cancel, progress)?)
        },
        Export::Outline => {
            let grid = build_grid(fractal, cancel, progress, (0, 50))?;
            RenderOutput::Vector(trace::outline_svg(&grid, fractal, cancel, progress)?)
        }
    };
    progress.complete();
    Ok(output)
}

// Run the render on a worker thread, printing progress as it comes in
pub fn generate(fractal : HalleyFractal) -> std::io::Result<RenderOutput> {
    println!(
        "Generating Halley basins of {} at {}x{}",
        fractal.function.name, fractal.resolution.0, fractal.resolution.1
    );
    let task = RenderTask::spawn(fractal);
    let mut shown = 0;
    for percent in task.progress().iter() {
        if percent / 10 > shown / 10 {
            shown = percent;
            println!("Progress {}%", percent);
        }
    }
    Ok(task.join()?)
}
