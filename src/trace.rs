// Vector exports of an iteration grid
//
// Three ways of turning the grid into SVG. Filled writes exact rectangles per
// connected region. Outline strokes the contour between each pair of
// iteration levels. Bands traces each colour band as closed filled curves.
// Each pipeline picks up progress where the grid build left off.

use image::Rgb;
use log::debug;

use crate::halley::colour::{get_colour, BLACK};
use crate::halley::grid::IterationGrid;
use crate::halley::task::{CancelToken, ProgressReporter};
use crate::halley::{HalleyFractal, RenderError};

pub mod marching;
pub mod regions;
pub mod simplify;
pub mod smooth;
pub mod stitch;
pub mod svg;

use marching::trace_contours;
use regions::find_regions;
use simplify::{filled_tolerance, outline_tolerance, simplify_path};
use smooth::smooth_path;
use stitch::connect_segments;

const TRACE_SPAN : (u8, u8) = (40, 95);
const OUTLINE_SPAN : (u8, u8) = (50, 100);
// Outline progress is only reported every few levels
const OUTLINE_REPORT_EVERY : usize = 5;

pub fn filled_svg(
    grid : &IterationGrid,
    fractal : &HalleyFractal,
    cancel : &CancelToken,
    progress : &ProgressReporter
) -> Result<String, RenderError> {
    let height = grid.height();
    let regions = find_regions(grid, fractal.scheme, |y| {
        cancel.check()?;
        progress.report_span(TRACE_SPAN, y + 1, height);
        Ok(())
    })?;
    debug!("Found {} coloured regions", regions.len());
    Ok(svg::filled_document(fractal, &regions))
}

// Iteration levels that share a colour, in ascending level order of first appearance
fn colour_bands(grid : &IterationGrid, fractal : &HalleyFractal) -> Vec<(Rgb<u8>, Vec<usize>)> {
    let mut bands : Vec<(Rgb<u8>, Vec<usize>)> = Vec::new();
    for level in grid.levels() {
        let colour = get_colour(level, grid.max_iterations(), fractal.scheme);
        match bands.iter_mut().find(|(c, _)| *c == colour) {
            Some((_, levels)) => levels.push(level),
            None => bands.push((colour, vec![level]))
        }
    }
    bands
}

pub fn bands_svg(
    grid : &IterationGrid,
    fractal : &HalleyFractal,
    cancel : &CancelToken,
    progress : &ProgressReporter
) -> Result<String, RenderError> {
    let (width, height) = (grid.width(), grid.height());
    let tolerance = filled_tolerance(width, height);
    let bands = colour_bands(grid, fractal);
    let mut traced = Vec::new();
    for (idx, (colour, levels)) in bands.iter().enumerate() {
        cancel.check()?;
        if *colour != BLACK {
            let mask : Vec<f64> = grid.counts().iter().map(
                |n| if levels.contains(n) { 1.0 } else { 0.0 }
            ).collect();
            let paths : Vec<String> = connect_segments(&trace_contours(&mask, width, height, 0.5))
                .iter()
                .map(|path| simplify_path(path, tolerance))
                .filter(|path| path.len() >= 3)
                .map(|path| smooth_path(&path, true))
                .collect();
            if !paths.is_empty() {
                traced.push((*colour, paths));
            }
        }
        progress.report_span(TRACE_SPAN, idx + 1, bands.len());
    }
    debug!("Traced {} of {} colour bands", traced.len(), bands.len());
    Ok(svg::bands_document(fractal, &traced))
}

pub fn outline_svg(
    grid : &IterationGrid,
    fractal : &HalleyFractal,
    cancel : &CancelToken,
    progress : &ProgressReporter
) -> Result<String, RenderError> {
    let (width, height) = (grid.width(), grid.height());
    let tolerance = outline_tolerance(width, height);
    let values : Vec<f64> = grid.counts().iter().map(|n| *n as f64).collect();
    let levels = grid.levels();
    let mut paths = Vec::new();
    for (idx, level) in levels.iter().enumerate() {
        cancel.check()?;
        let colour = get_colour(*level, grid.max_iterations(), fractal.scheme);
        if colour != BLACK {
            let threshold = *level as f64 + 0.5;
            for path in connect_segments(&trace_contours(&values, width, height, threshold)) {
                if path.len() < 3 {
                    continue;
                }
                let simplified = simplify_path(&path, tolerance);
                if simplified.len() < 3 {
                    continue;
                }
                paths.push((colour, smooth_path(&simplified, false)));
            }
        }
        if idx % OUTLINE_REPORT_EVERY == 0 {
            progress.report_span(OUTLINE_SPAN, idx, levels.len());
        }
    }
    debug!("Traced {} contour paths over {} levels", paths.len(), levels.len());
    Ok(svg::outline_document(fractal, &paths))
}
