// Connected regions of equal iteration count
//
// 4-connected flood fill with an explicit stack. Cells that map to black are
// never part of a region. Small regions are written cell by cell, large ones
// as one rectangle per horizontal run.

use std::collections::BTreeMap;

use image::Rgb;

use crate::halley::colour::{get_colour, ColourScheme, BLACK};
use crate::halley::grid::IterationGrid;
use crate::halley::RenderError;

// Regions with at least this many cells are run length encoded
pub const RUN_LENGTH_THRESHOLD : usize = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub colour : Rgb<u8>,
    pub iterations : usize,
    pub cells : Vec<(usize, usize)>
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub x : usize,
    pub y : usize,
    pub len : usize
}

#[derive(Debug, PartialEq)]
pub enum RegionShape<'a> {
    Single(usize, usize),
    Cells(&'a [(usize, usize)]),
    Runs(Vec<Run>)
}

impl Region {
    pub fn shape(&self) -> RegionShape<'_> {
        if self.cells.len() == 1 {
            let (x, y) = self.cells[0];
            RegionShape::Single(x, y)
        } else if self.cells.len() < RUN_LENGTH_THRESHOLD {
            RegionShape::Cells(&self.cells)
        } else {
            RegionShape::Runs(row_runs(&self.cells))
        }
    }
}

// Maximal horizontal runs, rows top to bottom and left to right within a row
pub fn row_runs(cells : &[(usize, usize)]) -> Vec<Run> {
    let mut rows : BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (x, y) in cells.iter() {
        rows.entry(*y).or_default().push(*x);
    }
    let mut runs = Vec::new();
    for (y, mut xs) in rows.into_iter() {
        xs.sort_unstable();
        let mut current = Run { x: xs[0], y, len: 1 };
        for x in xs.into_iter().skip(1) {
            if x == current.x + current.len {
                current.len += 1;
            } else {
                runs.push(current);
                current = Run { x, y, len: 1 };
            }
        }
        runs.push(current);
    }
    runs
}

// Called back with the row index after each row is scanned so the caller can
// report progress or stop.
pub fn find_regions<F>(grid : &IterationGrid, scheme : ColourScheme, mut row_done : F) -> Result<Vec<Region>, RenderError>
where F : FnMut(usize) -> Result<(), RenderError> {
    let (width, height) = (grid.width(), grid.height());
    let mut visited = vec![false; width * height];
    let mut regions = Vec::new();
    let mut stack = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if visited[y * width + x] {
                continue;
            }
            let iterations = grid.get(x, y);
            let colour = get_colour(iterations, grid.max_iterations(), scheme);
            if colour == BLACK {
                visited[y * width + x] = true;
                continue;
            }
            let mut cells = Vec::new();
            stack.push((x, y));
            while let Some((cx, cy)) = stack.pop() {
                let idx = cy * width + cx;
                if visited[idx] || grid.get(cx, cy) != iterations {
                    continue;
                }
                visited[idx] = true;
                cells.push((cx, cy));
                if cx + 1 < width {
                    stack.push((cx + 1, cy));
                }
                if cx > 0 {
                    stack.push((cx - 1, cy));
                }
                if cy + 1 < height {
                    stack.push((cx, cy + 1));
                }
                if cy > 0 {
                    stack.push((cx, cy - 1));
                }
            }
            regions.push(Region { colour, iterations, cells });
        }
        row_done(y)?;
    }
    Ok(regions)
}
