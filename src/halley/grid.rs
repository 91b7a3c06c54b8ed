// Build the grid of iteration counts, a few rows at a time
//
// The builder is resumable so a host can interleave other work (progress
// updates, cancellation checks) between chunks of rows.

use log::{debug, trace};

use crate::functions::AnalyticFunction;
use crate::halley::bounds::ViewBounds;
use crate::halley::iterate::iterations_to_converge;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IterationGrid {
    width : usize,
    height : usize,
    max_iterations : usize,
    counts : Vec<usize>
}

impl IterationGrid {
    pub fn from_counts(width : usize, height : usize, max_iterations : usize, counts : Vec<usize>) -> IterationGrid {
        assert_eq!(counts.len(), width * height, "grid size mismatch");
        IterationGrid {
            width,
            height,
            max_iterations,
            counts: counts.into_iter().map(|n| n.min(max_iterations)).collect()
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn get(&self, x : usize, y : usize) -> usize {
        self.counts[y * self.width + x]
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    // Distinct counts in ascending order
    pub fn levels(&self) -> Vec<usize> {
        let mut levels = self.counts.clone();
        levels.sort_unstable();
        levels.dedup();
        levels
    }
}

pub struct GridBuilder<'a> {
    function : &'a AnalyticFunction,
    bounds : ViewBounds,
    width : usize,
    height : usize,
    max_iterations : usize,
    chunk_rows : usize,
    next_row : usize,
    counts : Vec<usize>
}

// Default chunking gives roughly 32 progress steps per image
pub fn default_chunk_rows(height : usize) -> usize {
    (height / 32).max(1)
}

impl<'a> GridBuilder<'a> {
    pub fn new(
        function : &'a AnalyticFunction,
        bounds : ViewBounds,
        resolution : (usize, usize),
        max_iterations : usize
    ) -> GridBuilder<'a> {
        let (width, height) = resolution;
        GridBuilder {
            function,
            bounds,
            width,
            height,
            max_iterations,
            chunk_rows: default_chunk_rows(height),
            next_row: 0,
            counts: Vec::with_capacity(width * height)
        }
    }

    pub fn with_chunk_rows(mut self, chunk_rows : usize) -> GridBuilder<'a> {
        self.chunk_rows = chunk_rows.max(1);
        self
    }

    pub fn is_complete(&self) -> bool {
        self.next_row >= self.height
    }

    pub fn progress(&self) -> u8 {
        if self.height == 0 {
            return 100;
        }
        ((self.next_row * 100) / self.height) as u8
    }

    // Process the next chunk of rows, returning the percentage of rows done
    pub fn step(&mut self) -> u8 {
        let end_row = (self.next_row + self.chunk_rows).min(self.height);
        for py in self.next_row..end_row {
            for px in 0..self.width {
                let start = self.bounds.pixel_to_complex(px, py, self.width, self.height);
                self.counts.push(
                    iterations_to_converge(self.function, start, self.max_iterations)
                );
            }
        }
        trace!("Rows {}..{} of {} done", self.next_row, end_row, self.height);
        self.next_row = end_row;
        self.progress()
    }

    pub fn finish(mut self) -> IterationGrid {
        while !self.is_complete() {
            self.step();
        }
        debug!(
            "Built {}x{} grid for {} with {} iterations",
            self.width, self.height, self.function.name, self.max_iterations
        );
        IterationGrid::from_counts(self.width, self.height, self.max_iterations, self.counts)
    }
}
