// Marching squares over a scalar grid
//
// Each 2x2 block of samples is a cell. Corners at or above the threshold set
// bits tl=8, tr=4, br=2, bl=1 and the code picks edge midpoints to join.
// y grows downwards, matching image rows.

use cgmath::{point2, Point2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start : Point2<f64>,
    pub end : Point2<f64>
}

// Cell local (x1, y1, x2, y2) for each code. 5 and 10 are the saddles, each
// split into two segments that keep the low corners apart.
const LEFT_BOTTOM : [f64; 4] = [0.0, 0.5, 0.5, 1.0];
const BOTTOM_RIGHT : [f64; 4] = [0.5, 1.0, 1.0, 0.5];
const LEFT_RIGHT : [f64; 4] = [0.0, 0.5, 1.0, 0.5];
const TOP_RIGHT : [f64; 4] = [0.5, 0.0, 1.0, 0.5];
const LEFT_TOP : [f64; 4] = [0.0, 0.5, 0.5, 0.0];
const TOP_BOTTOM : [f64; 4] = [0.5, 0.0, 0.5, 1.0];

const CELL_EDGES : [&[[f64; 4]]; 16] = [
    &[],
    &[LEFT_BOTTOM],
    &[BOTTOM_RIGHT],
    &[LEFT_RIGHT],
    &[TOP_RIGHT],
    &[LEFT_TOP, BOTTOM_RIGHT],
    &[TOP_BOTTOM],
    &[LEFT_TOP],
    &[LEFT_TOP],
    &[TOP_BOTTOM],
    &[LEFT_BOTTOM, TOP_RIGHT],
    &[TOP_RIGHT],
    &[LEFT_RIGHT],
    &[BOTTOM_RIGHT],
    &[LEFT_BOTTOM],
    &[]
];

pub fn cell_code(tl : bool, tr : bool, br : bool, bl : bool) -> usize {
    (tl as usize) * 8 + (tr as usize) * 4 + (br as usize) * 2 + (bl as usize)
}

pub fn cell_edges(code : usize) -> &'static [[f64; 4]] {
    CELL_EDGES[code & 15]
}

// values is row-major width x height
pub fn trace_contours(values : &[f64], width : usize, height : usize, threshold : f64) -> Vec<Segment> {
    let mut segments = Vec::new();
    if width < 2 || height < 2 || values.len() != width * height {
        return segments;
    }
    let above = |x : usize, y : usize| values[y * width + x] >= threshold;
    for y in 0..(height - 1) {
        for x in 0..(width - 1) {
            let code = cell_code(above(x, y), above(x + 1, y), above(x + 1, y + 1), above(x, y + 1));
            for edge in cell_edges(code) {
                segments.push(Segment {
                    start: point2(x as f64 + edge[0], y as f64 + edge[1]),
                    end: point2(x as f64 + edge[2], y as f64 + edge[3])
                });
            }
        }
    }
    segments
}
