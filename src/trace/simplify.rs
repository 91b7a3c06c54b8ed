// Ramer-Douglas-Peucker polyline simplification
//
// Distances are compared squared. Recursion depth is bounded by the path
// length which is at most a few thousand points for a traced contour.

use cgmath::{InnerSpace, MetricSpace, Point2};

// Squared distance from p to the segment a-b
fn sq_segment_distance(p : Point2<f64>, a : Point2<f64>, b : Point2<f64>) -> f64 {
    let ab = b - a;
    let len_sq = ab.magnitude2();
    if len_sq == 0.0 {
        return p.distance2(a);
    }
    let t = ((p - a).dot(ab) / len_sq).max(0.0).min(1.0);
    p.distance2(a + ab * t)
}

pub fn simplify_path(points : &[Point2<f64>], tolerance : f64) -> Vec<Point2<f64>> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let first = points[0];
    let last = points[points.len() - 1];
    let mut max_dist = 0.0;
    let mut max_idx = 0;
    for (i, p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let dist = sq_segment_distance(*p, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_idx = i;
        }
    }
    if max_dist > tolerance * tolerance {
        let mut left = simplify_path(&points[..=max_idx], tolerance);
        let right = simplify_path(&points[max_idx..], tolerance);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

// Filled shapes tolerate a coarser outline than stroked contours
pub fn filled_tolerance(width : usize, height : usize) -> f64 {
    (width.max(height) as f64 / 800.0).max(0.3)
}

pub fn outline_tolerance(width : usize, height : usize) -> f64 {
    (width.max(height) as f64 / 1000.0).max(0.2)
}
