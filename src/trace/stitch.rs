// Join loose marching squares segments into polylines
//
// Greedy: start from the first unused segment and keep looking for an unused
// segment with an end at our open end. Quadratic in the number of segments,
// which is fine for one export.

use cgmath::Point2;

use crate::trace::marching::Segment;

pub type Path = Vec<Point2<f64>>;

pub const JOIN_TOLERANCE : f64 = 0.01;

fn points_match(a : &Point2<f64>, b : &Point2<f64>) -> bool {
    (a.x - b.x).abs() < JOIN_TOLERANCE && (a.y - b.y).abs() < JOIN_TOLERANCE
}

// Index of an unused segment touching `end` and whether it has to be walked backwards
fn find_connecting(segments : &[Segment], used : &[bool], end : &Point2<f64>) -> Option<(usize, bool)> {
    segments.iter().enumerate().filter(
        |(i, _)| !used[*i]
    ).find_map(
        |(i, seg)| {
            if points_match(end, &seg.start) {
                Some((i, false))
            } else if points_match(end, &seg.end) {
                Some((i, true))
            } else {
                None
            }
        }
    )
}

pub fn connect_segments(segments : &[Segment]) -> Vec<Path> {
    let mut paths = Vec::new();
    let mut used = vec![false; segments.len()];
    for start_idx in 0..segments.len() {
        if used[start_idx] {
            continue;
        }
        let mut path = Vec::new();
        let mut current = Some((start_idx, false));
        while let Some((idx, reverse)) = current {
            used[idx] = true;
            let seg = &segments[idx];
            let (from, to) = if reverse { (seg.end, seg.start) } else { (seg.start, seg.end) };
            path.push(from);
            current = find_connecting(segments, &used, &to);
            if current.is_none() {
                path.push(to);
            }
        }
        if path.len() >= 2 {
            paths.push(path);
        }
    }
    paths
}

#[cfg(test)]
mod tests {
    use cgmath::point2;

    use crate::trace::marching::trace_contours;

    use super::*;

    fn is_closed(path : &Path) -> bool {
        match (path.first(), path.last()) {
            (Some(first), Some(last)) => path.len() > 2 && points_match(first, last),
            _ => false
        }
    }

    fn seg(x1 : f64, y1 : f64, x2 : f64, y2 : f64) -> Segment {
        Segment { start: point2(x1, y1), end: point2(x2, y2) }
    }

    #[test]
    fn test_unit_square_closes() {
        let segments = vec![
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.0, 0.0, 1.0, 1.0),
            seg(1.0, 1.0, 0.0, 1.0),
            seg(0.0, 1.0, 0.0, 0.0)
        ];
        let paths = connect_segments(&segments);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 5);
        assert!(is_closed(&paths[0]));
    }

    #[test]
    fn test_reversed_segments_are_flipped() {
        // Same square with two segments pointing the wrong way
        let segments = vec![
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.0, 1.0, 1.0, 0.0),
            seg(1.0, 1.0, 0.0, 1.0),
            seg(0.0, 0.0, 0.0, 1.0)
        ];
        let paths = connect_segments(&segments);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0][2], point2(1.0, 1.0));
        assert!(is_closed(&paths[0]));
    }

    #[test]
    fn test_disjoint_segments_stay_apart() {
        let segments = vec![
            seg(0.0, 0.0, 1.0, 0.0),
            seg(5.0, 5.0, 6.0, 5.0)
        ];
        let paths = connect_segments(&segments);
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.len() == 2 && !is_closed(p)));
    }

    #[test]
    fn test_tolerance() {
        let segments = vec![
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.005, 0.0, 2.0, 0.0),
            seg(2.05, 0.0, 3.0, 0.0)
        ];
        let paths = connect_segments(&segments);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].len(), 3);
    }

    #[test]
    fn test_traced_blob_is_one_closed_loop() {
        let mut values = vec![0.0; 36];
        for y in 2..4 {
            for x in 1..5 {
                values[y * 6 + x] = 1.0;
            }
        }
        let paths = connect_segments(&trace_contours(&values, 6, 6, 0.5));
        assert_eq!(paths.len(), 1);
        assert!(is_closed(&paths[0]));
    }

    #[test]
    fn test_empty() {
        assert!(connect_segments(&[]).is_empty());
    }
}
