// Turn a polyline into SVG path data with cubic Bezier spans
//
// Control points come from the Catmull-Rom tangent at each end of a span,
// with the neighbour indices clamped at the ends of the path.

use std::fmt::Write;

use cgmath::Point2;

const TENSION : f64 = 0.5;

pub fn smooth_path(points : &[Point2<f64>], closed : bool) -> String {
    let mut d = String::new();
    if points.len() < 2 {
        return d;
    }
    let _ = write!(d, "M{:.2},{:.2}", points[0].x, points[0].y);
    if points.len() == 2 {
        let _ = write!(d, " L{:.2},{:.2}", points[1].x, points[1].y);
    } else {
        let last = points.len() - 1;
        for i in 0..last {
            let p0 = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = points[(i + 2).min(last)];
            let cp1 = p1 + (p2 - p0) * (TENSION / 3.0);
            let cp2 = p2 - (p3 - p1) * (TENSION / 3.0);
            let _ = write!(
                d,
                " C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
                cp1.x, cp1.y, cp2.x, cp2.y, p2.x, p2.y
            );
        }
    }
    if closed {
        d.push_str(" Z");
    }
    d
}
