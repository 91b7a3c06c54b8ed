// The window of the complex plane being rendered and how to move it around

use json::JsonValue;
use num::complex::Complex64;

use crate::halley::RenderError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBounds {
    pub min_x : f64,
    pub max_x : f64,
    pub min_y : f64,
    pub max_y : f64
}

impl Default for ViewBounds {
    fn default() -> ViewBounds {
        ViewBounds { min_x: -3.0, max_x: 3.0, min_y: -3.0, max_y: 3.0 }
    }
}

impl ViewBounds {
    pub fn new(min_x : f64, max_x : f64, min_y : f64, max_y : f64) -> Result<ViewBounds, RenderError> {
        let bounds = ViewBounds { min_x, max_x, min_y, max_y };
        if bounds.is_valid() {
            Ok(bounds)
        } else {
            Err(RenderError::InvalidParameters(
                format!("bounds must have min < max on both axes, got {:?}", bounds)
            ))
        }
    }

    pub fn from_json(input : &JsonValue) -> Result<ViewBounds, RenderError> {
        let defaults = ViewBounds::default();
        if input.is_null() {
            return Ok(defaults);
        }
        ViewBounds::new(
            input["min_x"].as_f64().unwrap_or(defaults.min_x),
            input["max_x"].as_f64().unwrap_or(defaults.max_x),
            input["min_y"].as_f64().unwrap_or(defaults.min_y),
            input["max_y"].as_f64().unwrap_or(defaults.max_y)
        )
    }

    pub fn is_valid(&self) -> bool {
        let finite = [self.min_x, self.max_x, self.min_y, self.max_y].iter().all(
            |v| v.is_finite()
        );
        finite && self.min_x < self.max_x && self.min_y < self.max_y
    }

    pub fn range_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn range_y(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn centre(&self) -> (f64, f64) {
        ((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    // Row 0 is the top of the image so y runs down from max_y
    pub fn pixel_to_complex(&self, px : usize, py : usize, width : usize, height : usize) -> Complex64 {
        let x_step = self.range_x() / width as f64;
        let y_step = self.range_y() / height as f64;
        Complex64::new(
            self.min_x + px as f64 * x_step,
            self.max_y - py as f64 * y_step
        )
    }

    fn around(centre_x : f64, centre_y : f64, range_x : f64, range_y : f64) -> ViewBounds {
        ViewBounds {
            min_x: centre_x - range_x / 2.0,
            max_x: centre_x + range_x / 2.0,
            min_y: centre_y - range_y / 2.0,
            max_y: centre_y + range_y / 2.0
        }
    }

    // factor > 1 zooms in
    pub fn zoom(&self, factor : f64) -> ViewBounds {
        let (centre_x, centre_y) = self.centre();
        ViewBounds::around(
            centre_x,
            centre_y,
            self.range_x() / factor,
            self.range_y() / factor
        )
    }

    // Moves by a quarter of the view per unit step
    pub fn pan(&self, dx : f64, dy : f64) -> ViewBounds {
        let pan_x = dx * self.range_x() * 0.25;
        let pan_y = dy * self.range_y() * 0.25;
        ViewBounds {
            min_x: self.min_x + pan_x,
            max_x: self.max_x + pan_x,
            min_y: self.min_y + pan_y,
            max_y: self.max_y + pan_y
        }
    }

    // Centre on a point and zoom in by two
    pub fn recentre(&self, x : f64, y : f64) -> ViewBounds {
        ViewBounds::around(x, y, self.range_x() / 2.0, self.range_y() / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AspectRatio {
    Square,
    FourThree,
    SixteenNine,
    TwentyOneNine,
    NineSixteen
}

impl AspectRatio {
    pub fn from_name(name : &str) -> Option<AspectRatio> {
        match name {
            "1:1" => Some(AspectRatio::Square),
            "4:3" => Some(AspectRatio::FourThree),
            "16:9" => Some(AspectRatio::SixteenNine),
            "21:9" => Some(AspectRatio::TwentyOneNine),
            "9:16" => Some(AspectRatio::NineSixteen),
            _ => None
        }
    }

    fn scaled(resolution : usize, num : f64, den : f64) -> usize {
        (resolution as f64 * num / den).round() as usize
    }

    pub fn dimensions(&self, resolution : usize) -> (usize, usize) {
        match self {
            AspectRatio::Square => (resolution, resolution),
            AspectRatio::FourThree => (resolution, AspectRatio::scaled(resolution, 3.0, 4.0)),
            AspectRatio::SixteenNine => (resolution, AspectRatio::scaled(resolution, 9.0, 16.0)),
            AspectRatio::TwentyOneNine => (resolution, AspectRatio::scaled(resolution, 9.0, 21.0)),
            AspectRatio::NineSixteen => (AspectRatio::scaled(resolution, 9.0, 16.0), resolution)
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_pixel_mapping_inverts_y() {
        let bounds = ViewBounds::default();
        let top_left = bounds.pixel_to_complex(0, 0, 10, 10);
        assert_abs_diff_eq!(top_left.re, -3.0);
        assert_abs_diff_eq!(top_left.im, 3.0);
        let mid = bounds.pixel_to_complex(5, 5, 10, 10);
        assert_abs_diff_eq!(mid.re, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mid.im, 0.0, epsilon = 1e-12);
        let lower = bounds.pixel_to_complex(0, 9, 10, 10);
        assert!(lower.im < top_left.im);
    }

    #[test]
    fn test_zoom_keeps_centre() {
        let bounds = ViewBounds::new(-1.0, 3.0, 0.0, 2.0).unwrap();
        let zoomed = bounds.zoom(2.0);
        assert_eq!(zoomed.centre(), bounds.centre());
        assert_abs_diff_eq!(zoomed.range_x(), 2.0);
        assert_abs_diff_eq!(zoomed.range_y(), 1.0);
        let out = zoomed.zoom(0.5);
        assert_abs_diff_eq!(out.min_x, bounds.min_x);
        assert_abs_diff_eq!(out.max_y, bounds.max_y);
    }

    #[test]
    fn test_pan_quarter_view() {
        let bounds = ViewBounds::default();
        let panned = bounds.pan(1.0, -1.0);
        assert_abs_diff_eq!(panned.min_x, -1.5);
        assert_abs_diff_eq!(panned.max_x, 4.5);
        assert_abs_diff_eq!(panned.min_y, -4.5);
        assert_abs_diff_eq!(panned.max_y, 1.5);
    }

    #[test]
    fn test_recentre_halves_range() {
        let bounds = ViewBounds::default().recentre(1.0, -1.0);
        assert_eq!(bounds.centre(), (1.0, -1.0));
        assert_abs_diff_eq!(bounds.range_x(), 3.0);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        assert!(ViewBounds::new(1.0, 1.0, 0.0, 1.0).is_err());
        assert!(ViewBounds::new(0.0, 1.0, 2.0, 1.0).is_err());
        assert!(ViewBounds::new(0.0, f64::NAN, 0.0, 1.0).is_err());
        let parsed = ViewBounds::from_json(&json::parse(r#"{"min_x": 5, "max_x": 1}"#).unwrap());
        assert!(parsed.is_err());
    }

    #[test]
    fn test_aspect_dimensions() {
        assert_eq!(AspectRatio::from_name("1:1").unwrap().dimensions(300), (300, 300));
        assert_eq!(AspectRatio::from_name("4:3").unwrap().dimensions(300), (300, 225));
        assert_eq!(AspectRatio::from_name("16:9").unwrap().dimensions(300), (300, 169));
        assert_eq!(AspectRatio::from_name("21:9").unwrap().dimensions(300), (300, 129));
        assert_eq!(AspectRatio::from_name("9:16").unwrap().dimensions(300), (169, 300));
        assert!(AspectRatio::from_name("2:1").is_none());
    }
}
