// SVG document assembly
//
// Pure string building from geometry that has already been worked out. The
// same fractal and shapes always give the same bytes.

use std::fmt::Write;

use image::Rgb;

use crate::halley::colour::colour_to_css;
use crate::halley::HalleyFractal;
use crate::trace::regions::{Region, RegionShape};

// Cells overlap slightly so antialiasing doesn't leave seams between them
const CELL_SIZE : f64 = 1.1;

// Escape characters that are special in element text
pub fn xml_escape(input : &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other)
        }
    }
    out
}

fn bounds_summary(fractal : &HalleyFractal) -> String {
    let b = &fractal.bounds;
    format!(
        "Formula: {} | Bounds: [{:.6}, {:.6}] × [{:.6}, {:.6}] | Iterations: {}",
        fractal.function.name, b.min_x, b.max_x, b.min_y, b.max_y, fractal.max_iterations
    )
}

// Declaration, svg element, title, description and the black backdrop
fn write_preamble(out : &mut String, fractal : &HalleyFractal, title : &str, desc : &str) {
    let (width, height) = fractal.resolution;
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
        width, height, width, height
    );
    let _ = writeln!(out, "  <title>{}</title>", xml_escape(title));
    let _ = writeln!(out, "  <desc>{}</desc>", xml_escape(desc));
    let _ = writeln!(out, r#"  <rect width="100%" height="100%" fill="black"/>"#);
}

fn write_region(out : &mut String, region : &Region) {
    let fill = colour_to_css(&region.colour);
    match region.shape() {
        RegionShape::Single(x, y) => {
            let _ = writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                x, y, CELL_SIZE, CELL_SIZE, fill
            );
        },
        RegionShape::Cells(cells) => {
            let _ = writeln!(out, r#"  <g fill="{}">"#, fill);
            for (x, y) in cells.iter() {
                let _ = writeln!(
                    out,
                    r#"    <rect x="{}" y="{}" width="{}" height="{}"/>"#,
                    x, y, CELL_SIZE, CELL_SIZE
                );
            }
            let _ = writeln!(out, "  </g>");
        },
        RegionShape::Runs(runs) => {
            let _ = writeln!(out, r#"  <g fill="{}">"#, fill);
            for run in runs.iter() {
                let _ = writeln!(
                    out,
                    r#"    <rect x="{}" y="{}" width="{}" height="{}"/>"#,
                    run.x, run.y, (run.len - 1) as f64 + CELL_SIZE, CELL_SIZE
                );
            }
            let _ = writeln!(out, "  </g>");
        }
    }
}

pub fn filled_document(fractal : &HalleyFractal, regions : &[Region]) -> String {
    let mut out = String::new();
    write_preamble(
        &mut out,
        fractal,
        &format!("Halley's Method Fractal - {}", fractal.function.name),
        &format!("{} | Traced with smooth curves", bounds_summary(fractal))
    );
    for region in regions.iter() {
        write_region(&mut out, region);
    }
    out.push_str("</svg>");
    out
}

// One stroked path per entry
pub fn outline_document(fractal : &HalleyFractal, paths : &[(Rgb<u8>, String)]) -> String {
    let mut out = String::new();
    write_preamble(
        &mut out,
        fractal,
        &format!("Halley's Method Fractal Contours - {}", fractal.function.name),
        &format!("{} | Contour-traced vector paths", bounds_summary(fractal))
    );
    let _ = writeln!(out, r#"  <g fill="none" stroke-width="0.5">"#);
    for (colour, d) in paths.iter() {
        let _ = writeln!(out, r#"    <path d="{}" stroke="{}"/>"#, d, colour_to_css(colour));
    }
    out.push_str("  </g>\n</svg>");
    out
}

// Closed outlines of each colour band filled even-odd so holes stay open
pub fn bands_document(fractal : &HalleyFractal, bands : &[(Rgb<u8>, Vec<String>)]) -> String {
    let mut out = String::new();
    write_preamble(
        &mut out,
        fractal,
        &format!("Halley's Method Fractal Bands - {}", fractal.function.name),
        &format!("{} | Colour bands as filled paths", bounds_summary(fractal))
    );
    for (colour, paths) in bands.iter() {
        let _ = writeln!(out, r#"  <g fill="{}" fill-rule="evenodd">"#, colour_to_css(colour));
        for d in paths.iter() {
            let _ = writeln!(out, r#"    <path d="{}"/>"#, d);
        }
        let _ = writeln!(out, "  </g>");
    }
    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use crate::halley::bounds::ViewBounds;
    use crate::halley::colour::ColourScheme;

    use super::*;

    fn fractal() -> HalleyFractal {
        HalleyFractal::new("z³ - 1", ViewBounds::default(), (4, 3), 50, ColourScheme::Rainbow).unwrap()
    }

    #[test]
    fn test_escape() {
        assert_eq!(xml_escape("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(xml_escape("Halley's"), "Halley's");
    }

    #[test]
    fn test_filled_document_bytes() {
        let regions = vec![
            Region { colour: Rgb([1, 2, 3]), iterations: 4, cells: vec![(2, 1)] },
            Region { colour: Rgb([9, 9, 9]), iterations: 5, cells: vec![(0, 0), (1, 0)] }
        ];
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 4 3\" width=\"4\" height=\"3\">\n",
            "  <title>Halley's Method Fractal - z³ - 1</title>\n",
            "  <desc>Formula: z³ - 1 | Bounds: [-3.000000, 3.000000] × [-3.000000, 3.000000] | Iterations: 50 | Traced with smooth curves</desc>\n",
            "  <rect width=\"100%\" height=\"100%\" fill=\"black\"/>\n",
            "  <rect x=\"2\" y=\"1\" width=\"1.1\" height=\"1.1\" fill=\"rgb(1,2,3)\"/>\n",
            "  <g fill=\"rgb(9,9,9)\">\n",
            "    <rect x=\"0\" y=\"0\" width=\"1.1\" height=\"1.1\"/>\n",
            "    <rect x=\"1\" y=\"0\" width=\"1.1\" height=\"1.1\"/>\n",
            "  </g>\n",
            "</svg>"
        );
        assert_eq!(filled_document(&fractal(), &regions), expected);
    }

    #[test]
    fn test_run_widths() {
        let cells : Vec<_> = (0..60).map(|i| (i % 20, i / 20)).filter(|c| c.0 != 7).collect();
        let region = Region { colour: Rgb([5, 5, 5]), iterations: 1, cells };
        let doc = filled_document(&fractal(), &[region]);
        assert!(doc.contains(r#"    <rect x="0" y="0" width="7.1" height="1.1"/>"#));
        assert!(doc.contains(r#"    <rect x="8" y="2" width="12.1" height="1.1"/>"#));
        assert_eq!(doc.matches("<rect x=").count(), 6);
    }

    #[test]
    fn test_outline_document_structure() {
        let paths = vec![(Rgb([10, 20, 30]), "M0.00,0.00 L1.00,1.00".to_string())];
        let doc = outline_document(&fractal(), &paths);
        assert!(doc.contains("  <title>Halley's Method Fractal Contours - z³ - 1</title>\n"));
        assert!(doc.contains("| Iterations: 50 | Contour-traced vector paths</desc>"));
        assert!(doc.contains("  <g fill=\"none\" stroke-width=\"0.5\">\n    <path d=\"M0.00,0.00 L1.00,1.00\" stroke=\"rgb(10,20,30)\"/>\n"));
        assert!(doc.ends_with("  </g>\n</svg>"));
    }

    #[test]
    fn test_bands_document_groups_by_colour() {
        let bands = vec![
            (Rgb([1, 1, 1]), vec!["M0.00,0.00 Z".to_string(), "M1.00,1.00 Z".to_string()]),
            (Rgb([2, 2, 2]), vec!["M2.00,2.00 Z".to_string()])
        ];
        let doc = bands_document(&fractal(), &bands);
        assert_eq!(doc.matches("fill-rule=\"evenodd\"").count(), 2);
        assert_eq!(doc.matches("<path d=").count(), 3);
        assert!(doc.ends_with("  </g>\n</svg>"));
    }
}
