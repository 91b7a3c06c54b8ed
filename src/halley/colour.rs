// Map iteration counts to colours
//
// Pixels that hit the iteration cap are always black whatever the scheme. The
// vector exports group shapes by the exact colour produced here and skip black.

use std::f64::consts::PI;

use image::{Rgb, Rgba, RgbaImage};

use crate::halley::grid::IterationGrid;

pub const BLACK : Rgb<u8> = Rgb([0, 0, 0]);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColourScheme {
    Rainbow,
    Fire,
    Ocean,
    Neon,
    Grayscale,
    Plasma
}

pub const SCHEMES : [ColourScheme; 6] = [
    ColourScheme::Rainbow,
    ColourScheme::Fire,
    ColourScheme::Ocean,
    ColourScheme::Neon,
    ColourScheme::Grayscale,
    ColourScheme::Plasma
];

impl ColourScheme {
    pub fn from_name(name : &str) -> Option<ColourScheme> {
        SCHEMES.iter().find(|scheme| scheme.name() == name).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColourScheme::Rainbow => "rainbow",
            ColourScheme::Fire => "fire",
            ColourScheme::Ocean => "ocean",
            ColourScheme::Neon => "neon",
            ColourScheme::Grayscale => "grayscale",
            ColourScheme::Plasma => "plasma"
        }
    }
}

// Channel values are floored and clamped into a byte
fn channel(val : f64) -> u8 {
    val.floor().max(0.0).min(255.0) as u8
}

// hue in degrees, saturation and lightness in percent
pub fn hsl_to_rgb(hue : f64, saturation : f64, lightness : f64) -> Rgb<u8> {
    let s = saturation / 100.0;
    let l = lightness / 100.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = if hue < 60.0 {
        (c, x, 0.0)
    } else if hue < 120.0 {
        (x, c, 0.0)
    } else if hue < 180.0 {
        (0.0, c, x)
    } else if hue < 240.0 {
        (0.0, x, c)
    } else if hue < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };
    Rgb([
        channel((r + m) * 255.0),
        channel((g + m) * 255.0),
        channel((b + m) * 255.0)
    ])
}

pub fn get_colour(iterations : usize, max_iterations : usize, scheme : ColourScheme) -> Rgb<u8> {
    if iterations >= max_iterations {
        return BLACK;
    }
    let t = iterations as f64 / max_iterations as f64;
    match scheme {
        ColourScheme::Rainbow => hsl_to_rgb(t * 360.0, 80.0, 50.0),
        ColourScheme::Fire => Rgb([
            channel((t * 3.0 * 255.0).min(255.0)),
            channel(((t - 0.33) * 3.0 * 255.0).min(255.0).max(0.0)),
            channel(((t - 0.66) * 3.0 * 255.0).min(255.0).max(0.0))
        ]),
        ColourScheme::Ocean => Rgb([
            channel(t * 100.0),
            channel(100.0 + t * 155.0),
            channel(150.0 + t * 105.0)
        ]),
        ColourScheme::Neon => hsl_to_rgb((t * 180.0 + 180.0) % 360.0, 100.0, 50.0 + t * 30.0),
        ColourScheme::Grayscale => {
            let v = channel(t * 255.0);
            Rgb([v, v, v])
        },
        ColourScheme::Plasma => Rgb([
            channel(128.0 + 127.0 * (t * PI * 2.0).sin()),
            channel(128.0 + 127.0 * (t * PI * 2.0 + 2.094).sin()),
            channel(128.0 + 127.0 * (t * PI * 2.0 + 4.188).sin())
        ])
    }
}

pub fn colour_to_css(colour : &Rgb<u8>) -> String {
    format!("rgb({},{},{})", colour.0[0], colour.0[1], colour.0[2])
}

// One colour per pixel, alpha always opaque, row 0 at the top (max_y)
pub fn make_image(grid : &IterationGrid, scheme : ColourScheme) -> RgbaImage {
    let mut img = RgbaImage::new(grid.width() as u32, grid.height() as u32);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let colour = get_colour(grid.get(x, y), grid.max_iterations(), scheme);
            img.put_pixel(
                x as u32,
                y as u32,
                Rgba([colour.0[0], colour.0[1], colour.0[2], 255])
            );
        }
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_is_black_for_every_scheme() {
        for scheme in SCHEMES.iter() {
            assert_eq!(get_colour(50, 50, *scheme), BLACK);
            assert_eq!(get_colour(70, 50, *scheme), BLACK);
        }
    }

    #[test]
    fn test_schemes_round_trip_names() {
        for scheme in SCHEMES.iter() {
            assert_eq!(ColourScheme::from_name(scheme.name()), Some(*scheme));
        }
        assert_eq!(ColourScheme::from_name("sepia"), None);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(get_colour(0, 50, ColourScheme::Rainbow), Rgb([229, 25, 25]));
        assert_eq!(get_colour(25, 50, ColourScheme::Grayscale), Rgb([127, 127, 127]));
        assert_eq!(get_colour(0, 50, ColourScheme::Ocean), Rgb([0, 100, 150]));
        assert_eq!(get_colour(0, 50, ColourScheme::Fire), Rgb([0, 0, 0]));
        assert_eq!(get_colour(25, 50, ColourScheme::Fire), Rgb([255, 130, 0]));
        assert_eq!(get_colour(0, 50, ColourScheme::Plasma).0[0], 128);
        // Neon starts at cyan
        assert_eq!(get_colour(0, 50, ColourScheme::Neon), Rgb([0, 255, 255]));
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 100.0, 50.0), Rgb([255, 0, 0]));
        assert_eq!(hsl_to_rgb(120.0, 100.0, 50.0), Rgb([0, 255, 0]));
        assert_eq!(hsl_to_rgb(240.0, 100.0, 50.0), Rgb([0, 0, 255]));
    }

    #[test]
    fn test_bright_schemes_never_black_below_cap() {
        let schemes = [
            ColourScheme::Rainbow, ColourScheme::Ocean, ColourScheme::Neon, ColourScheme::Plasma
        ];
        for scheme in schemes.iter() {
            for n in 0..64 {
                assert_ne!(get_colour(n, 64, *scheme), BLACK, "{} at {}", scheme.name(), n);
            }
        }
    }

    #[test]
    fn test_rgba_buffer_layout() {
        let grid = IterationGrid::from_counts(2, 2, 4, vec![0, 4, 2, 4]);
        let buffer = make_image(&grid, ColourScheme::Grayscale).into_raw();
        assert_eq!(buffer.len(), 16);
        assert_eq!(&buffer[0..4], &[0, 0, 0, 255]);
        assert_eq!(&buffer[4..8], &[0, 0, 0, 255]);
        assert_eq!(&buffer[8..12], &[127, 127, 127, 255]);
        assert!(buffer.chunks(4).all(|px| px[3] == 255));
    }
}
