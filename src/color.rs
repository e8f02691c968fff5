//! Rating -> text color mapping for instructor links.
//!
//! Ratings run from 1.0 (red) through 3.0 (yellow) to 5.0 (green), with a
//! separate palette for light and dark themes.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.0, self.1, self.2)
    }
}

/// A fixed gradient stop
#[derive(Debug, Clone, Copy)]
pub struct ColorAnchor {
    pub rating: f64,
    pub light: Rgb,
    pub dark: Rgb,
}

pub const RED: ColorAnchor = ColorAnchor {
    rating: 1.0,
    light: Rgb(220, 38, 38),  // red-600
    dark: Rgb(248, 113, 113), // red-400
};

pub const YELLOW: ColorAnchor = ColorAnchor {
    rating: 3.0,
    light: Rgb(202, 138, 4), // yellow-600
    dark: Rgb(250, 204, 21), // yellow-400
};

pub const GREEN: ColorAnchor = ColorAnchor {
    rating: 5.0,
    light: Rgb(22, 163, 74), // green-600
    dark: Rgb(74, 222, 128), // green-400
};

/// Light and dark theme variants, formatted as CSS `rgb(R,G,B)` strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingColor {
    pub light: String,
    pub dark: String,
}

/// Map a rating to its theme colors.
///
/// Out-of-range ratings are clamped onto the nearest end of the gradient.
pub fn color_for(rating: f64) -> RatingColor {
    let (start, end) = if rating <= YELLOW.rating {
        (RED, YELLOW)
    } else {
        (YELLOW, GREEN)
    };
    let t = segment_fraction(rating, &start, &end);

    RatingColor {
        light: interpolate(start.light, end.light, t).to_string(),
        dark: interpolate(start.dark, end.dark, t).to_string(),
    }
}

fn segment_fraction(rating: f64, start: &ColorAnchor, end: &ColorAnchor) -> f64 {
    ((rating - start.rating) / (end.rating - start.rating)).clamp(0.0, 1.0)
}

fn interpolate(start: Rgb, end: Rgb, t: f64) -> Rgb {
    Rgb(
        lerp_channel(start.0, end.0, t),
        lerp_channel(start.1, end.1, t),
        lerp_channel(start.2, end.2, t),
    )
}

fn lerp_channel(start: u8, end: u8, t: f64) -> u8 {
    let start = f64::from(start);
    let end = f64::from(end);
    (start + (end - start) * t).round() as u8
}
