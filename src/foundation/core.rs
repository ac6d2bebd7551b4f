use std::{fmt, str::FromStr};

use crate::foundation::error::{CanvasError, CanvasResult};

pub use kurbo::{Point, Rect, Size};

/// Output canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::invalid_dimensions(format!(
                "canvas must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn max_dimension(self) -> u32 {
        self.width.max(self.height)
    }

    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn rect(self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.size())
    }
}

/// Straight (non-premultiplied) opaque colour.
///
/// Parses and serializes as `#rrggbb`; the short `#rgb` form and a missing `#` are accepted on
/// input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Premultiplied pixel of this colour at `alpha` (0..=255).
    pub fn premul_with_alpha(self, alpha: u8) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, alpha)
    }
}

impl FromStr for Rgb8 {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bad = || CanvasError::invalid_option(format!("malformed colour '{s}'"));
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| bad());
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #abc == #aabbcc
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = CanvasError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb8> for String {
    fn from(value: Rgb8) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
