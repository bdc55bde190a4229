use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GazeError, GazeResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as a CSS color string; `#rgb`, `#rrggbb`, `rgb(..)`, `rgba(..)`,
/// `hsl(..)` and `hsla(..)` are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from hue in degrees and saturation/lightness/alpha in `0..=1`.
    #[must_use]
    pub fn hsla(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        let hue = hue.rem_euclid(360.0) / 360.0;
        let saturation = saturation.clamp(0.0, 1.0);
        let lightness = lightness.clamp(0.0, 1.0);

        if saturation == 0.0 {
            return Self::rgba(lightness, lightness, lightness, alpha);
        }

        let q = if lightness < 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let p = 2.0 * lightness - q;

        Self::rgba(
            hue_to_channel(p, q, hue + 1.0 / 3.0),
            hue_to_channel(p, q, hue),
            hue_to_channel(p, q, hue - 1.0 / 3.0),
            alpha,
        )
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> GazeResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(GazeError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Parses a CSS color string.
    pub fn parse_css(input: &str) -> GazeResult<Self> {
        let text = input.trim().to_ascii_lowercase();
        let invalid = || GazeError::InvalidData(format!("unsupported color `{input}`"));

        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        let (name, args) = text
            .strip_suffix(')')
            .and_then(|body| body.split_once('('))
            .ok_or_else(invalid)?;
        let args: Vec<&str> = args.split(',').map(str::trim).collect();

        let color = match (name.trim(), args.as_slice()) {
            ("rgb", [r, g, b]) => Self::rgb(
                parse_byte(r).ok_or_else(invalid)?,
                parse_byte(g).ok_or_else(invalid)?,
                parse_byte(b).ok_or_else(invalid)?,
            ),
            ("rgba", [r, g, b, a]) => Self::rgba(
                parse_byte(r).ok_or_else(invalid)?,
                parse_byte(g).ok_or_else(invalid)?,
                parse_byte(b).ok_or_else(invalid)?,
                parse_unit(a).ok_or_else(invalid)?,
            ),
            ("hsl", [h, s, l]) => Self::hsla(
                h.parse().map_err(|_| invalid())?,
                parse_percent(s).ok_or_else(invalid)?,
                parse_percent(l).ok_or_else(invalid)?,
                1.0,
            ),
            ("hsla", [h, s, l, a]) => Self::hsla(
                h.parse().map_err(|_| invalid())?,
                parse_percent(s).ok_or_else(invalid)?,
                parse_percent(l).ok_or_else(invalid)?,
                parse_unit(a).ok_or_else(invalid)?,
            ),
            _ => return Err(invalid()),
        };
        color.validate()?;
        Ok(color)
    }

    /// RGBA bytes, rounding each channel.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            to_byte(self.red),
            to_byte(self.green),
            to_byte(self.blue),
            to_byte(self.alpha),
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, _] = self.to_rgba8();
        let alpha = (self.alpha * 1_000.0).round() / 1_000.0;
        write!(f, "rgba({r}, {g}, {b}, {alpha})")
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = GazeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_css(&value)
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;
    let channel = |hi: u8, lo: u8| f64::from(hi * 16 + lo) / 255.0;
    match digits.as_slice() {
        [r, g, b] => Some(Color::rgb(
            channel(*r, *r),
            channel(*g, *g),
            channel(*b, *b),
        )),
        [r1, r2, g1, g2, b1, b2] => Some(Color::rgb(
            channel(*r1, *r2),
            channel(*g1, *g2),
            channel(*b1, *b2),
        )),
        _ => None,
    }
}

fn parse_byte(text: &str) -> Option<f64> {
    let value: f64 = text.parse().ok()?;
    (0.0..=255.0).contains(&value).then_some(value / 255.0)
}

fn parse_unit(text: &str) -> Option<f64> {
    let value: f64 = text.parse().ok()?;
    (0.0..=1.0).contains(&value).then_some(value)
}

fn parse_percent(text: &str) -> Option<f64> {
    let value: f64 = text.strip_suffix('%')?.trim().parse().ok()?;
    (0.0..=100.0).contains(&value).then_some(value / 100.0)
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> GazeResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(GazeError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(GazeError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for an axis-aligned rectangle with optional fill and stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Option<Color>,
    pub stroke_color: Option<Color>,
    pub stroke_width: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color: None,
            stroke_color: None,
            stroke_width: 1.0,
        }
    }

    #[must_use]
    pub const fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    #[must_use]
    pub const fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke_color = Some(color);
        self.stroke_width = width;
        self
    }

    pub fn validate(self) -> GazeResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(GazeError::InvalidData(
                "rect origin must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(GazeError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        if self.stroke_color.is_some()
            && (!self.stroke_width.is_finite() || self.stroke_width <= 0.0)
        {
            return Err(GazeError::InvalidData(
                "rect stroke width must be finite and > 0".to_owned(),
            ));
        }
        if let Some(color) = self.fill_color {
            color.validate()?;
        }
        if let Some(color) = self.stroke_color {
            color.validate()?;
        }
        Ok(())
    }
}

/// Draw command for a filled circle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill_color: Color,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, radius: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            radius,
            fill_color,
        }
    }

    pub fn validate(self) -> GazeResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(GazeError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GazeError::InvalidData(
                "circle radius must be finite and > 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}
