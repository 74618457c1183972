use crate::foundation::error::{CardError, CardResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Virtual stage size of a card in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Stage width in pixels.
    pub width: u32,
    /// Stage height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with both dimensions `> 0`.
    pub fn new(width: u32, height: u32) -> CardResult<Self> {
        if width == 0 || height == 0 {
            return Err(CardError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Center of the stage in canvas coordinates.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Stage bounds as a rectangle anchored at the origin.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Longest bitmap edge that crop output or export will allocate (the JPEG format limit).
pub const MAX_RASTER_EDGE: u32 = 65_535;

/// Largest bitmap area, in pixels, that crop output or export will allocate.
pub const MAX_RASTER_PIXELS: u64 = 50_000_000;

/// Reject an empty or oversized `width × height` bitmap before anything is allocated.
pub(crate) fn check_raster_size(width: u32, height: u32) -> CardResult<()> {
    if width == 0 || height == 0 {
        return Err(CardError::render(format!(
            "bitmap unavailable for size {width}x{height}"
        )));
    }
    if width > MAX_RASTER_EDGE
        || height > MAX_RASTER_EDGE
        || u64::from(width) * u64::from(height) > MAX_RASTER_PIXELS
    {
        return Err(CardError::render(format!(
            "bitmap {width}x{height} exceeds raster limits"
        )));
    }
    Ok(())
}

/// Opaque sRGB colour used for the stage background.
///
/// Serialized as the CSS-style string `rgb(r, g, b)`. Deserialization also accepts `#RRGGBB`,
/// `{ "r": .., "g": .., "b": .. }` and `[r, g, b]` with 0..=255 channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RgbColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl RgbColor {
    /// White, the default stage colour.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `rgb(r, g, b)` or `#RRGGBB` (case-insensitive, surrounding whitespace ignored).
    pub fn parse(s: &str) -> CardResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }

        let lower = s.to_ascii_lowercase();
        let Some(body) = lower
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return Err(CardError::validation(format!(
                "colour \"{s}\" must be rgb(r, g, b) or #RRGGBB"
            )));
        };

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(CardError::validation(format!(
                "colour \"{s}\" must have exactly three channels"
            )));
        }

        let mut channels = [0u8; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            *slot = part.parse::<u8>().map_err(|_| {
                CardError::validation(format!("invalid colour channel \"{part}\" in \"{s}\""))
            })?;
        }
        Ok(Self::new(channels[0], channels[1], channels[2]))
    }

    /// `#rrggbb` form, used when writing SVG.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl std::fmt::Display for RgbColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for RgbColor {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for RgbColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for RgbColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            Obj { r: u8, g: u8, b: u8 },
            Arr([u8; 3]),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => Self::parse(&s).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b } => Ok(Self::new(r, g, b)),
            Repr::Arr([r, g, b]) => Ok(Self::new(r, g, b)),
        }
    }
}

fn parse_hex(s: &str) -> CardResult<RgbColor> {
    fn hex_byte(pair: &str) -> CardResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| CardError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    if s.len() != 6 || !s.is_ascii() {
        return Err(CardError::validation(
            "hex colour must be #RRGGBB (case-insensitive)",
        ));
    }
    Ok(RgbColor::new(
        hex_byte(&s[0..2])?,
        hex_byte(&s[2..4])?,
        hex_byte(&s[4..6])?,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
