use std::fmt;

/// Straight-alpha sRGB color with 8-bit channels and a fractional alpha.
///
/// `Display` renders the CSS form `rgba(r, g, b, a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbaColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f64,
}

impl RgbaColor {
    /// Build a color from channels; alpha is clamped into `[0, 1]`.
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: if a.is_nan() { 1.0 } else { a.clamp(0.0, 1.0) },
        }
    }

    /// Opaque white at the given alpha. Returned for hex input that cannot be parsed.
    pub fn white(a: f64) -> Self {
        Self::new(255, 255, 255, a)
    }

    /// Alpha quantized to 8 bits.
    pub fn alpha_u8(self) -> u8 {
        (self.a * 255.0).round() as u8
    }

    /// Straight-alpha RGBA8 quadruple.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.alpha_u8()]
    }

    pub(crate) fn to_cpu_color(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.alpha_u8())
    }
}

impl fmt::Display for RgbaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Convert `#rgb` / `#rrggbb` plus an opacity percentage into a translucent color.
///
/// `opacity_percent` is clamped into `[0, 100]` (NaN counts as 100). Input of any other length,
/// or with non-hex digits, yields white at the requested alpha; this never fails.
pub fn hex_to_rgba(hex: &str, opacity_percent: f64) -> RgbaColor {
    let opacity = if opacity_percent.is_nan() {
        100.0
    } else {
        opacity_percent.clamp(0.0, 100.0)
    };
    let alpha = opacity / 100.0;

    match parse_hex_rgb(hex) {
        Some([r, g, b]) => RgbaColor::new(r, g, b, alpha),
        None => RgbaColor::white(alpha),
    }
}

/// `true` for strings matching `^#([0-9a-f]{3}|[0-9a-f]{6})$`, case-insensitively.
pub fn is_valid_hex(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

fn parse_hex_rgb(hex: &str) -> Option<[u8; 3]> {
    if !hex.is_ascii() {
        return None;
    }
    let digits = match hex.len() {
        4 | 7 => hex.strip_prefix('#')?,
        _ => return None,
    };
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    fn hex_byte(pair: &str) -> Option<u8> {
        u8::from_str_radix(pair, 16).ok()
    }

    if digits.len() == 3 {
        let mut out = [0u8; 3];
        for (i, c) in digits.chars().enumerate() {
            let doubled: String = [c, c].iter().collect();
            out[i] = hex_byte(&doubled)?;
        }
        return Some(out);
    }

    Some([
        hex_byte(&digits[0..2])?,
        hex_byte(&digits[2..4])?,
        hex_byte(&digits[4..6])?,
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
