use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color from a hexadecimal string.
    /// Accepts formats like "#RRGGBB" or "RRGGBB".
    pub fn from_hex(hex: &str) -> Result<Self, &'static str> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return Err("Hex string should be 6 characters long (RRGGBB).");
        }

        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| "Invalid red component in hex")?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| "Invalid green component in hex")?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| "Invalid blue component in hex")?;

        Ok(Self::rgb(r, g, b))
    }

    const fn hex_char_to_u8(c: u8) -> u8 {
        match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            _ => 0,
        }
    }

    const fn hex_pair_to_u8(high: u8, low: u8) -> u8 {
        (Self::hex_char_to_u8(high) << 4) | Self::hex_char_to_u8(low)
    }

    /// Const-evaluable hex parser for the palette below. Input must be well formed.
    const fn hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        let offset = if bytes[0] == b'#' { 1 } else { 0 };

        Self::rgb(
            Self::hex_pair_to_u8(bytes[offset], bytes[offset + 1]),
            Self::hex_pair_to_u8(bytes[offset + 2], bytes[offset + 3]),
            Self::hex_pair_to_u8(bytes[offset + 4], bytes[offset + 5]),
        )
    }

    /// Multiplies r, g and b by `intensity`, truncating back to a byte. Alpha is kept.
    pub fn scale(&self, intensity: f32) -> Color {
        let k = intensity.clamp(0.0, 1.0);
        Color {
            r: (self.r as f32 * k) as u8,
            g: (self.g as f32 * k) as u8,
            b: (self.b as f32 * k) as u8,
            a: self.a,
        }
    }

    /// Weighted sum of three colors' r/g/b, rounded. Weights are expected to sum to 1.
    pub fn weighted(colors: &[Color; 3], weights: [f32; 3]) -> Color {
        let channel = |f: fn(&Color) -> u8| {
            let v = weights[0] * f(&colors[0]) as f32
                + weights[1] * f(&colors[1]) as f32
                + weights[2] * f(&colors[2]) as f32;
            v.round().clamp(0.0, 255.0) as u8
        };
        Color {
            r: channel(|c| c.r),
            g: channel(|c| c.g),
            b: channel(|c| c.b),
            a: 255,
        }
    }

    /// A random opaque color, used when the user recolors a mesh.
    pub fn random<R: Rng>(rng: &mut R) -> Color {
        Color::rgb(rng.gen_range(0..255), rng.gen_range(0..255), rng.gen_range(0..255))
    }

    pub fn to_crossterm_color(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }

    /// Convert the color to a terminal-compatible ANSI escape sequence.
    pub fn to_ansii_escape(&self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }

    /// 0RGB packing as minifb expects it.
    pub fn to_u32(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub fn from_u32(packed: u32) -> Color {
        Color::rgb((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
    }
}

// Predefined colors
impl Color {
    pub const BLACK: Color = Color::hex("000000");
    pub const WHITE: Color = Color::hex("FFFFFF");
    pub const GRAY: Color = Color::hex("808080");
    pub const RED: Color = Color::hex("FF0000");
    pub const GREEN: Color = Color::hex("00FF00");
    pub const BLUE: Color = Color::hex("0000FF");
    pub const YELLOW: Color = Color::hex("FFFF00");
    pub const CYAN: Color = Color::hex("00FFFF");
    pub const MAGENTA: Color = Color::hex("FF00FF");
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_const_parsed() {
        assert_eq!(Color::MAGENTA, Color::new(255, 0, 255, 255));
        assert_eq!(Color::from_hex("#00ffff"), Ok(Color::CYAN));
        assert!(Color::from_hex("fff").is_err());
    }

    #[test]
    fn scale_truncates_and_keeps_alpha() {
        let c = Color::new(255, 100, 3, 128).scale(0.5);
        assert_eq!(c, Color::new(127, 50, 1, 128));
    }

    #[test]
    fn weighted_with_one_hot_weights_picks_vertex() {
        let cols = [Color::RED, Color::GREEN, Color::BLUE];
        assert_eq!(Color::weighted(&cols, [0.0, 1.0, 0.0]), Color::GREEN);
        let mid = Color::weighted(&cols, [0.5, 0.5, 0.0]);
        assert_eq!((mid.r, mid.g, mid.b), (128, 128, 0));
    }

    #[test]
    fn u32_packing() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(c.to_u32(), 0x123456);
        assert_eq!(Color::from_u32(0x123456), c);
    }
}
