//! # Color Handling
//!
//! Parses the CSS-style color strings carried by context documents into
//! normalized `[r, g, b]` triples (0.0-1.0) and supplies the fallback palette
//! used when a slice carries no usable color. Front ends convert the triples
//! into their own color types.

/// Default slice palette, cycled by index when a category has no valid color
pub const PALETTE: [[f32; 3]; 8] = [
    [0.31, 0.48, 0.65], // blue
    [0.87, 0.52, 0.32], // orange
    [0.33, 0.66, 0.41], // green
    [0.76, 0.31, 0.32], // red
    [0.52, 0.44, 0.67], // purple
    [0.55, 0.57, 0.58], // gray
    [0.89, 0.77, 0.32], // gold
    [0.47, 0.72, 0.77], // teal
];

/// Line color for the asset series
pub const ASSET_COLOR: [f32; 3] = [0.2, 0.6, 0.2];

/// Line color for the debt series
pub const DEBT_COLOR: [f32; 3] = [0.8, 0.2, 0.2];

/// Neutral color for axes, gridlines, and placeholder text
pub const NEUTRAL_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

/// Parse a CSS color string into a normalized rgb triple.
///
/// Supports `#rgb`, `#rrggbb`, `rgb(r, g, b)` with 0-255 components, and the
/// basic CSS color keywords. Returns `None` for anything else; callers fall
/// back to the palette rather than failing the render.
pub fn parse_css_color(input: &str) -> Option<[f32; 3]> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(body) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        return parse_rgb_components(body);
    }
    named_color(&lower)
}

/// Resolve the display color for a slice: its own color if parseable,
/// otherwise the palette entry for its position.
pub fn slice_color(css: &str, index: usize) -> [f32; 3] {
    parse_css_color(css).unwrap_or(PALETTE[index % PALETTE.len()])
}

fn parse_hex(hex: &str) -> Option<[f32; 3]> {
    // The length match and slices below index by byte
    if !hex.is_ascii() {
        return None;
    }
    let expand = |c: u8| (c << 4) | c;
    match hex.len() {
        3 => {
            let mut out = [0.0; 3];
            for (i, ch) in hex.chars().enumerate() {
                let nibble = ch.to_digit(16)? as u8;
                out[i] = expand(nibble) as f32 / 255.0;
            }
            Some(out)
        }
        6 => {
            let mut out = [0.0; 3];
            for i in 0..3 {
                let byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
                out[i] = byte as f32 / 255.0;
            }
            Some(out)
        }
        _ => None,
    }
}

fn parse_rgb_components(body: &str) -> Option<[f32; 3]> {
    let mut parts = body.split(',');
    let mut out = [0.0; 3];
    for slot in &mut out {
        let component = parts.next()?.trim().parse::<u16>().ok()?;
        if component > 255 {
            return None;
        }
        *slot = component as f32 / 255.0;
    }
    // Trailing components mean this was not a plain rgb() triple
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

fn named_color(name: &str) -> Option<[f32; 3]> {
    let byte = |v: u8| v as f32 / 255.0;
    let rgb = |r, g, b| Some([byte(r), byte(g), byte(b)]);
    match name {
        "black" => rgb(0, 0, 0),
        "white" => rgb(255, 255, 255),
        "red" => rgb(255, 0, 0),
        "green" => rgb(0, 128, 0),
        "blue" => rgb(0, 0, 255),
        "yellow" => rgb(255, 255, 0),
        "orange" => rgb(255, 165, 0),
        "purple" => rgb(128, 0, 128),
        "gray" | "grey" => rgb(128, 128, 128),
        "teal" => rgb(0, 128, 128),
        "navy" => rgb(0, 0, 128),
        "maroon" => rgb(128, 0, 0),
        "olive" => rgb(128, 128, 0),
        "silver" => rgb(192, 192, 192),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: [f32; 3], expected: [f32; 3]) {
        for i in 0..3 {
            assert!(
                (actual[i] - expected[i]).abs() < 0.005,
                "component {} was {} expected {}",
                i,
                actual[i],
                expected[i]
            );
        }
    }

    #[test]
    fn test_parse_long_hex() {
        assert_close(parse_css_color("#4f7ba6").unwrap(), [0.31, 0.482, 0.651]);
        assert_close(parse_css_color("#ffffff").unwrap(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_parse_short_hex() {
        assert_close(parse_css_color("#f00").unwrap(), [1.0, 0.0, 0.0]);
        assert_close(parse_css_color("#0a0").unwrap(), [0.0, 0.667, 0.0]);
    }

    #[test]
    fn test_multibyte_hex_is_not_a_color() {
        // "\u{20ac}" is three bytes, so these bodies pass the byte-length
        // match without being valid hex digits
        assert!(parse_css_color("#a\u{20ac}bc").is_none());
        assert!(parse_css_color("#\u{20ac}\u{20ac}").is_none());
        assert!(parse_css_color("#\u{20ac}").is_none());
        assert_close(slice_color("#a\u{20ac}bc", 3), PALETTE[3]);
    }

    #[test]
    fn test_parse_rgb_function() {
        assert_close(
            parse_css_color("rgb(51, 102, 153)").unwrap(),
            [0.2, 0.4, 0.6],
        );
        assert!(parse_css_color("rgb(300, 0, 0)").is_none());
        assert!(parse_css_color("rgb(1, 2)").is_none());
        assert!(parse_css_color("rgb(1, 2, 3, 4)").is_none());
    }

    #[test]
    fn test_named_colors() {
        assert_close(parse_css_color("Green").unwrap(), [0.0, 0.502, 0.0]);
        assert_close(parse_css_color("  white ").unwrap(), [1.0, 1.0, 1.0]);
        assert!(parse_css_color("chartreuse-ish").is_none());
    }

    #[test]
    fn test_slice_color_fallback_cycles() {
        assert_close(slice_color("#123456", 0), parse_css_color("#123456").unwrap());
        assert_close(slice_color("not-a-color", 1), PALETTE[1]);
        assert_close(slice_color("", PALETTE.len() + 2), PALETTE[2]);
    }
}
