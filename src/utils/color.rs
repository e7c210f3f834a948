/// Parse `#rrggbb` or `#rgb` into RGB components.
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some([channel(0)?, channel(2)?, channel(4)?])
        }
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some([channel(0)?, channel(1)?, channel(2)?])
        }
        _ => None,
    }
}

/// True only for the strict six-digit form, e.g. `#1a2b3c`.
pub fn is_hex6_color(value: &str) -> bool {
    value.len() == 7 && value.starts_with('#') && value[1..].bytes().all(|b| b.is_ascii_hexdigit())
}

pub fn to_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(parse_hex_color("#ff8000"), Some([255, 128, 0]));
        assert_eq!(parse_hex_color("#FFF"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color(" #000000 "), Some([0, 0, 0]));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_hex_color("ff8000"), None);
        assert_eq!(parse_hex_color("#ff80"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn strict_six_digit_check() {
        assert!(is_hex6_color("#1A2b3C"));
        assert!(!is_hex6_color("#abc"));
        assert!(!is_hex6_color("1a2b3c4"));
        assert!(!is_hex6_color("#1a2b3g"));
    }

    #[test]
    fn formats_lowercase_hex() {
        assert_eq!(to_hex([255, 0, 171]), "#ff00ab");
    }
}
