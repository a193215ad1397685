#[cfg(test)]
use crate::layout::LayoutMode;
#[cfg(test)]
use crate::parse_song;
#[cfg(test)]
use crate::types::song::Song;

/// Format a document coordinate with at most five decimals, always keeping one.
pub fn format_coord(value: f64) -> String {
    let trimmed_zeros = format!("{:.5}", value).trim_end_matches('0').to_string();

    if trimmed_zeros.ends_with('.') {
        trimmed_zeros + "0"
    } else {
        trimmed_zeros
    }
}

#[cfg(test)]
pub fn assert_eq_songs(input: &str, transform: fn(&Song) -> Song, expected: &str) {
    let input_parsed = parse_song(input).expect("Failed to parse input");
    let expected_parsed = parse_song(expected).expect("Failed to parse expected");
    let transformed = transform(&input_parsed);
    assert_eq!(
        transformed.lines.len(),
        expected_parsed.lines.len(),
        "line count mismatch {} != {}, output={}",
        transformed.lines.len(),
        expected_parsed.lines.len(),
        serde_json::to_string_pretty(&transformed).unwrap_or_default(),
    );
    assert_eq!(transformed.title, expected_parsed.title);
    assert_eq!(transformed.key, expected_parsed.key);
    for (line, expected) in transformed.lines.iter().zip(expected_parsed.lines.iter()) {
        assert_eq!(line, expected);
    }
}

#[cfg(test)]
pub fn assert_eq_sheet(input: &str, steps: i32, mode: LayoutMode, expected: &str) {
    let song = parse_song(input).expect("Failed to parse input");
    let rendered = crate::render::render_song(&song, steps, mode);
    pretty_assertions::assert_eq!(rendered, expected);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tests() {
        assert_eq!(format_coord(1.234567), "1.23457");
        assert_eq!(format_coord(20.0), "20.0");
        assert_eq!(format_coord(42.5), "42.5");
        assert_eq!(format_coord(-5.0), "-5.0");
        assert_eq!(format_coord(0.0), "0.0");
        assert_eq!(format_coord(0.0023), "0.0023");
    }
}
