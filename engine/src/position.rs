//! FILENAME: engine/src/position.rs
//! PURPOSE: Row/column coordinates and A1-style textual encoding.
//! CONTEXT: A Position is the address half of every cell and cell
//! reference. Encoding/decoding the column letters uses the natural
//! bijective base-26 (A, B, ... Z, AA, AB, ...), not a plain base-26,
//! which is why the digit biasing below looks unusual at first glance.

use std::fmt;

/// Rows and columns are bounded the same way on both axes.
pub const MAX_ROWS: i32 = 16384;
pub const MAX_COLS: i32 = 16384;

/// A zero-based `(row, col)` coordinate. `row == -1 || col == -1` marks
/// an invalid position — the sentinel produced by a malformed A1 string,
/// or by a reference that fell inside a deleted row/column range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// The canonical invalid position.
    pub fn invalid() -> Self {
        Position { row: -1, col: -1 }
    }

    pub fn is_valid(&self) -> bool {
        0 <= self.row && self.row < MAX_ROWS && 0 <= self.col && self.col < MAX_COLS
    }

    /// Parses an A1-style string such as `"A1"` or `"BC17"`.
    ///
    /// The shape required is: a non-empty run of uppercase ASCII letters,
    /// immediately followed by a non-empty run of ASCII digits, with
    /// nothing else. Anything else — a lowercase prefix, no digit suffix,
    /// letters interleaved with digits — yields `Position::invalid()`.
    pub fn from_text(s: &str) -> Self {
        let bytes = s.as_bytes();
        let letters_end = bytes.iter().take_while(|b| b.is_ascii_uppercase()).count();

        if letters_end == 0 || letters_end == bytes.len() {
            return Position::invalid();
        }

        let digits = &bytes[letters_end..];
        if !digits.iter().all(|b| b.is_ascii_digit()) {
            return Position::invalid();
        }

        let row: i32 = match std::str::from_utf8(digits).unwrap().parse::<i64>() {
            Ok(n) => (n - 1) as i32,
            Err(_) => return Position::invalid(),
        };

        let col = col_to_index(&s[..letters_end]);
        Position { row, col }
    }

    /// Renders back to A1-style text; the empty string when invalid.
    pub fn to_text(&self) -> String {
        if !self.is_valid() {
            return String::new();
        }
        format!("{}{}", index_to_col(self.col), self.row + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

/// Converts a run of uppercase column letters (e.g. "AZ") to a zero-based
/// column index, using the bijective base-26 the textual form is defined
/// over: each letter contributes `digit = letter - 'A' + 1`, most
/// significant first, and the whole thing is biased down by one at the end.
fn col_to_index(col_str: &str) -> i32 {
    let mut result: i64 = 0;
    for c in col_str.bytes() {
        let digit = (c - b'A' + 1) as i64;
        result = result * 26 + digit;
    }
    (result - 1) as i32
}

/// Inverse of `col_to_index`.
fn index_to_col(mut col_index: i32) -> String {
    let mut letters = Vec::new();
    loop {
        let remainder = col_index % 26;
        letters.insert(0, (b'A' + remainder as u8) as char);
        if col_index < 26 {
            break;
        }
        col_index = col_index / 26 - 1;
    }
    letters.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a1_round_trips() {
        assert_eq!(Position::from_text("A1"), Position::new(0, 0));
        assert_eq!(Position::new(0, 0).to_text(), "A1");
    }

    #[test]
    fn two_letter_columns() {
        assert_eq!(Position::from_text("AA1"), Position::new(0, 26));
        assert_eq!(Position::new(0, 26).to_text(), "AA1");
        assert_eq!(Position::from_text("AZ1"), Position::new(0, 51));
        assert_eq!(Position::new(0, 51).to_text(), "AZ1");
    }

    #[test]
    fn bc17_matches_spec_example() {
        let pos = Position::from_text("BC17");
        assert!(pos.is_valid());
        assert_eq!(pos.to_text(), "BC17");
    }

    #[test]
    fn round_trip_over_many_indices() {
        for row in 0..200 {
            for col in 0..200 {
                let pos = Position::new(row, col);
                assert_eq!(Position::from_text(&pos.to_text()), pos);
            }
        }
    }

    #[test]
    fn lowercase_prefix_is_invalid() {
        assert!(!Position::from_text("a1").is_valid());
    }

    #[test]
    fn missing_digit_suffix_is_invalid() {
        assert!(!Position::from_text("ABC").is_valid());
    }

    #[test]
    fn interleaved_letters_and_digits_are_invalid() {
        assert!(!Position::from_text("A1A").is_valid());
    }

    #[test]
    fn empty_string_is_invalid() {
        assert!(!Position::from_text("").is_valid());
    }

    #[test]
    fn out_of_range_row_is_invalid() {
        assert!(!Position::new(-1, 0).is_valid());
        assert!(!Position::new(MAX_ROWS, 0).is_valid());
    }

    #[test]
    fn invalid_position_prints_empty_string() {
        assert_eq!(Position::invalid().to_text(), "");
    }

    #[test]
    fn ordering_is_row_then_col() {
        assert!(Position::new(0, 5) < Position::new(1, 0));
        assert!(Position::new(1, 0) < Position::new(1, 1));
    }
}
