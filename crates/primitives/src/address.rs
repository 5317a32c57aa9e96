//! Cell coordinates as seen by the evaluator.
//!
//! Rows are `i32` and columns `i16`, both zero-based, which is the shape of
//! the `(src_row, src_col)` pair every function receives.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AddressError;

/// Zero-based `(row, col)` of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    pub row: i32,
    pub col: i16,
}

impl CellAddress {
    pub fn new(row: i32, col: i16) -> Self {
        Self { row, col }
    }

    /// Parse an A1-style reference. `$` anchors are accepted and ignored.
    pub fn from_a1(s: &str) -> Result<Self, AddressError> {
        let text = s.trim();
        if text.is_empty() {
            return Err(AddressError::InvalidRange("Empty A1 reference".to_string()));
        }

        let unanchored = text.strip_prefix('$').unwrap_or(text);
        let split = unanchored
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(unanchored.len());
        let (letters, rest) = unanchored.split_at(split);
        if letters.is_empty() {
            return Err(AddressError::InvalidColumn(text.to_string()));
        }
        let digits = rest.strip_prefix('$').unwrap_or(rest);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AddressError::InvalidRow(text.to_string()));
        }

        let row = digits
            .parse::<i32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| AddressError::InvalidRow(digits.to_string()))?;
        Ok(Self::new(row - 1, column_index(letters)?))
    }

    /// Render in A1 notation. Negative coordinates, which no sheet can hold,
    /// fall back to R1C1 so they still print.
    pub fn to_a1(&self) -> String {
        if self.row < 0 || self.col < 0 {
            return format!("R{}C{}", i64::from(self.row) + 1, i32::from(self.col) + 1);
        }
        format!("{}{}", column_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// Bijective base-26 column letters to a zero-based index.
fn column_index(letters: &str) -> Result<i16, AddressError> {
    let overflow = || AddressError::InvalidColumn(letters.to_string());
    let one_based = letters.bytes().try_fold(0i16, |acc, b| {
        let digit = i16::from(b.to_ascii_uppercase() - b'A') + 1;
        acc.checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(overflow)
    })?;
    Ok(one_based - 1)
}

fn column_letters(col: i16) -> String {
    let mut n = u32::from(col.unsigned_abs()) + 1;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    out.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_a1_basic() {
        assert_eq!(CellAddress::from_a1("A1").unwrap(), CellAddress::new(0, 0));
        assert_eq!(CellAddress::from_a1("$C$7").unwrap(), CellAddress::new(6, 2));
        assert_eq!(CellAddress::from_a1("AA10").unwrap(), CellAddress::new(9, 26));
    }

    #[test]
    fn test_from_a1_invalid() {
        assert!(CellAddress::from_a1("").is_err());
        assert!(CellAddress::from_a1("$1").is_err());
        assert!(CellAddress::from_a1("A").is_err());
        assert!(CellAddress::from_a1("A0").is_err());
        assert!(CellAddress::from_a1("A1B").is_err());
    }

    #[test]
    fn test_column_overflow() {
        assert_eq!(CellAddress::from_a1("XFD1").unwrap().col, 16383);
        assert!(CellAddress::from_a1("ZZZZ1").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(CellAddress::new(0, 0).to_string(), "A1");
        assert_eq!(CellAddress::new(99, 27).to_string(), "AB100");
        assert_eq!(CellAddress::new(-1, 0).to_string(), "R0C1");
    }
}
