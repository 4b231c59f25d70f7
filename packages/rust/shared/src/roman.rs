//! Term code conversion.
//!
//! Listing records identify the legislative term with a roman numeral
//! (`"XV"`), except the constituent assembly, which uses the code `"C"`.

use crate::error::{CongresoError, Result};

/// Code used by the source for the constituent term.
pub const CONSTITUENT_CODE: &str = "C";

const NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

fn digit_value(c: char) -> Option<u32> {
    match c {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

/// Convert a roman numeral (case-insensitive) to its integer value.
///
/// Only canonical numerals are accepted: `"IIII"` or `"VX"` are rejected
/// by checking that the value converts back to the same spelling.
pub fn roman_to_int(numeral: &str) -> Result<u32> {
    let upper = numeral.trim().to_ascii_uppercase();
    if upper.is_empty() {
        return Err(CongresoError::validation("empty roman numeral"));
    }

    let invalid = || CongresoError::validation(format!("invalid roman numeral {numeral:?}"));

    let mut total = 0i64;
    let mut prev = 0u32;
    for c in upper.chars().rev() {
        let value = digit_value(c).ok_or_else(invalid)?;
        if value < prev {
            total -= i64::from(value);
        } else {
            total += i64::from(value);
            prev = value;
        }
    }

    let total = u32::try_from(total)
        .ok()
        .filter(|t| (1..=3999).contains(t))
        .ok_or_else(invalid)?;
    if int_to_roman(total)? != upper {
        return Err(CongresoError::validation(format!(
            "non-canonical roman numeral {numeral:?}"
        )));
    }
    Ok(total)
}

/// Convert an integer in `1..=3999` to its canonical roman numeral.
pub fn int_to_roman(mut value: u32) -> Result<String> {
    if value == 0 || value > 3999 {
        return Err(CongresoError::validation(format!(
            "{value} has no roman numeral representation"
        )));
    }

    let mut out = String::new();
    for (amount, symbol) in NUMERALS {
        while value >= amount {
            out.push_str(symbol);
            value -= amount;
        }
    }
    Ok(out)
}

/// Convert a listing term code to the integer term: `"C"` is 0, anything else
/// is read as a roman numeral.
pub fn parse_term_code(code: &str) -> Result<u32> {
    if code.trim() == CONSTITUENT_CODE {
        return Ok(0);
    }
    roman_to_int(code)
}
