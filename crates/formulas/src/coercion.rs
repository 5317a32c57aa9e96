//! Numeric coercion rules.
//!
//! Every family decides separately how booleans, strings and blanks turn
//! into numbers, and whether the answer depends on where the value came
//! from (typed in directly, read from a literal cell, or read from a formula
//! cell). [`CoercionPolicy`] captures one such decision as a set of flags.

use bitflags::bitflags;
use cellcalc_primitives::{ErrorKind, Eval};

bitflags! {
    /// Independent coercion rules, combined per function family.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct CoercionPolicy: u32 {
        // Literal operands.
        const BOOL_IS_PARSED = 1 << 0;
        const STRING_IS_PARSED = 1 << 1;
        const BLANK_IS_PARSED = 1 << 2;

        // Values read through a reference to a literal cell.
        const REF_BOOL_IS_PARSED = 1 << 3;
        const REF_STRING_IS_PARSED = 1 << 4;
        const REF_BLANK_IS_PARSED = 1 << 5;

        // Values read through a reference to a formula cell.
        const EVALUATED_REF_BOOL_IS_PARSED = 1 << 6;
        const EVALUATED_REF_STRING_IS_PARSED = 1 << 7;
        const EVALUATED_REF_BLANK_IS_PARSED = 1 << 8;

        /// A string that is not a number may still be `TRUE`/`FALSE`.
        const STRING_TO_BOOL_IS_PARSED = 1 << 9;
        /// Same as `STRING_TO_BOOL_IS_PARSED`, for either kind of reference.
        const REF_STRING_TO_BOOL_IS_PARSED = 1 << 10;

        /// An unparsed literal string is `#VALUE!` instead of skipped.
        const STRING_IS_INVALID_VALUE = 1 << 11;
        /// An unparsed string behind a reference is `#VALUE!` instead of skipped.
        const REF_STRING_IS_INVALID_VALUE = 1 << 12;
    }
}

impl CoercionPolicy {
    /// Single-operand numeric functions: everything that can become a
    /// number does.
    pub const NUMERIC: Self = Self::BOOL_IS_PARSED
        .union(Self::STRING_IS_PARSED)
        .union(Self::BLANK_IS_PARSED)
        .union(Self::REF_BOOL_IS_PARSED)
        .union(Self::REF_STRING_IS_PARSED)
        .union(Self::REF_BLANK_IS_PARSED)
        .union(Self::EVALUATED_REF_BOOL_IS_PARSED)
        .union(Self::EVALUATED_REF_STRING_IS_PARSED)
        .union(Self::EVALUATED_REF_BLANK_IS_PARSED);

    /// Aggregates: literal cells holding text or booleans are skipped.
    pub const MULTI_OPERAND: Self = Self::BOOL_IS_PARSED
        .union(Self::STRING_IS_PARSED)
        .union(Self::EVALUATED_REF_BOOL_IS_PARSED)
        .union(Self::EVALUATED_REF_STRING_IS_PARSED);

    /// Date functions: like `NUMERIC`, but a blank stays blank.
    pub const DATE: Self = Self::NUMERIC
        .difference(Self::BLANK_IS_PARSED)
        .difference(Self::REF_BLANK_IS_PARSED)
        .difference(Self::EVALUATED_REF_BLANK_IS_PARSED);

    /// Coerce an operand to a number.
    ///
    /// `Ok(None)` means the operand is to be treated as blank. Areas must be
    /// resolved by the caller first and are rejected here.
    pub fn xlate_to_numeric(self, eval: &Eval) -> Result<Option<f64>, ErrorKind> {
        match eval {
            Eval::Ref(r) if r.is_evaluated() => self.xlate_value(r.inner(), Source::EvaluatedRef),
            Eval::Ref(r) => self.xlate_value(r.inner(), Source::Ref),
            Eval::Area(_) => Err(ErrorKind::ValueInvalid),
            value => self.xlate_value(value, Source::Literal),
        }
    }

    /// Coerce one cell of an area. Area cells follow the literal-cell
    /// reference rules.
    pub fn xlate_area_cell(self, cell: &Eval) -> Result<Option<f64>, ErrorKind> {
        match cell {
            Eval::Ref(_) | Eval::Area(_) => self.xlate_to_numeric(cell),
            value => self.xlate_value(value, Source::Ref),
        }
    }

    fn xlate_value(self, value: &Eval, source: Source) -> Result<Option<f64>, ErrorKind> {
        let (bool_flag, string_flag, blank_flag) = source.flags();
        match value {
            Eval::Number(n) => Ok(Some(*n)),
            Eval::Error(kind) => Err(*kind),
            Eval::Bool(b) => {
                if self.contains(bool_flag) {
                    Ok(Some(if *b { 1.0 } else { 0.0 }))
                } else {
                    Ok(None)
                }
            }
            Eval::Blank => {
                if self.contains(blank_flag) {
                    Ok(Some(0.0))
                } else {
                    Ok(None)
                }
            }
            Eval::String(s) => {
                let (to_bool_flag, invalid_flag) = match source {
                    Source::Literal => {
                        (Self::STRING_TO_BOOL_IS_PARSED, Self::STRING_IS_INVALID_VALUE)
                    }
                    Source::Ref | Source::EvaluatedRef => (
                        Self::REF_STRING_TO_BOOL_IS_PARSED,
                        Self::REF_STRING_IS_INVALID_VALUE,
                    ),
                };
                if self.contains(string_flag) {
                    if let Some(n) = parse_number(s) {
                        return Ok(Some(n));
                    }
                    if self.contains(to_bool_flag) {
                        if let Some(b) = parse_bool(s) {
                            return Ok(Some(if b { 1.0 } else { 0.0 }));
                        }
                    }
                    Err(ErrorKind::ValueInvalid)
                } else if self.contains(invalid_flag) {
                    Err(ErrorKind::ValueInvalid)
                } else {
                    Ok(None)
                }
            }
            Eval::Ref(_) | Eval::Area(_) => Err(ErrorKind::ValueInvalid),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Source {
    Literal,
    Ref,
    EvaluatedRef,
}

impl Source {
    fn flags(self) -> (CoercionPolicy, CoercionPolicy, CoercionPolicy) {
        match self {
            Source::Literal => (
                CoercionPolicy::BOOL_IS_PARSED,
                CoercionPolicy::STRING_IS_PARSED,
                CoercionPolicy::BLANK_IS_PARSED,
            ),
            Source::Ref => (
                CoercionPolicy::REF_BOOL_IS_PARSED,
                CoercionPolicy::REF_STRING_IS_PARSED,
                CoercionPolicy::REF_BLANK_IS_PARSED,
            ),
            Source::EvaluatedRef => (
                CoercionPolicy::EVALUATED_REF_BOOL_IS_PARSED,
                CoercionPolicy::EVALUATED_REF_STRING_IS_PARSED,
                CoercionPolicy::EVALUATED_REF_BLANK_IS_PARSED,
            ),
        }
    }
}

/// Parse text the way a typed-in number is parsed: surrounding whitespace,
/// an optional sign, a decimal point and an exponent are accepted.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    // f64::from_str also takes "inf" and "NaN"
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `TRUE` / `FALSE` in any letter case.
pub fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("TRUE") {
        Some(true)
    } else if text.eq_ignore_ascii_case("FALSE") {
        Some(false)
    } else {
        None
    }
}
