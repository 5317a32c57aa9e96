//! MATCH and COUNTIF.

use std::cmp::Ordering;

use cellcalc_primitives::{ErrorKind, Eval};

use super::finish;
use crate::coercion::{parse_bool, parse_number, CoercionPolicy};
use crate::operand::{inner_value, number_operand, resolve_operand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchMode {
    /// Largest value less than or equal to the lookup value.
    LargestNotAbove,
    Exact,
    /// Smallest value greater than or equal to the lookup value.
    SmallestNotBelow,
}

/// MATCH(lookup_value, lookup_array, [match_type])
///
/// Returns the 1-based position of the lookup value. Elements of a
/// different kind than the lookup value are skipped.
pub fn match_(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    finish(match_impl(args, src_row, src_col))
}

fn match_impl(args: &[Eval], src_row: i32, src_col: i16) -> Result<Eval, ErrorKind> {
    let (lookup, range, match_type) = match args {
        [lookup, range] => (lookup, range, None),
        [lookup, range, match_type] => (lookup, range, Some(match_type)),
        _ => return Err(ErrorKind::ValueInvalid),
    };

    let lookup = resolve_operand(lookup, src_row, src_col)?;
    let lookup = match inner_value(&lookup) {
        Eval::Blank => return Err(ErrorKind::Na),
        Eval::Error(kind) => return Err(*kind),
        value => value.clone(),
    };

    // any trouble reading the match type is reported as #REF!
    let mode = match match_type {
        None => MatchMode::LargestNotAbove,
        Some(arg) => {
            let n = number_operand(arg, src_row, src_col, CoercionPolicy::NUMERIC)
                .map_err(|_| ErrorKind::RefInvalid)?
                .trunc();
            if n > 0.0 {
                MatchMode::LargestNotAbove
            } else if n < 0.0 {
                MatchMode::SmallestNotBelow
            } else {
                MatchMode::Exact
            }
        }
    };

    let values = lookup_values(range)?;
    let index = find_index(&lookup, values, mode).ok_or(ErrorKind::Na)?;
    Ok(Eval::Number((index + 1) as f64))
}

/// The vector MATCH searches. A two-dimensional area is not a vector.
fn lookup_values(range: &Eval) -> Result<&[Eval], ErrorKind> {
    match range {
        Eval::Area(area) if area.is_row() || area.is_column() => Ok(area.values()),
        Eval::Area(_) => Err(ErrorKind::Na),
        Eval::Ref(r) => Ok(std::slice::from_ref(r.inner())),
        Eval::Error(kind) => Err(*kind),
        value => Ok(std::slice::from_ref(value)),
    }
}

fn find_index(lookup: &Eval, values: &[Eval], mode: MatchMode) -> Option<usize> {
    match mode {
        MatchMode::Exact => values
            .iter()
            .position(|v| compare(lookup, v) == Some(Ordering::Equal)),
        MatchMode::LargestNotAbove => values
            .iter()
            .rposition(|v| matches!(compare(lookup, v), Some(Ordering::Equal | Ordering::Greater))),
        MatchMode::SmallestNotBelow => {
            for (i, v) in values.iter().enumerate() {
                match compare(lookup, v) {
                    Some(Ordering::Equal) => return Some(i),
                    Some(Ordering::Greater) => return i.checked_sub(1),
                    _ => {}
                }
            }
            None
        }
    }
}

/// Order of `lookup` relative to `candidate`; `None` when the kinds differ.
fn compare(lookup: &Eval, candidate: &Eval) -> Option<Ordering> {
    match (lookup, candidate) {
        (Eval::Number(a), Eval::Number(b)) => a.partial_cmp(b),
        (Eval::String(a), Eval::String(b)) => Some(a.to_lowercase().cmp(&b.to_lowercase())),
        (Eval::Bool(a), Eval::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Cell test built from a COUNTIF criteria operand.
#[derive(Debug, Clone, PartialEq)]
enum Criteria {
    /// Numbers, and strings that parse to the same number.
    Number(f64),
    /// Booleans only; the strings "TRUE"/"FALSE" never match.
    Bool(bool),
    /// Case-sensitive exact text.
    Text(String),
}

impl Criteria {
    fn parse(criteria: &Eval) -> Result<Self, ErrorKind> {
        match criteria {
            Eval::Number(n) => Ok(Criteria::Number(*n)),
            Eval::Bool(b) => Ok(Criteria::Bool(*b)),
            Eval::Blank => Ok(Criteria::Number(0.0)),
            Eval::Error(kind) => Err(*kind),
            Eval::String(s) => {
                if let Some(b) = parse_bool(s) {
                    return Ok(Criteria::Bool(b));
                }
                if let Some(n) = parse_number(s) {
                    return Ok(Criteria::Number(n));
                }
                // comparison operators and wildcards are not supported
                if s.starts_with(['>', '<', '=']) || s.contains(['*', '?']) {
                    return Err(ErrorKind::FunctionNotImplemented);
                }
                Ok(Criteria::Text(s.clone()))
            }
            Eval::Ref(_) | Eval::Area(_) => Err(ErrorKind::ValueInvalid),
        }
    }

    fn matches(&self, cell: &Eval) -> bool {
        match (self, cell) {
            (Criteria::Number(n), Eval::Number(x)) => x == n,
            (Criteria::Number(n), Eval::String(s)) => parse_number(s) == Some(*n),
            (Criteria::Bool(b), Eval::Bool(x)) => x == b,
            (Criteria::Text(t), Eval::String(s)) => s == t,
            _ => false,
        }
    }
}

/// COUNTIF(range, criteria)
pub fn countif(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    finish(countif_impl(args, src_row, src_col))
}

fn countif_impl(args: &[Eval], src_row: i32, src_col: i16) -> Result<Eval, ErrorKind> {
    let [range, criteria] = args else {
        return Err(ErrorKind::ValueInvalid);
    };
    let cells = match range {
        Eval::Area(area) => area.values(),
        Eval::Ref(r) => std::slice::from_ref(r.inner()),
        _ => return Err(ErrorKind::ValueInvalid),
    };
    let criteria = resolve_operand(criteria, src_row, src_col)?;
    let criteria = Criteria::parse(inner_value(&criteria))?;
    let count = cells.iter().filter(|cell| criteria.matches(cell)).count();
    Ok(Eval::Number(count as f64))
}
