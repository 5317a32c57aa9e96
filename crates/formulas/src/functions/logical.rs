//! Logical functions and the IS* predicates.

use cellcalc_primitives::{ErrorKind, Eval};

use super::finish;
use crate::operand::{bool_operand, inner_value, resolve_scalar};

/// AND(logical1, ...): TRUE when every boolean operand is TRUE.
pub fn and(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    finish(reduce_bools(args, true, |acc, b| acc && b))
}

/// OR(logical1, ...): TRUE when any boolean operand is TRUE.
pub fn or(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    finish(reduce_bools(args, false, |acc, b| acc || b))
}

/// Range cells holding text are ignored; a bare text operand must spell a
/// boolean. Blanks are skipped, and having nothing left is `#VALUE!`.
fn reduce_bools(
    args: &[Eval],
    initial: bool,
    combine: fn(bool, bool) -> bool,
) -> Result<Eval, ErrorKind> {
    if args.is_empty() {
        return Err(ErrorKind::ValueInvalid);
    }
    let mut result: Option<bool> = None;
    for arg in args {
        match arg {
            Eval::Area(area) => {
                for cell in area.values() {
                    if let Some(b) = bool_operand(cell, true)? {
                        result = Some(combine(result.unwrap_or(initial), b));
                    }
                }
            }
            other => {
                if let Some(b) = bool_operand(other, false)? {
                    result = Some(combine(result.unwrap_or(initial), b));
                }
            }
        }
    }
    result.map(Eval::bool).ok_or(ErrorKind::ValueInvalid)
}

/// Boolean value of a single operand, blank read as FALSE.
fn scalar_bool(arg: &Eval, src_row: i32, src_col: i16) -> Result<bool, ErrorKind> {
    let value = match arg {
        Eval::Area(area) => bool_operand(&resolve_scalar(area, src_row, src_col)?, true)?,
        other => bool_operand(other, false)?,
    };
    Ok(value.unwrap_or(false))
}

pub fn not(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    let [arg] = args else {
        return Eval::Error(ErrorKind::ValueInvalid);
    };
    match scalar_bool(arg, src_row, src_col) {
        Ok(b) => Eval::bool(!b),
        Err(kind) => Eval::Error(kind),
    }
}

/// IF(condition, then, [else]). The chosen operand is returned untouched.
pub fn if_(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    if args.len() != 2 && args.len() != 3 {
        return Eval::Error(ErrorKind::UnknownError);
    }
    match scalar_bool(&args[0], src_row, src_col) {
        Ok(true) => args[1].clone(),
        Ok(false) => args.get(2).cloned().unwrap_or(Eval::FALSE),
        Err(kind) => Eval::Error(kind),
    }
}

pub fn true_(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    if args.is_empty() {
        Eval::TRUE
    } else {
        Eval::Error(ErrorKind::ValueInvalid)
    }
}

pub fn false_(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    if args.is_empty() {
        Eval::FALSE
    } else {
        Eval::Error(ErrorKind::ValueInvalid)
    }
}

/// Operand of an IS* predicate with references resolved. A failed area
/// resolution is inspected as the error it produced.
fn predicate_operand(arg: &Eval, src_row: i32, src_col: i16) -> Eval {
    match arg {
        Eval::Area(area) => resolve_scalar(area, src_row, src_col).unwrap_or_else(Eval::Error),
        other => inner_value(other).clone(),
    }
}

fn predicate(args: &[Eval], src_row: i32, src_col: i16, test: fn(&Eval) -> bool) -> Eval {
    let [arg] = args else {
        return Eval::Error(ErrorKind::ValueInvalid);
    };
    Eval::bool(test(&predicate_operand(arg, src_row, src_col)))
}

/// ISBLANK(value). A formula cell is never blank, even when its result is.
pub fn isblank(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    let [arg] = args else {
        return Eval::Error(ErrorKind::ValueInvalid);
    };
    let blank = match arg {
        Eval::Blank => true,
        Eval::Ref(r) => !r.is_evaluated() && matches!(r.inner(), Eval::Blank),
        Eval::Area(area) => matches!(resolve_scalar(area, src_row, src_col), Ok(Eval::Blank)),
        _ => false,
    };
    Eval::bool(blank)
}

pub fn isnumber(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    predicate(args, src_row, src_col, |v| matches!(v, Eval::Number(_)))
}

pub fn istext(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    predicate(args, src_row, src_col, |v| matches!(v, Eval::String(_)))
}

pub fn isnontext(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    predicate(args, src_row, src_col, |v| !matches!(v, Eval::String(_)))
}

pub fn islogical(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    predicate(args, src_row, src_col, |v| matches!(v, Eval::Bool(_)))
}

pub fn iserror(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    predicate(args, src_row, src_col, Eval::is_error)
}

/// ISERR(value): any error except `#N/A`.
pub fn iserr(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    predicate(args, src_row, src_col, |v| {
        matches!(v, Eval::Error(kind) if *kind != ErrorKind::Na)
    })
}

pub fn isna(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    predicate(args, src_row, src_col, |v| {
        matches!(v, Eval::Error(ErrorKind::Na))
    })
}
