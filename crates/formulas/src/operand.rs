//! Operand resolution shared by every function family.
//!
//! Functions receive operands exactly as the host evaluated them: plain
//! values, single-cell references or rectangular areas. The helpers here
//! turn those into the scalar or list shape each family works on, relative
//! to the cell that contains the formula.

use cellcalc_primitives::{AreaEval, CellAddress, ErrorKind, Eval};

use crate::coercion::{parse_bool, CoercionPolicy};

/// Default cap on the number of operands of a variadic function.
pub const MAX_OPERANDS: usize = 30;

/// Collapse an area to the single cell aligned with the evaluating cell.
///
/// A one-row area yields the cell in the caller's column and a one-column
/// area the cell in the caller's row. An area that contains the caller is a
/// circular reference, whatever its shape.
pub fn resolve_scalar(area: &AreaEval, src_row: i32, src_col: i16) -> Result<Eval, ErrorKind> {
    if area.contains(src_row, src_col) {
        tracing::trace!(
            range = %area.range_label(),
            cell = %CellAddress::new(src_row, src_col),
            "circular reference"
        );
        return Err(ErrorKind::CircularRef);
    }
    if area.is_row() && area.contains_column(src_col) {
        return area
            .value_at(area.first_row(), src_col)
            .cloned()
            .ok_or(ErrorKind::ValueInvalid);
    }
    if area.is_column() && area.contains_row(src_row) {
        return area
            .value_at(src_row, area.first_col())
            .cloned()
            .ok_or(ErrorKind::ValueInvalid);
    }
    Err(ErrorKind::ValueInvalid)
}

/// All cells of an area, row-major. No circularity check.
pub fn flatten(area: &AreaEval) -> Vec<Eval> {
    area.values().to_vec()
}

/// Resolve areas to their aligned cell; pass every other operand through.
pub fn resolve_operand(eval: &Eval, src_row: i32, src_col: i16) -> Result<Eval, ErrorKind> {
    match eval {
        Eval::Area(area) => resolve_scalar(area, src_row, src_col),
        other => Ok(other.clone()),
    }
}

/// The value behind a reference; any other operand is returned as is.
pub fn inner_value(eval: &Eval) -> &Eval {
    match eval {
        Eval::Ref(r) => r.inner(),
        other => other,
    }
}

/// Numeric value of a single operand under `policy`. `None` means blank.
pub fn numeric_operand(
    eval: &Eval,
    src_row: i32,
    src_col: i16,
    policy: CoercionPolicy,
) -> Result<Option<f64>, ErrorKind> {
    match eval {
        Eval::Area(area) => policy.xlate_area_cell(&resolve_scalar(area, src_row, src_col)?),
        other => policy.xlate_to_numeric(other),
    }
}

/// Like [`numeric_operand`], with blank read as zero.
pub fn number_operand(
    eval: &Eval,
    src_row: i32,
    src_col: i16,
    policy: CoercionPolicy,
) -> Result<f64, ErrorKind> {
    Ok(numeric_operand(eval, src_row, src_col, policy)?.unwrap_or(0.0))
}

/// Boolean value of a non-area operand. `None` means blank.
///
/// Numbers are true when non-zero. A string behind a reference counts as
/// blank; a bare string must spell `TRUE`/`FALSE` unless
/// `strings_are_blanks` is set.
pub fn bool_operand(eval: &Eval, strings_are_blanks: bool) -> Result<Option<bool>, ErrorKind> {
    match eval {
        Eval::Bool(b) => Ok(Some(*b)),
        Eval::Number(n) => Ok(Some(*n != 0.0)),
        Eval::Blank => Ok(None),
        Eval::Error(kind) => Err(*kind),
        Eval::String(_) if strings_are_blanks => Ok(None),
        Eval::String(s) => parse_bool(s).map(Some).ok_or(ErrorKind::ValueInvalid),
        Eval::Ref(r) => bool_operand(r.inner(), true),
        Eval::Area(_) => Err(ErrorKind::ValueInvalid),
    }
}

/// Text value of a single operand.
///
/// Literal numbers and booleans are rejected; the same values read through
/// a reference are rendered in general format.
pub fn text_operand(eval: &Eval, src_row: i32, src_col: i16) -> Result<String, ErrorKind> {
    match eval {
        Eval::String(s) => Ok(s.clone()),
        Eval::Blank => Ok(String::new()),
        Eval::Error(kind) => Err(*kind),
        Eval::Number(_) | Eval::Bool(_) => Err(ErrorKind::ValueInvalid),
        Eval::Ref(r) => cell_text(r.inner()),
        Eval::Area(area) => cell_text(&resolve_scalar(area, src_row, src_col)?),
    }
}

fn cell_text(value: &Eval) -> Result<String, ErrorKind> {
    match value {
        Eval::Error(kind) => Err(*kind),
        other => Ok(other.to_string()),
    }
}

/// Gathers the numbers of a variadic operand list.
///
/// Areas are flattened and their cells coerced with the literal-cell
/// reference rules; other operands are coerced directly. Blanks are skipped.
/// The first operand that fails to coerce aborts the collection with its
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberCollector {
    policy: CoercionPolicy,
    max_operands: usize,
}

impl NumberCollector {
    pub const fn new(policy: CoercionPolicy) -> Self {
        Self {
            policy,
            max_operands: MAX_OPERANDS,
        }
    }

    pub const fn with_max_operands(mut self, max_operands: usize) -> Self {
        self.max_operands = max_operands;
        self
    }

    pub fn policy(&self) -> CoercionPolicy {
        self.policy
    }

    pub fn collect(&self, operands: &[Eval]) -> Result<Vec<f64>, ErrorKind> {
        if operands.len() > self.max_operands {
            return Err(ErrorKind::ValueInvalid);
        }
        let mut numbers = Vec::with_capacity(operands.len());
        for operand in operands {
            self.collect_operand(operand, &mut numbers)?;
        }
        Ok(numbers)
    }

    fn collect_operand(&self, operand: &Eval, out: &mut Vec<f64>) -> Result<(), ErrorKind> {
        match operand {
            Eval::Area(area) => {
                for cell in area.values() {
                    if let Some(n) = self.policy.xlate_area_cell(cell)? {
                        out.push(n);
                    }
                }
            }
            other => {
                if let Some(n) = self.policy.xlate_to_numeric(other)? {
                    out.push(n);
                }
            }
        }
        Ok(())
    }
}

/// Collector behind the built-in functions. It leaves the operand count to
/// the registry's [`EngineOptions`](crate::EngineOptions).
pub(crate) const FUNCTION_COLLECTOR: NumberCollector =
    NumberCollector::new(CoercionPolicy::MULTI_OPERAND).with_max_operands(usize::MAX);

impl Default for NumberCollector {
    fn default() -> Self {
        Self::new(CoercionPolicy::MULTI_OPERAND)
    }
}
