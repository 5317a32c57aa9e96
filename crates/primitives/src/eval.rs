//! The operand/result type shared by every function.

use std::fmt;

use serde::Serialize;

use crate::address::CellAddress;
use crate::error::{ErrorKind, ShapeError};

/// Operand or result of a function invocation.
///
/// `Number`, `String`, `Bool`, `Blank` and `Error` are value evals. `Ref` and
/// `Area` are reference evals; they never nest, so a tree of evals is at most
/// two levels deep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Eval {
    Number(f64),
    String(String),
    Bool(bool),
    Blank,
    Error(ErrorKind),
    Ref(RefEval),
    Area(AreaEval),
}

impl Eval {
    pub const TRUE: Eval = Eval::Bool(true);
    pub const FALSE: Eval = Eval::Bool(false);
    pub const BLANK: Eval = Eval::Blank;

    /// Canonical empty string.
    pub fn empty_string() -> Eval {
        Eval::String(String::new())
    }

    pub fn text(s: impl Into<String>) -> Eval {
        Eval::String(s.into())
    }

    pub fn bool(b: bool) -> Eval {
        if b {
            Eval::TRUE
        } else {
            Eval::FALSE
        }
    }

    /// True for value evals (no addressing information).
    pub fn is_value(&self) -> bool {
        !matches!(self, Eval::Ref(_) | Eval::Area(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Eval::Error(_))
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Eval::Error(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Eval::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Eval::String(s) => Some(s),
            _ => None,
        }
    }

    /// Strip reference evals so the result can be stored in a cell.
    fn into_cell_value(self) -> Eval {
        match self {
            Eval::Ref(r) => *r.inner,
            Eval::Area(_) => Eval::Error(ErrorKind::ValueInvalid),
            other => other,
        }
    }
}

impl From<f64> for Eval {
    fn from(value: f64) -> Self {
        Eval::Number(value)
    }
}

impl From<bool> for Eval {
    fn from(value: bool) -> Self {
        Eval::bool(value)
    }
}

impl From<&str> for Eval {
    fn from(value: &str) -> Self {
        Eval::String(value.to_string())
    }
}

impl From<String> for Eval {
    fn from(value: String) -> Self {
        Eval::String(value)
    }
}

impl From<ErrorKind> for Eval {
    fn from(kind: ErrorKind) -> Self {
        Eval::Error(kind)
    }
}

impl From<RefEval> for Eval {
    fn from(value: RefEval) -> Self {
        Eval::Ref(value)
    }
}

impl From<AreaEval> for Eval {
    fn from(value: AreaEval) -> Self {
        Eval::Area(value)
    }
}

impl fmt::Display for Eval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eval::Number(n) => f.write_str(&format_number(*n)),
            Eval::String(s) => f.write_str(s),
            Eval::Bool(true) => f.write_str("TRUE"),
            Eval::Bool(false) => f.write_str("FALSE"),
            Eval::Blank => Ok(()),
            Eval::Error(kind) => f.write_str(kind.label()),
            Eval::Ref(r) => r.inner.fmt(f),
            Eval::Area(a) => write!(f, "{{{}}}", a.range_label()),
        }
    }
}

/// General number format: integral values print without a fractional part.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format!("{n:.0}");
    }
    n.to_string()
}

/// A resolved single-cell reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefEval {
    row: i32,
    col: i16,
    inner: Box<Eval>,
    evaluated: bool,
}

impl RefEval {
    /// Wrap the value of the cell at `(row, col)`.
    ///
    /// `evaluated` is true when the cell holds a formula that has already
    /// run. A reference eval passed as `inner` is collapsed: a nested ref
    /// contributes its inner value, an area becomes `#VALUE!`.
    pub fn new(row: i32, col: i16, inner: Eval, evaluated: bool) -> Self {
        Self {
            row,
            col,
            inner: Box::new(inner.into_cell_value()),
            evaluated,
        }
    }

    /// Reference to a literal (non-formula) cell.
    pub fn literal(row: i32, col: i16, inner: Eval) -> Self {
        Self::new(row, col, inner, false)
    }

    /// Reference to a formula cell holding its computed result.
    pub fn evaluated(row: i32, col: i16, inner: Eval) -> Self {
        Self::new(row, col, inner, true)
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn col(&self) -> i16 {
        self.col
    }

    pub fn address(&self) -> CellAddress {
        CellAddress::new(self.row, self.col)
    }

    /// The wrapped value; never a reference eval.
    pub fn inner(&self) -> &Eval {
        &self.inner
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }
}

/// A resolved rectangular range, cells stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaEval {
    first_row: i32,
    first_col: i16,
    last_row: i32,
    last_col: i16,
    values: Vec<Eval>,
}

impl AreaEval {
    /// Build an area from its corners and row-major cell values.
    ///
    /// Corners may be given in any order. Reference evals among `values` are
    /// collapsed the same way as in [`RefEval::new`].
    pub fn new(
        first_row: i32,
        first_col: i16,
        last_row: i32,
        last_col: i16,
        values: Vec<Eval>,
    ) -> Result<Self, ShapeError> {
        let (first_row, last_row) = (first_row.min(last_row), first_row.max(last_row));
        let (first_col, last_col) = (first_col.min(last_col), first_col.max(last_col));
        if first_row < 0 || first_col < 0 {
            return Err(ShapeError::Bounds(format!(
                "R{}C{}:R{}C{}",
                first_row, first_col, last_row, last_col
            )));
        }

        let height = (i64::from(last_row) - i64::from(first_row) + 1) as usize;
        let width = (i32::from(last_col) - i32::from(first_col) + 1) as usize;
        let expected = height * width;
        if values.len() != expected {
            return Err(ShapeError::CellCount {
                range: format!(
                    "{}:{}",
                    CellAddress::new(first_row, first_col),
                    CellAddress::new(last_row, last_col)
                ),
                expected,
                actual: values.len(),
            });
        }

        Ok(Self {
            first_row,
            first_col,
            last_row,
            last_col,
            values: values.into_iter().map(Eval::into_cell_value).collect(),
        })
    }

    /// Build an area from nested rows anchored at `top_left`.
    pub fn from_rows(top_left: CellAddress, rows: Vec<Vec<Eval>>) -> Result<Self, ShapeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(ShapeError::CellCount {
                range: top_left.to_a1(),
                expected: 1,
                actual: 0,
            });
        }
        if let Some(bad) = rows.iter().find(|row| row.len() != width) {
            return Err(ShapeError::CellCount {
                range: top_left.to_a1(),
                expected: width,
                actual: bad.len(),
            });
        }
        let last_row = top_left.row + height as i32 - 1;
        let last_col = top_left.col + width as i16 - 1;
        Self::new(
            top_left.row,
            top_left.col,
            last_row,
            last_col,
            rows.into_iter().flatten().collect(),
        )
    }

    pub fn first_row(&self) -> i32 {
        self.first_row
    }

    pub fn last_row(&self) -> i32 {
        self.last_row
    }

    pub fn first_col(&self) -> i16 {
        self.first_col
    }

    pub fn last_col(&self) -> i16 {
        self.last_col
    }

    pub fn height(&self) -> usize {
        (self.last_row - self.first_row + 1) as usize
    }

    pub fn width(&self) -> usize {
        (self.last_col - self.first_col + 1) as usize
    }

    pub fn is_row(&self) -> bool {
        self.first_row == self.last_row
    }

    pub fn is_column(&self) -> bool {
        self.first_col == self.last_col
    }

    pub fn contains_row(&self, row: i32) -> bool {
        row >= self.first_row && row <= self.last_row
    }

    pub fn contains_column(&self, col: i16) -> bool {
        col >= self.first_col && col <= self.last_col
    }

    pub fn contains(&self, row: i32, col: i16) -> bool {
        self.contains_row(row) && self.contains_column(col)
    }

    /// Cell at absolute sheet coordinates, if inside the area.
    pub fn value_at(&self, row: i32, col: i16) -> Option<&Eval> {
        if !self.contains(row, col) {
            return None;
        }
        let r = (row - self.first_row) as usize;
        let c = (col - self.first_col) as usize;
        self.values.get(r * self.width() + c)
    }

    /// Cell at a zero-based offset from the top-left corner.
    pub fn relative_value(&self, row_offset: usize, col_offset: usize) -> Option<&Eval> {
        if row_offset >= self.height() || col_offset >= self.width() {
            return None;
        }
        self.values.get(row_offset * self.width() + col_offset)
    }

    /// All cells in row-major order.
    pub fn values(&self) -> &[Eval] {
        &self.values
    }

    pub fn range_label(&self) -> String {
        format!(
            "{}:{}",
            CellAddress::new(self.first_row, self.first_col),
            CellAddress::new(self.last_row, self.last_col)
        )
    }
}
