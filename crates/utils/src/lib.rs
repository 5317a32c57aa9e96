//! # Cellcalc Utils
//!
//! Pure numeric helpers used by the function library: rounding and parity
//! rules, order statistics, annuity identities and date serial conversion.
//! Nothing here knows about the value model; inputs and outputs are plain
//! `f64`s and undefined results are reported as `NaN`.

pub mod datetime;
pub mod finance;
pub mod math;
pub mod stats;

pub use datetime::{
    calendar_to_excel_date, excel_date_to_calendar, is_valid_excel_date, ExcelDate,
};
