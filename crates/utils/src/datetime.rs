//! Date serial conversion for spreadsheet operations.
//!
//! Serial 1 is 1900-01-01. The reference application treats 1900 as a leap
//! year, so serial 60 is the phantom 1900-02-29 and every serial from 61 on
//! is one day ahead of a plain day count. Serial 0 is the equally phantom
//! 1900-01-00.

use chrono::{Datelike, NaiveDate};

/// First serial past the supported range (10000-01-01).
pub const MAX_SERIAL: f64 = 2_958_466.0;

const PHANTOM_LEAP_DAY: i64 = 60;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Calendar fields of a date serial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcelDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// Whether `serial` is a date the spreadsheet can display.
pub fn is_valid_excel_date(serial: f64) -> bool {
    serial.is_finite() && serial >= 0.0 && serial < MAX_SERIAL
}

/// Split a serial into calendar fields, honouring the 1900 leap-year bug.
pub fn excel_date_to_calendar(serial: f64) -> Option<ExcelDate> {
    if !is_valid_excel_date(serial) {
        return None;
    }
    let whole = serial.floor();
    let mut seconds = ((serial - whole) * SECONDS_PER_DAY).round() as u32;
    let mut days = whole as i64;
    if seconds >= 86_400 {
        days += 1;
        seconds -= 86_400;
    }
    let (hour, minute, second) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);

    let (year, month, day) = match days {
        0 => (1900, 1, 0),
        PHANTOM_LEAP_DAY => (1900, 2, 29),
        _ => {
            let base = if days < PHANTOM_LEAP_DAY {
                NaiveDate::from_ymd_opt(1899, 12, 31)?
            } else {
                NaiveDate::from_ymd_opt(1899, 12, 30)?
            };
            let date = base.checked_add_signed(chrono::Duration::days(days))?;
            (date.year(), date.month(), date.day())
        }
    };

    Some(ExcelDate {
        year,
        month,
        day,
        hour,
        minute,
        second,
    })
}

/// Serial number of a calendar date. `None` outside 1900-01-01..=9999-12-31.
pub fn calendar_to_excel_date(date: NaiveDate) -> Option<f64> {
    let first = NaiveDate::from_ymd_opt(1900, 1, 1)?;
    let march_first = NaiveDate::from_ymd_opt(1900, 3, 1)?;
    if date < first || date.year() > 9999 {
        return None;
    }
    let days = (date - first).num_days() + 1;
    let serial = if date >= march_first { days + 1 } else { days };
    Some(serial as f64)
}

/// Calendar date for a possibly out-of-range `(year, month, day)` triple:
/// months past 12 roll into later years and days past the end of a month
/// (or below 1) roll into neighbouring months.
pub fn normalize_ymd(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let months = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = (months.rem_euclid(12) + 1) as u32;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_signed(chrono::Duration::try_days(day.checked_sub(1)?)?)
}
