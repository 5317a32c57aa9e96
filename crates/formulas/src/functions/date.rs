//! DATE and the serial-splitting functions.

use cellcalc_primitives::{ErrorKind, Eval};
use cellcalc_utils::datetime::{
    calendar_to_excel_date, excel_date_to_calendar, normalize_ymd, ExcelDate,
};

use super::finish;
use crate::coercion::CoercionPolicy;
use crate::operand::numeric_operand;

const FEB_29_1900: f64 = 60.0;

/// DATE(year, month, day)
///
/// Months and days outside their usual range roll into neighbouring
/// months and years. Years below 1900 are read as offsets from 1900.
pub fn date(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    finish(date_impl(args, src_row, src_col))
}

fn date_impl(args: &[Eval], src_row: i32, src_col: i16) -> Result<Eval, ErrorKind> {
    let [year, month, day] = args else {
        return Err(ErrorKind::ValueInvalid);
    };
    let part = |arg: &Eval| -> Result<i64, ErrorKind> {
        let n = numeric_operand(arg, src_row, src_col, CoercionPolicy::DATE)?.unwrap_or(0.0);
        Ok(n.trunc() as i64)
    };
    let mut year = part(year)?;
    let month = part(month)?;
    let mut day = part(day)?;

    if !(0..10_000).contains(&year) {
        return Err(ErrorKind::NumError);
    }
    if year < 1900 {
        year += 1900;
    }

    // 1900 is treated as a leap year: day 60 of 1900 is February 29 and
    // every later January/February day number is shifted down by one.
    if year == 1900 && (month == 1 || month == 2) {
        let day_of_year = if month == 2 { day.saturating_add(31) } else { day };
        if day_of_year == 60 {
            return Ok(Eval::Number(FEB_29_1900));
        }
        if day_of_year > 60 {
            day -= 1;
        }
    }

    let serial = normalize_ymd(year, month, day)
        .and_then(calendar_to_excel_date)
        .ok_or(ErrorKind::NumError)?;
    Ok(Eval::Number(serial))
}

fn date_part(args: &[Eval], src_row: i32, src_col: i16, field: fn(&ExcelDate) -> u32) -> Eval {
    let [arg] = args else {
        return Eval::Error(ErrorKind::ValueInvalid);
    };
    match numeric_operand(arg, src_row, src_col, CoercionPolicy::DATE) {
        Ok(None) => Eval::BLANK,
        Ok(Some(serial)) => match excel_date_to_calendar(serial) {
            Some(date) => Eval::Number(f64::from(field(&date))),
            None => Eval::Error(ErrorKind::NumError),
        },
        Err(kind) => Eval::Error(kind),
    }
}

pub fn year(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    date_part(args, src_row, src_col, |d| d.year as u32)
}

pub fn month(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    date_part(args, src_row, src_col, |d| d.month)
}

pub fn day(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    date_part(args, src_row, src_col, |d| d.day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellcalc_primitives::RefEval;

    fn n(value: f64) -> Eval {
        Eval::Number(value)
    }

    fn d(y: f64, m: f64, day_: f64) -> Eval {
        date(&[n(y), n(m), n(day_)], 0, 0)
    }

    #[test]
    fn test_date_leap_year_compatibility() {
        assert_eq!(d(1900.0, 1.0, 1.0), n(1.0));
        assert_eq!(d(1900.0, 2.0, 28.0), n(59.0));
        assert_eq!(d(1900.0, 2.0, 29.0), n(60.0));
        assert_eq!(d(1900.0, 1.0, 60.0), n(60.0));
        assert_eq!(d(1900.0, 3.0, 1.0), n(61.0));
        assert_eq!(d(1900.0, 1.0, 61.0), n(61.0));
    }

    #[test]
    fn test_date_known_serials() {
        assert_eq!(d(2022.0, 1.0, 1.0), n(44562.0));
        assert_eq!(d(122.0, 1.0, 1.0), n(44562.0));
        assert_eq!(d(9999.0, 12.0, 31.0), n(2_958_465.0));
    }

    #[test]
    fn test_date_rollover_and_truncation() {
        assert_eq!(d(2021.0, 13.0, 1.0), n(44562.0));
        assert_eq!(d(2022.0, 1.0, 0.0), n(44561.0));
        assert_eq!(d(2022.9, 1.9, 1.5), n(44562.0));
    }

    #[test]
    fn test_date_out_of_range() {
        assert_eq!(d(-1.0, 1.0, 1.0), Eval::Error(ErrorKind::NumError));
        assert_eq!(d(10_000.0, 1.0, 1.0), Eval::Error(ErrorKind::NumError));
        assert_eq!(d(1900.0, 1.0, 0.0), Eval::Error(ErrorKind::NumError));
    }

    #[test]
    fn test_date_huge_month_or_day() {
        let num = Eval::Error(ErrorKind::NumError);
        assert_eq!(d(2000.0, -1e300, 1.0), num);
        assert_eq!(d(2000.0, 1e300, 1.0), num);
        assert_eq!(d(1900.0, 2.0, 1e300), num);
        assert_eq!(d(1900.0, 1.0, -1e300), num);
        assert_eq!(d(2000.0, 1.0, -1e300), num);
        assert_eq!(d(2000.0, 1.0, 1e300), num);
    }

    #[test]
    fn test_date_operand_coercion() {
        assert_eq!(
            date(&[Eval::text("2022"), Eval::TRUE, Eval::Number(1.0)], 0, 0),
            n(44562.0)
        );
        assert_eq!(
            date(&[Eval::text("x"), n(1.0), n(1.0)], 0, 0),
            Eval::Error(ErrorKind::ValueInvalid)
        );
        assert_eq!(
            date(&[n(2022.0), n(1.0)], 0, 0),
            Eval::Error(ErrorKind::ValueInvalid)
        );
    }

    #[test]
    fn test_year_month_day() {
        assert_eq!(year(&[n(44562.5)], 0, 0), n(2022.0));
        assert_eq!(month(&[n(44562.0)], 0, 0), n(1.0));
        assert_eq!(day(&[n(60.0)], 0, 0), n(29.0));
        assert_eq!(month(&[n(60.0)], 0, 0), n(2.0));
        assert_eq!(day(&[n(0.0)], 0, 0), n(0.0));
        assert_eq!(year(&[n(0.0)], 0, 0), n(1900.0));
    }

    #[test]
    fn test_year_month_day_edge_cases() {
        assert_eq!(day(&[Eval::BLANK], 0, 0), Eval::BLANK);
        let blank_cell = Eval::Ref(RefEval::literal(1, 1, Eval::BLANK));
        assert_eq!(year(&[blank_cell], 0, 0), Eval::BLANK);
        assert_eq!(day(&[n(-1.0)], 0, 0), Eval::Error(ErrorKind::NumError));
        assert_eq!(day(&[n(3e6)], 0, 0), Eval::Error(ErrorKind::NumError));
        assert_eq!(
            day(&[Eval::Error(ErrorKind::Na)], 0, 0),
            Eval::Error(ErrorKind::Na)
        );
        assert_eq!(day(&[Eval::text("44562")], 0, 0), n(1.0));
    }
}
