//! Text functions.
//!
//! Positions and lengths count characters, not bytes, and positions are
//! 1-based. Numeric arguments are truncated toward zero.

use cellcalc_primitives::{ErrorKind, Eval};

use super::finish;
use crate::coercion::CoercionPolicy;
use crate::operand::{number_operand, text_operand};

/// Position or count argument, truncated toward zero. NaN and infinities
/// are `#VALUE!`.
fn integer_arg(arg: &Eval, src_row: i32, src_col: i16) -> Result<f64, ErrorKind> {
    let n = number_operand(arg, src_row, src_col, CoercionPolicy::NUMERIC)?;
    if n.is_finite() {
        Ok(n.trunc())
    } else {
        Err(ErrorKind::ValueInvalid)
    }
}

fn single_text(args: &[Eval], src_row: i32, src_col: i16, f: impl Fn(&str) -> Eval) -> Eval {
    let [arg] = args else {
        return Eval::Error(ErrorKind::ValueInvalid);
    };
    match text_operand(arg, src_row, src_col) {
        Ok(text) => f(&text),
        Err(kind) => Eval::Error(kind),
    }
}

pub fn len(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    single_text(args, src_row, src_col, |s| Eval::Number(s.chars().count() as f64))
}

/// TRIM(text): drop leading and trailing spaces and collapse inner runs of
/// spaces to one.
pub fn trim(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    single_text(args, src_row, src_col, |s| {
        let words: Vec<&str> = s.split(' ').filter(|w| !w.is_empty()).collect();
        Eval::String(words.join(" "))
    })
}

pub fn upper(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    single_text(args, src_row, src_col, |s| Eval::String(s.to_uppercase()))
}

pub fn lower(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    single_text(args, src_row, src_col, |s| Eval::String(s.to_lowercase()))
}

/// EXACT(text1, text2): case-sensitive comparison.
pub fn exact(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    let [a, b] = args else {
        return Eval::Error(ErrorKind::ValueInvalid);
    };
    let texts = text_operand(a, src_row, src_col)
        .and_then(|a| Ok((a, text_operand(b, src_row, src_col)?)));
    finish(texts.map(|(a, b)| Eval::bool(a == b)))
}

pub fn concatenate(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    if args.is_empty() {
        return Eval::Error(ErrorKind::ValueInvalid);
    }
    let mut out = String::new();
    for arg in args {
        match text_operand(arg, src_row, src_col) {
            Ok(text) => out.push_str(&text),
            Err(kind) => return Eval::Error(kind),
        }
    }
    Eval::String(out)
}

/// Text and optional character count shared by LEFT and RIGHT.
fn text_and_count(
    args: &[Eval],
    src_row: i32,
    src_col: i16,
) -> Result<(Vec<char>, usize), ErrorKind> {
    let (text, count) = match args {
        [text] => (text, None),
        [text, count] => (text, Some(count)),
        _ => return Err(ErrorKind::ValueInvalid),
    };
    let chars: Vec<char> = text_operand(text, src_row, src_col)?.chars().collect();
    let count = match count {
        Some(arg) => integer_arg(arg, src_row, src_col)?,
        None => 1.0,
    };
    if count < 0.0 {
        return Err(ErrorKind::ValueInvalid);
    }
    Ok((chars, count as usize))
}

pub fn left(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    finish(text_and_count(args, src_row, src_col).map(|(chars, count)| {
        Eval::String(chars.iter().take(count).collect())
    }))
}

pub fn right(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    finish(text_and_count(args, src_row, src_col).map(|(chars, count)| {
        let start = chars.len().saturating_sub(count);
        Eval::String(chars[start..].iter().collect())
    }))
}

/// MID(text, start, count)
///
/// A start past the end of the text yields a blank, not an empty string.
pub fn mid(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    finish(mid_impl(args, src_row, src_col))
}

fn mid_impl(args: &[Eval], src_row: i32, src_col: i16) -> Result<Eval, ErrorKind> {
    let [text, start, count] = args else {
        return Err(ErrorKind::ValueInvalid);
    };
    let chars: Vec<char> = text_operand(text, src_row, src_col)?.chars().collect();
    let start = integer_arg(start, src_row, src_col)?;
    let count = integer_arg(count, src_row, src_col)?;
    if start < 1.0 || count < 0.0 {
        return Err(ErrorKind::ValueInvalid);
    }
    if start > chars.len() as f64 {
        return Ok(Eval::BLANK);
    }
    let begin = start as usize - 1;
    let end = (begin as f64 + count).min(chars.len() as f64) as usize;
    Ok(Eval::String(chars[begin..end].iter().collect()))
}

/// REPLACE(old_text, start, count, new_text). Positions past the end of
/// the text are clamped to it.
pub fn replace(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    finish(replace_impl(args, src_row, src_col))
}

fn replace_impl(args: &[Eval], src_row: i32, src_col: i16) -> Result<Eval, ErrorKind> {
    let [old_text, start, count, new_text] = args else {
        return Err(ErrorKind::ValueInvalid);
    };
    let chars: Vec<char> = text_operand(old_text, src_row, src_col)?.chars().collect();
    let start = integer_arg(start, src_row, src_col)?;
    let count = integer_arg(count, src_row, src_col)?;
    let new_text = text_operand(new_text, src_row, src_col)?;
    if start < 1.0 || count < 0.0 {
        return Err(ErrorKind::ValueInvalid);
    }
    let len = chars.len() as f64;
    let begin = (start - 1.0).min(len) as usize;
    let end = (start - 1.0 + count).min(len) as usize;

    let mut out: String = chars[..begin].iter().collect();
    out.push_str(&new_text);
    out.extend(&chars[end..]);
    Ok(Eval::String(out))
}

/// SUBSTITUTE(text, old_text, new_text, [instance])
///
/// Without `instance` every occurrence is replaced; with it only the
/// N-th, counting non-overlapping matches from the left.
pub fn substitute(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    finish(substitute_impl(args, src_row, src_col))
}

fn substitute_impl(args: &[Eval], src_row: i32, src_col: i16) -> Result<Eval, ErrorKind> {
    let (text, search, replacement, instance) = match args {
        [t, s, r] => (t, s, r, None),
        [t, s, r, n] => (t, s, r, Some(n)),
        _ => return Err(ErrorKind::ValueInvalid),
    };
    let text = text_operand(text, src_row, src_col)?;
    let search = text_operand(search, src_row, src_col)?;
    let replacement = text_operand(replacement, src_row, src_col)?;
    let instance = match instance {
        Some(arg) => {
            let n = integer_arg(arg, src_row, src_col)?;
            if n < 1.0 {
                return Err(ErrorKind::ValueInvalid);
            }
            Some(n as usize)
        }
        None => None,
    };

    if search.is_empty() {
        return Ok(Eval::String(text));
    }
    let result = match instance {
        None => text.replace(&search, &replacement),
        Some(n) => match text.match_indices(&search).nth(n - 1) {
            Some((at, _)) => {
                let mut out = String::with_capacity(text.len());
                out.push_str(&text[..at]);
                out.push_str(&replacement);
                out.push_str(&text[at + search.len()..]);
                out
            }
            None => text,
        },
    };
    Ok(Eval::String(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellcalc_primitives::{AreaEval, RefEval};

    fn s(text: &str) -> Eval {
        Eval::text(text)
    }

    fn n(value: f64) -> Eval {
        Eval::Number(value)
    }

    #[test]
    fn test_len_trim_case() {
        assert_eq!(len(&[s("héllo")], 0, 0), n(5.0));
        assert_eq!(len(&[Eval::BLANK], 0, 0), n(0.0));
        assert_eq!(trim(&[s("  a   b  c ")], 0, 0), s("a b c"));
        assert_eq!(upper(&[s("abc")], 0, 0), s("ABC"));
        assert_eq!(lower(&[s("AbC")], 0, 0), s("abc"));
    }

    #[test]
    fn test_literal_numbers_are_not_text() {
        assert_eq!(len(&[n(123.0)], 0, 0), Eval::Error(ErrorKind::ValueInvalid));
        assert_eq!(len(&[Eval::TRUE], 0, 0), Eval::Error(ErrorKind::ValueInvalid));
        let cell = Eval::Ref(RefEval::literal(0, 0, n(123.0)));
        assert_eq!(len(&[cell], 5, 5), n(3.0));
    }

    #[test]
    fn test_exact_and_concatenate() {
        assert_eq!(exact(&[s("a"), s("a")], 0, 0), Eval::TRUE);
        assert_eq!(exact(&[s("a"), s("A")], 0, 0), Eval::FALSE);
        assert_eq!(concatenate(&[s("a"), Eval::BLANK, s("b")], 0, 0), s("ab"));
        assert_eq!(
            concatenate(&[s("a"), Eval::Error(ErrorKind::Na)], 0, 0),
            Eval::Error(ErrorKind::Na)
        );
    }

    #[test]
    fn test_left_right() {
        assert_eq!(left(&[s("hello")], 0, 0), s("h"));
        assert_eq!(left(&[s("hello"), n(3.0)], 0, 0), s("hel"));
        assert_eq!(left(&[s("hi"), n(10.0)], 0, 0), s("hi"));
        assert_eq!(right(&[s("hello"), n(2.0)], 0, 0), s("lo"));
        assert_eq!(right(&[s("hello")], 0, 0), s("o"));
        assert_eq!(
            left(&[s("hello"), n(-1.0)], 0, 0),
            Eval::Error(ErrorKind::ValueInvalid)
        );
    }

    #[test]
    fn test_mid() {
        assert_eq!(mid(&[s("test"), n(1.0), n(1.7)], 0, 0), s("t"));
        assert_eq!(mid(&[s("test"), n(2.0), n(10.0)], 0, 0), s("est"));
        assert_eq!(mid(&[s("test"), n(5.0), n(1.0)], 0, 0), Eval::BLANK);
        assert_eq!(mid(&[s("test"), n(4.0), n(0.0)], 0, 0), Eval::empty_string());
        assert_eq!(
            mid(&[s("test"), n(0.0), n(1.0)], 0, 0),
            Eval::Error(ErrorKind::ValueInvalid)
        );
        assert_eq!(
            mid(&[s("test"), n(1.0), n(-1.0)], 0, 0),
            Eval::Error(ErrorKind::ValueInvalid)
        );
        assert_eq!(mid(&[s("test"), s("2"), s("2")], 0, 0), s("es"));
    }

    #[test]
    fn test_non_finite_positions() {
        let invalid = Eval::Error(ErrorKind::ValueInvalid);
        assert_eq!(mid(&[s("test"), n(f64::NAN), n(1.0)], 0, 0), invalid);
        assert_eq!(mid(&[s("test"), n(1.0), n(f64::NAN)], 0, 0), invalid);
        assert_eq!(mid(&[s("test"), n(f64::INFINITY), n(1.0)], 0, 0), invalid);
        assert_eq!(replace(&[s("abc"), n(f64::NAN), n(1.0), s("Z")], 0, 0), invalid);
        assert_eq!(replace(&[s("abc"), n(1.0), n(f64::NAN), s("Z")], 0, 0), invalid);
        assert_eq!(left(&[s("abc"), n(f64::NAN)], 0, 0), invalid);
        assert_eq!(
            substitute(&[s("aa"), s("a"), s("b"), n(f64::NAN)], 0, 0),
            invalid
        );
    }

    #[test]
    fn test_replace() {
        assert_eq!(replace(&[s("abcdef"), n(3.0), n(2.0), s("X")], 0, 0), s("abXef"));
        assert_eq!(replace(&[s("abc"), n(10.0), n(2.0), s("X")], 0, 0), s("abcX"));
        assert_eq!(replace(&[s("abc"), n(2.0), n(99.0), s("")], 0, 0), s("a"));
        assert_eq!(replace(&[s("abc"), n(1.0), n(0.0), s("Z")], 0, 0), s("Zabc"));
        assert_eq!(
            replace(&[s("abc"), n(0.0), n(1.0), s("Z")], 0, 0),
            Eval::Error(ErrorKind::ValueInvalid)
        );
    }

    #[test]
    fn test_substitute() {
        assert_eq!(substitute(&[s("aXbXcX"), s("X"), s("-")], 0, 0), s("a-b-c-"));
        assert_eq!(
            substitute(&[s("aXbXcX"), s("X"), s("-"), n(2.0)], 0, 0),
            s("aXb-cX")
        );
        assert_eq!(
            substitute(&[s("aXbXcX"), s("X"), s("-"), n(4.0)], 0, 0),
            s("aXbXcX")
        );
        assert_eq!(substitute(&[s("aaaa"), s("aa"), s("b"), n(2.0)], 0, 0), s("aab"));
        assert_eq!(substitute(&[s("abc"), s(""), s("-")], 0, 0), s("abc"));
        assert_eq!(
            substitute(&[s("abc"), s("b"), s("-"), n(0.0)], 0, 0),
            Eval::Error(ErrorKind::ValueInvalid)
        );
    }

    #[test]
    fn test_text_from_area_uses_aligned_cell() {
        let area = AreaEval::new(0, 0, 1, 0, vec![s("first"), s("second")]).unwrap();
        assert_eq!(upper(&[Eval::Area(area.clone())], 1, 3), s("SECOND"));
        assert_eq!(
            upper(&[Eval::Area(area)], 1, 0),
            Eval::Error(ErrorKind::CircularRef)
        );
    }
}
