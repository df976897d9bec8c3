//! Delimiter-based codec for array-structured XML text content.
//!
//! Text bodies such as `"1:2:3,4:5:6;7:8:9,10:11:12"` encode nested
//! arrays of scalars. Separator precedence is fixed from outermost to
//! innermost structural level: semicolon, then comma, then colon. The
//! schema's `delims` attribute supplies the characters; this precedence
//! decides which character plays which role when fewer separators are
//! present than the declared dimensionality.

use crate::error::DataError;
use std::fmt;

/// Separator characters in precedence order, outermost first.
pub const SEPARATORS: [char; 3] = [';', ',', ':'];

/// A single numeric cell value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            // {:?} keeps a trailing ".0" so whole floats read back as floats
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// A parsed array-text value: a scalar at depth 0, or nested sequences.
#[derive(Debug, Clone, PartialEq)]
pub enum Cells {
    /// A single scalar value.
    Scalar(Scalar),
    /// One nesting level.
    Seq(Vec<Cells>),
}

impl Cells {
    /// Convenience constructor for an integer scalar.
    #[must_use]
    pub const fn int(value: i64) -> Self {
        Self::Scalar(Scalar::Int(value))
    }

    /// Convenience constructor for a floating-point scalar.
    #[must_use]
    pub const fn float(value: f64) -> Self {
        Self::Scalar(Scalar::Float(value))
    }

    /// Returns the nesting depth of this value tree.
    ///
    /// A scalar has depth 0; each `Seq` level adds one. Depth follows
    /// the first element, matching the well-formedness requirement that
    /// siblings share a depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Scalar(_) => 0,
            Self::Seq(items) => 1 + items.first().map_or(0, Cells::depth),
        }
    }
}

/// Checks a delimiter sequence declared in a schema.
///
/// Every character must be one of the recognized separators, and no
/// character may repeat.
///
/// # Errors
/// Returns `DataError` for an unknown or duplicate delimiter.
pub fn validate_delims(delims: &[char]) -> Result<(), DataError> {
    for (i, &d) in delims.iter().enumerate() {
        if !SEPARATORS.contains(&d) {
            return Err(DataError::UnknownDelimiter { delimiter: d });
        }
        if delims[..i].contains(&d) {
            return Err(DataError::DuplicateDelimiter { delimiter: d });
        }
    }
    Ok(())
}

/// Parses array text of the given dimensionality into a value tree.
///
/// # Errors
/// Returns `DataError` when the input carries more distinct separators
/// than the declared dimensionality, when a 2-D input with a single
/// comma cannot be told apart as a row or a column, or when a token is
/// not numeric.
pub fn parse(text: &str, dim: usize) -> Result<Cells, DataError> {
    let present: Vec<char> = SEPARATORS
        .iter()
        .copied()
        .filter(|&sep| text.contains(sep))
        .collect();

    if present.len() > dim {
        return Err(DataError::TooManyDimensions {
            declared: dim,
            found: present.len(),
        });
    }

    match dim {
        0 => numeric(text).map(Cells::Scalar),

        1 => {
            let tokens: Vec<&str> = match present.first() {
                Some(&sep) => text.split(sep).collect(),
                None => text.split_whitespace().collect(),
            };
            collect_scalars(&tokens)
        }

        2 => parse_2d(text, &present),

        _ => {
            // Three fixed levels regardless of which separators occur;
            // an absent level degenerates to a single-element split.
            let sheets = text
                .split(';')
                .map(|sheet| {
                    let rows = sheet
                        .split(',')
                        .map(|row| {
                            let cells: Vec<&str> = row.split(':').collect();
                            collect_scalars(&cells)
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Cells::Seq(rows))
                })
                .collect::<Result<Vec<_>, DataError>>()?;
            Ok(Cells::Seq(sheets))
        }
    }
}

fn parse_2d(text: &str, present: &[char]) -> Result<Cells, DataError> {
    match present {
        [] => Ok(Cells::Seq(vec![Cells::Seq(vec![Cells::Scalar(numeric(
            text,
        )?)])])),

        [','] => Err(DataError::Ambiguous {
            text: text.to_string(),
        }),

        // Matrix with one row.
        [':'] => {
            let cells: Vec<&str> = text.split(':').collect();
            Ok(Cells::Seq(vec![collect_scalars(&cells)?]))
        }

        // Matrix with several rows of one column each.
        [';'] => {
            let rows = text
                .split(';')
                .map(|row| Ok(Cells::Seq(vec![Cells::Scalar(numeric(row)?)])))
                .collect::<Result<Vec<_>, DataError>>()?;
            Ok(Cells::Seq(rows))
        }

        // Two separators: outer splits rows, inner splits cells.
        [outer, inner] => {
            let rows = text
                .split(*outer)
                .map(|row| {
                    let cells: Vec<&str> = row.split(*inner).collect();
                    collect_scalars(&cells)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Cells::Seq(rows))
        }

        _ => unreachable!("separator count bounded by dimensionality check"),
    }
}

fn collect_scalars(tokens: &[&str]) -> Result<Cells, DataError> {
    let scalars = tokens
        .iter()
        .map(|t| numeric(t).map(Cells::Scalar))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Cells::Seq(scalars))
}

/// Reads one numeric token: integer when it fits the integer literal
/// grammar, floating point otherwise.
fn numeric(token: &str) -> Result<Scalar, DataError> {
    let not_numeric = || DataError::NotNumeric {
        token: token.to_string(),
    };
    let t = token.trim();
    if let Ok(i) = t.parse::<i64>() {
        return Ok(Scalar::Int(i));
    }
    // f64 parsing also accepts "inf"/"NaN" spellings; those are not data.
    if !t.starts_with(|c: char| c.is_ascii_digit() || c == '+' || c == '-' || c == '.') {
        return Err(not_numeric());
    }
    t.parse::<f64>()
        .map(Scalar::Float)
        .map_err(|_| not_numeric())
}

/// Emits a value tree as array text, the structural inverse of [`parse`].
///
/// The value tree's depth must equal `delims.len()`; levels are joined
/// outermost to innermost using the delimiter sequence in order.
///
/// # Errors
/// Returns `DataError::DepthMismatch` when the tree depth and delimiter
/// count disagree.
pub fn emit(cells: &Cells, delims: &[char]) -> Result<String, DataError> {
    match cells {
        Cells::Scalar(s) => {
            if delims.is_empty() {
                Ok(s.to_string())
            } else {
                Err(DataError::DepthMismatch {
                    expected: delims.len(),
                    found: 0,
                })
            }
        }
        Cells::Seq(items) => {
            let (sep, rest) = delims.split_first().ok_or(DataError::DepthMismatch {
                expected: 0,
                found: cells.depth(),
            })?;
            let parts = items
                .iter()
                .map(|item| emit(item, rest))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(parts.join(&sep.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Cells {
        Cells::Seq(values.iter().map(|&v| Cells::int(v)).collect())
    }

    fn rows(values: &[&[i64]]) -> Cells {
        Cells::Seq(values.iter().map(|row| ints(row)).collect())
    }

    #[test]
    fn test_parse_dim0() {
        assert_eq!(parse(" 4 ", 0).unwrap(), Cells::int(4));
        assert!(matches!(
            parse(" 4, 5 ", 0),
            Err(DataError::TooManyDimensions { .. })
        ));
    }

    #[test]
    fn test_parse_dim0_float() {
        assert_eq!(parse("1.5", 0).unwrap(), Cells::float(1.5));
    }

    #[test]
    fn test_parse_dim1() {
        assert_eq!(parse(" 1.23 ", 1).unwrap(), Cells::Seq(vec![Cells::float(1.23)]));
        assert_eq!(parse(" 1,2,3 ", 1).unwrap(), ints(&[1, 2, 3]));
        assert_eq!(parse(" 1:2:3 ", 1).unwrap(), ints(&[1, 2, 3]));
        assert_eq!(parse(" 1;2;3 ", 1).unwrap(), ints(&[1, 2, 3]));
    }

    #[test]
    fn test_parse_dim1_too_many_separators() {
        assert!(matches!(
            parse(" 1,2:3 ", 1),
            Err(DataError::TooManyDimensions { .. })
        ));
    }

    #[test]
    fn test_parse_dim2_degenerate_scalar() {
        assert_eq!(parse("1", 2).unwrap(), rows(&[&[1]]));
    }

    #[test]
    fn test_parse_dim2_single_separator() {
        // One colon means one row, one semicolon means one column.
        assert_eq!(parse("1:2", 2).unwrap(), rows(&[&[1, 2]]));
        assert_eq!(parse("1;2", 2).unwrap(), rows(&[&[1], &[2]]));
        // A lone comma cannot be told apart as a row or a column.
        assert!(matches!(parse("1,2", 2), Err(DataError::Ambiguous { .. })));
    }

    #[test]
    fn test_parse_dim2_two_separators() {
        let expected = rows(&[&[1, 2], &[3, 4]]);
        assert_eq!(parse("1,2;3,4", 2).unwrap(), expected);
        assert_eq!(parse("1:2,3:4", 2).unwrap(), expected);
        assert_eq!(parse("1:2;3:4", 2).unwrap(), expected);
    }

    #[test]
    fn test_parse_dim2_overflow() {
        assert!(matches!(
            parse(" 1,2:3;4 ", 2),
            Err(DataError::TooManyDimensions { .. })
        ));
    }

    #[test]
    fn test_parse_dim3_full() {
        let expected = Cells::Seq(vec![
            rows(&[&[1, 2, 3], &[4, 5, 6]]),
            rows(&[&[7, 8, 9], &[10, 11, 12]]),
        ]);
        assert_eq!(parse("1:2:3,4:5:6;7:8:9,10:11:12", 3).unwrap(), expected);
    }

    #[test]
    fn test_parse_dim3_degenerate() {
        assert_eq!(parse("1", 3).unwrap(), Cells::Seq(vec![rows(&[&[1]])]));
        assert_eq!(parse("1:2", 3).unwrap(), Cells::Seq(vec![rows(&[&[1, 2]])]));
        assert_eq!(
            parse("1,2", 3).unwrap(),
            Cells::Seq(vec![rows(&[&[1], &[2]])])
        );
        assert_eq!(
            parse("1;2", 3).unwrap(),
            Cells::Seq(vec![rows(&[&[1]]), rows(&[&[2]])])
        );
        assert_eq!(
            parse("1,2;3,4", 3).unwrap(),
            Cells::Seq(vec![rows(&[&[1], &[2]]), rows(&[&[3], &[4]])])
        );
    }

    #[test]
    fn test_parse_not_numeric() {
        assert!(matches!(parse("abc", 0), Err(DataError::NotNumeric { .. })));
        assert!(matches!(
            parse("1,x,3", 1),
            Err(DataError::NotNumeric { .. })
        ));
        assert!(matches!(parse("nan", 0), Err(DataError::NotNumeric { .. })));
    }

    #[test]
    fn test_emit_scalar() {
        assert_eq!(emit(&Cells::int(4), &[]).unwrap(), "4");
        assert_eq!(emit(&Cells::float(1.5), &[]).unwrap(), "1.5");
    }

    #[test]
    fn test_emit_depth_mismatch() {
        assert!(matches!(
            emit(&Cells::int(4), &[';']),
            Err(DataError::DepthMismatch { .. })
        ));
        assert!(matches!(
            emit(&ints(&[1, 2]), &[]),
            Err(DataError::DepthMismatch { .. })
        ));
    }

    #[test]
    fn test_round_trip_dim1() {
        let value = ints(&[1, 2, 3]);
        for delims in [[';'], [','], [':']] {
            let text = emit(&value, &delims).unwrap();
            assert_eq!(parse(&text, 1).unwrap(), value);
        }
    }

    #[test]
    fn test_round_trip_dim2() {
        let value = rows(&[&[1, 2], &[3, 4]]);
        for delims in [[';', ','], [';', ':'], [',', ':']] {
            let text = emit(&value, &delims).unwrap();
            assert_eq!(parse(&text, 2).unwrap(), value);
        }
    }

    #[test]
    fn test_round_trip_dim3() {
        let value = Cells::Seq(vec![
            rows(&[&[1, 2], &[3, 4]]),
            rows(&[&[5, 6], &[7, 8]]),
        ]);
        let delims = [';', ',', ':'];
        let text = emit(&value, &delims).unwrap();
        assert_eq!(text, "1:2,3:4;5:6,7:8");
        assert_eq!(parse(&text, 3).unwrap(), value);
    }

    #[test]
    fn test_round_trip_floats() {
        let value = Cells::Seq(vec![Cells::float(1.0), Cells::float(2.5)]);
        let text = emit(&value, &[',']).unwrap();
        assert_eq!(text, "1.0,2.5");
        assert_eq!(parse(&text, 1).unwrap(), value);
    }

    #[test]
    fn test_depth() {
        assert_eq!(Cells::int(1).depth(), 0);
        assert_eq!(ints(&[1]).depth(), 1);
        assert_eq!(rows(&[&[1]]).depth(), 2);
    }

    #[test]
    fn test_validate_delims() {
        assert!(validate_delims(&[';', ',', ':']).is_ok());
        assert!(validate_delims(&[]).is_ok());
        assert!(matches!(
            validate_delims(&['|']),
            Err(DataError::UnknownDelimiter { delimiter: '|' })
        ));
        assert!(matches!(
            validate_delims(&[';', ';']),
            Err(DataError::DuplicateDelimiter { delimiter: ';' })
        ));
    }
}
