use super::error::{LoadError, ParseErrorKind};
use crate::core::masses::MassTable;
use std::str::FromStr;

pub(crate) fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

pub(crate) fn parse_int<T: FromStr>(
    value: &str,
    line: usize,
    columns: &str,
) -> Result<T, LoadError> {
    value.parse().map_err(|_| LoadError::Parse {
        line,
        kind: ParseErrorKind::InvalidInt {
            columns: columns.into(),
            value: value.into(),
        },
    })
}

pub(crate) fn parse_float(value: &str, line: usize, columns: &str) -> Result<f64, LoadError> {
    value.parse().map_err(|_| LoadError::Parse {
        line,
        kind: ParseErrorKind::InvalidFloat {
            columns: columns.into(),
            value: value.into(),
        },
    })
}

/// Guesses an element symbol from an atom name or a force-field type.
///
/// Leading digits are skipped (`1HB` → `H`). A two-letter symbol is tried
/// first when `prefer_two_letters` is set and the table knows it (`FE`, `CL`
/// in HETATM records); otherwise the first letter is used. Returns an empty
/// string when the label has no letters.
pub(crate) fn guess_element(label: &str, prefer_two_letters: bool, masses: &MassTable) -> String {
    let letters: String = label
        .trim()
        .chars()
        .skip_while(|c| c.is_ascii_digit())
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_uppercase();

    if letters.is_empty() {
        return String::new();
    }
    if prefer_two_letters && letters.len() >= 2 && masses.is_known(&letters[..2]) {
        return letters[..2].to_string();
    }
    letters[..1].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_and_trim_tolerates_short_lines() {
        assert_eq!(slice_and_trim("ATOM   1", 0, 6), "ATOM");
        assert_eq!(slice_and_trim("ATOM", 2, 10), "OM");
        assert_eq!(slice_and_trim("ATOM", 10, 20), "");
    }

    #[test]
    fn parse_helpers_report_columns() {
        let err = parse_int::<i32>("x1", 7, "23-26").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parse {
                line: 7,
                kind: ParseErrorKind::InvalidInt { .. }
            }
        ));
        assert_eq!(parse_float("1.5", 1, "31-38").unwrap(), 1.5);
    }

    #[test]
    fn guess_element_handles_common_names() {
        let masses = MassTable::new();
        assert_eq!(guess_element("CA", false, &masses), "C");
        assert_eq!(guess_element("1HB", false, &masses), "H");
        assert_eq!(guess_element("FE", true, &masses), "FE");
        assert_eq!(guess_element("C_3", true, &masses), "C");
        assert_eq!(guess_element("OW", true, &masses), "O");
        assert_eq!(guess_element("123", false, &masses), "");
    }
}
