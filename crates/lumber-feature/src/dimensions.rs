//! Nominal size resolution.

use lumber_types::{actual_inches, Length};

use crate::error::LumberError;

/// Resolve a nominal size code such as `"2x4"` into actual `(width, height)`.
///
/// The first token is the depth code and gives the height; the second gives
/// the width. Works on the raw string so sizes that did not come from the
/// enumeration are still checked.
pub fn resolve_actual(size: &str) -> Result<(Length, Length), LumberError> {
    let tokens: Vec<&str> = size.split('x').collect();
    let &[depth, width] = tokens.as_slice() else {
        return Err(LumberError::MalformedSize {
            size: size.to_string(),
        });
    };
    let lookup = |code: &str| {
        actual_inches(code).ok_or_else(|| LumberError::UnknownNominal {
            size: size.to_string(),
            code: code.to_string(),
        })
    };
    let width = Length::from_inches(lookup(width)?)?;
    let height = Length::from_inches(lookup(depth)?)?;
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumber_types::NominalSize;

    #[test]
    fn two_by_four() {
        let (w, h) = resolve_actual("2x4").unwrap();
        assert!((w.as_inches() - 3.5).abs() < 1e-9);
        assert!((h.as_mm() - 38.1).abs() < 1e-9);
    }

    #[test]
    fn every_nominal_size_resolves() {
        for size in NominalSize::ALL {
            let (w, h) = resolve_actual(size.code()).unwrap();
            assert!((w.as_inches() - size.actual_width_inches()).abs() < 1e-9, "{size}");
            assert!((h.as_inches() - size.actual_height_inches()).abs() < 1e-9, "{size}");
        }
    }

    #[test]
    fn wrong_token_count_is_malformed() {
        for bad in ["2", "2x4x6", "", "x"] {
            match resolve_actual(bad) {
                Err(LumberError::MalformedSize { size }) => assert_eq!(size, bad),
                // "x" splits into two empty tokens
                Err(LumberError::UnknownNominal { code, .. }) if bad == "x" => assert_eq!(code, ""),
                other => panic!("{bad:?}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_code_is_named() {
        match resolve_actual("2x5") {
            Err(LumberError::UnknownNominal { code, size }) => {
                assert_eq!(code, "5");
                assert_eq!(size, "2x5");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
