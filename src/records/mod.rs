pub mod catalog;
pub mod defect;
pub mod selection;

pub use self::catalog::DefectCatalog;
pub use self::defect::Defect;
pub use self::selection::{ActionKind, SelectionEvent};

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A field that could not be coerced while building a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("field '{field}' is not a number: '{value}'")]
    Number { field: &'static str, value: String },

    #[error("unknown action '{0}' (expected Selection or Deselection)")]
    Action(String),
}

/// World-space location as logged by the headset.
///
/// Equality is exact, component-wise float equality. The matching engine
/// relies on it to find the selection a deselection retracts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_raw(x: &str, y: &str, z: &str) -> Result<Self, RecordError> {
        Ok(Self {
            x: parse_number("x", x)?,
            y: parse_number("y", y)?,
            z: parse_number("z", z)?,
        })
    }

    /// Euclidean (L2) distance.
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}]",
            list_float(self.x),
            list_float(self.y),
            list_float(self.z)
        )
    }
}

/// Shortest round-trip float text in list notation: `1.0`, `0.0001`, `1e-05`,
/// `1.5e+16`, `inf`, `nan`.
pub fn list_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    let text = format!("{:?}", v);
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

pub(crate) fn parse_number(field: &'static str, raw: &str) -> Result<f64, RecordError> {
    raw.trim().parse::<f64>().map_err(|_| RecordError::Number {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(1.0, 2.0, 2.0);
        assert_eq!(a.distance(&b), 3.0);
        assert_eq!(b.distance(&a), 3.0);
    }

    #[test]
    fn display_matches_list_notation() {
        let p = Position::new(1.0, -2.5, 0.1);
        assert_eq!(p.to_string(), "[1.0, -2.5, 0.1]");
    }

    #[test]
    fn display_pads_exponents() {
        let p = Position::new(0.00001, 1e16, -0.0);
        assert_eq!(p.to_string(), "[1e-05, 1e+16, -0.0]");
        assert_eq!(list_float(1.5e-7), "1.5e-07");
        assert_eq!(list_float(-2.5e120), "-2.5e+120");
        assert_eq!(list_float(0.0001), "0.0001");
        assert_eq!(list_float(1e15), "1000000000000000.0");
        assert_eq!(list_float(f64::INFINITY), "inf");
        assert_eq!(list_float(f64::NAN), "nan");
    }

    #[test]
    fn from_raw_trims_whitespace() {
        let p = Position::from_raw("1.5", " 2.0", " -3.25 ").unwrap();
        assert_eq!(p, Position::new(1.5, 2.0, -3.25));
    }

    #[test]
    fn from_raw_names_bad_field() {
        let err = Position::from_raw("1.0", "abc", "3.0").unwrap_err();
        assert_eq!(
            err,
            RecordError::Number {
                field: "y",
                value: "abc".to_string()
            }
        );
    }
}
