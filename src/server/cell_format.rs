//! Cell rendering for the HTML table.
//!
//! Two modes. `Plain` converts every value to text the same way regardless
//! of its column type; this is what the page shows by default. `Typed`
//! dispatches on the column's [`ColumnKind`]:
//!
//! | Kind | Rendering |
//! |------|-----------|
//! | `VARCHAR` | first 3 characters |
//! | `BIGINT` | value × 100 000 |
//! | `DOUBLE` | exponential notation (`1.25e+2`) |
//! | NULL value | empty cell |
//! | anything else | same as `Plain` |

use edc_data::{CellValue, ColumnKind};
use std::fmt;
use std::str::FromStr;

/// Factor applied to `BIGINT` cells in typed mode.
const BIGINT_SCALE: i128 = 100_000;

/// Characters kept from `VARCHAR` cells in typed mode.
const VARCHAR_PREVIEW_CHARS: usize = 3;

/// How the page turns cell values into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellFormat {
    #[default]
    Plain,
    Typed,
}

impl FromStr for CellFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(CellFormat::Plain),
            "typed" => Ok(CellFormat::Typed),
            other => Err(format!(
                "unknown cell format '{}' (expected 'plain' or 'typed')",
                other
            )),
        }
    }
}

impl fmt::Display for CellFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellFormat::Plain => write!(f, "plain"),
            CellFormat::Typed => write!(f, "typed"),
        }
    }
}

/// Render one cell. Output is raw text; HTML escaping is the caller's job.
pub fn format_cell(kind: &ColumnKind, value: &CellValue, mode: CellFormat) -> String {
    match mode {
        CellFormat::Plain => value.to_string(),
        CellFormat::Typed => format_typed(kind, value),
    }
}

fn format_typed(kind: &ColumnKind, value: &CellValue) -> String {
    match (kind, value) {
        (_, CellValue::Null) => String::new(),
        (ColumnKind::Varchar, CellValue::Text(s)) => {
            s.chars().take(VARCHAR_PREVIEW_CHARS).collect()
        }
        (ColumnKind::BigInt, CellValue::Integer(i)) => (i128::from(*i) * BIGINT_SCALE).to_string(),
        (ColumnKind::Double, CellValue::Float(f)) => exponential(*f),
        _ => value.to_string(),
    }
}

/// Exponential notation with an explicit exponent sign: `1.5e+0`, `2e-3`.
fn exponential(f: f64) -> String {
    if !f.is_finite() {
        return CellValue::Float(f).to_string();
    }
    let formatted = format!("{:e}", f);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}
