//! Diagnostic force table.
//!
//! One row per sampled step: the three displacement components the force
//! law saw, followed by the three force components it returned.
//!
//! ```text
//! #            U0              U1              U2              F0              F1              F2
//!  0.0000000e+00, 0.0000000e+00, 8.0000000e-02, 0.0000000e+00, 0.0000000e+00, 5.8800000e-02
//! ```

use std::path::Path;

use forcelink_types::{ForcelinkResult, Real};

/// `[U0, U1, U2, F0, F1, F2]`.
pub type SampleRow = [Real; 6];

const LABELS: [&str; 6] = ["U0", "U1", "U2", "F0", "F1", "F2"];
const WIDTH: usize = 14;

/// Header line (without newline).
pub fn forces_csv_header() -> String {
    let mut header = format!("#{:>WIDTH$}", LABELS[0]);
    for label in &LABELS[1..] {
        header.push_str(&format!(" {:>w$}", label, w = WIDTH + 1));
    }
    header
}

/// Formats one row (without newline).
pub fn format_sample_row(row: &SampleRow) -> String {
    row.iter()
        .map(|&v| format!("{:>WIDTH$}", scientific(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Full table: header plus one newline-terminated line per row.
pub fn forces_csv(rows: &[SampleRow]) -> String {
    let mut csv = forces_csv_header();
    csv.push('\n');
    for row in rows {
        csv.push_str(&format_sample_row(row));
        csv.push('\n');
    }
    csv
}

/// Writes the table to `path`, replacing any existing file.
pub fn write_forces_csv(path: impl AsRef<Path>, rows: &[SampleRow]) -> ForcelinkResult<()> {
    let path = path.as_ref();
    std::fs::write(path, forces_csv(rows))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "force samples written");
    Ok(())
}

/// `d.ddddddde±XX`: seven fractional digits, signed exponent of at least
/// two digits.
fn scientific(v: Real) -> String {
    if !v.is_finite() {
        return v.to_string().to_lowercase();
    }
    let s = format!("{v:.7e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => s,
    }
}
