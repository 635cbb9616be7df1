//! Point-cloud loader.
//!
//! Reads a delimited text table (one point per row, `x,y,z`) into a flat
//! coordinate buffer `[x0, y0, z0, x1, y1, z1, ...]`. Rows whose first
//! character is the comment marker are skipped.
//!
//! Two tokenization policies are available:
//!
//! - [`ParsePolicy::Lenient`] reads each delimited piece like a numeric
//!   input stream: whitespace-separated numbers are taken in order, each
//!   contributing its leading numeric characters, and reading stops at the
//!   first position with no number. Garbage yields nothing instead of an
//!   error.
//! - [`ParsePolicy::Strict`] requires every non-empty piece to be exactly
//!   one number.

use std::io::Read;
use std::path::Path;

use forcelink_types::constants::{DEFAULT_COMMENT, DEFAULT_DELIMITER, DIM};
use forcelink_types::{ForcelinkError, ForcelinkResult, Real};

/// How malformed numeric tokens are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Skip anything that is not a leading number.
    #[default]
    Lenient,
    /// Fail with [`ForcelinkError::InvalidToken`].
    Strict,
}

/// Loader for delimited coordinate files.
#[derive(Debug, Clone)]
pub struct PointCloudLoader {
    /// Expected values per row. Advisory: only [`load_points`](Self::load_points) checks it.
    pub columns: usize,
    /// Column delimiter.
    pub delimiter: char,
    /// Comment marker, matched against the first character of a line.
    pub comment: char,
    /// Tokenization policy.
    pub policy: ParsePolicy,
}

impl Default for PointCloudLoader {
    fn default() -> Self {
        Self {
            columns: DIM,
            delimiter: DEFAULT_DELIMITER,
            comment: DEFAULT_COMMENT,
            policy: ParsePolicy::Lenient,
        }
    }
}

impl PointCloudLoader {
    /// Creates a loader with the default `,` delimiter and `#` comments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tokenization policy.
    pub fn with_policy(mut self, policy: ParsePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets delimiter and comment marker.
    pub fn with_format(mut self, delimiter: char, comment: char) -> Self {
        self.delimiter = delimiter;
        self.comment = comment;
        self
    }

    /// Reads every numeric value of `path` in file order.
    ///
    /// The result length is not checked against `columns`.
    pub fn load(&self, path: impl AsRef<Path>) -> ForcelinkResult<Vec<Real>> {
        let path = path.as_ref();
        let mut file = std::fs::File::open(path).map_err(|_| ForcelinkError::FileNotFound {
            path: path.to_path_buf(),
        })?;
        let mut text = String::new();
        file.read_to_string(&mut text)?;

        let values = self.parse_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            values = values.len(),
            "point cloud loaded"
        );
        Ok(values)
    }

    /// Like [`load`](Self::load), but rejects results whose length is not
    /// a multiple of `columns`.
    pub fn load_points(&self, path: impl AsRef<Path>) -> ForcelinkResult<Vec<Real>> {
        let values = self.load(path)?;
        if self.columns == 0 || values.len() % self.columns != 0 {
            return Err(ForcelinkError::not_multiple_of(
                "PointCloudLoader::load_points",
                self.columns,
                values.len(),
            ));
        }
        Ok(values)
    }

    /// Parses in-memory text with the same rules as [`load`](Self::load).
    pub fn parse_str(&self, text: &str) -> ForcelinkResult<Vec<Real>> {
        let mut values = Vec::new();

        for (index, line) in text.lines().enumerate() {
            if line.starts_with(self.comment) {
                continue;
            }
            for piece in line.split(self.delimiter) {
                match self.policy {
                    ParsePolicy::Lenient => read_numbers(piece, &mut values),
                    ParsePolicy::Strict => {
                        let token = piece.trim();
                        if token.is_empty() {
                            continue;
                        }
                        let value = token.parse::<Real>().map_err(|_| {
                            ForcelinkError::InvalidToken {
                                line: index + 1,
                                token: token.to_string(),
                            }
                        })?;
                        values.push(value);
                    }
                }
            }
        }

        Ok(values)
    }
}

/// Stream-style extraction: numbers are read until the first position
/// that does not start one.
fn read_numbers(piece: &str, out: &mut Vec<Real>) {
    let mut rest = piece;
    loop {
        rest = rest.trim_start();
        let len = numeric_prefix_len(rest);
        if len == 0 {
            return;
        }
        match rest[..len].parse::<Real>() {
            Ok(v) => out.push(v),
            Err(_) => return,
        }
        rest = &rest[len..];
    }
}

/// Length of the longest prefix of `s` that forms a decimal floating-point
/// literal: `[+-]digits[.digits][(e|E)[+-]digits]`. Zero if there is none.
fn numeric_prefix_len(s: &str) -> usize {
    let b = s.as_bytes();
    let mut i = 0;

    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        mantissa_digits += j - frac_start;
        i = j;
    }
    if mantissa_digits == 0 {
        return 0;
    }

    // Exponent only counts if at least one digit follows.
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}
