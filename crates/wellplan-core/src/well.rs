//! Well coordinates, A1 address formatting, and well iteration.
//!
//! Coordinates are zero-based `(col, row)`. Addresses are written as a
//! bijective base-26 row label followed by the 1-based column number:
//! row 0 is `A`, row 25 is `Z`, row 26 is `AA`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::PlateTemplate;
use crate::error::{PlateError, PlateResult};

static A1_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+)([1-9][0-9]*)$").expect("valid well address regex"));

/// Zero-based position of a well on a plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WellCoords {
    pub col: usize,
    pub row: usize,
}

impl WellCoords {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Format as an A1-style address, e.g. `(col 2, row 2)` → `"C3"`.
    pub fn format_a1(&self) -> String {
        format!("{}{}", row_label(self.row), self.col + 1)
    }

    /// Parse an A1-style address. Only upper-case row labels and a
    /// column number without leading zeros are accepted.
    pub fn parse_a1(address: &str) -> PlateResult<Self> {
        let malformed = || PlateError::MalformedWell(address.to_string());

        let caps = A1_PATTERN.captures(address).ok_or_else(malformed)?;
        let row = parse_row_label(&caps[1]).ok_or_else(malformed)?;
        let col: usize = caps[2].parse().map_err(|_| malformed())?;

        Ok(Self { col: col - 1, row })
    }

    /// Whether these coordinates fall inside the template's grid.
    pub fn within(&self, template: &PlateTemplate) -> bool {
        self.col < template.columns && self.row < template.rows
    }
}

impl fmt::Display for WellCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_a1())
    }
}

impl FromStr for WellCoords {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s)
    }
}

fn row_label(row: usize) -> String {
    let mut n = row + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

fn parse_row_label(label: &str) -> Option<usize> {
    let mut n: usize = 0;
    for b in label.bytes() {
        let digit = usize::from(b - b'A') + 1;
        n = n.checked_mul(26)?.checked_add(digit)?;
    }
    n.checked_sub(1)
}

/// Traversal order for automatic well assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WellOrder {
    /// Down each column first: A1, B1, ..., H1, A2, ...
    #[default]
    ColumnMajor,
    /// Across each row first: A1, A2, ..., A12, B1, ...
    RowMajor,
}

/// Lazy, restartable sequence of every well coordinate on a template.
///
/// The iterator itself knows nothing about occupancy; skipping claimed
/// wells is done by [`crate::Plate::next_empty_well`].
#[derive(Debug, Clone)]
pub struct WellIter {
    rows: usize,
    columns: usize,
    order: WellOrder,
    pos: usize,
}

impl WellIter {
    pub fn new(template: &PlateTemplate, order: WellOrder) -> Self {
        Self {
            rows: template.rows,
            columns: template.columns,
            order,
            pos: 0,
        }
    }

    /// Restart from the first well.
    pub fn reset(&mut self) {
        self.pos = 0;
    }

    fn total(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }
}

impl Iterator for WellIter {
    type Item = WellCoords;

    fn next(&mut self) -> Option<WellCoords> {
        if self.pos >= self.total() {
            return None;
        }
        let coords = match self.order {
            WellOrder::ColumnMajor => WellCoords::new(self.pos / self.rows, self.pos % self.rows),
            WellOrder::RowMajor => WellCoords::new(self.pos % self.columns, self.pos / self.columns),
        };
        self.pos += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total().saturating_sub(self.pos);
        (left, Some(left))
    }
}

impl ExactSizeIterator for WellIter {}
