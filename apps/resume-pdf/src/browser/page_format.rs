//! Named paper formats for PDF export.
//!
//! Dimensions are in inches, matching the named formats Chrome's print pipeline
//! understands. Export is always edge-to-edge, so the full sheet is printable.

use std::fmt;
use std::str::FromStr;

/// A fixed physical page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageFormat {
    /// US letter, 8.5" × 11".
    #[default]
    Letter,
    Legal,
    Tabloid,
    Ledger,
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
}

impl PageFormat {
    /// Returns `(width, height)` in inches, portrait orientation.
    pub fn dimensions_in(&self) -> (f64, f64) {
        match self {
            PageFormat::Letter => (8.5, 11.0),
            PageFormat::Legal => (8.5, 14.0),
            PageFormat::Tabloid => (11.0, 17.0),
            PageFormat::Ledger => (17.0, 11.0),
            PageFormat::A0 => (33.1, 46.8),
            PageFormat::A1 => (23.4, 33.1),
            PageFormat::A2 => (16.54, 23.4),
            PageFormat::A3 => (11.7, 16.54),
            PageFormat::A4 => (8.27, 11.7),
            PageFormat::A5 => (5.83, 8.27),
            PageFormat::A6 => (4.13, 5.83),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            PageFormat::Letter => "letter",
            PageFormat::Legal => "legal",
            PageFormat::Tabloid => "tabloid",
            PageFormat::Ledger => "ledger",
            PageFormat::A0 => "a0",
            PageFormat::A1 => "a1",
            PageFormat::A2 => "a2",
            PageFormat::A3 => "a3",
            PageFormat::A4 => "a4",
            PageFormat::A5 => "a5",
            PageFormat::A6 => "a6",
        }
    }
}

impl fmt::Display for PageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" => Ok(PageFormat::Letter),
            "legal" => Ok(PageFormat::Legal),
            "tabloid" => Ok(PageFormat::Tabloid),
            "ledger" => Ok(PageFormat::Ledger),
            "a0" => Ok(PageFormat::A0),
            "a1" => Ok(PageFormat::A1),
            "a2" => Ok(PageFormat::A2),
            "a3" => Ok(PageFormat::A3),
            "a4" => Ok(PageFormat::A4),
            "a5" => Ok(PageFormat::A5),
            "a6" => Ok(PageFormat::A6),
            other => Err(format!("unknown page format '{other}'")),
        }
    }
}
