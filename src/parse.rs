use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Error;
use crate::size::FileSize;
use crate::unit::Unit;

// Trailing magnitude plus an optional unit token: letters ending in b/B, or a
// bare b/B. Anything before the magnitude is ignored.
static SIZE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(-?\d+(?:\.\d+)?)\s*([a-z]*b)?$").unwrap());

impl FileSize {
    /// Parses strings like `"12"`, `"12.5 MB"`, `"1kib"` or `"-3 GB"` into a
    /// size. A missing unit means bytes; unit tokens are matched
    /// case-insensitively against the decimal table first, so `"kb"` is
    /// decimal kB while `"kib"` is binary KiB.
    pub fn parse(input: &str) -> Result<FileSize, Error> {
        let trimmed = input.trim();
        let captures = SIZE_PATTERN
            .captures(trimmed)
            .ok_or_else(|| Error::Parse(input.to_string()))?;

        let size: f64 = captures[1]
            .parse()
            .map_err(|_| Error::Parse(input.to_string()))?;

        let unit = match captures.get(2) {
            Some(token) => {
                Unit::from_symbol(token.as_str()).ok_or_else(|| Error::Parse(input.to_string()))?
            }
            None => Unit::B,
        };

        Ok(FileSize::from_unit(size, unit))
    }
}

impl FromStr for FileSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileSize::parse(s)
    }
}
