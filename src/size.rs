use std::cell::Cell;
use std::fmt;

use crate::error::Error;
use crate::unit::{Base, Unit};

/// A quantity of bytes plus the state describing how to present it: target
/// unit, active base, rounding precision and output separators.
///
/// Values are built with one of the `from_*` constructors (or [`parse`]) and
/// then shaped with fluent calls, each of which consumes the value and returns
/// the updated one:
///
/// ```
/// use filesize::FileSize;
///
/// assert_eq!(FileSize::from_kilobytes(1.0).to_kibibytes().round(3).as_number(), 0.977);
/// assert_eq!(FileSize::from_bytes(1500000000.0).for_humans(), "1.50 GB");
/// ```
///
/// Presentation never changes the stored byte count; only `from_*`
/// constructors do. The type caches a lazily resolved precision internally and
/// is therefore not `Sync`; it is a mutable builder, not a shared value.
///
/// [`parse`]: FileSize::parse
#[derive(Debug, Clone)]
pub struct FileSize {
    bytes: f64,
    unit: Option<Unit>,
    source_unit: Unit,
    base: Base,
    precision: Cell<Option<u32>>,
    decimal_separator: char,
    thousand_separator: Option<char>,
}

macro_rules! from_fns {
    ($($name:ident => $unit:ident),* $(,)?) => {
        $(
            pub fn $name(size: f64) -> Self {
                Self::from_unit(size, Unit::$unit)
            }
        )*
    };
}

macro_rules! to_fns {
    ($($long:ident, $short:ident => $unit:ident),* $(,)?) => {
        $(
            pub fn $long(self) -> Self {
                self.to(Unit::$unit)
            }

            pub fn $short(self) -> Self {
                self.to(Unit::$unit)
            }
        )*
    };
}

impl FileSize {
    /// Builds a size of `size * multiplier(unit)` bytes. Negative and
    /// fractional magnitudes are accepted as-is.
    ///
    /// The active base follows the unit's table; the shared `B` counts as
    /// decimal.
    pub fn from_unit(size: f64, unit: Unit) -> Self {
        FileSize {
            bytes: size * unit.multiplier(),
            unit: None,
            source_unit: unit,
            base: unit.table(),
            precision: Cell::new(None),
            decimal_separator: '.',
            thousand_separator: Some(','),
        }
    }

    from_fns! {
        from_bytes => B,
        from_kilobytes => KB,
        from_megabytes => MB,
        from_gigabytes => GB,
        from_terabytes => TB,
        from_petabytes => PB,
        from_exabytes => EB,
        from_zettabytes => ZB,
        from_yottabytes => YB,
        from_kibibytes => KiB,
        from_mebibytes => MiB,
        from_gibibytes => GiB,
        from_tebibytes => TiB,
        from_pebibytes => PiB,
        from_exbibytes => EiB,
        from_zebibytes => ZiB,
        from_yobibytes => YiB,
    }

    /// Selects the unit the value presents as. Picking a unit from the binary
    /// table switches the base to 2, a decimal unit switches it to 10; the
    /// shared `B` belongs to both tables and leaves the base alone.
    pub fn to(mut self, unit: Unit) -> Self {
        if unit != Unit::B {
            self.base = unit.table();
        }
        self.unit = Some(unit);
        self
    }

    /// Pins the presentation unit to whatever the value currently presents
    /// as, without touching the base.
    pub fn to_same(mut self) -> Self {
        self.unit = Some(self.current_unit());
        self
    }

    to_fns! {
        to_bytes, to_b => B,
        to_kilobytes, to_kb => KB,
        to_megabytes, to_mb => MB,
        to_gigabytes, to_gb => GB,
        to_terabytes, to_tb => TB,
        to_petabytes, to_pb => PB,
        to_exabytes, to_eb => EB,
        to_zettabytes, to_zb => ZB,
        to_yottabytes, to_yb => YB,
        to_kibibytes, to_kib => KiB,
        to_mebibytes, to_mib => MiB,
        to_gibibytes, to_gib => GiB,
        to_tebibytes, to_tib => TiB,
        to_pebibytes, to_pib => PiB,
        to_exbibytes, to_eib => EiB,
        to_zebibytes, to_zib => ZiB,
        to_yobibytes, to_yib => YiB,
    }

    /// Switches to the binary table, re-mapping the presented unit to the
    /// same index (GB becomes GiB). Persists until switched back.
    pub fn in_binary(self) -> Self {
        self.rebase(Base::Binary)
    }

    /// Switches to the decimal table, re-mapping the presented unit to the
    /// same index (GiB becomes GB). Persists until switched back.
    pub fn in_decimal(self) -> Self {
        self.rebase(Base::Decimal)
    }

    /// Numeric form of [`in_binary`]/[`in_decimal`]: 2 selects the binary
    /// table, 10 the decimal one, anything else is an error.
    ///
    /// [`in_binary`]: FileSize::in_binary
    /// [`in_decimal`]: FileSize::in_decimal
    pub fn base(self, base: u32) -> Result<Self, Error> {
        match base {
            2 => Ok(self.rebase(Base::Binary)),
            10 => Ok(self.rebase(Base::Decimal)),
            other => Err(Error::InvalidBase(other)),
        }
    }

    fn rebase(mut self, base: Base) -> Self {
        self.unit = Some(self.current_unit().in_table(base));
        self.base = base;
        self
    }

    /// Sets the rounding precision, or clears it back to the per-unit default
    /// when given `None`.
    pub fn round(self, precision: impl Into<Option<u32>>) -> Self {
        self.precision.set(precision.into());
        self
    }

    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    pub fn with_thousand_separator(mut self, separator: char) -> Self {
        self.thousand_separator = Some(separator);
        self
    }

    pub fn without_thousand_separator(mut self) -> Self {
        self.thousand_separator = None;
        self
    }

    /// The value in the current unit, rounded half away from zero to the
    /// resolved precision.
    pub fn as_number(&self) -> f64 {
        let precision = self.resolved_precision(self.current_unit());
        round_to(self.convert(), precision)
    }

    /// Like [`as_number`], but with a one-shot precision that neither reads
    /// nor updates the value's own rounding state.
    ///
    /// [`as_number`]: FileSize::as_number
    pub fn as_number_with(&self, precision: u32) -> f64 {
        round_to(self.convert(), precision)
    }

    /// The value in the current unit, rounded to a whole number.
    pub fn as_integer(&self) -> i64 {
        self.convert().round() as i64
    }

    /// The value in the current unit with grouped digits and the unit symbol,
    /// e.g. `"1,024 B"` or `"1.50 GB"`.
    pub fn as_string(&self) -> String {
        let unit = self.current_unit();
        let precision = self.resolved_precision(unit);
        format!("{} {}", self.format_value(self.convert(), precision), unit)
    }

    /// Auto-scaled form: walks up the active base's table while the running
    /// value divided by the step is still at least 0.9, then formats like
    /// [`as_string`] at the landing unit.
    ///
    /// ```
    /// use filesize::FileSize;
    ///
    /// assert_eq!(FileSize::from_bytes(1500000000.0).in_binary().for_humans(), "1.40 GiB");
    /// ```
    ///
    /// [`as_string`]: FileSize::as_string
    pub fn for_humans(&self) -> String {
        let step = self.base.step();
        let units = self.base.units();

        let mut value = self.bytes;
        let mut i = 0;
        while value / step >= 0.9 && i < units.len() - 1 {
            value /= step;
            i += 1;
        }

        let precision = self.resolved_precision(units[i]);
        format!("{} {}", self.format_value(value, precision), units[i])
    }

    /// The stored byte count, untouched by any presentation state.
    pub fn bytes(&self) -> f64 {
        self.bytes
    }

    fn current_unit(&self) -> Unit {
        self.unit.unwrap_or(self.source_unit)
    }

    fn convert(&self) -> f64 {
        self.bytes / self.current_unit().multiplier()
    }

    // First default lookup sticks until round() resets it, so a later output
    // call keeps presenting with the same number of digits.
    fn resolved_precision(&self, unit: Unit) -> u32 {
        match self.precision.get() {
            Some(precision) => precision,
            None => {
                let precision = unit.default_precision();
                self.precision.set(Some(precision));
                precision
            }
        }
    }

    fn format_value(&self, value: f64, precision: u32) -> String {
        let rounded = round_to(value, precision);
        let raw = format!("{:.*}", precision as usize, rounded.abs());
        let (int_part, frac_part) = match raw.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (raw.as_str(), None),
        };

        let mut out = String::new();
        if rounded < 0.0 {
            out.push('-');
        }

        let digits = int_part.len();
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                if let Some(separator) = self.thousand_separator {
                    out.push(separator);
                }
            }
            out.push(c);
        }

        if let Some(frac_part) = frac_part {
            out.push(self.decimal_separator);
            out.push_str(frac_part);
        }

        out
    }
}

impl Default for FileSize {
    fn default() -> Self {
        FileSize::from_bytes(0.0)
    }
}

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.for_humans())
    }
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presents_in_the_source_unit_by_default() {
        assert_eq!(FileSize::from_bytes(1000.0).as_integer(), 1000);
        assert_eq!(FileSize::from_kilobytes(1.5).round(1).as_number(), 1.5);
        // kB defaults to 0 digits, so the bare number rounds up.
        assert_eq!(FileSize::from_kilobytes(1.5).as_number(), 2.0);
        assert_eq!(FileSize::from_gigabytes(1.61).round(2).as_number(), 1.61);
    }

    #[test]
    fn constructors_scale_into_bytes() {
        assert_eq!(FileSize::from_kilobytes(1.5).to_bytes().as_integer(), 1500);
        assert_eq!(FileSize::from_kibibytes(1.5).to_bytes().as_integer(), 1536);
        assert_eq!(FileSize::from_mebibytes(1.0).to_bytes().as_integer(), 1_048_576);
        assert_eq!(FileSize::from_megabytes(1.0).to_kilobytes().as_integer(), 1000);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(1.25, 1), 1.3);
        assert_eq!(FileSize::from_bytes(1500.0).to_kb().round(0).as_number(), 2.0);
    }

    #[test]
    fn round_none_restores_the_table_default() {
        let size = FileSize::from_bytes(1536.0).to_kibibytes();
        assert_eq!(size.clone().round(2).as_number(), 1.5);
        assert_eq!(size.round(2).round(None).as_number(), 2.0);
    }

    #[test]
    fn selecting_b_keeps_the_active_base() {
        let humans = FileSize::from_bytes(1500000000.0)
            .in_binary()
            .to_bytes()
            .for_humans();
        assert_eq!(humans, "1.40 GiB");
    }

    #[test]
    fn short_aliases_match_long_selectors() {
        let bytes = 1_610_612_736.0;
        assert_eq!(
            FileSize::from_bytes(bytes).to_gib().as_number(),
            FileSize::from_bytes(bytes).to_gibibytes().as_number(),
        );
        assert_eq!(
            FileSize::from_bytes(bytes).to_gb().as_string(),
            FileSize::from_bytes(bytes).to_gigabytes().as_string(),
        );
    }

    #[test]
    fn rebasing_with_no_selected_unit_uses_the_source_unit() {
        assert_eq!(FileSize::from_kilobytes(1.5).in_binary().as_number_with(2), 1.46);
        assert_eq!(FileSize::from_gibibytes(1.0).in_decimal().round(2).as_number(), 1.07);
    }

    #[test]
    fn base_accepts_only_2_and_10() {
        let size = FileSize::from_bytes(1024.0);
        assert_eq!(size.clone().base(2).unwrap().for_humans(), "1 KiB");
        assert_eq!(size.clone().base(10).unwrap().for_humans(), "1 kB");
        assert_eq!(size.clone().base(3).unwrap_err(), Error::InvalidBase(3));
        assert_eq!(size.base(0).unwrap_err(), Error::InvalidBase(0));
    }

    #[test]
    fn display_matches_for_humans() {
        let size = FileSize::from_bytes(1500000000.0);
        assert_eq!(size.to_string(), size.for_humans());
        assert_eq!(format!("{}", FileSize::from_bytes(1.0)), "1 B");
    }

    #[test]
    fn presentation_leaves_bytes_untouched() {
        let size = FileSize::from_kilobytes(1.5)
            .to_kibibytes()
            .in_decimal()
            .round(4)
            .with_decimal_separator(',')
            .without_thousand_separator();
        assert_eq!(size.bytes(), 1500.0);
    }

    #[test]
    fn grouping_handles_negatives_and_fractions() {
        assert_eq!(FileSize::from_bytes(-1234567.0).as_string(), "-1,234,567 B");
        assert_eq!(
            FileSize::from_bytes(1234567.891).round(2).as_string(),
            "1,234,567.89 B"
        );
        assert_eq!(
            FileSize::from_bytes(-1234.0)
                .with_thousand_separator('.')
                .as_string(),
            "-1.234 B"
        );
    }
}
