use std::fmt;

/// Digits after the decimal separator used by default when presenting a value
/// in the unit at the same index, shared by both tables.
pub(crate) const BYTE_PRECISION: [u32; 9] = [0, 0, 1, 2, 2, 3, 3, 4, 4];

/// A byte-multiple unit from either the decimal (kB, MB, ...) or the binary
/// (KiB, MiB, ...) table. `B` sits at index 0 of both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    B,
    KB,
    MB,
    GB,
    TB,
    PB,
    EB,
    ZB,
    YB,
    KiB,
    MiB,
    GiB,
    TiB,
    PiB,
    EiB,
    ZiB,
    YiB,
}

/// The numeric base governing which unit table is active and how large one
/// step between adjacent units is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    /// Step 1000 (kB, MB, ...).
    Decimal,
    /// Step 1024 (KiB, MiB, ...).
    Binary,
}

impl Base {
    pub fn step(self) -> f64 {
        match self {
            Base::Decimal => 1000.0,
            Base::Binary => 1024.0,
        }
    }

    pub fn units(self) -> &'static [Unit; 9] {
        match self {
            Base::Decimal => &Unit::DECIMAL_UNITS,
            Base::Binary => &Unit::BINARY_UNITS,
        }
    }
}

impl Unit {
    pub const DECIMAL_UNITS: [Unit; 9] = [
        Unit::B,
        Unit::KB,
        Unit::MB,
        Unit::GB,
        Unit::TB,
        Unit::PB,
        Unit::EB,
        Unit::ZB,
        Unit::YB,
    ];

    pub const BINARY_UNITS: [Unit; 9] = [
        Unit::B,
        Unit::KiB,
        Unit::MiB,
        Unit::GiB,
        Unit::TiB,
        Unit::PiB,
        Unit::EiB,
        Unit::ZiB,
        Unit::YiB,
    ];

    /// Position within the owning table, 0 (B) through 8 (YB/YiB).
    pub fn index(self) -> usize {
        match self {
            Unit::B => 0,
            Unit::KB | Unit::KiB => 1,
            Unit::MB | Unit::MiB => 2,
            Unit::GB | Unit::GiB => 3,
            Unit::TB | Unit::TiB => 4,
            Unit::PB | Unit::PiB => 5,
            Unit::EB | Unit::EiB => 6,
            Unit::ZB | Unit::ZiB => 7,
            Unit::YB | Unit::YiB => 8,
        }
    }

    pub fn is_binary(self) -> bool {
        matches!(
            self,
            Unit::KiB
                | Unit::MiB
                | Unit::GiB
                | Unit::TiB
                | Unit::PiB
                | Unit::EiB
                | Unit::ZiB
                | Unit::YiB
        )
    }

    /// Table this unit belongs to. The shared `B` counts as decimal.
    pub fn table(self) -> Base {
        if self.is_binary() {
            Base::Binary
        } else {
            Base::Decimal
        }
    }

    /// The unit at the same index in the given table (GB <-> GiB, B <-> B).
    pub fn in_table(self, base: Base) -> Unit {
        base.units()[self.index()]
    }

    /// Bytes per one of this unit: `step ^ index`, with step 1000 for decimal
    /// units and the shared B, 1024 for binary units.
    pub fn multiplier(self) -> f64 {
        self.table().step().powi(self.index() as i32)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::B => "B",
            Unit::KB => "kB",
            Unit::MB => "MB",
            Unit::GB => "GB",
            Unit::TB => "TB",
            Unit::PB => "PB",
            Unit::EB => "EB",
            Unit::ZB => "ZB",
            Unit::YB => "YB",
            Unit::KiB => "KiB",
            Unit::MiB => "MiB",
            Unit::GiB => "GiB",
            Unit::TiB => "TiB",
            Unit::PiB => "PiB",
            Unit::EiB => "EiB",
            Unit::ZiB => "ZiB",
            Unit::YiB => "YiB",
        }
    }

    /// Case-insensitive symbol lookup, trying the decimal table before the
    /// binary one. This makes ambiguous two-letter tokens like `"kb"` resolve
    /// decimal, while `"kib"` still lands on KiB.
    pub fn from_symbol(token: &str) -> Option<Unit> {
        Unit::DECIMAL_UNITS
            .iter()
            .chain(Unit::BINARY_UNITS.iter())
            .copied()
            .find(|u| u.symbol().eq_ignore_ascii_case(token))
    }

    pub(crate) fn default_precision(self) -> u32 {
        BYTE_PRECISION[self.index()]
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_share_the_byte_unit() {
        assert_eq!(Unit::DECIMAL_UNITS[0], Unit::B);
        assert_eq!(Unit::BINARY_UNITS[0], Unit::B);
    }

    #[test]
    fn multipliers_follow_table_steps() {
        assert_eq!(Unit::B.multiplier(), 1.0);
        assert_eq!(Unit::KB.multiplier(), 1000.0);
        assert_eq!(Unit::KiB.multiplier(), 1024.0);
        assert_eq!(Unit::MB.multiplier(), 1_000_000.0);
        assert_eq!(Unit::MiB.multiplier(), 1_048_576.0);
        assert_eq!(Unit::GiB.multiplier(), 1_073_741_824.0);
    }

    #[test]
    fn unit_multiplier_law() {
        for (i, unit) in Unit::DECIMAL_UNITS.iter().enumerate() {
            assert_eq!(unit.multiplier(), 1000f64.powi(i as i32), "{unit}");
        }
        for (i, unit) in Unit::BINARY_UNITS.iter().enumerate() {
            assert_eq!(unit.multiplier(), 1024f64.powi(i as i32), "{unit}");
        }
    }

    #[test]
    fn remapping_keeps_the_index() {
        assert_eq!(Unit::GB.in_table(Base::Binary), Unit::GiB);
        assert_eq!(Unit::GiB.in_table(Base::Decimal), Unit::GB);
        assert_eq!(Unit::B.in_table(Base::Binary), Unit::B);
        assert_eq!(Unit::YB.in_table(Base::Binary), Unit::YiB);
    }

    #[test]
    fn symbol_lookup_is_decimal_first() {
        assert_eq!(Unit::from_symbol("B"), Some(Unit::B));
        assert_eq!(Unit::from_symbol("b"), Some(Unit::B));
        assert_eq!(Unit::from_symbol("KB"), Some(Unit::KB));
        assert_eq!(Unit::from_symbol("kb"), Some(Unit::KB));
        assert_eq!(Unit::from_symbol("KIB"), Some(Unit::KiB));
        assert_eq!(Unit::from_symbol("KiB"), Some(Unit::KiB));
        assert_eq!(Unit::from_symbol("yib"), Some(Unit::YiB));
        assert_eq!(Unit::from_symbol("XB"), None);
        assert_eq!(Unit::from_symbol(""), None);
    }
}
