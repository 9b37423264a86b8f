//! Quantization type table
//!
//! Maps the short names accepted on the command line (`q4_0`, `q4_j_b32`,
//! ...) to the engine's `model_ftype` identifiers. Tokens resolve by exact
//! name first and by decimal identifier second.

use std::fmt;

use ne_engine_sys as sys;

/// Quantization encodings understood by the engine.
///
/// Discriminants are the engine's `model_ftype` values.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantType {
    /// 4-bit, variant 0
    Q4_0 = sys::MODEL_FTYPE_MOSTLY_Q4_0,
    /// 4-bit, variant 1
    Q4_1 = sys::MODEL_FTYPE_MOSTLY_Q4_1,
    /// 5-bit, variant 0
    Q5_0 = sys::MODEL_FTYPE_MOSTLY_Q5_0,
    /// 5-bit, variant 1
    Q5_1 = sys::MODEL_FTYPE_MOSTLY_Q5_1,
    /// 8-bit, variant 0
    Q8_0 = sys::MODEL_FTYPE_MOSTLY_Q8_0,
    /// 4-bit accelerated, block 32
    Q4JBlasB32 = sys::MODEL_FTYPE_MOSTLY_Q4_JBLAS_B32,
    /// 4-bit accelerated, block 128
    Q4JBlasB128 = sys::MODEL_FTYPE_MOSTLY_Q4_JBLAS_B128,
    /// 4-bit accelerated, block 1024
    Q4JBlasB1024 = sys::MODEL_FTYPE_MOSTLY_Q4_JBLAS_B1024,
    /// 4-bit accelerated with bfloat16 scales, block 32
    Q4JBlasBf16B32 = sys::MODEL_FTYPE_MOSTLY_Q4_JBLAS_BF16_B32,
}

/// Every type, ordered by name so the usage listing is stable.
static FTYPE_TABLE: [QuantType; 9] = [
    QuantType::Q4_0,
    QuantType::Q4_1,
    QuantType::Q4JBlasB1024,
    QuantType::Q4JBlasB128,
    QuantType::Q4JBlasB32,
    QuantType::Q4JBlasBf16B32,
    QuantType::Q5_0,
    QuantType::Q5_1,
    QuantType::Q8_0,
];

impl QuantType {
    /// Canonical short name, as used in the derived output filename.
    pub fn name(self) -> &'static str {
        match self {
            Self::Q4_0 => "q4_0",
            Self::Q4_1 => "q4_1",
            Self::Q5_0 => "q5_0",
            Self::Q5_1 => "q5_1",
            Self::Q8_0 => "q8_0",
            Self::Q4JBlasB32 => "q4_j_b32",
            Self::Q4JBlasB128 => "q4_j_b128",
            Self::Q4JBlasB1024 => "q4_j_b1024",
            Self::Q4JBlasBf16B32 => "q4_j_bf16_b32",
        }
    }

    /// Engine identifier (`model_ftype`).
    #[inline]
    pub fn id(self) -> i32 {
        self as i32
    }

    /// Look up a type by its engine identifier.
    pub fn from_id(id: i32) -> Option<Self> {
        FTYPE_TABLE.iter().copied().find(|qtype| qtype.id() == id)
    }

    /// Bits per quantized weight, excluding scales.
    pub fn bits(self) -> u32 {
        match self {
            Self::Q5_0 | Self::Q5_1 => 5,
            Self::Q8_0 => 8,
            _ => 4,
        }
    }

    /// Number of weights sharing one scale.
    pub fn block_size(self) -> usize {
        match self {
            Self::Q4JBlasB128 => 128,
            Self::Q4JBlasB1024 => 1024,
            _ => 32,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Q4_0 => "4-bit quantization, variant 0",
            Self::Q4_1 => "4-bit quantization, variant 1",
            Self::Q5_0 => "5-bit quantization, variant 0",
            Self::Q5_1 => "5-bit quantization, variant 1",
            Self::Q8_0 => "8-bit quantization, variant 0",
            Self::Q4JBlasB32 => "4-bit, accelerated, block 32",
            Self::Q4JBlasB128 => "4-bit, accelerated, block 128",
            Self::Q4JBlasB1024 => "4-bit, accelerated, block 1024",
            Self::Q4JBlasBf16B32 => "4-bit, bfloat16-scaled, block 32",
        }
    }
}

impl fmt::Display for QuantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Two-phase lookup over any table: exact name first, then decimal id.
fn lookup<T: Copy>(
    table: &[T],
    name: impl Fn(T) -> &'static str,
    by_id: impl Fn(i32) -> Option<T>,
    token: &str,
) -> Option<T> {
    if let Some(&entry) = table.iter().find(|&&entry| name(entry) == token) {
        return Some(entry);
    }
    by_id(token.parse::<i32>().ok()?)
}

/// Resolve a user-supplied token to a type and its canonical name.
///
/// An exact name match wins; otherwise the token is parsed as a signed
/// decimal integer and matched against engine identifiers. Parse failures
/// are silent and simply yield `None`.
pub fn resolve(token: &str) -> Option<(QuantType, &'static str)> {
    lookup(&FTYPE_TABLE, QuantType::name, QuantType::from_id, token)
        .map(|qtype| (qtype, qtype.name()))
}

/// All table entries as `(name, id)`, in name order.
pub fn enumerate() -> impl Iterator<Item = (&'static str, i32)> {
    FTYPE_TABLE.iter().map(|&qtype| (qtype.name(), qtype.id()))
}

/// One `  type = "<name>" or <id>` line per entry.
pub fn listing() -> String {
    enumerate().map(|(name, id)| format!("  type = \"{name}\" or {id}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_nine_entries() {
        assert_eq!(enumerate().count(), 9);
    }

    #[test]
    fn table_is_sorted_by_name() {
        let names: Vec<_> = enumerate().map(|(name, _)| name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn resolve_by_name() {
        assert_eq!(resolve("q4_0"), Some((QuantType::Q4_0, "q4_0")));
        assert_eq!(resolve("q4_j_bf16_b32"), Some((QuantType::Q4JBlasBf16B32, "q4_j_bf16_b32")));
    }

    #[test]
    fn resolve_by_id() {
        assert_eq!(resolve("3"), Some((QuantType::Q4_1, "q4_1")));
        assert_eq!(resolve("+7"), Some((QuantType::Q8_0, "q8_0")));
        assert_eq!(resolve("8"), Some((QuantType::Q5_0, "q5_0")));
    }

    #[test]
    fn resolve_rejects_unknown() {
        assert_eq!(resolve("nope"), None);
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("Q4_0"), None);
        // F32/F16 are engine ids but not quantization targets
        assert_eq!(resolve("0"), None);
        assert_eq!(resolve("1"), None);
        assert_eq!(resolve("-2"), None);
        assert_eq!(resolve("99999999999"), None);
    }

    #[test]
    fn resolve_is_strict_about_numbers() {
        assert_eq!(resolve(" 2"), None);
        assert_eq!(resolve("2abc"), None);
        assert_eq!(resolve("2.0"), None);
    }

    /// A table where one name is also another entry's decimal id.
    static NUMERIC_NAMES: [(&str, i32); 3] = [("7", 2), ("q", 7), ("9", 9)];

    fn numeric_lookup(token: &str) -> Option<(&'static str, i32)> {
        lookup(
            &NUMERIC_NAMES,
            |(name, _)| name,
            |id| NUMERIC_NAMES.iter().copied().find(|&(_, entry_id)| entry_id == id),
            token,
        )
    }

    #[test]
    fn name_match_beats_numeric_id() {
        // "7" names the entry with id 2, not the entry whose id is 7
        assert_eq!(numeric_lookup("7"), Some(("7", 2)));
        assert_eq!(numeric_lookup("9"), Some(("9", 9)));
        assert_eq!(numeric_lookup("2"), Some(("7", 2)));
        assert_eq!(numeric_lookup("+7"), Some(("q", 7)));
        assert_eq!(numeric_lookup("3"), None);
    }

    #[test]
    fn from_id_round_trips() {
        for (_, id) in enumerate() {
            assert_eq!(QuantType::from_id(id).map(QuantType::id), Some(id));
        }
        assert_eq!(QuantType::from_id(4), None);
    }

    #[test]
    fn block_geometry() {
        assert_eq!(QuantType::Q4JBlasB1024.block_size(), 1024);
        assert_eq!(QuantType::Q4JBlasB128.block_size(), 128);
        assert_eq!(QuantType::Q8_0.bits(), 8);
        assert_eq!(QuantType::Q5_1.bits(), 5);
        assert_eq!(QuantType::Q4JBlasBf16B32.bits(), 4);
    }

    #[test]
    fn listing_format() {
        let listing = listing();
        assert_eq!(listing.lines().count(), 9);
        assert!(listing.starts_with("  type = \"q4_0\" or 2\n"));
        assert!(listing.contains("  type = \"q4_j_b32\" or 10\n"));
    }
}
