//! Fixed-width scalar newtypes shared by every layer of the reader.
//!
//! These mirror the raw integer fields that appear verbatim in the IFC byte
//! stream: offsets, counts, sizes and source positions. Keeping them as
//! distinct types (instead of passing `u32` around) is what lets the
//! container and reader code read like the file format itself.

use serde::Serialize;

/// Offset, in bytes, from the start of the file's byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ByteOffset(pub u32);

impl ByteOffset {
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::Add<u32> for ByteOffset {
    type Output = ByteOffset;
    fn add(self, rhs: u32) -> ByteOffset {
        ByteOffset(self.0 + rhs)
    }
}

impl From<u32> for ByteOffset {
    fn from(value: u32) -> Self {
        ByteOffset(value)
    }
}

/// A count of elements, e.g. the length of a partition or a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Cardinality(pub u32);

impl Cardinality {
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Size, in bytes, of a single entry within a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EntitySize(pub u32);

impl EntitySize {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl std::ops::Mul<Cardinality> for EntitySize {
    type Output = u64;
    fn mul(self, rhs: Cardinality) -> u64 {
        u64::from(self.0) * u64::from(rhs.0)
    }
}

/// Offset into the file's global string table. Zero means "absent".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
pub struct TextOffset(pub u32);

impl TextOffset {
    pub const NULL: TextOffset = TextOffset(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// 1-based source line number; line 0 is not a valid source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LineNumber(pub i32);

/// Column number within a source line. `-1` denotes "not tracked".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ColumnNumber(pub i32);

impl ColumnNumber {
    pub const INVALID: ColumnNumber = ColumnNumber(-1);

    pub fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

/// A single component of a [`FormatVersion`]; orderable, 8 bits wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Version(pub u8);

/// `(major, minor)` version pair of the file format. Ordered lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FormatVersion {
    pub major: Version,
    pub minor: Version,
}

impl FormatVersion {
    pub fn new(major: u8, minor: u8) -> Self {
        FormatVersion {
            major: Version(major),
            minor: Version(minor),
        }
    }
}

impl std::fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major.0, self.minor.0)
    }
}

/// Number of bits needed to represent `value`, i.e. `ceil(log2(value + 1))`.
///
/// `bit_length(0) == 0`. Used to size the sort tag embedded in abstract
/// references: a sort with `Count == n` variants needs `bit_length(n - 1)`
/// tag bits.
pub const fn bit_length(value: u32) -> u32 {
    32 - value.leading_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_length_matches_log2_ceil() {
        assert_eq!(bit_length(0), 0);
        assert_eq!(bit_length(1), 1);
        assert_eq!(bit_length(2), 2);
        assert_eq!(bit_length(3), 2);
        assert_eq!(bit_length(4), 3);
        assert_eq!(bit_length(255), 8);
        assert_eq!(bit_length(256), 9);
    }

    #[test]
    fn column_number_invalid_sentinel() {
        assert!(!ColumnNumber::INVALID.is_valid());
        assert!(ColumnNumber(0).is_valid());
    }

    #[test]
    fn format_version_orders_lexicographically() {
        assert!(FormatVersion::new(0, 41) < FormatVersion::new(0, 42));
        assert!(FormatVersion::new(0, 42) < FormatVersion::new(1, 0));
    }
}
