//! Typed boundary errors and the assertion mechanism for programming errors.
//!
//! Structural failures detected while validating a container or building its
//! table of contents are recoverable: a caller processing a batch of files
//! can log one and move to the next. They are collected here as [`IfcError`].
//!
//! Everything past that boundary -- a sort tag that doesn't match the field
//! it came from, a position past the end of its partition, a `visit` that
//! lands on a reserved sort -- is a bug in the caller or a corrupt TOC that
//! already passed validation. Those never become a `Result`; they go through
//! [`assert_ifc`], which panics with enough context to find the call site.

use crate::primitives::FormatVersion;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IfcError {
    #[error("missing or incorrect IFC signature")]
    MissingIfcHeader,

    #[error("unsupported format version {version}")]
    UnsupportedFormatVersion { version: FormatVersion },

    #[error("integrity check failed: expected {}, got {}", hex(.expected), hex(.actual))]
    IntegrityCheckFailed {
        expected: [u8; 32],
        actual: [u8; 32],
    },

    #[error("architecture mismatch for {path:?}: file is {name}")]
    IfcArchMismatch { name: String, path: PathBuf },

    #[error("truncated or unreadable IFC file {path:?}")]
    IfcReadFailure { path: PathBuf },

    #[error("unknown partition name {name:?}")]
    InvalidPartitionName { name: String },

    #[error("unexpected {category} sort {sort}")]
    UnexpectedVisitor { category: &'static str, sort: u8 },
}

fn hex(bytes: &[u8; 32]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Panics with `message()` if `condition` is false.
///
/// This is the single choke point for every programming-error check in the
/// crate (sort mismatches, out-of-range positions, reserved-sort visits).
/// It is a plain function rather than a macro so a future embedder can
/// replace the panic with a captured callback without touching call sites,
/// per the redesign note on the original's process-wide assertion hook.
#[track_caller]
pub fn assert_ifc(condition: bool, message: impl FnOnce() -> String) {
    if !condition {
        panic!("{}", message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assert_ifc_passes_through_on_true() {
        assert_ifc(true, || unreachable!("message should not be built"));
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn assert_ifc_panics_on_false() {
        assert_ifc(false, || "boom".to_string());
    }

    #[test]
    fn error_messages_are_sensible() {
        let err = IfcError::UnsupportedFormatVersion {
            version: FormatVersion::new(0, 99),
        };
        assert_eq!(err.to_string(), "unsupported format version 0.99");
    }
}
