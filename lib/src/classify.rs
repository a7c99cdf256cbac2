//! Return-type classification for error-detection codegen.
//!
//! Each wrapped function's raw return value is tested against a failure
//! sentinel, and which test applies is decided entirely by the declared
//! return type. The recognized sets are closed enumerations kept in one
//! place so the classification stays auditable and extensible.

use lazy_static::lazy_static;
use regex::Regex;

/// Pointer-valued typedefs that do not spell their pointer nature with `*`.
const OPAQUE_POINTER_TYPES: &[&str] = &["H5T_conv_t"];

/// Signed status types where any negative value signals failure.
const SIGNED_STATUS_TYPES: &[&str] = &["int", "herr_t", "htri_t", "hid_t", "hssize_t", "ssize_t"];

/// Unsigned types where zero signals failure.
const UNSIGNED_STATUS_TYPES: &[&str] = &["unsigned int", "haddr_t", "hsize_t", "size_t"];

lazy_static! {
    /// Library-convention status typedefs, e.g. `H5D_mpio_actual_io_mode_t`.
    static ref STATUS_TYPEDEF_PATTERN: Regex =
        Regex::new(r"^H5[A-Z]+_[a-zA-Z_]+_t").expect("status typedef pattern is a valid regex");
}

/// How a return value encodes failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnClass {
    /// Null return signals failure.
    Pointer,
    /// Negative return signals failure.
    SignedStatus,
    /// Zero return signals failure.
    UnsignedStatus,
}

impl ReturnClass {
    /// Classify a declared return type, or `None` when it matches no rule.
    ///
    /// Rules are tried in order: pointer-like, signed-status, unsigned.
    pub fn of(return_type: &str) -> Option<Self> {
        if return_type.contains('*') || OPAQUE_POINTER_TYPES.contains(&return_type) {
            Some(Self::Pointer)
        } else if SIGNED_STATUS_TYPES.contains(&return_type)
            || STATUS_TYPEDEF_PATTERN.is_match(return_type)
        {
            Some(Self::SignedStatus)
        } else if UNSIGNED_STATUS_TYPES.contains(&return_type) {
            Some(Self::UnsignedStatus)
        } else {
            None
        }
    }

    /// Comparison appended to the raw result to detect failure.
    pub fn failure_condition(self) -> &'static str {
        match self {
            Self::Pointer => "==NULL",
            Self::SignedStatus => "<0",
            Self::UnsignedStatus => "==0",
        }
    }

    /// Value handed back to the caller once a failure is confirmed.
    pub fn sentinel(self) -> &'static str {
        match self {
            Self::Pointer => "NULL",
            Self::SignedStatus => "-1",
            Self::UnsignedStatus => "0",
        }
    }
}
