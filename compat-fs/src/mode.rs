//! Access-mode bitmask constants.
//!
//! The legacy four-bit permission-check convention: existence-only,
//! executable, writable, readable. Flags combine with `|`; a check passes
//! only when every requested bit is present in the mask the substrate
//! reports.

use std::ops::BitOr;

/// A requested set of access-check bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessMode(i32);

impl AccessMode {
    /// Existence only.
    pub const F_OK: AccessMode = AccessMode(0);
    /// Executable.
    pub const X_OK: AccessMode = AccessMode(1);
    /// Writable.
    pub const W_OK: AccessMode = AccessMode(2);
    /// Readable.
    pub const R_OK: AccessMode = AccessMode(4);

    /// Raw bit value.
    pub const fn bits(self) -> i32 {
        self.0
    }

    /// Whether every requested bit is present in `mask`.
    pub const fn satisfied_by(self, mask: i32) -> bool {
        (mask & self.0) == self.0
    }
}

impl BitOr for AccessMode {
    type Output = AccessMode;

    fn bitor(self, rhs: AccessMode) -> AccessMode {
        AccessMode(self.0 | rhs.0)
    }
}
