use store_traits::StoreError;
use thiserror::Error;

/// Errors reported by the compat layer.
///
/// The taxonomy is deliberately small and its messages are part of the
/// compatibility contract: legacy callers match on the literal strings.
#[derive(Error, Debug)]
pub enum CompatError {
    /// An access-mode check failed. The message is the bare string the
    /// legacy API reports, not a structured permission error.
    #[error("No Access")]
    NoAccess,

    /// The substrate has no operation that could honestly emulate the
    /// request.
    #[error("Not Implemented")]
    NotImplemented,

    /// No entry exists at the path. Shaped like a POSIX `ENOENT` failure:
    /// see [`errno`](CompatError::errno), [`code`](CompatError::code),
    /// [`syscall`](CompatError::syscall) and [`path`](CompatError::path).
    #[error("ENOENT: no such file or directory, {syscall} '{path}'")]
    NotFound {
        syscall: &'static str,
        path: String,
    },

    /// A native store failure, forwarded verbatim.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CompatError {
    /// POSIX errno for not-found errors (`-2`).
    pub fn errno(&self) -> Option<i32> {
        match self {
            CompatError::NotFound { .. } => Some(-2),
            _ => None,
        }
    }

    /// POSIX error code for not-found errors (`"ENOENT"`).
    pub fn code(&self) -> Option<&'static str> {
        match self {
            CompatError::NotFound { .. } => Some("ENOENT"),
            _ => None,
        }
    }

    /// The syscall a not-found error stands in for.
    pub fn syscall(&self) -> Option<&'static str> {
        match self {
            CompatError::NotFound { syscall, .. } => Some(syscall),
            _ => None,
        }
    }

    /// The path a not-found error echoes back.
    pub fn path(&self) -> Option<&str> {
        match self {
            CompatError::NotFound { path, .. } => Some(path),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_access_is_the_bare_legacy_string() {
        assert_eq!(CompatError::NoAccess.to_string(), "No Access");
    }

    #[test]
    fn not_implemented_is_spelled_correctly() {
        assert_eq!(CompatError::NotImplemented.to_string(), "Not Implemented");
    }

    #[test]
    fn not_found_carries_the_enoent_shape() {
        let err = CompatError::NotFound {
            syscall: "stat",
            path: "/missing.txt".to_string(),
        };
        assert_eq!(err.errno(), Some(-2));
        assert_eq!(err.code(), Some("ENOENT"));
        assert_eq!(err.syscall(), Some("stat"));
        assert_eq!(err.path(), Some("/missing.txt"));
        assert_eq!(
            err.to_string(),
            "ENOENT: no such file or directory, stat '/missing.txt'"
        );
    }

    #[test]
    fn other_variants_have_no_enoent_fields() {
        assert_eq!(CompatError::NoAccess.errno(), None);
        assert_eq!(CompatError::NotImplemented.code(), None);
    }

    #[test]
    fn store_errors_forward_their_message() {
        let err = CompatError::from(StoreError::OperationFailed("disk gone".to_string()));
        assert_eq!(err.to_string(), "store operation failed: disk gone");
    }
}
