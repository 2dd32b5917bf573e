//! Tail error types.

use std::path::PathBuf;

/// Errors that end a single tail.
///
/// `NotFound`, `PermissionDenied` and `Open` happen while attaching to the
/// file; `Read` happens afterwards. All of them are fatal for the tail that
/// produced them and for nothing else.
#[derive(thiserror::Error, Debug)]
pub enum TailError {
    /// Log file does not exist (yet).
    #[error("Log file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied opening the log file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Any other failure while opening or seeking.
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// I/O error while reading appended data.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TailError {
    /// Classify an error returned while opening `path`.
    pub(crate) fn from_open(path: PathBuf, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Open { path, source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = TailError::NotFound(PathBuf::from("/tmp/Client.txt"));
        assert_eq!(err.to_string(), "Log file not found: /tmp/Client.txt");
    }

    #[test]
    fn test_permission_denied_display() {
        let err = TailError::PermissionDenied(PathBuf::from("/root/Client.txt"));
        assert_eq!(err.to_string(), "Permission denied: /root/Client.txt");
    }

    #[test]
    fn test_from_open_classifies_kind() {
        let path = PathBuf::from("/tmp/x.txt");
        let err = TailError::from_open(
            path.clone(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, TailError::NotFound(_)));

        let err = TailError::from_open(
            path.clone(),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(err, TailError::PermissionDenied(_)));

        let err = TailError::from_open(path, std::io::Error::other("weird"));
        assert!(matches!(err, TailError::Open { .. }));
        assert!(err.to_string().contains("weird"));
    }

    #[test]
    fn test_read_display() {
        let err = TailError::Read {
            path: PathBuf::from("/tmp/Client.txt"),
            source: std::io::Error::other("disk on fire"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read /tmp/Client.txt: disk on fire"
        );
    }
}
