use thiserror::Error as ThisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    InvalidArgument,
    InvalidState,
    NotReady,
}

#[derive(Debug, ThisError)]
#[error("{kind:?}: {context}")]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: String) -> Self {
        Error { kind, context }
    }

    /// Precondition failure for operations invoked before the catalog is ready
    pub fn not_ready(operation: &str) -> Self {
        Error {
            kind: ErrorKind::NotReady,
            context: format!("{} called before the catalog finished loading", operation),
        }
    }

    pub fn is_not_ready(&self) -> bool {
        self.kind == ErrorKind::NotReady
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: err.to_string(),
        }
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error {
            kind: ErrorKind::InvalidArgument,
            context: format!("Invalid transmission pattern: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_display_names_operation() {
        let err = Error::not_ready("advance_page");
        assert!(err.is_not_ready());
        assert_eq!(
            err.to_string(),
            "NotReady: advance_page called before the catalog finished loading"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert_eq!(err.kind, ErrorKind::Io);
    }
}
