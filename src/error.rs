use std::path::PathBuf;
use std::string::FromUtf8Error;
use std::{error, fmt, io, result};

/// A type alias for `Result<T, chemu::Error>`.
///
/// This result type embeds the error type in this crate.
pub type Result<T> = result::Result<T, Error>;

/// An error that can occur when reading or parsing.
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    /// A crate private constructor for `Error`.
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    /// Returns the specific type of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Unwraps this error into its underlying type.
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns `true` if this error only signals that a reader has no more lines.
    pub fn is_end_of_data(&self) -> bool {
        matches!(*self.0, ErrorKind::EndOfData)
    }
}

/// The specific type of an error.
///
/// This list might grow over time and it is not recommended to
/// exhaustively match against it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The file could not be opened for reading.
    #[error("cannot open {}: {}", .path.display(), .source)]
    Open {
        /// The path that was passed in.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },
    /// The reader was already closed.
    #[error("{path} is not readable")]
    NotReadable {
        /// The diagnostic label of the reader.
        path: String,
    },
    /// Represents an I/O error.
    ///
    /// Can occur when seeking, reading or writing the underlying stream.
    #[error(transparent)]
    Io(io::Error),
    /// Every line has been returned.
    ///
    /// This is not a failure of the stream; callers usually treat it as the end of a loop.
    #[error("end of data")]
    EndOfData,
    /// A line is not valid UTF-8.
    #[error("line is not valid UTF-8: {0}")]
    Utf8(#[source] FromUtf8Error),
    /// A token could not be parsed as a number, or a record is incomplete.
    #[error("cannot parse {token:?}: {reason}")]
    Parse {
        /// The offending token or record.
        token: String,
        /// What went wrong.
        reason: String,
    },
    /// The search string of a replacement is empty.
    #[error("the search string is empty")]
    EmptyPattern,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        error::Error::source(&*self.0)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::new(kind)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::new(ErrorKind::Io(err))
    }
}

impl From<FromUtf8Error> for Error {
    fn from(err: FromUtf8Error) -> Error {
        Error::new(ErrorKind::Utf8(err))
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err.into_kind() {
            ErrorKind::Io(err) => err,
            ErrorKind::EndOfData => io::Error::new(io::ErrorKind::UnexpectedEof, "end of data"),
            kind => io::Error::new(io::ErrorKind::Other, Error::new(kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display() {
        let err = Error::new(ErrorKind::NotReadable {
            path: "data.txt".to_string(),
        });
        assert_eq!(err.to_string(), "data.txt is not readable");
        assert_eq!(Error::new(ErrorKind::EndOfData).to_string(), "end of data");
    }

    #[test]
    fn test_open_source() {
        let err = Error::new(ErrorKind::Open {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        });
        assert!(err.to_string().starts_with("cannot open missing.txt"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_into_io_error() {
        let err: io::Error = Error::new(ErrorKind::EndOfData).into();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

        let inner = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: io::Error = Error::from(inner).into();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
