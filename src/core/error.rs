use std::fmt;

#[derive(Debug)]
pub enum ErrorKind {
    Storage,
    Parse,
    NotFound,
    InvalidArgument,
    Internal,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: String) -> Self {
        Error { kind, context }
    }

    pub fn storage(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::Storage, context.into())
    }

    pub fn not_found(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::NotFound, context.into())
    }

    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidArgument, context.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Storage,
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

pub type Result<T> = std::result::Result<T, Error>;
