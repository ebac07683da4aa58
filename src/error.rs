use std::{error, fmt, result};

use mailparse::MailParseError;

#[derive(Debug)]
pub enum ErrorKind {
    /// A token in the recipient list is not a syntactically valid address.
    AddressSyntax {
        /// The offending text, up to the next separator.
        fragment: String,
        /// Char offset of the fragment in the list that was parsed.
        position: usize,
    },
    /// A display name could not be written as an encoded word.
    Encoding,
    /// Failed to decode a header value.
    ParseHeader(MailParseError),
    /// Failed to serialize the given data to JSON.
    SerializeJSON,
}

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    pub fn new<S: Into<String>>(kind: ErrorKind, msg: S) -> Self {
        Self {
            message: msg.into(),
            kind,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The offending fragment, if this is an address syntax error.
    pub fn fragment(&self) -> Option<&str> {
        match self.kind() {
            ErrorKind::AddressSyntax { fragment, .. } => Some(fragment),
            _ => None,
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.kind() {
            ErrorKind::ParseHeader(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MailParseError> for Error {
    fn from(mailparse_error: MailParseError) -> Self {
        Error::new(
            ErrorKind::ParseHeader(mailparse_error),
            "Failed to decode header value",
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[macro_export]
macro_rules! failed {
    ($kind:expr, $($arg:tt)*) => {{
        use $crate::error::Error;

        let kind = $kind;
        let message = format!($($arg)*);
        return Err(Error::new( kind, message ));
    }};
}

pub type Result<T> = result::Result<T, Error>;
