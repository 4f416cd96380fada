use std::{error, fmt};

/// Why the dataset could not be loaded. Both variants end the load attempt;
/// there is no retry and no partial dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadError {
    /// The resource could not be read, or the server answered with a
    /// non-success status.
    Network(String),
    /// The body was read but is not the expected document shape.
    Format(String),
}

impl error::Error for LoadError {}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Network(reason) => write!(f, "network error: {reason}"),
            Self::Format(reason) => write!(f, "data format error: {reason}"),
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}
