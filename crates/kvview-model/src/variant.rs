#![forbid(unsafe_code)]

//! Cell values returned by [`Model::data`](crate::Model::data).

use std::fmt;

/// A displayable cell value, or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Empty,
    String(String),
}

impl Variant {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::String(s) => Some(s),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}
