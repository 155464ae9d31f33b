use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    MissingBoundary,

    NoFieldName,

    InvalidPartFormat,
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use FormError::*;
        match self {
            MissingBoundary => write!(f, "Missing multipart boundary"),
            NoFieldName => write!(f, "No field name in part header"),
            InvalidPartFormat => write!(f, "Invalid part format"),
        }
    }
}

// use default impl
impl std::error::Error for FormError {}
