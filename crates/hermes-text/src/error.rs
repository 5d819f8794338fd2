//! Error types for text conversion.

use thiserror::Error;

/// Error returned when an HTML document cannot be converted to text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    /// The renderer could not lay the document out.
    #[error("cannot convert document to text: {message}")]
    Conversion { message: String },
}

impl From<html2text::Error> for TextError {
    fn from(err: html2text::Error) -> Self {
        TextError::Conversion {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TextError::Conversion {
            message: "Output width not wide enough.".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot convert document to text: Output width not wide enough."
        );
    }
}
