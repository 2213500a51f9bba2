//! Error types for legible.
//!
//! Fatal errors abort the whole extraction call and carry no partial result.
//! Recoverable parse problems are not errors; they accumulate as
//! [`ParseIssue`](crate::dom::ParseIssue) values on the document.

/// Error type for parsing and extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document exceeds the configured element ceiling.
    ///
    /// Raised before any scoring or mutation so the input tree is left
    /// untouched.
    #[error("Aborting parsing document; {found} elements found (limit {limit})")]
    TooManyElements {
        /// Number of elements counted in the document.
        found: usize,
        /// Configured `max_elems_to_parse` ceiling.
        limit: usize,
    },

    /// The document has no `<body>` element after parsing.
    #[error("No body found in document")]
    NoBody,

    /// No candidate subtree survived scoring and cleaning.
    #[error("Could not extract readable content")]
    NoContent,

    /// A caller-supplied serializer failed.
    #[error("Content serialization failed: {0}")]
    Serialization(String),

    /// The external markup normalizer reported a hard failure.
    #[error("Markup normalizer failed: {0}")]
    Normalizer(String),

    /// Spawning or talking to the external normalizer process failed.
    #[error("Normalizer process error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for parsing and extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_strings_carry_the_details() {
        let err = Error::TooManyElements {
            found: 12,
            limit: 10,
        };
        assert_eq!(
            err.to_string(),
            "Aborting parsing document; 12 elements found (limit 10)"
        );
        assert_eq!(Error::NoBody.to_string(), "No body found in document");
        assert_eq!(
            Error::NoContent.to_string(),
            "Could not extract readable content"
        );
        assert_eq!(
            Error::Serialization("boom".to_string()).to_string(),
            "Content serialization failed: boom"
        );
        assert_eq!(
            Error::Normalizer("exited".to_string()).to_string(),
            "Markup normalizer failed: exited"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::from(io);
        assert!(matches!(err, Error::Io(_)));
    }
}
