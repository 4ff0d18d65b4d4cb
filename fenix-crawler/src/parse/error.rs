//! Parser error types.

/// A page's markup no longer matches the extraction contract.
///
/// These are never recovered from: they mean the site changed shape, so
/// continuing would produce misleading partial output. The pipeline aborts
/// the whole run on the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    /// An expected element was not found.
    #[error("expected element not found: {0}")]
    MissingElement(&'static str),

    /// An element matched but lacks a required attribute.
    #[error("element <{element}> is missing attribute {attribute:?}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// A heading did not contain enough `-`-delimited segments.
    #[error("heading {heading:?} has fewer than {expected} '-' segments")]
    MalformedHeading { heading: String, expected: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StructureError::MissingElement("h1 link");
        assert_eq!(err.to_string(), "expected element not found: h1 link");

        let err = StructureError::MissingAttribute {
            element: "a",
            attribute: "href",
        };
        assert_eq!(err.to_string(), "element <a> is missing attribute \"href\"");

        let err = StructureError::MalformedHeading {
            heading: "Centro 101".into(),
            expected: 2,
        };
        assert!(err.to_string().contains("Centro 101"));
    }
}
