//! Error types for the scraper.
//!
//! A single `ScraperError` covers input validation, page-structure checks,
//! field parsing and upstream I/O. Extraction code never swallows these; every
//! failure reaches the caller unchanged.

use thiserror::Error;

/// Main error type for the scraper library.
#[derive(Debug, Error)]
pub enum ScraperError {
    /// The document does not carry the structural marker the parser expects.
    ///
    /// The message is relied on by downstream consumers and must stay literal.
    #[error("wrong page type for parser")]
    WrongPageType,

    /// A seat-count cell could not be read as an integer.
    #[error("Could not parse {field} from '{value}'")]
    NumericParse { field: String, value: String },

    /// A required element is missing from an otherwise valid page.
    #[error("Missing required element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// No catalog identifier exists for the subject and course number.
    #[error("No catalog entry for {subject} {code}")]
    LookupMiss { subject: String, code: String },

    /// Invalid term format.
    #[error("Invalid term: '{0}'. Expected YYYYMM with MM one of 01, 05, 09 (e.g., 202009)")]
    InvalidTerm(String),

    /// Invalid CRN format.
    #[error("Invalid CRN: '{0}'. Expected 5 digits (e.g., 10801)")]
    InvalidCrn(String),

    /// Invalid subject code format.
    #[error("Invalid subject code: '{0}'. Expected 2-4 letters, optionally followed by '-' and a letter (e.g., CSC, ED-D)")]
    InvalidSubject(String),

    /// Invalid course number format.
    #[error("Invalid course number: '{0}'. Expected 3 digits with optional letter (e.g., 355, 499A)")]
    InvalidCourseCode(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the JSON shape we expected.
    #[error("JSON decoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL could not be assembled from the configured base.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Bad configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, ScraperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_page_type_message_is_literal() {
        assert_eq!(
            ScraperError::WrongPageType.to_string(),
            "wrong page type for parser"
        );
    }

    #[test]
    fn test_numeric_parse_display() {
        let err = ScraperError::NumericParse {
            field: "Seats capacity".to_string(),
            value: "n/a".to_string(),
        };
        assert_eq!(err.to_string(), "Could not parse Seats capacity from 'n/a'");
    }

    #[test]
    fn test_lookup_miss_display() {
        let err = ScraperError::LookupMiss {
            subject: "CSC".to_string(),
            code: "999".to_string(),
        };
        assert_eq!(err.to_string(), "No catalog entry for CSC 999");
    }

    #[test]
    fn test_invalid_term_display() {
        let err = ScraperError::InvalidTerm("2020".to_string());
        assert!(err.to_string().contains("2020"));
        assert!(err.to_string().contains("YYYYMM"));
    }
}
