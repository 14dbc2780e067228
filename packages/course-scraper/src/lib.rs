//! UVic Course Scraper - course catalog and class section data for the
//! University of Victoria.
//!
//! Course metadata comes from the Kuali catalog API; section listings, seat
//! counts and enrollment restrictions are scraped from the Banner (BAN1P)
//! registration pages.
//!
//! # Example
//!
//! ```
//! use uvic_course_scraper::course::strip_tags;
//! use uvic_course_scraper::config::validate_term;
//!
//! assert!(validate_term("202009").is_ok());
//! assert_eq!(strip_tags("<p>Intro to <b>Systems</b></p>"), "Intro to Systems");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Endpoints, input validation and URL builders
//! - [`types`]: Catalog and section record types
//! - [`error`]: Error types and Result alias
//! - [`http`]: Document loader trait and HTTP implementation
//! - [`catalog`]: Subject+number to catalog pid mapping
//! - [`course`]: Catalog course normalization
//! - [`html`]: HTML table helpers
//! - [`pages`]: Listing and detail page extractors
//! - [`client`]: The [`CourseScraper`] service
//! - [`cli`]: Command-line interface

pub mod catalog;
pub mod cli;
pub mod client;
pub mod config;
pub mod course;
pub mod error;
pub mod html;
pub mod http;
pub mod pages;
pub mod types;

// Re-export main entry points
pub use client::CourseScraper;
pub use pages::{extract_detail, extract_listing};

// Re-export commonly used items
pub use catalog::CatalogIdMapper;
pub use config::ScraperConfig;
pub use error::{Result, ScraperError};
pub use http::{DocumentLoader, HttpLoader};
pub use types::{
    CatalogCourseEntry, CourseDetail, DetailedClassInfo, EnrollmentRestrictions,
    HoursDecomposition, Level, Scraped, SeatCount, SectionStub,
};
