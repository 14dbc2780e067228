//! Extractors for Banner registration pages.
//!
//! Each extractor first locates the structural marker of its page type and
//! fails with [`crate::ScraperError::WrongPageType`] when it is missing, so
//! field extraction only ever runs on a confirmed page.

mod detail;
mod listing;

pub use detail::{
    extract_detail, parse_detail, parse_restriction_lines, parse_seat_row, DetailPage,
};
pub use listing::{
    extract_listing, parse_listing, parse_meeting_row, parse_section_title, ListingPage,
    SectionTitle,
};
