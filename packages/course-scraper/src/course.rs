//! Normalization of catalog course records.
//!
//! The catalog API returns descriptions with inline HTML and packs weekly
//! hours into a single `lecture-lab-tutorial` string. Both are cleaned up here
//! before a course leaves the crate.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{CourseDetail, HoursDecomposition, RawCourseDetail};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Normalize a raw catalog course.
///
/// Strips markup from the description and decomposes the hours string.
/// All other fields pass through unchanged.
pub fn normalize(raw: RawCourseDetail) -> CourseDetail {
    CourseDetail {
        pid: raw.pid,
        title: raw.title,
        description: strip_tags(&raw.description),
        hours: raw.hours_catalog_text.as_deref().and_then(parse_hours),
        extra: raw.extra,
    }
}

/// Remove every `<...>` span. Entities such as `&amp;` are left as they are.
///
/// # Examples
/// ```
/// use uvic_course_scraper::course::strip_tags;
///
/// assert_eq!(strip_tags("<p>Intro to <b>Systems</b></p>"), "Intro to Systems");
/// ```
pub fn strip_tags(text: &str) -> String {
    TAG_PATTERN.replace_all(text, "").into_owned()
}

/// Split an hours string like `3-0-1` into lecture, lab and tutorial.
///
/// Returns `None` for an empty string. Segments past the third are dropped
/// and missing segments stay `None`.
///
/// # Examples
/// ```
/// use uvic_course_scraper::course::parse_hours;
///
/// let hours = parse_hours("3-0-1").unwrap();
/// assert_eq!(hours.lecture.as_deref(), Some("3"));
/// assert_eq!(hours.tutorial.as_deref(), Some("1"));
/// assert!(parse_hours("").is_none());
/// ```
pub fn parse_hours(text: &str) -> Option<HoursDecomposition> {
    if text.trim().is_empty() {
        return None;
    }
    let mut segments = text.split('-').map(|s| s.trim().to_string());
    Some(HoursDecomposition {
        lecture: segments.next(),
        lab: segments.next(),
        tutorial: segments.next(),
    })
}
