//! Core data types for catalog and registration records.
//!
//! Field names serialize in camelCase to match the JSON shape downstream
//! consumers already read.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of the bulk catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCourseEntry {
    /// Subject and course number run together, e.g. `CSC355`.
    #[serde(rename = "__catalogCourseId")]
    pub catalog_course_id: String,

    /// Opaque catalog identifier used for per-course lookups.
    pub pid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Remaining catalog fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A course record as returned by the catalog detail endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCourseDetail {
    #[serde(default)]
    pub pid: Option<String>,

    #[serde(default)]
    pub title: String,

    /// May contain HTML markup.
    #[serde(default)]
    pub description: String,

    /// Hyphen-delimited `lecture-lab-tutorial` hours, e.g. `3-0-1`.
    #[serde(default)]
    pub hours_catalog_text: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lecture, lab and tutorial hours of a course.
///
/// Segments missing from the source are `None`; they are never defaulted to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursDecomposition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lecture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tutorial: Option<String>,
}

/// A catalog course after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,

    pub title: String,

    /// Plain text, markup removed. Entities are left encoded.
    pub description: String,

    #[serde(rename = "hoursCatalogText", skip_serializing_if = "Option::is_none")]
    pub hours: Option<HoursDecomposition>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One scheduled meeting of a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingTime {
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
    pub days: String,
    #[serde(rename = "where")]
    pub location: String,
    pub date_range: String,
    pub schedule_type: String,
    pub instructors: Vec<String>,
}

/// A section as it appears in the class schedule listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStub {
    pub title: String,
    pub crn: String,
    pub subject: String,
    pub course_number: String,
    pub section_code: String,
    /// Associated term as published, e.g. `Fall Session 2020: Sep - Dec`.
    pub term: String,
    pub registration_dates: String,
    pub levels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<String>,
    pub campus: String,
    pub schedule_type: String,
    pub instructional_method: String,
    pub credits: String,
    pub meeting_times: Vec<MeetingTime>,
}

/// Capacity, actual and remaining counts as printed on the page.
///
/// `remaining` is taken verbatim; it is not checked against `capacity - actual`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeatCount {
    pub capacity: i32,
    pub actual: i32,
    pub remaining: i32,
}

/// Student level a section may be restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Level {
    Undergraduate,
    Graduate,
    Law,
    Other(String),
}

impl Level {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Undergraduate => "undergraduate",
            Self::Graduate => "graduate",
            Self::Law => "law",
            Self::Other(s) => s,
        }
    }

    /// Parse a Banner level label such as `Undergraduate (UG)`.
    ///
    /// The trailing code in parentheses is dropped and the name lower-cased.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let name = match label.find('(') {
            Some(idx) => &label[..idx],
            None => label,
        };
        match name.trim().to_lowercase().as_str() {
            "undergraduate" => Self::Undergraduate,
            "graduate" => Self::Graduate,
            "law" => Self::Law,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Level {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<Level> for String {
    fn from(value: Level) -> Self {
        value.as_str().to_string()
    }
}

/// Enrollment restrictions of a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRestrictions {
    pub level: Vec<Level>,
    /// `None` when the page has no field-of-study restriction. Never `Some(vec![])`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<Vec<String>>,
}

/// Seat availability and restrictions of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedClassInfo {
    pub seats: SeatCount,
    pub waitlist_seats: SeatCount,
    pub requirements: EnrollmentRestrictions,
}

/// Extracted data together with where and when it was obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scraped<T> {
    pub data: T,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "URL")]
    pub url: String,
}

impl<T> Scraped<T> {
    /// Wrap `data`, stamping it with the current time.
    pub fn now(data: T, url: impl Into<String>) -> Self {
        Self {
            data,
            timestamp: Utc::now(),
            url: url.into(),
        }
    }
}
