//! Class schedule listing page (`bwckctlg.p_disp_listcrse`).
//!
//! Each section is published as a pair of rows in the "Sections Found" table:
//! a title row holding a link to the section's detail page, followed by a
//! details row with labelled fields and a nested meeting-times table.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScraperError};
use crate::html::{
    element_text, has_class, labelled_lines, row_cells, selector, table_rows, Line,
};
use crate::types::{MeetingTime, SectionStub};

/// Caption of the table that identifies a listing page.
const LISTING_CAPTION: &str = "Sections Found";

static CAPTION: LazyLock<Selector> = LazyLock::new(|| selector("caption.captiontext"));

static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));

static MEETING_TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table.datadisplaytable"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CRN_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"crn_in=(\d+)").expect("valid regex"));

/// A document confirmed to be a class schedule listing.
#[derive(Debug, Clone, Copy)]
pub struct ListingPage<'a> {
    table: ElementRef<'a>,
}

impl<'a> ListingPage<'a> {
    /// Find the "Sections Found" table, or fail with [`ScraperError::WrongPageType`].
    pub fn locate(doc: &'a Html) -> Result<Self> {
        doc.select(&CAPTION)
            .filter(|caption| element_text(*caption).eq_ignore_ascii_case(LISTING_CAPTION))
            .find_map(|caption| caption.parent().and_then(ElementRef::wrap))
            .filter(|table| table.value().name() == "table")
            .map(|table| Self { table })
            .ok_or(ScraperError::WrongPageType)
    }

    /// One stub per title row carrying a CRN link, in document order.
    pub fn sections(&self) -> Vec<SectionStub> {
        let mut rows = table_rows(self.table).into_iter().peekable();
        let mut sections = Vec::new();

        while let Some(row) = rows.next() {
            let Some(mut section) = title_row(row) else {
                tracing::debug!(text = %element_text(row), "Skipping non-section row");
                continue;
            };
            if let Some(details) = rows.next_if(|next| details_cell(*next).is_some()) {
                if let Some(cell) = details_cell(details) {
                    fill_details(&mut section, cell);
                }
            }
            sections.push(section);
        }

        sections
    }
}

/// Extract every section listed on a parsed listing page.
pub fn extract_listing(doc: &Html) -> Result<Vec<SectionStub>> {
    Ok(ListingPage::locate(doc)?.sections())
}

/// Parse HTML text and extract the listed sections.
pub fn parse_listing(html: &str) -> Result<Vec<SectionStub>> {
    let doc = Html::parse_document(html);
    extract_listing(&doc)
}

/// Build a stub from a title row: one `th.ddtitle` cell linking to a CRN.
fn title_row(row: ElementRef<'_>) -> Option<SectionStub> {
    let cells = row_cells(row);
    let &[cell] = cells.as_slice() else {
        return None;
    };
    if cell.value().name() != "th" || !has_class(cell, "ddtitle") {
        return None;
    }
    let link = cell.select(&LINK).next()?;
    let crn = link
        .value()
        .attr("href")
        .and_then(|href| CRN_PARAM.captures(href))
        .and_then(|caps| caps.get(1))?
        .as_str()
        .to_string();

    let title = element_text(link);
    let mut section = SectionStub {
        crn,
        ..SectionStub::default()
    };
    match parse_section_title(&title) {
        Some(parts) => {
            section.title = parts.title;
            section.subject = parts.subject;
            section.course_number = parts.course_number;
            section.section_code = parts.section_code;
        }
        None => section.title = title,
    }
    Some(section)
}

fn details_cell(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    match row_cells(row).as_slice() {
        &[cell] if cell.value().name() == "td" && has_class(cell, "dddefault") => Some(cell),
        _ => None,
    }
}

fn fill_details(section: &mut SectionStub, cell: ElementRef<'_>) {
    let mut pending_label: Option<String> = None;

    for line in labelled_lines(cell) {
        match line {
            Line::Label(label) => {
                pending_label = Some(label.trim_end_matches(':').trim().to_string());
            }
            Line::Text(text) => match pending_label.take().as_deref() {
                Some("Associated Term") => section.term = text,
                Some("Registration Dates") => section.registration_dates = text,
                Some("Levels") => {
                    section.levels = text.split(',').map(|l| l.trim().to_string()).collect();
                }
                Some("Attributes") => section.attributes = Some(text),
                _ => fill_trailing_field(section, &text),
            },
        }
    }

    if let Some(table) = cell.select(&MEETING_TABLE).next() {
        section.meeting_times = table_rows(table)
            .into_iter()
            .filter_map(|row| {
                let cells = row_cells(row);
                if cells.iter().any(|c| c.value().name() == "th") {
                    return None;
                }
                let texts: Vec<String> = cells.into_iter().map(element_text).collect();
                parse_meeting_row(&texts)
            })
            .collect();
    }
}

/// Banner prints some fields as `<value> <field name>`, e.g. `1.500 Credits`.
///
/// Only the field name is removed: `Main Campus Campus` is the campus `Main Campus`.
fn fill_trailing_field(section: &mut SectionStub, text: &str) {
    if let Some(campus) = text.strip_suffix(" Campus") {
        section.campus = campus.to_string();
    } else if let Some(kind) = text.strip_suffix(" Schedule Type") {
        section.schedule_type = kind.to_string();
    } else if let Some(method) = text.strip_suffix(" Instructional Method") {
        section.instructional_method = method.to_string();
    } else if let Some(credits) = text.strip_suffix(" Credits") {
        section.credits = credits.to_string();
    }
}

/// Parts of a section title such as `Systems Programming - 10801 - CSC 355 - A01`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTitle {
    pub title: String,
    pub crn: String,
    pub subject: String,
    pub course_number: String,
    pub section_code: String,
}

/// Split a section title into its parts.
///
/// Splits from the right so course titles that contain ` - ` survive intact.
///
/// # Examples
/// ```
/// use uvic_course_scraper::pages::parse_section_title;
///
/// let parts = parse_section_title("Fundamentals of Chemistry - 20143 - CHEM 101 - A01").unwrap();
/// assert_eq!(parts.crn, "20143");
/// assert_eq!(parts.subject, "CHEM");
/// assert_eq!(parts.section_code, "A01");
/// ```
pub fn parse_section_title(text: &str) -> Option<SectionTitle> {
    let mut parts = text.rsplitn(4, " - ");
    let section_code = parts.next()?.trim();
    let course = parts.next()?.trim();
    let crn = parts.next()?.trim();
    let title = parts.next()?.trim();
    let (subject, course_number) = course.split_once(' ')?;

    Some(SectionTitle {
        title: title.to_string(),
        crn: crn.to_string(),
        subject: subject.trim().to_string(),
        course_number: course_number.trim().to_string(),
        section_code: section_code.to_string(),
    })
}

/// Map the seven cells of a meeting-times row to a [`MeetingTime`].
///
/// Columns: type, time, days, where, date range, schedule type, instructors.
pub fn parse_meeting_row(cells: &[String]) -> Option<MeetingTime> {
    let [kind, time, days, location, date_range, schedule_type, instructors] = cells else {
        return None;
    };
    Some(MeetingTime {
        kind: kind.clone(),
        time: time.clone(),
        days: days.clone(),
        location: location.clone(),
        date_range: date_range.clone(),
        schedule_type: schedule_type.clone(),
        instructors: parse_instructors(instructors),
    })
}

/// Split an instructor cell, dropping the `(P)` primary-instructor marker.
fn parse_instructors(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(|name| name.trim().trim_end_matches("(P)").trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
