//! Detailed class information page (`bwckschd.p_disp_detail_sched`).
//!
//! The page describes one section: a seating table with capacity, actual and
//! remaining counts for regular and waitlist seats, followed by a free-form
//! block of enrollment restrictions.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScraperError};
use crate::html::{
    element_text, enclosing, labelled_lines, row_cells, selector, table_rows, Line,
};
use crate::types::{DetailedClassInfo, EnrollmentRestrictions, Level, SeatCount};

/// The seating table is what identifies a detail page.
static SEATING_TABLE: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"table[summary*="seating numbers"]"#));

/// A document confirmed to be a detailed class information page.
#[derive(Debug, Clone, Copy)]
pub struct DetailPage<'a> {
    seating: ElementRef<'a>,
    body: Option<ElementRef<'a>>,
}

impl<'a> DetailPage<'a> {
    /// Find the seating table, or fail with [`ScraperError::WrongPageType`].
    pub fn locate(doc: &'a Html) -> Result<Self> {
        let seating = doc
            .select(&SEATING_TABLE)
            .next()
            .ok_or(ScraperError::WrongPageType)?;
        Ok(Self {
            seating,
            body: enclosing(seating, "td"),
        })
    }

    pub fn extract(&self) -> Result<DetailedClassInfo> {
        Ok(DetailedClassInfo {
            seats: self.seat_row(SeatRow::Seats)?,
            waitlist_seats: self.seat_row(SeatRow::Waitlist)?,
            requirements: self.restrictions(),
        })
    }

    fn seat_row(&self, wanted: SeatRow) -> Result<SeatCount> {
        for row in table_rows(self.seating) {
            let cells: Vec<String> = row_cells(row).into_iter().map(element_text).collect();
            let Some((label, counts)) = cells.split_first() else {
                continue;
            };
            if SeatRow::from_label(label) == Some(wanted) {
                return parse_seat_row(wanted.label(), counts);
            }
        }
        Err(ScraperError::MissingElement {
            element: format!("{} row", wanted.label()),
            context: "seating table".to_string(),
        })
    }

    fn restrictions(&self) -> EnrollmentRestrictions {
        let Some(body) = self.body else {
            return EnrollmentRestrictions::default();
        };
        let lines = labelled_lines(body);
        let block: Vec<&str> = lines
            .iter()
            .skip_while(|line| !matches!(line, Line::Label(l) if l.starts_with("Restrictions")))
            .skip(1)
            .map_while(|line| match line {
                Line::Text(text) => Some(text.as_str()),
                Line::Label(_) => None,
            })
            .collect();
        parse_restriction_lines(&block)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeatRow {
    Seats,
    Waitlist,
}

impl SeatRow {
    fn from_label(label: &str) -> Option<Self> {
        let key: String = label
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "seats" => Some(Self::Seats),
            "waitlistseats" => Some(Self::Waitlist),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Seats => "Seats",
            Self::Waitlist => "Waitlist Seats",
        }
    }
}

/// Extract seats, waitlist seats and restrictions from a parsed detail page.
pub fn extract_detail(doc: &Html) -> Result<DetailedClassInfo> {
    DetailPage::locate(doc)?.extract()
}

/// Parse HTML text and extract the detailed class information.
pub fn parse_detail(html: &str) -> Result<DetailedClassInfo> {
    let doc = Html::parse_document(html);
    extract_detail(&doc)
}

/// Turn the three count cells of a seating row into a [`SeatCount`].
///
/// # Examples
/// ```
/// use uvic_course_scraper::pages::parse_seat_row;
///
/// let cells = ["32".to_string(), " 17 ".to_string(), "15".to_string()];
/// let seats = parse_seat_row("Seats", &cells).unwrap();
/// assert_eq!((seats.capacity, seats.actual, seats.remaining), (32, 17, 15));
/// ```
pub fn parse_seat_row(label: &str, cells: &[String]) -> Result<SeatCount> {
    let [capacity, actual, remaining, ..] = cells else {
        return Err(ScraperError::MissingElement {
            element: "capacity, actual and remaining cells".to_string(),
            context: format!("{label} row"),
        });
    };
    Ok(SeatCount {
        capacity: parse_count(&format!("{label} capacity"), capacity)?,
        actual: parse_count(&format!("{label} actual"), actual)?,
        remaining: parse_count(&format!("{label} remaining"), remaining)?,
    })
}

/// Read an integer out of a scraped cell, ignoring surrounding non-digits.
///
/// A minus sign directly before the first digit is kept; over-enrolled
/// sections show negative remaining counts.
fn parse_count(field: &str, raw: &str) -> Result<i32> {
    let error = || ScraperError::NumericParse {
        field: field.to_string(),
        value: raw.to_string(),
    };
    let start = raw.find(|c: char| c.is_ascii_digit()).ok_or_else(error)?;
    let end = raw.rfind(|c: char| c.is_ascii_digit()).ok_or_else(error)?;
    let start = if raw[..start].ends_with('-') {
        start - 1
    } else {
        start
    };
    raw[start..=end].parse().map_err(|_| error())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RestrictionKind {
    Level,
    FieldOfStudy,
    Ignored,
}

impl RestrictionKind {
    /// Classify a heading such as `Must be enrolled in one of the following Levels:`.
    fn from_heading(heading: &str) -> Self {
        let heading = heading.to_lowercase();
        if heading.starts_with("may not") {
            Self::Ignored
        } else if heading.contains("levels") {
            Self::Level
        } else if heading.contains("fields of study") || heading.contains("majors") {
            Self::FieldOfStudy
        } else {
            Self::Ignored
        }
    }
}

/// Group the lines of a restrictions block into levels and fields of study.
///
/// Lines ending in `:` open a group and the lines after them are its values.
/// A group that appears twice appends to the first. Values under groups other
/// than levels and fields of study, and exclusions ("May not be enrolled"),
/// are skipped.
pub fn parse_restriction_lines(lines: &[&str]) -> EnrollmentRestrictions {
    let mut restrictions = EnrollmentRestrictions::default();
    let mut current: Option<RestrictionKind> = None;

    for line in lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
        if line.ends_with(':') {
            current = Some(RestrictionKind::from_heading(line));
            continue;
        }
        match current {
            Some(RestrictionKind::Level) => restrictions.level.push(Level::from_label(line)),
            Some(RestrictionKind::FieldOfStudy) => restrictions
                .field_of_study
                .get_or_insert_with(Vec::new)
                .push(line.to_string()),
            Some(RestrictionKind::Ignored) | None => {}
        }
    }

    if restrictions.level.is_empty() && restrictions.field_of_study.is_some() {
        tracing::debug!(
            fields = restrictions.field_of_study.as_ref().map_or(0, Vec::len),
            "Restrictions block has fields of study but no levels"
        );
    }

    restrictions
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn detail_html(seats: &str, waitlist: &str, restrictions: &str) -> String {
        format!(
            r#"<html><body>
            <table class="datadisplaytable" summary="This table is used to present the detailed class information.">
            <tr><th class="ddlabel" scope="row">Some Course - 10000 - ABC 100 - A01</th></tr>
            <tr><td class="dddefault">
            <table class="datadisplaytable" summary="This layout table is used to present the seating numbers." width="100%">
            <caption class="captiontext">Registration Availability</caption>
            <tr><td class="dddead">&nbsp;</td><th class="ddheader" scope="col">Capacity</th><th class="ddheader" scope="col">Actual</th><th class="ddheader" scope="col">Remaining</th></tr>
            {seats}
            {waitlist}
            </table>
            <br>
            {restrictions}
            </td></tr>
            </table>
            </body></html>"#
        )
    }

    fn row(label: &str, a: &str, b: &str, c: &str) -> String {
        format!(
            r#"<tr><th class="ddlabel" scope="row"><span class="fieldlabeltext">{label}</span></th><td class="dddefault">{a}</td><td class="dddefault">{b}</td><td class="dddefault">{c}</td></tr>"#
        )
    }

    #[test]
    fn test_parse_seat_row() {
        let seats = parse_seat_row("Seats", &cells(&["50", "50", "0"])).unwrap();
        assert_eq!(
            seats,
            SeatCount {
                capacity: 50,
                actual: 50,
                remaining: 0
            }
        );
    }

    #[test]
    fn test_parse_seat_row_tolerates_noise() {
        let seats = parse_seat_row("Seats", &cells(&[" 130\u{a0}", "(107)", "23*"])).unwrap();
        assert_eq!((seats.capacity, seats.actual, seats.remaining), (130, 107, 23));
    }

    #[test]
    fn test_parse_seat_row_keeps_negative_remaining() {
        let seats = parse_seat_row("Seats", &cells(&["30", "32", "-2"])).unwrap();
        assert_eq!(seats.remaining, -2);
    }

    #[test]
    fn test_parse_seat_row_rejects_non_numeric() {
        let err = parse_seat_row("Waitlist Seats", &cells(&["10", "n/a", "10"])).unwrap_err();
        match err {
            ScraperError::NumericParse { field, value } => {
                assert_eq!(field, "Waitlist Seats actual");
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_seat_row_rejects_empty_cell() {
        let err = parse_seat_row("Seats", &cells(&["10", "", "10"])).unwrap_err();
        assert!(matches!(err, ScraperError::NumericParse { .. }));
    }

    #[test]
    fn test_parse_seat_row_too_few_cells() {
        let err = parse_seat_row("Seats", &cells(&["10", "0"])).unwrap_err();
        assert!(matches!(err, ScraperError::MissingElement { .. }));
    }

    #[test]
    fn test_parse_restriction_lines_levels_only() {
        let restrictions = parse_restriction_lines(&[
            "Must be enrolled in one of the following Levels:",
            "Undergraduate (UG)",
        ]);
        assert_eq!(restrictions.level, vec![Level::Undergraduate]);
        assert_eq!(restrictions.field_of_study, None);
    }

    #[test]
    fn test_parse_restriction_lines_with_fields_of_study() {
        let restrictions = parse_restriction_lines(&[
            "Must be enrolled in one of the following Fields of study (Major, Minor, or Concentration):",
            "EN: Computer Engineering",
            "EN: Software Engineering BSENG",
            "Must be enrolled in one of the following Levels:",
            "Undergraduate (UG)",
        ]);
        assert_eq!(restrictions.level, vec![Level::Undergraduate]);
        assert_eq!(
            restrictions.field_of_study,
            Some(vec![
                "EN: Computer Engineering".to_string(),
                "EN: Software Engineering BSENG".to_string(),
            ])
        );
    }

    #[test]
    fn test_parse_restriction_lines_repeated_heading_appends() {
        let restrictions = parse_restriction_lines(&[
            "Must be enrolled in one of the following Levels:",
            "Graduate (GR)",
            "Must be enrolled in one of the following Programs:",
            "BSC Computer Science",
            "Must be enrolled in one of the following Levels:",
            "Law (LAW)",
        ]);
        assert_eq!(restrictions.level, vec![Level::Graduate, Level::Law]);
        assert_eq!(restrictions.field_of_study, None);
    }

    #[test]
    fn test_parse_restriction_lines_skips_exclusions() {
        let restrictions = parse_restriction_lines(&[
            "Must be enrolled in one of the following Levels:",
            "Undergraduate (UG)",
            "May not be enrolled in one of the following Fields of study (Major, Minor, or Concentration):",
            "SC: Biology",
        ]);
        assert_eq!(restrictions.field_of_study, None);
    }

    #[test]
    fn test_parse_restriction_lines_fields_without_levels() {
        let restrictions = parse_restriction_lines(&[
            "Must be enrolled in one of the following Fields of study (Major, Minor,  or Concentration):",
            "EN: Computer Engineering",
        ]);

        assert!(restrictions.level.is_empty());
        assert_eq!(
            restrictions.field_of_study,
            Some(vec!["EN: Computer Engineering".to_string()])
        );
    }

    #[test]
    fn test_parse_restriction_lines_empty_field_heading_stays_absent() {
        let restrictions = parse_restriction_lines(&[
            "Must be enrolled in one of the following Fields of study (Major, Minor, or Concentration):",
        ]);
        assert_eq!(restrictions.field_of_study, None);
    }

    #[test]
    fn test_extract_detail_wrong_page() {
        let err = parse_detail("<html><body><p>nothing here</p></body></html>").unwrap_err();
        assert!(matches!(err, ScraperError::WrongPageType));
        assert_eq!(err.to_string(), "wrong page type for parser");
    }

    #[test]
    fn test_extract_detail_basic() {
        let html = detail_html(
            &row("Seats", "32", "17", "15"),
            &row("Waitlist Seats", "10", "0", "10"),
            r#"<span class="fieldlabeltext">Restrictions:</span><br>
            Must be enrolled in one of the following Levels:     <br>
            &nbsp; &nbsp; &nbsp; Undergraduate (UG)<br>
            <br>
            <span class="fieldlabeltext">Prerequisites:</span><br>
            Undergraduate level CSC 230 Minimum Grade of C<br>"#,
        );
        let info = parse_detail(&html).unwrap();

        assert_eq!(
            info.seats,
            SeatCount {
                capacity: 32,
                actual: 17,
                remaining: 15
            }
        );
        assert_eq!(
            info.waitlist_seats,
            SeatCount {
                capacity: 10,
                actual: 0,
                remaining: 10
            }
        );
        assert_eq!(info.requirements.level, vec![Level::Undergraduate]);
        assert_eq!(info.requirements.field_of_study, None);
    }

    #[test]
    fn test_extract_detail_without_restrictions() {
        let html = detail_html(
            &row("Seats", "20", "5", "15"),
            &row("Waitlist Seats", "0", "0", "0"),
            "",
        );
        let info = parse_detail(&html).unwrap();
        assert_eq!(info.requirements, EnrollmentRestrictions::default());
    }

    #[test]
    fn test_extract_detail_missing_waitlist_row() {
        let html = detail_html(&row("Seats", "20", "5", "15"), "", "");
        let err = parse_detail(&html).unwrap_err();
        assert!(matches!(err, ScraperError::MissingElement { .. }));
    }

    #[test]
    fn test_extract_detail_bad_seat_count() {
        let html = detail_html(
            &row("Seats", "twenty", "5", "15"),
            &row("Waitlist Seats", "0", "0", "0"),
            "",
        );
        let err = parse_detail(&html).unwrap_err();
        assert!(matches!(err, ScraperError::NumericParse { .. }));
    }
}
