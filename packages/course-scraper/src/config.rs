//! Configuration, input validation and URL construction.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use url::Url;

use crate::error::{Result, ScraperError};

/// Base URL for the Kuali catalog API.
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://uvic.kuali.co/api/v1/catalog";

/// Catalog snapshot identifier (the 2021 winter catalog).
pub const DEFAULT_CATALOG_ID: &str = "5f21b66d95f09c001ac436a0";

/// Base URL for the Banner (BAN1P) registration pages.
pub const DEFAULT_BANNER_BASE_URL: &str = "https://www.uvic.ca/BAN1P";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TERM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}(01|05|09)$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CRN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUBJECT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,4}(-[A-Za-z])?$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COURSE_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}[A-Za-z]?$").expect("valid regex"));

/// Endpoints and transport settings for a scraper instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    pub catalog_base_url: String,
    pub catalog_id: String,
    pub banner_base_url: String,
    pub timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            catalog_id: DEFAULT_CATALOG_ID.to_string(),
            banner_base_url: DEFAULT_BANNER_BASE_URL.to_string(),
            timeout_secs: HTTP_TIMEOUT_SECS,
        }
    }
}

impl ScraperConfig {
    /// Build a config from the defaults, overridden by `UVIC_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let catalog_base_url =
            std::env::var("UVIC_CATALOG_BASE_URL").unwrap_or(defaults.catalog_base_url);
        let catalog_id = std::env::var("UVIC_CATALOG_ID").unwrap_or(defaults.catalog_id);
        let banner_base_url =
            std::env::var("UVIC_BANNER_BASE_URL").unwrap_or(defaults.banner_base_url);
        let timeout_secs = std::env::var("UVIC_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        Self {
            catalog_base_url,
            catalog_id,
            banner_base_url,
            timeout_secs,
        }
    }

    pub fn with_catalog_base_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_base_url = url.into();
        self
    }

    pub fn with_catalog_id(mut self, id: impl Into<String>) -> Self {
        self.catalog_id = id.into();
        self
    }

    pub fn with_banner_base_url(mut self, url: impl Into<String>) -> Self {
        self.banner_base_url = url.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// URL of the bulk catalog listing.
    pub fn catalog_courses_url(&self) -> Result<String> {
        catalog_url(&self.catalog_base_url, &["courses", &self.catalog_id])
    }

    /// URL of a single catalog course, by pid.
    pub fn course_detail_url(&self, pid: &str) -> Result<String> {
        catalog_url(&self.catalog_base_url, &["course", &self.catalog_id, pid])
    }

    /// URL of the Banner class schedule listing for one course in one term.
    pub fn class_schedule_listing_url(
        &self,
        term: &str,
        subject: &str,
        code: &str,
    ) -> Result<String> {
        let base = format!(
            "{}/bwckctlg.p_disp_listcrse",
            self.banner_base_url.trim_end_matches('/')
        );
        let url = Url::parse_with_params(
            &base,
            &[
                ("term_in", term),
                ("subj_in", subject),
                ("crse_in", code),
                ("schd_in", ""),
            ],
        )?;
        Ok(url.into())
    }

    /// URL of the Banner detailed class information page for one CRN.
    pub fn detailed_class_information_url(&self, term: &str, crn: &str) -> Result<String> {
        let base = format!(
            "{}/bwckschd.p_disp_detail_sched",
            self.banner_base_url.trim_end_matches('/')
        );
        let url = Url::parse_with_params(&base, &[("term_in", term), ("crn_in", crn)])?;
        Ok(url.into())
    }
}

fn catalog_url(base: &str, segments: &[&str]) -> Result<String> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|()| ScraperError::Config(format!("catalog base URL cannot take a path: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}

/// Validate a term code (`YYYYMM`, session month 01, 05 or 09).
///
/// # Examples
/// ```
/// use uvic_course_scraper::config::validate_term;
///
/// assert!(validate_term("202009").is_ok());
/// assert!(validate_term("202003").is_err());
/// ```
pub fn validate_term(term: &str) -> Result<()> {
    if TERM_PATTERN.is_match(term) {
        Ok(())
    } else {
        Err(ScraperError::InvalidTerm(term.to_string()))
    }
}

/// Validate a course reference number.
pub fn validate_crn(crn: &str) -> Result<()> {
    if CRN_PATTERN.is_match(crn) {
        Ok(())
    } else {
        Err(ScraperError::InvalidCrn(crn.to_string()))
    }
}

/// Validate a subject code such as `CSC`, `ece` or `ED-D`.
pub fn validate_subject(subject: &str) -> Result<()> {
    if SUBJECT_PATTERN.is_match(subject) {
        Ok(())
    } else {
        Err(ScraperError::InvalidSubject(subject.to_string()))
    }
}

/// Validate a course number such as `355` or `499A`.
pub fn validate_course_code(code: &str) -> Result<()> {
    if COURSE_CODE_PATTERN.is_match(code) {
        Ok(())
    } else {
        Err(ScraperError::InvalidCourseCode(code.to_string()))
    }
}

/// Term code in session on the given date.
///
/// Spring runs January to April (`01`), summer May to August (`05`) and
/// fall September to December (`09`).
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use uvic_course_scraper::config::term_for_date;
///
/// let date = NaiveDate::from_ymd_opt(2020, 10, 1).unwrap();
/// assert_eq!(term_for_date(date), "202009");
/// ```
pub fn term_for_date(date: NaiveDate) -> String {
    let session = match date.month() {
        1..=4 => "01",
        5..=8 => "05",
        _ => "09",
    };
    format!("{}{session}", date.year())
}

/// Term code in session today, local time.
pub fn current_term() -> String {
    term_for_date(chrono::Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_term() {
        assert!(validate_term("202009").is_ok());
        assert!(validate_term("202101").is_ok());
        assert!(validate_term("202105").is_ok());
        assert!(validate_term("202102").is_err());
        assert!(validate_term("2020").is_err());
        assert!(validate_term("2020090").is_err());
        assert!(validate_term("").is_err());
    }

    #[test]
    fn test_validate_crn() {
        assert!(validate_crn("10801").is_ok());
        assert!(validate_crn("1080").is_err());
        assert!(validate_crn("108011").is_err());
        assert!(validate_crn("1080a").is_err());
    }

    #[test]
    fn test_validate_subject_and_code() {
        assert!(validate_subject("CSC").is_ok());
        assert!(validate_subject("ece").is_ok());
        assert!(validate_subject("EN").is_ok());
        assert!(validate_subject("ED-D").is_ok());
        assert!(validate_subject("ed-p").is_ok());
        assert!(validate_subject("ED-").is_err());
        assert!(validate_subject("-D").is_err());
        assert!(validate_subject("ED-DD").is_err());
        assert!(validate_subject("C5C").is_err());
        assert!(validate_subject("COMPUTER").is_err());

        assert!(validate_course_code("355").is_ok());
        assert!(validate_course_code("499A").is_ok());
        assert!(validate_course_code("35").is_err());
        assert!(validate_course_code("355AB").is_err());
    }

    #[test]
    fn test_term_for_date_boundaries() {
        assert_eq!(term_for_date(date(2021, 1, 1)), "202101");
        assert_eq!(term_for_date(date(2021, 4, 30)), "202101");
        assert_eq!(term_for_date(date(2021, 5, 1)), "202105");
        assert_eq!(term_for_date(date(2021, 8, 31)), "202105");
        assert_eq!(term_for_date(date(2021, 9, 1)), "202109");
        assert_eq!(term_for_date(date(2021, 12, 31)), "202109");
    }

    #[test]
    fn test_listing_url_with_hyphenated_subject() {
        let url = ScraperConfig::default()
            .class_schedule_listing_url("202009", "ED-D", "101")
            .unwrap();
        assert!(url.contains("subj_in=ED-D&crse_in=101"));
    }

    #[test]
    fn test_catalog_urls() {
        let config = ScraperConfig::default();
        assert_eq!(
            config.catalog_courses_url().unwrap(),
            "https://uvic.kuali.co/api/v1/catalog/courses/5f21b66d95f09c001ac436a0"
        );
        assert_eq!(
            config.course_detail_url("ByS23Pp7E").unwrap(),
            "https://uvic.kuali.co/api/v1/catalog/course/5f21b66d95f09c001ac436a0/ByS23Pp7E"
        );
    }

    #[test]
    fn test_catalog_url_tolerates_trailing_slash() {
        let config = ScraperConfig::default()
            .with_catalog_base_url("http://localhost:1234/api/")
            .with_catalog_id("abc");
        assert_eq!(
            config.catalog_courses_url().unwrap(),
            "http://localhost:1234/api/courses/abc"
        );
    }

    #[test]
    fn test_banner_urls() {
        let config = ScraperConfig::default();
        assert_eq!(
            config
                .class_schedule_listing_url("202009", "CHEM", "101")
                .unwrap(),
            "https://www.uvic.ca/BAN1P/bwckctlg.p_disp_listcrse?term_in=202009&subj_in=CHEM&crse_in=101&schd_in="
        );
        assert_eq!(
            config
                .detailed_class_information_url("202009", "10801")
                .unwrap(),
            "https://www.uvic.ca/BAN1P/bwckschd.p_disp_detail_sched?term_in=202009&crn_in=10801"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ScraperConfig::default().with_catalog_base_url("not a url");
        assert!(matches!(
            config.catalog_courses_url(),
            Err(ScraperError::Url(_))
        ));
    }
}
