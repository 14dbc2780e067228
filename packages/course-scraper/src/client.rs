//! Course scraper service that ties loading, extraction and provenance together.

use crate::catalog::CatalogIdMapper;
use crate::config::{
    validate_course_code, validate_crn, validate_subject, validate_term, ScraperConfig,
};
use crate::course::normalize;
use crate::error::Result;
use crate::http::{fetch_json, DocumentLoader, HttpLoader};
use crate::pages::{parse_detail, parse_listing};
use crate::types::{
    CatalogCourseEntry, CourseDetail, DetailedClassInfo, RawCourseDetail, Scraped, SectionStub,
};

/// Entry point for catalog and registration lookups.
///
/// Owns the catalog pid cache, so keep one instance around for the life of a
/// run rather than building one per request.
#[derive(Debug)]
pub struct CourseScraper<L = HttpLoader> {
    loader: L,
    config: ScraperConfig,
    catalog: CatalogIdMapper,
}

impl CourseScraper<HttpLoader> {
    /// Create a scraper that talks HTTP to the endpoints in `config`.
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let loader = HttpLoader::new(&config)?;
        Self::with_loader(loader, config)
    }
}

impl<L: DocumentLoader> CourseScraper<L> {
    /// Create a scraper with a custom document loader.
    pub fn with_loader(loader: L, config: ScraperConfig) -> Result<Self> {
        let catalog = CatalogIdMapper::new(config.catalog_courses_url()?);
        Ok(Self {
            loader,
            config,
            catalog,
        })
    }

    pub fn catalog(&self) -> &CatalogIdMapper {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CatalogIdMapper {
        &mut self.catalog
    }

    /// Fetch the full catalog listing.
    pub async fn get_all_courses(&self) -> Result<Scraped<Vec<CatalogCourseEntry>>> {
        let url = self.config.catalog_courses_url()?;
        let courses: Vec<CatalogCourseEntry> = fetch_json(&self.loader, &url).await?;
        tracing::debug!(courses = courses.len(), "Fetched catalog listing");
        Ok(Scraped::now(courses, url))
    }

    /// Fetch a course's catalog details by subject and number, e.g. `("CSC", "355")`.
    pub async fn get_course_details(
        &self,
        subject: &str,
        code: &str,
    ) -> Result<Scraped<CourseDetail>> {
        validate_subject(subject)?;
        validate_course_code(code)?;

        let pid = self.catalog.resolve(&self.loader, subject, code).await?;
        self.get_course_details_by_pid(&pid).await
    }

    /// Fetch a course's catalog details by pid.
    pub async fn get_course_details_by_pid(&self, pid: &str) -> Result<Scraped<CourseDetail>> {
        let url = self.config.course_detail_url(pid)?;
        let raw: RawCourseDetail = fetch_json(&self.loader, &url).await?;
        Ok(Scraped::now(normalize(raw), url))
    }

    /// Fetch all sections of a course offered in a term.
    pub async fn get_course_sections(
        &self,
        term: &str,
        subject: &str,
        code: &str,
    ) -> Result<Scraped<Vec<SectionStub>>> {
        validate_term(term)?;
        validate_subject(subject)?;
        validate_course_code(code)?;

        let url = self
            .config
            .class_schedule_listing_url(term, &subject.to_uppercase(), code)?;
        let body = self.loader.fetch_text(&url).await?;
        let sections = parse_listing(&body)?;
        tracing::debug!(term, subject, code, sections = sections.len(), "Parsed listing");
        Ok(Scraped::now(sections, url))
    }

    /// Fetch seat counts and restrictions of one section.
    pub async fn get_section_seats(
        &self,
        term: &str,
        crn: &str,
    ) -> Result<Scraped<DetailedClassInfo>> {
        validate_term(term)?;
        validate_crn(crn)?;

        let url = self.config.detailed_class_information_url(term, crn)?;
        let body = self.loader.fetch_text(&url).await?;
        let info = parse_detail(&body)?;
        Ok(Scraped::now(info, url))
    }
}
