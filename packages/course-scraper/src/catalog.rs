//! Mapping from subject and course number to catalog pid.
//!
//! The catalog API addresses courses by an opaque pid, while people (and the
//! registration pages) use `CSC 355`. [`CatalogIdMapper`] downloads the bulk
//! catalog listing once and answers lookups from memory after that.

use std::collections::HashMap;

use tokio::sync::OnceCell;

use crate::error::{Result, ScraperError};
use crate::http::{fetch_json, DocumentLoader};
use crate::types::CatalogCourseEntry;

/// Lazily populated `subject+number -> pid` cache for one catalog snapshot.
///
/// The first [`resolve`](Self::resolve) fetches the listing. Callers that
/// arrive while that fetch is in flight wait for it instead of starting their
/// own. The cache is never refreshed on its own; call
/// [`invalidate`](Self::invalidate) to force a new fetch.
#[derive(Debug)]
pub struct CatalogIdMapper {
    listing_url: String,
    ids: OnceCell<HashMap<String, String>>,
}

impl CatalogIdMapper {
    /// Create an empty mapper that will load from `listing_url`.
    pub fn new(listing_url: impl Into<String>) -> Self {
        Self {
            listing_url: listing_url.into(),
            ids: OnceCell::new(),
        }
    }

    /// Whether the listing has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.ids.initialized()
    }

    /// Number of cached entries, or `None` before the first load.
    pub fn entry_count(&self) -> Option<usize> {
        self.ids.get().map(HashMap::len)
    }

    /// Drop the cached mapping so the next lookup fetches the listing again.
    pub fn invalidate(&mut self) {
        self.ids.take();
    }

    /// Look up the pid for a subject and course number, e.g. `("csc", "355")`.
    ///
    /// Fails with [`ScraperError::LookupMiss`] when the catalog has no such course.
    pub async fn resolve<L>(&self, loader: &L, subject: &str, code: &str) -> Result<String>
    where
        L: DocumentLoader + ?Sized,
    {
        let ids = self
            .ids
            .get_or_try_init(|| self.load(loader))
            .await?;

        ids.get(&catalog_key(subject, code))
            .cloned()
            .ok_or_else(|| ScraperError::LookupMiss {
                subject: subject.to_uppercase(),
                code: code.to_string(),
            })
    }

    async fn load<L>(&self, loader: &L) -> Result<HashMap<String, String>>
    where
        L: DocumentLoader + ?Sized,
    {
        let entries: Vec<CatalogCourseEntry> = fetch_json(loader, &self.listing_url).await?;
        let ids = build_mapping(&entries);
        tracing::info!(entries = ids.len(), url = %self.listing_url, "Loaded catalog listing");
        Ok(ids)
    }
}

/// Cache key for a subject and course number: both trimmed and upper-cased.
///
/// # Examples
/// ```
/// use uvic_course_scraper::catalog::catalog_key;
///
/// assert_eq!(catalog_key("csc", " 355"), "CSC355");
/// ```
pub fn catalog_key(subject: &str, code: &str) -> String {
    format!("{}{}", subject.trim(), code.trim()).to_uppercase()
}

/// Build the `subject+number -> pid` map from catalog entries.
///
/// Later entries win if a key repeats.
pub fn build_mapping(entries: &[CatalogCourseEntry]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|entry| (entry.catalog_course_id.trim().to_uppercase(), entry.pid.clone()))
        .collect()
}
