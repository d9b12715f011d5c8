use chrono::{Local, NaiveDate};
use std::time::Duration;

/// Bounds applied to every pagination run
#[derive(Debug, Clone)]
pub struct PageLimits {
    /// Highest page number fetched per category before giving up
    pub max_pages: u32,
    /// Timeout for listing (category) pages
    pub category_timeout: Duration,
    /// Timeout for an item's own detail page
    pub detail_timeout: Duration,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            max_pages: 200,
            category_timeout: Duration::from_secs(20),
            detail_timeout: Duration::from_secs(10),
        }
    }
}

/// What a strategy knows about the category a card came from
#[derive(Debug, Clone)]
pub struct CategoryContext {
    /// Base URL of the category being paginated (no page parameter)
    pub category_url: String,
    /// Calendar date stamped on every record
    pub scrape_date: NaiveDate,
}

impl CategoryContext {
    pub fn new(category_url: impl Into<String>) -> Self {
        Self {
            category_url: category_url.into(),
            scrape_date: Local::now().date_naive(),
        }
    }

    pub fn with_date(category_url: impl Into<String>, scrape_date: NaiveDate) -> Self {
        Self {
            category_url: category_url.into(),
            scrape_date,
        }
    }
}
