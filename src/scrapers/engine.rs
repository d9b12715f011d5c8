use crate::models::{CategoryRun, ListingRecord, SiteResult, StopReason};
use crate::scrapers::fetch::{fetch_page, Fetcher};
use crate::scrapers::traits::SiteScraper;
use crate::scrapers::types::{CategoryContext, PageLimits};
use scraper::Html;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::{debug, info, warn};

/// URL of page `page` of a category; page 1 is the base URL itself
pub fn page_url(base: &str, page: u32) -> String {
    if page <= 1 {
        base.to_string()
    } else if base.contains('?') {
        format!("{}&page={}", base, page)
    } else {
        format!("{}?page={}", base, page)
    }
}

/// Result of reading one listing page, with the parsed document already dropped
enum PageScan {
    NoContainer,
    NoCards,
    Cards {
        signature: u64,
        items: Vec<(ListingRecord, Option<String>)>,
    },
}

fn scan_page(site: &dyn SiteScraper, body: &str, context: &CategoryContext) -> PageScan {
    let document = Html::parse_document(body);

    if !site.has_listing_container(&document) {
        return PageScan::NoContainer;
    }

    let cards = site.find_cards(&document);
    if cards.is_empty() {
        return PageScan::NoCards;
    }

    let mut hasher = DefaultHasher::new();
    let items = cards
        .into_iter()
        .map(|card| {
            card.html().hash(&mut hasher);
            let record = site.extract(card, context);
            let detail = site.detail_url(&record);
            (record, detail)
        })
        .collect();

    PageScan::Cards {
        signature: hasher.finish(),
        items,
    }
}

/// Drives fetch → find cards → extract → append across the pages of each category.
///
/// Strictly sequential: one request in flight at a time, records appended in
/// page order, each record fully assembled (including its detail page) before
/// the next card is touched.
pub struct Paginator<'f, F: Fetcher + ?Sized> {
    fetcher: &'f F,
    limits: PageLimits,
}

impl<'f, F: Fetcher + ?Sized> Paginator<'f, F> {
    pub fn new(fetcher: &'f F, limits: PageLimits) -> Self {
        Self { fetcher, limits }
    }

    /// Scrape every configured category of `site`
    pub async fn run(&self, site: &dyn SiteScraper) -> SiteResult {
        self.run_urls(site, site.category_urls()).await
    }

    /// Scrape the given categories of `site`, in order
    pub async fn run_urls(&self, site: &dyn SiteScraper, urls: &[&str]) -> SiteResult {
        info!(
            "=== {} scrape start ({:?}, {} categories) ===",
            site.name(),
            site.kind(),
            urls.len()
        );

        let mut result = SiteResult::new(site.name());
        for url in urls {
            let run = self.scrape_category(site, url, &mut result.records).await;
            result.categories.push(run);
        }

        info!(
            "=== {} scrape end: {} records ===",
            site.name(),
            result.records.len()
        );
        result
    }

    /// Paginate one category until it signals the end, appending to `records`
    pub async fn scrape_category(
        &self,
        site: &dyn SiteScraper,
        url: &str,
        records: &mut Vec<ListingRecord>,
    ) -> CategoryRun {
        info!("Scraping category: {}", url);

        let context = CategoryContext::new(url);
        let first_record = records.len();
        let mut previous_signature = None;
        let mut pages = 0;
        let mut page = 1;

        let stop = loop {
            if page > self.limits.max_pages {
                warn!(
                    "Reached the {} page cap on {}, stopping this category",
                    self.limits.max_pages, url
                );
                break StopReason::PageCap;
            }

            let current = page_url(url, page);
            let Some(body) =
                fetch_page(self.fetcher, &current, self.limits.category_timeout).await
            else {
                break StopReason::FetchFailed;
            };

            let (signature, items) = match scan_page(site, &body, &context) {
                PageScan::NoContainer => {
                    info!("⚠️ No listings container on page {}, end of pagination", page);
                    break StopReason::NoContainer;
                }
                PageScan::NoCards => {
                    info!("⚠️ No listings found on page {}, end of pagination", page);
                    break StopReason::NoCards;
                }
                PageScan::Cards { signature, items } => (signature, items),
            };

            if previous_signature == Some(signature) {
                warn!(
                    "Page {} of {} repeats the previous page, stopping this category",
                    page, url
                );
                break StopReason::RepeatedPage;
            }
            previous_signature = Some(signature);

            info!("  → Page {}: {} listings found", page, items.len());

            for (mut record, detail_url) in items {
                if let Some(detail_url) = detail_url {
                    self.enrich(site, &mut record, &detail_url).await;
                }
                debug!("{:?}", record);
                records.push(record);
            }

            pages += 1;
            page += 1;
        };

        let run = CategoryRun {
            url: url.to_string(),
            pages,
            records: records.len() - first_record,
            stop,
        };
        info!(
            "Category {} done: {} pages, {} records ({:?})",
            run.url, run.pages, run.records, run.stop
        );
        run
    }

    async fn enrich(&self, site: &dyn SiteScraper, record: &mut ListingRecord, url: &str) {
        if let Some(body) = fetch_page(self.fetcher, url, self.limits.detail_timeout).await {
            let detail = Html::parse_document(&body);
            site.merge_detail(record, &detail);
        }
    }
}
