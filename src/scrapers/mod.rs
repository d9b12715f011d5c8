pub mod beautystore;
pub mod cherrybeauty;
pub mod common;
pub mod cosmetique;
pub mod engine;
pub mod fetch;
pub mod mubawab;
pub mod tayara;
pub mod traits;
pub mod types;

pub use beautystore::BeautyStoreScraper;
pub use cherrybeauty::CherryBeautyScraper;
pub use cosmetique::CosmetiqueScraper;
pub use engine::Paginator;
pub use fetch::{FetchError, Fetcher, HttpFetcher};
pub use mubawab::MubawabScraper;
pub use tayara::TayaraScraper;
pub use traits::SiteScraper;
pub use types::{CategoryContext, PageLimits};

/// Every supported site, in run order
pub fn all_sites() -> Vec<Box<dyn SiteScraper>> {
    vec![
        Box::new(CosmetiqueScraper),
        Box::new(BeautyStoreScraper),
        Box::new(CherryBeautyScraper),
        Box::new(TayaraScraper),
        Box::new(MubawabScraper),
    ]
}

/// Look a site up by its short name
pub fn site_by_name(name: &str) -> Option<Box<dyn SiteScraper>> {
    all_sites()
        .into_iter()
        .find(|site| site.name().eq_ignore_ascii_case(name))
}
