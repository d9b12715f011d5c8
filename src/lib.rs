//! Batch scrapers for Tunisian cosmetics catalogs and real-estate classifieds.
//!
//! Each site is a [`scrapers::SiteScraper`]; the shared [`scrapers::Paginator`]
//! walks its category pages, and [`export`] writes one flat file per site.

pub mod export;
pub mod html;
pub mod models;
pub mod normalize;
pub mod runner;
pub mod scrapers;
