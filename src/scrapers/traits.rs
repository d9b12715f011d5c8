use crate::models::{ListingKind, ListingRecord};
use crate::scrapers::types::CategoryContext;
use scraper::{ElementRef, Html};

/// Extraction rules for one site.
///
/// The pagination engine owns the fetch loop; a site only says where the
/// cards are and how to read them. Sites whose cards link to a detail page
/// also return that link and merge the detail page back into the record.
pub trait SiteScraper: Send + Sync {
    /// Short identifier, also used on the command line
    fn name(&self) -> &'static str;

    fn kind(&self) -> ListingKind;

    /// Category base URLs scraped on every run
    fn category_urls(&self) -> &'static [&'static str];

    /// File name of the tabular export
    fn output_file(&self) -> &'static str;

    /// `false` ends pagination: the page has no listings container at all
    fn has_listing_container(&self, _document: &Html) -> bool {
        true
    }

    /// Repeated item elements of one listing page; empty when the page has none
    fn find_cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>>;

    /// Read the list-page fields of one card. Never fails; missing parts are null.
    fn extract(&self, card: ElementRef<'_>, context: &CategoryContext) -> ListingRecord;

    /// Permalink of the item's own page, for sites that need a second request
    fn detail_url(&self, _record: &ListingRecord) -> Option<String> {
        None
    }

    /// Fold detail-page fields into `record`; detail values win when present
    fn merge_detail(&self, _record: &mut ListingRecord, _detail: &Html) {}
}
