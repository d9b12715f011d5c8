use crate::html::{absolute_url, attr_at, first_of, select_all, select_first, text, text_at, text_spaced};
use crate::models::{ListingKind, ListingRecord};
use crate::normalize::{extract_number, normalize_price, parse_relative_date};
use crate::scrapers::common::transaction_type_from_url;
use crate::scrapers::traits::SiteScraper;
use crate::scrapers::types::CategoryContext;
use scraper::{ElementRef, Html};
use tracing::warn;

const ORIGIN: &str = "https://www.tayara.tn";

const CATEGORY_URLS: &[&str] = &[
    "https://www.tayara.tn/listing/c/immobilier",
    "https://www.tayara.tn/listing/c/immoneuf",
];

const META_SPANS: &str = "div.flex.items-center.space-x-1 span";
const CRITERIA_LABEL: &str = r"span.text-gray-600\/80";
const CRITERIA_VALUE: &str = r"span.text-gray-700\/80";
const DESCRIPTION: &[&str] = &["p.whitespace-pre-line", "p[class*=\"text-sm\"]", "p[dir=\"auto\"]"];

/// tayara.tn classifieds, real-estate categories; every card links to a detail page
pub struct TayaraScraper;

/// Criteria block of a tayara detail page
#[derive(Debug, Default, PartialEq)]
pub struct Criteria {
    pub property_type: Option<String>,
    pub transaction_type: Option<String>,
    pub surface: Option<i64>,
    pub rooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub options: Vec<String>,
}

/// Read the labelled `<li>` criteria of a detail page
pub fn parse_criteria(document: &Html) -> Criteria {
    let root = document.root_element();
    let mut items = select_all(root, "ul li");
    if items.is_empty() {
        items = select_all(root, "li");
    }

    let mut criteria = Criteria::default();
    for item in items {
        let (Some(label_span), Some(value_span)) = (
            select_first(item, CRITERIA_LABEL),
            select_first(item, CRITERIA_VALUE),
        ) else {
            continue;
        };

        let Some(value) = text(value_span).filter(|value| value != "0") else {
            continue;
        };
        let label_text = text(label_span).unwrap_or_default();
        let label = label_text.to_lowercase();

        if label.contains("superficie") || label.contains("surface") {
            criteria.surface = extract_number(&value);
        } else if label.contains("chambre") || label.contains("pièce") {
            criteria.rooms = extract_number(&value);
        } else if label.contains("bain") || label.contains("salle") {
            criteria.bathrooms = extract_number(&value);
        } else if label.contains("transaction") {
            criteria.transaction_type = Some(value);
        } else if ["type", "bien", "property", "catégorie"]
            .iter()
            .any(|word| label.contains(word))
        {
            criteria.property_type = Some(value);
        } else {
            criteria.options.push(format!("{}: {}", label_text, value));
        }
    }

    criteria
}

impl SiteScraper for TayaraScraper {
    fn name(&self) -> &'static str {
        "tayara"
    }

    fn kind(&self) -> ListingKind {
        ListingKind::RealEstate
    }

    fn category_urls(&self) -> &'static [&'static str] {
        CATEGORY_URLS
    }

    fn output_file(&self) -> &'static str {
        "tayaratn_data.csv"
    }

    fn find_cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        select_all(document.root_element(), "article.mx-0")
    }

    fn extract(&self, card: ElementRef<'_>, context: &CategoryContext) -> ListingRecord {
        let url = attr_at(card, "a[href]", "href").map(|href| absolute_url(ORIGIN, &href));
        let price_raw = attr_at(card, "data[value]", "value");
        let price = price_raw.as_deref().and_then(normalize_price);

        // "Ariana, il y a 3 heures" sits in the last meta span
        let meta = select_all(card, META_SPANS);
        let property_type = meta.first().copied().and_then(text);
        let (location, date_posted) = match meta.as_slice() {
            [_, .., last] => {
                let line = text(*last).unwrap_or_default();
                let mut parts = line.splitn(2, ',');
                let location = parts
                    .next()
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(String::from);
                let date = parts.next().and_then(|part| parse_relative_date(part.trim()));
                (location, date)
            }
            _ => (None, None),
        };

        ListingRecord::new()
            .with("title", text_at(card, "h2.card-title"))
            .with("price_raw", price_raw)
            .with("price", price)
            .with("type", property_type)
            .with(
                "transaction_type",
                transaction_type_from_url(&context.category_url),
            )
            .with("surface", None::<i64>)
            .with("bathrooms", None::<i64>)
            .with("rooms", None::<i64>)
            .with("options", None::<Vec<String>>)
            .with("description", None::<String>)
            .with("location", location)
            .with("date_posted", date_posted)
            .with("image_url", attr_at(card, "img[src]", "src"))
            .with("agency", text_at(card, "div.flex.flex-col.items-end span"))
            .with("url", url)
            .with("scrape_date", Some(context.scrape_date))
    }

    fn detail_url(&self, record: &ListingRecord) -> Option<String> {
        record.text("url").map(String::from)
    }

    fn merge_detail(&self, record: &mut ListingRecord, detail: &Html) {
        let criteria = parse_criteria(detail);

        if criteria.surface.is_none() && criteria.rooms.is_none() && criteria.bathrooms.is_none() {
            warn!(
                "  ⚠️ No criteria found for: {}",
                record.text("url").unwrap_or("?")
            );
        }

        let description = first_of(detail.root_element(), DESCRIPTION).and_then(text_spaced);

        record.set_if_some("type", criteria.property_type);
        record.set_if_some("transaction_type", criteria.transaction_type);
        record.set_if_some("surface", criteria.surface);
        record.set_if_some("bathrooms", criteria.bathrooms);
        record.set_if_some("rooms", criteria.rooms);
        record.set("options", Some(criteria.options));
        record.set_if_some("description", description);
    }
}
