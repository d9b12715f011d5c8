use crate::html::{attr, attr_at, first_of, select_all, select_first, text, text_at, text_spaced};
use crate::models::{ListingKind, ListingRecord};
use crate::normalize::{calculate_discount, normalize_price};
use crate::scrapers::common::{discount_from_label, infer_promo_type, price_text};
use crate::scrapers::traits::SiteScraper;
use crate::scrapers::types::CategoryContext;
use scraper::{ElementRef, Html};

const CATEGORY_URLS: &[&str] = &[
    "https://beautystore.tn/164-promos",
    "https://beautystore.tn/363-coffrets",
    "https://beautystore.tn/10-ongles",
    "https://beautystore.tn/12-levres",
    "https://beautystore.tn/11-yeux",
    "https://beautystore.tn/6-teint",
    "https://beautystore.tn/14-soin",
    "https://beautystore.tn/272-cheveux",
    "https://beautystore.tn/7-accessoires",
    "https://beautystore.tn/330-solaire",
    "https://beautystore.tn/404-black-friday-",
];

const TITLE: &[&str] = &["h1.product-title", "h2.product-title"];
const DESCRIPTION: &[&str] = &[
    "div[id*=\"product-description-short\"]",
    "div.product-description-short",
];

/// beautystore.tn product catalog
pub struct BeautyStoreScraper;

impl SiteScraper for BeautyStoreScraper {
    fn name(&self) -> &'static str {
        "beautystore"
    }

    fn kind(&self) -> ListingKind {
        ListingKind::Product
    }

    fn category_urls(&self) -> &'static [&'static str] {
        CATEGORY_URLS
    }

    fn output_file(&self) -> &'static str {
        "beautystore_products.csv"
    }

    fn has_listing_container(&self, document: &Html) -> bool {
        select_first(document.root_element(), "div.products").is_some()
    }

    fn find_cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        match select_first(document.root_element(), "div.products") {
            Some(products) => select_all(products, "article.product-miniature.js-product-miniature"),
            None => Vec::new(),
        }
    }

    fn extract(&self, card: ElementRef<'_>, context: &CategoryContext) -> ListingRecord {
        let img = select_first(card, "img");

        let price_raw = select_first(card, "span.price").and_then(price_text);
        let price = price_raw.as_deref().and_then(normalize_price);
        let original_raw = select_first(card, "span.regular-price").and_then(price_text);
        let price_original = original_raw.as_deref().and_then(normalize_price);

        let computed = calculate_discount(price, price_original);
        let discount_percent = text_at(card, "span.discount-percentage")
            .as_deref()
            .and_then(discount_from_label)
            .unwrap_or(computed);

        let promo_label = text_at(card, "span.discount-flag");

        ListingRecord::new()
            .with("id", attr(card, "data-id-product"))
            .with("title", first_of(card, TITLE).and_then(text))
            .with("price_raw", price_raw)
            .with("price", price)
            .with("price_original_raw", original_raw)
            .with("price_original", price_original)
            .with("discount_percent", Some(discount_percent))
            .with("url", attr_at(card, "a.thumbnail", "href"))
            .with("image_small", img.and_then(|img| attr(img, "src")))
            .with(
                "image_large",
                img.and_then(|img| attr(img, "data-full-size-image-url")),
            )
            .with("description", first_of(card, DESCRIPTION).and_then(text_spaced))
            .with(
                "promo_type",
                Some(infer_promo_type(promo_label, computed, &context.category_url)),
            )
            .with("scrape_date", Some(context.scrape_date))
    }
}
