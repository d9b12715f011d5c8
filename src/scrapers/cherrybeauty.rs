use crate::html::{attr, attr_of, select_all, select_first, text, text_at};
use crate::models::{ListingKind, ListingRecord};
use crate::normalize::{calculate_discount, normalize_price};
use crate::scrapers::common::{discount_from_label, infer_promo_type, price_text, DISCOUNTED_PROMO};
use crate::scrapers::traits::SiteScraper;
use crate::scrapers::types::CategoryContext;
use scraper::{ElementRef, Html};

const CATEGORY_URLS: &[&str] = &[
    "https://cherrybeauty.tn/promotions",
    "https://cherrybeauty.tn/6-visage",
    "https://cherrybeauty.tn/3-onglerie",
    "https://cherrybeauty.tn/81-parfums",
    "https://cherrybeauty.tn/83-hygiene",
    "https://cherrybeauty.tn/8-soins-bebe",
    "https://cherrybeauty.tn/4-epilation-rasage",
    "https://cherrybeauty.tn/7-corps-mains-pieds",
    "https://cherrybeauty.tn/61-maquillage-teint",
    "https://cherrybeauty.tn/60-maquillage-levres",
    "https://cherrybeauty.tn/59-cherry-beauty-maquillage-yeux",
    "https://cherrybeauty.tn/46-cheveux-coiffure",
    "https://cherrybeauty.tn/10-homme",
];

/// cherrybeauty.tn product catalog; cards sit directly in the page, no container gate
pub struct CherryBeautyScraper;

impl SiteScraper for CherryBeautyScraper {
    fn name(&self) -> &'static str {
        "cherrybeauty"
    }

    fn kind(&self) -> ListingKind {
        ListingKind::Product
    }

    fn category_urls(&self) -> &'static [&'static str] {
        CATEGORY_URLS
    }

    fn output_file(&self) -> &'static str {
        "cherrybeauty_data.csv"
    }

    fn find_cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        select_all(document.root_element(), "div.js-product-miniature")
    }

    fn extract(&self, card: ElementRef<'_>, context: &CategoryContext) -> ListingRecord {
        let link = select_first(card, "div.product_name > a");
        let title = link.and_then(text);

        let img = select_first(card, "picture img");
        let image_small = img.and_then(|img| attr(img, "src"));
        let image_large = img
            .and_then(|img| attr_of(img, &["data-src", "src"]))
            .or_else(|| image_small.clone());

        let price_raw = select_first(card, "span.price").and_then(price_text);
        let price = price_raw.as_deref().and_then(normalize_price);
        let original_raw = select_first(card, "span.regular-price").and_then(price_text);
        let price_original = original_raw.as_deref().and_then(normalize_price);

        let computed = calculate_discount(price, price_original);
        let discount_badge = text_at(card, "li.label-flag.type-discount > span");
        let discount_percent = discount_badge
            .as_deref()
            .and_then(discount_from_label)
            .unwrap_or(computed);
        let promo_label = discount_badge.map(|_| DISCOUNTED_PROMO.to_string());

        ListingRecord::new()
            .with("id", attr(card, "data-id-product"))
            .with("title", title.clone())
            .with("category", text_at(card, "div.ax-product-cats > a"))
            .with("price_raw", price_raw)
            .with("price", price)
            .with("price_original_raw", original_raw)
            .with("price_original", price_original)
            .with("discount_percent", Some(discount_percent))
            .with("url", link.and_then(|a| attr(a, "href")))
            .with("image_small", image_small)
            .with("image_large", image_large)
            .with("description", title)
            .with(
                "promo_type",
                Some(infer_promo_type(promo_label, computed, &context.category_url)),
            )
            .with("scrape_date", Some(context.scrape_date))
    }
}
