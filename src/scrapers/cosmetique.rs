use crate::html::{attr, attr_at, select_all, select_first, text_at, text_spaced};
use crate::models::{ListingKind, ListingRecord};
use crate::normalize::{calculate_discount, normalize_price};
use crate::scrapers::common::{discount_from_label, infer_promo_type, price_text};
use crate::scrapers::traits::SiteScraper;
use crate::scrapers::types::CategoryContext;
use scraper::{ElementRef, Html};

const CATEGORY_URLS: &[&str] = &[
    "https://cosmetique.tn/promotions",
    "https://cosmetique.tn/10-maquillage",
    "https://cosmetique.tn/242-visages",
    "https://cosmetique.tn/226-corps_Corps",
    "https://cosmetique.tn/76-cheveux-soins-cosmetique",
    "https://cosmetique.tn/12-produit-solaires-tunisie",
    "https://cosmetique.tn/84-maman-bebe",
    "https://cosmetique.tn/82-parfums",
    "https://cosmetique.tn/91-para-tun",
];

/// cosmetique.tn product catalog (PrestaShop theme)
pub struct CosmetiqueScraper;

impl SiteScraper for CosmetiqueScraper {
    fn name(&self) -> &'static str {
        "cosmetique"
    }

    fn kind(&self) -> ListingKind {
        ListingKind::Product
    }

    fn category_urls(&self) -> &'static [&'static str] {
        CATEGORY_URLS
    }

    fn output_file(&self) -> &'static str {
        "cosmetiquetn_data.csv"
    }

    fn has_listing_container(&self, document: &Html) -> bool {
        select_first(document.root_element(), "div.products").is_some()
    }

    fn find_cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        match select_first(document.root_element(), "div.products") {
            Some(products) => select_all(products, "div.js-product-miniature-wrapper"),
            None => Vec::new(),
        }
    }

    fn extract(&self, card: ElementRef<'_>, context: &CategoryContext) -> ListingRecord {
        let img = select_first(card, "img");

        let price_raw = select_first(card, "span.product-price").and_then(price_text);
        let price = price_raw.as_deref().and_then(normalize_price);
        let original_raw = select_first(card, "span.regular-price").and_then(price_text);
        let price_original = original_raw.as_deref().and_then(normalize_price);

        let computed = calculate_discount(price, price_original);
        let discount_percent = text_at(card, "li.product-flag.discount")
            .as_deref()
            .and_then(discount_from_label)
            .unwrap_or(computed);

        ListingRecord::new()
            .with(
                "id",
                attr(card, "data-id-product")
                    .or_else(|| attr_at(card, "[data-id-product]", "data-id-product")),
            )
            .with("title", text_at(card, "h2.product-title"))
            .with("brand", text_at(card, "div.product-brand"))
            .with("reference", text_at(card, "div.product-reference"))
            .with("price_raw", price_raw)
            .with("price", price)
            .with("price_original_raw", original_raw)
            .with("price_original", price_original)
            .with("discount_percent", Some(discount_percent))
            .with("url", attr_at(card, "a.product-thumbnail", "href"))
            .with("image_small", img.and_then(|img| attr(img, "src")))
            .with(
                "image_large",
                img.and_then(|img| attr(img, "data-full-size-image-url")),
            )
            .with(
                "description",
                select_first(card, "div.product-description-short").and_then(text_spaced),
            )
            .with(
                "promo_type",
                Some(infer_promo_type(None, computed, &context.category_url)),
            )
            .with("scrape_date", Some(context.scrape_date))
    }
}
