//! Field rules shared by several sites.

use crate::html::text;
use crate::normalize::normalize_price;
use scraper::ElementRef;

/// Category URL markers of seasonal campaigns, with the tag they imply
const CAMPAIGNS: &[(&str, &str)] = &[("black-friday", "Black Friday")];

pub const DEFAULT_PROMO: &str = "Standard";
pub const DISCOUNTED_PROMO: &str = "Promotion";

/// Display price text with non-breaking spaces flattened
pub fn price_text(el: ElementRef<'_>) -> Option<String> {
    text(el).map(|raw| raw.replace('\u{a0}', " "))
}

/// Discount percent printed on a badge such as `"-20%"`.
///
/// Badges showing an amount (`"-5,000 TND"`) are not percentages and yield `None`.
pub fn discount_from_label(label: &str) -> Option<f64> {
    if !label.contains('%') {
        return None;
    }
    normalize_price(&label.replace(['%', '-'], ""))
}

/// Campaign tag implied by the category URL, if any
pub fn campaign_from_url(category_url: &str) -> Option<&'static str> {
    let url = category_url.to_lowercase();
    CAMPAIGNS
        .iter()
        .find(|(marker, _)| url.contains(marker))
        .map(|(_, tag)| *tag)
}

/// Promotion tag: on-page label, then price-based discount, then campaign URL, then default.
///
/// `price_discount` is the percentage computed from current and original
/// price; `0.0` means the prices did not show a markdown.
pub fn infer_promo_type(label: Option<String>, price_discount: f64, category_url: &str) -> String {
    let attempts = [
        label,
        (price_discount > 0.0).then(|| DISCOUNTED_PROMO.to_string()),
        campaign_from_url(category_url).map(String::from),
    ];

    attempts
        .into_iter()
        .flatten()
        .next()
        .unwrap_or_else(|| DEFAULT_PROMO.to_string())
}

/// Sale or rent, from the wording of a real-estate category URL
pub fn transaction_type_from_url(url: &str) -> Option<&'static str> {
    let url = url.to_lowercase();
    if url.contains("a-vendre") || url.contains("vente") {
        Some("vente")
    } else if url.contains("a-louer") || url.contains("location") {
        Some("location")
    } else {
        None
    }
}
