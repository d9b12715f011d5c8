use crate::html::{absolute_url, attr, attr_of, first_of, select_all, select_first, text, text_at, text_spaced};
use crate::models::{ListingKind, ListingRecord};
use crate::normalize::{extract_number, normalize_price};
use crate::scrapers::common::transaction_type_from_url;
use crate::scrapers::traits::SiteScraper;
use crate::scrapers::types::CategoryContext;
use scraper::{ElementRef, Html};

const ORIGIN: &str = "https://www.mubawab.tn";

const CATEGORY_URLS: &[&str] = &[
    "https://www.mubawab.tn/fr/sc/appartements-a-vendre",
    "https://www.mubawab.tn/fr/sc/appartements-a-louer",
];

const IMAGE: &[&str] = &["div.adSlider img.firstPicture", "div.adSlider img", "img"];
const IMAGE_ATTRS: &[&str] = &["src", "data-lazy"];
const PROPERTY_TYPE_LABEL: &str = "Type de bien";

/// mubawab.tn apartments for sale and rent; every card links to a detail page
pub struct MubawabScraper;

/// Surface, rooms and bathrooms read from `.adDetailFeature` badges
#[derive(Debug, Default, PartialEq)]
pub struct FeatureCounts {
    pub surface: Option<i64>,
    pub rooms: Option<i64>,
    pub bathrooms: Option<i64>,
}

fn feature_counts(scope: ElementRef<'_>) -> FeatureCounts {
    let mut counts = FeatureCounts::default();
    for feature in select_all(scope, ".adDetailFeature") {
        let Some(label) = text(feature) else {
            continue;
        };
        if label.contains("m²") {
            counts.surface = extract_number(&label);
        } else if label.contains("Chambre") {
            counts.rooms = extract_number(&label);
        } else if label.contains("bain") {
            counts.bathrooms = extract_number(&label);
        }
    }
    counts
}

/// Everything the detail page adds to a card
#[derive(Debug, Default, PartialEq)]
pub struct Detail {
    pub property_type: Option<String>,
    pub counts: FeatureCounts,
    pub options: Vec<String>,
    pub description: Option<String>,
}

pub fn parse_detail(document: &Html) -> Detail {
    let root = document.root_element();

    let property_type = select_all(root, ".adMainFeatureContent")
        .into_iter()
        .find_map(|content| {
            let label = text_at(content, ".adMainFeatureContentLabel")?;
            if label.contains(PROPERTY_TYPE_LABEL) {
                text_at(content, ".adMainFeatureContentValue")
            } else {
                None
            }
        });

    let mut options: Vec<String> = select_all(root, ".adFeature")
        .into_iter()
        .filter(|feature| select_first(*feature, ".extraFeatures").is_none())
        .filter_map(text)
        .filter(|label| !label.starts_with('+') && label.chars().count() > 2)
        .collect();

    for feature in select_all(root, ".adMainFeature") {
        let (Some(label), Some(value)) = (
            text_at(feature, ".adMainFeatureContentLabel"),
            text_at(feature, ".adMainFeatureContentValue"),
        ) else {
            continue;
        };
        if label != PROPERTY_TYPE_LABEL {
            options.push(format!("{}: {}", label, value));
        }
    }

    Detail {
        property_type,
        counts: feature_counts(root),
        options,
        description: select_first(root, ".blockProp p").and_then(text_spaced),
    }
}

impl SiteScraper for MubawabScraper {
    fn name(&self) -> &'static str {
        "mubawab"
    }

    fn kind(&self) -> ListingKind {
        ListingKind::RealEstate
    }

    fn category_urls(&self) -> &'static [&'static str] {
        CATEGORY_URLS
    }

    fn output_file(&self) -> &'static str {
        "mubawab_data.csv"
    }

    fn find_cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        select_all(document.root_element(), "div.listingBox")
    }

    fn extract(&self, card: ElementRef<'_>, context: &CategoryContext) -> ListingRecord {
        let price_raw = text_at(card, ".priceTag");
        let price = price_raw.as_deref().and_then(normalize_price);
        let image_url = first_of(card, IMAGE).and_then(|img| attr_of(img, IMAGE_ATTRS));
        let counts = feature_counts(card);

        ListingRecord::new()
            .with("title", text_at(card, "h2.listingTit a"))
            .with("price_raw", price_raw)
            .with("price", price)
            .with("type", None::<String>)
            .with(
                "transaction_type",
                transaction_type_from_url(&context.category_url),
            )
            .with("surface", counts.surface)
            .with("rooms", counts.rooms)
            .with("bathrooms", counts.bathrooms)
            .with("options", None::<Vec<String>>)
            .with("description", None::<String>)
            .with(
                "location",
                select_first(card, ".listingH3").and_then(text_spaced),
            )
            .with("image_url", image_url)
            .with(
                "url",
                attr(card, "linkref").map(|href| absolute_url(ORIGIN, &href)),
            )
            .with("scrape_date", Some(context.scrape_date))
    }

    fn detail_url(&self, record: &ListingRecord) -> Option<String> {
        record.text("url").map(String::from)
    }

    fn merge_detail(&self, record: &mut ListingRecord, detail: &Html) {
        let detail = parse_detail(detail);

        record.set_if_some("type", detail.property_type);
        record.set_if_some("surface", detail.counts.surface);
        record.set_if_some("rooms", detail.counts.rooms);
        record.set_if_some("bathrooms", detail.counts.bathrooms);
        record.set("options", Some(detail.options));
        record.set_if_some("description", detail.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;
    use chrono::NaiveDate;

    const LISTING: &str = r#"
    <ul class="ulListing">
      <div class="listingBox w100" linkref="https://www.mubawab.tn/fr/a/7784512/appartement-s-2">
        <div class="adSlider">
          <img class="sliderImage" src="https://cdn.mubawab.tn/2.jpg">
          <img class="firstPicture" src="" data-lazy="https://cdn.mubawab.tn/1.jpg">
        </div>
        <h2 class="listingTit"><a href="/fr/a/7784512">Appartement S+2 à La Marsa</a></h2>
        <span class="priceTag">  1 200 TND  </span>
        <h3 class="listingH3">La Marsa,
            Tunis</h3>
        <div class="adDetails">
          <div class="adDetailFeature"><span>95 m²</span></div>
          <div class="adDetailFeature"><span>2 Chambres</span></div>
          <div class="adDetailFeature"><span>1 Salle de bain</span></div>
        </div>
      </div>
      <div class="listingBox"></div>
    </ul>"#;

    const DETAIL: &str = r#"
    <html><body>
      <div class="adDetails">
        <div class="adDetailFeature"><span>102 m²</span></div>
        <div class="adDetailFeature"><span>2 Chambres</span></div>
        <div class="adDetailFeature"><span>2 Salles de bain</span></div>
      </div>
      <div class="adMainFeature">
        <div class="adMainFeatureContent">
          <p class="adMainFeatureContentLabel">Type de bien</p>
          <p class="adMainFeatureContentValue">Appartement</p>
        </div>
      </div>
      <div class="adMainFeature">
        <div class="adMainFeatureContent">
          <p class="adMainFeatureContentLabel">Étage du bien</p>
          <p class="adMainFeatureContentValue">3ème étage</p>
        </div>
      </div>
      <div class="adFeature"><span>Ascenseur</span></div>
      <div class="adFeature"><span>Parking</span></div>
      <div class="adFeature"><span>+3</span></div>
      <div class="adFeature"><span class="extraFeatures">Voir plus</span></div>
      <div class="blockProp"><p>Appartement lumineux,
         vue mer.</p></div>
    </body></html>"#;

    fn context(url: &str) -> CategoryContext {
        CategoryContext::with_date(url, NaiveDate::from_ymd_opt(2024, 11, 29).unwrap())
    }

    #[test]
    fn extracts_list_page_fields() {
        let document = Html::parse_document(LISTING);
        let cards = MubawabScraper.find_cards(&document);
        assert_eq!(cards.len(), 2);

        let record = MubawabScraper.extract(
            cards[0],
            &context("https://www.mubawab.tn/fr/sc/appartements-a-louer"),
        );
        assert_eq!(record.text("title"), Some("Appartement S+2 à La Marsa"));
        assert_eq!(record.number("price"), Some(1200.0));
        assert_eq!(record.text("transaction_type"), Some("location"));
        assert_eq!(record.text("location"), Some("La Marsa, Tunis"));
        assert_eq!(record.text("image_url"), Some("https://cdn.mubawab.tn/1.jpg"));
        assert_eq!(record.get("surface"), Some(&FieldValue::Integer(95)));
        assert_eq!(record.get("rooms"), Some(&FieldValue::Integer(2)));
        assert_eq!(record.get("bathrooms"), Some(&FieldValue::Integer(1)));
        assert_eq!(
            MubawabScraper.detail_url(&record).as_deref(),
            Some("https://www.mubawab.tn/fr/a/7784512/appartement-s-2")
        );
    }

    #[test]
    fn empty_box_is_still_a_record() {
        let document = Html::parse_document(LISTING);
        let cards = MubawabScraper.find_cards(&document);
        let record = MubawabScraper.extract(
            cards[1],
            &context("https://www.mubawab.tn/fr/sc/appartements-a-vendre"),
        );

        assert_eq!(record.text("transaction_type"), Some("vente"));
        assert!(record.get("title").is_none());
        assert!(MubawabScraper.detail_url(&record).is_none());
    }

    #[test]
    fn parses_detail_page() {
        let detail = parse_detail(&Html::parse_document(DETAIL));
        assert_eq!(detail.property_type.as_deref(), Some("Appartement"));
        assert_eq!(detail.counts.surface, Some(102));
        assert_eq!(detail.counts.bathrooms, Some(2));
        assert_eq!(
            detail.options,
            vec![
                "Ascenseur".to_string(),
                "Parking".to_string(),
                "Étage du bien: 3ème étage".to_string(),
            ]
        );
        assert_eq!(detail.description.as_deref(), Some("Appartement lumineux, vue mer."));
    }

    #[test]
    fn detail_page_takes_precedence() {
        let document = Html::parse_document(LISTING);
        let cards = MubawabScraper.find_cards(&document);
        let mut record = MubawabScraper.extract(
            cards[0],
            &context("https://www.mubawab.tn/fr/sc/appartements-a-louer"),
        );

        MubawabScraper.merge_detail(&mut record, &Html::parse_document(DETAIL));

        assert_eq!(record.get("surface"), Some(&FieldValue::Integer(102)));
        assert_eq!(record.get("bathrooms"), Some(&FieldValue::Integer(2)));
        assert_eq!(record.get("rooms"), Some(&FieldValue::Integer(2)));
        assert_eq!(record.text("type"), Some("Appartement"));
        assert_eq!(record.text("transaction_type"), Some("location"));
    }

    #[test]
    fn detail_without_counts_keeps_list_values() {
        let document = Html::parse_document(LISTING);
        let cards = MubawabScraper.find_cards(&document);
        let mut record = MubawabScraper.extract(
            cards[0],
            &context("https://www.mubawab.tn/fr/sc/appartements-a-louer"),
        );

        MubawabScraper.merge_detail(&mut record, &Html::parse_document("<html></html>"));

        assert_eq!(record.get("surface"), Some(&FieldValue::Integer(95)));
        assert_eq!(record.get("options"), Some(&FieldValue::List(Vec::new())));
        assert!(record.get("description").is_none());
    }
}
