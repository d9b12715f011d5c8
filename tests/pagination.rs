// tests/pagination.rs
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tn_listings_scout::models::{FieldValue, StopReason};
use tn_listings_scout::scrapers::{
    all_sites, CosmetiqueScraper, FetchError, Fetcher, MubawabScraper, PageLimits, Paginator,
    TayaraScraper,
};

/// Serves canned pages; anything else is a 404
#[derive(Default)]
struct FakeFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

const PARFUMS: &str = "https://cosmetique.tn/82-parfums";

fn cosmetique_page(ids: &[u32]) -> String {
    let cards: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<div class="js-product-miniature-wrapper" data-id-product="{id}">
                     <h2 class="h3 product-title">Parfum {id}</h2>
                     <span class="product-price">{id}0,000&nbsp;TND</span>
                   </div>"#
            )
        })
        .collect();
    format!(r#"<html><body><div class="products">{cards}</div></body></html>"#)
}

#[tokio::test]
async fn stops_when_second_page_has_no_cards() {
    let fetcher = FakeFetcher::default()
        .page(PARFUMS, &cosmetique_page(&[1, 2]))
        .page(&format!("{PARFUMS}?page=2"), &cosmetique_page(&[]));

    let result = Paginator::new(&fetcher, PageLimits::default())
        .run_urls(&CosmetiqueScraper, &[PARFUMS])
        .await;

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.categories.len(), 1);
    assert_eq!(result.categories[0].pages, 1);
    assert_eq!(result.categories[0].stop, StopReason::NoCards);
    assert_eq!(
        fetcher.requests(),
        vec![PARFUMS.to_string(), format!("{PARFUMS}?page=2")]
    );

    let ids: Vec<_> = result.records.iter().map(|r| r.text("id")).collect();
    assert_eq!(ids, vec![Some("1"), Some("2")]);
    assert_eq!(result.records[1].number("price"), Some(20.0));
}

#[tokio::test]
async fn missing_container_on_first_page_yields_nothing() {
    let fetcher = FakeFetcher::default().page(PARFUMS, "<html><body><h1>Maintenance</h1></body></html>");

    let result = Paginator::new(&fetcher, PageLimits::default())
        .run_urls(&CosmetiqueScraper, &[PARFUMS])
        .await;

    assert!(result.records.is_empty());
    assert_eq!(result.categories[0].stop, StopReason::NoContainer);
    assert_eq!(result.categories[0].pages, 0);
}

#[tokio::test]
async fn fetch_failure_ends_only_its_category() {
    let other = "https://cosmetique.tn/10-maquillage";
    let fetcher = FakeFetcher::default().page(other, &cosmetique_page(&[7]));

    let result = Paginator::new(&fetcher, PageLimits::default())
        .run_urls(&CosmetiqueScraper, &[PARFUMS, other])
        .await;

    assert_eq!(result.categories[0].stop, StopReason::FetchFailed);
    assert_eq!(result.categories[0].records, 0);
    // page 2 of the second category is a 404 too
    assert_eq!(result.categories[1].stop, StopReason::FetchFailed);
    assert_eq!(result.categories[1].records, 1);
    assert_eq!(result.records.len(), 1);
}

#[tokio::test]
async fn repeated_page_is_treated_as_the_end() {
    let same = cosmetique_page(&[1, 2, 3]);
    let fetcher = FakeFetcher::default()
        .page(PARFUMS, &same)
        .page(&format!("{PARFUMS}?page=2"), &same);

    let result = Paginator::new(&fetcher, PageLimits::default())
        .run_urls(&CosmetiqueScraper, &[PARFUMS])
        .await;

    assert_eq!(result.records.len(), 3);
    assert_eq!(result.categories[0].stop, StopReason::RepeatedPage);
    assert_eq!(fetcher.requests().len(), 2);
}

#[tokio::test]
async fn page_cap_bounds_a_server_that_never_ends() {
    let mut fetcher = FakeFetcher::default().page(PARFUMS, &cosmetique_page(&[1]));
    for page in 2..=10 {
        fetcher = fetcher.page(&format!("{PARFUMS}?page={page}"), &cosmetique_page(&[page]));
    }
    let limits = PageLimits {
        max_pages: 3,
        ..PageLimits::default()
    };

    let result = Paginator::new(&fetcher, limits)
        .run_urls(&CosmetiqueScraper, &[PARFUMS])
        .await;

    assert_eq!(result.records.len(), 3);
    assert_eq!(result.categories[0].pages, 3);
    assert_eq!(result.categories[0].stop, StopReason::PageCap);
    assert_eq!(fetcher.requests().len(), 3);
}

const IMMOBILIER: &str = "https://www.tayara.tn/listing/c/immobilier";

#[tokio::test]
async fn detail_pages_are_fetched_per_card_and_merged() {
    let listing = r#"
        <article class="mx-0"><a href="/item/1/"><h2 class="card-title">S+2 Ennasr</h2></a></article>
        <article class="mx-0"><a href="/item/2/"><h2 class="card-title">Terrain Hammamet</h2></a></article>"#;
    let detail = r#"
        <ul><li>
          <span class="text-gray-600/80">Chambres</span><span class="text-gray-700/80">2</span>
        </li></ul>
        <p class="whitespace-pre-line">Proche commodités</p>"#;

    let fetcher = FakeFetcher::default()
        .page(IMMOBILIER, listing)
        .page("https://www.tayara.tn/item/1/", detail);

    let result = Paginator::new(&fetcher, PageLimits::default())
        .run_urls(&TayaraScraper, &[IMMOBILIER])
        .await;

    assert_eq!(result.records.len(), 2);
    assert_eq!(
        fetcher.requests(),
        vec![
            IMMOBILIER.to_string(),
            "https://www.tayara.tn/item/1/".to_string(),
            "https://www.tayara.tn/item/2/".to_string(),
            format!("{IMMOBILIER}?page=2"),
        ]
    );

    let enriched = &result.records[0];
    assert_eq!(enriched.get("rooms"), Some(&FieldValue::Integer(2)));
    assert_eq!(enriched.text("description"), Some("Proche commodités"));

    // detail fetch failed: list values only, record still emitted
    let plain = &result.records[1];
    assert_eq!(plain.text("title"), Some("Terrain Hammamet"));
    assert!(plain.get("rooms").is_none());
    assert!(plain.get("options").is_none());
}

#[tokio::test]
async fn mubawab_transaction_type_follows_category() {
    let sale = "https://www.mubawab.tn/fr/sc/appartements-a-vendre";
    let fetcher = FakeFetcher::default().page(sale, r#"<div class="listingBox"></div>"#);

    let result = Paginator::new(&fetcher, PageLimits::default())
        .run_urls(&MubawabScraper, &[sale])
        .await;

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].text("transaction_type"), Some("vente"));
}

/// Three empty cards per site, wrapped the way each site expects
fn sparse_page(site: &str) -> String {
    let (wrap_open, card, wrap_close) = match site {
        "cosmetique" => (
            r#"<div class="products">"#,
            r#"<div class="js-product-miniature-wrapper"></div>"#,
            "</div>",
        ),
        "beautystore" => (
            r#"<div class="products">"#,
            r#"<article class="product-miniature js-product-miniature"></article>"#,
            "</div>",
        ),
        "cherrybeauty" => ("", r#"<div class="js-product-miniature"></div>"#, ""),
        "tayara" => ("", r#"<article class="mx-0"></article>"#, ""),
        "mubawab" => ("", r#"<div class="listingBox"></div>"#, ""),
        other => panic!("no sparse page for {other}"),
    };
    format!(
        "<html><body>{wrap_open}{}{wrap_close}</body></html>",
        card.repeat(3)
    )
}

#[tokio::test]
async fn record_count_equals_card_count_for_every_site() {
    for site in all_sites() {
        let base = site.category_urls()[0];
        let fetcher = FakeFetcher::default()
            .page(base, &sparse_page(site.name()))
            .page(&format!("{base}?page=2"), "<html><body></body></html>");

        let result = Paginator::new(&fetcher, PageLimits::default())
            .run_urls(site.as_ref(), &[base])
            .await;

        assert_eq!(result.records.len(), 3, "site {}", site.name());
        assert!(
            result.records.iter().all(|record| record.has_field("scrape_date")),
            "site {}",
            site.name()
        );
    }
}
