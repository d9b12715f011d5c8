use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use tn_listings_scout::runner::{scrape_site, OutputOptions};
use tn_listings_scout::scrapers::{all_sites, site_by_name, HttpFetcher, PageLimits, SiteScraper};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Scrape Tunisian product catalogs and real-estate listings to CSV
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Site to scrape (repeatable); all sites when omitted
    #[arg(short, long = "site", value_name = "NAME")]
    sites: Vec<String>,

    /// Directory receiving the per-site output files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Highest page number fetched per category
    #[arg(long, default_value_t = PageLimits::default().max_pages)]
    max_pages: u32,

    /// Also write a JSON dump next to each CSV
    #[arg(long)]
    json: bool,
}

fn selected_sites(names: &[String]) -> Result<Vec<Box<dyn SiteScraper>>> {
    if names.is_empty() {
        return Ok(all_sites());
    }

    let mut sites = Vec::with_capacity(names.len());
    for name in names {
        match site_by_name(name) {
            Some(site) => sites.push(site),
            None => {
                let known: Vec<_> = all_sites().iter().map(|site| site.name()).collect();
                bail!("Unknown site '{}'. Known sites: {}", name, known.join(", "));
            }
        }
    }
    Ok(sites)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let sites = selected_sites(&args.sites)?;

    info!("🏠 TN Listings Scout");
    info!("==========================================");

    let fetcher = HttpFetcher::new()?;
    let limits = PageLimits {
        max_pages: args.max_pages,
        ..PageLimits::default()
    };
    let output = OutputOptions {
        dir: args.output_dir,
        json: args.json,
    };

    for site in &sites {
        match scrape_site(&fetcher, site.as_ref(), limits.clone(), &output).await {
            Ok((result, export)) => info!(
                "✅ {}: {} records from {} categories -> {}",
                site.name(),
                result.records.len(),
                result.categories.len(),
                export.csv.display()
            ),
            Err(err) => error!("Failed to export {}: {:#}", site.name(), err),
        }
    }

    Ok(())
}
