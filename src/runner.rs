use crate::export::{write_csv, write_json};
use crate::models::SiteResult;
use crate::scrapers::{Fetcher, PageLimits, Paginator, SiteScraper};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Where and how a site's records are written
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub dir: PathBuf,
    /// Also write `<output stem>.json` next to the CSV
    pub json: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            json: false,
        }
    }
}

/// Files written for one site
#[derive(Debug, Clone)]
pub struct SiteExport {
    pub csv: PathBuf,
    pub json: Option<PathBuf>,
}

/// Write one site's accumulated records, once.
pub fn export_site(
    site: &dyn SiteScraper,
    result: &SiteResult,
    output: &OutputOptions,
) -> Result<SiteExport> {
    std::fs::create_dir_all(&output.dir)
        .with_context(|| format!("Failed to create {}", output.dir.display()))?;

    let csv = output.dir.join(site.output_file());
    write_csv(&result.records, &csv)
        .with_context(|| format!("Failed to write {}", csv.display()))?;
    info!("💾 Saved {} records to {}", result.records.len(), csv.display());

    let json = if output.json {
        let path = csv.with_extension("json");
        write_json(&result.records, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Saved JSON dump to {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(SiteExport { csv, json })
}

/// Scrape every category of `site`, then export the result.
pub async fn scrape_site<F: Fetcher + ?Sized>(
    fetcher: &F,
    site: &dyn SiteScraper,
    limits: PageLimits,
    output: &OutputOptions,
) -> Result<(SiteResult, SiteExport)> {
    let result = Paginator::new(fetcher, limits).run(site).await;
    let export = export_site(site, &result, output)?;
    Ok((result, export))
}

