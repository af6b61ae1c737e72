//! Builds the raw company table from the saved company-list page and the
//! individual company pages.

pub mod fetcher;
pub mod subpage;

use crate::constants::RAW_HEADERS;
use crate::corrections::Corrections;
use crate::error::{Result, UnicornError};
use crate::types::{CompanyDetails, RawCompanyRecord};
use fetcher::PageFetcher;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use subpage::parse_subpage;
use tracing::{debug, info, instrument, warn};

static TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static TBODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tbody").unwrap());
static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// One row of the company-list table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedRow {
    /// Company, Valuation, Date Joined, Country, City, Industry, Select Investors
    pub cells: Vec<String>,
    /// Link to the company page, if the row had one
    pub link: Option<String>,
}

impl ScrapedRow {
    pub fn company(&self) -> &str {
        self.cells.first().map(String::as_str).unwrap_or_default()
    }

    pub fn city(&self) -> &str {
        self.cells.get(4).map(String::as_str).unwrap_or_default()
    }
}

/// Where a company's page details come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailSource<'a> {
    /// Filled in by hand; the company has no page
    Manual(&'a CompanyDetails),
    /// Fetch and parse this page
    Page(&'a str),
    /// No page and no manual entry
    Missing,
}

/// Read every body row of the first table on the page
pub fn scrape_main(html: &str) -> Result<Vec<ScrapedRow>> {
    let document = Html::parse_document(html);

    let table = document
        .select(&TABLE_SELECTOR)
        .next()
        .ok_or_else(|| UnicornError::Html {
            message: "No table found in company list page".into(),
        })?;
    let tbody = table
        .select(&TBODY_SELECTOR)
        .next()
        .ok_or_else(|| UnicornError::Html {
            message: "Company table has no body".into(),
        })?;

    let mut rows = Vec::new();
    for row in tbody.select(&ROW_SELECTOR) {
        let cells: Vec<String> = row
            .select(&CELL_SELECTOR)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();
        if cells.is_empty() {
            debug!("Skipping table row without cells");
            continue;
        }

        let link = row
            .select(&LINK_SELECTOR)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string);

        rows.push(ScrapedRow { cells, link });
    }

    info!("Found {} companies in the list page", rows.len());
    Ok(rows)
}

/// Decide where a row's details come from, applying the correction tables.
///
/// Same-name overrides win, then manual entries, then link fixes, then the
/// scraped link.
pub fn resolve_source<'a>(row: &'a ScrapedRow, corrections: &'a Corrections) -> DetailSource<'a> {
    let company = row.company();

    if let Some(fix) = corrections.same_name_overrides.get(company) {
        if fix.city == row.city() {
            return DetailSource::Page(&fix.url);
        }
    }
    if let Some(details) = corrections.manual_fields.get(company) {
        return DetailSource::Manual(details);
    }
    if let Some(url) = corrections.link_overrides.get(company) {
        return DetailSource::Page(url);
    }
    match &row.link {
        Some(url) => DetailSource::Page(url),
        None => DetailSource::Missing,
    }
}

/// Counts from one extraction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractStats {
    pub companies: usize,
    pub from_pages: usize,
    pub from_manual: usize,
    pub missing: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractSummary {
    pub stats: ExtractStats,
    pub output_file: String,
}

pub struct Extractor<'a, F: PageFetcher> {
    fetcher: F,
    corrections: &'a Corrections,
}

impl<'a, F: PageFetcher> Extractor<'a, F> {
    pub fn new(fetcher: F, corrections: &'a Corrections) -> Self {
        Self {
            fetcher,
            corrections,
        }
    }

    /// Scrape the list page and fill in each company's details, one page at a time.
    ///
    /// A page that cannot be fetched leaves that company's details empty.
    #[instrument(skip_all)]
    pub async fn extract(&self, html: &str) -> Result<(Vec<RawCompanyRecord>, ExtractStats)> {
        let rows = scrape_main(html)?;
        let mut stats = ExtractStats::default();
        let mut records = Vec::with_capacity(rows.len());

        for (i, row) in rows.iter().enumerate() {
            let details = match resolve_source(row, self.corrections) {
                DetailSource::Manual(details) => {
                    stats.from_manual += 1;
                    details.clone()
                }
                DetailSource::Page(url) => match self.fetcher.fetch(url).await {
                    Ok(body) => {
                        stats.from_pages += 1;
                        parse_subpage(&body)
                    }
                    Err(e) => {
                        warn!("Page not found for {}: {}", row.company(), e);
                        stats.missing += 1;
                        CompanyDetails::default()
                    }
                },
                DetailSource::Missing => {
                    warn!("No company page for {}", row.company());
                    stats.missing += 1;
                    CompanyDetails::default()
                }
            };

            let record = RawCompanyRecord::from_parts(&row.cells, details);
            info!("{}: {}", i + 1, record.company);
            debug!(?record, "Extracted company");
            records.push(record);
        }

        stats.companies = records.len();
        Ok((records, stats))
    }
}

/// Write the raw table, header first
pub fn write_raw_csv<W: Write>(records: &[RawCompanyRecord], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(RAW_HEADERS)?;
    for record in records {
        writer.write_record(record.to_record())?;
    }
    writer.flush()?;
    Ok(())
}

/// Scrape `html_path` into the raw table at `out_path`
#[instrument(skip(fetcher, corrections))]
pub async fn extract_file<F: PageFetcher>(
    html_path: &Path,
    out_path: &Path,
    fetcher: F,
    corrections: &Corrections,
) -> Result<ExtractSummary> {
    let html = fs::read_to_string(html_path)?;
    let (records, stats) = Extractor::new(fetcher, corrections).extract(&html).await?;

    let out = BufWriter::new(File::create(out_path)?);
    write_raw_csv(&records, out)?;

    info!(
        companies = stats.companies,
        missing = stats.missing,
        "Wrote {}",
        out_path.display()
    );

    Ok(ExtractSummary {
        stats,
        output_file: out_path.display().to_string(),
    })
}
