//! Row normalizer: raw company table in, cleaned company table and
//! investor relation table out.

pub mod clean;

use crate::constants::{CLEAN_HEADERS, INVESTMENT_HEADERS};
use crate::corrections::Corrections;
use crate::error::Result;
use crate::types::{CleanedCompanyRecord, InvestmentRecord, RawCompanyRecord};
use clean::{
    clean_investor_name, clean_total_raised, clean_valuation, clean_year, compute_roi,
    split_investors,
};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

/// The records produced from a single raw row
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub company: CleanedCompanyRecord,
    pub investments: Vec<InvestmentRecord>,
}

/// Non-empty cells that could not be parsed and were written as empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MalformedCells {
    pub valuation: usize,
    pub founded_year: usize,
    pub total_raised: usize,
}

impl MalformedCells {
    pub fn total(&self) -> usize {
        self.valuation + self.founded_year + self.total_raised
    }

    fn record(&mut self, raw: &RawCompanyRecord, company: &CleanedCompanyRecord) {
        if company.valuation.is_none() && !raw.valuation.is_empty() {
            debug!(id = company.id, value = %raw.valuation, "Unparseable valuation");
            self.valuation += 1;
        }
        if company.founded_year.is_none() && !raw.founded_year.is_empty() {
            debug!(id = company.id, value = %raw.founded_year, "Unparseable founded year");
            self.founded_year += 1;
        }
        if company.total_raised.is_none() && !raw.total_raised.is_empty() {
            debug!(id = company.id, value = %raw.total_raised, "Unparseable total raised");
            self.total_raised += 1;
        }
    }
}

/// Counts from one pass over the raw table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub companies: usize,
    pub investments: usize,
    pub malformed: MalformedCells,
}

/// Result of preprocessing files on disk
#[derive(Debug, Clone, Serialize)]
pub struct PreprocessSummary {
    pub stats: NormalizeStats,
    pub clean_file: String,
    pub clean_sha256: String,
    pub investments_file: String,
    pub investments_sha256: String,
}

pub struct Normalizer<'a> {
    corrections: &'a Corrections,
}

impl<'a> Normalizer<'a> {
    pub fn new(corrections: &'a Corrections) -> Self {
        Self { corrections }
    }

    /// Clean one raw row. `id` is the row's 1-based position in the input.
    pub fn normalize_row(&self, id: u64, raw: &RawCompanyRecord) -> NormalizedRow {
        let valuation = clean_valuation(&raw.valuation);
        let total_raised = clean_total_raised(&raw.total_raised);

        let company = CleanedCompanyRecord {
            id,
            company_name: raw.company.clone(),
            valuation,
            date_joined: raw.date_joined.clone(),
            country: raw.country.clone(),
            city: raw.city.clone(),
            industry: raw.industry.clone(),
            founded_year: clean_year(&raw.founded_year),
            total_raised,
            website: raw.website.clone(),
            description: raw.description.clone(),
            roi: compute_roi(valuation, total_raised),
        };

        let investments = split_investors(&raw.select_investors)
            .map(|name| InvestmentRecord {
                investor: clean_investor_name(name, self.corrections),
                company_id: id,
            })
            .collect();

        NormalizedRow {
            company,
            investments,
        }
    }

    /// Clean rows already in memory; ids follow iteration order starting at 1
    pub fn normalize_records<I>(&self, rows: I) -> (Vec<CleanedCompanyRecord>, Vec<InvestmentRecord>)
    where
        I: IntoIterator<Item = RawCompanyRecord>,
    {
        let mut companies = Vec::new();
        let mut investments = Vec::new();

        for (id, raw) in (1u64..).zip(rows) {
            let row = self.normalize_row(id, &raw);
            companies.push(row.company);
            investments.extend(row.investments);
        }

        (companies, investments)
    }

    /// Stream the raw CSV from `input`, writing both output tables as rows are read.
    ///
    /// The header row of the input is skipped; columns are taken by position.
    /// Output headers are always written, even for an empty input.
    #[instrument(skip_all)]
    pub fn run<R, C, I>(&self, input: R, companies_out: C, investments_out: I) -> Result<NormalizeStats>
    where
        R: Read,
        C: Write,
        I: Write,
    {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);
        let mut companies_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(companies_out);
        let mut investments_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(investments_out);

        companies_writer.write_record(CLEAN_HEADERS)?;
        investments_writer.write_record(INVESTMENT_HEADERS)?;

        let mut stats = NormalizeStats::default();
        let mut company_id: u64 = 1;

        for record in reader.records() {
            let raw = RawCompanyRecord::from_record(&record?);
            let row = self.normalize_row(company_id, &raw);

            stats.malformed.record(&raw, &row.company);
            companies_writer.serialize(&row.company)?;
            for investment in &row.investments {
                investments_writer.serialize(investment)?;
            }

            stats.companies += 1;
            stats.investments += row.investments.len();
            company_id += 1;
        }

        companies_writer.flush()?;
        investments_writer.flush()?;

        Ok(stats)
    }
}

/// Clean `input` into `clean_path` and `investments_path`
#[instrument(skip(corrections))]
pub fn preprocess_files(
    input: &Path,
    clean_path: &Path,
    investments_path: &Path,
    corrections: &Corrections,
) -> Result<PreprocessSummary> {
    info!("Cleaning {}", input.display());

    let reader = File::open(input)?;
    let companies_out = BufWriter::new(File::create(clean_path)?);
    let investments_out = BufWriter::new(File::create(investments_path)?);

    let stats = Normalizer::new(corrections).run(reader, companies_out, investments_out)?;

    info!(
        companies = stats.companies,
        investments = stats.investments,
        malformed = stats.malformed.total(),
        "Wrote {} and {}",
        clean_path.display(),
        investments_path.display()
    );

    Ok(PreprocessSummary {
        stats,
        clean_file: clean_path.display().to_string(),
        clean_sha256: file_sha256(clean_path)?,
        investments_file: investments_path.display().to_string(),
        investments_sha256: file_sha256(investments_path)?,
    })
}

/// Hex SHA-256 of a file's contents, used to compare outputs across runs
pub fn file_sha256(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
