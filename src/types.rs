use csv::StringRecord;
use serde::{Deserialize, Serialize};

/// Fields taken from a company's own page (or filled in by hand)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyDetails {
    pub founded_year: Option<String>,
    pub total_raised: Option<String>,
    pub financial_stage: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

/// One row of the raw table, exactly as scraped.
///
/// Columns are positional; an empty cell means the value was not available.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCompanyRecord {
    pub company: String,
    pub valuation: String,
    pub date_joined: String,
    pub country: String,
    pub city: String,
    pub industry: String,
    pub select_investors: String,
    pub founded_year: String,
    pub total_raised: String,
    pub financial_stage: String,
    pub website: String,
    pub description: String,
}

impl RawCompanyRecord {
    /// Build a record from the main-table cells plus the company page details
    pub fn from_parts(cells: &[String], details: CompanyDetails) -> Self {
        let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
        Self {
            company: cell(0),
            valuation: cell(1),
            date_joined: cell(2),
            country: cell(3),
            city: cell(4),
            industry: cell(5),
            select_investors: cell(6),
            founded_year: details.founded_year.unwrap_or_default(),
            total_raised: details.total_raised.unwrap_or_default(),
            financial_stage: details.financial_stage.unwrap_or_default(),
            website: details.website.unwrap_or_default(),
            description: details.description.unwrap_or_default(),
        }
    }

    /// Read a record by column position; missing trailing cells read as empty
    pub fn from_record(record: &StringRecord) -> Self {
        let cell = |i: usize| record.get(i).unwrap_or_default().to_string();
        Self {
            company: cell(0),
            valuation: cell(1),
            date_joined: cell(2),
            country: cell(3),
            city: cell(4),
            industry: cell(5),
            select_investors: cell(6),
            founded_year: cell(7),
            total_raised: cell(8),
            financial_stage: cell(9),
            website: cell(10),
            description: cell(11),
        }
    }

    pub fn to_record(&self) -> [&str; 12] {
        [
            &self.company,
            &self.valuation,
            &self.date_joined,
            &self.country,
            &self.city,
            &self.industry,
            &self.select_investors,
            &self.founded_year,
            &self.total_raised,
            &self.financial_stage,
            &self.website,
            &self.description,
        ]
    }
}

/// A company after cleaning. Field order matches the cleaned table columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedCompanyRecord {
    pub id: u64,
    pub company_name: String,
    pub valuation: Option<i64>,
    pub date_joined: String,
    pub country: String,
    pub city: String,
    pub industry: String,
    pub founded_year: Option<i32>,
    pub total_raised: Option<i64>,
    pub website: String,
    pub description: String,
    pub roi: Option<f64>,
}

/// An investor backing a company, keyed by the company's synthetic id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestmentRecord {
    #[serde(rename = "investor_id")]
    pub investor: String,
    pub company_id: u64,
}
