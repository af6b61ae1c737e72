//! Column headers and default locations shared across the stages

// Default file locations (relative to the working directory)
pub const DEFAULT_CONFIG_PATH: &str = "unicorn.toml";
pub const DEFAULT_COMPANIES_HTML: &str = "The Complete List Of Unicorn Companies.html";
pub const DEFAULT_RAW_CSV: &str = "Unicorn_Companies.csv";
pub const DEFAULT_CLEAN_CSV: &str = "Unicorn_Companies_clean.csv";
pub const DEFAULT_INVESTMENTS_CSV: &str = "Unicorn_Companies_investments.csv";
pub const DEFAULT_LOG_DIR: &str = "logs";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Header of the raw table written by the extractor
pub const RAW_HEADERS: [&str; 12] = [
    "Company",
    "Valuation",
    "Date Joined",
    "Country",
    "City",
    "Industry",
    "Select Investors",
    "Founded Year",
    "Total Raised",
    "Financial Stage",
    "Website",
    "Description",
];

/// Header of the cleaned company table
pub const CLEAN_HEADERS: [&str; 12] = [
    "id",
    "company_name",
    "valuation",
    "date_joined",
    "country",
    "city",
    "industry",
    "founded_year",
    "total_raised",
    "website",
    "description",
    "roi",
];

/// Header of the investor/company relation table.
/// The first column carries the investor name.
pub const INVESTMENT_HEADERS: [&str; 2] = ["investor_id", "company_id"];

// Subpage overview labels
pub const LABEL_FOUNDED_YEAR: &str = "Founded Year";
pub const LABEL_TOTAL_RAISED: &str = "Total Raised";
pub const LABEL_STAGE: &str = "Stage";
