use anyhow::Result;
use async_trait::async_trait;
use std::fs;
use tempfile::tempdir;
use unicorn_scraper::config::Config;
use unicorn_scraper::corrections::Corrections;
use unicorn_scraper::error::{self, UnicornError};
use unicorn_scraper::extract::fetcher::PageFetcher;
use unicorn_scraper::pipeline::Pipeline;

/// Every company page is unreachable
struct OfflineFetcher;

#[async_trait]
impl PageFetcher for OfflineFetcher {
    async fn fetch(&self, url: &str) -> error::Result<String> {
        Err(UnicornError::Status {
            url: url.to_string(),
            status: 503,
        })
    }
}

#[tokio::test]
async fn test_full_pipeline_offline() -> Result<()> {
    let dir = tempdir()?;
    let mut config = Config::default();
    config.paths.companies_html = dir.path().join("unicorns.html");
    config.paths.raw_csv = dir.path().join("raw.csv");
    config.paths.clean_csv = dir.path().join("clean.csv");
    config.paths.investments_csv = dir.path().join("investments.csv");
    fs::write(&config.paths.companies_html, include_str!("fixtures/unicorns.html"))?;
    let corrections = Corrections::builtin()?;

    let result = Pipeline::run(&config, &corrections, OfflineFetcher).await?;

    assert_eq!(result.extract.stats.companies, 5);
    assert_eq!(result.extract.stats.from_manual, 1);
    assert_eq!(result.extract.stats.missing, 4);
    assert_eq!(result.preprocess.stats.companies, 5);
    // 4 + 3 + 3 + 2 + 0 investors
    assert_eq!(result.preprocess.stats.investments, 12);

    let clean = fs::read_to_string(&config.paths.clean_csv)?;
    let ids: Vec<&str> = clean
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap_or_default())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);

    // Only Lattice has a total raised, from the manual table
    assert!(clean.contains("3,Lattice,3000000000,1/19/2022,United States,San Francisco,"));
    assert!(clean.contains(",2013,329300000,https://lattice.com/,"));

    let investments = fs::read_to_string(&config.paths.investments_csv)?;
    assert!(investments.contains("\nBOND,4\n"));

    assert!(result.duplicates.words.contains_key("sequoia"));
    assert!(!result.duplicates.words.contains_key("capital"));
    Ok(())
}
