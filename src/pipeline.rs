use crate::config::Config;
use crate::corrections::Corrections;
use crate::duplicates::{find_duplicates_file, DuplicateReport};
use crate::error::Result;
use crate::extract::fetcher::PageFetcher;
use crate::extract::{extract_file, ExtractSummary};
use crate::preprocess::{preprocess_files, PreprocessSummary};
use serde::Serialize;
use std::time::Instant;
use tracing::{info, instrument};

/// Result of a complete extract, preprocess and report run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub extract: ExtractSummary,
    pub preprocess: PreprocessSummary,
    pub duplicates: DuplicateReport,
    pub duration_secs: f64,
}

pub struct Pipeline;

impl Pipeline {
    /// Run every stage in order using the paths from `config`
    #[instrument(skip_all)]
    pub async fn run<F: PageFetcher>(
        config: &Config,
        corrections: &Corrections,
        fetcher: F,
    ) -> Result<PipelineResult> {
        let started = Instant::now();
        let paths = &config.paths;

        info!("Step 1: extracting {}", paths.companies_html.display());
        let extract = extract_file(&paths.companies_html, &paths.raw_csv, fetcher, corrections).await?;

        info!("Step 2: cleaning {}", paths.raw_csv.display());
        let preprocess = preprocess_files(
            &paths.raw_csv,
            &paths.clean_csv,
            &paths.investments_csv,
            corrections,
        )?;

        info!("Step 3: looking for duplicate investors");
        let duplicates = find_duplicates_file(&paths.investments_csv, corrections)?;

        let duration_secs = started.elapsed().as_secs_f64();
        info!("Pipeline finished in {:.2}s", duration_secs);

        Ok(PipelineResult {
            extract,
            preprocess,
            duplicates,
            duration_secs,
        })
    }
}
