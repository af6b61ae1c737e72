//! Report of investor names that share a word, to help spot the same
//! investor listed under different names.

use crate::corrections::Corrections;
use crate::error::Result;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, instrument};

/// Lowercased word mapped to every distinct investor name containing it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DuplicateReport {
    pub words: BTreeMap<String, BTreeSet<String>>,
}

impl DuplicateReport {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

impl fmt::Display for DuplicateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (word, names) in &self.words {
            writeln!(f, "{word}:")?;
            for name in names {
                writeln!(f, "    {name}")?;
            }
        }
        Ok(())
    }
}

/// Words shared by more than one investor name, minus the common words
pub fn find_duplicates<'a, I>(investor_names: I, corrections: &Corrections) -> DuplicateReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut word_frequencies: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for name in investor_names {
        for word in name.split(' ').filter(|w| !w.is_empty()) {
            word_frequencies
                .entry(word.to_lowercase())
                .or_default()
                .insert(name.to_string());
        }
    }

    word_frequencies.retain(|word, names| names.len() > 1 && !corrections.is_common_word(word));
    DuplicateReport {
        words: word_frequencies,
    }
}

/// Build the report from an investments table (header skipped, name in column 0)
pub fn find_duplicates_in<R: Read>(input: R, corrections: &Corrections) -> Result<DuplicateReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(name) = record.get(0) {
            names.push(name.to_string());
        }
    }

    Ok(find_duplicates(names.iter().map(String::as_str), corrections))
}

#[instrument(skip(corrections))]
pub fn find_duplicates_file(path: &Path, corrections: &Corrections) -> Result<DuplicateReport> {
    let report = find_duplicates_in(File::open(path)?, corrections)?;
    info!("{} shared words across investor names", report.len());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_words_are_grouped() {
        let corrections = Corrections::builtin().unwrap();
        let names = [
            "Sequoia Capital",
            "Sequoia Capital China",
            "Tiger Global Management",
            "Tiger Global Management",
            "Accel",
            "Insight Partners",
            "Insight Venture Partners",
        ];

        let report = find_duplicates(names, &corrections);

        let words: Vec<&str> = report.words.keys().map(String::as_str).collect();
        assert_eq!(words, vec!["insight", "sequoia"]);
        let sequoia: Vec<&str> = report.words["sequoia"].iter().map(String::as_str).collect();
        assert_eq!(sequoia, vec!["Sequoia Capital", "Sequoia Capital China"]);
    }

    #[test]
    fn test_words_are_case_insensitive() {
        let corrections = Corrections::default();
        let report = find_duplicates(["BOND", "Bond Street Capital"], &corrections);

        assert_eq!(report.len(), 1);
        assert_eq!(report.words["bond"].len(), 2);
    }

    #[test]
    fn test_report_display_and_json() {
        let corrections = Corrections::default();
        let report = find_duplicates(["Alpha One", "Alpha Two"], &corrections);

        assert_eq!(report.to_string(), "alpha:\n    Alpha One\n    Alpha Two\n");
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"alpha":["Alpha One","Alpha Two"]}"#
        );
    }

    #[test]
    fn test_reads_investments_table() {
        let corrections = Corrections::builtin().unwrap();
        let table = "investor_id,company_id\nKleiner Perkins,1\nKleiner Perkins Caufield,2\nKleiner Perkins,3\n";

        let report = find_duplicates_in(table.as_bytes(), &corrections).unwrap();

        assert_eq!(report.len(), 2);
        assert!(report.words.contains_key("kleiner"));
        assert!(report.words.contains_key("perkins"));
    }
}
