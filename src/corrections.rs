//! Static correction tables.
//!
//! The tables are plain data: link fixes for the company pages, hand-filled
//! details for companies without a page, investor name aliases and the list of
//! words ignored by the duplicate report. A default set is compiled into the
//! binary from `config/corrections.toml`; a replacement file can be supplied at
//! startup. Once loaded the tables are never mutated.

use crate::error::{Result, UnicornError};
use crate::types::CompanyDetails;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::info;

const DEFAULT_CORRECTIONS: &str = include_str!("../config/corrections.toml");

/// A link fix that applies only to the company of that name in one city
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SameNameOverride {
    pub city: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DuplicatesConfig {
    pub common_words: HashSet<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Corrections {
    pub link_overrides: HashMap<String, String>,
    pub same_name_overrides: HashMap<String, SameNameOverride>,
    pub manual_fields: HashMap<String, CompanyDetails>,
    pub investor_aliases: HashMap<String, String>,
    pub duplicates: DuplicatesConfig,
}

impl Corrections {
    /// The tables shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_toml(DEFAULT_CORRECTIONS)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path` when given, otherwise fall back to the built-in tables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let corrections = match path {
            Some(p) => {
                let content = fs::read_to_string(p).map_err(|e| {
                    UnicornError::Config(format!(
                        "Failed to read corrections file '{}': {}",
                        p.display(),
                        e
                    ))
                })?;
                Self::from_toml(&content)?
            }
            None => Self::builtin()?,
        };

        info!(
            link_overrides = corrections.link_overrides.len(),
            manual_fields = corrections.manual_fields.len(),
            investor_aliases = corrections.investor_aliases.len(),
            "Loaded correction tables"
        );
        Ok(corrections)
    }

    /// Canonical investor name; exact, case-sensitive match on the whole name
    pub fn canonical_investor<'a>(&'a self, name: &'a str) -> &'a str {
        self.investor_aliases
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }

    pub fn is_common_word(&self, word: &str) -> bool {
        self.duplicates.common_words.contains(word)
    }
}
