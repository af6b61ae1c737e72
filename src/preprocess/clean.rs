//! Per-column cleaning functions.
//!
//! Every function here is total: malformed input yields `None` for that cell
//! and never an error.

use crate::corrections::Corrections;

/// Valuations are quoted in billions of dollars
const ONE_BILLION: f64 = 1_000_000_000.0;

/// Unit suffixes accepted on the total-raised column
pub const UNIT_MULTIPLIERS: [(char, f64); 3] = [('K', 1e3), ('M', 1e6), ('B', 1e9)];

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// Largest magnitude that still fits an i64 after the float conversion
const MAX_DOLLARS: f64 = 9.0e18;

fn strip_currency(value: &str) -> &str {
    value
        .strip_prefix(|c: char| CURRENCY_SYMBOLS.contains(&c))
        .unwrap_or(value)
}

fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn to_dollars(amount: f64) -> Option<i64> {
    if amount.is_finite() && amount.abs() < MAX_DOLLARS {
        Some(amount as i64)
    } else {
        None
    }
}

fn unit_multiplier(unit: char) -> Option<f64> {
    UNIT_MULTIPLIERS
        .iter()
        .find(|(suffix, _)| *suffix == unit)
        .map(|(_, multiplier)| *multiplier)
}

/// `"$1.2"` (billions) to dollars, rounded to the nearest dollar
pub fn clean_valuation(valuation: &str) -> Option<i64> {
    let billions = parse_decimal(strip_currency(valuation.trim()))?;
    to_dollars((billions * ONE_BILLION).round())
}

pub fn clean_year(year: &str) -> Option<i32> {
    year.trim().parse().ok()
}

/// `"$50M"`, `"$2.3B"` or `"$500K"` to dollars, truncated toward zero.
///
/// The last character must be one of the known unit letters; anything else,
/// including a bare number, yields `None`.
pub fn clean_total_raised(total_raised: &str) -> Option<i64> {
    let total_raised = total_raised.trim();
    if total_raised.is_empty() {
        return None;
    }

    let mut chars = strip_currency(total_raised).chars();
    let multiplier = unit_multiplier(chars.next_back()?)?;
    let amount = parse_decimal(chars.as_str())?;
    to_dollars((amount * multiplier).trunc())
}

/// Return on investment: valuation over total raised, when anything was raised
pub fn compute_roi(valuation: Option<i64>, total_raised: Option<i64>) -> Option<f64> {
    match (valuation, total_raised) {
        (Some(valuation), Some(raised)) if raised > 0 => Some(valuation as f64 / raised as f64),
        _ => None,
    }
}

/// Split the investors cell on runs of commas, dropping blank pieces
pub fn split_investors(investors: &str) -> impl Iterator<Item = &str> {
    investors
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

pub fn clean_investor_name(name: &str, corrections: &Corrections) -> String {
    corrections.canonical_investor(name).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_valuation() {
        assert_eq!(clean_valuation("$2.5"), Some(2_500_000_000));
        assert_eq!(clean_valuation("$140"), Some(140_000_000_000));
        assert_eq!(clean_valuation("$1.2"), Some(1_200_000_000));
        assert_eq!(clean_valuation("$0.29"), Some(290_000_000));
        assert_eq!(clean_valuation("€3"), Some(3_000_000_000));
    }

    #[test]
    fn test_clean_valuation_malformed() {
        assert_eq!(clean_valuation("$abc"), None);
        assert_eq!(clean_valuation(""), None);
        assert_eq!(clean_valuation("$"), None);
        assert_eq!(clean_valuation("$inf"), None);
        assert_eq!(clean_valuation("$NaN"), None);
        assert_eq!(clean_valuation("$1e30"), None);
    }

    #[test]
    fn test_clean_year() {
        assert_eq!(clean_year("2015"), Some(2015));
        assert_eq!(clean_year(" 1999 "), Some(1999));
        assert_eq!(clean_year("2015?"), None);
        assert_eq!(clean_year("Founded 2015"), None);
        assert_eq!(clean_year("2015.0"), None);
        assert_eq!(clean_year(""), None);
    }

    #[test]
    fn test_clean_total_raised_units() {
        assert_eq!(clean_total_raised("$40M"), Some(40_000_000));
        assert_eq!(clean_total_raised("$500K"), Some(500_000));
        assert_eq!(clean_total_raised("$2.5B"), Some(2_500_000_000));
        assert_eq!(clean_total_raised("$1.5M"), Some(1_500_000));
        assert_eq!(clean_total_raised("$0.25K"), Some(250));
    }

    #[test]
    fn test_clean_total_raised_degrades_to_none() {
        assert_eq!(clean_total_raised(""), None);
        assert_eq!(clean_total_raised("$"), None);
        assert_eq!(clean_total_raised("$M"), None);
        // Unknown or missing unit
        assert_eq!(clean_total_raised("$40T"), None);
        assert_eq!(clean_total_raised("$40m"), None);
        assert_eq!(clean_total_raised("$40"), None);
        // Unparseable middle
        assert_eq!(clean_total_raised("$4O M"), None);
        assert_eq!(clean_total_raised("$abcM"), None);
        assert_eq!(clean_total_raised("Undisclosed"), None);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(clean_valuation(" $2.5"), Some(2_500_000_000));
        assert_eq!(clean_valuation("$2.5 "), Some(2_500_000_000));
        assert_eq!(clean_total_raised(" $40M"), Some(40_000_000));
        assert_eq!(clean_total_raised("$40M "), Some(40_000_000));
        assert_eq!(clean_total_raised("   "), None);
    }

    #[test]
    fn test_compute_roi() {
        assert_eq!(compute_roi(Some(2_500_000_000), Some(40_000_000)), Some(62.5));
        assert_eq!(compute_roi(Some(1_000), Some(1_000)), Some(1.0));
        assert_eq!(compute_roi(Some(2_500_000_000), Some(0)), None);
        assert_eq!(compute_roi(Some(2_500_000_000), Some(-5)), None);
        assert_eq!(compute_roi(Some(2_500_000_000), None), None);
        assert_eq!(compute_roi(None, Some(40_000_000)), None);
        assert_eq!(compute_roi(None, None), None);
    }

    #[test]
    fn test_split_investors() {
        let split = |s| split_investors(s).collect::<Vec<_>>();

        assert_eq!(split("Acme Ventures, Bond"), vec!["Acme Ventures", "Bond"]);
        assert_eq!(split("Sequoia Capital"), vec!["Sequoia Capital"]);
        assert_eq!(split("A,,, B ,C"), vec!["A", "B", "C"]);
        assert_eq!(split("A, ,B,"), vec!["A", "B"]);
        assert!(split("").is_empty());
        assert!(split(" , ").is_empty());
    }

    #[test]
    fn test_clean_investor_name() {
        let corrections = Corrections::builtin().unwrap();
        assert_eq!(clean_investor_name("Bond", &corrections), "BOND");
        assert_eq!(clean_investor_name("Georgian", &corrections), "Georgian Partners");
        assert_eq!(clean_investor_name("Acme Ventures", &corrections), "Acme Ventures");
    }
}
