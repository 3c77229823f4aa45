mod damage_stats;
mod kda_winrate;
mod top_victims;

pub use damage_stats::DamageStatsAggregator;
pub use kda_winrate::KdaWinrateAggregator;
pub use top_victims::{TopVictimsAggregator, NO_VICTIM};

use std::collections::HashMap;

/// Map keyed by player id that iterates in first-insertion order
///
/// Every reduction reports rows (and ranks ties) in the order ids were
/// first seen, which keeps the output deterministic across runs.
#[derive(Debug)]
pub(crate) struct Grouped<T> {
    index: HashMap<String, usize>,
    entries: Vec<(String, T)>,
}

impl<T> Default for Grouped<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<T: Default> Grouped<T> {
    pub(crate) fn entry(&mut self, key: &str) -> &mut T {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                self.entries.push((key.to_string(), T::default()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].1
    }
}

impl<T> Grouped<T> {
    pub(crate) fn into_entries(self) -> Vec<(String, T)> {
        self.entries
    }
}

/// `numerator / denominator` rounded half away from zero; `denominator` must be non-zero
pub(crate) fn div_round(numerator: u64, denominator: u64) -> u64 {
    let (numerator, denominator) = (u128::from(numerator), u128::from(denominator));
    let quotient = (2 * numerator + denominator) / (2 * denominator);
    u64::try_from(quotient).unwrap_or(u64::MAX)
}

/// Converts a value held in hundredths into its decimal form
pub(crate) fn from_hundredths(hundredths: u64) -> f64 {
    hundredths as f64 / 100.0
}

/// Rounds to two decimals on the exact binary value, ties to even
///
/// `3.125` is stored as exactly `3.125` and becomes `3.12`, while `0.145`
/// is stored just below the tie and becomes `0.14`.
pub(crate) fn round_hundredths(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Formats a percentage as the shortest decimal with at least one fraction
/// digit, followed by `%` (`50.0` -> `"50.0%"`, `33.33` -> `"33.33%"`)
pub(crate) fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}%", value)
    } else {
        format!("{}%", value)
    }
}
