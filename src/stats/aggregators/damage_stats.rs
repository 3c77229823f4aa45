use super::{format_percent, round_hundredths, Grouped};
use crate::rounds::RoundRecord;
use crate::stats::{
    decoder::{damage_of, DamageBreakdown},
    Aggregator, DamageStatsRow,
};

/// Headshot accuracy per player and its percentile among all players
pub struct DamageStatsAggregator;

impl DamageStatsAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DamageStatsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator for DamageStatsAggregator {
    type Row = DamageStatsRow;

    fn aggregate(&self, records: &[RoundRecord]) -> Vec<DamageStatsRow> {
        let mut shots: Grouped<DamageBreakdown> = Grouped::default();
        for record in records {
            if let Some(breakdown) = damage_of(record) {
                shots.entry(&record.player_id).add(&breakdown);
            }
        }

        let totals = shots.into_entries();
        let accuracies: Vec<f64> = totals
            .iter()
            .map(|(_, breakdown)| headshot_accuracy(breakdown))
            .collect();
        let percentiles = percentile_ranks(&accuracies);

        totals
            .into_iter()
            .zip(accuracies)
            .zip(percentiles)
            .map(|(((player_id, breakdown), accuracy), percentile)| DamageStatsRow {
                player_id,
                headshots: breakdown.headshots,
                bodyshots: breakdown.bodyshots,
                legshots: breakdown.legshots,
                headshot_accuracy: accuracy,
                accuracy_percentile: format_percent(percentile),
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "damage_stats"
    }
}

/// Headshot share of all shots as a percentage rounded to two decimals; 0 when nothing landed
fn headshot_accuracy(breakdown: &DamageBreakdown) -> f64 {
    match breakdown.total_shots() {
        0 => 0.0,
        total => round_hundredths(breakdown.headshots as f64 / total as f64 * 100.0),
    }
}

/// Percentile rank of each value as a percentage rounded to two decimals
///
/// Ties share the average of the ranks they span, so the rank of a value is
/// `(first + last) / 2` over its 1-based positions in sorted order, and the
/// percentile is that rank divided by the number of values.
fn percentile_ranks(values: &[f64]) -> Vec<f64> {
    let count = values.len() as f64;
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let value = values[order[start]];
        let end = start + order[start..].iter().take_while(|&&i| values[i] == value).count();

        let average_rank = (start + 1 + end) as f64 / 2.0;
        for &i in &order[start..end] {
            ranks[i] = round_hundredths(average_rank / count * 100.0);
        }
        start = end;
    }
    ranks
}
