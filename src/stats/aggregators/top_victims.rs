use std::cmp::Reverse;

use super::Grouped;
use crate::rounds::RoundRecord;
use crate::stats::{decoder::victims_of, Aggregator, TopVictimsRow};

/// Placeholder for an unfilled victim slot
pub const NO_VICTIM: &str = "N/A";

const TOP_VICTIM_SLOTS: usize = 3;

/// The three players each killer has eliminated most often
pub struct TopVictimsAggregator;

impl TopVictimsAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TopVictimsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator for TopVictimsAggregator {
    type Row = TopVictimsRow;

    fn aggregate(&self, records: &[RoundRecord]) -> Vec<TopVictimsRow> {
        let mut kill_counts: Grouped<Grouped<u64>> = Grouped::default();
        for record in records {
            let victims = victims_of(record);
            if victims.is_empty() {
                continue;
            }

            let counts = kill_counts.entry(&record.player_id);
            for victim in &victims {
                *counts.entry(victim) += 1;
            }
        }

        kill_counts
            .into_entries()
            .into_iter()
            .map(|(killer, counts)| {
                let mut ranked = counts.into_entries();
                // Stable: equal counts keep the order victims were first killed
                ranked.sort_by_key(|(_, count)| Reverse(*count));

                let mut slots = ranked
                    .into_iter()
                    .map(|(victim, _)| victim)
                    .chain(std::iter::repeat_with(|| NO_VICTIM.to_string()))
                    .take(TOP_VICTIM_SLOTS);

                TopVictimsRow {
                    player_id: killer,
                    top1_victim: slots.next().unwrap_or_default(),
                    top2_victim: slots.next().unwrap_or_default(),
                    top3_victim: slots.next().unwrap_or_default(),
                }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "top_victims"
    }
}
