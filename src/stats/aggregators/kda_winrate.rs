use std::cmp::Reverse;

use super::{div_round, from_hundredths, Grouped};
use crate::rounds::RoundRecord;
use crate::stats::{Aggregator, KdaWinrateRow};

#[derive(Debug, Default)]
struct KdaTotals {
    kills: u64,
    assists: u64,
    deaths: u64,
    rounds_won: u64,
    rounds_played: u64,
}

/// Kill/death/assist ratio and win rate per player, best ratio first
pub struct KdaWinrateAggregator;

impl KdaWinrateAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KdaWinrateAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator for KdaWinrateAggregator {
    type Row = KdaWinrateRow;

    fn aggregate(&self, records: &[RoundRecord]) -> Vec<KdaWinrateRow> {
        let mut totals: Grouped<KdaTotals> = Grouped::default();
        for record in records {
            let entry = totals.entry(&record.player_id);
            entry.kills += u64::from(record.kills);
            entry.assists += u64::from(record.assists);
            entry.deaths += u64::from(record.deaths);
            entry.rounds_won += u64::from(record.won_round);
            entry.rounds_played += 1;
        }

        let mut ranked: Vec<(Option<u64>, KdaWinrateRow)> = totals
            .into_entries()
            .into_iter()
            .map(|(player_id, t)| {
                let kda_hundredths =
                    (t.deaths > 0).then(|| div_round(100 * (t.kills + t.assists), t.deaths));
                let win_rate = div_round(100 * t.rounds_won, t.rounds_played);

                let row = KdaWinrateRow {
                    player_id,
                    total_kills: t.kills,
                    total_assists: t.assists,
                    total_deaths: t.deaths,
                    kda_ratio: kda_hundredths.map(from_hundredths),
                    total_rounds_won: t.rounds_won,
                    total_rounds_played: t.rounds_played,
                    win_rate: format!("{}%", win_rate),
                };
                (kda_hundredths, row)
            })
            .collect();

        // Stable: equal ratios keep first-appearance order, players without deaths go last
        ranked.sort_by_key(|(kda, _)| Reverse(*kda));
        ranked.into_iter().map(|(_, row)| row).collect()
    }

    fn name(&self) -> &'static str {
        "kda_winrate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row_for<'a>(rows: &'a [KdaWinrateRow], player_id: &str) -> &'a KdaWinrateRow {
        rows.iter().find(|row| row.player_id == player_id).unwrap()
    }

    #[test]
    fn sums_rounds_per_player() {
        let records = vec![
            RoundRecord::new("A").kills(4).assists(2).deaths(2).won(true),
            RoundRecord::new("A").kills(1).won(false),
        ];

        let rows = KdaWinrateAggregator::new().aggregate(&records);
        assert_eq!(
            rows,
            vec![KdaWinrateRow {
                player_id: "A".to_string(),
                total_kills: 5,
                total_assists: 2,
                total_deaths: 2,
                kda_ratio: Some(3.5),
                total_rounds_won: 1,
                total_rounds_played: 2,
                win_rate: "50%".to_string(),
            }]
        );
    }

    #[test]
    fn kda_is_none_without_deaths() {
        let records = vec![RoundRecord::new("A").kills(3).assists(1).won(true)];

        let rows = KdaWinrateAggregator::new().aggregate(&records);
        assert_eq!(rows[0].kda_ratio, None);
        assert_eq!(rows[0].win_rate, "100%");
    }

    #[test]
    fn kda_rounds_to_two_decimals() {
        let records = vec![RoundRecord::new("A").kills(1).assists(1).deaths(3)];

        let rows = KdaWinrateAggregator::new().aggregate(&records);
        assert_eq!(rows[0].kda_ratio, Some(0.67));
    }

    #[rstest]
    #[case(1, 3, "33%")]
    #[case(2, 3, "67%")]
    #[case(1, 8, "13%")]
    #[case(0, 4, "0%")]
    fn win_rate_rounds_to_whole_percent(
        #[case] won: usize,
        #[case] played: usize,
        #[case] expected: &str,
    ) {
        let records: Vec<RoundRecord> = (0..played)
            .map(|round| RoundRecord::new("A").won(round < won))
            .collect();

        let rows = KdaWinrateAggregator::new().aggregate(&records);
        assert_eq!(rows[0].win_rate, expected);
        assert_eq!(rows[0].total_rounds_played, played as u64);
    }

    #[test]
    fn orders_by_kda_descending_with_missing_ratios_last() {
        let records = vec![
            RoundRecord::new("deathless").kills(9),
            RoundRecord::new("low").kills(1).deaths(4),
            RoundRecord::new("high").kills(6).deaths(2),
            RoundRecord::new("tied-high").kills(3).deaths(1),
        ];

        let rows = KdaWinrateAggregator::new().aggregate(&records);
        let order: Vec<&str> = rows.iter().map(|row| row.player_id.as_str()).collect();
        assert_eq!(order, vec!["high", "tied-high", "low", "deathless"]);
    }

    #[test]
    fn every_player_appears_exactly_once() {
        let records = vec![
            RoundRecord::new("A").kills(1).deaths(1),
            RoundRecord::new("B").deaths(1),
            RoundRecord::new("A").kills(2).assists(1),
            RoundRecord::new("C"),
            RoundRecord::new("B").won(true),
        ];

        let rows = KdaWinrateAggregator::new().aggregate(&records);
        assert_eq!(rows.len(), 3);
        assert_eq!(row_for(&rows, "A").total_rounds_played, 2);
        assert_eq!(row_for(&rows, "B").total_rounds_won, 1);
        assert_eq!(row_for(&rows, "C").kda_ratio, None);
    }

    #[test]
    fn empty_input_produces_no_rows() {
        assert!(KdaWinrateAggregator::new().aggregate(&[]).is_empty());
    }
}
