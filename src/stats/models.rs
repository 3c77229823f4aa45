use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KdaWinrateRow {
    pub player_id: String,
    pub total_kills: u64,
    pub total_assists: u64,
    pub total_deaths: u64,
    pub kda_ratio: Option<f64>, // None when the player never died
    pub total_rounds_won: u64,
    pub total_rounds_played: u64,
    pub win_rate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopVictimsRow {
    pub player_id: String,
    pub top1_victim: String,
    pub top2_victim: String,
    pub top3_victim: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageStatsRow {
    pub player_id: String,
    pub headshots: u64,
    pub bodyshots: u64,
    pub legshots: u64,
    pub headshot_accuracy: f64,
    pub accuracy_percentile: String,
}
