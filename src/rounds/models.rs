use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use tracing::warn;

/// One player's participation in one round, as consumed by the stats engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub player_id: String,
    pub kills: u32,
    pub assists: u32,
    pub deaths: u32,
    pub won_round: bool,
    pub victim_ids: Option<String>, // Encoded list of victim player ids
    pub damage_breakdown: Option<String>, // Encoded {headshots, bodyshots, legshots} mapping
}

impl RoundRecord {
    pub fn new(player_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            ..Self::default()
        }
    }

    pub fn kills(mut self, kills: u32) -> Self {
        self.kills = kills;
        self
    }

    pub fn assists(mut self, assists: u32) -> Self {
        self.assists = assists;
        self
    }

    pub fn deaths(mut self, deaths: u32) -> Self {
        self.deaths = deaths;
        self
    }

    pub fn won(mut self, won_round: bool) -> Self {
        self.won_round = won_round;
        self
    }

    pub fn with_victims(mut self, victim_ids: impl Into<String>) -> Self {
        self.victim_ids = Some(victim_ids.into());
        self
    }

    pub fn with_damage(mut self, damage_breakdown: impl Into<String>) -> Self {
        self.damage_breakdown = Some(damage_breakdown.into());
        self
    }
}

/// Raw `round_data` row, shared by the database reader and the CSV loader
///
/// Every column is nullable here; [`RoundRow::into_record`] applies the
/// defaulting rules and drops rows without a player id.
#[derive(Debug, Clone, Default, FromRow, Deserialize)]
pub struct RoundRow {
    #[serde(default)]
    pub puuid: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub kills: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub assist_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub death_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub player_won_round: Option<bool>,
    #[serde(default)]
    pub kill_victim_puuids: Option<String>,
    #[serde(default)]
    pub damage_done: Option<String>,
}

impl RoundRow {
    pub fn into_record(self) -> Option<RoundRecord> {
        // Whitespace only marks a blank id; the stored id is grouped verbatim
        let Some(player_id) = self.puuid.filter(|id| !id.trim().is_empty()) else {
            warn!("Dropping round row without a player id");
            return None;
        };

        Some(RoundRecord {
            kills: non_negative(self.kills, "kills", &player_id),
            assists: non_negative(self.assist_count, "assist_count", &player_id),
            deaths: non_negative(self.death_count, "death_count", &player_id),
            won_round: self.player_won_round.unwrap_or(false),
            victim_ids: self.kill_victim_puuids,
            damage_breakdown: self.damage_done,
            player_id,
        })
    }
}

fn non_negative(value: Option<i64>, column: &str, player_id: &str) -> u32 {
    let value = value.unwrap_or_default();
    u32::try_from(value).unwrap_or_else(|_| {
        warn!(player_id, column, value, "Out of range count treated as 0");
        0
    })
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(text) = raw.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    if let Ok(value) = text.parse::<i64>() {
        return Ok(Some(value));
    }

    // Columns holding NaN are written by dataframe exports as floats ("3.0")
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Ok(Some(value as i64)),
        _ => Err(D::Error::custom(format!("invalid integer '{}'", text))),
    }
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("True" | "true" | "TRUE" | "1" | "1.0") => Ok(Some(true)),
        Some("False" | "false" | "FALSE" | "0" | "0.0") => Ok(Some(false)),
        Some(other) => Err(D::Error::custom(format!("invalid boolean '{}'", other))),
    }
}
