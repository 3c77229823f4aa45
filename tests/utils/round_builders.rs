use roundstats::RoundRecord;

// ============================================================================
// Round Setup Utilities
// ============================================================================

pub struct RoundsBuilder {
    rounds: Vec<RoundRecord>,
}

impl RoundsBuilder {
    pub fn new() -> Self {
        Self { rounds: vec![] }
    }

    pub fn round(mut self, record: RoundRecord) -> Self {
        self.rounds.push(record);
        self
    }

    /// Three players over three rounds, with one malformed damage entry
    pub fn with_small_match(self) -> Self {
        self.round(
            RoundRecord::new("alice")
                .kills(2)
                .assists(1)
                .won(true)
                .with_victims("['bob', 'carol']")
                .with_damage("{'headshots': 2, 'bodyshots': 2, 'legshots': 0}"),
        )
        .round(
            RoundRecord::new("bob")
                .kills(1)
                .deaths(1)
                .won(false)
                .with_victims("['alice']")
                .with_damage("{'headshots': 0, 'bodyshots': 3, 'legshots': 1}"),
        )
        .round(
            RoundRecord::new("carol")
                .assists(2)
                .deaths(1)
                .won(true)
                .with_damage("{'headshots': oops"),
        )
        .round(
            RoundRecord::new("alice")
                .kills(1)
                .deaths(1)
                .won(false)
                .with_victims("['bob']")
                .with_damage("{'headshots': 1, 'bodyshots': 0, 'legshots': 1}"),
        )
    }

    pub fn build(self) -> Vec<RoundRecord> {
        self.rounds
    }
}
