/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Maximum number of cards a unit may hold. Draws past the limit are discarded.
    pub hand_limit: usize,

    /// Cards drawn by every unit when the battle starts.
    pub opening_hand: usize,

    /// Cards drawn by every unit at the start of each round.
    pub draw_per_round: usize,

    /// Light (activation pool) restored to every unit at the start of each round.
    pub light_regen: u32,

    /// When enabled, attack dice deal their HP damage as composure damage too.
    pub attacks_stagger: bool,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_DICE_PER_CARD: usize = 8;
    pub const MAX_SLOTS_PER_UNIT: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HAND_LIMIT: usize = 9;
    pub const DEFAULT_OPENING_HAND: usize = 3;
    pub const DEFAULT_DRAW_PER_ROUND: usize = 1;
    pub const DEFAULT_LIGHT_REGEN: u32 = 1;

    pub fn new() -> Self {
        Self {
            hand_limit: Self::DEFAULT_HAND_LIMIT,
            opening_hand: Self::DEFAULT_OPENING_HAND,
            draw_per_round: Self::DEFAULT_DRAW_PER_ROUND,
            light_regen: Self::DEFAULT_LIGHT_REGEN,
            attacks_stagger: false,
        }
    }

    pub fn with_hand_limit(mut self, hand_limit: usize) -> Self {
        self.hand_limit = hand_limit;
        self
    }

    pub fn with_attacks_stagger(mut self, enabled: bool) -> Self {
        self.attacks_stagger = enabled;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
