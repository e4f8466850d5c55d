use serde::{Deserialize, Serialize};

/// Raw action counters observed for one rival over a session.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OpponentStats {
    pub hands: u32,
    pub vpip: u32,
    pub pfr: u32,
    pub postflop_bets: u32,
    pub postflop_calls: u32,
    pub postflop_folds: u32,
}

impl OpponentStats {
    pub fn vpip_rate(&self) -> f32 {
        if self.hands == 0 {
            0.0
        } else {
            self.vpip as f32 / self.hands as f32
        }
    }

    pub fn pfr_rate(&self) -> f32 {
        if self.hands == 0 {
            0.0
        } else {
            self.pfr as f32 / self.hands as f32
        }
    }

    pub fn aggression_factor(&self) -> f32 {
        self.postflop_bets as f32 / self.postflop_calls.max(1) as f32
    }

    pub fn fold_rate_postflop(&self) -> f32 {
        let denom = self.postflop_bets + self.postflop_calls + self.postflop_folds;
        if denom == 0 {
            0.0
        } else {
            self.postflop_folds as f32 / denom as f32
        }
    }
}

const VPIP_LOOSE: f32 = 0.9;
const VPIP_TIGHT: f32 = 0.3;
const VPIP_DEFAULT: f32 = 0.6;
const VPIP_MIN_SAMPLE: u32 = 10;

const POSTFLOP_FOLD_PRIOR: f32 = 0.35;
const POSTFLOP_FULL_WEIGHT_HANDS: f32 = 50.0;

const AF_FLOOR: f32 = 0.5;
const AF_CEIL: f32 = 4.0;

/// Translates observed counters into crude tendency estimates. Pure
/// functions of the stats with fixed clamping ranges; no learning loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpponentModel {
    stats: OpponentStats,
}

impl OpponentModel {
    pub fn new(stats: OpponentStats) -> Self {
        Self { stats }
    }

    /// Preflop tightness in [0, 1], 1 = very tight. VPIP is clamped to the
    /// typical heads-up range [0.3, 0.9] (0.6 assumed under 10 observed
    /// hands) and mapped so 0.9 -> 0.0 and 0.3 -> 1.0.
    pub fn preflop_tightness(&self) -> f32 {
        let vpip = if self.stats.hands >= VPIP_MIN_SAMPLE {
            self.stats.vpip_rate()
        } else {
            VPIP_DEFAULT
        };
        let clamped = vpip.clamp(VPIP_TIGHT, VPIP_LOOSE);
        (VPIP_LOOSE - clamped) / (VPIP_LOOSE - VPIP_TIGHT)
    }

    /// Postflop fold tendency: observed fold rate blended with a 0.35
    /// prior, weighted up to full trust at 50 observed hands.
    pub fn fold_to_bet_postflop(&self) -> f32 {
        let weight = (self.stats.hands as f32 / POSTFLOP_FULL_WEIGHT_HANDS).min(1.0);
        (1.0 - weight) * POSTFLOP_FOLD_PRIOR + weight * self.stats.fold_rate_postflop()
    }

    /// Bluff tendency in [0, 1] from the aggression factor, clamped to the
    /// heads-up range [0.5, 4.0].
    pub fn bluffiness(&self) -> f32 {
        let af = self.stats.aggression_factor().clamp(AF_FLOOR, AF_CEIL);
        (af - AF_FLOOR) / (AF_CEIL - AF_FLOOR)
    }
}

/// Fold probability assumed when the caller supplies none: the postflop
/// prior of a model with no observations.
pub fn default_fold_prob() -> f32 {
    OpponentModel::default().fold_to_bet_postflop()
}
