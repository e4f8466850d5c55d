use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub const MIN_FOLD_PROB: f32 = 0.05;
pub const MAX_FOLD_PROB: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Fold,
    Call,
    Raise,
}

impl Action {
    /// Fixed priority order; EV ties resolve to the earliest entry.
    pub const ALL: [Action; 3] = [Action::Fold, Action::Call, Action::Raise];

    pub fn label(self) -> &'static str {
        match self {
            Action::Fold => "FOLD",
            Action::Call => "CALL",
            Action::Raise => "RAISE",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Expected value of each available action, in the same currency as the pot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionEvs {
    pub fold: f32,
    pub call: f32,
    pub raise: f32,
}

impl ActionEvs {
    pub fn get(&self, action: Action) -> f32 {
        match action {
            Action::Fold => self.fold,
            Action::Call => self.call,
            Action::Raise => self.raise,
        }
    }

    /// Highest-EV action. Scans `Action::ALL` keeping only strictly greater
    /// values, so exact ties fall to the more conservative action
    /// (Fold < Call < Raise).
    pub fn best(&self) -> Action {
        let mut best = Action::Fold;
        for action in Action::ALL {
            if self.get(action) > self.get(best) {
                best = action;
            }
        }
        best
    }
}

pub fn ev_fold() -> f32 {
    0.0
}

/// EV of calling `call_amount` into `pot`. The pot already includes the
/// rival's wager: calling risks `call_amount` to win `pot + call_amount`.
pub fn ev_call(pot: f32, call_amount: f32, equity: f32) -> f32 {
    equity * (pot + call_amount) - (1.0 - equity) * call_amount
}

/// EV of raising `raise_amount`, two-branch model: the rival folds with
/// `fold_prob` (hero wins the pot outright) or calls (the pot grows by
/// `2 * raise_amount` and hero risks `raise_amount` at showdown equity).
/// `fold_prob` is clamped to [0.05, 0.95]; the rival is never certain to
/// fold nor certain to continue.
pub fn ev_raise(pot: f32, raise_amount: f32, equity: f32, fold_prob: f32) -> f32 {
    let fold_prob = fold_prob.clamp(MIN_FOLD_PROB, MAX_FOLD_PROB);
    let called = equity * (pot + 2.0 * raise_amount) - (1.0 - equity) * raise_amount;
    fold_prob * pot + (1.0 - fold_prob) * called
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_is_always_zero() {
        assert_eq!(ev_fold(), 0.0);
    }

    #[test]
    fn call_formula_is_exact() {
        assert_eq!(ev_call(10.0, 5.0, 0.6), 7.0);
    }

    #[test]
    fn raise_formula_is_exact() {
        // 0.35 * 10 + 0.65 * (0.6 * 40 - 0.4 * 15) = 15.2
        let ev = ev_raise(10.0, 15.0, 0.6, 0.35);
        assert!((ev - 15.2).abs() < 1e-5, "ev={ev}");
    }

    #[test]
    fn fold_prob_is_clamped() {
        let certain_fold = ev_raise(10.0, 15.0, 0.0, 1.0);
        let clamped = ev_raise(10.0, 15.0, 0.0, MAX_FOLD_PROB);
        assert_eq!(certain_fold, clamped);

        let never_folds = ev_raise(10.0, 15.0, 0.5, 0.0);
        assert_eq!(never_folds, ev_raise(10.0, 15.0, 0.5, MIN_FOLD_PROB));
    }

    #[test]
    fn ties_resolve_toward_conservative_action() {
        let all_equal = ActionEvs {
            fold: 0.0,
            call: 0.0,
            raise: 0.0,
        };
        assert_eq!(all_equal.best(), Action::Fold);

        let call_raise_tied = ActionEvs {
            fold: 0.0,
            call: 3.5,
            raise: 3.5,
        };
        assert_eq!(call_raise_tied.best(), Action::Call);
    }

    #[test]
    fn best_picks_strict_maximum() {
        let evs = ActionEvs {
            fold: 0.0,
            call: 2.0,
            raise: 6.5,
        };
        assert_eq!(evs.best(), Action::Raise);
    }
}
