use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::Card;
use crate::equity::{self, InputError};
use crate::ev::{Action, ActionEvs, ev_call, ev_fold, ev_raise};

/// One decision point: hero's cards, the revealed board, and the price of
/// each action. `pot` already includes the rival's wager.
#[derive(Debug, Clone)]
pub struct Situation {
    pub hero: Vec<Card>,
    pub board: Vec<Card>,
    pub pot: f32,
    pub call_amount: f32,
    pub raise_amount: f32,
    pub fold_prob: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct AdvisorConfig {
    pub trials: u32,
    pub seed: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            trials: equity::DEFAULT_TRIALS,
            seed: equity::DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdviceError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("{name} must be a non-negative amount, got {value}")]
    BadAmount { name: &'static str, value: f32 },
}

/// What the front ends display: the equity estimate, the EV of each action,
/// and the highest-EV recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub equity: f32,
    pub evs: ActionEvs,
    pub recommended: Action,
}

fn check_amount(name: &'static str, value: f32) -> Result<(), AdviceError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AdviceError::BadAmount { name, value })
    }
}

/// Runs the full decision pipeline: validate the betting amounts, estimate
/// equity with hero and board cards dead, price the three actions, pick the
/// best. Deterministic for a fixed situation and config.
pub fn advise(situation: &Situation, config: &AdvisorConfig) -> Result<Advice, AdviceError> {
    check_amount("pot", situation.pot)?;
    check_amount("call amount", situation.call_amount)?;
    check_amount("raise amount", situation.raise_amount)?;

    let dead: HashSet<Card> = situation
        .hero
        .iter()
        .chain(&situation.board)
        .copied()
        .collect();

    let equity = equity::estimate(
        &situation.hero,
        &situation.board,
        &dead,
        config.trials,
        config.seed,
    )?;

    let evs = ActionEvs {
        fold: ev_fold(),
        call: ev_call(situation.pot, situation.call_amount, equity),
        raise: ev_raise(
            situation.pot,
            situation.raise_amount,
            equity,
            situation.fold_prob,
        ),
    };

    Ok(Advice {
        equity,
        evs,
        recommended: evs.best(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn spot() -> Situation {
        Situation {
            hero: parse_cards("As Ks").unwrap(),
            board: vec![],
            pot: 10.0,
            call_amount: 5.0,
            raise_amount: 15.0,
            fold_prob: 0.35,
        }
    }

    #[test]
    fn negative_pot_rejected_before_simulation() {
        let mut situation = spot();
        situation.pot = -1.0;
        let err = advise(&situation, &AdvisorConfig::default()).unwrap_err();
        assert!(matches!(err, AdviceError::BadAmount { name: "pot", .. }));
    }

    #[test]
    fn hole_card_count_propagates() {
        let mut situation = spot();
        situation.hero.pop();
        let err = advise(&situation, &AdvisorConfig::default()).unwrap_err();
        assert_eq!(err, AdviceError::Input(InputError::HoleCardCount(1)));
    }

    #[test]
    fn recommendation_matches_ev_argmax() {
        let config = AdvisorConfig {
            trials: 400,
            seed: 7,
        };
        let advice = advise(&spot(), &config).unwrap();
        assert_eq!(advice.recommended, advice.evs.best());
        assert!((0.0..=1.0).contains(&advice.equity));
    }
}
