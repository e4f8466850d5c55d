use std::cmp::Ordering;
use std::collections::HashSet;

use itertools::Itertools;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::cards::{Card, Rank, Suit, standard_deck};

pub const DEFAULT_TRIALS: u32 = 3000;
pub const DEFAULT_SEED: u64 = 7;

/// Input rejected before any simulation starts. Non-retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("hero must hold exactly 2 cards, got {0}")]
    HoleCardCount(usize),
    #[error("board must have 0, 3, 4 or 5 cards, got {0}")]
    BoardLength(usize),
    #[error("card '{}' appears more than once", .0.notation())]
    DuplicateCard(Card),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// Total order over 5-card hands: category first, then kicker ranks
/// high-to-low. Greater means stronger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandStrength {
    pub category: HandCategory,
    pub ranks: [u8; 5],
}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.ranks.cmp(&other.ranks))
    }
}

fn tiebreak(mut values: Vec<u8>) -> [u8; 5] {
    values.resize(5, 0);
    [values[0], values[1], values[2], values[3], values[4]]
}

/// Ranks that appear exactly once, highest first (groups are pre-sorted).
fn single_ranks(groups: &[(u8, u8)]) -> Vec<u8> {
    groups
        .iter()
        .filter(|(count, _)| *count == 1)
        .map(|(_, rank)| *rank)
        .collect()
}

fn suit_index(suit: Suit) -> usize {
    match suit {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

/// Highest straight top card present in the rank bitmask, if any.
fn straight_high(mask: u32) -> Option<u8> {
    for high in (5u8..=14).rev() {
        let needed: u32 = (0..5u8).map(|i| 1 << (high - i) as u32).sum();
        if mask & needed == needed {
            return Some(high);
        }
    }
    None
}

fn evaluate_five(cards: &[Card; 5]) -> HandStrength {
    let mut counts = [0u8; 15];
    let mut suits = [0u8; 4];
    for card in cards {
        counts[card.rank_value() as usize] += 1;
        suits[suit_index(card.suit)] += 1;
    }

    let mut descending: Vec<u8> = cards.iter().map(|c| c.rank_value()).collect();
    descending.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = suits.contains(&5);

    let mut mask: u32 = 0;
    for rank_value in 2u8..=14 {
        if counts[rank_value as usize] > 0 {
            mask |= 1 << rank_value as u32;
            if rank_value == Rank::Ace.value() {
                mask |= 1 << 1; // Ace-low straight support
            }
        }
    }
    let straight = straight_high(mask);

    // (count, rank) pairs, largest group first, then highest rank.
    let mut groups: Vec<(u8, u8)> = (2u8..=14)
        .filter(|rank| counts[*rank as usize] > 0)
        .map(|rank| (counts[rank as usize], rank))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    if is_flush && let Some(high) = straight {
        return HandStrength {
            category: HandCategory::StraightFlush,
            ranks: tiebreak(vec![high, high - 1, high - 2, high - 3, high - 4]),
        };
    }

    if let Some(&(count, rank)) = groups.first() {
        match count {
            4 => {
                let kicker = single_ranks(&groups).first().copied().unwrap_or(0);
                return HandStrength {
                    category: HandCategory::FourOfAKind,
                    ranks: tiebreak(vec![rank, kicker]),
                };
            }
            3 if groups.get(1).is_some_and(|(c, _)| *c == 2) => {
                return HandStrength {
                    category: HandCategory::FullHouse,
                    ranks: tiebreak(vec![rank, groups[1].1]),
                };
            }
            _ => {}
        }
    }

    if is_flush {
        return HandStrength {
            category: HandCategory::Flush,
            ranks: tiebreak(descending),
        };
    }

    if let Some(high) = straight {
        return HandStrength {
            category: HandCategory::Straight,
            ranks: tiebreak(vec![high, high - 1, high - 2, high - 3, high - 4]),
        };
    }

    if let Some(&(count, rank)) = groups.first() {
        match count {
            3 => {
                let mut values = vec![rank];
                values.extend(single_ranks(&groups));
                return HandStrength {
                    category: HandCategory::ThreeOfAKind,
                    ranks: tiebreak(values),
                };
            }
            2 => {
                if groups.get(1).is_some_and(|(c, _)| *c == 2) {
                    let kicker = single_ranks(&groups).first().copied().unwrap_or(0);
                    return HandStrength {
                        category: HandCategory::TwoPair,
                        ranks: tiebreak(vec![rank, groups[1].1, kicker]),
                    };
                }
                let mut values = vec![rank];
                values.extend(single_ranks(&groups));
                return HandStrength {
                    category: HandCategory::OnePair,
                    ranks: tiebreak(values),
                };
            }
            _ => {}
        }
    }

    HandStrength {
        category: HandCategory::HighCard,
        ranks: tiebreak(descending),
    }
}

/// Strongest 5-card hand pickable from 5 to 7 cards.
pub fn best_five_card_hand(cards: &[Card]) -> HandStrength {
    assert!(cards.len() >= 5, "at least 5 cards required");
    cards
        .iter()
        .copied()
        .combinations(5)
        .map(|combo| {
            let five = [combo[0], combo[1], combo[2], combo[3], combo[4]];
            evaluate_five(&five)
        })
        .max()
        .expect("combinations non-empty")
}

fn candidate_pool(dead: &HashSet<Card>) -> Vec<Card> {
    let mut pool = standard_deck();
    pool.retain(|card| !dead.contains(card));
    pool
}

fn check_inputs(hero: &[Card], board: &[Card]) -> Result<(), InputError> {
    if hero.len() != 2 {
        return Err(InputError::HoleCardCount(hero.len()));
    }
    if !matches!(board.len(), 0 | 3 | 4 | 5) {
        return Err(InputError::BoardLength(board.len()));
    }
    let mut seen = HashSet::with_capacity(hero.len() + board.len());
    for card in hero.iter().chain(board) {
        if !seen.insert(*card) {
            return Err(InputError::DuplicateCard(*card));
        }
    }
    Ok(())
}

/// Monte Carlo equity of hero's hand versus one unknown rival hand:
/// P(win) + 0.5·P(tie) over `trials` independent showdown samples.
///
/// `dead` is the caller-assembled exclusion set (hero and board cards at
/// minimum); no sampled rival card or runout card will come from it. The
/// same seed and inputs always reproduce the same estimate: every call
/// drives all trials from one `StdRng` seeded with `seed`, and each trial
/// rebuilds the candidate pool from scratch so exclusions cannot leak
/// between trials.
pub fn estimate(
    hero: &[Card],
    board: &[Card],
    dead: &HashSet<Card>,
    trials: u32,
    seed: u64,
) -> Result<f32, InputError> {
    check_inputs(hero, board)?;

    let trials = trials.max(1);
    let runout_len = 5 - board.len();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut wins = 0u32;
    let mut ties = 0u32;

    for _ in 0..trials {
        let mut pool = candidate_pool(dead);
        pool.shuffle(&mut rng);

        let rival = [
            pool.pop().expect("pool has cards"),
            pool.pop().expect("pool has cards"),
        ];

        let mut runout = board.to_vec();
        for _ in 0..runout_len {
            runout.push(pool.pop().expect("pool has cards"));
        }

        let hero_seven: Vec<Card> = hero.iter().chain(&runout).copied().collect();
        let rival_seven: Vec<Card> = rival.iter().chain(&runout).copied().collect();

        match best_five_card_hand(&hero_seven).cmp(&best_five_card_hand(&rival_seven)) {
            Ordering::Greater => wins += 1,
            Ordering::Equal => ties += 1,
            Ordering::Less => {}
        }
    }

    Ok((wins as f32 + 0.5 * ties as f32) / trials as f32)
}
