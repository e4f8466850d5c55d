use std::collections::HashSet;

use holdem_advisor::cards::{Card, parse_cards};
use holdem_advisor::equity::{HandCategory, best_five_card_hand, estimate};

fn dead_set(hero: &[Card], board: &[Card]) -> HashSet<Card> {
    hero.iter().chain(board).copied().collect()
}

#[test]
fn quads_outrank_full_house_in_seven_cards() {
    let cards = parse_cards("9c 9d 9h 9s Ac Ah 5c").unwrap();
    let strength = best_five_card_hand(&cards);
    assert_eq!(strength.category, HandCategory::FourOfAKind);
    assert_eq!(strength.ranks[0], 9);
}

#[test]
fn same_inputs_and_seed_reproduce_the_estimate() {
    let hero = parse_cards("As Ks").unwrap();
    let board = parse_cards("Qh 7d 2c").unwrap();
    let dead = dead_set(&hero, &board);

    let first = estimate(&hero, &board, &dead, 2_000, 7).unwrap();
    let second = estimate(&hero, &board, &dead, 2_000, 7).unwrap();
    assert_eq!(first, second);
}

#[test]
fn estimates_stay_in_unit_range() {
    let hero = parse_cards("7d 2c").unwrap();
    let dead = dead_set(&hero, &[]);
    let equity = estimate(&hero, &[], &dead, 1_500, 3).unwrap();
    assert!((0.0..=1.0).contains(&equity), "equity={equity}");
}

#[test]
fn pocket_aces_preflop_equity_converges() {
    let hero = parse_cards("As Ah").unwrap();
    let dead = dead_set(&hero, &[]);
    let equity = estimate(&hero, &[], &dead, 20_000, 7).unwrap();
    // AA vs a random hand is ~85% including ties.
    assert!((0.83..=0.87).contains(&equity), "equity={equity}");
}

#[test]
fn locked_win_on_complete_board_is_exactly_one() {
    // Quad aces with no straight flush available to the rival.
    let hero = parse_cards("As Ah").unwrap();
    let board = parse_cards("Ac Ad 9s 7c 2h").unwrap();
    let dead = dead_set(&hero, &board);
    let equity = estimate(&hero, &board, &dead, 500, 11).unwrap();
    assert_eq!(equity, 1.0);
}

#[test]
fn board_that_plays_for_both_is_exactly_half() {
    // Royal flush on the board: every showdown is a split.
    let hero = parse_cards("2c 3d").unwrap();
    let board = parse_cards("Ts Js Qs Ks As").unwrap();
    let dead = dead_set(&hero, &board);
    let equity = estimate(&hero, &board, &dead, 500, 11).unwrap();
    assert_eq!(equity, 0.5);
}

#[test]
fn higher_trial_counts_stay_consistent() {
    let hero = parse_cards("Qh Qd").unwrap();
    let dead = dead_set(&hero, &[]);
    let coarse = estimate(&hero, &[], &dead, 1_000, 7).unwrap();
    let fine = estimate(&hero, &[], &dead, 10_000, 7).unwrap();
    // QQ vs random is ~80%; both samples should agree within MC noise.
    assert!((coarse - fine).abs() < 0.05, "coarse={coarse} fine={fine}");
}
