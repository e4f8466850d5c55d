use holdem_advisor::opponent::{OpponentModel, OpponentStats, default_fold_prob};

#[test]
fn model_outputs_are_clamped() {
    let wild = OpponentStats {
        hands: 200,
        vpip: 200,
        pfr: 200,
        postflop_bets: 500,
        postflop_calls: 1,
        postflop_folds: 0,
    };
    let model = OpponentModel::new(wild);

    assert!((0.0..=1.0).contains(&model.preflop_tightness()));
    assert!((0.0..=1.0).contains(&model.fold_to_bet_postflop()));
    assert!((0.0..=1.0).contains(&model.bluffiness()));
}

#[test]
fn looser_opponents_read_as_less_tight() {
    let tight = OpponentModel::new(OpponentStats {
        hands: 100,
        vpip: 35,
        ..OpponentStats::default()
    });
    let loose = OpponentModel::new(OpponentStats {
        hands: 100,
        vpip: 85,
        ..OpponentStats::default()
    });
    assert!(tight.preflop_tightness() > loose.preflop_tightness());
}

#[test]
fn small_samples_fall_back_to_the_prior() {
    let few_hands = OpponentModel::new(OpponentStats {
        hands: 3,
        vpip: 3,
        postflop_folds: 3,
        ..OpponentStats::default()
    });
    // Tightness uses the assumed 0.6 VPIP under 10 hands.
    assert!((few_hands.preflop_tightness() - 0.5).abs() < 1e-6);
    // Fold rate stays near the 0.35 prior with only 3 observed hands.
    let fold = few_hands.fold_to_bet_postflop();
    assert!((0.3..=0.45).contains(&fold), "fold={fold}");
}

#[test]
fn default_fold_prob_is_the_prior() {
    assert!((default_fold_prob() - 0.35).abs() < 1e-6);
}
