use holdem_engine::engine::Engine;
use holdem_engine::game::{Phase, TableConfig};
use holdem_engine::player::{PlayerAction as A, PlayerStatus};

/// A 100-chip stack shoves pre-flop against two 500-chip stacks that keep
/// betting: the short stack contests only the main pot.
fn shoved_table(seed: u64) -> Engine {
    let mut eng = Engine::new(TableConfig::default(), Some(seed));
    eng.add_player("short", 100).unwrap();
    eng.add_player("mid", 500).unwrap();
    eng.add_player("deep", 500).unwrap();
    eng.start_new_hand().unwrap();

    eng.process_action(0, A::AllIn).unwrap();
    eng.process_action(1, A::Call).unwrap();
    eng.process_action(2, A::Call).unwrap();
    eng
}

#[test]
fn allin_for_less_layers_main_and_side_pot() {
    let mut eng = shoved_table(101);
    assert_eq!(eng.phase(), Phase::Flop);
    assert_eq!(eng.players()[0].status(), PlayerStatus::AllIn);

    // The covering stacks keep betting into a side pot the shover cannot win.
    eng.process_action(1, A::Bet(200)).unwrap();
    let view = eng.process_action(2, A::Call).unwrap();

    assert_eq!(view.phase, Phase::Turn);
    assert_eq!(view.pots.len(), 2);
    assert_eq!(view.pots[0].amount, 300);
    assert_eq!(view.pots[0].eligible, vec![0, 1, 2]);
    assert_eq!(view.pots[1].amount, 400);
    assert_eq!(view.pots[1].eligible, vec![1, 2]);
}

#[test]
fn allin_runout_reaches_showdown_and_conserves_chips() {
    let mut eng = shoved_table(103);
    eng.process_action(1, A::Check).unwrap();
    eng.process_action(2, A::Check).unwrap();
    for _ in 0..2 {
        eng.process_action(1, A::Check).unwrap();
        eng.process_action(2, A::Check).unwrap();
    }

    let view = eng.view();
    assert_eq!(view.phase, Phase::HandComplete);
    assert_eq!(view.community_cards.len(), 5);
    let payouts = view.payouts.as_ref().unwrap();
    assert_eq!(payouts.values().sum::<u32>(), 300);
    let stacks: u32 = view.players.iter().map(|p| p.stack).sum();
    assert_eq!(stacks, 1100);

    // Showdown reveals every contender's hole cards.
    assert!(view
        .players
        .iter()
        .all(|p| p.hole_cards.is_some()));
}

#[test]
fn everyone_allin_runs_the_board_out_immediately() {
    let mut eng = Engine::new(TableConfig::default(), Some(107));
    eng.add_player("alice", 80).unwrap();
    eng.add_player("bob", 120).unwrap();
    eng.start_new_hand().unwrap();

    eng.process_action(0, A::AllIn).unwrap();
    let view = eng.process_action(1, A::Call).unwrap();

    assert_eq!(view.phase, Phase::HandComplete);
    assert_eq!(view.community_cards.len(), 5, "board runs out with no betting left");
    let stacks: u32 = view.players.iter().map(|p| p.stack).sum();
    assert_eq!(stacks, 200);
    // Bob's uncovered 40 never left the stack; only 160 was contested.
    let payouts = view.payouts.as_ref().unwrap();
    assert_eq!(payouts.values().sum::<u32>(), 160);
    assert!(view.players[1].stack >= 40);
}

#[test]
fn short_big_blind_posts_all_of_it_without_lowering_the_bet() {
    let config = TableConfig {
        small_blind: 5,
        big_blind: 10,
        ..TableConfig::default()
    };
    let mut eng = Engine::new(config, Some(113));
    eng.add_player("alice", 100).unwrap();
    eng.add_player("bob", 100).unwrap();
    eng.add_player("carol", 3).unwrap();
    eng.start_new_hand().unwrap();

    // Carol's big blind covers only 3 of the 10: she is all-in, yet the
    // street still plays at the full big blind.
    assert_eq!(eng.players()[2].status(), PlayerStatus::AllIn);
    assert_eq!(eng.players()[2].street_bet(), 3);
    assert_eq!(eng.view().current_bet, 10);

    eng.process_action(0, A::Call).unwrap();
    let view = eng.process_action(1, A::Call).unwrap();
    assert_eq!(view.phase, Phase::Flop);
    assert_eq!(view.pots.len(), 2);
    assert_eq!(view.pots[0].amount, 9);
    assert_eq!(view.pots[0].eligible, vec![0, 1, 2]);
    assert_eq!(view.pots[1].amount, 14);
    assert_eq!(view.pots[1].eligible, vec![0, 1]);
    let chips: u32 = view.players.iter().map(|p| p.stack).sum::<u32>() + view.pot_total;
    assert_eq!(chips, 203);
}

#[test]
fn busted_seat_sits_out_the_next_hand() {
    let mut eng = Engine::new(TableConfig::default(), Some(109));
    eng.add_player("alice", 100).unwrap();
    eng.add_player("broke", 0).unwrap();
    eng.add_player("carol", 100).unwrap();
    eng.start_new_hand().unwrap();

    assert_eq!(eng.players()[1].status(), PlayerStatus::SittingOut);
    assert_eq!(eng.players()[1].hole_cards(), [None, None]);
    // Blind seats skip the empty stack.
    let view = eng.view();
    assert_eq!(view.players[1].street_bet, 0);
}
