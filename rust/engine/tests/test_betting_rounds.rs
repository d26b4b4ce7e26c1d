use holdem_engine::engine::Engine;
use holdem_engine::errors::GameError;
use holdem_engine::game::{Phase, TableConfig};
use holdem_engine::player::PlayerAction as A;

fn table(seed: u64) -> Engine {
    let config = TableConfig {
        small_blind: 5,
        big_blind: 10,
        ..TableConfig::default()
    };
    let mut eng = Engine::new(config, Some(seed));
    eng.add_player("alice", 1000).unwrap();
    eng.add_player("bob", 1000).unwrap();
    eng.add_player("carol", 1000).unwrap();
    eng.start_new_hand().unwrap();
    eng
}

#[test]
fn raise_below_minimum_is_rejected_with_legal_actions() {
    let mut eng = table(7);
    eng.process_action(0, A::Raise(30)).unwrap();

    // Increment was 20, so the next raise must reach 50.
    let rejected = eng.process_action(1, A::Raise(45)).unwrap_err();
    assert_eq!(
        rejected.kind,
        GameError::IllegalBetAmount {
            amount: 45,
            minimum: 50,
            maximum: 1000
        }
    );
    let legal = rejected.legal.expect("rejection carries the legal options");
    assert_eq!(legal.raise, Some((50, 1000)));
    assert_eq!(legal.call, Some(25));

    // State is untouched: the corrected raise still works.
    let view = eng.process_action(1, A::Raise(50)).unwrap();
    assert_eq!(view.current_bet, 50);
    assert_eq!(view.min_raise, 20);
}

#[test]
fn acting_out_of_turn_is_rejected() {
    let mut eng = table(13);
    let rejected = eng.process_action(2, A::Call).unwrap_err();
    assert_eq!(
        rejected.kind,
        GameError::NotPlayersTurn {
            expected: 0,
            actual: 2
        }
    );
    // The table still waits on the same seat.
    assert_eq!(eng.to_act(), Some(0));
}

#[test]
fn rejected_action_leaves_state_unchanged() {
    let mut eng = table(17);
    let before = eng.view();
    let rejected = eng.process_action(0, A::Check).unwrap_err();
    assert!(matches!(
        rejected.kind,
        GameError::InvalidActionForPhase { .. }
    ));
    assert!(!rejected.kind.is_defect(), "rule violations are retryable");
    assert_eq!(eng.view(), before);
}

#[test]
fn big_blind_gets_the_option_after_calls() {
    let mut eng = table(19);
    eng.process_action(0, A::Call).unwrap();
    eng.process_action(1, A::Call).unwrap();

    // Everyone matched the big blind, yet the round waits on the big blind.
    assert_eq!(eng.phase(), Phase::PreFlop);
    assert_eq!(eng.to_act(), Some(2));
    let legal = eng.legal_actions(2).unwrap();
    assert!(legal.can_check);
    assert_eq!(legal.raise, Some((20, 1000)));

    // The option raise reopens the betting for the callers.
    eng.process_action(2, A::Raise(30)).unwrap();
    assert_eq!(eng.to_act(), Some(0));
    eng.process_action(0, A::Call).unwrap();
    eng.process_action(1, A::Call).unwrap();
    let view = eng.view();
    assert_eq!(view.phase, Phase::Flop);
    assert_eq!(view.pot_total, 90);
}

#[test]
fn actions_after_hand_completion_are_rejected() {
    let mut eng = Engine::new(TableConfig::default(), Some(29));
    eng.add_player("alice", 100).unwrap();
    eng.add_player("bob", 100).unwrap();
    eng.start_new_hand().unwrap();
    eng.process_action(0, A::Fold).unwrap();

    let rejected = eng.process_action(1, A::Check).unwrap_err();
    assert!(matches!(
        rejected.kind,
        GameError::InvalidActionForPhase { .. }
    ));
}

#[test]
fn short_allin_raise_does_not_reopen_betting() {
    let config = TableConfig {
        small_blind: 5,
        big_blind: 10,
        ..TableConfig::default()
    };
    let mut eng = Engine::new(config, Some(37));
    eng.add_player("alice", 1000).unwrap();
    eng.add_player("bob", 1000).unwrap();
    eng.add_player("carol", 35).unwrap();
    eng.start_new_hand().unwrap();

    // Seat 0 raises to 30 (increment 20); seat 1 calls the full raise.
    eng.process_action(0, A::Raise(30)).unwrap();
    eng.process_action(1, A::Call).unwrap();
    // Seat 2's all-in to 35 is 5 on top: short of a full raise.
    eng.process_action(2, A::AllIn).unwrap();

    // Seat 0 must respond to the extra 5 but may not raise again.
    assert_eq!(eng.to_act(), Some(0));
    let legal = eng.legal_actions(0).unwrap();
    assert_eq!(legal.call, Some(5));
    assert_eq!(legal.raise, None);
    let rejected = eng.process_action(0, A::Raise(80)).unwrap_err();
    assert!(matches!(
        rejected.kind,
        GameError::InvalidActionForPhase { .. }
    ));

    eng.process_action(0, A::Call).unwrap();
    let view = eng.process_action(1, A::Call).unwrap();
    assert_eq!(view.phase, Phase::Flop);
    assert_eq!(view.pot_total, 105);
}
