use std::collections::HashSet;

use holdem_engine::cards::{full_deck, Card, Rank, Suit};
use holdem_engine::deck::Deck;

fn deal_n(deck: &mut Deck, n: usize) -> Vec<Card> {
    (0..n).map(|_| deck.deal_card().unwrap()).collect()
}

#[test]
fn deck_holds_52_unique_cards_then_runs_dry() {
    let mut deck = Deck::new_with_seed(42);
    deck.shuffle();
    let mut seen = HashSet::new();
    for _ in 0..52 {
        let card = deck.deal_card().expect("52 cards before exhaustion");
        assert!(seen.insert(card), "{} dealt twice", card);
    }
    assert!(deck.deal_card().is_none());
    assert_eq!(deck.remaining(), 0);
}

#[test]
fn equal_seeds_replay_the_identical_shuffle() {
    let mut first = Deck::new_with_seed(0xDEAD);
    let mut second = Deck::new_with_seed(0xDEAD);
    first.shuffle();
    second.shuffle();
    assert_eq!(deal_n(&mut first, 52), deal_n(&mut second, 52));
}

#[test]
fn reshuffling_the_same_deck_advances_its_stream() {
    // Two consecutive hands from one deck must not repeat the permutation.
    let mut deck = Deck::new_with_seed(5);
    deck.shuffle();
    let hand_one = deal_n(&mut deck, 52);
    deck.shuffle();
    let hand_two = deal_n(&mut deck, 52);
    assert_ne!(hand_one, hand_two);
}

#[test]
fn different_seeds_give_different_orders() {
    let mut a = Deck::new_with_seed(1);
    let mut b = Deck::new_with_seed(2);
    a.shuffle();
    b.shuffle();
    assert_ne!(deal_n(&mut a, 13), deal_n(&mut b, 13));
}

#[test]
fn shuffle_permutes_without_losing_cards() {
    let mut deck = Deck::new_with_seed(777);
    deck.shuffle();
    let mut dealt = Vec::new();
    while let Some(c) = deck.deal_card() {
        dealt.push(c);
    }
    let mut canonical = full_deck();
    dealt.sort();
    canonical.sort();
    assert_eq!(dealt, canonical);
}

#[test]
fn reset_restores_canonical_order() {
    let mut deck = Deck::new_with_seed(9);
    deck.shuffle();
    deal_n(&mut deck, 20);
    deck.reset();
    assert_eq!(deck.remaining(), 52);
    assert_eq!(deal_n(&mut deck, 52), full_deck());
}

#[test]
fn remaining_counts_down_with_each_deal() {
    let mut deck = Deck::new_with_seed(9);
    deck.shuffle();
    assert_eq!(deck.remaining(), 52);
    deal_n(&mut deck, 9);
    assert_eq!(deck.remaining(), 43);
}

#[test]
fn cards_display_in_two_character_shorthand() {
    let ace_hearts = Card {
        suit: Suit::Hearts,
        rank: Rank::Ace,
    };
    let ten_diamonds = Card {
        suit: Suit::Diamonds,
        rank: Rank::Ten,
    };
    assert_eq!(ace_hearts.to_string(), "AH");
    assert_eq!(ten_diamonds.to_string(), "TD");
}
