//! # holdem-engine: Texas Hold'em Hand Engine
//!
//! Plays one hand of no-limit Texas Hold'em for 2–9 seats, from the seeded
//! shuffle through blinds, four betting streets, layered side pots, and
//! showdown payout. The engine owns no I/O and no table registry; transport,
//! sessions, and presentation belong to the caller, which drives the hand by
//! feeding validated player actions and reading back snapshots.
//!
//! ## Modules
//!
//! - [`cards`] / [`deck`] - card value types and the seeded ChaCha20 deck
//! - [`hand`] - 7-card evaluation into a totally ordered [`hand::HandStrength`]
//! - [`player`] - seat state: stack, hole cards, per-street commitments
//! - [`pot`] - contribution ledger, side-pot layering, and distribution
//! - [`rules`] - pure betting legality and legal-action introspection
//! - [`game`] - phases, table configuration, and snapshot types
//! - [`engine`] - the hand orchestrator, [`engine::Engine`]
//! - [`logger`] - hand-history records and the JSONL writer
//! - [`errors`] - rule violations and defensive invariant breaches
//!
//! ## Evaluating a hand
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_engine::hand::{evaluate_hand, Category};
//!
//! let seven = [
//!     Card { suit: Suit::Spades, rank: Rank::Nine },
//!     Card { suit: Suit::Spades, rank: Rank::Eight },
//!     Card { suit: Suit::Spades, rank: Rank::Seven },
//!     Card { suit: Suit::Spades, rank: Rank::Six },
//!     Card { suit: Suit::Spades, rank: Rank::Five },
//!     Card { suit: Suit::Hearts, rank: Rank::Ace },
//!     Card { suit: Suit::Diamonds, rank: Rank::Ace },
//! ];
//! assert_eq!(evaluate_hand(&seven).category, Category::StraightFlush);
//! ```
//!
//! ## Playing a hand
//!
//! The same seed replays the same deal, so a recorded action list
//! reconstructs a hand exactly:
//!
//! ```rust
//! use holdem_engine::engine::Engine;
//! use holdem_engine::game::TableConfig;
//! use holdem_engine::player::PlayerAction;
//!
//! let mut engine = Engine::new(TableConfig::default(), Some(42));
//! engine.add_player("alice", 200).unwrap();
//! engine.add_player("bob", 200).unwrap();
//! engine.start_new_hand().unwrap();
//!
//! let seat = engine.to_act().unwrap();
//! let view = engine.process_action(seat, PlayerAction::Call).unwrap();
//! assert_eq!(view.players.len(), 2);
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
