use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::{PlayerId, PlayerStatus};
use crate::pot::Pot;
use crate::rules::LegalActions;

/// Phases of a hand, strictly ordered. A hand may jump straight to
/// `HandComplete` from any betting phase once only one contender remains.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    HandComplete,
}

impl Phase {
    pub fn is_betting(&self) -> bool {
        matches!(
            self,
            Phase::PreFlop | Phase::Flop | Phase::Turn | Phase::River
        )
    }

    /// The next betting street, if any.
    pub fn next_street(&self) -> Option<Phase> {
        match self {
            Phase::PreFlop => Some(Phase::Flop),
            Phase::Flop => Some(Phase::Turn),
            Phase::Turn => Some(Phase::River),
            _ => None,
        }
    }
}

/// House rule for assigning remainder chips when a split pot does not divide
/// evenly.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub enum OddChipRule {
    /// Odd chips go to tied winners seat-by-seat clockwise from the button
    #[default]
    ClockwiseFromButton,
    /// Odd chips go to tied winners in ascending seat order
    LowestSeat,
}

impl OddChipRule {
    /// Seat order in which remainder chips are handed out among tied winners.
    pub fn seat_order(self, dealer: PlayerId, seats: usize) -> Vec<PlayerId> {
        match self {
            OddChipRule::ClockwiseFromButton => {
                (1..=seats).map(|i| (dealer + i) % seats).collect()
            }
            OddChipRule::LowestSeat => (0..seats).collect(),
        }
    }
}

/// Table-level configuration fixed for the lifetime of an engine instance.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    pub max_players: usize,
    pub odd_chip_rule: OddChipRule,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 1,
            big_blind: 2,
            max_players: 9,
            odd_chip_rule: OddChipRule::default(),
        }
    }
}

/// One seat's public state as exposed to callers. Hole cards are present
/// only for the viewing player or once showdown has been reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub stack: u32,
    pub status: PlayerStatus,
    pub street_bet: u32,
    pub total_bet: u32,
    pub hole_cards: Option<[Card; 2]>,
}

/// A full snapshot of the hand aggregate: everything a transport or storage
/// layer needs, with no derived field as the sole source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub phase: Phase,
    pub dealer: PlayerId,
    pub small_blind: u32,
    pub big_blind: u32,
    pub current_bet: u32,
    pub min_raise: u32,
    pub community_cards: Vec<Card>,
    pub pots: Vec<Pot>,
    pub pot_total: u32,
    pub players: Vec<PlayerView>,
    pub to_act: Option<PlayerId>,
    /// Legal options for the seat whose turn it is
    pub legal_actions: Option<LegalActions>,
    /// Per-seat payouts once the hand has completed
    pub payouts: Option<BTreeMap<PlayerId, u32>>,
}
