use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// Seat index identifying a player at the table.
pub type PlayerId = usize;

/// A player's standing within the current hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Still contesting the pot and able to act
    Active,
    /// Folded out of the current hand
    Folded,
    /// Entire stack committed; contests the pot but cannot act further
    AllIn,
    /// No chips at hand start; skipped until re-funded
    SittingOut,
}

/// Represents a player action during a betting round.
///
/// `Bet` and `Raise` carry the raise-to total: the player's intended total
/// commitment on the current street, not an increment on top of it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if no bet to call)
    Check,
    /// Call the current bet
    Call,
    /// Open the betting for a total of the given amount
    Bet(u32),
    /// Raise so the player's street total becomes the given amount
    Raise(u32),
    /// Commit the entire remaining stack
    AllIn,
}

/// Represents a poker player with their chip stack, hole cards, and per-hand
/// betting state. Owned by the engine; the stack carries across hands while
/// cards, contributions, and status reset at each hand start.
#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    name: String,
    stack: u32,
    hole: [Option<Card>; 2],
    status: PlayerStatus,
    /// Chips committed on the current street, not yet swept into a pot
    street_bet: u32,
    /// Chips committed over the whole hand
    total_bet: u32,
    /// Whether the player has acted since the last full raise this street
    has_acted: bool,
    /// Set when a short all-in raised without reopening the betting for this seat
    raise_barred: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, stack: u32) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            hole: [None, None],
            status: PlayerStatus::Active,
            street_bet: 0,
            total_bet: 0,
            has_acted: false,
            raise_barred: false,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub(crate) fn set_id(&mut self, id: PlayerId) {
        self.id = id;
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn status(&self) -> PlayerStatus {
        self.status
    }
    pub fn street_bet(&self) -> u32 {
        self.street_bet
    }
    pub fn total_bet(&self) -> u32 {
        self.total_bet
    }
    pub fn has_acted(&self) -> bool {
        self.has_acted
    }
    pub fn raise_barred(&self) -> bool {
        self.raise_barred
    }

    /// Whether the player is still contesting the pot (active or all-in).
    pub fn is_contesting(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Whether the player can still take betting actions.
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    pub fn hole_cards(&self) -> [Option<Card>; 2] {
        self.hole
    }

    pub fn give_card(&mut self, c: Card) -> Result<(), String> {
        if self.hole[0].is_none() {
            self.hole[0] = Some(c);
            Ok(())
        } else if self.hole[1].is_none() {
            self.hole[1] = Some(c);
            Ok(())
        } else {
            Err("Hole cards already full".to_string())
        }
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    /// Moves up to `amount` chips from the stack into the street commitment.
    /// Returns the amount actually committed; committing the whole stack
    /// marks the player all-in.
    pub fn commit(&mut self, amount: u32) -> u32 {
        let committed = amount.min(self.stack);
        self.stack -= committed;
        self.street_bet += committed;
        self.total_bet += committed;
        if self.stack == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        committed
    }

    pub fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
        self.has_acted = true;
    }

    pub fn mark_acted(&mut self) {
        self.has_acted = true;
    }

    /// Reopens or bars the seat after someone else's raise.
    pub fn reopen_betting(&mut self) {
        self.has_acted = false;
        self.raise_barred = false;
    }

    pub fn bar_raise(&mut self) {
        self.has_acted = false;
        self.raise_barred = true;
    }

    /// Clears per-hand state. Seats without chips sit the hand out.
    pub fn reset_for_new_hand(&mut self) {
        self.hole = [None, None];
        self.street_bet = 0;
        self.total_bet = 0;
        self.has_acted = false;
        self.raise_barred = false;
        self.status = if self.stack > 0 {
            PlayerStatus::Active
        } else {
            PlayerStatus::SittingOut
        };
    }

    /// Clears per-street state once the street's bets are swept into the pots.
    pub fn reset_for_new_street(&mut self) {
        self.street_bet = 0;
        self.has_acted = false;
        self.raise_barred = false;
    }
}
