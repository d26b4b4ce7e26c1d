use thiserror::Error;

use crate::player::PlayerId;
use crate::rules::LegalActions;

/// Rule and invariant failures raised by the engine.
///
/// All but the last two are recoverable rule violations: the action is rejected,
/// state is left untouched, and the caller may retry. `EmptyDeck` and
/// `ChipConservationViolated` indicate an internal defect and halt the hand.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Action is not valid at this point: {reason}")]
    InvalidActionForPhase { reason: &'static str },
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: PlayerId, actual: PlayerId },
    #[error("Illegal bet amount: {amount}, legal range: {minimum}..={maximum}")]
    IllegalBetAmount {
        amount: u32,
        minimum: u32,
        maximum: u32,
    },
    #[error("Need at least {required} players with chips, have {seated}")]
    InsufficientPlayers { seated: usize, required: usize },
    #[error("A hand is already in progress")]
    HandAlreadyInProgress,
    #[error("Table is full ({max} seats)")]
    TableFull { max: usize },
    #[error("No player is seated at index {id}")]
    UnknownPlayer { id: PlayerId },
    #[error("Deck is out of cards")]
    EmptyDeck,
    #[error("Chip conservation violated: expected {expected}, found {actual}")]
    ChipConservationViolated { expected: u32, actual: u32 },
}

impl GameError {
    /// Defensive errors poison the hand; everything else is a rejection the
    /// caller can correct and retry.
    pub fn is_defect(&self) -> bool {
        matches!(
            self,
            GameError::EmptyDeck | GameError::ChipConservationViolated { .. }
        )
    }
}

/// A rejected action paired with the acting seat's current legal options,
/// so the transport layer can surface both to the client in one response.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{kind}")]
pub struct RejectedAction {
    pub kind: GameError,
    pub legal: Option<LegalActions>,
}

impl From<GameError> for RejectedAction {
    fn from(kind: GameError) -> Self {
        Self { kind, legal: None }
    }
}
