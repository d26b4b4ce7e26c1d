use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::PlayerAction as A;

/// Everything the legality rules need to know about the acting seat and the
/// street: the player's remaining stack, what they have already committed,
/// the highest commitment on the street, and the last full raise increment.
#[derive(Debug, Copy, Clone)]
pub struct ActionContext {
    /// Player's remaining chip stack
    pub stack: u32,
    /// Player's commitment on this street so far (`c`)
    pub committed: u32,
    /// Highest commitment on this street (`C`)
    pub current_bet: u32,
    /// Size of the last full bet or raise; the minimum-raise increment
    pub min_raise: u32,
    /// Configured minimum opening bet
    pub big_blind: u32,
    /// True when a short all-in raise did not reopen the betting for this seat
    pub raise_barred: bool,
}

impl ActionContext {
    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.committed)
    }
}

/// An action that passed validation, with the exact number of chips the
/// player must move from stack to street commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Bet(u32),
    Raise(u32),
    AllIn(u32),
}

impl ValidatedAction {
    /// Chips this action moves into the street commitment.
    pub fn chips(&self) -> u32 {
        match *self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(n)
            | ValidatedAction::Bet(n)
            | ValidatedAction::Raise(n)
            | ValidatedAction::AllIn(n) => n,
        }
    }
}

/// Validates a player action against the betting rules.
///
/// Converts a requested [`PlayerAction`](crate::player::PlayerAction) into a
/// [`ValidatedAction`] carrying the chips to commit, or rejects it without
/// touching any state. Calls and exact-stack bets/raises convert to all-ins;
/// a raise below the minimum that does not commit the whole stack is an
/// error rather than a silent adjustment.
pub fn validate_action(ctx: &ActionContext, action: A) -> Result<ValidatedAction, GameError> {
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if ctx.to_call() == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::InvalidActionForPhase {
                    reason: "cannot check facing a bet",
                })
            }
        }
        A::Call => {
            let to_call = ctx.to_call();
            if to_call == 0 {
                return Err(GameError::InvalidActionForPhase {
                    reason: "nothing to call",
                });
            }
            if ctx.stack <= to_call {
                Ok(ValidatedAction::AllIn(ctx.stack))
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        A::Bet(total) => {
            if ctx.current_bet != 0 {
                return Err(GameError::InvalidActionForPhase {
                    reason: "cannot bet over an existing bet; raise instead",
                });
            }
            if total > ctx.stack {
                return Err(GameError::IllegalBetAmount {
                    amount: total,
                    minimum: ctx.big_blind.min(ctx.stack),
                    maximum: ctx.stack,
                });
            }
            if total == ctx.stack {
                return Ok(ValidatedAction::AllIn(ctx.stack));
            }
            if total < ctx.big_blind {
                return Err(GameError::IllegalBetAmount {
                    amount: total,
                    minimum: ctx.big_blind,
                    maximum: ctx.stack,
                });
            }
            Ok(ValidatedAction::Bet(total))
        }
        A::Raise(total) => {
            if ctx.current_bet == 0 {
                return Err(GameError::InvalidActionForPhase {
                    reason: "no bet to raise; bet instead",
                });
            }
            if ctx.raise_barred {
                return Err(GameError::InvalidActionForPhase {
                    reason: "betting was not reopened by a short all-in",
                });
            }
            let min_total = ctx.current_bet + ctx.min_raise;
            let max_total = ctx.committed + ctx.stack;
            if total <= ctx.current_bet || total > max_total {
                return Err(GameError::IllegalBetAmount {
                    amount: total,
                    minimum: min_total.min(max_total),
                    maximum: max_total,
                });
            }
            let need = total - ctx.committed;
            if need == ctx.stack {
                // All-in for less than a full raise is allowed.
                return Ok(ValidatedAction::AllIn(ctx.stack));
            }
            if total < min_total {
                return Err(GameError::IllegalBetAmount {
                    amount: total,
                    minimum: min_total,
                    maximum: max_total,
                });
            }
            Ok(ValidatedAction::Raise(need))
        }
        A::AllIn => Ok(ValidatedAction::AllIn(ctx.stack)),
    }
}

/// The actions currently open to a seat, with their chip bounds.
/// Bet and raise bounds are raise-to street totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions {
    pub can_fold: bool,
    pub can_check: bool,
    /// Chips needed to call, when facing a bet
    pub call: Option<u32>,
    /// (min, max) total for an opening bet
    pub bet: Option<(u32, u32)>,
    /// (min, max) raise-to total
    pub raise: Option<(u32, u32)>,
    /// Chips committed by going all-in right now
    pub all_in: u32,
}

impl LegalActions {
    pub fn for_context(ctx: &ActionContext) -> Self {
        let to_call = ctx.to_call();
        let max_total = ctx.committed + ctx.stack;
        let bet = if ctx.current_bet == 0 && ctx.stack > 0 {
            Some((ctx.big_blind.min(ctx.stack), ctx.stack))
        } else {
            None
        };
        let raise = if ctx.current_bet > 0 && !ctx.raise_barred && ctx.stack > to_call {
            Some(((ctx.current_bet + ctx.min_raise).min(max_total), max_total))
        } else {
            None
        };
        Self {
            can_fold: true,
            can_check: to_call == 0,
            call: (to_call > 0).then_some(to_call.min(ctx.stack)),
            bet,
            raise,
            all_in: ctx.stack,
        }
    }
}
