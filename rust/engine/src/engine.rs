use std::collections::BTreeMap;

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::{GameError, RejectedAction};
use crate::game::{GameView, Phase, PlayerView, TableConfig};
use crate::hand::{evaluate_hand, HandStrength};
use crate::logger::{ActionRecord, HandRecord, ShowdownInfo};
use crate::player::{Player, PlayerAction, PlayerId};
use crate::pot::PotManager;
use crate::rules::{validate_action, ActionContext, LegalActions, ValidatedAction};

const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// Core engine driving one table through complete hands: seating, blinds,
/// dealing, the four betting streets, showdown, and payout.
///
/// The engine is synchronous and single-hand: every call fully applies or is
/// rejected atomically, and the caller serializes actions per table. It owns
/// no I/O; snapshots and hand records are plain values for the transport
/// layer to ship or store.
///
/// # Examples
///
/// ```
/// use holdem_engine::engine::Engine;
/// use holdem_engine::game::TableConfig;
/// use holdem_engine::player::PlayerAction;
///
/// let mut engine = Engine::new(TableConfig::default(), Some(7));
/// let a = engine.add_player("alice", 100).unwrap();
/// let b = engine.add_player("bob", 100).unwrap();
/// engine.start_new_hand().unwrap();
///
/// // Heads-up: the button posts the small blind and acts first pre-flop.
/// let view = engine.view();
/// assert!(view.to_act == Some(a) || view.to_act == Some(b));
/// let seat = view.to_act.unwrap();
/// engine.process_action(seat, PlayerAction::Fold).unwrap();
/// ```
#[derive(Debug)]
pub struct Engine {
    config: TableConfig,
    seed: u64,
    deck: Deck,
    players: Vec<Player>,
    community: Vec<Card>,
    pots: PotManager,
    phase: Phase,
    dealer: Option<PlayerId>,
    to_act: Option<PlayerId>,
    current_bet: u32,
    min_raise: u32,
    /// Chip total at hand start; the conservation baseline
    hand_stake: u32,
    /// Set after a defensive invariant breach; the hand refuses further actions
    halted: bool,
    reached_showdown: bool,
    actions: Vec<ActionRecord>,
    payouts: Option<BTreeMap<PlayerId, u32>>,
    showdown_info: Option<ShowdownInfo>,
    hands_played: u32,
}

impl Engine {
    pub fn new(config: TableConfig, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or(DEFAULT_SEED);
        Self {
            config,
            seed,
            deck: Deck::new_with_seed(seed),
            players: Vec::new(),
            community: Vec::new(),
            pots: PotManager::new(),
            phase: Phase::HandComplete,
            dealer: None,
            to_act: None,
            current_bet: 0,
            min_raise: 0,
            hand_stake: 0,
            halted: false,
            reached_showdown: false,
            actions: Vec::new(),
            payouts: None,
            showdown_info: None,
            hands_played: 0,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn dealer(&self) -> Option<PlayerId> {
        self.dealer
    }
    pub fn to_act(&self) -> Option<PlayerId> {
        self.to_act
    }
    pub fn community_cards(&self) -> &[Card] {
        &self.community
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn pot_total(&self) -> u32 {
        self.pots.total() + self.players.iter().map(|p| p.street_bet()).sum::<u32>()
    }

    /// Seats a new player. Fails while a hand is in progress or when all
    /// seats are taken.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        chips: u32,
    ) -> Result<PlayerId, GameError> {
        if self.phase != Phase::HandComplete {
            return Err(GameError::HandAlreadyInProgress);
        }
        if self.players.len() >= self.config.max_players {
            return Err(GameError::TableFull {
                max: self.config.max_players,
            });
        }
        let id = self.players.len();
        self.players.push(Player::new(id, name, chips));
        Ok(id)
    }

    /// Vacates a seat between hands, returning the player's remaining chips.
    /// Seats above the departed one shift down an index; the button tracking
    /// is adjusted so rotation continues from the same table position.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<u32, GameError> {
        if self.phase != Phase::HandComplete {
            return Err(GameError::HandAlreadyInProgress);
        }
        if player_id >= self.players.len() {
            return Err(GameError::UnknownPlayer { id: player_id });
        }
        let departing = self.players.remove(player_id);
        for (seat, p) in self.players.iter_mut().enumerate() {
            p.set_id(seat);
        }
        let remaining = self.players.len();
        self.dealer = match self.dealer {
            Some(_) if remaining == 0 => None,
            Some(d) if d == player_id => Some(if player_id == 0 {
                remaining - 1
            } else {
                player_id - 1
            }),
            Some(d) if d > player_id => Some(d - 1),
            other => other,
        };
        Ok(departing.stack())
    }

    /// Starts a new hand: rotates the button, posts blinds, deals hole cards,
    /// and opens the pre-flop betting.
    pub fn start_new_hand(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::HandComplete || self.halted {
            return Err(GameError::HandAlreadyInProgress);
        }
        let eligible: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.stack() > 0)
            .map(|p| p.id())
            .collect();
        if eligible.len() < 2 {
            return Err(GameError::InsufficientPlayers {
                seated: eligible.len(),
                required: 2,
            });
        }

        for p in &mut self.players {
            p.reset_for_new_hand();
        }
        self.community.clear();
        self.pots.reset();
        self.actions.clear();
        self.payouts = None;
        self.showdown_info = None;
        self.reached_showdown = false;
        self.hand_stake = self.players.iter().map(|p| p.stack()).sum();
        self.hands_played += 1;

        self.deck.shuffle();
        let dealer = match self.dealer {
            None => eligible[0],
            Some(prev) => self.next_with_chips(prev),
        };
        self.dealer = Some(dealer);

        // Heads-up: the button posts the small blind; otherwise blinds sit
        // left of the button.
        let (sb_seat, bb_seat) = if eligible.len() == 2 {
            (dealer, self.next_with_chips(dealer))
        } else {
            let sb = self.next_with_chips(dealer);
            (sb, self.next_with_chips(sb))
        };
        self.players[sb_seat].commit(self.config.small_blind);
        self.players[bb_seat].commit(self.config.big_blind);
        self.current_bet = self.config.big_blind;
        self.min_raise = self.config.big_blind;

        // Two hole cards each, dealt one at a time starting left of the button
        for _ in 0..2 {
            let mut seat = self.next_seat(dealer);
            for _ in 0..self.players.len() {
                if self.players[seat].is_contesting() {
                    let c = self.deal_one()?;
                    self.players[seat]
                        .give_card(c)
                        .map_err(|_| GameError::EmptyDeck)?;
                }
                seat = self.next_seat(seat);
            }
        }

        self.phase = Phase::PreFlop;
        self.to_act = self.first_actor_after(bb_seat);
        if self.betting_round_complete() {
            // Blinds put everyone all-in: run the board out immediately.
            self.advance_streets()?;
        }
        self.check_conservation()?;
        Ok(())
    }

    /// Applies one action for the acting player. On rejection the state is
    /// unchanged and the error carries the seat's current legal options.
    pub fn process_action(
        &mut self,
        player_id: PlayerId,
        action: PlayerAction,
    ) -> Result<GameView, RejectedAction> {
        if self.halted {
            return Err(GameError::InvalidActionForPhase {
                reason: "hand halted after an internal defect",
            }
            .into());
        }
        if !self.phase.is_betting() {
            return Err(GameError::InvalidActionForPhase {
                reason: "no betting round in progress",
            }
            .into());
        }
        let seat = self.to_act.ok_or(GameError::InvalidActionForPhase {
            reason: "no player to act",
        })?;
        if player_id != seat {
            return Err(RejectedAction {
                kind: GameError::NotPlayersTurn {
                    expected: seat,
                    actual: player_id,
                },
                legal: None,
            });
        }

        let ctx = self.action_context(seat);
        let validated = validate_action(&ctx, action.clone()).map_err(|kind| RejectedAction {
            kind,
            legal: Some(LegalActions::for_context(&ctx)),
        })?;

        self.actions.push(ActionRecord {
            seat,
            phase: self.phase,
            action,
        });
        self.apply(seat, validated);

        if self.contenders().len() == 1 {
            self.finish_fold_win()
                .map_err(|kind| RejectedAction { kind, legal: None })?;
        } else if self.betting_round_complete() {
            self.advance_streets()
                .map_err(|kind| RejectedAction { kind, legal: None })?;
        } else {
            self.to_act = self.next_needing_action(seat);
        }
        self.check_conservation()
            .map_err(|kind| RejectedAction { kind, legal: None })?;
        Ok(self.view())
    }

    /// Legal options for a seat, present only when it is that seat's turn.
    pub fn legal_actions(&self, player_id: PlayerId) -> Option<LegalActions> {
        if self.to_act == Some(player_id) && self.phase.is_betting() && !self.halted {
            Some(LegalActions::for_context(&self.action_context(player_id)))
        } else {
            None
        }
    }

    /// Public snapshot: no hole cards unless showdown revealed them.
    pub fn view(&self) -> GameView {
        self.snapshot(None)
    }

    /// Snapshot from one player's perspective: their own hole cards included.
    pub fn view_for(&self, viewer: PlayerId) -> GameView {
        self.snapshot(Some(viewer))
    }

    /// History record for the last completed hand.
    pub fn hand_record(&self, hand_id: String) -> Option<HandRecord> {
        if self.phase != Phase::HandComplete || self.hands_played == 0 {
            return None;
        }
        let result = self.showdown_info.as_ref().map(|info| {
            let winners: Vec<String> = info.winners.iter().map(|w| w.to_string()).collect();
            format!("winners: {}", winners.join(","))
        });
        Some(HandRecord {
            hand_id,
            seed: Some(self.seed),
            actions: self.actions.clone(),
            board: self.community.clone(),
            result,
            ts: None,
            meta: None,
            showdown: self.showdown_info.clone(),
        })
    }

    // ---- internals ----

    fn snapshot(&self, viewer: Option<PlayerId>) -> GameView {
        let players = self
            .players
            .iter()
            .map(|p| {
                let show = viewer == Some(p.id())
                    || (self.reached_showdown && p.is_contesting());
                let hole_cards = match p.hole_cards() {
                    [Some(a), Some(b)] if show => Some([a, b]),
                    _ => None,
                };
                PlayerView {
                    id: p.id(),
                    name: p.name().to_string(),
                    stack: p.stack(),
                    status: p.status(),
                    street_bet: p.street_bet(),
                    total_bet: p.total_bet(),
                    hole_cards,
                }
            })
            .collect();
        GameView {
            phase: self.phase,
            dealer: self.dealer.unwrap_or(0),
            small_blind: self.config.small_blind,
            big_blind: self.config.big_blind,
            current_bet: self.current_bet,
            min_raise: self.min_raise,
            community_cards: self.community.clone(),
            pots: self.pots.pots(),
            pot_total: self.pot_total(),
            players,
            to_act: self.to_act,
            legal_actions: self.to_act.and_then(|s| self.legal_actions(s)),
            payouts: self.payouts.clone(),
        }
    }

    fn action_context(&self, seat: PlayerId) -> ActionContext {
        let p = &self.players[seat];
        ActionContext {
            stack: p.stack(),
            committed: p.street_bet(),
            current_bet: self.current_bet,
            min_raise: self.min_raise,
            big_blind: self.config.big_blind,
            raise_barred: p.raise_barred(),
        }
    }

    fn apply(&mut self, seat: PlayerId, action: ValidatedAction) {
        match action {
            ValidatedAction::Fold => {
                self.players[seat].fold();
                self.pots.mark_folded(seat);
            }
            ValidatedAction::Check => self.players[seat].mark_acted(),
            ValidatedAction::Call(n) => {
                self.players[seat].commit(n);
                self.players[seat].mark_acted();
            }
            ValidatedAction::Bet(n) | ValidatedAction::Raise(n) => {
                self.players[seat].commit(n);
                let total = self.players[seat].street_bet();
                self.min_raise = total - self.current_bet;
                self.current_bet = total;
                self.players[seat].mark_acted();
                self.reopen_others(seat);
            }
            ValidatedAction::AllIn(n) => {
                self.players[seat].commit(n);
                let total = self.players[seat].street_bet();
                if total > self.current_bet {
                    let increment = total - self.current_bet;
                    self.current_bet = total;
                    if increment >= self.min_raise {
                        self.min_raise = increment;
                        self.reopen_others(seat);
                    } else {
                        // Short all-in: others must respond to the new amount
                        // but seats that already acted may not raise again.
                        self.bar_raisers(seat);
                    }
                }
                self.players[seat].mark_acted();
            }
        }
    }

    fn reopen_others(&mut self, aggressor: PlayerId) {
        for p in &mut self.players {
            if p.id() != aggressor && p.can_act() {
                p.reopen_betting();
            }
        }
    }

    fn bar_raisers(&mut self, aggressor: PlayerId) {
        for p in &mut self.players {
            if p.id() != aggressor && p.can_act() {
                if p.has_acted() {
                    p.bar_raise();
                } else {
                    p.reopen_betting();
                }
            }
        }
    }

    fn contenders(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.is_contesting())
            .map(|p| p.id())
            .collect()
    }

    fn betting_round_complete(&self) -> bool {
        self.players
            .iter()
            .filter(|p| p.can_act())
            .all(|p| p.has_acted() && p.street_bet() == self.current_bet)
    }

    /// Sweeps street bets into the pots and resets per-street state.
    fn collect_street(&mut self) {
        for p in &mut self.players {
            let bet = p.street_bet();
            if bet > 0 {
                self.pots.collect(p.id(), bet);
            }
            p.reset_for_new_street();
        }
        self.current_bet = 0;
        self.min_raise = self.config.big_blind;
    }

    /// Closes the current street and advances, running the board out when no
    /// further betting is possible.
    fn advance_streets(&mut self) -> Result<(), GameError> {
        loop {
            self.collect_street();
            let Some(next) = self.phase.next_street() else {
                return self.showdown();
            };
            self.phase = next;
            let reveal = if next == Phase::Flop { 3 } else { 1 };
            for _ in 0..reveal {
                let c = self.deal_one()?;
                self.community.push(c);
            }
            // With fewer than two seats able to act there is no betting left.
            if self.players.iter().filter(|p| p.can_act()).count() >= 2 {
                let dealer = self.dealer.unwrap_or(0);
                self.to_act = self.first_actor_after(dealer);
                return Ok(());
            }
        }
    }

    fn showdown(&mut self) -> Result<(), GameError> {
        self.phase = Phase::Showdown;
        self.reached_showdown = true;
        self.to_act = None;

        let mut rankings: BTreeMap<PlayerId, HandStrength> = BTreeMap::new();
        for p in &self.players {
            if !p.is_contesting() {
                continue;
            }
            // Every contesting seat was dealt two cards at hand start.
            let [Some(a), Some(b)] = p.hole_cards() else {
                continue;
            };
            let mut seven = [a; 7];
            seven[1] = b;
            seven[2..].copy_from_slice(&self.community);
            rankings.insert(p.id(), evaluate_hand(&seven));
        }

        let order = self.remainder_order();
        let payouts = self.pots.distribute(&rankings, &order);
        self.settle(payouts, None);
        Ok(())
    }

    /// Awards everything to the last seat standing, without evaluation.
    fn finish_fold_win(&mut self) -> Result<(), GameError> {
        self.collect_street();
        let winner = self.contenders()[0];
        let payouts = self.pots.award_all(winner);
        self.to_act = None;
        self.settle(payouts, Some("all folded".to_string()));
        Ok(())
    }

    fn settle(&mut self, payouts: BTreeMap<PlayerId, u32>, notes: Option<String>) {
        for (&seat, &amount) in &payouts {
            self.players[seat].add_chips(amount);
        }
        // Pots are paid out; emptying them keeps the conservation sum exact.
        self.pots.reset();
        self.showdown_info = Some(ShowdownInfo {
            winners: payouts.keys().copied().collect(),
            payouts: payouts.clone(),
            notes,
        });
        self.payouts = Some(payouts);
        self.phase = Phase::HandComplete;
    }

    /// Odd-chip seat order per the configured house rule.
    fn remainder_order(&self) -> Vec<PlayerId> {
        self.config
            .odd_chip_rule
            .seat_order(self.dealer.unwrap_or(0), self.players.len())
    }

    fn deal_one(&mut self) -> Result<Card, GameError> {
        match self.deck.deal_card() {
            Some(c) => Ok(c),
            None => {
                self.halted = true;
                Err(GameError::EmptyDeck)
            }
        }
    }

    fn check_conservation(&mut self) -> Result<(), GameError> {
        let actual: u32 = self.players.iter().map(|p| p.stack()).sum::<u32>()
            + self.pots.total()
            + self.players.iter().map(|p| p.street_bet()).sum::<u32>();
        if actual != self.hand_stake {
            self.halted = true;
            return Err(GameError::ChipConservationViolated {
                expected: self.hand_stake,
                actual,
            });
        }
        Ok(())
    }

    fn next_seat(&self, seat: PlayerId) -> PlayerId {
        (seat + 1) % self.players.len()
    }

    /// Next seat clockwise that still has chips (for button and blinds).
    fn next_with_chips(&self, from: PlayerId) -> PlayerId {
        let mut seat = self.next_seat(from);
        while self.players[seat].stack() == 0 {
            seat = self.next_seat(seat);
            if seat == from {
                break;
            }
        }
        seat
    }

    /// First seat clockwise after `from` that can still act.
    fn first_actor_after(&self, from: PlayerId) -> Option<PlayerId> {
        let mut seat = self.next_seat(from);
        for _ in 0..self.players.len() {
            if self.players[seat].can_act() {
                return Some(seat);
            }
            seat = self.next_seat(seat);
        }
        None
    }

    /// Next seat after `from` that still owes a decision this street.
    fn next_needing_action(&self, from: PlayerId) -> Option<PlayerId> {
        let mut seat = self.next_seat(from);
        for _ in 0..self.players.len() {
            let p = &self.players[seat];
            if p.can_act() && (!p.has_acted() || p.street_bet() < self.current_bet) {
                return Some(seat);
            }
            seat = self.next_seat(seat);
        }
        None
    }
}
