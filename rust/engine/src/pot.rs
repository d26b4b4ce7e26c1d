use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::hand::HandStrength;
use crate::player::PlayerId;

/// One layer of the pot structure: an amount and the seats still contesting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    pub eligible: Vec<PlayerId>,
}

/// Tracks every chip committed during a hand and partitions it into layered
/// main/side pots.
///
/// Contributions are swept in per street; pots are computed from the total
/// commitments plus the fold set, so every contributed chip lands in exactly
/// one pot and eligibility sets are nested by construction (each higher
/// layer's eligible set is a subset of the one below it).
#[derive(Debug, Default, Clone)]
pub struct PotManager {
    committed: BTreeMap<PlayerId, u32>,
    folded: BTreeSet<PlayerId>,
}

impl PotManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all contributions for a new hand.
    pub fn reset(&mut self) {
        self.committed.clear();
        self.folded.clear();
    }

    /// Sweeps one seat's street contribution into the running totals.
    pub fn collect(&mut self, seat: PlayerId, amount: u32) {
        if amount > 0 {
            *self.committed.entry(seat).or_insert(0) += amount;
        }
    }

    /// Folded seats keep their chips in the pots they reached but drop out of
    /// every eligibility set.
    pub fn mark_folded(&mut self, seat: PlayerId) {
        self.folded.insert(seat);
    }

    pub fn total(&self) -> u32 {
        self.committed.values().sum()
    }

    pub fn contribution(&self, seat: PlayerId) -> u32 {
        self.committed.get(&seat).copied().unwrap_or(0)
    }

    /// Computes the layered pot structure.
    ///
    /// Layer boundaries are the distinct commitment totals of non-folded
    /// contributors, ascending. Each layer holds, from every contributor
    /// (folded ones included), the slice of their commitment between the
    /// previous boundary and this one; only non-folded seats that reached the
    /// boundary are eligible.
    pub fn pots(&self) -> Vec<Pot> {
        let mut levels: Vec<u32> = self
            .committed
            .iter()
            .filter(|(seat, amount)| !self.folded.contains(seat) && **amount > 0)
            .map(|(_, amount)| *amount)
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots = Vec::with_capacity(levels.len());
        let mut prev = 0u32;
        for level in levels {
            let mut amount = 0u32;
            let mut eligible = Vec::new();
            for (&seat, &total) in &self.committed {
                amount += total.min(level).saturating_sub(total.min(prev));
                if !self.folded.contains(&seat) && total >= level {
                    eligible.push(seat);
                }
            }
            if amount > 0 {
                pots.push(Pot { amount, eligible });
            }
            prev = level;
        }
        pots
    }

    /// Awards every pot to a single seat, used when all others have folded.
    pub fn award_all(&self, winner: PlayerId) -> BTreeMap<PlayerId, u32> {
        let mut payouts = BTreeMap::new();
        payouts.insert(winner, self.total());
        payouts
    }

    /// Distributes each pot to the best-ranked eligible seats.
    ///
    /// Ties split a pot evenly; remainder chips go one at a time to tied
    /// winners in `remainder_order` (the house odd-chip order, normally the
    /// first eligible seat clockwise from the button).
    pub fn distribute(
        &self,
        rankings: &BTreeMap<PlayerId, HandStrength>,
        remainder_order: &[PlayerId],
    ) -> BTreeMap<PlayerId, u32> {
        let mut payouts: BTreeMap<PlayerId, u32> = BTreeMap::new();
        for pot in self.pots() {
            let best = pot
                .eligible
                .iter()
                .filter_map(|seat| rankings.get(seat))
                .max();
            let Some(best) = best else { continue };
            let winners: Vec<PlayerId> = remainder_order
                .iter()
                .copied()
                .filter(|seat| {
                    pot.eligible.contains(seat) && rankings.get(seat) == Some(best)
                })
                .collect();
            let share = pot.amount / winners.len() as u32;
            let remainder = pot.amount % winners.len() as u32;
            for (i, seat) in winners.iter().enumerate() {
                let extra = u32::from((i as u32) < remainder);
                *payouts.entry(*seat).or_insert(0) += share + extra;
            }
        }
        payouts
    }
}
