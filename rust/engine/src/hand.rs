use std::cmp::Ordering;

use crate::cards::Card;

/// Hand categories in increasing strength order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// Total-order rank key for a 7-card hand: category first, then kickers.
///
/// Two equal keys mean a genuine tie (split pot). The derived ordering
/// compares `category` before `kickers`, which are stored high to low.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

impl HandStrength {
    fn of(category: Category, ranks: &[u8]) -> Self {
        let mut kickers = [0u8; 5];
        kickers[..ranks.len()].copy_from_slice(ranks);
        Self { category, kickers }
    }
}

/// Evaluates the best 5-card hand out of exactly 7 cards (2 hole + 5 board).
///
/// Pure function over the cards' rank multiset plus straight detection on a
/// rank bitmask. The wheel (A-2-3-4-5) plays the Ace low and ranks below the
/// 6-high straight; flush kickers come only from cards of the flush suit.
pub fn evaluate_hand(cards: &[Card; 7]) -> HandStrength {
    let mut suited: [Vec<u8>; 4] = std::array::from_fn(|_| Vec::new());
    for c in cards {
        suited[c.suit as usize].push(c.rank as u8);
    }
    let flush_ranks: Option<Vec<u8>> = suited
        .iter()
        .find(|ranks| ranks.len() >= 5)
        .map(|ranks| {
            let mut sorted = ranks.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            sorted
        });

    if let Some(ranks) = &flush_ranks {
        if let Some(high) = straight_high(rank_mask(ranks)) {
            return HandStrength::of(Category::StraightFlush, &[high]);
        }
    }

    let all_ranks: Vec<u8> = cards.iter().map(|c| c.rank as u8).collect();
    // (count, rank) pairs, largest group first, rank breaking count ties
    let groups = rank_groups(&all_ranks);

    if groups[0].0 == 4 {
        let quad = groups[0].1;
        let kicker = highest_rank(&groups[1..]);
        return HandStrength::of(Category::FourOfAKind, &[quad, kicker]);
    }

    if groups[0].0 == 3 && groups[1].0 >= 2 {
        // Two sets of trips sort adjacent; the lower one plays as the pair.
        return HandStrength::of(Category::FullHouse, &[groups[0].1, groups[1].1]);
    }

    if let Some(ranks) = &flush_ranks {
        return HandStrength::of(Category::Flush, &ranks[..5]);
    }

    if let Some(high) = straight_high(rank_mask(&all_ranks)) {
        return HandStrength::of(Category::Straight, &[high]);
    }

    match (groups[0].0, groups[1].0) {
        (3, _) => {
            // Trips plus the two highest leftover ranks; no second group of
            // two or more exists here, so the leftovers are already sorted.
            let (k1, k2) = (groups[1].1, groups[2].1);
            HandStrength::of(Category::ThreeOfAKind, &[groups[0].1, k1, k2])
        }
        (2, 2) => {
            // With 7 cards there can be three pairs; only the top two play
            // and the third pair's rank competes as an ordinary kicker.
            let kicker = highest_rank(&groups[2..]);
            HandStrength::of(Category::TwoPair, &[groups[0].1, groups[1].1, kicker])
        }
        (2, _) => HandStrength::of(
            Category::Pair,
            &[groups[0].1, groups[1].1, groups[2].1, groups[3].1],
        ),
        _ => {
            let tops: Vec<u8> = groups.iter().take(5).map(|g| g.1).collect();
            HandStrength::of(Category::HighCard, &tops)
        }
    }
}

/// Three-way comparison of two evaluated hands.
pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    a.cmp(b)
}

/// Bit `r` set when rank `r` is present; an Ace also sets bit 1 so the
/// wheel scans like any other straight.
fn rank_mask(ranks: &[u8]) -> u16 {
    let mut mask = 0u16;
    for &r in ranks {
        mask |= 1 << r;
    }
    if mask & (1 << 14) != 0 {
        mask |= 1 << 1;
    }
    mask
}

/// Highest straight in the mask, if any. The wheel reports 5 as its high
/// card, so it ranks below the 6-high straight.
fn straight_high(mask: u16) -> Option<u8> {
    const RUN: u16 = 0b1_1111;
    (5..=14u8)
        .rev()
        .find(|high| mask & (RUN << (high - 4)) == RUN << (high - 4))
}

/// Rank multiplicities as (count, rank), sorted descending on both so the
/// dominant group comes first and equal counts order by rank.
fn rank_groups(ranks: &[u8]) -> Vec<(u8, u8)> {
    let mut counts = [0u8; 15];
    for &r in ranks {
        counts[r as usize] += 1;
    }
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .filter(|&r| counts[r as usize] > 0)
        .map(|r| (counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    groups
}

fn highest_rank(groups: &[(u8, u8)]) -> u8 {
    groups.iter().map(|g| g.1).max().unwrap_or(0)
}
