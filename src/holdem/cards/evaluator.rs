use std::collections::HashMap;

/// Total-order rank score. Packed as a fixed-width base-15 integer so category
/// strictly dominates kickers across categories.
pub type Score = u64;

const BASE: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    Trips = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    Quads = 7,
    StraightFlush = 8,
}

fn pack(category: Category, kickers: &[u8]) -> Score {
    debug_assert!(kickers.len() <= 5);
    let mut padded = [0u8; 5];
    padded[..kickers.len()].copy_from_slice(kickers);
    padded
        .iter()
        .fold(category as u64, |score, &k| score * BASE + k as u64)
}

/// `(rank, count)` pairs sorted by count descending, then rank descending.
fn rank_counts(ranks: &[u8; 5]) -> Vec<(u8, u8)> {
    let mut counts: HashMap<u8, u8> = HashMap::new();
    for &r in ranks {
        *counts.entry(r).or_insert(0) += 1;
    }
    let mut counts: Vec<(u8, u8)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    counts
}

fn is_flush(suits: &[u8; 5]) -> bool {
    suits[1..].iter().all(|&s| s == suits[0])
}

/// Highest card of a straight, or `None`. Handles the wheel (A-2-3-4-5, high=5).
fn straight_high(ranks: &[u8; 5]) -> Option<u8> {
    let mut unique = ranks.to_vec();
    unique.sort_unstable();
    unique.dedup();
    if unique.len() != 5 {
        return None;
    }
    if unique[4] - unique[0] == 4 {
        return Some(unique[4]);
    }
    if unique == [2, 3, 4, 5, 14] {
        return Some(5);
    }
    None
}

fn descending(ranks: &[u8; 5]) -> [u8; 5] {
    let mut sorted = *ranks;
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted
}

/// Scores a 5-card hand of card ids in `[0,51]`.
pub fn evaluate_5(cards: [u8; 5]) -> Score {
    let ranks: [u8; 5] = cards.map(|c| c % 13 + 2);
    let suits: [u8; 5] = cards.map(|c| c / 13);
    let flush = is_flush(&suits);
    let straight = straight_high(&ranks);
    let counts = rank_counts(&ranks);

    if flush {
        if let Some(high) = straight {
            return pack(Category::StraightFlush, &[high]);
        }
    }
    if counts[0].1 == 4 {
        return pack(Category::Quads, &[counts[0].0, counts[1].0]);
    }
    if counts[0].1 == 3 && counts[1].1 == 2 {
        return pack(Category::FullHouse, &[counts[0].0, counts[1].0]);
    }
    if flush {
        return pack(Category::Flush, &descending(&ranks));
    }
    if let Some(high) = straight {
        return pack(Category::Straight, &[high]);
    }
    if counts[0].1 == 3 {
        return pack(Category::Trips, &[counts[0].0, counts[1].0, counts[2].0]);
    }
    if counts[0].1 == 2 && counts[1].1 == 2 {
        return pack(Category::TwoPair, &[counts[0].0, counts[1].0, counts[2].0]);
    }
    if counts[0].1 == 2 {
        return pack(
            Category::Pair,
            &[counts[0].0, counts[1].0, counts[2].0, counts[3].0],
        );
    }
    pack(Category::HighCard, &descending(&ranks))
}

/// Scores the best 5-card hand out of 2 hole cards + a 5-card board, by
/// brute-force max over all `C(7,5) = 21` subsets (enumerated as the 21 ways
/// to exclude a pair of the 7 cards).
pub fn evaluate_7(hole: [u8; 2], board: [u8; 5]) -> Score {
    let cards = [hole[0], hole[1], board[0], board[1], board[2], board[3], board[4]];
    let mut best = 0;
    for i in 0..7 {
        for j in (i + 1)..7 {
            let mut five = [0u8; 5];
            let mut k = 0;
            for (idx, &card) in cards.iter().enumerate() {
                if idx != i && idx != j {
                    five[k] = card;
                    k += 1;
                }
            }
            best = best.max(evaluate_5(five));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids(notation: &str) -> [u8; 5] {
        let cards = crate::holdem::cards::Card::parse(notation).unwrap();
        assert_eq!(cards.len(), 5);
        let mut out = [0u8; 5];
        for (i, c) in cards.into_iter().enumerate() {
            out[i] = c.id();
        }
        out
    }

    #[test]
    fn quads_two_vs_quads_ace() {
        // four 2s + a 3 vs four aces + a 2: quads-A must beat quads-2.
        let quad_twos = [0, 13, 26, 39, 1];
        let quad_aces = [12, 25, 38, 51, 0];
        assert!(evaluate_5(quad_aces) > evaluate_5(quad_twos));
    }

    #[test]
    fn quads_kicker_disambiguates() {
        let aces_king_kicker = ids("Ac Ad Ah As Kc");
        let aces_queen_kicker = ids("Ac Ad Ah As Qc");
        assert!(evaluate_5(aces_king_kicker) > evaluate_5(aces_queen_kicker));
    }

    #[test]
    fn category_ordering_canonical_hands() {
        let hands = [
            ("2c 3d 5h 8s Td", Category::HighCard),
            ("2c 2d 5h 8s Td", Category::Pair),
            ("2c 2d 5h 5s Td", Category::TwoPair),
            ("2c 2d 2h 8s Td", Category::Trips),
            ("4c 5d 6h 7s 8d", Category::Straight),
            ("2c 5c 8c Tc Kc", Category::Flush),
            ("2c 2d 2h 5s 5d", Category::FullHouse),
            ("2c 2d 2h 2s 5d", Category::Quads),
            ("4c 5c 6c 7c 8c", Category::StraightFlush),
        ];
        let mut scores = Vec::new();
        for (notation, expected) in hands {
            let score = evaluate_5(ids(notation));
            scores.push((score, expected));
        }
        scores.sort_by_key(|(score, _)| *score);
        let expected_order = [
            Category::HighCard,
            Category::Pair,
            Category::TwoPair,
            Category::Trips,
            Category::Straight,
            Category::Flush,
            Category::FullHouse,
            Category::Quads,
            Category::StraightFlush,
        ];
        for ((_, got), want) in scores.iter().zip(expected_order.iter()) {
            assert_eq!(got, want);
        }
    }

    #[test]
    fn wheel_straight_high_is_five() {
        let wheel = ids("Ac 2d 3h 4s 5c");
        let six_high = ids("2c 3d 4h 5s 6c");
        assert!(evaluate_5(six_high) > evaluate_5(wheel));
    }

    #[test]
    fn evaluate_5_invariant_under_permutation() {
        let base = ids("4c 5d 6h 7s 8d");
        let mut shuffled = base;
        shuffled.reverse();
        assert_eq!(evaluate_5(base), evaluate_5(shuffled));
    }

    #[test]
    fn evaluate_7_is_max_over_21_subsets() {
        let hole = [0, 13]; // 2c 2d
        let board = [1, 14, 27, 40, 2]; // 3c 3d 3h 3s 4c
        let seven = [hole[0], hole[1], board[0], board[1], board[2], board[3], board[4]];
        let mut best = 0;
        let mut seen = HashSet::new();
        for i in 0..7 {
            for j in (i + 1)..7 {
                let mut five = Vec::with_capacity(5);
                for (idx, &c) in seven.iter().enumerate() {
                    if idx != i && idx != j {
                        five.push(c);
                    }
                }
                seen.insert(five.clone());
                let mut arr = [0u8; 5];
                arr.copy_from_slice(&five);
                best = best.max(evaluate_5(arr));
            }
        }
        assert_eq!(seen.len(), 21);
        assert_eq!(evaluate_7(hole, board), best);
    }
}
