use std::fmt::{Display, Formatter, Result as FmtResult};

/// A card id in `[0,51]`. Rank = `(id % 13) + 2` (14 = Ace), suit = `id / 13`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card(u8);

impl Card {
    pub fn new(id: u8) -> Self {
        assert!(id < 52, "card id out of range: {id}");
        Self(id)
    }

    pub fn id(self) -> u8 {
        self.0
    }

    /// 2..=14, where 14 is Ace.
    pub fn rank(self) -> u8 {
        self.0 % 13 + 2
    }

    /// 0..=3.
    pub fn suit(self) -> u8 {
        self.0 / 13
    }

    fn rank_char(rank: u8) -> char {
        match rank {
            2..=9 => (b'0' + rank) as char,
            10 => 'T',
            11 => 'J',
            12 => 'Q',
            13 => 'K',
            14 => 'A',
            _ => unreachable!("rank out of range: {rank}"),
        }
    }

    fn suit_char(suit: u8) -> char {
        match suit {
            0 => 'c',
            1 => 'd',
            2 => 'h',
            3 => 's',
            _ => unreachable!("suit out of range: {suit}"),
        }
    }

    /// Parses a whitespace-separated run of two-character card notations, e.g. `"As Ks"`.
    pub fn parse(s: &str) -> Result<Vec<Card>, String> {
        s.split_whitespace().map(Card::try_from).collect()
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(
            f,
            "{}{}",
            Self::rank_char(self.rank()),
            Self::suit_char(self.suit())
        )
    }
}

impl TryFrom<&str> for Card {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(format!("card notation must be 2 characters: {s:?}"));
        }
        let rank: u8 = match chars[0].to_ascii_uppercase() {
            c @ '2'..='9' => c as u8 - b'0',
            'T' => 10,
            'J' => 11,
            'Q' => 12,
            'K' => 13,
            'A' => 14,
            c => return Err(format!("invalid rank character: {c}")),
        };
        let suit: u8 = match chars[1].to_ascii_lowercase() {
            'c' => 0,
            'd' => 1,
            'h' => 2,
            's' => 3,
            c => return Err(format!("invalid suit character: {c}")),
        };
        Ok(Self::new((rank - 2) + suit * 13))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_and_suit_arithmetic() {
        assert_eq!(Card::new(0).rank(), 2);
        assert_eq!(Card::new(0).suit(), 0);
        assert_eq!(Card::new(12).rank(), 14);
        assert_eq!(Card::new(12).suit(), 0);
        assert_eq!(Card::new(13).rank(), 2);
        assert_eq!(Card::new(13).suit(), 1);
        assert_eq!(Card::new(51).rank(), 14);
        assert_eq!(Card::new(51).suit(), 3);
    }

    #[test]
    fn display_parse_roundtrip() {
        for id in 0..52u8 {
            let card = Card::new(id);
            let parsed = Card::try_from(card.to_string().as_str()).unwrap();
            assert_eq!(card, parsed);
        }
    }

    #[test]
    fn parse_rejects_bad_notation() {
        assert!(Card::try_from("Ax").is_err());
        assert!(Card::try_from("A").is_err());
        assert!(Card::try_from("Ass").is_err());
    }

    #[test]
    fn parse_splits_whitespace_separated_run() {
        let cards = Card::parse("2c 3d 4h 5s Ac").unwrap();
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[4].rank(), 14);
    }
}
