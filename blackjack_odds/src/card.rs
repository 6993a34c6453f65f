use serde::{Deserialize, Serialize};
use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use std::str::FromStr;
use strum_macros::EnumIter;
use thiserror::Error;

static RANK_TO_POINT_VALUE: [u32; 13] = [11, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Serialize_enum_str,
    Deserialize_enum_str,
)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Rank {
    /// Face value used for hand totals. Aces are provisionally worth 11.
    pub fn point_value(&self) -> u32 {
        RANK_TO_POINT_VALUE[*self as usize]
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Serialize_enum_str,
    Deserialize_enum_str,
)]
pub enum Suit {
    #[serde(rename = "H")]
    Heart,
    #[serde(rename = "D")]
    Diamond,
    #[serde(rename = "C")]
    Club,
    #[serde(rename = "S")]
    Spade,
}

impl Suit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Suit::Heart => "H",
            Suit::Diamond => "D",
            Suit::Club => "C",
            Suit::Spade => "S",
        }
    }
}

/// A playing card. Only the rank contributes to the hand value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    pub fn point_value(&self) -> u32 {
        self.rank.point_value()
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }

    /// Stable `{rank}{suit}` identity, e.g. `AH`, `10C` or `KS`. Presentation
    /// layers key their card assets on this string.
    pub fn identity(&self) -> String {
        format!("{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardParseError {
    #[error("Card identity is empty")]
    Empty,
    #[error("Unknown rank in card identity: {0}")]
    Rank(String),
    #[error("Unknown suit in card identity: {0}")]
    Suit(String),
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (suit_index, _) = s.char_indices().last().ok_or(CardParseError::Empty)?;
        let (rank, suit) = s.split_at(suit_index);
        let rank: Rank = rank
            .parse()
            .map_err(|_| CardParseError::Rank(rank.to_string()))?;
        let suit: Suit = suit
            .parse()
            .map_err(|_| CardParseError::Suit(suit.to_string()))?;
        Ok(Card { rank, suit })
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.suit as u8 * 13 + card.rank as u8
    }
}

impl TryFrom<u8> for Card {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use strum::IntoEnumIterator;

        if value >= 52 {
            return Err(());
        }
        let suit = Suit::iter().nth((value / 13) as usize).ok_or(())?;
        let rank = Rank::iter().nth((value % 13) as usize).ok_or(())?;
        Ok(Card { rank, suit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn point_values_follow_rank() {
        assert_eq!(Rank::Ace.point_value(), 11);
        assert_eq!(Rank::Seven.point_value(), 7);
        assert_eq!(Rank::Ten.point_value(), 10);
        assert_eq!(Rank::Jack.point_value(), 10);
        assert_eq!(Rank::King.point_value(), 10);
    }

    #[test]
    fn identity_is_rank_then_suit() {
        assert_eq!(Card::new(Rank::Ace, Suit::Heart).identity(), "AH");
        assert_eq!(Card::new(Rank::Ten, Suit::Club).identity(), "10C");
        assert_eq!(Card::new(Rank::Queen, Suit::Spade).to_string(), "QS");
    }

    #[test]
    fn every_identity_parses_back() {
        for suit in Suit::iter() {
            for rank in Rank::iter() {
                let card = Card::new(rank, suit);
                assert_eq!(card.identity().parse::<Card>(), Ok(card));
            }
        }
    }

    #[test]
    fn malformed_identities_are_rejected() {
        assert_eq!("".parse::<Card>(), Err(CardParseError::Empty));
        assert_eq!(
            "1H".parse::<Card>(),
            Err(CardParseError::Rank(String::from("1")))
        );
        assert_eq!(
            "KX".parse::<Card>(),
            Err(CardParseError::Suit(String::from("X")))
        );
        assert!("K♥".parse::<Card>().is_err());
    }

    #[test]
    fn index_conversion_covers_all_cards() {
        for index in 0..52u8 {
            let card = Card::try_from(index).unwrap();
            let back: u8 = card.into();
            assert_eq!(back, index);
        }
        assert!(Card::try_from(52).is_err());
    }
}
