use crate::Card;
use serde::{Deserialize, Serialize};

pub const BLACKJACK: u32 = 21;

/// Calculate the value of a blackjack hand.
///
/// Aces start at 11 and are demoted to 1, one at a time, only while the total
/// exceeds 21. The result may still exceed 21, which means the hand is bust.
pub fn hand_value(cards: &[Card]) -> u32 {
    let mut total = 0;
    let mut aces = 0;

    for card in cards {
        total += card.point_value();
        if card.is_ace() {
            aces += 1;
        }
    }

    while total > BLACKJACK && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

pub fn is_bust(cards: &[Card]) -> bool {
    hand_value(cards) > BLACKJACK
}

/// Check if the hand still counts one of its aces as 11.
pub fn is_soft(cards: &[Card]) -> bool {
    let hard_total: u32 = cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { c.point_value() })
        .sum();
    cards.iter().any(Card::is_ace) && hard_total + 10 == hand_value(cards)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    PlayerWin,
    DealerWin,
    Tie,
}

/// Decides a finished round. A bust player loses even if the dealer busts too.
pub fn settle(player_value: u32, dealer_value: u32) -> RoundResult {
    if player_value > BLACKJACK {
        RoundResult::DealerWin
    } else if dealer_value > BLACKJACK || player_value > dealer_value {
        RoundResult::PlayerWin
    } else if player_value < dealer_value {
        RoundResult::DealerWin
    } else {
        RoundResult::Tie
    }
}

/// The cards of one participant, in the order they were dealt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(5),
        }
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
        }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn value(&self) -> u32 {
        hand_value(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        is_bust(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, Suit};

    fn cards(identities: &[&str]) -> Vec<Card> {
        identities.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn empty_hand_is_zero() {
        assert_eq!(hand_value(&[]), 0);
    }

    #[test]
    fn hand_without_aces_is_plain_sum() {
        assert_eq!(hand_value(&cards(&["2H", "3S"])), 5);
        assert_eq!(hand_value(&cards(&["KH", "QS"])), 20);
        assert_eq!(hand_value(&cards(&["KH", "QS", "5C"])), 25);
    }

    #[test]
    fn soft_ace_counts_eleven() {
        assert_eq!(hand_value(&cards(&["AH", "6S"])), 17);
        assert_eq!(hand_value(&cards(&["AH", "KS"])), 21);
    }

    #[test]
    fn aces_are_demoted_one_at_a_time() {
        assert_eq!(hand_value(&cards(&["AH", "AS"])), 12);
        assert_eq!(hand_value(&cards(&["AH", "AS", "AC", "8D"])), 21);
        assert_eq!(hand_value(&cards(&["AH", "6S", "9C"])), 16);
        assert_eq!(hand_value(&cards(&["AH", "AS", "9C"])), 21);
    }

    #[test]
    fn demotion_never_increases_total() {
        let deck = crate::Deck::ordered();
        for window in deck.remaining().windows(4) {
            let undemoted: u32 = window.iter().map(Card::point_value).sum();
            assert!(hand_value(window) <= undemoted);
        }
    }

    #[test]
    fn very_long_hand_does_not_overflow() {
        let hand = vec![Card::new(Rank::King, Suit::Spade); 300];
        assert_eq!(hand_value(&hand), 3000);
        let aces = vec![Card::new(Rank::Ace, Suit::Spade); 5];
        assert_eq!(hand_value(&aces), 15);
    }

    #[test]
    fn test_is_bust() {
        assert!(is_bust(&cards(&["KH", "QS", "5C"])));
        assert!(!is_bust(&cards(&["KH", "QS"])));
    }

    #[test]
    fn test_is_soft() {
        assert!(is_soft(&cards(&["AH", "6S"])));
        assert!(!is_soft(&cards(&["AH", "6S", "9C"])));
        assert!(!is_soft(&cards(&["KH", "QS"])));
        assert!(is_soft(&cards(&["AH", "AS"])));
    }

    #[test]
    fn settle_rounds() {
        assert_eq!(settle(22, 22), RoundResult::DealerWin);
        assert_eq!(settle(15, 23), RoundResult::PlayerWin);
        assert_eq!(settle(20, 19), RoundResult::PlayerWin);
        assert_eq!(settle(18, 19), RoundResult::DealerWin);
        assert_eq!(settle(19, 19), RoundResult::Tie);
    }

    #[test]
    fn hand_struct_tracks_cards() {
        let mut hand = Hand::new();
        assert!(hand.is_empty());
        hand.add_card("KH".parse().unwrap());
        hand.add_card("7S".parse().unwrap());
        assert_eq!(hand.value(), 17);
        assert_eq!(hand.len(), 2);
        assert_eq!(hand.to_string(), "KH 7S");
        hand.add_card("9D".parse().unwrap());
        assert!(hand.is_bust());
    }
}
