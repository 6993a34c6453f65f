use crate::{Card, OddsError, Rank, Suit};

use strum::IntoEnumIterator;

use rand::seq::SliceRandom;
use rand::Rng;

pub const DECK_SIZE: usize = 52;

/// A single 52-card deck. Cards are drawn from the end of the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Creates a new deck with ordered cards.
    pub fn ordered() -> Deck {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::iter() {
            for rank in Rank::iter() {
                cards.push(Card { rank, suit });
            }
        }
        Deck { cards }
    }

    /// Creates a new deck whose order is a uniform random permutation.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Deck {
        let mut deck = Deck::ordered();
        deck.shuffle(rng);
        deck
    }

    /// Wraps an explicit card sequence. The last card is the next to be drawn.
    pub fn from_cards(cards: Vec<Card>) -> Deck {
        Deck { cards }
    }

    /// Shuffles the cards that have not been drawn yet.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes and returns the card at the draw end.
    pub fn draw_top(&mut self) -> Result<Card, OddsError> {
        self.cards.pop().ok_or(OddsError::EmptyDeck)
    }

    /// The cards not drawn yet, in deck order.
    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
