use crate::calculation::{one_card_odds, OneCardOdds};
use crate::hand::{settle, Hand, RoundResult};
use crate::simulation::{MonteCarlo, OutcomeDistribution};
use crate::strategy::Policy;
use crate::{Card, Deck, OddsError};

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    PlayerTurn,
    DealerTurn,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
}

/// One round of single-deck blackjack between a player and the dealer.
#[derive(Debug, Clone)]
pub struct Round {
    deck: Deck,
    player_hand: Hand,
    dealer_hand: Hand,
    current_game_phase: GamePhase,
    history: Vec<Action>,
}

impl Round {
    /// Shuffles a fresh deck and deals two cards each, player first.
    pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Result<Round, OddsError> {
        Round::deal_from(Deck::shuffled(rng))
    }

    /// Deals the initial cards from the draw end of the given deck.
    pub fn deal_from(mut deck: Deck) -> Result<Round, OddsError> {
        let mut player_hand = Hand::new();
        let mut dealer_hand = Hand::new();
        for _ in 0..2 {
            player_hand.add_card(deck.draw_top()?);
            dealer_hand.add_card(deck.draw_top()?);
        }
        log::trace!("Dealt player {} and dealer {}", player_hand, dealer_hand);

        let current_game_phase = if player_hand.is_bust() {
            GamePhase::Finished
        } else {
            GamePhase::PlayerTurn
        };
        Ok(Round {
            deck,
            player_hand,
            dealer_hand,
            current_game_phase,
            history: Vec::new(),
        })
    }

    /// Draws a card for the player. Returns `None` when it is not the
    /// player's turn or the deck has run out.
    pub fn player_hit(&mut self) -> Result<Option<Card>, OddsError> {
        if self.current_game_phase != GamePhase::PlayerTurn {
            return Ok(None);
        }
        self.history.push(Action::Hit);
        if self.deck.is_empty() {
            return Ok(None);
        }

        let card = self.deck.draw_top()?;
        self.player_hand.add_card(card);
        log::trace!("Player draws {}, now {}", card, self.player_hand.value());
        // A bust ends the round; the dealer does not play.
        if self.player_hand.is_bust() {
            self.current_game_phase = GamePhase::Finished;
        }
        Ok(Some(card))
    }

    pub fn player_stand(&mut self) {
        if self.current_game_phase == GamePhase::PlayerTurn {
            self.history.push(Action::Stand);
            self.current_game_phase = GamePhase::DealerTurn;
        }
    }

    /// Lets the dealer draw according to `policy` and finishes the round.
    /// Returns the cards drawn. Running out of cards ends the dealer's turn.
    pub fn dealer_play<P: Policy + ?Sized>(&mut self, policy: &P) -> Result<Vec<Card>, OddsError> {
        if self.current_game_phase != GamePhase::DealerTurn {
            return Ok(Vec::new());
        }

        let mut drawn = Vec::new();
        while !self.dealer_hand.is_bust()
            && policy.should_draw(self.dealer_hand.cards(), self.deck.remaining())
        {
            if self.deck.is_empty() {
                break;
            }
            let card = self.deck.draw_top()?;
            self.dealer_hand.add_card(card);
            drawn.push(card);
        }
        log::trace!("Dealer finishes with {}", self.dealer_hand.value());
        self.current_game_phase = GamePhase::Finished;
        Ok(drawn)
    }

    pub fn is_over(&self) -> bool {
        self.current_game_phase == GamePhase::Finished
    }

    /// The result of the round, once it is finished.
    pub fn result(&self) -> Option<RoundResult> {
        if !self.is_over() {
            return None;
        }
        Some(settle(self.player_hand.value(), self.dealer_hand.value()))
    }

    /// Exact odds for the player's next card over the cards not dealt yet.
    pub fn one_card_odds(&self) -> OneCardOdds {
        one_card_odds(self.deck.remaining(), self.player_hand.cards())
    }

    /// Monte Carlo estimate of how the round ends from the current state.
    pub fn monte_carlo_odds<P, D>(
        &self,
        runner: &MonteCarlo,
        player_policy: &P,
        dealer_policy: &D,
    ) -> Result<OutcomeDistribution, OddsError>
    where
        P: Policy + Sync + ?Sized,
        D: Policy + Sync + ?Sized,
    {
        runner.run(
            self.deck.remaining(),
            self.player_hand.cards(),
            self.dealer_hand.cards(),
            player_policy,
            dealer_policy,
        )
    }

    /// Plays the whole round with the given policies, reporting every step to
    /// `handler`. Returns the result.
    pub fn play_automatically<P, D, U>(
        &mut self,
        player_policy: &P,
        dealer_policy: &D,
        handler: &mut U,
    ) -> Result<RoundResult, OddsError>
    where
        P: Policy + ?Sized,
        D: Policy + ?Sized,
        U: RoundEventHandler,
    {
        handler.on_deal(self);

        while self.current_game_phase == GamePhase::PlayerTurn {
            handler.on_decision_point(self);
            if player_policy.should_draw(self.player_hand.cards(), self.deck.remaining()) {
                match self.player_hit()? {
                    Some(card) => handler.on_player_hit(card, &self.player_hand),
                    None => {
                        self.player_stand();
                        handler.on_player_stand(&self.player_hand);
                    }
                }
            } else {
                self.player_stand();
                handler.on_player_stand(&self.player_hand);
            }
        }

        for card in self.dealer_play(dealer_policy)? {
            handler.on_dealer_draw(card);
        }

        let result = settle(self.player_hand.value(), self.dealer_hand.value());
        handler.on_summary(self, result);
        Ok(result)
    }

    pub fn get_game_phase(&self) -> GamePhase {
        self.current_game_phase
    }

    pub fn get_player_hand(&self) -> &Hand {
        &self.player_hand
    }

    pub fn get_dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    /// The dealer's first card, the only one the player sees before the
    /// dealer's turn.
    pub fn get_dealer_upcard(&self) -> Option<Card> {
        self.dealer_hand.cards().first().copied()
    }

    pub fn get_deck(&self) -> &Deck {
        &self.deck
    }

    pub fn history(&self) -> &[Action] {
        &self.history
    }
}

pub trait RoundEventHandler {
    fn on_deal(&mut self, round: &Round);
    fn on_decision_point(&mut self, round: &Round);
    fn on_player_hit(&mut self, card: Card, player_hand: &Hand);
    fn on_player_stand(&mut self, player_hand: &Hand);
    fn on_dealer_draw(&mut self, card: Card);
    fn on_summary(&mut self, round: &Round, result: RoundResult);
}
