pub mod calculation;
mod card;
mod deck;
mod error;
pub mod hand;
pub mod round;
pub mod simulation;
pub mod strategy;

pub use calculation::{
    probability_bust_on_next_draw, probability_reach_21_on_next_draw, OneCardOdds,
};
pub use card::{Card, CardParseError, Rank, Suit};
pub use deck::{Deck, DECK_SIZE};
pub use error::OddsError;
pub use hand::{hand_value, Hand, RoundResult};
pub use simulation::{simulate_round_completion, MonteCarlo, OutcomeDistribution};
pub use strategy::{Policy, PolicyKind, StandardPolicy};

/// Builds the 52 cards of a deck in a uniformly random order.
pub fn build_and_shuffle_deck() -> Deck {
    Deck::shuffled(&mut rand::thread_rng())
}

pub fn value_of(hand: &[Card]) -> u32 {
    hand_value(hand)
}

/// Exact bust and reach-21 probabilities of the next card.
pub fn one_card_odds(remaining: &[Card], hand: &[Card]) -> OneCardOdds {
    calculation::one_card_odds(remaining, hand)
}

/// Monte Carlo estimate of the round outcome. Missing policies default to the
/// dealer rule (draw while 16 or less).
pub fn monte_carlo_odds(
    remaining: &[Card],
    player_hand: &[Card],
    dealer_hand: &[Card],
    trials: usize,
    player_policy: Option<&(dyn Policy + Sync)>,
    dealer_policy: Option<&(dyn Policy + Sync)>,
) -> Result<OutcomeDistribution, OddsError> {
    let default_policy = StandardPolicy::DealerRule;
    let player_policy = player_policy.unwrap_or(&default_policy);
    let dealer_policy = dealer_policy.unwrap_or(&default_policy);
    MonteCarlo::new(trials, 1, None).run(
        remaining,
        player_hand,
        dealer_hand,
        player_policy,
        dealer_policy,
    )
}
