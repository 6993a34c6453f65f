use crate::hand::{hand_value, BLACKJACK};
use crate::Card;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OneCardOdds {
    pub bust: f64,
    pub reach21: f64,
}

/// Total of a hand worth `current` after drawing `card`. Only the drawn card
/// may be demoted; aces already in the hand have been resolved in `current`.
fn total_after_draw(current: u32, card: &Card) -> u32 {
    let total = current + card.point_value();
    if total > BLACKJACK && card.is_ace() {
        total - 10
    } else {
        total
    }
}

fn fraction_of_draws<F>(remaining: &[Card], hand: &[Card], predicate: F) -> f64
where
    F: Fn(u32) -> bool,
{
    if remaining.is_empty() {
        return 0.0;
    }
    let current = hand_value(hand);
    let hits = remaining
        .iter()
        .filter(|card| predicate(total_after_draw(current, card)))
        .count();
    hits as f64 / remaining.len() as f64
}

/// Probability that the next card drawn from `remaining` busts `hand`.
/// Returns 0.0 when nothing is left to draw.
pub fn probability_bust_on_next_draw(remaining: &[Card], hand: &[Card]) -> f64 {
    fraction_of_draws(remaining, hand, |total| total > BLACKJACK)
}

/// Probability that the next card drawn from `remaining` brings `hand` to
/// exactly 21. Returns 0.0 when nothing is left to draw.
pub fn probability_reach_21_on_next_draw(remaining: &[Card], hand: &[Card]) -> f64 {
    fraction_of_draws(remaining, hand, |total| total == BLACKJACK)
}

/// Both one-card probabilities, enumerated in a single pass.
pub fn one_card_odds(remaining: &[Card], hand: &[Card]) -> OneCardOdds {
    if remaining.is_empty() {
        return OneCardOdds::default();
    }

    let current = hand_value(hand);
    let (mut bust, mut reach21) = (0usize, 0usize);
    for card in remaining {
        match total_after_draw(current, card) {
            total if total > BLACKJACK => bust += 1,
            BLACKJACK => reach21 += 1,
            _ => {}
        }
    }

    let population = remaining.len() as f64;
    OneCardOdds {
        bust: bust as f64 / population,
        reach21: reach21 as f64 / population,
    }
}
