use crate::calculation::probability_bust_on_next_draw;
use crate::hand::{hand_value, BLACKJACK};
use crate::Card;
use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};

/// Value at or below which the house rule keeps drawing.
pub const DEALER_DRAW_LIMIT: u32 = 16;

/// Decides whether a hand should draw another card.
///
/// `remaining` is the population of cards that could still be drawn. Any
/// `Fn(&[Card], &[Card]) -> bool` closure is a policy.
pub trait Policy {
    fn should_draw(&self, hand: &[Card], remaining: &[Card]) -> bool;
}

impl<F> Policy for F
where
    F: Fn(&[Card], &[Card]) -> bool,
{
    fn should_draw(&self, hand: &[Card], remaining: &[Card]) -> bool {
        self(hand, remaining)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize_enum_str, Deserialize_enum_str)]
pub enum PolicyKind {
    DealerRule,
    StandOn,
    NeverDraw,
    MaxBustRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StandardPolicy {
    /// Draw while the hand is worth 16 or less.
    #[default]
    DealerRule,
    /// Draw while the hand is worth less than the given value.
    StandOn(u32),
    NeverDraw,
    /// Draw while the chance of busting on the next card is at most the
    /// given probability.
    MaxBustRisk(f64),
}

impl StandardPolicy {
    /// Builds a policy from its configured kind. `stand_on` is only read by
    /// `StandOn` and `max_bust_probability` only by `MaxBustRisk`.
    pub fn from_kind(kind: PolicyKind, stand_on: u32, max_bust_probability: f64) -> Self {
        match kind {
            PolicyKind::DealerRule => StandardPolicy::DealerRule,
            PolicyKind::StandOn => StandardPolicy::StandOn(stand_on),
            PolicyKind::NeverDraw => StandardPolicy::NeverDraw,
            PolicyKind::MaxBustRisk => StandardPolicy::MaxBustRisk(max_bust_probability),
        }
    }
}

impl Policy for StandardPolicy {
    fn should_draw(&self, hand: &[Card], remaining: &[Card]) -> bool {
        match *self {
            StandardPolicy::DealerRule => hand_value(hand) <= DEALER_DRAW_LIMIT,
            StandardPolicy::StandOn(stand_on) => hand_value(hand) < stand_on,
            StandardPolicy::NeverDraw => false,
            StandardPolicy::MaxBustRisk(max_bust_probability) => {
                hand_value(hand) < BLACKJACK
                    && !remaining.is_empty()
                    && probability_bust_on_next_draw(remaining, hand) <= max_bust_probability
            }
        }
    }
}
