use crate::hand::{hand_value, settle, RoundResult, BLACKJACK};
use crate::strategy::Policy;
use crate::{Card, OddsError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use std::time::Instant;

pub const DEFAULT_TRIALS: usize = 2000;
/// Trials per independently seeded batch. Fixed so that a seeded run does not
/// depend on the number of threads.
const BATCH_SIZE: usize = 250;

/// Empirical probabilities of how the round ends. `player_win`, `dealer_win`
/// and `tie` partition the trials; the bust fields overlap with them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeDistribution {
    pub player_win: f64,
    pub dealer_win: f64,
    pub tie: f64,
    pub player_bust: f64,
    pub dealer_bust: f64,
}

/// Raw outcome counts of a number of trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub player_win: u64,
    pub dealer_win: u64,
    pub tie: u64,
    pub player_bust: u64,
    pub dealer_bust: u64,
}

impl OutcomeTally {
    pub fn record(&mut self, player_value: u32, dealer_value: u32) {
        if player_value > BLACKJACK {
            self.player_bust += 1;
        } else if dealer_value > BLACKJACK {
            self.dealer_bust += 1;
        }
        match settle(player_value, dealer_value) {
            RoundResult::PlayerWin => self.player_win += 1,
            RoundResult::DealerWin => self.dealer_win += 1,
            RoundResult::Tie => self.tie += 1,
        }
    }

    pub fn get_total(&self) -> u64 {
        self.player_win + self.dealer_win + self.tie
    }

    pub fn to_distribution(&self) -> OutcomeDistribution {
        let total = self.get_total();
        if total == 0 {
            return OutcomeDistribution::default();
        }
        let total = total as f64;
        OutcomeDistribution {
            player_win: self.player_win as f64 / total,
            dealer_win: self.dealer_win as f64 / total,
            tie: self.tie as f64 / total,
            player_bust: self.player_bust as f64 / total,
            dealer_bust: self.dealer_bust as f64 / total,
        }
    }
}

impl AddAssign<&OutcomeTally> for OutcomeTally {
    fn add_assign(&mut self, rhs: &OutcomeTally) {
        self.player_win += rhs.player_win;
        self.dealer_win += rhs.dealer_win;
        self.tie += rhs.tie;
        self.player_bust += rhs.player_bust;
        self.dealer_bust += rhs.dealer_bust;
    }
}

/// Draws from the end of `deck` into `hand` until the hand busts, the policy
/// stops or the deck runs out.
fn play_out<P: Policy + ?Sized>(hand: &mut Vec<Card>, deck: &mut Vec<Card>, policy: &P) {
    while hand_value(hand) <= BLACKJACK && policy.should_draw(hand, deck) {
        match deck.pop() {
            Some(card) => hand.push(card),
            None => break,
        }
    }
}

/// Runs `trials` random completions of the round, reusing the given buffers.
fn run_trials<P, D, R>(
    remaining: &[Card],
    player_hand: &[Card],
    dealer_hand: &[Card],
    player_policy: &P,
    dealer_policy: &D,
    trials: usize,
    rng: &mut R,
) -> OutcomeTally
where
    P: Policy + ?Sized,
    D: Policy + ?Sized,
    R: Rng + ?Sized,
{
    let mut tally = OutcomeTally::default();
    let mut deck = Vec::with_capacity(remaining.len());
    let mut player = Vec::with_capacity(player_hand.len() + remaining.len());
    let mut dealer = Vec::with_capacity(dealer_hand.len() + remaining.len());

    for _ in 0..trials {
        deck.clear();
        deck.extend_from_slice(remaining);
        deck.shuffle(rng);
        player.clear();
        player.extend_from_slice(player_hand);
        dealer.clear();
        dealer.extend_from_slice(dealer_hand);

        play_out(&mut player, &mut deck, player_policy);
        play_out(&mut dealer, &mut deck, dealer_policy);

        tally.record(hand_value(&player), hand_value(&dealer));
    }

    tally
}

/// Estimates the outcome distribution of the round by playing it to the end
/// `trials` times, each time over an independent shuffle of `remaining`.
/// The player plays first, then the dealer.
pub fn simulate_round_completion<P, D, R>(
    remaining: &[Card],
    player_hand: &[Card],
    dealer_hand: &[Card],
    player_policy: &P,
    dealer_policy: &D,
    trials: usize,
    rng: &mut R,
) -> Result<OutcomeDistribution, OddsError>
where
    P: Policy + ?Sized,
    D: Policy + ?Sized,
    R: Rng + ?Sized,
{
    if trials == 0 {
        return Err(OddsError::InvalidTrialCount(trials));
    }
    let tally = run_trials(
        remaining,
        player_hand,
        dealer_hand,
        player_policy,
        dealer_policy,
        trials,
        rng,
    );
    Ok(tally.to_distribution())
}

/// Batched, multithreaded Monte Carlo runner.
#[derive(Debug, Clone)]
pub struct MonteCarlo {
    trials: usize,
    number_of_threads: usize,
    seed: Option<u64>,
}

impl Default for MonteCarlo {
    fn default() -> Self {
        MonteCarlo {
            trials: DEFAULT_TRIALS,
            number_of_threads: 1,
            seed: None,
        }
    }
}

impl MonteCarlo {
    /// `number_of_threads == 0` means one thread per available core.
    pub fn new(trials: usize, number_of_threads: usize, seed: Option<u64>) -> Self {
        let number_of_threads = {
            if number_of_threads == 0 {
                let parallelism = std::thread::available_parallelism();
                match parallelism {
                    Ok(n) => n.get(),
                    Err(_) => 1,
                }
            } else {
                number_of_threads
            }
        };
        MonteCarlo {
            trials,
            number_of_threads,
            seed,
        }
    }

    pub fn get_trials(&self) -> usize {
        self.trials
    }

    pub fn get_number_of_threads(&self) -> usize {
        self.number_of_threads
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// The same runner with a different master seed.
    pub fn with_seed(&self, seed: Option<u64>) -> MonteCarlo {
        MonteCarlo {
            seed,
            ..self.clone()
        }
    }

    pub fn run<P, D>(
        &self,
        remaining: &[Card],
        player_hand: &[Card],
        dealer_hand: &[Card],
        player_policy: &P,
        dealer_policy: &D,
    ) -> Result<OutcomeDistribution, OddsError>
    where
        P: Policy + Sync + ?Sized,
        D: Policy + Sync + ?Sized,
    {
        if self.trials == 0 {
            return Err(OddsError::InvalidTrialCount(self.trials));
        }
        let started = Instant::now();

        let mut master = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let number_of_batches = (self.trials + BATCH_SIZE - 1) / BATCH_SIZE;
        let batches: Vec<(u64, usize)> = (0..number_of_batches)
            .map(|i| {
                let size = BATCH_SIZE.min(self.trials - i * BATCH_SIZE);
                (master.gen(), size)
            })
            .collect();

        let number_of_threads = self.number_of_threads.clamp(1, number_of_batches);
        log::debug!(
            "Monte Carlo run: {} trials in {} batches on {} threads",
            self.trials,
            number_of_batches,
            number_of_threads
        );

        let run_batch = |&(seed, size): &(u64, usize)| {
            let mut rng = StdRng::seed_from_u64(seed);
            run_trials(
                remaining,
                player_hand,
                dealer_hand,
                player_policy,
                dealer_policy,
                size,
                &mut rng,
            )
        };

        let mut tally = OutcomeTally::default();
        if number_of_threads == 1 {
            for batch in &batches {
                tally += &run_batch(batch);
            }
        } else {
            let run_batch = &run_batch;
            let batches = &batches;
            let partial_tallies: Vec<OutcomeTally> = std::thread::scope(|scope| {
                let handles: Vec<_> = (0..number_of_threads)
                    .map(|thread_index| {
                        scope.spawn(move || {
                            let mut partial = OutcomeTally::default();
                            for batch in batches.iter().skip(thread_index).step_by(number_of_threads)
                            {
                                partial += &run_batch(batch);
                            }
                            partial
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| match handle.join() {
                        Ok(partial) => partial,
                        Err(panic) => std::panic::resume_unwind(panic),
                    })
                    .collect()
            });
            for partial in &partial_tallies {
                tally += partial;
            }
        }

        log::debug!(
            "Monte Carlo run finished in {:?}: {:?}",
            started.elapsed(),
            tally
        );
        Ok(tally.to_distribution())
    }
}
