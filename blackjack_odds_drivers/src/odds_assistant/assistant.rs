use self::private::Statistics;
use blackjack_odds::round::{Round, RoundEventHandler};
use blackjack_odds::{Card, Hand, MonteCarlo, RoundResult, StandardPolicy};
use blackjack_odds_drivers::Config;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod private {
    use blackjack_odds::RoundResult;

    #[derive(Debug, Clone, Copy, Default)]
    pub struct Statistics {
        player_wins: u32,
        dealer_wins: u32,
        ties: u32,
    }

    impl Statistics {
        pub fn record(&mut self, result: RoundResult) {
            match result {
                RoundResult::PlayerWin => self.player_wins += 1,
                RoundResult::DealerWin => self.dealer_wins += 1,
                RoundResult::Tie => self.ties += 1,
            }
        }

        pub fn get_rounds(&self) -> u32 {
            self.player_wins + self.dealer_wins + self.ties
        }

        pub fn get_win_rate(&self) -> f64 {
            if self.get_rounds() == 0 {
                return 0.0;
            }
            self.player_wins as f64 / self.get_rounds() as f64
        }

        pub fn get_player_wins(&self) -> u32 {
            self.player_wins
        }

        pub fn get_dealer_wins(&self) -> u32 {
            self.dealer_wins
        }

        pub fn get_ties(&self) -> u32 {
            self.ties
        }
    }
}

struct Handler {
    round_id: u32,
    runner: MonteCarlo,
    // Present when the run is seeded; one runner seed is drawn per estimate.
    seed_rng: Option<StdRng>,
    player_policy: StandardPolicy,
    dealer_policy: StandardPolicy,
    stat: Statistics,
}

impl Handler {
    fn next_runner(&mut self) -> MonteCarlo {
        match &mut self.seed_rng {
            Some(rng) => self.runner.with_seed(Some(rng.gen())),
            None => self.runner.clone(),
        }
    }
}

impl RoundEventHandler for Handler {
    fn on_deal(&mut self, round: &Round) {
        self.round_id += 1;
        println!("Round #{}", self.round_id);
        if let Some(upcard) = round.get_dealer_upcard() {
            println!("Dealer shows: {}", upcard);
        }
        println!(
            "Player cards: {} ({})",
            round.get_player_hand(),
            round.get_player_hand().value()
        );
    }

    fn on_decision_point(&mut self, round: &Round) {
        let odds = round.one_card_odds();
        println!(
            "  Next card: bust {:.2}%, exactly 21 {:.2}%",
            odds.bust * 100.0,
            odds.reach21 * 100.0
        );
        let runner = self.next_runner();
        match round.monte_carlo_odds(&runner, &self.player_policy, &self.dealer_policy) {
            Ok(distribution) => println!(
                "  Round: win {:.2}%, lose {:.2}%, tie {:.2}% (player bust {:.2}%, dealer bust {:.2}%)",
                distribution.player_win * 100.0,
                distribution.dealer_win * 100.0,
                distribution.tie * 100.0,
                distribution.player_bust * 100.0,
                distribution.dealer_bust * 100.0,
            ),
            Err(e) => log::warn!("Monte Carlo estimate unavailable: {e}"),
        }
    }

    fn on_player_hit(&mut self, card: Card, player_hand: &Hand) {
        println!("Player hits: {} -> {}", card, player_hand.value());
        if player_hand.is_bust() {
            println!("Player busts!");
        }
    }

    fn on_player_stand(&mut self, player_hand: &Hand) {
        println!("Player stands on {}", player_hand.value());
    }

    fn on_dealer_draw(&mut self, card: Card) {
        println!("Dealer draws: {}", card);
    }

    fn on_summary(&mut self, round: &Round, result: RoundResult) {
        let dealer_hand = round.get_dealer_hand();
        println!("Dealer cards: {} ({})", dealer_hand, dealer_hand.value());
        let verdict = match result {
            RoundResult::PlayerWin => "Player wins",
            RoundResult::DealerWin => "Dealer wins",
            RoundResult::Tie => "Tie",
        };
        println!("{}", verdict);

        self.stat.record(result);
        println!(
            "Rounds: {}. Player {} / Dealer {} / Tie {}. Win rate: {:.2}%.",
            self.stat.get_rounds(),
            self.stat.get_player_wins(),
            self.stat.get_dealer_wins(),
            self.stat.get_ties(),
            self.stat.get_win_rate() * 100.0,
        );
        println!("----------------------------------------------------");
    }
}

/// Plays `rounds` rounds with the configured policies, printing the odds at
/// every player decision.
pub fn play_rounds(config: &Config, rounds: u32) -> Result<(), Box<dyn std::error::Error>> {
    let player_policy: StandardPolicy = config.player_policy.clone().try_into()?;
    let dealer_policy: StandardPolicy = config.dealer_policy.clone().try_into()?;
    let mut rng = match config.odds.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut handler = Handler {
        round_id: 0,
        runner: config.odds.to_runner(),
        seed_rng: config.odds.seed.map(|_| StdRng::seed_from_u64(rng.gen())),
        player_policy,
        dealer_policy,
        stat: Statistics::default(),
    };
    log::info!(
        "Playing {} rounds, player {:?} against dealer {:?}",
        rounds,
        player_policy,
        dealer_policy
    );

    for _ in 0..rounds {
        let mut round = Round::deal(&mut rng)?;
        round.play_automatically(&player_policy, &dealer_policy, &mut handler)?;
    }
    Ok(())
}
