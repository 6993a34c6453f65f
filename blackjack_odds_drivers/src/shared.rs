use blackjack_odds::{MonteCarlo, PolicyKind, StandardPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Unknown policy kind: {0}")]
    PolicyKind(#[from] serde::de::value::Error),
    #[error("max_bust_probability must be within [0, 1], got {0}")]
    BustProbability(f64),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub odds: ConfigOdds,
    #[serde(default)]
    pub player_policy: ConfigPolicy,
    #[serde(default)]
    pub dealer_policy: ConfigPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigOdds {
    pub trials: usize,
    /// 0 means one thread per available core.
    pub number_of_threads: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ConfigOdds {
    fn default() -> Self {
        ConfigOdds {
            trials: blackjack_odds::simulation::DEFAULT_TRIALS,
            number_of_threads: 0,
            seed: None,
        }
    }
}

impl ConfigOdds {
    pub fn to_runner(&self) -> MonteCarlo {
        MonteCarlo::new(self.trials, self.number_of_threads, self.seed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigPolicy {
    pub kind: String,
    #[serde(default = "default_stand_on")]
    pub stand_on: u32,
    #[serde(default = "default_max_bust_probability")]
    pub max_bust_probability: f64,
}

fn default_stand_on() -> u32 {
    17
}

fn default_max_bust_probability() -> f64 {
    0.5
}

impl Default for ConfigPolicy {
    fn default() -> Self {
        ConfigPolicy {
            kind: String::from("DealerRule"),
            stand_on: default_stand_on(),
            max_bust_probability: default_max_bust_probability(),
        }
    }
}

impl TryFrom<ConfigPolicy> for StandardPolicy {
    type Error = ConfigError;

    fn try_from(config: ConfigPolicy) -> Result<Self, Self::Error> {
        let kind: PolicyKind = config.kind.parse()?;
        if !(0.0..=1.0).contains(&config.max_bust_probability) {
            return Err(ConfigError::BustProbability(config.max_bust_probability));
        }
        Ok(StandardPolicy::from_kind(
            kind,
            config.stand_on,
            config.max_bust_probability,
        ))
    }
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: &str) -> Result<Config, ConfigError> {
    let file_content = fs::read_to_string(filename)?;
    parse_config(&file_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPICAL_CONFIG: &str = r#"
odds:
  trials: 1500
  number_of_threads: 2
  seed: 42
player_policy:
  kind: MaxBustRisk
  max_bust_probability: 0.3
dealer_policy:
  kind: StandOn
  stand_on: 18
"#;

    #[test]
    fn can_parse_config() {
        let config = parse_config(TYPICAL_CONFIG).unwrap();
        assert_eq!(config.odds.trials, 1500);
        assert_eq!(config.odds.number_of_threads, 2);
        assert_eq!(config.odds.seed, Some(42));

        let runner = config.odds.to_runner();
        assert_eq!(runner.get_trials(), 1500);
        assert_eq!(runner.get_number_of_threads(), 2);
        assert_eq!(runner.get_seed(), Some(42));
    }

    #[test]
    fn can_convert_policies() {
        let config = parse_config(TYPICAL_CONFIG).unwrap();
        let player: StandardPolicy = config.player_policy.try_into().unwrap();
        let dealer: StandardPolicy = config.dealer_policy.try_into().unwrap();
        assert_eq!(player, StandardPolicy::MaxBustRisk(0.3));
        assert_eq!(dealer, StandardPolicy::StandOn(18));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = parse_config("odds:\n  trials: 10\n  number_of_threads: 1\n").unwrap();
        assert_eq!(config.odds.seed, None);
        let player: StandardPolicy = config.player_policy.try_into().unwrap();
        assert_eq!(player, StandardPolicy::DealerRule);
    }

    #[test]
    fn should_return_error_when_converting_policy() {
        let mut config_policy = ConfigPolicy::default();
        config_policy.kind = String::from("Not a policy");
        let convert_result: Result<StandardPolicy, ConfigError> = config_policy.try_into();
        assert!(matches!(convert_result, Err(ConfigError::PolicyKind(_))));

        let mut config_policy = ConfigPolicy::default();
        config_policy.max_bust_probability = 1.5;
        let convert_result: Result<StandardPolicy, ConfigError> = config_policy.try_into();
        assert!(matches!(convert_result, Err(ConfigError::BustProbability(_))));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = parse_config_from_file("/nonexistent/blackjack_odds.yml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
