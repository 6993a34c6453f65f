mod assistant;

use blackjack_odds_drivers::{parse_config_from_file, Config};
use clap::Parser;

const DEFAULT_CONFIG_PATH: &str = "~/.blackjack_odds.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Number of rounds to play
    #[arg(short, long, default_value_t = 1)]
    rounds: u32,

    /// Seed for dealing and simulation, overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,
}

fn load_config(args: &CommandLineArgs) -> Result<Config, Box<dyn std::error::Error>> {
    if args.config != DEFAULT_CONFIG_PATH {
        return Ok(parse_config_from_file(&args.config)?);
    }

    let home_dir = home::home_dir().ok_or("Cannot find home directory")?;
    let config_file_path = home_dir.join(".blackjack_odds.yml");
    if !config_file_path.exists() {
        log::info!(
            "No config at {}, using built-in defaults",
            config_file_path.display()
        );
        return Ok(Config::default());
    }
    if config_file_path.is_dir() {
        return Err("The config path should be a file rather than a directory".into());
    }
    let config_file_path = config_file_path
        .to_str()
        .ok_or("Config path is not valid UTF-8")?;
    Ok(parse_config_from_file(config_file_path)?)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = CommandLineArgs::parse();
    let mut config = load_config(&args)?;
    if args.seed.is_some() {
        config.odds.seed = args.seed;
    }
    log::debug!("{:#?}", config);

    assistant::play_rounds(&config, args.rounds)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
