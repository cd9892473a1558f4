#[macro_use]
extern crate log;

use clap::Parser;
use duostats::data_retrieval::match_scanner::FailurePolicy;
use duostats::data_retrieval::riot_client::RiotClient;
use duostats::duo_search::{find_duo_games, DuoSearch};
use duostats::input::Prompter;
use duostats::progress::{ConsoleProgress, LogObserver, Tee};
use duostats::settings::{Settings, DEFAULT_CONFIG_FILE};
use duostats::BoxError;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::io;
use std::str::FromStr;

/// Finds how many of your recent games were played with your duos, and how they went.
#[derive(Parser)]
#[command(name = "duostats", version)]
struct Opts {
    /// Settings file, missing file means defaults.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,
    /// Your summoner name. Asked for when omitted.
    #[arg(short, long)]
    player: Option<String>,
    /// Comma separated duo summoner names. Asked for when omitted.
    #[arg(short, long)]
    duos: Option<String>,
    /// Number of recent games to scan, a multiple of the page size.
    #[arg(short, long)]
    games: Option<String>,
    /// Overrides `failure_policy` from the settings (abort or retry).
    #[arg(long)]
    failure_policy: Option<FailurePolicy>,
}

fn init_logging(settings: &Settings) -> Result<(), BoxError> {
    let level = LevelFilter::from_str(&settings.log_level)?;
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = &settings.log_file {
        loggers.push(WriteLogger::new(
            level,
            Config::default(),
            File::create(path)?,
        ));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let opts = Opts::parse();
    let mut settings = Settings::load(&opts.config)?;
    if let Some(policy) = opts.failure_policy {
        settings.failure_policy = policy;
    }
    init_logging(&settings)?;
    info!(
        "Using {} with failure policy {}.",
        settings.base_url(),
        settings.failure_policy
    );

    let client = RiotClient::from_settings(&settings)?;
    let region = settings.region.clone();
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let player = match prompter.ask_player(&client, &region, opts.player).await? {
        Some(player) => player,
        None => {
            info!("Search cancelled.");
            return Ok(());
        }
    };
    println!("Summoner retrieved\n{}", player.name);

    let duos = match prompter.ask_duos(&client, &region, opts.duos).await? {
        Some(duos) => duos,
        None => {
            info!("Search cancelled.");
            return Ok(());
        }
    };
    println!("Duos retrieved\n{}", duos.display_names());

    let games = match prompter.ask_games(settings.page_size, opts.games)? {
        Some(games) => games,
        None => {
            info!("Search cancelled.");
            return Ok(());
        }
    };

    let search = DuoSearch {
        player,
        duos,
        games,
    };
    let mut console = ConsoleProgress::new(io::stdout());
    let mut log_observer = LogObserver::new(settings.page_size);
    let mut observer = Tee::new(&mut console, &mut log_observer);
    find_duo_games(
        &client,
        &region,
        settings.scan_settings(),
        &search,
        &mut observer,
    )
    .await?;
    Ok(())
}
