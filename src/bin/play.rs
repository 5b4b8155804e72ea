use std::path::PathBuf;
use std::process::ExitCode;

use catan_engine::cli::{TableTopDice, TerminalDisplay, create_agent, print_player_help};
use catan_engine::config::{DisplayMode, GameConfig, SetupError};
use catan_engine::game::{Game, GameError, PlayerIdentity, Seat};
use catan_engine::types::Color;
use clap::Parser;

#[derive(Debug, Parser, Clone)]
#[command(name = "play")]
#[command(about = "Play a game of Catan between humans and bots at the terminal")]
struct Args {
    /// Comma-separated player codes in seating order (e.g. H,A,R or A:early_expansion,A)
    #[arg(short = 'p', long, default_value = "H,A,A")]
    players: String,

    /// JSON file with game options; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for the layout, seating, dice and bots
    #[arg(long)]
    seed: Option<u64>,

    /// Victory points needed to win
    #[arg(long)]
    target: Option<u8>,

    /// Seconds each bot may think per turn
    #[arg(long)]
    time_limit: Option<u64>,

    /// Look-ahead depth of the bots
    #[arg(long)]
    depth: Option<u8>,

    /// Abort after this many rounds and crown the leader
    #[arg(long)]
    round_limit: Option<u32>,

    /// Shuffle tiles and numbers instead of the standard layout
    #[arg(long)]
    random_layout: bool,

    /// What to print each turn: board or text
    #[arg(long)]
    display: Option<DisplayMode>,

    /// Type in the totals of physical dice
    #[arg(long)]
    table_top: bool,

    /// Score bot candidates on all cores
    #[arg(long)]
    parallel: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Show player codes and exit
    #[arg(long)]
    help_players: bool,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig, SetupError> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| SetupError::Options(format!("{}: {e}", path.display())))?;
                GameConfig::from_json(&text)?
            }
            None => GameConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(target) = self.target {
            config.target_score = target;
        }
        if let Some(seconds) = self.time_limit {
            config.minimax_time_limit = seconds;
        }
        if let Some(depth) = self.depth {
            config.minimax_max_depth = depth;
        }
        if let Some(rounds) = self.round_limit {
            config.round_limit = rounds;
        }
        if let Some(display) = self.display {
            config.display_mode_focus = display;
        }
        config.random_layout |= self.random_layout;
        config.table_top_mode |= self.table_top;
        config.parallel_search |= self.parallel;
        config.validate()?;
        Ok(config)
    }

    fn seats(&self, config: &GameConfig) -> Result<Vec<Seat>, SetupError> {
        let codes: Vec<&str> = self.players.split(',').map(str::trim).collect();
        if codes.len() > Color::ORDERED.len() {
            return Err(SetupError::TooManyPlayers(codes.len()));
        }
        codes
            .into_iter()
            .zip(Color::ORDERED)
            .enumerate()
            .map(|(seat, (code, color))| {
                let (kind, agent) = create_agent(code, seat, config)?;
                let identity = PlayerIdentity::new(seat as u8 + 1, color, kind);
                Ok(Seat::new(identity, agent))
            })
            .collect()
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let term = simplelog::TermLogger::new(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    if let Err(e) = simplelog::CombinedLogger::init(vec![term]) {
        eprintln!("logging unavailable: {e}");
    }
}

fn run(args: &Args) -> Result<(), GameError> {
    let config = args.game_config()?;
    let seats = args.seats(&config)?;
    let display = TerminalDisplay::new(config.display_mode_focus);
    let table_top = config.table_top_mode;

    let mut game = Game::new(seats, config)?.with_observer(display);
    if table_top {
        game = game.with_dice(TableTopDice);
    }
    let summary = game.play()?;
    log::info!("game {} finished", summary.id);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if args.help_players {
        print_player_help();
        return ExitCode::SUCCESS;
    }
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(GameError::Setup(e)) => {
            eprintln!("Error: {e}");
            if matches!(e, SetupError::UnknownPlayerCode(_)) {
                eprintln!("Use --help-players to see available codes");
            }
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
