//! # Wumpus Main Entry Point
//!
//! Parses the command line, starts an engine and runs the text game loop.

use clap::Parser;
use log::{debug, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use wumpus::{
    Command, DifficultyOptions, Engine, GameDifficulty, GameEvent, GameObserver, GameState,
    InputHandler, Location, PlayerInput, TextDisplay, WumpusError, WumpusResult,
};

/// Command line arguments for Hunt the Wumpus.
#[derive(Parser, Debug)]
#[command(name = "wumpus")]
#[command(about = "Hunt the Wumpus in a wrap-around cave network")]
#[command(version)]
struct Args {
    /// Random seed for map generation and play
    #[arg(short, long)]
    seed: Option<u64>,

    /// Difficulty preset (easy, normal, hard)
    #[arg(short, long, default_value = "normal")]
    difficulty: GameDifficulty,

    /// JSON file with custom difficulty options; overrides --difficulty
    #[arg(long)]
    config: Option<PathBuf>,

    /// Draw the whole map, including caverns not yet visited
    #[arg(long)]
    reveal: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Forwards engine events to the log.
struct EventLog;

impl GameObserver for EventLog {
    fn notify_cavern_changed(&mut self, location: Location) {
        debug!("Cavern {} changed", location);
    }

    fn notify_game_state_changed(&mut self, from: GameState, to: GameState) {
        info!("Game state {:?} -> {:?}", from, to);
    }

    fn notify_creature_relocated(
        &mut self,
        origin: Location,
        player: Location,
        creature: Location,
        drop_is_fatal: bool,
    ) {
        info!(
            "Bat carried player {} -> {} (fatal: {}), bat now at {}",
            origin, player, drop_is_fatal, creature
        );
    }

    fn notify_new_game_started(&mut self) {
        info!("New game started");
    }
}

fn main() -> WumpusResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;

    info!("Starting Wumpus v{}", wumpus::VERSION);

    let options = match &args.config {
        Some(path) => DifficultyOptions::from_json_file(path)?,
        None => DifficultyOptions::from_difficulty(args.difficulty),
    };

    let rng = wumpus::generation::utils::create_rng(args.seed);
    info!("Using seed {}", rng.seed());

    let mut engine = Engine::new(options, Box::new(rng))?;
    let mut display = TextDisplay::new();
    display.reveal_hidden = args.reveal;

    run_game_loop(&mut engine, &mut display)
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> WumpusResult<()> {
    let level: log::LevelFilter = log_level.parse().map_err(|_| {
        WumpusError::InvalidConfiguration(format!("unknown log level '{}'", log_level))
    })?;

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .try_init()
        .map_err(|e| WumpusError::InvalidState(e.to_string()))
}

/// Reads commands from stdin until the player quits or input ends.
fn run_game_loop(engine: &mut Engine, display: &mut TextDisplay) -> WumpusResult<()> {
    let input_handler = InputHandler::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let events = engine.take_events();
    show_events(display, &events);
    print_help();
    print_turn(engine, display);

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let Some(input) = input_handler.parse_line(&line) else {
            if !line.trim().is_empty() {
                println!("Unknown command. Type 'help' for a list.");
            }
            continue;
        };

        let events = match input {
            PlayerInput::Quit => break,
            PlayerInput::Help => {
                print_help();
                continue;
            }
            PlayerInput::ShowMap => {
                print!(
                    "{}",
                    display.render_map(engine.network(), engine.player_location())
                );
                continue;
            }
            PlayerInput::Restart => engine.restart()?,
            PlayerInput::NewGame(difficulty) => {
                let options = match difficulty {
                    Some(difficulty) => DifficultyOptions::from_difficulty(difficulty),
                    None => engine.options().clone(),
                };
                engine.start_new_game(options)?
            }
            PlayerInput::Command(command) => engine.handle_command(command),
            PlayerInput::Shoot(direction) => {
                let mut events = Vec::new();
                if engine.state() == GameState::Running {
                    events.extend(engine.toggle_fire_mode());
                }
                events.extend(engine.handle_command(Command::Move(direction)));
                events
            }
        };

        show_events(display, &events);
        print_turn(engine, display);
    }

    info!("Goodbye");
    Ok(())
}

fn show_events(display: &mut TextDisplay, events: &[GameEvent]) {
    GameEvent::dispatch_all(events, &mut EventLog);

    for event in events {
        if let Some(text) = display.describe_event(event) {
            println!("{}", text);
            display.add_message(text);
        }
    }
}

fn print_turn(engine: &Engine, display: &TextDisplay) {
    let state = engine.state();

    if state.is_finished() {
        if let Some(message) = engine.message() {
            println!("{}", message);
        }
        print!(
            "{}",
            display.render_map(engine.network(), engine.player_location())
        );
        println!("Type 'restart' to play again, 'new <difficulty>' to change difficulty, or 'quit'.");
        return;
    }

    if display.reveal_hidden {
        print!(
            "{}",
            display.render_map(engine.network(), engine.player_location())
        );
    }

    println!("You are at {}.", engine.player_location());
    for line in display.status_lines(engine.network(), engine.player_location()) {
        println!("{}", line);
    }
    if state == GameState::Firing {
        println!("Your bow is drawn. Pick a direction, or 'cancel'.");
    }
}

fn print_help() {
    println!("Commands:");
    println!("  n/e/s/w (or north, up, h/j/k/l)  move");
    println!("  fire                              draw or lower your bow");
    println!("  fire <direction>                  shoot your only arrow");
    println!("  cancel                            lower your bow");
    println!("  map                               show the caves you have seen");
    println!("  restart | new [easy|normal|hard]  start over");
    println!("  quit");
}
