#![warn(clippy::pedantic)]

mod settings;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    time::Instant,
};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::{
    eyre::{OptionExt, eyre},
    owo_colors::OwoColorize,
};
use cube_core::{Game, Move, SessionStore};
use itertools::Itertools;
use log::{LevelFilter, info};

use crate::settings::Settings;

/// Scramble and solve an N×N×N cube from the terminal
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The settings file to use, in TOML format
    #[arg(long, value_name = "SETTINGS", global = true)]
    settings: Option<PathBuf>,

    /// Where the game is saved
    #[arg(long, value_name = "SAVE_FILE", global = true)]
    save_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new scrambled game, replacing the saved one
    New {
        /// Edge length of the cube; defaults to the one in the settings
        #[arg(long, short)]
        dimension: Option<usize>,
        /// Number of scramble moves; defaults to the one in the settings
        #[arg(long, short)]
        scramble: Option<usize>,
        /// Seed for a reproducible scramble
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Resume the saved game and play it interactively
    Resume,
    /// Apply moves such as `X0 Y2' Z1` to the saved game. `undo` and `redo`
    /// may be given in place of a move.
    Play {
        #[arg(required = true, allow_hyphen_values = true)]
        moves: Vec<String>,
    },
    /// Show the saved game
    Status {
        /// Also print which cubie sits in every cell
        #[arg(long)]
        grid: bool,
    },
    /// Delete the saved game
    Discard,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let settings = match cli.settings.or_else(Settings::default_path) {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };

    let store = cli
        .save_file
        .map(SessionStore::new)
        .or_else(SessionStore::default_location)
        .ok_or_eyre("Could not find a data directory to save to, pass --save-file")?;

    match cli.command {
        Commands::New {
            dimension,
            scramble,
            seed,
        } => {
            let dimension = dimension.unwrap_or(settings.dimension);
            let scramble = scramble.unwrap_or(settings.scramble_moves);
            let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

            let game = Game::new_with_rng(dimension, scramble, &mut rng)?;
            game.save(&store)?;
            println!(
                "Started a {dimension}x{dimension}x{dimension} cube scrambled with {scramble} moves"
            );
            print_status(&game, &settings, false);
        }
        Commands::Resume => {
            let mut game = load_game(&store)?;
            print_status(&game, &settings, false);
            play_interactive(&mut game, &store, &settings)?;
        }
        Commands::Play { moves } => {
            let mut game = load_game(&store)?;
            let started = Instant::now();
            for token in &moves {
                apply_token(&mut game, token)?;
            }
            game.tick(started.elapsed());
            game.save(&store)?;
            print_status(&game, &settings, false);
        }
        Commands::Status { grid } => {
            let game = load_game(&store)?;
            print_status(&game, &settings, grid);
        }
        Commands::Discard => {
            if store.delete()? {
                println!("Deleted {}", store.path().display());
            } else {
                println!("There is no saved game");
            }
        }
    }

    Ok(())
}

fn load_game(store: &SessionStore) -> color_eyre::Result<Game> {
    let data = store
        .load()?
        .ok_or_else(|| eyre!("There is no saved game, start one with `cube new`"))?;
    Ok(Game::resume(&data)?)
}

/// Apply one `play` token: a move, `undo` or `redo`.
fn apply_token(game: &mut Game, token: &str) -> color_eyre::Result<()> {
    match token {
        "undo" => match game.undo() {
            Some(move_) => println!("Took back {move_}"),
            None => println!("Nothing to undo"),
        },
        "redo" => match game.redo() {
            Some(move_) => println!("Replayed {move_}"),
            None => println!("Nothing to redo"),
        },
        _ => {
            let move_ = token.parse::<Move>()?;
            let result = game.user_move(move_)?;
            if !result.applied {
                println!("Ignored {move_}, the cube is already solved");
            }
        }
    }

    if game.is_won() {
        println!(
            "{} It took you {}",
            "Solved!".green(),
            game.timer().describe()
        );
    }

    Ok(())
}

fn play_interactive(
    game: &mut Game,
    store: &SessionStore,
    settings: &Settings,
) -> color_eyre::Result<()> {
    println!("Enter moves like X0, Y2' or Z1_. Other commands: undo, redo, show, save, quit");

    let stdin = io::stdin();
    let mut last_tick = Instant::now();

    'session: loop {
        if settings.show_timer {
            print!("[{}] ", game.timer());
        }
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        let read = stdin.lock().read_line(&mut line)?;

        let now = Instant::now();
        game.tick(now - last_tick);
        last_tick = now;

        if read == 0 {
            break;
        }

        for token in line.split_whitespace() {
            match token {
                "quit" | "exit" => break 'session,
                "show" => print!("{}", game.engine().grid().snapshot()),
                "save" => {
                    game.save(store)?;
                    println!("Saved to {}", store.path().display());
                }
                _ => {
                    // A typo should not end the session
                    if let Err(e) = apply_token(game, token) {
                        println!("{}", e.red());
                    }
                }
            }
        }

        if game.is_won() {
            break;
        }
    }

    game.save(store)?;
    info!("Session saved to {}", store.path().display());
    Ok(())
}

fn print_status(game: &Game, settings: &Settings, show_grid: bool) {
    let engine = game.engine();
    let n = engine.dimension();
    let history = engine.history();

    println!("Cube: {n}x{n}x{n}");
    println!("Moves applied: {}", history.log().len());
    let log = history.log();
    if !log.is_empty() {
        let recent = &log[log.len().saturating_sub(5)..];
        println!("Latest moves: {}", recent.iter().join(" "));
    }
    if settings.show_timer {
        println!("Time: {}", game.timer());
    }

    if engine.symmetry().is_solved(engine.grid()) {
        println!("{}", "Solved".green());
    } else {
        println!("{}", "Not solved".yellow());
    }

    if show_grid {
        print!("{}", engine.grid().snapshot());
    }
}
