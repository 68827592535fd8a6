use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use game_master::{Config, Forwarder, Game, GameError, GameEvent, Registration, Silent};
use tracing::{error, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wordgame::{visualize_board, Action, Ruleset, Tile, WordList};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RulesetName {
    English,
    French,
}

/// Plays a word game with several people at one terminal.
#[derive(Parser)]
struct Args {
    /// The names of the players, in no particular order
    #[clap(num_args(1..=4), required = true)]
    players: Vec<String>,

    /// Word list with one word per line
    #[arg(long)]
    lexicon: PathBuf,

    /// Letter distribution and values
    #[arg(long, value_enum, default_value_t = RulesetName::English)]
    ruleset: RulesetName,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A rejected move loses the turn instead of allowing another try
    #[arg(long, default_value_t = false)]
    no_retry: bool,

    /// Seconds during which the last move can be taken back once the game is over
    #[arg(long, default_value_t = 3)]
    end_delay_secs: u64,

    /// Skip the turn of a player who takes longer than this
    #[arg(long)]
    turn_timeout_secs: Option<u64>,

    /// Write the history of the game as JSON into this file
    #[arg(long)]
    history_json: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn format_rack(tiles: &[Tile]) -> String {
    tiles
        .iter()
        .map(|tile| format!("{}{}", tile, subscript(tile.points())))
        .collect::<Vec<_>>()
        .join(" ")
}

fn subscript(points: u32) -> String {
    points
        .to_string()
        .chars()
        .map(|c| match c {
            '0' => '₀',
            '1' => '₁',
            '2' => '₂',
            '3' => '₃',
            '4' => '₄',
            '5' => '₅',
            '6' => '₆',
            '7' => '₇',
            '8' => '₈',
            _ => '₉',
        })
        .collect()
}

/// Reads commands for the prompted player until one of them reaches the game.
///
/// Returns `false` when the input has ended.
fn handle_prompt(
    game: &Game,
    player: &Registration,
    name: &str,
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
) -> anyhow::Result<bool> {
    println!("\n{}", visualize_board(&game.board()));
    println!("{}: {}", name, format_rack(&game.rack(player.id, player.key)?));

    loop {
        print!("{}> ", name);
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(false);
        };
        let line = line?;
        let command = line.trim();

        let result = if command == "undo" {
            game.rollback_last_move(player.id, player.key)
        } else if command == "quit" {
            game.quit(player.id, player.key, "left the table")
        } else if let Some(text) = command.strip_prefix("say ") {
            if let Err(err) = game.send_message(player.id, player.key, text) {
                println!("{}", err);
            }
            continue;
        } else if command == "help" || command.is_empty() {
            println!("H8 WORD places horizontally, 8H WORD vertically, lower case for blanks");
            println!("-ABC exchanges tiles (? for a blank), - skips");
            println!("undo, quit, say <message>");
            continue;
        } else {
            match command.parse::<Action>() {
                Ok(action) => game.play(player.id, player.key, action).map(|_| ()),
                Err(err) => {
                    println!("{}", err);
                    continue;
                }
            }
        };

        match result {
            Ok(()) => return Ok(true),
            Err(GameError::Rejected { err, retry_allowed }) => {
                println!("{}", err);
                if !retry_allowed {
                    println!("The turn is lost.");
                }
                return Ok(true);
            }
            // These re-prompt through the game
            Err(err @ GameError::IllegalBoardState(_)) => {
                println!("{}", err);
                return Ok(true);
            }
            Err(err @ GameError::NotYourTurn { .. }) => {
                println!("{}", err);
                return Ok(true);
            }
            Err(err) => println!("{}", err),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);

    let ruleset = match args.ruleset {
        RulesetName::English => Ruleset::english(),
        RulesetName::French => Ruleset::french(),
    };
    let lexicon = WordList::from_reader(BufReader::new(File::open(&args.lexicon)?), ruleset)?;
    if lexicon.is_empty() {
        anyhow::bail!("The word list '{}' is empty", args.lexicon.display());
    }
    info!(words = lexicon.len(), "Word list loaded");

    let config = Config {
        seed,
        retry_accepted: !args.no_retry,
        delay_before_end: Duration::from_secs(args.end_delay_secs),
        turn_timeout: args.turn_timeout_secs.map(Duration::from_secs),
        ..Config::default()
    };
    let game = Game::new(Arc::new(lexicon), config)?;

    let mut registrations = Vec::with_capacity(args.players.len());
    for name in &args.players {
        registrations.push(game.register_player(name, Box::new(Silent))?);
    }
    let (events_tx, events) = mpsc::channel();
    game.add_observer(Box::new(Forwarder(events_tx)))?;

    let driver = {
        let game = Arc::clone(&game);
        thread::Builder::new()
            .name(String::from("turn-loop"))
            .spawn(move || game.start())?
    };

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    for event in events {
        match event {
            GameEvent::PlayRequired { player, name } => {
                if !handle_prompt(&game, &registrations[player.0], &name, &mut lines)? {
                    let last = &registrations[player.0];
                    game.quit(last.id, last.key, "input closed")?;
                }
            }
            GameEvent::AfterPlay {
                player,
                action,
                score,
                ..
            } => println!("{} played {} for {} points", args.players[player.0], action, score),
            GameEvent::AfterRollback { player, .. } => {
                println!("The move of {} was taken back", args.players[player.0])
            }
            GameEvent::Message { text } => println!("{}", text),
            GameEvent::StateChanged { state } => println!("The game is {}", state),
            GameEvent::AfterGameEnd { players } => {
                println!("\n{}", visualize_board(&game.board()));
                for player in players {
                    println!("{:>12}: {}", player.name, player.score);
                }
            }
            GameEvent::BeforeGameStart { .. } | GameEvent::AfterRejectedAction { .. } => {}
        }
    }

    match driver.join() {
        Ok(result) => result?,
        Err(_) => error!("The turn loop panicked"),
    }

    for entry in game.history() {
        info!("{}", entry.format_as_string());
    }
    if let Some(path) = args.history_json {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &game.history())?;
        writer.flush()?;
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
