//! Terminal driver for the duel.
//!
//! Reads commands from stdin, lets the opponent act with the configured
//! pacing, and prints the board and new log events after each step.
//! `--auto` plays the controlled side with the uniform policy instead.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;

use clap::Parser;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use deck_cadence::core::{Command, ConfigError, GameConfig, GameRng, PacingConfig, Side};
use deck_cadence::opponent::{OpponentPolicy, UniformOpponent};
use deck_cadence::rules::{CardView, Engine, GameSnapshot, Progress};

/// Play a short card duel against a scripted opponent.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// RNG seed (random if omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Play the controlled side automatically.
    #[arg(long, default_value_t = false)]
    auto: bool,

    /// Skip presentation delays.
    #[arg(long, default_value_t = false)]
    fast: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

const HELP: &str = "commands: play <id> | select <id> | deselect <id> | toggle <id> | confirm | end | skip | show | new | quit";

fn main() -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.fast {
        config.pacing = PacingConfig::instant();
    }

    let mut engine = Engine::new(config)?;
    let mut driver = Driver::new(args.auto);
    driver.run(&mut engine)
}

/// Feeds the engine and prints what happened.
struct Driver {
    auto: bool,
    cursor: u64,
    autoplayer: UniformOpponent,
    autoplayer_rng: GameRng,
}

impl Driver {
    fn new(auto: bool) -> Self {
        Self {
            auto,
            cursor: 0,
            autoplayer: UniformOpponent,
            autoplayer_rng: GameRng::from_entropy(),
        }
    }

    fn run(&mut self, engine: &mut Engine) -> Result<(), CliError> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        let mut progress = self.apply(engine, Command::StartNewGame);
        info!(seed = engine.seed(), auto = self.auto, "session started");
        if !self.auto {
            println!("{HELP}");
        }

        loop {
            progress = self.drive_opponent(engine, progress);
            self.print_events(engine);

            if self.auto {
                if let Progress::Finished(result) = progress {
                    println!("\n=== {result} ===");
                    return Ok(());
                }
                progress = self.auto_step(engine);
                continue;
            }

            render(&engine.snapshot());
            print!("> ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line?;
            match line.trim() {
                "" => {}
                "quit" | "q" | "exit" => return Ok(()),
                "show" => render(&engine.snapshot()),
                "help" | "?" => println!("{HELP}"),
                text => match text.parse::<Command>() {
                    Ok(command) => progress = self.apply(engine, command),
                    Err(err) => println!("{err}"),
                },
            }
        }
    }

    fn apply(&mut self, engine: &mut Engine, command: Command) -> Progress {
        if command == Command::StartNewGame {
            self.cursor = 0;
        }
        // Rejections are already in the log
        engine.execute(command).unwrap_or_else(|_| engine.progress())
    }

    /// Let the opponent act until the controlled side is needed.
    fn drive_opponent(&mut self, engine: &mut Engine, mut progress: Progress) -> Progress {
        let pacing = engine.config().pacing;
        loop {
            let delay = match progress {
                Progress::OpponentToAct if engine.queue().is_empty() => pacing.step(),
                Progress::OpponentToAct => pacing.resolve(),
                Progress::AwaitingTargets {
                    owner: Side::Opponent,
                } => pacing.targeting(),
                Progress::Dropped => pacing.step(),
                _ => return progress,
            };
            self.print_events(engine);
            thread::sleep(delay);
            progress = engine.advance();
        }
    }

    /// One controlled-side decision by the uniform policy.
    fn auto_step(&mut self, engine: &mut Engine) -> Progress {
        if let Some(request) = engine.targeting() {
            let single = request.count == 1;
            let pool = request.candidates(engine.state());
            let chosen = self.autoplayer.choose_targets(
                request.owner,
                request.count,
                &pool,
                &mut self.autoplayer_rng,
            );
            let mut progress = engine.progress();
            for card in chosen {
                progress = self.apply(engine, Command::SelectTarget(card));
            }
            if single {
                return progress;
            }
            return self.apply(engine, Command::ConfirmTargets);
        }

        let hand: Vec<_> = engine
            .state()
            .hand(Side::Controlled)
            .iter()
            .filter_map(|&id| engine.state().get_card(id).cloned())
            .collect();
        let choice = self.autoplayer.choose_card(&hand, &mut self.autoplayer_rng);

        match choice {
            Some(card) if !engine.turn().played => self.apply(engine, Command::PlayCard(card)),
            _ => self.apply(engine, Command::EndTurn),
        }
    }

    fn print_events(&mut self, engine: &Engine) {
        for record in engine.events_since(self.cursor) {
            println!("  {}", record.event);
        }
        self.cursor = engine.log().next_sequence();
    }
}

fn cards(views: &[CardView]) -> String {
    views
        .iter()
        .map(|v| format!("{}:{}", v.id, v.archetype))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render(snapshot: &GameSnapshot) {
    println!(
        "\n-- turn {}/{} | {} | {} | deck {} --",
        snapshot.turn_number,
        snapshot.total_turns,
        snapshot.current_side,
        snapshot.phase,
        snapshot.deck_size
    );
    println!(
        "Opponent field ({}): {}",
        snapshot.field_size(Side::Opponent),
        cards(&snapshot.fields[Side::Opponent])
    );
    println!(
        "Player field ({}): {}",
        snapshot.field_size(Side::Controlled),
        cards(&snapshot.fields[Side::Controlled])
    );
    println!("Opponent hand: {} card(s)", snapshot.hand_size(Side::Opponent));
    println!("Your hand: {}", cards(&snapshot.hands[Side::Controlled]));

    if let Some(targeting) = &snapshot.targeting {
        let selected: Vec<_> = targeting.selected.iter().map(ToString::to_string).collect();
        let eligible: Vec<_> = targeting.eligible.iter().map(ToString::to_string).collect();
        println!(
            "{} chooses up to {} ({}): eligible [{}], selected [{}]",
            targeting.owner,
            targeting.count,
            targeting.source,
            eligible.join(", "),
            selected.join(", ")
        );
    } else if let Some(result) = snapshot.result {
        println!("game over: {result}. `new` to play again, `quit` to exit");
    } else if snapshot.can_skip {
        println!("(hand empty: `skip` to pass)");
    } else if snapshot.can_end_turn {
        println!("(`end` to finish your turn)");
    }
}
