//! Headless Snake & Ladder runner: plays many games with random dice and
//! prints win rates and game lengths.

use std::time::Instant;

use clap::Parser;
use rand::random;
use snake_ladder::rules::PlayerId;
use snake_ladder::simulation::simulate_many;
use tracing::info;

#[derive(Parser)]
#[command(name = "simulate")]
#[command(about = "Play Snake & Ladder games without a window and report statistics")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "10000")]
    games: u32,

    /// Players per game (2, 3 or 4)
    #[arg(short, long, default_value = "2")]
    players: usize,

    /// Seed for reproducible runs; random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    snake_ladder::logging::init(if args.verbose { "debug" } else { "warn" });

    let seed = args.seed.unwrap_or_else(random);
    info!(games = args.games, players = args.players, seed, "starting simulation");

    let start = Instant::now();
    let stats = simulate_many(args.games, args.players, seed)?;
    let duration = start.elapsed();

    println!("============================================");
    println!("Games: {}, Players: {}, Seed: {}", stats.games, args.players, seed);
    for (i, wins) in stats.wins.iter().enumerate() {
        let player = PlayerId::new(i);
        println!("{} Wins: {}, Win Rate: {:.2}%", player, wins, stats.win_rate(player));
    }
    println!(
        "Turns per game: avg {:.1}, shortest {}, longest {}",
        stats.average_turns(),
        stats.shortest,
        stats.longest
    );
    println!(
        "Snakes: {}, Ladders: {}, Overshoots: {}, Unfinished: {}",
        stats.snakes, stats.ladders, stats.overshoots, stats.unfinished
    );
    println!("Simulation took: {:?}", duration);
    println!("============================================");

    Ok(())
}
