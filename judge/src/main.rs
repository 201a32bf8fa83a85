use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use judge::{
    play_game, Config, GameResult, Player, PlayerConfig, Recorder, DEFAULT_MAX_ROUNDS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the config JSON files of players
    #[clap(num_args(2..), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// How many games to play per pairing
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Stop the tournament as soon as one player makes an illegal move
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// Record the game's interactions as JSON files, and the final
    /// scorecards as text files, into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// End each game after this many rounds, even if the scorecard is not full
    #[arg(long, default_value_t = DEFAULT_MAX_ROUNDS)]
    max_rounds: u32,
}

/// Results of one player over all of its games in the tournament.
#[derive(Default)]
struct Standing {
    wins: usize,
    losses: usize,
    ties: usize,
    illegal_moves: usize,
    /// Summed over finished games only.
    points: u64,
    finished_games: usize,
}

impl Standing {
    fn average_points(&self) -> f64 {
        if self.finished_games == 0 {
            0.0
        } else {
            self.points as f64 / self.finished_games as f64
        }
    }
}

/// Returns `false` if the tournament should stop.
fn play_matchup(
    config: &mut Config,
    player_1: &mut Player,
    player_2: &mut Player,
    num_games: usize,
    stop_on_illegal_move: bool,
    mut standings: [&mut Standing; 2],
) -> anyhow::Result<bool> {
    let player_names = [player_1.name.clone(), player_2.name.clone()];

    for game_idx in 0..num_games {
        let result = play_game(config, player_1, player_2)?;
        let winner = result.winner();
        match result {
            GameResult::Finished { totals } => {
                for (standing, total) in standings.iter_mut().zip(totals) {
                    standing.points += u64::from(total);
                    standing.finished_games += 1;
                }
                match winner {
                    Some(player_idx) => {
                        debug!(winner = player_names[player_idx], game_idx, ?totals);
                        standings[player_idx].wins += 1;
                        standings[1 - player_idx].losses += 1;
                    }
                    None => {
                        debug!(game_idx, ?totals, "Tie");
                        standings[0].ties += 1;
                        standings[1].ties += 1;
                    }
                }
            }
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                info!(
                    player = player_names[player_idx],
                    game_idx, "Illegal move by player"
                );
                let mut err_dyn = &err as &dyn std::error::Error;
                while let Some(src_err) = err_dyn.source() {
                    info!("{}", err_dyn);
                    err_dyn = src_err;
                }
                info!("{}", err_dyn);
                if stop_on_illegal_move {
                    return Ok(false);
                }
                standings[player_idx].illegal_moves += 1;
                standings[player_idx].losses += 1;
                standings[1 - player_idx].wins += 1;
            }
        }
    }
    Ok(true)
}

fn print_standings(player_configs: &[PlayerConfig], standings: &[Standing]) {
    println!(
        "\n {:19} | {:>6} | {:>6} | {:>6} | {:>7} | {:>9}",
        "player", "wins", "losses", "ties", "illegal", "avg score"
    );
    println!("{}", "-".repeat(72));
    let ranking = (0..player_configs.len())
        .sorted_by(|&a, &b| standings[b].wins.cmp(&standings[a].wins));
    for idx in ranking {
        let s = &standings[idx];
        println!(
            " {:19} | {:>6} | {:>6} | {:>6} | {:>7} | {:>9.1}",
            player_configs[idx].nick,
            s.wins,
            s.losses,
            s.ties,
            s.illegal_moves,
            s.average_points()
        );
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };
    let mut config = Config {
        rng: StdRng::seed_from_u64(seed),
        recorder,
        max_rounds: args.max_rounds,
    };

    let player_configs = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<Result<Vec<PlayerConfig>, anyhow::Error>>()?;

    let mut standings: Vec<Standing> = player_configs.iter().map(|_| Standing::default()).collect();

    for (i1, i2) in (0..player_configs.len()).tuple_combinations() {
        let mut player_1 = Player::from_config(&player_configs[i1])?;
        let mut player_2 = Player::from_config(&player_configs[i2])?;
        info!(player_1 = player_1.name, player_2 = player_2.name, "Starting matchup");

        // i1 < i2, so splitting at i2 separates the two standings
        let (head, tail) = standings.split_at_mut(i2);
        let keep_going = play_matchup(
            &mut config,
            &mut player_1,
            &mut player_2,
            args.num_games,
            args.stop_on_illegal_move,
            [&mut head[i1], &mut tail[0]],
        )?;
        player_1.say_goodbye()?;
        player_2.say_goodbye()?;
        if !keep_going {
            break;
        }
    }

    print_standings(&player_configs, &standings);

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
