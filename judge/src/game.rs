use std::cmp::Ordering;

use rand::rngs::StdRng;
use tracing::debug;
use yahtzee::{
    execute_keep, execute_scoring, roll_die, CategoryChoice, DiceRoll, GameSnapshot, IllegalMove,
    KeepDice, Okay, Request, RollOutcome, ScoreCard, ScoringOutcome,
};

use crate::player::Player;
use crate::Config;

pub enum GameResult {
    /// The game was played to the end. The player with the higher total wins.
    Finished { totals: [u32; 2] },
    IllegalMoveByPlayer { player_idx: usize, err: IllegalMove },
}

impl GameResult {
    /// `None` for a tie, or if the game was not finished.
    pub fn winner(&self) -> Option<usize> {
        match self {
            GameResult::Finished { totals } => match totals[0].cmp(&totals[1]) {
                Ordering::Less => Some(1),
                Ordering::Equal => None,
                Ordering::Greater => Some(0),
            },
            GameResult::IllegalMoveByPlayer { .. } => None,
        }
    }
}

/// The names under which the two players appear on the shared scorecard.
///
/// A bot playing against itself needs two distinct names.
fn seat_names(player_1: &Player, player_2: &Player) -> [String; 2] {
    if player_1.name == player_2.name {
        [
            format!("{} (1)", player_1.name),
            format!("{} (2)", player_2.name),
        ]
    } else {
        [player_1.name.clone(), player_2.name.clone()]
    }
}

/// The player with the lower total goes first. On equal totals, both roll a
/// die until the results differ, and the higher die goes first.
fn turn_order(scorecard: &ScoreCard, names: &[String; 2], rng: &mut StdRng) -> [usize; 2] {
    match scorecard
        .total_score(&names[0])
        .cmp(&scorecard.total_score(&names[1]))
    {
        Ordering::Less => [0, 1],
        Ordering::Greater => [1, 0],
        Ordering::Equal => loop {
            let die_1 = roll_die(rng);
            let die_2 = roll_die(rng);
            debug!(die_1, die_2, "Tie-breaker roll");
            match die_1.cmp(&die_2) {
                Ordering::Greater => break [0, 1],
                Ordering::Less => break [1, 0],
                Ordering::Equal => {}
            }
        },
    }
}

/// Plays one turn of up to three rolls, and lets the player score the result.
///
/// The outer error is a communication failure, the inner one an illegal move.
fn play_turn(
    config: &mut Config,
    player: &mut Player,
    name: &str,
    scorecard: &mut ScoreCard,
    round: u32,
) -> anyhow::Result<Result<(), IllegalMove>> {
    let open_categories = scorecard.open_categories();
    let mut dice = DiceRoll::new(&mut config.rng);

    let hand = loop {
        let req = Request::PlayRoll {
            open_categories,
            kept_dice: dice.kept,
            rolled_dice: dice.rolled,
            roll_number: dice.roll_number,
        };
        let action: KeepDice = player.perform_request(&mut config.recorder, &req)?;
        match execute_keep(&mut dice, scorecard, action, &mut config.rng) {
            Ok(RollOutcome::Rerolled) => {}
            Ok(RollOutcome::AllKept { hand }) => break hand,
            Ok(RollOutcome::NoPotentialCategory) => {
                debug!(player = name, kept = %dice.kept, "No category can be reached anymore");
                return Ok(Ok(()));
            }
            Err(err) => return Ok(Err(err)),
        }
    };

    if scorecard.valid_categories(hand).is_empty() {
        debug!(player = name, %hand, "No valid category for the dice");
        return Ok(Ok(()));
    }

    let req = Request::ChooseCategory {
        open_categories,
        dice: hand,
    };
    let action: CategoryChoice = player.perform_request(&mut config.recorder, &req)?;
    match execute_scoring(scorecard, name, round, hand, action) {
        Ok(ScoringOutcome::Scored { category, score }) => {
            debug!(player = name, %hand, %category, score, "Scored");
        }
        Ok(ScoringOutcome::Passed) => {
            debug!(player = name, %hand, "Passed");
        }
        Err(err) => return Ok(Err(err)),
    }
    Ok(Ok(()))
}

/// Returns an error only on communication failure, not when an
/// illegal move is played.
pub fn play_game(
    config: &mut Config,
    player_1: &mut Player,
    player_2: &mut Player,
) -> anyhow::Result<GameResult> {
    let names = seat_names(player_1, player_2);
    let mut players = [player_1, player_2];

    // Inform the players about the new game, so that they can reset their state
    for (player, name) in players.iter_mut().zip(&names) {
        let _: Okay = player.perform_request(
            &mut config.recorder,
            &Request::NewGame { name: name.clone() },
        )?;
    }

    // Both players write to the same scorecard, the game ends when it's full
    // or the round limit is reached
    let mut snapshot = GameSnapshot::new();
    snapshot.round = 1;
    while !snapshot.scorecard.is_complete() && snapshot.round <= config.max_rounds {
        let order = turn_order(&snapshot.scorecard, &names, &mut config.rng);
        for player_idx in order {
            if snapshot.scorecard.is_complete() {
                break;
            }
            let turn_result = play_turn(
                config,
                &mut *players[player_idx],
                &names[player_idx],
                &mut snapshot.scorecard,
                snapshot.round,
            )?;
            if let Err(err) = turn_result {
                return Ok(GameResult::IllegalMoveByPlayer { player_idx, err });
            }
        }
        snapshot.round += 1;
    }

    if let Some(rec) = &mut config.recorder {
        rec.write_game_recording(&snapshot)?;
    }

    let totals = [
        snapshot.scorecard.total_score(&names[0]),
        snapshot.scorecard.total_score(&names[1]),
    ];
    debug!(?totals, rounds = snapshot.round - 1, "Game over");
    Ok(GameResult::Finished { totals })
}
