use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::error::SessionError;
use crate::rules::{Die, GameSession, JumpKind, PlayerId};

/// Games still running after this many turns are abandoned.
pub const MAX_TURNS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameSummary {
    pub winner: Option<PlayerId>,
    pub turns: u32,
    pub snakes: u32,
    pub ladders: u32,
    pub overshoots: u32,
}

/// Plays one game to the end with dice drawn from `rng`.
pub fn simulate_game<R: Rng + ?Sized>(players: usize, rng: &mut R) -> Result<GameSummary, SessionError> {
    let mut session = GameSession::new(players)?;
    let mut summary = GameSummary::default();

    while !session.is_over() && session.turns_played() < MAX_TURNS {
        let plan = session.play_turn(Die::roll_with(rng))?;
        if plan.is_overshoot() {
            summary.overshoots += 1;
        }
        match plan.jump().map(|jump| jump.kind) {
            Some(JumpKind::Snake) => summary.snakes += 1,
            Some(JumpKind::Ladder) => summary.ladders += 1,
            None => (),
        }
    }

    summary.turns = session.turns_played();
    summary.winner = session.winner();
    Ok(summary)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationStats {
    pub games: u32,
    /// Wins per seat.
    pub wins: Vec<u32>,
    pub unfinished: u32,
    pub total_turns: u64,
    pub shortest: u32,
    pub longest: u32,
    pub snakes: u64,
    pub ladders: u64,
    pub overshoots: u64,
}

impl SimulationStats {
    fn new(players: usize) -> Self {
        SimulationStats {
            games: 0,
            wins: vec![0; players],
            unfinished: 0,
            total_turns: 0,
            shortest: u32::MAX,
            longest: 0,
            snakes: 0,
            ladders: 0,
            overshoots: 0,
        }
    }

    fn record(&mut self, game: &GameSummary) {
        self.games += 1;
        match game.winner {
            Some(winner) => self.wins[winner.index()] += 1,
            None => self.unfinished += 1,
        }
        self.total_turns += game.turns as u64;
        self.shortest = self.shortest.min(game.turns);
        self.longest = self.longest.max(game.turns);
        self.snakes += game.snakes as u64;
        self.ladders += game.ladders as u64;
        self.overshoots += game.overshoots as u64;
    }

    pub fn win_rate(&self, player: PlayerId) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins[player.index()] as f32 / self.games as f32 * 100.0
    }

    /// Mean number of turns (rolls across all players) per game.
    pub fn average_turns(&self) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_turns as f32 / self.games as f32
    }
}

/// Plays `games` games in parallel. Game `i` rolls from a generator seeded with
/// `seed + i`, so a seed always reproduces the same statistics.
pub fn simulate_many(games: u32, players: usize, seed: u64) -> Result<SimulationStats, SessionError> {
    let summaries = (0..games)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            simulate_game(players, &mut rng)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut stats = SimulationStats::new(players);
    for summary in &summaries {
        stats.record(summary);
    }
    if stats.games == 0 {
        stats.shortest = 0;
    }
    debug!(games = stats.games, average_turns = stats.average_turns(), "simulation finished");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_game_finishes() {
        let mut rng = StdRng::seed_from_u64(42);
        let summary = simulate_game(2, &mut rng).unwrap();
        assert!(summary.winner.is_some());
        assert!(summary.turns > 0);
    }

    #[test]
    fn test_invalid_player_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(simulate_game(5, &mut rng), Err(SessionError::InvalidPlayerCount(5)));
        assert_eq!(simulate_many(10, 1, 0), Err(SessionError::InvalidPlayerCount(1)));
    }

    #[test]
    fn test_simulation_is_reproducible() {
        let a = simulate_many(64, 3, 99).unwrap();
        let b = simulate_many(64, 3, 99).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stats_add_up() {
        let stats = simulate_many(100, 4, 7).unwrap();
        assert_eq!(stats.games, 100);
        assert_eq!(stats.wins.len(), 4);
        assert_eq!(stats.wins.iter().sum::<u32>() + stats.unfinished, 100);
        assert!(stats.shortest <= stats.longest);
        let total: f32 = (0..4).map(|i| stats.win_rate(PlayerId::new(i))).sum();
        assert!((total - 100.0).abs() < 0.01 || stats.unfinished > 0);
    }

    #[test]
    fn test_no_games() {
        let stats = simulate_many(0, 2, 0).unwrap();
        assert_eq!(stats.games, 0);
        assert_eq!(stats.shortest, 0);
        assert_eq!(stats.average_turns(), 0.0);
    }
}
