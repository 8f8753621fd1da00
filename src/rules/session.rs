use tracing::{debug, info};

use crate::error::SessionError;
use crate::rules::{plan_turn, Board, Cell, Die, JumpKind, PlayerCount, PlayerId, TurnPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingRoll,
    /// A roll has been resolved and its token movement is being shown.
    Animating(TurnPlan),
    GameOver(PlayerId),
}

/// Read-only view of a session for drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub positions: Vec<Cell>,
    pub active_player: PlayerId,
    pub last_roll: Option<Die>,
    pub winner: Option<PlayerId>,
}

/// One game: the board, every token, whose turn it is and the last roll.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: &'static Board,
    count: PlayerCount,
    positions: Vec<Cell>,
    active: PlayerId,
    last_roll: Option<Die>,
    phase: Phase,
    turns_played: u32,
}

impl GameSession {
    pub fn new(players: usize) -> Result<Self, SessionError> {
        GameSession::with_board(Board::standard(), players)
    }

    pub fn with_board(board: &'static Board, players: usize) -> Result<Self, SessionError> {
        let count = PlayerCount::new(players)?;
        Ok(GameSession {
            board,
            count,
            positions: vec![Cell::START; count.get()],
            active: PlayerId::new(0),
            last_roll: None,
            phase: Phase::AwaitingRoll,
            turns_played: 0,
        })
    }

    pub fn board(&self) -> &'static Board {
        self.board
    }

    pub fn player_count(&self) -> PlayerCount {
        self.count
    }

    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    pub fn position(&self, player: PlayerId) -> Cell {
        self.positions[player.index()]
    }

    pub fn positions(&self) -> &[Cell] {
        &self.positions
    }

    pub fn last_roll(&self) -> Option<Die> {
        self.last_roll
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::GameOver(winner) => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Resolves `roll` for the active player and enters [`Phase::Animating`].
    /// Positions do not change until [`GameSession::complete_turn`].
    pub fn begin_turn(&mut self, roll: Die) -> Result<TurnPlan, SessionError> {
        match self.phase {
            Phase::AwaitingRoll => (),
            Phase::Animating(_) => return Err(SessionError::NotAwaitingRoll),
            Phase::GameOver(winner) => return Err(SessionError::GameOver(winner)),
        }
        let plan = plan_turn(self.board, self.position(self.active), roll);
        self.last_roll = Some(roll);
        self.phase = Phase::Animating(plan);
        debug!(player = %self.active, roll = roll.value(), "turn started");
        Ok(plan)
    }

    /// Commits the move in progress, checks for a win and passes the turn on.
    pub fn complete_turn(&mut self) -> Result<Phase, SessionError> {
        let Phase::Animating(plan) = self.phase else {
            return Err(SessionError::NoTurnInProgress);
        };
        let player = self.active;
        self.positions[player.index()] = plan.resting();
        self.turns_played += 1;

        match (plan.is_overshoot(), plan.jump()) {
            (true, _) => info!(%player, roll = plan.roll.value(), at = plan.start.get(), "overshoot, move forfeited"),
            (false, Some(jump)) if jump.kind == JumpKind::Ladder => {
                info!(%player, roll = plan.roll.value(), from = jump.from.get(), to = jump.to.get(), "climbed a ladder")
            }
            (false, Some(jump)) => {
                info!(%player, roll = plan.roll.value(), from = jump.from.get(), to = jump.to.get(), "bitten by a snake")
            }
            (false, None) => info!(%player, roll = plan.roll.value(), to = plan.resting().get(), "moved"),
        }

        self.phase = if plan.wins() {
            info!(%player, turns = self.turns_played, "player reached the goal");
            Phase::GameOver(player)
        } else {
            self.active = player.next(self.count);
            Phase::AwaitingRoll
        };
        Ok(self.phase)
    }

    /// Plays a whole turn without pausing for animation.
    pub fn play_turn(&mut self, roll: Die) -> Result<TurnPlan, SessionError> {
        let plan = self.begin_turn(roll)?;
        self.complete_turn()?;
        Ok(plan)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            positions: self.positions.clone(),
            active_player: self.active,
            last_roll: self.last_roll,
            winner: self.winner(),
        }
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, player: PlayerId, cell: Cell) {
        self.positions[player.index()] = cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cell(index: u8) -> Cell {
        Cell::new(index).unwrap()
    }

    fn roll(value: u8) -> Die {
        Die::from_number(value)
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new(3).unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.positions, vec![Cell::START; 3]);
        assert_eq!(snapshot.active_player, PlayerId::new(0));
        assert_eq!(snapshot.last_roll, None);
        assert_eq!(snapshot.winner, None);
        assert_eq!(session.phase(), Phase::AwaitingRoll);
    }

    #[test]
    fn test_rejects_bad_player_count() {
        assert_eq!(GameSession::new(1).unwrap_err(), SessionError::InvalidPlayerCount(1));
        assert_eq!(GameSession::new(5).unwrap_err(), SessionError::InvalidPlayerCount(5));
    }

    #[test]
    fn test_snake_scenario() {
        let mut session = GameSession::new(2).unwrap();
        session.place(PlayerId::new(0), cell(10));
        session.play_turn(roll(6)).unwrap();
        assert_eq!(session.position(PlayerId::new(0)), cell(6));
        assert_eq!(session.active_player(), PlayerId::new(1));
        assert_eq!(session.last_roll(), Some(roll(6)));
    }

    #[test]
    fn test_ladder_scenario() {
        let mut session = GameSession::new(2).unwrap();
        session.play_turn(roll(2)).unwrap();
        assert_eq!(session.position(PlayerId::new(0)), cell(38));
    }

    #[test]
    fn test_overshoot_scenario() {
        let mut session = GameSession::new(2).unwrap();
        session.place(PlayerId::new(0), cell(95));
        session.play_turn(roll(6)).unwrap();
        assert_eq!(session.position(PlayerId::new(0)), cell(95));
        assert_eq!(session.active_player(), PlayerId::new(1));
        assert_eq!(session.phase(), Phase::AwaitingRoll);
    }

    #[test]
    fn test_win_scenario() {
        let mut session = GameSession::new(3).unwrap();
        session.play_turn(roll(3)).unwrap();
        session.place(PlayerId::new(1), cell(94));
        session.play_turn(roll(6)).unwrap();
        assert_eq!(session.phase(), Phase::GameOver(PlayerId::new(1)));
        assert_eq!(session.active_player(), PlayerId::new(1));
        assert_eq!(session.snapshot().winner, Some(PlayerId::new(1)));
        assert_eq!(
            session.play_turn(roll(1)).unwrap_err(),
            SessionError::GameOver(PlayerId::new(1))
        );
    }

    #[test]
    fn test_cursor_wraps_with_three() {
        let mut session = GameSession::new(3).unwrap();
        session.play_turn(roll(1)).unwrap();
        assert_eq!(session.active_player(), PlayerId::new(1));
        session.play_turn(roll(1)).unwrap();
        assert_eq!(session.active_player(), PlayerId::new(2));
        session.play_turn(roll(1)).unwrap();
        assert_eq!(session.active_player(), PlayerId::new(0));
    }

    #[test]
    fn test_positions_held_until_complete() {
        let mut session = GameSession::new(2).unwrap();
        let plan = session.begin_turn(roll(4)).unwrap();
        assert_eq!(session.position(PlayerId::new(0)), Cell::START);
        assert_eq!(session.phase(), Phase::Animating(plan));
        assert_eq!(session.begin_turn(roll(1)).unwrap_err(), SessionError::NotAwaitingRoll);
        assert_eq!(session.complete_turn().unwrap(), Phase::AwaitingRoll);
        assert_eq!(session.position(PlayerId::new(0)), cell(4));
        assert_eq!(session.complete_turn().unwrap_err(), SessionError::NoTurnInProgress);
    }

    #[test]
    fn test_custom_board_precedence() {
        let board: &'static Board =
            Box::leak(Box::new(Board::from_tables([(cell(3), cell(1))], [(cell(3), cell(50))])));
        let mut session = GameSession::with_board(board, 2).unwrap();
        session.play_turn(roll(3)).unwrap();
        assert_eq!(session.position(PlayerId::new(0)), cell(50));
    }

    proptest! {
        #[test]
        fn prop_cursor_cycles(players in 2usize..=4, rolls in proptest::collection::vec(1u8..=6, 1..60)) {
            let mut session = GameSession::new(players).unwrap();
            for value in rolls {
                let before = session.active_player();
                if session.play_turn(roll(value)).is_err() {
                    break;
                }
                match session.phase() {
                    Phase::GameOver(winner) => {
                        prop_assert_eq!(winner, before);
                        prop_assert_eq!(session.active_player(), before);
                    }
                    _ => prop_assert_eq!(session.active_player().index(), (before.index() + 1) % players),
                }
            }
        }

        #[test]
        fn prop_overshoot_keeps_position(start in 95u8..=99, value in 1u8..=6) {
            prop_assume!(start + value > 100);
            let mut session = GameSession::new(2).unwrap();
            session.place(PlayerId::new(0), cell(start));
            session.play_turn(roll(value)).unwrap();
            prop_assert_eq!(session.position(PlayerId::new(0)), cell(start));
            prop_assert_eq!(session.active_player(), PlayerId::new(1));
        }
    }
}
