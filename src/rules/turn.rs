use crate::rules::{Board, Cell, Die, Jump};

/// What a roll does to the active player's token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The roll would carry the token past the goal. Nothing moves.
    Overshoot,
    Landed {
        tentative: Cell,
        jump: Option<Jump>,
        resting: Cell,
    },
}

/// A resolved move for one player. Pure data; committing it is the session's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnPlan {
    pub start: Cell,
    pub roll: Die,
    pub outcome: TurnOutcome,
}

impl TurnPlan {
    /// Cell the token ends on.
    pub fn resting(&self) -> Cell {
        match self.outcome {
            TurnOutcome::Overshoot => self.start,
            TurnOutcome::Landed { resting, .. } => resting,
        }
    }

    pub fn is_overshoot(&self) -> bool {
        self.outcome == TurnOutcome::Overshoot
    }

    pub fn jump(&self) -> Option<Jump> {
        match self.outcome {
            TurnOutcome::Overshoot => None,
            TurnOutcome::Landed { jump, .. } => jump,
        }
    }

    pub fn wins(&self) -> bool {
        self.resting().is_goal()
    }

    /// The cells the token passes through, one per animation frame.
    pub fn path(&self) -> MovePath {
        match self.outcome {
            TurnOutcome::Overshoot => MovePath::empty(self.start),
            TurnOutcome::Landed { tentative, jump, .. } => {
                MovePath::new(self.start, tentative, jump.map(|j| j.to))
            }
        }
    }
}

/// Resolves a roll for a token on `start`: advance, forfeit on overshoot,
/// then apply at most one snake or ladder.
pub fn plan_turn(board: &Board, start: Cell, roll: Die) -> TurnPlan {
    let outcome = match start.advance(roll.value()) {
        None => TurnOutcome::Overshoot,
        Some(tentative) => {
            let jump = board.transposition(tentative);
            let resting = jump.map_or(tentative, |j| j.to);
            TurnOutcome::Landed { tentative, jump, resting }
        }
    };
    TurnPlan { start, roll, outcome }
}

/// Step-by-step token positions for a move: forward to the landing cell, then
/// along the snake or ladder one cell at a time. Finite and consumed as it goes.
#[derive(Debug, Clone)]
pub struct MovePath {
    current: Cell,
    target: Cell,
    then: Option<Cell>,
}

impl MovePath {
    fn new(start: Cell, target: Cell, then: Option<Cell>) -> Self {
        MovePath { current: start, target, then }
    }

    fn empty(at: Cell) -> Self {
        MovePath { current: at, target: at, then: None }
    }

    /// The last cell yielded, or the start if nothing has been yielded yet.
    pub fn current(&self) -> Cell {
        self.current
    }
}

impl Iterator for MovePath {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.current == self.target {
            self.target = self.then.take()?;
        }
        let next = self.current.step_towards(self.target)?;
        self.current = next;
        Some(next)
    }
}

impl std::iter::FusedIterator for MovePath {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::JumpKind;
    use proptest::prelude::*;

    fn cell(index: u8) -> Cell {
        Cell::new(index).unwrap()
    }

    fn roll(value: u8) -> Die {
        Die::from_number(value)
    }

    #[test]
    fn test_snake_from_ten() {
        let plan = plan_turn(Board::standard(), cell(10), roll(6));
        assert_eq!(
            plan.outcome,
            TurnOutcome::Landed {
                tentative: cell(16),
                jump: Some(Jump { kind: JumpKind::Snake, from: cell(16), to: cell(6) }),
                resting: cell(6),
            }
        );
        assert_eq!(plan.resting(), cell(6));
    }

    #[test]
    fn test_ladder_from_start() {
        let plan = plan_turn(Board::standard(), Cell::START, roll(2));
        assert_eq!(plan.jump().map(|j| j.kind), Some(JumpKind::Ladder));
        assert_eq!(plan.resting(), cell(38));
    }

    #[test]
    fn test_overshoot_forfeits() {
        let plan = plan_turn(Board::standard(), cell(95), roll(6));
        assert!(plan.is_overshoot());
        assert_eq!(plan.resting(), cell(95));
        assert_eq!(plan.path().count(), 0);
    }

    #[test]
    fn test_exact_goal_wins() {
        let plan = plan_turn(Board::standard(), cell(94), roll(6));
        assert_eq!(plan.jump(), None);
        assert_eq!(plan.resting(), Cell::GOAL);
        assert!(plan.wins());
    }

    #[test]
    fn test_path_plain_move() {
        let path: Vec<u8> = plan_turn(Board::standard(), cell(40), roll(3))
            .path()
            .map(|c| c.get())
            .collect();
        assert_eq!(path, vec![41, 42, 43]);
    }

    #[test]
    fn test_path_follows_snake_down() {
        let path: Vec<u8> = plan_turn(Board::standard(), cell(10), roll(6))
            .path()
            .map(|c| c.get())
            .collect();
        assert_eq!(path, vec![11, 12, 13, 14, 15, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6]);
    }

    #[test]
    fn test_path_follows_ladder_up() {
        let path: Vec<u8> = plan_turn(Board::standard(), cell(5), roll(2))
            .path()
            .map(|c| c.get())
            .collect();
        assert_eq!(path, vec![6, 7, 8, 9, 10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_path_is_not_restartable() {
        let mut path = plan_turn(Board::standard(), cell(40), roll(1)).path();
        assert_eq!(path.next(), Some(cell(41)));
        assert_eq!(path.next(), None);
        assert_eq!(path.next(), None);
        assert_eq!(path.current(), cell(41));
    }

    proptest! {
        #[test]
        fn prop_resting_is_single_transposition(start in 0u8..=99, value in 1u8..=6) {
            let board = Board::standard();
            let plan = plan_turn(board, cell(start), roll(value));
            if start + value <= 100 {
                let tentative = cell(start + value);
                prop_assert_eq!(plan.resting(), board.transpose(tentative));
                prop_assert_eq!(plan.path().last().unwrap_or(plan.start), plan.resting());
            } else {
                prop_assert!(plan.is_overshoot());
                prop_assert_eq!(plan.resting(), cell(start));
            }
        }
    }
}
