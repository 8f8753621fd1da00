use std::fmt::{self, Display};

/// A square on the board. `0` is the off-board start, `100` the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cell(u8);

impl Cell {
    pub const START: Self = Cell(0);
    pub const GOAL: Self = Cell(100);

    pub const fn new(index: u8) -> Option<Self> {
        if index <= Self::GOAL.0 {
            Some(Cell(index))
        } else {
            None
        }
    }

    /// Only for indices already known to be in range, e.g. table literals.
    pub(crate) const fn from_index(index: u8) -> Self {
        assert!(index <= 100, "cell index out of range");
        Cell(index)
    }

    pub const fn get(&self) -> u8 {
        self.0
    }

    pub fn is_start(&self) -> bool {
        *self == Self::START
    }

    pub fn is_goal(&self) -> bool {
        *self == Self::GOAL
    }

    /// Moves forward by `steps`. Returns `None` if that would pass the goal.
    pub fn advance(&self, steps: u8) -> Option<Self> {
        self.0.checked_add(steps).and_then(Cell::new)
    }

    /// The neighbouring cell one step towards `target`, or `None` when already there.
    pub fn step_towards(&self, target: Cell) -> Option<Self> {
        match self.0.cmp(&target.0) {
            std::cmp::Ordering::Less => Some(Cell(self.0 + 1)),
            std::cmp::Ordering::Greater => Some(Cell(self.0 - 1)),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
