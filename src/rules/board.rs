use std::sync::LazyLock;

use hashbrown::HashMap;

use crate::error::BoardError;
use crate::rules::Cell;

pub const SIDE: u8 = 10;

const SNAKES: [(u8, u8); 6] = [(16, 6), (48, 26), (62, 18), (88, 24), (95, 56), (97, 78)];

const LADDERS: [(u8, u8); 10] = [
    (2, 38), (7, 14), (8, 31), (15, 26), (21, 42),
    (28, 84), (36, 44), (51, 67), (71, 91), (78, 98),
];

static STANDARD: LazyLock<Board> = LazyLock::new(|| {
    let pairs = |table: &[(u8, u8)]| {
        table
            .iter()
            .map(|&(from, to)| (Cell::from_index(from), Cell::from_index(to)))
            .collect::<Vec<_>>()
    };
    Board::from_tables(pairs(&SNAKES[..]), pairs(&LADDERS[..]))
});

/// Column/row of a cell on the 10x10 grid. Row 0 is the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub col: i8,
    pub row: i8,
}

impl GridPos {
    /// Where unstarted tokens are parked, outside the grid.
    pub const OFF_BOARD: Self = GridPos { col: -1, row: -1 };

    pub fn is_on_board(&self) -> bool {
        *self != Self::OFF_BOARD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpKind {
    Snake,
    Ladder,
}

/// A forced relocation triggered by landing on `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Jump {
    pub kind: JumpKind,
    pub from: Cell,
    pub to: Cell,
}

/// The fixed 100-cell serpentine board with its snake and ladder tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    snakes: HashMap<Cell, Cell>,
    ladders: HashMap<Cell, Cell>,
}

impl Board {
    /// The shared board every session plays on.
    pub fn standard() -> &'static Board {
        &STANDARD
    }

    /// Builds a board after checking that every snake goes down, every ladder goes up,
    /// nothing starts or ends on cell 0 and no cell is both a snake head and a ladder foot.
    pub fn new(
        snakes: impl IntoIterator<Item = (Cell, Cell)>,
        ladders: impl IntoIterator<Item = (Cell, Cell)>,
    ) -> Result<Self, BoardError> {
        let board = Board::from_tables(snakes, ladders);
        board.validate()?;
        Ok(board)
    }

    /// Builds a board without validation.
    pub(crate) fn from_tables(
        snakes: impl IntoIterator<Item = (Cell, Cell)>,
        ladders: impl IntoIterator<Item = (Cell, Cell)>,
    ) -> Self {
        Board {
            snakes: snakes.into_iter().collect(),
            ladders: ladders.into_iter().collect(),
        }
    }

    fn validate(&self) -> Result<(), BoardError> {
        for (&head, &tail) in &self.snakes {
            check_endpoints(head, tail)?;
            if tail > head {
                return Err(BoardError::SnakeNotDescending { head, tail });
            }
            if self.ladders.contains_key(&head) {
                return Err(BoardError::Overlap(head));
            }
        }
        for (&foot, &top) in &self.ladders {
            check_endpoints(foot, top)?;
            if top < foot {
                return Err(BoardError::LadderNotAscending { foot, top });
            }
        }
        Ok(())
    }

    /// Grid position of `cell`. Rows alternate direction so the path snakes upward.
    pub fn coordinates(&self, cell: Cell) -> GridPos {
        if cell.is_start() {
            return GridPos::OFF_BOARD;
        }
        let index = cell.get() - 1;
        let row = index / SIDE;
        let col = index % SIDE;
        let col = if row % 2 == 1 { SIDE - 1 - col } else { col };
        GridPos { col: col as i8, row: row as i8 }
    }

    /// The cell drawn at a grid position, inverse of [`Board::coordinates`].
    pub fn cell_at(&self, pos: GridPos) -> Option<Cell> {
        let side = SIDE as i8;
        if !(0..side).contains(&pos.col) || !(0..side).contains(&pos.row) {
            return None;
        }
        let col = if pos.row % 2 == 1 { side - 1 - pos.col } else { pos.col };
        Cell::new((pos.row * side + col + 1) as u8)
    }

    /// The jump taken when landing on `cell`. Ladders take precedence over snakes.
    pub fn transposition(&self, cell: Cell) -> Option<Jump> {
        if let Some(&to) = self.ladders.get(&cell) {
            return Some(Jump { kind: JumpKind::Ladder, from: cell, to });
        }
        self.snakes
            .get(&cell)
            .map(|&to| Jump { kind: JumpKind::Snake, from: cell, to })
    }

    /// Applies at most one jump to `cell`.
    pub fn transpose(&self, cell: Cell) -> Cell {
        self.transposition(cell).map_or(cell, |jump| jump.to)
    }

    pub fn snakes(&self) -> impl Iterator<Item = Jump> + '_ {
        sorted(&self.snakes, JumpKind::Snake)
    }

    pub fn ladders(&self) -> impl Iterator<Item = Jump> + '_ {
        sorted(&self.ladders, JumpKind::Ladder)
    }
}

fn check_endpoints(from: Cell, to: Cell) -> Result<(), BoardError> {
    if from == to {
        return Err(BoardError::SelfLoop(from));
    }
    if from.is_start() || to.is_start() {
        return Err(BoardError::TouchesStart { from, to });
    }
    Ok(())
}

fn sorted(table: &HashMap<Cell, Cell>, kind: JumpKind) -> impl Iterator<Item = Jump> + use<> {
    let mut jumps = table
        .iter()
        .map(|(&from, &to)| Jump { kind, from, to })
        .collect::<Vec<_>>();
    jumps.sort_unstable_by_key(|jump| jump.from);
    jumps.into_iter()
}
