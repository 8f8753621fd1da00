use nannou::color::{self, Srgb};
use nannou::prelude::{pt2, Draw, Point2, Rect};

use snake_ladder::config;
use snake_ladder::controller::Frame;
use snake_ladder::rules::{Board, Cell, GridPos, Jump, PlayerId};

const BOARD_OFFSET: f32 = config::BOARD_OFFSET as f32;
const TOKEN_RADIUS: f32 = 12.0;
const ACTIVE_TOKEN_RADIUS: f32 = 14.0;
const DICE_BOX: f32 = 80.0;

pub const PLAYER_COLORS: [Srgb<u8>; 4] = [color::RED, color::BLUE, color::GREEN, color::PURPLE];

/// Maps board cells to window points. Positions are measured from the top-left
/// corner of the window, then converted to nannou's centred, y-up space.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    window: Rect,
    cell: f32,
}

impl Layout {
    pub fn new(window: Rect, cell: f32) -> Self {
        Layout { window, cell }
    }

    fn point(&self, x: f32, y: f32) -> Point2 {
        pt2(self.window.left() + x, self.window.top() - y)
    }

    /// Top-left corner distance of grid row `row`, counted from the window top.
    fn row_top(&self, row: i8) -> f32 {
        self.window.h() - (row as f32 + 1.0) * self.cell - BOARD_OFFSET
    }

    pub fn square_center(&self, pos: GridPos) -> Point2 {
        self.point(
            pos.col as f32 * self.cell + self.cell / 2.0,
            self.row_top(pos.row) + self.cell / 2.0,
        )
    }

    /// Where a token sits: the centre of its square, or a parking slot under the board.
    pub fn token_center(&self, board: &Board, cell: Cell, player: PlayerId) -> Point2 {
        let pos = board.coordinates(cell);
        if pos.is_on_board() {
            return self.square_center(pos);
        }
        self.point(
            self.cell / 2.0 + player.index() as f32 * self.cell,
            self.window.h() - BOARD_OFFSET + self.cell / 2.0,
        )
    }

    fn dice_center(&self) -> Point2 {
        self.point(self.window.w() - 120.0 + DICE_BOX / 2.0, 20.0 + DICE_BOX / 2.0)
    }
}

pub fn choose_players(draw: &Draw, window: Rect) {
    draw.background().color(color::WHITE);
    draw.text("Press 2 / 3 / 4 to Select Players")
        .x_y(window.x(), window.y())
        .w(window.w())
        .font_size(28)
        .color(color::BLACK);
}

pub fn game(draw: &Draw, layout: &Layout, board: &Board, frame: &Frame) {
    draw.background().color(color::WHITE);
    draw_board(draw, layout, board);
    draw_tokens(draw, layout, board, frame);
    draw_score(draw, layout, frame);
    draw_dice(draw, layout, frame);

    if let Some(winner) = frame.banner {
        draw.rect()
            .x_y(layout.window.x(), layout.window.y())
            .w_h(layout.window.w() * 0.6, 60.0)
            .color(color::WHITE);
        draw.text(&format!("{winner} Wins!"))
            .x_y(layout.window.x(), layout.window.y())
            .w(layout.window.w() * 0.6)
            .font_size(36)
            .color(color::BLACK);
    }
}

fn draw_board(draw: &Draw, layout: &Layout, board: &Board) {
    for row in 0..10i8 {
        for col in 0..10i8 {
            let pos = GridPos { col, row };
            let center = layout.square_center(pos);
            let fill = if (row + col) % 2 == 0 { color::GAINSBORO } else { color::WHITE };
            draw.rect()
                .xy(center)
                .w_h(layout.cell, layout.cell)
                .color(fill);

            if let Some(cell) = board.cell_at(pos) {
                let offset = layout.cell / 2.0 - 12.0;
                draw.text(&cell.to_string())
                    .x_y(center.x - offset, center.y + offset)
                    .font_size(14)
                    .color(color::BLACK);
            }
        }
    }

    for jump in board.snakes() {
        let (head, tail) = jump_points(layout, board, jump);
        draw.line().start(head).end(tail).weight(4.0).color(color::RED);
        draw.ellipse().xy(head).radius(8.0).color(color::RED);
    }

    for jump in board.ladders() {
        let (foot, top) = jump_points(layout, board, jump);
        draw.line().start(foot).end(top).weight(4.0).color(color::GREEN);
        draw.rect().xy(foot).w_h(10.0, 10.0).color(color::GREEN);
    }
}

fn jump_points(layout: &Layout, board: &Board, jump: Jump) -> (Point2, Point2) {
    (
        layout.square_center(board.coordinates(jump.from)),
        layout.square_center(board.coordinates(jump.to)),
    )
}

fn draw_tokens(draw: &Draw, layout: &Layout, board: &Board, frame: &Frame) {
    let snapshot = &frame.snapshot;
    for (i, &cell) in snapshot.positions.iter().enumerate() {
        let player = PlayerId::new(i);
        let radius = if player == snapshot.active_player { ACTIVE_TOKEN_RADIUS } else { TOKEN_RADIUS };
        draw.ellipse()
            .xy(layout.token_center(board, cell, player))
            .radius(radius)
            .color(PLAYER_COLORS[i % PLAYER_COLORS.len()]);
    }
}

fn draw_score(draw: &Draw, layout: &Layout, frame: &Frame) {
    let snapshot = &frame.snapshot;
    let width = 300.0;
    let line = |y: f32| layout.point(10.0 + width / 2.0, y);

    for (i, cell) in snapshot.positions.iter().enumerate() {
        draw.text(&format!("P{}: {}", i + 1, cell))
            .xy(line(20.0 + i as f32 * 25.0))
            .w(width)
            .left_justify()
            .font_size(18)
            .color(PLAYER_COLORS[i % PLAYER_COLORS.len()]);
    }

    let last_roll = snapshot.last_roll.map_or("-".to_string(), |roll| roll.to_string());
    draw.text(&format!("Turn: {} | Last Roll: {}", snapshot.active_player, last_roll))
        .xy(line(25.0 + snapshot.positions.len() as f32 * 25.0))
        .w(width)
        .left_justify()
        .font_size(18)
        .color(color::BLACK);
}

fn draw_dice(draw: &Draw, layout: &Layout, frame: &Frame) {
    let center = layout.dice_center();
    draw.rect()
        .xy(center)
        .w_h(DICE_BOX, DICE_BOX)
        .color(color::YELLOW);
    let face = frame.dice_face.map_or("-".to_string(), |die| die.to_string());
    draw.text(&face)
        .xy(center)
        .font_size(36)
        .color(color::BLACK);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout::new(Rect::from_w_h(700.0, 800.0), 60.0)
    }

    #[test]
    fn test_first_square_bottom_left() {
        let board = Board::standard();
        let center = layout().square_center(board.coordinates(Cell::new(1).unwrap()));
        assert_eq!(center, pt2(-350.0 + 30.0, 400.0 - 670.0));
    }

    #[test]
    fn test_goal_square_top_left() {
        let board = Board::standard();
        let center = layout().square_center(board.coordinates(Cell::GOAL));
        assert_eq!(center, pt2(-350.0 + 30.0, 400.0 - 130.0));
    }

    #[test]
    fn test_unstarted_tokens_parked_apart() {
        let board = Board::standard();
        let layout = layout();
        let a = layout.token_center(board, Cell::START, PlayerId::new(0));
        let b = layout.token_center(board, Cell::START, PlayerId::new(1));
        assert_ne!(a, b);
        assert_eq!(a.y, b.y);
        assert!(a.y < layout.square_center(GridPos { col: 0, row: 0 }).y);
    }
}
