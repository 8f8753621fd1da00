mod cell;
pub use cell::Cell;

mod board;
pub use board::Board;
pub use board::GridPos;
pub use board::Jump;
pub use board::JumpKind;

mod dice;
pub use dice::Die;
pub use dice::RollingDie;
pub use dice::ROLL_FRAMES;

mod player;
pub use player::PlayerCount;
pub use player::PlayerId;

mod turn;
pub use turn::plan_turn;
pub use turn::MovePath;
pub use turn::TurnOutcome;
pub use turn::TurnPlan;

mod session;
pub use session::GameSession;
pub use session::Phase;
pub use session::Snapshot;
