use std::mem;
use std::time::Duration;

use tracing::debug;

use crate::config::AnimationConfig;
use crate::rules::{Die, GameSession, MovePath, Phase, PlayerId, RollingDie, Snapshot};

/// Discrete input delivered by the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    RollRequested,
    QuitRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

enum Stage {
    Idle,
    Rolling { die: RollingDie, face: Die },
    Moving { player: PlayerId, path: MovePath },
    Celebrating { winner: PlayerId },
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Session state with any walking token shown at its in-flight cell.
    pub snapshot: Snapshot,
    /// The face in the dice box: a flicker face while rolling, otherwise the last roll.
    pub dice_face: Option<Die>,
    pub rolling: bool,
    pub banner: Option<PlayerId>,
}

/// Drives a [`GameSession`] from window events and frame time.
///
/// A roll runs through three timed stages: the die flickers, the token walks
/// cell by cell, and on a win the banner is held before the game exits. Each
/// stage advances only from [`GameController::tick`], so a quit can arrive
/// between any two frames.
pub struct GameController {
    session: GameSession,
    timing: AnimationConfig,
    stage: Stage,
    elapsed: Duration,
    quit: bool,
}

impl GameController {
    pub fn new(session: GameSession, timing: AnimationConfig) -> Self {
        GameController {
            session,
            timing,
            stage: Stage::Idle,
            elapsed: Duration::ZERO,
            quit: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.stage, Stage::Idle)
    }

    pub fn handle(&mut self, event: Event) -> Flow {
        match event {
            Event::QuitRequested => {
                debug!("quit requested");
                self.quit = true;
                Flow::Exit
            }
            Event::RollRequested => {
                self.request_roll(Die::rolling(self.timing.dice_frames));
                self.flow()
            }
        }
    }

    /// Starts a roll that will settle on `die.settled()`. Ignored unless the
    /// session is waiting for a roll and nothing is animating.
    pub fn request_roll(&mut self, mut die: RollingDie) -> bool {
        if !self.is_idle() || self.session.phase() != Phase::AwaitingRoll {
            debug!("roll ignored, turn in progress or game over");
            return false;
        }
        let face = die.next().unwrap_or(die.settled());
        self.stage = Stage::Rolling { die, face };
        self.elapsed = Duration::ZERO;
        true
    }

    /// Advances animation by `dt` of wall time.
    pub fn tick(&mut self, dt: Duration) -> Flow {
        if self.quit {
            return Flow::Exit;
        }
        self.elapsed += dt;
        while let Some(interval) = self.interval() {
            if self.elapsed < interval {
                break;
            }
            self.elapsed -= interval;
            self.advance();
            if self.quit {
                break;
            }
        }
        if self.is_idle() {
            self.elapsed = Duration::ZERO;
        }
        self.flow()
    }

    fn flow(&self) -> Flow {
        if self.quit { Flow::Exit } else { Flow::Continue }
    }

    fn interval(&self) -> Option<Duration> {
        match self.stage {
            Stage::Idle => None,
            Stage::Rolling { .. } => Some(self.timing.dice_frame()),
            Stage::Moving { .. } => Some(self.timing.step()),
            Stage::Celebrating { .. } => Some(self.timing.victory_hold()),
        }
    }

    fn advance(&mut self) {
        self.stage = match mem::replace(&mut self.stage, Stage::Idle) {
            Stage::Idle => Stage::Idle,
            Stage::Rolling { mut die, face } => match die.next() {
                Some(face) => Stage::Rolling { die, face },
                None => {
                    debug!(flicker = %face, settled = %die.settled(), "die settled");
                    self.settle(die.settled())
                }
            },
            Stage::Moving { player, mut path } => {
                if path.next().is_some() {
                    Stage::Moving { player, path }
                } else {
                    self.finish_turn()
                }
            }
            Stage::Celebrating { winner } => {
                debug!(%winner, "victory banner done");
                self.quit = true;
                Stage::Celebrating { winner }
            }
        };
    }

    fn settle(&mut self, roll: Die) -> Stage {
        let player = self.session.active_player();
        match self.session.begin_turn(roll) {
            Ok(plan) if plan.is_overshoot() => self.finish_turn(),
            Ok(plan) => Stage::Moving { player, path: plan.path() },
            Err(e) => {
                debug!(error = %e, "roll not applied");
                Stage::Idle
            }
        }
    }

    fn finish_turn(&mut self) -> Stage {
        match self.session.complete_turn() {
            Ok(Phase::GameOver(winner)) => Stage::Celebrating { winner },
            Ok(_) => Stage::Idle,
            Err(e) => {
                debug!(error = %e, "no turn to complete");
                Stage::Idle
            }
        }
    }

    pub fn frame(&self) -> Frame {
        let mut snapshot = self.session.snapshot();
        let mut dice_face = snapshot.last_roll;
        let mut banner = None;
        let mut rolling = false;
        match &self.stage {
            Stage::Idle => (),
            Stage::Rolling { face, .. } => {
                dice_face = Some(*face);
                rolling = true;
            }
            Stage::Moving { player, path } => {
                snapshot.positions[player.index()] = path.current();
            }
            Stage::Celebrating { winner } => banner = Some(*winner),
        }
        Frame { snapshot, dice_face, rolling, banner }
    }
}
