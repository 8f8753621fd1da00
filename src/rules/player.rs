use std::fmt::{self, Display};

use crate::error::SessionError;

/// Seat index of a player, `0..N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(usize);

impl PlayerId {
    pub const fn new(index: usize) -> Self {
        PlayerId(index)
    }

    pub const fn index(&self) -> usize {
        self.0
    }

    /// The seat after this one, wrapping around at `count`.
    pub fn next(&self, count: PlayerCount) -> PlayerId {
        PlayerId((self.0 + 1) % count.get())
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Number of seats at the table. Only 2, 3 and 4 are playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerCount(u8);

impl PlayerCount {
    pub const MIN: usize = 2;
    pub const MAX: usize = 4;

    pub fn new(count: usize) -> Result<Self, SessionError> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(PlayerCount(count as u8))
        } else {
            Err(SessionError::InvalidPlayerCount(count))
        }
    }

    pub fn get(&self) -> usize {
        self.0 as usize
    }
}
