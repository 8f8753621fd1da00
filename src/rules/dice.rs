use std::{fmt::{self, Debug, Display}, num::NonZeroU8};

use rand::{Rng, random_range};

/// Number of cosmetic faces shown before a roll settles.
pub const ROLL_FRAMES: usize = 15;

/// A single six-sided die showing a value in `1..=6`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Die {
    value: NonZeroU8,
}

impl Die {
    pub const ALL: [Self; 6] = [
        Die::from_number(1), Die::from_number(2), Die::from_number(3),
        Die::from_number(4), Die::from_number(5), Die::from_number(6),
    ];

    pub fn roll() -> Self {
        Die::from_number(random_range(1..=6))
    }

    pub fn roll_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Die::from_number(rng.random_range(1..=6))
    }

    /// Panics on values outside `1..=6`; intended for literals.
    pub const fn from_number(value: u8) -> Self {
        assert!(value >= 1 && value <= 6, "die value out of range");
        match NonZeroU8::new(value) {
            Some(value) => Die { value },
            None => unreachable!(),
        }
    }

    pub fn new(value: u8) -> Option<Self> {
        (1..=6).contains(&value).then(|| Die::from_number(value))
    }

    pub fn value(&self) -> u8 {
        self.value.get()
    }

    /// Starts the rolling animation for `frames` cosmetic faces, settling on a fresh roll.
    pub fn rolling(frames: usize) -> RollingDie {
        RollingDie::new(Die::roll(), frames)
    }
}

impl Debug for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Die({})", self.value)
    }
}

impl Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The faces flashed while a die is rolling.
///
/// Yields `frames` independent random faces and then stops. The faces are
/// decoration only; [`RollingDie::settled`] is the value that counts.
#[derive(Debug, Clone)]
pub struct RollingDie {
    settled: Die,
    remaining: usize,
}

impl RollingDie {
    pub fn new(settled: Die, frames: usize) -> Self {
        RollingDie { settled, remaining: frames }
    }

    pub fn settled(&self) -> Die {
        self.settled
    }
}

impl Iterator for RollingDie {
    type Item = Die;

    fn next(&mut self) -> Option<Die> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(Die::roll())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RollingDie {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_die_roll() {
        for _ in 1..=100 {
            let die = Die::roll();
            assert!(die.value() >= 1 && die.value() <= 6);
        }
    }

    #[test]
    fn test_roll_with_covers_all_faces() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[Die::roll_with(&mut rng).value() as usize - 1] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_new_range() {
        assert_eq!(Die::new(0), None);
        assert_eq!(Die::new(7), None);
        for (i, die) in Die::ALL.iter().enumerate() {
            assert_eq!(Die::new(i as u8 + 1), Some(*die));
        }
    }

    #[test]
    fn test_rolling_is_finite() {
        let settled = Die::from_number(4);
        let mut rolling = RollingDie::new(settled, ROLL_FRAMES);
        assert_eq!(rolling.len(), ROLL_FRAMES);
        let faces: Vec<Die> = rolling.by_ref().collect();
        assert_eq!(faces.len(), ROLL_FRAMES);
        assert!(faces.iter().all(|d| Die::ALL.contains(d)));
        assert_eq!(rolling.next(), None);
        assert_eq!(rolling.settled(), settled);
    }
}
