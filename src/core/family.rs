//! Family members and the three dice that value them.

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// A family-member token.
///
/// Colored members take the value of the die of the same color;
/// the neutral member is worth 0 before effects and servants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FamilyColor {
    Black,
    White,
    Orange,
    Neutral,
}

impl FamilyColor {
    /// All four members, in the order they are handed out each round.
    pub const ALL: [FamilyColor; 4] = [
        FamilyColor::Black,
        FamilyColor::White,
        FamilyColor::Orange,
        FamilyColor::Neutral,
    ];

    /// The three die-valued members.
    pub const COLORED: [FamilyColor; 3] = [FamilyColor::Black, FamilyColor::White, FamilyColor::Orange];

    /// True for every member except the neutral one.
    #[must_use]
    pub const fn is_colored(self) -> bool {
        !matches!(self, FamilyColor::Neutral)
    }
}

impl std::fmt::Display for FamilyColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FamilyColor::Black => "black",
            FamilyColor::White => "white",
            FamilyColor::Orange => "orange",
            FamilyColor::Neutral => "neutral",
        };
        f.write_str(name)
    }
}

/// Values of the black, white and orange dice for the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dice {
    pub black: u8,
    pub white: u8,
    pub orange: u8,
}

impl Dice {
    /// Create dice with fixed values.
    #[must_use]
    pub const fn new(black: u8, white: u8, orange: u8) -> Self {
        Self { black, white, orange }
    }

    /// Throw all three dice.
    pub fn throw(rng: &mut GameRng) -> Self {
        Self {
            black: rng.roll_die(),
            white: rng.roll_die(),
            orange: rng.roll_die(),
        }
    }

    /// Base value of a family member of the given color.
    #[must_use]
    pub const fn value(&self, color: FamilyColor) -> i32 {
        match color {
            FamilyColor::Black => self.black as i32,
            FamilyColor::White => self.white as i32,
            FamilyColor::Orange => self.orange as i32,
            FamilyColor::Neutral => 0,
        }
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dice_values() {
        let dice = Dice::new(3, 5, 2);
        assert_eq!(dice.value(FamilyColor::Black), 3);
        assert_eq!(dice.value(FamilyColor::White), 5);
        assert_eq!(dice.value(FamilyColor::Orange), 2);
        assert_eq!(dice.value(FamilyColor::Neutral), 0);
    }

    #[test]
    fn test_throw_is_deterministic() {
        let a = Dice::throw(&mut GameRng::new(11));
        let b = Dice::throw(&mut GameRng::new(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_colored() {
        assert!(FamilyColor::White.is_colored());
        assert!(!FamilyColor::Neutral.is_colored());
        assert_eq!(FamilyColor::COLORED.len(), 3);
    }
}
