use core::fmt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A bid in the declaration round, ordered by strength.
///
/// `Pass` is the unique minimum and `NoDeclare` is the sentinel a seat holds
/// before its first real bid: weaker than every real declaration, stronger
/// only than a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Declaration {
    Pass,
    NoDeclare,
    Two,
    Three,
    Misere,
    Four,
    Nap,
    Wellington,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDeclarationError(String);

impl fmt::Display for ParseDeclarationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown declaration '{}'", self.0)
    }
}

impl std::error::Error for ParseDeclarationError {}

impl Declaration {
    pub const TABLE: [Declaration; 8] = [
        Declaration::Pass,
        Declaration::NoDeclare,
        Declaration::Two,
        Declaration::Three,
        Declaration::Misere,
        Declaration::Four,
        Declaration::Nap,
        Declaration::Wellington,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Declaration::Pass => "pass",
            Declaration::NoDeclare => "no_declare",
            Declaration::Two => "two",
            Declaration::Three => "three",
            Declaration::Misere => "misere",
            Declaration::Four => "four",
            Declaration::Nap => "nap",
            Declaration::Wellington => "wellington",
        }
    }

    /// Human description of the trick target. Static flavor data, not logic.
    pub const fn description(self) -> &'static str {
        match self {
            Declaration::Pass => "no declaration",
            Declaration::NoDeclare => "not yet declared",
            Declaration::Two => "win at least 2 tricks",
            Declaration::Three => "win at least 3 tricks",
            Declaration::Misere => "lose every trick",
            Declaration::Four => "win at least 4 tricks",
            Declaration::Nap => "win all 5 tricks",
            Declaration::Wellington => "win all 5 tricks",
        }
    }

    pub const fn success_points(self) -> i32 {
        match self {
            Declaration::Pass | Declaration::NoDeclare => 0,
            Declaration::Two => 2,
            Declaration::Three | Declaration::Misere => 3,
            Declaration::Four => 4,
            Declaration::Nap => 10,
            Declaration::Wellington => 20,
        }
    }

    pub const fn failure_points(self) -> i32 {
        match self {
            Declaration::Pass | Declaration::NoDeclare => 0,
            Declaration::Two => -2,
            Declaration::Three | Declaration::Misere => -3,
            Declaration::Four => -4,
            Declaration::Nap => -6,
            Declaration::Wellington => -12,
        }
    }

    pub const fn is_pass(self) -> bool {
        matches!(self, Declaration::Pass)
    }

    /// Whether the seat has made at least one real bid this round.
    pub const fn is_declared(self) -> bool {
        !matches!(self, Declaration::NoDeclare)
    }

    /// What may be called over this declaration: a pass, plus every strictly
    /// stronger real declaration in table order.
    pub fn declarable_list(self) -> Vec<Declaration> {
        let mut list = vec![Declaration::Pass];
        list.extend(
            Self::TABLE
                .iter()
                .copied()
                .filter(|&d| d > self && d != Declaration::NoDeclare),
        );
        list
    }

    /// Whether `tricks` won satisfies the declared target. Nap and
    /// wellington assume a five-trick hand.
    pub const fn is_achieved(self, tricks: u32) -> bool {
        match self {
            Declaration::Pass | Declaration::NoDeclare => false,
            Declaration::Two => tricks >= 2,
            Declaration::Three => tricks >= 3,
            Declaration::Misere => tricks == 0,
            Declaration::Four => tricks >= 4,
            Declaration::Nap | Declaration::Wellington => tricks == 5,
        }
    }

    /// Signed payout once the hand is judged.
    pub const fn score(self, achieved: bool) -> i32 {
        if achieved {
            self.success_points()
        } else {
            self.failure_points()
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Declaration {
    type Err = ParseDeclarationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::TABLE
            .iter()
            .copied()
            .find(|d| d.as_str() == value)
            .ok_or_else(|| ParseDeclarationError(value.to_string()))
    }
}
