mod script;
pub use script::ScriptedSource;

use crate::dice;
use crate::dice::DiceTerm;
use crate::dice::Sign;
use crate::error;
use itertools::Itertools;

/// The dices thrown for a single term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    term: DiceTerm,
    dice: Vec<dice::Die>,
}

impl Outcome {
    pub(crate) fn new(term: DiceTerm, dice: Vec<dice::Die>) -> Self {
        Outcome { term, dice }
    }

    pub fn term(&self) -> &DiceTerm {
        &self.term
    }

    /// Every dice thrown, in draw order, kept or not
    pub fn dice(&self) -> &[dice::Die] {
        &self.dice
    }

    /// Kept dices plus modifier, before the term sign is applied
    pub fn subtotal(&self) -> i64 {
        let kept: u64 = self.dice.iter().filter(|d| d.kept).map(|d| d.value).sum();
        // bounded by the parser limits
        kept as i64 + self.term.modifier()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.term.count(), self.term.sides())?;
        if let Some(keep) = self.term.keep() {
            write!(f, "{keep}")?;
        }
        write!(f, ": [{}]", self.dice.iter().format(", "))?;
        if self.term.modifier() != 0 {
            write!(f, " ({:+})", self.term.modifier())?;
        }
        Ok(())
    }
}

/// Keep a roll expression result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Result {
    expression: String,
    outcomes: Vec<Outcome>,
    total: i64,
}

impl Result {
    pub(crate) fn new(expression: String, outcomes: Vec<Outcome>) -> Self {
        let total = outcomes
            .iter()
            .map(|outcome| outcome.term.sign().apply(outcome.subtotal()))
            .sum();
        Result {
            expression,
            outcomes,
            total,
        }
    }

    /// Normalized text of the rolled expression
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn get_total(&self) -> i64 {
        self.total
    }

    /// Values of every dice thrown, kept or not, term after term
    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.outcomes
            .iter()
            .flat_map(|outcome| outcome.dice.iter().map(|d| d.value))
    }

    /// Stringify each term with its dices, e.g. `2d6: [3, 5] (+1) - 1d4: [2]`
    pub fn breakdown(&self) -> String {
        self.outcomes
            .iter()
            .enumerate()
            .map(|(index, outcome)| match (index, outcome.term.sign()) {
                (0, Sign::Plus) => outcome.to_string(),
                (0, Sign::Minus) => format!("-{outcome}"),
                (_, sign) => format!(" {sign} {outcome}"),
            })
            .collect()
    }
}

impl std::fmt::Display for Result {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.breakdown(), self.total)
    }
}

/// Interface for rolling dices
pub trait Source {
    /// Draw a uniformly distributed integer in `min..=max`
    fn next_int(&mut self, min: u64, max: u64) -> error::Result<u64>;
}
