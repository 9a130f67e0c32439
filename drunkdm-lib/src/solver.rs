use crate::dice::Expression;
use crate::error::Error;
use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::parser;
use crate::roll;
use rand::Rng;

/// Default random dice roller
pub struct RandomSource<'a, T: Rng> {
    pub generator: &'a mut T,
}

impl<T: Rng> roll::Source for RandomSource<'_, T> {
    fn next_int(&mut self, min: u64, max: u64) -> Result<u64> {
        if min > max {
            return Err(Error::Range { min, max });
        }
        Ok(self.generator.gen_range(min..=max))
    }
}

const REASON_SIGIL: char = ':';

/// Represent a solver and holds the parsed query
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solver {
    query: String,
    expression: Expression,
    reason: Option<String>,
}

impl Solver {
    /// Parse `input`, an optional reason may follow a `:`, e.g. `1d20+5 : stealth`
    pub fn new(input: &str) -> Result<Self> {
        let (query, reason) = match input.split_once(REASON_SIGIL) {
            Some((query, reason)) => (query, Some(reason.trim()).filter(|r| !r.is_empty())),
            None => (input, None),
        };
        Ok(Solver {
            expression: parser::Parser::parse_expression(query)?,
            query: query.trim().to_owned(),
            reason: reason.map(str::to_owned),
        })
    }

    /// Solve the roll expression using the default Rng source
    pub fn solve(&self) -> Result<roll::Result> {
        self.solve_with(&mut rand::thread_rng())
    }

    /// Solve the roll expression using the provided Rng source
    pub fn solve_with<S: Rng>(&self, generator: &mut S) -> Result<roll::Result> {
        self.solve_with_source(&mut RandomSource { generator })
    }

    /// Solve the roll expression using the provided source
    pub fn solve_with_source<S: roll::Source>(&self, source: &mut S) -> Result<roll::Result> {
        Evaluator::eval(&self.expression, source)
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Return the query string, without the reason
    pub fn as_str(&self) -> &str {
        &self.query
    }
}
