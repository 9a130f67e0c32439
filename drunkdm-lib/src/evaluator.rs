use crate::dice;
use crate::dice::DiceTerm;
use crate::dice::Expression;
use crate::error::Result;
use crate::roll;

/// Represent an evaluator
pub(crate) struct Evaluator;

impl Evaluator {
    fn eval_term<S: roll::Source>(term: DiceTerm, source: &mut S) -> Result<roll::Outcome> {
        let values = Self::roll(term.count(), term.sides(), source)?;
        let kept = match term.keep() {
            Some(rule) => rule.select(&values),
            None => vec![true; values.len()],
        };
        let dice = values
            .into_iter()
            .zip(kept)
            .map(|(value, kept)| dice::Die::new(value, term.sides(), kept))
            .collect();
        Ok(roll::Outcome::new(term, dice))
    }

    // compute a whole roll expression, stopping at the first failed draw
    pub(crate) fn eval<S: roll::Source>(expr: &Expression, source: &mut S) -> Result<roll::Result> {
        let outcomes = expr
            .terms()
            .iter()
            .map(|term| Self::eval_term(*term, source))
            .collect::<Result<Vec<_>>>()?;
        Ok(roll::Result::new(expr.to_string(), outcomes))
    }

    pub(crate) fn roll<S: roll::Source>(amount: u64, sides: u64, source: &mut S) -> Result<Vec<u64>> {
        (0..amount).map(|_| source.next_int(1, sides)).collect()
    }
}
