use crate::dice::DiceTerm;
use crate::error::Result;
use crate::parser::Rule;
use once_cell::sync::Lazy;
use pest::iterators::Pair;
use pest::pratt_parser::PrattParser;

/// Singleton wrapper for the Pratt parser chaining dice terms with `+` and `-`
pub(crate) struct Climber {
    inner: PrattParser<Rule>,
}

impl Climber {
    /// Flatten a chain of terms, pushing each operator into the sign of the terms on its right
    pub(crate) fn chain<'i, P, F>(&self, pairs: P, mut primary: F) -> Result<Vec<DiceTerm>>
    where
        P: Iterator<Item = Pair<'i, Rule>>,
        F: FnMut(Pair<'i, Rule>) -> Result<DiceTerm>,
    {
        self.inner
            .map_primary(|pair| primary(pair).map(|term| vec![term]))
            .map_infix(
                |lhs: Result<Vec<DiceTerm>>, op: Pair<Rule>, rhs: Result<Vec<DiceTerm>>| {
                    let (mut lhs, rhs) = (lhs?, rhs?);
                    match op.as_rule() {
                        Rule::add => lhs.extend(rhs),
                        Rule::sub => lhs.extend(rhs.into_iter().map(DiceTerm::negate)),
                        _ => unreachable!("{:#?}", op),
                    }
                    Ok(lhs)
                },
            )
            .parse(pairs)
    }
}

pub(crate) static C: Lazy<Climber> = Lazy::new(|| {
    use pest::pratt_parser::Assoc;
    use pest::pratt_parser::Op;
    Climber {
        inner: PrattParser::new()
            .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::sub, Assoc::Left)),
    }
});
