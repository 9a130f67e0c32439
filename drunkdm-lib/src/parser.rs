use crate::climber::C;
use crate::dice::DiceTerm;
use crate::dice::Expression;
use crate::dice::KeepRule;
use crate::dice::Sign;
use crate::error::Error;
use crate::error::Result;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest::Parser as _;
use pest_derive::Parser;

pub(crate) mod limits {
    /// Arbitrary limits to avoid oom
    pub(crate) const MAX_DICE_AMOUNT: u64 = 5000;
    pub(crate) const MAX_DICE_SIDES: u64 = 5000;
    pub(crate) const MAX_MODIFIER: u64 = 1_000_000;
}

/// Pest parser
#[derive(Parser)]
#[grammar = "drunkdm.pest"]
pub(crate) struct Parser;

impl Parser {
    /// Parse a whole dice expression, rejecting anything left unconsumed
    pub(crate) fn parse_expression(input: &str) -> Result<Expression> {
        let expr = Self::parse(Rule::command, input)
            .map_err(|error| Self::syntax_error(input, error))?
            .next()
            .ok_or_else(|| Error::parse(input, 0, "expected a dice expression"))?;
        let terms = C.chain(expr.into_inner(), Self::dice_term)?;
        Expression::new(terms).ok_or_else(|| Error::parse(input, 0, "expected a dice term"))
    }

    fn dice_term(pair: Pair<Rule>) -> Result<DiceTerm> {
        let span = pair.as_span();
        let (text, position) = (span.as_str(), span.start());
        let mut count = 1;
        let mut sides = None;
        let mut keep = None;
        let mut modifier = 0;
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::count => count = Self::extract_value(inner)?,
                Rule::sides => sides = Some(Self::extract_value(inner)?),
                Rule::keep_hi => keep = Some(KeepRule::KeepHighest(Self::extract_value(inner)?)),
                Rule::keep_lo => keep = Some(KeepRule::KeepLowest(Self::extract_value(inner)?)),
                Rule::drop_hi => keep = Some(KeepRule::DropHighest(Self::extract_value(inner)?)),
                Rule::drop_lo => keep = Some(KeepRule::DropLowest(Self::extract_value(inner)?)),
                Rule::modifier => modifier = Self::extract_modifier(inner)?,
                _ => unreachable!("{:#?}", inner),
            }
        }
        let sides = sides.ok_or_else(|| Error::parse(text, position, "missing number of sides"))?;
        if count == 0 {
            return Err(Error::parse(text, position, "at least one dice must be rolled"));
        }
        if count > limits::MAX_DICE_AMOUNT {
            return Err(Error::parse(
                text,
                position,
                format!("exceeded max allowed amount of dices `{}`", limits::MAX_DICE_AMOUNT),
            ));
        }
        if sides < 2 {
            return Err(Error::parse(text, position, "a dice needs at least 2 sides"));
        }
        if sides > limits::MAX_DICE_SIDES {
            return Err(Error::parse(
                text,
                position,
                format!("exceeded max allowed number of dice sides `{}`", limits::MAX_DICE_SIDES),
            ));
        }
        if let Some(rule) = keep {
            if !rule.fits(count) {
                return Err(Error::parse(
                    text,
                    position,
                    format!("`{rule}` does not fit a roll of {count} dices"),
                ));
            }
        }
        Ok(DiceTerm::new(Sign::Plus, count, sides, modifier, keep))
    }

    /// Read the number wrapped by `count`, `sides` and the keep rules
    fn extract_value(pair: Pair<Rule>) -> Result<u64> {
        let span = pair.as_span();
        let number = pair
            .into_inner()
            .next()
            .ok_or_else(|| Error::parse(span.as_str(), span.start(), "expected a number"))?;
        Self::number(number)
    }

    fn extract_modifier(pair: Pair<Rule>) -> Result<i64> {
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let (sign, number) = match (inner.next(), inner.next()) {
            (Some(sign), Some(number)) => (sign, number),
            _ => return Err(Error::parse(span.as_str(), span.start(), "expected a modifier")),
        };
        let value = Self::number(number)?;
        if value > limits::MAX_MODIFIER {
            return Err(Error::parse(
                span.as_str(),
                span.start(),
                format!("exceeded max allowed modifier `{}`", limits::MAX_MODIFIER),
            ));
        }
        // bounded by MAX_MODIFIER, the cast is lossless
        let value = value as i64;
        Ok(match sign.as_rule() {
            Rule::sub => -value,
            _ => value,
        })
    }

    fn number(pair: Pair<Rule>) -> Result<u64> {
        pair.as_str()
            .parse::<u64>()
            .map_err(|error| Error::parse(pair.as_str(), pair.as_span().start(), error.to_string()))
    }

    fn syntax_error(input: &str, error: pest::error::Error<Rule>) -> Error {
        let position = match error.location {
            InputLocation::Pos(position) => position,
            InputLocation::Span((start, _)) => start,
        };
        let error = error.renamed_rules(|rule| {
            let name = match rule {
                Rule::number | Rule::count | Rule::sides => "number",
                Rule::add | Rule::sub => "`+` or `-`",
                Rule::keep_hi | Rule::keep_lo | Rule::drop_hi | Rule::drop_lo => "keep rule",
                Rule::modifier => "modifier",
                Rule::dice | Rule::expr => "dice term",
                Rule::EOI => "end of input",
                _ => "token",
            };
            name.to_owned()
        });
        let offending = input.get(position..).unwrap_or_default();
        Error::parse(offending, position, error.variant.message())
    }
}
