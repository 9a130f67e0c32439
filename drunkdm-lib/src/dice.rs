/// Sign a term is accumulated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn apply(self, value: i64) -> i64 {
        match self {
            Sign::Plus => value,
            Sign::Minus => -value,
        }
    }

    fn flip(self) -> Self {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sign::Plus => write!(f, "+"),
            Sign::Minus => write!(f, "-"),
        }
    }
}

/// Optional dice modifier with the amount of dices to keep or drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeepRule {
    KeepHighest(u64),
    KeepLowest(u64),
    DropHighest(u64),
    DropLowest(u64),
}

impl KeepRule {
    /// Whether the rule leaves at least one of `count` dices
    pub fn fits(self, count: u64) -> bool {
        match self {
            KeepRule::KeepHighest(n) | KeepRule::KeepLowest(n) => n >= 1 && n <= count,
            KeepRule::DropHighest(n) | KeepRule::DropLowest(n) => n < count,
        }
    }

    /// Mark which of `values` count towards the total.
    ///
    /// Equal values are ranked by draw order, the earlier dice being the lower one.
    pub fn select(self, values: &[u64]) -> Vec<bool> {
        let len = values.len();
        let mut order: Vec<usize> = (0..len).collect();
        order.sort_by_key(|&index| values[index]);
        let kept = match self {
            KeepRule::KeepHighest(n) => len - clamp(n, len)..len,
            KeepRule::KeepLowest(n) => 0..clamp(n, len),
            KeepRule::DropHighest(n) => 0..len - clamp(n, len),
            KeepRule::DropLowest(n) => clamp(n, len)..len,
        };
        let mut selected = vec![false; len];
        for &index in &order[kept] {
            selected[index] = true;
        }
        selected
    }
}

fn clamp(n: u64, len: usize) -> usize {
    usize::try_from(n).map_or(len, |n| n.min(len))
}

impl std::fmt::Display for KeepRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeepRule::KeepHighest(n) => write!(f, "kh{n}"),
            KeepRule::KeepLowest(n) => write!(f, "kl{n}"),
            KeepRule::DropHighest(n) => write!(f, "dh{n}"),
            KeepRule::DropLowest(n) => write!(f, "dl{n}"),
        }
    }
}

/// One group of identical dices, e.g. `4d6dl1+2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceTerm {
    sign: Sign,
    count: u64,
    sides: u64,
    modifier: i64,
    keep: Option<KeepRule>,
}

impl DiceTerm {
    pub(crate) fn new(
        sign: Sign,
        count: u64,
        sides: u64,
        modifier: i64,
        keep: Option<KeepRule>,
    ) -> Self {
        Self {
            sign,
            count,
            sides,
            modifier,
            keep,
        }
    }

    pub(crate) fn negate(self) -> Self {
        Self {
            sign: self.sign.flip(),
            ..self
        }
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sides(&self) -> u64 {
        self.sides
    }

    pub fn modifier(&self) -> i64 {
        self.modifier
    }

    pub fn keep(&self) -> Option<KeepRule> {
        self.keep
    }
}

/// Unsigned rendering, the sign belongs to the enclosing expression
impl std::fmt::Display for DiceTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if let Some(keep) = self.keep {
            write!(f, "{keep}")?;
        }
        if self.modifier != 0 {
            write!(f, "{:+}", self.modifier)?;
        }
        Ok(())
    }
}

/// A parsed dice expression: a non empty chain of signed terms
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    terms: Vec<DiceTerm>,
}

impl Expression {
    pub(crate) fn new(terms: Vec<DiceTerm>) -> Option<Self> {
        if terms.is_empty() {
            None
        } else {
            Some(Self { terms })
        }
    }

    pub fn terms(&self) -> &[DiceTerm] {
        &self.terms
    }
}

/// Normalized text: lowercase, explicit dice count, no whitespace
impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, term) in self.terms.iter().enumerate() {
            match (index, term.sign) {
                (0, Sign::Plus) => write!(f, "{term}")?,
                (_, sign) => write!(f, "{sign}{term}")?,
            }
        }
        Ok(())
    }
}

/// Mark if a dice result is a critic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Critic {
    Max,
    Min,
    Not,
}

/// Keep one dice result with critic marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Die {
    pub value: u64,
    pub critic: Critic,
    /// False when a keep rule discarded the dice
    pub kept: bool,
}

impl Die {
    pub fn new(value: u64, sides: u64, kept: bool) -> Self {
        Die {
            value,
            critic: match value {
                v if v == sides => Critic::Max,
                1 => Critic::Min,
                _ => Critic::Not,
            },
            kept,
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kept {
            write!(f, "{}", self.value)
        } else {
            write!(f, "~{}~", self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_highest_prefers_later_ties() {
        assert_eq!(
            vec![false, true, false, true],
            KeepRule::KeepHighest(2).select(&[3, 5, 1, 3])
        );
    }

    #[test]
    fn drop_lowest_discards_one() {
        assert_eq!(
            vec![true, false, true, true],
            KeepRule::DropLowest(1).select(&[4, 1, 6, 1])
        );
    }

    #[test]
    fn keep_lowest_and_drop_highest_agree() {
        let values = [6, 2, 5, 2, 4];
        assert_eq!(
            KeepRule::KeepLowest(3).select(&values),
            KeepRule::DropHighest(2).select(&values)
        );
    }

    #[test]
    fn oversized_rules_are_clamped() {
        assert_eq!(vec![true, true], KeepRule::KeepHighest(9).select(&[1, 2]));
        assert_eq!(vec![false, false], KeepRule::DropLowest(9).select(&[1, 2]));
    }

    #[test]
    fn critics() {
        assert_eq!(Critic::Max, Die::new(20, 20, true).critic);
        assert_eq!(Critic::Min, Die::new(1, 20, true).critic);
        assert_eq!(Critic::Not, Die::new(7, 20, true).critic);
        assert_eq!("~7~", Die::new(7, 20, false).to_string());
    }

    #[test]
    fn expression_display_is_normalized() {
        let expr = Expression::new(vec![
            DiceTerm::new(Sign::Plus, 1, 20, 5, None),
            DiceTerm::new(Sign::Minus, 4, 6, -1, Some(KeepRule::DropLowest(1))),
        ])
        .unwrap();
        assert_eq!("1d20+5-4d6dl1-1", expr.to_string());
        assert!(Expression::new(Vec::new()).is_none());
    }
}
