mod climber;
pub mod dice;
pub mod error;
mod evaluator;
mod parser;
pub mod roll;
pub mod solver;

pub use dice::Expression;
pub use error::Error;
pub use roll::Outcome as RollOutcome;
pub use roll::Result as RollResult;
pub use roll::ScriptedSource;
pub use roll::Source;
pub use solver::RandomSource;
pub use solver::Solver;

/// Parse a dice expression such as `2d6+1` or `4d6dl1 - 1d4`
pub fn parse(text: &str) -> error::Result<Expression> {
    parser::Parser::parse_expression(text)
}

/// Roll every term of `expr`, drawing the dices from `source`
pub fn evaluate<S: Source>(expr: &Expression, source: &mut S) -> error::Result<RollResult> {
    evaluator::Evaluator::eval(expr, source)
}

#[cfg(test)]
mod tests {
    use crate::dice::Critic;
    use crate::error::Error;
    use crate::evaluate;
    use crate::parse;
    use crate::solver::RandomSource;
    use crate::solver::Solver;
    use crate::ScriptedSource;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scripted(input: &str, values: Vec<u64>) -> crate::RollResult {
        let expr = parse(input).unwrap();
        evaluate(&expr, &mut ScriptedSource::new(values)).unwrap()
    }

    #[test]
    fn one_dice_test() {
        let res = scripted("1d6", vec![4]);
        assert_eq!(4, res.get_total());
        assert_eq!(vec![4], res.values().collect::<Vec<_>>());
        assert_eq!("1d6", res.expression());
    }

    #[test]
    fn modifier_test() {
        let res = scripted("2d10+3", vec![5, 7]);
        assert_eq!(15, res.get_total());
        assert_eq!(15, res.outcomes()[0].subtotal());
        assert_eq!("2d10: [5, 7] (+3) = 15", res.to_string());
    }

    #[test]
    fn negative_modifier_test() {
        let res = scripted("1d20-2", vec![1]);
        assert_eq!(-1, res.get_total());
        assert_eq!(Critic::Min, res.outcomes()[0].dice()[0].critic);
    }

    #[test]
    fn subtraction_test() {
        let res = scripted("2d6+1 - 1d4+1", vec![3, 5, 2]);
        // (3 + 5 + 1) - (2 + 1)
        assert_eq!(6, res.get_total());
        assert_eq!("2d6+1-1d4+1", res.expression());
        assert_eq!("2d6: [3, 5] (+1) - 1d4: [2] (+1)", res.breakdown());
    }

    #[test]
    fn keep_highest_test() {
        let res = scripted("2d20kh1+5", vec![4, 17]);
        assert_eq!(22, res.get_total());
        let kept: Vec<_> = res.outcomes()[0].dice().iter().map(|d| d.kept).collect();
        assert_eq!(vec![false, true], kept);
        assert_eq!("2d20kh1: [~4~, 17] (+5) = 22", res.to_string());
    }

    #[test]
    fn drop_lowest_test() {
        let res = scripted("4d6dl1", vec![3, 1, 6, 4]);
        assert_eq!(13, res.get_total());
    }

    #[test]
    fn keep_lowest_test() {
        let res = scripted("2d20kl1", vec![12, 8]);
        assert_eq!(8, res.get_total());
    }

    #[test]
    fn multi_terms_draw_in_order() {
        let res = scripted("1d4 + 1d8 + 1d12", vec![4, 8, 12]);
        assert_eq!(24, res.get_total());
        let critics: Vec<_> = res
            .outcomes()
            .iter()
            .map(|outcome| outcome.dice()[0].critic)
            .collect();
        assert_eq!(vec![Critic::Max, Critic::Max, Critic::Max], critics);
    }

    #[test]
    fn malformed_expressions_test() {
        for input in ["", "d", "0d6", "1d1", "1d6x"] {
            match parse(input) {
                Err(error) => assert!(error.is_parse(), "{}", input),
                Ok(expr) => panic!("`{}` parsed as `{}`", input, expr),
            }
        }
    }

    #[test]
    fn parse_is_idempotent() {
        assert_eq!(parse("4d6dl1 + 2").ok(), parse("4d6dl1 + 2").ok());
        assert_eq!(parse("d20").unwrap(), parse("1D20").unwrap());
    }

    #[test]
    fn same_script_same_result() {
        let expr = parse("3d8kh2 - 1d6 + 2").unwrap();
        let script = vec![2, 7, 7, 3];
        let lhs = evaluate(&expr, &mut ScriptedSource::new(script.clone())).unwrap();
        let rhs = evaluate(&expr, &mut ScriptedSource::new(script)).unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn short_script_test() {
        let expr = parse("3d6").unwrap();
        let mut source = ScriptedSource::new(vec![1, 2]);
        assert_eq!(
            Err(Error::Exhausted { drawn: 2 }),
            evaluate(&expr, &mut source)
        );
    }

    #[test]
    fn reason_test() {
        let solver = Solver::new("1d20+5 : stealth check").unwrap();
        assert_eq!(Some("stealth check"), solver.reason());
        assert_eq!("1d20+5", solver.as_str());
        let res = solver
            .solve_with_source(&mut ScriptedSource::new(vec![10]))
            .unwrap();
        assert_eq!(15, res.get_total());

        let solver = Solver::new("2d6 :").unwrap();
        assert_eq!(None, solver.reason());
    }

    #[test]
    fn solver_errors_keep_positions() {
        match Solver::new("2d6x : attack") {
            Err(Error::Parse {
                offending,
                position,
                ..
            }) => {
                assert_eq!("x", offending);
                assert_eq!(3, position);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let solver = Solver::new("10d20").unwrap();
        let lhs = solver.solve_with(&mut StdRng::seed_from_u64(7)).unwrap();
        let rhs = solver.solve_with(&mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn random_source_rejects_inverted_range() {
        use crate::Source;
        let mut rng = StdRng::seed_from_u64(0);
        let mut source = RandomSource { generator: &mut rng };
        assert_eq!(Err(Error::Range { min: 2, max: 1 }), source.next_int(2, 1));
        assert_eq!(Ok(3), source.next_int(3, 3));
    }

    proptest! {
        #[test]
        fn total_stays_within_bounds(count in 1u64..=40, sides in 2u64..=100, seed in any::<u64>()) {
            let expr = parse(&format!("{count}d{sides}")).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let res = evaluate(&expr, &mut RandomSource { generator: &mut rng }).unwrap();
            let (min, max) = (count as i64, (count * sides) as i64);
            prop_assert!(res.get_total() >= min && res.get_total() <= max);
            prop_assert_eq!(count as usize, res.values().count());
            for value in res.values() {
                prop_assert!(value >= 1 && value <= sides);
            }
        }

        #[test]
        fn keep_rules_keep_the_requested_amount(count in 2u64..=20, seed in any::<u64>()) {
            let expr = parse(&format!("{count}d6kh1 + {count}d6dl1")).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let res = evaluate(&expr, &mut RandomSource { generator: &mut rng }).unwrap();
            let kept: Vec<usize> = res
                .outcomes()
                .iter()
                .map(|outcome| outcome.dice().iter().filter(|d| d.kept).count())
                .collect();
            prop_assert_eq!(vec![1, count as usize - 1], kept);
            let highest = res.outcomes()[0].dice().iter().map(|d| d.value).max().unwrap();
            prop_assert_eq!(highest as i64, res.outcomes()[0].subtotal());
        }
    }
}
