use chalk_engine::{Direction, Session};
use proptest::prelude::*;

fn session(text: &str) -> Session {
    let mut session = Session::with_seed(0);
    session.load(text).unwrap();
    session
}

/// `v0+v1+...+v(n-1)`.
fn variables(n: usize, op: &str) -> String {
    (0..n).map(|i| format!("v{}", i)).collect::<Vec<_>>().join(op)
}

/// Joins integers with an operator, wrapping negative ones in parentheses.
fn numbers(values: &[i64], op: &str) -> String {
    values
        .iter()
        .map(|v| if *v < 0 { format!("({})", v) } else { v.to_string() })
        .collect::<Vec<_>>()
        .join(op)
}

/// A sum length with a term that has a right neighbor.
fn term_with_neighbor() -> impl Strategy<Value = (usize, usize)> {
    (2usize..7).prop_flat_map(|n| (Just(n), 0..n - 1))
}

/// A product length with any one of its factors.
fn any_factor() -> impl Strategy<Value = (usize, usize)> {
    (2usize..7).prop_flat_map(|n| (Just(n), 0..n))
}

/// A sum length with a run of at least two terms that is not the whole sum.
fn inner_run() -> impl Strategy<Value = (usize, usize, usize)> {
    (3usize..8)
        .prop_flat_map(|n| (Just(n), 0..n - 1))
        .prop_flat_map(|(n, i)| (Just(n), Just(i), i + 1..n))
        .prop_filter("the run must not cover every term", |&(n, i, j)| !(i == 0 && j == n - 1))
}

fn small_ints(range: std::ops::Range<i64>) -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    prop::collection::vec(range, 2..6)
        .prop_flat_map(|values| (Just(values.clone()), Just(values).prop_shuffle()))
}

proptest! {
    #[test]
    fn commute_there_and_back((n, i) in term_with_neighbor()) {
        let text = format!("{}=w", variables(n, "+"));
        let mut session = session(&text);
        let term = session.current_equation().at(&[0, i]).unwrap();

        session.commute(term, Direction::Right).unwrap();
        prop_assert_eq!(session.current_equation().at(&[0, i + 1]), Some(term));
        let after = session.commute(term, Direction::Left).unwrap().to_string();
        prop_assert_eq!(after, text);
    }

    #[test]
    fn associate_then_dissociate((n, i, j) in inner_run()) {
        let text = format!("{}=w", variables(n, "*"));
        let mut session = session(&text);
        let start = session.current_equation().at(&[0, i]).unwrap();
        let end = session.current_equation().at(&[0, j]).unwrap();

        let grouped = session.associate(end, start).unwrap();
        let group = grouped.at(&[0, i]).unwrap();
        prop_assert_eq!(grouped.children(group).len(), j - i + 1);

        let after = session.dissociate(group).unwrap().to_string();
        prop_assert_eq!(after, text);
    }

    #[test]
    fn sum_order_does_not_matter((values, shuffled) in small_ints(-50..50)) {
        let total = values.iter().sum::<i64>();

        for order in [&values, &shuffled] {
            let mut session = session(&format!("{}=x", numbers(order, "+")));
            let lhs = session.current_equation().at(&[0]).unwrap();
            let after = session.operate(lhs).unwrap().to_string();
            prop_assert_eq!(after, format!("{}=x", total));
        }
    }

    #[test]
    fn product_order_does_not_matter((values, shuffled) in small_ints(-4..5)) {
        let total = values.iter().product::<i64>();

        for order in [&values, &shuffled] {
            let mut session = session(&format!("x={}", numbers(order, "*")));
            let rhs = session.current_equation().at(&[1]).unwrap();
            let after = session.operate(rhs).unwrap().to_string();
            prop_assert_eq!(after, format!("x={}", total));
        }
    }

    #[test]
    fn distribute_then_factor(factor in 2i64..10, n in 2usize..6) {
        let text = format!("{}*({})=0", factor, variables(n, "+"));
        let mut session = session(&text);
        let single = session.current_equation().at(&[0, 0]).unwrap();
        let sum = session.current_equation().at(&[0, 1]).unwrap();

        let expanded = session.distribute(single, sum).unwrap();
        let terms = (0..n)
            .map(|i| expanded.at(&[0, i, 0]).unwrap())
            .collect::<Vec<_>>();

        let after = session.common_factor(&terms).unwrap().to_string();
        prop_assert_eq!(after, text);
    }

    #[test]
    fn factor_then_distribute(factor in 2i64..10, n in 2usize..6) {
        let text = format!(
            "{}=0",
            (0..n).map(|i| format!("{}*v{}", factor, i)).collect::<Vec<_>>().join("+"),
        );
        let mut session = session(&text);
        let terms = (0..n)
            .map(|i| session.current_equation().at(&[0, i, 0]).unwrap())
            .collect::<Vec<_>>();

        let factored = session.common_factor(&terms).unwrap();
        prop_assert_eq!(factored.to_string(), format!("{}*({})=0", factor, variables(n, "+")));
        let single = factored.at(&[0, 0]).unwrap();
        let sum = factored.at(&[0, 1]).unwrap();

        let after = session.distribute(single, sum).unwrap().to_string();
        prop_assert_eq!(after, text);
    }

    #[test]
    fn change_side_factor_there_and_back((n, i) in any_factor()) {
        let mut session = session(&format!("{}=w", variables(n, "*")));
        let factor = session.current_equation().at(&[0, i]).unwrap();

        let moved = session.change_side(factor).unwrap();
        prop_assert_eq!(moved.render_node(moved.at(&[1]).unwrap()), format!("w/v{}", i));
        let inverted = moved.at(&[1, 1]).unwrap();

        let back = session.change_side(inverted).unwrap();
        prop_assert_eq!(back.render_node(back.at(&[1]).unwrap()), "w");

        // the same factors, up to commuting
        let lhs = back.at(&[0]).unwrap();
        let mut factors = back.children(lhs)
            .iter()
            .map(|&factor| back.render_node(factor))
            .collect::<Vec<_>>();
        factors.sort();
        let mut expected = (0..n).map(|i| format!("v{}", i)).collect::<Vec<_>>();
        expected.sort();
        prop_assert_eq!(factors, expected);
    }

    #[test]
    fn change_side_there_and_back((n, i) in term_with_neighbor()) {
        let mut session = session(&format!("{}=w", variables(n, "+")));
        let term = session.current_equation().at(&[0, i]).unwrap();

        let moved = session.change_side(term).unwrap();
        prop_assert_eq!(moved.render_node(moved.at(&[1]).unwrap()), format!("w-v{}", i));
        let negated = moved.at(&[1, 1]).unwrap();

        let back = session.change_side(negated).unwrap();
        prop_assert_eq!(back.render_node(back.at(&[1]).unwrap()), "w");

        // the same addends, up to commuting
        let lhs = back.at(&[0]).unwrap();
        let mut addends = back.children(lhs)
            .iter()
            .map(|&addend| back.render_node(addend))
            .collect::<Vec<_>>();
        addends.sort();
        let mut expected = (0..n).map(|i| format!("v{}", i)).collect::<Vec<_>>();
        expected.sort();
        prop_assert_eq!(addends, expected);
    }
}
