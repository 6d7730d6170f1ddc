//! Numeric evaluation of an operation.

use crate::{
    error::{kind, Error},
    primitive,
    rules::table,
    step::{Step, StepCollector},
    tree::{Equation, Kind, NodeId},
};

/// Returns true if the node is an operation that [`operate`] can fold.
fn is_foldable(kind: &Kind) -> bool {
    matches!(kind, Kind::Sum | Kind::Product | Kind::Inverse | Kind::Minus)
}

/// Folds an operation of numbers into a single number. Returns the node that replaced it.
///
/// Operands that are operations themselves are folded first, bottom-up. An operand that cannot
/// be folded because it contains variables is left as it is; the identity rules (`a+0`, `a*1`,
/// `a*0` and `a*(-1)`) still apply to it.
///
/// Sums and products of more than two operands are folded pairwise from the left: the first two
/// operands are associated and folded, until two remain.
pub fn operate(
    eq: &mut Equation,
    node: NodeId,
    steps: &mut dyn StepCollector<Step>,
) -> Result<NodeId, Error> {
    let current = eq.get(node)?;
    if current.parent.is_none() {
        return Err(Error::new(vec![node], kind::NoParent));
    }
    // a negated number is already a single number
    if !is_foldable(&current.kind) || eq.numeric_value(node).is_some() {
        return Err(Error::new(vec![node], kind::NothingToOperate));
    }

    fold(eq, node, steps)
}

fn fold(eq: &mut Equation, node: NodeId, steps: &mut dyn StepCollector<Step>) -> Result<NodeId, Error> {
    for child in eq.raw(node)?.children.clone() {
        let child_node = eq.raw(child)?;
        if !is_foldable(&child_node.kind) || eq.numeric_value(child).is_some() {
            continue;
        }

        // an operand that only partly folds is kept as it was
        let mut trial = eq.clone();
        let mut trial_steps = Vec::new();
        match fold(&mut trial, child, &mut trial_steps) {
            Ok(_) => {
                *eq = trial;
                for step in trial_steps {
                    steps.push(step);
                }
            },
            Err(err) if err.is::<kind::VariablesPresent>() => {},
            Err(err) => return Err(err),
        }
    }

    if matches!(eq.raw(node)?.kind, Kind::Sum | Kind::Product) {
        while eq.raw(node)?.children.len() > 2 {
            let pair = primitive::associate(eq, node, 0, 1, steps)?;
            table::lookup(eq, pair)?.run(eq, pair, steps)?;
        }
    }

    table::lookup(eq, node)?.run(eq, node, steps)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_f64_near;
    use pretty_assertions::assert_eq;
    use crate::rules::Rule;
    use super::*;

    fn operate_at(input: &str, path: &[usize]) -> Result<String, Error> {
        let mut eq = Equation::parse(input).unwrap();
        let node = eq.at(path).unwrap();
        operate(&mut eq, node, &mut ())?;
        assert!(eq.check_links());
        Ok(eq.to_string())
    }

    #[test]
    fn fold_pairs() {
        assert_eq!(operate_at("2+3=x", &[0]).unwrap(), "5=x");
        assert_eq!(operate_at("1*a=b", &[0]).unwrap(), "a=b");
        assert_eq!(operate_at("0+a=b", &[0]).unwrap(), "a=b");
        assert_eq!(operate_at("x=a*0", &[1]).unwrap(), "x=0");
        assert_eq!(operate_at("x=-1*a", &[1]).unwrap(), "x=-a");
        assert_eq!(operate_at("x=1+1", &[1]).unwrap(), "x=2");
    }

    #[test]
    fn fold_nested_and_n_ary() {
        assert_eq!(operate_at("2*(3+4)-1=x", &[0]).unwrap(), "13=x");
        assert_eq!(operate_at("1+2+3+4=x", &[0]).unwrap(), "10=x");
        assert_eq!(operate_at("x=2*3/4", &[1]).unwrap(), "x=1.5");
        assert_eq!(operate_at("x=-(2+3)", &[1]).unwrap(), "x=-5");
    }

    #[test]
    fn identity_over_unfoldable_operand() {
        assert_eq!(operate_at("(a+2)*1=b", &[0]).unwrap(), "a+2=b");
        assert_eq!(operate_at("(1+a*(2+3))*0=b", &[0]).unwrap(), "0=b");
    }

    #[test]
    fn variables_present() {
        let err = operate_at("a+2=b", &[0]).unwrap_err();
        assert!(err.is::<kind::VariablesPresent>());

        let err = operate_at("x=(a+2)*3", &[1]).unwrap_err();
        assert!(err.is::<kind::VariablesPresent>());
    }

    #[test]
    fn nothing_to_operate() {
        assert!(operate_at("a+2=b", &[0, 0]).unwrap_err().is::<kind::NothingToOperate>());
        assert!(operate_at("f(2)=b", &[0]).unwrap_err().is::<kind::NothingToOperate>());
        assert!(operate_at("a=b", &[]).unwrap_err().is::<kind::NoParent>());
        assert!(operate_at("x=-5", &[1]).unwrap_err().is::<kind::NothingToOperate>());
    }

    #[test]
    fn overflow_is_not_committed() {
        let huge = vec!["1e20"; 20].join("*");
        let input = format!("x=({huge})-({huge})");
        assert!(operate_at(&input, &[1]).unwrap_err().is::<kind::NotFinite>());

        let input = format!("x=({huge})*2");
        assert!(operate_at(&input, &[1]).unwrap_err().is::<kind::NotFinite>());
    }

    #[test]
    fn inverse_of_zero() {
        let err = operate_at("x=a/(2-2)", &[1, 1]).unwrap_err();
        assert!(err.is_division_by_zero());
    }

    #[test]
    fn records_steps() {
        let mut eq = Equation::parse("1+4=x").unwrap();
        let sum = eq.at(&[0]).unwrap();
        let mut steps = Vec::new();
        let five = operate(&mut eq, sum, &mut steps).unwrap();
        assert_f64_near!(eq.numeric_value(five).unwrap(), 5.0);
        assert_eq!(steps, vec![Step::Commute { i: 0, j: 1 }, Step::Rule(Rule::AddOne)]);
    }
}
