//! Moving a term across the equality.

use crate::{
    error::{kind, Error},
    primitive,
    rules::{self, is_negated, Rule},
    step::{Step, StepCollector},
    tree::{Equation, Kind, NodeId},
};
use super::parent_of;

/// Picks the rule that moves the last operand of a side across the equality.
fn main_term_rule(operator: &Kind, side: usize, term: &Kind) -> Option<Rule> {
    let rule = match (operator, side) {
        (Kind::Sum, 0) if is_negated(term) => Rule::MoveNegAddendLeftToRight,
        (Kind::Sum, 0) => Rule::MoveAddendLeftToRight,
        (Kind::Sum, _) if is_negated(term) => Rule::MoveNegAddendRightToLeft,
        (Kind::Sum, _) => Rule::MoveAddendRightToLeft,
        (Kind::Product, 0) if *term == Kind::Inverse => Rule::MoveInvFactorLeftToRight,
        (Kind::Product, 0) => Rule::MoveFactorLeftToRight,
        (Kind::Product, _) if *term == Kind::Inverse => Rule::MoveInvFactorRightToLeft,
        (Kind::Product, _) => Rule::MoveFactorRightToLeft,
        _ => return None,
    };
    Some(rule)
}

/// Moves a term to the other side of the equality. Returns the root.
///
/// The term is either a whole side, or a main term: an operand of the sum or product that forms a
/// side. Moving an addend negates it, and moving a factor inverts it. Moving a whole side leaves
/// zero in its place.
pub fn change_side(
    eq: &mut Equation,
    term: NodeId,
    steps: &mut dyn StepCollector<Step>,
) -> Result<NodeId, Error> {
    let parent = parent_of(eq, term)?;
    let root = eq.root();

    if parent == root {
        let rule = match eq.index_of(root, term)? {
            0 => Rule::MoveLeftSide,
            _ => Rule::MoveRightSide,
        };
        return rules::apply(eq, rule, root, steps);
    }

    let operator = eq.raw(parent)?.kind.clone();
    let term_kind = eq.raw(term)?.kind.clone();
    if eq.raw(parent)?.parent != Some(root) {
        return Err(Error::new(vec![term], kind::NotMainTermOrSide));
    }
    if operator == Kind::Product && term_kind == Kind::Zero {
        return Err(Error::new(vec![term], kind::DivisionByZero));
    }

    let side = eq.index_of(root, parent)?;
    let Some(rule) = main_term_rule(&operator, side, &term_kind) else {
        return Err(Error::new(vec![term], kind::NotMainTermOrSide));
    };

    let index = eq.index_of(parent, term)?;
    let last = eq.raw(parent)?.children.len() - 1;
    if index != last {
        primitive::swap(eq, parent, index, last, steps)?;
    }
    if last > 1 {
        primitive::associate(eq, parent, 0, last - 1, steps)?;
    }

    rules::apply(eq, rule, root, steps)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn move_term(input: &str, path: &[usize]) -> Result<String, Error> {
        let mut eq = Equation::parse(input).unwrap();
        let term = eq.at(path).unwrap();
        change_side(&mut eq, term, &mut ())?;
        assert!(eq.check_links());
        Ok(eq.to_string())
    }

    #[test]
    fn addends() {
        assert_eq!(move_term("a+b=c", &[0, 1]).unwrap(), "a=c-b");
        assert_eq!(move_term("a+b=c", &[0, 0]).unwrap(), "b=c-a");
        assert_eq!(move_term("a-b+d=c", &[0, 1]).unwrap(), "a+d=c+b");
        assert_eq!(move_term("x=a+b+c", &[1, 1]).unwrap(), "x-b=a+c");
        assert_eq!(move_term("x+y=a-1", &[1, 1]).unwrap(), "x+y+1=a");
    }

    #[test]
    fn factors() {
        assert_eq!(move_term("2*x=6", &[0, 0]).unwrap(), "x=6/2");
        assert_eq!(move_term("x/2=a", &[0, 1]).unwrap(), "x=a*2");
        assert_eq!(move_term("y=a*b*c", &[1, 0]).unwrap(), "y/a=c*b");
        assert_eq!(move_term("y*z=a/b", &[1, 1]).unwrap(), "y*z*b=a");
    }

    #[test]
    fn whole_sides() {
        assert_eq!(move_term("a+b=c", &[0]).unwrap(), "0=c-(a+b)");
        assert_eq!(move_term("a=b+c", &[1]).unwrap(), "a-(b+c)=0");
    }

    #[test]
    fn zero_factor() {
        let mut eq = Equation::parse("0*x=y").unwrap();
        let before = eq.to_string();
        let zero = eq.at(&[0, 0]).unwrap();
        let err = change_side(&mut eq, zero, &mut ()).unwrap_err();
        assert!(err.is_division_by_zero());
        assert_eq!(eq.to_string(), before);
    }

    #[test]
    fn not_main_terms() {
        assert!(move_term("a*(b+c)=d", &[0, 1, 0]).unwrap_err().is::<kind::NotMainTermOrSide>());
        assert!(move_term("-a=d", &[0, 0]).unwrap_err().is::<kind::NotMainTermOrSide>());
        assert!(move_term("f(a)=d", &[0, 0]).unwrap_err().is::<kind::NotMainTermOrSide>());
        assert!(move_term("a=d", &[]).unwrap_err().is::<kind::NoParent>());
    }
}
