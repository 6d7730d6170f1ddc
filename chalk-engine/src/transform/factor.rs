//! Extraction of a common factor from the addends of a sum.
//!
//! The selected terms must be structurally equal, and each must be found in a different addend of
//! the same sum, in one of these positions:
//!
//! - a factor of a product addend: `a*x`
//! - a factor of a negated product addend: `-(a*x)`
//! - an addend itself: `x`
//! - the operand of a negated addend: `-x`
//!
//! Every addend is first rewritten into a product of two factors, `rest*x`. The addends are then
//! gathered at the front of the sum and merged two at a time with the common factor rule,
//! producing `x*(rest1+rest2+...)`.

use crate::{
    error::{kind, Error},
    primitive,
    rules::{self, Rule},
    step::{Step, StepCollector},
    tree::{Equation, Kind, NodeId},
};

/// Where a selected term was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    /// The term is a factor of a product addend.
    Factor { product: NodeId },

    /// The term is a factor of a product, which is the operand of a negated addend.
    NegatedFactor { minus: NodeId },

    /// The term is an addend itself.
    Orphan,

    /// The term is the operand of a negated addend.
    Negated { minus: NodeId },
}

/// A selected term, with the addend of the enclosing sum that contains it.
#[derive(Debug, Clone, Copy)]
struct Term {
    term: NodeId,
    capture: Capture,
    addend: NodeId,
    sum: NodeId,
}

fn cannot_factor(nodes: Vec<NodeId>, reason: &'static str) -> Error {
    Error::new(nodes, kind::CannotFactor { reason })
}

/// Finds the enclosing sum of a selected term.
fn capture(eq: &Equation, term: NodeId) -> Result<Term, Error> {
    let kind_of = |id: Option<NodeId>| id.and_then(|id| eq.kind(id)).cloned();
    let parent = eq.get(term)?.parent;
    let grandparent = parent.and_then(|id| eq.parent(id));
    let great_grandparent = grandparent.and_then(|id| eq.parent(id));

    let found = match (kind_of(parent), kind_of(grandparent), kind_of(great_grandparent)) {
        (Some(Kind::Product), Some(Kind::Sum), _) => parent.zip(grandparent)
            .map(|(product, sum)| (Capture::Factor { product }, product, sum)),
        (Some(Kind::Product), Some(Kind::Minus), Some(Kind::Sum)) => grandparent.zip(great_grandparent)
            .map(|(minus, sum)| (Capture::NegatedFactor { minus }, minus, sum)),
        (Some(Kind::Sum), _, _) => parent.map(|sum| (Capture::Orphan, term, sum)),
        (Some(Kind::Minus), Some(Kind::Sum), _) => parent.zip(grandparent)
            .map(|(minus, sum)| (Capture::Negated { minus }, minus, sum)),
        _ => None,
    };

    found
        .map(|(capture, addend, sum)| Term { term, capture, addend, sum })
        .ok_or_else(|| cannot_factor(
            vec![term],
            "every selected term must be an addend of a sum, or a factor of one",
        ))
}

/// Checks the selection and finds the addend of each term.
fn validate(eq: &Equation, terms: &[NodeId]) -> Result<Vec<Term>, Error> {
    let [first, rest @ ..] = terms else {
        return Err(cannot_factor(Vec::new(), "select at least two terms"));
    };
    if rest.is_empty() {
        return Err(cannot_factor(vec![*first], "select at least two terms"));
    }

    for (i, &term) in terms.iter().enumerate() {
        eq.get(term)?;
        if terms[..i].contains(&term) {
            return Err(cannot_factor(vec![term], "the same term was selected twice"));
        }
        if !eq.structural_eq(*first, term) {
            return Err(cannot_factor(vec![term], "the selected terms are not equal"));
        }
    }

    let captured = terms.iter()
        .map(|&term| capture(eq, term))
        .collect::<Result<Vec<_>, _>>()?;

    let sum = captured[0].sum;
    for (i, term) in captured.iter().enumerate() {
        if term.sum != sum {
            return Err(cannot_factor(vec![term.term], "the selected terms are in different sums"));
        }
        if captured[..i].iter().any(|other| other.addend == term.addend) {
            return Err(cannot_factor(vec![term.term], "two selected terms are in the same addend"));
        }
    }

    Ok(captured)
}

/// Rewrites the addend containing a term into a product that has the term as a direct factor.
/// Returns the product.
fn promote(eq: &mut Equation, term: &Term, steps: &mut dyn StepCollector<Step>) -> Result<NodeId, Error> {
    match term.capture {
        Capture::Factor { product } => Ok(product),
        Capture::Orphan => rules::apply(eq, Rule::MultiplyByOne, term.term, steps),
        Capture::Negated { minus } => rules::apply(eq, Rule::NegationToProduct, minus, steps),
        Capture::NegatedFactor { minus } => {
            let product = rules::apply(eq, Rule::NegationToProduct, minus, steps)?;
            primitive::dissociate(eq, product, 1, steps)?;
            Ok(product)
        },
    }
}

/// Reshapes a product into `rest*term`, where `rest` groups every other factor.
fn split_off(
    eq: &mut Equation,
    product: NodeId,
    term: NodeId,
    steps: &mut dyn StepCollector<Step>,
) -> Result<(), Error> {
    let index = eq.index_of(product, term)?;
    let last = eq.raw(product)?.children.len() - 1;
    if index != last {
        primitive::swap(eq, product, index, last, steps)?;
    }
    if last > 1 {
        primitive::associate(eq, product, 0, last - 1, steps)?;
    }
    Ok(())
}

/// Moves the child `child` of `parent` to `position`, if it is not there already.
fn move_to(
    eq: &mut Equation,
    parent: NodeId,
    child: NodeId,
    position: usize,
    steps: &mut dyn StepCollector<Step>,
) -> Result<(), Error> {
    let index = eq.index_of(parent, child)?;
    if index != position {
        primitive::swap(eq, parent, index, position, steps)?;
    }
    Ok(())
}

/// Extracts the selected terms as a common factor of the sum they are in. Returns the resulting
/// product, `x*(rest1+rest2+...)`.
pub fn common_factor(
    eq: &mut Equation,
    terms: &[NodeId],
    steps: &mut dyn StepCollector<Step>,
) -> Result<NodeId, Error> {
    let captured = validate(eq, terms)?;
    let sum = captured[0].sum;

    let mut addends = Vec::with_capacity(captured.len());
    for term in &captured {
        let product = promote(eq, term, steps)?;
        split_off(eq, product, term.term, steps)?;
        addends.push(product);
    }

    move_to(eq, sum, addends[0], 0, steps)?;
    let mut pivot = addends[0];
    for (k, &addend) in addends.iter().enumerate().skip(1) {
        move_to(eq, sum, addend, 1, steps)?;
        let target = if eq.raw(sum)?.children.len() > 2 {
            primitive::associate(eq, sum, 0, 1, steps)?
        } else {
            sum
        };

        pivot = rules::apply(eq, Rule::CommonFactor, target, steps)?;
        if k >= 2 {
            let (remainders, _) = rules::pair(eq, pivot, Kind::Product)?;
            primitive::dissociate(eq, remainders, 0, steps)?;
        }
    }

    primitive::swap(eq, pivot, 0, 1, steps)?;
    Ok(pivot)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn factor(input: &str, paths: &[&[usize]]) -> Result<String, Error> {
        let mut eq = Equation::parse(input).unwrap();
        let terms = paths.iter().map(|path| eq.at(path).unwrap()).collect::<Vec<_>>();
        common_factor(&mut eq, &terms, &mut ())?;
        assert!(eq.check_links());
        Ok(eq.to_string())
    }

    #[test]
    fn two_products() {
        assert_eq!(factor("a*x+a*y=0", &[&[0, 0, 0], &[0, 1, 0]]).unwrap(), "a*(x+y)=0");
        assert_eq!(factor("x*a+y*a=0", &[&[0, 0, 1], &[0, 1, 1]]).unwrap(), "a*(x+y)=0");
    }

    #[test]
    fn many_factors_and_addends() {
        assert_eq!(
            factor("2*a*b+c+a*d=0", &[&[0, 0, 1], &[0, 2, 0]]).unwrap(),
            "a*(2*b+d)+c=0",
        );
        assert_eq!(
            factor("a*x+a*y+a*z=0", &[&[0, 0, 0], &[0, 1, 0], &[0, 2, 0]]).unwrap(),
            "a*(x+y+z)=0",
        );
    }

    #[test]
    fn orphans_and_negations() {
        assert_eq!(factor("a+a*y=0", &[&[0, 0], &[0, 1, 0]]).unwrap(), "a*(1+y)=0");
        assert_eq!(factor("a*x-a=0", &[&[0, 0, 0], &[0, 1, 0]]).unwrap(), "a*(x-1)=0");
        assert_eq!(factor("a*x-a*y=0", &[&[0, 0, 0], &[0, 1, 0, 0]]).unwrap(), "a*(x+-1*y)=0");
    }

    #[test]
    fn factor_is_compound() {
        assert_eq!(
            factor("2*(x+1)+y*(x+1)=0", &[&[0, 0, 1], &[0, 1, 1]]).unwrap(),
            "(x+1)*(2+y)=0",
        );
    }

    #[test]
    fn rejections() {
        let reason = |input: &str, paths: &[&[usize]]| {
            let err = factor(input, paths).unwrap_err();
            err.downcast_ref::<kind::CannotFactor>().map(|kind| kind.reason)
        };

        assert_eq!(reason("a*x+b*y=0", &[&[0, 0, 0], &[0, 1, 0]]), Some("the selected terms are not equal"));
        assert_eq!(reason("a*x+a*y=0", &[&[0, 0, 0]]), Some("select at least two terms"));
        assert_eq!(reason("a*x+a*y=0", &[&[0, 0, 0], &[0, 0, 0]]), Some("the same term was selected twice"));
        assert_eq!(reason("a*a+y=0", &[&[0, 0, 0], &[0, 0, 1]]), Some("two selected terms are in the same addend"));
        assert_eq!(reason("a*x+y=a*z+w", &[&[0, 0, 0], &[1, 0, 0]]), Some("the selected terms are in different sums"));
        assert_eq!(
            reason("a*x=a*y", &[&[0, 0], &[1, 0]]),
            Some("every selected term must be an addend of a sum, or a factor of one"),
        );
    }
}
