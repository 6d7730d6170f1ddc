//! The interactive session: the committed equation and the history of transformations applied to
//! it.

use crate::{
    error::Error,
    samples,
    step::{Property, Step, Transformation},
    transform::{self, Direction},
    tree::{Equation, NodeId},
};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};

/// An editing session.
///
/// The session owns the committed equation. Every transformation runs on a copy of it, and the
/// copy replaces the committed equation only if the transformation succeeds; a failed
/// transformation leaves the committed equation exactly as it was.
///
/// Node ids are stable across transformations, except for the nodes a transformation removes or
/// creates. Loading a new equation invalidates every id of the old one.
#[derive(Debug)]
pub struct Session {
    /// The committed equation, created from the starter catalogue on first access.
    equation: Option<Equation>,

    /// The random number generator used to pick a starter equation.
    rng: StdRng,

    /// The transformations committed since the equation was loaded.
    history: Vec<Transformation>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Creates an empty session whose choice of starter equation is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self { equation: None, rng, history: Vec::new() }
    }

    /// Returns the committed equation, picking a starter equation if there is none yet.
    pub fn current_equation(&mut self) -> &Equation {
        let rng = &mut self.rng;
        self.equation.get_or_insert_with(|| {
            let eq = samples::pick(rng);
            info!(equation = %eq, "picked a starter equation");
            eq
        })
    }

    /// Returns the committed equation, if there is one.
    pub fn equation(&self) -> Option<&Equation> {
        self.equation.as_ref()
    }

    /// Parses an equation from text. Parse errors are logged and produce [`None`].
    pub fn create_from_text(&self, text: &str) -> Option<Equation> {
        match Equation::parse(text) {
            Ok(eq) => Some(eq),
            Err(err) => {
                warn!(%text, %err, "could not create an equation");
                None
            },
        }
    }

    /// Parses an equation from text and commits it, clearing the history. On a parse error, the
    /// committed equation is kept.
    pub fn load(&mut self, text: &str) -> Result<&Equation, chalk_error::Error> {
        let eq = Equation::parse(text).map_err(|err| {
            warn!(%text, %err, "could not load an equation");
            err
        })?;
        info!(equation = %eq, "loaded equation");
        self.history.clear();
        Ok(self.equation.insert(eq))
    }

    /// The starter equations.
    pub fn sample_expressions(&self) -> &'static [&'static str] {
        &samples::SAMPLE_EXPRESSIONS
    }

    /// The transformations committed since the equation was loaded, oldest first.
    pub fn history(&self) -> &[Transformation] {
        &self.history
    }

    /// Runs a transformation on a copy of the committed equation, and commits the copy if the
    /// transformation succeeds.
    fn transact<F>(&mut self, property: Property, op: F) -> Result<&Equation, Error>
    where
        F: FnOnce(&mut Equation, &mut Vec<Step>) -> Result<(), Error>,
    {
        let mut working = self.current_equation().clone();
        let before = working.to_string();
        let mut steps = Vec::new();

        if let Err(err) = op(&mut working, &mut steps) {
            let err = err.in_property(property);
            warn!(%property, equation = %before, %err, "rejected transformation");
            return Err(err);
        }

        debug_assert!(working.check_links(), "transformation broke the parent links");
        let after = working.to_string();
        debug!(%property, %before, %after, steps = steps.len(), "committed transformation");
        self.history.push(Transformation { property, steps, before, after });
        Ok(self.equation.insert(working))
    }

    /// Swaps a term with its left or right neighbor.
    pub fn commute(&mut self, node: NodeId, direction: Direction) -> Result<&Equation, Error> {
        self.transact(Property::Commutative, |eq, steps| {
            transform::commute(eq, node, direction, steps)
        })
    }

    /// Groups the sibling terms from `start` to `end` into one operand.
    pub fn associate(&mut self, start: NodeId, end: NodeId) -> Result<&Equation, Error> {
        self.transact(Property::Associative, |eq, steps| {
            transform::associate(eq, start, end, steps).map(drop)
        })
    }

    /// Splits a nested operation into operands of its parent.
    pub fn dissociate(&mut self, node: NodeId) -> Result<&Equation, Error> {
        self.transact(Property::Dissociative, |eq, steps| {
            transform::dissociate(eq, node, steps)
        })
    }

    /// Folds an operation of numbers into a number.
    pub fn operate(&mut self, node: NodeId) -> Result<&Equation, Error> {
        self.transact(Property::Operate, |eq, steps| {
            transform::operate(eq, node, steps).map(drop)
        })
    }

    /// Extracts the selected terms as a common factor of the sum they are in.
    pub fn common_factor(&mut self, terms: &[NodeId]) -> Result<&Equation, Error> {
        self.transact(Property::CommonFactor, |eq, steps| {
            transform::common_factor(eq, terms, steps).map(drop)
        })
    }

    /// Moves a term, or a whole side, across the equality.
    pub fn change_side(&mut self, term: NodeId) -> Result<&Equation, Error> {
        self.transact(Property::ChangeSide, |eq, steps| {
            transform::change_side(eq, term, steps).map(drop)
        })
    }

    /// Multiplies a number into the sum it multiplies.
    pub fn distribute(&mut self, single: NodeId, sum: NodeId) -> Result<&Equation, Error> {
        self.transact(Property::Distributive, |eq, steps| {
            transform::distribute(eq, single, sum, steps).map(drop)
        })
    }

    /// Returns true if `single` can be distributed over `sum`.
    pub fn is_on_distributive_form(&mut self, single: NodeId, sum: NodeId) -> bool {
        transform::is_on_distributive_form(self.current_equation(), single, sum)
    }

    /// See [`Equation::operator_symbol`].
    pub fn operator_symbol(&mut self, node: NodeId) -> Option<&'static str> {
        self.current_equation().operator_symbol(node)
    }

    /// See [`Equation::parent_operator_symbol`].
    pub fn parent_operator_symbol(&mut self, node: NodeId) -> Option<&'static str> {
        self.current_equation().parent_operator_symbol(node)
    }

    /// See [`Equation::grandparent_operator_symbol`].
    pub fn grandparent_operator_symbol(&mut self, node: NodeId) -> Option<&'static str> {
        self.current_equation().grandparent_operator_symbol(node)
    }

    /// See [`Equation::symbol_text`].
    pub fn symbol_text(&mut self, node: NodeId) -> Option<String> {
        self.current_equation().symbol_text(node)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{error::kind, rules::Rule};
    use super::*;

    fn session(text: &str) -> Session {
        let mut session = Session::with_seed(0);
        session.load(text).unwrap();
        session
    }

    #[test]
    fn lazy_starter_equation() {
        let mut session = Session::with_seed(3);
        assert!(session.equation().is_none());
        let first = session.current_equation().to_string();
        assert_eq!(session.current_equation().to_string(), first);
        assert!(session.sample_expressions().len() == 4);
    }

    #[test]
    fn commit_records_history() {
        let mut session = session("2+3=x");
        let sum = session.current_equation().at(&[0]).unwrap();
        assert_eq!(session.operate(sum).unwrap().to_string(), "5=x");

        let history = session.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].property, Property::Operate);
        assert_eq!(history[0].steps, vec![Step::Rule(Rule::AddNumbers)]);
        assert_eq!(history[0].before, "2+3=x");
        assert_eq!(history[0].after, "5=x");
    }

    #[test]
    fn failure_leaves_equation() {
        let mut session = session("a*x+b*y=0");
        let before = session.current_equation().to_string();
        let a = session.current_equation().at(&[0, 0, 0]).unwrap();
        let b = session.current_equation().at(&[0, 1, 0]).unwrap();

        let err = session.common_factor(&[a, b]).unwrap_err();
        assert!(err.is::<kind::CannotFactor>());
        assert_eq!(err.property, Some(Property::CommonFactor));
        assert_eq!(session.current_equation().to_string(), before);
        assert!(session.history().is_empty());
    }

    #[test]
    fn stale_ids_fail_gracefully() {
        let mut session = session("a+b=c");
        let b = session.current_equation().at(&[0, 1]).unwrap();
        session.load("x=y").unwrap();
        let err = session.commute(b, Direction::Left).unwrap_err();
        assert!(err.is::<kind::UnknownNode>());
    }

    #[test]
    fn bad_text() {
        let mut session = session("a=b");
        assert!(session.create_from_text("a+").is_none());
        assert!(session.load("a+").is_err());
        assert_eq!(session.current_equation().to_string(), "a=b");
        assert!(session.create_from_text("a+1=2").is_some());
    }

    #[test]
    fn symbol_queries() {
        let mut session = session("a*b=f(c)");
        let b = session.current_equation().at(&[0, 1]).unwrap();
        let c = session.current_equation().at(&[1, 0]).unwrap();
        assert_eq!(session.operator_symbol(b), None);
        assert_eq!(session.parent_operator_symbol(b), Some("*"));
        assert_eq!(session.grandparent_operator_symbol(b), Some("="));
        assert_eq!(session.parent_operator_symbol(c), Some("o-"));
        assert_eq!(session.symbol_text(c), Some("c".to_string()));
    }
}
