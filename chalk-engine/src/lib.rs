//! Step-by-step algebraic transformations of equations.
//!
//! An [`Equation`] is a tree of nodes addressed by [`NodeId`] handles. A [`Session`] owns the
//! equation being edited and applies one algebraic property at a time to a selection of nodes:
//!
//! - [`Session::commute`], [`Session::associate`] and [`Session::dissociate`] reorder and regroup
//!   operands;
//! - [`Session::operate`] folds numeric operations;
//! - [`Session::common_factor`] and [`Session::distribute`] factor and expand;
//! - [`Session::change_side`] moves a term across the equality.
//!
//! Each property checks that it is legal for the selection and fails with an [`Error`] naming the
//! property and the reason otherwise. A failed transformation never modifies the equation.
//!
//! ```
//! use chalk_engine::Session;
//!
//! let mut session = Session::new();
//! session.load("a+b=c").unwrap();
//!
//! let b = session.current_equation().at(&[0, 1]).unwrap();
//! assert_eq!(session.change_side(b).unwrap().to_string(), "a=c-b");
//! ```

pub mod error;
pub mod primitive;
pub mod rules;
pub mod samples;
pub mod session;
pub mod step;
pub mod transform;
pub mod tree;

pub use error::Error;
pub use session::Session;
pub use step::{Property, Step, Transformation};
pub use transform::Direction;
pub use tree::{Equation, Kind, Node, NodeId, Rendered};
